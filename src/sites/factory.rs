use super::{SiteHandler, ZillowSite};
use crate::constants::{ZILLOW_DOMAIN, ZILLOW_SITE};
use crate::error::{EmailerError, Result};
use tracing::debug;

type HandlerConstructor = fn() -> Box<dyn SiteHandler>;

/// Supported sites in match priority order: `(name, domain, constructor)`.
/// Adding a site is one new row here plus its handler.
const SITES: &[(&str, &str, HandlerConstructor)] = &[(ZILLOW_SITE, ZILLOW_DOMAIN, zillow)];

fn zillow() -> Box<dyn SiteHandler> {
    Box::new(ZillowSite::new())
}

/// Resolves the handler for a page URL by domain substring, first match wins.
///
/// Returns `None` for unsupported sites. Pure: the same URL always gives a
/// freshly built handler for the same site.
pub fn resolve_handler(url: &str) -> Option<Box<dyn SiteHandler>> {
    let handler = SITES
        .iter()
        .find(|(_, domain, _)| url.contains(*domain))
        .map(|(_, _, construct)| construct());

    match &handler {
        Some(h) => debug!(url, site = h.name(), "Resolved site handler"),
        None => debug!(url, "No site handler matches"),
    }
    handler
}

/// Like [`resolve_handler`], for callers that cannot go on without a handler.
pub fn require_handler(url: &str) -> Result<Box<dyn SiteHandler>> {
    resolve_handler(url).ok_or_else(|| EmailerError::UnsupportedSite {
        url: url.to_string(),
    })
}

/// Supported sites as `(name, domain)` pairs, in match priority order.
pub fn supported_sites() -> Vec<(&'static str, &'static str)> {
    SITES.iter().map(|(name, domain, _)| (*name, *domain)).collect()
}
