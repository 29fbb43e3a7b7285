//! Inbound extraction request: resolve the site, run its handler, reply.

use tracing::{info, instrument, warn};

use crate::extract::Page;
use crate::sites::resolve_handler;
use crate::types::ExtractionResponse;

/// Handles one extraction request for `page`.
///
/// `url` is the active tab's URL; when absent or blank the page's own URL
/// is used. Unsupported sites yield an all-null response with `error` set.
/// This never fails: fields that could not be found are simply `None`.
#[instrument(skip(page), fields(page_url = page.url()))]
pub fn extract(page: &Page, url: Option<&str>) -> ExtractionResponse {
    let url = url.filter(|u| !u.trim().is_empty()).unwrap_or_else(|| page.url());

    let Some(handler) = resolve_handler(url) else {
        warn!(url, "Unsupported site");
        return ExtractionResponse::unsupported(url);
    };

    let result = handler.extract_all(page);
    info!(
        site = handler.name(),
        address = result.property_address.is_some(),
        agent_name = result.agent_name.is_some(),
        agent_email = result.agent_email.is_some(),
        agent_phone = result.agent_phone.is_some(),
        "Extraction finished"
    );

    ExtractionResponse::found(result)
}
