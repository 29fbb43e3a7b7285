//! Site handlers: one per supported listing site.
//!
//! A handler bundles the extraction capabilities against one site's markup.
//! The cascades are shared; a site supplies its literals through
//! [`SiteHandler::markup`] and may override any capability outright.

pub mod factory;
pub mod zillow;

use crate::extract::agent::{self, AgentFields, MissingEmailPolicy};
use crate::extract::{address, Page, SiteMarkup};
use crate::types::ExtractionResult;

pub use factory::{require_handler, resolve_handler, supported_sites};
pub use zillow::ZillowSite;

/// Extraction capabilities for one listing site.
pub trait SiteHandler {
    /// Unique identifier for this site
    fn name(&self) -> &'static str;

    /// Domain substring that identifies the site's pages
    fn domain(&self) -> &'static str;

    /// Selector, marker and keyword literals for this site's markup
    fn markup(&self) -> &SiteMarkup;

    fn property_address(&self, page: &Page) -> Option<String> {
        address::property_address(page, self.markup())
    }

    fn agent_name(&self, page: &Page) -> Option<String> {
        agent::agent_name(page, self.markup())
    }

    fn agent_email(&self, page: &Page) -> Option<String> {
        agent::agent_email(page, self.markup())
    }

    fn agent_phone(&self, page: &Page) -> Option<String> {
        agent::agent_phone(page, self.markup())
    }

    /// Single-pass agent extraction kept for callers of the older combined API.
    fn agent_info(&self, page: &Page, policy: MissingEmailPolicy) -> AgentFields {
        agent::agent_info(page, self.markup(), policy)
    }

    /// Runs all four capabilities. Each field is attempted independently.
    fn extract_all(&self, page: &Page) -> ExtractionResult {
        ExtractionResult {
            property_address: self.property_address(page),
            agent_name: self.agent_name(page),
            agent_email: self.agent_email(page),
            agent_phone: self.agent_phone(page),
        }
    }
}
