//! Heuristic extraction engine.
//!
//! Each entity (address, agent name, email, phone) is found by a cascade:
//! an ordered list of strategies tried until one returns a value. Strategies
//! are written once and parameterized by a [`SiteMarkup`] table, so site
//! handlers differ only in their literals.

pub mod address;
pub mod agent;
pub mod page;
pub mod patterns;
pub mod sections;

use tracing::debug;

pub use page::Page;

/// The markup literals one listing site needs for every cascade.
#[derive(Debug, Clone, Copy)]
pub struct SiteMarkup {
    /// Semantic-attribute selectors for the address, highest priority first.
    pub address_attribute_selectors: &'static [&'static str],
    /// Historical class selectors for the address, highest priority first.
    pub address_class_selectors: &'static [&'static str],
    /// Site name as it appears after the address in the page title.
    pub title_suffix: &'static str,
    /// Exact label texts that precede the listing attribution block.
    pub listing_markers: &'static [&'static str],
    /// Selector for the listing agent element inside an attribution block.
    pub listing_agent_selector: &'static str,
    /// Lowercased phrases that mark agent/contact sections.
    pub section_keywords: &'static [&'static str],
}

/// One named strategy in a cascade.
pub struct Tier<T> {
    pub name: &'static str,
    pub run: fn(&Page, &SiteMarkup) -> Option<T>,
}

impl<T> Tier<T> {
    pub const fn new(name: &'static str, run: fn(&Page, &SiteMarkup) -> Option<T>) -> Self {
        Self { name, run }
    }
}

/// Runs `tiers` in order and returns the first value produced.
pub fn run_cascade<T>(
    field: &str,
    tiers: &[Tier<T>],
    page: &Page,
    markup: &SiteMarkup,
) -> Option<T> {
    for tier in tiers {
        if let Some(value) = (tier.run)(page, markup) {
            debug!(field, tier = tier.name, "Cascade tier matched");
            return Some(value);
        }
        debug!(field, tier = tier.name, "Cascade tier found nothing");
    }
    debug!(field, "All cascade tiers exhausted");
    None
}
