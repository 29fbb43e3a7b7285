use super::SiteHandler;
use crate::constants::{
    AGENT_SECTION_KEYWORDS, ZILLOW_DOMAIN, ZILLOW_LISTING_MARKER, ZILLOW_SITE, ZILLOW_TITLE_SUFFIX,
};
use crate::extract::SiteMarkup;

/// Zillow home details markup, including class names from earlier redesigns.
pub const ZILLOW_MARKUP: SiteMarkup = SiteMarkup {
    address_attribute_selectors: &[
        r#"[data-testid="home-details-summary-address"]"#,
        r#"[data-testid*="address"]"#,
        r#"[data-testid*="property"]"#,
        r#"[aria-label*="address"]"#,
        r#"[class*="address"]"#,
    ],
    address_class_selectors: &[
        ".ds-address",
        ".address",
        ".property-address",
        ".home-address",
        ".streetAddress",
        ".hdp__sc-5vi1hi-0",
    ],
    title_suffix: ZILLOW_TITLE_SUFFIX,
    listing_markers: &[ZILLOW_LISTING_MARKER],
    listing_agent_selector: r#"[data-testid*="attribution-LISTING_AGENT"]"#,
    section_keywords: AGENT_SECTION_KEYWORDS,
};

pub struct ZillowSite;

impl ZillowSite {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ZillowSite {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteHandler for ZillowSite {
    fn name(&self) -> &'static str {
        ZILLOW_SITE
    }

    fn domain(&self) -> &'static str {
        ZILLOW_DOMAIN
    }

    fn markup(&self) -> &SiteMarkup {
        &ZILLOW_MARKUP
    }
}
