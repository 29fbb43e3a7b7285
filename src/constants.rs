/// Site name constants to ensure consistency across the codebase.
/// Each supported listing site has a user-facing name and the domain
/// substring the dispatcher matches against.

// User-friendly site names (used in CLI output and logs)
pub const ZILLOW_SITE: &str = "zillow";

// Domain substrings matched against the active page URL
pub const ZILLOW_DOMAIN: &str = "zillow.com";

// Title suffix used by the page-title address fallback
pub const ZILLOW_TITLE_SUFFIX: &str = "Zillow";

/// Exact text that labels the listing attribution block on Zillow.
pub const ZILLOW_LISTING_MARKER: &str = "Listing Provided by:";

/// Lowercased phrases that flag an element as an agent/contact heading.
/// Also used to reject capitalized phrases such as "Contact Agent" as names.
pub const AGENT_SECTION_KEYWORDS: &[&str] = &[
    "agent",
    "contact",
    "listing provided by",
    "listed by",
    "listing courtesy of",
    "listing agent",
    "seller's agent",
    "listing by",
    "represented by",
];

/// Elements considered as agent section headings, in the order a DOM
/// query would return them (document order).
pub const AGENT_HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6, div, span, p, label";

/// Substituted by the legacy combined extractor when a name was found but
/// no email, and the caller asked for it explicitly.
pub const PLACEHOLDER_AGENT_EMAIL: &str = "agent.email@example.com (Please replace with actual email)";

/// Environment variable that points at an alternative config file.
pub const CONFIG_PATH_ENV: &str = "AGENT_EMAILER_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const DEFAULT_HISTORY_PATH: &str = "contact_history.json";
pub const DEFAULT_TEMPLATES_PATH: &str = "templates.json";

