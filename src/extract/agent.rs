//! Listing agent name / email / phone cascades.
//!
//! Tiers, most specific first:
//! 1. listing marker: the block labelled by an exact marker text
//!    ("Listing Provided by:") and its attribution element;
//! 2. agent sections: regions found near agent/contact headings;
//! 3. mailto links (email only).

use scraper::ElementRef;
use tracing::debug;

use super::page::{clean, parent_element, select_within, text_of, Page};
use super::patterns::{EMAIL, NAME_TOKEN_SEPARATOR, PERSON_NAME, PHONE, TRAILING_PUNCTUATION};
use super::sections::{contains_keyword, locate_agent_sections};
use super::{run_cascade, SiteMarkup, Tier};
use crate::constants::PLACEHOLDER_AGENT_EMAIL;

/// Agent contact details found so far. Each field is filled at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl AgentFields {
    /// Fills every field still absent from `other`; never overwrites.
    pub fn merge_missing(&mut self, other: AgentFields) {
        if self.name.is_none() {
            self.name = other.name;
        }
        if self.email.is_none() {
            self.email = other.email;
        }
        if self.phone.is_none() {
            self.phone = other.phone;
        }
    }

    fn is_complete(&self) -> bool {
        self.name.is_some() && self.email.is_some() && self.phone.is_some()
    }
}

/// What the combined extractor does when a name was found but no email.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingEmailPolicy {
    /// Leave the email absent and let the caller decide.
    #[default]
    Absent,
    /// Substitute an instructive placeholder the user must replace by hand.
    Placeholder,
}

const NAME_TIERS: [Tier<String>; 2] = [
    Tier::new("listing_marker", name_from_listing_markers),
    Tier::new("agent_section", name_from_agent_sections),
];

const EMAIL_TIERS: [Tier<String>; 3] = [
    Tier::new("listing_marker", email_from_listing_markers),
    Tier::new("agent_section", email_from_agent_sections),
    Tier::new("mailto_link", from_mailto_links),
];

const PHONE_TIERS: [Tier<String>; 2] = [
    Tier::new("listing_marker", phone_from_listing_markers),
    Tier::new("agent_section", phone_from_agent_sections),
];

pub fn agent_name(page: &Page, markup: &SiteMarkup) -> Option<String> {
    run_cascade("agent_name", &NAME_TIERS, page, markup)
}

pub fn agent_email(page: &Page, markup: &SiteMarkup) -> Option<String> {
    run_cascade("agent_email", &EMAIL_TIERS, page, markup)
}

pub fn agent_phone(page: &Page, markup: &SiteMarkup) -> Option<String> {
    run_cascade("agent_phone", &PHONE_TIERS, page, markup)
}

/// Combined single-pass extractor.
///
/// The section tier only runs while name or email is missing, mirroring the
/// older one-shot extractor; the per-field functions above each run their
/// full cascade instead.
pub fn agent_info(page: &Page, markup: &SiteMarkup, policy: MissingEmailPolicy) -> AgentFields {
    let mut found = from_listing_markers(page, markup);

    if found.name.is_none() || found.email.is_none() {
        debug!("Falling back to agent sections");
        found = scan_agent_sections(page, markup, found);
    }

    if found.email.is_none() {
        found.email = from_mailto_links(page, markup);
    }

    if found.email.is_none() && found.name.is_some() && policy == MissingEmailPolicy::Placeholder {
        debug!("No agent email found, substituting placeholder");
        found.email = Some(PLACEHOLDER_AGENT_EMAIL.to_string());
    }

    found
}

/// Reads every attribution block labelled by one of the site's markers.
///
/// Stops as soon as both name and email are known.
pub fn from_listing_markers(page: &Page, markup: &SiteMarkup) -> AgentFields {
    let mut found = AgentFields::default();

    for marker in marker_elements(page, markup) {
        let Some(container) = parent_element(marker) else {
            continue;
        };
        found.merge_missing(read_attribution_block(container, &text_of(marker), markup));

        if found.name.is_some() && found.email.is_some() {
            break;
        }
    }

    found
}

fn marker_elements<'a>(page: &'a Page, markup: &SiteMarkup) -> Vec<ElementRef<'a>> {
    page.elements()
        .filter(|element| {
            let text = text_of(*element);
            markup.listing_markers.iter().any(|marker| text == *marker)
        })
        .collect()
}

fn read_attribution_block(
    container: ElementRef<'_>,
    marker_text: &str,
    markup: &SiteMarkup,
) -> AgentFields {
    let container_text = text_of(container);

    let name = match select_within(container, markup.listing_agent_selector).first() {
        Some(agent) => match select_within(*agent, "span").first() {
            Some(span) => clean(&text_of(*span)),
            None => name_from_blob(&text_of(*agent)),
        },
        None => name_from_blob(&container_text.replacen(marker_text, "", 1)),
    };

    AgentFields {
        name,
        email: first_email(&container_text),
        phone: first_phone(&container_text),
    }
}

/// Name from an unstructured "Name, email, phone" blob: everything before
/// the first email or phone, else the first two tokens.
pub fn name_from_blob(blob: &str) -> Option<String> {
    let blob = blob.trim();
    let email_at = EMAIL.find(blob).map(|m| m.start());
    let phone_at = PHONE.find(blob).map(|m| m.start());

    match email_at.into_iter().chain(phone_at).min() {
        Some(end) => clean(&TRAILING_PUNCTUATION.replace(blob[..end].trim(), "")),
        None => {
            let tokens: Vec<&str> = NAME_TOKEN_SEPARATOR
                .split(blob)
                .filter(|token| !token.is_empty())
                .take(2)
                .collect();
            clean(&tokens.join(" "))
        }
    }
}

/// Fills the fields of `found` still absent from the located agent sections.
pub fn scan_agent_sections(page: &Page, markup: &SiteMarkup, mut found: AgentFields) -> AgentFields {
    for section in locate_agent_sections(page, markup.section_keywords) {
        if found.is_complete() {
            break;
        }

        let text = text_of(section);
        if text.is_empty() {
            continue;
        }

        if found.email.is_none() {
            found.email = first_email(&text);
        }
        if found.phone.is_none() {
            found.phone = first_phone(&text);
        }
        if found.name.is_none() {
            found.name = plausible_name(&text, markup.section_keywords);
        }
    }

    found
}

/// First capitalized multi-word sequence, unless it is itself a section
/// phrase such as "Contact Agent".
fn plausible_name(text: &str, keywords: &[&str]) -> Option<String> {
    let candidate = PERSON_NAME.find(text)?.as_str();
    if contains_keyword(&candidate.to_lowercase(), keywords) {
        debug!(candidate, "Rejecting name candidate that matches a section keyword");
        return None;
    }
    clean(candidate)
}

/// Address of the first `mailto:` link, without scheme or query string.
pub fn from_mailto_links(page: &Page, _markup: &SiteMarkup) -> Option<String> {
    let link = page.select(r#"a[href^="mailto:"]"#).into_iter().next()?;
    let address = link.value().attr("href")?.strip_prefix("mailto:")?;
    clean(address.split('?').next().unwrap_or_default())
}

fn first_email(text: &str) -> Option<String> {
    EMAIL.find(text).and_then(|m| clean(m.as_str()))
}

fn first_phone(text: &str) -> Option<String> {
    PHONE.find(text).and_then(|m| clean(m.as_str()))
}

fn name_from_listing_markers(page: &Page, markup: &SiteMarkup) -> Option<String> {
    from_listing_markers(page, markup).name
}

fn email_from_listing_markers(page: &Page, markup: &SiteMarkup) -> Option<String> {
    from_listing_markers(page, markup).email
}

fn phone_from_listing_markers(page: &Page, markup: &SiteMarkup) -> Option<String> {
    from_listing_markers(page, markup).phone
}

fn name_from_agent_sections(page: &Page, markup: &SiteMarkup) -> Option<String> {
    scan_agent_sections(page, markup, AgentFields::default()).name
}

fn email_from_agent_sections(page: &Page, markup: &SiteMarkup) -> Option<String> {
    scan_agent_sections(page, markup, AgentFields::default()).email
}

fn phone_from_agent_sections(page: &Page, markup: &SiteMarkup) -> Option<String> {
    scan_agent_sections(page, markup, AgentFields::default()).phone
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sites::zillow::ZILLOW_MARKUP;

    fn page(html: &str) -> Page {
        Page::parse("https://www.zillow.com/homedetails/1", html)
    }

    const MARKER_BLOB: &str = r#"<html><body>
        <div class="attribution">
          <span>Listing Provided by:</span>
          <span>Jane Doe, jane@example.com, (555) 123-4567</span>
        </div>
    </body></html>"#;

    #[test]
    fn test_marker_blob_without_attribution_element() {
        let p = page(MARKER_BLOB);
        assert_eq!(agent_name(&p, &ZILLOW_MARKUP), Some("Jane Doe".to_string()));
        assert_eq!(agent_email(&p, &ZILLOW_MARKUP), Some("jane@example.com".to_string()));
        assert_eq!(agent_phone(&p, &ZILLOW_MARKUP), Some("(555) 123-4567".to_string()));
    }

    #[test]
    fn test_attribution_element_with_spans() {
        let p = page(
            r#"<div>
                <p>Listing Provided by:</p>
                <div data-testid="attribution-LISTING_AGENT">
                  <span>John Smith</span>
                  <span>DRE #0123</span>
                  <span>john@smithhomes.com</span>
                </div>
                <div data-testid="attribution-BROKER">Smith Homes, 555-987-6543</div>
            </div>"#,
        );
        let found = from_listing_markers(&p, &ZILLOW_MARKUP);
        assert_eq!(found.name.as_deref(), Some("John Smith"));
        assert_eq!(found.email.as_deref(), Some("john@smithhomes.com"));
        assert_eq!(found.phone.as_deref(), Some("555-987-6543"));
    }

    #[test]
    fn test_attribution_element_without_spans() {
        let p = page(
            r#"<div>
                <p>Listing Provided by:</p>
                <div data-testid="attribution-LISTING_AGENT">Ana Ruiz: ana@ruiz.net</div>
            </div>"#,
        );
        assert_eq!(agent_name(&p, &ZILLOW_MARKUP), Some("Ana Ruiz".to_string()));
    }

    #[test]
    fn test_name_from_blob() {
        assert_eq!(name_from_blob("Jane Doe, jane@example.com"), Some("Jane Doe".to_string()));
        assert_eq!(name_from_blob("Jane Doe 555-123-4567 jane@example.com"), Some("Jane Doe".to_string()));
        assert_eq!(name_from_blob("Jane Doe, Realty One Group"), Some("Jane Doe".to_string()));
        assert_eq!(name_from_blob("Madonna"), Some("Madonna".to_string()));
        assert_eq!(name_from_blob("jane@example.com"), None);
        assert_eq!(name_from_blob("   "), None);
    }

    #[test]
    fn test_later_marker_fills_missing_fields() {
        let p = page(
            r#"<div><span>Listing Provided by:</span><span>Office line (555) 000-1111</span></div>
               <div><span>Listing Provided by:</span><span>Kim Park, kim@park.io</span></div>"#,
        );
        let found = from_listing_markers(&p, &ZILLOW_MARKUP);
        assert_eq!(found.name.as_deref(), Some("Office line"));
        assert_eq!(found.email.as_deref(), Some("kim@park.io"));
        assert_eq!(found.phone.as_deref(), Some("(555) 000-1111"));
    }

    #[test]
    fn test_section_fallback() {
        let p = page(
            r#"<div class="contact-card">
                <h2>Listed by</h2>
                <p>Maria Lopez</p>
                <p>maria.lopez@broker.com | 206.555.0199</p>
            </div>"#,
        );
        assert_eq!(agent_name(&p, &ZILLOW_MARKUP), Some("Maria Lopez".to_string()));
        assert_eq!(agent_email(&p, &ZILLOW_MARKUP), Some("maria.lopez@broker.com".to_string()));
        assert_eq!(agent_phone(&p, &ZILLOW_MARKUP), Some("206.555.0199".to_string()));
    }

    #[test]
    fn test_section_rejects_keyword_phrase() {
        let p = page(r#"<div><h3>Contact Agent</h3><p>call us today</p></div>"#);
        assert_eq!(agent_name(&p, &ZILLOW_MARKUP), None);
    }

    #[test]
    fn test_mailto_fallback_strips_query() {
        let p = page(r#"<p>Questions?</p><a href="mailto:agent@site.com?subject=hi">Email</a>"#);
        assert_eq!(agent_email(&p, &ZILLOW_MARKUP), Some("agent@site.com".to_string()));
        assert_eq!(agent_name(&p, &ZILLOW_MARKUP), None);
        assert_eq!(agent_phone(&p, &ZILLOW_MARKUP), None);
    }

    #[test]
    fn test_combined_absent_policy() {
        let p = page(r#"<div><h3>Listed by</h3><p>Sam Reed</p></div>"#);
        let found = agent_info(&p, &ZILLOW_MARKUP, MissingEmailPolicy::Absent);
        assert_eq!(found.name.as_deref(), Some("Sam Reed"));
        assert_eq!(found.email, None);
    }

    #[test]
    fn test_combined_placeholder_policy() {
        let p = page(r#"<div><h3>Listed by</h3><p>Sam Reed</p></div>"#);
        let found = agent_info(&p, &ZILLOW_MARKUP, MissingEmailPolicy::Placeholder);
        assert_eq!(found.email.as_deref(), Some(PLACEHOLDER_AGENT_EMAIL));
    }

    #[test]
    fn test_placeholder_needs_a_name() {
        let p = page("<p>Nothing useful here</p>");
        let found = agent_info(&p, &ZILLOW_MARKUP, MissingEmailPolicy::Placeholder);
        assert_eq!(found, AgentFields::default());
    }
}
