//! Property address cascade.

use super::page::{clean, text_of, Page};
use super::patterns::{looks_like_address, title_suffix_pattern};
use super::{run_cascade, SiteMarkup, Tier};

const ADDRESS_TIERS: [Tier<String>; 4] = [
    Tier::new("heading", from_headings),
    Tier::new("semantic_attribute", from_semantic_attributes),
    Tier::new("known_class", from_known_classes),
    Tier::new("page_title", from_page_title),
];

pub fn property_address(page: &Page, markup: &SiteMarkup) -> Option<String> {
    run_cascade("property_address", &ADDRESS_TIERS, page, markup)
}

/// First `h1` that reads like a street address.
pub fn from_headings(page: &Page, _markup: &SiteMarkup) -> Option<String> {
    page.select("h1")
        .into_iter()
        .map(text_of)
        .find(|text| looks_like_address(text))
        .and_then(|text| clean(&text))
}

/// First element under the site's semantic selectors that reads like an address.
pub fn from_semantic_attributes(page: &Page, markup: &SiteMarkup) -> Option<String> {
    markup
        .address_attribute_selectors
        .iter()
        .flat_map(|selector| page.select(selector))
        .map(text_of)
        .find(|text| looks_like_address(text))
        .and_then(|text| clean(&text))
}

/// First non-empty element among the site's historical address classes.
///
/// Only the first match of each selector is considered.
pub fn from_known_classes(page: &Page, markup: &SiteMarkup) -> Option<String> {
    markup
        .address_class_selectors
        .iter()
        .filter_map(|selector| page.select(selector).first().copied())
        .find_map(|element| clean(&text_of(element)))
}

/// Prefix of a `"<address> - <SiteName>"` page title.
pub fn from_page_title(page: &Page, markup: &SiteMarkup) -> Option<String> {
    let pattern = title_suffix_pattern(markup.title_suffix)?;
    let title = page.title();
    let captures = pattern.captures(&title)?;
    clean(captures.get(1)?.as_str())
}
