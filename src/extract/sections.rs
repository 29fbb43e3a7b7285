//! Locates DOM regions likely to hold listing agent contact details.

use scraper::ElementRef;

use super::page::{next_element_sibling, parent_element, text_of, Page};
use crate::constants::AGENT_HEADING_SELECTOR;

/// Candidate agent sections, in discovery order.
///
/// For every heading-like element (document order) whose lowercased text
/// contains one of `keywords`, this appends its next element sibling, the
/// other element children of its parent, then the parent itself. The
/// sequence may contain duplicates; consumers stop at the first match per
/// field, so repeats are harmless.
pub fn locate_agent_sections<'a>(page: &'a Page, keywords: &[&str]) -> Vec<ElementRef<'a>> {
    let mut sections = Vec::new();

    for heading in page.select(AGENT_HEADING_SELECTOR) {
        let text = text_of(heading).to_lowercase();
        if text.is_empty() || !contains_keyword(&text, keywords) {
            continue;
        }

        if let Some(sibling) = next_element_sibling(heading) {
            sections.push(sibling);
        }

        if let Some(parent) = parent_element(heading) {
            sections.extend(
                parent
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|child| child.id() != heading.id()),
            );
            sections.push(parent);
        }
    }

    sections
}

/// True when lowercased `text` contains any keyword.
pub fn contains_keyword(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}
