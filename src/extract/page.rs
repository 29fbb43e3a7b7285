use scraper::{ElementRef, Html, Selector};
use tracing::warn;

/// A loaded listing page: the parsed DOM plus the URL it was loaded from.
///
/// Extractors only ever read from a `Page`. Queries that cannot be run
/// (an unparsable selector, a missing parent) yield nothing instead of
/// failing, so one brittle tier never aborts a whole extraction.
pub struct Page {
    url: String,
    document: Html,
}

impl Page {
    pub fn parse(url: impl Into<String>, html: &str) -> Self {
        Self {
            url: url.into(),
            document: Html::parse_document(html),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Text of the first `<title>` with whitespace runs collapsed to single
    /// spaces, or an empty string.
    pub fn title(&self) -> String {
        self.select("title")
            .first()
            .map(|title| title.text().collect::<String>())
            .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
            .unwrap_or_default()
    }

    /// All elements matching `css`, in document order.
    pub fn select(&self, css: &str) -> Vec<ElementRef<'_>> {
        match parse_selector(css) {
            Some(selector) => self.document.select(&selector).collect(),
            None => Vec::new(),
        }
    }

    /// Every element in the document, in document order.
    pub fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
    }
}

/// Descendants of `scope` matching `css`, in document order. `scope`
/// itself is never part of the result.
pub fn select_within<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match parse_selector(css) {
        Some(selector) => scope
            .select(&selector)
            .filter(|element| element.id() != scope.id())
            .collect(),
        None => Vec::new(),
    }
}

fn parse_selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            warn!(selector = css, "Skipping unparsable selector: {:?}", e);
            None
        }
    }
}

/// Descendant text of an element, concatenated like DOM `textContent`, and trimmed.
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

pub fn parent_element(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.parent().and_then(ElementRef::wrap)
}

pub fn next_element_sibling(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

/// Trims `text` and turns an empty result into `None`.
///
/// Every extractor result goes through here: a field is either a
/// non-empty trimmed string or absent.
pub fn clean(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
