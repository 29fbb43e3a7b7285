#[cfg(test)]
mod tests {
    use agent_emailer::extract::agent::MissingEmailPolicy;
    use agent_emailer::{extract, resolve_handler, Page};

    const LISTING_URL: &str = "https://www.zillow.com/homedetails/123-Main-St-Springfield-IL-62701/1234_zpid/";

    const LISTING_PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head><title>123 Main St, Springfield, IL 62701 - Zillow</title></head>
  <body>
    <nav><a href="/">Home</a></nav>
    <h1>123 Main St, Springfield, IL</h1>
    <div data-testid="home-details-summary-address">Unit B, 125 Main St, Springfield, IL</div>
    <section>
      <div class="attribution">
        <span>Listing Provided by:</span>
        <span>Jane Doe, jane@example.com, (555) 123-4567</span>
      </div>
    </section>
  </body>
</html>"#;

    fn listing_page() -> Page {
        Page::parse(LISTING_URL, LISTING_PAGE)
    }

    #[test]
    fn test_end_to_end_listing() {
        let page = listing_page();
        let handler = resolve_handler(LISTING_URL).expect("zillow handler");

        assert_eq!(handler.property_address(&page).as_deref(), Some("123 Main St, Springfield, IL"));
        assert_eq!(handler.agent_name(&page).as_deref(), Some("Jane Doe"));
        assert_eq!(handler.agent_email(&page).as_deref(), Some("jane@example.com"));
        assert_eq!(handler.agent_phone(&page).as_deref(), Some("(555) 123-4567"));
    }

    #[test]
    fn test_end_to_end_fallback_pages() {
        let handler = resolve_handler(LISTING_URL).expect("zillow handler");

        let title_only = Page::parse(
            LISTING_URL,
            "<html><head><title>456 Oak Ave, Austin, TX - Zillow</title></head><body></body></html>",
        );
        assert_eq!(handler.property_address(&title_only).as_deref(), Some("456 Oak Ave, Austin, TX"));

        let mailto_only = Page::parse(
            LISTING_URL,
            r#"<html><body><a href="mailto:agent@site.com?subject=hi">Email</a></body></html>"#,
        );
        assert_eq!(handler.agent_email(&mailto_only).as_deref(), Some("agent@site.com"));

        let keyword_only = Page::parse(
            LISTING_URL,
            "<html><body><div><h3>Contact Agent</h3><p>call us today</p></div></body></html>",
        );
        assert_eq!(handler.agent_name(&keyword_only), None);
    }

    #[test]
    fn test_extract_response_json() {
        let response = extract(&listing_page(), Some(LISTING_URL));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["propertyAddress"], "123 Main St, Springfield, IL");
        assert_eq!(value["agentName"], "Jane Doe");
        assert_eq!(value["agentEmail"], "jane@example.com");
        assert_eq!(value["agentPhone"], "(555) 123-4567");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_unsupported_urls_return_all_null_with_error() {
        for url in [
            "https://www.redfin.com/WA/Seattle/1-Pine-St/home/1",
            "https://www.google.com/search?q=zillow",
            "",
        ] {
            let page = Page::parse(url, LISTING_PAGE);
            let response = extract(&page, Some(url));
            assert!(response.result.is_empty(), "url: {url}");
            let error = response.error.expect("error flag");
            assert!(error.contains("unsupported site"));
        }
    }

    #[test]
    fn test_results_are_trimmed_or_null() {
        let pages = [
            LISTING_PAGE,
            "",
            "<html><head><title>   </title></head><body><h1>   </h1><div class=\"ds-address\">  </div></body></html>",
            "<div><span>Listing Provided by:</span><span>   </span></div>",
            r#"<a href="mailto:?subject=empty">Email</a>"#,
        ];
        for html in pages {
            let response = extract(&Page::parse(LISTING_URL, html), None);
            let result = response.result;
            for field in [
                &result.property_address,
                &result.agent_name,
                &result.agent_email,
                &result.agent_phone,
            ] {
                if let Some(value) = field {
                    assert!(!value.is_empty());
                    assert_eq!(value, value.trim());
                }
            }
        }
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let page = listing_page();
        let first = extract(&page, None);
        let second = extract(&page, None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_heading_beats_semantic_attribute() {
        let page = Page::parse(
            LISTING_URL,
            r#"<div data-testid="address-line">9 Decoy Rd, Nowhere, NV</div><h1>123 Main St, Springfield, IL</h1>"#,
        );
        let response = extract(&page, None);
        assert_eq!(
            response.result.property_address.as_deref(),
            Some("123 Main St, Springfield, IL")
        );
    }

    #[test]
    fn test_combined_extractor_policies() {
        let handler = resolve_handler(LISTING_URL).expect("zillow handler");
        let page = Page::parse(
            LISTING_URL,
            "<html><body><div><h4>Listing agent</h4><p>Robin Hale</p></div></body></html>",
        );

        let absent = handler.agent_info(&page, MissingEmailPolicy::default());
        assert_eq!(absent.name.as_deref(), Some("Robin Hale"));
        assert_eq!(absent.email, None);

        let placeholder = handler.agent_info(&page, MissingEmailPolicy::Placeholder);
        assert!(placeholder.email.unwrap().contains("Please replace"));
    }
}
