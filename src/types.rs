use serde::{Deserialize, Serialize};

/// Everything one extraction request found on a listing page.
///
/// Each field is independently either a non-empty trimmed string or absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub property_address: Option<String>,
    pub agent_name: Option<String>,
    pub agent_email: Option<String>,
    pub agent_phone: Option<String>,
}

impl ExtractionResult {
    pub fn is_empty(&self) -> bool {
        self.property_address.is_none()
            && self.agent_name.is_none()
            && self.agent_email.is_none()
            && self.agent_phone.is_none()
    }
}

/// Reply to an inbound extraction request. Absent fields serialize as `null`;
/// `error` is only present when the page could not be handled at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResponse {
    #[serde(flatten)]
    pub result: ExtractionResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractionResponse {
    pub fn found(result: ExtractionResult) -> Self {
        Self { result, error: None }
    }

    pub fn unsupported(url: &str) -> Self {
        Self {
            result: ExtractionResult::default(),
            error: Some(format!("unsupported site: {url}")),
        }
    }

    pub fn is_supported(&self) -> bool {
        self.error.is_none()
    }
}
