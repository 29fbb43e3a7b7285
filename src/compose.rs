//! Builds the compose URL that opens a draft addressed to the agent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{EmailerError, Result};

const GMAIL_COMPOSE_URL: &str = "https://mail.google.com/mail/?view=cm&fs=1";

/// Where the draft is opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailClient {
    /// The system mail app, through a `mailto:` link.
    #[default]
    Native,
    /// Gmail's web compose window.
    Gmail,
}

impl fmt::Display for EmailClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmailClient::Native => write!(f, "native"),
            EmailClient::Gmail => write!(f, "gmail"),
        }
    }
}

impl FromStr for EmailClient {
    type Err = EmailerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "native" => Ok(EmailClient::Native),
            "gmail" => Ok(EmailClient::Gmail),
            other => Err(EmailerError::Config(format!("unknown email client '{other}'"))),
        }
    }
}

pub fn inquiry_subject(property_address: &str) -> String {
    format!("Inquiry about property at {property_address}")
}

/// Compose URL for `client`, addressed to `agent_email`, with the subject
/// and body percent-encoded.
pub fn compose_url(
    client: EmailClient,
    agent_email: Option<&str>,
    property_address: &str,
    body: &str,
) -> Result<String> {
    let to = agent_email
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .ok_or(EmailerError::MissingAgentEmail)?;

    let subject = urlencoding::encode(&inquiry_subject(property_address)).into_owned();
    let body = urlencoding::encode(body).into_owned();

    Ok(match client {
        EmailClient::Native => format!("mailto:{to}?subject={subject}&body={body}"),
        EmailClient::Gmail => format!("{GMAIL_COMPOSE_URL}&to={to}&su={subject}&body={body}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_mailto() {
        let url = compose_url(
            EmailClient::Native,
            Some("jane@example.com"),
            "123 Main St, Springfield",
            "Hi Jane,\nThanks!",
        )
        .unwrap();
        assert_eq!(
            url,
            "mailto:jane@example.com?subject=Inquiry%20about%20property%20at%20123%20Main%20St%2C%20Springfield&body=Hi%20Jane%2C%0AThanks%21"
        );
    }

    #[test]
    fn test_gmail_url() {
        let url = compose_url(EmailClient::Gmail, Some(" jane@example.com "), "1 A St", "Hi").unwrap();
        assert_eq!(
            url,
            "https://mail.google.com/mail/?view=cm&fs=1&to=jane@example.com&su=Inquiry%20about%20property%20at%201%20A%20St&body=Hi"
        );
    }

    #[test]
    fn test_missing_email() {
        assert!(matches!(
            compose_url(EmailClient::Native, None, "1 A St", "Hi"),
            Err(EmailerError::MissingAgentEmail)
        ));
        assert!(matches!(
            compose_url(EmailClient::Gmail, Some("  "), "1 A St", "Hi"),
            Err(EmailerError::MissingAgentEmail)
        ));
    }

    #[test]
    fn test_client_parsing() {
        assert_eq!("Gmail".parse::<EmailClient>().unwrap(), EmailClient::Gmail);
        assert_eq!("native".parse::<EmailClient>().unwrap(), EmailClient::Native);
        assert!("outlook".parse::<EmailClient>().is_err());
        assert_eq!(EmailClient::Gmail.to_string(), "gmail");
    }
}
