use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmailerError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported site: {url}")]
    UnsupportedSite { url: String },

    #[error("Agent email not detected, unable to compose email")]
    MissingAgentEmail,

    #[error("Template error: {0}")]
    Template(String),

    #[error("History error: {0}")]
    History(String),
}

pub type Result<T> = std::result::Result<T, EmailerError>;
