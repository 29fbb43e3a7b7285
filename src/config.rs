use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::compose::EmailClient;
use crate::constants::{CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH, DEFAULT_HISTORY_PATH, DEFAULT_TEMPLATES_PATH};
use crate::error::{EmailerError, Result};
use crate::templates::{EmailTemplate, TemplateLibrary};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub profile: Profile,
    pub email: EmailConfig,
    pub history: HistoryConfig,
    pub template_store: TemplateStoreConfig,
    pub templates: Vec<EmailTemplate>,
}

/// The sender's details, substituted into the `{{your_*}}` placeholders.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
}

impl Profile {
    /// Composing requires name, phone and email to be filled in.
    pub fn is_complete(&self) -> bool {
        [&self.full_name, &self.phone_number, &self.email]
            .iter()
            .all(|value| !value.trim().is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub client: EmailClient,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub path: PathBuf,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_HISTORY_PATH),
        }
    }
}

/// Where edits made with `templates add|edit|delete|default|reset` are saved.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TemplateStoreConfig {
    pub path: PathBuf,
}

impl Default for TemplateStoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_TEMPLATES_PATH),
        }
    }
}

impl Config {
    /// Loads the config file named by `AGENT_EMAILER_CONFIG`, else `config.toml`.
    /// A missing file means defaults.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let path = Path::new(&path);
        if !path.exists() {
            info!(path = %path.display(), "No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(path).map_err(|e| {
            EmailerError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&config_content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// `[[templates]]` from the config file, or the built-in standard
    /// inquiry when none are set.
    pub fn configured_templates(&self) -> TemplateLibrary {
        if self.templates.is_empty() {
            TemplateLibrary::default()
        } else {
            TemplateLibrary::new(self.templates.clone())
        }
    }

    /// The saved template library once one exists, else the configured templates.
    pub fn template_library(&self) -> Result<TemplateLibrary> {
        match TemplateLibrary::load(&self.template_store.path)? {
            Some(library) => Ok(library),
            None => Ok(self.configured_templates()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.email.client, EmailClient::Native);
        assert_eq!(config.history.path, PathBuf::from(DEFAULT_HISTORY_PATH));
        assert!(!config.profile.is_complete());
        assert_eq!(config.template_store.path, PathBuf::from(DEFAULT_TEMPLATES_PATH));
        assert_eq!(config.configured_templates(), TemplateLibrary::default());
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml(
            r#"
            [profile]
            full_name = "Alex Buyer"
            phone_number = "555-000-2222"
            email = "alex@buyer.com"

            [email]
            client = "gmail"

            [history]
            path = "/tmp/history.json"

            [[templates]]
            id = "short"
            name = "Short"
            is_default = true
            content = "Hi {{agent_name}}"
            "#,
        )
        .unwrap();
        assert!(config.profile.is_complete());
        assert_eq!(config.email.client, EmailClient::Gmail);
        assert_eq!(config.history.path, PathBuf::from("/tmp/history.json"));
        let library = config.configured_templates();
        assert_eq!(library.default_template().unwrap().id, "short");
    }

    #[test]
    fn test_saved_templates_take_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("templates.json");
        let mut config = Config::from_toml(
            r#"
            [[templates]]
            id = "short"
            name = "Short"
            is_default = true
            content = "Hi {{agent_name}}"
            "#,
        )
        .unwrap();
        config.template_store.path = path.clone();
        assert_eq!(config.template_library().unwrap().default_template().unwrap().id, "short");

        let mut library = config.template_library().unwrap();
        library.reset();
        library.save(&path).unwrap();
        assert_eq!(config.template_library().unwrap(), TemplateLibrary::default());
    }

    #[test]
    fn test_invalid_client_is_an_error() {
        assert!(Config::from_toml("[email]\nclient = \"pigeon\"").is_err());
    }

    #[test]
    fn test_blank_profile_field_is_incomplete() {
        let profile = Profile {
            full_name: "Alex".to_string(),
            phone_number: "  ".to_string(),
            email: "alex@buyer.com".to_string(),
        };
        assert!(!profile.is_complete());
    }
}
