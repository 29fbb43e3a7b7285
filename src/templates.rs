//! Email templates with `{{placeholder}}` substitution.

use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::config::Profile;
use crate::error::{EmailerError, Result};
use crate::types::ExtractionResult;

pub const DEFAULT_TEMPLATE_ID: &str = "default";
pub const DEFAULT_TEMPLATE_NAME: &str = "Standard Inquiry";
pub const DEFAULT_TEMPLATE_CONTENT: &str = "Dear {{agent_name}},

I am interested in the property at {{property_address}} that I found on Zillow. I would like to schedule a viewing at your earliest convenience.

Could you please provide me with more information about this property, including:
- Current status (is it still available?)
- Any recent price changes
- Details about the neighborhood
- Potential closing timeline

I'm looking forward to hearing back from you soon.

Thank you,
{{your_name}}
{{your_phone}}
{{your_email}}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
    pub content: String,
}

impl EmailTemplate {
    pub fn standard_inquiry() -> Self {
        Self {
            id: DEFAULT_TEMPLATE_ID.to_string(),
            name: DEFAULT_TEMPLATE_NAME.to_string(),
            is_default: true,
            content: DEFAULT_TEMPLATE_CONTENT.to_string(),
        }
    }

    /// Fills the listing and sender placeholders. Missing values fall back
    /// to readable stand-ins the user can spot and edit.
    pub fn render(&self, listing: &ExtractionResult, profile: &Profile) -> String {
        let substitutions = [
            ("{{property_address}}", listing.property_address.as_deref().unwrap_or("")),
            ("{{agent_name}}", listing.agent_name.as_deref().unwrap_or("Agent")),
            ("{{your_name}}", non_blank(&profile.full_name).unwrap_or("[Your Name]")),
            ("{{your_phone}}", non_blank(&profile.phone_number).unwrap_or("[Your Phone Number]")),
            ("{{your_email}}", non_blank(&profile.email).unwrap_or("[Your Email]")),
        ];

        substitutions
            .iter()
            .fold(self.content.clone(), |text, (placeholder, value)| text.replace(*placeholder, value))
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// The user's templates. Exactly one is flagged default whenever the
/// library is non-empty and was built through these operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateLibrary {
    templates: Vec<EmailTemplate>,
}

impl Default for TemplateLibrary {
    fn default() -> Self {
        Self {
            templates: vec![EmailTemplate::standard_inquiry()],
        }
    }
}

impl TemplateLibrary {
    pub fn new(templates: Vec<EmailTemplate>) -> Self {
        Self { templates }
    }

    pub fn templates(&self) -> &[EmailTemplate] {
        &self.templates
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&EmailTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// The flagged default, else the first template.
    pub fn default_template(&self) -> Option<&EmailTemplate> {
        self.templates
            .iter()
            .find(|t| t.is_default)
            .or_else(|| self.templates.first())
    }

    /// Default first, then alphabetical by name.
    pub fn sorted(&self) -> Vec<&EmailTemplate> {
        let mut sorted: Vec<&EmailTemplate> = self.templates.iter().collect();
        sorted.sort_by(|a, b| {
            b.is_default
                .cmp(&a.is_default)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        sorted
    }

    /// Adds a template; the first template added to an empty library
    /// becomes the default. Returns the new id.
    pub fn add(&mut self, name: &str, content: &str) -> Result<String> {
        let (name, content) = validate(name, content)?;
        let id = generate_template_id();
        self.templates.push(EmailTemplate {
            id: id.clone(),
            name,
            is_default: self.templates.is_empty(),
            content,
        });
        debug!(template_id = %id, "Added template");
        Ok(id)
    }

    /// Replaces name and content, keeping the default flag.
    pub fn update(&mut self, id: &str, name: &str, content: &str) -> Result<()> {
        let (name, content) = validate(name, content)?;
        let template = self
            .templates
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| EmailerError::Template(format!("no template with id '{id}'")))?;
        template.name = name;
        template.content = content;
        Ok(())
    }

    /// Removes a template. The default template cannot be deleted.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let template = self
            .find(id)
            .ok_or_else(|| EmailerError::Template(format!("no template with id '{id}'")))?;
        if template.is_default {
            return Err(EmailerError::Template("cannot delete the default template".to_string()));
        }
        self.templates.retain(|t| t.id != id);
        Ok(())
    }

    pub fn set_default(&mut self, id: &str) -> Result<()> {
        if self.find(id).is_none() {
            return Err(EmailerError::Template(format!("no template with id '{id}'")));
        }
        for template in &mut self.templates {
            template.is_default = template.id == id;
        }
        Ok(())
    }

    /// Back to just the built-in standard inquiry.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Reads a library saved with [`TemplateLibrary::save`]. `None` when
    /// nothing has been saved at `path` yet.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        let library: Self = serde_json::from_str(&content)?;
        debug!(path = %path.display(), templates = library.templates.len(), "Loaded templates");
        Ok(Some(library))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!(path = %path.display(), templates = self.templates.len(), "Saved templates");
        Ok(())
    }
}

fn validate(name: &str, content: &str) -> Result<(String, String)> {
    let name = name.trim();
    let content = content.trim();
    if name.is_empty() {
        return Err(EmailerError::Template("template name is required".to_string()));
    }
    if content.is_empty() {
        return Err(EmailerError::Template("template content is required".to_string()));
    }
    Ok((name.to_string(), content.to_string()))
}

fn generate_template_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(|c| char::from(c).to_ascii_lowercase())
        .collect();
    format!("template_{}_{}", Utc::now().timestamp_millis(), suffix)
}
