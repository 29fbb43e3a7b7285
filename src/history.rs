//! Contacted-property tracking.
//!
//! Entries are keyed by the lowercased, trimmed property address so the
//! same listing is recognised however its address was capitalised.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{EmailerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactType {
    Sent,
    Copied,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub last_contacted: DateTime<Utc>,
    pub contact_type: ContactType,
    pub times_contacted: u32,
    pub address: String,
    pub agent: String,
    pub url: String,
}

/// One contact made about a listing.
#[derive(Debug, Clone)]
pub struct ContactEvent<'a> {
    pub address: &'a str,
    pub agent: &'a str,
    pub url: &'a str,
    pub contact_type: ContactType,
    pub at: DateTime<Utc>,
}

pub fn history_key(address: &str) -> String {
    address.trim().to_lowercase()
}

pub trait ContactHistory {
    fn get(&self, address: &str) -> Option<&ContactRecord>;

    /// Records a contact: creates the entry with a count of one, or bumps
    /// the count and replaces the other fields.
    fn record(&mut self, event: ContactEvent<'_>) -> Result<&ContactRecord>;

    /// All entries, most recently contacted first.
    fn all(&self) -> Vec<&ContactRecord>;

    fn remove(&mut self, address: &str) -> Result<Option<ContactRecord>>;

    fn clear(&mut self) -> Result<()>;
}

type Entries = BTreeMap<String, ContactRecord>;

fn apply_event(entries: &mut Entries, event: &ContactEvent<'_>) -> Result<String> {
    let key = history_key(event.address);
    if key.is_empty() {
        return Err(EmailerError::History("cannot record a contact without an address".to_string()));
    }

    let times_contacted = entries.get(&key).map_or(0, |r| r.times_contacted) + 1;
    entries.insert(
        key.clone(),
        ContactRecord {
            last_contacted: event.at,
            contact_type: event.contact_type,
            times_contacted,
            address: event.address.trim().to_string(),
            agent: event.agent.to_string(),
            url: event.url.to_string(),
        },
    );
    debug!(key = %key, times_contacted, "Recorded contact");
    Ok(key)
}

fn most_recent_first(entries: &Entries) -> Vec<&ContactRecord> {
    let mut records: Vec<&ContactRecord> = entries.values().collect();
    records.sort_by(|a, b| b.last_contacted.cmp(&a.last_contacted));
    records
}

#[derive(Debug, Default)]
pub struct InMemoryHistory {
    entries: Entries,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContactHistory for InMemoryHistory {
    fn get(&self, address: &str) -> Option<&ContactRecord> {
        self.entries.get(&history_key(address))
    }

    fn record(&mut self, event: ContactEvent<'_>) -> Result<&ContactRecord> {
        let key = apply_event(&mut self.entries, &event)?;
        Ok(&self.entries[&key])
    }

    fn all(&self) -> Vec<&ContactRecord> {
        most_recent_first(&self.entries)
    }

    fn remove(&mut self, address: &str) -> Result<Option<ContactRecord>> {
        Ok(self.entries.remove(&history_key(address)))
    }

    fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }
}

/// History persisted as one pretty-printed JSON object, rewritten on every change.
#[derive(Debug)]
pub struct JsonFileHistory {
    path: PathBuf,
    entries: Entries,
}

impl JsonFileHistory {
    /// Opens the history at `path`; a missing file is an empty history.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                Entries::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            Entries::new()
        };
        info!(path = %path.display(), entries = entries.len(), "Opened contact history");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.entries)?)?;
        Ok(())
    }
}

impl ContactHistory for JsonFileHistory {
    fn get(&self, address: &str) -> Option<&ContactRecord> {
        self.entries.get(&history_key(address))
    }

    fn record(&mut self, event: ContactEvent<'_>) -> Result<&ContactRecord> {
        let key = apply_event(&mut self.entries, &event)?;
        self.save()?;
        Ok(&self.entries[&key])
    }

    fn all(&self) -> Vec<&ContactRecord> {
        most_recent_first(&self.entries)
    }

    fn remove(&mut self, address: &str) -> Result<Option<ContactRecord>> {
        let removed = self.entries.remove(&history_key(address));
        if removed.is_some() {
            self.save()?;
        }
        Ok(removed)
    }

    fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.save()
    }
}
