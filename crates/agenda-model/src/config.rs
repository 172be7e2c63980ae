//! Audit configuration: window, zero-capacity weekday and capacity table.
//!
//! The defaults below are the fixed contract of the audit. A TOML file with
//! the same shape can replace them, which is how alternate periods are audited
//! without touching code.
//!
//! ```toml
//! zero_capacity_weekday = "Sun"
//!
//! [window]
//! start = "2025-11-01"
//! end = "2025-12-31"
//!
//! [[maternities]]
//! name = "Guarulhos"
//! aliases = ["Hospital Guarulhos"]
//! weekday = 2
//! saturday = 1
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{AuditError, Result};

/// Closed date interval every resolved booking must fall in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl AuditWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }
}

impl Default for AuditWindow {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap_or(NaiveDate::MIN),
            end: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap_or(NaiveDate::MIN),
        }
    }
}

/// Daily booking limits of one maternity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaternityCapacity {
    /// Canonical name, as written in every report.
    pub name: String,
    /// Other spellings found in exports.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Monday to Friday.
    pub weekday: u32,
    pub saturday: u32,
}

impl MaternityCapacity {
    pub fn new(name: impl Into<String>, weekday: u32, saturday: u32) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            weekday,
            saturday,
        }
    }

    #[must_use]
    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|alias| (*alias).to_string()).collect();
        self
    }
}

fn default_zero_capacity_weekday() -> Weekday {
    Weekday::Sun
}

/// Immutable configuration handed to the engine entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    pub window: AuditWindow,
    /// Weekday on which no maternity accepts bookings.
    #[serde(default = "default_zero_capacity_weekday")]
    pub zero_capacity_weekday: Weekday,
    pub maternities: Vec<MaternityCapacity>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            window: AuditWindow::default(),
            zero_capacity_weekday: Weekday::Sun,
            maternities: vec![
                MaternityCapacity::new("Cruzeiro do Sul", 3, 1).with_aliases(&["Cruzeiro"]),
                MaternityCapacity::new("Guarulhos", 2, 1).with_aliases(&["Hospital Guarulhos"]),
                MaternityCapacity::new("Notrecare", 4, 2).with_aliases(&["Notre Care"]),
                MaternityCapacity::new("Salvalus", 3, 0),
            ],
        }
    }
}

impl AuditConfig {
    /// Parses and validates a TOML configuration.
    pub fn from_toml_str(contents: &str, origin: &Path) -> Result<Self> {
        let config: AuditConfig = toml::from_str(contents).map_err(|e| AuditError::Toml {
            path: origin.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| AuditError::io(path, e))?;
        Self::from_toml_str(&contents, path)
    }

    #[must_use]
    pub fn with_window(mut self, window: AuditWindow) -> Self {
        self.window = window;
        self
    }

    #[must_use]
    pub fn with_maternities(mut self, maternities: Vec<MaternityCapacity>) -> Self {
        self.maternities = maternities;
        self
    }

    /// Looks up a maternity by its canonical name.
    pub fn maternity(&self, name: &str) -> Option<&MaternityCapacity> {
        self.maternities.iter().find(|entry| entry.name == name)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window.start > self.window.end {
            return Err(AuditError::invalid_config(format!(
                "window start {} is after window end {}",
                self.window.start, self.window.end
            )));
        }
        if self.maternities.is_empty() {
            return Err(AuditError::invalid_config("capacity table is empty"));
        }
        let mut seen = BTreeSet::new();
        for entry in &self.maternities {
            let key = entry.name.trim().to_uppercase();
            if key.is_empty() {
                return Err(AuditError::invalid_config("maternity with empty name"));
            }
            if !seen.insert(key) {
                return Err(AuditError::invalid_config(format!(
                    "duplicate maternity: {}",
                    entry.name
                )));
            }
        }
        Ok(())
    }
}
