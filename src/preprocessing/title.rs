//! Honorific extraction and canonicalization
//!
//! Passenger names follow the "Last, Title. First ..." convention; the
//! honorific between the comma and the period is the title. Alternate
//! spellings fold into a canonical form and rare honorifics collapse into
//! a single bucket.

use std::collections::{HashMap, HashSet};

use polars::prelude::*;
use regex::Regex;

use crate::config::PipelineConfig;
use crate::error::{PrepError, Result};

/// Title assigned when a name carries no recognizable honorific
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Bucket for honorifics too rare to stand as their own category
pub const RARE_TITLE: &str = "Rare";

/// Matches the honorific segment: comma, optional whitespace, then
/// everything up to the next period.
const TITLE_PATTERN: &str = r",\s*([^.]+)\.";

/// Extracts and canonicalizes honorifics from passenger names
pub struct TitleNormalizer {
    pattern: Regex,
    aliases: HashMap<String, String>,
    rare: HashSet<String>,
}

impl TitleNormalizer {
    /// Build a normalizer from the configured alias and rare tables
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            pattern: Regex::new(TITLE_PATTERN).unwrap(),
            aliases: config.title_aliases.iter().cloned().collect(),
            rare: config.rare_titles.iter().cloned().collect(),
        }
    }

    /// Extract the raw honorific segment from a full name, trimmed of
    /// surrounding whitespace. Names without the comma-period segment
    /// yield the explicit "Unknown" default.
    pub fn extract(&self, name: &str) -> String {
        self.pattern
            .captures(name)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string())
    }

    /// Fold alias spellings into their canonical form and rare honorifics
    /// into the Rare bucket; anything else passes through unchanged.
    pub fn normalize(&self, raw: &str) -> String {
        if let Some(canonical) = self.aliases.get(raw) {
            return canonical.clone();
        }
        if self.rare.contains(raw) {
            return RARE_TITLE.to_string();
        }
        raw.to_string()
    }

    /// Extract then normalize in one step
    pub fn title_of(&self, name: &str) -> String {
        self.normalize(&self.extract(name))
    }

    /// Derive one normalized title per row from a table's Name column.
    /// A null name counts as having no honorific.
    pub fn column_titles(&self, df: &DataFrame) -> Result<Vec<String>> {
        let names = df
            .column("Name")
            .map_err(|_| PrepError::ColumnNotFound("Name".to_string()))?;
        let names = names.as_materialized_series().str()?;

        Ok(names
            .into_iter()
            .map(|name| match name {
                Some(n) => self.title_of(n),
                None => UNKNOWN_TITLE.to_string(),
            })
            .collect())
    }
}
