//! Imputation parameters estimated from the training table
//!
//! The snapshot is computed once, from training data exclusively, and then
//! applied read-only to both tables. Deriving any of these statistics from
//! the test table would leak test information into its own processing.

use std::collections::{HashMap, HashSet};

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PipelineConfig;
use crate::error::{PrepError, Result};

use super::title::TitleNormalizer;

/// Fitted imputation snapshot, immutable after estimation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImputationParams {
    /// Median age per normalized title; groups with no observed ages are
    /// backfilled with the overall training median at estimation time
    pub age_by_title: HashMap<String, f64>,

    /// Overall training median age, the fallback for titles never seen
    /// in training
    pub overall_age_median: f64,

    /// Most frequent non-missing embarkation port in training
    pub embarked_mode: String,

    /// Titles retained verbatim during transformation; everything else
    /// collapses into the Rare bucket
    pub keep_titles: HashSet<String>,
}

impl ImputationParams {
    /// Estimate the snapshot from the training table.
    pub fn estimate(
        train: &DataFrame,
        normalizer: &TitleNormalizer,
        config: &PipelineConfig,
    ) -> Result<Self> {
        let titles = normalizer.column_titles(train)?;

        let ages = train
            .column("Age")
            .map_err(|_| PrepError::ColumnNotFound("Age".to_string()))?
            .as_materialized_series()
            .cast(&DataType::Float64)?;
        let ages = ages.f64()?;

        let overall_age_median = ages.median().ok_or_else(|| {
            PrepError::Data("no non-missing Age values in training table".to_string())
        })?;

        // Group observed ages by title; every title gets an entry even when
        // none of its rows carry an age.
        let mut ages_by_title: HashMap<String, Vec<f64>> = HashMap::new();
        for (title, age) in titles.iter().zip(ages) {
            let group = ages_by_title.entry(title.clone()).or_default();
            if let Some(age) = age {
                group.push(age);
            }
        }
        let age_by_title = ages_by_title
            .into_iter()
            .map(|(title, mut group)| {
                let median = median(&mut group).unwrap_or(overall_age_median);
                (title, median)
            })
            .collect();

        let embarked_mode = Self::embarked_mode(train)?;
        let keep_titles = Self::keep_titles(&titles, config);

        let params = Self {
            age_by_title,
            overall_age_median,
            embarked_mode,
            keep_titles,
        };
        debug!(
            embarked_mode = %params.embarked_mode,
            title_groups = params.age_by_title.len(),
            kept_titles = params.keep_titles.len(),
            "estimated imputation parameters"
        );
        Ok(params)
    }

    /// Age to impute for a record of the given title: the per-title median
    /// when the title was seen in training, else the overall median.
    pub fn age_for(&self, title: &str) -> f64 {
        self.age_by_title
            .get(title)
            .copied()
            .unwrap_or(self.overall_age_median)
    }

    fn embarked_mode(train: &DataFrame) -> Result<String> {
        let embarked = train
            .column("Embarked")
            .map_err(|_| PrepError::ColumnNotFound("Embarked".to_string()))?
            .as_materialized_series()
            .str()?
            .clone();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut first_seen: Vec<&str> = Vec::new();
        for port in embarked.into_iter().flatten() {
            let count = counts.entry(port).or_insert(0);
            if *count == 0 {
                first_seen.push(port);
            }
            *count += 1;
        }

        // Strict > keeps the earliest-seen port when counts tie.
        let mut mode: Option<&str> = None;
        let mut best = 0usize;
        for &port in &first_seen {
            let count = counts[port];
            if count > best {
                best = count;
                mode = Some(port);
            }
        }
        mode.map(|p| p.to_string()).ok_or_else(|| {
            PrepError::Data("no non-missing Embarked values in training table".to_string())
        })
    }

    fn keep_titles(titles: &[String], config: &PipelineConfig) -> HashSet<String> {
        let mut counts: HashMap<&String, usize> = HashMap::new();
        for title in titles {
            *counts.entry(title).or_insert(0) += 1;
        }

        let mut keep: HashSet<String> = counts
            .into_iter()
            .filter(|(_, count)| *count >= config.common_title_threshold)
            .map(|(title, _)| title.clone())
            .collect();
        // Core titles stay even when rarer than the threshold.
        keep.extend(config.core_titles.iter().cloned());
        keep
    }
}

/// Median of a group of observed values; `None` for an empty group.
fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}
