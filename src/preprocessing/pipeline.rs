//! Manifest preprocessing pipeline
//!
//! Fit on the training table, then transform any table with the fitted
//! snapshot. Transformation derives the engineered feature columns in a
//! fixed order, never mutates its input, and preserves row count and order.

use polars::prelude::*;
use tracing::debug;

use crate::config::PipelineConfig;
use crate::error::{PrepError, Result};

use super::params::ImputationParams;
use super::title::{TitleNormalizer, RARE_TITLE};

/// Main preprocessing pipeline for the passenger manifest
pub struct ManifestPreprocessor {
    config: PipelineConfig,
    normalizer: TitleNormalizer,
    params: Option<ImputationParams>,
}

impl Default for ManifestPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestPreprocessor {
    /// Create a preprocessor with the default configuration
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    /// Create a preprocessor with a custom configuration
    pub fn with_config(config: PipelineConfig) -> Self {
        let normalizer = TitleNormalizer::from_config(&config);
        Self {
            config,
            normalizer,
            params: None,
        }
    }

    /// Fitted imputation snapshot, if any
    pub fn params(&self) -> Option<&ImputationParams> {
        self.params.as_ref()
    }

    /// Estimate imputation parameters from the training table only
    pub fn fit(&mut self, train: &DataFrame) -> Result<&mut Self> {
        self.params = Some(ImputationParams::estimate(
            train,
            &self.normalizer,
            &self.config,
        )?);
        Ok(self)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame) -> Result<DataFrame> {
        self.fit(df)?;
        self.transform(df)
    }

    /// Transform a table with the fitted snapshot.
    ///
    /// After this step every row carries a non-missing Age, Embarked, Deck,
    /// Sex, and Title.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        let params = self.params.as_ref().ok_or(PrepError::NotFitted)?;

        // Titles first: later steps key off them. Anything outside the
        // keep set collapses into the Rare bucket.
        let titles: Vec<String> = self
            .normalizer
            .column_titles(df)?
            .into_iter()
            .map(|title| {
                if params.keep_titles.contains(&title) {
                    title
                } else {
                    RARE_TITLE.to_string()
                }
            })
            .collect();

        // Missing ages take the per-title training median; observed ages
        // are untouched.
        let ages: Vec<f64> = column_f64(df, "Age")?
            .into_iter()
            .zip(&titles)
            .map(|(age, title)| age.unwrap_or_else(|| params.age_for(title)))
            .collect();

        // Missing embarkation ports take the training mode.
        let embarked: Vec<String> = column_str(df, "Embarked")?
            .into_iter()
            .map(|port| port.unwrap_or_else(|| params.embarked_mode.clone()))
            .collect();

        let decks: Vec<u32> = column_str(df, "Cabin")?
            .into_iter()
            .map(|cabin| self.deck_ordinal(cabin.as_deref()))
            .collect();

        // Family features; SibSp feeds them but is never emitted.
        let sibsp = column_i64(df, "SibSp")?;
        let parch = column_i64(df, "Parch")?;
        let mut family_size: Vec<i64> = Vec::with_capacity(df.height());
        for (sibsp, parch) in sibsp.into_iter().zip(parch) {
            let sibsp = sibsp.ok_or_else(|| PrepError::MissingValue {
                column: "SibSp".to_string(),
            })?;
            let parch = parch.ok_or_else(|| PrepError::MissingValue {
                column: "Parch".to_string(),
            })?;
            family_size.push(sibsp + parch + 1);
        }
        let is_alone: Vec<u32> = family_size.iter().map(|&n| u32::from(n == 1)).collect();

        let sexes = encode_levels(column_str(df, "Sex")?, &self.config.sex_levels, "Sex")?;
        let embarked = encode_levels(
            embarked.into_iter().map(Some).collect(),
            &self.config.embarked_levels,
            "Embarked",
        )?;

        let mut out = df.clone();
        out.with_column(Series::new("Title".into(), titles))?;
        out.with_column(Series::new("Age".into(), ages))?;
        out.with_column(Series::new("Embarked".into(), embarked))?;
        out.with_column(Series::new("Deck".into(), decks))?;
        out.with_column(Series::new("FamilySize".into(), family_size))?;
        out.with_column(Series::new("IsAlone".into(), is_alone))?;
        out.with_column(Series::new("Sex".into(), sexes))?;

        for name in &self.config.drop_columns {
            if out.column(name.as_str()).is_ok() {
                out = out.drop(name.as_str())?;
            }
        }

        debug!(rows = out.height(), cols = out.width(), "transformed table");
        Ok(out)
    }

    /// Restrict and order a transformed table's columns for emission,
    /// silently omitting any configured column the table lacks.
    pub fn select_output(&self, df: &DataFrame) -> Result<DataFrame> {
        let present: Vec<String> = self
            .config
            .output_columns
            .iter()
            .filter(|name| df.column(name.as_str()).is_ok())
            .cloned()
            .collect();
        Ok(df.select(present)?)
    }

    /// Ordinal for a cabin designation's deck letter. Missing cabins and
    /// letters outside the configured ordering take the unknown-deck ordinal.
    fn deck_ordinal(&self, cabin: Option<&str>) -> u32 {
        let order = &self.config.deck_order;
        let letter = cabin
            .and_then(|c| c.chars().next())
            .unwrap_or(self.config.unknown_deck);
        order
            .iter()
            .position(|&d| d == letter)
            .or_else(|| order.iter().position(|&d| d == self.config.unknown_deck))
            .unwrap_or_else(|| order.len().saturating_sub(1)) as u32
    }
}

fn required_column(df: &DataFrame, name: &str) -> Result<Series> {
    Ok(df
        .column(name)
        .map_err(|_| PrepError::ColumnNotFound(name.to_string()))?
        .as_materialized_series()
        .clone())
}

fn column_f64(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = required_column(df, name)?.cast(&DataType::Float64)?;
    Ok(series.f64()?.into_iter().collect())
}

fn column_i64(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    let series = required_column(df, name)?.cast(&DataType::Int64)?;
    Ok(series.i64()?.into_iter().collect())
}

fn column_str(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = required_column(df, name)?;
    Ok(series
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

/// Encode a categorical column by each value's position in its level order.
/// A value outside the levels, or a missing value, is a data-quality error.
fn encode_levels(values: Vec<Option<String>>, levels: &[String], column: &str) -> Result<Vec<u32>> {
    values
        .into_iter()
        .map(|value| {
            let value = value.ok_or_else(|| PrepError::MissingValue {
                column: column.to_string(),
            })?;
            levels
                .iter()
                .position(|level| *level == value)
                .map(|i| i as u32)
                .ok_or_else(|| PrepError::InvalidValue {
                    column: column.to_string(),
                    value,
                })
        })
        .collect()
}
