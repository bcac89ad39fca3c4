//! One-shot cleaning job over the train and test manifests
//!
//! Loads both tables, fits the preprocessor on the training table only,
//! transforms both with the one fitted snapshot, and writes the cleaned
//! outputs.

use std::path::PathBuf;

use tracing::info;

use crate::config::PipelineConfig;
use crate::dataset;
use crate::error::Result;
use crate::preprocessing::ManifestPreprocessor;

/// What a completed run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub train_rows: usize,
    pub test_rows: usize,
    pub train_output: PathBuf,
    pub test_output: PathBuf,
}

/// Run the full pipeline once with the given configuration.
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    info!(path = %config.train_path.display(), "loading training manifest");
    let train = dataset::load_table(&config.train_path)?;
    info!(path = %config.test_path.display(), "loading test manifest");
    let test = dataset::load_table(&config.test_path)?;

    let mut preprocessor = ManifestPreprocessor::with_config(config.clone());
    let train_clean = preprocessor.fit_transform(&train)?;
    let test_clean = preprocessor.transform(&test)?;

    let mut train_out = preprocessor.select_output(&train_clean)?;
    let mut test_out = preprocessor.select_output(&test_clean)?;

    dataset::write_table(&mut train_out, &config.train_output)?;
    dataset::write_table(&mut test_out, &config.test_output)?;
    info!(
        train_rows = train_out.height(),
        test_rows = test_out.height(),
        "wrote cleaned manifests"
    );

    Ok(RunSummary {
        train_rows: train_out.height(),
        test_rows: test_out.height(),
        train_output: config.train_output.clone(),
        test_output: config.test_output.clone(),
    })
}
