//! Manifest preprocessing
//!
//! The feature-derivation core of the pipeline:
//! - Title extraction and canonicalization from passenger names
//! - Imputation parameter estimation (per-title age medians, embarkation
//!   mode, common-title set) from the training table only
//! - Row transformation applying one fitted snapshot to either table
//! - Output column selection

mod params;
mod pipeline;
mod title;

pub use params::ImputationParams;
pub use pipeline::ManifestPreprocessor;
pub use title::{TitleNormalizer, RARE_TITLE, UNKNOWN_TITLE};
