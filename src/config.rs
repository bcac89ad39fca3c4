//! Pipeline configuration
//!
//! Every constant the pipeline depends on lives here: file paths, the deck
//! ordering, the honorific alias and rare tables, the categorical level
//! orders, and the output column list. `Default` carries the production
//! values; builder methods exist so tests can run the pipeline against
//! synthetic tables.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the manifest cleaning pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Training manifest input path
    pub train_path: PathBuf,

    /// Test manifest input path
    pub test_path: PathBuf,

    /// Cleaned training output path
    pub train_output: PathBuf,

    /// Cleaned test output path
    pub test_output: PathBuf,

    /// Honorific spellings folded into a canonical form (e.g. Mlle -> Miss)
    pub title_aliases: Vec<(String, String)>,

    /// Honorifics collapsed into the Rare bucket during normalization
    pub rare_titles: Vec<String>,

    /// Titles always retained verbatim regardless of training frequency
    pub core_titles: Vec<String>,

    /// Minimum training count for a title to be kept verbatim
    pub common_title_threshold: usize,

    /// Cabin deck letters in ordinal order; a letter's position is its code
    pub deck_order: Vec<char>,

    /// Deck letter standing in for a missing or unrecognized cabin
    pub unknown_deck: char,

    /// Sex levels in encoding order; a level's position is its code
    pub sex_levels: Vec<String>,

    /// Embarkation ports in encoding order; a level's position is its code
    pub embarked_levels: Vec<String>,

    /// Columns dropped from the working table after transformation
    pub drop_columns: Vec<String>,

    /// Output column order; columns absent from a table are silently omitted
    pub output_columns: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            train_path: PathBuf::from("dataset/train.csv"),
            test_path: PathBuf::from("dataset/test.csv"),
            train_output: PathBuf::from("train_clean.csv"),
            test_output: PathBuf::from("test_clean.csv"),
            title_aliases: vec![
                ("Mlle".to_string(), "Miss".to_string()),
                ("Ms".to_string(), "Miss".to_string()),
                ("Mme".to_string(), "Mrs".to_string()),
            ],
            rare_titles: [
                "Lady", "Countess", "Capt", "Col", "Don", "Dr", "Major", "Rev", "Sir",
                "Jonkheer", "Dona",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            core_titles: ["Mr", "Miss", "Mrs", "Master"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            common_title_threshold: 10,
            deck_order: vec!['A', 'B', 'C', 'D', 'E', 'F', 'G', 'T', 'U'],
            unknown_deck: 'U',
            sex_levels: vec!["male".to_string(), "female".to_string()],
            embarked_levels: vec!["S".to_string(), "C".to_string(), "Q".to_string()],
            drop_columns: ["Name", "Ticket", "Cabin", "Fare", "Survived"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            output_columns: [
                "PassengerId",
                "Pclass",
                "Sex",
                "Age",
                "Parch",
                "Embarked",
                "Title",
                "Deck",
                "FamilySize",
                "IsAlone",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the input manifest paths
    pub fn with_inputs(mut self, train: impl Into<PathBuf>, test: impl Into<PathBuf>) -> Self {
        self.train_path = train.into();
        self.test_path = test.into();
        self
    }

    /// Builder method to set the cleaned output paths
    pub fn with_outputs(mut self, train: impl Into<PathBuf>, test: impl Into<PathBuf>) -> Self {
        self.train_output = train.into();
        self.test_output = test.into();
        self
    }

    /// Builder method to set the common-title threshold
    pub fn with_common_title_threshold(mut self, threshold: usize) -> Self {
        self.common_title_threshold = threshold;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.common_title_threshold, 10);
        assert_eq!(config.deck_order.len(), 9);
        assert_eq!(config.deck_order[8], 'U');
        assert_eq!(config.sex_levels, vec!["male", "female"]);
        assert!(!config.output_columns.contains(&"SibSp".to_string()));
    }

    #[test]
    fn test_builder_pattern() {
        let config = PipelineConfig::new()
            .with_inputs("a.csv", "b.csv")
            .with_outputs("a_clean.csv", "b_clean.csv")
            .with_common_title_threshold(3);

        assert_eq!(config.train_path, PathBuf::from("a.csv"));
        assert_eq!(config.test_output, PathBuf::from("b_clean.csv"));
        assert_eq!(config.common_title_threshold, 3);
    }

    #[test]
    fn test_config_serialize() {
        let config = PipelineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: PipelineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.deck_order, config.deck_order);
        assert_eq!(back.output_columns, config.output_columns);
    }
}
