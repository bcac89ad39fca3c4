//! Manifest table loading and writing
//!
//! Thin CSV glue around the pipeline; all failures surface as crate errors
//! wrapping the underlying I/O or parse failure.

use std::fs::File;
use std::path::Path;

use polars::prelude::*;

use crate::error::Result;

/// Read a comma-separated manifest table with a header row.
pub fn load_table(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .into_reader_with_file_handle(file)
        .finish()?;

    Ok(df)
}

/// Write a cleaned table as comma-separated values with a header row and
/// no index column.
pub fn write_table(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).finish(df)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrepError;

    #[test]
    fn test_load_missing_file_fails() {
        let err = load_table(Path::new("no/such/manifest.csv")).unwrap_err();
        assert!(matches!(err, PrepError::Io(_)));
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");

        let mut df = df!(
            "PassengerId" => &[1i64, 2, 3],
            "Age" => &[22.0, 38.0, 26.0],
        )
        .unwrap();
        write_table(&mut df, &path).unwrap();

        let back = load_table(&path).unwrap();
        assert_eq!(back.height(), 3);
        assert_eq!(back.width(), 2);
    }
}
