//! CSV Data Loader Module
//! Reads verification exports with Polars and checks the required columns.

use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Columns the report pipeline reads. Anything else in the file is ignored.
pub const REQUIRED_COLUMNS: [&str; 4] = ["sid", "date_created", "status", "country"];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Uploaded file is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Loads the uploaded CSV. Every column is read as text; typing happens in
/// the normalizer so a bad cell never fails the whole load.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file from disk.
    pub fn load_csv(file_path: impl AsRef<Path>) -> Result<DataFrame, LoaderError> {
        let file_path = file_path.as_ref();

        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;
        Self::validate_schema(&df)?;

        info!(
            path = %file_path.display(),
            rows = df.height(),
            columns = df.width(),
            "loaded verification CSV"
        );
        Ok(df)
    }

    /// Load CSV content already held in memory (an upload).
    pub fn load_bytes(bytes: Vec<u8>) -> Result<DataFrame, LoaderError> {
        let df = Self::read_bytes(bytes)?;
        Self::validate_schema(&df)?;

        info!(rows = df.height(), columns = df.width(), "loaded verification CSV from memory");
        Ok(df)
    }

    fn read_bytes(bytes: Vec<u8>) -> Result<DataFrame, LoaderError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;
        Ok(df)
    }

    /// Fail fast, naming every required column that is absent.
    pub fn validate_schema(df: &DataFrame) -> Result<(), LoaderError> {
        let present = Self::column_names(df);
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|required| !present.iter().any(|name| name == *required))
            .map(|required| required.to_string())
            .collect();

        if missing.is_empty() {
            debug!(columns = ?present, "schema ok");
            Ok(())
        } else {
            Err(LoaderError::MissingColumns(missing))
        }
    }

    /// Extract a column as optional strings, one entry per row.
    pub fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, LoaderError> {
        let column = df.column(name)?.cast(&DataType::String)?;
        let values = column
            .str()?
            .into_iter()
            .map(|value| value.map(str::to_string))
            .collect();
        Ok(values)
    }

    fn column_names(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn loads_required_columns_as_text() {
        let csv = "sid,date_created,status,country,extra\n\
                   1,2024-03-25 10:00:00 UTC,approved,US,x\n\
                   2,2024-03-26 11:30:00 UTC,expired,CA,y\n";
        let df = DataLoader::load_bytes(csv.as_bytes().to_vec()).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 5);
        assert_eq!(
            DataLoader::string_column(&df, "sid").unwrap(),
            vec![Some("1".to_string()), Some("2".to_string())]
        );
    }

    #[test]
    fn missing_columns_are_named() {
        let csv = "sid,status\n1,approved\n";
        let err = DataLoader::load_bytes(csv.as_bytes().to_vec()).unwrap_err();

        match err {
            LoaderError::MissingColumns(missing) => {
                assert_eq!(missing, vec!["date_created".to_string(), "country".to_string()])
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_a_csv_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DataLoader::load_csv(dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, LoaderError::Csv(_)));
    }

    #[test]
    fn missing_columns_message_lists_names() {
        let err = LoaderError::MissingColumns(vec!["sid".into(), "country".into()]);
        assert_eq!(
            err.to_string(),
            "Uploaded file is missing required column(s): sid, country"
        );
    }

    #[test]
    fn empty_cells_become_none() {
        let csv = "sid,date_created,status,country\n1,,approved,\n";
        let df = DataLoader::load_bytes(csv.as_bytes().to_vec()).unwrap();

        assert_eq!(DataLoader::string_column(&df, "country").unwrap(), vec![None]);
        assert_eq!(DataLoader::string_column(&df, "date_created").unwrap(), vec![None]);
    }
}
