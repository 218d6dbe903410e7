//! CSV extract reading.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use polars::prelude::*;

use crate::error::{IngestError, Result};

fn file_read_error(path: &Path, source: std::io::Error) -> IngestError {
    IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    }
}

/// Column names from the first line of `path`, with any UTF-8 BOM removed.
///
/// Extracts are plain comma-separated files; quoted header names are
/// unquoted but embedded commas are not supported.
pub fn read_csv_headers(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| file_read_error(path, e))?;
    let mut reader = BufReader::new(file);
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .map_err(|e| file_read_error(path, e))?;

    let line = line.strip_prefix('\u{feff}').unwrap_or(&line);
    let line = line.trim_end_matches(['\r', '\n']);
    if read == 0 || line.trim().is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    Ok(line
        .split(',')
        .map(|name| name.trim().trim_matches('"').to_string())
        .collect())
}

/// Reads a single-header CSV extract into a DataFrame.
///
/// Every column is read as text so a stray value deep in an extract never
/// fails the file; callers parse the cells they need.
pub fn read_csv_table(path: &Path) -> Result<DataFrame> {
    read_csv_headers(path)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(df)
}
