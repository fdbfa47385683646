pub mod csv;
pub mod json;

use std::path::Path;

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};

// Re-export commonly used functions
pub use self::csv::{read_csv, read_csv_from_reader};
pub use self::json::{read_json, read_json_from_str};

/// Read a table, choosing the reader from the file extension (`csv` or `json`)
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("csv") => read_csv(path, true),
        Some("json") => read_json(path),
        _ => Err(Error::Format(format!(
            "unsupported table format for '{}', expected .csv or .json",
            path.display()
        ))),
    }
}
