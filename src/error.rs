use thiserror::Error;

/// Error type shared by the tabular core, the loader and the dashboard
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML config error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML config error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Index out of bounds: index {index}, size {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Duplicate column name: {0}")]
    DuplicateColumnName(String),

    #[error("Inconsistent row count: expected {expected}, found {found}")]
    InconsistentRowCount { expected: usize, found: usize },

    #[error("Column '{name}' has type {found}, expected {expected}")]
    ColumnTypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Cannot parse '{value}' in column '{column}' at row {row}")]
    Parse {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Unknown {column} category '{value}' at row {row}")]
    UnknownCategory {
        column: String,
        value: String,
        row: usize,
    },

    #[error("Duplicate key '{key}' in column '{column}'")]
    DuplicateKey { column: String, key: String },

    #[error("Invalid selection '{value}', expected one of: {options}")]
    InvalidSelection { value: String, options: String },

    #[error("Data format error: {0}")]
    Format(String),

    #[error("Empty data: {0}")]
    Empty(String),

    #[error("Visualization error: {0}")]
    Visualization(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(feature = "visualization")]
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for Error
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        Error::Visualization(format!("plot drawing failed: {}", err))
    }
}
