//! Structured error types for gridview.
//!
//! Steady-state grid operations report absence with `Option` and never fail;
//! errors are limited to configuration input and the ordered column store.

/// All errors that can occur while configuring a grid or mutating its store.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Malformed configuration JSON.
    #[error("Invalid grid config: {0}")]
    Config(#[from] serde_json::Error),

    /// Column index outside the store.
    #[error("Column {index} out of range (store has {len} columns)")]
    ColumnOutOfRange { index: usize, len: usize },

    /// Store columns must all have the same number of rows.
    #[error("Column {column} has {found} rows, expected {expected}")]
    RaggedColumns {
        column: usize,
        expected: usize,
        found: usize,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<String> for GridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
