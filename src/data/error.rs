use thiserror::Error;

// ---------------------------------------------------------------------------
// Pipeline errors
// ---------------------------------------------------------------------------

/// Everything that can stop a comparison run.
///
/// Every variant is recoverable: the UI shows the message and the user loads
/// a corrected file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    /// The delimited text could not be parsed (ragged rows, bad UTF-8, no header).
    #[error("Error loading {input} file: {message}")]
    Parse {
        input: &'static str,
        message: String,
    },

    /// A column the comparison needs is absent after a successful parse.
    #[error("Missing expected column: '{column}'")]
    Schema { column: String },

    /// Reading the input or writing the report failed.
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },
}

impl ReconcileError {
    pub fn parse(input: &'static str, message: impl Into<String>) -> Self {
        Self::Parse {
            input,
            message: message.into(),
        }
    }

    pub fn schema(column: impl Into<String>) -> Self {
        Self::Schema {
            column: column.into(),
        }
    }

    /// Name of the missing column, if this is a schema error.
    pub fn missing_column(&self) -> Option<&str> {
        match self {
            Self::Schema { column } => Some(column),
            _ => None,
        }
    }
}

pub type Result<T, E = ReconcileError> = std::result::Result<T, E>;
