use thiserror::Error;

/// Errors that can occur during workbook and table operations
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Sheet not found: {name}")]
    SheetNotFound { name: String },

    #[error("Sheet already exists: {name}")]
    SheetAlreadyExists { name: String },

    #[error("Sheet is backing an open table: {name}")]
    SheetInUse { name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SheetError {
    /// Wrap a reader/writer library error as an IO failure, keeping its message.
    pub(crate) fn io<E: std::fmt::Display>(err: E) -> Self {
        SheetError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            err.to_string(),
        ))
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
