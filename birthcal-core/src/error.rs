//! Error types for birthcal.

use thiserror::Error;

/// Errors that can occur while loading, parsing or writing birthdays.
#[derive(Error, Debug)]
pub enum BirthcalError {
    /// A configured birthday could not be resolved to a year/month/day.
    #[error("{name}的生日格式错误，请检查！ ({input:?}: {reason})")]
    Format {
        name: String,
        input: String,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BirthcalError {
    pub(crate) fn format(name: &str, input: &str, reason: impl Into<String>) -> Self {
        BirthcalError::Format {
            name: name.to_string(),
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for birthcal operations.
pub type BirthcalResult<T> = Result<T, BirthcalError>;
