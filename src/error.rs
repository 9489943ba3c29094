//! Error types for notemark conversions.

use thiserror::Error;

/// Errors that can occur during HTML reading or writing.
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTML parse error: {0}")]
    Parse(String),

    #[error("Invalid style declaration: {0}")]
    Style(String),

    #[error("Unserializable node: {0}")]
    Serialize(String),
}

pub type Result<T> = std::result::Result<T, Error>;
