//! Error types for Tokoku

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SharedError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),
}
