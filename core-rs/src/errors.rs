//! Error types for MandatoPro Core
//!
//! Authorization predicates never produce these: they fail closed to `false`
//! or an empty result. Errors are reserved for I/O, configuration parsing and
//! the explicit guard helpers (`require_permission`).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MandatoError {
    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Unknown module: {0}")]
    UnknownModule(String),

    #[error("Unknown capability: {0}")]
    UnknownCapability(String),

    #[error("Unknown record type: {0}")]
    UnknownRecordType(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

pub type Result<T> = std::result::Result<T, MandatoError>;
