use std::path::PathBuf;
use thiserror::Error;

use crate::client::Field;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{}", .0.invalid_message())]
    InvalidField(Field),

    #[error("The string must contain {expected} comma-separated elements.")]
    SegmentCount { expected: usize, found: usize },

    #[error("Client ID must be an integer, got '{0}'.")]
    IdNotInteger(String),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON document must be an object.")]
    NotAnObject,

    #[error("Missing required key '{0}'.")]
    MissingKey(&'static str),

    #[error("Field '{}' cannot be written to the comma-separated form.", .0.key())]
    NotDelimitable(Field),

    #[error("Unknown field '{0}'. Expected one of: client_id, name, ownership_type, address, phone")]
    UnknownField(String),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// The field whose value was rejected, for validation failures.
    pub fn field(&self) -> Option<Field> {
        match self {
            ClientError::InvalidField(field) => Some(*field),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::InvalidField(_))
    }

    /// Structural problems with an input representation.
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            ClientError::SegmentCount { .. }
                | ClientError::IdNotInteger(_)
                | ClientError::Json(_)
                | ClientError::NotAnObject
                | ClientError::MissingKey(_)
                | ClientError::NotDelimitable(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
