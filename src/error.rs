use std::io;

use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("profile name cannot be empty")]
    EmptyProfileName,
    #[error("profile \"{0}\" already exists")]
    ProfileExists(String),
    #[error("profile \"{0}\" not found")]
    ProfileNotFound(String),
    #[error("no active profile. select or create a profile first")]
    NoActiveProfile,
    #[error("field `{0}` cannot be modified")]
    ReadOnlyField(String),
    #[error("field `{field}` must be {expected}")]
    FieldType {
        field: String,
        expected: &'static str,
    },
    #[error(
        "could not save profile data: storage quota exceeded ({needed} of {limit} bytes)"
    )]
    QuotaExceeded { limit: usize, needed: usize },
    #[error("stored profiles are unreadable, refusing to overwrite them: {0}")]
    UnreadableProfiles(#[source] serde_json::Error),
    #[error("profile \"{name}\" was created but could not be activated: {source}")]
    NotActivated {
        name: String,
        #[source]
        source: Box<AppError>,
    },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Persistence,
    Config,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::InvalidInput(_)
            | AppError::EmptyProfileName
            | AppError::ProfileExists(_)
            | AppError::ReadOnlyField(_)
            | AppError::FieldType { .. } => ErrorKind::Validation,
            AppError::ProfileNotFound(_) | AppError::NoActiveProfile => ErrorKind::NotFound,
            AppError::QuotaExceeded { .. }
            | AppError::UnreadableProfiles(_)
            | AppError::Io(_)
            | AppError::Json(_) => ErrorKind::Persistence,
            AppError::NotActivated { source, .. } => source.kind(),
            AppError::Config(_) => ErrorKind::Config,
        }
    }
}
