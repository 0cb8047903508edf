//! Error type for `siorg-store-sqlite`.

use rusqlite::ErrorCode;
use siorg_core::{
  ValidationError,
  store::{ErrorKind, StoreError},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] siorg_core::Error),

  /// Rejected before any write was attempted.
  #[error(transparent)]
  Validation(#[from] ValidationError),

  /// A UNIQUE, CHECK or FOREIGN KEY constraint rejected the write.
  #[error("integrity error: {0}")]
  Integrity(String),

  #[error("database error: {0}")]
  Database(tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("url parse error: {0}")]
  UrlParse(#[from] url::ParseError),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("legal act not found: {0}")]
  LegalActNotFound(uuid::Uuid),

  #[error("function provision not found: {0}")]
  ProvisionNotFound(uuid::Uuid),
}

impl From<tokio_rusqlite::Error> for Error {
  fn from(e: tokio_rusqlite::Error) -> Self {
    match &e {
      tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(f, msg))
        if f.code == ErrorCode::ConstraintViolation =>
      {
        let message = msg.clone().unwrap_or_else(|| f.to_string());
        tracing::warn!(%message, "write rejected by constraint");
        Self::Integrity(message)
      }
      _ => Self::Database(e),
    }
  }
}

impl StoreError for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Self::Validation(_) => ErrorKind::Validation,
      Self::Integrity(_) => ErrorKind::Integrity,
      Self::LegalActNotFound(_) | Self::ProvisionNotFound(_) => ErrorKind::NotFound,
      _ => ErrorKind::Internal,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
