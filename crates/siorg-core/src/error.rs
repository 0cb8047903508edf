//! Error types for `siorg-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown act type: {0:?}")]
  UnknownActType(String),

  #[error("unknown function category: {0:?}")]
  UnknownCategory(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
