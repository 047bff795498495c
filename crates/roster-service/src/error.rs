//! Error type for `roster-service`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Validation failures, duplicate country names, unknown sort fields.
  #[error(transparent)]
  Domain(#[from] roster_core::Error),

  /// Import/export serialization failures.
  #[error(transparent)]
  Tabular(#[from] roster_tabular::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error. Kept as a function so call sites stay short.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
