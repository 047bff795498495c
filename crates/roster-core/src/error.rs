//! Error types for `roster-core`.
//!
//! "Not found" is never an error in this domain — lookups return
//! `Option` and deletes return `bool`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Malformed or missing required input. Surfaced synchronously,
  /// never retried.
  #[error("validation error: {0}")]
  Validation(String),

  /// A sort field name outside the closed set of sortable fields.
  /// Filtering tolerates unknown fields; sorting does not.
  #[error("unrecognized sort field: {0:?}")]
  UnrecognizedSortField(String),

  /// A country with this exact name already exists.
  #[error("duplicate country name: {0:?}")]
  DuplicateCountryName(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
