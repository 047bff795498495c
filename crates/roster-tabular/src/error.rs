//! Error type for `roster-tabular`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The import workbook does not contain the expected sheet.
  #[error("workbook has no sheet named {0:?}")]
  MissingSheet(String),

  /// The workbook could not be read or written at all.
  #[error("workbook error: {0}")]
  Workbook(String),

  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  #[error("csv buffer error: {0}")]
  CsvBuffer(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
