//! Tabular serialization for roster: CSV and XLSX renderings of
//! [`roster_core::view::PersonView`] lists, and parsing of the
//! "Countries" import workbook.
//!
//! Everything here is pure bytes-in/bytes-out; persistence and
//! duplicate handling belong to `roster-service`.

pub mod error;
pub mod export;
pub mod import;

pub use error::{Error, Result};
pub use export::{persons_to_csv, persons_to_xlsx};
pub use import::country_names_from_workbook;
