//! Service layer for roster: person and country operations over any
//! [`roster_core::store::RecordStore`].
//!
//! This is where the query pipeline meets persistence — validation,
//! the duplicate-name guard, import/export entry points. Transport
//! concerns live in `roster-api`.

pub mod countries;
pub mod error;
pub mod persons;

pub use countries::CountryService;
pub use error::{Error, Result};
pub use persons::PersonService;

#[cfg(test)]
mod tests;
