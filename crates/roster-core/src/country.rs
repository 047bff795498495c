//! Country entity and DTOs.
//!
//! Name uniqueness is an application-level invariant enforced by the
//! country service at insertion time, not by the store. Two concurrent
//! adds of the same name can both pass the existence check before
//! either commits; callers needing a hard guarantee must add a store
//! constraint underneath.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A country row as persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
  pub country_id:   Uuid,
  pub country_name: Option<String>,
}

/// Input to `add_country`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountryAddRequest {
  pub country_name: Option<String>,
}

/// The read-side projection of a country. Unlike [`crate::view::PersonView`],
/// equality here is full structural equality over both fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryView {
  pub country_id:   Uuid,
  pub country_name: Option<String>,
}

impl From<Country> for CountryView {
  fn from(c: Country) -> Self {
    Self {
      country_id:   c.country_id,
      country_name: c.country_name,
    }
  }
}
