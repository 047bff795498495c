//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Dates of birth are stored as ISO 8601 calendar dates. UUIDs are
//! stored as hyphenated lowercase strings. Booleans ride in INTEGER
//! columns via rusqlite's native mapping.

use chrono::NaiveDate;
use roster_core::{
  country::Country,
  person::{Person, PersonRecord},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read from a `persons` row left-joined with `countries`.
pub struct RawPersonRecord {
  pub person_id:           String,
  pub person_name:         Option<String>,
  pub email:               Option<String>,
  pub date_of_birth:       Option<String>,
  pub gender:              Option<String>,
  pub country_id:          Option<String>,
  pub address:             Option<String>,
  pub receive_newsletters: bool,
  pub tin:                 Option<String>,
  // countries join
  pub country_name:        Option<String>,
}

impl RawPersonRecord {
  pub fn into_record(self) -> Result<PersonRecord> {
    let person = Person {
      person_id:           decode_uuid(&self.person_id)?,
      person_name:         self.person_name,
      email:               self.email,
      date_of_birth:       self
        .date_of_birth
        .as_deref()
        .map(decode_date)
        .transpose()?,
      gender:              self.gender,
      country_id:          self
        .country_id
        .as_deref()
        .map(decode_uuid)
        .transpose()?,
      address:             self.address,
      receive_newsletters: self.receive_newsletters,
      tin:                 self.tin,
    };

    Ok(PersonRecord {
      person,
      country_name: self.country_name,
    })
  }
}

/// Raw strings read from a `countries` row.
pub struct RawCountry {
  pub country_id:   String,
  pub country_name: Option<String>,
}

impl RawCountry {
  pub fn into_country(self) -> Result<Country> {
    Ok(Country {
      country_id:   decode_uuid(&self.country_id)?,
      country_name: self.country_name,
    })
  }
}
