//! Person entity and the request DTOs that create or replace it.
//!
//! A person row is intentionally loose: every attribute except the
//! identifier and the newsletter flag is optional, and gender is stored
//! as free text even though requests supply it as an enum.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Default tax-identification string assigned to new person rows.
pub const DEFAULT_TIN: &str = "ABC12345";

/// Maximum accepted length for the address field.
pub const MAX_ADDRESS_LEN: usize = 100;

// ─── Gender ──────────────────────────────────────────────────────────────────

/// The gender options accepted on requests. Persisted as plain text, so
/// the stored column can in principle hold anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
  Male,
  Female,
  Other,
}

impl Gender {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Male => "Male",
      Self::Female => "Female",
      Self::Other => "Other",
    }
  }

  /// Case-insensitive parse, mirroring how stored free text is read
  /// back into requests.
  pub fn parse(s: &str) -> Option<Self> {
    match s.to_lowercase().as_str() {
      "male" => Some(Self::Male),
      "female" => Some(Self::Female),
      "other" => Some(Self::Other),
      _ => None,
    }
  }
}

impl std::fmt::Display for Gender {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Entity ──────────────────────────────────────────────────────────────────

/// A person row as persisted. The country reference is not validated
/// against the countries table; orphaned references are tolerated and
/// simply yield an empty country name on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
  pub person_id:           Uuid,
  pub person_name:         Option<String>,
  pub email:               Option<String>,
  pub date_of_birth:       Option<NaiveDate>,
  pub gender:              Option<String>,
  pub country_id:          Option<Uuid>,
  pub address:             Option<String>,
  pub receive_newsletters: bool,
  pub tin:                 Option<String>,
}

/// A person joined with its country name — the unit the store hands
/// back on every read.
#[derive(Debug, Clone)]
pub struct PersonRecord {
  pub person:       Person,
  pub country_name: Option<String>,
}

// ─── Requests ────────────────────────────────────────────────────────────────

/// Input to `add_person`. The identifier is generated by the service,
/// never accepted from the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonAddRequest {
  pub person_name:         Option<String>,
  pub email:               Option<String>,
  pub date_of_birth:       Option<NaiveDate>,
  pub gender:              Option<Gender>,
  pub country_id:          Option<Uuid>,
  pub address:             Option<String>,
  #[serde(default)]
  pub receive_newsletters: bool,
}

impl PersonAddRequest {
  pub fn validate(&self) -> Result<()> {
    validate_person_fields(
      self.person_name.as_deref(),
      self.email.as_deref(),
      self.address.as_deref(),
    )
  }

  pub fn into_person(self, person_id: Uuid) -> Person {
    Person {
      person_id,
      person_name: self.person_name,
      email: self.email,
      date_of_birth: self.date_of_birth,
      gender: self.gender.map(|g| g.to_string()),
      country_id: self.country_id,
      address: self.address,
      receive_newsletters: self.receive_newsletters,
      tin: Some(DEFAULT_TIN.to_owned()),
    }
  }
}

/// Input to `update_person` — full-field replacement, not a patch.
/// The TIN is not part of the request and survives updates untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonUpdateRequest {
  pub person_id:           Uuid,
  pub person_name:         Option<String>,
  pub email:               Option<String>,
  pub date_of_birth:       Option<NaiveDate>,
  pub gender:              Option<Gender>,
  pub country_id:          Option<Uuid>,
  pub address:             Option<String>,
  #[serde(default)]
  pub receive_newsletters: bool,
}

impl PersonUpdateRequest {
  pub fn validate(&self) -> Result<()> {
    validate_person_fields(
      self.person_name.as_deref(),
      self.email.as_deref(),
      self.address.as_deref(),
    )
  }
}

// ─── Field validation ────────────────────────────────────────────────────────

fn validate_person_fields(
  name:    Option<&str>,
  email:   Option<&str>,
  address: Option<&str>,
) -> Result<()> {
  match name {
    Some(n) if !n.is_empty() => {}
    _ => return Err(Error::Validation("person name is required".into())),
  }

  match email {
    Some(e) if !e.is_empty() => {
      if !is_valid_email(e) {
        return Err(Error::Validation(format!("invalid email address: {e:?}")));
      }
    }
    _ => return Err(Error::Validation("email is required".into())),
  }

  if let Some(a) = address
    && a.chars().count() > MAX_ADDRESS_LEN
  {
    return Err(Error::Validation(format!(
      "address exceeds {MAX_ADDRESS_LEN} characters"
    )));
  }

  Ok(())
}

/// Syntactic email check: exactly one `@`, neither first nor last.
/// Matches the permissive validation the presentation layer applied.
pub fn is_valid_email(s: &str) -> bool {
  let mut parts = s.splitn(3, '@');
  let local = parts.next().unwrap_or("");
  let domain = parts.next();
  let extra = parts.next();

  extra.is_none()
    && !local.is_empty()
    && domain.is_some_and(|d| !d.is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn email_accepts_simple_addresses() {
    assert!(is_valid_email("a@b"));
    assert!(is_valid_email("alice@example.com"));
  }

  #[test]
  fn email_rejects_malformed_addresses() {
    assert!(!is_valid_email("alice"));
    assert!(!is_valid_email("@example.com"));
    assert!(!is_valid_email("alice@"));
    assert!(!is_valid_email("a@b@c"));
  }

  #[test]
  fn add_request_requires_name_and_email() {
    let missing_name = PersonAddRequest {
      email: Some("x@y.com".into()),
      ..Default::default()
    };
    assert!(matches!(
      missing_name.validate(),
      Err(Error::Validation(_))
    ));

    let missing_email = PersonAddRequest {
      person_name: Some("X".into()),
      ..Default::default()
    };
    assert!(matches!(
      missing_email.validate(),
      Err(Error::Validation(_))
    ));
  }

  #[test]
  fn add_request_rejects_long_address() {
    let req = PersonAddRequest {
      person_name: Some("X".into()),
      email: Some("x@y.com".into()),
      address: Some("a".repeat(MAX_ADDRESS_LEN + 1)),
      ..Default::default()
    };
    assert!(matches!(req.validate(), Err(Error::Validation(_))));
  }

  #[test]
  fn gender_parse_is_case_insensitive() {
    assert_eq!(Gender::parse("MALE"), Some(Gender::Male));
    assert_eq!(Gender::parse("female"), Some(Gender::Female));
    assert_eq!(Gender::parse("unknown"), None);
  }
}
