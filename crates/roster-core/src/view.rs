//! [`PersonView`] — the read model the query pipeline sorts and the
//! export module serialises. Never stored, always derived.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::person::{Gender, PersonRecord, PersonUpdateRequest};

/// A person joined with its country name plus a derived age.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonView {
  pub person_id:           Uuid,
  pub person_name:         Option<String>,
  pub email:               Option<String>,
  pub date_of_birth:       Option<NaiveDate>,
  pub gender:              Option<String>,
  pub country_id:          Option<Uuid>,
  pub country_name:        Option<String>,
  pub address:             Option<String>,
  pub receive_newsletters: bool,
  /// Whole years, `round((today − dob) in days / 365.25)`.
  pub age:                 Option<i64>,
}

/// Age under the fixed 365.25-day-year approximation. Deliberately not
/// calendar-aware; existing fixtures depend on this exact formula.
pub fn age_in_years(date_of_birth: NaiveDate) -> i64 {
  let days = (Utc::now().date_naive() - date_of_birth).num_days();
  (days as f64 / 365.25).round() as i64
}

impl PersonView {
  pub fn from_record(record: PersonRecord) -> Self {
    let p = record.person;
    Self {
      person_id:           p.person_id,
      person_name:         p.person_name,
      email:               p.email,
      date_of_birth:       p.date_of_birth,
      gender:              p.gender,
      country_id:          p.country_id,
      country_name:        record.country_name,
      address:             p.address,
      receive_newsletters: p.receive_newsletters,
      age:                 p.date_of_birth.map(age_in_years),
    }
  }

  /// Narrow identity comparison: id, name, email and gender only.
  /// Address, country, date of birth and age are excluded so that
  /// round-trip checks are insensitive to join state and age drift.
  pub fn identity_eq(&self, other: &PersonView) -> bool {
    self.person_id == other.person_id
      && self.person_name == other.person_name
      && self.email == other.email
      && self.gender == other.gender
  }

  /// Convert back into a full-replacement update request. The stored
  /// gender text is parsed case-insensitively; unparseable values are
  /// dropped.
  pub fn to_update_request(&self) -> PersonUpdateRequest {
    PersonUpdateRequest {
      person_id:           self.person_id,
      person_name:         self.person_name.clone(),
      email:               self.email.clone(),
      date_of_birth:       self.date_of_birth,
      gender:              self.gender.as_deref().and_then(Gender::parse),
      country_id:          self.country_id,
      address:             self.address.clone(),
      receive_newsletters: self.receive_newsletters,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::person::Person;

  fn view(name: &str, email: &str, gender: &str) -> PersonView {
    PersonView::from_record(PersonRecord {
      person:       Person {
        person_id:           Uuid::nil(),
        person_name:         Some(name.into()),
        email:               Some(email.into()),
        date_of_birth:       None,
        gender:              Some(gender.into()),
        country_id:          None,
        address:             None,
        receive_newsletters: false,
        tin:                 None,
      },
      country_name: None,
    })
  }

  #[test]
  fn identity_eq_ignores_address_and_country() {
    let mut a = view("Alice", "a@x.com", "Female");
    let mut b = view("Alice", "a@x.com", "Female");
    a.address = Some("1 First St".into());
    b.country_name = Some("Japan".into());
    assert!(a.identity_eq(&b));
  }

  #[test]
  fn identity_eq_detects_changed_name() {
    let a = view("Alice", "a@x.com", "Female");
    let b = view("Alyce", "a@x.com", "Female");
    assert!(!a.identity_eq(&b));
  }

  #[test]
  fn age_is_derived_only_when_dob_present() {
    let no_dob = view("Alice", "a@x.com", "Female");
    assert_eq!(no_dob.age, None);

    let dob = Utc::now().date_naive() - chrono::Days::new(365 * 30 + 7);
    let years = age_in_years(dob);
    assert_eq!(years, 30);
  }

  #[test]
  fn update_request_round_trips_gender() {
    let v = view("Alice", "a@x.com", "Female");
    let req = v.to_update_request();
    assert_eq!(req.gender, Some(Gender::Female));
    assert_eq!(req.person_name.as_deref(), Some("Alice"));
  }
}
