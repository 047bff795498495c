//! The `RecordStore` trait — the persistence seam.
//!
//! The trait is implemented by storage backends (e.g. `roster-store-sqlite`).
//! Higher layers (`roster-service`, `roster-api`) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  country::Country,
  person::{Person, PersonRecord},
};

/// Abstraction over a roster persistence backend.
///
/// Each method is a single store round trip; consistency between calls
/// relies entirely on the backend's per-operation atomicity. Last
/// writer wins on concurrent updates.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Persons ───────────────────────────────────────────────────────────

  /// Persist a new person row. The caller assigns the identifier.
  fn add_person(
    &self,
    person: Person,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Every person joined with its country name. No defined ordering
  /// beyond insertion order as observed in practice.
  fn list_persons(
    &self,
  ) -> impl Future<Output = Result<Vec<PersonRecord>, Self::Error>> + Send + '_;

  /// Retrieve a person (joined) by identifier. `None` if not found.
  fn get_person_by_id(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<PersonRecord>, Self::Error>> + Send + '_;

  /// Retain only the persons matching `predicate`, evaluated over the
  /// joined record. Backends may override with a pushed-down query;
  /// the provided implementation filters [`Self::list_persons`] output.
  fn filter_persons<F>(
    &self,
    predicate: F,
  ) -> impl Future<Output = Result<Vec<PersonRecord>, Self::Error>> + Send + '_
  where
    F: Fn(&PersonRecord) -> bool + Send + 'static,
  {
    async move {
      let mut records = self.list_persons().await?;
      records.retain(|r| predicate(r));
      Ok(records)
    }
  }

  /// Full-field replacement of the row matching `person.person_id`.
  /// The stored TIN is left untouched. A missing row is a silent no-op;
  /// existence checks belong to the service layer.
  fn update_person(
    &self,
    person: Person,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Remove the row with this identifier. Returns whether a row was
  /// actually deleted.
  fn delete_person(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Countries ─────────────────────────────────────────────────────────

  /// Persist a new country row. The caller assigns the identifier.
  fn add_country(
    &self,
    country: Country,
  ) -> impl Future<Output = Result<Country, Self::Error>> + Send + '_;

  /// Every country, in insertion order.
  fn list_countries(
    &self,
  ) -> impl Future<Output = Result<Vec<Country>, Self::Error>> + Send + '_;

  /// Retrieve a country by identifier. `None` if not found.
  fn get_country_by_id(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Country>, Self::Error>> + Send + '_;

  /// Exact, case-sensitive lookup by name. `None` if not found.
  fn get_country_by_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Country>, Self::Error>> + Send + 'a;
}
