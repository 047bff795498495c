//! [`PersonService`] — CRUD, the filter/sort query pipeline, and the
//! tabular export entry points.

use std::sync::Arc;

use roster_core::{
  person::{Person, PersonAddRequest, PersonRecord, PersonUpdateRequest},
  query::{self, SearchField, SortOrder},
  store::RecordStore,
  view::PersonView,
};
use uuid::Uuid;

use crate::{Error, Result};

/// Person operations over any record store.
///
/// Cloning is cheap — the store handle is reference-counted.
#[derive(Clone)]
pub struct PersonService<R> {
  store: Arc<R>,
}

impl<R: RecordStore> PersonService<R> {
  pub fn new(store: Arc<R>) -> Self { Self { store } }

  /// Resolve the country name for a freshly written person row, so the
  /// returned view matches what a joined read would produce.
  async fn join_country(&self, person: Person) -> Result<PersonView> {
    let country_name = match person.country_id {
      Some(id) => self
        .store
        .get_country_by_id(id)
        .await
        .map_err(Error::store)?
        .and_then(|c| c.country_name),
      None => None,
    };

    Ok(PersonView::from_record(PersonRecord {
      person,
      country_name,
    }))
  }

  // ── CRUD ──────────────────────────────────────────────────────────────

  /// Validate, assign a fresh identifier, persist, and return the view.
  pub async fn add_person(
    &self,
    request: PersonAddRequest,
  ) -> Result<PersonView> {
    request.validate()?;

    let person = request.into_person(Uuid::new_v4());
    let person = self.store.add_person(person).await.map_err(Error::store)?;
    self.join_country(person).await
  }

  /// Every person joined with its country, as views.
  pub async fn get_all_persons(&self) -> Result<Vec<PersonView>> {
    let records = self.store.list_persons().await.map_err(Error::store)?;
    Ok(records.into_iter().map(PersonView::from_record).collect())
  }

  /// `Ok(None)` when no person matches; never an error for a
  /// well-formed identifier.
  pub async fn get_person_by_id(&self, id: Uuid) -> Result<Option<PersonView>> {
    let record = self
      .store
      .get_person_by_id(id)
      .await
      .map_err(Error::store)?;
    Ok(record.map(PersonView::from_record))
  }

  /// Full-field replacement. The identifier must match an existing
  /// record; a miss is a validation error, not a silent upsert.
  pub async fn update_person(
    &self,
    request: PersonUpdateRequest,
  ) -> Result<PersonView> {
    request.validate()?;

    let existing = self
      .store
      .get_person_by_id(request.person_id)
      .await
      .map_err(Error::store)?
      .ok_or_else(|| {
        roster_core::Error::Validation(format!(
          "no person with id {}",
          request.person_id
        ))
      })?;

    let person = Person {
      person_id:           request.person_id,
      person_name:         request.person_name,
      email:               request.email,
      date_of_birth:       request.date_of_birth,
      gender:              request.gender.map(|g| g.to_string()),
      country_id:          request.country_id,
      address:             request.address,
      receive_newsletters: request.receive_newsletters,
      tin:                 existing.person.tin,
    };

    let person = self
      .store
      .update_person(person)
      .await
      .map_err(Error::store)?;
    self.join_country(person).await
  }

  /// `false` for the nil identifier, an empty store, or no matching
  /// record; "not found" is a negative outcome here, never an error.
  pub async fn delete_person(&self, id: Uuid) -> Result<bool> {
    if id.is_nil() {
      return Ok(false);
    }

    let exists = self
      .store
      .get_person_by_id(id)
      .await
      .map_err(Error::store)?
      .is_some();
    if !exists {
      return Ok(false);
    }

    self.store.delete_person(id).await.map_err(Error::store)
  }

  // ── Query pipeline ────────────────────────────────────────────────────

  /// Filter stage. Empty or unrecognized `search_by`, or an empty
  /// term, fall back to the full list — strict field validation is the
  /// caller's job.
  pub async fn get_filtered_persons(
    &self,
    search_by:   &str,
    search_term: &str,
  ) -> Result<Vec<PersonView>> {
    tracing::info!(search_by, "filtering persons");

    if search_by.is_empty() || search_term.is_empty() {
      return self.get_all_persons().await;
    }
    let Some(field) = SearchField::parse(search_by) else {
      return self.get_all_persons().await;
    };

    let term = search_term.to_owned();
    let records = self
      .store
      .filter_persons(move |r| {
        field.matches(&PersonView::from_record(r.clone()), &term)
      })
      .await
      .map_err(Error::store)?;

    Ok(records.into_iter().map(PersonView::from_record).collect())
  }

  /// Sort stage. Unlike filtering, an unrecognized field is an error.
  pub fn get_sorted_persons(
    &self,
    views:   Vec<PersonView>,
    sort_by: &str,
    order:   SortOrder,
  ) -> Result<Vec<PersonView>> {
    tracing::info!(sort_by, "sorting persons");
    Ok(query::sort_person_views(views, sort_by, order)?)
  }

  // ── Export ────────────────────────────────────────────────────────────

  /// All persons rendered as CSV bytes.
  pub async fn persons_csv(&self) -> Result<Vec<u8>> {
    let views = self.get_all_persons().await?;
    Ok(roster_tabular::persons_to_csv(&views)?)
  }

  /// All persons rendered as an XLSX workbook.
  pub async fn persons_xlsx(&self) -> Result<Vec<u8>> {
    let views = self.get_all_persons().await?;
    Ok(roster_tabular::persons_to_xlsx(&views)?)
  }
}
