//! [`CountryService`] — country CRUD with the duplicate-name guard,
//! plus the spreadsheet bulk import.

use std::sync::Arc;

use roster_core::{
  country::{Country, CountryAddRequest, CountryView},
  store::RecordStore,
};
use uuid::Uuid;

use crate::{Error, Result};

/// Country operations over any record store.
#[derive(Clone)]
pub struct CountryService<R> {
  store: Arc<R>,
}

impl<R: RecordStore> CountryService<R> {
  pub fn new(store: Arc<R>) -> Self { Self { store } }

  /// Reject missing/empty names and exact-name duplicates, then insert
  /// with a fresh identifier.
  ///
  /// The existence check and the insert are two separate store round
  /// trips: concurrent adds of the same name can both pass the check.
  /// This layer does not lock; a store-level uniqueness constraint is
  /// the place to close the race if it ever matters.
  pub async fn add_country(
    &self,
    request: CountryAddRequest,
  ) -> Result<CountryView> {
    let name = match request.country_name {
      Some(n) if !n.is_empty() => n,
      _ => {
        return Err(
          roster_core::Error::Validation("country name is required".into())
            .into(),
        );
      }
    };

    if self
      .store
      .get_country_by_name(&name)
      .await
      .map_err(Error::store)?
      .is_some()
    {
      return Err(roster_core::Error::DuplicateCountryName(name).into());
    }

    let country = Country {
      country_id:   Uuid::new_v4(),
      country_name: Some(name),
    };
    let country = self
      .store
      .add_country(country)
      .await
      .map_err(Error::store)?;
    Ok(country.into())
  }

  /// Every country, insertion order.
  pub async fn get_all_countries(&self) -> Result<Vec<CountryView>> {
    let countries = self.store.list_countries().await.map_err(Error::store)?;
    Ok(countries.into_iter().map(CountryView::from).collect())
  }

  /// `Ok(None)` for unmatched identifiers — never an error.
  pub async fn get_country_by_id(
    &self,
    id: Uuid,
  ) -> Result<Option<CountryView>> {
    let country = self
      .store
      .get_country_by_id(id)
      .await
      .map_err(Error::store)?;
    Ok(country.map(CountryView::from))
  }

  /// Bulk-import country names from the "Countries" sheet of an XLSX
  /// workbook. Returns the number of countries actually inserted.
  ///
  /// Names already in the store — including earlier rows of the same
  /// file — are skipped. Rows are inserted one at a time with no
  /// transaction wrapper, so inserts that land before a failure stay.
  pub async fn import_from_workbook(&self, bytes: &[u8]) -> Result<usize> {
    let names = roster_tabular::country_names_from_workbook(bytes)?;
    tracing::info!(candidates = names.len(), "importing countries");

    let mut inserted = 0;
    for name in names {
      let duplicate = self
        .store
        .get_country_by_name(&name)
        .await
        .map_err(Error::store)?
        .is_some();
      if duplicate {
        continue;
      }

      self
        .store
        .add_country(Country {
          country_id:   Uuid::new_v4(),
          country_name: Some(name),
        })
        .await
        .map_err(Error::store)?;
      inserted += 1;
    }

    Ok(inserted)
  }
}
