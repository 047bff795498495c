//! [`SqliteStore`] — the SQLite implementation of [`RecordStore`].

use std::path::Path;

use roster_core::{
  country::Country,
  person::{Person, PersonRecord},
  store::RecordStore,
};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use crate::{
  encode::{RawCountry, RawPersonRecord, encode_date, encode_uuid},
  schema::SCHEMA,
  Error, Result,
};

const PERSON_COLUMNS: &str = "
  p.person_id, p.person_name, p.email, p.date_of_birth, p.gender,
  p.country_id, p.address, p.receive_newsletters, p.tin,
  c.country_name";

fn read_person_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawPersonRecord> {
  Ok(RawPersonRecord {
    person_id:           row.get(0)?,
    person_name:         row.get(1)?,
    email:               row.get(2)?,
    date_of_birth:       row.get(3)?,
    gender:              row.get(4)?,
    country_id:          row.get(5)?,
    address:             row.get(6)?,
    receive_newsletters: row.get(7)?,
    tin:                 row.get(8)?,
    country_name:        row.get(9)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A roster record store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  // ── Persons ───────────────────────────────────────────────────────────────

  async fn add_person(&self, person: Person) -> Result<Person> {
    let id_str         = encode_uuid(person.person_id);
    let name           = person.person_name.clone();
    let email          = person.email.clone();
    let dob_str        = person.date_of_birth.map(encode_date);
    let gender         = person.gender.clone();
    let country_id_str = person.country_id.map(encode_uuid);
    let address        = person.address.clone();
    let newsletters    = person.receive_newsletters;
    let tin            = person.tin.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO persons (
             person_id, person_name, email, date_of_birth, gender,
             country_id, address, receive_newsletters, tin
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            id_str,
            name,
            email,
            dob_str,
            gender,
            country_id_str,
            address,
            newsletters,
            tin,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(person)
  }

  async fn list_persons(&self) -> Result<Vec<PersonRecord>> {
    let raws: Vec<RawPersonRecord> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PERSON_COLUMNS}
           FROM persons p
           LEFT JOIN countries c ON c.country_id = p.country_id
           ORDER BY p.rowid"
        ))?;
        let rows = stmt
          .query_map([], read_person_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPersonRecord::into_record).collect()
  }

  async fn get_person_by_id(&self, id: Uuid) -> Result<Option<PersonRecord>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawPersonRecord> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {PERSON_COLUMNS}
                 FROM persons p
                 LEFT JOIN countries c ON c.country_id = p.country_id
                 WHERE p.person_id = ?1"
              ),
              rusqlite::params![id_str],
              read_person_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPersonRecord::into_record).transpose()
  }

  async fn update_person(&self, person: Person) -> Result<Person> {
    let id_str         = encode_uuid(person.person_id);
    let name           = person.person_name.clone();
    let email          = person.email.clone();
    let dob_str        = person.date_of_birth.map(encode_date);
    let gender         = person.gender.clone();
    let country_id_str = person.country_id.map(encode_uuid);
    let address        = person.address.clone();
    let newsletters    = person.receive_newsletters;

    // Full-field replacement except the TIN, which no request carries.
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE persons SET
             person_name = ?2, email = ?3, date_of_birth = ?4, gender = ?5,
             country_id = ?6, address = ?7, receive_newsletters = ?8
           WHERE person_id = ?1",
          rusqlite::params![
            id_str,
            name,
            email,
            dob_str,
            gender,
            country_id_str,
            address,
            newsletters,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(person)
  }

  async fn delete_person(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let deleted: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM persons WHERE person_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(deleted > 0)
  }

  // ── Countries ─────────────────────────────────────────────────────────────

  async fn add_country(&self, country: Country) -> Result<Country> {
    let id_str = encode_uuid(country.country_id);
    let name   = country.country_name.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO countries (country_id, country_name) VALUES (?1, ?2)",
          rusqlite::params![id_str, name],
        )?;
        Ok(())
      })
      .await?;

    Ok(country)
  }

  async fn list_countries(&self) -> Result<Vec<Country>> {
    let raws: Vec<RawCountry> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT country_id, country_name FROM countries ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawCountry {
              country_id:   row.get(0)?,
              country_name: row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCountry::into_country).collect()
  }

  async fn get_country_by_id(&self, id: Uuid) -> Result<Option<Country>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawCountry> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT country_id, country_name FROM countries WHERE country_id = ?1",
              rusqlite::params![id_str],
              |row| {
                Ok(RawCountry {
                  country_id:   row.get(0)?,
                  country_name: row.get(1)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCountry::into_country).transpose()
  }

  async fn get_country_by_name(&self, name: &str) -> Result<Option<Country>> {
    let name = name.to_owned();

    let raw: Option<RawCountry> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT country_id, country_name FROM countries WHERE country_name = ?1",
              rusqlite::params![name],
              |row| {
                Ok(RawCountry {
                  country_id:   row.get(0)?,
                  country_name: row.get(1)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCountry::into_country).transpose()
  }
}
