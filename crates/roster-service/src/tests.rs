//! End-to-end service tests against an in-memory SQLite store.

use std::{io::Cursor, sync::Arc};

use chrono::NaiveDate;
use roster_core::{
  country::CountryAddRequest,
  person::{Gender, PersonAddRequest},
  query::SortOrder,
};
use roster_store_sqlite::SqliteStore;
use uuid::Uuid;

use crate::{CountryService, Error, PersonService};

async fn services() -> (PersonService<SqliteStore>, CountryService<SqliteStore>)
{
  let store = Arc::new(
    SqliteStore::open_in_memory()
      .await
      .expect("in-memory store"),
  );
  (
    PersonService::new(store.clone()),
    CountryService::new(store),
  )
}

fn add_request(name: &str, country_id: Option<Uuid>) -> PersonAddRequest {
  PersonAddRequest {
    person_name:         Some(name.into()),
    email:               Some(format!(
      "{}@example.com",
      name.to_lowercase().replace(' ', ".")
    )),
    date_of_birth:       NaiveDate::from_ymd_opt(1991, 4, 20),
    gender:              Some(Gender::Male),
    country_id,
    address:             Some("7 High St".into()),
    receive_newsletters: true,
  }
}

// ─── Countries ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_country_then_get_by_id_round_trips() {
  let (_, countries) = services().await;

  let added = countries
    .add_country(CountryAddRequest {
      country_name: Some("Japan".into()),
    })
    .await
    .unwrap();
  assert!(!added.country_id.is_nil());

  let fetched = countries
    .get_country_by_id(added.country_id)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(fetched, added);
}

#[tokio::test]
async fn add_country_rejects_missing_name() {
  let (_, countries) = services().await;

  let err = countries
    .add_country(CountryAddRequest { country_name: None })
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::Domain(roster_core::Error::Validation(_))
  ));

  let err = countries
    .add_country(CountryAddRequest {
      country_name: Some(String::new()),
    })
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::Domain(roster_core::Error::Validation(_))
  ));
}

#[tokio::test]
async fn duplicate_country_name_is_rejected_and_not_inserted() {
  let (_, countries) = services().await;
  let usa = CountryAddRequest {
    country_name: Some("USA".into()),
  };

  countries.add_country(usa.clone()).await.unwrap();
  let err = countries.add_country(usa).await.unwrap_err();
  assert!(matches!(
    err,
    Error::Domain(roster_core::Error::DuplicateCountryName(ref n)) if n == "USA"
  ));

  let all = countries.get_all_countries().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].country_name.as_deref(), Some("USA"));
}

#[tokio::test]
async fn get_country_by_unknown_id_is_none_not_an_error() {
  let (_, countries) = services().await;
  assert!(
    countries
      .get_country_by_id(Uuid::new_v4())
      .await
      .unwrap()
      .is_none()
  );
  assert!(
    countries
      .get_country_by_id(Uuid::nil())
      .await
      .unwrap()
      .is_none()
  );
}

// ─── Country import ──────────────────────────────────────────────────────────

fn countries_workbook(column_a: &[&str]) -> Vec<u8> {
  let mut book = umya_spreadsheet::new_file_empty_worksheet();
  let sheet = book.new_sheet("Countries").unwrap();
  for (idx, value) in column_a.iter().enumerate() {
    if !value.is_empty() {
      sheet
        .get_cell_mut(format!("A{}", idx + 1).as_str())
        .set_value(*value);
    }
  }
  let mut cursor = Cursor::new(Vec::new());
  umya_spreadsheet::writer::xlsx::write_writer(&book, &mut cursor).unwrap();
  cursor.into_inner()
}

#[tokio::test]
async fn import_inserts_new_names_and_reports_the_count() {
  let (_, countries) = services().await;
  let bytes =
    countries_workbook(&["CountryName", "Japan", "USA", "", "Brazil"]);

  let inserted = countries.import_from_workbook(&bytes).await.unwrap();
  assert_eq!(inserted, 3);

  let all = countries.get_all_countries().await.unwrap();
  let names: Vec<_> = all
    .iter()
    .map(|c| c.country_name.as_deref().unwrap())
    .collect();
  assert_eq!(names, vec!["Japan", "USA", "Brazil"]);
}

#[tokio::test]
async fn import_skips_names_already_in_the_store_and_in_the_file() {
  let (_, countries) = services().await;
  countries
    .add_country(CountryAddRequest {
      country_name: Some("Japan".into()),
    })
    .await
    .unwrap();

  let bytes = countries_workbook(&["CountryName", "Japan", "USA", "USA"]);
  let inserted = countries.import_from_workbook(&bytes).await.unwrap();
  assert_eq!(inserted, 1);

  assert_eq!(countries.get_all_countries().await.unwrap().len(), 2);
}

#[tokio::test]
async fn import_without_countries_sheet_fails() {
  let (_, countries) = services().await;

  let mut book = umya_spreadsheet::new_file_empty_worksheet();
  book.new_sheet("Wrong").unwrap();
  let mut cursor = Cursor::new(Vec::new());
  umya_spreadsheet::writer::xlsx::write_writer(&book, &mut cursor).unwrap();

  let err = countries
    .import_from_workbook(&cursor.into_inner())
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::Tabular(roster_tabular::Error::MissingSheet(_))
  ));
}

// ─── Person CRUD ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_person_returns_view_with_joined_country_and_age() {
  let (persons, countries) = services().await;
  let japan = countries
    .add_country(CountryAddRequest {
      country_name: Some("Japan".into()),
    })
    .await
    .unwrap();

  let view = persons
    .add_person(add_request("Alice", Some(japan.country_id)))
    .await
    .unwrap();

  assert!(!view.person_id.is_nil());
  assert_eq!(view.country_name.as_deref(), Some("Japan"));
  assert!(view.age.is_some());
}

#[tokio::test]
async fn add_person_rejects_missing_name_and_bad_email() {
  let (persons, _) = services().await;

  let mut nameless = add_request("Alice", None);
  nameless.person_name = None;
  assert!(matches!(
    persons.add_person(nameless).await.unwrap_err(),
    Error::Domain(roster_core::Error::Validation(_))
  ));

  let mut bad_email = add_request("Alice", None);
  bad_email.email = Some("not-an-email".into());
  assert!(matches!(
    persons.add_person(bad_email).await.unwrap_err(),
    Error::Domain(roster_core::Error::Validation(_))
  ));
}

#[tokio::test]
async fn get_person_by_unknown_id_is_none() {
  let (persons, _) = services().await;
  assert!(
    persons
      .get_person_by_id(Uuid::new_v4())
      .await
      .unwrap()
      .is_none()
  );
}

#[tokio::test]
async fn update_with_unknown_id_fails_and_leaves_store_unchanged() {
  let (persons, _) = services().await;
  let view = persons.add_person(add_request("Alice", None)).await.unwrap();

  let mut request = view.to_update_request();
  request.person_id = Uuid::new_v4();
  request.person_name = Some("Impostor".into());

  let err = persons.update_person(request).await.unwrap_err();
  assert!(matches!(
    err,
    Error::Domain(roster_core::Error::Validation(_))
  ));

  let all = persons.get_all_persons().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].person_name.as_deref(), Some("Alice"));
}

#[tokio::test]
async fn update_round_trip_preserves_identity() {
  let (persons, countries) = services().await;
  let japan = countries
    .add_country(CountryAddRequest {
      country_name: Some("Japan".into()),
    })
    .await
    .unwrap();

  let added = persons
    .add_person(add_request("Alice", Some(japan.country_id)))
    .await
    .unwrap();

  let fetched = persons
    .get_person_by_id(added.person_id)
    .await
    .unwrap()
    .unwrap();

  // Pass the fetched view through an unmodified update.
  let updated = persons
    .update_person(fetched.to_update_request())
    .await
    .unwrap();

  assert!(updated.identity_eq(&added));
  assert_eq!(updated.country_name.as_deref(), Some("Japan"));
}

#[tokio::test]
async fn delete_person_negative_outcomes_are_false_not_errors() {
  let (persons, _) = services().await;

  // Empty store.
  assert!(!persons.delete_person(Uuid::new_v4()).await.unwrap());
  // Nil identifier.
  assert!(!persons.delete_person(Uuid::nil()).await.unwrap());

  let view = persons.add_person(add_request("Alice", None)).await.unwrap();
  assert!(persons.delete_person(view.person_id).await.unwrap());
  assert!(!persons.delete_person(view.person_id).await.unwrap());
}

// ─── Query pipeline end to end ───────────────────────────────────────────────

async fn seed_johns(
  persons:   &PersonService<SqliteStore>,
  countries: &CountryService<SqliteStore>,
) {
  let japan = countries
    .add_country(CountryAddRequest {
      country_name: Some("Japan".into()),
    })
    .await
    .unwrap();

  for name in ["John Doe1", "john Doe2", "J johnDoe3"] {
    persons
      .add_person(add_request(name, Some(japan.country_id)))
      .await
      .unwrap();
  }
}

#[tokio::test]
async fn filter_by_name_matches_case_insensitive_substrings() {
  let (persons, countries) = services().await;
  seed_johns(&persons, &countries).await;

  let hits = persons
    .get_filtered_persons("PersonName", "john")
    .await
    .unwrap();
  // All three names contain "john" once case is folded.
  assert_eq!(hits.len(), 3);
}

#[tokio::test]
async fn filter_with_empty_or_unknown_field_returns_everyone() {
  let (persons, countries) = services().await;
  seed_johns(&persons, &countries).await;

  assert_eq!(
    persons.get_filtered_persons("", "zzz").await.unwrap().len(),
    3
  );
  assert_eq!(
    persons
      .get_filtered_persons("NoSuchField", "zzz")
      .await
      .unwrap()
      .len(),
    3
  );
  assert_eq!(
    persons
      .get_filtered_persons("PersonName", "")
      .await
      .unwrap()
      .len(),
    3
  );
}

#[tokio::test]
async fn filter_by_country_field_matches_joined_name() {
  let (persons, countries) = services().await;
  seed_johns(&persons, &countries).await;
  persons.add_person(add_request("Stateless", None)).await.unwrap();

  let hits = persons
    .get_filtered_persons("CountryID", "japan")
    .await
    .unwrap();
  assert_eq!(hits.len(), 3);
}

#[tokio::test]
async fn sort_rejects_unknown_field_where_filter_tolerates_it() {
  let (persons, countries) = services().await;
  seed_johns(&persons, &countries).await;

  let views = persons.get_all_persons().await.unwrap();
  let err = persons
    .get_sorted_persons(views.clone(), "NoSuchField", SortOrder::Ascending)
    .unwrap_err();
  assert!(matches!(
    err,
    Error::Domain(roster_core::Error::UnrecognizedSortField(_))
  ));

  // The same unknown field on the filter side is a silent fallback.
  let hits = persons
    .get_filtered_persons("NoSuchField", "whatever")
    .await
    .unwrap();
  assert_eq!(hits.len(), views.len());
}

#[tokio::test]
async fn sort_descending_reverses_ascending() {
  let (persons, countries) = services().await;
  seed_johns(&persons, &countries).await;
  let views = persons.get_all_persons().await.unwrap();

  let asc = persons
    .get_sorted_persons(views.clone(), "PersonName", SortOrder::Ascending)
    .unwrap();
  let desc = persons
    .get_sorted_persons(views, "PersonName", SortOrder::Descending)
    .unwrap();

  let mut reversed: Vec<_> = asc.iter().map(|v| v.person_id).collect();
  reversed.reverse();
  let desc_ids: Vec<_> = desc.iter().map(|v| v.person_id).collect();
  assert_eq!(reversed, desc_ids);
}

// ─── Export ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn csv_export_contains_every_person() {
  let (persons, countries) = services().await;
  seed_johns(&persons, &countries).await;

  let bytes = persons.persons_csv().await.unwrap();
  let text = String::from_utf8(bytes).unwrap();

  assert_eq!(text.lines().count(), 4); // header + 3 rows
  assert!(text.contains("John Doe1"));
  assert!(text.contains("Japan"));
}

#[tokio::test]
async fn xlsx_export_is_a_readable_workbook() {
  let (persons, countries) = services().await;
  seed_johns(&persons, &countries).await;

  let bytes = persons.persons_xlsx().await.unwrap();
  let book = umya_spreadsheet::reader::xlsx::read_reader(
    Cursor::new(bytes),
    true,
  )
  .unwrap();
  let sheet = book.get_sheet_by_name("PersonsList").unwrap();

  assert_eq!(sheet.get_value("A1"), "Person Name");
  assert_eq!(sheet.get_highest_row(), 4);
}
