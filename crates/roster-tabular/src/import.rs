//! Parsing of the country import workbook.
//!
//! The expected layout: a sheet literally named "Countries", one
//! country name per row in column A starting at row 2 (row 1 is a
//! header and is skipped).

use std::io::Cursor;

use crate::{Error, Result};

/// The sheet the import reads from.
pub const IMPORT_SHEET_NAME: &str = "Countries";

/// Extract candidate country names from a workbook.
///
/// Empty cells are skipped silently. Names are returned in row order,
/// untrimmed and with duplicates intact — deduplication against the
/// store (and within the file) is the service's responsibility.
pub fn country_names_from_workbook(bytes: &[u8]) -> Result<Vec<String>> {
  let book =
    umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(bytes), true)
      .map_err(|e| Error::Workbook(e.to_string()))?;

  let sheet = book
    .get_sheet_by_name(IMPORT_SHEET_NAME)
    .ok_or_else(|| Error::MissingSheet(IMPORT_SHEET_NAME.to_owned()))?;

  let mut names = Vec::new();
  for row in 2..=sheet.get_highest_row() {
    let value = sheet.get_value(format!("A{row}").as_str());
    if !value.is_empty() {
      names.push(value);
    }
  }
  Ok(names)
}

#[cfg(test)]
mod tests {
  use super::*;

  /// Build an in-memory workbook with the given values in column A of
  /// `sheet_name`, starting at row 1.
  fn workbook_bytes(sheet_name: &str, column_a: &[&str]) -> Vec<u8> {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    let sheet = book.new_sheet(sheet_name).unwrap();
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

  #[test]
  fn reads_names_from_row_two_onward() {
    let bytes =
      workbook_bytes("Countries", &["CountryName", "Japan", "USA", "Brazil"]);
    let names = country_names_from_workbook(&bytes).unwrap();
    assert_eq!(names, vec!["Japan", "USA", "Brazil"]);
  }

  #[test]
  fn skips_empty_cells_silently() {
    let bytes =
      workbook_bytes("Countries", &["CountryName", "Japan", "", "Brazil"]);
    let names = country_names_from_workbook(&bytes).unwrap();
    assert_eq!(names, vec!["Japan", "Brazil"]);
  }

  #[test]
  fn keeps_in_file_duplicates_for_the_caller() {
    let bytes =
      workbook_bytes("Countries", &["CountryName", "Japan", "Japan"]);
    let names = country_names_from_workbook(&bytes).unwrap();
    assert_eq!(names, vec!["Japan", "Japan"]);
  }

  #[test]
  fn missing_sheet_is_a_format_error() {
    let bytes = workbook_bytes("NotCountries", &["CountryName", "Japan"]);
    let err = country_names_from_workbook(&bytes).unwrap_err();
    assert!(matches!(err, Error::MissingSheet(s) if s == "Countries"));
  }

  #[test]
  fn unreadable_bytes_are_a_workbook_error() {
    let err = country_names_from_workbook(b"definitely not a zip").unwrap_err();
    assert!(matches!(err, Error::Workbook(_)));
  }
}
