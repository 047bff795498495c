//! CSV and XLSX renderings of a person list.
//!
//! Both renderings build the full byte buffer in memory; there is no
//! streaming. Rows appear in input order.

use std::io::Cursor;

use roster_core::view::PersonView;

use crate::{Error, Result};

/// Date-of-birth rendering used by both export formats.
pub const EXPORT_DATE_FORMAT: &str = "%Y-%b-%d";

/// The sheet name of the XLSX export.
pub const EXPORT_SHEET_NAME: &str = "PersonsList";

fn format_dob(view: &PersonView) -> String {
  view
    .date_of_birth
    .map(|d| d.format(EXPORT_DATE_FORMAT).to_string())
    .unwrap_or_default()
}

// ─── CSV ─────────────────────────────────────────────────────────────────────

/// Render `views` as CSV: one header row, one row per view. Field
/// values containing delimiters or quotes are escaped by the writer
/// per RFC 4180.
pub fn persons_to_csv(views: &[PersonView]) -> Result<Vec<u8>> {
  let mut writer = csv::Writer::from_writer(Vec::new());

  writer.write_record([
    "PersonName",
    "Email",
    "Address",
    "CountryName",
    "Age",
    "Gender",
    "DateOfBirth",
    "ReceiveNewsLetters",
  ])?;

  for view in views {
    writer.write_record([
      view.person_name.as_deref().unwrap_or_default(),
      view.email.as_deref().unwrap_or_default(),
      view.address.as_deref().unwrap_or_default(),
      view.country_name.as_deref().unwrap_or_default(),
      &view.age.map(|a| a.to_string()).unwrap_or_default(),
      view.gender.as_deref().unwrap_or_default(),
      &format_dob(view),
      if view.receive_newsletters { "true" } else { "false" },
    ])?;
  }

  writer
    .into_inner()
    .map_err(|e| Error::CsvBuffer(e.to_string()))
}

// ─── XLSX ────────────────────────────────────────────────────────────────────

const XLSX_HEADERS: [&str; 6] =
  ["Person Name", "Address", "Email", "Date of Birth", "Gender", "Country"];

/// ARGB fill behind the header row.
const HEADER_FILL: &str = "FFD3D3D3";

/// Render `views` as a single-sheet XLSX workbook with a styled header
/// row and content-sized columns.
pub fn persons_to_xlsx(views: &[PersonView]) -> Result<Vec<u8>> {
  let mut book = umya_spreadsheet::new_file_empty_worksheet();
  let sheet = book
    .new_sheet(EXPORT_SHEET_NAME)
    .map_err(|e| Error::Workbook(e.to_string()))?;

  for (idx, header) in XLSX_HEADERS.iter().enumerate() {
    let reference = cell_ref(idx, 1);
    sheet.get_cell_mut(reference.as_str()).set_value(*header);

    let style = sheet.get_style_mut(reference.as_str());
    style.set_background_color(HEADER_FILL);
    style.get_font_mut().set_bold(true);
  }

  for (row_idx, view) in views.iter().enumerate() {
    let row = row_idx + 2;
    let cells = [
      view.person_name.clone().unwrap_or_default(),
      view.address.clone().unwrap_or_default(),
      view.email.clone().unwrap_or_default(),
      format_dob(view),
      view.gender.clone().unwrap_or_default(),
      view.country_name.clone().unwrap_or_default(),
    ];
    for (col_idx, value) in cells.into_iter().enumerate() {
      sheet
        .get_cell_mut(cell_ref(col_idx, row).as_str())
        .set_value(value);
    }
  }

  size_columns(sheet, views);

  let mut cursor = Cursor::new(Vec::new());
  umya_spreadsheet::writer::xlsx::write_writer(&book, &mut cursor)
    .map_err(|e| Error::Workbook(e.to_string()))?;
  Ok(cursor.into_inner())
}

/// Set each column wide enough for its longest value.
fn size_columns(sheet: &mut umya_spreadsheet::Worksheet, views: &[PersonView]) {
  for (idx, header) in XLSX_HEADERS.iter().enumerate() {
    let mut widest = header.chars().count();
    for view in views {
      let len = match idx {
        0 => view.person_name.as_deref().map_or(0, |s| s.chars().count()),
        1 => view.address.as_deref().map_or(0, |s| s.chars().count()),
        2 => view.email.as_deref().map_or(0, |s| s.chars().count()),
        3 => format_dob(view).chars().count(),
        4 => view.gender.as_deref().map_or(0, |s| s.chars().count()),
        _ => view.country_name.as_deref().map_or(0, |s| s.chars().count()),
      };
      widest = widest.max(len);
    }
    let column = column_letter(idx);
    sheet
      .get_column_dimension_mut(column.as_str())
      .set_width(widest as f64 + 2.0);
  }
}

fn column_letter(idx: usize) -> String {
  // Six columns; single letters suffice.
  char::from(b'A' + idx as u8).to_string()
}

fn cell_ref(col_idx: usize, row: usize) -> String {
  format!("{}{row}", column_letter(col_idx))
}
