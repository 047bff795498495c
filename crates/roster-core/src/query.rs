//! The person query pipeline: filter by field, then sort by field.
//!
//! Both stages dispatch on a closed enumeration of field names rather
//! than reflecting over entity properties. The fallback behaviour is
//! deliberately asymmetric and is a preserved contract:
//!
//! - an unrecognized *search* field returns the full unfiltered list;
//! - an unrecognized *sort* field is an error.
//!
//! String matching and comparison are case-insensitive ordinal (plain
//! lowercase fold, no locale collation).

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{Error, Result, view::PersonView};

/// Date-of-birth rendering used by the filter stage's substring match.
pub const FILTER_DATE_FORMAT: &str = "%d %b %Y";

// ─── Search fields ───────────────────────────────────────────────────────────

/// The closed set of searchable fields. Parsed from the entity
/// property names the original request parameters carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
  PersonName,
  Email,
  Gender,
  Address,
  /// Matches against the *joined country name*, despite the field
  /// string naming the foreign key. Historical quirk, kept.
  CountryId,
  DateOfBirth,
}

impl SearchField {
  /// Exact, case-sensitive match of the property-name string.
  /// Anything else is "unrecognized" and falls back to no filtering.
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "PersonName" => Some(Self::PersonName),
      "Email" => Some(Self::Email),
      "Gender" => Some(Self::Gender),
      "Address" => Some(Self::Address),
      "CountryID" => Some(Self::CountryId),
      "DateOfBirth" => Some(Self::DateOfBirth),
      _ => None,
    }
  }

  /// Whether `view` matches `term` under this field's predicate.
  /// Views lacking the field value never match.
  pub fn matches(&self, view: &PersonView, term: &str) -> bool {
    match self {
      Self::PersonName => opt_contains_ci(view.person_name.as_deref(), term),
      Self::Email => opt_contains_ci(view.email.as_deref(), term),
      // Gender is an exact match, case-sensitive as stored.
      Self::Gender => view.gender.as_deref() == Some(term),
      Self::Address => opt_contains_ci(view.address.as_deref(), term),
      Self::CountryId => opt_contains_ci(view.country_name.as_deref(), term),
      Self::DateOfBirth => view
        .date_of_birth
        .map(|d| d.format(FILTER_DATE_FORMAT).to_string())
        .is_some_and(|s| contains_ci(&s, term)),
    }
  }
}

/// Apply the filter stage. Empty or unrecognized `search_by` and empty
/// `search_term` all yield the input unfiltered; strict validation is
/// the caller's job.
pub fn filter_person_views(
  mut views:   Vec<PersonView>,
  search_by:   &str,
  search_term: &str,
) -> Vec<PersonView> {
  if search_by.is_empty() || search_term.is_empty() {
    return views;
  }
  let Some(field) = SearchField::parse(search_by) else {
    return views;
  };
  views.retain(|v| field.matches(v, search_term));
  views
}

// ─── Sort fields ─────────────────────────────────────────────────────────────

/// Sort direction. Defaults to ascending.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub enum SortOrder {
  #[default]
  #[serde(rename = "ASC")]
  Ascending,
  #[serde(rename = "DESC")]
  Descending,
}

/// The closed set of sortable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
  PersonName,
  Email,
  DateOfBirth,
  Age,
  Gender,
  CountryName,
  Address,
}

impl SortField {
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "PersonName" => Some(Self::PersonName),
      "Email" => Some(Self::Email),
      "DateOfBirth" => Some(Self::DateOfBirth),
      "Age" => Some(Self::Age),
      "Gender" => Some(Self::Gender),
      "CountryName" => Some(Self::CountryName),
      "Address" => Some(Self::Address),
      _ => None,
    }
  }

  /// Ascending comparison between two views on this field. Missing
  /// values order first; string fields fold case before comparing.
  fn compare(&self, a: &PersonView, b: &PersonView) -> Ordering {
    match self {
      Self::PersonName => cmp_opt_ci(&a.person_name, &b.person_name),
      Self::Email => cmp_opt_ci(&a.email, &b.email),
      Self::DateOfBirth => a.date_of_birth.cmp(&b.date_of_birth),
      Self::Age => a.age.cmp(&b.age),
      Self::Gender => cmp_opt_ci(&a.gender, &b.gender),
      Self::CountryName => cmp_opt_ci(&a.country_name, &b.country_name),
      Self::Address => cmp_opt_ci(&a.address, &b.address),
    }
  }
}

/// Apply the sort stage. An empty `sort_by` is the identity; an
/// unrecognized one fails — unlike the filter stage, which falls back.
/// The sort is stable: ties keep their original relative order.
pub fn sort_person_views(
  mut views: Vec<PersonView>,
  sort_by:   &str,
  order:     SortOrder,
) -> Result<Vec<PersonView>> {
  if sort_by.is_empty() {
    return Ok(views);
  }

  let field = SortField::parse(sort_by)
    .ok_or_else(|| Error::UnrecognizedSortField(sort_by.to_owned()))?;

  views.sort_by(|a, b| {
    let ordering = field.compare(a, b);
    match order {
      SortOrder::Ascending => ordering,
      SortOrder::Descending => ordering.reverse(),
    }
  });
  Ok(views)
}

// ─── String helpers ──────────────────────────────────────────────────────────

fn contains_ci(haystack: &str, needle: &str) -> bool {
  haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn opt_contains_ci(haystack: Option<&str>, needle: &str) -> bool {
  haystack.is_some_and(|h| contains_ci(h, needle))
}

fn cmp_opt_ci(a: &Option<String>, b: &Option<String>) -> Ordering {
  let a = a.as_ref().map(|s| s.to_lowercase());
  let b = b.as_ref().map(|s| s.to_lowercase());
  a.cmp(&b)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
