//! Handlers for `/persons` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/persons` | Optional `?search_by=&search_string=&sort_by=&sort_order=ASC\|DESC` |
//! | `POST`   | `/persons` | Body: person add request |
//! | `GET`    | `/persons/:id` | 404 if not found |
//! | `PUT`    | `/persons/:id` | Full-field replacement |
//! | `DELETE` | `/persons/:id` | Responds `{"deleted": bool}` |
//! | `GET`    | `/persons/export/csv` | Download, `persons.csv` |
//! | `GET`    | `/persons/export/xlsx` | Download, `persons.xlsx` |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::{StatusCode, header},
  response::IntoResponse,
};
use roster_core::{
  person::{PersonAddRequest, PersonUpdateRequest},
  query::SortOrder,
  store::RecordStore,
  view::PersonView,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  /// Field to filter on, e.g. `PersonName`. Unrecognized values fall
  /// back to the unfiltered list.
  pub search_by:     Option<String>,
  pub search_string: Option<String>,
  /// Field to sort on. Unlike `search_by`, unrecognized values are a
  /// 400.
  pub sort_by:       Option<String>,
  pub sort_order:    Option<SortOrder>,
}

/// `GET /persons[?search_by=...&search_string=...][&sort_by=...&sort_order=...]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<PersonView>>, ApiError>
where
  S: RecordStore + 'static,
{
  let views = state
    .persons
    .get_filtered_persons(
      params.search_by.as_deref().unwrap_or(""),
      params.search_string.as_deref().unwrap_or(""),
    )
    .await?;

  let views = match params.sort_by {
    Some(ref sort_by) => state.persons.get_sorted_persons(
      views,
      sort_by,
      params.sort_order.unwrap_or_default(),
    )?,
    None => views,
  };

  Ok(Json(views))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /persons`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<PersonAddRequest>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + 'static,
{
  let view = state.persons.add_person(body).await?;
  Ok((StatusCode::CREATED, Json(view)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /persons/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<PersonView>, ApiError>
where
  S: RecordStore + 'static,
{
  let view = state
    .persons
    .get_person_by_id(id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("person {id} not found")))?;
  Ok(Json(view))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /persons/:id` — the path identifier wins over any identifier in
/// the body.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(mut body): Json<PersonUpdateRequest>,
) -> Result<Json<PersonView>, ApiError>
where
  S: RecordStore + 'static,
{
  body.person_id = id;
  let view = state.persons.update_person(body).await?;
  Ok(Json(view))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /persons/:id` — responds `{"deleted": bool}`; a miss is a
/// negative outcome, not a 404.
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: RecordStore + 'static,
{
  let deleted = state.persons.delete_person(id).await?;
  Ok(Json(serde_json::json!({ "deleted": deleted })))
}

// ─── Export ───────────────────────────────────────────────────────────────────

/// `GET /persons/export/csv`
pub async fn export_csv<S>(
  State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + 'static,
{
  let bytes = state.persons.persons_csv().await?;
  Ok((
    [
      (header::CONTENT_TYPE, "application/octet-stream"),
      (
        header::CONTENT_DISPOSITION,
        "attachment; filename=\"persons.csv\"",
      ),
    ],
    bytes,
  ))
}

/// `GET /persons/export/xlsx`
pub async fn export_xlsx<S>(
  State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + 'static,
{
  let bytes = state.persons.persons_xlsx().await?;
  Ok((
    [
      (
        header::CONTENT_TYPE,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
      ),
      (
        header::CONTENT_DISPOSITION,
        "attachment; filename=\"persons.xlsx\"",
      ),
    ],
    bytes,
  ))
}
