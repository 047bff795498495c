//! Handlers for `/countries` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/countries` | All countries, insertion order |
//! | `POST` | `/countries` | Body: `{"country_name":"Japan"}` |
//! | `GET`  | `/countries/:id` | 404 if not found |
//! | `POST` | `/countries/import` | Raw XLSX bytes, "Countries" sheet |

use axum::{
  Json,
  body::Bytes,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use roster_core::{
  country::{CountryAddRequest, CountryView},
  store::RecordStore,
};
use serde_json::json;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// `GET /countries`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<CountryView>>, ApiError>
where
  S: RecordStore + 'static,
{
  let countries = state.countries.get_all_countries().await?;
  Ok(Json(countries))
}

/// `POST /countries` — body: `{"country_name":"Japan"}`. Duplicate
/// names are a 400.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<CountryAddRequest>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + 'static,
{
  let country = state.countries.add_country(body).await?;
  Ok((StatusCode::CREATED, Json(country)))
}

/// `GET /countries/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<CountryView>, ApiError>
where
  S: RecordStore + 'static,
{
  let country = state
    .countries
    .get_country_by_id(id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("country {id} not found")))?;
  Ok(Json(country))
}

/// `POST /countries/import` — body: raw XLSX workbook bytes. Responds
/// with `{"inserted": n}`, counting only names that were actually new.
pub async fn import<S>(
  State(state): State<AppState<S>>,
  bytes: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + 'static,
{
  let inserted = state.countries.import_from_workbook(&bytes).await?;
  Ok(Json(json!({ "inserted": inserted })))
}
