//! JSON REST API for roster.
//!
//! Exposes an axum [`Router`] backed by any
//! [`roster_core::store::RecordStore`]. Auth, TLS, and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", roster_api::api_router(state))
//! ```

pub mod countries;
pub mod error;
pub mod persons;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use roster_core::store::RecordStore;
use roster_service::{CountryService, PersonService};
use serde::Deserialize;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }
fn default_store_path() -> PathBuf { PathBuf::from("roster.db") }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       default_host(),
      port:       default_port(),
      store_path: default_store_path(),
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S> {
  pub persons:   PersonService<S>,
  pub countries: CountryService<S>,
}

impl<S: RecordStore> AppState<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self {
      persons:   PersonService::new(store.clone()),
      countries: CountryService::new(store),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
pub fn api_router<S>(state: AppState<S>) -> Router
where
  S: RecordStore + Clone + 'static,
{
  Router::new()
    // Persons
    .route("/persons", get(persons::list::<S>).post(persons::create::<S>))
    .route(
      "/persons/{id}",
      get(persons::get_one::<S>)
        .put(persons::update::<S>)
        .delete(persons::delete::<S>),
    )
    .route("/persons/export/csv", get(persons::export_csv::<S>))
    .route("/persons/export/xlsx", get(persons::export_xlsx::<S>))
    // Countries
    .route(
      "/countries",
      get(countries::list::<S>).post(countries::create::<S>),
    )
    .route("/countries/{id}", get(countries::get_one::<S>))
    .route("/countries/import", post(countries::import::<S>))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
