//! HTTP server for the staffing legal-acts registry.
//!
//! Mounts [`siorg_api::api_router`] under `/api` with request tracing. The
//! binary in `main.rs` loads [`ServerConfig`] and opens the SQLite store.

use std::{path::PathBuf, sync::Arc};

use axum::Router;
use serde::Deserialize;
use siorg_core::{LevelPolicy, store::StaffingStore};
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `SIORG_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:         String,
  #[serde(default = "default_port")]
  pub port:         u16,
  pub store_path:   PathBuf,
  /// Admissible levels per function category; omitted ranges keep their
  /// defaults.
  #[serde(default)]
  pub level_policy: LevelPolicy,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 8000 }

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the application router for `store`.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: StaffingStore + 'static,
{
  Router::new()
    .nest("/api", siorg_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}
