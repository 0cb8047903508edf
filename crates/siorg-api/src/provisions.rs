//! Handlers for `/provisions` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/provisions` | Optional `legal_act_id`, `category`, `active` |
//! | `POST`   | `/provisions` | Body: [`ProvisionBody`]; returns 201 |
//! | `GET`    | `/provisions/:id` | 404 if not found |
//! | `PUT`    | `/provisions/:id` | Body: [`ProvisionBody`] |
//! | `DELETE` | `/provisions/:id` | 204 |

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use siorg_core::{
  FunctionCategory,
  provision::{FunctionProvision, NewFunctionProvision},
  store::{ProvisionFilter, StaffingStore},
};
use uuid::Uuid;

use crate::{
  error::ApiError,
  extract::{ApiJson, ApiPath, ApiQuery},
};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub legal_act_id: Option<Uuid>,
  pub category:     Option<FunctionCategory>,
  pub active:       Option<bool>,
}

/// `GET /provisions[?legal_act_id=...][&category=...][&active=...]`
pub async fn list<S: StaffingStore>(
  State(store): State<Arc<S>>,
  ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<Vec<FunctionProvision>>, ApiError> {
  let filter = ProvisionFilter {
    legal_act_id: params.legal_act_id,
    category:     params.category,
    active:       params.active,
  };
  let provisions = store
    .list_provisions(&filter)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(provisions))
}

// ─── Create / update ──────────────────────────────────────────────────────────

/// JSON body accepted by `POST /provisions` and `PUT /provisions/:id`.
///
/// `level` is taken as a plain integer so that negative or out-of-range
/// values reach validation and get its message back.
#[derive(Debug, Deserialize)]
pub struct ProvisionBody {
  pub legal_act_id:   Uuid,
  pub category:       FunctionCategory,
  pub level:          i32,
  pub quantity_delta: i32,
  #[serde(default = "crate::default_true")]
  pub active:         bool,
}

impl From<ProvisionBody> for NewFunctionProvision {
  fn from(b: ProvisionBody) -> Self {
    NewFunctionProvision {
      legal_act_id:   b.legal_act_id,
      category:       b.category,
      level:          b.level,
      quantity_delta: b.quantity_delta,
      active:         b.active,
    }
  }
}

/// `POST /provisions`: returns 201 and the stored [`FunctionProvision`].
pub async fn create<S: StaffingStore>(
  State(store): State<Arc<S>>,
  ApiJson(body): ApiJson<ProvisionBody>,
) -> Result<impl IntoResponse, ApiError> {
  let provision = store
    .create_provision(NewFunctionProvision::from(body))
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(provision)))
}

/// `PUT /provisions/:id`
pub async fn update<S: StaffingStore>(
  State(store): State<Arc<S>>,
  ApiPath(id): ApiPath<Uuid>,
  ApiJson(body): ApiJson<ProvisionBody>,
) -> Result<Json<FunctionProvision>, ApiError> {
  let provision = store
    .update_provision(id, NewFunctionProvision::from(body))
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(provision))
}

// ─── Get / delete ─────────────────────────────────────────────────────────────

/// `GET /provisions/:id`
pub async fn get_one<S: StaffingStore>(
  State(store): State<Arc<S>>,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<FunctionProvision>, ApiError> {
  let provision = store
    .get_provision(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("provision {id} not found")))?;
  Ok(Json(provision))
}

/// `DELETE /provisions/:id`
pub async fn delete_one<S: StaffingStore>(
  State(store): State<Arc<S>>,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, ApiError> {
  if store.delete_provision(id).await.map_err(ApiError::from_store)? {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("provision {id} not found")))
  }
}
