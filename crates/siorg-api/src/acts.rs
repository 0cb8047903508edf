//! Handlers for `/legal-acts` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/legal-acts` | Optional `?act_type=LEI&is_active=true` |
//! | `POST`   | `/legal-acts` | Body: [`LegalActBody`]; returns 201 |
//! | `GET`    | `/legal-acts/:id` | 404 if not found |
//! | `PUT`    | `/legal-acts/:id` | Body: [`LegalActBody`]; replaces all fields |
//! | `DELETE` | `/legal-acts/:id` | 204; deletes the act's provisions too |
//! | `GET`    | `/legal-acts/:id/provisions` | Provisions of one act |

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use siorg_core::{
  ActType, ValidationError,
  act::{LegalAct, NewLegalAct},
  provision::FunctionProvision,
  store::{ActFilter, ProvisionFilter, StaffingStore},
  validation::parse_url,
};
use uuid::Uuid;

use crate::{
  error::ApiError,
  extract::{ApiJson, ApiPath, ApiQuery},
};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub act_type:  Option<ActType>,
  pub is_active: Option<bool>,
}

/// `GET /legal-acts[?act_type=<token>][&is_active=<bool>]`
pub async fn list<S: StaffingStore>(
  State(store): State<Arc<S>>,
  ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<Vec<LegalAct>>, ApiError> {
  let filter = ActFilter { act_type: params.act_type, is_active: params.is_active };
  let acts = store
    .list_legal_acts(&filter)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(acts))
}

// ─── Create / update ──────────────────────────────────────────────────────────

/// JSON body accepted by `POST /legal-acts` and `PUT /legal-acts/:id`.
///
/// An empty `url` counts as absent; an omitted `is_active` defaults to
/// `true`.
#[derive(Debug, Deserialize)]
pub struct LegalActBody {
  pub act_type:         ActType,
  pub number:           String,
  pub publication_date: Option<NaiveDate>,
  pub summary:          Option<String>,
  pub url:              Option<String>,
  #[serde(default = "crate::default_true")]
  pub is_active:        bool,
}

impl TryFrom<LegalActBody> for NewLegalAct {
  type Error = ValidationError;

  fn try_from(b: LegalActBody) -> Result<Self, Self::Error> {
    let url = b
      .url
      .as_deref()
      .filter(|u| !u.trim().is_empty())
      .map(parse_url)
      .transpose()?;

    Ok(NewLegalAct {
      act_type: b.act_type,
      number: b.number,
      publication_date: b.publication_date,
      summary: b.summary,
      url,
      is_active: b.is_active,
    })
  }
}

/// `POST /legal-acts`: returns 201 and the stored [`LegalAct`].
pub async fn create<S: StaffingStore>(
  State(store): State<Arc<S>>,
  ApiJson(body): ApiJson<LegalActBody>,
) -> Result<impl IntoResponse, ApiError> {
  let act = store
    .create_legal_act(NewLegalAct::try_from(body)?)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(act)))
}

/// `PUT /legal-acts/:id`
pub async fn update<S: StaffingStore>(
  State(store): State<Arc<S>>,
  ApiPath(id): ApiPath<Uuid>,
  ApiJson(body): ApiJson<LegalActBody>,
) -> Result<Json<LegalAct>, ApiError> {
  let act = store
    .update_legal_act(id, NewLegalAct::try_from(body)?)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(act))
}

// ─── Get / delete ─────────────────────────────────────────────────────────────

/// `GET /legal-acts/:id`
pub async fn get_one<S: StaffingStore>(
  State(store): State<Arc<S>>,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<LegalAct>, ApiError> {
  let act = store
    .get_legal_act(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("legal act {id} not found")))?;
  Ok(Json(act))
}

/// `DELETE /legal-acts/:id`
pub async fn delete_one<S: StaffingStore>(
  State(store): State<Arc<S>>,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, ApiError> {
  if store.delete_legal_act(id).await.map_err(ApiError::from_store)? {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("legal act {id} not found")))
  }
}

// ─── Provisions of one act ────────────────────────────────────────────────────

/// `GET /legal-acts/:id/provisions`
pub async fn provisions<S: StaffingStore>(
  State(store): State<Arc<S>>,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Vec<FunctionProvision>>, ApiError> {
  store
    .get_legal_act(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("legal act {id} not found")))?;

  let provisions = store
    .list_provisions(&ProvisionFilter::of_act(id))
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(provisions))
}
