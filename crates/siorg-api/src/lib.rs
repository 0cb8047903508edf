//! JSON CRUD API for the staffing legal-acts registry.
//!
//! Exposes an axum [`Router`] backed by any
//! [`siorg_core::store::StaffingStore`]. Auth, TLS, and transport concerns
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", siorg_api::api_router(store.clone()))
//! ```
//!
//! # Status codes
//!
//! Undecodable requests (malformed JSON, unknown vocabulary tokens, bad path
//! or query parameters) answer `400`, validation failures `422`, uniqueness
//! or foreign-key violations `409`, unknown ids `404`. Error bodies are `{"error": "<message>"}`.

pub mod acts;
pub mod error;
pub mod extract;
pub mod provisions;
pub mod vocabulary;

use std::sync::Arc;

use axum::{Router, routing::get};
use siorg_core::store::StaffingStore;

pub use error::ApiError;

fn default_true() -> bool { true }

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: StaffingStore + 'static,
{
  Router::new()
    // Legal acts
    .route("/legal-acts", get(acts::list::<S>).post(acts::create::<S>))
    .route(
      "/legal-acts/{id}",
      get(acts::get_one::<S>)
        .put(acts::update::<S>)
        .delete(acts::delete_one::<S>),
    )
    .route("/legal-acts/{id}/provisions", get(acts::provisions::<S>))
    // Provisions
    .route(
      "/provisions",
      get(provisions::list::<S>).post(provisions::create::<S>),
    )
    .route(
      "/provisions/{id}",
      get(provisions::get_one::<S>)
        .put(provisions::update::<S>)
        .delete(provisions::delete_one::<S>),
    )
    // Vocabularies
    .route("/vocabulary/act-types", get(vocabulary::act_types))
    .route("/vocabulary/categories", get(vocabulary::categories))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use serde_json::{Value, json};
  use siorg_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store))
  }

  async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
      Some(b) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(b.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(req).await.unwrap()
  }

  async fn json_body(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  async fn create_act(app: &Router, act_type: &str, number: &str) -> Value {
    let resp = send(
      app,
      "POST",
      "/legal-acts",
      Some(json!({ "act_type": act_type, "number": number })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    json_body(resp).await
  }

  // ── Legal acts ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_act_defaults_to_active() {
    let app = app().await;
    let act = create_act(&app, "LEI", "1955").await;
    assert_eq!(act["is_active"], json!(true));
    assert_eq!(act["act_type"], json!("LEI"));
    assert_eq!(act["url"], Value::Null);

    let id = act["legal_act_id"].as_str().unwrap();
    let resp = send(&app, "GET", &format!("/legal-acts/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["number"], json!("1955"));
  }

  #[tokio::test]
  async fn duplicate_act_is_a_conflict() {
    let app = app().await;
    create_act(&app, "LEI", "1955").await;

    let resp = send(
      &app,
      "POST",
      "/legal-acts",
      Some(json!({ "act_type": "LEI", "number": "1955" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert!(json_body(resp).await["error"].is_string());
  }

  #[tokio::test]
  async fn invalid_act_url_is_unprocessable() {
    let app = app().await;
    let resp = send(
      &app,
      "POST",
      "/legal-acts",
      Some(json!({ "act_type": "DECRETO", "number": "7", "url": "ftp//broken" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
  }

  #[tokio::test]
  async fn empty_url_counts_as_absent() {
    let app = app().await;
    let resp = send(
      &app,
      "POST",
      "/legal-acts",
      Some(json!({ "act_type": "OUTRO", "number": "3", "url": "" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(json_body(resp).await["url"], Value::Null);
  }

  async fn assert_bad_request(resp: Response) {
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");
    assert!(json_body(resp).await["error"].is_string());
  }

  #[tokio::test]
  async fn unknown_act_type_is_a_bad_request() {
    let app = app().await;
    let resp = send(
      &app,
      "POST",
      "/legal-acts",
      Some(json!({ "act_type": "RESOLUCAO", "number": "1" })),
    )
    .await;
    assert_bad_request(resp).await;
  }

  #[tokio::test]
  async fn malformed_json_is_a_bad_request() {
    let app = app().await;
    let req = Request::builder()
      .method("POST")
      .uri("/legal-acts")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from("{not json"))
      .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_bad_request(resp).await;
  }

  #[tokio::test]
  async fn non_uuid_id_is_a_bad_request() {
    let app = app().await;
    for uri in ["/legal-acts/not-a-uuid", "/provisions/42"] {
      let resp = send(&app, "GET", uri, None).await;
      assert_bad_request(resp).await;
    }
  }

  #[tokio::test]
  async fn unknown_query_token_is_a_bad_request() {
    let app = app().await;
    let resp = send(&app, "GET", "/provisions?category=XX", None).await;
    assert_bad_request(resp).await;

    let resp = send(&app, "GET", "/legal-acts?act_type=RESOLUCAO", None).await;
    assert_bad_request(resp).await;
  }

  #[tokio::test]
  async fn list_acts_filtered_by_type() {
    let app = app().await;
    create_act(&app, "LEI", "1955").await;
    create_act(&app, "PORTARIA", "1407/MEC").await;

    let resp = send(&app, "GET", "/legal-acts?act_type=PORTARIA", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let acts = json_body(resp).await;
    assert_eq!(acts.as_array().unwrap().len(), 1);
    assert_eq!(acts[0]["number"], json!("1407/MEC"));
  }

  #[tokio::test]
  async fn update_act_replaces_fields() {
    let app = app().await;
    let act = create_act(&app, "LEI", "1955").await;
    let id = act["legal_act_id"].as_str().unwrap();

    let resp = send(
      &app,
      "PUT",
      &format!("/legal-acts/{id}"),
      Some(json!({
        "act_type": "LEI",
        "number": "1955",
        "publication_date": "1953-10-03",
        "summary": "Ementa corrigida",
        "url": "https://www.planalto.gov.br/lei1955.htm",
        "is_active": false,
      })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = json_body(resp).await;
    assert_eq!(updated["publication_date"], json!("1953-10-03"));
    assert_eq!(updated["is_active"], json!(false));
    assert_eq!(updated["created_at"], act["created_at"]);
  }

  #[tokio::test]
  async fn unknown_act_is_not_found() {
    let app = app().await;
    let id = uuid::Uuid::new_v4();
    for method in ["GET", "DELETE"] {
      let resp = send(&app, method, &format!("/legal-acts/{id}"), None).await;
      assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{method}");
    }
    let resp = send(&app, "GET", &format!("/legal-acts/{id}/provisions"), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Provisions ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn provision_lifecycle_and_cascade() {
    let app = app().await;
    let act = create_act(&app, "PORTARIA", "1407/MEC").await;
    let act_id = act["legal_act_id"].as_str().unwrap();

    for (category, level, delta) in [("FG", 3, 4), ("CD", 2, -1), ("FCC", 1, 2)] {
      let resp = send(
        &app,
        "POST",
        "/provisions",
        Some(json!({
          "legal_act_id": act_id,
          "category": category,
          "level": level,
          "quantity_delta": delta,
        })),
      )
      .await;
      assert_eq!(resp.status(), StatusCode::CREATED);
      assert_eq!(json_body(resp).await["active"], json!(true));
    }

    let resp = send(&app, "GET", &format!("/legal-acts/{act_id}/provisions"), None).await;
    let listed = json_body(resp).await;
    let order: Vec<_> = listed
      .as_array()
      .unwrap()
      .iter()
      .map(|p| p["category"].as_str().unwrap().to_owned())
      .collect();
    assert_eq!(order, ["CD", "FCC", "FG"]);

    let resp = send(&app, "DELETE", &format!("/legal-acts/{act_id}"), None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(&app, "GET", "/provisions", None).await;
    assert_eq!(json_body(resp).await, json!([]));
  }

  #[tokio::test]
  async fn out_of_range_level_is_unprocessable() {
    let app = app().await;
    let act = create_act(&app, "LEI", "1955").await;

    let resp = send(
      &app,
      "POST",
      "/provisions",
      Some(json!({
        "legal_act_id": act["legal_act_id"],
        "category": "CD",
        "level": 5,
        "quantity_delta": 1,
      })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
      json_body(resp).await["error"],
      json!("CD must have level between 1 and 4")
    );
  }

  #[tokio::test]
  async fn duplicate_provision_is_a_conflict() {
    let app = app().await;
    let act = create_act(&app, "LEI", "1955").await;
    let body = json!({
      "legal_act_id": act["legal_act_id"],
      "category": "CD",
      "level": 2,
      "quantity_delta": 1,
    });

    let first = send(&app, "POST", "/provisions", Some(body.clone())).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let second = send(&app, "POST", "/provisions", Some(body)).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
  }

  #[tokio::test]
  async fn update_and_delete_provision() {
    let app = app().await;
    let act = create_act(&app, "DECRETO", "9739").await;
    let resp = send(
      &app,
      "POST",
      "/provisions",
      Some(json!({
        "legal_act_id": act["legal_act_id"],
        "category": "FG",
        "level": 1,
        "quantity_delta": 10,
      })),
    )
    .await;
    let created = json_body(resp).await;
    let id = created["provision_id"].as_str().unwrap();

    let resp = send(
      &app,
      "PUT",
      &format!("/provisions/{id}"),
      Some(json!({
        "legal_act_id": act["legal_act_id"],
        "category": "FG",
        "level": 1,
        "quantity_delta": -10,
        "active": false,
      })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = json_body(resp).await;
    assert_eq!(updated["quantity_delta"], json!(-10));
    assert_eq!(updated["active"], json!(false));

    let resp = send(&app, "DELETE", &format!("/provisions/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let resp = send(&app, "GET", &format!("/provisions/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Vocabularies ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn vocabularies_list_tokens_and_labels() {
    let app = app().await;
    let resp = send(&app, "GET", "/vocabulary/categories", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
      json_body(resp).await,
      json!([
        { "token": "CD", "label": "Cargo de Direção" },
        { "token": "FG", "label": "Função Gratificada" },
        { "token": "FCC", "label": "Função Comissionada de Coordenação" },
      ])
    );

    let resp = send(&app, "GET", "/vocabulary/act-types", None).await;
    assert_eq!(json_body(resp).await.as_array().unwrap().len(), 4);
  }
}
