//! Read-only listings of the controlled vocabularies, for clients that
//! render pick-lists.

use axum::Json;
use siorg_core::{ActType, FunctionCategory, Vocabulary, vocab::VocabularyEntry};

/// `GET /vocabulary/act-types`
pub async fn act_types() -> Json<Vec<VocabularyEntry>> { Json(ActType::entries()) }

/// `GET /vocabulary/categories`
pub async fn categories() -> Json<Vec<VocabularyEntry>> {
  Json(FunctionCategory::entries())
}
