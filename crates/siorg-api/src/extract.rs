//! Extractors whose rejections answer with the API's JSON error body.
//!
//! axum's own [`Json`], [`Path`] and [`Query`] reject malformed input with a
//! plain-text response; these wrappers route the rejection through
//! [`ApiError::BadRequest`] instead.

use axum::{
  Json,
  extract::{FromRequest, FromRequestParts, Path, Query},
};

use crate::error::ApiError;

/// JSON request body.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path parameters.
#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// Query-string parameters.
#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
