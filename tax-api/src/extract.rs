//! Extractors whose rejections render through [`ApiError`], so a malformed
//! body or query string gets the same `{"error": {...}}` shape as every other
//! failure.

use axum::extract::{FromRequest, FromRequestParts};

use crate::errors::ApiError;

/// `axum::Json` with an [`ApiError`] rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Query` with an [`ApiError`] rejection.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
