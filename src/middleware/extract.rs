//! Body and path extractors whose rejections render as `{"detail": ...}`.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::VitiError;

/// `axum::Json`, rejecting malformed bodies with `VitiError`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(VitiError))]
pub struct ApiJson<T>(pub T);

/// `axum::Form`, rejecting malformed forms with `VitiError`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Form), rejection(VitiError))]
pub struct ApiForm<T>(pub T);

/// `axum::extract::Path`, rejecting unparsable segments with `VitiError`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(VitiError))]
pub struct ApiPath<T>(pub T);
