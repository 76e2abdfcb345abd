//! Enhanced HTTP request extractors with improved error handling.
//!
//! Drop-in replacements for the standard axum extractors that reject with
//! the same structured [`ErrorResponse`] body the handlers produce, and that
//! implement [`aide::OperationInput`] for OpenAPI generation.
//!
//! [`ErrorResponse`]: crate::handler::ErrorResponse

mod reject;

pub use crate::extract::reject::{Json, Path, Query};
