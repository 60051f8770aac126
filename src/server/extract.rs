use axum::extract::FromRequest;

use crate::server::error::ApiError;

/// `Json` whose rejections answer with the service's error body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
