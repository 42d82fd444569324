use axum::extract::FromRequest;

use crate::server::error::AppError;

/// JSON body extractor whose rejections render as the standard error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
