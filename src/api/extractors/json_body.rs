//! JSON request body extractor.
//!
//! Same as `axum::Json`, but rejections are mapped onto AppError:
//! - missing / non-JSON `Content-Type` -> 415
//! - body that is not an object of fields -> 400 "All fields are required"
//! - unparsable JSON -> 400
//! - body over the size limit -> 413
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use serde::de::DeserializeOwned;

use crate::api::dto::expenses::ValidationError;
use crate::error::AppError;

pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(JsonRejection::MissingJsonContentType(_)) => Err(AppError::UnsupportedMediaType),
            Err(JsonRejection::JsonDataError(_)) => Err(ValidationError::MissingFields.into()),
            Err(JsonRejection::JsonSyntaxError(_)) => Err(AppError::validation("Invalid JSON body")),
            Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                Err(AppError::PayloadTooLarge)
            }
            Err(other) => {
                tracing::warn!(error = %other.body_text(), "request body rejected");
                Err(AppError::validation("Invalid request body"))
            }
        }
    }
}
