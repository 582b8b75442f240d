/*
 * Responsibility
 * - AppError shared by every route (one variant per failure class)
 * - IntoResponse: HTTP status + `{"error": "<message>"}` body
 * - challenge (WWW-Authenticate) and Allow headers for 401 / 405
 * - module-local errors (repo / id codec / validation / pagination) converge here
 */
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::api::dto::expenses::ValidationError;
use crate::repos::error::RepoError;
use crate::services::id_codec::IdCodecError;
use crate::services::pagination::{PageError, PageParamError};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Authentication scheme advertised back to the client on 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Challenge {
    Basic,
    /// No bearer credential was presented.
    Bearer,
    /// A bearer credential was presented but did not verify.
    InvalidToken,
}

impl Challenge {
    fn header_value(self) -> HeaderValue {
        match self {
            Challenge::Basic => HeaderValue::from_static(r#"Basic realm="expenses", charset="UTF-8""#),
            Challenge::Bearer => HeaderValue::from_static(r#"Bearer realm="expenses""#),
            Challenge::InvalidToken => {
                HeaderValue::from_static(r#"Bearer realm="expenses", error="invalid_token""#)
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("Invalid id")]
    MalformedIdentity,
    #[error("Not Acceptable: this API only serves application/json")]
    NotAcceptable,
    #[error("Unsupported Media Type: request body must be application/json")]
    UnsupportedMediaType,
    #[error("Request body too large")]
    PayloadTooLarge,
    #[error("{message}")]
    Unauthorized {
        challenge: Challenge,
        message: &'static str,
    },
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Method not allowed")]
    MethodNotAllowed { allow: &'static str },
    #[error("Internal server error")]
    Internal,
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound(resource)
    }

    pub fn basic_challenge() -> Self {
        Self::Unauthorized {
            challenge: Challenge::Basic,
            message: "Invalid credentials",
        }
    }

    pub fn bearer_challenge() -> Self {
        Self::Unauthorized {
            challenge: Challenge::Bearer,
            message: "Missing token",
        }
    }

    pub fn invalid_token() -> Self {
        Self::Unauthorized {
            challenge: Challenge::InvalidToken,
            message: "Invalid token",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::MalformedIdentity => StatusCode::BAD_REQUEST,
            AppError::NotAcceptable => StatusCode::NOT_ACCEPTABLE,
            AppError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.to_string(),
        };

        let mut res = (status, Json(body)).into_response();
        match self {
            AppError::Unauthorized { challenge, .. } => {
                res.headers_mut()
                    .insert(header::WWW_AUTHENTICATE, challenge.header_value());
            }
            AppError::MethodNotAllowed { allow } => {
                res.headers_mut()
                    .insert(header::ALLOW, HeaderValue::from_static(allow));
            }
            _ => {}
        }
        res
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        tracing::error!(error = %e, "storage failure");
        AppError::Internal
    }
}

impl From<IdCodecError> for AppError {
    fn from(e: IdCodecError) -> Self {
        match e {
            // Client supplied a malformed public id (e.g. /expenses/{id})
            IdCodecError::DecodeInvalidFormat | IdCodecError::DecodeOutOfRange => {
                AppError::MalformedIdentity
            }
            // Server-side config / programming errors
            other => {
                tracing::error!(error = %other, "id codec failure");
                AppError::Internal
            }
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<PageParamError> for AppError {
    fn from(e: PageParamError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<PageError> for AppError {
    fn from(e: PageError) -> Self {
        match e {
            PageError::OutOfRange { .. } => AppError::not_found("Page"),
        }
    }
}
