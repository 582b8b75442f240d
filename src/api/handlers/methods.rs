/*
 * Responsibility
 * - per-path advertised method sets
 * - OPTIONS responder (204 + Allow) and the 405 fallback for everything else
 */
use axum::{
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;

pub const COLLECTION_METHODS: &str = "GET, POST, OPTIONS";
pub const ITEM_METHODS: &str = "GET, PUT, DELETE, OPTIONS";
pub const LOGIN_METHODS: &str = "POST";
pub const SECURE_METHODS: &str = "GET";
pub const SEED_METHODS: &str = "POST";

fn preflight(allow: &'static str) -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [
            (header::ALLOW, allow),
            (header::ACCESS_CONTROL_ALLOW_METHODS, allow),
        ],
    )
}

pub async fn collection_options() -> impl IntoResponse {
    preflight(COLLECTION_METHODS)
}

pub async fn item_options() -> impl IntoResponse {
    preflight(ITEM_METHODS)
}

pub async fn collection_not_allowed() -> AppError {
    AppError::MethodNotAllowed {
        allow: COLLECTION_METHODS,
    }
}

pub async fn item_not_allowed() -> AppError {
    AppError::MethodNotAllowed {
        allow: ITEM_METHODS,
    }
}

pub async fn login_not_allowed() -> AppError {
    AppError::MethodNotAllowed {
        allow: LOGIN_METHODS,
    }
}

pub async fn secure_not_allowed() -> AppError {
    AppError::MethodNotAllowed {
        allow: SECURE_METHODS,
    }
}

pub async fn seed_not_allowed() -> AppError {
    AppError::MethodNotAllowed {
        allow: SEED_METHODS,
    }
}
