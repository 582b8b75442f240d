/*
 * Responsibility
 * - POST /login: exchange the Basic identity (already checked by middleware) for a bearer token
 * - GET /secure: protected resource, reachable only through the bearer guard
 */
use axum::{Json, extract::State};

use crate::{
    api::{
        dto::auth::{SecureLinks, SecureResponse, TokenResponse},
        extractors::AuthCtxExtractor,
    },
    error::AppError,
    state::AppState,
};

pub async fn login(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<TokenResponse>, AppError> {
    let tokens = state.auth.tokens();
    let now = chrono::Utc::now().timestamp();

    let access_token = tokens.issue(&ctx.subject, now).map_err(|e| {
        tracing::error!(error = %e, "failed to sign access token");
        AppError::Internal
    })?;

    tracing::info!(subject = %ctx.subject, "access token issued");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "Bearer",
        expires_in: tokens.ttl_seconds(),
    }))
}

pub async fn secure(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Json<SecureResponse> {
    tracing::info!(subject = %ctx.subject, token_id = ?ctx.token_id, "secure area accessed");

    Json(SecureResponse {
        message: "Welcome to the secure area",
        user: ctx.subject,
        links: SecureLinks {
            self_link: state.links.secure(),
            login: state.links.login(),
        },
    })
}
