//! Login exchange guard: Basic credentials -> AuthCtx (subject = username).
//!
//! Missing header, malformed encoding and identity mismatch all answer 401
//! with a `Basic` challenge so clients can retry with credentials.

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::Credentials;
use crate::state::AppState;

/// Guard the methods registered so far with the Basic login check.
pub fn guard(methods: MethodRouter<AppState>, state: AppState) -> MethodRouter<AppState> {
    methods.route_layer(middleware::from_fn_with_state(state, basic_middleware))
}

async fn basic_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(AppError::basic_challenge)?;

    let presented = match Credentials::from_header(value) {
        Ok(creds) => creds,
        Err(err) => {
            tracing::warn!(error = %err, "malformed basic credentials");
            return Err(AppError::basic_challenge());
        }
    };

    if !state.auth.authenticate(&presented) {
        tracing::warn!(username = %presented.username, "login rejected");
        return Err(AppError::basic_challenge());
    }

    req.extensions_mut().insert(AuthCtx::new(presented.username));

    Ok(next.run(req).await)
}
