//! Bearer token guard: verify the access token -> put AuthCtx into extensions.
//!
//! - `Authorization: Bearer <jwt>` (scheme name case-insensitive)
//! - signature + expiry are checked statelessly on every request
//! - any failure is a 401 advertising the Bearer challenge
//!   (`error="invalid_token"` only when a credential was actually presented)

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
use crate::state::AppState;

/// Guard the methods registered so far with the bearer check.
///
/// Uses `route_layer`, so a fallback added afterwards (405) is not turned into a 401.
pub fn guard(methods: MethodRouter<AppState>, state: AppState) -> MethodRouter<AppState> {
    // axum 0.8 from_fn cannot take the State extractor, so pass state explicitly
    methods.route_layer(middleware::from_fn_with_state(state, bearer_middleware))
}

/// Extract the token of a `Bearer` authorization value.
pub fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

async fn bearer_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // no credential at all -> bare challenge; anything unusable -> invalid_token
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(AppError::bearer_challenge)?;
    let token = value
        .to_str()
        .ok()
        .and_then(bearer_token)
        .ok_or_else(AppError::invalid_token)?;

    let now = chrono::Utc::now().timestamp();
    let claims = match state.auth.tokens().verify(token, now) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(error = %err, "access token verification failed");
            return Err(AppError::invalid_token());
        }
    };

    let auth_ctx = AuthCtx::new(claims.sub).with_token_id(claims.jti);

    // middleware -> extractor hand-off
    req.extensions_mut().insert(auth_ctx);

    Ok(next.run(req).await)
}
