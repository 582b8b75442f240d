//! CORS policy for browser clients.
//!
//! Policy:
//! - Development: permissive (Allow-Origin: *), WITHOUT credentials.
//! - Production: allowlist origins from Config (comma-separated env var), WITHOUT credentials.
//!
//! Every OPTIONS request, preflight or not, is answered by the per-path responder, which
//! advertises the path's own `Allow` set. For a real preflight (OPTIONS +
//! `Access-Control-Request-Method`) the CORS layer only contributes its origin / header /
//! max-age headers. Paths without an OPTIONS responder (e.g. /login) keep the CORS layer's
//! preflight answer, narrowed to the methods the path's 405 reports.

use std::convert::Infallible;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderValue, Method, Request, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use tower::{Layer, Service, ServiceExt, service_fn};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;

pub fn layer(config: &Config) -> CorsLayer {
    if config.app_env.is_production() {
        // Empty allowlist = no CORS headers at all
        let allowed: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        let allow_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _req| {
            allowed.iter().any(|v| v == origin)
        });

        CorsLayer::new().allow_origin(allow_origin)
    } else {
        CorsLayer::new().allow_origin(Any)
    }
    .allow_methods([
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ])
    .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
    .expose_headers([header::ALLOW, header::WWW_AUTHENTICATE])
    .max_age(Duration::from_secs(60 * 10))
}

fn is_preflight(req: &Request<Body>) -> bool {
    req.method() == Method::OPTIONS
        && req
            .headers()
            .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}

async fn run_cors<S>(cors: &CorsLayer, inner: S, req: Request<Body>) -> Response
where
    S: Service<Request<Body>, Response = Response, Error = Infallible> + Send,
    S::Future: Send,
{
    let result: Result<Response, Infallible> = cors.layer(inner).oneshot(req).await;
    match result {
        Ok(res) => res,
        Err(never) => match never {},
    }
}

// Copy of a preflight head, so the CORS layer can answer it without consuming the request
fn preflight_probe(req: &Request<Body>) -> Request<Body> {
    let mut probe = Request::new(Body::empty());
    *probe.method_mut() = Method::OPTIONS;
    *probe.uri_mut() = req.uri().clone();
    *probe.headers_mut() = req.headers().clone();
    probe
}

async fn cors_middleware(State(cors): State<CorsLayer>, req: Request<Body>, next: Next) -> Response {
    if req.method() != Method::OPTIONS {
        return run_cors(&cors, next, req).await;
    }
    if !is_preflight(&req) {
        return next.run(req).await;
    }

    // the CORS layer never reaches the inner service for a preflight
    let unreachable = service_fn(|_req: Request<Body>| async {
        Ok::<_, Infallible>(StatusCode::NO_CONTENT.into_response())
    });
    let mut cors_res = run_cors(&cors, unreachable, preflight_probe(&req)).await;
    let mut res = next.run(req).await;

    if res.status().is_success() {
        // the responder already set its own Access-Control-Allow-Methods
        for (name, value) in cors_res.headers() {
            if name == header::ACCESS_CONTROL_ALLOW_METHODS {
                continue;
            }
            if name == header::VARY {
                res.headers_mut().append(name, value.clone());
            } else {
                res.headers_mut().insert(name, value.clone());
            }
        }
        return res;
    }

    if let Some(allow) = res.headers().get(header::ALLOW).cloned() {
        cors_res
            .headers_mut()
            .insert(header::ACCESS_CONTROL_ALLOW_METHODS, allow);
    }
    cors_res
}

/// Apply CORS policy to the given Router.
pub fn apply(router: Router, config: &Config) -> Router {
    router.layer(middleware::from_fn_with_state(layer(config), cors_middleware))
}
