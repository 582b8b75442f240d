//! Content negotiation, applied to every route ahead of authentication.
//!
//! Checks (both skipped for OPTIONS):
//! - `Accept` must admit `application/json` (absent header admits everything) -> else 406
//! - POST/PUT carrying a body must declare `Content-Type: application/json` -> else 415
//!
//! The checks are pure functions over the request head; the middleware only wires them in.

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, header, request::Parts},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;

pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Apply content negotiation to every route of the given Router.
pub fn apply<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn(negotiate_middleware))
}

async fn negotiate_middleware(req: Request<Body>, next: Next) -> Result<Response, AppError> {
    let (parts, body) = req.into_parts();
    negotiate(&parts)?;
    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Run both checks on a request head.
pub fn negotiate(parts: &Parts) -> Result<(), AppError> {
    if parts.method == Method::OPTIONS {
        return Ok(());
    }

    if !accepts_json(&parts.headers) {
        return Err(AppError::NotAcceptable);
    }

    let body_bearing = matches!(parts.method, Method::POST | Method::PUT);
    if body_bearing && has_body(&parts.headers) && !declares_json(&parts.headers) {
        return Err(AppError::UnsupportedMediaType);
    }

    Ok(())
}

// (type/subtype, q) of one media range, lowercased
fn media_range(range: &str) -> (String, f32) {
    let mut pieces = range.split(';');
    let media = pieces.next().unwrap_or_default().trim().to_ascii_lowercase();
    let q = pieces
        .filter_map(|p| p.trim().split_once('='))
        .find(|(k, _)| k.trim().eq_ignore_ascii_case("q"))
        .and_then(|(_, v)| v.trim().parse::<f32>().ok())
        .unwrap_or(1.0);
    (media, q)
}

// How specifically a media range names application/json (None = it does not cover it)
fn json_specificity(media: &str) -> Option<u8> {
    match media {
        JSON_MEDIA_TYPE => Some(3),
        "application/*" => Some(2),
        "*/*" | "*" => Some(1),
        _ => None,
    }
}

// The most specific range covering JSON decides; its q must be non-zero
fn accepts_json(headers: &HeaderMap) -> bool {
    let values: Vec<&str> = headers
        .get_all(header::ACCEPT)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();

    if values.iter().all(|v| v.trim().is_empty()) {
        return true;
    }

    let best = values
        .iter()
        .flat_map(|v| v.split(','))
        .map(media_range)
        .filter_map(|(media, q)| json_specificity(&media).map(|rank| (rank, q)))
        .fold(None, |best: Option<(u8, f32)>, (rank, q)| match best {
            Some((best_rank, _)) if best_rank > rank => best,
            Some((best_rank, best_q)) if best_rank == rank => Some((rank, best_q.max(q))),
            _ => Some((rank, q)),
        });

    matches!(best, Some((_, q)) if q > 0.0)
}

fn declares_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| media_range(v).0 == JSON_MEDIA_TYPE)
        .unwrap_or(false)
}

// A POST without any payload (e.g. /login, /seed) has nothing to declare
fn has_body(headers: &HeaderMap) -> bool {
    if headers.contains_key(header::TRANSFER_ENCODING) {
        return true;
    }
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .is_some_and(|len| len > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(method: Method, headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().method(method).uri("/expenses");
        for (k, v) in headers {
            builder = builder.header(*k, *v);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn missing_accept_admits_json() {
        assert!(negotiate(&parts(Method::GET, &[])).is_ok());
    }

    #[test]
    fn wildcards_and_json_are_accepted() {
        for accept in [
            "application/json",
            "*/*",
            "application/*",
            "text/html, application/json;q=0.9",
            "Application/JSON; charset=utf-8",
        ] {
            assert!(
                negotiate(&parts(Method::GET, &[("accept", accept)])).is_ok(),
                "{accept}"
            );
        }
    }

    #[test]
    fn accept_without_json_is_not_acceptable() {
        for accept in ["text/html", "application/xml, text/plain", "application/json;q=0"] {
            assert!(
                matches!(
                    negotiate(&parts(Method::GET, &[("accept", accept)])),
                    Err(AppError::NotAcceptable)
                ),
                "{accept}"
            );
        }
    }

    #[test]
    fn most_specific_range_decides() {
        for accept in [
            "application/json;q=0, */*",
            "*/*, application/json;q=0",
            "application/*;q=0, */*;q=1",
        ] {
            assert!(
                matches!(
                    negotiate(&parts(Method::GET, &[("accept", accept)])),
                    Err(AppError::NotAcceptable)
                ),
                "{accept}"
            );
        }

        for accept in ["*/*;q=0, application/json", "application/*;q=0.5, */*;q=0"] {
            assert!(
                negotiate(&parts(Method::GET, &[("accept", accept)])).is_ok(),
                "{accept}"
            );
        }
    }

    #[test]
    fn body_must_be_declared_json() {
        let req = parts(
            Method::POST,
            &[("content-type", "text/plain"), ("content-length", "10")],
        );
        assert!(matches!(
            negotiate(&req),
            Err(AppError::UnsupportedMediaType)
        ));

        let req = parts(Method::PUT, &[("content-length", "10")]);
        assert!(matches!(
            negotiate(&req),
            Err(AppError::UnsupportedMediaType)
        ));

        let req = parts(
            Method::POST,
            &[
                ("content-type", "application/json; charset=utf-8"),
                ("content-length", "10"),
            ],
        );
        assert!(negotiate(&req).is_ok());
    }

    #[test]
    fn bodiless_post_is_not_checked() {
        assert!(negotiate(&parts(Method::POST, &[])).is_ok());
        assert!(negotiate(&parts(Method::POST, &[("content-length", "0")])).is_ok());
    }

    #[test]
    fn options_skips_both_checks() {
        let req = parts(
            Method::OPTIONS,
            &[("accept", "text/html"), ("content-type", "text/plain")],
        );
        assert!(negotiate(&req).is_ok());
    }

    #[test]
    fn not_acceptable_wins_over_unsupported_media_type() {
        let req = parts(
            Method::POST,
            &[
                ("accept", "text/html"),
                ("content-type", "text/plain"),
                ("content-length", "3"),
            ],
        );
        assert!(matches!(negotiate(&req), Err(AppError::NotAcceptable)));
    }
}
