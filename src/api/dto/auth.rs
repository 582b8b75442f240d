use serde::Serialize;

use crate::services::links::Link;

/// Body of a successful `POST /login`.
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always "Bearer"
    pub token_type: &'static str,
    /// Seconds until expiry.
    pub expires_in: u64,
}

#[derive(Debug, Serialize)]
pub struct SecureLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
    pub login: Link,
}

/// Body of `GET /secure`.
#[derive(Debug, Serialize)]
pub struct SecureResponse {
    pub message: &'static str,
    pub user: String,
    #[serde(rename = "_links")]
    pub links: SecureLinks,
}
