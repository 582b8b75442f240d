//! `Authorization: Basic` parsing and the fixed login identity.
use base64::{Engine as _, engine::general_purpose::STANDARD};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BasicAuthError {
    #[error("authorization scheme is not Basic")]
    WrongScheme,
    #[error("credentials are not valid base64")]
    InvalidEncoding,
    #[error("credentials are not `user:password`")]
    MissingSeparator,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Parse an `Authorization` header value. The scheme name is case-insensitive.
    pub fn from_header(value: &str) -> Result<Self, BasicAuthError> {
        let (scheme, encoded) = value
            .trim()
            .split_once(' ')
            .ok_or(BasicAuthError::WrongScheme)?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return Err(BasicAuthError::WrongScheme);
        }

        let decoded = STANDARD
            .decode(encoded.trim())
            .map_err(|_| BasicAuthError::InvalidEncoding)?;
        let decoded = String::from_utf8(decoded).map_err(|_| BasicAuthError::InvalidEncoding)?;

        // the password may itself contain ':'
        let (username, password) = decoded
            .split_once(':')
            .ok_or(BasicAuthError::MissingSeparator)?;

        Ok(Self::new(username, password))
    }

    /// Compare against the known identity without short-circuiting on the first differing byte.
    pub fn matches(&self, known: &Credentials) -> bool {
        let user_ok = constant_time_eq(self.username.as_bytes(), known.username.as_bytes());
        let pass_ok = constant_time_eq(self.password.as_bytes(), known.password.as_bytes());
        user_ok & pass_ok
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
