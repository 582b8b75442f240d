use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::{error::Error as StdError, fmt};
use uuid::Uuid;

/// Access token (JWT, HS256) claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(default)]
    pub jti: Option<String>,
}

// Errors returned by access-token verification.
#[derive(Debug)]
pub enum VerificationError {
    Jwt(jsonwebtoken::errors::Error),
    Expired,
    EmptySubject,
}

impl fmt::Display for VerificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jwt(e) => write!(f, "jwt verification failed: {}", e),
            Self::Expired => write!(f, "token expired"),
            Self::EmptySubject => write!(f, "empty 'sub' claim"),
        }
    }
}

impl StdError for VerificationError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Jwt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for VerificationError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Jwt(e)
    }
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    // `exp` is checked against the caller's clock in `verify`
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);
    validation
}

/// Sign a token for `subject`, valid for `ttl_seconds` from `now` (unix seconds).
pub fn issue(
    subject: &str,
    key: &EncodingKey,
    now: i64,
    ttl_seconds: u64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: subject.to_string(),
        iat: now,
        exp: now.saturating_add(i64::try_from(ttl_seconds).unwrap_or(i64::MAX)),
        jti: Some(Uuid::new_v4().to_string()),
    };

    let mut header = Header::new(Algorithm::HS256);
    header.typ = Some("JWT".to_string());
    jsonwebtoken::encode(&header, &claims, key)
}

/// Stateless verification: signature, required claims, then expiry against `now`.
pub fn verify(token: &str, key: &DecodingKey, now: i64) -> Result<Claims, VerificationError> {
    let data = jsonwebtoken::decode::<Claims>(token, key, &validation())?;
    let claims = data.claims;

    if claims.exp <= now {
        return Err(VerificationError::Expired);
    }
    if claims.sub.trim().is_empty() {
        return Err(VerificationError::EmptySubject);
    }

    Ok(claims)
}

/// Signing + verification keys derived from one shared secret.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_seconds: u64,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("TokenService")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl TokenService {
    pub fn new(secret: &[u8], ttl_seconds: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl_seconds,
        }
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    pub fn issue(&self, subject: &str, now: i64) -> Result<String, jsonwebtoken::errors::Error> {
        issue(subject, &self.encoding_key, now, self.ttl_seconds)
    }

    pub fn verify(&self, token: &str, now: i64) -> Result<Claims, VerificationError> {
        verify(token, &self.decoding_key, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";
    const NOW: i64 = 1_767_225_600; // 2026-01-01T00:00:00Z

    #[test]
    fn issued_token_verifies_with_the_same_secret() {
        let tokens = TokenService::new(SECRET, 3600);
        let token = tokens.issue("admin", NOW).unwrap();

        let claims = tokens.verify(&token, NOW + 10).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.exp, NOW + 3600);
        assert!(claims.jti.is_some());
    }

    #[test]
    fn expired_token_is_rejected() {
        let tokens = TokenService::new(SECRET, 60);
        let token = tokens.issue("admin", NOW).unwrap();

        assert!(matches!(
            tokens.verify(&token, NOW + 60),
            Err(VerificationError::Expired)
        ));
    }

    #[test]
    fn foreign_secret_is_rejected() {
        let token = TokenService::new(SECRET, 60).issue("admin", NOW).unwrap();
        let other = TokenService::new(b"ffffffffffffffffffffffffffffffff", 60);

        assert!(matches!(
            other.verify(&token, NOW),
            Err(VerificationError::Jwt(_))
        ));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let tokens = TokenService::new(SECRET, 60);
        let token = tokens.issue("admin", NOW).unwrap();
        let forged = TokenService::new(b"ffffffffffffffffffffffffffffffff", 60)
            .issue("root", NOW)
            .unwrap();

        // original header + signature around a foreign payload
        let parts: Vec<&str> = token.split('.').collect();
        let forged_payload = forged.split('.').nth(1).unwrap();
        let spliced = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        assert!(tokens.verify(&spliced, NOW).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        let tokens = TokenService::new(SECRET, 60);
        assert!(tokens.verify("not.a.jwt", NOW).is_err());
        assert!(tokens.verify("", NOW).is_err());
    }
}
