/*
 * Responsibility
 * - login exchange: Basic credentials -> signed access token
 * - bearer verification: token -> subject (stateless, no session store)
 * - the two never call into each other; they only share the signing secret
 */
pub mod basic;
pub mod factory;
pub mod token;

use std::fmt;

pub use basic::{BasicAuthError, Credentials};
pub use factory::build_auth_service;
pub use token::{Claims, TokenService, VerificationError};

pub struct AuthService {
    identity: Credentials,
    tokens: TokenService,
}

impl fmt::Debug for AuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthService")
            .field("identity", &self.identity)
            .field("tokens", &self.tokens)
            .finish()
    }
}

impl AuthService {
    pub fn new(identity: Credentials, tokens: TokenService) -> Self {
        Self { identity, tokens }
    }

    /// Check a presented credential pair against the known identity.
    pub fn authenticate(&self, presented: &Credentials) -> bool {
        presented.matches(&self.identity)
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }
}
