/// Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{AuthService, Credentials, TokenService};

pub fn build_auth_service(config: &Config) -> Arc<AuthService> {
    let identity = Credentials::new(&config.auth_username, &config.auth_password);
    let tokens = TokenService::new(
        config.jwt_secret.as_bytes(),
        config.access_token_ttl_seconds,
    );

    Arc::new(AuthService::new(identity, tokens))
}
