/*
 * Responsibility
 * - the "authenticated context" type handlers see
 * - auth middleware verifies credentials and stores it in request extensions;
 *   handlers only ever receive this type
 */

/// Context attached to an authenticated request.
///
/// - `subject` is the login identity (the token's `sub` claim)
/// - `token_id` is the token's `jti`, kept for log correlation (absent on the login exchange)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub subject: String,
    pub token_id: Option<String>,
}

impl AuthCtx {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            token_id: None,
        }
    }

    pub fn with_token_id(mut self, token_id: Option<String>) -> Self {
        self.token_id = token_id;
        self
    }
}
