/*
 * Responsibility
 * - middleware entry points, in the order app.rs stacks them (outer -> inner):
 *   http -> security_headers -> cors -> negotiate -> (route) auth
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod negotiate;
pub mod security_headers;
