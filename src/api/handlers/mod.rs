/*
 * Responsibility
 * - route handlers (one module per resource)
 */
pub mod auth;
pub mod expenses;
pub mod health;
pub mod methods;
pub mod seed;

use crate::error::AppError;

pub async fn not_found() -> AppError {
    AppError::not_found("Route")
}
