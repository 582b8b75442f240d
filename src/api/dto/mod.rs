/*
 * Responsibility
 * - request / response DTOs (wire shapes)
 */
pub mod auth;
pub mod expenses;
