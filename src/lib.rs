/*
 * Responsibility
 * - module tree of the expense API
 * - exposed as a library so the router can be driven in-process by tests
 */
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
