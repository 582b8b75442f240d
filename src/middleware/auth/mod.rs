/*
 * Responsibility
 * - authentication middleware (two independent schemes)
 *   - basic: login exchange guard for POST /login
 *   - bearer: token guard for protected resources
 * - both store AuthCtx in request extensions on success
 */
pub mod basic;
pub mod bearer;
