/*
 * Responsibility
 * - process-level services injected through AppState
 * - pure domain logic (pagination, links, token verification) lives here, not in handlers
 */
pub mod auth;
pub mod id_codec;
pub mod links;
pub mod pagination;
