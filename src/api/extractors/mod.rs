/*
 * Responsibility
 * - request extractors shared by handlers
 * - every rejection is an AppError, so failures keep the `{"error": ...}` shape
 */
pub mod auth_ctx;
pub mod json_body;
pub mod page_query;
pub mod public_id;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor};
pub use json_body::JsonBody;
pub use page_query::PageQuery;
pub use public_id::ExpenseId;
