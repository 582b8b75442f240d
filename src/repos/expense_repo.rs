//! Storage contract for expense records.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::repos::error::RepoError;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ExpenseRow {
    #[sqlx(rename = "expenseId")]
    pub expense_id: i64,

    pub title: String,
    pub description: String,
    pub amount: String,
    pub date: String,
    pub category: String,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// The five business fields, already normalized (trimmed, non-empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseFields {
    pub title: String,
    pub description: String,
    pub amount: String,
    pub date: String,
    pub category: String,
}

/// Document-store style access to expense records.
///
/// Implementations must:
/// - return records from `find` in insertion order
/// - apply each create/update/delete atomically for a single record
/// - apply `replace_all` as a whole or not at all
/// - be cheap to share (`Arc<dyn ExpenseStore>`)
#[async_trait]
pub trait ExpenseStore: Send + Sync + 'static {
    // Backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // Count of all records, independent of any window.
    async fn count(&self) -> RepoResult<u64>;

    // Records in insertion order, skipping `skip`, at most `limit` (None = no limit).
    async fn find(&self, skip: u64, limit: Option<u64>) -> RepoResult<Vec<ExpenseRow>>;

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<ExpenseRow>>;

    async fn create(&self, fields: &ExpenseFields) -> RepoResult<ExpenseRow>;

    // Replaces all five fields. Returns None when the id is unknown.
    async fn update_by_id(&self, id: i64, fields: &ExpenseFields)
    -> RepoResult<Option<ExpenseRow>>;

    // Returns the removed record, or None when the id is unknown.
    async fn delete_by_id(&self, id: i64) -> RepoResult<Option<ExpenseRow>>;

    // Removes every record, then inserts `fields` in order, as one atomic step.
    async fn replace_all(&self, fields: &[ExpenseFields]) -> RepoResult<Vec<ExpenseRow>>;
}
