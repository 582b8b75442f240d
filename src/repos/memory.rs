//! In-process expense store.
//!
//! Used when no `DATABASE_URL` is configured and by the test-suite.
//! Keys are allocated from a counter, so key order is insertion order.
use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::repos::expense_repo::{ExpenseFields, ExpenseRow, ExpenseStore, RepoResult};

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    rows: BTreeMap<i64, ExpenseRow>,
}

impl Inner {
    fn insert(&mut self, fields: &ExpenseFields) -> ExpenseRow {
        self.last_id += 1;

        let now = Utc::now();
        let row = ExpenseRow {
            expense_id: self.last_id,
            title: fields.title.clone(),
            description: fields.description.clone(),
            amount: fields.amount.clone(),
            date: fields.date.clone(),
            category: fields.category.clone(),
            created_at: now,
            updated_at: now,
        };
        self.rows.insert(row.expense_id, row.clone());
        row
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryExpenseStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExpenseStore for MemoryExpenseStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn count(&self) -> RepoResult<u64> {
        Ok(self.inner.read().await.rows.len() as u64)
    }

    async fn find(&self, skip: u64, limit: Option<u64>) -> RepoResult<Vec<ExpenseRow>> {
        let inner = self.inner.read().await;
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let take = limit
            .map(|l| usize::try_from(l).unwrap_or(usize::MAX))
            .unwrap_or(usize::MAX);

        Ok(inner.rows.values().skip(skip).take(take).cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<ExpenseRow>> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, fields: &ExpenseFields) -> RepoResult<ExpenseRow> {
        Ok(self.inner.write().await.insert(fields))
    }

    async fn update_by_id(
        &self,
        id: i64,
        fields: &ExpenseFields,
    ) -> RepoResult<Option<ExpenseRow>> {
        let mut inner = self.inner.write().await;
        let Some(row) = inner.rows.get_mut(&id) else {
            return Ok(None);
        };

        row.title = fields.title.clone();
        row.description = fields.description.clone();
        row.amount = fields.amount.clone();
        row.date = fields.date.clone();
        row.category = fields.category.clone();
        row.updated_at = Utc::now();

        Ok(Some(row.clone()))
    }

    async fn delete_by_id(&self, id: i64) -> RepoResult<Option<ExpenseRow>> {
        Ok(self.inner.write().await.rows.remove(&id))
    }

    async fn replace_all(&self, fields: &[ExpenseFields]) -> RepoResult<Vec<ExpenseRow>> {
        // one write guard: readers see either the old set or the new one
        let mut inner = self.inner.write().await;
        // ids are never reused, even after a reset
        inner.rows.clear();
        Ok(fields.iter().map(|f| inner.insert(f)).collect())
    }
}
