/*
 * Responsibility
 * - expenses CRUD on Postgres (SQLx)
 * - insertion order = primary key order
 * - "updatedAt" is refreshed on every full replace
 * - the seed reset runs in a single transaction
 */
use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::repos::expense_repo::{ExpenseFields, ExpenseRow, ExpenseStore, RepoResult};

const CREATE_EXPENSES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS expenses (
    "expenseId"   BIGSERIAL   PRIMARY KEY,
    title         TEXT        NOT NULL,
    description   TEXT        NOT NULL,
    amount        TEXT        NOT NULL,
    date          TEXT        NOT NULL,
    category      TEXT        NOT NULL,
    "createdAt"   TIMESTAMPTZ NOT NULL DEFAULT now(),
    "updatedAt"   TIMESTAMPTZ NOT NULL DEFAULT now()
);
"#;

const INSERT_EXPENSE: &str = r#"
INSERT INTO expenses (title, description, amount, date, category)
VALUES ($1, $2, $3, $4, $5)
RETURNING
    "expenseId", title, description, amount, date, category, "createdAt", "updatedAt"
"#;

#[derive(Clone, Debug)]
pub struct PgExpenseStore {
    pool: PgPool,
}

impl PgExpenseStore {
    pub async fn connect(database_url: &str) -> RepoResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    pub async fn ensure_schema(&self) -> RepoResult<()> {
        sqlx::query(CREATE_EXPENSES_TABLE)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

// Postgres LIMIT/OFFSET are signed
fn to_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

#[async_trait]
impl ExpenseStore for PgExpenseStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn count(&self) -> RepoResult<u64> {
        let (count,): (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM expenses"#)
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn find(&self, skip: u64, limit: Option<u64>) -> RepoResult<Vec<ExpenseRow>> {
        // LIMIT NULL means "no limit" in Postgres
        let rows = sqlx::query_as::<_, ExpenseRow>(
            r#"
            SELECT
                "expenseId", title, description, amount, date, category, "createdAt", "updatedAt"
            FROM expenses
            ORDER BY "expenseId" ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit.map(to_i64))
        .bind(to_i64(skip))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<ExpenseRow>> {
        let row = sqlx::query_as::<_, ExpenseRow>(
            r#"
            SELECT
                "expenseId", title, description, amount, date, category, "createdAt", "updatedAt"
            FROM expenses
            WHERE "expenseId" = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create(&self, fields: &ExpenseFields) -> RepoResult<ExpenseRow> {
        let row = sqlx::query_as::<_, ExpenseRow>(INSERT_EXPENSE)
            .bind(&fields.title)
            .bind(&fields.description)
            .bind(&fields.amount)
            .bind(&fields.date)
            .bind(&fields.category)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    async fn update_by_id(
        &self,
        id: i64,
        fields: &ExpenseFields,
    ) -> RepoResult<Option<ExpenseRow>> {
        let row = sqlx::query_as::<_, ExpenseRow>(
            r#"
            UPDATE expenses
            SET
                title = $2,
                description = $3,
                amount = $4,
                date = $5,
                category = $6,
                "updatedAt" = now()
            WHERE "expenseId" = $1
            RETURNING
                "expenseId", title, description, amount, date, category, "createdAt", "updatedAt"
            "#,
        )
        .bind(id)
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(&fields.amount)
        .bind(&fields.date)
        .bind(&fields.category)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete_by_id(&self, id: i64) -> RepoResult<Option<ExpenseRow>> {
        let row = sqlx::query_as::<_, ExpenseRow>(
            r#"
            DELETE FROM expenses
            WHERE "expenseId" = $1
            RETURNING
                "expenseId", title, description, amount, date, category, "createdAt", "updatedAt"
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn replace_all(&self, fields: &[ExpenseFields]) -> RepoResult<Vec<ExpenseRow>> {
        // rolled back on drop unless committed
        let mut tx = self.pool.begin().await?;

        sqlx::query(r#"DELETE FROM expenses"#)
            .execute(&mut *tx)
            .await?;

        let mut rows = Vec::with_capacity(fields.len());
        for f in fields {
            let row = sqlx::query_as::<_, ExpenseRow>(INSERT_EXPENSE)
                .bind(&f.title)
                .bind(&f.description)
                .bind(&f.amount)
                .bind(&f.date)
                .bind(&f.category)
                .fetch_one(&mut *tx)
                .await?;
            rows.push(row);
        }

        tx.commit().await?;
        Ok(rows)
    }
}
