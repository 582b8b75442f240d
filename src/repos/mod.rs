/*
 * Responsibility
 * - storage collaborator for expense records
 * - ExpenseStore is the contract, pg / memory are the backends
 */
pub mod error;
pub mod expense_repo;
pub mod memory;
pub mod pg;

pub use expense_repo::{ExpenseFields, ExpenseRow, ExpenseStore};
pub use memory::MemoryExpenseStore;
pub use pg::PgExpenseStore;
