/**
 * Responsibility
 *  - declare one meaningful id type per resource
 *  - no decode logic, no extractor impl here
 */
use super::core::PublicId;

// expenses
pub enum ExpenseTag {}
pub type ExpenseId = PublicId<ExpenseTag>;
