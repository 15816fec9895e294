pub mod aggregate;

pub use aggregate::{ExpenseCategory, ExpenseCategoryDto};
