pub mod aggregate;
pub mod view;

pub use aggregate::{Expense, ExpenseDto, ExpenseForm, ExpenseFormVariant, PaymentMode};
pub use view::{build_expense_view, ExpenseLookups, ExpenseRow, ExpenseSummary, ExpenseView};
