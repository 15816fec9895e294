mod view;

pub use view::{ExpenseDetails, ExpenseFormData};
