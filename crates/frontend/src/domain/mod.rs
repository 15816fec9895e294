pub mod a001_staff;
pub mod a002_bank_account;
pub mod a003_expense_category;
pub mod a004_expense;
pub mod a005_attendance;
pub mod a006_item;
pub mod a007_shop;
pub mod a008_order;
