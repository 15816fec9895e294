pub mod aggregate;

pub use aggregate::{AccountType, BankAccount, BankAccountDto, BankAccountForm};
