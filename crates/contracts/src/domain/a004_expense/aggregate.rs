use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::common::{flex, Keyed, RecordId, Resource};
use crate::shared::period::DateWireFormat;
use crate::shared::validation::{self, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    #[default]
    Cash,
    Upi,
    Bank,
}

impl PaymentMode {
    pub const ALL: [PaymentMode; 3] = [PaymentMode::Cash, PaymentMode::Upi, PaymentMode::Bank];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Cash => "cash",
            PaymentMode::Upi => "upi",
            PaymentMode::Bank => "bank",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMode::Cash => "Cash",
            PaymentMode::Upi => "UPI",
            PaymentMode::Bank => "Bank",
        }
    }

    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "upi" | "gpay" | "phonepe" => PaymentMode::Upi,
            "bank" | "bank transfer" | "neft" | "imps" | "card" => PaymentMode::Bank,
            _ => PaymentMode::Cash,
        }
    }

    /// Non-cash payments are drawn from a bank account.
    pub fn needs_bank_account(&self) -> bool {
        *self != PaymentMode::Cash
    }
}

fn payment_mode_lossy<'de, D: Deserializer<'de>>(d: D) -> Result<PaymentMode, D::Error> {
    let raw: Option<String> = Option::deserialize(d)?;
    Ok(raw
        .as_deref()
        .map(PaymentMode::from_str_lossy)
        .unwrap_or_default())
}

/// An expense paid out to (or on behalf of) a staff member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(deserialize_with = "flex::id")]
    pub id: RecordId,
    #[serde(deserialize_with = "flex::id")]
    pub staff_id: RecordId,
    #[serde(deserialize_with = "flex::number")]
    pub amount: f64,
    /// As stored: `YYYY-MM-DD` or `DD-MM-YYYY`.
    #[serde(alias = "date")]
    pub expense_date: String,
    #[serde(default, deserialize_with = "payment_mode_lossy")]
    pub payment_mode: PaymentMode,
    #[serde(default, deserialize_with = "flex::opt_id")]
    pub bank_account_id: Option<RecordId>,
    #[serde(default, deserialize_with = "flex::opt_id")]
    pub category_id: Option<RecordId>,
    #[serde(default, alias = "description", deserialize_with = "flex::opt_text")]
    pub note: Option<String>,
    // Joined display columns some endpoints include.
    #[serde(default, deserialize_with = "flex::opt_text")]
    pub category_name: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_text")]
    pub account_name: Option<String>,
}

impl Keyed for Expense {
    fn key(&self) -> RecordId {
        self.id
    }
}

impl Resource for Expense {
    const COLLECTION_KEY: &'static str = "expenses";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub user_id: RecordId,
    pub staff_id: RecordId,
    pub amount: f64,
    pub expense_date: String,
    pub payment_mode: PaymentMode,
    pub bank_account_id: Option<RecordId>,
    pub category_id: Option<RecordId>,
    pub note: Option<String>,
}

/// Which screen the form belongs to. The client screen files every expense
/// under a category; the admin screen leaves it optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseFormVariant {
    Admin,
    Client,
}

/// Raw state of the add/edit expense modal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseForm {
    pub id: Option<RecordId>,
    pub staff_id: Option<RecordId>,
    pub amount: String,
    pub expense_date: String,
    payment_mode: PaymentMode,
    bank_account_id: Option<RecordId>,
    pub category_id: Option<RecordId>,
    pub note: String,
}

impl ExpenseForm {
    pub fn new(staff_id: Option<RecordId>, today_iso: &str) -> Self {
        Self {
            staff_id,
            expense_date: today_iso.to_string(),
            ..Default::default()
        }
    }

    pub fn from_expense(e: &Expense) -> Self {
        let mut form = Self {
            id: Some(e.id),
            staff_id: Some(e.staff_id),
            amount: format!("{:.2}", e.amount),
            expense_date: crate::shared::period::to_iso(&e.expense_date)
                .unwrap_or_else(|| e.expense_date.clone()),
            category_id: e.category_id,
            note: e.note.clone().unwrap_or_default(),
            ..Default::default()
        };
        form.set_payment_mode(e.payment_mode);
        form.set_bank_account(e.bank_account_id);
        form
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn payment_mode(&self) -> PaymentMode {
        self.payment_mode
    }

    pub fn bank_account_id(&self) -> Option<RecordId> {
        self.bank_account_id
    }

    /// Switching to cash clears the bank account.
    pub fn set_payment_mode(&mut self, mode: PaymentMode) {
        self.payment_mode = mode;
        if !mode.needs_bank_account() {
            self.bank_account_id = None;
        }
    }

    /// Ignored while the payment mode is cash.
    pub fn set_bank_account(&mut self, id: Option<RecordId>) {
        if self.bank_selector_enabled() {
            self.bank_account_id = id;
        }
    }

    pub fn bank_selector_enabled(&self) -> bool {
        self.payment_mode.needs_bank_account()
    }

    pub fn validate(
        &self,
        user_id: RecordId,
        variant: ExpenseFormVariant,
        date_format: DateWireFormat,
    ) -> Result<ExpenseDto, ValidationError> {
        let staff_id = validation::required_id("Staff", self.staff_id)?;
        let amount = validation::positive_amount("Amount", &self.amount)?;
        let iso = validation::date("Expense date", &self.expense_date)?;
        let expense_date = date_format
            .encode(&iso)
            .ok_or(ValidationError::BadDate("Expense date"))?;

        let bank_account_id = if self.payment_mode.needs_bank_account() {
            Some(
                self.bank_account_id
                    .ok_or(ValidationError::BankAccountRequired(self.payment_mode.label()))?,
            )
        } else {
            None
        };

        let category_id = match variant {
            ExpenseFormVariant::Client => {
                Some(validation::required_id("Category", self.category_id)?)
            }
            ExpenseFormVariant::Admin => self.category_id,
        };

        Ok(ExpenseDto {
            id: self.id,
            user_id,
            staff_id,
            amount,
            expense_date,
            payment_mode: self.payment_mode,
            bank_account_id,
            category_id,
            note: validation::optional_text(&self.note),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ExpenseForm {
        let mut f = ExpenseForm::new(Some(4), "2024-03-15");
        f.amount = "250".into();
        f
    }

    #[test]
    fn test_cash_disables_and_clears_bank() {
        let mut f = filled();
        f.set_payment_mode(PaymentMode::Upi);
        assert!(f.bank_selector_enabled());
        f.set_bank_account(Some(9));
        assert_eq!(f.bank_account_id(), Some(9));

        f.set_payment_mode(PaymentMode::Cash);
        assert!(!f.bank_selector_enabled());
        assert_eq!(f.bank_account_id(), None);

        f.set_bank_account(Some(9));
        assert_eq!(f.bank_account_id(), None);

        f.set_payment_mode(PaymentMode::Bank);
        assert!(f.bank_selector_enabled());
        f.set_payment_mode(PaymentMode::Upi);
        assert!(f.bank_selector_enabled());
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        for amount in ["0", "-10", "0.00"] {
            let mut f = filled();
            f.amount = amount.into();
            assert_eq!(
                f.validate(1, ExpenseFormVariant::Admin, DateWireFormat::Iso),
                Err(ValidationError::NotPositive("Amount"))
            );
        }
    }

    #[test]
    fn test_bank_account_required_for_non_cash() {
        let mut f = filled();
        f.set_payment_mode(PaymentMode::Bank);
        assert_eq!(
            f.validate(1, ExpenseFormVariant::Admin, DateWireFormat::Iso),
            Err(ValidationError::BankAccountRequired("Bank"))
        );
        f.set_bank_account(Some(2));
        let dto = f
            .validate(1, ExpenseFormVariant::Admin, DateWireFormat::Iso)
            .unwrap();
        assert_eq!(dto.bank_account_id, Some(2));
    }

    #[test]
    fn test_cash_sends_null_bank_account() {
        let dto = filled()
            .validate(1, ExpenseFormVariant::Admin, DateWireFormat::Iso)
            .unwrap();
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json["bank_account_id"].is_null());
        assert_eq!(json["payment_mode"], "cash");
        assert_eq!(json["expense_date"], "2024-03-15");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_client_variant_requires_category() {
        let f = filled();
        assert_eq!(
            f.validate(1, ExpenseFormVariant::Client, DateWireFormat::DayFirst),
            Err(ValidationError::Required("Category"))
        );
        let mut f = filled();
        f.category_id = Some(3);
        let dto = f
            .validate(1, ExpenseFormVariant::Client, DateWireFormat::DayFirst)
            .unwrap();
        assert_eq!(dto.expense_date, "15-03-2024");
    }

    #[test]
    fn test_from_expense_normalizes_date() {
        let e: Expense = serde_json::from_str(
            r#"{"id":"8","staff_id":"4","amount":"99.5","expense_date":"15-03-2024","payment_mode":"UPI","bank_account_id":"2"}"#,
        )
        .unwrap();
        let f = ExpenseForm::from_expense(&e);
        assert_eq!(f.expense_date, "2024-03-15");
        assert_eq!(f.payment_mode(), PaymentMode::Upi);
        assert_eq!(f.bank_account_id(), Some(2));
        assert_eq!(f.amount, "99.50");
    }
}
