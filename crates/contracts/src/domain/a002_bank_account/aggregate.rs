use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::common::{flex, Keyed, RecordId, Resource};
use crate::shared::validation::{self, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Cash,
    Upi,
    #[default]
    Bank,
}

impl AccountType {
    pub const ALL: [AccountType; 3] = [AccountType::Cash, AccountType::Upi, AccountType::Bank];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Cash => "cash",
            AccountType::Upi => "upi",
            AccountType::Bank => "bank",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccountType::Cash => "Cash",
            AccountType::Upi => "UPI",
            AccountType::Bank => "Bank",
        }
    }

    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => AccountType::Cash,
            "upi" => AccountType::Upi,
            _ => AccountType::Bank,
        }
    }
}

fn account_type_lossy<'de, D: Deserializer<'de>>(d: D) -> Result<AccountType, D::Error> {
    let raw: Option<String> = Option::deserialize(d)?;
    Ok(raw
        .as_deref()
        .map(AccountType::from_str_lossy)
        .unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAccount {
    #[serde(deserialize_with = "flex::id")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "flex::opt_text")]
    pub account_name: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_text")]
    pub bank_name: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_text")]
    pub account_number: Option<String>,
    #[serde(default, alias = "type", deserialize_with = "account_type_lossy")]
    pub account_type: AccountType,
}

impl BankAccount {
    /// Account name, falling back to the bank name.
    pub fn name(&self) -> String {
        self.account_name
            .clone()
            .or_else(|| self.bank_name.clone())
            .unwrap_or_else(|| format!("Account #{}", self.id))
    }

    /// "HDFC Current (…4321)"
    pub fn display_name(&self) -> String {
        let name = self.name();
        match self.account_number.as_deref() {
            Some(num) if num.chars().count() > 4 => {
                let tail: String = num.chars().skip(num.chars().count() - 4).collect();
                format!("{name} (…{tail})")
            }
            Some(num) => format!("{name} ({num})"),
            None => name,
        }
    }
}

impl Keyed for BankAccount {
    fn key(&self) -> RecordId {
        self.id
    }
}

impl Resource for BankAccount {
    const COLLECTION_KEY: &'static str = "bank_accounts";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAccountDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub user_id: RecordId,
    pub account_name: String,
    pub account_number: Option<String>,
    #[serde(rename = "type")]
    pub account_type: AccountType,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BankAccountForm {
    pub id: Option<RecordId>,
    pub account_name: String,
    pub account_number: String,
    pub account_type: AccountType,
}

impl BankAccountForm {
    pub fn from_account(a: &BankAccount) -> Self {
        Self {
            id: Some(a.id),
            account_name: a.name(),
            account_number: a.account_number.clone().unwrap_or_default(),
            account_type: a.account_type,
        }
    }

    pub fn validate(&self, user_id: RecordId) -> Result<BankAccountDto, ValidationError> {
        let account_name = validation::required("Account name", &self.account_name)?;
        let account_number = validation::optional_text(&self.account_number);
        if self.account_type == AccountType::Bank && account_number.is_none() {
            return Err(ValidationError::Required("Account number"));
        }
        Ok(BankAccountDto {
            id: self.id,
            user_id,
            account_name,
            account_number,
            account_type: self.account_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_with_type_alias() {
        let a: BankAccount = serde_json::from_str(
            r#"{"id":"2","bank_name":"HDFC","account_number":"001122334321","type":"UPI"}"#,
        )
        .unwrap();
        assert_eq!(a.account_type, AccountType::Upi);
        assert_eq!(a.display_name(), "HDFC (…4321)");

        let b: BankAccount =
            serde_json::from_str(r#"{"id":3,"account_name":"Petty cash","type":null}"#).unwrap();
        assert_eq!(b.account_type, AccountType::Bank);
        assert_eq!(b.display_name(), "Petty cash");
    }

    #[test]
    fn test_bank_type_needs_number() {
        let form = BankAccountForm {
            account_name: "SBI".into(),
            account_type: AccountType::Bank,
            ..Default::default()
        };
        assert_eq!(
            form.validate(1),
            Err(ValidationError::Required("Account number"))
        );

        let cash = BankAccountForm {
            account_name: "Cash box".into(),
            account_type: AccountType::Cash,
            ..Default::default()
        };
        let dto = cash.validate(1).unwrap();
        assert_eq!(dto.account_number, None);
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["type"], "cash");
    }
}
