use serde::{Deserialize, Serialize};

use crate::domain::common::{flex, Keyed, RecordId, Resource};
use crate::shared::validation::{self, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseCategory {
    #[serde(deserialize_with = "flex::id")]
    pub id: RecordId,
    #[serde(alias = "category_name")]
    pub name: String,
}

impl Keyed for ExpenseCategory {
    fn key(&self) -> RecordId {
        self.id
    }
}

impl Resource for ExpenseCategory {
    const COLLECTION_KEY: &'static str = "categories";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseCategoryDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub user_id: RecordId,
    pub name: String,
}

impl ExpenseCategoryDto {
    pub fn from_input(
        id: Option<RecordId>,
        user_id: RecordId,
        name: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            user_id,
            name: validation::required("Category name", name)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_alias_and_input() {
        let c: ExpenseCategory =
            serde_json::from_str(r#"{"id":"1","category_name":"Travel"}"#).unwrap();
        assert_eq!(c.name, "Travel");
        assert!(ExpenseCategoryDto::from_input(None, 1, " ").is_err());
        assert_eq!(
            ExpenseCategoryDto::from_input(Some(2), 1, " Food ").unwrap().name,
            "Food"
        );
    }
}
