use serde::{Deserialize, Serialize};

use crate::domain::common::{flex, Keyed, RecordId, Resource};
use crate::shared::validation::{self, ValidationError};

/// Inventory item sold or consumed by a shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(deserialize_with = "flex::id")]
    pub id: RecordId,
    #[serde(alias = "item_name")]
    pub name: String,
    #[serde(default, deserialize_with = "flex::opt_text")]
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "flex::number")]
    pub price: f64,
    #[serde(default, alias = "stock_quantity", deserialize_with = "flex::number")]
    pub stock: f64,
    #[serde(default, deserialize_with = "flex::opt_id")]
    pub shop_id: Option<RecordId>,
}

impl Item {
    pub fn stock_value(&self) -> f64 {
        self.price * self.stock
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.stock <= 0.0
    }
}

impl Keyed for Item {
    fn key(&self) -> RecordId {
        self.id
    }
}

impl Resource for Item {
    const COLLECTION_KEY: &'static str = "items";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub user_id: RecordId,
    pub shop_id: Option<RecordId>,
    pub name: String,
    pub unit: Option<String>,
    pub price: f64,
    pub stock: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemForm {
    pub id: Option<RecordId>,
    pub name: String,
    pub unit: String,
    pub price: String,
    pub stock: String,
}

impl ItemForm {
    pub fn from_item(i: &Item) -> Self {
        Self {
            id: Some(i.id),
            name: i.name.clone(),
            unit: i.unit.clone().unwrap_or_default(),
            price: format!("{:.2}", i.price),
            stock: format!("{}", i.stock),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn validate(
        &self,
        user_id: RecordId,
        shop_id: Option<RecordId>,
    ) -> Result<ItemDto, ValidationError> {
        let name = validation::required("Item name", &self.name)?;
        let price = validation::positive_amount("Price", &self.price)?;
        let stock = if self.stock.trim().is_empty() {
            0.0
        } else {
            validation::non_negative("Stock", &self.stock)?
        };
        Ok(ItemDto {
            id: self.id,
            user_id,
            shop_id,
            name,
            unit: validation::optional_text(&self.unit),
            price,
            stock,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_and_value() {
        let i: Item = serde_json::from_str(
            r#"{"id":"3","item_name":"Rice","unit":"kg","price":"52.50","stock_quantity":"10"}"#,
        )
        .unwrap();
        assert_eq!(i.name, "Rice");
        assert_eq!(i.stock_value(), 525.0);
        assert!(!i.is_out_of_stock());
    }

    #[test]
    fn test_form_rules() {
        let form = ItemForm {
            name: "Oil".into(),
            price: "0".into(),
            ..Default::default()
        };
        assert_eq!(form.validate(1, None), Err(ValidationError::NotPositive("Price")));

        let form = ItemForm {
            name: "Oil".into(),
            price: "180".into(),
            stock: "".into(),
            ..Default::default()
        };
        let dto = form.validate(1, Some(2)).unwrap();
        assert_eq!(dto.stock, 0.0);
        assert_eq!(dto.unit, None);

        let form = ItemForm {
            name: "Oil".into(),
            price: "180".into(),
            stock: "-2".into(),
            ..Default::default()
        };
        assert_eq!(form.validate(1, None), Err(ValidationError::Negative("Stock")));
    }
}
