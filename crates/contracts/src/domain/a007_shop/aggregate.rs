use serde::{Deserialize, Serialize};

use crate::domain::common::{flex, Keyed, RecordId, Resource};

/// A shop / outlet. Listed read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    #[serde(deserialize_with = "flex::id")]
    pub id: RecordId,
    #[serde(alias = "shop_name")]
    pub name: String,
    #[serde(default, deserialize_with = "flex::opt_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_text")]
    pub mobile: Option<String>,
}

impl Keyed for Shop {
    fn key(&self) -> RecordId {
        self.id
    }
}

impl Resource for Shop {
    const COLLECTION_KEY: &'static str = "shops";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::normalize_list;

    #[test]
    fn test_decode_wrapped_list() {
        let body = serde_json::json!({
            "shops": [{"shop_name": "Main", "id": "1", "mobile": 9876543210i64}]
        });
        let shops: Vec<Shop> = normalize_list(body, Shop::COLLECTION_KEY).unwrap();
        assert_eq!(shops[0].name, "Main");
        assert_eq!(shops[0].mobile.as_deref(), Some("9876543210"));
        assert_eq!(shops[0].address, None);
    }
}
