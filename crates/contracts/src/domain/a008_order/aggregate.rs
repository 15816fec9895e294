use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::common::{flex, Keyed, RecordId, Resource};

/// A customer order. Listed read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(deserialize_with = "flex::id")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "flex::opt_text")]
    pub customer_name: Option<String>,
    #[serde(default, alias = "date", deserialize_with = "flex::opt_text")]
    pub order_date: Option<String>,
    #[serde(default, alias = "total", deserialize_with = "flex::number")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "flex::opt_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_id")]
    pub shop_id: Option<RecordId>,
}

impl Keyed for Order {
    fn key(&self) -> RecordId {
        self.id
    }
}

impl Resource for Order {
    const COLLECTION_KEY: &'static str = "orders";
}

/// A line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(deserialize_with = "flex::id")]
    pub id: RecordId,
    #[serde(deserialize_with = "flex::id")]
    pub order_id: RecordId,
    #[serde(default, deserialize_with = "flex::opt_id")]
    pub item_id: Option<RecordId>,
    #[serde(default, deserialize_with = "flex::opt_text")]
    pub item_name: Option<String>,
    #[serde(default, deserialize_with = "flex::number")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "flex::number")]
    pub price: f64,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.quantity * self.price
    }
}

impl Keyed for OrderItem {
    fn key(&self) -> RecordId {
        self.id
    }
}

impl Resource for OrderItem {
    const COLLECTION_KEY: &'static str = "order_items";
}

/// Row of the orders list.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub order: Order,
    pub line_count: usize,
    /// Server total, or the sum of the lines when the server sent none.
    pub total: f64,
}

pub fn build_order_rows(orders: &[Order], lines: &[OrderItem]) -> Vec<OrderRow> {
    let mut per_order: HashMap<RecordId, (usize, f64)> = HashMap::new();
    for line in lines {
        let entry = per_order.entry(line.order_id).or_default();
        entry.0 += 1;
        entry.1 += line.line_total();
    }
    let mut rows: Vec<OrderRow> = orders
        .iter()
        .map(|o| {
            let (line_count, lines_total) = per_order.get(&o.id).copied().unwrap_or_default();
            OrderRow {
                order: o.clone(),
                line_count,
                total: if o.total_amount > 0.0 {
                    o.total_amount
                } else {
                    lines_total
                },
            }
        })
        .collect();
    rows.sort_by(|a, b| b.order.id.cmp(&a.order.id));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_count_lines_and_fallback_total() {
        let orders: Vec<Order> = serde_json::from_str(
            r#"[{"id":"1","customer_name":"A","total_amount":"500"},{"id":2,"customer_name":"B"}]"#,
        )
        .unwrap();
        let lines: Vec<OrderItem> = serde_json::from_str(
            r#"[{"id":1,"order_id":"2","quantity":"2","price":"30"},
                {"id":2,"order_id":2,"quantity":1,"price":15},
                {"id":3,"order_id":1,"quantity":1,"price":500}]"#,
        )
        .unwrap();
        let rows = build_order_rows(&orders, &lines);
        assert_eq!(rows[0].order.id, 2);
        assert_eq!(rows[0].line_count, 2);
        assert_eq!(rows[0].total, 75.0);
        assert_eq!(rows[1].total, 500.0);
        assert_eq!(rows[1].line_count, 1);
    }
}
