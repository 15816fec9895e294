use contracts::domain::a008_order::{Order, OrderItem};
use contracts::domain::common::RecordId;

use crate::shared::api_utils::{endpoints, fetch_list, ResourceQuery};

pub async fn fetch_orders(user_id: RecordId) -> Result<Vec<Order>, String> {
    fetch_list(endpoints::ORDERS, &ResourceQuery::for_user(user_id)).await
}

/// Lines of every order; grouped client side.
pub async fn fetch_order_items(user_id: RecordId) -> Result<Vec<OrderItem>, String> {
    fetch_list(endpoints::ORDER_ITEMS, &ResourceQuery::for_user(user_id)).await
}
