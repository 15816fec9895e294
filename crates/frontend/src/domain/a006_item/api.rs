use contracts::domain::a006_item::{Item, ItemDto};
use contracts::domain::common::RecordId;

use crate::shared::api_utils::{
    delete, endpoints, fetch_list, send_json, ResourceQuery, WriteMethod,
};

pub async fn fetch_items(user_id: RecordId) -> Result<Vec<Item>, String> {
    fetch_list(endpoints::ITEMS, &ResourceQuery::for_user(user_id)).await
}

pub async fn save_item(dto: &ItemDto) -> Result<(), String> {
    let query = ResourceQuery::for_user(dto.user_id);
    match dto.id {
        Some(id) => send_json(WriteMethod::Put, endpoints::ITEMS, &query.with_id(id), dto).await,
        None => send_json(WriteMethod::Post, endpoints::ITEMS, &query, dto).await,
    }
}

pub async fn delete_item(user_id: RecordId, id: RecordId) -> Result<(), String> {
    delete(endpoints::ITEMS, &ResourceQuery::for_user(user_id).with_id(id)).await
}
