use contracts::domain::a001_staff::{Staff, StaffDto, StaffStatusPatch};
use contracts::domain::common::RecordId;

use crate::shared::api_utils::{
    delete, endpoints, fetch_list, send_json, ResourceQuery, WriteMethod,
};

pub async fn fetch_staff(user_id: RecordId) -> Result<Vec<Staff>, String> {
    fetch_list(endpoints::STAFF, &ResourceQuery::for_user(user_id)).await
}

/// POST for a new member, PUT with `id` for an existing one.
pub async fn save_staff(dto: &StaffDto) -> Result<(), String> {
    let query = ResourceQuery::for_user(dto.user_id);
    match dto.id {
        Some(id) => send_json(WriteMethod::Put, endpoints::STAFF, &query.with_id(id), dto).await,
        None => send_json(WriteMethod::Post, endpoints::STAFF, &query, dto).await,
    }
}

pub async fn patch_staff_status(patch: &StaffStatusPatch) -> Result<(), String> {
    let query = ResourceQuery::for_user(patch.user_id).with_id(patch.id);
    send_json(WriteMethod::Patch, endpoints::STAFF, &query, patch).await
}

pub async fn delete_staff(user_id: RecordId, id: RecordId) -> Result<(), String> {
    delete(endpoints::STAFF, &ResourceQuery::for_user(user_id).with_id(id)).await
}
