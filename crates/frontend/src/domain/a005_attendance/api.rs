use contracts::domain::a005_attendance::{AttendanceDto, AttendanceRecord};
use contracts::domain::common::RecordId;

use crate::shared::api_utils::{
    delete, endpoints, fetch_list, send_json, ResourceQuery, WriteMethod,
};

pub async fn fetch_attendance(
    user_id: RecordId,
    staff_id: RecordId,
) -> Result<Vec<AttendanceRecord>, String> {
    let query = ResourceQuery::for_user(user_id).with_staff(staff_id);
    fetch_list(endpoints::ATTENDANCE, &query).await
}

/// All attendance of the shop, used for today's figures on the overview.
pub async fn fetch_all_attendance(user_id: RecordId) -> Result<Vec<AttendanceRecord>, String> {
    fetch_list(endpoints::ATTENDANCE, &ResourceQuery::for_user(user_id)).await
}

pub async fn save_attendance(dto: &AttendanceDto) -> Result<(), String> {
    let query = ResourceQuery::for_user(dto.user_id).with_staff(dto.staff_id);
    match dto.id {
        Some(id) => {
            send_json(WriteMethod::Put, endpoints::ATTENDANCE, &query.with_id(id), dto).await
        }
        None => send_json(WriteMethod::Post, endpoints::ATTENDANCE, &query, dto).await,
    }
}

pub async fn delete_attendance(user_id: RecordId, id: RecordId) -> Result<(), String> {
    delete(endpoints::ATTENDANCE, &ResourceQuery::for_user(user_id).with_id(id)).await
}
