use contracts::domain::a004_expense::{Expense, ExpenseDto};
use contracts::domain::common::RecordId;

use crate::shared::api_utils::{
    delete, endpoints, fetch_list, send_json, ResourceQuery, WriteMethod,
};

/// Expenses of one staff member.
pub async fn fetch_expenses(user_id: RecordId, staff_id: RecordId) -> Result<Vec<Expense>, String> {
    let query = ResourceQuery::for_user(user_id).with_staff(staff_id);
    fetch_list(endpoints::EXPENSES, &query).await
}

/// Every expense visible to the user (overview figures).
pub async fn fetch_all_expenses(user_id: RecordId) -> Result<Vec<Expense>, String> {
    fetch_list(endpoints::EXPENSES, &ResourceQuery::for_user(user_id)).await
}

pub async fn save_expense(dto: &ExpenseDto) -> Result<(), String> {
    let query = ResourceQuery::for_user(dto.user_id).with_staff(dto.staff_id);
    match dto.id {
        Some(id) => send_json(WriteMethod::Put, endpoints::EXPENSES, &query.with_id(id), dto).await,
        None => send_json(WriteMethod::Post, endpoints::EXPENSES, &query, dto).await,
    }
}

pub async fn delete_expense(user_id: RecordId, id: RecordId) -> Result<(), String> {
    delete(endpoints::EXPENSES, &ResourceQuery::for_user(user_id).with_id(id)).await
}
