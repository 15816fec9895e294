use contracts::domain::a003_expense_category::{ExpenseCategory, ExpenseCategoryDto};
use contracts::domain::common::RecordId;

use crate::shared::api_utils::{
    delete, endpoints, fetch_list, send_json, ResourceQuery, WriteMethod,
};

pub async fn fetch_categories(user_id: RecordId) -> Result<Vec<ExpenseCategory>, String> {
    fetch_list(endpoints::EXPENSE_CATEGORIES, &ResourceQuery::for_user(user_id)).await
}

pub async fn save_category(dto: &ExpenseCategoryDto) -> Result<(), String> {
    let query = ResourceQuery::for_user(dto.user_id);
    let (method, query) = match dto.id {
        Some(id) => (WriteMethod::Put, query.with_id(id)),
        None => (WriteMethod::Post, query),
    };
    send_json(method, endpoints::EXPENSE_CATEGORIES, &query, dto).await
}

pub async fn delete_category(user_id: RecordId, id: RecordId) -> Result<(), String> {
    delete(
        endpoints::EXPENSE_CATEGORIES,
        &ResourceQuery::for_user(user_id).with_id(id),
    )
    .await
}
