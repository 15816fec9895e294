use contracts::domain::a002_bank_account::{BankAccount, BankAccountDto};
use contracts::domain::common::RecordId;

use crate::shared::api_utils::{
    delete, endpoints, fetch_list, send_json, ResourceQuery, WriteMethod,
};

pub async fn fetch_bank_accounts(user_id: RecordId) -> Result<Vec<BankAccount>, String> {
    fetch_list(endpoints::BANK_ACCOUNTS, &ResourceQuery::for_user(user_id)).await
}

pub async fn save_bank_account(dto: &BankAccountDto) -> Result<(), String> {
    let query = ResourceQuery::for_user(dto.user_id);
    match dto.id {
        Some(id) => {
            send_json(WriteMethod::Put, endpoints::BANK_ACCOUNTS, &query.with_id(id), dto).await
        }
        None => send_json(WriteMethod::Post, endpoints::BANK_ACCOUNTS, &query, dto).await,
    }
}

pub async fn delete_bank_account(user_id: RecordId, id: RecordId) -> Result<(), String> {
    delete(
        endpoints::BANK_ACCOUNTS,
        &ResourceQuery::for_user(user_id).with_id(id),
    )
    .await
}
