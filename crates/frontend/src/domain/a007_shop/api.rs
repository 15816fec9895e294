use contracts::domain::a007_shop::Shop;
use contracts::domain::common::RecordId;

use crate::shared::api_utils::{endpoints, fetch_list, ResourceQuery};

pub async fn fetch_shops(user_id: RecordId) -> Result<Vec<Shop>, String> {
    fetch_list(endpoints::SHOPS, &ResourceQuery::for_user(user_id)).await
}
