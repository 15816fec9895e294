//! API utilities for talking to the PHP endpoints
//!
//! Every resource lives behind one flat script (`staff.php`, `expenses.php`, ...)
//! and is addressed with `user_id` / `staff_id` / `id` query parameters.
//! Errors are returned as display-ready strings prefixed with their class.

use contracts::domain::common::{check_mutation, normalize_list, Resource};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::config::config;
use super::toast::ToastService;

pub mod endpoints {
    pub const LOGIN: &str = "login.php";
    pub const STAFF: &str = "staff.php";
    pub const BANK_ACCOUNTS: &str = "bank_accounts.php";
    pub const EXPENSE_CATEGORIES: &str = "expense_categories.php";
    pub const EXPENSES: &str = "expenses.php";
    pub const ATTENDANCE: &str = "attendance.php";
    pub const ITEMS: &str = "items.php";
    pub const SHOPS: &str = "shops.php";
    pub const ORDERS: &str = "orders.php";
    pub const ORDER_ITEMS: &str = "order_items.php";
}

/// Get the base URL for API requests
///
/// Uses the configured base when set, otherwise `<origin>/api`.
///
/// # Example
/// ```ignore
/// let url = format!("{}/staff.php", api_base());
/// ```
pub fn api_base() -> String {
    let configured = config().api.base_url.trim_end_matches('/');
    if !configured.is_empty() {
        return configured.to_string();
    }
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default();
    format!("{}/api", origin)
}

/// Query parameters understood by every endpoint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResourceQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl ResourceQuery {
    pub fn for_user(user_id: i64) -> Self {
        Self {
            user_id: Some(user_id),
            ..Default::default()
        }
    }

    pub fn with_staff(mut self, staff_id: i64) -> Self {
        self.staff_id = Some(staff_id);
        self
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

/// Full URL of an endpoint with its query string.
pub fn resource_url(endpoint: &str, query: &ResourceQuery) -> Result<String, String> {
    let qs = serde_qs::to_string(query).map_err(|e| format!("Failed to build query: {}", e))?;
    let base = api_base();
    let path = urlencoding::encode(endpoint);
    if qs.is_empty() {
        Ok(format!("{}/{}", base, path))
    } else {
        Ok(format!("{}/{}?{}", base, path, qs))
    }
}

async fn send(builder: RequestBuilder) -> Result<Response, String> {
    let response = builder
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;
    if !response.ok() {
        return Err(format!(
            "Server error: {} {}",
            response.status(),
            response.status_text()
        ));
    }
    Ok(response)
}

async fn body_json(response: Response) -> Result<serde_json::Value, String> {
    let text = response
        .text()
        .await
        .map_err(|e| format!("Failed to read response: {}", e))?;
    if text.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| format!("Unexpected response: {}", e))
}

/// GET a collection in any of the accepted envelope shapes.
pub async fn fetch_list<T>(endpoint: &str, query: &ResourceQuery) -> Result<Vec<T>, String>
where
    T: Resource + DeserializeOwned,
{
    let url = resource_url(endpoint, query)?;
    let response = send(Request::get(&url)).await?;
    let body = body_json(response).await?;
    normalize_list(body, T::COLLECTION_KEY).map_err(|e| e.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMethod {
    Post,
    Put,
    Patch,
}

/// Send a JSON body. The response body is only checked for a failure flag;
/// callers reload the collection afterwards.
pub async fn send_json<B: Serialize>(
    method: WriteMethod,
    endpoint: &str,
    query: &ResourceQuery,
    body: &B,
) -> Result<(), String> {
    let url = resource_url(endpoint, query)?;
    let builder = match method {
        WriteMethod::Post => Request::post(&url),
        WriteMethod::Put => Request::put(&url),
        WriteMethod::Patch => Request::patch(&url),
    };
    let request = builder
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?;
    let response = request
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;
    if !response.ok() {
        return Err(format!(
            "Server error: {} {}",
            response.status(),
            response.status_text()
        ));
    }
    let json = body_json(response).await?;
    check_mutation(&json).map_err(|e| e.to_string())
}

pub async fn delete(endpoint: &str, query: &ResourceQuery) -> Result<(), String> {
    let url = resource_url(endpoint, query)?;
    let response = send(Request::delete(&url)).await?;
    let json = body_json(response).await?;
    check_mutation(&json).map_err(|e| e.to_string())
}

/// Fail-soft handling of a list load: logs and toasts the error.
/// `None` tells the caller to show an empty collection.
pub fn or_toast<T>(result: Result<Vec<T>, String>, what: &str, toasts: ToastService) -> Option<Vec<T>> {
    match result {
        Ok(items) => Some(items),
        Err(e) => {
            log::error!("Failed to load {}: {}", what, e);
            toasts.error(load_failure_message(what, &e));
            None
        }
    }
}

fn load_failure_message(what: &str, error: &str) -> String {
    format!("Could not load {}. {}", what, error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_failure_message_names_source() {
        assert_eq!(
            load_failure_message("attendance", "HTTP 500"),
            "Could not load attendance. HTTP 500"
        );
    }
}
