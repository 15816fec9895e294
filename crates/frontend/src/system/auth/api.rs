use contracts::system::auth::{LoginRequest, LoginResponse, User};
use gloo_net::http::Request;

use crate::shared::api_utils::{endpoints, resource_url, ResourceQuery};

fn user_from_response(response: LoginResponse) -> Result<User, String> {
    match (response.success, response.user) {
        (true, Some(user)) => Ok(user),
        (_, _) => Err(response
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "Invalid mobile number or password".to_string())),
    }
}

/// Login with mobile number and password
pub async fn login(mobile: String, password: String) -> Result<User, String> {
    let request = LoginRequest { mobile, password };
    let url = resource_url(endpoints::LOGIN, &ResourceQuery::default())?;

    let response = Request::post(&url)
        .json(&request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Login failed: {}", response.status()));
    }

    let body = response
        .json::<LoginResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;
    user_from_response(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> LoginResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_successful_login_yields_user() {
        let user = user_from_response(parse(
            r#"{"success":"1","data":{"id":1,"mobile":"9876543210","role":"admin"}}"#,
        ))
        .unwrap();
        assert!(user.is_admin());
    }

    #[test]
    fn test_failed_login_surfaces_server_message() {
        let err = user_from_response(parse(r#"{"success":false,"message":"User disabled"}"#));
        assert_eq!(err.unwrap_err(), "User disabled");
        let err = user_from_response(parse(r#"{"success":true}"#));
        assert_eq!(err.unwrap_err(), "Invalid mobile number or password");
    }
}
