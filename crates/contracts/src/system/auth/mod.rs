use serde::{Deserialize, Serialize};

use crate::domain::common::flex;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub mobile: String,
    pub password: String,
}

/// Body of `login.php`. The user object is sometimes nested under `user`,
/// sometimes under `data`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default, deserialize_with = "flex::flag")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, alias = "data")]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[serde(alias = "Admin")]
    Admin,
    #[default]
    #[serde(alias = "Client", alias = "user")]
    Client,
}

/// The logged-in user, cached in browser storage for the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "flex::id")]
    pub id: i64,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default, deserialize_with = "flex::opt_id")]
    pub shop_id: Option<i64>,
    #[serde(
        default,
        alias = "is_family_member",
        alias = "family_member",
        deserialize_with = "flex::flag"
    )]
    pub is_family: bool,
    #[serde(default, deserialize_with = "flex::opt_text")]
    pub name: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.mobile.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_nested_user() {
        let r: LoginResponse = serde_json::from_str(
            r#"{"success":true,"user":{"id":"3","mobile":"9876543210","role":"admin","shop_id":"1","is_family_member":"0"}}"#,
        )
        .unwrap();
        let u = r.user.unwrap();
        assert_eq!(u.id, 3);
        assert!(u.is_admin());
        assert_eq!(u.shop_id, Some(1));
        assert!(!u.is_family);
        assert_eq!(u.display_name(), "9876543210");
    }

    #[test]
    fn test_login_response_data_alias() {
        let r: LoginResponse = serde_json::from_str(
            r#"{"success":1,"data":{"id":9,"mobile":"1","role":"client","family_member":1}}"#,
        )
        .unwrap();
        assert!(r.success);
        let u = r.user.unwrap();
        assert_eq!(u.role, UserRole::Client);
        assert!(u.is_family);
    }

    #[test]
    fn test_user_round_trips_through_storage() {
        let u = User {
            id: 1,
            mobile: "99".into(),
            role: UserRole::Admin,
            shop_id: None,
            is_family: false,
            name: Some("Owner".into()),
        };
        let stored = serde_json::to_string(&u).unwrap();
        let back: User = serde_json::from_str(&stored).unwrap();
        assert_eq!(back, u);
    }
}
