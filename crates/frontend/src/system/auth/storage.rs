use contracts::system::auth::User;

use crate::shared::storage::{self, Persistence};

const CURRENT_USER_KEY: &str = "currentUser";
const USER_ID_KEY: &str = "user_id";
const REMEMBERED_USER_KEY: &str = "rememberedUser";
/// Deep link handed over by another page; consumed on first read.
pub const SELECTED_STAFF_KEY: &str = "selectedStaffId";

fn decode_user(raw: &str) -> Option<User> {
    serde_json::from_str(raw).ok()
}

/// Save the logged-in user. "Remember me" keeps it across browser restarts.
pub fn save_user(user: &User, remember: bool) {
    let Ok(json) = serde_json::to_string(user) else {
        log::error!("Could not serialize user {}", user.id);
        return;
    };
    let p = if remember {
        Persistence::Local
    } else {
        Persistence::Session
    };
    storage::set(p, CURRENT_USER_KEY, &json);
    storage::set(p, USER_ID_KEY, &user.id.to_string());

    if remember {
        storage::set(Persistence::Local, REMEMBERED_USER_KEY, &user.mobile);
    } else {
        storage::remove(Persistence::Local, REMEMBERED_USER_KEY);
    }
}

/// Session first, then the remembered login.
pub fn restore_user() -> Option<User> {
    for p in [Persistence::Session, Persistence::Local] {
        if let Some(raw) = storage::get(p, CURRENT_USER_KEY) {
            match decode_user(&raw) {
                Some(user) => return Some(user),
                None => {
                    log::warn!("Dropping unreadable stored user");
                    storage::remove(p, CURRENT_USER_KEY);
                    storage::remove(p, USER_ID_KEY);
                }
            }
        }
    }
    None
}

/// Mobile number to prefill the login form.
pub fn remembered_mobile() -> Option<String> {
    storage::get(Persistence::Local, REMEMBERED_USER_KEY).filter(|m| !m.is_empty())
}

/// Logout: everything but the remembered mobile number goes.
pub fn clear_session() {
    for p in [Persistence::Session, Persistence::Local] {
        storage::remove(p, CURRENT_USER_KEY);
        storage::remove(p, USER_ID_KEY);
    }
    storage::remove(Persistence::Session, SELECTED_STAFF_KEY);
}

/// One-shot staff id left by another page, e.g. "view expenses of this staff".
pub fn take_selected_staff() -> Option<i64> {
    storage::take(SELECTED_STAFF_KEY)?.trim().parse().ok()
}

pub fn set_selected_staff(staff_id: i64) {
    storage::set(Persistence::Session, SELECTED_STAFF_KEY, &staff_id.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_stored_user() {
        let user = decode_user(r#"{"id":5,"mobile":"9000000000","role":"client","shop_id":2}"#).unwrap();
        assert_eq!(user.id, 5);
        assert!(!user.is_admin());
        assert!(decode_user("{not json").is_none());
    }

    #[test]
    fn test_stored_user_round_trips_through_json() {
        let user = decode_user(r#"{"id":"7","mobile":"9111111111","role":"admin"}"#).unwrap();
        let json = serde_json::to_string(&user).unwrap();
        assert_eq!(decode_user(&json), Some(user));
    }
}
