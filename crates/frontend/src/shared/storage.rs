//! Thin wrappers over `localStorage` / `sessionStorage`.
//!
//! Storage can be unavailable (private mode, blocked cookies); every accessor
//! degrades to "nothing stored" instead of failing.

use web_sys::{window, Storage};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Persistence {
    /// Cleared when the tab closes.
    Session,
    /// Survives browser restarts ("remember me").
    Local,
}

fn store(p: Persistence) -> Option<Storage> {
    let w = window()?;
    match p {
        Persistence::Session => w.session_storage().ok()?,
        Persistence::Local => w.local_storage().ok()?,
    }
}

pub fn get(p: Persistence, key: &str) -> Option<String> {
    store(p)?.get_item(key).ok()?
}

pub fn set(p: Persistence, key: &str, value: &str) {
    if let Some(s) = store(p) {
        if s.set_item(key, value).is_err() {
            log::warn!("Could not write {} to {:?} storage", key, p);
        }
    }
}

pub fn remove(p: Persistence, key: &str) {
    if let Some(s) = store(p) {
        let _ = s.remove_item(key);
    }
}

/// Read a one-shot session value and delete it.
pub fn take(key: &str) -> Option<String> {
    let value = get(Persistence::Session, key);
    if value.is_some() {
        remove(Persistence::Session, key);
    }
    value
}
