use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

use crate::layout::tabs::tab_labels::{tab_label_for_key, HOME_TAB};
use crate::system::auth::storage as auth_storage;

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub opened: RwSignal<Vec<Tab>>,
    pub active: RwSignal<Option<String>>,
    pub left_open: RwSignal<bool>,
    /// `staff_id` from the page URL, handed to the first staff report that asks.
    url_staff_id: StoredValue<Option<i64>>,
    /// Staff preselection for a report tab that is already open: `(tab key, staff id)`.
    pub staff_request: RwSignal<Option<(String, i64)>>,
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

fn query_params() -> HashMap<String, String> {
    let search = window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default()
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            opened: RwSignal::new(vec![]),
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
            url_staff_id: StoredValue::new(None),
            staff_request: RwSignal::new(None),
        }
    }

    /// Restore `?active=` and `?staff_id=` from the URL, then keep `?active=` in sync.
    pub fn init_router_integration(&self) {
        let params = query_params();

        if let Some(staff_id) = params.get("staff_id").and_then(|s| s.trim().parse().ok()) {
            self.url_staff_id.set_value(Some(staff_id));
        }

        match params.get("active").cloned() {
            Some(active_key) => self.open_tab(&active_key, tab_label_for_key(&active_key)),
            None => self.open_tab(HOME_TAB, tab_label_for_key(HOME_TAB)),
        }

        let this = *self;
        Effect::new(move |_| {
            if let Some(active_key) = this.active.get() {
                let query_string =
                    serde_qs::to_string(&HashMap::from([("active".to_string(), active_key)]))
                        .unwrap_or_default();
                let new_url = format!("?{}", query_string);

                let current_search = window()
                    .and_then(|w| w.location().search().ok())
                    .unwrap_or_default();

                if current_search != new_url {
                    if let Some(w) = window() {
                        if let Ok(history) = w.history() {
                            let _ = history.replace_state_with_url(
                                &wasm_bindgen::JsValue::NULL,
                                "",
                                Some(&new_url),
                            );
                        }
                    }
                }
            }
        });
    }

    /// Deep-linked staff id: the URL parameter, else the transient storage key.
    /// Either source is consumed by the first caller.
    pub fn take_deep_link_staff(&self) -> Option<i64> {
        let from_url = self.url_staff_id.get_value();
        if from_url.is_some() {
            self.url_staff_id.set_value(None);
            return from_url;
        }
        auth_storage::take_selected_staff()
    }

    /// Open a staff report (expenses / attendance) preselected on `staff_id`.
    pub fn open_staff_report(&self, key: &str, staff_id: i64) {
        let already_open = self
            .opened
            .with_untracked(|tabs| tabs.iter().any(|tab| tab.key == key));
        if already_open {
            self.staff_request.set(Some((key.to_string(), staff_id)));
        } else {
            // Read once by the report when it mounts.
            auth_storage::set_selected_staff(staff_id);
        }
        self.open_tab(key, tab_label_for_key(key));
    }

    /// Staff requested for the report `key` while it was open, if any.
    pub fn take_staff_request(&self, key: &str) -> Option<i64> {
        let request = self.staff_request.get();
        match request {
            Some((k, id)) if k == key => {
                self.staff_request.set(None);
                Some(id)
            }
            _ => None,
        }
    }

    pub fn open_tab(&self, key: &str, title: &str) {
        leptos::logging::log!("open_tab: key='{}', title='{}'", key, title);
        let exists = self
            .opened
            .with_untracked(|tabs| tabs.iter().any(|tab| tab.key == key));
        if !exists {
            let tab = Tab {
                key: key.to_string(),
                title: title.to_string(),
            };
            self.opened.update(|tabs| tabs.push(tab));
        }
        self.activate_tab(key);
    }

    pub fn activate_tab(&self, key: &str) {
        self.active.set(Some(key.to_string()));
    }

    pub fn close_tab(&self, key: &str) {
        self.opened.update(|tabs| tabs.retain(|tab| tab.key != key));
        if self
            .active
            .with_untracked(|active| active.as_deref() == Some(key))
        {
            let next_active = self
                .opened
                .with_untracked(|tabs| tabs.last().map(|t| t.key.clone()));
            self.active.set(next_active);
        }
    }

    /// Logout: close every tab and forget deep links.
    pub fn reset(&self) {
        self.opened.set(vec![]);
        self.active.set(None);
        self.url_staff_id.set_value(None);
        self.staff_request.set(None);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub title: String,
}
