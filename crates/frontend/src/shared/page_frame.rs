//! Root wrapper for every page rendered inside a tab.
//!
//! The root element carries `id="{entity}--{category}"` (e.g. `"a004_expense--report"`)
//! and `data-page-category`, so a DOM id copied from the inspector leads
//! straight to the `domain/a004_expense/` directory.

use leptos::prelude::*;

/// Table of records with add/edit/delete.
pub const PAGE_CAT_LIST: &str = "list";
/// Staff-scoped report with month filter and exports.
pub const PAGE_CAT_REPORT: &str = "report";
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";
pub const PAGE_CAT_SYSTEM: &str = "system";

pub fn is_valid_page_id(id: &str) -> bool {
    matches!(id.split_once("--"), Some((entity, cat)) if !entity.is_empty() && !cat.is_empty())
}

fn frame_class(category: &str) -> &'static str {
    match category {
        PAGE_CAT_REPORT => "page page--report",
        PAGE_CAT_DASHBOARD => "page page--dashboard",
        _ => "page",
    }
}

#[component]
pub fn PageFrame(
    page_id: &'static str,
    category: &'static str,
    children: Children,
) -> impl IntoView {
    debug_assert!(is_valid_page_id(page_id), "bad page id: {page_id}");

    view! {
        <div id=page_id class=frame_class(category) data-page-category=category>
            {children()}
        </div>
    }
}

/// Title row of a page: heading on the left, actions on the right.
#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    #[prop(optional, into)] subtitle: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="page__header">
            <div class="page__header-text">
                <h1 class="page__title">{title}</h1>
                {subtitle.map(|s| view! { <p class="page__subtitle">{s}</p> })}
            </div>
            <div class="page__actions">{children()}</div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_format() {
        assert!(is_valid_page_id("a004_expense--report"));
        assert!(!is_valid_page_id("a004_expense"));
        assert!(!is_valid_page_id("--list"));
        assert!(!is_valid_page_id("a001_staff--"));
    }

    #[test]
    fn test_frame_class_by_category() {
        assert_eq!(frame_class(PAGE_CAT_LIST), "page");
        assert_eq!(frame_class(PAGE_CAT_REPORT), "page page--report");
        assert_eq!(frame_class("unknown"), "page");
    }
}
