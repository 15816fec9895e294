//! Sidebar with collapsible menu groups, filtered by role.

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::*;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<(&'static str, &'static str)>, // (tab key, icon)
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "home",
            label: tab_label_for_key(HOME_TAB),
            icon: "dashboard",
            items: vec![],
        },
        MenuGroup {
            id: "staff",
            label: "Staff",
            icon: "users",
            items: vec![
                (STAFF_TAB, "users"),
                (EXPENSES_TAB, "wallet"),
                (ATTENDANCE_TAB, "calendar"),
            ],
        },
        MenuGroup {
            id: "finance",
            label: "Finance",
            icon: "bank",
            items: vec![(BANK_ACCOUNTS_TAB, "bank"), (EXPENSE_CATEGORIES_TAB, "tag")],
        },
        MenuGroup {
            id: "shop",
            label: "Shop",
            icon: "store",
            items: vec![(ITEMS_TAB, "package"), (SHOPS_TAB, "store"), (ORDERS_TAB, "receipt")],
        },
    ]
}

/// Menu for a role: admin-only entries dropped for clients, emptied groups removed.
fn visible_groups(is_admin: bool) -> Vec<MenuGroup> {
    get_menu_groups()
        .into_iter()
        .filter_map(|mut g| {
            let had_children = !g.items.is_empty();
            g.items.retain(|(key, _)| is_admin || !is_admin_only(key));
            (!had_children || !g.items.is_empty()).then_some(g)
        })
        .collect()
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, _) = use_auth();
    let is_admin = auth_state.with_untracked(|s| s.is_admin());

    let groups = visible_groups(is_admin);
    let expanded_groups = RwSignal::new(groups.iter().map(|g| g.id).collect::<Vec<_>>());

    view! {
        <div class="app-sidebar__content">
            {groups
                .into_iter()
                .map(|group| {
                    let group_id = group.id;
                    let has_children = !group.items.is_empty();

                    view! {
                        <div>
                            <div
                                class="app-sidebar__item"
                                class:app-sidebar__item--active=move || {
                                    !has_children && ctx.active.get().as_deref() == Some(HOME_TAB)
                                }
                                style:padding-left="12px"
                                on:click=move |_| {
                                    if has_children {
                                        expanded_groups.update(|items| {
                                            if let Some(pos) = items.iter().position(|x| *x == group_id) {
                                                items.remove(pos);
                                            } else {
                                                items.push(group_id);
                                            }
                                        });
                                    } else {
                                        ctx.open_tab(HOME_TAB, tab_label_for_key(HOME_TAB));
                                    }
                                }
                            >
                                <div class="app-sidebar__item-content">
                                    {icon(group.icon)}
                                    <span>{group.label}</span>
                                </div>
                                {has_children.then(|| view! {
                                    <div
                                        class="app-sidebar__chevron"
                                        class:app-sidebar__chevron--expanded=move || expanded_groups.get().contains(&group_id)
                                    >
                                        {icon("chevron-right")}
                                    </div>
                                })}
                            </div>

                            {has_children.then(|| view! {
                                <Show when=move || expanded_groups.get().contains(&group_id)>
                                    <div class="app-sidebar__children">
                                        {group.items.clone().into_iter().map(|(key, icon_name)| {
                                            let label = tab_label_for_key(key);
                                            view! {
                                                <div
                                                    class="app-sidebar__item"
                                                    class:app-sidebar__item--active=move || ctx.active.get().as_deref() == Some(key)
                                                    style:padding-left="10px"
                                                    on:click=move |_| ctx.open_tab(key, label)
                                                >
                                                    <div class="app-sidebar__item-content">
                                                        {icon(icon_name)}
                                                        <span>{label}</span>
                                                    </div>
                                                </div>
                                            }
                                        }).collect_view()}
                                    </div>
                                </Show>
                            })}
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_menu_hides_admin_pages() {
        let groups = visible_groups(false);
        let keys: Vec<&str> = groups.iter().flat_map(|g| g.items.iter().map(|i| i.0)).collect();
        assert!(keys.contains(&EXPENSES_TAB));
        assert!(keys.contains(&ITEMS_TAB));
        assert!(!keys.contains(&STAFF_TAB));
        assert!(!keys.contains(&ATTENDANCE_TAB));
        // Finance holds only admin pages.
        assert!(groups.iter().all(|g| g.id != "finance"));
        assert!(groups.iter().any(|g| g.id == "home"));
    }

    #[test]
    fn test_admin_menu_is_complete() {
        let count: usize = visible_groups(true).iter().map(|g| g.items.len()).sum();
        assert_eq!(count, 8);
    }
}
