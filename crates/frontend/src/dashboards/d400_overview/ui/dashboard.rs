use crate::domain::a001_staff::api::fetch_staff;
use crate::domain::a004_expense::api::fetch_all_expenses;
use crate::domain::a005_attendance::api::fetch_all_attendance;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::{
    is_admin_only, tab_label_for_key, ATTENDANCE_TAB, EXPENSES_TAB, ITEMS_TAB, ORDERS_TAB,
    STAFF_TAB,
};
use crate::shared::api_utils::or_toast;
use crate::shared::components::{StatCard, StatTone};
use crate::shared::date_utils::today;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_DASHBOARD};
use crate::shared::toast::use_toasts;
use crate::system::auth::context::use_current_user;
use contracts::dashboards::d400_overview::OverviewStats;
use contracts::shared::money::format_rupees;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

const SHORTCUTS: [(&str, &str); 5] = [
    (EXPENSES_TAB, "wallet"),
    (ATTENDANCE_TAB, "calendar"),
    (STAFF_TAB, "users"),
    (ITEMS_TAB, "package"),
    (ORDERS_TAB, "receipt"),
];

#[component]
pub fn OverviewDashboard() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let user = use_current_user();
    let toasts = use_toasts();
    let user_id = user.id;
    let is_admin = user.is_admin();
    let stats = RwSignal::new(Option::<OverviewStats>::None);

    let load = move || async move {
        let (staff, expenses, attendance) = futures::join!(
            fetch_staff(user_id),
            fetch_all_expenses(user_id),
            fetch_all_attendance(user_id)
        );
        // Failed sources are toasted and count as empty.
        let computed = OverviewStats::compute(
            today(),
            &or_toast(staff, "staff", toasts).unwrap_or_default(),
            &or_toast(expenses, "expenses", toasts).unwrap_or_default(),
            &or_toast(attendance, "attendance", toasts).unwrap_or_default(),
        );
        stats.set(Some(computed));
    };
    spawn_local(load());

    let figure = move |pick: fn(&OverviewStats) -> String| {
        Signal::derive(move || stats.with(|s| s.as_ref().map(pick)))
    };

    let shortcuts = SHORTCUTS
        .iter()
        .filter(|(key, _)| is_admin || !is_admin_only(key))
        .map(|&(key, icon_name)| {
            let title = tab_label_for_key(key);
            view! {
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| ctx.open_tab(key, title)>
                    {icon(icon_name)}
                    {format!(" {}", title)}
                </Button>
            }
        })
        .collect_view();

    view! {
        <PageFrame page_id="d400_overview--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader
                title=format!("Welcome, {}", user.display_name())
                subtitle=today().format("%A, %d %B %Y").to_string()
            >
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| spawn_local(load())>
                    {icon("refresh")}
                    " Refresh"
                </Button>
            </PageHeader>

            <div class="stat-grid">
                <StatCard
                    label="Active staff"
                    icon_name="users"
                    value=figure(|s| s.active_staff.to_string())
                    subtitle=figure(|s| format!("of {} total", s.total_staff))
                />
                <StatCard
                    label="Expenses this month"
                    icon_name="wallet"
                    tone=StatTone::Bad
                    value=figure(|s| format_rupees(s.month_expense_total))
                    subtitle=figure(|s| format!("{} entries", s.month_expense_count))
                />
                <StatCard
                    label="Present today"
                    icon_name="calendar"
                    tone=StatTone::Good
                    value=figure(|s| s.present_today.to_string())
                    subtitle=figure(|s| format!("{} not marked yet", s.unmarked_today))
                />
                <StatCard
                    label="Absent today"
                    icon_name="calendar"
                    value=figure(|s| s.absent_today.to_string())
                />
            </div>

            <h3 class="page__section-title">"Quick links"</h3>
            <Flex>{shortcuts}</Flex>
        </PageFrame>
    }
}
