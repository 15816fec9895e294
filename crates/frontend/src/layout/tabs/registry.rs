//! Tab content registry: tab key -> view. Every tab key is resolved here.

use super::tab_labels::*;
use crate::dashboards::d400_overview::OverviewDashboard;
use crate::domain::a001_staff::ui::list::StaffList;
use crate::domain::a002_bank_account::ui::list::BankAccountList;
use crate::domain::a003_expense_category::ui::list::ExpenseCategoryList;
use crate::domain::a004_expense::ui::report::ExpenseReport;
use crate::domain::a005_attendance::ui::report::AttendanceReport;
use crate::domain::a006_item::ui::list::ItemList;
use crate::domain::a007_shop::ui::list::ShopList;
use crate::domain::a008_order::ui::list::OrderList;
use crate::system::auth::guard::RequireAdmin;
use leptos::logging::log;
use leptos::prelude::*;

/// Page view for a tab key; pages are only instantiated when their tab opens.
pub fn render_tab_content(key: &str) -> AnyView {
    let page = match key {
        HOME_TAB => view! { <OverviewDashboard /> }.into_any(),
        STAFF_TAB => view! { <StaffList /> }.into_any(),
        BANK_ACCOUNTS_TAB => view! { <BankAccountList /> }.into_any(),
        EXPENSE_CATEGORIES_TAB => view! { <ExpenseCategoryList /> }.into_any(),
        EXPENSES_TAB => view! { <ExpenseReport /> }.into_any(),
        ATTENDANCE_TAB => view! { <AttendanceReport /> }.into_any(),
        ITEMS_TAB => view! { <ItemList /> }.into_any(),
        SHOPS_TAB => view! { <ShopList /> }.into_any(),
        ORDERS_TAB => view! { <OrderList /> }.into_any(),
        _ => {
            log!("Unknown tab key: {}", key);
            return view! { <div class="placeholder">{"Page not found"}</div> }.into_any();
        }
    };

    if is_admin_only(key) {
        view! { <RequireAdmin>{page}</RequireAdmin> }.into_any()
    } else {
        page
    }
}
