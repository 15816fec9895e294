//! Tab keys, titles and access levels in one place.

pub const HOME_TAB: &str = "d400_overview";
pub const STAFF_TAB: &str = "a001_staff";
pub const BANK_ACCOUNTS_TAB: &str = "a002_bank_account";
pub const EXPENSE_CATEGORIES_TAB: &str = "a003_expense_category";
pub const EXPENSES_TAB: &str = "a004_expense";
pub const ATTENDANCE_TAB: &str = "a005_attendance";
pub const ITEMS_TAB: &str = "a006_item";
pub const SHOPS_TAB: &str = "a007_shop";
pub const ORDERS_TAB: &str = "a008_order";

/// Readable tab title for a key; unknown keys get a generic title.
pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        HOME_TAB => "Overview",
        STAFF_TAB => "Staff",
        BANK_ACCOUNTS_TAB => "Bank Accounts",
        EXPENSE_CATEGORIES_TAB => "Expense Categories",
        EXPENSES_TAB => "Staff Expenses",
        ATTENDANCE_TAB => "Attendance",
        ITEMS_TAB => "Items",
        SHOPS_TAB => "Shops",
        ORDERS_TAB => "Orders",
        _ => "Page",
    }
}

/// Pages only admins may open; clients never see them in the menu.
pub fn is_admin_only(key: &str) -> bool {
    matches!(
        key,
        STAFF_TAB | BANK_ACCOUNTS_TAB | EXPENSE_CATEGORIES_TAB | ATTENDANCE_TAB | SHOPS_TAB
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_for_known_and_unknown_keys() {
        assert_eq!(tab_label_for_key(EXPENSES_TAB), "Staff Expenses");
        assert_eq!(tab_label_for_key("zzz"), "Page");
    }

    #[test]
    fn test_client_pages() {
        assert!(!is_admin_only(HOME_TAB));
        assert!(!is_admin_only(EXPENSES_TAB));
        assert!(!is_admin_only(ITEMS_TAB));
        assert!(!is_admin_only(ORDERS_TAB));
        assert!(is_admin_only(ATTENDANCE_TAB));
        assert!(is_admin_only(STAFF_TAB));
    }
}
