//! Staff expense report: cache + selection + month filter -> table rows and totals.

use std::collections::HashMap;

use super::aggregate::{Expense, PaymentMode};
use crate::domain::a002_bank_account::aggregate::BankAccount;
use crate::domain::a003_expense_category::aggregate::ExpenseCategory;
use crate::domain::common::RecordId;
use crate::shared::export::{ExportRow, ExportTable};
use crate::shared::money::format_rupees;
use crate::shared::period::{self, matches_month};
use crate::shared::selection::SelectionState;

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRow {
    pub id: RecordId,
    pub date: String,
    pub amount: f64,
    pub payment_mode: PaymentMode,
    pub account: String,
    pub category: String,
    pub note: String,
}

impl ExportRow for ExpenseRow {
    fn headers() -> Vec<&'static str> {
        vec!["Date", "Amount", "Payment Mode", "Account", "Category", "Note"]
    }

    fn to_cells(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            format_rupees(self.amount),
            self.payment_mode.label().to_string(),
            self.account.clone(),
            self.category.clone(),
            self.note.clone(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseSummary {
    pub count: usize,
    pub total: f64,
    pub cash_total: f64,
    pub upi_total: f64,
    pub bank_total: f64,
}

impl ExpenseSummary {
    fn add(&mut self, mode: PaymentMode, amount: f64) {
        self.count += 1;
        self.total += amount;
        match mode {
            PaymentMode::Cash => self.cash_total += amount,
            PaymentMode::Upi => self.upi_total += amount,
            PaymentMode::Bank => self.bank_total += amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseView {
    pub rows: Vec<ExpenseRow>,
    pub summary: ExpenseSummary,
    /// Set when there are no rows to show.
    pub empty_message: Option<String>,
}

/// Lookup tables for the id columns.
#[derive(Debug, Clone, Default)]
pub struct ExpenseLookups {
    accounts: HashMap<RecordId, String>,
    categories: HashMap<RecordId, String>,
}

impl ExpenseLookups {
    pub fn new(accounts: &[BankAccount], categories: &[ExpenseCategory]) -> Self {
        Self {
            accounts: accounts.iter().map(|a| (a.id, a.display_name())).collect(),
            categories: categories.iter().map(|c| (c.id, c.name.clone())).collect(),
        }
    }

    fn account(&self, e: &Expense) -> String {
        if !e.payment_mode.needs_bank_account() {
            return "-".to_string();
        }
        e.bank_account_id
            .and_then(|id| self.accounts.get(&id).cloned())
            .or_else(|| e.account_name.clone())
            .unwrap_or_else(|| "-".to_string())
    }

    fn category(&self, e: &Expense) -> String {
        e.category_id
            .and_then(|id| self.categories.get(&id).cloned())
            .or_else(|| e.category_name.clone())
            .unwrap_or_else(|| "-".to_string())
    }
}

/// `cached` is whether the collection holds a completed load; during a
/// reload those rows stay on screen until the new ones arrive.
pub fn build_expense_view(
    state: SelectionState,
    cached: bool,
    expenses: &[Expense],
    month: Option<&str>,
    lookups: &ExpenseLookups,
) -> ExpenseView {
    let empty = |msg: &str| ExpenseView {
        rows: Vec::new(),
        summary: ExpenseSummary::default(),
        empty_message: Some(msg.to_string()),
    };

    match state {
        SelectionState::NoSelection => return empty("Select a staff member to see expenses"),
        SelectionState::Loading(_) if !cached => return empty("Loading expenses…"),
        SelectionState::Loading(_) | SelectionState::Loaded(_) => {}
    }

    let mut matching: Vec<&Expense> = expenses
        .iter()
        .filter(|e| matches_month(&e.expense_date, month))
        .collect();
    // Newest first; unparseable dates sink to the bottom.
    matching.sort_by(|a, b| {
        let da = period::parse_record_date(&a.expense_date);
        let db = period::parse_record_date(&b.expense_date);
        db.cmp(&da).then(b.id.cmp(&a.id))
    });

    let mut summary = ExpenseSummary::default();
    let rows: Vec<ExpenseRow> = matching
        .into_iter()
        .map(|e| {
            summary.add(e.payment_mode, e.amount);
            ExpenseRow {
                id: e.id,
                date: period::to_display(&e.expense_date),
                amount: e.amount,
                payment_mode: e.payment_mode,
                account: lookups.account(e),
                category: lookups.category(e),
                note: e.note.clone().unwrap_or_default(),
            }
        })
        .collect();

    let empty_message = rows.is_empty().then(|| match month {
        Some(m) if !m.is_empty() => {
            format!("No expenses in {}", period::label_for_month_value(m))
        }
        _ => "No expenses recorded for this staff member".to_string(),
    });

    ExpenseView {
        rows,
        summary,
        empty_message,
    }
}

impl ExpenseView {
    pub fn export_table(&self, staff_name: &str, month: Option<&str>) -> ExportTable {
        let period_line = match month {
            Some(m) if !m.is_empty() => period::label_for_month_value(m),
            _ => "All months".to_string(),
        };
        ExportTable::from_rows("Staff Expenses", &self.rows)
            .with_subtitle(format!("Staff: {staff_name}"))
            .with_subtitle(format!("Period: {period_line}"))
            .with_footer(vec![
                "Total".to_string(),
                format_rupees(self.summary.total),
                String::new(),
                String::new(),
                String::new(),
                format!("{} entries", self.summary.count),
            ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::selection::DependentCollection;

    fn expense(id: i64, date: &str, amount: f64, mode: PaymentMode) -> Expense {
        Expense {
            id,
            staff_id: 1,
            amount,
            expense_date: date.to_string(),
            payment_mode: mode,
            bank_account_id: mode.needs_bank_account().then_some(5),
            category_id: None,
            note: None,
            category_name: None,
            account_name: None,
        }
    }

    #[test]
    fn test_staff_without_expenses_shows_empty_state_and_zero_total() {
        let mut dc: DependentCollection<Expense> = DependentCollection::new();
        let t = dc.select(1);
        dc.apply(t, Vec::new());

        let lookups = ExpenseLookups::default();
        let view = build_expense_view(dc.state(), dc.cache().is_loaded(), dc.items(), None, &lookups);
        assert!(view.rows.is_empty());
        assert_eq!(view.summary.total, 0.0);
        assert_eq!(format_rupees(view.summary.total), "₹0.00");
        assert_eq!(
            view.empty_message.as_deref(),
            Some("No expenses recorded for this staff member")
        );
    }

    #[test]
    fn test_no_selection_and_loading_states() {
        let lookups = ExpenseLookups::default();
        let items = vec![expense(1, "2024-03-01", 10.0, PaymentMode::Cash)];
        let v = build_expense_view(SelectionState::NoSelection, false, &items, None, &lookups);
        assert!(v.rows.is_empty());
        assert_eq!(v.summary, ExpenseSummary::default());
        assert_eq!(format_rupees(v.summary.total), "₹0.00");
        assert_eq!(format_rupees(v.summary.cash_total), "₹0.00");
        assert_eq!(v.summary.count, 0);
        let v = build_expense_view(SelectionState::Loading(1), false, &items, None, &lookups);
        assert_eq!(v.empty_message.as_deref(), Some("Loading expenses…"));
    }

    #[test]
    fn test_reload_keeps_previous_rows_visible() {
        let mut dc: DependentCollection<Expense> = DependentCollection::new();
        let lookups = ExpenseLookups::default();
        let t = dc.select(1);
        dc.apply(t, vec![expense(1, "2024-03-01", 40.0, PaymentMode::Cash)]);
        dc.reload();

        let v = build_expense_view(dc.state(), dc.cache().is_loaded(), dc.items(), None, &lookups);
        assert_eq!(v.rows.len(), 1);
        assert_eq!(v.summary.total, 40.0);
        assert_eq!(v.empty_message, None);

        // A fresh selection has nothing to show yet.
        dc.select(2);
        let v = build_expense_view(dc.state(), dc.cache().is_loaded(), dc.items(), None, &lookups);
        assert_eq!(v.empty_message.as_deref(), Some("Loading expenses…"));
    }

    #[test]
    fn test_month_filter_across_formats_and_totals() {
        let items = vec![
            expense(1, "2024-03-15", 100.0, PaymentMode::Cash),
            expense(2, "20-03-2024", 50.0, PaymentMode::Upi),
            expense(3, "2024-04-01", 999.0, PaymentMode::Bank),
        ];
        let accounts = vec![BankAccount {
            id: 5,
            account_name: Some("HDFC".into()),
            bank_name: None,
            account_number: None,
            account_type: Default::default(),
        }];
        let lookups = ExpenseLookups::new(&accounts, &[]);
        let v = build_expense_view(SelectionState::Loaded(1), true, &items, Some("2024-03"), &lookups);

        assert_eq!(v.rows.len(), 2);
        assert_eq!(v.rows[0].id, 2);
        assert_eq!(v.rows[0].date, "20-03-2024");
        assert_eq!(v.rows[0].account, "HDFC");
        assert_eq!(v.rows[1].account, "-");
        assert_eq!(v.summary.total, 150.0);
        assert_eq!(v.summary.cash_total, 100.0);
        assert_eq!(v.summary.upi_total, 50.0);
        assert_eq!(v.empty_message, None);

        let none = build_expense_view(SelectionState::Loaded(1), true, &items, Some("2023-01"), &lookups);
        assert_eq!(none.empty_message.as_deref(), Some("No expenses in January 2023"));
    }

    #[test]
    fn test_delete_drops_one_row() {
        let mut dc = DependentCollection::new();
        let t = dc.select(1);
        dc.apply(
            t,
            vec![
                expense(1, "2024-03-01", 10.0, PaymentMode::Cash),
                expense(2, "2024-03-02", 20.0, PaymentMode::Cash),
                expense(3, "2024-03-03", 30.0, PaymentMode::Cash),
            ],
        );
        let lookups = ExpenseLookups::default();
        let before = build_expense_view(dc.state(), dc.cache().is_loaded(), dc.items(), None, &lookups)
            .rows
            .len();
        assert!(dc.remove(2).is_some());
        let after = build_expense_view(dc.state(), dc.cache().is_loaded(), dc.items(), None, &lookups);
        assert_eq!(after.rows.len(), before - 1);
        assert!(after.rows.iter().all(|r| r.id != 2));
        assert_eq!(after.summary.total, 40.0);
    }

    #[test]
    fn test_export_table_has_totals() {
        let items = vec![expense(1, "2024-03-15", 100.0, PaymentMode::Cash)];
        let v = build_expense_view(SelectionState::Loaded(1), true, &items, None, &ExpenseLookups::default());
        let t = v.export_table("Ravi", None);
        assert_eq!(t.headers.len(), 6);
        assert_eq!(t.rows[0][1], "₹100.00");
        assert_eq!(t.subtitle, vec!["Staff: Ravi", "Period: All months"]);
        assert_eq!(t.footer_row.as_ref().unwrap()[1], "₹100.00");
    }
}
