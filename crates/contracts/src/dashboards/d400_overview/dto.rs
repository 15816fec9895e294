use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::a001_staff::aggregate::Staff;
use crate::domain::a004_expense::aggregate::Expense;
use crate::domain::a005_attendance::aggregate::{AttendanceRecord, AttendanceStatus};
use crate::shared::period;

/// Figures of the home tab
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverviewStats {
    pub active_staff: usize,
    pub total_staff: usize,
    /// Sum of expenses dated in the current month
    pub month_expense_total: f64,
    pub month_expense_count: usize,
    /// Present, Late and Half Day all count as present here
    pub present_today: usize,
    pub absent_today: usize,
    /// Active staff with no record for today
    pub unmarked_today: usize,
}

impl OverviewStats {
    /// Any slice may be empty when its fetch failed; the figure is then zero.
    pub fn compute(
        today: NaiveDate,
        staff: &[Staff],
        expenses: &[Expense],
        attendance: &[AttendanceRecord],
    ) -> Self {
        let month = format!("{}", today.format("%Y-%m"));

        let month_expenses = expenses
            .iter()
            .filter(|e| period::matches_month(&e.expense_date, Some(&month)));
        let (month_expense_count, month_expense_total) =
            month_expenses.fold((0, 0.0), |(n, sum), e| (n + 1, sum + e.amount));

        let today_records: Vec<&AttendanceRecord> = attendance
            .iter()
            .filter(|r| period::parse_record_date(&r.date) == Some(today))
            .collect();
        let absent_today = today_records
            .iter()
            .filter(|r| r.status == AttendanceStatus::Absent)
            .count();
        let present_today = today_records.len() - absent_today;

        let active_staff = staff.iter().filter(|s| s.is_active()).count();
        let unmarked_today = staff
            .iter()
            .filter(|s| s.is_active())
            .filter(|s| !today_records.iter().any(|r| r.staff_id == s.id))
            .count();

        Self {
            active_staff,
            total_staff: staff.len(),
            month_expense_total,
            month_expense_count,
            present_today,
            absent_today,
            unmarked_today,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff(json: &str) -> Vec<Staff> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_compute() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let staff = staff(
            r#"[{"id":1,"name":"A","status":"active"},
                {"id":2,"name":"B","status":"active"},
                {"id":3,"name":"C","status":"inactive"}]"#,
        );
        let expenses: Vec<Expense> = serde_json::from_str(
            r#"[{"id":1,"staff_id":1,"amount":"100","expense_date":"2024-03-01"},
                {"id":2,"staff_id":1,"amount":50,"expense_date":"15-03-2024"},
                {"id":3,"staff_id":2,"amount":70,"expense_date":"2024-02-28"}]"#,
        )
        .unwrap();
        let attendance: Vec<AttendanceRecord> = serde_json::from_str(
            r#"[{"id":1,"staff_id":1,"date":"2024-03-15","status":"Late"},
                {"id":2,"staff_id":3,"date":"15-03-2024","status":"Absent"},
                {"id":3,"staff_id":2,"date":"2024-03-14","status":"Present"}]"#,
        )
        .unwrap();

        let s = OverviewStats::compute(today, &staff, &expenses, &attendance);
        assert_eq!(s.active_staff, 2);
        assert_eq!(s.total_staff, 3);
        assert_eq!(s.month_expense_total, 150.0);
        assert_eq!(s.month_expense_count, 2);
        assert_eq!(s.present_today, 1);
        assert_eq!(s.absent_today, 1);
        assert_eq!(s.unmarked_today, 1);
    }

    #[test]
    fn test_failed_fetches_give_zeroes() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(
            OverviewStats::compute(today, &[], &[], &[]),
            OverviewStats::default()
        );
    }
}
