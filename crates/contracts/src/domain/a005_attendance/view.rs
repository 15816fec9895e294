use std::collections::HashMap;

use super::aggregate::{AttendanceRecord, AttendanceStatus};
use crate::domain::common::RecordId;
use crate::shared::export::{ExportRow, ExportTable};
use crate::shared::period::{self, matches_month};
use crate::shared::selection::SelectionState;

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRow {
    pub id: RecordId,
    pub date: String,
    pub status: AttendanceStatus,
    pub in_time: String,
    pub out_time: String,
    pub notes: String,
}

impl ExportRow for AttendanceRow {
    fn headers() -> Vec<&'static str> {
        vec!["Date", "Status", "In", "Out", "Notes"]
    }

    fn to_cells(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.status.as_str().to_string(),
            self.in_time.clone(),
            self.out_time.clone(),
            self.notes.clone(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceSummary {
    counts: HashMap<AttendanceStatus, usize>,
    pub effective_days: f64,
}

impl AttendanceSummary {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a AttendanceRecord>) -> Self {
        let mut summary = Self::default();
        for r in records {
            summary.add(r.status);
        }
        summary
    }

    fn add(&mut self, status: AttendanceStatus) {
        *self.counts.entry(status).or_default() += 1;
        self.effective_days += status.day_weight();
    }

    pub fn count(&self, status: AttendanceStatus) -> usize {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceView {
    pub rows: Vec<AttendanceRow>,
    pub summary: AttendanceSummary,
    pub empty_message: Option<String>,
}

/// `cached` as in the expense view: a reload keeps the previous rows.
pub fn build_attendance_view(
    state: SelectionState,
    cached: bool,
    records: &[AttendanceRecord],
    month: Option<&str>,
) -> AttendanceView {
    let empty = |msg: &str| AttendanceView {
        rows: Vec::new(),
        summary: AttendanceSummary::default(),
        empty_message: Some(msg.to_string()),
    };
    match state {
        SelectionState::NoSelection => return empty("Select a staff member to see attendance"),
        SelectionState::Loading(_) if !cached => return empty("Loading attendance…"),
        SelectionState::Loading(_) | SelectionState::Loaded(_) => {}
    }

    let mut matching: Vec<&AttendanceRecord> = records
        .iter()
        .filter(|r| matches_month(&r.date, month))
        .collect();
    matching.sort_by(|a, b| {
        period::parse_record_date(&b.date)
            .cmp(&period::parse_record_date(&a.date))
            .then(b.id.cmp(&a.id))
    });

    let summary = AttendanceSummary::from_records(matching.iter().copied());
    let rows: Vec<AttendanceRow> = matching
        .into_iter()
        .map(|r| AttendanceRow {
            id: r.id,
            date: period::to_display(&r.date),
            status: r.status,
            in_time: r.in_time.clone().unwrap_or_else(|| "-".into()),
            out_time: r.out_time.clone().unwrap_or_else(|| "-".into()),
            notes: r.notes.clone().unwrap_or_default(),
        })
        .collect();

    let empty_message = rows
        .is_empty()
        .then(|| "No attendance records found".to_string());

    AttendanceView {
        rows,
        summary,
        empty_message,
    }
}

impl AttendanceView {
    pub fn export_table(&self, staff_name: &str, month: Option<&str>) -> ExportTable {
        let period_line = match month {
            Some(m) if !m.is_empty() => period::label_for_month_value(m),
            _ => "All months".to_string(),
        };
        let s = &self.summary;
        ExportTable::from_rows("Staff Attendance", &self.rows)
            .with_subtitle(format!("Staff: {staff_name}"))
            .with_subtitle(format!("Period: {period_line}"))
            .with_footer(vec![
                "Days worked".to_string(),
                format!("{}", s.effective_days),
                format!("Present {}", s.count(AttendanceStatus::Present)),
                format!("Absent {}", s.count(AttendanceStatus::Absent)),
                format!(
                    "Half Day {} / Late {}",
                    s.count(AttendanceStatus::HalfDay),
                    s.count(AttendanceStatus::Late)
                ),
            ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::selection::DependentCollection;

    fn record(id: i64, date: &str, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id,
            staff_id: 1,
            shop_id: None,
            date: date.to_string(),
            in_time: None,
            out_time: None,
            status,
            notes: None,
            staff_name: None,
        }
    }

    #[test]
    fn test_effective_days() {
        let records = vec![
            record(1, "2024-03-01", AttendanceStatus::Present),
            record(2, "2024-03-02", AttendanceStatus::Late),
            record(3, "03-03-2024", AttendanceStatus::HalfDay),
            record(4, "2024-03-04", AttendanceStatus::Absent),
            record(5, "2024-04-01", AttendanceStatus::Present),
        ];
        let v = build_attendance_view(SelectionState::Loaded(1), true, &records, Some("2024-03"));
        assert_eq!(v.rows.len(), 4);
        assert_eq!(v.rows[0].id, 4);
        assert_eq!(v.summary.effective_days, 2.5);
        assert_eq!(v.summary.count(AttendanceStatus::Absent), 1);
        assert_eq!(v.summary.total(), 4);
        assert_eq!(v.rows[0].in_time, "-");
    }

    #[test]
    fn test_empty_states() {
        let v = build_attendance_view(SelectionState::NoSelection, false, &[], None);
        assert_eq!(v.summary.effective_days, 0.0);
        assert_eq!(v.summary.count(AttendanceStatus::Present), 0);
        assert_eq!(v.summary.total(), 0);
        assert!(v.empty_message.is_some());
        let v = build_attendance_view(SelectionState::Loaded(1), true, &[], None);
        assert_eq!(v.empty_message.as_deref(), Some("No attendance records found"));
        let t = v.export_table("Ravi", Some("2024-03"));
        assert!(t.is_empty());
        assert_eq!(t.subtitle[1], "Period: March 2024");
    }

    #[test]
    fn test_reload_keeps_previous_records() {
        let mut dc = DependentCollection::new();
        let t = dc.select(1);
        dc.apply(t, vec![record(1, "2024-03-01", AttendanceStatus::Present)]);
        dc.reload();
        let v = build_attendance_view(dc.state(), dc.cache().is_loaded(), dc.items(), None);
        assert_eq!(v.rows.len(), 1);
        assert_eq!(v.summary.effective_days, 1.0);
        assert_eq!(v.empty_message, None);

        dc.select(2);
        let v = build_attendance_view(dc.state(), dc.cache().is_loaded(), dc.items(), None);
        assert_eq!(v.empty_message.as_deref(), Some("Loading attendance…"));
    }
}
