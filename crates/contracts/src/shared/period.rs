//! Dates and month periods.
//!
//! Records store their dates either as `YYYY-MM-DD` (admin screens) or
//! `DD-MM-YYYY` (client screens), sometimes followed by a time part.
//! Everything here accepts both and produces `YYYY-MM-DD` / `YYYY-MM`.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// One entry of the month filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthOption {
    /// `YYYY-MM`
    pub value: String,
    /// `March 2024`
    pub label: String,
}

/// Parse a stored record date in either supported layout.
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    // Drop a trailing time part: "2024-03-15 10:30:00" / "2024-03-15T10:30:00".
    let date_part = raw
        .split(|c: char| c == ' ' || c == 'T')
        .next()
        .unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%d-%m-%Y"))
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%d/%m/%Y"))
        .ok()
}

/// `YYYY-MM` of a stored record date.
pub fn month_key(raw: &str) -> Option<String> {
    parse_record_date(raw).map(|d| format!("{:04}-{:02}", d.year(), d.month()))
}

/// Whether a record date falls in `month` (`YYYY-MM`). `None` matches all.
pub fn matches_month(raw_date: &str, month: Option<&str>) -> bool {
    match month {
        None => true,
        Some(m) if m.trim().is_empty() => true,
        Some(m) => month_key(raw_date).as_deref() == Some(m.trim()),
    }
}

/// Layout the backend expects in request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DateWireFormat {
    /// `YYYY-MM-DD`
    #[default]
    Iso,
    /// `DD-MM-YYYY`
    DayFirst,
}

impl DateWireFormat {
    /// Re-encode a date typed or stored in either layout.
    pub fn encode(&self, raw: &str) -> Option<String> {
        let d = parse_record_date(raw)?;
        Some(match self {
            DateWireFormat::Iso => d.format("%Y-%m-%d").to_string(),
            DateWireFormat::DayFirst => d.format("%d-%m-%Y").to_string(),
        })
    }
}

/// Canonical wire form of a date (`YYYY-MM-DD`).
pub fn to_iso(raw: &str) -> Option<String> {
    parse_record_date(raw).map(|d| d.format("%Y-%m-%d").to_string())
}

/// Display form used in tables and printouts (`DD-MM-YYYY`).
pub fn to_display(raw: &str) -> String {
    parse_record_date(raw)
        .map(|d| d.format("%d-%m-%Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

pub fn month_label(year: i32, month: u32) -> String {
    let name = MONTH_NAMES
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("?");
    format!("{name} {year}")
}

/// Label for a `YYYY-MM` value, or the value itself if it does not parse.
pub fn label_for_month_value(value: &str) -> String {
    value
        .split_once('-')
        .and_then(|(y, m)| Some((y.parse::<i32>().ok()?, m.parse::<u32>().ok()?)))
        .filter(|(_, m)| (1..=12).contains(m))
        .map(|(y, m)| month_label(y, m))
        .unwrap_or_else(|| value.to_string())
}

/// The current month and the 11 before it, newest first.
pub fn trailing_months(today: NaiveDate) -> Vec<MonthOption> {
    let mut year = today.year();
    let mut month = today.month();
    let mut out = Vec::with_capacity(12);
    for _ in 0..12 {
        out.push(MonthOption {
            value: format!("{year:04}-{month:02}"),
            label: month_label(year, month),
        });
        if month == 1 {
            month = 12;
            year -= 1;
        } else {
            month -= 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_storage_formats_match_month() {
        assert!(matches_month("2024-03-15", Some("2024-03")));
        assert!(matches_month("15-03-2024", Some("2024-03")));
        assert!(matches_month("2024-03-01 09:15:00", Some("2024-03")));
        assert!(!matches_month("2024-04-01", Some("2024-03")));
        assert!(!matches_month("garbage", Some("2024-03")));
    }

    #[test]
    fn test_no_month_matches_everything() {
        assert!(matches_month("garbage", None));
        assert!(matches_month("2020-01-01", Some("")));
    }

    #[test]
    fn test_trailing_months_cross_year() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 20).unwrap();
        let months = trailing_months(today);
        assert_eq!(months.len(), 12);
        assert_eq!(months[0].value, "2024-02");
        assert_eq!(months[0].label, "February 2024");
        assert_eq!(months[1].value, "2024-01");
        assert_eq!(months[2].value, "2023-12");
        assert_eq!(months[2].label, "December 2023");
        assert_eq!(months[11].value, "2023-03");
    }

    #[test]
    fn test_conversions() {
        assert_eq!(to_iso("15-03-2024").as_deref(), Some("2024-03-15"));
        assert_eq!(to_iso("2024-03-15").as_deref(), Some("2024-03-15"));
        assert_eq!(to_display("2024-03-15"), "15-03-2024");
        assert_eq!(to_display("n/a"), "n/a");
        assert_eq!(label_for_month_value("2023-11"), "November 2023");
        assert_eq!(label_for_month_value("2023-13"), "2023-13");
    }

    #[test]
    fn test_wire_format() {
        assert_eq!(DateWireFormat::Iso.encode("15-03-2024").as_deref(), Some("2024-03-15"));
        assert_eq!(DateWireFormat::DayFirst.encode("2024-03-15").as_deref(), Some("15-03-2024"));
        assert_eq!(DateWireFormat::Iso.encode(""), None);
    }
}
