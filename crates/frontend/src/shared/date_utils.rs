//! Local calendar helpers.
//!
//! In the browser "today" comes from `js_sys::Date`, which follows the
//! user's timezone; native builds (tests) fall back to chrono's local clock.

use chrono::NaiveDate;

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn from_parts(year: i32, month0: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month0 + 1, day)
}

#[cfg(target_arch = "wasm32")]
pub fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    from_parts(now.get_full_year() as i32, now.get_month(), now.get_date())
        .unwrap_or_else(|| chrono::Utc::now().date_naive())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// `YYYY-MM-DD`, the value an `<input type="date">` expects.
pub fn today_iso() -> String {
    today().format("%Y-%m-%d").to_string()
}

/// Stamp printed under reports.
pub fn generated_on() -> String {
    today().format("%d-%m-%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_zero_based_month() {
        assert_eq!(
            from_parts(2024, 0, 31),
            NaiveDate::from_ymd_opt(2024, 1, 31)
        );
        assert_eq!(from_parts(2024, 1, 30), None);
    }

    #[test]
    fn test_today_iso_shape() {
        let s = today_iso();
        assert_eq!(s.len(), 10);
        assert_eq!(&s[4..5], "-");
    }
}
