use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::common::{flex, Keyed, RecordId, Resource};
use crate::shared::period::DateWireFormat;
use crate::shared::validation::{self, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
    #[serde(rename = "Half Day")]
    HalfDay,
    Late,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 4] = [
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::HalfDay,
        AttendanceStatus::Late,
    ];

    /// Wire and display text.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::HalfDay => "Half Day",
            AttendanceStatus::Late => "Late",
        }
    }

    pub fn from_str_lossy(s: &str) -> Self {
        let norm: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect();
        match norm.as_str() {
            "absent" | "a" => AttendanceStatus::Absent,
            "halfday" | "half" | "hd" => AttendanceStatus::HalfDay,
            "late" | "l" => AttendanceStatus::Late,
            _ => AttendanceStatus::Present,
        }
    }

    /// Contribution to the worked-days figure.
    pub fn day_weight(&self) -> f64 {
        match self {
            AttendanceStatus::Present | AttendanceStatus::Late => 1.0,
            AttendanceStatus::HalfDay => 0.5,
            AttendanceStatus::Absent => 0.0,
        }
    }

    pub fn records_times(&self) -> bool {
        *self != AttendanceStatus::Absent
    }
}

fn status_lossy<'de, D: Deserializer<'de>>(d: D) -> Result<AttendanceStatus, D::Error> {
    let raw: Option<String> = Option::deserialize(d)?;
    Ok(raw
        .as_deref()
        .map(AttendanceStatus::from_str_lossy)
        .unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(deserialize_with = "flex::id")]
    pub id: RecordId,
    #[serde(deserialize_with = "flex::id")]
    pub staff_id: RecordId,
    #[serde(default, deserialize_with = "flex::opt_id")]
    pub shop_id: Option<RecordId>,
    #[serde(alias = "attendance_date")]
    pub date: String,
    #[serde(default, deserialize_with = "flex::opt_text")]
    pub in_time: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_text")]
    pub out_time: Option<String>,
    #[serde(default, deserialize_with = "status_lossy")]
    pub status: AttendanceStatus,
    #[serde(default, deserialize_with = "flex::opt_text")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_text")]
    pub staff_name: Option<String>,
}

impl Keyed for AttendanceRecord {
    fn key(&self) -> RecordId {
        self.id
    }
}

impl Resource for AttendanceRecord {
    const COLLECTION_KEY: &'static str = "attendance";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub user_id: RecordId,
    pub staff_id: RecordId,
    pub shop_id: Option<RecordId>,
    pub date: String,
    pub in_time: Option<String>,
    pub out_time: Option<String>,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceForm {
    pub id: Option<RecordId>,
    pub staff_id: Option<RecordId>,
    pub date: String,
    pub in_time: String,
    pub out_time: String,
    pub status: AttendanceStatus,
    pub notes: String,
}

impl AttendanceForm {
    pub fn new(staff_id: Option<RecordId>, today_iso: &str) -> Self {
        Self {
            staff_id,
            date: today_iso.to_string(),
            ..Default::default()
        }
    }

    pub fn from_record(r: &AttendanceRecord) -> Self {
        Self {
            id: Some(r.id),
            staff_id: Some(r.staff_id),
            date: crate::shared::period::to_iso(&r.date).unwrap_or_else(|| r.date.clone()),
            in_time: short_time(r.in_time.as_deref()),
            out_time: short_time(r.out_time.as_deref()),
            status: r.status,
            notes: r.notes.clone().unwrap_or_default(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn validate(
        &self,
        user_id: RecordId,
        shop_id: Option<RecordId>,
        date_format: DateWireFormat,
    ) -> Result<AttendanceDto, ValidationError> {
        let staff_id = validation::required_id("Staff", self.staff_id)?;
        let iso = validation::date("Date", &self.date)?;
        let date = date_format
            .encode(&iso)
            .ok_or(ValidationError::BadDate("Date"))?;

        let (in_time, out_time) = if self.status.records_times() {
            let in_time = validation::optional_time("In time", &self.in_time)?;
            let out_time = validation::optional_time("Out time", &self.out_time)?;
            // HH:MM compares correctly as text.
            if let (Some(i), Some(o)) = (&in_time, &out_time) {
                if o < i {
                    return Err(ValidationError::OutBeforeIn);
                }
            }
            (in_time, out_time)
        } else {
            (None, None)
        };

        Ok(AttendanceDto {
            id: self.id,
            user_id,
            staff_id,
            shop_id,
            date,
            in_time,
            out_time,
            status: self.status,
            notes: validation::optional_text(&self.notes),
        })
    }
}

/// `09:05:00` -> `09:05` for `<input type="time">`.
fn short_time(raw: Option<&str>) -> String {
    raw.map(|t| t.trim().chars().take(5).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_decoding() {
        let r: AttendanceRecord = serde_json::from_str(
            r#"{"id":"1","staff_id":"2","date":"2024-03-01","status":"Half Day","in_time":"09:00:00"}"#,
        )
        .unwrap();
        assert_eq!(r.status, AttendanceStatus::HalfDay);
        assert_eq!(AttendanceStatus::from_str_lossy("half_day"), AttendanceStatus::HalfDay);
        assert_eq!(AttendanceStatus::from_str_lossy("ABSENT"), AttendanceStatus::Absent);
        assert_eq!(
            serde_json::to_value(AttendanceStatus::HalfDay).unwrap(),
            "Half Day"
        );
        assert_eq!(AttendanceForm::from_record(&r).in_time, "09:00");
    }

    #[test]
    fn test_absent_clears_times() {
        let form = AttendanceForm {
            staff_id: Some(2),
            date: "01-03-2024".into(),
            in_time: "09:00".into(),
            out_time: "18:00".into(),
            status: AttendanceStatus::Absent,
            ..Default::default()
        };
        let dto = form.validate(1, Some(3), DateWireFormat::Iso).unwrap();
        assert_eq!(dto.in_time, None);
        assert_eq!(dto.out_time, None);
        assert_eq!(dto.date, "2024-03-01");
    }

    #[test]
    fn test_out_before_in_rejected() {
        let form = AttendanceForm {
            staff_id: Some(2),
            date: "2024-03-01".into(),
            in_time: "18:00".into(),
            out_time: "09:00".into(),
            ..Default::default()
        };
        assert_eq!(
            form.validate(1, None, DateWireFormat::Iso),
            Err(ValidationError::OutBeforeIn)
        );
    }

    #[test]
    fn test_staff_and_date_required() {
        let form = AttendanceForm::new(None, "2024-03-01");
        assert_eq!(
            form.validate(1, None, DateWireFormat::Iso),
            Err(ValidationError::Required("Staff"))
        );
        let form = AttendanceForm::new(Some(1), "");
        assert_eq!(
            form.validate(1, None, DateWireFormat::Iso),
            Err(ValidationError::Required("Date"))
        );
    }
}
