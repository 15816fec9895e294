use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::common::{flex, Keyed, RecordId, Resource};
use crate::shared::validation::{self, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StaffStatus {
    #[default]
    Active,
    Inactive,
}

impl StaffStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffStatus::Active => "active",
            StaffStatus::Inactive => "inactive",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StaffStatus::Active => "Active",
            StaffStatus::Inactive => "Inactive",
        }
    }

    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "inactive" | "0" => StaffStatus::Inactive,
            _ => StaffStatus::Active,
        }
    }
}

/// `"Active"`, `"inactive"`, `1`, `0`, `null` - whatever the row holds.
fn status_lossy<'de, D: Deserializer<'de>>(d: D) -> Result<StaffStatus, D::Error> {
    let raw: Option<serde_json::Value> = Option::deserialize(d)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => StaffStatus::from_str_lossy(&s),
        Some(serde_json::Value::Number(n)) if n.as_i64() == Some(0) => StaffStatus::Inactive,
        Some(serde_json::Value::Bool(false)) => StaffStatus::Inactive,
        _ => StaffStatus::Active,
    })
}

/// A staff member; parent of expenses and attendance records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    #[serde(deserialize_with = "flex::id")]
    pub id: RecordId,
    #[serde(alias = "staff_name")]
    pub name: String,
    #[serde(default, deserialize_with = "flex::number")]
    pub salary: f64,
    #[serde(default, deserialize_with = "flex::opt_id")]
    pub shop_id: Option<RecordId>,
    #[serde(default, deserialize_with = "status_lossy")]
    pub status: StaffStatus,
    #[serde(default, deserialize_with = "flex::opt_text")]
    pub mobile: Option<String>,
}

impl Staff {
    pub fn is_active(&self) -> bool {
        self.status == StaffStatus::Active
    }
}

impl Keyed for Staff {
    fn key(&self) -> RecordId {
        self.id
    }
}

impl Resource for Staff {
    const COLLECTION_KEY: &'static str = "staff";
}

/// Body of POST (create) and PUT (update) on `staff.php`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub user_id: RecordId,
    pub name: String,
    pub salary: f64,
    pub shop_id: Option<RecordId>,
    pub status: StaffStatus,
    pub mobile: Option<String>,
}

/// Body of PATCH on `staff.php`: flips active/inactive without a full update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffStatusPatch {
    pub id: RecordId,
    pub user_id: RecordId,
    pub status: StaffStatus,
}

impl StaffStatusPatch {
    pub fn toggled(staff: &Staff, user_id: RecordId) -> Self {
        let status = match staff.status {
            StaffStatus::Active => StaffStatus::Inactive,
            StaffStatus::Inactive => StaffStatus::Active,
        };
        Self {
            id: staff.id,
            user_id,
            status,
        }
    }

    /// Question asked before the status change is sent.
    pub fn prompt(&self, staff_name: &str) -> String {
        format!("Mark \"{}\" as {}?", staff_name, self.status.label().to_lowercase())
    }
}

/// Raw values of the staff form as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaffForm {
    pub id: Option<RecordId>,
    pub name: String,
    pub salary: String,
    pub status: StaffStatus,
    pub mobile: String,
}

impl StaffForm {
    pub fn from_staff(s: &Staff) -> Self {
        Self {
            id: Some(s.id),
            name: s.name.clone(),
            salary: format!("{:.2}", s.salary),
            status: s.status,
            mobile: s.mobile.clone().unwrap_or_default(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn validate(
        &self,
        user_id: RecordId,
        shop_id: Option<RecordId>,
    ) -> Result<StaffDto, ValidationError> {
        let name = validation::required("Name", &self.name)?;
        let salary = validation::non_negative("Salary", &self.salary)?;
        let mobile = match validation::optional_text(&self.mobile) {
            Some(m) => Some(validation::mobile(&m)?),
            None => None,
        };
        Ok(StaffDto {
            id: self.id,
            user_id,
            name,
            salary,
            shop_id,
            status: self.status,
            mobile,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_php_row() {
        let s: Staff = serde_json::from_str(
            r#"{"id":"4","name":"Ravi","salary":"12000.00","shop_id":"2","status":"Active"}"#,
        )
        .unwrap();
        assert_eq!(s.id, 4);
        assert_eq!(s.salary, 12000.0);
        assert!(s.is_active());
        assert_eq!(s.mobile, None);

        let s: Staff = serde_json::from_str(r#"{"id":5,"name":"Anu","status":0}"#).unwrap();
        assert_eq!(s.status, StaffStatus::Inactive);
        assert_eq!(s.salary, 0.0);
    }

    #[test]
    fn test_form_validation() {
        let form = StaffForm {
            name: "  Meena ".into(),
            salary: "9000".into(),
            ..Default::default()
        };
        let dto = form.validate(1, Some(3)).unwrap();
        assert_eq!(dto.name, "Meena");
        assert_eq!(dto.shop_id, Some(3));
        assert_eq!(dto.id, None);

        let bad = StaffForm {
            name: "".into(),
            salary: "9000".into(),
            ..Default::default()
        };
        assert_eq!(bad.validate(1, None), Err(ValidationError::Required("Name")));

        let bad_salary = StaffForm {
            name: "X".into(),
            salary: "-1".into(),
            ..Default::default()
        };
        assert_eq!(
            bad_salary.validate(1, None),
            Err(ValidationError::Negative("Salary"))
        );
    }

    #[test]
    fn test_status_patch_flips() {
        let s: Staff = serde_json::from_str(r#"{"id":7,"name":"Raju"}"#).unwrap();
        let patch = StaffStatusPatch::toggled(&s, 2);
        assert_eq!(patch.status, StaffStatus::Inactive);
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({"id": 7, "user_id": 2, "status": "inactive"})
        );
    }

    #[test]
    fn test_status_patch_prompt_names_target_status() {
        let s: Staff =
            serde_json::from_str(r#"{"id":7,"name":"Raju","status":"inactive"}"#).unwrap();
        let patch = StaffStatusPatch::toggled(&s, 2);
        assert_eq!(patch.prompt(&s.name), "Mark \"Raju\" as active?");
    }
}
