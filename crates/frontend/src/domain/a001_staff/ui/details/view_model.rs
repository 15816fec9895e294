use contracts::domain::a001_staff::{StaffForm, StaffStatus};
use contracts::domain::common::RecordId;
use leptos::prelude::*;

/// Reactive state of the staff form
#[derive(Clone, Copy)]
pub struct StaffDetailsVm {
    pub id: StoredValue<Option<RecordId>>,
    pub name: RwSignal<String>,
    pub mobile: RwSignal<String>,
    pub salary: RwSignal<String>,
    /// `"active"` / `"inactive"`, the RadioGroup value
    pub status: RwSignal<String>,
    pub error: RwSignal<Option<String>>,
    pub busy: RwSignal<bool>,
}

impl StaffDetailsVm {
    pub fn new(form: StaffForm, busy: RwSignal<bool>) -> Self {
        Self {
            id: StoredValue::new(form.id),
            name: RwSignal::new(form.name),
            mobile: RwSignal::new(form.mobile),
            salary: RwSignal::new(form.salary),
            status: RwSignal::new(form.status.as_str().to_string()),
            error: RwSignal::new(None),
            busy,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.get_value().is_some()
    }

    pub fn to_form(&self) -> StaffForm {
        StaffForm {
            id: self.id.get_value(),
            name: self.name.get_untracked(),
            salary: self.salary.get_untracked(),
            status: StaffStatus::from_str_lossy(&self.status.get_untracked()),
            mobile: self.mobile.get_untracked(),
        }
    }
}
