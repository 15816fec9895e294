//! Staff dropdown driving the expense and attendance reports.

use contracts::domain::a001_staff::Staff;
use contracts::domain::common::RecordId;
use leptos::logging::log;
use leptos::prelude::*;
use thaw::*;

fn to_option_value(id: Option<RecordId>) -> String {
    id.map(|i| i.to_string()).unwrap_or_default()
}

/// Option label: inactive members are marked so old records stay reachable.
fn staff_label(s: &Staff) -> String {
    if s.is_active() {
        s.name.clone()
    } else {
        format!("{} (inactive)", s.name)
    }
}

#[component]
pub fn StaffSelector(
    #[prop(into)] staff: Signal<Vec<Staff>>,
    #[prop(into)] selected: Signal<Option<RecordId>>,
    on_change: Callback<Option<RecordId>>,
) -> impl IntoView {
    let select_value = RwSignal::new(to_option_value(selected.get_untracked()));

    // Parent -> select. Also re-applied once the options arrive, since the
    // Select clears a value that has no matching <option> yet.
    Effect::new(move |_| {
        let _ = staff.get();
        let parent = to_option_value(selected.get());
        if select_value.get_untracked() != parent {
            select_value.set(parent);
        }
    });

    // Select -> parent, on real user changes only.
    Effect::new(move |prev: Option<String>| {
        let val = select_value.get();
        if prev.is_none() || prev.as_ref() == Some(&val) {
            return val;
        }
        if val.is_empty() && staff.with_untracked(|s| s.is_empty()) {
            return val;
        }
        let id = val.parse::<RecordId>().ok();
        if id != selected.get_untracked() {
            log!("[StaffSelector] selected: {:?}", id);
            on_change.run(id);
        }
        val
    });

    view! {
        <div class="staff-selector">
            <label class="staff-selector__label">"Staff"</label>
            <Select value=select_value>
                <option value="">"-- Select staff --"</option>
                <For
                    each=move || staff.get()
                    key=|s| s.id
                    children=move |s: Staff| {
                        view! { <option value=s.id.to_string()>{staff_label(&s)}</option> }
                    }
                />
            </Select>
        </div>
    }
}
