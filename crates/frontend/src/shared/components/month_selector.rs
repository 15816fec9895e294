use contracts::shared::period::trailing_months;
use leptos::prelude::*;
use thaw::*;

use crate::shared::date_utils::today;

/// Month filter: "All months" plus the current month and the 11 before it.
/// `month` holds `YYYY-MM`, or `None` for no filter.
#[component]
pub fn MonthSelector(month: RwSignal<Option<String>>) -> impl IntoView {
    let options = trailing_months(today());
    let select_value = RwSignal::new(month.get_untracked().unwrap_or_default());

    Effect::new(move |_| {
        let val = select_value.get();
        let next = if val.is_empty() { None } else { Some(val) };
        if month.get_untracked() != next {
            month.set(next);
        }
    });

    view! {
        <div class="month-selector">
            <label class="month-selector__label">"Month"</label>
            <Select value=select_value size=SelectSize::Small>
                <option value="">"All months"</option>
                {options
                    .into_iter()
                    .map(|m| view! { <option value=m.value>{m.label}</option> })
                    .collect_view()}
            </Select>
        </div>
    }
}
