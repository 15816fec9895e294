use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatTone {
    Neutral,
    Good,
    Bad,
}

impl StatTone {
    fn class(&self) -> &'static str {
        match self {
            StatTone::Neutral => "stat-card",
            StatTone::Good => "stat-card stat-card--success",
            StatTone::Bad => "stat-card stat-card--error",
        }
    }
}

/// Summary tile: icon, label and an already formatted value.
#[component]
pub fn StatCard(
    #[prop(into)] label: String,
    icon_name: &'static str,
    /// `None` renders a dash (not loaded yet).
    #[prop(into)]
    value: Signal<Option<String>>,
    #[prop(optional)] tone: Option<StatTone>,
    #[prop(into, optional)] subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let tone = tone.unwrap_or(StatTone::Neutral);

    view! {
        <div class=tone.class()>
            <div class="stat-card__icon">{icon(icon_name)}</div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">
                    {move || value.get().unwrap_or_else(|| "\u{2014}".to_string())}
                </div>
                {move || subtitle.get().map(|s| view! { <div class="stat-card__subtitle">{s}</div> })}
            </div>
        </div>
    }
}
