use leptos::prelude::*;

/// Labelled native select for modal forms.
///
/// Holds `""` when the placeholder is chosen.
#[component]
pub fn FormSelect(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
    /// `(value, label)` pairs
    #[prop(into)]
    options: Signal<Vec<(String, String)>>,
    /// First, empty option
    #[prop(optional, into)]
    placeholder: Option<String>,
    #[prop(optional, into)] disabled: Signal<bool>,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <div class="form__group">
            <label class="form__label">
                {label}
                {required.then(|| view! { <span class="form__required">"*"</span> })}
            </label>
            <select
                class="form__select"
                disabled=move || disabled.get()
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                {placeholder.map(|p| view! { <option value="">{p}</option> })}
                <For
                    each=move || options.get()
                    key=|(val, _)| val.clone()
                    children=move |(val, text)| {
                        let val_clone = val.clone();
                        let is_selected = move || value.get() == val_clone;
                        view! { <option value=val selected=is_selected>{text}</option> }
                    }
                />
            </select>
        </div>
    }
}
