use leptos::prelude::*;

/// Native date picker. The browser shows the locale layout but always
/// reports `YYYY-MM-DD`.
#[component]
pub fn DateInput(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <div class="form__group">
            <label class="form__label">
                {label}
                {required.then(|| view! { <span class="form__required">"*"</span> })}
            </label>
            <input
                type="date"
                class="form__input"
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}
