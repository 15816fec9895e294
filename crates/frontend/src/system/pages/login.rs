use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::config::config;
use crate::system::auth::{api, context, storage};

#[component]
pub fn LoginPage() -> impl IntoView {
    let remembered = storage::remembered_mobile();
    let (mobile, set_mobile) = signal(remembered.clone().unwrap_or_default());
    let (password, set_password) = signal(String::new());
    let (remember, set_remember) = signal(remembered.is_some());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let mobile_val = mobile.get().trim().to_string();
        let password_val = password.get();
        if mobile_val.is_empty() || password_val.is_empty() {
            set_error_message.set(Some("Enter mobile number and password".to_string()));
            return;
        }
        let remember_val = remember.get();

        set_is_loading.set(true);
        set_error_message.set(None);

        spawn_local(async move {
            match api::login(mobile_val, password_val).await {
                Ok(user) => {
                    log::info!("Logged in as user {} ({:?})", user.id, user.role);
                    set_is_loading.set(false);
                    // Swaps the login page for the dashboard shell.
                    context::sign_in(user, remember_val);
                }
                Err(e) => {
                    log::warn!("Login failed: {}", e);
                    set_error_message.set(Some(e));
                    set_is_loading.set(false);
                }
            }
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>{config().branding.name.clone()}</h1>
                <h2>"Sign in"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="mobile">"Mobile number"</label>
                        <input
                            type="tel"
                            id="mobile"
                            inputmode="numeric"
                            autocomplete="username"
                            prop:value=move || mobile.get()
                            on:input=move |ev| set_mobile.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <label class="form-check">
                        <input
                            type="checkbox"
                            prop:checked=move || remember.get()
                            on:change=move |ev| set_remember.set(event_target_checked(&ev))
                        />
                        " Remember me"
                    </label>

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
