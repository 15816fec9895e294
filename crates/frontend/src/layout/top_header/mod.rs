//! Top bar: sidebar toggle, branding, signed-in user and logout.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::config::config;
use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalStackService;
use crate::system::auth::context::{sign_out, use_auth};
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let (auth_state, _) = use_auth();
    let is_admin = auth_state.with_untracked(|s| s.is_admin());

    let toggle_sidebar = move |_| ctx.toggle_left();

    let logout = move |_| {
        log::info!("Logging out");
        modal_stack.clear();
        ctx.reset();
        sign_out();
    };

    let is_sidebar_visible = move || ctx.left_open.get();
    let branding = &config().branding;

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=toggle_sidebar
                    title=move || if is_sidebar_visible() { "Hide navigation" } else { "Show navigation" }
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">{branding.name.clone()}</span>
                <span class="top-header__tagline">{branding.tagline.clone()}</span>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    {icon("users")}
                    <span>
                        {move || auth_state.get().user
                            .map(|u| u.display_name())
                            .unwrap_or_default()}
                    </span>
                    {if is_admin {
                        view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>"Admin"</Badge> }.into_any()
                    } else {
                        view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>"Client"</Badge> }.into_any()
                    }}
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Log out">
                    {icon("logout")}
                </button>
            </div>
        </div>
    }
}
