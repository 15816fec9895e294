use leptos::prelude::*;

use super::context::use_auth;

/// Component that requires admin privileges
/// Shows fallback if not admin
///
/// The role cannot change without a logout, which unmounts the whole shell,
/// so the check runs once.
#[component]
pub fn RequireAdmin(children: Children) -> impl IntoView {
    let (auth_state, _) = use_auth();

    if auth_state.get_untracked().is_admin() {
        children().into_any()
    } else {
        view! {
            <div class="page page--denied">
                <p>"Access denied. Admin privileges required."</p>
            </div>
        }
        .into_any()
    }
}
