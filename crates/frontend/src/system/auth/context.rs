use contracts::system::auth::User;
use leptos::prelude::*;

use super::storage;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
}

impl AuthState {
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().map(User::is_admin).unwrap_or(false)
    }
}

/// Auth context provider component
///
/// The stored user is restored synchronously so the first render already
/// knows whether to show the login page.
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let restored = storage::restore_user();
    if let Some(user) = &restored {
        log::info!("Restored session for user {}", user.id);
    }
    let (auth_state, set_auth_state) = signal(AuthState { user: restored });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// The logged-in user. Pages are only mounted behind the auth gate.
pub fn use_current_user() -> User {
    let (auth_state, _) = use_auth();
    auth_state
        .get_untracked()
        .user
        .expect("page rendered without a logged-in user")
}

pub fn sign_in(user: User, remember: bool) {
    storage::save_user(&user, remember);
    let (_, set_auth_state) = use_auth();
    set_auth_state.set(AuthState { user: Some(user) });
}

pub fn sign_out() {
    storage::clear_session();
    let (_, set_auth_state) = use_auth();
    set_auth_state.set(AuthState::default());
}
