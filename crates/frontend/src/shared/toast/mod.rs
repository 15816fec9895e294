//! Transient notifications (save/delete outcomes, load failures).

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use thaw::*;
use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;

use crate::shared::config::config;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    fn intent(&self) -> MessageBarIntent {
        match self {
            ToastKind::Success => MessageBarIntent::Success,
            ToastKind::Error => MessageBarIntent::Error,
            ToastKind::Info => MessageBarIntent::Info,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct ToastService {
    toasts: RwSignal<Vec<Toast>>,
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastService {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
        }
    }

    pub fn push(&self, kind: ToastKind, message: impl Into<String>) {
        let toast = Toast {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
        };
        let id = toast.id;
        self.toasts.update(|t| t.push(toast));

        let svc = *self;
        spawn_local(async move {
            TimeoutFuture::new(config().ui.toast_ms).await;
            svc.dismiss(id);
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastKind::Info, message);
    }

    pub fn dismiss(&self, id: Uuid) {
        self.toasts.update(|t| t.retain(|x| x.id != id));
    }
}

pub fn use_toasts() -> ToastService {
    use_context::<ToastService>().expect("ToastService not found in context")
}

/// Bottom-right stack of notifications. Mounted once at the root.
#[component]
pub fn ToastHost() -> impl IntoView {
    let svc = use_toasts();

    view! {
        <div class="toast-host">
            <For
                each=move || svc.toasts.get()
                key=|t| t.id
                children=move |t| {
                    let id = t.id;
                    view! {
                        <div class="toast-host__item" on:click=move |_| svc.dismiss(id)>
                            <MessageBar intent=t.kind.intent()>
                                <MessageBarBody>{t.message}</MessageBarBody>
                            </MessageBar>
                        </div>
                    }
                }
            />
        </div>
    }
}
