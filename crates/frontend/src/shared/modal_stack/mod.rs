use crate::shared::modal_frame::ModalFrame;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use std::sync::Arc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::KeyboardEvent;

type ModalBuilder = Arc<dyn Fn(ModalHandle) -> AnyView + Send + Sync>;

/// Surface options of one modal.
#[derive(Clone, Debug, Default)]
pub struct ModalOptions {
    pub style: Option<String>,
    pub class: Option<String>,
    /// Overlay click and Escape are ignored while this is set
    /// (used by forms with a request in flight).
    pub locked: Option<RwSignal<bool>>,
}

impl ModalOptions {
    pub fn sized(max_width: &str) -> Self {
        Self {
            style: Some(format!("max-width: {max_width}; width: 95vw;")),
            ..Default::default()
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    pub fn locked_by(mut self, busy: RwSignal<bool>) -> Self {
        self.locked = Some(busy);
        self
    }

    fn can_dismiss(&self) -> bool {
        self.locked.map(|busy| !busy.get_untracked()).unwrap_or(true)
    }
}

#[derive(Clone)]
struct ModalEntry {
    id: u64,
    builder: ModalBuilder,
    options: ModalOptions,
}

/// Passed to the modal content so it can close itself.
#[derive(Clone)]
pub struct ModalHandle {
    id: u64,
    svc: ModalStackService,
}

impl ModalHandle {
    pub fn close(&self) {
        self.svc.close_deferred(self.id);
    }
}

/// Stack of open modals (form over list, confirm over form).
///
/// Escape closes only the topmost modal (handled by `ModalHost`).
#[derive(Clone, Copy)]
pub struct ModalStackService {
    stack: RwSignal<Vec<ModalEntry>>,
    next_id: StoredValue<u64>,
}

impl Default for ModalStackService {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalStackService {
    pub fn new() -> Self {
        Self {
            stack: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(1),
        }
    }

    fn defer(&self, f: impl FnOnce(ModalStackService) + 'static) {
        let svc = *self;
        spawn_local(async move {
            // Removing a modal during its own click dispatch drops the running handler.
            TimeoutFuture::new(0).await;
            f(svc);
        });
    }

    pub fn is_open(&self) -> bool {
        !self.stack.with(|s| s.is_empty())
    }

    /// Open a modal; `builder` receives a handle to close it.
    pub fn open<F>(&self, options: ModalOptions, builder: F) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
    {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);

        let builder: ModalBuilder = Arc::new(builder);
        self.stack.update(|s| {
            s.push(ModalEntry {
                id,
                builder,
                options,
            })
        });

        ModalHandle { id, svc: *self }
    }

    pub fn close(&self, id: u64) {
        self.stack.update(|s| s.retain(|e| e.id != id));
    }

    pub fn close_deferred(&self, id: u64) {
        self.defer(move |svc| svc.close(id));
    }

    /// Escape: close the topmost modal unless it is locked.
    fn dismiss_top(&self) {
        let top = self
            .stack
            .with_untracked(|s| s.last().map(|e| (e.id, e.options.can_dismiss())));
        if let Some((id, true)) = top {
            self.close_deferred(id);
        }
    }

    /// Logout: drop every open modal.
    pub fn clear(&self) {
        self.stack.set(Vec::new());
    }
}

/// Renders the modal stack at the application root.
///
/// Must be mounted exactly once.
#[component]
pub fn ModalHost() -> impl IntoView {
    let svc = use_context::<ModalStackService>()
        .expect("ModalStackService not provided in context (provide it in app root)");

    Effect::new(move |_| {
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            if let Some(keyboard_event) = event.dyn_ref::<KeyboardEvent>() {
                if keyboard_event.key() == "Escape" && svc.is_open() {
                    svc.dismiss_top();
                }
            }
        }) as Box<dyn FnMut(_)>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            // Lives as long as the app.
            closure.forget();
        }
    });

    view! {
        <Show when=move || svc.is_open()>
            <For
                each={move || svc.stack.get().into_iter().enumerate().collect::<Vec<_>>()}
                key=|(_, entry)| entry.id
                children=move |(idx, entry)| {
                    let z_index = 1000 + idx as i32;
                    let on_close = {
                        let id = entry.id;
                        let options = entry.options.clone();
                        Callback::new(move |_| {
                            if options.can_dismiss() {
                                svc.close_deferred(id);
                            }
                        })
                    };
                    let content = (entry.builder)(ModalHandle { id: entry.id, svc });

                    view! {
                        <ModalFrame
                            z_index=z_index
                            on_close=on_close
                            modal_style=entry.options.style.clone().unwrap_or_default()
                            modal_class=entry.options.class.clone().unwrap_or_default()
                        >
                            {content}
                        </ModalFrame>
                    }
                }
            />
        </Show>
    }
}
