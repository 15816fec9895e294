use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Overlay + positioned surface. Content renders its own header and actions.
#[component]
pub fn ModalFrame(
    on_close: Callback<()>,
    #[prop(optional)] z_index: Option<i32>,
    #[prop(optional)] modal_class: Option<String>,
    #[prop(optional)] modal_style: Option<String>,
    children: Children,
) -> impl IntoView {
    let z_index = z_index.unwrap_or(1000);
    let pressed_on_overlay = RwSignal::new(false);

    let on_overlay = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    // Press and release must both land on the overlay, so a text selection
    // dragged out of a form does not close it.
    let handle_mouse_down = move |ev: ev::MouseEvent| {
        pressed_on_overlay.set(on_overlay(&ev));
    };

    let handle_click = move |ev: ev::MouseEvent| {
        let should_close = pressed_on_overlay.get_untracked() && on_overlay(&ev);
        pressed_on_overlay.set(false);
        if should_close {
            spawn_local(async move {
                TimeoutFuture::new(0).await;
                on_close.run(());
            });
        }
    };

    let surface_class = match modal_class.filter(|c| !c.is_empty()) {
        Some(cls) => format!("modal {cls}"),
        None => "modal".to_string(),
    };
    let surface_style = match modal_style.filter(|s| !s.is_empty()) {
        Some(extra) => format!("position: relative; {extra}"),
        None => "position: relative;".to_string(),
    };

    view! {
        <div
            class="modal-overlay"
            style=format!("z-index: {z_index};")
            on:mousedown=handle_mouse_down
            on:click=handle_click
        >
            <div class=surface_class style=surface_style on:click=|e: ev::MouseEvent| e.stop_propagation()>
                {children()}
            </div>
        </div>
    }
}
