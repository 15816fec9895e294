//! Blocking confirmation prompts as awaitable modals.

use futures::channel::oneshot;
use leptos::prelude::*;
use std::sync::{Arc, Mutex};
use thaw::*;

use crate::shared::modal_stack::{ModalOptions, ModalStackService};

/// Ask the user to confirm a delete. Resolves to `false` on cancel, Escape or overlay click.
///
/// ```ignore
/// if confirm_delete(modal_stack, "Delete expense", "Delete this expense?").await { ... }
/// ```
pub async fn confirm_delete(
    modal_stack: ModalStackService,
    title: impl Into<String>,
    message: impl Into<String>,
) -> bool {
    confirm_action(modal_stack, title, message, "Delete").await
}

/// Last check before a form is sent to the server.
pub async fn confirm_save(modal_stack: ModalStackService, message: impl Into<String>) -> bool {
    confirm_action(modal_stack, "Save changes", message, "Save").await
}

/// Marks a form busy from the first Save click until the request settles, so
/// a second click cannot open another confirmation. `false` if already busy.
pub fn claim_busy(busy: RwSignal<bool>) -> bool {
    if busy.get_untracked() {
        return false;
    }
    busy.set(true);
    true
}

async fn confirm_action(
    modal_stack: ModalStackService,
    title: impl Into<String>,
    message: impl Into<String>,
    confirm_label: &'static str,
) -> bool {
    let (tx, rx) = oneshot::channel::<bool>();
    let tx = Arc::new(Mutex::new(Some(tx)));
    let title = title.into();
    let message = message.into();

    modal_stack.open(
        ModalOptions::sized("420px").with_class("confirm-modal"),
        move |handle| {
            let answer = {
                let tx = tx.clone();
                move |value: bool| {
                    if let Ok(mut guard) = tx.lock() {
                        if let Some(sender) = guard.take() {
                            let _ = sender.send(value);
                        }
                    }
                    handle.close();
                }
            };
            let on_cancel = answer.clone();
            let on_confirm = answer;

            view! {
                <div class="confirm-modal__body">
                    <h3 class="confirm-modal__title">{title.clone()}</h3>
                    <p>{message.clone()}</p>
                    <Flex justify=FlexJustify::End>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel(false)>
                            "Cancel"
                        </Button>
                        <Button appearance=ButtonAppearance::Primary on_click=move |_| on_confirm(true)>
                            {confirm_label}
                        </Button>
                    </Flex>
                </div>
            }
            .into_any()
        },
    );

    // Sender dropped with the modal means it was dismissed.
    rx.await.unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_busy_rejects_second_click() {
        let busy = RwSignal::new(false);
        assert!(claim_busy(busy));
        assert!(busy.get_untracked());
        assert!(!claim_busy(busy));

        // Cancelled confirmation releases the form.
        busy.set(false);
        assert!(claim_busy(busy));
    }
}
