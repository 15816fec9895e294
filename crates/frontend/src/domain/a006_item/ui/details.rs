use crate::domain::a006_item::api::save_item;
use crate::shared::confirm::{claim_busy, confirm_save};
use crate::shared::modal_stack::ModalStackService;
use crate::shared::toast::use_toasts;
use crate::system::auth::context::use_current_user;
use contracts::domain::a006_item::ItemForm;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn ItemDetails(
    form: ItemForm,
    busy: RwSignal<bool>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let user = use_current_user();
    let toasts = use_toasts();
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");

    let id = form.id;
    let name = RwSignal::new(form.name);
    let unit = RwSignal::new(form.unit);
    let price = RwSignal::new(form.price);
    let stock = RwSignal::new(form.stock);
    let error = RwSignal::new(Option::<String>::None);

    let handle_save = move |_| {
        let draft = ItemForm {
            id,
            name: name.get_untracked(),
            unit: unit.get_untracked(),
            price: price.get_untracked(),
            stock: stock.get_untracked(),
        };
        let dto = match draft.validate(user.id, user.shop_id) {
            Ok(dto) => dto,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        error.set(None);
        if !claim_busy(busy) {
            return;
        }
        spawn_local(async move {
            if !confirm_save(modal_stack, format!("Save item \"{}\"?", dto.name)).await {
                busy.set(false);
                return;
            }
            let result = save_item(&dto).await;
            busy.set(false);
            match result {
                Ok(()) => {
                    toasts.success(format!("Item \"{}\" saved", dto.name));
                    on_saved.run(());
                }
                Err(e) => {
                    log::error!("Saving item failed: {}", e);
                    error.set(Some(e));
                }
            }
        });
    };

    view! {
        <div class="details-form">
            <h2 class="details-form__title">
                {if id.is_some() { "Edit item" } else { "New item" }}
            </h2>

            {move || error.get().map(|e| view! {
                <MessageBar intent=MessageBarIntent::Error>
                    <MessageBarBody>{e}</MessageBarBody>
                </MessageBar>
            })}

            <div class="form__group">
                <label class="form__label">"Name" <span class="form__required">"*"</span></label>
                <Input value=name />
            </div>
            <div class="form__row">
                <div class="form__group">
                    <label class="form__label">"Unit"</label>
                    <Input value=unit placeholder="kg, pcs, plate" />
                </div>
                <div class="form__group">
                    <label class="form__label">"Price (₹)" <span class="form__required">"*"</span></label>
                    <Input value=price placeholder="0.00" />
                </div>
                <div class="form__group">
                    <label class="form__label">"Stock"</label>
                    <Input value=stock placeholder="0" />
                </div>
            </div>

            <Flex justify=FlexJustify::End>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    "Cancel"
                </Button>
                <Button appearance=ButtonAppearance::Primary on_click=handle_save disabled=busy>
                    {move || if busy.get() { "Saving..." } else { "Save" }}
                </Button>
            </Flex>
        </div>
    }
}
