use super::view_model::StaffDetailsVm;
use crate::domain::a001_staff::api::save_staff;
use crate::shared::confirm::{claim_busy, confirm_save};
use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::toast::use_toasts;
use crate::system::auth::context::use_current_user;
use contracts::domain::a001_staff::{StaffForm, StaffStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Add / edit form for one staff member.
#[component]
pub fn StaffDetails(
    form: StaffForm,
    busy: RwSignal<bool>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = StaffDetailsVm::new(form, busy);
    let user = use_current_user();
    let toasts = use_toasts();
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");

    let handle_save = move |_| {
        let dto = match vm.to_form().validate(user.id, user.shop_id) {
            Ok(dto) => dto,
            Err(e) => {
                vm.error.set(Some(e.to_string()));
                return;
            }
        };
        vm.error.set(None);
        if !claim_busy(vm.busy) {
            return;
        }
        spawn_local(async move {
            if !confirm_save(modal_stack, format!("Save staff member \"{}\"?", dto.name)).await {
                vm.busy.set(false);
                return;
            }
            let result = save_staff(&dto).await;
            vm.busy.set(false);
            match result {
                Ok(()) => {
                    toasts.success(format!("Staff member \"{}\" saved", dto.name));
                    on_saved.run(());
                }
                Err(e) => {
                    log::error!("Saving staff failed: {}", e);
                    vm.error.set(Some(e));
                }
            }
        });
    };

    view! {
        <div class="details-form">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h2 class="details-form__title">
                    {if vm.is_edit() { "Edit staff member" } else { "New staff member" }}
                </h2>
                <Space>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=handle_save
                        disabled=vm.busy
                    >
                        {move || if vm.busy.get() { "Saving..." } else { "Save" }}
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                        {icon("x")}
                        " Cancel"
                    </Button>
                </Space>
            </Flex>

            {move || vm.error.get().map(|e| view! {
                <MessageBar intent=MessageBarIntent::Error>
                    <MessageBarBody>{e}</MessageBarBody>
                </MessageBar>
            })}

            <div class="form__group">
                <label class="form__label">"Name" <span class="form__required">"*"</span></label>
                <Input value=vm.name placeholder="Full name" />
            </div>
            <div class="form__group">
                <label class="form__label">"Mobile"</label>
                <Input value=vm.mobile placeholder="10-digit mobile number" />
            </div>
            <div class="form__group">
                <label class="form__label">"Monthly salary"</label>
                <Input value=vm.salary placeholder="0.00" />
            </div>
            <div class="form__group">
                <label class="form__label">"Status"</label>
                <RadioGroup value=vm.status>
                    <Radio value=StaffStatus::Active.as_str() label=StaffStatus::Active.label() />
                    <Radio value=StaffStatus::Inactive.as_str() label=StaffStatus::Inactive.label() />
                </RadioGroup>
            </div>
        </div>
    }
}
