use crate::domain::a002_bank_account::api::save_bank_account;
use crate::shared::components::FormSelect;
use crate::shared::confirm::{claim_busy, confirm_save};
use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::toast::use_toasts;
use crate::system::auth::context::use_current_user;
use contracts::domain::a002_bank_account::{AccountType, BankAccountForm};
use contracts::domain::common::RecordId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn type_options() -> Vec<(String, String)> {
    AccountType::ALL
        .iter()
        .map(|t| (t.as_str().to_string(), t.label().to_string()))
        .collect()
}

/// Add / edit form for a bank account.
#[component]
pub fn BankAccountDetails(
    form: BankAccountForm,
    busy: RwSignal<bool>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let user_id: RecordId = use_current_user().id;
    let toasts = use_toasts();
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");

    let id = form.id;
    let account_name = RwSignal::new(form.account_name);
    let account_number = RwSignal::new(form.account_number);
    let account_type = RwSignal::new(form.account_type);
    let error = RwSignal::new(Option::<String>::None);

    let handle_save = move |_| {
        let form = BankAccountForm {
            id,
            account_name: account_name.get_untracked(),
            account_number: account_number.get_untracked(),
            account_type: account_type.get_untracked(),
        };
        let dto = match form.validate(user_id) {
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
            if !confirm_save(modal_stack, format!("Save account \"{}\"?", dto.account_name)).await {
                busy.set(false);
                return;
            }
            let result = save_bank_account(&dto).await;
            busy.set(false);
            match result {
                Ok(()) => {
                    toasts.success(format!("Account \"{}\" saved", dto.account_name));
                    on_saved.run(());
                }
                Err(e) => {
                    log::error!("Saving bank account failed: {}", e);
                    error.set(Some(e));
                }
            }
        });
    };

    view! {
        <div class="details-form">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h2 class="details-form__title">
                    {if id.is_some() { "Edit account" } else { "New account" }}
                </h2>
                <Space>
                    <Button appearance=ButtonAppearance::Primary on_click=handle_save disabled=busy>
                        {move || if busy.get() { "Saving..." } else { "Save" }}
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                        {icon("x")}
                        " Cancel"
                    </Button>
                </Space>
            </Flex>

            {move || error.get().map(|e| view! {
                <MessageBar intent=MessageBarIntent::Error>
                    <MessageBarBody>{e}</MessageBarBody>
                </MessageBar>
            })}

            <FormSelect
                label="Type"
                value=Signal::derive(move || account_type.get().as_str().to_string())
                on_change=Callback::new(move |v: String| account_type.set(AccountType::from_str_lossy(&v)))
                options=type_options()
                required=true
            />
            <div class="form__group">
                <label class="form__label">"Account name" <span class="form__required">"*"</span></label>
                <Input value=account_name placeholder="e.g. HDFC Current" />
            </div>
            <div class="form__group">
                <label class="form__label">
                    "Account number / UPI id"
                    {move || (account_type.get() == AccountType::Bank)
                        .then(|| view! { <span class="form__required">"*"</span> })}
                </label>
                <Input value=account_number />
            </div>
        </div>
    }
}
