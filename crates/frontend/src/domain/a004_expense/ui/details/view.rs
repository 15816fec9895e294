use crate::domain::a004_expense::api::save_expense;
use crate::shared::components::{DateInput, FormSelect};
use crate::shared::config::config;
use crate::shared::confirm::{claim_busy, confirm_save};
use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::toast::use_toasts;
use crate::system::auth::context::use_current_user;
use contracts::domain::a002_bank_account::{AccountType, BankAccount};
use contracts::domain::a003_expense_category::ExpenseCategory;
use contracts::domain::a004_expense::{ExpenseForm, ExpenseFormVariant, PaymentMode};
use contracts::shared::money::format_rupees;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Everything the expense modal needs, captured when it opens.
#[derive(Clone, Debug)]
pub struct ExpenseFormData {
    pub form: ExpenseForm,
    pub variant: ExpenseFormVariant,
    pub staff_name: String,
    pub accounts: Vec<BankAccount>,
    pub categories: Vec<ExpenseCategory>,
}

fn id_value(id: Option<i64>) -> String {
    id.map(|i| i.to_string()).unwrap_or_default()
}

#[component]
pub fn ExpenseDetails(
    data: ExpenseFormData,
    busy: RwSignal<bool>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let user_id = use_current_user().id;
    let toasts = use_toasts();
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let ExpenseFormData {
        form,
        variant,
        staff_name,
        accounts,
        categories,
    } = data;

    let is_edit = form.is_edit();
    let amount = RwSignal::new(form.amount.clone());
    let expense_date = RwSignal::new(form.expense_date.clone());
    let note = RwSignal::new(form.note.clone());
    let payment = RwSignal::new(form.payment_mode().as_str().to_string());
    let form = RwSignal::new(form);
    let error = RwSignal::new(Option::<String>::None);

    // RadioGroup -> form. Switching to cash clears the bank account.
    Effect::new(move |prev: Option<String>| {
        let current = payment.get();
        if prev.is_some() {
            form.update(|f| f.set_payment_mode(PaymentMode::from_str_lossy(&current)));
        }
        current
    });

    let bank_enabled = Signal::derive(move || form.with(|f| f.bank_selector_enabled()));
    let bank_value = Signal::derive(move || form.with(|f| id_value(f.bank_account_id())));
    let category_value = Signal::derive(move || form.with(|f| id_value(f.category_id)));

    let account_options: Vec<(String, String)> = accounts
        .iter()
        .filter(|a| a.account_type != AccountType::Cash)
        .map(|a| (a.id.to_string(), a.display_name()))
        .collect();
    let category_options: Vec<(String, String)> = categories
        .iter()
        .map(|c| (c.id.to_string(), c.name.clone()))
        .collect();
    let category_required = variant == ExpenseFormVariant::Client;

    let handle_save = move |_| {
        let mut draft = form.get_untracked();
        draft.amount = amount.get_untracked();
        draft.expense_date = expense_date.get_untracked();
        draft.note = note.get_untracked();

        // Rejected drafts never reach the network.
        let dto = match draft.validate(user_id, variant, config().api.date_format) {
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
            let question = format!(
                "Save expense of {} dated {}?",
                format_rupees(dto.amount),
                dto.expense_date
            );
            if !confirm_save(modal_stack, question).await {
                busy.set(false);
                return;
            }
            let result = save_expense(&dto).await;
            busy.set(false);
            match result {
                Ok(()) => {
                    toasts.success(format!("Expense of {} saved", format_rupees(dto.amount)));
                    on_saved.run(());
                }
                Err(e) => {
                    log::error!("Saving expense failed: {}", e);
                    error.set(Some(e));
                }
            }
        });
    };

    view! {
        <div class="details-form">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <div>
                    <h2 class="details-form__title">
                        {if is_edit { "Edit expense" } else { "Add expense" }}
                    </h2>
                    <div class="details-form__subtitle">{staff_name}</div>
                </div>
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

            <div class="form__row">
                <div class="form__group">
                    <label class="form__label">"Amount (₹)" <span class="form__required">"*"</span></label>
                    <Input value=amount placeholder="0.00" />
                </div>
                <DateInput label="Date" value=expense_date required=true />
            </div>

            <div class="form__group">
                <label class="form__label">"Payment mode"</label>
                <RadioGroup value=payment>
                    {PaymentMode::ALL
                        .iter()
                        .map(|m| view! { <Radio value=m.as_str() label=m.label() /> })
                        .collect_view()}
                </RadioGroup>
            </div>

            <FormSelect
                label="Bank account"
                value=bank_value
                on_change=Callback::new(move |v: String| {
                    form.update(|f| f.set_bank_account(v.parse().ok()))
                })
                options=account_options
                placeholder="-- Select account --"
                disabled=Signal::derive(move || !bank_enabled.get())
            />

            <FormSelect
                label="Category"
                value=category_value
                on_change=Callback::new(move |v: String| form.update(|f| f.category_id = v.parse().ok()))
                options=category_options
                placeholder=if category_required { "-- Select category --" } else { "-- None --" }
                required=category_required
            />

            <div class="form__group">
                <label class="form__label">"Note"</label>
                <Textarea value=note placeholder="What was it for?" />
            </div>
        </div>
    }
}
