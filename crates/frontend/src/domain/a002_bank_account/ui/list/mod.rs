use crate::domain::a002_bank_account::api::{delete_bank_account, fetch_bank_accounts};
use crate::domain::a002_bank_account::ui::details::BankAccountDetails;
use crate::shared::api_utils::or_toast;
use crate::shared::confirm::confirm_delete;
use crate::shared::icons::icon;
use crate::shared::modal_stack::{ModalOptions, ModalStackService};
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_LIST};
use crate::shared::toast::use_toasts;
use crate::system::auth::context::use_current_user;
use contracts::domain::a002_bank_account::{BankAccount, BankAccountForm};
use contracts::shared::resource_cache::ResourceCache;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn BankAccountList() -> impl IntoView {
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let toasts = use_toasts();
    let user_id = use_current_user().id;
    let cache = RwSignal::new(ResourceCache::<BankAccount>::new());

    let load = move || async move {
        let result = fetch_bank_accounts(user_id).await;
        match or_toast(result, "bank accounts", toasts) {
            Some(items) => cache.update(|c| c.replace(items)),
            None => cache.update(|c| c.clear_failed()),
        }
    };

    let open_form = move |form: BankAccountForm| {
        let busy = RwSignal::new(false);
        modal_stack.open(
            ModalOptions::sized("480px").locked_by(busy),
            move |handle| {
                let on_saved = Callback::new({
                    let handle = handle.clone();
                    move |_| {
                        let handle = handle.clone();
                        spawn_local(async move {
                            load().await;
                            handle.close();
                        });
                    }
                });
                let on_cancel = Callback::new(move |_| handle.close());
                view! {
                    <BankAccountDetails form=form.clone() busy=busy on_saved=on_saved on_cancel=on_cancel />
                }
                .into_any()
            },
        );
    };

    let handle_delete = move |account: BankAccount| {
        spawn_local(async move {
            let name = account.display_name();
            if !confirm_delete(modal_stack, "Delete account", format!("Delete \"{}\"?", name)).await {
                return;
            }
            match delete_bank_account(user_id, account.id).await {
                Ok(()) => {
                    cache.update(|c| {
                        c.remove(account.id);
                    });
                    toasts.success(format!("Deleted \"{}\"", name));
                }
                Err(e) => {
                    log::error!("Deleting bank account {} failed: {}", account.id, e);
                    toasts.error(format!("Could not delete account. {}", e));
                }
            }
        });
    };

    spawn_local(load());

    view! {
        <PageFrame page_id="a002_bank_account--list" category=PAGE_CAT_LIST>
            <PageHeader title="Bank Accounts" subtitle="Accounts that UPI and bank payments are drawn from">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| open_form(BankAccountForm::default())
                >
                    {icon("plus")}
                    " Add account"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| spawn_local(load())>
                    {icon("refresh")}
                    " Refresh"
                </Button>
            </PageHeader>

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell resizable=true min_width=200.0>"Account"</TableHeaderCell>
                        <TableHeaderCell min_width=80.0>"Type"</TableHeaderCell>
                        <TableHeaderCell min_width=160.0>"Number"</TableHeaderCell>
                        <TableHeaderCell min_width=100.0>"Actions"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || cache.with(|c| c.items().to_vec()).into_iter().map(|account| {
                        let for_edit = account.clone();
                        let for_delete = account.clone();
                        let name = account.name();
                        let account_type = account.account_type.label();
                        let account_number = account.account_number.clone().unwrap_or_else(|| "-".into());
                        view! {
                            <TableRow>
                                <TableCell>
                                    <TableCellLayout>
                                        <a
                                            href="#"
                                            class="table__link"
                                            on:click=move |e| {
                                                e.prevent_default();
                                                open_form(BankAccountForm::from_account(&for_edit));
                                            }
                                        >
                                            {name}
                                        </a>
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>{account_type}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>{account_number}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        <Button
                                            size=ButtonSize::Small
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| handle_delete(for_delete.clone())
                                        >
                                            {icon("trash")}
                                        </Button>
                                    </TableCellLayout>
                                </TableCell>
                            </TableRow>
                        }
                    }).collect_view()}
                </TableBody>
            </Table>

            {move || cache.with(|c| c.is_loaded() && c.is_empty())
                .then(|| view! { <div class="table__empty">"No bank accounts yet"</div> })}
        </PageFrame>
    }
}
