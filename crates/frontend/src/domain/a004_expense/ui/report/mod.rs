//! Expenses of one staff member for a chosen month.
//!
//! Picking a staff member (dropdown, `?staff_id=` deep link, or the staff
//! list's "Expenses" button) loads that member's expenses; everything on
//! screen is rebuilt from the caches by `build_expense_view`.

use crate::domain::a001_staff::api::fetch_staff;
use crate::domain::a002_bank_account::api::fetch_bank_accounts;
use crate::domain::a003_expense_category::api::fetch_categories;
use crate::domain::a004_expense::api::{delete_expense, fetch_expenses};
use crate::domain::a004_expense::ui::details::{ExpenseDetails, ExpenseFormData};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::EXPENSES_TAB;
use crate::shared::api_utils::or_toast;
use crate::shared::components::{ExportBar, MonthSelector, StaffSelector, StatCard, StatTone};
use crate::shared::confirm::confirm_delete;
use crate::shared::date_utils::today_iso;
use crate::shared::icons::icon;
use crate::shared::modal_stack::{ModalOptions, ModalStackService};
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_REPORT};
use crate::shared::toast::use_toasts;
use crate::system::auth::context::use_current_user;
use contracts::domain::a001_staff::Staff;
use contracts::domain::a002_bank_account::BankAccount;
use contracts::domain::a003_expense_category::ExpenseCategory;
use contracts::domain::a004_expense::{
    build_expense_view, Expense, ExpenseForm, ExpenseFormVariant, ExpenseLookups, ExpenseSummary,
    PaymentMode,
};
use contracts::domain::common::RecordId;
use contracts::shared::money::format_rupees;
use contracts::shared::resource_cache::ResourceCache;
use contracts::shared::selection::{DependentCollection, LoadTicket};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn mode_badge(mode: PaymentMode) -> impl IntoView {
    let color = match mode {
        PaymentMode::Cash => BadgeColor::Success,
        PaymentMode::Upi => BadgeColor::Brand,
        PaymentMode::Bank => BadgeColor::Informative,
    };
    view! { <Badge appearance=BadgeAppearance::Tint color=color>{mode.label()}</Badge> }
}

#[component]
#[allow(non_snake_case)]
pub fn ExpenseReport() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let toasts = use_toasts();
    let user = use_current_user();
    let user_id = user.id;
    let variant = if user.is_admin() {
        ExpenseFormVariant::Admin
    } else {
        ExpenseFormVariant::Client
    };

    let staff = RwSignal::new(ResourceCache::<Staff>::new());
    let accounts = RwSignal::new(ResourceCache::<BankAccount>::new());
    let categories = RwSignal::new(ResourceCache::<ExpenseCategory>::new());
    let expenses = RwSignal::new(DependentCollection::<Expense>::new());
    let month = RwSignal::new(Option::<String>::None);

    let load_expenses = move |ticket: LoadTicket| async move {
        let result = fetch_expenses(user_id, ticket.parent_id).await;
        if !expenses.with_untracked(|c| c.is_current(&ticket)) {
            log::debug!("Dropping stale expenses of staff {}", ticket.parent_id);
            return;
        }
        match or_toast(result, "expenses", toasts) {
            Some(items) => expenses.update(|c| {
                c.apply(ticket, items);
            }),
            None => expenses.update(|c| {
                c.fail(ticket);
            }),
        }
    };

    let select_staff = move |id: Option<RecordId>| match id {
        Some(id) => {
            if let Some(ticket) = expenses.try_update(|c| c.select(id)) {
                spawn_local(load_expenses(ticket));
            }
        }
        None => expenses.update(|c| c.deselect()),
    };

    let reload_expenses = move || async move {
        if let Some(ticket) = expenses.try_update(|c| c.reload()).flatten() {
            load_expenses(ticket).await;
        }
    };

    // Lookups and the staff dropdown load together.
    spawn_local(async move {
        let (staff_res, account_res, category_res) = futures::join!(
            fetch_staff(user_id),
            fetch_bank_accounts(user_id),
            fetch_categories(user_id)
        );
        match or_toast(staff_res, "staff", toasts) {
            Some(items) => staff.update(|c| c.replace(items)),
            None => staff.update(|c| c.clear_failed()),
        }
        match or_toast(account_res, "bank accounts", toasts) {
            Some(items) => accounts.update(|c| c.replace(items)),
            None => accounts.update(|c| c.clear_failed()),
        }
        match or_toast(category_res, "categories", toasts) {
            Some(items) => categories.update(|c| c.replace(items)),
            None => categories.update(|c| c.clear_failed()),
        }
    });

    if let Some(staff_id) = ctx.take_deep_link_staff() {
        log::info!("Expense report opened for staff {}", staff_id);
        select_staff(Some(staff_id));
    }

    // "Expenses" clicked in the staff list while this tab was already open.
    Effect::new(move |_| {
        if let Some(staff_id) = ctx.take_staff_request(EXPENSES_TAB) {
            if expenses.with_untracked(|c| c.selected()) != Some(staff_id) {
                select_staff(Some(staff_id));
            }
        }
    });

    let report = Memo::new(move |_| {
        let month = month.get();
        let lookups = accounts.with(|a| categories.with(|c| ExpenseLookups::new(a.items(), c.items())));
        expenses.with(|c| {
            build_expense_view(c.state(), c.cache().is_loaded(), c.items(), month.as_deref(), &lookups)
        })
    });

    let selected_staff_name = move || {
        expenses
            .with(|c| c.selected())
            .and_then(|id| staff.with(|s| s.get(id).map(|m| m.name.clone())))
            .unwrap_or_default()
    };

    let open_form = move |form: ExpenseForm| {
        let data = ExpenseFormData {
            form,
            variant,
            staff_name: selected_staff_name(),
            accounts: accounts.with_untracked(|c| c.items().to_vec()),
            categories: categories.with_untracked(|c| c.items().to_vec()),
        };
        let busy = RwSignal::new(false);
        modal_stack.open(
            ModalOptions::sized("560px")
                .with_class("expense-details-modal")
                .locked_by(busy),
            move |handle| {
                let on_saved = Callback::new({
                    let handle = handle.clone();
                    move |_| {
                        let handle = handle.clone();
                        spawn_local(async move {
                            reload_expenses().await;
                            handle.close();
                        });
                    }
                });
                let on_cancel = Callback::new(move |_| handle.close());
                view! {
                    <ExpenseDetails data=data.clone() busy=busy on_saved=on_saved on_cancel=on_cancel />
                }
                .into_any()
            },
        );
    };

    let handle_add = move |_| {
        let staff_id = expenses.with_untracked(|c| c.selected());
        if staff_id.is_some() {
            open_form(ExpenseForm::new(staff_id, &today_iso()));
        }
    };

    let handle_edit = move |id: RecordId| {
        if let Some(expense) = expenses.with_untracked(|c| c.cache().get(id).cloned()) {
            open_form(ExpenseForm::from_expense(&expense));
        }
    };

    let handle_delete = move |id: RecordId, label: String| {
        spawn_local(async move {
            let message = format!("Delete the expense of {}? This cannot be undone.", label);
            if !confirm_delete(modal_stack, "Delete expense", message).await {
                return;
            }
            match delete_expense(user_id, id).await {
                Ok(()) => {
                    expenses.update(|c| {
                        c.remove(id);
                    });
                    toasts.success("Expense deleted");
                }
                Err(e) => {
                    log::error!("Deleting expense {} failed: {}", id, e);
                    toasts.error(format!("Could not delete expense. {}", e));
                }
            }
        });
    };

    let has_selection = Signal::derive(move || expenses.with(|c| c.selected().is_some()));
    // Without a selection the summary is zeroed, not blank.
    let figure = move |pick: fn(&ExpenseSummary) -> String| {
        Signal::derive(move || Some(report.with(|v| pick(&v.summary))))
    };

    let export_table = Callback::new(move |_| {
        let name = selected_staff_name();
        let month = month.get_untracked();
        report.with_untracked(|v| v.export_table(&name, month.as_deref()))
    });

    view! {
        <PageFrame page_id="a004_expense--report" category=PAGE_CAT_REPORT>
            <PageHeader title="Staff Expenses">
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || !has_selection.get())
                    on_click=handle_add
                >
                    {icon("plus")}
                    " Add expense"
                </Button>
            </PageHeader>

            <div class="report__filters">
                <StaffSelector
                    staff=Signal::derive(move || staff.with(|c| c.items().to_vec()))
                    selected=Signal::derive(move || expenses.with(|c| c.selected()))
                    on_change=Callback::new(select_staff)
                />
                <MonthSelector month=month />
                <ExportBar
                    table=export_table
                    disabled=Signal::derive(move || report.with(|v| v.rows.is_empty()))
                />
            </div>

            <div class="stat-grid">
                <StatCard
                    label="Total"
                    icon_name="wallet"
                    value=figure(|s| format_rupees(s.total))
                    tone=StatTone::Bad
                    subtitle=figure(|s| format!("{} entries", s.count))
                />
                <StatCard label="Cash" icon_name="wallet" value=figure(|s| format_rupees(s.cash_total)) />
                <StatCard label="UPI" icon_name="bank" value=figure(|s| format_rupees(s.upi_total)) />
                <StatCard label="Bank" icon_name="bank" value=figure(|s| format_rupees(s.bank_total)) />
            </div>

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell min_width=100.0>"Date"</TableHeaderCell>
                        <TableHeaderCell min_width=110.0>"Amount"</TableHeaderCell>
                        <TableHeaderCell min_width=90.0>"Mode"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=160.0>"Account"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=120.0>"Category"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=180.0>"Note"</TableHeaderCell>
                        <TableHeaderCell min_width=90.0>"Actions"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || report.with(|v| v.rows.clone()).into_iter().map(|row| {
                        let id = row.id;
                        let label = format!("{} on {}", format_rupees(row.amount), row.date);
                        view! {
                            <TableRow>
                                <TableCell><TableCellLayout>{row.date.clone()}</TableCellLayout></TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        <span class="table__amount">{format_rupees(row.amount)}</span>
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell><TableCellLayout>{mode_badge(row.payment_mode)}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{row.account.clone()}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{row.category.clone()}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{row.note.clone()}</TableCellLayout></TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        <Space>
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| handle_edit(id)
                                            >
                                                {icon("edit")}
                                            </Button>
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| handle_delete(id, label.clone())
                                            >
                                                {icon("trash")}
                                            </Button>
                                        </Space>
                                    </TableCellLayout>
                                </TableCell>
                            </TableRow>
                        }
                    }).collect_view()}
                </TableBody>
            </Table>

            {move || report.with(|v| v.empty_message.clone())
                .map(|msg| view! { <div class="table__empty">{msg}</div> })}
        </PageFrame>
    }
}
