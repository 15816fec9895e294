use crate::domain::a001_staff::api::{delete_staff, fetch_staff, patch_staff_status};
use crate::domain::a001_staff::ui::details::StaffDetails;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::{ATTENDANCE_TAB, EXPENSES_TAB};
use crate::shared::api_utils::or_toast;
use crate::shared::confirm::{confirm_delete, confirm_save};
use crate::shared::icons::icon;
use crate::shared::modal_stack::{ModalOptions, ModalStackService};
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_LIST};
use crate::shared::toast::use_toasts;
use crate::system::auth::context::use_current_user;
use contracts::domain::a001_staff::{Staff, StaffForm, StaffStatusPatch};
use contracts::shared::money::format_rupees;
use contracts::shared::resource_cache::ResourceCache;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn StaffList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let toasts = use_toasts();
    let user_id = use_current_user().id;
    let cache = RwSignal::new(ResourceCache::<Staff>::new());

    let load = move || async move {
        let result = fetch_staff(user_id).await;
        match or_toast(result, "staff", toasts) {
            Some(items) => cache.update(|c| c.replace(items)),
            None => cache.update(|c| c.clear_failed()),
        }
    };

    let open_form = move |form: StaffForm| {
        let busy = RwSignal::new(false);
        modal_stack.open(
            ModalOptions::sized("520px")
                .with_class("staff-details-modal")
                .locked_by(busy),
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
                    <StaffDetails
                        form=form.clone()
                        busy=busy
                        on_saved=on_saved
                        on_cancel=on_cancel
                    />
                }
                .into_any()
            },
        );
    };

    let handle_edit = move |id| {
        if let Some(staff) = cache.with_untracked(|c| c.get(id).cloned()) {
            open_form(StaffForm::from_staff(&staff));
        }
    };

    let handle_toggle_status = move |staff: Staff| {
        let patch = StaffStatusPatch::toggled(&staff, user_id);
        spawn_local(async move {
            if !confirm_save(modal_stack, patch.prompt(&staff.name)).await {
                return;
            }
            match patch_staff_status(&patch).await {
                Ok(()) => {
                    toasts.success(format!(
                        "{} is now {}",
                        staff.name,
                        patch.status.label().to_lowercase()
                    ));
                    load().await;
                }
                Err(e) => {
                    log::error!("Status change for staff {} failed: {}", staff.id, e);
                    toasts.error(format!("Could not change status. {}", e));
                }
            }
        });
    };

    let handle_delete = move |staff: Staff| {
        spawn_local(async move {
            let confirmed = confirm_delete(
                modal_stack,
                "Delete staff member",
                format!("Delete \"{}\"? This cannot be undone.", staff.name),
            )
            .await;
            if !confirmed {
                return;
            }
            match delete_staff(user_id, staff.id).await {
                Ok(()) => {
                    cache.update(|c| {
                        c.remove(staff.id);
                    });
                    toasts.success(format!("Deleted \"{}\"", staff.name));
                }
                Err(e) => {
                    log::error!("Deleting staff {} failed: {}", staff.id, e);
                    toasts.error(format!("Could not delete staff member. {}", e));
                }
            }
        });
    };

    spawn_local(load());

    let subtitle = move || {
        cache.with(|c| {
            let active = c.items().iter().filter(|s| s.is_active()).count();
            format!("{} members, {} active", c.len(), active)
        })
    };

    view! {
        <PageFrame page_id="a001_staff--list" category=PAGE_CAT_LIST>
            <PageHeader title="Staff">
                <span class="page__counter">{subtitle}</span>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| open_form(StaffForm::default())
                >
                    {icon("plus")}
                    " Add staff"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| spawn_local(load())>
                    {icon("refresh")}
                    " Refresh"
                </Button>
            </PageHeader>

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell resizable=true min_width=180.0>"Name"</TableHeaderCell>
                        <TableHeaderCell min_width=120.0>"Mobile"</TableHeaderCell>
                        <TableHeaderCell min_width=110.0>"Salary"</TableHeaderCell>
                        <TableHeaderCell min_width=90.0>"Status"</TableHeaderCell>
                        <TableHeaderCell min_width=320.0>"Actions"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || cache.with(|c| c.items().to_vec()).into_iter().map(|staff| {
                        let id = staff.id;
                        let for_toggle = staff.clone();
                        let for_delete = staff.clone();
                        let active = staff.is_active();
                        view! {
                            <TableRow>
                                <TableCell>
                                    <TableCellLayout>
                                        <a
                                            href="#"
                                            class="table__link"
                                            on:click=move |e| {
                                                e.prevent_default();
                                                handle_edit(id);
                                            }
                                        >
                                            {staff.name.clone()}
                                        </a>
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>{staff.mobile.clone().unwrap_or_else(|| "-".into())}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>{format_rupees(staff.salary)}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        {if active {
                                            view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>"Active"</Badge> }.into_any()
                                        } else {
                                            view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Subtle>"Inactive"</Badge> }.into_any()
                                        }}
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        <Space>
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| ctx.open_staff_report(EXPENSES_TAB, id)
                                            >
                                                {icon("wallet")}
                                                " Expenses"
                                            </Button>
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| ctx.open_staff_report(ATTENDANCE_TAB, id)
                                            >
                                                {icon("calendar")}
                                                " Attendance"
                                            </Button>
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| handle_toggle_status(for_toggle.clone())
                                            >
                                                {if active { "Deactivate" } else { "Activate" }}
                                            </Button>
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| handle_delete(for_delete.clone())
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

            {move || cache.with(|c| {
                if !c.is_loaded() {
                    Some("Loading staff…")
                } else if c.is_empty() {
                    Some("No staff members yet. Use \"Add staff\" to create one.")
                } else {
                    None
                }
            }).map(|msg| view! { <div class="table__empty">{msg}</div> })}
        </PageFrame>
    }
}
