use crate::domain::a001_staff::api::fetch_staff;
use crate::domain::a005_attendance::api::{delete_attendance, fetch_attendance};
use crate::domain::a005_attendance::ui::details::AttendanceDetails;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::ATTENDANCE_TAB;
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
use contracts::domain::a005_attendance::{
    build_attendance_view, AttendanceForm, AttendanceRecord, AttendanceStatus,
};
use contracts::domain::common::RecordId;
use contracts::shared::resource_cache::ResourceCache;
use contracts::shared::selection::{DependentCollection, LoadTicket};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn status_badge(status: AttendanceStatus) -> impl IntoView {
    let color = match status {
        AttendanceStatus::Present => BadgeColor::Success,
        AttendanceStatus::Absent => BadgeColor::Danger,
        AttendanceStatus::HalfDay => BadgeColor::Warning,
        AttendanceStatus::Late => BadgeColor::Informative,
    };
    view! { <Badge appearance=BadgeAppearance::Tint color=color>{status.as_str()}</Badge> }
}

/// `12.0` -> "12", `11.5` -> "11.5".
fn format_days(days: f64) -> String {
    if days.fract() == 0.0 {
        format!("{:.0}", days)
    } else {
        format!("{:.1}", days)
    }
}

#[component]
#[allow(non_snake_case)]
pub fn AttendanceReport() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let toasts = use_toasts();
    let user_id = use_current_user().id;

    let staff = RwSignal::new(ResourceCache::<Staff>::new());
    let records = RwSignal::new(DependentCollection::<AttendanceRecord>::new());
    let month = RwSignal::new(Option::<String>::None);

    let load_records = move |ticket: LoadTicket| async move {
        let result = fetch_attendance(user_id, ticket.parent_id).await;
        if !records.with_untracked(|c| c.is_current(&ticket)) {
            log::debug!("Dropping stale attendance of staff {}", ticket.parent_id);
            return;
        }
        match or_toast(result, "attendance", toasts) {
            Some(items) => records.update(|c| {
                c.apply(ticket, items);
            }),
            None => records.update(|c| {
                c.fail(ticket);
            }),
        }
    };

    let select_staff = move |id: Option<RecordId>| match id {
        Some(id) => {
            if let Some(ticket) = records.try_update(|c| c.select(id)) {
                spawn_local(load_records(ticket));
            }
        }
        None => records.update(|c| c.deselect()),
    };

    let reload_records = move || async move {
        if let Some(ticket) = records.try_update(|c| c.reload()).flatten() {
            load_records(ticket).await;
        }
    };

    spawn_local(async move {
        match or_toast(fetch_staff(user_id).await, "staff", toasts) {
            Some(items) => staff.update(|c| c.replace(items)),
            None => staff.update(|c| c.clear_failed()),
        }
    });

    if let Some(staff_id) = ctx.take_deep_link_staff() {
        select_staff(Some(staff_id));
    }

    Effect::new(move |_| {
        if let Some(staff_id) = ctx.take_staff_request(ATTENDANCE_TAB) {
            if records.with_untracked(|c| c.selected()) != Some(staff_id) {
                select_staff(Some(staff_id));
            }
        }
    });

    let report = Memo::new(move |_| {
        let month = month.get();
        records.with(|c| build_attendance_view(c.state(), c.cache().is_loaded(), c.items(), month.as_deref()))
    });

    let selected_staff_name = move || {
        records
            .with(|c| c.selected())
            .and_then(|id| staff.with(|s| s.get(id).map(|m| m.name.clone())))
            .unwrap_or_default()
    };

    let open_form = move |form: AttendanceForm| {
        let staff_name = selected_staff_name();
        let busy = RwSignal::new(false);
        modal_stack.open(ModalOptions::sized("480px").locked_by(busy), move |handle| {
            let on_saved = Callback::new({
                let handle = handle.clone();
                move |_| {
                    let handle = handle.clone();
                    spawn_local(async move {
                        reload_records().await;
                        handle.close();
                    });
                }
            });
            let on_cancel = Callback::new(move |_| handle.close());
            view! {
                <AttendanceDetails
                    form=form.clone()
                    staff_name=staff_name.clone()
                    busy=busy
                    on_saved=on_saved
                    on_cancel=on_cancel
                />
            }
            .into_any()
        });
    };

    let handle_mark = move |_| {
        let staff_id = records.with_untracked(|c| c.selected());
        if staff_id.is_some() {
            open_form(AttendanceForm::new(staff_id, &today_iso()));
        }
    };

    let handle_edit = move |id: RecordId| {
        if let Some(record) = records.with_untracked(|c| c.cache().get(id).cloned()) {
            open_form(AttendanceForm::from_record(&record));
        }
    };

    let handle_delete = move |id: RecordId, date: String| {
        spawn_local(async move {
            let message = format!("Delete the attendance entry for {}?", date);
            if !confirm_delete(modal_stack, "Delete attendance", message).await {
                return;
            }
            match delete_attendance(user_id, id).await {
                Ok(()) => {
                    records.update(|c| {
                        c.remove(id);
                    });
                    toasts.success("Attendance entry deleted");
                }
                Err(e) => {
                    log::error!("Deleting attendance {} failed: {}", id, e);
                    toasts.error(format!("Could not delete attendance. {}", e));
                }
            }
        });
    };

    let has_selection = Signal::derive(move || records.with(|c| c.selected().is_some()));
    let count_of = move |status: AttendanceStatus| {
        Signal::derive(move || Some(report.with(|v| v.summary.count(status).to_string())))
    };

    view! {
        <PageFrame page_id="a005_attendance--report" category=PAGE_CAT_REPORT>
            <PageHeader title="Attendance">
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || !has_selection.get())
                    on_click=handle_mark
                >
                    {icon("plus")}
                    " Mark attendance"
                </Button>
            </PageHeader>

            <div class="report__filters">
                <StaffSelector
                    staff=Signal::derive(move || staff.with(|c| c.items().to_vec()))
                    selected=Signal::derive(move || records.with(|c| c.selected()))
                    on_change=Callback::new(select_staff)
                />
                <MonthSelector month=month />
                <ExportBar
                    table=Callback::new(move |_| {
                        let name = selected_staff_name();
                        let month = month.get_untracked();
                        report.with_untracked(|v| v.export_table(&name, month.as_deref()))
                    })
                    disabled=Signal::derive(move || report.with(|v| v.rows.is_empty()))
                />
            </div>

            <div class="stat-grid">
                <StatCard
                    label="Worked days"
                    icon_name="calendar"
                    tone=StatTone::Good
                    value=Signal::derive(move || {
                        Some(report.with(|v| format_days(v.summary.effective_days)))
                    })
                    subtitle=Signal::derive(move || {
                        Some(report.with(|v| format!("of {} marked", v.summary.total())))
                    })
                />
                <StatCard label="Present" icon_name="users" value=count_of(AttendanceStatus::Present) />
                <StatCard
                    label="Absent"
                    icon_name="users"
                    tone=StatTone::Bad
                    value=count_of(AttendanceStatus::Absent)
                />
                <StatCard label="Half Day" icon_name="users" value=count_of(AttendanceStatus::HalfDay) />
                <StatCard label="Late" icon_name="users" value=count_of(AttendanceStatus::Late) />
            </div>

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell min_width=100.0>"Date"</TableHeaderCell>
                        <TableHeaderCell min_width=100.0>"Status"</TableHeaderCell>
                        <TableHeaderCell min_width=80.0>"In"</TableHeaderCell>
                        <TableHeaderCell min_width=80.0>"Out"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=200.0>"Notes"</TableHeaderCell>
                        <TableHeaderCell min_width=90.0>"Actions"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || report.with(|v| v.rows.clone()).into_iter().map(|row| {
                        let id = row.id;
                        let date = row.date.clone();
                        view! {
                            <TableRow>
                                <TableCell><TableCellLayout>{row.date.clone()}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{status_badge(row.status)}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{row.in_time.clone()}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{row.out_time.clone()}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{row.notes.clone()}</TableCellLayout></TableCell>
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
                                                on_click=move |_| handle_delete(id, date.clone())
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
