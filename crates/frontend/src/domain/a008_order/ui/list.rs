use crate::domain::a008_order::api::{fetch_order_items, fetch_orders};
use crate::shared::api_utils::or_toast;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_LIST};
use crate::shared::toast::use_toasts;
use crate::system::auth::context::use_current_user;
use contracts::domain::a008_order::{build_order_rows, OrderRow};
use contracts::shared::money::format_rupees;
use contracts::shared::period::to_display;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn OrderList() -> impl IntoView {
    let toasts = use_toasts();
    let user_id = use_current_user().id;
    let rows = RwSignal::new(Option::<Vec<OrderRow>>::None);

    let load = move || async move {
        let (orders, lines) = futures::join!(fetch_orders(user_id), fetch_order_items(user_id));
        let orders = or_toast(orders, "orders", toasts).unwrap_or_default();
        // Missing lines only cost the item counts.
        let lines = lines.unwrap_or_else(|e| {
            log::warn!("Order lines unavailable: {}", e);
            Vec::new()
        });
        rows.set(Some(build_order_rows(&orders, &lines)));
    };
    spawn_local(load());

    view! {
        <PageFrame page_id="a008_order--list" category=PAGE_CAT_LIST>
            <PageHeader title="Orders">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| spawn_local(load())>
                    {icon("refresh")}
                    " Refresh"
                </Button>
            </PageHeader>

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell min_width=70.0>"Order"</TableHeaderCell>
                        <TableHeaderCell min_width=100.0>"Date"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=200.0>"Customer"</TableHeaderCell>
                        <TableHeaderCell min_width=70.0>"Items"</TableHeaderCell>
                        <TableHeaderCell min_width=110.0>"Total"</TableHeaderCell>
                        <TableHeaderCell min_width=100.0>"Status"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || rows.get().unwrap_or_default().into_iter().map(|row| {
                        let OrderRow { order, line_count, total } = row;
                        view! {
                            <TableRow>
                                <TableCell><TableCellLayout>{format!("#{}", order.id)}</TableCellLayout></TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        {order.order_date.as_deref().map(to_display).unwrap_or_default()}
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>{order.customer_name.unwrap_or_else(|| "-".into())}</TableCellLayout>
                                </TableCell>
                                <TableCell><TableCellLayout>{line_count}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{format_rupees(total)}</TableCellLayout></TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        {order.status.map(|s| view! {
                                            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>{s}</Badge>
                                        })}
                                    </TableCellLayout>
                                </TableCell>
                            </TableRow>
                        }
                    }).collect_view()}
                </TableBody>
            </Table>

            {move || rows.with(|r| match r {
                None => Some("Loading orders…"),
                Some(r) if r.is_empty() => Some("No orders yet"),
                Some(_) => None,
            }).map(|msg| view! { <div class="table__empty">{msg}</div> })}
        </PageFrame>
    }
}
