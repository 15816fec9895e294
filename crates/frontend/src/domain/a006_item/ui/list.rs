use crate::domain::a006_item::api::{delete_item, fetch_items};
use crate::domain::a006_item::ui::details::ItemDetails;
use crate::shared::api_utils::or_toast;
use crate::shared::components::{StatCard, StatTone};
use crate::shared::confirm::confirm_delete;
use crate::shared::icons::icon;
use crate::shared::modal_stack::{ModalOptions, ModalStackService};
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_LIST};
use crate::shared::toast::use_toasts;
use crate::system::auth::context::use_current_user;
use contracts::domain::a006_item::{Item, ItemForm};
use contracts::shared::money::{format_amount, format_rupees};
use contracts::shared::resource_cache::ResourceCache;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn ItemList() -> impl IntoView {
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let toasts = use_toasts();
    let user_id = use_current_user().id;
    let cache = RwSignal::new(ResourceCache::<Item>::new());

    let load = move || async move {
        match or_toast(fetch_items(user_id).await, "items", toasts) {
            Some(items) => cache.update(|c| c.replace(items)),
            None => cache.update(|c| c.clear_failed()),
        }
    };

    let open_form = move |form: ItemForm| {
        let busy = RwSignal::new(false);
        modal_stack.open(ModalOptions::sized("520px").locked_by(busy), move |handle| {
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
            view! { <ItemDetails form=form.clone() busy=busy on_saved=on_saved on_cancel=on_cancel /> }
                .into_any()
        });
    };

    let handle_delete = move |item: Item| {
        spawn_local(async move {
            if !confirm_delete(modal_stack, "Delete item", format!("Delete \"{}\"?", item.name)).await {
                return;
            }
            match delete_item(user_id, item.id).await {
                Ok(()) => {
                    cache.update(|c| {
                        c.remove(item.id);
                    });
                    toasts.success(format!("Deleted \"{}\"", item.name));
                }
                Err(e) => {
                    log::error!("Deleting item {} failed: {}", item.id, e);
                    toasts.error(format!("Could not delete item. {}", e));
                }
            }
        });
    };

    spawn_local(load());

    let loaded = move || cache.with(|c| c.is_loaded());
    let stock_value = Signal::derive(move || {
        loaded().then(|| cache.with(|c| format_rupees(c.items().iter().map(Item::stock_value).sum())))
    });
    let out_of_stock = Signal::derive(move || {
        loaded().then(|| {
            cache.with(|c| c.items().iter().filter(|i| i.is_out_of_stock()).count().to_string())
        })
    });

    view! {
        <PageFrame page_id="a006_item--list" category=PAGE_CAT_LIST>
            <PageHeader title="Items">
                <Button appearance=ButtonAppearance::Primary on_click=move |_| open_form(ItemForm::default())>
                    {icon("plus")}
                    " Add item"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| spawn_local(load())>
                    {icon("refresh")}
                    " Refresh"
                </Button>
            </PageHeader>

            <div class="stat-grid">
                <StatCard label="Stock value" icon_name="package" value=stock_value />
                <StatCard label="Out of stock" icon_name="package" tone=StatTone::Bad value=out_of_stock />
            </div>

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell resizable=true min_width=200.0>"Item"</TableHeaderCell>
                        <TableHeaderCell min_width=70.0>"Unit"</TableHeaderCell>
                        <TableHeaderCell min_width=100.0>"Price"</TableHeaderCell>
                        <TableHeaderCell min_width=90.0>"Stock"</TableHeaderCell>
                        <TableHeaderCell min_width=110.0>"Value"</TableHeaderCell>
                        <TableHeaderCell min_width=80.0>"Actions"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || cache.with(|c| c.items().to_vec()).into_iter().map(|item| {
                        let for_edit = item.clone();
                        let for_delete = item.clone();
                        let name = item.name.clone();
                        let unit = item.unit.clone().unwrap_or_default();
                        let price = item.price;
                        let out_of_stock = item.is_out_of_stock();
                        let stock = item.stock;
                        let stock_value = item.stock_value();
                        view! {
                            <TableRow>
                                <TableCell>
                                    <TableCellLayout>
                                        <a
                                            href="#"
                                            class="table__link"
                                            on:click=move |e| {
                                                e.prevent_default();
                                                open_form(ItemForm::from_item(&for_edit));
                                            }
                                        >
                                            {name}
                                        </a>
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>{unit}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>{format_rupees(price)}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        {if out_of_stock {
                                            view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Danger>"Out"</Badge> }.into_any()
                                        } else {
                                            format_amount(stock).into_any()
                                        }}
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>{format_rupees(stock_value)}</TableCellLayout>
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
                .then(|| view! { <div class="table__empty">"No items yet"</div> })}
        </PageFrame>
    }
}
