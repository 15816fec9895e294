use crate::domain::a007_shop::api::fetch_shops;
use crate::shared::api_utils::or_toast;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_LIST};
use crate::shared::toast::use_toasts;
use crate::system::auth::context::use_current_user;
use contracts::domain::a007_shop::Shop;
use contracts::shared::resource_cache::ResourceCache;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Read-only: shops are managed on the server.
#[component]
#[allow(non_snake_case)]
pub fn ShopList() -> impl IntoView {
    let toasts = use_toasts();
    let user_id = use_current_user().id;
    let cache = RwSignal::new(ResourceCache::<Shop>::new());

    let load = move || async move {
        match or_toast(fetch_shops(user_id).await, "shops", toasts) {
            Some(items) => cache.update(|c| c.replace(items)),
            None => cache.update(|c| c.clear_failed()),
        }
    };
    spawn_local(load());

    view! {
        <PageFrame page_id="a007_shop--list" category=PAGE_CAT_LIST>
            <PageHeader title="Shops">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| spawn_local(load())>
                    {icon("refresh")}
                    " Refresh"
                </Button>
            </PageHeader>

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell min_width=60.0>"#"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=200.0>"Name"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=240.0>"Address"</TableHeaderCell>
                        <TableHeaderCell min_width=120.0>"Mobile"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || cache.with(|c| c.items().to_vec()).into_iter().map(|shop| view! {
                        <TableRow>
                            <TableCell><TableCellLayout>{shop.id}</TableCellLayout></TableCell>
                            <TableCell><TableCellLayout>{shop.name}</TableCellLayout></TableCell>
                            <TableCell>
                                <TableCellLayout>{shop.address.unwrap_or_else(|| "-".into())}</TableCellLayout>
                            </TableCell>
                            <TableCell>
                                <TableCellLayout>{shop.mobile.unwrap_or_else(|| "-".into())}</TableCellLayout>
                            </TableCell>
                        </TableRow>
                    }).collect_view()}
                </TableBody>
            </Table>

            {move || cache.with(|c| c.is_loaded() && c.is_empty())
                .then(|| view! { <div class="table__empty">"No shops found"</div> })}
        </PageFrame>
    }
}
