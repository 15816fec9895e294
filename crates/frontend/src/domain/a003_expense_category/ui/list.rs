use crate::domain::a003_expense_category::api::{delete_category, fetch_categories, save_category};
use crate::shared::api_utils::or_toast;
use crate::shared::confirm::{claim_busy, confirm_delete, confirm_save};
use crate::shared::icons::icon;
use crate::shared::modal_stack::{ModalOptions, ModalStackService};
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_LIST};
use crate::shared::toast::use_toasts;
use crate::system::auth::context::use_current_user;
use contracts::domain::a003_expense_category::{ExpenseCategory, ExpenseCategoryDto};
use contracts::domain::common::RecordId;
use contracts::shared::resource_cache::ResourceCache;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
fn CategoryForm(
    id: Option<RecordId>,
    name: String,
    busy: RwSignal<bool>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let user_id = use_current_user().id;
    let toasts = use_toasts();
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let name = RwSignal::new(name);
    let error = RwSignal::new(Option::<String>::None);

    let handle_save = move |_| {
        let dto = match ExpenseCategoryDto::from_input(id, user_id, &name.get_untracked()) {
            Ok(dto) => dto,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        if !claim_busy(busy) {
            return;
        }
        spawn_local(async move {
            if !confirm_save(modal_stack, format!("Save category \"{}\"?", dto.name)).await {
                busy.set(false);
                return;
            }
            let result = save_category(&dto).await;
            busy.set(false);
            match result {
                Ok(()) => {
                    toasts.success(format!("Category \"{}\" saved", dto.name));
                    on_saved.run(());
                }
                Err(e) => error.set(Some(e)),
            }
        });
    };

    view! {
        <div class="details-form">
            <h2 class="details-form__title">
                {if id.is_some() { "Rename category" } else { "New category" }}
            </h2>
            {move || error.get().map(|e| view! {
                <MessageBar intent=MessageBarIntent::Error>
                    <MessageBarBody>{e}</MessageBarBody>
                </MessageBar>
            })}
            <div class="form__group">
                <label class="form__label">"Name" <span class="form__required">"*"</span></label>
                <Input value=name placeholder="e.g. Travel, Advance, Food" />
            </div>
            <Flex justify=FlexJustify::End>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    "Cancel"
                </Button>
                <Button appearance=ButtonAppearance::Primary on_click=handle_save disabled=busy>
                    "Save"
                </Button>
            </Flex>
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
pub fn ExpenseCategoryList() -> impl IntoView {
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let toasts = use_toasts();
    let user_id = use_current_user().id;
    let cache = RwSignal::new(ResourceCache::<ExpenseCategory>::new());

    let load = move || async move {
        let result = fetch_categories(user_id).await;
        match or_toast(result, "categories", toasts) {
            Some(items) => cache.update(|c| c.replace(items)),
            None => cache.update(|c| c.clear_failed()),
        }
    };

    let open_form = move |id: Option<RecordId>, name: String| {
        let busy = RwSignal::new(false);
        modal_stack.open(ModalOptions::sized("420px").locked_by(busy), move |handle| {
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
                <CategoryForm id=id name=name.clone() busy=busy on_saved=on_saved on_cancel=on_cancel />
            }
            .into_any()
        });
    };

    let handle_delete = move |category: ExpenseCategory| {
        spawn_local(async move {
            let message = format!("Delete category \"{}\"?", category.name);
            if !confirm_delete(modal_stack, "Delete category", message).await {
                return;
            }
            match delete_category(user_id, category.id).await {
                Ok(()) => {
                    cache.update(|c| {
                        c.remove(category.id);
                    });
                    toasts.success(format!("Deleted \"{}\"", category.name));
                }
                Err(e) => {
                    log::error!("Deleting category {} failed: {}", category.id, e);
                    toasts.error(format!("Could not delete category. {}", e));
                }
            }
        });
    };

    spawn_local(load());

    view! {
        <PageFrame page_id="a003_expense_category--list" category=PAGE_CAT_LIST>
            <PageHeader title="Expense Categories">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| open_form(None, String::new())
                >
                    {icon("plus")}
                    " Add category"
                </Button>
            </PageHeader>

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell resizable=true min_width=240.0>"Name"</TableHeaderCell>
                        <TableHeaderCell min_width=120.0>"Actions"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || cache.with(|c| c.items().to_vec()).into_iter().map(|category| {
                        let id = category.id;
                        let name = category.name.clone();
                        let for_delete = category.clone();
                        view! {
                            <TableRow>
                                <TableCell>
                                    <TableCellLayout>{category.name}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        <Space>
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| open_form(Some(id), name.clone())
                                            >
                                                {icon("edit")}
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

            {move || cache.with(|c| c.is_loaded() && c.is_empty())
                .then(|| view! { <div class="table__empty">"No categories yet"</div> })}
        </PageFrame>
    }
}
