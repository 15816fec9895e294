use crate::domain::a005_attendance::api::save_attendance;
use crate::shared::components::DateInput;
use crate::shared::config::config;
use crate::shared::confirm::{claim_busy, confirm_save};
use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::toast::use_toasts;
use crate::system::auth::context::use_current_user;
use contracts::domain::a005_attendance::{AttendanceForm, AttendanceStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
fn TimeInput(label: &'static str, value: RwSignal<String>, disabled: Signal<bool>) -> impl IntoView {
    view! {
        <div class="form__group">
            <label class="form__label">{label}</label>
            <input
                type="time"
                class="form__input"
                prop:value=move || value.get()
                prop:disabled=move || disabled.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}

/// Mark or correct one day of attendance.
#[component]
pub fn AttendanceDetails(
    form: AttendanceForm,
    staff_name: String,
    busy: RwSignal<bool>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let user = use_current_user();
    let toasts = use_toasts();
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");

    let is_edit = form.is_edit();
    let id = form.id;
    let staff_id = form.staff_id;
    let date = RwSignal::new(form.date);
    let in_time = RwSignal::new(form.in_time);
    let out_time = RwSignal::new(form.out_time);
    let status = RwSignal::new(form.status.as_str().to_string());
    let notes = RwSignal::new(form.notes);
    let error = RwSignal::new(Option::<String>::None);

    let current_status = move || AttendanceStatus::from_str_lossy(&status.get());
    let times_disabled = Signal::derive(move || !current_status().records_times());

    let handle_save = move |_| {
        let draft = AttendanceForm {
            id,
            staff_id,
            date: date.get_untracked(),
            in_time: in_time.get_untracked(),
            out_time: out_time.get_untracked(),
            status: AttendanceStatus::from_str_lossy(&status.get_untracked()),
            notes: notes.get_untracked(),
        };
        let dto = match draft.validate(user.id, user.shop_id, config().api.date_format) {
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
            let question = format!("Mark {} for {}?", dto.status.as_str(), dto.date);
            if !confirm_save(modal_stack, question).await {
                busy.set(false);
                return;
            }
            let result = save_attendance(&dto).await;
            busy.set(false);
            match result {
                Ok(()) => {
                    toasts.success(format!("Marked {} for {}", dto.status.as_str(), dto.date));
                    on_saved.run(());
                }
                Err(e) => {
                    log::error!("Saving attendance failed: {}", e);
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
                        {if is_edit { "Edit attendance" } else { "Mark attendance" }}
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

            <DateInput label="Date" value=date required=true />

            <div class="form__group">
                <label class="form__label">"Status"</label>
                <RadioGroup value=status>
                    {AttendanceStatus::ALL
                        .iter()
                        .map(|s| view! { <Radio value=s.as_str() label=s.as_str() /> })
                        .collect_view()}
                </RadioGroup>
            </div>

            <div class="form__row">
                <TimeInput label="In time" value=in_time disabled=times_disabled />
                <TimeInput label="Out time" value=out_time disabled=times_disabled />
            </div>

            <div class="form__group">
                <label class="form__label">"Notes"</label>
                <Textarea value=notes placeholder="Optional" />
            </div>
        </div>
    }
}
