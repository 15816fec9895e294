use contracts::shared::export::ExportTable;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::export::{export_csv, export_pdf, export_xlsx, print_table};
use crate::shared::icons::icon;
use crate::shared::toast::use_toasts;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ExportKind {
    Print,
    Pdf,
    Xlsx,
    Csv,
}

/// Print / PDF / Excel / CSV buttons for a report.
///
/// `table` is built on click so the export matches what is on screen.
#[component]
pub fn ExportBar(
    table: Callback<(), ExportTable>,
    #[prop(into)] disabled: Signal<bool>,
) -> impl IntoView {
    let toasts = use_toasts();
    let busy = RwSignal::new(false);

    let run = move |kind: ExportKind| {
        if busy.get_untracked() {
            return;
        }
        let table = table.run(());
        if table.is_empty() {
            toasts.info("Nothing to export");
            return;
        }
        busy.set(true);
        spawn_local(async move {
            let result = match kind {
                ExportKind::Print => print_table(&table).await,
                ExportKind::Pdf => export_pdf(&table).await,
                ExportKind::Xlsx => export_xlsx(&table).await,
                ExportKind::Csv => export_csv(&table),
            };
            busy.set(false);
            if let Err(e) = result {
                log::error!("Export {:?} failed: {}", kind, e);
                toasts.error(e);
            }
        });
    };

    let is_disabled = Signal::derive(move || disabled.get() || busy.get());

    view! {
        <Space>
            <Button appearance=ButtonAppearance::Secondary size=ButtonSize::Small disabled=is_disabled on_click=move |_| run(ExportKind::Print)>
                {icon("printer")} " Print"
            </Button>
            <Button appearance=ButtonAppearance::Secondary size=ButtonSize::Small disabled=is_disabled on_click=move |_| run(ExportKind::Pdf)>
                {icon("file-pdf")} " PDF"
            </Button>
            <Button appearance=ButtonAppearance::Secondary size=ButtonSize::Small disabled=is_disabled on_click=move |_| run(ExportKind::Xlsx)>
                {icon("file-sheet")} " Excel"
            </Button>
            <Button appearance=ButtonAppearance::Subtle size=ButtonSize::Small disabled=is_disabled on_click=move |_| run(ExportKind::Csv)>
                {icon("download")} " CSV"
            </Button>
        </Space>
    }
}
