//! Report exports: print window, PDF, XLSX and CSV.
//!
//! Every report page hands over an [`ExportTable`]; markup and CSV come from
//! `contracts::shared::export`. The PDF and workbook libraries are injected
//! into the page on first use only.

use std::cell::RefCell;
use std::collections::HashSet;

use contracts::shared::export::{render_print_document, render_report_body, report_style, ExportTable};
use gloo_timers::future::TimeoutFuture;
use js_sys::{Array, Function, Reflect};
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, HtmlDocument, HtmlElement, HtmlScriptElement, Url};

use super::config::config;
use super::date_utils::generated_on;

const SCRIPT_POLL_MS: u32 = 100;
const SCRIPT_TIMEOUT_MS: u32 = 15_000;
const SHEET_NAME_MAX: usize = 31;

thread_local! {
    static INJECTED_SCRIPTS: RefCell<HashSet<String>> = RefCell::new(HashSet::new());
}

fn js_err(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

fn window() -> Result<web_sys::Window, String> {
    web_sys::window().ok_or_else(|| "No window object".to_string())
}

/// `staff_expenses_18-10-2026.pdf`
pub fn export_file_name(table: &ExportTable, extension: &str) -> String {
    format!("{}_{}.{}", table.file_stem(), generated_on(), extension)
}

/// Title block + table, as rows for the spreadsheet writer.
pub fn sheet_rows(table: &ExportTable) -> Vec<Vec<String>> {
    let mut rows = vec![vec![table.title.clone()]];
    rows.extend(table.subtitle.iter().map(|s| vec![s.clone()]));
    rows.push(Vec::new());
    rows.extend(table.to_matrix());
    rows
}

/// Excel rejects sheet names over 31 chars or containing `[]:*?/\`.
pub fn sheet_name(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(SHEET_NAME_MAX)
        .collect();
    if cleaned.trim().is_empty() {
        "Report".to_string()
    } else {
        cleaned
    }
}

/// Global injected by a library script (`html2pdf`, `XLSX`), if present.
fn js_global(name: &str) -> Result<Option<JsValue>, String> {
    let value = Reflect::get(&JsValue::from(window()?), &JsValue::from_str(name)).map_err(js_err)?;
    Ok(if value.is_undefined() || value.is_null() {
        None
    } else {
        Some(value)
    })
}

/// Inject `src` once and wait until it defines `global`.
async fn ensure_library(global: &str, src: &str) -> Result<JsValue, String> {
    if let Some(lib) = js_global(global)? {
        return Ok(lib);
    }

    let first_request = INJECTED_SCRIPTS.with(|s| s.borrow_mut().insert(src.to_string()));
    if first_request {
        log::info!("Loading export library {} from {}", global, src);
        let document = window()?.document().ok_or("No document object")?;
        let script = document
            .create_element("script")
            .map_err(js_err)?
            .dyn_into::<HtmlScriptElement>()
            .map_err(|_| "Failed to create script element".to_string())?;
        script.set_src(src);
        script.set_async(true);
        document
            .head()
            .ok_or("No head element")?
            .append_child(&script)
            .map_err(js_err)?;
    }

    let mut waited = 0;
    while waited < SCRIPT_TIMEOUT_MS {
        TimeoutFuture::new(SCRIPT_POLL_MS).await;
        waited += SCRIPT_POLL_MS;
        if let Some(lib) = js_global(global)? {
            return Ok(lib);
        }
    }

    // Allow a later attempt to inject again.
    INJECTED_SCRIPTS.with(|s| s.borrow_mut().remove(src));
    Err(format!("Could not load the {} library. Check your connection.", global))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, String> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(|e| e.to_string())
}

fn call_method(target: &JsValue, name: &str, args: &[&JsValue]) -> Result<JsValue, String> {
    let method: Function = Reflect::get(target, &JsValue::from_str(name))
        .map_err(js_err)?
        .dyn_into()
        .map_err(|_| format!("{} is not a function", name))?;
    let argv = Array::new();
    for a in args {
        argv.push(a);
    }
    method.apply(target, &argv).map_err(js_err)
}

/// Open the browser print dialog on a standalone branded document.
pub async fn print_table(table: &ExportTable) -> Result<(), String> {
    let branding = config().branding.report_branding();
    let html = render_print_document(table, &branding, &generated_on());

    let popup = window()?
        .open_with_url_and_target("", "_blank")
        .map_err(js_err)?
        .ok_or("Pop-up blocked. Allow pop-ups to print.")?;
    let document = popup
        .document()
        .ok_or("Print window has no document")?
        .unchecked_into::<HtmlDocument>();
    document.write_1(&html).map_err(js_err)?;
    document.close().map_err(js_err)?;

    // Give the new window a tick to lay out before printing.
    TimeoutFuture::new(250).await;
    popup.focus().map_err(js_err)?;
    popup.print().map_err(js_err)?;
    Ok(())
}

async fn run_html2pdf(html2pdf: JsValue, options: &JsValue, source: &JsValue) -> Result<(), String> {
    let factory: Function = html2pdf
        .dyn_into()
        .map_err(|_| "html2pdf is not a function".to_string())?;
    let worker = factory.call0(&JsValue::NULL).map_err(js_err)?;
    let worker = call_method(&worker, "set", &[options])?;
    let worker = call_method(&worker, "from", &[source])?;
    let saving = call_method(&worker, "save", &[])?;
    JsFuture::from(js_sys::Promise::resolve(&saving))
        .await
        .map(|_| ())
        .map_err(js_err)
}

/// Render the report off-screen and save it as PDF.
pub async fn export_pdf(table: &ExportTable) -> Result<(), String> {
    let html2pdf = ensure_library("html2pdf", &config().export.pdf_script).await?;
    let branding = config().branding.report_branding();

    let options = to_js(&serde_json::json!({
        "margin": 10,
        "filename": export_file_name(table, "pdf"),
        "image": { "type": "jpeg", "quality": 0.98 },
        "html2canvas": { "scale": 2 },
        "jsPDF": { "unit": "mm", "format": "a4", "orientation": "portrait" }
    }))?;

    let document = window()?.document().ok_or("No document object")?;
    let body = document.body().ok_or("No body element")?;
    let clone = document
        .create_element("div")
        .map_err(js_err)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| "Failed to create container".to_string())?;
    clone
        .style()
        .set_property("position", "fixed")
        .and_then(|_| clone.style().set_property("left", "-10000px"))
        .and_then(|_| clone.style().set_property("top", "0"))
        .and_then(|_| clone.style().set_property("width", "800px"))
        .map_err(js_err)?;
    clone.set_inner_html(&format!(
        "<style>{}</style>{}",
        report_style(),
        render_report_body(table, &branding, &generated_on())
    ));
    body.append_child(&clone).map_err(js_err)?;

    let result = run_html2pdf(html2pdf, &options, clone.as_ref()).await;

    let _ = body.remove_child(&clone);
    result
}

/// Write the table to an `.xlsx` workbook.
pub async fn export_xlsx(table: &ExportTable) -> Result<(), String> {
    let xlsx = ensure_library("XLSX", &config().export.xlsx_script).await?;
    let utils = Reflect::get(&xlsx, &JsValue::from_str("utils")).map_err(js_err)?;

    let rows = to_js(&sheet_rows(table))?;
    let sheet = call_method(&utils, "aoa_to_sheet", &[&rows])?;
    let book = call_method(&utils, "book_new", &[])?;
    call_method(
        &utils,
        "book_append_sheet",
        &[&book, &sheet, &JsValue::from_str(&sheet_name(&table.title))],
    )?;
    call_method(
        &xlsx,
        "writeFile",
        &[&book, &JsValue::from_str(&export_file_name(table, "xlsx"))],
    )?;
    Ok(())
}

/// `;`-separated CSV download, readable by Excel without any library.
pub fn export_csv(table: &ExportTable) -> Result<(), String> {
    let blob = create_blob(&table.to_csv(), "text/csv;charset=utf-8;")?;
    download_blob(&blob, &export_file_name(table, "csv"))
}

fn create_blob(content: &str, mime: &str) -> Result<Blob, String> {
    let parts = Array::new();
    parts.push(&JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type(mime);

    Blob::new_with_str_sequence_and_options(&parts, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let document = window()?.document().ok_or("No document object")?;
    let body = document.body().ok_or("No body element")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ExportTable {
        ExportTable {
            title: "Staff Attendance".into(),
            subtitle: vec!["Staff: Ravi".into(), "Period: March 2024".into()],
            headers: vec!["Date".into(), "Status".into()],
            rows: vec![vec!["01-03-2024".into(), "Present".into()]],
            footer_row: None,
        }
    }

    #[test]
    fn test_sheet_rows_put_title_block_first() {
        let rows = sheet_rows(&table());
        assert_eq!(rows[0], vec!["Staff Attendance".to_string()]);
        assert_eq!(rows[2], vec!["Period: March 2024".to_string()]);
        assert!(rows[3].is_empty());
        assert_eq!(rows[4], vec!["Date".to_string(), "Status".to_string()]);
        assert_eq!(rows.len(), 6);
    }

    #[test]
    fn test_sheet_name_is_excel_safe() {
        assert_eq!(sheet_name("Expenses: March/April"), "Expenses MarchApril");
        assert_eq!(sheet_name("???"), "Report");
        assert_eq!(sheet_name(&"x".repeat(40)).len(), 31);
    }
}
