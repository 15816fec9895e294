//! Export projection of a rendered table.
//!
//! Every report page reduces what it shows to an [`ExportTable`]; the
//! frontend then prints it, hands it to the PDF renderer, or writes it as a
//! workbook/CSV. The formatting below is pure so it can be checked here.

use serde::{Deserialize, Serialize};

/// Trait for view rows that can be exported
pub trait ExportRow {
    fn headers() -> Vec<&'static str>;
    fn to_cells(&self) -> Vec<String>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportTable {
    pub title: String,
    /// Extra lines under the title ("Staff: Ravi", "Period: March 2024").
    pub subtitle: Vec<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Optional closing row (totals).
    pub footer_row: Option<Vec<String>>,
}

impl ExportTable {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn from_rows<R: ExportRow>(title: impl Into<String>, rows: &[R]) -> Self {
        Self {
            title: title.into(),
            subtitle: Vec::new(),
            headers: R::headers().into_iter().map(str::to_string).collect(),
            rows: rows.iter().map(ExportRow::to_cells).collect(),
            footer_row: None,
        }
    }

    pub fn with_subtitle(mut self, line: impl Into<String>) -> Self {
        self.subtitle.push(line.into());
        self
    }

    pub fn with_footer(mut self, cells: Vec<String>) -> Self {
        self.footer_row = Some(cells);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header + body + footer, as the spreadsheet writer expects.
    pub fn to_matrix(&self) -> Vec<Vec<String>> {
        let mut out = Vec::with_capacity(self.rows.len() + 2);
        out.push(self.headers.clone());
        out.extend(self.rows.iter().cloned());
        if let Some(f) = &self.footer_row {
            out.push(f.clone());
        }
        out
    }

    /// `;`-separated CSV with a UTF-8 BOM so Excel picks the right encoding.
    pub fn to_csv(&self) -> String {
        let mut csv = String::from('\u{FEFF}');
        for row in self.to_matrix() {
            let cells: Vec<String> = row.iter().map(|c| escape_csv_cell(c)).collect();
            csv.push_str(&cells.join(";"));
            csv.push('\n');
        }
        csv
    }

    /// File name stem derived from the title: "Staff Expenses" -> "staff_expenses".
    pub fn file_stem(&self) -> String {
        let stem: String = self
            .title
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect();
        let stem = stem
            .split('_')
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join("_");
        if stem.is_empty() {
            "report".to_string()
        } else {
            stem
        }
    }
}

/// Fixed header/footer text of printed documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportBranding {
    pub name: String,
    pub tagline: String,
    pub footer: String,
}

/// Spreadsheets evaluate cells starting with these as formulas. `-` is left
/// alone so negative amounts stay numbers.
const FORMULA_PREFIXES: [char; 4] = ['=', '+', '@', '\t'];

fn escape_csv_cell(cell: &str) -> String {
    if cell.starts_with(FORMULA_PREFIXES) {
        return escape_csv_cell(&format!("'{}", cell));
    }
    if cell.contains(';') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const PRINT_STYLE: &str = "\
body{font-family:Arial,Helvetica,sans-serif;margin:24px;color:#222}\
.report-header{text-align:center;border-bottom:2px solid #333;padding-bottom:8px;margin-bottom:16px}\
.report-header h1{margin:0;font-size:22px}\
.report-header p{margin:2px 0;font-size:12px;color:#555}\
h2{font-size:16px;margin:12px 0 4px}\
.subtitle{margin:0;font-size:12px}\
table{width:100%;border-collapse:collapse;margin-top:12px;font-size:12px}\
th,td{border:1px solid #999;padding:6px;text-align:left}\
th{background:#eee}\
tfoot td{font-weight:bold}\
.report-footer{margin-top:24px;text-align:center;font-size:11px;color:#777}\
@media print{body{margin:0}}";

/// The table body only, used for the off-screen PDF clone.
pub fn render_table_html(table: &ExportTable) -> String {
    let mut html = String::new();
    html.push_str("<table><thead><tr>");
    for h in &table.headers {
        html.push_str(&format!("<th>{}</th>", escape_html(h)));
    }
    html.push_str("</tr></thead><tbody>");
    if table.rows.is_empty() {
        html.push_str(&format!(
            "<tr><td colspan=\"{}\">No data</td></tr>",
            table.headers.len().max(1)
        ));
    }
    for row in &table.rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td>{}</td>", escape_html(cell)));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody>");
    if let Some(footer) = &table.footer_row {
        html.push_str("<tfoot><tr>");
        for cell in footer {
            html.push_str(&format!("<td>{}</td>", escape_html(cell)));
        }
        html.push_str("</tr></tfoot>");
    }
    html.push_str("</table>");
    html
}

/// Branded report fragment (header, title, table, footer) without `<html>`.
pub fn render_report_body(table: &ExportTable, branding: &ReportBranding, generated_on: &str) -> String {
    let mut html = String::new();
    html.push_str("<div class=\"report-header\">");
    html.push_str(&format!("<h1>{}</h1>", escape_html(&branding.name)));
    if !branding.tagline.is_empty() {
        html.push_str(&format!("<p>{}</p>", escape_html(&branding.tagline)));
    }
    html.push_str("</div>");
    html.push_str(&format!("<h2>{}</h2>", escape_html(&table.title)));
    for line in &table.subtitle {
        html.push_str(&format!("<p class=\"subtitle\">{}</p>", escape_html(line)));
    }
    html.push_str(&render_table_html(table));
    html.push_str(&format!(
        "<div class=\"report-footer\">{} &middot; Generated on {}</div>",
        escape_html(&branding.footer),
        escape_html(generated_on)
    ));
    html
}

/// Standalone printable document handed to the browser print dialog.
pub fn render_print_document(table: &ExportTable, branding: &ReportBranding, generated_on: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{title}</title><style>{style}</style></head><body>{body}</body></html>",
        title = escape_html(&table.title),
        style = PRINT_STYLE,
        body = render_report_body(table, branding, generated_on),
    )
}

/// Inline styles for the PDF clone, which lives outside the print document.
pub fn report_style() -> &'static str {
    PRINT_STYLE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branding() -> ReportBranding {
        ReportBranding {
            name: "Annapurna Caterers".into(),
            tagline: "Staff & Events".into(),
            footer: "Confidential".into(),
        }
    }

    fn sample() -> ExportTable {
        ExportTable {
            title: "Staff Expenses".into(),
            subtitle: vec!["Staff: Ravi".into()],
            headers: vec!["Date".into(), "Note".into()],
            rows: vec![vec!["15-03-2024".into(), "Tea & <snacks>".into()]],
            footer_row: Some(vec!["Total".into(), "₹10.00".into()]),
        }
    }

    #[test]
    fn test_print_document_escapes_cells() {
        let doc = render_print_document(&sample(), &branding(), "18-10-2026");
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("Tea &amp; &lt;snacks&gt;"));
        assert!(!doc.contains("<snacks>"));
        assert!(doc.contains("Annapurna Caterers"));
        assert!(doc.contains("Confidential"));
        assert!(doc.contains("<tfoot>"));
    }

    #[test]
    fn test_empty_table_renders_no_data_row() {
        let mut t = sample();
        t.rows.clear();
        let html = render_table_html(&t);
        assert!(html.contains("colspan=\"2\">No data"));
    }

    #[test]
    fn test_csv_quoting_and_bom() {
        let mut t = sample();
        t.rows.push(vec!["a;b".into(), "say \"hi\"".into()]);
        let csv = t.to_csv();
        assert!(csv.starts_with('\u{FEFF}'));
        let lines: Vec<&str> = csv.trim_start_matches('\u{FEFF}').lines().collect();
        assert_eq!(lines[0], "Date;Note");
        assert_eq!(lines[2], "\"a;b\";\"say \"\"hi\"\"\"");
        assert_eq!(lines.last().copied(), Some("Total;₹10.00"));
    }

    #[test]
    fn test_csv_neutralizes_formula_cells() {
        let mut t = sample();
        t.rows = vec![
            vec!["15-03-2024".into(), "=HYPERLINK(\"http://evil\",\"x\")".into()],
            vec!["16-03-2024".into(), "+91 98450".into()],
            vec!["17-03-2024".into(), "@sum".into()],
        ];
        t.footer_row = Some(vec!["Balance".into(), "-₹5.00".into()]);
        let csv = t.to_csv();
        let lines: Vec<&str> = csv.trim_start_matches('\u{FEFF}').lines().collect();
        assert_eq!(lines[1], "15-03-2024;\"'=HYPERLINK(\"\"http://evil\"\",\"\"x\"\")\"");
        assert_eq!(lines[2], "16-03-2024;'+91 98450");
        assert_eq!(lines[3], "17-03-2024;'@sum");
        assert_eq!(lines[4], "Balance;-₹5.00");
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(sample().file_stem(), "staff_expenses");
        assert_eq!(ExportTable::new("  ").file_stem(), "report");
        assert_eq!(ExportTable::new("Attendance - March 2024").file_stem(), "attendance_march_2024");
    }
}
