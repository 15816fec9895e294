use contracts::shared::export::ReportBranding;
use contracts::shared::period::DateWireFormat;
use serde::Deserialize;
use std::sync::OnceLock;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub branding: BrandingConfig,
    pub ui: UiConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Empty means `<origin>/api`.
    pub base_url: String,
    /// Date layout the PHP endpoints expect in request bodies.
    #[serde(default)]
    pub date_format: DateWireFormat,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BrandingConfig {
    pub name: String,
    pub tagline: String,
    pub footer: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    pub toast_ms: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    pub pdf_script: String,
    pub xlsx_script: String,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = ""
date_format = "iso"

[branding]
name = "Annapurna Caterers"
tagline = "Staff, expenses & attendance"
footer = "Generated by the staff dashboard"

[ui]
toast_ms = 3500

[export]
pdf_script = "https://cdnjs.cloudflare.com/ajax/libs/html2pdf.js/0.10.1/html2pdf.bundle.min.js"
xlsx_script = "https://cdn.jsdelivr.net/npm/xlsx@0.18.5/dist/xlsx.full.min.js"
"#;

static CONFIG: OnceLock<Config> = OnceLock::new();

fn load_config() -> Config {
    let mut config: Config =
        toml::from_str(DEFAULT_CONFIG).expect("Embedded default config is invalid");
    if let Some(base) = option_env!("DASHBOARD_API_BASE") {
        log::info!("API base overridden at build time: {}", base);
        config.api.base_url = base.to_string();
    }
    config
}

/// Process-wide configuration, parsed on first use.
pub fn config() -> &'static Config {
    CONFIG.get_or_init(load_config)
}

impl BrandingConfig {
    pub fn report_branding(&self) -> ReportBranding {
        ReportBranding {
            name: self.name.clone(),
            tagline: self.tagline.clone(),
            footer: self.footer.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.api.base_url, "");
        assert_eq!(config.api.date_format, DateWireFormat::Iso);
        assert_eq!(config.ui.toast_ms, 3500);
        assert!(config.export.xlsx_script.ends_with(".js"));
    }
}
