use crate::export::ExportKind;
use crate::models::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Environment variable holding the network share that stands in for drive `Z:`.
pub const UNC_PATH_ENV: &str = "UNC_PATH";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub drives: BTreeMap<String, String>,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Glob patterns matched against paths relative to the opened directory.
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub formats: Vec<ExportKind>,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default)]
    pub default_category: Category,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            formats: Vec::new(),
            output_dir: default_output_dir(),
            default_category: Category::default(),
        }
    }
}

fn default_output_dir() -> String {
    ".".to_string()
}

impl AppConfig {
    /// Maps drive `Z` to `unc` unless `unc` is empty.
    pub fn with_unc_path(mut self, unc: Option<String>) -> Self {
        if let Some(unc) = unc.filter(|u| !u.trim().is_empty()) {
            self.drives.insert("z".to_string(), unc);
        }
        self
    }
}

pub fn load(path: Option<&str>) -> anyhow::Result<AppConfig> {
    let mut settings = config::Config::builder();
    if let Some(p) = path {
        settings = settings.add_source(config::File::with_name(p));
    } else {
        settings = settings.add_source(config::File::with_name("config/default").required(false));
    }
    settings = settings.add_source(config::Environment::with_prefix("FILECAT").separator("__"));
    let cfg = settings.build()?;
    let app: AppConfig = cfg.try_deserialize()?;
    Ok(app.with_unc_path(std::env::var(UNC_PATH_ENV).ok()))
}
