use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::dom::TooltipTrigger;
use crate::error::{UploadError, UploadResult};
use crate::validate::UploadLimits;

/// Top-level settings.
///
/// Resolution order: defaults, then the optional JSON file, then
/// environment variables:
/// - `THREADCOUNTY_MAX_FILE_SIZE`:    upload ceiling in bytes
/// - `THREADCOUNTY_ALERT_DISMISS_MS`: alert auto-dismiss delay
/// - `THREADCOUNTY_LOG`:              tracing filter directive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub limits: UploadLimits,
    pub alert_dismiss_ms: u64,
    pub log_filter: String,
    pub layout: PageLayout,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            limits: UploadLimits::default(),
            alert_dismiss_ms: 5000,
            log_filter: "info".to_owned(),
            layout: PageLayout::default(),
        }
    }
}

impl Settings {
    pub fn alert_dismiss_after(&self) -> Duration {
        Duration::from_millis(self.alert_dismiss_ms)
    }
}

/// Which elements the headless page carries. Everything is present by
/// default; switching a flag off reproduces partial page markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    pub file_input: bool,
    pub preview_container: bool,
    pub analysis_form: bool,
    pub submit_button: bool,
    pub alerts_container: bool,
    pub submit_label: String,
    pub tooltip_triggers: Vec<TooltipTrigger>,
}

impl Default for PageLayout {
    fn default() -> Self {
        PageLayout {
            file_input: true,
            preview_container: true,
            analysis_form: true,
            submit_button: true,
            alerts_container: true,
            submit_label: "<i class=\"bi bi-search\"></i> Analyze Fabric".to_owned(),
            tooltip_triggers: vec![
                TooltipTrigger {
                    element_id: "unit-help".to_owned(),
                    title: "Unit used for the thread density".to_owned(),
                },
                TooltipTrigger {
                    element_id: "reference-length-help".to_owned(),
                    title: "Length of fabric visible in the image".to_owned(),
                },
            ],
        }
    }
}

/// Loads settings from `path` (if given) and the environment.
///
/// A missing file is an error only when a path was given explicitly.
pub fn load_settings(path: Option<&Path>) -> UploadResult<Settings> {
    let mut settings = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            serde_json::from_str::<Settings>(&raw)?
        }
        None => Settings::default(),
    };
    apply_env(&mut settings, |key| std::env::var(key).ok())?;
    check_limits(&settings.limits)?;
    Ok(settings)
}

fn check_limits(limits: &UploadLimits) -> UploadResult<()> {
    if limits.allowed_types.is_empty() {
        return Err(UploadError::Config("limits.allowed_types must list at least one MIME type".to_owned()));
    }
    Ok(())
}

fn apply_env<F>(settings: &mut Settings, var: F) -> UploadResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = var("THREADCOUNTY_MAX_FILE_SIZE") {
        settings.limits.max_file_size = parse_u64("THREADCOUNTY_MAX_FILE_SIZE", &v)?;
    }
    if let Some(v) = var("THREADCOUNTY_ALERT_DISMISS_MS") {
        settings.alert_dismiss_ms = parse_u64("THREADCOUNTY_ALERT_DISMISS_MS", &v)?;
    }
    if let Some(v) = var("THREADCOUNTY_LOG") {
        settings.log_filter = v;
    }
    Ok(())
}

fn parse_u64(key: &str, value: &str) -> UploadResult<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| UploadError::Config(format!("{} must be a whole number, got '{}'", key, value)))
}
