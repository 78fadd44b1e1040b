use std::fmt;

use serde::{Deserialize, Serialize};

use crate::preview::render::{fill_template, html_escape};

const TEMPLATE: &str = include_str!("assets/alert.html");

/// Identifies one alert for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlertId(pub u64);

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "alert-{}", self.0)
    }
}

/// Visual styling of an alert. Maps onto the toolkit's `alert-<name>` classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info    => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Danger  => "danger",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dismissible message appended to the alerts container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertNotification {
    pub id: AlertId,
    pub text: String,
    pub severity: Severity,
}

impl AlertNotification {
    pub fn new(id: AlertId, text: impl Into<String>, severity: Severity) -> Self {
        AlertNotification { id, text: text.into(), severity }
    }

    /// The alert node markup, including its close affordance.
    pub fn render(&self) -> String {
        fill_template(TEMPLATE, |token| match token {
            "ALERT_ID" => Some(self.id.to_string()),
            "SEVERITY" => Some(self.severity.as_str().to_owned()),
            "MESSAGE"  => Some(html_escape(&self.text)),
            _          => None,
        })
    }
}
