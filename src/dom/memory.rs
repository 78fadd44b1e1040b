//! Headless page: in-memory elements and toolkit.
//!
//! Backs the CLI and the test-suite. Every element is always constructed so
//! callers can inspect it; `MemoryPage::elements` only hands the controller
//! the ones the layout says are present.

use std::sync::{Arc, Mutex};

use crate::config::PageLayout;
use crate::dom::{
    AlertsContainer, AnalysisForm, FileInput, PageElements, PreviewContainer, SelectedFile,
    SubmitButton, Toolkit, TooltipTrigger,
};
use crate::notify::{AlertId, AlertNotification};
use crate::state::lock;

// ---------------------------------------------------------------------------
// File input
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryFileInput {
    file: Mutex<Option<SelectedFile>>,
}

impl MemoryFileInput {
    /// What the user picking a file in the dialog does.
    pub fn choose(&self, file: SelectedFile) {
        *lock(&self.file) = Some(file);
    }

    /// Name of the chosen file, `None` when the input is empty.
    pub fn value(&self) -> Option<String> {
        lock(&self.file).as_ref().map(|f| f.name.clone())
    }
}

impl FileInput for MemoryFileInput {
    fn first_file(&self) -> Option<SelectedFile> {
        lock(&self.file).clone()
    }

    fn clear(&self) {
        *lock(&self.file) = None;
    }
}

// ---------------------------------------------------------------------------
// Preview container
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryPreview {
    html:         Mutex<String>,
    replacements: Mutex<usize>,
}

impl MemoryPreview {
    pub fn content(&self) -> String {
        lock(&self.html).clone()
    }

    /// How many times the content was replaced.
    pub fn replacements(&self) -> usize {
        *lock(&self.replacements)
    }
}

impl PreviewContainer for MemoryPreview {
    fn replace_content(&self, html: &str) {
        *lock(&self.html) = html.to_owned();
        *lock(&self.replacements) += 1;
    }
}

// ---------------------------------------------------------------------------
// Form and submit button
// ---------------------------------------------------------------------------

struct ButtonState {
    label:    String,
    disabled: bool,
}

pub struct MemoryButton {
    state: Mutex<ButtonState>,
}

impl MemoryButton {
    pub fn new(label: impl Into<String>) -> Self {
        MemoryButton {
            state: Mutex::new(ButtonState { label: label.into(), disabled: false }),
        }
    }

    pub fn current_label(&self) -> String {
        lock(&self.state).label.clone()
    }

    pub fn is_disabled(&self) -> bool {
        lock(&self.state).disabled
    }
}

impl SubmitButton for MemoryButton {
    fn label(&self) -> String {
        self.current_label()
    }

    fn set_label(&self, html: &str) {
        lock(&self.state).label = html.to_owned();
    }

    fn set_disabled(&self, disabled: bool) {
        lock(&self.state).disabled = disabled;
    }
}

pub struct MemoryForm {
    button: Option<Arc<MemoryButton>>,
}

impl AnalysisForm for MemoryForm {
    fn submit_button(&self) -> Option<Arc<dyn SubmitButton>> {
        self.button.clone().map(|b| b as Arc<dyn SubmitButton>)
    }
}

// ---------------------------------------------------------------------------
// Alerts container
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryAlerts {
    nodes:   Mutex<Vec<AlertNotification>>,
    history: Mutex<Vec<AlertNotification>>,
}

impl MemoryAlerts {
    /// Alerts currently in the container, oldest first.
    pub fn visible(&self) -> Vec<AlertNotification> {
        lock(&self.nodes).clone()
    }

    /// Every alert ever appended, oldest first, including closed ones.
    pub fn history(&self) -> Vec<AlertNotification> {
        lock(&self.history).clone()
    }

    pub fn contains(&self, id: AlertId) -> bool {
        lock(&self.nodes).iter().any(|a| a.id == id)
    }

    /// Container markup, one rendered node per alert.
    pub fn html(&self) -> String {
        lock(&self.nodes).iter().map(|a| a.render()).collect()
    }

    fn remove(&self, id: AlertId) -> bool {
        let mut nodes = lock(&self.nodes);
        let before = nodes.len();
        nodes.retain(|a| a.id != id);
        nodes.len() != before
    }
}

impl AlertsContainer for MemoryAlerts {
    fn append(&self, alert: &AlertNotification) {
        lock(&self.nodes).push(alert.clone());
        lock(&self.history).push(alert.clone());
    }
}

// ---------------------------------------------------------------------------
// Toolkit
// ---------------------------------------------------------------------------

/// Records tooltip activations and removes closed alerts from the container.
pub struct MemoryToolkit {
    alerts:   Arc<MemoryAlerts>,
    tooltips: Mutex<Vec<TooltipTrigger>>,
    closed:   Mutex<Vec<AlertId>>,
}

impl MemoryToolkit {
    pub fn new(alerts: Arc<MemoryAlerts>) -> Self {
        MemoryToolkit {
            alerts,
            tooltips: Mutex::new(Vec::new()),
            closed:   Mutex::new(Vec::new()),
        }
    }

    pub fn tooltips(&self) -> Vec<TooltipTrigger> {
        lock(&self.tooltips).clone()
    }

    /// Alerts actually removed, in closing order.
    pub fn closed(&self) -> Vec<AlertId> {
        lock(&self.closed).clone()
    }
}

impl Toolkit for MemoryToolkit {
    fn activate_tooltip(&self, trigger: &TooltipTrigger) {
        lock(&self.tooltips).push(trigger.clone());
    }

    fn close_alert(&self, id: AlertId) {
        if self.alerts.remove(id) {
            lock(&self.closed).push(id);
        }
    }
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

pub struct MemoryPage {
    pub layout:     PageLayout,
    pub file_input: Arc<MemoryFileInput>,
    pub preview:    Arc<MemoryPreview>,
    pub form:       Arc<MemoryForm>,
    pub button:     Arc<MemoryButton>,
    pub alerts:     Arc<MemoryAlerts>,
    pub toolkit:    Arc<MemoryToolkit>,
}

impl MemoryPage {
    pub fn new(layout: &PageLayout) -> Self {
        let button = Arc::new(MemoryButton::new(layout.submit_label.clone()));
        let form = Arc::new(MemoryForm {
            button: layout.submit_button.then(|| button.clone()),
        });
        let alerts = Arc::new(MemoryAlerts::default());

        MemoryPage {
            layout: layout.clone(),
            file_input: Arc::new(MemoryFileInput::default()),
            preview: Arc::new(MemoryPreview::default()),
            form,
            button,
            toolkit: Arc::new(MemoryToolkit::new(alerts.clone())),
            alerts,
        }
    }

    /// A page with every element present.
    pub fn complete() -> Self {
        MemoryPage::new(&PageLayout::default())
    }

    /// The element references a controller sees once the page is ready.
    pub fn elements(&self) -> PageElements {
        let layout = &self.layout;
        PageElements {
            file_input: layout
                .file_input
                .then(|| self.file_input.clone() as Arc<dyn FileInput>),
            preview_container: layout
                .preview_container
                .then(|| self.preview.clone() as Arc<dyn PreviewContainer>),
            analysis_form: layout
                .analysis_form
                .then(|| self.form.clone() as Arc<dyn AnalysisForm>),
            alerts_container: layout
                .alerts_container
                .then(|| self.alerts.clone() as Arc<dyn AlertsContainer>),
            tooltip_triggers: layout.tooltip_triggers.clone(),
        }
    }

    pub fn toolkit(&self) -> Arc<dyn Toolkit> {
        self.toolkit.clone()
    }

    /// The user pressing an alert's close button: the toolkit removes the
    /// node straight away, before the controller hears about it.
    pub fn click_alert_close(&self, id: AlertId) {
        self.toolkit.close_alert(id);
    }
}
