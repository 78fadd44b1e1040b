//! Submit control feedback and its restoration on unload.

use threadcounty_upload::dom::memory::MemoryPage;
use threadcounty_upload::dom::SubmitButton;
use threadcounty_upload::{PageEvent, PageLayout, Settings, SubmissionUiState, UploadInteractionController};

const LABEL: &str = "<i class=\"bi bi-search\"></i> Analyze Fabric";

fn setup(layout: PageLayout) -> (MemoryPage, UploadInteractionController) {
    let settings = Settings { layout: layout.clone(), ..Settings::default() };
    let page = MemoryPage::new(&layout);
    let controller = UploadInteractionController::init(page.elements(), page.toolkit(), &settings);
    (page, controller)
}

#[test]
fn submit_shows_processing_and_disables() {
    let (page, controller) = setup(PageLayout::default());
    assert_eq!(controller.submission_state(), SubmissionUiState::Idle);

    controller.dispatch(PageEvent::FormSubmitted);

    assert_eq!(controller.submission_state(), SubmissionUiState::Submitting);
    assert!(page.button.is_disabled());
    let label = page.button.current_label();
    assert!(label.contains("Processing..."));
    assert!(label.contains("spinner-border"));
}

#[test]
fn unload_restores_label_and_enables() {
    let (page, controller) = setup(PageLayout::default());

    controller.dispatch(PageEvent::FormSubmitted);
    controller.dispatch(PageEvent::BeforeUnload);

    assert_eq!(controller.submission_state(), SubmissionUiState::Idle);
    assert!(!page.button.is_disabled());
    assert_eq!(page.button.current_label(), LABEL);
}

#[test]
fn unload_without_submission_changes_nothing() {
    let (page, controller) = setup(PageLayout::default());

    controller.dispatch(PageEvent::BeforeUnload);

    assert!(!page.button.is_disabled());
    assert_eq!(page.button.current_label(), LABEL);
}

#[test]
fn repeated_submit_keeps_the_first_label() {
    let (page, controller) = setup(PageLayout::default());

    controller.on_submit();
    controller.on_submit();
    controller.on_before_unload();

    assert_eq!(page.button.current_label(), LABEL);
    assert!(!page.button.is_disabled());
}

#[test]
fn restoration_fires_once_per_submission() {
    let (page, controller) = setup(PageLayout::default());

    controller.on_submit();
    controller.on_before_unload();
    // Something else relabels the button; a second unload must not undo it.
    page.button.set_label("Analyze Again");
    controller.on_before_unload();
    assert_eq!(page.button.current_label(), "Analyze Again");

    controller.on_submit();
    assert!(page.button.is_disabled());
    controller.on_before_unload();
    assert_eq!(page.button.current_label(), "Analyze Again");
}

#[test]
fn form_without_submit_button_is_left_alone() {
    let (page, controller) = setup(PageLayout { submit_button: false, ..PageLayout::default() });

    controller.on_submit();

    assert_eq!(controller.submission_state(), SubmissionUiState::Idle);
    assert!(!page.button.is_disabled());
    assert_eq!(page.button.current_label(), LABEL);
}

#[test]
fn page_without_form_is_left_alone() {
    let (page, controller) = setup(PageLayout { analysis_form: false, ..PageLayout::default() });

    controller.on_submit();

    assert_eq!(controller.submission_state(), SubmissionUiState::Idle);
    assert!(!page.button.is_disabled());
}
