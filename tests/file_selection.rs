//! File selection: validation, input reset, preview rendering, stale reads.

use std::io;
use std::time::Duration;

use async_trait::async_trait;
use threadcounty_upload::dom::memory::MemoryPage;
use threadcounty_upload::dom::{FileContents, TooltipTrigger};
use threadcounty_upload::{
    PageEvent, PageLayout, PreviewResult, SelectedFile, SelectionOutcome, Settings, Severity,
    UploadInteractionController, ValidationError,
};

const MIB: u64 = 1024 * 1024;
const TYPE_MESSAGE: &str = "Please select a valid image file (JPG, PNG, TIFF, or BMP)";
const SIZE_MESSAGE: &str = "File is too large. Maximum size is 16MB";

fn setup(layout: PageLayout) -> (MemoryPage, UploadInteractionController) {
    let settings = Settings { layout: layout.clone(), ..Settings::default() };
    let page = MemoryPage::new(&layout);
    let controller = UploadInteractionController::init(page.elements(), page.toolkit(), &settings);
    (page, controller)
}

/// Contents that take a while to read.
struct SlowContents {
    delay: Duration,
    bytes: Vec<u8>,
}

#[async_trait]
impl FileContents for SlowContents {
    async fn read_all(&self) -> io::Result<Vec<u8>> {
        tokio::time::sleep(self.delay).await;
        Ok(self.bytes.clone())
    }
}

struct UnreadableContents;

#[async_trait]
impl FileContents for UnreadableContents {
    async fn read_all(&self) -> io::Result<Vec<u8>> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "locked by another process"))
    }
}

fn slow_png(name: &str, delay_ms: u64) -> SelectedFile {
    SelectedFile::new(
        name,
        "image/png",
        4,
        SlowContents { delay: Duration::from_millis(delay_ms), bytes: vec![0x89, 0x50, 0x4e, 0x47] },
    )
}

async fn expect_rendered(outcome: SelectionOutcome) {
    match outcome {
        SelectionOutcome::Reading(pending) => assert_eq!(pending.finished().await, PreviewResult::Rendered),
        other => panic!("expected a preview read, got {:?}", other),
    }
}

#[tokio::test]
async fn wrong_type_shows_one_danger_alert_and_clears_input() {
    let (page, controller) = setup(PageLayout::default());
    page.file_input.choose(SelectedFile::in_memory("weave.gif", "image/gif", vec![0; 10]));

    let outcome = controller.on_file_change();
    assert!(matches!(
        outcome,
        SelectionOutcome::Rejected(ValidationError::InvalidFileType { .. })
    ));

    let alerts = page.alerts.visible();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].severity, Severity::Danger);
    assert_eq!(alerts[0].text, TYPE_MESSAGE);
    assert!(page.alerts.html().contains("alert-danger"));

    assert_eq!(page.file_input.value(), None);
    assert_eq!(page.preview.replacements(), 0);
    assert_eq!(controller.current_preview(), None);
}

#[tokio::test]
async fn oversized_file_is_rejected_even_with_valid_type() {
    let (page, controller) = setup(PageLayout::default());
    page.file_input.choose(SelectedFile::new("huge.png", "image/png", 16 * MIB + 1, Vec::new()));

    let outcome = controller.on_file_change();
    assert!(matches!(
        outcome,
        SelectionOutcome::Rejected(ValidationError::FileTooLarge { .. })
    ));

    let alerts = page.alerts.visible();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].text, SIZE_MESSAGE);
    assert_eq!(page.file_input.value(), None);
    assert_eq!(page.preview.replacements(), 0);
}

#[tokio::test]
async fn type_error_wins_over_size_error() {
    let (page, controller) = setup(PageLayout::default());
    page.file_input.choose(SelectedFile::new("huge.webp", "image/webp", 64 * MIB, Vec::new()));

    controller.on_file_change();

    let alerts = page.alerts.visible();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].text, TYPE_MESSAGE);
}

#[tokio::test]
async fn valid_file_renders_image_and_caption() {
    let (page, controller) = setup(PageLayout::default());
    page.file_input.choose(SelectedFile::in_memory("weave.png", "image/png", vec![7; 1536]));

    expect_rendered(controller.on_file_change()).await;

    let html = page.preview.content();
    assert!(html.contains(r#"<img src="data:image/png;base64,"#));
    assert!(html.contains("weave.png (1.5 KB)"));
    assert_eq!(controller.current_preview().unwrap().caption, "weave.png (1.5 KB)");

    assert_eq!(page.file_input.value().as_deref(), Some("weave.png"));
    assert!(page.alerts.visible().is_empty());
}

#[tokio::test]
async fn file_at_the_limit_is_accepted() {
    let (page, controller) = setup(PageLayout::default());
    page.file_input.choose(SelectedFile::new("edge.tif", "image/tiff", 16 * MIB, vec![1, 2, 3]));

    expect_rendered(controller.on_file_change()).await;
    assert!(page.preview.content().contains("edge.tif (16.0 MB)"));
}

#[tokio::test]
async fn missing_preview_container_still_reads() {
    let layout = PageLayout { preview_container: false, ..PageLayout::default() };
    let (page, controller) = setup(layout);
    page.file_input.choose(SelectedFile::in_memory("weave.jpg", "image/jpeg", vec![0xff, 0xd8]));

    match controller.on_file_change() {
        SelectionOutcome::Reading(pending) => {
            assert_eq!(pending.finished().await, PreviewResult::NoContainer)
        }
        other => panic!("expected a preview read, got {:?}", other),
    }
    assert_eq!(page.preview.replacements(), 0);
    assert_eq!(controller.current_preview(), None);
}

#[tokio::test]
async fn missing_file_input_is_a_no_op() {
    let layout = PageLayout { file_input: false, ..PageLayout::default() };
    let (page, controller) = setup(layout);
    page.file_input.choose(SelectedFile::in_memory("weave.gif", "image/gif", vec![0]));

    assert!(matches!(controller.on_file_change(), SelectionOutcome::NoFile));
    assert!(page.alerts.visible().is_empty());
}

#[tokio::test]
async fn empty_input_is_a_no_op() {
    let (page, controller) = setup(PageLayout::default());

    assert!(matches!(controller.on_file_change(), SelectionOutcome::NoFile));
    assert!(page.alerts.visible().is_empty());
    assert_eq!(page.preview.replacements(), 0);
}

#[tokio::test]
async fn reselecting_revalidates_every_time() {
    let (page, controller) = setup(PageLayout::default());
    let bad = SelectedFile::in_memory("weave.gif", "image/gif", vec![0]);

    page.file_input.choose(bad.clone());
    controller.on_file_change();
    page.file_input.choose(bad);
    controller.on_file_change();
    assert_eq!(page.alerts.visible().len(), 2);

    let good = SelectedFile::in_memory("weave.bmp", "image/bmp", vec![b'B', b'M']);
    page.file_input.choose(good.clone());
    expect_rendered(controller.on_file_change()).await;
    page.file_input.choose(good);
    expect_rendered(controller.on_file_change()).await;
    assert_eq!(page.preview.replacements(), 2);
}

#[tokio::test(start_paused = true)]
async fn slow_earlier_read_does_not_overwrite_newer_preview() {
    let (page, controller) = setup(PageLayout::default());

    page.file_input.choose(slow_png("first.png", 1_000));
    let SelectionOutcome::Reading(first) = controller.on_file_change() else {
        panic!("first selection should start a read");
    };

    page.file_input.choose(slow_png("second.png", 10));
    let SelectionOutcome::Reading(second) = controller.on_file_change() else {
        panic!("second selection should start a read");
    };

    assert_eq!(second.finished().await, PreviewResult::Rendered);
    assert_eq!(first.finished().await, PreviewResult::Stale);

    assert!(page.preview.content().contains("second.png (4 bytes)"));
    assert_eq!(page.preview.replacements(), 1);
    assert_eq!(controller.current_preview().unwrap().sequence, 2);
}

#[tokio::test(start_paused = true)]
async fn rejected_selection_discards_pending_preview() {
    let (page, controller) = setup(PageLayout::default());

    page.file_input.choose(slow_png("first.png", 500));
    let SelectionOutcome::Reading(first) = controller.on_file_change() else {
        panic!("first selection should start a read");
    };

    page.file_input.choose(SelectedFile::in_memory("notes.txt", "text/plain", vec![b'x']));
    controller.on_file_change();

    assert_eq!(first.finished().await, PreviewResult::Stale);
    assert_eq!(page.preview.replacements(), 0);
}

#[tokio::test]
async fn unreadable_file_renders_nothing() {
    let (page, controller) = setup(PageLayout::default());
    page.file_input.choose(SelectedFile::new("locked.png", "image/png", 2048, UnreadableContents));

    match controller.on_file_change() {
        SelectionOutcome::Reading(pending) => {
            assert_eq!(pending.finished().await, PreviewResult::ReadFailed)
        }
        other => panic!("expected a preview read, got {:?}", other),
    }
    assert_eq!(page.preview.replacements(), 0);
    assert!(page.alerts.visible().is_empty());
}

#[tokio::test]
async fn dispatched_change_event_renders_preview() {
    let (page, controller) = setup(PageLayout::default());
    page.file_input.choose(SelectedFile::in_memory("weave.png", "image/png", vec![1; 2048]));

    controller.dispatch(PageEvent::FileChanged);
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }

    assert!(page.preview.content().contains("weave.png (2.0 KB)"));
}

#[tokio::test]
async fn dispatched_rejection_alerts_and_clears_input() {
    let (page, controller) = setup(PageLayout::default());
    page.file_input.choose(SelectedFile::new("huge.bmp", "image/bmp", 16 * MIB + 1, Vec::new()));

    controller.dispatch(PageEvent::FileChanged);

    assert_eq!(page.file_input.value(), None);
    assert_eq!(page.alerts.visible()[0].text, SIZE_MESSAGE);
}

#[tokio::test]
async fn tooltips_are_activated_on_init() {
    let layout = PageLayout {
        tooltip_triggers: vec![TooltipTrigger { element_id: "unit-help".into(), title: "cm or inch".into() }],
        ..PageLayout::default()
    };
    let (page, _controller) = setup(layout.clone());
    assert_eq!(page.toolkit.tooltips(), layout.tooltip_triggers);

    let (bare, _controller) = setup(PageLayout { tooltip_triggers: Vec::new(), ..PageLayout::default() });
    assert!(bare.toolkit.tooltips().is_empty());
}
