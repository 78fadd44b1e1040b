//! threadcounty-upload
//!
//! Runs the upload page's interactive behavior against a headless page, so
//! the validation, preview, submit feedback and alerts can be exercised from
//! a terminal with real files.
//!
//! Run with:
//!   cargo run -- select fabric.jpg scan.tif
//!   cargo run -- submit
//!   cargo run -- size 1536 5242880

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;

use threadcounty_upload::dom::{disk, memory::MemoryPage};
use threadcounty_upload::telemetry::init_tracing;
use threadcounty_upload::validate::{allowed_extension, extension_of, mime_for_extension};
use threadcounty_upload::{
    format_file_size, load_settings, PreviewResult, SelectionOutcome, Settings,
    UploadInteractionController,
};

#[derive(Parser)]
#[command(name = "threadcounty-upload", version, about = "Exercise the upload page behavior headlessly")]
struct Cli {
    /// JSON settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Select each file in turn, as if picked in the file dialog
    Select {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Submit the analysis form, then unload the page
    Submit,
    /// Format byte counts the way the preview caption does
    Size {
        #[arg(required = true)]
        bytes: Vec<u64>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref()).context("loading settings")?;
    init_tracing(&settings.log_filter);

    match cli.command {
        Command::Select { files } => select(&settings, &files).await,
        Command::Submit => {
            submit(&settings);
            Ok(())
        }
        Command::Size { bytes } => {
            for b in bytes {
                println!("{:>12}  {}", b, format_file_size(b));
            }
            Ok(())
        }
    }
}

async fn select(settings: &Settings, files: &[PathBuf]) -> anyhow::Result<()> {
    let page = MemoryPage::new(&settings.layout);
    let controller = UploadInteractionController::init(page.elements(), page.toolkit(), settings);
    let mut printed = 0;

    for path in files {
        let file = disk::open(path)
            .await
            .with_context(|| format!("opening {}", path.display()))?;
        println!("{} [{}; {}]", file.name, display_mime(&file.mime_type), format_file_size(file.size_bytes));

        if !allowed_extension(&file.name) {
            println!("  note: the upload endpoint refuses this extension");
        }
        let expected = extension_of(&file.name).and_then(|ext| mime_for_extension(&ext));
        match disk::sniff_mime(path).await {
            Ok(Some(sniffed)) if Some(sniffed) != expected && sniffed != file.mime_type => {
                println!("  note: content looks like {}", sniffed);
            }
            Ok(_) => {}
            Err(err) => debug!(%err, "could not sniff file header"),
        }

        page.file_input.choose(file);
        let outcome = controller.on_file_change();

        // Auto-dismiss runs on the real clock, so report alerts as they appear.
        let history = page.alerts.history();
        for alert in &history[printed..] {
            println!("  [{}] {}", alert.severity, alert.text);
        }
        printed = history.len();

        match outcome {
            SelectionOutcome::NoFile => println!("  no file input on this page"),
            SelectionOutcome::Rejected(_) => println!("  rejected, input cleared"),
            SelectionOutcome::Reading(pending) => match pending.finished().await {
                PreviewResult::Rendered => {
                    if let Some(preview) = controller.current_preview() {
                        println!("  preview: {}", preview.caption);
                    }
                }
                PreviewResult::NoContainer => println!("  accepted (no preview container)"),
                other => println!("  preview not shown: {:?}", other),
            },
        }
    }
    Ok(())
}

fn submit(settings: &Settings) {
    let page = MemoryPage::new(&settings.layout);
    let controller = UploadInteractionController::init(page.elements(), page.toolkit(), settings);

    println!("before:    {:?} {}", controller.submission_state(), describe(&page));
    controller.on_submit();
    println!("submitted: {:?} {}", controller.submission_state(), describe(&page));
    controller.on_before_unload();
    println!("unloaded:  {:?} {}", controller.submission_state(), describe(&page));
}

fn describe(page: &MemoryPage) -> String {
    let label = page.button.current_label().split_whitespace().collect::<Vec<_>>().join(" ");
    let state = if page.button.is_disabled() { "disabled" } else { "enabled" };
    format!("[{}] {}", state, label)
}

fn display_mime(mime: &str) -> &str {
    if mime.is_empty() { "unknown type" } else { mime }
}
