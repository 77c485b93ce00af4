//! Panic hook printing a crash report with the current extraction context.
//!
//! The report goes to stderr so a crash never leaves half a JSON document on
//! stdout looking like valid output.

use super::context::{get_current_context, get_progress, ExtractionContext};
use std::panic::PanicHookInfo;
use tracing::Span;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const RULE: &str = "════════════════════════════════════════════════════════════════════════════════";

/// Install the crash-report hook. Call once, early in `main`.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        print_crash_report(info);
    }));
}

fn print_crash_report(info: &PanicHookInfo<'_>) {
    let context = get_current_context();
    let (processed, total) = get_progress();

    eprintln!();
    eprintln!("{RULE}");
    eprintln!("ENTITYMAP CRASH REPORT");
    eprintln!("  Version: {}", VERSION);
    eprintln!("  Platform: {}", std::env::consts::OS);
    eprintln!("  Time: {}", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
    eprintln!("{RULE}");
    print_panic_details(info);
    print_context_section(&context, processed, total);

    if std::env::var("RUST_BACKTRACE").is_ok() {
        eprintln!("{}", std::backtrace::Backtrace::capture());
    } else {
        eprintln!("Run with RUST_BACKTRACE=1 for stack trace");
    }
    eprintln!("{RULE}");
}

fn print_panic_details(info: &PanicHookInfo<'_>) {
    eprintln!("  PANIC: {}", truncate(&extract_panic_message(info), 200));

    if let Some(location) = info.location() {
        eprintln!(
            "  Location: {}:{}:{}",
            location.file(),
            location.line(),
            location.column()
        );
    }
}

fn print_context_section(context: &ExtractionContext, processed: usize, total: usize) {
    match &context.phase {
        Some(phase) => eprintln!("  Phase: {}", phase),
        None => eprintln!("  Phase: (not set - crash occurred before extraction started)"),
    }

    if let Some(metadata) = Span::current().metadata() {
        eprintln!("  Span: {}", metadata.name());
    }

    if let Some(file) = &context.current_file {
        eprintln!("  File: {}", file.display());
    }

    if total > 0 {
        let pct = (processed as f64 / total as f64 * 100.0) as usize;
        eprintln!("  Progress: {} / {} files ({}%)", processed, total, pct);
    }
}

fn extract_panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
