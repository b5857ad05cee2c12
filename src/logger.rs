//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro, only printed with `--verbose`
//! - `report_ok` / `report_error` for per-item check results
//!
//! # Example
//!
//! ```ignore
//! log!("serve"; "http://{}", addr);
//! debug!("live"; "client connected (total: {})", count);
//! ```

use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use std::{
    io::{Write, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "serve" => prefix.bright_blue().bold().to_string(),
        "live" => prefix.bright_green().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Check Reports
// ============================================================================

/// Format a report line: symbol, message, and indented detail lines.
fn format_report(symbol: &str, message: &str, detail: &str) -> String {
    if detail.is_empty() {
        return format!("{symbol} {message}");
    }
    let detail: Vec<_> = detail.lines().map(|line| format!("  {line}")).collect();
    format!("{symbol} {message}\n{}", detail.join("\n"))
}

/// Report a passing item (✓ prefix, green).
pub fn report_ok(message: &str) {
    let line = format_report(&"✓".green().to_string(), message, "");
    println!("{line}");
}

/// Report a warning (⚠ prefix, yellow) with detail.
pub fn report_warning(message: &str, detail: &str) {
    let line = format_report(&"⚠".yellow().to_string(), message, detail);
    println!("{line}");
}

/// Report a failing item (✗ prefix, red) with detail.
pub fn report_error(message: &str, detail: &str) {
    let line = format_report(&"✗".red().to_string(), message, detail);
    println!("{line}");
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_toggle() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }

    #[test]
    fn test_report_single_line() {
        assert_eq!(format_report("✓", "post: hello", ""), "✓ post: hello");
    }

    #[test]
    fn test_report_detail_indented() {
        let line = format_report("✗", "post: hello", "duplicate id `intro`\nduplicate id `end`");
        assert_eq!(line.matches('\n').count(), 2);
        assert!(line.contains("\n  duplicate id `intro`"));
        assert!(line.ends_with("  duplicate id `end`"));
    }
}
