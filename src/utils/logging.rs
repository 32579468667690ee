// file: src/utils/logging.rs
// description: Tracing subscriber initialization with optional ANSI coloring

use colored::*;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub fn init_logger(colored_output: bool, verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    // RUST_LOG wins over the --verbose flag when set; dependencies stay at warn
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,lead_enricher={}", level)));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(verbose)
        .with_line_number(verbose)
        .compact()
        .with_ansi(colored_output);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub fn format_success(msg: &str) -> String {
    format!("{} {}", "✓".green().bold(), msg.green())
}

pub fn format_error(msg: &str) -> String {
    format!("{} {}", "✗".red().bold(), msg.red())
}

pub fn format_warning(msg: &str) -> String {
    format!("{} {}", "⚠".yellow().bold(), msg.yellow())
}

pub fn format_info(msg: &str) -> String {
    format!("{} {}", "ℹ".blue().bold(), msg)
}

pub fn format_step(step: usize, total: usize, msg: &str) -> String {
    format!("{} {}", format!("[{}/{}]", step, total).cyan().bold(), msg)
}

pub fn format_flag(label: &str, value: bool) -> String {
    if value {
        format!("{}: {}", label, "Да".green().bold())
    } else {
        format!("{}: {}", label, "Нет".dimmed())
    }
}

/// `label: done/total (pct%)`, with 0% for an empty total.
pub fn format_tally(label: &str, done: usize, total: usize) -> String {
    let percent = if total == 0 {
        0.0
    } else {
        done as f64 / total as f64 * 100.0
    };
    format!(
        "{}: {} ({:.0}%)",
        label,
        format!("{}/{}", done, total).bold(),
        percent
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_flag_labels() {
        assert!(format_flag("Импортёр", true).contains("Да"));
        assert!(format_flag("Импортёр", false).contains("Нет"));
        assert!(format_flag("Импортёр", false).starts_with("Импортёр: "));
    }

    #[test]
    fn test_format_tally() {
        let line = format_tally("Проверено", 3, 12);
        assert!(line.starts_with("Проверено: "));
        assert!(line.contains("3/12"));
        assert!(line.ends_with("(25%)"));

        assert!(format_tally("Проверено", 0, 0).ends_with("(0%)"));
    }
}
