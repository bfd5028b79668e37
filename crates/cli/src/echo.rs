use owo_colors::OwoColorize;
use shiplabel_core::LabelDimension;

use crate::VERSION;

/// Print the verbose-mode banner: version, then the label about to be built
pub fn print_banner(size: &LabelDimension, weight: &str, country: &str) {
    eprintln!("\n{} {} {}", "shiplabel".bold().bright_blue(), "v".dimmed(), VERSION.dimmed());
    eprintln!(
        "{} {} {} {}\n",
        size.to_string().bright_white(),
        format!("· {} lbs", weight).dimmed(),
        "· fallback country".dimmed(),
        country.bright_white()
    );
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print an indented label/value detail line
pub fn print_detail(label: &str, value: &str) {
    eprintln!("  {} {}", format!("{}:", label).dimmed(), value.bright_white());
}

/// Print timing information for the auto-fill round trip
pub fn print_timing(label: &str, duration: std::time::Duration) {
    let ms = duration.as_secs_f64() * 1000.0;
    let indicator = if ms < 1500.0 {
        "fast".dimmed().to_string()
    } else if ms < 5000.0 {
        "moderate".bright_yellow().to_string()
    } else {
        "slow".bright_red().to_string()
    };

    eprintln!("  {} {:>8.2}ms ({})", format!("{}:", label).dimmed(), ms, indicator);
}
