use owo_colors::OwoColorize;
use overview_core::guide::{Callout, GuideSection};
use overview_core::{Analysis, ChecklistResult, Tier};

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!("\n{} {} {}", "Overview".bold().bright_blue(), "v".dimmed(), VERSION.dimmed());
    eprintln!("{}", "Check web content against AI Overview criteria\n".dimmed());
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

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.bright_red());
}

/// Print one analysis to stdout under its heading
pub fn print_analysis(analysis: &Analysis) {
    println!("{}", format!("## {}", analysis.heading).bold().cyan());
    println!("{}", format!("model: {}", analysis.model).dimmed());
    println!();
    println!("{}", analysis.text);
    println!();
}

/// Print a scored checklist with its tier coloured by level
pub fn print_checklist(result: &ChecklistResult) {
    println!("{}", result.title.bold());
    let tier = match result.tier {
        Tier::High => result.tier.to_string().bright_green().to_string(),
        Tier::Medium => result.tier.to_string().bright_yellow().to_string(),
        Tier::Low => result.tier.to_string().bright_red().to_string(),
    };
    println!("  {} {} ({} points)", "Likelihood:".dimmed(), tier, result.points);
    println!("  {}\n", result.message);
}

/// Print a guide section
pub fn print_guide_section(section: &GuideSection) {
    println!("{}", "═".repeat(60).dimmed());
    println!("{}", section.title.bold().cyan());
    println!("{}", "═".repeat(60).dimmed());
    println!("{}\n", section.summary.dimmed());

    for item in &section.items {
        println!("{}", item.title.bold());
        println!("  {}", item.body);
        if let Some((callout, text)) = item.callout {
            match callout {
                Callout::Info => println!("  {} {}", "ℹ".blue(), text.bright_blue()),
                Callout::Warning => println!("  {} {}", "⚠".yellow(), text.bright_yellow()),
                Callout::Success => println!("  {} {}", "✓".green(), text.bright_green()),
            }
        }
        println!();
    }
}

/// Format text size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
