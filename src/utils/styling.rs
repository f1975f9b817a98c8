//! Terminal styling utilities for step-by-step console output

use console::{style, Emoji};
use std::path::Path;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static GEAR: Emoji<'_, '_> = Emoji("⚙️  ", "");

const BOX_WIDTH: usize = 60;

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {} {}",
        style("labmerge").cyan().bold(),
        style(format!("v{}", version)).dim()
    );
    println!(
        "    {}",
        style("Kanta lab harmonization table enrichment").dim()
    );
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print configuration card.
///
/// `inputs` lists every table read by the run; `setting` is the
/// operation-specific parameter shown under the paths.
pub fn print_config(operation: &str, inputs: &[&Path], output: &Path, setting: (&str, String)) {
    let line = "─".repeat(BOX_WIDTH - 2);

    println!("    ┌{}┐", line);
    println!("    │ {:<width$}│", style(operation).cyan().bold(), width = BOX_WIDTH - 3);
    println!("    ├{}┤", line);
    for input in inputs {
        println!(
            "    │  {}Input:  {:<width$}│",
            FOLDER,
            truncate_path(input, BOX_WIDTH - 17),
            width = BOX_WIDTH - 17
        );
    }
    println!(
        "    │  {}Output: {:<width$}│",
        SAVE,
        truncate_path(output, BOX_WIDTH - 17),
        width = BOX_WIDTH - 17
    );
    println!("    ├{}┤", line);
    let (label, value) = setting;
    println!(
        "    │  {}{}: {:<width$}│",
        GEAR,
        label,
        style(value).yellow(),
        width = BOX_WIDTH.saturating_sub(9 + label.len())
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize, detail: Option<&str>) {
    if let Some(info) = detail {
        println!(
            "      Found {} {} {}",
            style(count).yellow().bold(),
            description,
            style(info).dim()
        );
    } else {
        println!(
            "      Found {} {}",
            style(count).yellow().bold(),
            description
        );
    }
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("labmerge complete!").green().bold()
    );
    println!();
}

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    }
}
