//! Format run summaries as text.

use crate::generator::{RunMode, RunReport};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::time::Duration;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// `1h 02m 03.456s`, dropping leading zero units.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let (hours, minutes) = (total / 3600, (total / 60) % 60);
    let seconds = (total % 60) as f64 + f64::from(elapsed.subsec_millis()) / 1000.0;
    match (hours, minutes) {
        (0, 0) => format!("{:.3}s", seconds),
        (0, m) => format!("{}m {:06.3}s", m, seconds),
        (h, m) => format!("{}h {:02}m {:06.3}s", h, m, seconds),
    }
}

/// Summary printed after a run.
pub fn format_run_summary(report: &RunReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Run Summary")));

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Field", "Value"]);
    let source_label = match report.mode {
        RunMode::Catalogue => "Root",
        RunMode::Physical | RunMode::Sort => "Input",
    };
    table.add_row(vec!["Mode".to_string(), report.mode.label().to_string()]);
    table.add_row(vec![source_label.to_string(), report.source.display().to_string()]);
    table.add_row(vec!["Rows".to_string(), report.rows.to_string()]);
    if report.mode == RunMode::Catalogue {
        table.add_row(vec!["Directories".to_string(), report.directories.to_string()]);
        table.add_row(vec!["Files".to_string(), report.files.to_string()]);
        if report.pruned > 0 {
            table.add_row(vec!["Empty directories removed".to_string(), report.pruned.to_string()]);
        }
    }
    table.add_row(vec!["Output".to_string(), report.output_file.display().to_string()]);
    table.add_row(vec!["Elapsed".to_string(), format_elapsed(report.elapsed)]);
    out.push_str(&format!("{}\n\nComplete!", table));
    out
}
