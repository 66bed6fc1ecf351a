use crate::commands::args::RunSettings;
use crate::core::{
    config::SqitchConfig,
    error::Result,
    options::SqitchOptions,
    orchestrator::query_status,
    output::{print_info, print_section_header},
    runner::SystemRunner,
    sqitch_status::{StatusHeader, StatusReport},
};
use colored::*;

/// Query `sqitch status` and print what is pending
pub fn execute_status(
    overrides: SqitchOptions,
    json: bool,
    settings: &RunSettings,
) -> Result<StatusReport> {
    let config = SqitchConfig::resolve(settings.config_path.as_deref())?;
    let options = config.options_with(overrides);

    let report = query_status(&SystemRunner::new(), &options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(report)
}

fn print_report(report: &StatusReport) {
    print_header(report.header());

    if report.is_uninitialized() {
        print_info("Database is not managed by sqitch yet; every change in the plan is pending.");
    } else if report.has_nothing_pending() {
        print_info("Nothing to deploy (up-to-date)");
    } else if report.pending_change_names().is_empty() {
        print_info("No undeployed changes found in sqitch status output.");
    } else {
        print_section_header("Undeployed changes");
        for (i, name) in report.pending_change_names().iter().enumerate() {
            println!("  {} {}", format!("[{}]", i + 1).bright_black(), name.white());
        }
        println!();
    }
}

fn print_header(header: &StatusHeader) {
    if header.is_empty() {
        return;
    }

    println!();
    for (label, value) in header_fields(header) {
        println!("{} {}", format!("{label}:").blue(), value.white());
    }
}

/// Labelled header values that are present, in display order
fn header_fields(header: &StatusHeader) -> Vec<(&'static str, &str)> {
    [
        ("Database", &header.database),
        ("Project", &header.project),
        ("Name", &header.name),
        ("Tag", &header.tag),
        ("Deployed", &header.deployed),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.as_deref().map(|value| (label, value)))
    .collect()
}
