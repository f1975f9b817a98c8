//! `keep_90percent` subcommand

use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use crate::pipeline::{
    flag_column_name, keep_percent_frame, load_table, save_table, text_column, CONCEPT_ID,
    COVERAGE_REQUIRED,
};
use crate::report::RunSummary;
use crate::utils::{
    clear_on_error, create_spinner, finish_with_success, print_count, print_step_header,
    print_success,
};

/// Flag the harmonization rows that reach `threshold` percent of each
/// concept's records and write the flagged table to `output`.
pub fn run_keep_percent(
    harmonization_table: &Path,
    output: &Path,
    threshold: f64,
) -> Result<RunSummary> {
    let mut summary = RunSummary::new("Included Rows");

    // Step 1: Load
    print_step_header(1, "Load Table");
    let step_start = Instant::now();
    let spinner = create_spinner("Reading harmonization table...");
    let harmonization = clear_on_error(
        &spinner,
        load_table(harmonization_table, &COVERAGE_REQUIRED),
    )?;
    finish_with_success(
        &spinner,
        &format!("Harmonization table loaded ({} rows)", harmonization.height()),
    );
    summary.input_rows = harmonization.height();
    summary.set_load_time(step_start.elapsed());

    // Step 2: Coverage flags
    print_step_header(2, "Cumulative Coverage");
    let step_start = Instant::now();
    let mut flagged = keep_percent_frame(&harmonization, threshold).with_context(|| {
        format!(
            "Invalid harmonization table: {}",
            harmonization_table.display()
        )
    })?;

    let flag_column = flag_column_name(threshold);
    let included = flagged
        .column(&flag_column)?
        .bool()?
        .into_iter()
        .filter(|flag| *flag == Some(true))
        .count();
    let groups = text_column(&flagged, CONCEPT_ID)?
        .into_iter()
        .collect::<HashSet<_>>()
        .len();

    summary.groups = groups;
    summary.flagged_rows = included;
    summary.output_rows = flagged.height();
    print_count(
        "row(s) needed for coverage",
        included,
        Some(&format!("({}% of {} OMOP ID(s))", threshold, groups)),
    );
    print_success("Coverage flags computed");
    summary.set_transform_time(step_start.elapsed());

    // Step 3: Save output
    print_step_header(3, "Save Results");
    let step_start = Instant::now();
    let spinner = create_spinner("Writing output file...");
    clear_on_error(&spinner, save_table(&mut flagged, output))?;
    finish_with_success(&spinner, &format!("Saved to {}", output.display()));
    summary.set_save_time(step_start.elapsed());

    Ok(summary)
}
