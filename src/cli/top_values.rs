//! `add_top10_lab_values` subcommand

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use crate::pipeline::{
    join_top_values, load_table, read_lab_value_stats, save_table, top_values_by_key,
    HARMONIZATION_KEY, STATS_REQUIRED,
};
use crate::report::RunSummary;
use crate::utils::{
    clear_on_error, create_spinner, finish_with_success, print_count, print_info,
    print_step_header, print_success,
};

/// Join the top lab values of each harmonization key onto the harmonization
/// table and write the result to `output`.
pub fn run_add_top_values(
    harmonization_table: &Path,
    finregistry_stats: &Path,
    output: &Path,
    top_n: usize,
) -> Result<RunSummary> {
    let mut summary = RunSummary::new("Matched Rows");

    // Step 1: Load both tables
    print_step_header(1, "Load Tables");
    let step_start = Instant::now();
    let spinner = create_spinner("Reading harmonization table...");
    let harmonization = clear_on_error(
        &spinner,
        load_table(harmonization_table, &HARMONIZATION_KEY),
    )?;
    finish_with_success(
        &spinner,
        &format!("Harmonization table loaded ({} rows)", harmonization.height()),
    );

    let spinner = create_spinner("Reading FinRegistry stats...");
    let stats = clear_on_error(
        &spinner,
        load_table(finregistry_stats, &STATS_REQUIRED).and_then(|stats_df| {
            read_lab_value_stats(&stats_df)
                .with_context(|| format!("Invalid stats table: {}", finregistry_stats.display()))
        }),
    )?;
    finish_with_success(
        &spinner,
        &format!("FinRegistry stats loaded ({} rows)", stats.len()),
    );
    summary.input_rows = harmonization.height();
    summary.set_load_time(step_start.elapsed());

    // Step 2: Rank and join
    print_step_header(2, "Top Lab Values");
    let step_start = Instant::now();
    let top_values = top_values_by_key(&stats, top_n);
    print_count(
        "lab test key(s) with values",
        top_values.len(),
        Some(&format!("(top {} each)", top_n)),
    );

    let outcome = join_top_values(&harmonization, &top_values).with_context(|| {
        format!(
            "Invalid harmonization table: {}",
            harmonization_table.display()
        )
    })?;
    summary.groups = top_values.len();
    summary.flagged_rows = outcome.matched_rows;
    summary.output_rows = outcome.frame.height();

    if outcome.matched_rows == 0 {
        print_info("No harmonization row matched the FinRegistry stats");
    } else {
        print_success(&format!(
            "{} of {} harmonization row(s) matched",
            outcome.matched_rows,
            outcome.frame.height()
        ));
    }
    summary.set_transform_time(step_start.elapsed());

    // Step 3: Save output
    print_step_header(3, "Save Results");
    let step_start = Instant::now();
    let spinner = create_spinner("Writing output file...");
    let mut frame = outcome.frame;
    clear_on_error(&spinner, save_table(&mut frame, output))?;
    finish_with_success(&spinner, &format!("Saved to {}", output.display()));
    summary.set_save_time(step_start.elapsed());

    Ok(summary)
}
