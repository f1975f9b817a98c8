//! labmerge: Kanta lab harmonization table enrichment CLI

use anyhow::Result;
use clap::Parser;

use labmerge::cli::{run_add_top_values, run_keep_percent, Cli, Commands};
use labmerge::utils::{print_banner, print_completion, print_config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    print_banner(env!("CARGO_PKG_VERSION"));

    let summary = match &cli.command {
        Commands::AddTop10LabValues {
            finregistry_stats,
            top_n,
        } => {
            print_config(
                "Add top lab values",
                &[cli.harmonization_table.as_path(), finregistry_stats.as_path()],
                &cli.output,
                ("Values per key", top_n.to_string()),
            );
            run_add_top_values(&cli.harmonization_table, finregistry_stats, &cli.output, *top_n)?
        }
        Commands::Keep90Percent { threshold } => {
            print_config(
                "Keep first to threshold",
                &[cli.harmonization_table.as_path()],
                &cli.output,
                ("Coverage threshold", format!("{}%", threshold)),
            );
            run_keep_percent(&cli.harmonization_table, &cli.output, *threshold)?
        }
    };

    summary.display();
    print_completion();

    Ok(())
}
