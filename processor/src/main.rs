//! Playerdata CLI - process football datasets into curated tables
//!
//! ```bash
//! playerdata player_market_value.csv player_profiles.csv \
//!     team_details.csv transfer_history.csv out/
//! ```
//!
//! Writes `player_profiles_top2500.csv` and `transfer_history_filtered.csv`
//! into the output directory.

use clap::Parser;
use playerdata::{run_pipeline, InputFiles, PipelineOptions, PipelineReport};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "playerdata")]
#[command(
    about = "Process football dataset CSV files to extract top players and enrich transfer data",
    long_about = None
)]
struct Cli {
    /// Path to player_market_value.csv
    player_market_value: PathBuf,

    /// Path to player_profiles.csv
    player_profiles: PathBuf,

    /// Path to team_details.csv
    team_details: PathBuf,

    /// Path to transfer_history.csv
    transfer_history: PathBuf,

    /// Directory where output files will be saved
    output_dir: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let inputs = InputFiles::new(
        cli.player_market_value,
        cli.player_profiles,
        cli.team_details,
        cli.transfer_history,
    );

    // Missing inputs are reported before the banner and any output
    if let Err(e) = inputs.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    print_banner(&inputs, &cli.output_dir);

    match run_pipeline(&inputs, &cli.output_dir, &PipelineOptions::default()) {
        Ok(report) => print_summary(&cli.output_dir, &report),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_banner(inputs: &InputFiles, output_dir: &Path) {
    println!("{}", "=".repeat(60));
    println!("Football Dataset Processing");
    println!("{}", "=".repeat(60));
    println!("\nInput files:");
    println!("  - Market values: {}", inputs.market_values.display());
    println!("  - Player profiles: {}", inputs.player_profiles.display());
    println!("  - Team details: {}", inputs.team_details.display());
    println!("  - Transfer history: {}", inputs.transfer_history.display());
    println!("\nOutput directory: {}", output_dir.display());
}

fn print_summary(output_dir: &Path, report: &PipelineReport) {
    println!("\n{}", "=".repeat(60));
    println!("✓ Processing complete!");
    println!("{}", "=".repeat(60));
    println!("\nOutput files saved to: {}", output_dir.display());
    println!(
        "  - {} ({} players, includes prestigious players)",
        playerdata::config::TOP_PLAYERS_FILE,
        report.final_players
    );
    println!(
        "  - {} ({} transfers, with country columns, youth teams filtered)",
        playerdata::config::TRANSFERS_FILE,
        report.enriched_transfers
    );
    println!();
}
