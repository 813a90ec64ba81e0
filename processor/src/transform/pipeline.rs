//! End-to-end run over the four input datasets.
//!
//! ```text
//! values ──▶ sort ──▶ select ──▶ top players ─────────────┐
//!                        │                                ▼
//! transfers ──▶ filter ──┴──▶ enrich ──▶ transfers   prestige merge ──▶ top players
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use playerdata::{run_pipeline, InputFiles, PipelineOptions};
//! use std::path::Path;
//!
//! let inputs = InputFiles::new(
//!     "data/player_market_value.csv",
//!     "data/player_profiles.csv",
//!     "data/team_details.csv",
//!     "data/transfer_history.csv",
//! );
//! let report = run_pipeline(&inputs, Path::new("out"), &PipelineOptions::default())?;
//! println!("{} curated players", report.final_players);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{
    PipelineOptions, Rules, RULES, SORTED_VALUES_FILE, TOP_PLAYERS_FILE, TRANSFERS_FILE,
};
use crate::error::{PipelineError, PipelineResult};
use crate::logs::{log_info, log_info_indent, log_stage, log_success, log_warning, thousands};
use crate::models::{Table, PLAYER_ID};
use crate::parser::{read_table, write_table};

use super::enricher::enrich_with_countries;
use super::prestige::{find_prestigious_players, merge_into_curated};
use super::selector::select_top_players;
use super::transfers::filter_transfers;
use super::values::sort_market_values;

/// Paths of the four input datasets.
#[derive(Debug, Clone)]
pub struct InputFiles {
    pub market_values: PathBuf,
    pub player_profiles: PathBuf,
    pub team_details: PathBuf,
    pub transfer_history: PathBuf,
}

impl InputFiles {
    pub fn new(
        market_values: impl Into<PathBuf>,
        player_profiles: impl Into<PathBuf>,
        team_details: impl Into<PathBuf>,
        transfer_history: impl Into<PathBuf>,
    ) -> Self {
        Self {
            market_values: market_values.into(),
            player_profiles: player_profiles.into(),
            team_details: team_details.into(),
            transfer_history: transfer_history.into(),
        }
    }

    /// All four paths, in argument order.
    pub fn all(&self) -> [&Path; 4] {
        [
            self.market_values.as_path(),
            self.player_profiles.as_path(),
            self.team_details.as_path(),
            self.transfer_history.as_path(),
        ]
    }

    /// Fail on the first path that does not exist.
    pub fn validate(&self) -> PipelineResult<()> {
        match self.all().into_iter().find(|p| !p.exists()) {
            Some(missing) => Err(PipelineError::MissingInput(missing.to_path_buf())),
            None => Ok(()),
        }
    }
}

/// Counts produced by a run, in stage order.
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    // Stage 1
    pub value_records: usize,
    // Stage 2
    pub profiles_loaded: usize,
    pub head_rows: usize,
    pub candidates: usize,
    pub joined: usize,
    pub removed_by_retention: usize,
    pub removed_by_floor: usize,
    pub selected_players: usize,
    // Stage 3
    pub transfers_loaded: usize,
    pub transfers_kept: usize,
    // Stage 4
    pub youth_removed: usize,
    pub teams_loaded: usize,
    pub clubs_mapped: usize,
    pub from_mapped: usize,
    pub to_mapped: usize,
    pub enriched_transfers: usize,
    // Stage 5
    pub valued_players: usize,
    pub prestige_band: usize,
    pub prestige_transfers: usize,
    pub prestige_qualified: usize,
    pub prestige_profiles: usize,
    pub prestige_added: usize,
    pub prestige_already_present: usize,
    pub final_players: usize,
}

/// Run all five stages and write the outputs into `output_dir`.
pub fn run_pipeline(
    inputs: &InputFiles,
    output_dir: &Path,
    options: &PipelineOptions,
) -> PipelineResult<PipelineReport> {
    run_pipeline_with_rules(inputs, output_dir, options, &RULES)
}

/// [`run_pipeline`] with explicit rules.
pub fn run_pipeline_with_rules(
    inputs: &InputFiles,
    output_dir: &Path,
    options: &PipelineOptions,
    rules: &Rules,
) -> PipelineResult<PipelineReport> {
    inputs.validate()?;
    ensure_output_directory(output_dir)?;
    log_success(format!("Output directory ready: {}", output_dir.display()));

    let mut report = PipelineReport::default();
    let top_players_path = output_dir.join(TOP_PLAYERS_FILE);
    let transfers_path = output_dir.join(TRANSFERS_FILE);
    let sorted_path = output_dir.join(SORTED_VALUES_FILE);

    // Step 1: sort valuations
    log_stage("[Step 1/5] Sorting market values...");
    let values = load(&inputs.market_values, "market values")?;
    report.value_records = values.len();
    log_info(format!("Loaded {} market value records", thousands(values.len())));

    let sorted = sort_market_values(&values)?;
    write_table(&sorted_path, &sorted)?;
    log_success(format!("Saved sorted market values to {}", sorted_path.display()));

    // Step 2: select top players
    log_stage("[Step 2/5] Extracting top players...");
    let profiles = load(&inputs.player_profiles, "player profiles")?;
    report.profiles_loaded = profiles.len();
    log_info(format!("Loaded {} player profiles", thousands(profiles.len())));

    let selection = select_top_players(&sorted, &profiles, rules, options)?;
    report.head_rows = selection.head_rows;
    report.candidates = selection.candidates;
    report.joined = selection.joined;
    report.removed_by_retention = selection.removed_by_retention;
    report.removed_by_floor = selection.removed_by_floor;
    report.selected_players = selection.players.len();
    log_info(format!(
        "Extracted {} unique top players from {} market value records",
        thousands(selection.candidates),
        thousands(selection.head_rows)
    ));
    log_info(format!("Matched {} player profiles", thousands(selection.joined)));
    if selection.removed_by_retention > 0 {
        log_info(format!(
            "Filtered out {} players:",
            thousands(selection.removed_by_retention)
        ));
        log_info_indent(
            format!(
                "non-European, not retired, market_value <= {}",
                thousands(options.high_value as usize)
            ),
            1,
        );
    }
    if selection.removed_by_floor > 0 {
        log_info(format!(
            "Final filter: removed {} players with market_value < {} (including Retired)",
            thousands(selection.removed_by_floor),
            thousands(options.value_floor as usize)
        ));
    }
    write_table(&top_players_path, &selection.players)?;
    log_success(format!(
        "Extracted {} players with market values, saved to {}",
        thousands(selection.players.len()),
        TOP_PLAYERS_FILE
    ));

    drop(sorted);
    if !options.keep_intermediate {
        remove_intermediate(&sorted_path)?;
    }

    // Step 3: filter transfers
    log_stage("[Step 3/5] Filtering transfer history...");
    let transfers = load(&inputs.transfer_history, "transfer history")?;
    report.transfers_loaded = transfers.len();
    log_info(format!("Loaded {} transfer records", thousands(transfers.len())));

    let top_ids = selection.players.id_set(PLAYER_ID)?;
    log_info(format!("Filtering for {} unique top players", thousands(top_ids.len())));
    let filtered = filter_transfers(&transfers, &top_ids)?;
    report.transfers_kept = filtered.len();
    write_table(&transfers_path, &filtered)?;
    log_success(format!(
        "Filtered to {} transfer records, saved to {}",
        thousands(filtered.len()),
        TRANSFERS_FILE
    ));

    // Step 4: youth removal and countries
    log_stage("[Step 4/5] Adding country information...");
    let teams = load(&inputs.team_details, "team details")?;
    report.teams_loaded = teams.len();

    let enrichment = enrich_with_countries(&filtered, &teams, rules)?;
    report.youth_removed = enrichment.youth_removed;
    report.clubs_mapped = enrichment.clubs_mapped;
    report.from_mapped = enrichment.from_mapped;
    report.to_mapped = enrichment.to_mapped;
    report.enriched_transfers = enrichment.transfers.len();

    log_info(format!("Removed {} youth team transfers", thousands(enrichment.youth_removed)));
    log_info(format!("Remaining transfers: {}", thousands(enrichment.transfers.len())));
    log_info(format!("Loaded {} team records", thousands(teams.len())));
    log_info(format!("Created mapping for {} unique clubs", thousands(enrichment.clubs_mapped)));
    log_info(format!(
        "Mapped {} from_team countries ({})",
        thousands(enrichment.from_mapped),
        percent(enrichment.from_mapped, enrichment.transfers.len())
    ));
    log_info(format!(
        "Mapped {} to_team countries ({})",
        thousands(enrichment.to_mapped),
        percent(enrichment.to_mapped, enrichment.transfers.len())
    ));
    write_table(&transfers_path, &enrichment.transfers)?;
    log_success(format!("Added country columns and saved to {}", TRANSFERS_FILE));

    // Step 5: prestigious clubs
    log_stage("[Step 5/5] Finding and merging prestigious players...");
    log_info(format!("Checking for: {}", rules.prestigious_display_names().join(", ")));
    log_info(format!(
        "MAX market value band: {} to {}",
        thousands(options.prestige_min as usize),
        thousands(options.prestige_max as usize)
    ));

    let found = find_prestigious_players(&values, &profiles, &transfers, rules, options)?;
    log_info(format!("Found {} unique players", thousands(found.valued_players)));
    log_info(format!("Found {} players in the value band", thousands(found.band_players)));
    log_info(format!("Found {} transfer records for these players", thousands(found.band_transfers)));
    log_info(format!("Found {} players who played for prestigious teams", thousands(found.qualified)));

    let existing = if top_players_path.exists() {
        let table = load(&top_players_path, "top players")?;
        log_info(format!("Loaded {} players from main file", thousands(table.len())));
        Some(table)
    } else {
        log_warning(format!("Main players file not found: {}", top_players_path.display()));
        log_info("Creating new file with prestigious players only");
        None
    };

    report.valued_players = found.valued_players;
    report.prestige_band = found.band_players;
    report.prestige_transfers = found.band_transfers;
    report.prestige_qualified = found.qualified;
    report.prestige_profiles = found.players.len();

    let merged = merge_into_curated(existing, found.players)?;
    report.prestige_added = merged.added;
    report.prestige_already_present = merged.already_present;
    report.final_players = merged.players.len();

    if !merged.created {
        log_info(format!("Found {} new prestigious players to add", thousands(merged.added)));
        log_info(format!(
            "{} prestigious players already in main file",
            thousands(merged.already_present)
        ));
    }
    write_table(&top_players_path, &merged.players)?;
    log_success(format!(
        "Updated main players file: {} (total players: {})",
        top_players_path.display(),
        thousands(merged.players.len())
    ));

    Ok(report)
}

/// Create the output directory if needed.
pub fn ensure_output_directory(dir: &Path) -> PipelineResult<()> {
    fs::create_dir_all(dir).map_err(|source| PipelineError::Output {
        path: dir.to_path_buf(),
        source,
    })
}

fn load(path: &Path, name: &str) -> PipelineResult<Table> {
    let parsed = read_table(path, name)?;
    log_info_indent(
        format!(
            "Read {} (encoding: {}, delimiter: '{}')",
            path.display(),
            parsed.encoding,
            parsed.delimiter.escape_default()
        ),
        1,
    );
    Ok(parsed.table)
}

fn remove_intermediate(path: &Path) -> PipelineResult<()> {
    if path.exists() {
        fs::remove_file(path).map_err(|source| PipelineError::Output {
            path: path.to_path_buf(),
            source,
        })?;
        log_success(format!("Removed temporary file: {}", SORTED_VALUES_FILE));
    }
    Ok(())
}

fn percent(part: usize, total: usize) -> String {
    if total == 0 {
        return "n/a".to_string();
    }
    format!("{:.1}%", part as f64 / total as f64 * 100.0)
}
