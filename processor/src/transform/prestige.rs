//! Prestigious-club players.
//!
//! Mid-value players (lifetime best between 10M inclusive and 19M exclusive)
//! who ever moved to or from one of the prestigious clubs are added to the
//! curated table. Lifetime maxima come from the full valuation history, not
//! the capped head the selector uses.
//!
//! Merging never touches a player that is already curated: their row and
//! market value stay as they are, only new ids are appended.

use std::collections::{HashMap, HashSet};

use crate::config::{PipelineOptions, Rules};
use crate::error::CsvResult;
use crate::models::{
    format_number, PlayerId, Table, FROM_TEAM_NAME, MARKET_VALUE, PLAYER_ID, PLAYER_NAME,
    TO_TEAM_NAME,
};

use super::normalize::{normalize_name, normalize_team_name};
use super::values::{max_value_by_player, sort_by_numeric_desc};

/// Prestige-qualified players and how they were found.
#[derive(Debug, Clone)]
pub struct PrestigePlayers {
    /// Profiles of qualifying players with their lifetime max as `market_value`.
    pub players: Table,
    /// Distinct players in the full valuation history.
    pub valued_players: usize,
    /// Players inside the value band.
    pub band_players: usize,
    /// Transfer rows belonging to band players.
    pub band_transfers: usize,
    /// Band players with at least one prestigious endpoint.
    pub qualified: usize,
}

/// Result of merging prestige players into the curated table.
#[derive(Debug, Clone)]
pub struct PrestigeMerge {
    /// Final curated table, highest market value first.
    pub players: Table,
    /// Newly appended players.
    pub added: usize,
    /// Qualified players that were already curated.
    pub already_present: usize,
    /// No curated table existed, one was created.
    pub created: bool,
}

/// Find band players who played for a prestigious club.
pub fn find_prestigious_players(
    values: &Table,
    profiles: &Table,
    transfers: &Table,
    rules: &Rules,
    options: &PipelineOptions,
) -> CsvResult<PrestigePlayers> {
    let max_values = max_value_by_player(values, None)?;
    let band: HashMap<&PlayerId, f64> = max_values
        .iter()
        .filter_map(|(id, value)| {
            let v = (*value)?;
            (v >= options.prestige_min && v < options.prestige_max).then_some((id, v))
        })
        .collect();

    let id_col = transfers.column(PLAYER_ID)?;
    let from_col = transfers.column(FROM_TEAM_NAME)?;
    let to_col = transfers.column(TO_TEAM_NAME)?;

    let mut band_transfers = 0;
    let mut qualified: HashSet<&str> = HashSet::new();
    for (i, row) in transfers.rows.iter().enumerate() {
        let id = &row[id_col];
        if !band.contains_key(id) {
            continue;
        }
        band_transfers += 1;

        let from = normalize_team_name(transfers.cell(i, from_col));
        let to = normalize_team_name(transfers.cell(i, to_col));
        if rules.is_prestigious(from) || rules.is_prestigious(to) {
            qualified.insert(id.as_str());
        }
    }

    let profile_id_col = profiles.column(PLAYER_ID)?;
    let mut players = Table::new("prestige players", profiles.headers.clone());
    let value_col = players.ensure_column(MARKET_VALUE);
    let width = players.headers.len();

    for row in &profiles.rows {
        let id = &row[profile_id_col];
        if !qualified.contains(id.as_str()) {
            continue;
        }
        let mut out = row.clone();
        out.resize(width, String::new());
        out[value_col] = band.get(id).map(|v| format_number(*v)).unwrap_or_default();
        players.rows.push(out);
    }
    players.map_column(PLAYER_NAME, normalize_name);

    Ok(PrestigePlayers {
        players,
        valued_players: max_values.len(),
        band_players: band.len(),
        band_transfers,
        qualified: qualified.len(),
    })
}

/// Union prestige players into the curated table and re-sort it.
///
/// With no existing table the prestige players alone form the result.
pub fn merge_into_curated(existing: Option<Table>, prestige: Table) -> CsvResult<PrestigeMerge> {
    let (combined, added, already_present, created) = match existing {
        None => {
            let added = prestige.len();
            (prestige, added, 0, true)
        }
        Some(mut curated) => {
            let existing_ids = curated.id_set(PLAYER_ID)?;
            let id_col = prestige.column(PLAYER_ID)?;

            let (present, new): (Vec<_>, Vec<_>) = prestige
                .rows
                .iter()
                .cloned()
                .partition(|row| existing_ids.contains(&row[id_col]));
            let already_present = present
                .iter()
                .map(|row| &row[id_col])
                .collect::<HashSet<_>>()
                .len();
            let added = new.len();

            curated.append_aligned(prestige.with_rows(new));
            (curated, added, already_present, false)
        }
    };

    let players = sort_by_numeric_desc(&combined, MARKET_VALUE)?.renamed("top players");
    Ok(PrestigeMerge {
        players,
        added,
        already_present,
        created,
    })
}
