//! Country enrichment of the filtered transfer history.
//!
//! Transfers into youth or reserve sides are dropped first, then both
//! endpoints get the country of their club from the team details.

use std::collections::HashMap;

use crate::config::Rules;
use crate::error::CsvResult;
use crate::models::{
    Table, CLUB_ID, COUNTRY_NAME, FROM_TEAM_COUNTRY, FROM_TEAM_ID, TO_TEAM_COUNTRY, TO_TEAM_ID,
    TO_TEAM_NAME,
};

/// Enriched transfers plus the counts reported while producing them.
#[derive(Debug, Clone)]
pub struct Enrichment {
    /// Transfers with `from_team_country` and `to_team_country`.
    pub transfers: Table,
    /// Transfers dropped because the destination is a youth team.
    pub youth_removed: usize,
    /// Distinct clubs in the country map.
    pub clubs_mapped: usize,
    /// Rows whose origin club resolved to a country.
    pub from_mapped: usize,
    /// Rows whose destination club resolved to a country.
    pub to_mapped: usize,
}

/// Build `club_id -> country_name`; the first row seen for a club wins.
pub fn build_country_map(teams: &Table) -> CsvResult<HashMap<String, String>> {
    let club_col = teams.column(CLUB_ID)?;
    let country_col = teams.column(COUNTRY_NAME)?;

    let mut map = HashMap::new();
    for row in &teams.rows {
        let club = &row[club_col];
        if club.is_empty() {
            continue;
        }
        map.entry(club.clone())
            .or_insert_with(|| row[country_col].clone());
    }
    Ok(map)
}

/// Drop youth-destination transfers and attach both endpoint countries.
/// Unmapped clubs get an empty string.
pub fn enrich_with_countries(
    transfers: &Table,
    teams: &Table,
    rules: &Rules,
) -> CsvResult<Enrichment> {
    let to_name_col = transfers.column(TO_TEAM_NAME)?;
    let from_id_col = transfers.column(FROM_TEAM_ID)?;
    let to_id_col = transfers.column(TO_TEAM_ID)?;
    let countries = build_country_map(teams)?;

    let kept: Vec<Vec<String>> = transfers
        .rows
        .iter()
        .filter(|row| {
            let name = Some(row[to_name_col].as_str()).filter(|s| !s.is_empty());
            !rules.is_youth_team(name)
        })
        .cloned()
        .collect();
    let youth_removed = transfers.len() - kept.len();

    let mut enriched = transfers.with_rows(kept).renamed("enriched transfers");
    let from_col = enriched.ensure_column(FROM_TEAM_COUNTRY);
    let to_col = enriched.ensure_column(TO_TEAM_COUNTRY);

    let lookup = |id: &str| countries.get(id).cloned().unwrap_or_default();
    let (mut from_mapped, mut to_mapped) = (0, 0);
    for row in &mut enriched.rows {
        row[from_col] = lookup(&row[from_id_col]);
        row[to_col] = lookup(&row[to_id_col]);
        from_mapped += usize::from(!row[from_col].is_empty());
        to_mapped += usize::from(!row[to_col].is_empty());
    }

    Ok(Enrichment {
        transfers: enriched,
        youth_removed,
        clubs_mapped: countries.len(),
        from_mapped,
        to_mapped,
    })
}
