//! Top-player selection.
//!
//! From the head of the sorted valuation history, keep each player's best
//! value, attach it to their profile and run two independent filters:
//!
//! ```text
//! retention: value > 20M  OR  club == "Retired"  OR  born in Europe
//! floor:     value >= 19M
//! ```
//!
//! The floor runs after retention and removes most retired and European
//! players the first pass let through.

use crate::config::{PipelineOptions, Rules};
use crate::error::CsvResult;
use crate::models::{
    format_number, Table, CURRENT_CLUB_NAME, MARKET_VALUE, PLACE_OF_BIRTH, PLAYER_ID, PLAYER_NAME,
};

use super::normalize::normalize_name;
use super::values::{compare_desc, max_value_by_player};

/// Output of the selector plus the counts reported while producing it.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Curated players, highest market value first.
    pub players: Table,
    /// Valuation rows inspected.
    pub head_rows: usize,
    /// Distinct players among those rows.
    pub candidates: usize,
    /// Profiles matched to a candidate.
    pub joined: usize,
    /// Rows dropped by the retention filter.
    pub removed_by_retention: usize,
    /// Rows dropped by the hard floor.
    pub removed_by_floor: usize,
}

/// Select top players from a valuation history already sorted by value.
pub fn select_top_players(
    sorted_values: &Table,
    profiles: &Table,
    rules: &Rules,
    options: &PipelineOptions,
) -> CsvResult<Selection> {
    let head_rows = options.head_rows.min(sorted_values.len());
    let max_values = max_value_by_player(sorted_values, Some(head_rows))?;

    let id_col = profiles.column(PLAYER_ID)?;
    let birth_col = profiles.column(PLACE_OF_BIRTH)?;
    let club_col = profiles.column(CURRENT_CLUB_NAME)?;

    let mut players = Table::new("top players", profiles.headers.clone());
    let value_col = players.ensure_column(MARKET_VALUE);
    let width = players.headers.len();

    // Inner join, profile order
    let mut joined: Vec<(Vec<String>, Option<f64>)> = profiles
        .rows
        .iter()
        .filter_map(|row| {
            let value = *max_values.get(row.get(id_col)?)?;
            let mut out = row.clone();
            out.resize(width, String::new());
            out[value_col] = value.map(format_number).unwrap_or_default();
            Some((out, value))
        })
        .collect();

    if let Some(name_col) = players.find_column(PLAYER_NAME) {
        for (row, _) in &mut joined {
            if !row[name_col].is_empty() {
                row[name_col] = normalize_name(&row[name_col]);
            }
        }
    }

    joined.sort_by(|a, b| compare_desc(a.1, b.1));
    let joined_count = joined.len();

    let retained: Vec<_> = joined
        .into_iter()
        .filter(|(row, value)| {
            let high_value = value.is_some_and(|v| v > options.high_value);
            let retired = row[club_col] == options.retired_club;
            let place = Some(row[birth_col].as_str()).filter(|s| !s.is_empty());
            high_value || retired || rules.is_european(place)
        })
        .collect();
    let removed_by_retention = joined_count - retained.len();

    let retained_count = retained.len();
    let floored: Vec<_> = retained
        .into_iter()
        .filter(|(_, value)| value.is_some_and(|v| v >= options.value_floor))
        .collect();
    let removed_by_floor = retained_count - floored.len();

    players.rows = floored.into_iter().map(|(row, _)| row).collect();

    Ok(Selection {
        players,
        head_rows,
        candidates: max_values.len(),
        joined: joined_count,
        removed_by_retention,
        removed_by_floor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RULES;
    use crate::transform::values::sort_market_values;

    const PROFILE_HEADERS: &[&str] = &[
        "player_id",
        "player_name",
        "place_of_birth",
        "current_club_name",
        "position",
    ];

    fn run(values: Table, profiles: Table) -> Selection {
        let sorted = sort_market_values(&values).unwrap();
        select_top_players(&sorted, &profiles, &RULES, &PipelineOptions::default()).unwrap()
    }

    fn values(rows: &[&[&str]]) -> Table {
        Table::from_rows("market values", &["player_id", "value"], rows)
    }

    #[test]
    fn test_retired_non_european_high_value_kept() {
        let selection = run(
            values(&[&["1", "5000000"], &["1", "22000000"], &["1", "8000000"]]),
            Table::from_rows(
                "profiles",
                PROFILE_HEADERS,
                &[&["1", "Kenji", "Tokyo, Japan", "Retired", "Attack"]],
            ),
        );

        assert_eq!(selection.players.len(), 1);
        assert_eq!(selection.players.headers.last().unwrap(), "market_value");
        assert_eq!(selection.players.rows[0][5], "22000000");
    }

    #[test]
    fn test_european_below_floor_dropped() {
        let selection = run(
            values(&[&["2", "15000000"]]),
            Table::from_rows(
                "profiles",
                PROFILE_HEADERS,
                &[&["2", "Jean", "Paris, France", "PSG", "Midfield"]],
            ),
        );

        // passes retention, fails the floor
        assert_eq!(selection.removed_by_retention, 0);
        assert_eq!(selection.removed_by_floor, 1);
        assert!(selection.players.is_empty());
    }

    #[test]
    fn test_retired_below_floor_dropped() {
        let selection = run(
            values(&[&["3", "18999999"]]),
            Table::from_rows(
                "profiles",
                PROFILE_HEADERS,
                &[&["3", "Old", "Lima, Peru", "Retired", "Defender"]],
            ),
        );
        assert_eq!(selection.removed_by_floor, 1);
        assert!(selection.players.is_empty());
    }

    #[test]
    fn test_floor_is_inclusive() {
        let selection = run(
            values(&[&["4", "19000000"]]),
            Table::from_rows(
                "profiles",
                PROFILE_HEADERS,
                &[&["4", "Edge", "Madrid, Spain", "Getafe", "Goalkeeper"]],
            ),
        );
        assert_eq!(selection.players.len(), 1);
    }

    #[test]
    fn test_non_european_between_thresholds_removed_by_retention() {
        let selection = run(
            values(&[&["5", "19500000"]]),
            Table::from_rows(
                "profiles",
                PROFILE_HEADERS,
                &[&["5", "Leo", "Rosario, Argentina", "Inter Miami", "Attack"]],
            ),
        );
        assert_eq!(selection.removed_by_retention, 1);
        assert!(selection.players.is_empty());
    }

    #[test]
    fn test_null_birthplace_is_non_european() {
        let selection = run(
            values(&[&["6", "19500000"], &["7", "25000000"]]),
            Table::from_rows(
                "profiles",
                PROFILE_HEADERS,
                &[
                    &["6", "Nobody", "", "Club", "Attack"],
                    &["7", "Star", "", "Club", "Attack"],
                ],
            ),
        );
        assert_eq!(selection.players.len(), 1);
        assert_eq!(selection.players.rows[0][0], "7");
    }

    #[test]
    fn test_names_normalized_and_sorted() {
        let selection = run(
            values(&[&["8", "30000000"], &["9", "90000000"]]),
            Table::from_rows(
                "profiles",
                PROFILE_HEADERS,
                &[
                    &["8", "Martin Ødegaard", "Drammen, Norway", "Arsenal", "Midfield"],
                    &["9", "Kylian Mbappé", "Paris, France", "Real Madrid", "Attack"],
                ],
            ),
        );
        assert_eq!(selection.players.rows[0][1], "Kylian Mbappe");
        assert_eq!(selection.players.rows[1][1], "Martin Odegaard");
    }

    #[test]
    fn test_head_cap_limits_candidates() {
        let values = values(&[&["a", "50000000"], &["b", "40000000"], &["c", "30000000"]]);
        let profiles = Table::from_rows(
            "profiles",
            PROFILE_HEADERS,
            &[
                &["a", "A", "Rome, Italy", "Roma", "x"],
                &["b", "B", "Rome, Italy", "Roma", "x"],
                &["c", "C", "Rome, Italy", "Roma", "x"],
            ],
        );
        let options = PipelineOptions { head_rows: 2, ..PipelineOptions::default() };
        let sorted = sort_market_values(&values).unwrap();
        let selection = select_top_players(&sorted, &profiles, &RULES, &options).unwrap();

        assert_eq!(selection.head_rows, 2);
        assert_eq!(selection.candidates, 2);
        let ids: Vec<&str> = selection.players.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_every_row_satisfies_both_filters() {
        let values = values(&[
            &["1", "25000000"],
            &["2", "19000000"],
            &["3", "12000000"],
            &["4", "21000000"],
            &["5", "19500000"],
        ]);
        let profiles = Table::from_rows(
            "profiles",
            PROFILE_HEADERS,
            &[
                &["1", "A", "Accra, Ghana", "Club", "x"],
                &["2", "B", "Glasgow, Scotland", "Club", "x"],
                &["3", "C", "Oslo, Norway", "Retired", "x"],
                &["4", "D", "Seoul, Korea", "Retired", "x"],
                &["5", "E", "Lagos, Nigeria", "Retired", "x"],
            ],
        );
        let selection = run(values, profiles);
        let market = selection.players.numeric_column("market_value").unwrap();

        for (row, value) in selection.players.rows.iter().zip(market) {
            let v = value.unwrap();
            assert!(v >= 19_000_000.0);
            assert!(v > 20_000_000.0 || row[3] == "Retired" || RULES.is_european(Some(&row[2])));
        }
        assert_eq!(selection.players.len(), 4);
    }

    #[test]
    fn test_missing_profile_column_fails() {
        let sorted = sort_market_values(&values(&[&["1", "1"]])).unwrap();
        let profiles = Table::from_rows("player profiles", &["player_id", "player_name"], &[]);
        let err = select_top_players(&sorted, &profiles, &RULES, &PipelineOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("place_of_birth"));
    }

    #[test]
    fn test_empty_inputs_give_headered_empty_table() {
        let sorted = sort_market_values(&values(&[])).unwrap();
        let profiles = Table::from_rows("profiles", PROFILE_HEADERS, &[]);
        let selection =
            select_top_players(&sorted, &profiles, &RULES, &PipelineOptions::default()).unwrap();
        assert!(selection.players.is_empty());
        assert_eq!(selection.players.headers.len(), PROFILE_HEADERS.len() + 1);
    }
}
