//! Restrict the transfer history to a set of players.

use std::collections::HashSet;

use crate::error::CsvResult;
use crate::models::{PlayerId, Table, PLAYER_ID, PLAYER_NAME};

use super::normalize::normalize_name;

/// Keep transfers of the given players, normalizing `player_name` when present.
pub fn filter_transfers(transfers: &Table, player_ids: &HashSet<PlayerId>) -> CsvResult<Table> {
    let id_col = transfers.column(PLAYER_ID)?;

    let rows = transfers
        .rows
        .iter()
        .filter(|row| row.get(id_col).is_some_and(|id| player_ids.contains(id)))
        .cloned()
        .collect();

    let mut filtered = transfers.with_rows(rows).renamed("filtered transfers");
    filtered.map_column(PLAYER_NAME, normalize_name);
    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfers() -> Table {
        Table::from_rows(
            "transfer history",
            &["player_id", "player_name", "from_team_name", "to_team_name"],
            &[
                &["1", "Mesut Özil", "Werder Bremen", "Real Madrid"],
                &["2", "Nobody", "A", "B"],
                &["1", "Mesut Özil", "Real Madrid", "Arsenal"],
                &["9", "Ghost", "C", "D"],
            ],
        )
    }

    #[test]
    fn test_filters_to_id_set() {
        let ids: HashSet<PlayerId> = ["1".to_string(), "3".to_string()].into_iter().collect();
        let filtered = filter_transfers(&transfers(), &ids).unwrap();

        assert_eq!(filtered.len(), 2);
        assert!(filtered.rows.iter().all(|r| r[0] == "1"));
        assert_eq!(filtered.rows[0][1], "Mesut Ozil");
        // other columns untouched
        assert_eq!(filtered.rows[1][2], "Real Madrid");
    }

    #[test]
    fn test_output_ids_are_intersection() {
        let raw = transfers();
        let ids: HashSet<PlayerId> = ["1", "2", "5"].iter().map(|s| s.to_string()).collect();
        let filtered = filter_transfers(&raw, &ids).unwrap();

        let expected: HashSet<PlayerId> = raw.id_set("player_id").unwrap().intersection(&ids).cloned().collect();
        assert_eq!(filtered.id_set("player_id").unwrap(), expected);
    }

    #[test]
    fn test_without_player_name_column() {
        let raw = Table::from_rows("transfer history", &["player_id", "fee"], &[&["1", "100"]]);
        let ids: HashSet<PlayerId> = ["1".to_string()].into_iter().collect();
        let filtered = filter_transfers(&raw, &ids).unwrap();
        assert_eq!(filtered.rows, raw.rows);
    }

    #[test]
    fn test_empty_id_set() {
        let filtered = filter_transfers(&transfers(), &HashSet::new()).unwrap();
        assert!(filtered.is_empty());
        assert_eq!(filtered.headers.len(), 4);
    }
}
