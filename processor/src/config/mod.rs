//! Pipeline configuration.
//!
//! Two layers:
//!
//! - [`Rules`] - the fixed editorial lists (European countries, youth-team
//!   suffixes, prestigious clubs). Embedded at compile time from
//!   `config/rules.json` and parsed once into [`RULES`].
//! - [`PipelineOptions`] - numeric thresholds and artifact file names.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// Output file holding the curated players.
pub const TOP_PLAYERS_FILE: &str = "player_profiles_top2500.csv";

/// Output file holding the enriched transfer history.
pub const TRANSFERS_FILE: &str = "transfer_history_filtered.csv";

/// Transient file holding the sorted valuation history.
pub const SORTED_VALUES_FILE: &str = "player_market_value_descending.csv";

/// Rules loaded once from the embedded `config/rules.json`.
pub static RULES: Lazy<Rules> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../config/rules.json"))
        .expect("Invalid embedded rules")
});

// =============================================================================
// Rules
// =============================================================================

/// Fixed lists driving the selector, the enricher and the prestige merger.
#[derive(Debug, Clone, Deserialize)]
pub struct Rules {
    /// Lower-case country and region names matched inside `place_of_birth`.
    pub european_countries: Vec<String>,

    /// Case-sensitive suffixes marking a youth or reserve team.
    pub youth_suffixes: Vec<String>,

    /// Declarative prestigious-club table.
    pub prestigious_clubs: Vec<PrestigeClub>,
}

/// One prestigious club and the heuristics used to recognise it.
#[derive(Debug, Clone, Deserialize)]
pub struct PrestigeClub {
    /// Stable identifier (`"arsenal"`, `"chelsea"`, ...).
    pub key: String,

    /// Names accepted by exact, case-insensitive comparison.
    pub canonical_names: Vec<String>,

    /// Names checked together with the exclusion list.
    /// Falls back to `canonical_names` when absent.
    #[serde(default)]
    pub rule_names: Option<Vec<String>>,

    /// Lower-case substrings that veto a rule-name match.
    #[serde(default)]
    pub exclusion_substrings: Vec<String>,
}

impl PrestigeClub {
    /// Exact, case-insensitive match against a canonical name.
    pub fn is_canonical(&self, team_lower: &str) -> bool {
        self.canonical_names
            .iter()
            .any(|n| n.to_lowercase() == team_lower)
    }

    /// Rule-name match vetoed by any exclusion substring.
    ///
    /// Exclusions are plain substrings: `"b"` rejects every name containing
    /// the letter b.
    pub fn passes_rule(&self, team_lower: &str) -> bool {
        let names = self.rule_names.as_ref().unwrap_or(&self.canonical_names);
        names.iter().any(|n| n.to_lowercase() == team_lower)
            && !self
                .exclusion_substrings
                .iter()
                .any(|x| team_lower.contains(x.as_str()))
    }
}

impl Rules {
    /// Whether a place of birth names a European country or region.
    /// `None` and empty strings are non-European.
    pub fn is_european(&self, place_of_birth: Option<&str>) -> bool {
        let Some(place) = place_of_birth else {
            return false;
        };
        let place = place.to_lowercase();
        self.european_countries
            .iter()
            .any(|country| place.contains(country.as_str()))
    }

    /// Whether the trimmed team name ends with a youth suffix.
    ///
    /// Not token-aware: `"ClubB"` ends with `"B"` just like `"Club B"`.
    pub fn is_youth_team(&self, team_name: Option<&str>) -> bool {
        let Some(name) = team_name else {
            return false;
        };
        let name = name.trim();
        self.youth_suffixes
            .iter()
            .any(|suffix| name.ends_with(suffix.as_str()))
    }

    /// Whether a team name belongs to a prestigious club.
    pub fn is_prestigious(&self, team_name: &str) -> bool {
        let team = team_name.trim();
        if team.is_empty() {
            return false;
        }
        let lower = team.to_lowercase();

        if self.prestigious_clubs.iter().any(|c| c.is_canonical(&lower)) {
            return true;
        }
        self.prestigious_clubs.iter().any(|c| c.passes_rule(&lower))
    }

    /// Canonical display names, for progress output.
    pub fn prestigious_display_names(&self) -> Vec<&str> {
        self.prestigious_clubs
            .iter()
            .filter_map(|c| c.canonical_names.last().map(String::as_str))
            .collect()
    }
}

// =============================================================================
// Options
// =============================================================================

/// Thresholds and limits for a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Rows of the sorted valuation history considered by the selector.
    pub head_rows: usize,

    /// Market value strictly above which a player is always retained.
    pub high_value: f64,

    /// Hard floor applied after the retention filter (inclusive).
    pub value_floor: f64,

    /// Club name marking a retired player.
    pub retired_club: String,

    /// Lower bound of the prestige band (inclusive).
    pub prestige_min: f64,

    /// Upper bound of the prestige band (exclusive).
    pub prestige_max: f64,

    /// Keep the sorted valuation file instead of deleting it.
    pub keep_intermediate: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            head_rows: 30_000,
            high_value: 20_000_000.0,
            value_floor: 19_000_000.0,
            retired_club: "Retired".to_string(),
            prestige_min: 10_000_000.0,
            prestige_max: 19_000_000.0,
            keep_intermediate: false,
        }
    }
}
