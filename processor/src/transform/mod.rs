//! Transformation module.
//!
//! One file per pipeline stage, plus the shared pieces:
//! - values: Value Sorter and per-player maxima
//! - selector: Top-Player Selector
//! - transfers: Transfer Filter
//! - enricher: Country Enricher
//! - prestige: Prestige Merger
//! - normalize: name normalization
//! - pipeline: end-to-end run

pub mod enricher;
pub mod normalize;
pub mod pipeline;
pub mod prestige;
pub mod selector;
pub mod transfers;
pub mod values;

pub use enricher::{build_country_map, enrich_with_countries, Enrichment};
pub use normalize::{normalize_name, normalize_team_name};
pub use pipeline::*;
pub use prestige::{find_prestigious_players, merge_into_curated, PrestigeMerge, PrestigePlayers};
pub use selector::{select_top_players, Selection};
pub use transfers::filter_transfers;
pub use values::{max_value_by_player, sort_by_numeric_desc, sort_market_values};
