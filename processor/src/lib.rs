//! # Playerdata - football player dataset processing
//!
//! Derives a curated top-player table and an enriched transfer history from
//! four CSV datasets: market value history, player profiles, team details and
//! transfer history.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV inputs │────▶│   Parser    │────▶│  Transform  │────▶│ CSV outputs │
//! │  (4 files)  │     │  (auto-enc) │     │  (5 stages) │     │  (2 files)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use playerdata::{run_pipeline, InputFiles, PipelineOptions};
//!
//! let inputs = InputFiles::new("values.csv", "profiles.csv", "teams.csv", "transfers.csv");
//! let report = run_pipeline(&inputs, "out".as_ref(), &PipelineOptions::default())?;
//! println!("{} curated players", report.final_players);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`config`] - Embedded rule lists and pipeline options
//! - [`models`] - Generic table and column names
//! - [`parser`] - CSV reading/writing with auto-detection
//! - [`transform`] - The five stages and the pipeline runner
//! - [`logs`] - Console progress output

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Progress output
pub mod logs;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{CsvError, CsvResult, PipelineError, PipelineResult};

// =============================================================================
// Re-exports - Config & models
// =============================================================================

pub use config::{PipelineOptions, PrestigeClub, Rules, RULES};
pub use models::{PlayerId, Table};

// =============================================================================
// Re-exports - CSV
// =============================================================================

pub use parser::{read_table, write_table, ParseResult};

// =============================================================================
// Re-exports - Stages
// =============================================================================

pub use transform::{
    enrich_with_countries, filter_transfers, find_prestigious_players, merge_into_curated,
    normalize_name, select_top_players, sort_market_values,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{
    ensure_output_directory, run_pipeline, run_pipeline_with_rules, InputFiles, PipelineReport,
};
