//! `rostermatch-xref`: cross-source name matching engine.
//!
//! Normalizes free-text person names into canonical keys, finds keys shared
//! by two or more source rosters, and shapes relationship edges into graphs
//! for the web front end. Matching is pure; file access is confined to the
//! loader and output helpers.
//!
//! Name-only matching has no disambiguation signal: two different people
//! who normalize to the same key are reported as one overlap.

pub mod config;
pub mod edges;
pub mod engine;
pub mod error;
pub mod graph;
pub mod loader;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod output;
pub mod summary;
pub mod web;

pub use config::XrefConfig;
pub use engine::{cross_reference, run};
pub use error::XrefError;
pub use matcher::{fuzzy_match, MatchOutcome};
pub use model::{NamedRecord, OverlapRecord, SourceIndex, SourceKind, SourceRecord, XrefResult};
pub use normalize::normalize_name;
