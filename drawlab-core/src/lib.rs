//! DrawLab Core — draw alphabet, series, transition model, weighted scorer,
//! strategy adapters.
//!
//! This crate contains the modeling half of the backtester:
//! - Domain types (outcomes, board groups, slots, draw records)
//! - The immutable DrawSeries and its O(1) prefix snapshots
//! - First-order transition model (sequential and same-slot modes)
//! - The five-signal weighted scorer with explainable score items
//! - The pattern-engine seam and the built-in pattern book
//! - Strategy adapters: one `predict_top5` capability over tagged variants
//!
//! All state is explicit: series, models and scorers are pure constructors
//! and functions of their arguments; nothing reads ambient state.

pub mod data;
pub mod domain;
pub mod error;
pub mod patterns;
pub mod scorer;
pub mod series;
pub mod strategy;
pub mod transition;

pub use domain::{Color, Column, Dozen, DrawRecord, GroupStats, Outcome, Sector, SlotOrder};
pub use error::{ConfigError, StrategyError};
pub use patterns::{ActivePattern, NoPatterns, PatternBook, PatternSource};
pub use scorer::{score, ScoreItem, ScorerConfig, DEFAULT_COVERAGE_WINDOW};
pub use series::{DrawSeries, IngestError, SeriesSnapshot};
pub use strategy::{Strategy, StrategyAdapter, TOP_N};
pub use transition::{TransitionAccumulator, TransitionMode, TransitionModel};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: shared read-only types cross rayon worker
    /// boundaries, so they must be Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Outcome>();
        require_sync::<domain::Outcome>();
        require_send::<domain::DrawRecord>();
        require_sync::<domain::DrawRecord>();
        require_send::<series::DrawSeries>();
        require_sync::<series::DrawSeries>();
        require_send::<series::SeriesSnapshot>();
        require_sync::<series::SeriesSnapshot>();
        require_send::<transition::TransitionModel>();
        require_sync::<transition::TransitionModel>();
        require_send::<scorer::ScorerConfig>();
        require_sync::<scorer::ScorerConfig>();
        require_send::<scorer::ScoreItem>();
        require_sync::<scorer::ScoreItem>();
        require_send::<patterns::PatternBook>();
        require_sync::<patterns::PatternBook>();

        // Adapters move into workers but are owned per worker.
        require_send::<strategy::StrategyAdapter>();
    }
}
