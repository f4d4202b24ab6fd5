//! Quality scoring of a complete design.
//!
//! # Key Types
//!
//! - [`QualityScale`]: ordered half-open bands mapping a value to a tier
//! - [`QualityLabel`]: `Poor` through `Excellent`
//! - [`PayoffTable`]: label to payoff
//! - [`ScoringConfig`]: per-scenario mass and fos scales plus payoffs
//! - [`Aggregator`]: sums masses, takes the minimum fos, and scores both
//! - [`AggregateResult`]: the verdict

mod aggregator;
mod config;

pub use aggregator::{AggregateResult, Aggregator};
pub use config::{PayoffTable, QualityBand, QualityLabel, QualityScale, ScoringConfig, MAX_TIER};
