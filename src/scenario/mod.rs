//! Operating scenarios and their global requirements.
//!
//! A [`Scenario`] selects one [`GlobalRequirements`] record, one set of
//! subsystem catalogs, and one set of quality scales. [`ScenarioConfig`]
//! bundles the data the core reads for a scenario. All of it is read-only
//! once an evaluator is built.

mod config;
mod requirements;
mod types;

pub use config::ScenarioConfig;
pub use requirements::{GlobalRequirements, REQUIREMENT_SYMBOLS};
pub use types::Scenario;
