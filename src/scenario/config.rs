//! Per-scenario configuration bundle.

use super::requirements::GlobalRequirements;
use super::types::Scenario;
use crate::scoring::ScoringConfig;

/// Everything the core reads for one scenario.
///
/// Built once and shared read-only by every evaluator constructed from it.
///
/// ```
/// use u_mechdesign::scenario::{Scenario, ScenarioConfig};
///
/// let config = ScenarioConfig::for_scenario(Scenario::LawnMower);
/// assert_eq!(config.requirements.cylinders, 1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioConfig {
    /// Scenario tag. Selects the subsystem catalogs.
    pub scenario: Scenario,

    /// Global requirement values.
    pub requirements: GlobalRequirements,

    /// Quality scales and payoff table.
    pub scoring: ScoringConfig,
}

impl ScenarioConfig {
    /// Built-in configuration for a scenario.
    pub fn for_scenario(scenario: Scenario) -> Self {
        Self {
            scenario,
            requirements: GlobalRequirements::for_scenario(scenario),
            scoring: ScoringConfig::for_scenario(scenario),
        }
    }

    /// Replaces the global requirements.
    pub fn with_requirements(mut self, requirements: GlobalRequirements) -> Self {
        self.requirements = requirements;
        self
    }

    /// Replaces the scoring tables.
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    /// Validates requirements and scoring tables.
    pub fn validate(&self) -> Result<(), String> {
        self.requirements.validate()?;
        self.scoring.validate()
    }
}
