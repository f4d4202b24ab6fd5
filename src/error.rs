//! Error type shared by every evaluation stage.

use crate::design::SubsystemId;
use crate::scenario::Scenario;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EvalError>;

/// Errors raised while resolving or evaluating a design selection.
///
/// Arithmetic degeneracy is not an error: a zero denominator produces a
/// non-finite output that scores as the worst tier.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// An outside input could not be resolved because the producing
    /// subsystem's design point was not supplied.
    #[error("{consumer} needs `{symbol}` from {producer}, but no {producer} design point was supplied")]
    MissingDependency {
        consumer: SubsystemId,
        producer: SubsystemId,
        symbol: String,
    },

    /// A design point omits a symbol the evaluator requires.
    #[error("{subsystem}: design point is missing required symbol `{symbol}`")]
    Domain {
        subsystem: SubsystemId,
        symbol: String,
    },

    /// Scenario name not recognised.
    #[error("unknown scenario: {0}")]
    UnknownScenario(String),

    /// Subsystem name not recognised.
    #[error("unknown subsystem: {0}")]
    UnknownSubsystem(String),

    /// Strict validation: a value lies outside its admissible range.
    #[error("{subsystem}: `{symbol}` = {value} lies outside [{min}, {max}]")]
    OutOfRange {
        subsystem: SubsystemId,
        symbol: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Strict validation: a design point is not a catalog entry.
    #[error("{subsystem}: design point is not in the {scenario} catalog")]
    NotInCatalog {
        subsystem: SubsystemId,
        scenario: Scenario,
    },

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_dependency_message() {
        let err = EvalError::MissingDependency {
            consumer: SubsystemId::Crankshaft,
            producer: SubsystemId::Flywheel,
            symbol: "ds".into(),
        };
        assert_eq!(
            err.to_string(),
            "crankshaft needs `ds` from flywheel, but no flywheel design point was supplied"
        );
    }

    #[test]
    fn test_out_of_range_message() {
        let err = EvalError::OutOfRange {
            subsystem: SubsystemId::Piston,
            symbol: "D".into(),
            value: 120.0,
            min: 75.0,
            max: 105.0,
        };
        assert_eq!(err.to_string(), "piston: `D` = 120 lies outside [75, 105]");
    }
}
