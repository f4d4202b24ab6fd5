//! Core trait for subsystem evaluators.

use crate::design::{DesignPoint, DesignSpace, OutsideInputSpec, SubsystemId};
use crate::error::Result;

/// Mass and factor of safety of one subsystem for one design point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluationResult {
    /// Mass in kg, already multiplied by the cylinder count where the
    /// subsystem is per-cylinder.
    pub mass: f64,
    /// Governing factor of safety (dimensionless).
    pub factor_of_safety: f64,
}

impl EvaluationResult {
    /// Whether both outputs are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.mass.is_finite() && self.factor_of_safety.is_finite()
    }
}

/// A subsystem evaluator for a fixed scenario.
///
/// Implementations own their [`DesignSpace`] and [`OutsideInputSpec`] and
/// are immutable after construction, so one instance serves any number of
/// evaluations.
///
/// # Contract
///
/// - `x` carries the subsystem's own variables, `outside_x` the values
///   received from other subsystems, both in declared input units.
/// - A missing symbol fails with
///   [`EvalError::Domain`](crate::error::EvalError::Domain).
/// - Ranges and catalog membership are **not** checked. Out-of-range input
///   produces out-of-range (possibly negative or non-finite) output so an
///   infeasible design scores badly instead of being refused.
/// - Outputs are rounded to two decimal places.
///
/// # Thread Safety
///
/// `ComponentModel` must be `Send + Sync` because batch evaluation may run
/// across threads with rayon.
pub trait ComponentModel: Send + Sync {
    /// Which subsystem this evaluates.
    fn id(&self) -> SubsystemId;

    /// Own design variables, ranges, and catalog.
    fn design_space(&self) -> &DesignSpace;

    /// Variables received from other subsystems.
    fn outside_inputs(&self) -> &OutsideInputSpec;

    /// Subsystem mass in kg.
    fn mass(&self, x: &DesignPoint, outside_x: &DesignPoint) -> Result<f64>;

    /// Factor of safety of the dominant failure mode.
    fn factor_of_safety(&self, x: &DesignPoint, outside_x: &DesignPoint) -> Result<f64>;

    /// Evaluates both outputs.
    fn evaluate(&self, x: &DesignPoint, outside_x: &DesignPoint) -> Result<EvaluationResult> {
        Ok(EvaluationResult {
            mass: self.mass(x, outside_x)?,
            factor_of_safety: self.factor_of_safety(x, outside_x)?,
        })
    }
}
