//! Piston head evaluator.
//!
//! Own variables: head thickness `t_H` and bore diameter `D` (mm).
//! No outside inputs; the bore is itself consumed by the pin, connecting
//! rod, and crankshaft.

use super::physics::{round2, GasLoad, MM};
use super::types::ComponentModel;
use crate::design::{DesignPoint, DesignSpace, OutsideInputSpec, SubsystemId, VariableSpec};
use crate::error::Result;
use crate::scenario::{GlobalRequirements, Scenario, ScenarioConfig};
use std::f64::consts::PI;

const ID: SubsystemId = SubsystemId::Piston;

/// Fixed material and geometry parameters of the piston.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PistonParams {
    /// Yield stress of the head material in Pa.
    pub yield_strength: f64,
    /// Density of the head material in kg/m³.
    pub density: f64,
    /// Piston length as a multiple of the bore.
    pub length_ratio: f64,
}

impl Default for PistonParams {
    fn default() -> Self {
        Self {
            yield_strength: 275e6,
            density: 8e3,
            length_ratio: 1.25,
        }
    }
}

/// Own design space of the piston.
pub fn design_space(scenario: Scenario) -> DesignSpace {
    match scenario {
        Scenario::Engine => DesignSpace::grid(
            ID,
            scenario,
            [
                VariableSpec::new("t_H", "piston head thickness in mm", 4.0, 10.5),
                bore_input(scenario),
            ],
            &[4.0, 5.62, 7.25, 8.88, 10.5],
            &[75.0, 82.5, 90.0, 97.5, 105.0],
        ),
        Scenario::LawnMower => DesignSpace::grid(
            ID,
            scenario,
            [
                VariableSpec::new("t_H", "piston head thickness in mm", 2.0, 7.0),
                bore_input(scenario),
            ],
            &[2.0, 3.25, 4.5, 5.75, 7.0],
            &[40.0, 47.5, 55.0, 62.5, 70.0],
        ),
    }
}

/// Bore diameter range, shared by every subsystem that consumes `D`.
pub(crate) fn bore_input(scenario: Scenario) -> VariableSpec {
    let (min, max) = match scenario {
        Scenario::Engine => (75.0, 105.0),
        Scenario::LawnMower => (40.0, 70.0),
    };
    VariableSpec::new("D", "piston bore diameter in mm", min, max)
}

/// Piston head evaluator.
///
/// Factor of safety is the head's yield margin against bending under peak
/// cylinder pressure. Mass is the cup-shaped volume (outer cylinder minus
/// the bore-thickness-adjusted inner cylinder) times density and cylinder
/// count.
#[derive(Debug, Clone)]
pub struct Piston {
    requirements: GlobalRequirements,
    params: PistonParams,
    space: DesignSpace,
    outside: OutsideInputSpec,
}

impl Piston {
    /// Creates the evaluator with default material parameters.
    pub fn new(config: &ScenarioConfig) -> Self {
        Self::with_params(config, PistonParams::default())
    }

    /// Creates the evaluator with custom material parameters.
    pub fn with_params(config: &ScenarioConfig, params: PistonParams) -> Self {
        Self {
            requirements: config.requirements.clone(),
            params,
            space: design_space(config.scenario),
            outside: OutsideInputSpec::none(ID),
        }
    }

    /// Material parameters in use.
    pub fn params(&self) -> &PistonParams {
        &self.params
    }

    fn inputs(&self, x: &DesignPoint) -> Result<(f64, f64)> {
        Ok((x.require(ID, "t_H")? * MM, x.require(ID, "D")? * MM))
    }
}

impl ComponentModel for Piston {
    fn id(&self) -> SubsystemId {
        ID
    }

    fn design_space(&self) -> &DesignSpace {
        &self.space
    }

    fn outside_inputs(&self) -> &OutsideInputSpec {
        &self.outside
    }

    fn mass(&self, x: &DesignPoint, _outside_x: &DesignPoint) -> Result<f64> {
        let (t_h, bore) = self.inputs(x)?;
        let length = self.params.length_ratio * bore;
        let volume = (PI / 4.0)
            * (bore.powi(2) * length - (bore - 2.0 * t_h).powi(2) * (length - t_h));
        let per_cylinder = self.params.density * volume;
        Ok(round2(self.requirements.cylinders as f64 * per_cylinder))
    }

    fn factor_of_safety(&self, x: &DesignPoint, _outside_x: &DesignPoint) -> Result<f64> {
        let (t_h, bore) = self.inputs(x)?;
        let load = GasLoad::from_bore(&self.requirements, bore);
        let fos = 16.0 * t_h.powi(2) * self.params.yield_strength
            / (3.0 * load.peak_pressure * bore.powi(2));
        Ok(round2(fos))
    }
}
