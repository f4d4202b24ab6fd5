//! Piston pin evaluator.
//!
//! Own variables: length-to-bore ratio `r2` and inner-to-outer diameter
//! ratio `r3`. Outside input: bore diameter `D` from the piston.

use super::physics::{round2, GasLoad, MM};
use super::piston::bore_input;
use super::types::ComponentModel;
use crate::design::{DesignPoint, DesignSpace, OutsideInputSpec, SubsystemId, VariableSpec};
use crate::error::Result;
use crate::scenario::{GlobalRequirements, Scenario, ScenarioConfig};
use std::f64::consts::PI;

const ID: SubsystemId = SubsystemId::PistonPin;

/// Fixed material parameters of the piston pin.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PistonPinParams {
    /// Allowable bending stress in Pa (140 MPa alloy steel, 84 MPa carbon steel).
    pub allowable_bending_stress: f64,
    /// Pin material density in kg/m³.
    pub density: f64,
    /// Bearing pressure of the bronze bushing in Pa, used to size the
    /// outer diameter.
    pub bushing_pressure: f64,
}

impl Default for PistonPinParams {
    fn default() -> Self {
        Self {
            allowable_bending_stress: 140e6,
            density: 8e3,
            bushing_pressure: 10e6,
        }
    }
}

/// Own design space of the piston pin.
pub fn design_space(scenario: Scenario) -> DesignSpace {
    let ((r2_min, r2_max), (r3_min, r3_max)) = match scenario {
        Scenario::Engine => ((0.7, 0.9), (0.3, 0.8)),
        Scenario::LawnMower => ((0.5, 0.95), (0.2, 0.8)),
    };
    let variables = [
        VariableSpec::new("r2", "piston-pin length to piston diameter ratio, l1/D", r2_min, r2_max),
        VariableSpec::new("r3", "piston-pin inner diameter to outer diameter ratio, di/do", r3_min, r3_max),
    ];
    match scenario {
        Scenario::Engine => DesignSpace::grid(
            ID,
            scenario,
            variables,
            &[0.7, 0.75, 0.8, 0.85, 0.9],
            &[0.3, 0.42, 0.55, 0.68, 0.8],
        ),
        Scenario::LawnMower => DesignSpace::grid(
            ID,
            scenario,
            variables,
            &[0.5, 0.61, 0.72, 0.84, 0.95],
            &[0.2, 0.35, 0.5, 0.65, 0.8],
        ),
    }
}

/// Outside inputs of the piston pin.
pub fn outside_inputs(scenario: Scenario) -> OutsideInputSpec {
    OutsideInputSpec::new(ID, vec![bore_input(scenario)])
}

/// Derived pin dimensions, all in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinGeometry {
    /// Pin length.
    pub length: f64,
    /// Outer diameter, sized from the bushing bearing pressure.
    pub outer_diameter: f64,
    /// Inner diameter.
    pub inner_diameter: f64,
}

/// Piston pin evaluator.
///
/// The outer diameter follows from the gas force and a fixed bushing
/// bearing pressure. Factor of safety is allowable bending stress over the
/// working stress of a hollow shaft; mass is the hollow-cylinder volume
/// times density and cylinder count.
#[derive(Debug, Clone)]
pub struct PistonPin {
    requirements: GlobalRequirements,
    params: PistonPinParams,
    space: DesignSpace,
    outside: OutsideInputSpec,
}

impl PistonPin {
    /// Creates the evaluator with default material parameters.
    pub fn new(config: &ScenarioConfig) -> Self {
        Self::with_params(config, PistonPinParams::default())
    }

    /// Creates the evaluator with custom material parameters.
    pub fn with_params(config: &ScenarioConfig, params: PistonPinParams) -> Self {
        Self {
            requirements: config.requirements.clone(),
            params,
            space: design_space(config.scenario),
            outside: outside_inputs(config.scenario),
        }
    }

    /// Material parameters in use.
    pub fn params(&self) -> &PistonPinParams {
        &self.params
    }

    /// Pin dimensions and gas load for a design point.
    pub fn geometry(&self, x: &DesignPoint, outside_x: &DesignPoint) -> Result<(PinGeometry, GasLoad)> {
        let r2 = x.require(ID, "r2")?;
        let r3 = x.require(ID, "r3")?;
        let bore = outside_x.require(ID, "D")? * MM;

        let load = GasLoad::from_bore(&self.requirements, bore);
        let length = r2 * bore;
        let outer = load.force / (self.params.bushing_pressure * length);
        let geometry = PinGeometry {
            length,
            outer_diameter: outer,
            inner_diameter: r3 * outer,
        };
        Ok((geometry, load))
    }
}

impl ComponentModel for PistonPin {
    fn id(&self) -> SubsystemId {
        ID
    }

    fn design_space(&self) -> &DesignSpace {
        &self.space
    }

    fn outside_inputs(&self) -> &OutsideInputSpec {
        &self.outside
    }

    fn mass(&self, x: &DesignPoint, outside_x: &DesignPoint) -> Result<f64> {
        let (g, _) = self.geometry(x, outside_x)?;
        let per_cylinder = self.params.density
            * (PI / 4.0)
            * g.length
            * (g.outer_diameter.powi(2) - g.inner_diameter.powi(2));
        Ok(round2(self.requirements.cylinders as f64 * per_cylinder))
    }

    fn factor_of_safety(&self, x: &DesignPoint, outside_x: &DesignPoint) -> Result<f64> {
        let (g, load) = self.geometry(x, outside_x)?;
        let bore = outside_x.require(ID, "D")? * MM;
        let moment = (PI / 32.0) * load.peak_pressure * bore.powi(3);
        let section_modulus = (PI / 32.0)
            * (g.outer_diameter.powi(4) - g.inner_diameter.powi(4))
            / g.outer_diameter;
        Ok(round2(self.params.allowable_bending_stress / (moment / section_modulus)))
    }
}
