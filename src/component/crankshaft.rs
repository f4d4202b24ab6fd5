//! Crankshaft evaluator.
//!
//! Own variables: bearing offset `c` and crank-pin diameter `dc` (mm).
//! Outside inputs: flywheel shaft diameter `ds` and flywheel thickness
//! `t_f` from the flywheel, bore diameter `D` from the piston.
//!
//! Two failure modes are checked at top dead centre, bending of the crank
//! pin and combined bending and compression of the crank web. The reported
//! factor of safety is the smaller of the two.

use super::physics::{nan_min, round2, GasLoad, MM};
use super::piston::bore_input;
use super::types::ComponentModel;
use crate::design::{DesignPoint, DesignSpace, OutsideInputSpec, SubsystemId, VariableSpec};
use crate::error::Result;
use crate::scenario::{GlobalRequirements, Scenario, ScenarioConfig};
use std::f64::consts::PI;

const ID: SubsystemId = SubsystemId::Crankshaft;

/// Fixed material parameters of the crankshaft.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrankshaftParams {
    /// Yield strength in Pa.
    pub yield_strength: f64,
    /// Density in kg/m³.
    pub density: f64,
    /// Bearing pressure used to size the crank-pin length for the stress
    /// check, in Pa.
    pub pin_bearing_pressure: f64,
    /// Bearing pressure used to size the crank-pin length for the mass
    /// estimate, in Pa.
    pub pin_sizing_pressure: f64,
}

impl Default for CrankshaftParams {
    fn default() -> Self {
        Self {
            yield_strength: 275e6,
            density: 8e3,
            pin_bearing_pressure: 24.5e6,
            pin_sizing_pressure: 17e6,
        }
    }
}

/// Crank-web proportions derived empirically from the pin diameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrankWeb {
    /// Web thickness in m.
    pub thickness: f64,
    /// Web width in m.
    pub width: f64,
}

impl CrankWeb {
    /// Web for a crank-pin diameter in millimetres.
    pub fn from_pin_diameter_mm(dc_mm: f64) -> Self {
        Self {
            thickness: (0.65 * dc_mm + 6.35) * MM,
            width: (1.125 * dc_mm + 12.7) * MM,
        }
    }
}

/// Factors of safety of the individual failure modes, unrounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FailureModes {
    /// Bending of the crank pin.
    pub crank_pin: f64,
    /// Bending plus direct compression of the crank web.
    pub crank_web: f64,
}

impl FailureModes {
    /// Governing factor of safety; NaN if either mode is NaN.
    pub fn governing(&self) -> f64 {
        nan_min(self.crank_pin, self.crank_web)
    }
}

/// Own design space of the crankshaft.
pub fn design_space(scenario: Scenario) -> DesignSpace {
    let ((c_min, c_max), (dc_min, dc_max)) = match scenario {
        Scenario::Engine => ((150.0, 300.0), (30.0, 50.0)),
        Scenario::LawnMower => ((60.0, 130.0), (10.0, 20.0)),
    };
    let variables = [
        VariableSpec::new("c", "crankshaft bearing offset in mm", c_min, c_max),
        VariableSpec::new("dc", "crankshaft-pin diameter in mm", dc_min, dc_max),
    ];
    match scenario {
        Scenario::Engine => DesignSpace::grid(
            ID,
            scenario,
            variables,
            &[150.0, 187.5, 225.0, 262.5, 300.0],
            &[30.0, 35.0, 40.0, 45.0, 50.0],
        ),
        Scenario::LawnMower => DesignSpace::grid(
            ID,
            scenario,
            variables,
            &[60.0, 77.5, 95.0, 112.5, 130.0],
            &[10.0, 12.5, 15.0, 17.5, 20.0],
        ),
    }
}

/// Outside inputs of the crankshaft.
pub fn outside_inputs(scenario: Scenario) -> OutsideInputSpec {
    let ((ds_min, ds_max), (tf_min, tf_max)) = match scenario {
        Scenario::Engine => ((40.0, 60.0), (4.0, 51.0)),
        Scenario::LawnMower => ((15.0, 25.0), (10.0, 30.0)),
    };
    OutsideInputSpec::new(
        ID,
        vec![
            VariableSpec::new("ds", "flywheel shaft diameter in mm", ds_min, ds_max),
            VariableSpec::new("t_f", "flywheel thickness in mm", tf_min, tf_max),
            bore_input(scenario),
        ],
    )
}

/// All crankshaft inputs converted to metres.
#[derive(Debug, Clone, Copy)]
struct Inputs {
    offset: f64,
    pin_diameter: f64,
    pin_diameter_mm: f64,
    shaft_diameter: f64,
    flywheel_thickness: f64,
    load: GasLoad,
}

/// Crankshaft evaluator.
#[derive(Debug, Clone)]
pub struct Crankshaft {
    requirements: GlobalRequirements,
    params: CrankshaftParams,
    space: DesignSpace,
    outside: OutsideInputSpec,
}

impl Crankshaft {
    /// Creates the evaluator with default material parameters.
    pub fn new(config: &ScenarioConfig) -> Self {
        Self::with_params(config, CrankshaftParams::default())
    }

    /// Creates the evaluator with custom material parameters.
    pub fn with_params(config: &ScenarioConfig, params: CrankshaftParams) -> Self {
        Self {
            requirements: config.requirements.clone(),
            params,
            space: design_space(config.scenario),
            outside: outside_inputs(config.scenario),
        }
    }

    /// Material parameters in use.
    pub fn params(&self) -> &CrankshaftParams {
        &self.params
    }

    // Every outside input is required for both outputs.
    fn inputs(&self, x: &DesignPoint, outside_x: &DesignPoint) -> Result<Inputs> {
        let offset = x.require(ID, "c")? * MM;
        let dc_mm = x.require(ID, "dc")?;
        let shaft_diameter = outside_x.require(ID, "ds")? * MM;
        let flywheel_thickness = outside_x.require(ID, "t_f")? * MM;
        let bore = outside_x.require(ID, "D")? * MM;
        Ok(Inputs {
            offset,
            pin_diameter: dc_mm * MM,
            pin_diameter_mm: dc_mm,
            shaft_diameter,
            flywheel_thickness,
            load: GasLoad::from_bore(&self.requirements, bore),
        })
    }

    /// Unrounded factors of safety of each failure mode.
    pub fn failure_modes(&self, x: &DesignPoint, outside_x: &DesignPoint) -> Result<FailureModes> {
        let i = self.inputs(x, outside_x)?;
        let sy = self.params.yield_strength;
        let half = i.offset / 2.0;
        let reaction = i.load.force / 2.0;

        let crank_pin = PI * sy * i.pin_diameter.powi(3) / (32.0 * reaction * half);

        let web = CrankWeb::from_pin_diameter_mm(i.pin_diameter_mm);
        let pin_length = i.load.force / (i.pin_diameter * self.params.pin_bearing_pressure);
        let moment = reaction * (half - pin_length / 2.0 - web.thickness / 2.0);
        let bending = moment / (web.width * web.thickness.powi(2) / 6.0);
        let direct = reaction / (web.width * web.thickness);
        let crank_web = sy / (bending + direct);

        Ok(FailureModes {
            crank_pin,
            crank_web,
        })
    }
}

impl ComponentModel for Crankshaft {
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
        let i = self.inputs(x, outside_x)?;
        let rho = self.params.density;
        let web = CrankWeb::from_pin_diameter_mm(i.pin_diameter_mm);
        let pin_length = i.load.force / (i.pin_diameter * self.params.pin_sizing_pressure);

        let pin = rho * (PI / 4.0) * pin_length * i.pin_diameter.powi(2);
        let webs = web.thickness * web.width * i.load.crank_radius * 2.0 * rho;
        let shaft_length =
            2.0 * i.offset - pin_length - 2.0 * web.thickness - i.flywheel_thickness;
        let shaft = (PI / 4.0) * rho * i.shaft_diameter.powi(2) * shaft_length;

        Ok(round2(self.requirements.cylinders as f64 * (pin + webs + shaft)))
    }

    fn factor_of_safety(&self, x: &DesignPoint, outside_x: &DesignPoint) -> Result<f64> {
        Ok(round2(self.failure_modes(x, outside_x)?.governing()))
    }
}
