//! Flywheel evaluator.
//!
//! Own variables: disc thickness `t_f` and shaft diameter `ds` (mm).
//! Outside input: crankshaft bearing offset `c`.
//!
//! The flywheel is sized as a solid disc storing the energy fluctuation of
//! one revolution. Its factor of safety is the bending margin of the shaft
//! carrying half the flywheel weight over half the bearing offset. The
//! flywheel is a single part, so mass is not scaled by cylinder count.

use super::physics::{round2, GRAVITY, MM};
use super::types::ComponentModel;
use crate::design::{DesignPoint, DesignSpace, OutsideInputSpec, SubsystemId, VariableSpec};
use crate::error::Result;
use crate::scenario::{Scenario, ScenarioConfig};
use std::f64::consts::PI;

const ID: SubsystemId = SubsystemId::Flywheel;

/// Fixed material parameters of the flywheel.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlywheelParams {
    /// Shaft yield strength in Pa.
    pub yield_strength: f64,
    /// Disc density in kg/m³.
    pub disc_density: f64,
    /// Shaft density in kg/m³.
    pub shaft_density: f64,
    /// Energy fluctuation as a fraction of work done per revolution.
    pub energy_coefficient: f64,
}

impl Default for FlywheelParams {
    fn default() -> Self {
        Self {
            yield_strength: 275e6,
            disc_density: 8e3,
            shaft_density: 8e3,
            energy_coefficient: 0.066,
        }
    }
}

/// Duty quantities fixed by the global requirements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlywheelDuty {
    /// Maximum angular speed in rad/s.
    pub max_speed: f64,
    /// Mean angular speed in rad/s.
    pub mean_speed: f64,
    /// Coefficient of speed fluctuation.
    pub fluctuation: f64,
    /// Maximum fluctuation of energy per revolution in J.
    pub energy_fluctuation: f64,
}

impl FlywheelDuty {
    fn new(config: &ScenarioConfig, params: &FlywheelParams) -> Self {
        let reqs = &config.requirements;
        let max_speed = reqs.angular_speed();
        let fluctuation = reqs.speed_fluctuation;
        let work_per_rev = (reqs.power / reqs.mechanical_efficiency) * 60.0 / reqs.speed_rpm;
        Self {
            max_speed,
            mean_speed: max_speed / (1.0 + fluctuation / 2.0),
            fluctuation,
            energy_fluctuation: params.energy_coefficient * work_per_rev,
        }
    }
}

/// Own design space of the flywheel.
pub fn design_space(scenario: Scenario) -> DesignSpace {
    let ((tf_min, tf_max), (ds_min, ds_max)) = match scenario {
        Scenario::Engine => ((12.0, 51.0), (40.0, 60.0)),
        Scenario::LawnMower => ((10.0, 30.0), (15.0, 25.0)),
    };
    let variables = [
        VariableSpec::new("t_f", "flywheel thickness in mm", tf_min, tf_max),
        VariableSpec::new("ds", "flywheel shaft diameter in mm", ds_min, ds_max),
    ];
    match scenario {
        Scenario::Engine => DesignSpace::grid(
            ID,
            scenario,
            variables,
            &[12.0, 21.75, 31.5, 41.25, 51.0],
            &[40.0, 45.0, 50.0, 55.0, 60.0],
        ),
        Scenario::LawnMower => DesignSpace::grid(
            ID,
            scenario,
            variables,
            &[10.0, 15.0, 20.0, 25.0, 30.0],
            &[15.0, 17.5, 20.0, 22.5, 25.0],
        ),
    }
}

/// Outside inputs of the flywheel.
pub fn outside_inputs(scenario: Scenario) -> OutsideInputSpec {
    let (min, max) = match scenario {
        Scenario::Engine => (150.0, 300.0),
        Scenario::LawnMower => (60.0, 130.0),
    };
    OutsideInputSpec::new(
        ID,
        vec![VariableSpec::new(
            "c",
            "crank-shaft bearing support offset in mm",
            min,
            max,
        )],
    )
}

/// Flywheel evaluator.
#[derive(Debug, Clone)]
pub struct Flywheel {
    params: FlywheelParams,
    duty: FlywheelDuty,
    space: DesignSpace,
    outside: OutsideInputSpec,
}

impl Flywheel {
    /// Creates the evaluator with default material parameters.
    pub fn new(config: &ScenarioConfig) -> Self {
        Self::with_params(config, FlywheelParams::default())
    }

    /// Creates the evaluator with custom material parameters.
    pub fn with_params(config: &ScenarioConfig, params: FlywheelParams) -> Self {
        let duty = FlywheelDuty::new(config, &params);
        Self {
            params,
            duty,
            space: design_space(config.scenario),
            outside: outside_inputs(config.scenario),
        }
    }

    /// Material parameters in use.
    pub fn params(&self) -> &FlywheelParams {
        &self.params
    }

    /// Duty quantities computed at construction.
    pub fn duty(&self) -> &FlywheelDuty {
        &self.duty
    }

    /// Disc mass in kg for a thickness in metres.
    fn disc_mass(&self, thickness: f64) -> f64 {
        let d = &self.duty;
        (d.energy_fluctuation * PI * self.params.disc_density * thickness
            / (d.fluctuation * d.mean_speed.powi(2)))
        .sqrt()
    }

    /// Outer radius of the disc in m implied by its mass.
    pub fn rim_radius(&self, x: &DesignPoint) -> Result<f64> {
        let thickness = x.require(ID, "t_f")? * MM;
        let shaft = x.require(ID, "ds")? * MM;
        let m = self.disc_mass(thickness);
        Ok(((shaft / 2.0).powi(2) + m / (self.params.disc_density * PI * thickness)).sqrt())
    }
}

impl ComponentModel for Flywheel {
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
        let thickness = x.require(ID, "t_f")? * MM;
        let shaft = x.require(ID, "ds")? * MM;
        // Declared for both outputs even though the mass does not depend on it.
        outside_x.require(ID, "c")?;
        let shaft_mass = self.params.shaft_density * (PI / 4.0) * shaft.powi(2) * thickness;
        Ok(round2(self.disc_mass(thickness) + shaft_mass))
    }

    fn factor_of_safety(&self, x: &DesignPoint, outside_x: &DesignPoint) -> Result<f64> {
        let thickness = x.require(ID, "t_f")? * MM;
        let shaft = x.require(ID, "ds")? * MM;
        let offset = outside_x.require(ID, "c")? * MM;
        let reaction = self.disc_mass(thickness) * GRAVITY / 2.0;
        let fos = PI * self.params.yield_strength * shaft.powi(3)
            / (32.0 * reaction * offset / 2.0);
        Ok(round2(fos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;

    fn model(scenario: Scenario) -> Flywheel {
        Flywheel::new(&ScenarioConfig::for_scenario(scenario))
    }

    fn x(t_f: f64, ds: f64) -> DesignPoint {
        DesignPoint::from([("t_f", t_f), ("ds", ds)])
    }

    fn offset(c: f64) -> DesignPoint {
        DesignPoint::from([("c", c)])
    }

    #[test]
    fn test_duty_constants() {
        let fw = model(Scenario::Engine);
        let duty = fw.duty();
        let w_max = 6500.0 * PI / 30.0;
        assert!((duty.max_speed - w_max).abs() < 1e-9);
        assert!((duty.mean_speed - w_max / 1.04).abs() < 1e-9);
        assert!((duty.fluctuation - 0.08).abs() < 1e-15);
        let work = (130e3 / 0.7) * 60.0 / 6500.0;
        assert!((duty.energy_fluctuation - 0.066 * work).abs() < 1e-9);
    }

    #[test]
    fn test_engine_reference_values() {
        let fw = model(Scenario::Engine);
        let upper = fw.evaluate(&x(51.0, 60.0), &offset(300.0)).unwrap();
        assert!((upper.mass - 3.21).abs() < 1e-9);
        assert!((upper.factor_of_safety - 3852.93).abs() < 1e-6);

        let lower = fw.evaluate(&x(12.0, 40.0), &offset(150.0)).unwrap();
        assert!((lower.mass - 1.12).abs() < 1e-9);
        assert!((lower.factor_of_safety - 4706.97).abs() < 1e-6);
    }

    #[test]
    fn test_lawn_mower_reference_values() {
        let fw = model(Scenario::LawnMower);
        let upper = fw.evaluate(&x(30.0, 25.0), &offset(130.0)).unwrap();
        assert!((upper.mass - 1.0).abs() < 1e-9);
        assert!((upper.factor_of_safety - 1499.04).abs() < 1e-6);

        let lower = fw.evaluate(&x(10.0, 15.0), &offset(60.0)).unwrap();
        assert!((lower.mass - 0.52).abs() < 1e-9);
        assert!((lower.factor_of_safety - 1215.12).abs() < 1e-6);
    }

    #[test]
    fn test_mass_ignores_cylinder_count() {
        let config = ScenarioConfig::for_scenario(Scenario::Engine);
        let single = ScenarioConfig::for_scenario(Scenario::Engine)
            .with_requirements(config.requirements.clone().with_cylinders(1));
        let a = Flywheel::new(&config).mass(&x(31.5, 50.0), &offset(225.0)).unwrap();
        let b = Flywheel::new(&single).mass(&x(31.5, 50.0), &offset(225.0)).unwrap();
        assert!((a - b).abs() < 1e-15);
        assert!((a - 2.11).abs() < 1e-9);
    }

    #[test]
    fn test_rim_radius() {
        let fw = model(Scenario::Engine);
        let r = fw.rim_radius(&x(51.0, 60.0)).unwrap();
        assert!((r - 0.05004923).abs() < 1e-7);
    }

    #[test]
    fn test_mass_requires_offset() {
        let fw = model(Scenario::Engine);
        let err = fw.mass(&x(51.0, 60.0), &DesignPoint::new()).unwrap_err();
        assert_eq!(
            err,
            EvalError::Domain {
                subsystem: SubsystemId::Flywheel,
                symbol: "c".into()
            }
        );
    }

    #[test]
    fn test_fos_requires_offset() {
        let fw = model(Scenario::Engine);
        let err = fw.factor_of_safety(&x(51.0, 60.0), &DesignPoint::new()).unwrap_err();
        assert_eq!(
            err,
            EvalError::Domain {
                subsystem: SubsystemId::Flywheel,
                symbol: "c".into()
            }
        );
    }
}
