//! Connecting rod evaluator.
//!
//! Own variables: I-section thickness `t_I` (mm) and rod-to-crank length
//! ratio `r1`. Outside input: bore diameter `D` from the piston.

use super::physics::{round2, GasLoad, MM};
use super::piston::bore_input;
use super::types::ComponentModel;
use crate::design::{DesignPoint, DesignSpace, OutsideInputSpec, SubsystemId, VariableSpec};
use crate::error::Result;
use crate::scenario::{GlobalRequirements, Scenario, ScenarioConfig};

const ID: SubsystemId = SubsystemId::ConRod;

/// Fixed material parameters of the connecting rod.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConRodParams {
    /// Compressive yield strength in Pa.
    pub compressive_yield_strength: f64,
    /// Rod material density in kg/m³.
    pub density: f64,
    /// Rankine constant (1/7500 mild steel, 1/9000 wrought iron, 1/1600 cast iron).
    pub rankine_constant: f64,
}

impl Default for ConRodParams {
    fn default() -> Self {
        Self {
            compressive_yield_strength: 250e6,
            density: 8e3,
            rankine_constant: 1.0 / 1600.0,
        }
    }
}

/// Idealized I-section, every dimension proportional to the web thickness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ISection {
    /// Flange and web thickness in m.
    pub thickness: f64,
    /// Flange width (4t) in m.
    pub width: f64,
    /// Section height (5t) in m.
    pub height: f64,
    /// Cross-sectional area (11t²) in m².
    pub area: f64,
    /// Radius of gyration about the x-axis (1.78t) in m.
    pub radius_of_gyration: f64,
}

impl ISection {
    /// Section for thickness `t` in metres.
    pub fn from_thickness(t: f64) -> Self {
        Self {
            thickness: t,
            width: 4.0 * t,
            height: 5.0 * t,
            area: 11.0 * t.powi(2),
            radius_of_gyration: 1.78 * t,
        }
    }
}

/// Own design space of the connecting rod.
pub fn design_space(scenario: Scenario) -> DesignSpace {
    match scenario {
        Scenario::Engine => DesignSpace::grid(
            ID,
            scenario,
            [
                VariableSpec::new("t_I", "thickness of connecting rod I-section in mm", 5.0, 15.0),
                VariableSpec::new("r1", "ratio of length of connecting rod and crank length, l/r", 4.0, 5.0),
            ],
            &[5.0, 7.5, 10.0, 12.5, 15.0],
            &[4.0, 4.25, 4.5, 4.75, 5.0],
        ),
        Scenario::LawnMower => DesignSpace::grid(
            ID,
            scenario,
            [
                VariableSpec::new("t_I", "thickness of connecting rod I-section in mm", 2.0, 8.0),
                VariableSpec::new("r1", "ratio of length of connecting rod and crank length, l/r", 3.0, 6.0),
            ],
            &[2.0, 3.5, 5.0, 6.5, 8.0],
            &[3.0, 3.75, 4.5, 5.25, 6.0],
        ),
    }
}

/// Outside inputs of the connecting rod.
pub fn outside_inputs(scenario: Scenario) -> OutsideInputSpec {
    OutsideInputSpec::new(ID, vec![bore_input(scenario)])
}

/// Connecting rod evaluator.
///
/// Rod length is `r1` times the crank radius. Factor of safety is the
/// Rankine buckling margin; mass is density × length × section area ×
/// cylinder count.
#[derive(Debug, Clone)]
pub struct ConRod {
    requirements: GlobalRequirements,
    params: ConRodParams,
    space: DesignSpace,
    outside: OutsideInputSpec,
}

impl ConRod {
    /// Creates the evaluator with default material parameters.
    pub fn new(config: &ScenarioConfig) -> Self {
        Self::with_params(config, ConRodParams::default())
    }

    /// Creates the evaluator with custom material parameters.
    pub fn with_params(config: &ScenarioConfig, params: ConRodParams) -> Self {
        Self {
            requirements: config.requirements.clone(),
            params,
            space: design_space(config.scenario),
            outside: outside_inputs(config.scenario),
        }
    }

    /// Material parameters in use.
    pub fn params(&self) -> &ConRodParams {
        &self.params
    }

    /// Section, rod length in m, and gas load for a design point.
    fn layout(&self, x: &DesignPoint, outside_x: &DesignPoint) -> Result<(ISection, f64, GasLoad)> {
        let section = ISection::from_thickness(x.require(ID, "t_I")? * MM);
        let r1 = x.require(ID, "r1")?;
        let bore = outside_x.require(ID, "D")? * MM;
        let load = GasLoad::from_bore(&self.requirements, bore);
        Ok((section, r1 * load.crank_radius, load))
    }
}

impl ComponentModel for ConRod {
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
        let (section, length, _) = self.layout(x, outside_x)?;
        let per_cylinder = self.params.density * length * section.area;
        Ok(round2(self.requirements.cylinders as f64 * per_cylinder))
    }

    fn factor_of_safety(&self, x: &DesignPoint, outside_x: &DesignPoint) -> Result<f64> {
        let (section, length, load) = self.layout(x, outside_x)?;
        let slenderness = length / section.radius_of_gyration;
        let fos = self.params.compressive_yield_strength * section.area
            / (load.force * (1.0 + self.params.rankine_constant * slenderness.powi(2)));
        Ok(round2(fos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(scenario: Scenario) -> ConRod {
        ConRod::new(&ScenarioConfig::for_scenario(scenario))
    }

    fn x(t_i: f64, r1: f64) -> DesignPoint {
        DesignPoint::from([("t_I", t_i), ("r1", r1)])
    }

    fn bore(d: f64) -> DesignPoint {
        DesignPoint::from([("D", d)])
    }

    #[test]
    fn test_section_proportions() {
        let s = ISection::from_thickness(0.01);
        assert!((s.width - 0.04).abs() < 1e-15);
        assert!((s.height - 0.05).abs() < 1e-15);
        assert!((s.area - 11e-4).abs() < 1e-15);
        assert!((s.radius_of_gyration - 0.0178).abs() < 1e-15);
    }

    #[test]
    fn test_engine_reference_values() {
        let rod = model(Scenario::Engine);
        let upper = rod.evaluate(&x(15.0, 5.0), &bore(105.0)).unwrap();
        assert!((upper.mass - 36.38).abs() < 1e-9);
        assert!((upper.factor_of_safety - 22.95).abs() < 1e-9);

        let lower = rod.evaluate(&x(5.0, 4.0), &bore(75.0)).unwrap();
        assert!((lower.mass - 2.31).abs() < 1e-9);
        assert!((lower.factor_of_safety - 1.4).abs() < 1e-9);
    }

    #[test]
    fn test_lawn_mower_reference_values() {
        let rod = model(Scenario::LawnMower);
        let r = rod.evaluate(&x(8.0, 6.0), &bore(70.0)).unwrap();
        assert!((r.mass - 1.42).abs() < 1e-9);
        assert!((r.factor_of_safety - 81.34).abs() < 1e-9);
    }

    #[test]
    fn test_lawn_mower_mass_scales_with_cylinders() {
        let config = ScenarioConfig::for_scenario(Scenario::LawnMower);
        let four = ScenarioConfig::for_scenario(Scenario::LawnMower)
            .with_requirements(config.requirements.clone().with_cylinders(4));
        let single = ConRod::new(&config).mass(&x(8.0, 6.0), &bore(70.0)).unwrap();
        let scaled = ConRod::new(&four).mass(&x(8.0, 6.0), &bore(70.0)).unwrap();
        assert!((single - 1.42).abs() < 1e-9);
        assert!((scaled - 4.0 * single).abs() < 0.03);
    }

    #[test]
    fn test_longer_rod_buckles_sooner() {
        let rod = model(Scenario::Engine);
        let short = rod.factor_of_safety(&x(7.5, 4.0), &bore(90.0)).unwrap();
        let long = rod.factor_of_safety(&x(7.5, 5.0), &bore(90.0)).unwrap();
        assert!(long < short);
    }

    #[test]
    fn test_out_of_range_input_still_evaluates() {
        let rod = model(Scenario::Engine);
        let r = rod.evaluate(&x(-5.0, 4.5), &bore(90.0)).unwrap();
        // Area is quadratic in thickness, length stays positive.
        assert!(r.mass > 0.0);
        let zero = rod.evaluate(&x(0.0, 4.5), &bore(90.0)).unwrap();
        assert!(zero.factor_of_safety.abs() < 1e-12);
    }
}
