//! Lookup of evaluators, design spaces, and outside inputs by subsystem.

use super::conrod::{self, ConRod};
use super::crankshaft::{self, Crankshaft};
use super::flywheel::{self, Flywheel};
use super::piston::{self, Piston};
use super::piston_pin::{self, PistonPin};
use super::types::ComponentModel;
use crate::design::{DesignSpace, OutsideInputSpec, SubsystemId};
use crate::scenario::{Scenario, ScenarioConfig};

/// Own design space of `id` in `scenario`.
pub fn design_space(id: SubsystemId, scenario: Scenario) -> DesignSpace {
    match id {
        SubsystemId::Piston => piston::design_space(scenario),
        SubsystemId::PistonPin => piston_pin::design_space(scenario),
        SubsystemId::ConRod => conrod::design_space(scenario),
        SubsystemId::Crankshaft => crankshaft::design_space(scenario),
        SubsystemId::Flywheel => flywheel::design_space(scenario),
    }
}

/// Outside inputs `id` consumes in `scenario`.
pub fn outside_inputs(id: SubsystemId, scenario: Scenario) -> OutsideInputSpec {
    match id {
        SubsystemId::Piston => OutsideInputSpec::none(id),
        SubsystemId::PistonPin => piston_pin::outside_inputs(scenario),
        SubsystemId::ConRod => conrod::outside_inputs(scenario),
        SubsystemId::Crankshaft => crankshaft::outside_inputs(scenario),
        SubsystemId::Flywheel => flywheel::outside_inputs(scenario),
    }
}

/// Builds the evaluator for `id` with default material parameters.
pub fn build_model(id: SubsystemId, config: &ScenarioConfig) -> Box<dyn ComponentModel> {
    match id {
        SubsystemId::Piston => Box::new(Piston::new(config)),
        SubsystemId::PistonPin => Box::new(PistonPin::new(config)),
        SubsystemId::ConRod => Box::new(ConRod::new(config)),
        SubsystemId::Crankshaft => Box::new(Crankshaft::new(config)),
        SubsystemId::Flywheel => Box::new(Flywheel::new(config)),
    }
}

/// Builds every evaluator, in [`SubsystemId::ALL`] order.
pub fn build_all(config: &ScenarioConfig) -> Vec<Box<dyn ComponentModel>> {
    SubsystemId::ALL
        .into_iter()
        .map(|id| build_model(id, config))
        .collect()
}
