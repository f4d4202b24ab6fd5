//! Subsystem evaluators.
//!
//! Each subsystem maps its own design point plus resolved outside inputs to
//! a mass and a factor of safety. The shared load chain lives in
//! [`GasLoad`].
//!
//! # Key Types
//!
//! - [`ComponentModel`]: trait every evaluator implements
//! - [`EvaluationResult`]: mass and factor of safety of one subsystem
//! - [`Piston`], [`PistonPin`], [`ConRod`], [`Crankshaft`], [`Flywheel`]:
//!   the five evaluators, each with a `*Params` material record
//!
//! # Units
//!
//! Design points carry millimetres or dimensionless ratios. Evaluators
//! convert to SI internally and report kg and dimensionless factors of
//! safety, rounded to two decimals.

mod catalog;
mod conrod;
mod crankshaft;
mod flywheel;
mod physics;
mod piston;
mod piston_pin;
mod types;

pub use catalog::{build_all, build_model, design_space, outside_inputs};
pub use conrod::{ConRod, ConRodParams, ISection};
pub use crankshaft::{CrankWeb, Crankshaft, CrankshaftParams, FailureModes};
pub use flywheel::{Flywheel, FlywheelDuty, FlywheelParams};
pub use physics::{GasLoad, PEAK_PRESSURE_FACTOR};
pub(crate) use physics::nan_min;
pub use piston::{Piston, PistonParams};
pub use piston_pin::{PinGeometry, PistonPin, PistonPinParams};
pub use types::{ComponentModel, EvaluationResult};
