//! Coupled feasibility evaluation for reciprocating-engine subsystem design.
//!
//! Five subsystems (piston, piston pin, connecting rod, crankshaft,
//! flywheel) each choose a design point from a discretized catalog. Some
//! evaluators need variables chosen by another subsystem; those are looked
//! up through a fixed dependency table. Each subsystem reports a mass and a
//! factor of safety, and the aggregator turns the total mass and the
//! weakest factor of safety into quality tiers and a payoff.
//!
//! - **scenario**: operating scenarios (`engine`, `lawn_mower`) and their
//!   global requirements.
//! - **design**: subsystem identifiers, design points, catalogs, and full
//!   selections.
//! - **component**: the five closed-form evaluators behind one trait.
//! - **resolve**: the cross-subsystem dependency table and resolver.
//! - **scoring**: quality scales, payoff table, and the aggregator.
//! - **evaluator**: the resolve → evaluate → aggregate pipeline.
//!
//! # Example
//!
//! ```
//! use u_mechdesign::design::DesignSelection;
//! use u_mechdesign::evaluator::DesignEvaluator;
//! use u_mechdesign::scenario::Scenario;
//! use u_mechdesign::scoring::QualityLabel;
//!
//! let evaluator = DesignEvaluator::new(Scenario::LawnMower);
//! let report = evaluator
//!     .evaluate(&DesignSelection::baseline(Scenario::LawnMower))
//!     .unwrap();
//! assert!((report.aggregate.overall_mass - 4.73).abs() < 1e-9);
//! assert_eq!(report.aggregate.label, QualityLabel::Poor);
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for configuration, design, and
//!   result types.
//! - `parallel`: rayon-backed [`evaluator::DesignEvaluator::evaluate_batch`].

pub mod component;
pub mod design;
pub mod error;
pub mod evaluator;
pub mod resolve;
pub mod scenario;
pub mod scoring;

pub use error::{EvalError, Result};
