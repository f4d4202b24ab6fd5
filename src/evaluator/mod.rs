//! End-to-end design evaluation.
//!
//! [`DesignEvaluator`] runs the pipeline for one scenario: resolve outside
//! inputs, evaluate the five subsystems, aggregate and score. Each call is
//! independent; [`DesignEvaluator::evaluate_batch`] runs many selections,
//! on rayon's thread pool when the `parallel` feature is enabled.

mod config;
mod runner;

pub use config::EvaluatorConfig;
pub use runner::{DesignEvaluator, EvaluationReport};
