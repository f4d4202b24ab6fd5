//! Dependency resolution between subsystems.
//!
//! Subsystems choose their own design points independently. Some
//! evaluators also need a variable owned by another subsystem; this module
//! records who supplies what ([`DEPENDENCY_EDGES`]) and copies those values
//! into per-subsystem outside-input points ([`DependencyResolver`]).

mod edges;
mod resolver;

pub use edges::{edges_for, producer_of, DependencyEdge, DEPENDENCY_EDGES};
pub use resolver::DependencyResolver;
