//! Design spaces and design points.
//!
//! # Key Types
//!
//! - [`SubsystemId`]: the five engine subsystems
//! - [`DesignPoint`]: symbol → value map in declared input units (mm or ratio)
//! - [`DesignSpace`]: own-variable ranges plus the discretized catalog
//! - [`OutsideInputSpec`]: variables a subsystem receives from others
//! - [`DesignSelection`]: one chosen point per subsystem

mod selection;
mod types;

pub use selection::DesignSelection;
pub use types::{DesignPoint, DesignSpace, OutsideInputSpec, SubsystemId, VariableSpec};
