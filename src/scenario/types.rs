//! Operating scenario tag.

use crate::error::EvalError;
use std::fmt;
use std::str::FromStr;

/// Operating scenario an engine design is evaluated against.
///
/// Selects one set of global requirements, one set of per-subsystem
/// ranges and catalogs, and one set of quality scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Scenario {
    /// Four-cylinder automotive engine.
    Engine,
    /// Single-cylinder lawn mower engine.
    LawnMower,
}

impl Scenario {
    /// Every supported scenario.
    pub const ALL: [Scenario; 2] = [Scenario::Engine, Scenario::LawnMower];

    /// Canonical name (`engine`, `lawn_mower`).
    pub fn name(self) -> &'static str {
        match self {
            Scenario::Engine => "engine",
            Scenario::LawnMower => "lawn_mower",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "engine" => Ok(Scenario::Engine),
            "lawn_mower" => Ok(Scenario::LawnMower),
            other => Err(EvalError::UnknownScenario(other.to_string())),
        }
    }
}
