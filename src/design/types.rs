//! Subsystem identifiers, design points, and design-space metadata.

use crate::error::{EvalError, Result};
use crate::scenario::Scenario;
use rand::Rng;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Tolerance used when matching a design point against catalog entries.
const CATALOG_EPS: f64 = 1e-9;

/// One of the five engine subsystems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SubsystemId {
    Piston,
    PistonPin,
    ConRod,
    Crankshaft,
    Flywheel,
}

impl SubsystemId {
    /// All subsystems in canonical order.
    pub const ALL: [SubsystemId; 5] = [
        SubsystemId::Piston,
        SubsystemId::PistonPin,
        SubsystemId::ConRod,
        SubsystemId::Crankshaft,
        SubsystemId::Flywheel,
    ];

    /// Canonical team name.
    pub fn name(self) -> &'static str {
        match self {
            SubsystemId::Piston => "piston",
            SubsystemId::PistonPin => "pistonpin",
            SubsystemId::ConRod => "conrod",
            SubsystemId::Crankshaft => "crankshaft",
            SubsystemId::Flywheel => "flywheel",
        }
    }
}

impl fmt::Display for SubsystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SubsystemId {
    type Err = EvalError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        SubsystemId::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| EvalError::UnknownSubsystem(s.to_string()))
    }
}

/// A mapping of variable symbol to value.
///
/// Values carry the subsystem's declared input units: lengths in
/// millimetres, ratios dimensionless. Evaluators convert to metres.
///
/// ```
/// use u_mechdesign::design::DesignPoint;
///
/// let x = DesignPoint::from([("t_H", 10.5), ("D", 105.0)]);
/// assert_eq!(x.get("D"), Some(105.0));
/// assert_eq!(x.get("c"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DesignPoint {
    values: BTreeMap<String, f64>,
}

impl DesignPoint {
    /// Creates an empty design point.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a value, returning the point.
    pub fn with(mut self, symbol: impl Into<String>, value: f64) -> Self {
        self.values.insert(symbol.into(), value);
        self
    }

    /// Adds or replaces a value.
    pub fn set(&mut self, symbol: impl Into<String>, value: f64) {
        self.values.insert(symbol.into(), value);
    }

    /// Returns the value for `symbol`, if present.
    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.values.get(symbol).copied()
    }

    /// Returns the value for `symbol` or a [`EvalError::Domain`] naming
    /// `subsystem` as the evaluator that needed it.
    pub fn require(&self, subsystem: SubsystemId, symbol: &str) -> Result<f64> {
        self.get(symbol).ok_or_else(|| EvalError::Domain {
            subsystem,
            symbol: symbol.to_string(),
        })
    }

    /// Number of symbols in the point.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the point holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates `(symbol, value)` pairs in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<S: Into<String>, const N: usize> From<[(S, f64); N]> for DesignPoint {
    fn from(pairs: [(S, f64); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for DesignPoint {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// A named variable with an inclusive admissible range.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableSpec {
    /// Symbol used in design points (e.g. `t_H`).
    pub symbol: String,
    /// Human-readable description including units.
    pub label: String,
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
}

impl VariableSpec {
    /// Creates a variable spec.
    pub fn new(symbol: impl Into<String>, label: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            symbol: symbol.into(),
            label: label.into(),
            min,
            max,
        }
    }

    /// Whether `value` lies in `[min, max]`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Checks every listed symbol is present in `point` and within range.
fn check_ranges(subsystem: SubsystemId, specs: &[VariableSpec], point: &DesignPoint) -> Result<()> {
    for spec in specs {
        let value = point.require(subsystem, &spec.symbol)?;
        if !spec.contains(value) {
            return Err(EvalError::OutOfRange {
                subsystem,
                symbol: spec.symbol.clone(),
                value,
                min: spec.min,
                max: spec.max,
            });
        }
    }
    Ok(())
}

/// The bounded, discretized design space of one subsystem in one scenario.
///
/// Two own variables, each with an inclusive range, and a finite catalog of
/// legal `(v1, v2)` combinations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DesignSpace {
    /// Owning subsystem.
    pub subsystem: SubsystemId,
    /// Scenario the ranges and catalog belong to.
    pub scenario: Scenario,
    /// Own variables in catalog column order.
    pub variables: [VariableSpec; 2],
    /// Legal combinations; column `i` is `variables[i]`.
    pub catalog: Vec<[f64; 2]>,
}

impl DesignSpace {
    /// Creates a design space from an explicit catalog.
    pub fn new(
        subsystem: SubsystemId,
        scenario: Scenario,
        variables: [VariableSpec; 2],
        catalog: Vec<[f64; 2]>,
    ) -> Self {
        Self {
            subsystem,
            scenario,
            variables,
            catalog,
        }
    }

    /// Creates a design space whose catalog is the full grid of `first` ×
    /// `second`, with the first variable varying fastest.
    pub fn grid(
        subsystem: SubsystemId,
        scenario: Scenario,
        variables: [VariableSpec; 2],
        first: &[f64],
        second: &[f64],
    ) -> Self {
        let catalog = second
            .iter()
            .flat_map(|&b| first.iter().map(move |&a| [a, b]))
            .collect();
        Self::new(subsystem, scenario, variables, catalog)
    }

    /// Own-variable symbols in order.
    pub fn symbols(&self) -> [&str; 2] {
        [self.variables[0].symbol.as_str(), self.variables[1].symbol.as_str()]
    }

    /// Looks up a variable by symbol.
    pub fn variable(&self, symbol: &str) -> Option<&VariableSpec> {
        self.variables.iter().find(|v| v.symbol == symbol)
    }

    /// Number of catalog entries.
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Converts a catalog row to a design point.
    pub fn to_point(&self, entry: [f64; 2]) -> DesignPoint {
        DesignPoint::from([
            (self.variables[0].symbol.as_str(), entry[0]),
            (self.variables[1].symbol.as_str(), entry[1]),
        ])
    }

    /// The catalog entry at `index` as a design point.
    pub fn point(&self, index: usize) -> Option<DesignPoint> {
        self.catalog.get(index).map(|&e| self.to_point(e))
    }

    /// Iterates every catalog entry as a design point.
    pub fn points(&self) -> impl Iterator<Item = DesignPoint> + '_ {
        self.catalog.iter().map(|&e| self.to_point(e))
    }

    /// The point at the lower bound of every variable.
    pub fn lower_corner(&self) -> DesignPoint {
        self.to_point([self.variables[0].min, self.variables[1].min])
    }

    /// The point at the upper bound of every variable.
    pub fn upper_corner(&self) -> DesignPoint {
        self.to_point([self.variables[0].max, self.variables[1].max])
    }

    /// Draws a catalog entry uniformly at random.
    ///
    /// Returns `None` only for an empty catalog.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Option<DesignPoint> {
        if self.catalog.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..self.catalog.len());
        self.point(idx)
    }

    /// Checks that `point` has every own variable within its range.
    pub fn check_range(&self, point: &DesignPoint) -> Result<()> {
        check_ranges(self.subsystem, &self.variables, point)
    }

    /// Whether `point` has every own variable within its range.
    pub fn in_range(&self, point: &DesignPoint) -> bool {
        self.check_range(point).is_ok()
    }

    /// Whether `point` matches a catalog entry.
    pub fn contains(&self, point: &DesignPoint) -> bool {
        let [s0, s1] = self.symbols();
        let (Some(v0), Some(v1)) = (point.get(s0), point.get(s1)) else {
            return false;
        };
        self.catalog
            .iter()
            .any(|e| (e[0] - v0).abs() <= CATALOG_EPS && (e[1] - v1).abs() <= CATALOG_EPS)
    }

    /// Validates the space: ordered ranges, non-empty catalog, every entry
    /// within range.
    pub fn validate(&self) -> std::result::Result<(), String> {
        for v in &self.variables {
            if !(v.min <= v.max) {
                return Err(format!("{}: `{}` has min > max", self.subsystem, v.symbol));
            }
        }
        if self.catalog.is_empty() {
            return Err(format!("{}: catalog is empty", self.subsystem));
        }
        for entry in &self.catalog {
            for (v, &value) in self.variables.iter().zip(entry.iter()) {
                if !v.contains(value) {
                    return Err(format!(
                        "{}: catalog value {value} for `{}` outside [{}, {}]",
                        self.subsystem, v.symbol, v.min, v.max
                    ));
                }
            }
        }
        Ok(())
    }
}

/// The variables a subsystem receives from other subsystems.
///
/// Which subsystem produces each symbol is recorded in the dependency
/// table ([`crate::resolve::DEPENDENCY_EDGES`]).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutsideInputSpec {
    /// Consuming subsystem.
    pub subsystem: SubsystemId,
    /// Required outside inputs in order.
    pub inputs: Vec<VariableSpec>,
}

impl OutsideInputSpec {
    /// Creates a spec.
    pub fn new(subsystem: SubsystemId, inputs: Vec<VariableSpec>) -> Self {
        Self { subsystem, inputs }
    }

    /// A spec with no outside inputs.
    pub fn none(subsystem: SubsystemId) -> Self {
        Self::new(subsystem, Vec::new())
    }

    /// Outside-input symbols in order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.inputs.iter().map(|v| v.symbol.as_str())
    }

    /// Looks up an outside input by symbol.
    pub fn input(&self, symbol: &str) -> Option<&VariableSpec> {
        self.inputs.iter().find(|v| v.symbol == symbol)
    }

    /// Whether the subsystem needs nothing from other subsystems.
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Checks that `point` has every outside input within its range.
    pub fn check_range(&self, point: &DesignPoint) -> Result<()> {
        check_ranges(self.subsystem, &self.inputs, point)
    }
}
