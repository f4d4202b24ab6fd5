//! Assembles each subsystem's outside-input point from a selection.

use super::edges::{edges_for, DEPENDENCY_EDGES};
use crate::component::outside_inputs;
use crate::design::{DesignPoint, DesignSelection, SubsystemId};
use crate::error::{EvalError, Result};
use crate::scenario::Scenario;
use std::collections::BTreeMap;
use tracing::trace;

/// Looks up outside inputs in a [`DesignSelection`] via
/// [`DEPENDENCY_EDGES`].
///
/// Values are copied, never derived: each outside input is exactly the
/// producer's chosen own-variable value.
#[derive(Debug, Clone)]
pub struct DependencyResolver {
    scenario: Scenario,
    strict: bool,
}

impl DependencyResolver {
    /// Creates a permissive resolver for `scenario`.
    pub fn new(scenario: Scenario) -> Self {
        Self {
            scenario,
            strict: false,
        }
    }

    /// Enables range checking of resolved outside inputs.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Scenario whose outside-input ranges apply in strict mode.
    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    /// Whether resolved values are range-checked.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Resolves the outside inputs of every subsystem.
    ///
    /// Fails on the first edge, in table order, whose producer has no design
    /// point in `selection`.
    pub fn resolve(&self, selection: &DesignSelection) -> Result<BTreeMap<SubsystemId, DesignPoint>> {
        let mut resolved: BTreeMap<SubsystemId, DesignPoint> = SubsystemId::ALL
            .into_iter()
            .map(|id| (id, DesignPoint::new()))
            .collect();
        for edge in &DEPENDENCY_EDGES {
            let value = lookup(selection, edge.consumer, edge.symbol, edge.producer, edge.producer_symbol)?;
            resolved.entry(edge.consumer).or_default().set(edge.symbol, value);
        }
        if self.strict {
            for (id, point) in &resolved {
                outside_inputs(*id, self.scenario).check_range(point)?;
            }
        }
        Ok(resolved)
    }

    /// Resolves the outside inputs of one subsystem.
    pub fn resolve_for(&self, consumer: SubsystemId, selection: &DesignSelection) -> Result<DesignPoint> {
        let mut point = DesignPoint::new();
        for edge in edges_for(consumer) {
            let value = lookup(selection, consumer, edge.symbol, edge.producer, edge.producer_symbol)?;
            point.set(edge.symbol, value);
        }
        if self.strict {
            outside_inputs(consumer, self.scenario).check_range(&point)?;
        }
        Ok(point)
    }
}

fn lookup(
    selection: &DesignSelection,
    consumer: SubsystemId,
    symbol: &str,
    producer: SubsystemId,
    producer_symbol: &str,
) -> Result<f64> {
    let missing = || EvalError::MissingDependency {
        consumer,
        producer,
        symbol: symbol.to_string(),
    };
    let value = selection
        .get(producer)
        .ok_or_else(missing)?
        .get(producer_symbol)
        .ok_or_else(missing)?;
    trace!(%consumer, symbol, %producer, value, "resolved outside input");
    Ok(value)
}
