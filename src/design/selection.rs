//! A full set of chosen design points, one per subsystem.

use super::types::{DesignPoint, SubsystemId};
use crate::component::design_space;
use crate::scenario::Scenario;
use rand::Rng;
use std::collections::BTreeMap;

/// The design points chosen for each subsystem.
///
/// Points are chosen independently; cross-subsystem values are looked up
/// by the resolver, never computed. A selection may be partial, in which
/// case evaluating a subsystem whose producer is absent fails with
/// [`EvalError::MissingDependency`](crate::error::EvalError::MissingDependency).
///
/// ```
/// use u_mechdesign::design::{DesignPoint, DesignSelection, SubsystemId};
///
/// let selection = DesignSelection::new()
///     .with(SubsystemId::Piston, DesignPoint::from([("t_H", 10.5), ("D", 105.0)]));
/// assert!(selection.contains(SubsystemId::Piston));
/// assert!(!selection.contains(SubsystemId::Flywheel));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DesignSelection {
    points: BTreeMap<SubsystemId, DesignPoint>,
}

impl DesignSelection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the point for `id`, returning the selection.
    pub fn with(mut self, id: SubsystemId, point: DesignPoint) -> Self {
        self.points.insert(id, point);
        self
    }

    /// Sets the point for `id`, returning the previous point.
    pub fn insert(&mut self, id: SubsystemId, point: DesignPoint) -> Option<DesignPoint> {
        self.points.insert(id, point)
    }

    /// Removes the point for `id`.
    pub fn remove(&mut self, id: SubsystemId) -> Option<DesignPoint> {
        self.points.remove(&id)
    }

    /// The point chosen for `id`.
    pub fn get(&self, id: SubsystemId) -> Option<&DesignPoint> {
        self.points.get(&id)
    }

    /// Whether a point was chosen for `id`.
    pub fn contains(&self, id: SubsystemId) -> bool {
        self.points.contains_key(&id)
    }

    /// Number of subsystems with a chosen point.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no point was chosen.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates chosen points in canonical subsystem order.
    pub fn iter(&self) -> impl Iterator<Item = (SubsystemId, &DesignPoint)> {
        self.points.iter().map(|(id, p)| (*id, p))
    }

    /// The initial design every team starts the exercise from.
    ///
    /// This is the upper corner of every catalog (engine: `D = 105`,
    /// `c = 300`, `t_f = 51`, `ds = 60`; lawn mower: `D = 70`, `c = 130`,
    /// `t_f = 30`, `ds = 25`).
    pub fn baseline(scenario: Scenario) -> Self {
        Self::upper_corner(scenario)
    }

    /// Every subsystem at the lower bound of each of its variables.
    pub fn lower_corner(scenario: Scenario) -> Self {
        SubsystemId::ALL
            .into_iter()
            .map(|id| (id, design_space(id, scenario).lower_corner()))
            .collect()
    }

    /// Every subsystem at the upper bound of each of its variables.
    pub fn upper_corner(scenario: Scenario) -> Self {
        SubsystemId::ALL
            .into_iter()
            .map(|id| (id, design_space(id, scenario).upper_corner()))
            .collect()
    }

    /// Draws every subsystem's point uniformly from its catalog.
    pub fn random<R: Rng>(scenario: Scenario, rng: &mut R) -> Self {
        let mut selection = Self::new();
        for id in SubsystemId::ALL {
            if let Some(point) = design_space(id, scenario).sample(rng) {
                selection.insert(id, point);
            }
        }
        selection
    }
}

impl FromIterator<(SubsystemId, DesignPoint)> for DesignSelection {
    fn from_iter<I: IntoIterator<Item = (SubsystemId, DesignPoint)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}
