//! The fixed table of cross-subsystem variable flows.

use crate::design::SubsystemId;

/// One outside-input flow: `consumer.symbol` takes the value of
/// `producer.producer_symbol` from the producer's chosen design point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DependencyEdge {
    /// Subsystem receiving the value.
    pub consumer: SubsystemId,
    /// Outside-input symbol on the consumer.
    pub symbol: &'static str,
    /// Subsystem whose own design variable supplies the value.
    pub producer: SubsystemId,
    /// Own-variable symbol on the producer.
    pub producer_symbol: &'static str,
}

impl DependencyEdge {
    const fn new(
        consumer: SubsystemId,
        symbol: &'static str,
        producer: SubsystemId,
        producer_symbol: &'static str,
    ) -> Self {
        Self {
            consumer,
            symbol,
            producer,
            producer_symbol,
        }
    }
}

/// Every outside-input flow, grouped by consumer in canonical order.
///
/// Crankshaft and flywheel reference each other's own variables. Both are
/// independent design choices read from the selection, so the table has no
/// evaluation-time cycle.
pub static DEPENDENCY_EDGES: [DependencyEdge; 6] = [
    DependencyEdge::new(SubsystemId::PistonPin, "D", SubsystemId::Piston, "D"),
    DependencyEdge::new(SubsystemId::ConRod, "D", SubsystemId::Piston, "D"),
    DependencyEdge::new(SubsystemId::Crankshaft, "ds", SubsystemId::Flywheel, "ds"),
    DependencyEdge::new(SubsystemId::Crankshaft, "t_f", SubsystemId::Flywheel, "t_f"),
    DependencyEdge::new(SubsystemId::Crankshaft, "D", SubsystemId::Piston, "D"),
    DependencyEdge::new(SubsystemId::Flywheel, "c", SubsystemId::Crankshaft, "c"),
];

/// Edges feeding `consumer`, in table order.
pub fn edges_for(consumer: SubsystemId) -> impl Iterator<Item = &'static DependencyEdge> {
    DEPENDENCY_EDGES.iter().filter(move |e| e.consumer == consumer)
}

/// The edge supplying `symbol` to `consumer`, if any.
pub fn producer_of(consumer: SubsystemId, symbol: &str) -> Option<&'static DependencyEdge> {
    edges_for(consumer).find(|e| e.symbol == symbol)
}
