//! Shared closed-form relations.
//!
//! Every per-cylinder subsystem derives its loads from the same chain:
//! brake power → brake mean effective pressure → peak cylinder pressure →
//! peak gas force on the piston.

use crate::scenario::GlobalRequirements;
use std::f64::consts::PI;

/// Millimetres to metres.
pub(crate) const MM: f64 = 1e-3;

/// Standard gravity in m/s².
pub(crate) const GRAVITY: f64 = 9.81;

/// Peak cylinder pressure as a multiple of brake mean effective pressure.
pub const PEAK_PRESSURE_FACTOR: f64 = 9.5;

/// Rounds to two decimal places.
pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Minimum of two values; NaN if either is NaN.
pub(crate) fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

/// Gas load derived from the bore diameter and global requirements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasLoad {
    /// Brake mean effective pressure in Pa.
    pub mean_effective_pressure: f64,
    /// Peak cylinder pressure in Pa.
    pub peak_pressure: f64,
    /// Peak gas force on the piston in N.
    pub force: f64,
    /// Crank radius (half the stroke) in m.
    pub crank_radius: f64,
}

impl GasLoad {
    /// Computes the load for a bore diameter in metres.
    pub fn from_bore(reqs: &GlobalRequirements, bore: f64) -> Self {
        let omega = reqs.angular_speed();
        let stroke = reqs.stroke_bore_ratio * bore;
        let displacement = (PI / 4.0) * bore.powi(2) * stroke;
        let brake_power = omega * reqs.torque;
        let mep = 2.0 * brake_power / (omega * displacement);
        let peak_pressure = PEAK_PRESSURE_FACTOR * mep;
        Self {
            mean_effective_pressure: mep,
            peak_pressure,
            force: peak_pressure * (PI / 4.0) * bore.powi(2),
            crank_radius: stroke / 2.0,
        }
    }
}
