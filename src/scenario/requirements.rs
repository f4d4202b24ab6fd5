//! Scenario-level global requirements.
//!
//! [`GlobalRequirements`] holds the operating point every subsystem
//! evaluator reads: speed, torque, power, geometry ratio, cylinder count,
//! and the system-level targets used when judging a verdict.

use super::types::Scenario;

/// Global requirement values for one scenario.
///
/// Field names are descriptive; [`value`](Self::value) gives the
/// symbol-keyed view (`N`, `T`, `P`, `LDr`, `NC`, `n_m`, `f_p`, `m`, `fos`).
///
/// # Presets
///
/// ```
/// use u_mechdesign::scenario::{GlobalRequirements, Scenario};
///
/// let reqs = GlobalRequirements::for_scenario(Scenario::Engine);
/// assert_eq!(reqs.cylinders, 4);
/// assert_eq!(reqs.value("N"), Some(6500.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlobalRequirements {
    /// Rotational speed in rpm (`N`).
    pub speed_rpm: f64,

    /// Torque in N·m (`T`).
    pub torque: f64,

    /// Power output in W (`P`).
    pub power: f64,

    /// Stroke length to bore diameter ratio (`LDr`).
    pub stroke_bore_ratio: f64,

    /// Number of cylinders (`NC`).
    ///
    /// Multiplies every per-cylinder subsystem mass. The flywheel is shared
    /// and is never scaled by it.
    pub cylinders: u32,

    /// Mechanical efficiency as a ratio (`n_m`).
    pub mechanical_efficiency: f64,

    /// Coefficient of fluctuation of speed as a ratio (`f_p`).
    pub speed_fluctuation: f64,

    /// Target total mass of engine components in kg (`m`).
    pub target_mass: f64,

    /// Target system-level factor of safety (`fos`).
    pub target_fos: f64,
}

/// Symbols accepted by [`GlobalRequirements::value`], in display order.
pub const REQUIREMENT_SYMBOLS: [&str; 9] = ["N", "T", "NC", "P", "LDr", "n_m", "f_p", "m", "fos"];

impl GlobalRequirements {
    /// Four-cylinder automotive engine.
    pub fn engine() -> Self {
        Self {
            speed_rpm: 6500.0,
            torque: 220.0,
            power: 130e3,
            stroke_bore_ratio: 1.75,
            cylinders: 4,
            mechanical_efficiency: 0.70,
            speed_fluctuation: 0.08,
            target_mass: 35.0,
            target_fos: 2.0,
        }
    }

    /// Single-cylinder lawn mower engine.
    ///
    /// Per-cylinder masses are counted once. Tooling that fixed `NC` at 4
    /// for every scenario reported lawn mower piston, pin, connecting-rod
    /// and crankshaft masses four times larger; use
    /// `with_cylinders(4)` to reproduce those figures.
    pub fn lawn_mower() -> Self {
        Self {
            speed_rpm: 3000.0,
            torque: 8.0,
            power: 4e3,
            stroke_bore_ratio: 1.2,
            cylinders: 1,
            mechanical_efficiency: 0.70,
            speed_fluctuation: 0.08,
            target_mass: 3.0,
            target_fos: 2.0,
        }
    }

    /// Built-in requirements for a scenario.
    pub fn for_scenario(scenario: Scenario) -> Self {
        match scenario {
            Scenario::Engine => Self::engine(),
            Scenario::LawnMower => Self::lawn_mower(),
        }
    }

    /// Sets the rotational speed in rpm.
    pub fn with_speed_rpm(mut self, rpm: f64) -> Self {
        self.speed_rpm = rpm;
        self
    }

    /// Sets the torque in N·m.
    pub fn with_torque(mut self, torque: f64) -> Self {
        self.torque = torque;
        self
    }

    /// Sets the power output in W.
    pub fn with_power(mut self, power: f64) -> Self {
        self.power = power;
        self
    }

    /// Sets the stroke-to-bore ratio.
    pub fn with_stroke_bore_ratio(mut self, ratio: f64) -> Self {
        self.stroke_bore_ratio = ratio;
        self
    }

    /// Sets the cylinder count.
    pub fn with_cylinders(mut self, n: u32) -> Self {
        self.cylinders = n;
        self
    }

    /// Sets the mechanical efficiency.
    pub fn with_mechanical_efficiency(mut self, eta: f64) -> Self {
        self.mechanical_efficiency = eta;
        self
    }

    /// Sets the coefficient of fluctuation of speed.
    pub fn with_speed_fluctuation(mut self, cs: f64) -> Self {
        self.speed_fluctuation = cs;
        self
    }

    /// Sets the system-level targets (mass in kg, factor of safety).
    pub fn with_targets(mut self, mass: f64, fos: f64) -> Self {
        self.target_mass = mass;
        self.target_fos = fos;
        self
    }

    /// Rotational speed in rad/s.
    pub fn angular_speed(&self) -> f64 {
        self.speed_rpm * std::f64::consts::PI / 30.0
    }

    /// Looks up a requirement by symbol.
    pub fn value(&self, symbol: &str) -> Option<f64> {
        let v = match symbol {
            "N" => self.speed_rpm,
            "T" => self.torque,
            "P" => self.power,
            "LDr" => self.stroke_bore_ratio,
            "NC" => self.cylinders as f64,
            "n_m" => self.mechanical_efficiency,
            "f_p" => self.speed_fluctuation,
            "m" => self.target_mass,
            "fos" => self.target_fos,
            _ => return None,
        };
        Some(v)
    }

    /// Human-readable label for a requirement symbol.
    pub fn label(symbol: &str) -> Option<&'static str> {
        let label = match symbol {
            "N" => "Min. rotational speed in rpm",
            "T" => "Min. torque in N-m",
            "NC" => "Number of cylinders",
            "P" => "Min. power output in watts",
            "LDr" => "Stroke length to bore diameter ratio",
            "n_m" => "Min. mechanical efficiency as ratio",
            "f_p" => "Fluctuation percentage as ratio",
            "m" => "Total mass of engine components in kg",
            "fos" => "System-level factor of safety",
            _ => return None,
        };
        Some(label)
    }

    /// Validates the requirements.
    ///
    /// Returns `Err` with a description if any value is invalid.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("speed_rpm", self.speed_rpm),
            ("torque", self.torque),
            ("power", self.power),
            ("stroke_bore_ratio", self.stroke_bore_ratio),
            ("target_mass", self.target_mass),
            ("target_fos", self.target_fos),
        ];
        for (name, v) in positive {
            if !(v.is_finite() && v > 0.0) {
                return Err(format!("{name} must be positive and finite, got {v}"));
            }
        }
        if self.cylinders == 0 {
            return Err("cylinders must be at least 1".into());
        }
        if !(self.mechanical_efficiency > 0.0 && self.mechanical_efficiency <= 1.0) {
            return Err("mechanical_efficiency must be in (0, 1]".into());
        }
        if !(self.speed_fluctuation > 0.0 && self.speed_fluctuation <= 1.0) {
            return Err("speed_fluctuation must be in (0, 1]".into());
        }
        Ok(())
    }
}
