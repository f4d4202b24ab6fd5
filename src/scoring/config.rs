//! Quality scales and the payoff table.

use crate::scenario::Scenario;
use std::fmt;

/// Highest quality tier.
pub const MAX_TIER: u8 = 4;

/// Quality label for a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QualityLabel {
    Poor,
    Fair,
    Good,
    VeryGood,
    Excellent,
}

impl QualityLabel {
    /// Labels ordered by tier.
    pub const ALL: [QualityLabel; 5] = [
        QualityLabel::Poor,
        QualityLabel::Fair,
        QualityLabel::Good,
        QualityLabel::VeryGood,
        QualityLabel::Excellent,
    ];

    /// Label for tier `0..=4`.
    pub fn from_tier(tier: u8) -> Option<Self> {
        Self::ALL.get(tier as usize).copied()
    }

    /// Tier `0..=4` of the label.
    pub fn tier(self) -> u8 {
        self as u8
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            QualityLabel::Poor => "Poor",
            QualityLabel::Fair => "Fair",
            QualityLabel::Good => "Good",
            QualityLabel::VeryGood => "Very Good",
            QualityLabel::Excellent => "Excellent",
        }
    }
}

impl fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One half-open band `[lower, upper)` of a quality scale.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QualityBand {
    /// Tier assigned to values in the band.
    pub tier: u8,
    /// Inclusive lower bound.
    pub lower: f64,
    /// Exclusive upper bound.
    pub upper: f64,
}

impl QualityBand {
    /// Creates a band.
    pub const fn new(tier: u8, lower: f64, upper: f64) -> Self {
        Self { tier, lower, upper }
    }

    /// Whether `value` falls in `[lower, upper)`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value < self.upper
    }
}

/// An ordered, contiguous table of quality bands.
///
/// A value below the first band is tier 0, a value at or above the last
/// band's upper bound takes the last band's tier. NaN and infinities are
/// tier 0. Lookup is monotonic from the first band's lower bound upwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QualityScale {
    /// Bands in ascending order of `lower`.
    pub bands: Vec<QualityBand>,
}

impl QualityScale {
    /// Creates a scale from bands in ascending order.
    pub fn new(bands: Vec<QualityBand>) -> Self {
        Self { bands }
    }

    /// Mass scale of a scenario; lighter is better.
    pub fn mass(scenario: Scenario) -> Self {
        let bounds: [f64; 6] = match scenario {
            Scenario::Engine => [0.001, 35.001, 40.001, 45.001, 50.001, 200.0],
            Scenario::LawnMower => [0.001, 2.001, 2.501, 3.001, 3.501, 200.0],
        };
        let bands = bounds
            .windows(2)
            .zip((0..=MAX_TIER).rev())
            .map(|(w, tier)| QualityBand::new(tier, w[0], w[1]))
            .collect();
        Self::new(bands)
    }

    /// Factor-of-safety scale; stronger is better. No band yields tier 3.
    pub fn fos(_scenario: Scenario) -> Self {
        Self::new(vec![
            QualityBand::new(0, 0.0, 1.5),
            QualityBand::new(1, 1.5, 1.75),
            QualityBand::new(2, 1.75, 2.0),
            QualityBand::new(4, 2.0, 200.0),
        ])
    }

    /// Tier of `value`.
    pub fn tier(&self, value: f64) -> u8 {
        if !value.is_finite() {
            return 0;
        }
        let (Some(first), Some(last)) = (self.bands.first(), self.bands.last()) else {
            return 0;
        };
        if value < first.lower {
            return 0;
        }
        self.bands
            .iter()
            .find(|b| b.contains(value))
            .map_or(last.tier, |b| b.tier)
    }

    /// Checks the scale is non-empty, contiguous, and uses tiers `0..=4`.
    pub fn validate(&self) -> Result<(), String> {
        if self.bands.is_empty() {
            return Err("quality scale has no bands".into());
        }
        for band in &self.bands {
            if band.tier > MAX_TIER {
                return Err(format!("tier {} exceeds {MAX_TIER}", band.tier));
            }
            if !(band.lower < band.upper) {
                return Err(format!(
                    "band for tier {} is empty: [{}, {})",
                    band.tier, band.lower, band.upper
                ));
            }
        }
        for pair in self.bands.windows(2) {
            if pair[0].upper != pair[1].lower {
                return Err(format!(
                    "bands are not contiguous at {} / {}",
                    pair[0].upper, pair[1].lower
                ));
            }
        }
        Ok(())
    }
}

/// Payoff per quality label.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PayoffTable {
    /// Payoffs indexed by tier.
    pub values: [u32; 5],
}

impl Default for PayoffTable {
    fn default() -> Self {
        Self {
            values: [10, 12, 15, 17, 20],
        }
    }
}

impl PayoffTable {
    /// Payoff for a label.
    pub fn payoff(&self, label: QualityLabel) -> u32 {
        self.values[label.tier() as usize]
    }

    /// Checks that a better label never pays less.
    pub fn validate(&self) -> Result<(), String> {
        if self.values.windows(2).any(|w| w[0] > w[1]) {
            return Err(format!("payoffs must be non-decreasing, got {:?}", self.values));
        }
        Ok(())
    }
}

/// Scoring tables for one scenario.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoringConfig {
    /// Scale applied to the overall mass.
    pub mass_scale: QualityScale,
    /// Scale applied to the overall factor of safety.
    pub fos_scale: QualityScale,
    /// Label to payoff mapping.
    pub payoff: PayoffTable,
}

impl ScoringConfig {
    /// Built-in tables for a scenario.
    pub fn for_scenario(scenario: Scenario) -> Self {
        Self {
            mass_scale: QualityScale::mass(scenario),
            fos_scale: QualityScale::fos(scenario),
            payoff: PayoffTable::default(),
        }
    }

    /// Replaces the payoff table.
    pub fn with_payoff(mut self, payoff: PayoffTable) -> Self {
        self.payoff = payoff;
        self
    }

    /// Validates every table.
    pub fn validate(&self) -> Result<(), String> {
        self.mass_scale
            .validate()
            .map_err(|e| format!("mass scale: {e}"))?;
        self.fos_scale
            .validate()
            .map_err(|e| format!("fos scale: {e}"))?;
        self.payoff.validate()
    }
}
