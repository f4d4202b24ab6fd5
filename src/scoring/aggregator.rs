//! Reduces per-subsystem results to one scored verdict.

use super::config::{QualityLabel, ScoringConfig};
use crate::component::{nan_min, EvaluationResult};
use crate::scenario::{GlobalRequirements, ScenarioConfig};
use tracing::debug;

/// Overall verdict for one full design.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AggregateResult {
    /// Sum of subsystem masses in kg.
    pub overall_mass: f64,
    /// Minimum subsystem factor of safety; NaN if any input is NaN.
    pub overall_fos: f64,
    /// Tier of `overall_mass` on the mass scale.
    pub mass_tier: u8,
    /// Tier of `overall_fos` on the fos scale.
    pub fos_tier: u8,
    /// Label of the lower of the two tiers.
    pub label: QualityLabel,
    /// Payoff for `label`.
    pub payoff: u32,
    /// Whether the design reaches both system-level targets with a positive
    /// total mass.
    pub meets_targets: bool,
}

/// Scores a set of subsystem results against a scenario's tables.
#[derive(Debug, Clone)]
pub struct Aggregator {
    scoring: ScoringConfig,
    target_mass: f64,
    target_fos: f64,
}

impl Aggregator {
    /// Creates an aggregator from a scenario's scoring tables and targets.
    pub fn new(config: &ScenarioConfig) -> Self {
        Self::with_targets(config.scoring.clone(), &config.requirements)
    }

    /// Creates an aggregator with explicit tables.
    pub fn with_targets(scoring: ScoringConfig, requirements: &GlobalRequirements) -> Self {
        Self {
            scoring,
            target_mass: requirements.target_mass,
            target_fos: requirements.target_fos,
        }
    }

    /// Scoring tables in use.
    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    /// Aggregates subsystem results.
    ///
    /// An empty input has zero mass and infinite fos, which scores Poor.
    pub fn aggregate<'a, I>(&self, results: I) -> AggregateResult
    where
        I: IntoIterator<Item = &'a EvaluationResult>,
    {
        let (overall_mass, overall_fos) = results
            .into_iter()
            .fold((0.0, f64::INFINITY), |(mass, fos), r| {
                (mass + r.mass, nan_min(fos, r.factor_of_safety))
            });
        self.score(overall_mass, overall_fos)
    }

    /// Scores already-reduced totals.
    pub fn score(&self, overall_mass: f64, overall_fos: f64) -> AggregateResult {
        let mass_tier = self.scoring.mass_scale.tier(overall_mass);
        let fos_tier = self.scoring.fos_scale.tier(overall_fos);
        let label = QualityLabel::from_tier(mass_tier.min(fos_tier)).unwrap_or(QualityLabel::Poor);
        let payoff = self.scoring.payoff.payoff(label);
        let meets_targets = overall_fos >= self.target_fos
            && overall_mass > 0.0
            && overall_mass <= self.target_mass;
        debug!(overall_mass, overall_fos, mass_tier, fos_tier, %label, payoff, "aggregated design");
        AggregateResult {
            overall_mass,
            overall_fos,
            mass_tier,
            fos_tier,
            label,
            payoff,
            meets_targets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::Scenario;
    use crate::scoring::PayoffTable;
    use proptest::prelude::*;

    fn result(mass: f64, fos: f64) -> EvaluationResult {
        EvaluationResult {
            mass,
            factor_of_safety: fos,
        }
    }

    fn engine() -> Aggregator {
        Aggregator::new(&ScenarioConfig::for_scenario(Scenario::Engine))
    }

    #[test]
    fn test_engine_baseline_is_poor() {
        let results = [
            result(14.95, 5.58),
            result(0.5, 0.38),
            result(36.38, 22.95),
            result(57.65, 1.98),
            result(3.21, 3852.93),
        ];
        let agg = engine().aggregate(&results);
        assert!((agg.overall_mass - 112.69).abs() < 1e-9);
        assert!((agg.overall_fos - 0.38).abs() < 1e-12);
        assert_eq!(agg.mass_tier, 0);
        assert_eq!(agg.fos_tier, 0);
        assert_eq!(agg.label, QualityLabel::Poor);
        assert_eq!(agg.payoff, 10);
        assert!(!agg.meets_targets);
    }

    #[test]
    fn test_lower_tier_decides_label() {
        let agg = engine().score(32.45, 1.8);
        assert_eq!(agg.mass_tier, 4);
        assert_eq!(agg.fos_tier, 2);
        assert_eq!(agg.label, QualityLabel::Good);
        assert_eq!(agg.payoff, 15);
        assert!(!agg.meets_targets);

        let agg = engine().score(42.0, 5.0);
        assert_eq!(agg.label, QualityLabel::Good);

        let agg = engine().score(37.0, 5.0);
        assert_eq!(agg.label, QualityLabel::VeryGood);
        assert_eq!(agg.payoff, 17);

        let agg = engine().score(32.45, 2.06);
        assert_eq!(agg.label, QualityLabel::Excellent);
        assert_eq!(agg.payoff, 20);
        assert!(agg.meets_targets);
    }

    #[test]
    fn test_nan_fos_scores_poor() {
        let agg = engine().aggregate(&[result(10.0, 3.0), result(1.0, f64::NAN)]);
        assert!(agg.overall_fos.is_nan());
        assert_eq!(agg.fos_tier, 0);
        assert_eq!(agg.label, QualityLabel::Poor);
        assert!(!agg.meets_targets);
    }

    #[test]
    fn test_degenerate_mass_scores_poor() {
        for mass in [-12.0, 0.0] {
            let agg = engine().score(mass, 3.0);
            assert_eq!(agg.mass_tier, 0);
            assert_eq!(agg.label, QualityLabel::Poor);
            assert_eq!(agg.payoff, 10);
            assert!(!agg.meets_targets);
        }
    }

    #[test]
    fn test_empty_input() {
        let agg = engine().aggregate(std::iter::empty());
        assert!(agg.overall_mass.abs() < 1e-15);
        assert!(agg.overall_fos.is_infinite());
        assert_eq!(agg.label, QualityLabel::Poor);
    }

    #[test]
    fn test_custom_targets() {
        let config = ScenarioConfig::for_scenario(Scenario::LawnMower);
        let reqs = config.requirements.clone().with_targets(1.0, 3.0);
        let agg = Aggregator::with_targets(config.scoring.clone(), &reqs).score(1.06, 2.03);
        assert_eq!(agg.label, QualityLabel::Excellent);
        assert!(!agg.meets_targets);
    }

    proptest! {
        #[test]
        fn prop_sum_and_min(
            parts in proptest::collection::vec((0.0f64..100.0, 0.0f64..50.0), 5)
        ) {
            let results: Vec<EvaluationResult> =
                parts.iter().map(|&(m, f)| result(m, f)).collect();
            let agg = engine().aggregate(&results);
            let sum: f64 = parts.iter().map(|p| p.0).sum();
            let min = parts.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
            prop_assert!((agg.overall_mass - sum).abs() < 1e-9);
            prop_assert!((agg.overall_fos - min).abs() < 1e-12);
        }

        #[test]
        fn prop_payoff_depends_only_on_lower_tier(
            mass in 0.0f64..120.0,
            fos in 0.0f64..10.0,
        ) {
            let agg = engine().score(mass, fos);
            let label = QualityLabel::from_tier(agg.mass_tier.min(agg.fos_tier)).unwrap();
            prop_assert_eq!(agg.label, label);
            prop_assert_eq!(agg.payoff, PayoffTable::default().payoff(label));
        }
    }
}
