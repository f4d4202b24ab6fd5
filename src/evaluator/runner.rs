//! Full-design evaluation pipeline: resolve, evaluate, aggregate.

use super::config::EvaluatorConfig;
use crate::component::{build_all, ComponentModel, EvaluationResult};
use crate::design::{DesignPoint, DesignSelection, SubsystemId};
use crate::error::{EvalError, Result};
use crate::resolve::DependencyResolver;
use crate::scenario::{Scenario, ScenarioConfig};
use crate::scoring::{AggregateResult, Aggregator};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Per-subsystem results and the aggregate verdict for one selection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluationReport {
    /// Scenario the selection was evaluated in.
    pub scenario: Scenario,
    /// Result of every subsystem.
    pub results: BTreeMap<SubsystemId, EvaluationResult>,
    /// Scored totals.
    pub aggregate: AggregateResult,
}

impl EvaluationReport {
    /// Result of one subsystem.
    pub fn result(&self, id: SubsystemId) -> Option<&EvaluationResult> {
        self.results.get(&id)
    }

    /// Subsystem with the smallest factor of safety.
    ///
    /// A NaN factor of safety makes the overall one NaN, so its subsystem
    /// is reported first.
    pub fn weakest(&self) -> Option<SubsystemId> {
        if let Some((id, _)) = self.results.iter().find(|(_, r)| r.factor_of_safety.is_nan()) {
            return Some(*id);
        }
        self.results
            .iter()
            .min_by(|a, b| a.1.factor_of_safety.total_cmp(&b.1.factor_of_safety))
            .map(|(id, _)| *id)
    }
}

/// Evaluates complete design selections for one scenario.
///
/// Holds one immutable evaluator per subsystem, so a single instance can
/// be shared across threads and reused for any number of selections.
///
/// # Examples
///
/// ```
/// use u_mechdesign::design::DesignSelection;
/// use u_mechdesign::evaluator::DesignEvaluator;
/// use u_mechdesign::scenario::Scenario;
///
/// let evaluator = DesignEvaluator::new(Scenario::Engine);
/// let report = evaluator.evaluate(&DesignSelection::baseline(Scenario::Engine)).unwrap();
/// assert_eq!(report.aggregate.payoff, 10);
/// ```
pub struct DesignEvaluator {
    config: ScenarioConfig,
    options: EvaluatorConfig,
    models: Vec<Box<dyn ComponentModel>>,
    resolver: DependencyResolver,
    aggregator: Aggregator,
}

impl DesignEvaluator {
    /// Creates an evaluator with the built-in configuration of `scenario`.
    pub fn new(scenario: Scenario) -> Self {
        let config = ScenarioConfig::for_scenario(scenario);
        let options = EvaluatorConfig::default();
        Self::build(config, options)
    }

    /// Creates an evaluator from explicit configuration.
    pub fn from_config(config: ScenarioConfig, options: EvaluatorConfig) -> Result<Self> {
        config.validate().map_err(EvalError::InvalidConfig)?;
        options.validate().map_err(EvalError::InvalidConfig)?;
        Ok(Self::build(config, options))
    }

    fn build(config: ScenarioConfig, options: EvaluatorConfig) -> Self {
        let models = build_all(&config);
        let resolver = DependencyResolver::new(config.scenario).with_strict(options.strict_validation);
        let aggregator = Aggregator::new(&config);
        Self {
            config,
            options,
            models,
            resolver,
            aggregator,
        }
    }

    /// Replaces the evaluator of one subsystem, e.g. one built with custom
    /// material parameters.
    ///
    /// Fails with [`EvalError::InvalidConfig`] if the model was built for a
    /// different scenario.
    pub fn with_model(mut self, model: Box<dyn ComponentModel>) -> Result<Self> {
        let id = model.id();
        let scenario = model.design_space().scenario;
        if scenario != self.config.scenario {
            return Err(EvalError::InvalidConfig(format!(
                "{id} model was built for {scenario}, evaluator runs {}",
                self.config.scenario
            )));
        }
        match self.models.iter_mut().find(|m| m.id() == id) {
            Some(slot) => *slot = model,
            None => self.models.push(model),
        }
        Ok(self)
    }

    /// Scenario configuration in use.
    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    /// Evaluator options in use.
    pub fn options(&self) -> &EvaluatorConfig {
        &self.options
    }

    /// The evaluator of one subsystem.
    pub fn model(&self, id: SubsystemId) -> Option<&dyn ComponentModel> {
        self.models.iter().find(|m| m.id() == id).map(|m| m.as_ref())
    }

    /// Evaluates a single subsystem, resolving only its own outside inputs.
    pub fn evaluate_subsystem(&self, id: SubsystemId, selection: &DesignSelection) -> Result<EvaluationResult> {
        let model = self
            .model(id)
            .ok_or_else(|| EvalError::UnknownSubsystem(id.name().to_string()))?;
        let outside_x = self.resolver.resolve_for(id, selection)?;
        self.run(model, selection, &outside_x)
    }

    /// Evaluates every subsystem and aggregates the results.
    pub fn evaluate(&self, selection: &DesignSelection) -> Result<EvaluationReport> {
        let resolved = self.resolver.resolve(selection)?;
        let empty = DesignPoint::new();
        let mut results = BTreeMap::new();
        for model in &self.models {
            let outside_x = resolved.get(&model.id()).unwrap_or(&empty);
            results.insert(model.id(), self.run(model.as_ref(), selection, outside_x)?);
        }
        let aggregate = self.aggregator.aggregate(results.values());
        Ok(EvaluationReport {
            scenario: self.config.scenario,
            results,
            aggregate,
        })
    }

    /// Evaluates many selections. Results keep the input order.
    pub fn evaluate_batch(&self, selections: &[DesignSelection]) -> Vec<Result<EvaluationReport>> {
        #[cfg(feature = "parallel")]
        if self.options.parallel && selections.len() >= self.options.min_parallel_batch {
            return selections.par_iter().map(|s| self.evaluate(s)).collect();
        }
        selections.iter().map(|s| self.evaluate(s)).collect()
    }

    fn run(
        &self,
        model: &dyn ComponentModel,
        selection: &DesignSelection,
        outside_x: &DesignPoint,
    ) -> Result<EvaluationResult> {
        let id = model.id();
        let empty = DesignPoint::new();
        // An absent own point surfaces as a Domain error for its first symbol.
        let x = selection.get(id).unwrap_or(&empty);
        if self.options.strict_validation {
            let space = model.design_space();
            space.check_range(x)?;
            if !space.contains(x) {
                return Err(EvalError::NotInCatalog {
                    subsystem: id,
                    scenario: space.scenario,
                });
            }
        }
        let result = model.evaluate(x, outside_x)?;
        if !result.is_finite() {
            warn!(%id, mass = result.mass, fos = result.factor_of_safety, "non-finite output, scores as Poor");
        }
        debug!(%id, mass = result.mass, fos = result.factor_of_safety, "evaluated subsystem");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Piston, PistonParams};
    use crate::scoring::QualityLabel;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn selection(
        piston: [f64; 2],
        pin: [f64; 2],
        rod: [f64; 2],
        crank: [f64; 2],
        fly: [f64; 2],
    ) -> DesignSelection {
        DesignSelection::new()
            .with(SubsystemId::Piston, DesignPoint::from([("t_H", piston[0]), ("D", piston[1])]))
            .with(SubsystemId::PistonPin, DesignPoint::from([("r2", pin[0]), ("r3", pin[1])]))
            .with(SubsystemId::ConRod, DesignPoint::from([("t_I", rod[0]), ("r1", rod[1])]))
            .with(SubsystemId::Crankshaft, DesignPoint::from([("c", crank[0]), ("dc", crank[1])]))
            .with(SubsystemId::Flywheel, DesignPoint::from([("t_f", fly[0]), ("ds", fly[1])]))
    }

    fn assert_result(report: &EvaluationReport, id: SubsystemId, mass: f64, fos: f64) {
        let r = report.result(id).unwrap();
        assert!((r.mass - mass).abs() < 1e-9, "{id} mass {} != {mass}", r.mass);
        assert!((r.factor_of_safety - fos).abs() < 1e-6, "{id} fos {} != {fos}", r.factor_of_safety);
    }

    #[test]
    fn test_engine_baseline_end_to_end() {
        let evaluator = DesignEvaluator::new(Scenario::Engine);
        let report = evaluator.evaluate(&DesignSelection::baseline(Scenario::Engine)).unwrap();
        assert_eq!(report.scenario, Scenario::Engine);
        assert_result(&report, SubsystemId::Piston, 14.95, 5.58);
        assert_result(&report, SubsystemId::PistonPin, 0.5, 0.38);
        assert_result(&report, SubsystemId::ConRod, 36.38, 22.95);
        assert_result(&report, SubsystemId::Crankshaft, 57.65, 1.98);
        assert_result(&report, SubsystemId::Flywheel, 3.21, 3852.93);

        let agg = report.aggregate;
        assert!((agg.overall_mass - 112.69).abs() < 1e-9);
        assert!((agg.overall_fos - 0.38).abs() < 1e-12);
        assert_eq!(agg.label, QualityLabel::Poor);
        assert_eq!(agg.payoff, 10);
        assert_eq!(report.weakest(), Some(SubsystemId::PistonPin));
    }

    #[test]
    fn test_engine_lower_corner() {
        let evaluator = DesignEvaluator::new(Scenario::Engine);
        let report = evaluator
            .evaluate(&DesignSelection::lower_corner(Scenario::Engine))
            .unwrap();
        assert!((report.aggregate.overall_mass - 24.43).abs() < 1e-9);
        assert!((report.aggregate.overall_fos - 0.58).abs() < 1e-12);
        assert_eq!(report.aggregate.mass_tier, 4);
        assert_eq!(report.aggregate.fos_tier, 0);
    }

    #[test]
    fn test_engine_excellent_design() {
        let evaluator = DesignEvaluator::new(Scenario::Engine);
        let s = selection([8.88, 75.0], [0.9, 0.8], [7.5, 4.0], [150.0, 45.0], [51.0, 40.0]);
        let report = evaluator.evaluate(&s).unwrap();
        assert_result(&report, SubsystemId::Piston, 6.26, 2.85);
        assert_result(&report, SubsystemId::PistonPin, 1.36, 2.85);
        assert_result(&report, SubsystemId::ConRod, 5.2, 3.91);
        assert_result(&report, SubsystemId::Crankshaft, 17.06, 2.06);
        assert_result(&report, SubsystemId::Flywheel, 2.57, 2283.22);

        let agg = report.aggregate;
        assert!((agg.overall_mass - 32.45).abs() < 1e-9);
        assert!((agg.overall_fos - 2.06).abs() < 1e-12);
        assert_eq!(agg.label, QualityLabel::Excellent);
        assert_eq!(agg.payoff, 20);
        assert!(agg.meets_targets);
    }

    #[test]
    fn test_lawn_mower_excellent_design() {
        let evaluator = DesignEvaluator::new(Scenario::LawnMower);
        let s = selection([3.25, 40.0], [0.5, 0.8], [2.0, 3.0], [60.0, 17.5], [10.0, 15.0]);
        let agg = evaluator.evaluate(&s).unwrap().aggregate;
        assert!((agg.overall_mass - 1.06).abs() < 1e-9);
        assert!((agg.overall_fos - 2.03).abs() < 1e-12);
        assert_eq!(agg.label, QualityLabel::Excellent);
        assert_eq!(agg.payoff, 20);
        assert!(agg.meets_targets);
    }

    #[test]
    fn test_lawn_mower_lower_corner_is_lighter() {
        let evaluator = DesignEvaluator::new(Scenario::LawnMower);
        let low = evaluator
            .evaluate(&DesignSelection::lower_corner(Scenario::LawnMower))
            .unwrap();
        let high = evaluator
            .evaluate(&DesignSelection::upper_corner(Scenario::LawnMower))
            .unwrap();
        assert!((low.aggregate.overall_mass - 0.91).abs() < 1e-9);
        assert!((high.aggregate.overall_mass - 4.73).abs() < 1e-9);
        assert!(low.aggregate.overall_mass < high.aggregate.overall_mass);
    }

    #[test]
    fn test_missing_flywheel_fails_crankshaft() {
        let evaluator = DesignEvaluator::new(Scenario::Engine);
        let mut s = DesignSelection::baseline(Scenario::Engine);
        s.remove(SubsystemId::Flywheel);
        let err = evaluator.evaluate_subsystem(SubsystemId::Crankshaft, &s).unwrap_err();
        assert!(matches!(
            err,
            EvalError::MissingDependency {
                consumer: SubsystemId::Crankshaft,
                producer: SubsystemId::Flywheel,
                ..
            }
        ));
        assert!(matches!(
            evaluator.evaluate(&s),
            Err(EvalError::MissingDependency { .. })
        ));
        // Subsystems that do not need the flywheel still evaluate.
        assert!(evaluator.evaluate_subsystem(SubsystemId::ConRod, &s).is_ok());
    }

    #[test]
    fn test_missing_own_point_is_domain_error() {
        let evaluator = DesignEvaluator::new(Scenario::Engine);
        let mut s = DesignSelection::baseline(Scenario::Engine);
        s.remove(SubsystemId::ConRod);
        let err = evaluator.evaluate(&s).unwrap_err();
        assert_eq!(
            err,
            EvalError::Domain {
                subsystem: SubsystemId::ConRod,
                symbol: "t_I".into()
            }
        );
    }

    #[test]
    fn test_permissive_off_catalog_design() {
        let evaluator = DesignEvaluator::new(Scenario::Engine);
        let mut s = DesignSelection::baseline(Scenario::Engine);
        s.insert(SubsystemId::ConRod, DesignPoint::from([("t_I", 0.0), ("r1", 4.5)]));
        let report = evaluator.evaluate(&s).unwrap();
        let rod = report.result(SubsystemId::ConRod).unwrap();
        assert!(rod.factor_of_safety.abs() < 1e-12);
        assert_eq!(report.aggregate.fos_tier, 0);
    }

    #[test]
    fn test_strict_validation() {
        let evaluator = DesignEvaluator::from_config(
            ScenarioConfig::for_scenario(Scenario::Engine),
            EvaluatorConfig::strict(),
        )
        .unwrap();
        assert!(evaluator.evaluate(&DesignSelection::baseline(Scenario::Engine)).is_ok());

        let mut s = DesignSelection::baseline(Scenario::Engine);
        s.insert(SubsystemId::ConRod, DesignPoint::from([("t_I", 6.0), ("r1", 4.5)]));
        assert_eq!(
            evaluator.evaluate(&s).unwrap_err(),
            EvalError::NotInCatalog {
                subsystem: SubsystemId::ConRod,
                scenario: Scenario::Engine
            }
        );

        s.insert(SubsystemId::ConRod, DesignPoint::from([("t_I", 20.0), ("r1", 4.5)]));
        assert!(matches!(
            evaluator.evaluate(&s),
            Err(EvalError::OutOfRange { subsystem: SubsystemId::ConRod, .. })
        ));
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let config = ScenarioConfig::for_scenario(Scenario::Engine);
        let bad = config
            .clone()
            .with_requirements(config.requirements.clone().with_speed_rpm(-1.0));
        assert!(matches!(
            DesignEvaluator::from_config(bad, EvaluatorConfig::default()),
            Err(EvalError::InvalidConfig(_))
        ));
        assert!(matches!(
            DesignEvaluator::from_config(config, EvaluatorConfig::default().with_min_parallel_batch(0)),
            Err(EvalError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_custom_model_override() {
        let config = ScenarioConfig::for_scenario(Scenario::Engine);
        let weak = Piston::with_params(
            &config,
            PistonParams {
                yield_strength: 137.5e6,
                ..PistonParams::default()
            },
        );
        let evaluator = DesignEvaluator::new(Scenario::Engine)
            .with_model(Box::new(weak))
            .unwrap();
        let report = evaluator.evaluate(&DesignSelection::baseline(Scenario::Engine)).unwrap();
        assert_result(&report, SubsystemId::Piston, 14.95, 2.79);
        assert_eq!(report.results.len(), 5);
    }

    #[test]
    fn test_model_from_other_scenario_rejected() {
        let mower = Piston::new(&ScenarioConfig::for_scenario(Scenario::LawnMower));
        let err = DesignEvaluator::new(Scenario::Engine)
            .with_model(Box::new(mower))
            .err()
            .unwrap();
        assert_eq!(
            err,
            EvalError::InvalidConfig("piston model was built for lawn_mower, evaluator runs engine".into())
        );
    }

    #[test]
    fn test_weakest_reports_nan_subsystem() {
        let evaluator = DesignEvaluator::new(Scenario::Engine);
        let mut report = evaluator.evaluate(&DesignSelection::baseline(Scenario::Engine)).unwrap();
        report.results.insert(
            SubsystemId::Flywheel,
            EvaluationResult {
                mass: 3.21,
                factor_of_safety: f64::NAN,
            },
        );
        assert_eq!(report.weakest(), Some(SubsystemId::Flywheel));
    }

    #[test]
    fn test_negative_mass_design_scores_poor() {
        let evaluator = DesignEvaluator::new(Scenario::Engine);
        let s = selection([-40.0, 75.0], [0.9, 0.8], [7.5, 4.0], [150.0, 45.0], [51.0, 40.0]);
        let report = evaluator.evaluate(&s).unwrap();
        let piston = report.result(SubsystemId::Piston).unwrap();
        assert!((piston.mass - -67.51).abs() < 1e-9);
        assert!((piston.factor_of_safety - 57.87).abs() < 1e-9);

        let agg = report.aggregate;
        assert!((agg.overall_mass - -41.32).abs() < 1e-9);
        assert!((agg.overall_fos - 2.06).abs() < 1e-12);
        assert_eq!(agg.mass_tier, 0);
        assert_eq!(agg.fos_tier, 4);
        assert_eq!(agg.label, QualityLabel::Poor);
        assert_eq!(agg.payoff, 10);
        assert!(!agg.meets_targets);
    }

    #[test]
    fn test_batch_matches_sequential() {
        let evaluator = DesignEvaluator::from_config(
            ScenarioConfig::for_scenario(Scenario::LawnMower),
            EvaluatorConfig::default().with_min_parallel_batch(1),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let selections: Vec<DesignSelection> = (0..32)
            .map(|_| DesignSelection::random(Scenario::LawnMower, &mut rng))
            .collect();
        let batch = evaluator.evaluate_batch(&selections);
        assert_eq!(batch.len(), selections.len());
        for (s, r) in selections.iter().zip(batch) {
            assert_eq!(r.unwrap(), evaluator.evaluate(s).unwrap());
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_report_serde_round_trip() {
        let evaluator = DesignEvaluator::new(Scenario::Engine);
        let report = evaluator.evaluate(&DesignSelection::baseline(Scenario::Engine)).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"piston\""));
        let back: EvaluationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.scenario, report.scenario);
        assert_eq!(back.aggregate.label, report.aggregate.label);
        assert_eq!(back.aggregate.payoff, report.aggregate.payoff);
        for (id, r) in &report.results {
            let b = back.result(*id).unwrap();
            assert!((b.mass - r.mass).abs() < 1e-9);
            assert!((b.factor_of_safety - r.factor_of_safety).abs() < 1e-9);
        }
    }

    proptest! {
        #[test]
        fn prop_evaluation_is_deterministic(seed in any::<u64>()) {
            let evaluator = DesignEvaluator::new(Scenario::Engine);
            let mut rng = StdRng::seed_from_u64(seed);
            let s = DesignSelection::random(Scenario::Engine, &mut rng);
            let a = evaluator.evaluate(&s).unwrap();
            let b = evaluator.evaluate(&s).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_aggregate_is_min_and_sum(seed in any::<u64>()) {
            let evaluator = DesignEvaluator::new(Scenario::LawnMower);
            let mut rng = StdRng::seed_from_u64(seed);
            let report = evaluator
                .evaluate(&DesignSelection::random(Scenario::LawnMower, &mut rng))
                .unwrap();
            let sum: f64 = report.results.values().map(|r| r.mass).sum();
            let min = report
                .results
                .values()
                .map(|r| r.factor_of_safety)
                .fold(f64::INFINITY, f64::min);
            prop_assert!((report.aggregate.overall_mass - sum).abs() < 1e-9);
            prop_assert!((report.aggregate.overall_fos - min).abs() < 1e-12);
        }
    }
}
