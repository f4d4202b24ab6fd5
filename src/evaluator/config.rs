//! Evaluator configuration.

/// Options controlling how a [`DesignEvaluator`](super::DesignEvaluator)
/// checks and schedules work.
///
/// # Defaults
///
/// ```
/// use u_mechdesign::evaluator::EvaluatorConfig;
///
/// let config = EvaluatorConfig::default();
/// assert!(!config.strict_validation);
/// assert!(config.parallel);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluatorConfig {
    /// Reject own design points outside their range or catalog and outside
    /// inputs outside their range.
    ///
    /// Off by default: out-of-range designs evaluate normally and score
    /// badly.
    pub strict_validation: bool,

    /// Whether batch evaluation runs on rayon's thread pool.
    ///
    /// Has no effect unless the `parallel` feature is enabled.
    pub parallel: bool,

    /// Smallest batch that is split across threads.
    pub min_parallel_batch: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            strict_validation: false,
            parallel: true,
            min_parallel_batch: 64,
        }
    }
}

impl EvaluatorConfig {
    /// Enables or disables strict validation.
    pub fn with_strict_validation(mut self, strict: bool) -> Self {
        self.strict_validation = strict;
        self
    }

    /// Enables or disables parallel batch evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the smallest batch split across threads.
    pub fn with_min_parallel_batch(mut self, n: usize) -> Self {
        self.min_parallel_batch = n;
        self
    }

    /// Preset that refuses anything outside the catalogs.
    pub fn strict() -> Self {
        Self::default().with_strict_validation(true)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.min_parallel_batch == 0 {
            return Err("min_parallel_batch must be at least 1".into());
        }
        Ok(())
    }
}
