//! Gaussian-process Thompson Sampling learner.
//!
//! Models reward as a smooth function of a continuous per-arm feature
//! (e.g. a price point), so that a limited number of pulled arms inform
//! beliefs about *neighboring*, never-yet-pulled arms — something the
//! independent-arm Beta-Bernoulli model cannot do.
//!
//! Every `update` refits the regression on the entire observation history
//! and recomputes a cached (mean, std) pair per arm. The refit is a full
//! O(n³) recomputation done synchronously; per-call latency grows with
//! history length and that is accepted — there is no incremental or
//! windowed fitting.
//!
//! ## Usage
//!
//! ```ignore
//! // Arms are price points; rewards are revenues.
//! let mut learner = GpThompson::new(vec![1.0, 5.0, 10.0])?;
//!
//! let arm = learner.select();
//! // ... external environment produces a revenue ...
//! learner.update(arm, 4.2)?;
//! ```
//!
//! Before the first observation every arm reports mean 0 and a wide prior
//! std, so early selections are effectively uniform exploration. That is a
//! defined default state, not an error.

mod regression;

pub use regression::GpRegression;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::GpConfig;
use crate::errors::BanditError;
use crate::history::ObservationHistory;
use crate::posterior::first_argmax;

/// Thompson Sampling learner over continuous-featured arms backed by
/// Gaussian-process regression.
///
/// Single-writer, single-reader: the learner owns all state; no concurrent
/// calls into the same instance are safe and none are expected.
#[derive(Debug)]
pub struct GpThompson {
    /// Feature value per arm (fixed at construction).
    features: Vec<f64>,
    history: ObservationHistory,
    /// Cached posterior mean per arm, refreshed on every successful fit.
    means: Vec<f64>,
    /// Cached posterior std per arm, floored at `config.std_floor`.
    stds: Vec<f64>,
    config: GpConfig,
    rng: SmallRng,
}

impl GpThompson {
    /// Create a learner over the given arm features with the default
    /// configuration and an entropy-seeded RNG.
    pub fn new(features: Vec<f64>) -> Result<Self, BanditError> {
        Self::with_config(features, GpConfig::default())
    }

    /// Create with explicit hyperparameters.
    pub fn with_config(features: Vec<f64>, config: GpConfig) -> Result<Self, BanditError> {
        Self::build(features, config, SmallRng::from_entropy())
    }

    /// Create with a fixed seed for reproducible selection sequences.
    pub fn with_seed(features: Vec<f64>, config: GpConfig, seed: u64) -> Result<Self, BanditError> {
        Self::build(features, config, SmallRng::seed_from_u64(seed))
    }

    fn build(features: Vec<f64>, config: GpConfig, rng: SmallRng) -> Result<Self, BanditError> {
        if features.is_empty() {
            return Err(BanditError::NoArms);
        }
        let n = features.len();
        Ok(Self {
            features,
            history: ObservationHistory::new(),
            means: vec![0.0; n],
            stds: vec![config.prior_std; n],
            config,
            rng,
        })
    }

    /// Select the next arm to pull.
    ///
    /// Independently draws one value from `Normal(mean_i, std_i)` per arm
    /// in index order, clamps every sample at ≥ 0 (rewards are assumed
    /// non-negative, e.g. revenue), and returns the arm with the maximum
    /// clamped sample; ties break to the lowest index. Belief state is
    /// untouched — only the RNG advances.
    pub fn select(&mut self) -> usize {
        let samples: Vec<f64> = self
            .means
            .iter()
            .zip(&self.stds)
            .map(|(&mean, &std)| {
                // std is floored strictly above zero, so the constructor
                // cannot fail.
                let draw = Normal::new(mean, std)
                    .expect("posterior std is floored at a positive constant")
                    .sample(&mut self.rng);
                draw.max(0.0)
            })
            .collect();
        first_argmax(&samples)
    }

    /// Record a reward for a pulled arm and refit on the full history.
    ///
    /// Appends (feature, reward) to the history, refits the regression on
    /// every observation so far, recomputes the cached (mean, std) at each
    /// arm's feature value, and floors every std at `config.std_floor`.
    ///
    /// A fit failure is fatal for this call: it is surfaced as
    /// [`BanditError::FitFailure`] and the cached beliefs keep their
    /// previous values (the failed observation remains in the history and
    /// is retried implicitly on the next update).
    pub fn update(&mut self, arm: usize, reward: f64) -> Result<(), BanditError> {
        let n_arms = self.features.len();
        if arm >= n_arms {
            return Err(BanditError::ArmOutOfRange { arm, n_arms });
        }

        self.history.push(arm, reward);

        let xs: Vec<f64> = self.history.iter().map(|o| self.features[o.arm]).collect();
        let ys: Vec<f64> = self.history.rewards().collect();

        let model = GpRegression::fit(&xs, &ys, self.config).inspect_err(|e| {
            warn!(arm, reward, error = %e, "gp refit failed; keeping previous beliefs");
        })?;

        for (i, &x) in self.features.iter().enumerate() {
            let (mean, std) = model.predict(x);
            self.means[i] = mean;
            self.stds[i] = std.max(self.config.std_floor);
        }

        debug!(
            arm,
            reward,
            n_observations = self.history.len(),
            log_marginal_likelihood = model.log_marginal_likelihood(),
            "gp posterior refit"
        );
        Ok(())
    }

    /// Cached posterior (mean, std) at an arm's feature value. Pure read.
    pub fn posterior(&self, arm: usize) -> Result<(f64, f64), BanditError> {
        if arm >= self.features.len() {
            return Err(BanditError::ArmOutOfRange {
                arm,
                n_arms: self.features.len(),
            });
        }
        Ok((self.means[arm], self.stds[arm]))
    }

    /// Number of arms (fixed at construction).
    pub fn n_arms(&self) -> usize {
        self.features.len()
    }

    /// Feature value per arm.
    pub fn features(&self) -> &[f64] {
        &self.features
    }

    /// The append-only observation log.
    pub fn history(&self) -> &ObservationHistory {
        &self.history
    }

    /// Snapshot of the learner's belief state for logging.
    pub fn summary(&self) -> GpSummary {
        GpSummary {
            n_arms: self.features.len(),
            n_observations: self.history.len(),
            means: self.means.clone(),
            stds: self.stds.clone(),
        }
    }
}

/// Serializable belief snapshot for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct GpSummary {
    pub n_arms: usize,
    pub n_observations: usize,
    /// Cached posterior mean per arm.
    pub means: Vec<f64>,
    /// Cached posterior std per arm (floored).
    pub stds: Vec<f64>,
}
