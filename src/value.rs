//! Value-weighted Thompson Sampling learner.
//!
//! Specializes the Beta-Bernoulli rule for decisions where each arm
//! carries an external monetary value (e.g. a candidate price) and the
//! quantity to maximize is expected value = P(success) × value, not raw
//! success probability. Candidate values are supplied by the caller on
//! every query, never owned or mutated by the learner.
//!
//! Two distinct read paths coexist:
//! - `select` is stochastic (posterior draw × value, argmax) and drives
//!   exploration;
//! - `best_arm` / `best_arm_lower_bound` are deterministic posterior-mean
//!   computations intended for reporting and for a downstream pessimistic
//!   (worst-case) decision policy.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::debug;

use crate::errors::BanditError;
use crate::history::ObservationHistory;
use crate::posterior::{first_argmax, BetaArms};

/// Clamp applied to posterior means before the logarithm in the
/// lower-bound computation. Keeps p̂(1 − p̂) strictly inside (0, 1).
const PROB_EPSILON: f64 = 1e-9;

/// Thompson Sampling learner weighting each arm's success belief by an
/// external per-arm value.
///
/// Single-writer, single-reader; see [`BernoulliThompson`] for the usage
/// contract shared by all learners in this crate.
///
/// [`BernoulliThompson`]: crate::BernoulliThompson
#[derive(Debug)]
pub struct ValueWeightedThompson {
    arms: BetaArms,
    history: ObservationHistory,
    rng: SmallRng,
}

impl ValueWeightedThompson {
    /// Create a learner with `n_arms` uniform-prior arms and an
    /// entropy-seeded RNG.
    pub fn new(n_arms: usize) -> Result<Self, BanditError> {
        Ok(Self {
            arms: BetaArms::new(n_arms)?,
            history: ObservationHistory::new(),
            rng: SmallRng::from_entropy(),
        })
    }

    /// Create with a fixed seed for reproducible selection sequences.
    pub fn with_seed(n_arms: usize, seed: u64) -> Result<Self, BanditError> {
        Ok(Self {
            arms: BetaArms::new(n_arms)?,
            history: ObservationHistory::new(),
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    /// Select the arm maximizing sampled-success × candidate-value.
    ///
    /// Requires one value per arm ([`BanditError::LengthMismatch`]
    /// otherwise). Draws one Beta sample per arm in index order,
    /// multiplies elementwise by `candidate_values`, and returns the
    /// first-maximum index. An all-zero value vector therefore returns 0
    /// deterministically.
    pub fn select(&mut self, candidate_values: &[f64]) -> Result<usize, BanditError> {
        self.check_values(candidate_values)?;
        let mut samples = self.arms.sample_all(&mut self.rng);
        for (sample, &value) in samples.iter_mut().zip(candidate_values) {
            *sample *= value;
        }
        Ok(first_argmax(&samples))
    }

    /// Record a raw reward for a pulled arm.
    ///
    /// The raw reward (e.g. realized revenue, possibly 0) is appended to
    /// the history untouched; the Beta posterior sees only the binarized
    /// outcome `reward > 0`. The posterior tracks success *probability* —
    /// reward magnitude lives in the history for external reporting.
    pub fn update(&mut self, arm: usize, reward: f64) -> Result<(), BanditError> {
        self.arms.get(arm)?;
        let success = reward > 0.0;
        self.history.push(arm, reward);
        self.arms.update(arm, success)?;

        let posterior = self.arms.get(arm)?;
        debug!(
            arm,
            reward,
            success,
            mean = posterior.mean(),
            "value-weighted posterior updated"
        );
        Ok(())
    }

    /// Current posterior mean of success for an arm.
    pub fn success_probability(&self, arm: usize) -> Result<f64, BanditError> {
        Ok(self.arms.get(arm)?.mean())
    }

    /// Expected value of an arm at a given candidate value:
    /// `success_probability(arm) × candidate_value`. Pure read.
    pub fn expected_value(&self, arm: usize, candidate_value: f64) -> Result<f64, BanditError> {
        Ok(self.arms.get(arm)?.mean() * candidate_value)
    }

    /// Arm maximizing expected value over all arms. Deterministic — no
    /// sampling — and intended for reporting/evaluation, distinct from
    /// the stochastic [`select`](Self::select).
    pub fn best_arm(&self, candidate_values: &[f64]) -> Result<usize, BanditError> {
        self.check_values(candidate_values)?;
        let expected: Vec<f64> = self
            .arms
            .iter()
            .zip(candidate_values)
            .map(|(posterior, &value)| posterior.mean() * value)
            .collect();
        Ok(first_argmax(&expected))
    }

    /// Hoeffding-style lower confidence bound on the best arm's expected
    /// value:
    ///
    /// `bound = ev(best) − sqrt(−ln(p̂(1 − p̂)) / (2n))`
    ///
    /// where p̂ is the best arm's posterior success mean and n = α + β its
    /// total pseudo-count. p̂ is clamped into (ε, 1 − ε) before the
    /// logarithm and n is floored at 1 before the division, so the bound
    /// is defined even for degenerate posteriors. Since p̂(1 − p̂) ≤ ¼ the
    /// correction is always ≥ 0 and the bound never exceeds the expected
    /// value. Read-only.
    pub fn best_arm_lower_bound(&self, candidate_values: &[f64]) -> Result<f64, BanditError> {
        let best = self.best_arm(candidate_values)?;
        let posterior = self.arms.get(best)?;

        let expected = posterior.mean() * candidate_values[best];
        let p = posterior.mean().clamp(PROB_EPSILON, 1.0 - PROB_EPSILON);
        let n = posterior.pseudo_count().max(1.0);
        let correction = (-(p * (1.0 - p)).ln() / (2.0 * n)).sqrt();

        Ok(expected - correction)
    }

    /// Number of arms (fixed at construction).
    pub fn n_arms(&self) -> usize {
        self.arms.len()
    }

    /// The append-only observation log (raw, un-binarized rewards).
    pub fn history(&self) -> &ObservationHistory {
        &self.history
    }

    /// Per-arm posterior store (read-only).
    pub fn posteriors(&self) -> &BetaArms {
        &self.arms
    }

    /// Snapshot of the learner's belief state for logging.
    pub fn summary(&self) -> ValueWeightedSummary {
        ValueWeightedSummary {
            n_arms: self.arms.len(),
            n_observations: self.history.len(),
            means: self.arms.iter().map(|p| p.mean()).collect(),
            total_reward: self.history.total_reward(),
        }
    }

    fn check_values(&self, candidate_values: &[f64]) -> Result<(), BanditError> {
        if candidate_values.len() != self.arms.len() {
            return Err(BanditError::LengthMismatch {
                expected: self.arms.len(),
                actual: candidate_values.len(),
            });
        }
        Ok(())
    }
}

/// Serializable belief snapshot for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct ValueWeightedSummary {
    pub n_arms: usize,
    pub n_observations: usize,
    /// Posterior success mean per arm.
    pub means: Vec<f64>,
    /// Cumulative raw reward across all updates.
    pub total_reward: f64,
}
