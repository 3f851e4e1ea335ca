//! Beta-Bernoulli Thompson Sampling learner.
//!
//! The classic conjugate-prior bandit rule: maintain a Beta(α, β)
//! posterior per arm, draw one sample per arm, and act greedily on the
//! samples. Wide posteriors occasionally sample optimistically
//! (exploration); narrow, high-mean posteriors dominate as evidence
//! accumulates (exploitation). No tuning knob is needed — the balance
//! falls out of the posterior widths.
//!
//! ## Usage
//!
//! ```ignore
//! let mut learner = BernoulliThompson::with_seed(3, 42)?;
//!
//! let arm = learner.select();
//! // ... external environment produces a binary outcome ...
//! learner.update(arm, 1.0)?;
//!
//! let p = learner.success_probability(arm)?;
//! ```

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::debug;

use crate::errors::BanditError;
use crate::history::ObservationHistory;
use crate::posterior::{first_argmax, BetaArms};

/// Thompson Sampling learner for arms with unknown Bernoulli success
/// probability.
///
/// Single-writer, single-reader: the learner owns all of its state and no
/// concurrent calls into the same instance are safe. `select` and `update`
/// never block or spawn work.
#[derive(Debug)]
pub struct BernoulliThompson {
    arms: BetaArms,
    history: ObservationHistory,
    rng: SmallRng,
}

impl BernoulliThompson {
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

    /// Select the next arm to pull.
    ///
    /// Draws one sample from each arm's Beta posterior (in arm-index
    /// order) and returns the arm with the maximum sample; ties break to
    /// the lowest index. Belief state is untouched — only the learner's
    /// RNG advances.
    pub fn select(&mut self) -> usize {
        let samples = self.arms.sample_all(&mut self.rng);
        first_argmax(&samples)
    }

    /// Record a binary outcome for a pulled arm.
    ///
    /// `reward` must be exactly 0.0 or 1.0; anything else is rejected with
    /// [`BanditError::NonBinaryReward`] rather than silently binarized.
    /// Appends to the observation history, then conjugate-updates the
    /// arm's posterior.
    pub fn update(&mut self, arm: usize, reward: f64) -> Result<(), BanditError> {
        let success = if reward == 1.0 {
            true
        } else if reward == 0.0 {
            false
        } else {
            return Err(BanditError::NonBinaryReward(reward));
        };

        // Validate the arm before touching the history so a failed update
        // leaves no partial state behind.
        self.arms.get(arm)?;
        self.history.push(arm, reward);
        self.arms.update(arm, success)?;

        let posterior = self.arms.get(arm)?;
        debug!(
            arm,
            success,
            alpha = posterior.alpha,
            beta = posterior.beta,
            mean = posterior.mean(),
            "bernoulli posterior updated"
        );
        Ok(())
    }

    /// Current posterior mean of success for an arm: α / (α + β).
    pub fn success_probability(&self, arm: usize) -> Result<f64, BanditError> {
        Ok(self.arms.get(arm)?.mean())
    }

    /// Number of arms (fixed at construction).
    pub fn n_arms(&self) -> usize {
        self.arms.len()
    }

    /// The append-only observation log.
    pub fn history(&self) -> &ObservationHistory {
        &self.history
    }

    /// Per-arm posterior store (read-only).
    pub fn posteriors(&self) -> &BetaArms {
        &self.arms
    }

    /// Snapshot of the learner's belief state for logging.
    pub fn summary(&self) -> BernoulliSummary {
        BernoulliSummary {
            n_arms: self.arms.len(),
            n_observations: self.history.len(),
            means: self.arms.iter().map(|p| p.mean()).collect(),
            pseudo_counts: self.arms.iter().map(|p| p.pseudo_count()).collect(),
        }
    }
}

/// Serializable belief snapshot for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct BernoulliSummary {
    pub n_arms: usize,
    pub n_observations: usize,
    /// Posterior mean per arm.
    pub means: Vec<f64>,
    /// α + β per arm (prior counts included).
    pub pseudo_counts: Vec<f64>,
}
