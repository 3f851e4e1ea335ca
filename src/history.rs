//! Append-only observation log shared by all learners.

use serde::{Deserialize, Serialize};

/// One pulled-arm / observed-reward event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Arm that was pulled.
    pub arm: usize,
    /// Raw reward observed for the pull. For the value-weighted learner
    /// this is the un-binarized reward (e.g. realized revenue).
    pub reward: f64,
}

/// Ordered, append-only record of every `update` call.
///
/// Grows by exactly one entry per update and is never mutated or pruned.
/// The Bernoulli learners summarize it into their Beta parameters; the
/// Gaussian-process learner refits from it in full. External reporting
/// (cumulative reward, regret) reads it through the accessors below.
#[derive(Debug, Clone, Default)]
pub struct ObservationHistory {
    observations: Vec<Observation>,
}

impl ObservationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one observation. Called exactly once per learner update.
    pub fn push(&mut self, arm: usize, reward: f64) {
        self.observations.push(Observation { arm, reward });
    }

    /// Number of observations recorded so far.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// All observations in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observations.iter()
    }

    /// All raw rewards in arrival order.
    pub fn rewards(&self) -> impl Iterator<Item = f64> + '_ {
        self.observations.iter().map(|o| o.reward)
    }

    /// Raw rewards observed for a single arm, in arrival order.
    pub fn rewards_for(&self, arm: usize) -> impl Iterator<Item = f64> + '_ {
        self.observations
            .iter()
            .filter(move |o| o.arm == arm)
            .map(|o| o.reward)
    }

    /// Number of times an arm has been pulled.
    pub fn pulls(&self, arm: usize) -> usize {
        self.observations.iter().filter(|o| o.arm == arm).count()
    }

    /// Sum of all raw rewards (for external cumulative-reward reporting).
    pub fn total_reward(&self) -> f64 {
        self.observations.iter().map(|o| o.reward).sum()
    }
}
