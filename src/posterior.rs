//! Beta conjugate posteriors for Bernoulli arms.
//!
//! This module provides the closed-form belief update shared by both
//! Bernoulli-style learners:
//! - [`BetaPosterior`] for a single arm's Beta(α, β) state
//! - [`BetaArms`] for the fixed-size, index-validated per-arm store
//!
//! # Mathematical Background
//!
//! Prior: p ~ Beta(1, 1) (uniform over [0, 1])
//!
//! Update on a Bernoulli outcome y ∈ {0, 1}:
//! - α_n = α + y
//! - β_n = β + (1 − y)
//!
//! α reads as pseudo-successes + 1, β as pseudo-failures + 1. Both stay
//! strictly positive forever, so posterior draws are always well-defined.

use rand::Rng;
use rand_distr::{Beta, Distribution};

use crate::errors::BanditError;

/// Beta(α, β) posterior over one arm's success probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BetaPosterior {
    /// Pseudo-successes + 1 (α > 0 at all times).
    pub alpha: f64,
    /// Pseudo-failures + 1 (β > 0 at all times).
    pub beta: f64,
}

impl Default for BetaPosterior {
    fn default() -> Self {
        // Uniform prior
        Self {
            alpha: 1.0,
            beta: 1.0,
        }
    }
}

impl BetaPosterior {
    /// Conjugate update with a single Bernoulli outcome.
    ///
    /// Exactly one parameter grows by 1 per call.
    pub fn update(&mut self, success: bool) {
        if success {
            self.alpha += 1.0;
        } else {
            self.beta += 1.0;
        }
    }

    /// Posterior mean of the success probability: α / (α + β).
    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    /// Posterior variance: αβ / ((α + β)² (α + β + 1)).
    pub fn variance(&self) -> f64 {
        let n = self.alpha + self.beta;
        self.alpha * self.beta / (n * n * (n + 1.0))
    }

    /// Total pseudo-count α + β (prior counts included).
    pub fn pseudo_count(&self) -> f64 {
        self.alpha + self.beta
    }

    /// Number of observed outcomes (prior counts excluded).
    pub fn observations(&self) -> u64 {
        (self.alpha + self.beta - 2.0).max(0.0).round() as u64
    }

    /// One posterior draw.
    ///
    /// α and β are strictly positive by invariant, so the distribution
    /// constructor cannot fail.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        Beta::new(self.alpha, self.beta)
            .expect("beta parameters are strictly positive by invariant")
            .sample(rng)
    }
}

/// Fixed-size collection of per-arm Beta posteriors.
///
/// The arm set never grows or shrinks after construction. All index
/// arguments are validated; out-of-range arms surface
/// [`BanditError::ArmOutOfRange`] rather than panicking.
#[derive(Debug, Clone)]
pub struct BetaArms {
    arms: Vec<BetaPosterior>,
}

impl BetaArms {
    /// Create `n_arms` posteriors, all at the uniform prior.
    pub fn new(n_arms: usize) -> Result<Self, BanditError> {
        if n_arms == 0 {
            return Err(BanditError::NoArms);
        }
        Ok(Self {
            arms: vec![BetaPosterior::default(); n_arms],
        })
    }

    /// Number of arms.
    pub fn len(&self) -> usize {
        self.arms.len()
    }

    /// Always false: construction rejects zero arms.
    pub fn is_empty(&self) -> bool {
        self.arms.is_empty()
    }

    /// Posterior state of one arm.
    pub fn get(&self, arm: usize) -> Result<&BetaPosterior, BanditError> {
        self.arms.get(arm).ok_or(BanditError::ArmOutOfRange {
            arm,
            n_arms: self.arms.len(),
        })
    }

    /// Conjugate-update one arm with a Bernoulli outcome.
    pub fn update(&mut self, arm: usize, success: bool) -> Result<(), BanditError> {
        let n_arms = self.arms.len();
        let posterior = self
            .arms
            .get_mut(arm)
            .ok_or(BanditError::ArmOutOfRange { arm, n_arms })?;
        posterior.update(success);
        Ok(())
    }

    /// One posterior draw per arm, in arm-index order.
    ///
    /// This is the crate's random-sampling contract: every `select` on a
    /// Bernoulli-style learner consumes exactly one Beta draw per arm in
    /// index order, so a fixed seed reproduces the selection sequence
    /// exactly.
    pub fn sample_all<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        self.arms.iter().map(|arm| arm.sample(rng)).collect()
    }

    /// Iterate over the per-arm posteriors in index order.
    pub fn iter(&self) -> impl Iterator<Item = &BetaPosterior> {
        self.arms.iter()
    }
}

/// Index of the first maximum in a non-empty slice.
///
/// Ties break to the lowest index (strict `>` scan), which is what makes
/// degenerate selections — e.g. an all-zero candidate-value vector —
/// deterministic.
pub(crate) fn first_argmax(values: &[f64]) -> usize {
    let mut best = 0;
    let mut best_value = f64::NEG_INFINITY;
    for (i, &v) in values.iter().enumerate() {
        if v > best_value {
            best = i;
            best_value = v;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_first_argmax_tie_breaks_low() {
        assert_eq!(first_argmax(&[0.0, 0.0, 0.0]), 0);
        assert_eq!(first_argmax(&[1.0, 2.0, 2.0]), 1);
        assert_eq!(first_argmax(&[3.0]), 0);
    }

    #[test]
    fn test_prior_is_uniform() {
        let p = BetaPosterior::default();
        assert!((p.mean() - 0.5).abs() < 1e-12);
        assert!((p.pseudo_count() - 2.0).abs() < 1e-12);
        assert_eq!(p.observations(), 0);
    }

    #[test]
    fn test_update_moves_exactly_one_parameter() {
        let mut p = BetaPosterior::default();
        p.update(true);
        assert!((p.alpha - 2.0).abs() < 1e-12);
        assert!((p.beta - 1.0).abs() < 1e-12);
        p.update(false);
        assert!((p.alpha - 2.0).abs() < 1e-12);
        assert!((p.beta - 2.0).abs() < 1e-12);
        assert_eq!(p.observations(), 2);
    }

    #[test]
    fn test_mean_matches_closed_form() {
        // k successes + j failures ⇒ mean (1+k)/(2+k+j)
        let mut p = BetaPosterior::default();
        for _ in 0..7 {
            p.update(true);
        }
        for _ in 0..3 {
            p.update(false);
        }
        assert!(
            (p.mean() - 8.0 / 12.0).abs() < 1e-12,
            "mean should be exactly (1+7)/(2+7+3): {}",
            p.mean()
        );
    }

    #[test]
    fn test_variance_shrinks_with_evidence() {
        let mut p = BetaPosterior::default();
        let prior_var = p.variance();
        for _ in 0..100 {
            p.update(true);
        }
        assert!(
            p.variance() < prior_var,
            "variance should shrink as evidence accumulates"
        );
    }

    #[test]
    fn test_samples_stay_in_unit_interval() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut p = BetaPosterior::default();
        for _ in 0..20 {
            p.update(true);
        }
        for _ in 0..1000 {
            let s = p.sample(&mut rng);
            assert!((0.0..=1.0).contains(&s), "beta sample out of range: {s}");
        }
    }

    #[test]
    fn test_concentrated_posterior_samples_high() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut p = BetaPosterior::default();
        for _ in 0..500 {
            p.update(true);
        }
        // Posterior mass is near 1; draws should rarely dip below 0.9
        let low = (0..1000).filter(|_| p.sample(&mut rng) < 0.9).count();
        assert!(low < 50, "too many low draws from a concentrated posterior: {low}");
    }

    #[test]
    fn test_zero_arms_rejected() {
        assert_eq!(BetaArms::new(0).unwrap_err(), BanditError::NoArms);
    }

    #[test]
    fn test_out_of_range_arm_rejected() {
        let mut arms = BetaArms::new(3).unwrap();
        let err = arms.update(3, true).unwrap_err();
        assert_eq!(err, BanditError::ArmOutOfRange { arm: 3, n_arms: 3 });
        assert!(arms.get(7).is_err());
    }

    #[test]
    fn test_sample_all_is_seed_reproducible() {
        let arms = BetaArms::new(4).unwrap();
        let a = arms.sample_all(&mut SmallRng::seed_from_u64(99));
        let b = arms.sample_all(&mut SmallRng::seed_from_u64(99));
        assert_eq!(a, b, "same seed must reproduce the draw sequence");
        assert_eq!(a.len(), 4);
    }
}
