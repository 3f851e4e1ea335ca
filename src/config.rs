use serde::{Deserialize, Serialize};

/// Hyperparameters for the Gaussian-process Thompson Sampling learner.
///
/// The kernel is a constant-scaled squared exponential:
/// `k(x, x') = signal_std² × exp(-(x - x')² / (2 × length_scale²))`
/// with i.i.d. Gaussian observation noise of `noise_std` added on the
/// diagonal of the training covariance.
///
/// `signal_std` defaults to `prior_std` so that regions of the feature
/// space far from every observation report near-prior uncertainty.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GpConfig {
    /// Kernel length scale ℓ. Controls how far belief propagates between
    /// neighboring feature values.
    pub length_scale: f64,

    /// Kernel signal standard deviation σ_f (prior std of the latent
    /// reward function).
    pub signal_std: f64,

    /// Observation noise standard deviation σ_n. Fixed at construction;
    /// every reward observation is assumed to carry i.i.d. Gaussian noise
    /// of this magnitude.
    pub noise_std: f64,

    /// Posterior std reported for every arm before the first observation.
    /// Wide identical priors make early selections effectively uniform.
    pub prior_std: f64,

    /// Floor applied to every cached posterior std after a refit.
    /// Prevents zero-variance sampling once the model becomes very
    /// confident.
    pub std_floor: f64,
}

impl Default for GpConfig {
    fn default() -> Self {
        Self {
            length_scale: 1.0,
            signal_std: 10.0,
            noise_std: 1.0,
            prior_std: 10.0,
            std_floor: 1e-2,
        }
    }
}

impl GpConfig {
    /// Kernel variance σ_f².
    pub(crate) fn signal_variance(&self) -> f64 {
        self.signal_std * self.signal_std
    }

    /// Noise variance σ_n².
    pub(crate) fn noise_variance(&self) -> f64 {
        self.noise_std * self.noise_std
    }
}
