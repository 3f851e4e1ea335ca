//! One-dimensional Gaussian-process regression.
//!
//! Native implementation using nalgebra for the GP learner's posterior
//! over reward as a function of the arm feature (e.g. a price point).
//!
//! # Mathematical Background
//!
//! Kernel: constant-scaled squared exponential
//!
//! `k(x, x') = σ_f² × exp(-(x - x')² / (2ℓ²))`
//!
//! Training covariance: `K + σ_n² I` with fixed observation noise σ_n.
//! Targets are centered on their sample mean before the solve, so a single
//! clean observation predicts itself exactly and predictions revert to the
//! sample mean far from the data.
//!
//! Posterior at a test point x*:
//! - mean: `ȳ + k*ᵀ (K + σ_n² I)⁻¹ (y − ȳ)`
//! - var:  `k(x*, x*) − k*ᵀ (K + σ_n² I)⁻¹ k*`
//!
//! The inverse is never formed; both use the Cholesky factor of the
//! training covariance. A failed factorization (non-positive-definite
//! system, e.g. duplicated inputs with zero noise) is surfaced as
//! [`BanditError::FitFailure`] — never recovered silently, since serving
//! stale beliefs could select a no-longer-justified arm.

use nalgebra::{Cholesky, DMatrix, DVector, Dyn};

use crate::config::GpConfig;
use crate::errors::BanditError;

/// A fitted Gaussian-process regression model.
///
/// Holds the training inputs, the Cholesky factor of the training
/// covariance, and the precomputed weight vector `(K + σ_n² I)⁻¹ (y − ȳ)`.
/// Refit from scratch on every new observation; there is no incremental
/// update path.
#[derive(Debug, Clone)]
pub struct GpRegression {
    xs: Vec<f64>,
    y_mean: f64,
    targets_centered: DVector<f64>,
    weights: DVector<f64>,
    chol: Cholesky<f64, Dyn>,
    config: GpConfig,
}

impl GpRegression {
    /// Fit the model on the full observation set.
    ///
    /// Fitting on zero observations is undefined and rejected; callers
    /// hold their prior instead.
    pub fn fit(xs: &[f64], ys: &[f64], config: GpConfig) -> Result<Self, BanditError> {
        if xs.is_empty() {
            return Err(BanditError::FitFailure(
                "cannot fit on zero observations".to_string(),
            ));
        }
        if xs.len() != ys.len() {
            return Err(BanditError::FitFailure(format!(
                "input/target length mismatch: {} vs {}",
                xs.len(),
                ys.len()
            )));
        }

        let n = xs.len();
        let y_mean = ys.iter().sum::<f64>() / n as f64;
        let targets_centered = DVector::from_iterator(n, ys.iter().map(|y| y - y_mean));

        let covariance = DMatrix::from_fn(n, n, |i, j| {
            let k = kernel(&config, xs[i], xs[j]);
            if i == j {
                k + config.noise_variance()
            } else {
                k
            }
        });

        let chol = Cholesky::new(covariance).ok_or_else(|| {
            BanditError::FitFailure(
                "kernel matrix is not positive definite (try a larger noise level)".to_string(),
            )
        })?;
        let weights = chol.solve(&targets_centered);

        Ok(Self {
            xs: xs.to_vec(),
            y_mean,
            targets_centered,
            weights,
            chol,
            config,
        })
    }

    /// Posterior (mean, std) of the latent reward function at `x`.
    ///
    /// Round-off can push the variance a hair negative once the model is
    /// very confident; it is clamped at zero before the square root.
    pub fn predict(&self, x: f64) -> (f64, f64) {
        let k_star =
            DVector::from_iterator(self.xs.len(), self.xs.iter().map(|&xi| kernel(&self.config, x, xi)));

        let mean = self.y_mean + k_star.dot(&self.weights);

        let v = self.chol.solve(&k_star);
        let variance = (self.config.signal_variance() - k_star.dot(&v)).max(0.0);

        (mean, variance.sqrt())
    }

    /// Number of training observations.
    pub fn n_observations(&self) -> usize {
        self.xs.len()
    }

    /// Log marginal likelihood of the training data under the model.
    ///
    /// `-½ (y − ȳ)ᵀ α − Σᵢ ln Lᵢᵢ − (n/2) ln 2π` with α the weight vector
    /// and L the Cholesky factor. Diagnostic only.
    pub fn log_marginal_likelihood(&self) -> f64 {
        let n = self.xs.len() as f64;
        let data_fit = -0.5 * self.targets_centered.dot(&self.weights);
        let l = self.chol.l_dirty();
        let log_det: f64 = (0..self.xs.len()).map(|i| l[(i, i)].ln()).sum();
        data_fit - log_det - 0.5 * n * (2.0 * std::f64::consts::PI).ln()
    }
}

/// Constant-scaled squared-exponential kernel.
fn kernel(config: &GpConfig, a: f64, b: f64) -> f64 {
    let d = a - b;
    config.signal_variance() * (-d * d / (2.0 * config.length_scale * config.length_scale)).exp()
}
