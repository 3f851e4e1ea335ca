use thiserror::Error;

/// Errors surfaced by the bandit learners.
///
/// Invalid arguments are always surfaced synchronously and never silently
/// clamped. Numerical degeneracies (posteriors concentrating at a boundary,
/// collapsing GP variance) are *not* errors: they are expected steady-state
/// outcomes of a converging learner and are recovered locally by documented
/// floors and clamps.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BanditError {
    /// A learner was constructed with zero arms.
    #[error("learner requires at least one arm")]
    NoArms,

    /// An arm index was outside `0..n_arms`.
    #[error("arm index {arm} out of range (learner has {n_arms} arms)")]
    ArmOutOfRange { arm: usize, n_arms: usize },

    /// A per-arm input vector did not match the arm count.
    #[error("expected {expected} per-arm values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// The plain Bernoulli learner only accepts rewards in {0, 1}.
    #[error("reward {0} is not a binary outcome (expected 0.0 or 1.0)")]
    NonBinaryReward(f64),

    /// The Gaussian-process fit failed (ill-conditioned kernel matrix or
    /// empty history). The learner's cached beliefs are left untouched.
    #[error("gaussian process fit failed: {0}")]
    FitFailure(String),
}
