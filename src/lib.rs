//! Thompson-sampling multi-armed bandit learners.
//!
//! An online decision-making engine that repeatedly chooses one of several
//! discrete options ("arms"), observes a stochastic reward, and updates its
//! belief about each arm's reward distribution. Three learners share one
//! two-phase protocol driven by the caller's loop:
//!
//! ```text
//! loop {
//!     let arm = learner.select(..);        // stochastic, belief untouched
//!     let reward = environment(arm);       // external — not this crate
//!     learner.update(arm, reward)?;        // belief update, history append
//! }
//! ```
//!
//! - [`BernoulliThompson`] — Beta(α, β) conjugate posterior per arm,
//!   sample-argmax selection, binary rewards.
//! - [`ValueWeightedThompson`] — same posterior machinery, but selection
//!   and the expected-value / lower-bound queries weight each arm by an
//!   externally supplied monetary value (e.g. a candidate price).
//! - [`GpThompson`] — arms indexed by a continuous scalar feature;
//!   Gaussian-process regression shares reward information between
//!   neighboring arms and is refit on the full history every update.
//!
//! All learners are strictly single-threaded and synchronous, own their
//! state exclusively, and take an injectable seed (`with_seed`) so tests
//! can assert exact selection sequences. Arm counts are fixed at
//! construction. Reward simulation, regret reporting, and experiment
//! orchestration live outside this crate and interact only through
//! `select`/`update` and the read-only queries.

#![deny(unreachable_pub)]

mod bernoulli;
mod config;
mod errors;
mod gp;
mod history;
mod posterior;
mod value;

pub use bernoulli::{BernoulliThompson, BernoulliSummary};
pub use config::GpConfig;
pub use errors::BanditError;
pub use gp::{GpRegression, GpSummary, GpThompson};
pub use history::{Observation, ObservationHistory};
pub use posterior::{BetaArms, BetaPosterior};
pub use value::{ValueWeightedSummary, ValueWeightedThompson};
