#![warn(missing_docs)]
//! Episodic environment contract for Sawyer XYZ manipulation tasks.
//!
//! The crate defines what a task looks like to a training or evaluation
//! harness: an [`Env`] is built from a configuration, reset to obtain a first
//! observation, and stepped with actions. Each step yields a [`Step`] and a
//! [`Record`](record::Record) holding task-specific diagnostics.
//!
//! Episode length is not the concern of a task. Wrap it in [`TimeLimit`] to
//! truncate episodes after a fixed number of steps.
pub mod error;
pub mod record;
pub mod util;

mod base;
pub use base::{Act, Env, Info, Obs, Policy, Step};

mod space;
pub use space::BoxSpace;

mod time_limit;
pub use time_limit::{TimeLimit, TimeLimitConfig};

mod evaluator;
pub use evaluator::{DefaultEvaluator, Evaluator};

#[cfg(test)]
pub(crate) mod dummy;
