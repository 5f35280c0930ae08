//! Default implementation of the [`Evaluator`] trait.
//!
//! This module provides a simple evaluator that runs a fixed number of episodes
//! and calculates the average return across all episodes.
use super::Evaluator;
use crate::{
    record::{Record, RecordValue::Scalar},
    Env, Policy,
};
use anyhow::Result;
use log::info;

/// A default implementation of the [`Evaluator`] trait.
///
/// Runs `n_episodes` episodes and reports:
///
/// * `Episode return` - the average return
/// * `Episode length` - the average number of steps
/// * `Success rate` - the fraction of episodes in which some step reported
///   a positive `success` scalar in its record; only present when the
///   environment reports `success`
///
/// The environment must end its episodes, e.g. by wrapping it in
/// [`TimeLimit`](crate::TimeLimit).
///
/// ```ignore
/// let config = TimeLimitConfig::new(ButtonPressConfig::default(), 150);
/// let mut evaluator = DefaultEvaluator::<TimeLimit<Task>>::new(&config, 42, 10)?;
/// let record = evaluator.evaluate(&mut policy)?;
/// println!("Success rate: {}", record.get_scalar("Success rate")?);
/// ```
pub struct DefaultEvaluator<E: Env> {
    /// The number of episodes to run during evaluation.
    n_episodes: usize,

    /// The environment instance used for evaluation.
    env: E,
}

impl<E: Env> Evaluator<E> for DefaultEvaluator<E> {
    fn evaluate<P>(&mut self, policy: &mut P) -> Result<Record>
    where
        P: Policy<E>,
    {
        let mut r_total = 0f32;
        let mut n_steps = 0usize;
        let mut n_successes = 0usize;
        let mut reports_success = false;

        for ix in 0..self.n_episodes {
            let mut prev_obs = self.env.reset_with_index(ix)?;
            let mut success = false;

            loop {
                let act = policy.sample(&prev_obs);
                let (step, record) = self.env.step(&act)?;
                r_total += step.reward;
                n_steps += 1;
                if let Ok(v) = record.get_scalar("success") {
                    reports_success = true;
                    success |= v > 0.0;
                }
                if step.is_done() {
                    break;
                }
                prev_obs = step.obs;
            }

            if success {
                n_successes += 1;
            }
        }

        let n = self.n_episodes.max(1) as f32;
        let mut record = Record::from_scalar("Episode return", r_total / n);
        record.insert("Episode length", Scalar(n_steps as f32 / n));
        if reports_success {
            record.insert("Success rate", Scalar(n_successes as f32 / n));
        }
        info!(
            "Evaluated {} episodes: average return = {}",
            self.n_episodes,
            r_total / n
        );

        Ok(record)
    }
}

impl<E: Env> DefaultEvaluator<E> {
    /// Constructs a new [`DefaultEvaluator`].
    ///
    /// * `config` - Configuration for the environment
    /// * `seed` - Random seed for environment initialization
    /// * `n_episodes` - Number of episodes to run during evaluation
    pub fn new(config: &E::Config, seed: i64, n_episodes: usize) -> Result<Self> {
        Ok(Self {
            n_episodes,
            env: E::build(config, seed)?,
        })
    }

    /// Constructs an evaluator on an already built environment.
    pub fn from_env(env: E, n_episodes: usize) -> Self {
        Self { n_episodes, env }
    }

    /// The environment used for evaluation.
    pub fn env(&self) -> &E {
        &self.env
    }
}
