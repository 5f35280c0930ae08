//! Episode truncation.
use crate::{
    record::{Record, RecordValue::Scalar},
    Env, Step,
};
use anyhow::Result;
use log::{trace, warn};
use serde::{Deserialize, Serialize};

/// Configuration of [`TimeLimit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeLimitConfig<C> {
    /// Configuration of the wrapped environment.
    pub env_config: C,

    /// The number of steps after which an episode is truncated.
    pub max_steps: usize,
}

impl<C> TimeLimitConfig<C> {
    /// Constructs a configuration.
    pub fn new(env_config: C, max_steps: usize) -> Self {
        Self {
            env_config,
            max_steps,
        }
    }
}

/// Truncates episodes of the wrapped environment after `max_steps` steps.
///
/// Tasks never end an episode on their own; this wrapper sets
/// [`Step::is_truncated`] on the last step and records `episode_length`.
pub struct TimeLimit<E: Env> {
    env: E,
    max_steps: usize,
    count_steps: usize,
}

impl<E: Env> TimeLimit<E> {
    /// Wraps an environment.
    pub fn new(env: E, max_steps: usize) -> Self {
        Self {
            env,
            max_steps,
            count_steps: 0,
        }
    }

    /// The number of steps in the current episode.
    pub fn count_steps(&self) -> usize {
        self.count_steps
    }

    /// The maximum number of steps in an episode.
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// The wrapped environment.
    pub fn inner(&self) -> &E {
        &self.env
    }

    /// Returns `true` once the current episode has been truncated.
    pub fn is_exhausted(&self) -> bool {
        self.count_steps > 0 && self.count_steps >= self.max_steps
    }
}

impl<E: Env> Env for TimeLimit<E> {
    type Config = TimeLimitConfig<E::Config>;
    type Obs = E::Obs;
    type Act = E::Act;
    type Info = E::Info;

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        Ok(Self::new(
            E::build(&config.env_config, seed)?,
            config.max_steps,
        ))
    }

    fn step(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)> {
        trace!("TimeLimit::step()");
        let (step, mut record) = self.env.step(a)?;

        if self.is_exhausted() {
            warn!(
                "Stepping beyond the time limit ({} steps) without reset",
                self.max_steps
            );
        }
        self.count_steps += 1;

        let is_truncated = step.is_truncated || self.count_steps >= self.max_steps;
        if step.is_terminated || is_truncated {
            record.insert("episode_length", Scalar(self.count_steps as _));
        }

        let step = Step::new(
            step.obs,
            step.act,
            step.reward,
            step.is_terminated,
            is_truncated,
            step.info,
            step.init_obs,
        );
        Ok((step, record))
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.count_steps = 0;
        self.env.reset()
    }

    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs> {
        self.count_steps = 0;
        self.env.reset_with_index(ix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dummy::{CountAct, CountingEnv};

    #[test]
    fn test_truncates_at_max_steps() -> Result<()> {
        let mut env = TimeLimit::new(CountingEnv::default(), 3);
        env.reset()?;

        let (step, record) = env.step(&CountAct)?;
        assert!(!step.is_done());
        assert!(record.get("episode_length").is_none());
        let (step, _) = env.step(&CountAct)?;
        assert!(!step.is_done());
        let (step, record) = env.step(&CountAct)?;
        assert!(step.is_truncated);
        assert!(!step.is_terminated);
        assert_eq!(record.get_scalar("episode_length")?, 3.0);

        env.reset()?;
        assert_eq!(env.count_steps(), 0);
        Ok(())
    }

    #[test]
    fn test_step_with_reset_starts_next_episode() -> Result<()> {
        let mut env = TimeLimit::new(CountingEnv::default(), 2);
        env.reset()?;

        let (step, _) = env.step_with_reset(&CountAct)?;
        assert!(step.init_obs.is_none());
        let (step, _) = env.step_with_reset(&CountAct)?;
        assert!(step.is_done());
        assert_eq!(step.init_obs.map(|o| o.0), Some(0));
        assert_eq!(env.count_steps(), 0);
        assert_eq!(env.inner().n_resets, 2);
        Ok(())
    }

    #[test]
    fn test_build_from_config() -> Result<()> {
        let config = TimeLimitConfig::new((), 150);
        let env = TimeLimit::<CountingEnv>::build(&config, 0)?;
        assert_eq!(env.max_steps(), 150);
        Ok(())
    }

    #[test]
    fn test_zero_max_steps_truncates_first_step() -> Result<()> {
        let mut env = TimeLimit::new(CountingEnv::default(), 0);
        env.reset()?;
        assert!(!env.is_exhausted());

        let (step, record) = env.step(&CountAct)?;
        assert!(step.is_truncated);
        assert_eq!(record.get_scalar("episode_length")?, 1.0);
        assert!(env.is_exhausted());

        env.reset()?;
        assert!(!env.is_exhausted());
        Ok(())
    }

    #[test]
    fn test_exhausted_only_after_last_step() -> Result<()> {
        let mut env = TimeLimit::new(CountingEnv::default(), 2);
        env.reset()?;
        env.step(&CountAct)?;
        assert!(!env.is_exhausted());
        env.step(&CountAct)?;
        assert!(env.is_exhausted());
        Ok(())
    }
}
