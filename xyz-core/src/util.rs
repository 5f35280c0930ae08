//! Utilities for interaction of policies and environments.
use crate::{
    record::{RecordValue, Recorder},
    Env, Policy,
};
use anyhow::Result;
use log::info;

/// Runs episodes with a policy and writes per-step records to `recorder`.
///
/// Each written record is the one returned by [`Env::step`] extended with
/// `reward`, `episode` and `step`. Returns the return of each episode.
/// The environment must end its episodes, e.g. by wrapping it in
/// [`TimeLimit`](crate::TimeLimit).
pub fn eval_with_recorder<E, P, R>(
    env: &mut E,
    policy: &mut P,
    n_episodes: usize,
    recorder: &mut R,
) -> Result<Vec<f32>>
where
    E: Env,
    P: Policy<E>,
    R: Recorder,
{
    let mut rs = Vec::new();

    for episode in 0..n_episodes {
        let mut prev_obs = env.reset()?;
        let mut count_step = 0;
        let mut r_total = 0.0;

        loop {
            let act = policy.sample(&prev_obs);
            let (step, mut record) = env.step(&act)?;
            r_total += step.reward;

            record.insert("reward", RecordValue::Scalar(step.reward));
            record.insert("episode", RecordValue::Scalar(episode as _));
            record.insert("step", RecordValue::Scalar(count_step as _));
            recorder.write(record);

            if step.is_done() {
                break;
            }
            prev_obs = step.obs;
            count_step += 1;
        }
        info!(
            "Episode {:?}, {:?} steps, return = {:?}",
            episode,
            count_step + 1,
            r_total
        );
        rs.push(r_total);
    }

    Ok(rs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dummy::{CountingEnv, NoopPolicy},
        record::BufferedRecorder,
        TimeLimit,
    };

    #[test]
    fn test_eval_with_recorder() -> Result<()> {
        let mut env = TimeLimit::new(CountingEnv::default(), 3);
        let mut recorder = BufferedRecorder::new();
        let returns = eval_with_recorder(&mut env, &mut NoopPolicy, 2, &mut recorder)?;

        assert_eq!(returns, vec![3.0, 3.0]);
        assert_eq!(recorder.len(), 6);
        let last = recorder.iter().last().unwrap();
        assert_eq!(last.get_scalar("episode")?, 1.0);
        assert_eq!(last.get_scalar("step")?, 2.0);
        assert_eq!(last.get_scalar("episode_length")?, 3.0);
        Ok(())
    }
}
