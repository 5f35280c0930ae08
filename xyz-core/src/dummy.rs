//! Environment used in tests.
use crate::{record::Record, Act, Env, Obs, Policy, Step};
use anyhow::{bail, Result};

/// Observation holding the number of steps since the last reset.
#[derive(Clone, Debug)]
pub struct CountObs(pub usize);

impl Obs for CountObs {
    fn len(&self) -> usize {
        1
    }
}

#[derive(Clone, Debug)]
pub struct CountAct;

impl Act for CountAct {
    fn len(&self) -> usize {
        0
    }
}

/// Rewards 1 per step and never ends an episode by itself.
///
/// Reports `success` once `success_after` steps have been taken, if set.
#[derive(Default)]
pub struct CountingEnv {
    pub count: usize,
    pub n_resets: usize,
    pub success_after: Option<usize>,
    pub active: bool,
}

impl Env for CountingEnv {
    type Config = ();
    type Obs = CountObs;
    type Act = CountAct;
    type Info = ();

    fn build(_config: &Self::Config, _seed: i64) -> Result<Self> {
        Ok(Self::default())
    }

    fn step(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)> {
        if !self.active {
            bail!("step() before reset()");
        }
        self.count += 1;
        let mut record = Record::empty();
        if let Some(n) = self.success_after {
            let success = if self.count >= n { 1.0 } else { 0.0 };
            record.insert("success", crate::record::RecordValue::Scalar(success));
        }
        let step = Step::new(CountObs(self.count), a.clone(), 1.0, false, false, (), None);
        Ok((step, record))
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.active = true;
        self.count = 0;
        self.n_resets += 1;
        Ok(CountObs(0))
    }

    fn reset_with_index(&mut self, _ix: usize) -> Result<Self::Obs> {
        self.reset()
    }
}

pub struct NoopPolicy;

impl<E: Env<Act = CountAct>> Policy<E> for NoopPolicy {
    type Config = ();

    fn build(_config: Self::Config) -> Self {
        Self
    }

    fn sample(&mut self, _obs: &E::Obs) -> E::Act {
        CountAct
    }
}
