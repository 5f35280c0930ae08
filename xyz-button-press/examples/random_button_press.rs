use anyhow::Result;
use serde::Deserialize;
use xyz_button_press::{
    ButtonPressAct, ButtonPressConfig, ButtonPressObs, ButtonPressTask, KinematicSim,
};
use xyz_core::{
    record::BufferedRecorder, util::eval_with_recorder, DefaultEvaluator, Env as _, Evaluator,
    Policy, TimeLimit, TimeLimitConfig,
};

type Env = TimeLimit<ButtonPressTask<KinematicSim>>;
type EnvConfig = TimeLimitConfig<ButtonPressConfig>;

#[derive(Clone, Deserialize)]
struct RandomPolicyConfig {
    pub gripper: bool,
}

struct RandomPolicy {
    gripper: bool,
}

impl Policy<Env> for RandomPolicy {
    type Config = RandomPolicyConfig;

    fn build(config: Self::Config) -> Self {
        Self {
            gripper: config.gripper,
        }
    }

    fn sample(&mut self, _: &ButtonPressObs) -> ButtonPressAct {
        let mut a = [0f32; 4];
        for x in a.iter_mut() {
            *x = fastrand::f32() * 2.0 - 1.0;
        }
        if !self.gripper {
            a[3] = -1.0;
        }
        a.into()
    }
}

fn env_config() -> EnvConfig {
    let config = ButtonPressConfig::default().random_init(true);
    let max_steps = config.max_path_length;
    TimeLimitConfig::new(config, max_steps)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    fastrand::seed(42);

    let env_config = env_config();
    let mut policy = RandomPolicy::build(RandomPolicyConfig { gripper: true });

    // Per-step records of a single episode
    let mut env = Env::build(&env_config, 42)?;
    let mut recorder = BufferedRecorder::new();
    let _ = eval_with_recorder(&mut env, &mut policy, 1, &mut recorder)?;
    if let Some(record) = recorder.iter().last() {
        println!(
            "reachDist = {}, goalDist = {}",
            record.get_scalar("reachDist")?,
            record.get_scalar("goalDist")?
        );
    }

    // Runs evaluation
    let record = DefaultEvaluator::<Env>::new(&env_config, 0, 5)?.evaluate(&mut policy)?;
    for (k, v) in record.iter() {
        println!("{}: {:?}", k, v);
    }

    Ok(())
}
