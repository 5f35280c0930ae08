//! The button press task.
use crate::{
    actuator::HandActuator,
    config::ButtonPressConfig,
    error::ButtonPressError,
    obs::{ButtonPressAct, ButtonPressObs, ObsDict},
    reward::{self, RewardInput, RewardTerms},
    sim::{SceneHandles, Simulator, Vec3},
};
use anyhow::Result;
use log::{debug, info, trace};
use rand::{rngs::StdRng, SeedableRng};
use xyz_core::{
    record::{Record, RecordValue},
    BoxSpace, Env, Info, Step,
};

/// Index of the button's slide joint in the joint state.
const BUTTON_QPOS: usize = 9;

/// Information given at every step of the task.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonPressInfo {
    /// Distance between the fingertip midpoint and the button surface.
    pub reach_dist: f32,

    /// Height of the button surface above its goal.
    pub goal_dist: f32,

    /// Reward of the step.
    pub ep_rew: f32,

    /// Always `None`; the task has no pick phase.
    pub pick_rew: Option<f32>,

    /// `1.0` if `goal_dist <= 0.02`, else `0.0`.
    pub success: f32,

    /// Configured goal of the task.
    pub goal: Vec3,
}

impl Info for ButtonPressInfo {}

impl ButtonPressInfo {
    /// Converts the info into a [`Record`].
    ///
    /// `pickRew` is left out as it has no value.
    pub fn to_record(&self) -> Record {
        Record::from_slice(&[
            ("reachDist", RecordValue::Scalar(self.reach_dist)),
            ("goalDist", RecordValue::Scalar(self.goal_dist)),
            ("epRew", RecordValue::Scalar(self.ep_rew)),
            ("success", RecordValue::Scalar(self.success)),
            ("goal", RecordValue::Array1(self.goal.as_slice().to_vec())),
        ])
    }
}

/// Quantities fixed at reset and the step counter of the running episode.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeState {
    /// Where the box was placed.
    pub obj_init_pos: Vec3,

    /// Where the hand was brought to.
    pub hand_init_pos: Vec3,

    /// Where the button surface has to go, the `hole` site.
    pub state_goal: Vec3,

    /// Press distance at reset.
    pub max_dist: f32,

    /// `1000 * max_dist + 2000`; informational.
    pub target_reward: f32,

    /// Number of steps since reset.
    pub curr_path_length: usize,

    /// Always `false`; the task has no pick phase.
    pub pick_completed: bool,

    /// Fingertip midpoint once the hand settled at reset.
    pub init_finger_com: Vec3,
}

/// A Sawyer hand pressing a button top-down behind a wall.
///
/// Construction loads the scene and resolves the handles the task needs,
/// nothing else. Call [`Env::reset`] to start an episode; [`Env::step`]
/// fails with [`ButtonPressError::NotReset`] before that.
///
/// With [`ButtonPressConfig::random_init`] the box is placed at a point
/// sampled from the object space. The sample is frozen: later resets reuse it
/// until [`ButtonPressTask::rerandomize`] is called or freezing is disabled.
pub struct ButtonPressTask<S: Simulator> {
    config: ButtonPressConfig,
    sim: S,
    handles: SceneHandles,
    actuator: HandActuator,
    obj_and_goal_space: BoxSpace,
    action_space: BoxSpace,
    observation_space: BoxSpace,
    rng: StdRng,
    freeze_rand_vec: bool,
    last_rand_vec: Option<Vec3>,
    episode: Option<EpisodeState>,
}

impl<S: Simulator> ButtonPressTask<S> {
    /// Loads the scene of `config` and constructs the task.
    pub fn new(config: &ButtonPressConfig, seed: i64) -> Result<Self> {
        let path = config.model_path();
        info!("Load scene {:?}", path);
        let sim = S::load(&path)?;
        Self::with_simulator(config, sim, seed)
    }

    /// Constructs the task on an already loaded scene.
    ///
    /// Fails if a configured position is outside of its space or the scene
    /// lacks a site, body or mocap the task uses.
    pub fn with_simulator(config: &ButtonPressConfig, sim: S, seed: i64) -> Result<Self> {
        let hand_space = BoxSpace::new(
            config.hand_low.as_slice().to_vec(),
            config.hand_high.as_slice().to_vec(),
        )?;
        let goal_space = hand_space.clone();
        let obj_and_goal_space = BoxSpace::new(
            config.obj_low.as_slice().to_vec(),
            config.obj_high.as_slice().to_vec(),
        )?;
        let action_space = BoxSpace::uniform(4, -1.0, 1.0)?;
        let observation_space = hand_space.concat(&obj_and_goal_space);

        hand_space.check("hand_init_pos", config.hand_init_pos.as_slice())?;
        obj_and_goal_space.check("obj_init_pos", config.obj_init_pos.as_slice())?;
        goal_space.check("goal", config.goal.as_slice())?;

        let handles = SceneHandles::resolve(&sim)?;
        let actuator = HandActuator::new(
            handles.mocap,
            hand_space,
            config.hand_init_orientation(),
            config.action_scale,
            config.frame_skip,
        );

        Ok(Self {
            config: config.clone(),
            sim,
            handles,
            actuator,
            obj_and_goal_space,
            action_space,
            observation_space,
            rng: StdRng::seed_from_u64(seed as u64),
            freeze_rand_vec: true,
            last_rand_vec: None,
            episode: None,
        })
    }

    /// Configuration of the task.
    pub fn config(&self) -> &ButtonPressConfig {
        &self.config
    }

    /// Space the box is placed in.
    pub fn obj_and_goal_space(&self) -> &BoxSpace {
        &self.obj_and_goal_space
    }

    /// `[-1, 1]^4`.
    pub fn action_space(&self) -> &BoxSpace {
        &self.action_space
    }

    /// Hand workspace followed by the object space.
    pub fn observation_space(&self) -> &BoxSpace {
        &self.observation_space
    }

    /// The simulator.
    pub fn sim(&self) -> &S {
        &self.sim
    }

    /// State of the running episode, `None` before the first reset.
    pub fn episode(&self) -> Option<&EpisodeState> {
        self.episode.as_ref()
    }

    /// Returns `true` once the task has been reset.
    pub fn is_active(&self) -> bool {
        self.episode.is_some()
    }

    /// Enables or disables reuse of the sampled box position.
    pub fn set_freeze_rand_vec(&mut self, v: bool) {
        self.freeze_rand_vec = v;
    }

    /// Drops the frozen box position; the next random reset samples anew.
    pub fn rerandomize(&mut self) {
        self.last_rand_vec = None;
    }

    /// The last sampled box position.
    pub fn last_rand_vec(&self) -> Option<Vec3> {
        self.last_rand_vec
    }

    /// End-effector position.
    pub fn get_endeff_pos(&self) -> Vec3 {
        self.sim.body_xpos(self.handles.hand)
    }

    /// Midpoint of the fingertips.
    pub fn finger_com(&self) -> Vec3 {
        let right = self.sim.site_xpos(self.handles.right_end_effector);
        let left = self.sim.site_xpos(self.handles.left_end_effector);
        (right + left) / 2.0
    }

    /// Observation of the current simulator state.
    pub fn get_obs(&self) -> ButtonPressObs {
        ButtonPressObs::new(
            self.get_endeff_pos(),
            self.sim.site_xpos(self.handles.button_start),
        )
    }

    /// Goal-conditioned view of the current simulator state.
    pub fn get_obs_dict(&self) -> Result<ObsDict, ButtonPressError> {
        let episode = self.episode.as_ref().ok_or(ButtonPressError::NotReset)?;
        let obs = self.get_obs();
        Ok(ObsDict {
            state_observation: obs.as_slice().to_vec(),
            state_desired_goal: episode.state_goal,
            state_achieved_goal: obs.obj_pos(),
        })
    }

    /// Computes the shaping reward of an observation, see [`reward`].
    ///
    /// The fingertip midpoint is read from the simulator, not from `input`.
    pub fn compute_reward(
        &self,
        _action: &ButtonPressAct,
        input: RewardInput,
    ) -> Result<RewardTerms, ButtonPressError> {
        let episode = self.episode.as_ref().ok_or(ButtonPressError::NotReset)?;
        let obj_pos = input.obj_pos()?;
        Ok(reward::shaping_reward(
            obj_pos,
            self.finger_com(),
            episode.state_goal.z,
            episode.max_dist,
        ))
    }

    fn get_state_rand_vec(&mut self) -> Vec3 {
        if self.freeze_rand_vec {
            if let Some(v) = self.last_rand_vec {
                return v;
            }
        }
        let v = self.obj_and_goal_space.sample(&mut self.rng);
        let v = Vec3::from_iterator(v);
        self.last_rand_vec = Some(v);
        v
    }

    fn reset_hand(&mut self) -> Vec3 {
        self.actuator.settle_at(
            &mut self.sim,
            self.config.hand_init_pos,
            self.config.reset_hand_iters,
        );
        self.finger_com()
    }

    fn set_obj_xyz(&mut self, pos: f32) -> Result<()> {
        let mut qpos = self.sim.qpos().to_vec();
        let mut qvel = self.sim.qvel().to_vec();
        for (v, x) in [(&mut qpos, pos), (&mut qvel, 0.0)] {
            let len = v.len();
            *v.get_mut(BUTTON_QPOS).ok_or(ButtonPressError::StateShape {
                expected: BUTTON_QPOS + 1,
                got: len,
            })? = x;
        }
        self.sim.set_state(&qpos, &qvel)
    }

    fn reset_model(&mut self) -> Result<ButtonPressObs> {
        trace!("ButtonPressTask::reset()");
        let init_finger_com = self.reset_hand();

        let mut obj_init_pos = self.config.obj_init_pos;
        let mut state_goal = self.config.goal;
        if self.config.random_init {
            let goal_pos = self.get_state_rand_vec();
            obj_init_pos = goal_pos;
            state_goal = goal_pos + self.config.button_offset;
        }

        self.sim.set_body_pos(self.handles.box_body, obj_init_pos);
        self.sim.set_body_pos(self.handles.button, state_goal);
        self.set_obj_xyz(0.0)?;

        // the hole site is the goal, the button placement only stages it
        let state_goal = self.sim.site_xpos(self.handles.hole);
        let button_start = self.sim.site_xpos(self.handles.button_start);
        let max_dist = (button_start.z - state_goal.z).abs();
        let target_reward = reward::target_reward(max_dist);
        debug!(
            "state_goal = {:?}, max_dist = {}, target_reward = {}",
            state_goal, max_dist, target_reward
        );

        self.episode = Some(EpisodeState {
            obj_init_pos,
            hand_init_pos: self.config.hand_init_pos,
            state_goal,
            max_dist,
            target_reward,
            curr_path_length: 0,
            pick_completed: false,
            init_finger_com,
        });

        Ok(self.get_obs())
    }

    fn step_task(
        &mut self,
        a: &ButtonPressAct,
    ) -> Result<(ButtonPressObs, RewardTerms, ButtonPressInfo)> {
        trace!("ButtonPressTask::step()");
        if self.episode.is_none() {
            return Err(ButtonPressError::NotReset.into());
        }

        self.actuator.set_xyz_action(&mut self.sim, a.xyz());
        self.actuator
            .do_simulation(&mut self.sim, [a.gripper(), -a.gripper()]);

        let obs = self.get_obs();
        let obs_dict = self.get_obs_dict()?;
        let terms = self.compute_reward(a, RewardInput::Dict(&obs_dict))?;

        if let Some(episode) = self.episode.as_mut() {
            episode.curr_path_length += 1;
        }

        let info = ButtonPressInfo {
            reach_dist: terms.reach_dist,
            goal_dist: terms.press_dist,
            ep_rew: terms.reward,
            pick_rew: None,
            success: reward::success(terms.press_dist),
            goal: self.config.goal,
        };

        Ok((obs, terms, info))
    }
}

impl<S: Simulator> Env for ButtonPressTask<S> {
    type Config = ButtonPressConfig;
    type Obs = ButtonPressObs;
    type Act = ButtonPressAct;
    type Info = ButtonPressInfo;

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        Self::new(config, seed)
    }

    /// Runs a control step.
    ///
    /// The step is never terminated nor truncated. The returned [`Record`]
    /// holds the fields of [`ButtonPressInfo`].
    fn step(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)> {
        let (obs, terms, info) = self.step_task(a)?;
        let record = info.to_record();
        Ok((
            Step::new(obs, *a, terms.reward, false, false, info, None),
            record,
        ))
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.reset_model()
    }

    /// Reseeds the sampler of box positions with `ix`, drops the frozen
    /// sample and resets.
    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs> {
        self.rng = StdRng::seed_from_u64(ix as u64);
        self.last_rand_vec = None;
        self.reset_model()
    }
}
