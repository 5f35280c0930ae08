//! Sawyer top-down button press task behind a wall.
//!
//! The hand of a Sawyer arm, driven through a mocap target, has to push a
//! button down into its hole. [`ButtonPressTask`] implements
//! [`Env`](xyz_core::Env):
//!
//! * observations are the hand position followed by the position of the
//!   button's pressable surface,
//! * actions are a Cartesian hand displacement and a gripper command in
//!   `[-1, 1]^4`,
//! * rewards are shaped by the distance of the fingertips to the button and
//!   the remaining press depth ([`reward`]).
//!
//! Episodes never end on their own; wrap the task in
//! [`TimeLimit`](xyz_core::TimeLimit) with
//! [`ButtonPressConfig::max_path_length`] to truncate them.
//!
//! ```no_run
//! use xyz_button_press::{ButtonPressAct, ButtonPressConfig, ButtonPressTask, KinematicSim};
//! use xyz_core::Env;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = ButtonPressConfig::default();
//! let mut task = ButtonPressTask::<KinematicSim>::build(&config, 42)?;
//! let obs = task.reset()?;
//! let (step, record) = task.step(&ButtonPressAct::new([0.0, 1.0, 0.0, 0.0]))?;
//! println!("{:?} {} {:?}", obs, step.reward, record.get_scalar("reachDist"));
//! # Ok(())
//! # }
//! ```
mod actuator;
mod config;
mod error;
mod kinematic;
mod obs;
pub mod reward;
mod sim;
mod task;
pub use actuator::HandActuator;
pub use config::ButtonPressConfig;
pub use error::ButtonPressError;
pub use kinematic::KinematicSim;
pub use obs::{ButtonPressAct, ButtonPressObs, ObsDict};
pub use sim::{BodyId, MocapId, Quat, SceneHandles, SiteId, Simulator, Vec3};
pub use task::{ButtonPressInfo, ButtonPressTask, EpisodeState};
