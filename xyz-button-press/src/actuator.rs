//! Mocap-based control of the end-effector.
use crate::sim::{MocapId, Quat, Simulator, Vec3};
use xyz_core::BoxSpace;

/// Drives the hand through its mocap target and the two finger actuators.
///
/// Actions are clipped here; the task passes them through unchecked.
#[derive(Debug, Clone)]
pub struct HandActuator {
    mocap: MocapId,
    mocap_space: BoxSpace,
    quat: Quat,
    action_scale: f32,
    frame_skip: usize,
}

impl HandActuator {
    /// Constructs an actuator keeping the mocap target inside `mocap_space`.
    pub fn new(
        mocap: MocapId,
        mocap_space: BoxSpace,
        quat: Quat,
        action_scale: f32,
        frame_skip: usize,
    ) -> Self {
        Self {
            mocap,
            mocap_space,
            quat,
            action_scale,
            frame_skip,
        }
    }

    /// Moves the mocap target by `action * action_scale`.
    ///
    /// Each component of `action` is clipped to `[-1, 1]` and the new target
    /// is clamped to the hand workspace.
    pub fn set_xyz_action<S: Simulator>(&self, sim: &mut S, action: Vec3) {
        let delta = action.map(|a| a.clamp(-1.0, 1.0)) * self.action_scale;
        let target = sim.mocap_pos(self.mocap) + delta;
        let clipped = Vec3::from_iterator(self.mocap_space.clip(target.as_slice()));
        sim.set_mocap_pos(self.mocap, clipped);
        sim.set_mocap_quat(self.mocap, self.quat);
    }

    /// Applies finger controls and advances `frame_skip` ticks.
    pub fn do_simulation<S: Simulator>(&self, sim: &mut S, ctrl: [f32; 2]) {
        sim.set_ctrl(&ctrl);
        sim.step(self.frame_skip);
    }

    /// Brings the hand to `pos` by holding the mocap target there for
    /// `iters` control steps with the gripper driven open.
    pub fn settle_at<S: Simulator>(&self, sim: &mut S, pos: Vec3, iters: usize) {
        for _ in 0..iters {
            sim.set_mocap_pos(self.mocap, pos);
            sim.set_mocap_quat(self.mocap, self.quat);
            self.do_simulation(sim, [-1.0, 1.0]);
        }
    }
}
