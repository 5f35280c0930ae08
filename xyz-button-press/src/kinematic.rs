//! Deterministic kinematic stand-in for the physics engine.
use crate::{
    error::ButtonPressError,
    sim::{BodyId, MocapId, Quat, SiteId, Simulator, Vec3},
};
use anyhow::Result;
use log::debug;
use std::path::Path;

const SCENE: &str = "sawyer_button_press_topdown_wall";

const SITES: [&str; 4] = ["rightEndEffector", "leftEndEffector", "buttonStart", "hole"];
const BODIES: [&str; 3] = ["hand", "box", "button"];

const RIGHT_END_EFFECTOR: usize = 0;
const LEFT_END_EFFECTOR: usize = 1;
const BUTTON_START: usize = 2;
const HOLE: usize = 3;

const HAND: usize = 0;
const BUTTON: usize = 2;

/// 7 arm joints, 2 finger joints and the button slide.
const NQ: usize = 10;
const FINGER_R_JOINT: usize = 7;
const FINGER_L_JOINT: usize = 8;
const BUTTON_JOINT: usize = 9;

const TIMESTEP: f32 = 0.0025;

/// Fraction of the remaining distance to the mocap target covered per tick.
const TRACKING_GAIN: f32 = 0.5;
const SNAP_EPS: f32 = 1e-6;

/// Fingertips sit this far below the hand.
const FINGER_DROP: f32 = 0.045;
const FINGER_MIN_HALF_WIDTH: f32 = 0.01;
const FINGER_RANGE: f32 = 0.03;

/// Pressable surface above the button body at rest.
const BUTTON_TOP: f32 = 0.1;
/// Bottom of the hole above the button body.
const HOLE_OFFSET: f32 = 0.01;
const BUTTON_TRAVEL: f32 = BUTTON_TOP - HOLE_OFFSET;
const BUTTON_RADIUS: f32 = 0.025;
/// Fraction of the depression kept per tick without contact.
const BUTTON_SPRING: f32 = 0.5;

/// Kinematic model of the top-down button press scene.
///
/// The hand tracks its mocap target exponentially, the fingertips straddle
/// the hand below it, and the button slides down as long as the fingertip
/// midpoint pushes on it from above. Released, it springs back. There are no
/// collisions otherwise.
#[derive(Debug, Clone)]
pub struct KinematicSim {
    body_pos: [Vec3; 3],
    mocap_pos: Vec3,
    mocap_quat: Quat,
    qpos: Vec<f32>,
    qvel: Vec<f32>,
    ctrl: [f32; 2],
}

impl KinematicSim {
    /// The scene at its authored default pose.
    pub fn button_press_topdown_wall() -> Self {
        let hand = Vec3::new(0.0, 0.6, 0.2);
        let mut qpos = vec![0.0; NQ];
        qpos[FINGER_R_JOINT] = -FINGER_MIN_HALF_WIDTH;
        qpos[FINGER_L_JOINT] = FINGER_MIN_HALF_WIDTH;

        Self {
            body_pos: [hand, Vec3::new(0.0, 0.8, 0.05), Vec3::new(0.0, 0.88, 0.1)],
            mocap_pos: hand,
            mocap_quat: Quat::identity(),
            qpos,
            qvel: vec![0.0; NQ],
            ctrl: [0.0, 0.0],
        }
    }

    /// Orientation of the mocap target.
    pub fn mocap_quat(&self) -> Quat {
        self.mocap_quat
    }

    fn finger_com(&self) -> Vec3 {
        self.body_pos[HAND] - Vec3::z() * FINGER_DROP
    }

    fn tick(&mut self) {
        let hand = &mut self.body_pos[HAND];
        for (p, t) in hand.iter_mut().zip(self.mocap_pos.iter()) {
            let d = t - *p;
            if d.abs() < SNAP_EPS {
                *p = *t;
            } else {
                *p += d * TRACKING_GAIN;
            }
        }

        // ctrl = (-1, 1) opens the gripper fully, (1, -1) closes it
        let opening = ((self.ctrl[1] - self.ctrl[0]) / 2.0).clamp(-1.0, 1.0);
        let half_width = FINGER_MIN_HALF_WIDTH + FINGER_RANGE * (opening + 1.0) / 2.0;
        self.qpos[FINGER_R_JOINT] = -half_width;
        self.qpos[FINGER_L_JOINT] = half_width;

        let prev = self.qpos[BUTTON_JOINT];
        let button = self.body_pos[BUTTON];
        let finger = self.finger_com();
        let rest_top = button.z + BUTTON_TOP;
        let offset = (finger - button).xy();
        let pushing = offset.norm() < BUTTON_RADIUS && finger.z < rest_top;
        let press = if pushing {
            (rest_top - finger.z).clamp(0.0, BUTTON_TRAVEL)
        } else if prev * BUTTON_SPRING < SNAP_EPS {
            0.0
        } else {
            prev * BUTTON_SPRING
        };
        self.qpos[BUTTON_JOINT] = press;
        self.qvel[BUTTON_JOINT] = (press - prev) / TIMESTEP;
    }
}

impl Simulator for KinematicSim {
    /// Accepts only the top-down button press scene; the file is not read.
    fn load(path: &Path) -> Result<Self> {
        match path.file_stem().and_then(|s| s.to_str()) {
            Some(SCENE) => {
                debug!("KinematicSim::load({:?})", path);
                Ok(Self::button_press_topdown_wall())
            }
            _ => Err(ButtonPressError::UnknownAsset(path.to_path_buf()).into()),
        }
    }

    fn site_id(&self, name: &str) -> Option<SiteId> {
        SITES.iter().position(|s| *s == name).map(SiteId)
    }

    fn body_id(&self, name: &str) -> Option<BodyId> {
        BODIES.iter().position(|b| *b == name).map(BodyId)
    }

    fn mocap_id(&self, name: &str) -> Option<MocapId> {
        if name == "mocap" {
            Some(MocapId(0))
        } else {
            None
        }
    }

    fn site_xpos(&self, site: SiteId) -> Vec3 {
        let hand = self.body_pos[HAND];
        let button = self.body_pos[BUTTON];
        match site.0 {
            RIGHT_END_EFFECTOR => hand + Vec3::new(self.qpos[FINGER_R_JOINT], 0.0, -FINGER_DROP),
            LEFT_END_EFFECTOR => hand + Vec3::new(self.qpos[FINGER_L_JOINT], 0.0, -FINGER_DROP),
            BUTTON_START => button + Vec3::z() * (BUTTON_TOP - self.qpos[BUTTON_JOINT]),
            // HOLE, the only other handle `site_id` hands out
            _ => button + Vec3::z() * HOLE_OFFSET,
        }
    }

    fn body_xpos(&self, body: BodyId) -> Vec3 {
        self.body_pos[body.0]
    }

    fn set_body_pos(&mut self, body: BodyId, pos: Vec3) {
        self.body_pos[body.0] = pos;
    }

    fn mocap_pos(&self, _mocap: MocapId) -> Vec3 {
        self.mocap_pos
    }

    fn set_mocap_pos(&mut self, _mocap: MocapId, pos: Vec3) {
        self.mocap_pos = pos;
    }

    fn set_mocap_quat(&mut self, _mocap: MocapId, quat: Quat) {
        self.mocap_quat = quat;
    }

    fn qpos(&self) -> &[f32] {
        &self.qpos
    }

    fn qvel(&self) -> &[f32] {
        &self.qvel
    }

    fn set_state(&mut self, qpos: &[f32], qvel: &[f32]) -> Result<()> {
        for v in [qpos, qvel] {
            if v.len() != NQ {
                return Err(ButtonPressError::StateShape {
                    expected: NQ,
                    got: v.len(),
                }
                .into());
            }
        }
        self.qpos.copy_from_slice(qpos);
        self.qvel.copy_from_slice(qvel);
        Ok(())
    }

    fn set_ctrl(&mut self, ctrl: &[f32]) {
        for (c, v) in self.ctrl.iter_mut().zip(ctrl.iter()) {
            *c = *v;
        }
    }

    fn step(&mut self, n_frames: usize) {
        for _ in 0..n_frames {
            self.tick();
        }
    }
}
