//! Interface to the physics simulator.
use crate::error::ButtonPressError;
use anyhow::Result;
use nalgebra::{UnitQuaternion, Vector3};
use std::path::Path;

/// A 3D position.
pub type Vec3 = Vector3<f32>;

/// An orientation.
pub type Quat = UnitQuaternion<f32>;

/// Handle of a site, a named reference point on the scene geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteId(pub(crate) usize);

/// Handle of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyId(pub(crate) usize);

/// Handle of a mocap body, the target pose the end-effector tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MocapId(pub(crate) usize);

/// A stepped physics simulator holding a loaded scene.
///
/// Names are resolved to handles once, see [`SceneHandles`]; all other
/// accessors take handles. Handles are only minted by the simulators of this
/// crate, so an accessor never sees one it did not hand out.
pub trait Simulator {
    /// Loads the scene description at `path`.
    fn load(path: &Path) -> Result<Self>
    where
        Self: Sized;

    /// Resolves a site name.
    fn site_id(&self, name: &str) -> Option<SiteId>;

    /// Resolves a body name.
    fn body_id(&self, name: &str) -> Option<BodyId>;

    /// Resolves a mocap body name.
    fn mocap_id(&self, name: &str) -> Option<MocapId>;

    /// World position of a site.
    fn site_xpos(&self, site: SiteId) -> Vec3;

    /// World position of a body.
    fn body_xpos(&self, body: BodyId) -> Vec3;

    /// Places a body in the scene.
    fn set_body_pos(&mut self, body: BodyId, pos: Vec3);

    /// Position of a mocap target.
    fn mocap_pos(&self, mocap: MocapId) -> Vec3;

    /// Moves a mocap target.
    fn set_mocap_pos(&mut self, mocap: MocapId, pos: Vec3);

    /// Orients a mocap target.
    fn set_mocap_quat(&mut self, mocap: MocapId, quat: Quat);

    /// Joint positions.
    fn qpos(&self) -> &[f32];

    /// Joint velocities.
    fn qvel(&self) -> &[f32];

    /// Overwrites joint positions and velocities.
    fn set_state(&mut self, qpos: &[f32], qvel: &[f32]) -> Result<()>;

    /// Sets actuator controls.
    fn set_ctrl(&mut self, ctrl: &[f32]);

    /// Advances the simulation by `n_frames` ticks.
    fn step(&mut self, n_frames: usize);
}

/// Handles of every scene element the button press task touches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneHandles {
    /// Right fingertip.
    pub right_end_effector: SiteId,
    /// Left fingertip.
    pub left_end_effector: SiteId,
    /// Pressable surface of the button.
    pub button_start: SiteId,
    /// Bottom of the button's travel.
    pub hole: SiteId,
    /// End-effector body.
    pub hand: BodyId,
    /// Box the button is mounted on.
    pub box_body: BodyId,
    /// Button body.
    pub button: BodyId,
    /// Mocap target of the end-effector.
    pub mocap: MocapId,
}

impl SceneHandles {
    /// Resolves all names against the scene of `sim`.
    pub fn resolve<S: Simulator>(sim: &S) -> Result<Self, ButtonPressError> {
        let site = |name: &str| {
            sim.site_id(name)
                .ok_or_else(|| ButtonPressError::MissingSite(name.to_string()))
        };
        let body = |name: &str| {
            sim.body_id(name)
                .ok_or_else(|| ButtonPressError::MissingBody(name.to_string()))
        };

        Ok(Self {
            right_end_effector: site("rightEndEffector")?,
            left_end_effector: site("leftEndEffector")?,
            button_start: site("buttonStart")?,
            hole: site("hole")?,
            hand: body("hand")?,
            box_body: body("box")?,
            button: body("button")?,
            mocap: sim
                .mocap_id("mocap")
                .ok_or_else(|| ButtonPressError::MissingMocap("mocap".to_string()))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KinematicSim;

    #[test]
    fn test_resolve_scene_handles() -> Result<()> {
        let sim = KinematicSim::button_press_topdown_wall();
        let handles = SceneHandles::resolve(&sim)?;
        assert_eq!(handles.hole, SiteId(3));
        assert_eq!(handles.box_body, BodyId(1));
        assert_eq!(handles.mocap, MocapId(0));
        Ok(())
    }
}
