//! Observation and action of the button press task.
use crate::sim::Vec3;
use xyz_core::{Act, Obs};

/// Hand position followed by the position of the button's pressable surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonPressObs([f32; 6]);

impl ButtonPressObs {
    /// Number of elements.
    pub const DIM: usize = 6;

    /// Constructs an observation from the hand and button positions.
    pub fn new(hand: Vec3, obj_pos: Vec3) -> Self {
        Self([hand.x, hand.y, hand.z, obj_pos.x, obj_pos.y, obj_pos.z])
    }

    /// End-effector position.
    pub fn hand(&self) -> Vec3 {
        Vec3::new(self.0[0], self.0[1], self.0[2])
    }

    /// Position of the button's pressable surface.
    pub fn obj_pos(&self) -> Vec3 {
        Vec3::new(self.0[3], self.0[4], self.0[5])
    }

    /// Flat view.
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

impl Obs for ButtonPressObs {
    fn len(&self) -> usize {
        Self::DIM
    }
}

impl From<ButtonPressObs> for Vec<f32> {
    fn from(obs: ButtonPressObs) -> Self {
        obs.0.to_vec()
    }
}

/// Goal-conditioned view of an observation.
#[derive(Debug, Clone, PartialEq)]
pub struct ObsDict {
    /// The flat observation.
    pub state_observation: Vec<f32>,

    /// Where the button should end up.
    pub state_desired_goal: Vec3,

    /// Where the button is.
    pub state_achieved_goal: Vec3,
}

/// Hand displacement `[dx, dy, dz]` followed by a gripper command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonPressAct([f32; 4]);

impl ButtonPressAct {
    /// Constructs an action.
    pub fn new(a: [f32; 4]) -> Self {
        Self(a)
    }

    /// Cartesian displacement of the hand.
    pub fn xyz(&self) -> Vec3 {
        Vec3::new(self.0[0], self.0[1], self.0[2])
    }

    /// Gripper command.
    pub fn gripper(&self) -> f32 {
        self.0[3]
    }

    /// Flat view.
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

impl Act for ButtonPressAct {
    fn len(&self) -> usize {
        4
    }
}

impl From<[f32; 4]> for ButtonPressAct {
    fn from(a: [f32; 4]) -> Self {
        Self(a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_views() {
        let obs = ButtonPressObs::new(Vec3::new(0.0, 0.6, 0.2), Vec3::new(0.0, 0.88, 0.2));
        assert_eq!(obs.as_slice(), &[0.0, 0.6, 0.2, 0.0, 0.88, 0.2]);
        assert_eq!(obs.obj_pos(), Vec3::new(0.0, 0.88, 0.2));

        let act = ButtonPressAct::from([0.1, -0.2, 0.3, 1.0]);
        assert_eq!(act.xyz(), Vec3::new(0.1, -0.2, 0.3));
        assert_eq!(act.gripper(), 1.0);
    }
}
