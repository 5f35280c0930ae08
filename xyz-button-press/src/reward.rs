//! Shaping reward of the button press task.
//!
//! The reward combines a reach term, `-reachDist`, with a press term that is
//! only granted once the fingertips are within [`REACH_THRESHOLD`] of the
//! button:
//!
//! ```text
//! pressRew = 1000 (maxDist - pressDist)
//!          + c1 (exp(-pressDist^2 / c2) + exp(-pressDist^2 / c3))
//! ```
//!
//! clamped at zero. The reward jumps at the threshold.
use crate::{
    error::ButtonPressError,
    obs::ObsDict,
    sim::Vec3,
};

/// Reach distance below which the press term applies.
pub const REACH_THRESHOLD: f32 = 0.05;

/// Weight of the linear press progress term.
pub const PRESS_SCALE: f32 = 1000.0;

/// Weight of the proximity bonuses.
pub const C1: f32 = 1000.0;

/// Length scale of the coarse proximity bonus.
pub const C2: f32 = 0.01;

/// Length scale of the fine proximity bonus.
pub const C3: f32 = 0.001;

/// Press distance at or below which an episode step counts as a success.
pub const SUCCESS_THRESHOLD: f32 = 0.02;

/// Observation handed to the reward function.
#[derive(Debug, Clone, Copy)]
pub enum RewardInput<'a> {
    /// A flat observation.
    Vector(&'a [f32]),

    /// A goal-conditioned view; its `state_observation` is used.
    Dict(&'a ObsDict),
}

impl<'a> RewardInput<'a> {
    /// The flat observation.
    pub fn state_observation(&self) -> &'a [f32] {
        match *self {
            RewardInput::Vector(v) => v,
            RewardInput::Dict(d) => &d.state_observation,
        }
    }

    /// Position of the tracked site, elements `3..6` of the flat observation.
    pub fn obj_pos(&self) -> Result<Vec3, ButtonPressError> {
        match self.state_observation() {
            [_, _, _, x, y, z, ..] => Ok(Vec3::new(*x, *y, *z)),
            v => Err(ButtonPressError::ObservationShape {
                expected: 6,
                got: v.len(),
            }),
        }
    }
}

/// Reward and the distances it is computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardTerms {
    /// Total reward.
    pub reward: f32,

    /// Distance between the fingertip midpoint and the button surface.
    pub reach_dist: f32,

    /// Height of the button surface above its goal.
    pub press_dist: f32,
}

/// Computes the shaping reward.
///
/// * `obj_pos` - position of the button surface
/// * `finger_com` - midpoint of the fingertips
/// * `press_goal` - height the button surface has to reach
/// * `max_dist` - press distance at the start of the episode
pub fn shaping_reward(obj_pos: Vec3, finger_com: Vec3, press_goal: f32, max_dist: f32) -> RewardTerms {
    let press_dist = (obj_pos.z - press_goal).abs();
    let reach_dist = (obj_pos - finger_com).norm();
    let reach_rew = -reach_dist;

    let press_rew = if reach_dist < REACH_THRESHOLD {
        let d2 = press_dist * press_dist;
        PRESS_SCALE * (max_dist - press_dist) + C1 * ((-d2 / C2).exp() + (-d2 / C3).exp())
    } else {
        0.0
    };
    let press_rew = press_rew.max(0.0);

    RewardTerms {
        reward: reach_rew + press_rew,
        reach_dist,
        press_dist,
    }
}

/// Upper reference of the reward, reached with zero reach and press distances.
pub fn target_reward(max_dist: f32) -> f32 {
    PRESS_SCALE * max_dist + C1 * 2.0
}

/// `1.0` if the button is within [`SUCCESS_THRESHOLD`] of its goal, else `0.0`.
pub fn success(press_dist: f32) -> f32 {
    if press_dist <= SUCCESS_THRESHOLD {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX_DIST: f32 = 0.09;

    #[test]
    fn test_reward_at_goal_equals_target_reward() {
        let p = Vec3::new(0.0, 0.88, 0.11);
        let terms = shaping_reward(p, p, p.z, MAX_DIST);
        assert_eq!(terms.reach_dist, 0.0);
        assert_eq!(terms.press_dist, 0.0);
        assert_eq!(terms.reward, MAX_DIST * 1000.0 + C1 * 2.0);
        assert_eq!(terms.reward, target_reward(MAX_DIST));
    }

    #[test]
    fn test_far_reach_is_pure_penalty() {
        let obj = Vec3::new(0.0, 0.88, 0.2);
        let mut prev = f32::INFINITY;
        for i in 0..20 {
            let finger = Vec3::new(0.05 + 0.01 * i as f32, 0.88, 0.2);
            let terms = shaping_reward(obj, finger, 0.11, MAX_DIST);
            assert!(terms.reach_dist >= REACH_THRESHOLD);
            assert_eq!(terms.reward, -terms.reach_dist);
            assert!(terms.reward <= prev);
            prev = terms.reward;
        }
    }

    #[test]
    fn test_press_term_jumps_at_threshold() {
        let obj = Vec3::new(0.0, 0.88, 0.2);
        let at = shaping_reward(obj, Vec3::new(0.05, 0.88, 0.2), 0.11, MAX_DIST);
        assert_eq!(at.reach_dist, 0.05);
        assert_eq!(at.reward, -0.05);

        let inside = shaping_reward(obj, Vec3::new(0.049, 0.88, 0.2), 0.11, MAX_DIST);
        assert!(inside.reward > 10.0);
    }

    #[test]
    fn test_press_term_is_never_negative() {
        // press distance larger than max_dist makes the linear term negative
        let obj = Vec3::new(0.0, 0.88, 0.5);
        let terms = shaping_reward(obj, obj, 0.11, MAX_DIST);
        assert_eq!(terms.reward, 0.0);
    }

    #[test]
    fn test_success_boundary_is_inclusive() {
        assert_eq!(success(0.0), 1.0);
        assert_eq!(success(0.02), 1.0);
        assert_eq!(success(0.020001), 0.0);
    }

    #[test]
    fn test_vector_and_dict_inputs_agree() {
        let flat = vec![0.0, 0.6, 0.2, 0.0, 0.88, 0.2];
        let dict = ObsDict {
            state_observation: flat.clone(),
            state_desired_goal: Vec3::new(0.0, 0.88, 0.11),
            state_achieved_goal: Vec3::new(0.0, 0.88, 0.2),
        };
        assert_eq!(
            RewardInput::Vector(&flat).obj_pos(),
            RewardInput::Dict(&dict).obj_pos()
        );
        assert_eq!(
            RewardInput::Vector(&flat[..4]).obj_pos(),
            Err(ButtonPressError::ObservationShape {
                expected: 6,
                got: 4
            })
        );
    }
}
