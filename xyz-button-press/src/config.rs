//! Configuration of [`ButtonPressTask`](crate::ButtonPressTask).
use crate::sim::{Quat, Vec3};
use anyhow::Result;
use nalgebra::Quaternion;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

/// Configuration of [`ButtonPressTask`](crate::ButtonPressTask).
///
/// The default values describe the top-down button press behind a wall.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
#[serde(default)]
pub struct ButtonPressConfig {
    /// Directory the scene description is resolved against.
    pub asset_root: PathBuf,

    /// Scene description, relative to `asset_root`.
    pub model_name: String,

    /// Lower corner of the hand workspace. The goal space is the same box.
    pub hand_low: Vec3,

    /// Upper corner of the hand workspace.
    pub hand_high: Vec3,

    /// Lower corner of the object placement space.
    pub obj_low: Vec3,

    /// Upper corner of the object placement space.
    pub obj_high: Vec3,

    /// Position of the box when random initialization is disabled.
    pub obj_init_pos: Vec3,

    /// Position the hand is brought to at reset.
    pub hand_init_pos: Vec3,

    /// Orientation of the hand, normalized on use. Serialized as
    /// `[x, y, z, w]`.
    pub hand_init_quat: Quaternion<f32>,

    /// Staging position of the button.
    pub goal: Vec3,

    /// Hand displacement per unit action.
    pub action_scale: f32,

    /// Simulator ticks per control step.
    pub frame_skip: usize,

    /// Control steps used to bring the hand to `hand_init_pos` at reset.
    pub reset_hand_iters: usize,

    /// Episode length used by harnesses. Not enforced by the task.
    pub max_path_length: usize,

    /// Samples the box position from the object space at reset.
    pub random_init: bool,

    /// Offset of the button from a sampled box position.
    pub button_offset: Vec3,
}

impl Default for ButtonPressConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("assets"),
            model_name: "sawyer_xyz/sawyer_button_press_topdown_wall.xml".to_string(),
            hand_low: Vec3::new(-0.5, 0.40, 0.05),
            hand_high: Vec3::new(0.5, 1.0, 0.5),
            obj_low: Vec3::new(-0.05, 0.8, 0.05),
            obj_high: Vec3::new(0.05, 0.9, 0.05),
            obj_init_pos: Vec3::new(0.0, 0.8, 0.05),
            hand_init_pos: Vec3::new(0.0, 0.6, 0.2),
            hand_init_quat: Quaternion::new(1.0, 0.0, 1.0, 0.0),
            goal: Vec3::new(0.0, 0.88, 0.1),
            action_scale: 1.0 / 100.0,
            frame_skip: 5,
            reset_hand_iters: 10,
            max_path_length: 150,
            random_init: false,
            button_offset: Vec3::new(0.0, 0.08, 0.07),
        }
    }
}

impl ButtonPressConfig {
    /// Orientation the hand is held at.
    pub fn hand_init_orientation(&self) -> Quat {
        Quat::from_quaternion(self.hand_init_quat)
    }

    /// Path of the scene description.
    pub fn model_path(&self) -> PathBuf {
        self.asset_root.join(&self.model_name)
    }

    /// Sets the directory the scene description is resolved against.
    pub fn asset_root(mut self, v: impl Into<PathBuf>) -> Self {
        self.asset_root = v.into();
        self
    }

    /// Sets the initial position of the box.
    pub fn obj_init_pos(mut self, v: Vec3) -> Self {
        self.obj_init_pos = v;
        self
    }

    /// Sets the position the hand is brought to at reset.
    pub fn hand_init_pos(mut self, v: Vec3) -> Self {
        self.hand_init_pos = v;
        self
    }

    /// Sets the staging position of the button.
    pub fn goal(mut self, v: Vec3) -> Self {
        self.goal = v;
        self
    }

    /// Sets the number of simulator ticks per control step.
    pub fn frame_skip(mut self, v: usize) -> Self {
        self.frame_skip = v;
        self
    }

    /// Sets the episode length used by harnesses.
    pub fn max_path_length(mut self, v: usize) -> Self {
        self.max_path_length = v;
        self
    }

    /// Enables or disables random placement of the box and button.
    pub fn random_init(mut self, v: bool) -> Self {
        self.random_init = v;
        self
    }

    /// Constructs [`ButtonPressConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`ButtonPressConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_serde_button_press_config() -> Result<()> {
        let config = ButtonPressConfig::default()
            .asset_root("/opt/metaworld/assets")
            .random_init(true)
            .max_path_length(200);

        let dir = TempDir::new("button_press_config")?;
        let path = dir.path().join("button_press.yaml");
        config.save(&path)?;
        let config_ = ButtonPressConfig::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }

    #[test]
    fn test_missing_fields_take_defaults() -> Result<()> {
        let config: ButtonPressConfig = serde_yaml::from_str("random_init: true\nframe_skip: 2\n")?;
        assert!(config.random_init);
        assert_eq!(config.frame_skip, 2);
        assert_eq!(config.goal, Vec3::new(0.0, 0.88, 0.1));
        assert_eq!(
            config.model_path(),
            PathBuf::from("assets/sawyer_xyz/sawyer_button_press_topdown_wall.xml")
        );
        Ok(())
    }

    #[test]
    fn test_vectors_are_plain_sequences() -> Result<()> {
        let config: ButtonPressConfig =
            serde_yaml::from_str("goal: [0.01, 0.85, 0.1]\nhand_init_quat: [0.0, 0.0, 0.0, 2.0]\n")?;
        assert_eq!(config.goal, Vec3::new(0.01, 0.85, 0.1));
        assert_eq!(config.hand_init_orientation(), Quat::identity());
        Ok(())
    }

    #[test]
    fn test_default_orientation_is_normalized() {
        let q = ButtonPressConfig::default().hand_init_orientation();
        let h = std::f32::consts::FRAC_1_SQRT_2;
        assert!((q.w - h).abs() < 1e-6);
        assert!((q.j - h).abs() < 1e-6);
        assert_eq!(q.i, 0.0);
        assert_eq!(q.k, 0.0);
    }
}
