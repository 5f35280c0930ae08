//! Axis-aligned box spaces.
use crate::error::XyzError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An axis-aligned box `[low, high]` in `R^n`.
///
/// Spaces describe valid ranges of actions, observations and positions.
/// Bounds are inclusive and a dimension may be degenerate (`low == high`).
/// Deserialization goes through [`BoxSpace::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Bounds")]
pub struct BoxSpace {
    low: Vec<f32>,
    high: Vec<f32>,
}

#[derive(Deserialize)]
struct Bounds {
    low: Vec<f32>,
    high: Vec<f32>,
}

impl TryFrom<Bounds> for BoxSpace {
    type Error = XyzError;

    fn try_from(b: Bounds) -> Result<Self, Self::Error> {
        Self::new(b.low, b.high)
    }
}

impl BoxSpace {
    /// Constructs a space from its lower and upper bounds.
    pub fn new(low: Vec<f32>, high: Vec<f32>) -> Result<Self, XyzError> {
        if low.len() != high.len() {
            return Err(XyzError::SpaceShape {
                low: low.len(),
                high: high.len(),
            });
        }
        if let Some(ix) = low.iter().zip(high.iter()).position(|(l, h)| l > h) {
            return Err(XyzError::InvalidBounds(ix));
        }
        Ok(Self { low, high })
    }

    /// Constructs the cube `[low, high]^dim`.
    pub fn uniform(dim: usize, low: f32, high: f32) -> Result<Self, XyzError> {
        Self::new(vec![low; dim], vec![high; dim])
    }

    /// Lower bound.
    pub fn low(&self) -> &[f32] {
        &self.low
    }

    /// Upper bound.
    pub fn high(&self) -> &[f32] {
        &self.high
    }

    /// Number of dimensions.
    pub fn dim(&self) -> usize {
        self.low.len()
    }

    /// Returns `true` if `x` has the dimension of the space and lies inside it.
    pub fn contains(&self, x: &[f32]) -> bool {
        x.len() == self.dim()
            && x
                .iter()
                .zip(self.low.iter().zip(self.high.iter()))
                .all(|(v, (l, h))| l <= v && v <= h)
    }

    /// Checks that a named value lies inside the space.
    pub fn check(&self, name: &str, x: &[f32]) -> Result<(), XyzError> {
        if x.len() != self.dim() {
            return Err(XyzError::DimensionMismatch {
                expected: self.dim(),
                got: x.len(),
            });
        }
        if !self.contains(x) {
            return Err(XyzError::OutOfBounds {
                name: name.to_string(),
                value: x.to_vec(),
                low: self.low.clone(),
                high: self.high.clone(),
            });
        }
        Ok(())
    }

    /// Clamps each element of `x` into the space.
    ///
    /// Elements beyond the dimension of the space are dropped.
    pub fn clip(&self, x: &[f32]) -> Vec<f32> {
        x.iter()
            .zip(self.low.iter().zip(self.high.iter()))
            .map(|(v, (l, h))| v.clamp(*l, *h))
            .collect()
    }

    /// Samples a point uniformly from the space.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f32> {
        self.low
            .iter()
            .zip(self.high.iter())
            .map(|(l, h)| rng.gen_range(*l..=*h))
            .collect()
    }

    /// Concatenates two spaces, `self` first.
    pub fn concat(&self, other: &BoxSpace) -> BoxSpace {
        BoxSpace {
            low: [self.low.as_slice(), other.low.as_slice()].concat(),
            high: [self.high.as_slice(), other.high.as_slice()].concat(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_new_rejects_bad_bounds() {
        assert_eq!(
            BoxSpace::new(vec![0.0, 0.0], vec![1.0]),
            Err(XyzError::SpaceShape { low: 2, high: 1 })
        );
        assert_eq!(
            BoxSpace::new(vec![0.0, 2.0], vec![1.0, 1.0]),
            Err(XyzError::InvalidBounds(1))
        );
    }

    #[test]
    fn test_contains_and_check() {
        let space = BoxSpace::new(vec![-0.05, 0.8, 0.05], vec![0.05, 0.9, 0.05]).unwrap();
        assert!(space.contains(&[0.0, 0.8, 0.05]));
        assert!(!space.contains(&[0.0, 0.8, 0.06]));
        assert!(!space.contains(&[0.0, 0.8]));
        assert!(space.check("obj_init_pos", &[0.0, 0.85, 0.05]).is_ok());
        assert!(matches!(
            space.check("obj_init_pos", &[0.1, 0.85, 0.05]),
            Err(XyzError::OutOfBounds { .. })
        ));
        assert_eq!(
            space.check("obj_init_pos", &[0.0]),
            Err(XyzError::DimensionMismatch {
                expected: 3,
                got: 1
            })
        );
    }

    #[test]
    fn test_sample_stays_inside_degenerate_space() {
        let space = BoxSpace::new(vec![-0.05, 0.8, 0.05], vec![0.05, 0.9, 0.05]).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let x = space.sample(&mut rng);
            assert!(space.contains(&x));
            assert_eq!(x[2], 0.05);
        }
    }

    #[test]
    fn test_clip_and_concat() {
        let act = BoxSpace::uniform(4, -1.0, 1.0).unwrap();
        assert_eq!(act.clip(&[2.0, -3.0, 0.5, 1.0]), vec![1.0, -1.0, 0.5, 1.0]);

        let hand = BoxSpace::new(vec![-0.5, 0.4, 0.05], vec![0.5, 1.0, 0.5]).unwrap();
        let obj = BoxSpace::new(vec![-0.05, 0.8, 0.05], vec![0.05, 0.9, 0.05]).unwrap();
        let obs = hand.concat(&obj);
        assert_eq!(obs.dim(), 6);
        assert_eq!(obs.low(), &[-0.5, 0.4, 0.05, -0.05, 0.8, 0.05]);
        assert_eq!(obs.high(), &[0.5, 1.0, 0.5, 0.05, 0.9, 0.05]);
    }

    #[test]
    fn test_deserialize_checks_bounds() {
        let space: BoxSpace = serde_yaml::from_str("low: [-1.0, 0.0]\nhigh: [1.0, 0.5]\n").unwrap();
        assert_eq!(space, BoxSpace::new(vec![-1.0, 0.0], vec![1.0, 0.5]).unwrap());
        assert_eq!(space.clip(&[2.0, 0.2]), vec![1.0, 0.2]);

        let err = serde_yaml::from_str::<BoxSpace>("low: [1.0]\nhigh: [0.0]\n").unwrap_err();
        assert!(err.to_string().contains("Lower bound exceeds upper bound at index 0"));
        assert!(serde_yaml::from_str::<BoxSpace>("low: [0.0, 0.0]\nhigh: [1.0]\n").is_err());
    }

    #[test]
    fn test_serialized_space_reads_back() {
        let space = BoxSpace::new(vec![-0.5, 0.4, 0.05], vec![0.5, 1.0, 0.5]).unwrap();
        let yaml = serde_yaml::to_string(&space).unwrap();
        assert_eq!(serde_yaml::from_str::<BoxSpace>(&yaml).unwrap(), space);
    }
}
