//! Base implementation of records.
use crate::error::XyzError;
use std::collections::{hash_map::Iter, HashMap};

/// Represents possible types of values that can be stored in a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// A single floating-point value.
    Scalar(f32),

    /// A 1-dimensional array of floating-point values, e.g. a position.
    Array1(Vec<f32>),
}

/// A container for storing key-value pairs of various data types.
///
/// ```rust
/// use xyz_core::record::{Record, RecordValue};
///
/// let mut record = Record::from_scalar("epRew", -0.28);
/// record.insert("success", RecordValue::Scalar(0.0));
/// assert_eq!(record.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record containing a single scalar value.
    pub fn from_scalar(name: impl Into<String>, value: f32) -> Self {
        Self(HashMap::from([(name.into(), RecordValue::Scalar(value))]))
    }

    /// Creates a record from a slice of key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Inserts a key-value pair into the record.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Returns an iterator over the key-value pairs in the record.
    pub fn iter(&self) -> Iter<'_, String, RecordValue> {
        self.0.iter()
    }

    /// Gets a reference to the value associated with the given key.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Gets a scalar value from the record.
    pub fn get_scalar(&self, k: &str) -> Result<f32, XyzError> {
        match self.0.get(k) {
            Some(RecordValue::Scalar(v)) => Ok(*v),
            Some(_) => Err(XyzError::RecordValueTypeError("Scalar".to_string())),
            None => Err(XyzError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets a 1-dimensional array from the record.
    pub fn get_array1(&self, k: &str) -> Result<Vec<f32>, XyzError> {
        match self.0.get(k) {
            Some(RecordValue::Array1(v)) => Ok(v.clone()),
            Some(_) => Err(XyzError::RecordValueTypeError("Array1".to_string())),
            None => Err(XyzError::RecordKeyError(k.to_string())),
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if the record is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_getters() {
        let record = Record::from_slice(&[
            ("reachDist", RecordValue::Scalar(0.5)),
            ("goal", RecordValue::Array1(vec![0.0, 0.88, 0.1])),
        ]);

        assert_eq!(record.get_scalar("reachDist"), Ok(0.5));
        assert_eq!(record.get_array1("goal"), Ok(vec![0.0, 0.88, 0.1]));
        assert_eq!(
            record.get_array1("reachDist"),
            Err(XyzError::RecordValueTypeError("Array1".to_string()))
        );
        assert_eq!(
            record.get_scalar("goal"),
            Err(XyzError::RecordValueTypeError("Scalar".to_string()))
        );
        assert_eq!(
            record.get_scalar("missing"),
            Err(XyzError::RecordKeyError("missing".to_string()))
        );
    }
}
