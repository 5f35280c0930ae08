//! Types and traits for recording diagnostics of environment steps.
//!
//! * [`Record`] - A container of key-value pairs of various data types
//! * [`RecordValue`] - Types of values that can be stored
//! * [`Recorder`] - Destination of records
//! * [`BufferedRecorder`] - A recorder that keeps records in memory
//! * [`NullRecorder`] - A recorder that discards all records
//!
//! ```rust
//! use xyz_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("reachDist", RecordValue::Scalar(0.28));
//! record.insert("goal", RecordValue::Array1(vec![0.0, 0.88, 0.1]));
//! assert_eq!(record.get_scalar("reachDist").unwrap(), 0.28);
//! ```
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
