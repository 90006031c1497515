//! Domain model for tasks and goals.
//!
//! # Responsibility
//! - Define the canonical task and goal records used by core business logic.
//! - Keep the weak task→goal relation as a nullable identifier, never a
//!   back-pointer.
//!
//! # Invariants
//! - Every record is identified by a stable client-generated UUID.
//! - Deletion is hard delete by identifier; there are no tombstones.

use chrono::{DateTime, Utc};

pub mod goal;
pub mod task;

/// Clamps a timestamp to millisecond precision.
///
/// Storage and the wire format carry milliseconds; generating timestamps at
/// the same precision keeps read-back records field-for-field equal.
pub(crate) fn truncate_to_millis(value: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(value.timestamp_millis()).unwrap_or(value)
}
