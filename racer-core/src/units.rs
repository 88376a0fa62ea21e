//! Type-safe wrappers for simulation units
//!
//! Newtype wrappers around f64 so headings, durations and progress values
//! cannot be mixed up with raw speeds or coordinates.
//!
//! All unit types serialize with 4 decimal places to reduce JSON payload size.

use serde::{Deserialize, Serialize};

/// Round f64 to 4 decimal places for compact JSON serialization
fn round4<S: serde::Serializer>(val: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64((*val * 10000.0).round() / 10000.0)
}

/// Heading in degrees (0 = up, clockwise positive, unbounded)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Degrees(#[serde(serialize_with = "round4")] pub f64);

impl Degrees {
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }
}

/// Seconds (race clock, final times)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Seconds(#[serde(serialize_with = "round4")] pub f64);

/// Lap progress in percent, always within [0, 100)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Percent(#[serde(serialize_with = "round4")] pub f64);

impl Percent {
    /// Wrap a raw percentage into [0, 100)
    pub fn wrapped(value: f64) -> Self {
        let v = value.rem_euclid(100.0);
        // rem_euclid can round up to exactly 100.0 for tiny negative inputs
        if v >= 100.0 {
            Self(0.0)
        } else {
            Self(v)
        }
    }
}
