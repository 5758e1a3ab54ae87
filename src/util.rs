//! Miscellaneous utility structs and functions.

use std::fmt::Debug;

use cgmath::num_traits::Float;
use serde::{Deserialize, Serialize};

/// An interval on the real number line.
#[derive(Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval<T> {
    pub min: T,
    pub max: T,
}

impl<T> Interval<T> {
    /// Creates a new interval.
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: std::cmp::PartialOrd> Interval<T> {
    /// Returns true if this interval overlaps with the other.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.max > other.min && other.max > self.min
    }
}

impl<T: Float> Interval<T> {
    /// Returns true if the whole interval lies at or below `value`.
    pub fn below(&self, value: T) -> bool {
        self.max <= value
    }

    /// Returns true if the whole interval lies at or above `value`.
    pub fn above(&self, value: T) -> bool {
        self.min >= value
    }
}

impl<T: Debug> Debug for Interval<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Interval({:?}, {:?})", &self.min, &self.max)
    }
}

/// Converts a speed in km/h to m/s.
pub fn kph(speed: f64) -> f64 {
    speed * 1000.0 / 3600.0
}
