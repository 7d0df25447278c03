// src/config.rs

use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::GeneratorError;
use crate::utils::util::clamp_checked;

pub const SEED_RANGE: RangeInclusive<u32> = 0..=999_999;
pub const CURVE_COUNT_RANGE: RangeInclusive<u32> = 1..=1024;
pub const PATH_LENGTH_RANGE: RangeInclusive<u32> = 1..=1024;
pub const WANDER_RANGE: RangeInclusive<f64> = -9999.0..=9999.0;

/// Parameters for one generation run.
///
/// Values read from a file or the command line may be out of range; call
/// [`WalkParameters::clamped`] before generating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkParameters {
    /// Selects the deterministic pseudo-random stream.
    pub seed: u32,
    /// Number of independent paths in the batch.
    pub curve_count: u32,
    /// Number of points per path.
    pub path_length: u32,
    /// Lower bound of each per-axis rotation, in radians.
    pub min_wander: f64,
    /// Upper bound of each per-axis rotation, in radians.
    pub max_wander: f64,
}

impl Default for WalkParameters {
    fn default() -> Self {
        Self {
            seed: 0,
            curve_count: 30,
            path_length: 128,
            min_wander: 0.1,
            max_wander: 2.0,
        }
    }
}

impl WalkParameters {
    pub fn from_json_str(json: &str) -> Result<Self, GeneratorError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads parameters from a JSON file. Missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, GeneratorError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Returns a copy with every field clamped into its declared range.
    ///
    /// The wander bounds are clamped independently; `min_wander > max_wander`
    /// is left alone. A non-finite wander value falls back to its default.
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();

        let (seed, seed_moved) = clamp_checked(self.seed, *SEED_RANGE.start(), *SEED_RANGE.end());
        let (curve_count, count_moved) = clamp_checked(
            self.curve_count,
            *CURVE_COUNT_RANGE.start(),
            *CURVE_COUNT_RANGE.end(),
        );
        let (path_length, length_moved) = clamp_checked(
            self.path_length,
            *PATH_LENGTH_RANGE.start(),
            *PATH_LENGTH_RANGE.end(),
        );
        let (min_wander, min_moved) = clamp_wander(self.min_wander, defaults.min_wander);
        let (max_wander, max_moved) = clamp_wander(self.max_wander, defaults.max_wander);

        if seed_moved || count_moved || length_moved || min_moved || max_moved {
            warn!("Walk parameters clamped into range: {:?} -> seed={}, curves={}, length={}, wander={}..{}",
                self, seed, curve_count, path_length, min_wander, max_wander);
        }

        Self {
            seed,
            curve_count,
            path_length,
            min_wander,
            max_wander,
        }
    }
}

fn clamp_wander(value: f64, fallback: f64) -> (f64, bool) {
    if !value.is_finite() {
        return (fallback, true);
    }
    clamp_checked(value, *WANDER_RANGE.start(), *WANDER_RANGE.end())
}
