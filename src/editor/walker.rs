// src/editor/walker.rs

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::utils::geometry::{Bounds3, Euler, Vector3};

/// Heading every walk starts with.
pub const INITIAL_HEADING: Vector3 = Vector3 { x: 0.0, y: 0.0, z: 0.1 };

/// One random walk: an ordered list of points starting at the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    /// Position of this path within its batch.
    pub index: usize,
    pub points: Vec<Vector3>,
}

impl Path {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total polyline length.
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance_to(&pair[1]))
            .sum()
    }

    pub fn bounds(&self) -> Option<Bounds3> {
        let (first, rest) = self.points.split_first()?;
        let mut bounds = Bounds3::around(*first);
        for p in rest {
            bounds.include(p);
        }
        Some(bounds)
    }
}

/// Generates a single random walk from a caller-seeded random source.
///
/// The walker keeps no state of its own between calls; everything that
/// carries over from one path to the next lives in the random source.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathWalker;

impl PathWalker {
    pub fn new() -> Self {
        PathWalker
    }

    /// Walks `path_length` points (at least one).
    ///
    /// Each step draws three angles in X, Y, Z order, rotates the heading by
    /// them and moves by the rotated heading. The heading length never
    /// changes, so every step is 0.1 long.
    pub fn walk<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        path_length: usize,
        min_wander: f64,
        max_wander: f64,
    ) -> Vec<Vector3> {
        let path_length = path_length.max(1);

        let mut points = Vec::with_capacity(path_length);
        let mut position = Vector3::ZERO;
        let mut heading = INITIAL_HEADING;
        points.push(position);

        for _ in 1..path_length {
            let x = random_range(rng, min_wander, max_wander);
            let y = random_range(rng, min_wander, max_wander);
            let z = random_range(rng, min_wander, max_wander);
            heading.rotate(&Euler::new(x, y, z));
            position += heading;
            points.push(position);
        }

        points
    }
}

/// `min + u * (max - min)` for a uniform `u` in `[0, 1)`.
///
/// `min > max` is allowed and simply runs the range backwards.
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    let u: f64 = rng.random();
    min + u * (max - min)
}
