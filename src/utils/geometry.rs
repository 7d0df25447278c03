// src/utils/geometry.rs

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Sub};

/// A point or direction in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn distance_to(&self, other: &Vector3) -> f64 {
        (*self - *other).length()
    }

    /// Rotates this vector in place by `euler`.
    ///
    /// The rotation is applied about the fixed X axis first, then Y, then Z,
    /// which is the matrix `Rz * Ry * Rx` acting on the vector. Rotation never
    /// rescales the vector.
    pub fn rotate(&mut self, euler: &Euler) {
        let (sx, cx) = euler.x.sin_cos();
        let (sy, cy) = euler.y.sin_cos();
        let (sz, cz) = euler.z.sin_cos();

        // X
        let y = self.y * cx - self.z * sx;
        let z = self.y * sx + self.z * cx;
        self.y = y;
        self.z = z;

        // Y
        let x = self.x * cy + self.z * sy;
        let z = self.z * cy - self.x * sy;
        self.x = x;
        self.z = z;

        // Z
        let x = self.x * cz - self.y * sz;
        let y = self.x * sz + self.y * cz;
        self.x = x;
        self.y = y;
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Vector3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Euler angles in radians, applied in XYZ order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Euler {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Euler {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds3 {
    pub min: Vector3,
    pub max: Vector3,
}

impl Bounds3 {
    /// A box holding exactly one point.
    pub fn around(point: Vector3) -> Self {
        Self { min: point, max: point }
    }

    pub fn include(&mut self, point: &Vector3) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }
}
