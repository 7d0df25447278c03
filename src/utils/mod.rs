// src/utils/mod.rs
pub mod geometry;
pub mod util;

pub use geometry::{Bounds3, Euler, Vector3};
