// src/editor/mod.rs

pub mod generator;
pub mod operator;
pub mod walker;

pub use generator::{BatchGenerator, PathBatch, Regeneration};
pub use operator::{OperatorStatus, RandomWalkOperator, DEFAULT_CONTAINER};
pub use walker::{Path, PathWalker};
