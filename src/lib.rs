// src/lib.rs

pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod utils;

pub use config::WalkParameters;
pub use document::{HostScene, SceneDocument};
pub use editor::{BatchGenerator, PathBatch, PathWalker, RandomWalkOperator};
pub use error::{GeneratorError, SceneError};
