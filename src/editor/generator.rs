// src/editor/generator.rs

use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::WalkParameters;
use crate::document::host::{ContainerHandle, HostScene, ObjectHandle};
use crate::editor::walker::{Path, PathWalker};
use crate::error::SceneError;
use crate::utils::geometry::Bounds3;

/// Prefix of every generated curve's label; the path index follows it.
pub const CURVE_LABEL_PREFIX: &str = "random-walking-curve-";

pub fn curve_label(index: usize) -> String {
    format!("{}{}", CURVE_LABEL_PREFIX, index)
}

/// The random source a batch draws from. Same seed, same stream, on every
/// platform and release.
pub fn seeded_rng(seed: u32) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(u64::from(seed))
}

/// Every path produced by one `generate` call, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathBatch {
    pub seed: u32,
    pub paths: Vec<Path>,
}

impl PathBatch {
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.paths.iter().map(Path::len).sum()
    }

    /// Bounding box over every point of every path.
    pub fn bounds(&self) -> Option<Bounds3> {
        self.paths
            .iter()
            .filter_map(Path::bounds)
            .reduce(|mut acc, b| {
                acc.include(&b.min);
                acc.include(&b.max);
                acc
            })
    }
}

/// What a regenerate left behind in the scene.
#[derive(Debug, Clone)]
pub struct Regeneration {
    pub container: ContainerHandle,
    /// Whether the container already existed and was reused.
    pub reused_container: bool,
    /// Objects deleted from the previous batch.
    pub removed: usize,
    /// New path objects, in path order.
    pub objects: Vec<ObjectHandle>,
    pub batch: PathBatch,
}

/// Turns walk parameters into batches of paths and swaps them into a scene.
///
/// Holds no state between calls; anything that survives a regenerate lives
/// in the host scene.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchGenerator {
    walker: PathWalker,
}

impl BatchGenerator {
    pub fn new() -> Self {
        BatchGenerator {
            walker: PathWalker::new(),
        }
    }

    /// Generates `curve_count` paths from one stream seeded with `seed`.
    ///
    /// Parameters are clamped into range first. The stream is not re-seeded
    /// between paths: path `i` starts where path `i - 1` stopped drawing. Changing `curve_count` therefore leaves the
    /// leading paths untouched and only adds or removes trailing ones.
    pub fn generate(&self, params: &WalkParameters) -> PathBatch {
        let params = params.clamped();
        let mut rng = seeded_rng(params.seed);
        let path_length = params.path_length as usize;

        let paths = (0..params.curve_count as usize)
            .map(|index| Path {
                index,
                points: self
                    .walker
                    .walk(&mut rng, path_length, params.min_wander, params.max_wander),
            })
            .collect();

        PathBatch {
            seed: params.seed,
            paths,
        }
    }

    /// Replaces the batch grouped under `name` with a freshly generated one.
    ///
    /// An existing container is kept and only its children are deleted;
    /// otherwise a new container is created. Host failures are returned as
    /// they are, and whatever was already deleted or created stays that way.
    pub fn regenerate<S: HostScene + ?Sized>(
        &self,
        scene: &mut S,
        name: &str,
        params: &WalkParameters,
    ) -> Result<Regeneration, SceneError> {
        let params = &params.clamped();
        info!(
            "Regenerating '{}' (seed {}, {} curves x {} points)",
            name, params.seed, params.curve_count, params.path_length
        );

        let (container, reused_container, removed) = match scene.find_container(name) {
            Some(container) => {
                let children = scene.list_children(container)?;
                debug!("Reusing container '{}' {}, removing {} children", name, container, children.len());
                scene.delete_objects(&children)?;
                (container, true, children.len())
            }
            None => {
                let container = scene.create_container(name)?;
                debug!("Created container '{}' {}", name, container);
                (container, false, 0)
            }
        };

        let batch = self.generate(params);
        let mut objects = Vec::with_capacity(batch.len());
        for path in &batch.paths {
            let label = curve_label(path.index);
            let object = scene.create_path_object(&path.points, &label)?;
            scene.set_parent(object, container)?;
            debug!("Created '{}' {} with {} points", label, object, path.len());
            objects.push(object);
        }

        info!("Regenerated '{}': {} removed, {} created", name, removed, objects.len());
        Ok(Regeneration {
            container,
            reused_container,
            removed,
            objects,
            batch,
        })
    }
}
