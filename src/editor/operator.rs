// src/editor/operator.rs

use log::info;

use crate::config::WalkParameters;
use crate::document::host::HostScene;
use crate::editor::generator::{BatchGenerator, Regeneration};
use crate::error::SceneError;

pub const OPERATOR_ID: &str = "desmarkie_addons.generative";
pub const OPERATOR_LABEL: &str = "Random Walking Splines";
pub const OPERATOR_DESCRIPTION: &str = "Generate splines with a random walk";

/// Name of the grouping object the operator generates into.
pub const DEFAULT_CONTAINER: &str = "RandomWalkingSplines";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorStatus {
    Finished,
}

/// The "generate geometry" action a host menu entry triggers.
#[derive(Debug, Clone)]
pub struct RandomWalkOperator {
    pub params: WalkParameters,
    pub container_name: String,
    generator: BatchGenerator,
}

impl RandomWalkOperator {
    pub fn new(params: WalkParameters) -> Self {
        Self {
            params,
            container_name: DEFAULT_CONTAINER.to_string(),
            generator: BatchGenerator::new(),
        }
    }

    pub fn with_container_name(mut self, name: impl Into<String>) -> Self {
        self.container_name = name.into();
        self
    }

    /// Replaces the operator's batch in `scene`.
    ///
    /// The generator clamps the parameters into range. Afterwards the
    /// container is selected and active, and so is every new curve.
    pub fn execute<S: HostScene + ?Sized>(
        &self,
        scene: &mut S,
    ) -> Result<(OperatorStatus, Regeneration), SceneError> {
        scene.deselect_all();
        let result = self
            .generator
            .regenerate(scene, &self.container_name, &self.params)?;

        scene.select(result.container.as_object());
        scene.set_active(result.container.as_object());
        for object in &result.objects {
            scene.select(*object);
        }

        info!("{} finished: {} curves in '{}'", OPERATOR_LABEL, result.objects.len(), self.container_name);
        Ok((OperatorStatus::Finished, result))
    }
}

impl Default for RandomWalkOperator {
    fn default() -> Self {
        Self::new(WalkParameters::default())
    }
}
