// src/document/host.rs

use std::fmt;

use crate::error::SceneError;
use crate::utils::geometry::Vector3;

/// Opaque reference to an object owned by the host scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle(pub u64);

/// Opaque reference to a grouping object (an empty with no geometry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerHandle(pub u64);

impl ContainerHandle {
    /// The container seen as a plain scene object, e.g. for selection.
    pub fn as_object(&self) -> ObjectHandle {
        ObjectHandle(self.0)
    }
}

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for ContainerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The scene operations the generator needs from its host.
///
/// The host owns every object; the generator only ever holds handles.
/// How a path object is drawn (bevel, resolution, material) is entirely up
/// to the implementation of [`HostScene::create_path_object`].
pub trait HostScene {
    fn find_container(&self, name: &str) -> Option<ContainerHandle>;

    fn create_container(&mut self, name: &str) -> Result<ContainerHandle, SceneError>;

    fn list_children(&self, container: ContainerHandle) -> Result<Vec<ObjectHandle>, SceneError>;

    fn delete_objects(&mut self, objects: &[ObjectHandle]) -> Result<(), SceneError>;

    fn create_path_object(&mut self, points: &[Vector3], label: &str) -> Result<ObjectHandle, SceneError>;

    fn set_parent(&mut self, child: ObjectHandle, parent: ContainerHandle) -> Result<(), SceneError>;

    // Selection is cosmetic, so headless hosts may ignore it.
    fn select(&mut self, _object: ObjectHandle) {}

    fn deselect_all(&mut self) {}

    fn set_active(&mut self, _object: ObjectHandle) {}
}
