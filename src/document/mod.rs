// src/document/mod.rs
mod document;
pub mod export;
pub mod host;

pub use self::document::{
    CurveData, CurveStyle, FillMode, Material, ObjectKind, SceneDocument, SceneObject, SplineKind,
    CURVE_MATERIAL, GENERATED_CURVE_MATERIAL,
};
pub use self::host::{ContainerHandle, HostScene, ObjectHandle};
