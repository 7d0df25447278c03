// src/document/document.rs

use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;
use rayon::prelude::*;

use crate::document::host::{ContainerHandle, HostScene, ObjectHandle};
use crate::error::SceneError;
use crate::utils::geometry::Vector3;

/// Material the generated curves pick up when the user has provided one.
pub const CURVE_MATERIAL: &str = "CurveMaterial";
/// Material created for the curves when [`CURVE_MATERIAL`] is missing.
pub const GENERATED_CURVE_MATERIAL: &str = "GeneratedCurveMaterial";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    Full,
    Half,
    Front,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplineKind {
    Nurbs,
    Poly,
}

/// How curve objects are tessellated when the scene is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveStyle {
    pub resolution_u: u32,
    /// Tube radius.
    pub bevel_depth: f64,
    pub bevel_resolution: u32,
    pub fill_mode: FillMode,
    pub spline: SplineKind,
}

impl Default for CurveStyle {
    fn default() -> Self {
        Self {
            resolution_u: 2,
            bevel_depth: 0.01,
            bevel_resolution: 8,
            fill_mode: FillMode::Full,
            spline: SplineKind::Nurbs,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
}

/// Curve data owned by a curve object. Control points are `(x, y, z, w)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveData {
    pub name: String,
    pub style: CurveStyle,
    pub points: Vec<[f64; 4]>,
    /// Index into the document's material list.
    pub material: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    /// A grouping object with no geometry.
    Empty,
    Curve(CurveData),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub id: u64,
    pub name: String,
    pub kind: ObjectKind,
    pub parent: Option<u64>,
    pub selected: bool,
}

impl SceneObject {
    pub fn is_empty_object(&self) -> bool {
        matches!(self.kind, ObjectKind::Empty)
    }

    pub fn curve(&self) -> Option<&CurveData> {
        match &self.kind {
            ObjectKind::Curve(data) => Some(data),
            ObjectKind::Empty => None,
        }
    }
}

/// A headless scene: an arena of objects addressed by id.
pub struct SceneDocument {
    pub objects: Arc<RwLock<BTreeMap<u64, Arc<SceneObject>>>>,
    pub materials: Arc<RwLock<Vec<Arc<Material>>>>,
    pub active: Arc<RwLock<Option<u64>>>,
    next_id: Arc<RwLock<u64>>,
    style: CurveStyle,
}

impl SceneDocument {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            objects: Arc::new(RwLock::new(BTreeMap::new())),
            materials: Arc::new(RwLock::new(Vec::new())),
            active: Arc::new(RwLock::new(None)),
            next_id: Arc::new(RwLock::new(1)),
            style: CurveStyle::default(),
        }
    }

    /// Use `style` for every curve created from now on.
    pub fn with_curve_style(mut self, style: CurveStyle) -> Self {
        self.style = style;
        self
    }

    pub fn curve_style(&self) -> CurveStyle {
        self.style
    }

    // Thread-safe getters.
    pub fn objects(&self) -> Arc<RwLock<BTreeMap<u64, Arc<SceneObject>>>> {
        Arc::clone(&self.objects)
    }
    pub fn materials(&self) -> Arc<RwLock<Vec<Arc<Material>>>> {
        Arc::clone(&self.materials)
    }

    pub fn num_objects(&self) -> usize {
        self.objects.read().len()
    }

    pub fn get(&self, object: ObjectHandle) -> Option<Arc<SceneObject>> {
        self.objects.read().get(&object.0).cloned()
    }

    pub fn find_by_name(&self, name: &str) -> Option<Arc<SceneObject>> {
        self.objects.read().values().find(|o| o.name == name).cloned()
    }

    /// Ids of the objects parented to `id`, in creation order.
    pub fn children_of(&self, id: u64) -> Vec<u64> {
        self.objects
            .read()
            .values()
            .filter(|o| o.parent == Some(id))
            .map(|o| o.id)
            .collect()
    }

    pub fn selected(&self) -> Vec<ObjectHandle> {
        self.objects
            .read()
            .values()
            .filter(|o| o.selected)
            .map(|o| ObjectHandle(o.id))
            .collect()
    }

    pub fn active_object(&self) -> Option<ObjectHandle> {
        let active = *self.active.read();
        active.map(ObjectHandle)
    }

    /// Adds a material and returns its index.
    pub fn add_material(&mut self, name: &str) -> usize {
        let mut materials = self.materials.write();
        materials.push(Arc::new(Material { name: name.to_string() }));
        materials.len() - 1
    }

    pub fn material_index(&self, name: &str) -> Option<usize> {
        self.materials.read().iter().position(|m| m.name == name)
    }

    /// The material new curves receive: the user's `CurveMaterial` if there
    /// is one, otherwise a single shared `GeneratedCurveMaterial`.
    fn curve_material(&mut self) -> usize {
        if let Some(index) = self.material_index(CURVE_MATERIAL) {
            return index;
        }
        match self.material_index(GENERATED_CURVE_MATERIAL) {
            Some(index) => index,
            None => self.add_material(GENERATED_CURVE_MATERIAL),
        }
    }

    /// Returns `base`, or `base.001`, `base.002`, ... if the name is taken.
    fn unique_name(&self, base: &str) -> String {
        let objects = self.objects.read();
        let taken = |name: &str| objects.values().any(|o| o.name == name);
        if !taken(base) {
            return base.to_string();
        }
        let mut n = 1;
        loop {
            let candidate = format!("{}.{:03}", base, n);
            if !taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    fn insert(&mut self, name: &str, kind: ObjectKind) -> u64 {
        let name = self.unique_name(name);
        let id = {
            let mut next = self.next_id.write();
            let id = *next;
            *next += 1;
            id
        };
        let object = SceneObject {
            id,
            name,
            kind,
            parent: None,
            selected: false,
        };
        self.objects.write().insert(id, Arc::new(object));
        id
    }

    fn update<F>(&mut self, id: u64, f: F) -> Result<(), SceneError>
    where
        F: FnOnce(&mut SceneObject),
    {
        let mut objects = self.objects.write();
        let object = objects.get_mut(&id).ok_or(SceneError::UnknownObject(id))?;
        f(Arc::make_mut(object));
        Ok(())
    }

    fn require_container(&self, id: u64) -> Result<(), SceneError> {
        match self.objects.read().get(&id) {
            Some(o) if o.is_empty_object() => Ok(()),
            Some(_) => Err(SceneError::NotAContainer(id)),
            None => Err(SceneError::UnknownContainer(id)),
        }
    }

    /// Computes an order-independent checksum over every curve's name and
    /// point data. Object ids are left out, so two scenes built from the same
    /// parameters match even if their histories differ.
    pub fn checksum(&self) -> u64 {
        let objects: Vec<Arc<SceneObject>> = self.objects.read().values().cloned().collect();
        objects
            .par_iter()
            .filter_map(|o| o.curve().map(|curve| checksum_curve(&o.name, curve)))
            .reduce(|| 0, u64::wrapping_add)
    }
}

impl Default for SceneDocument {
    fn default() -> Self {
        Self::new()
    }
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv_bytes(mut hash: u64, bytes: &[u8]) -> u64 {
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

fn checksum_curve(name: &str, curve: &CurveData) -> u64 {
    let mut hash = fnv_bytes(FNV_OFFSET, name.as_bytes());
    for point in &curve.points {
        for c in point {
            hash = fnv_bytes(hash, &c.to_bits().to_le_bytes());
        }
    }
    hash
}

impl HostScene for SceneDocument {
    fn find_container(&self, name: &str) -> Option<ContainerHandle> {
        self.objects
            .read()
            .values()
            .find(|o| o.name == name && o.is_empty_object())
            .map(|o| ContainerHandle(o.id))
    }

    /// Containers are looked up by name later, so they always keep the name
    /// they were asked for. A clash with any existing object is an error.
    fn create_container(&mut self, name: &str) -> Result<ContainerHandle, SceneError> {
        if self.find_by_name(name).is_some() {
            return Err(SceneError::DuplicateName(name.to_string()));
        }
        let id = self.insert(name, ObjectKind::Empty);
        Ok(ContainerHandle(id))
    }

    fn list_children(&self, container: ContainerHandle) -> Result<Vec<ObjectHandle>, SceneError> {
        self.require_container(container.0)?;
        Ok(self.children_of(container.0).into_iter().map(ObjectHandle).collect())
    }

    fn delete_objects(&mut self, objects: &[ObjectHandle]) -> Result<(), SceneError> {
        for handle in objects {
            let removed = self.objects.write().remove(&handle.0);
            if removed.is_none() {
                return Err(SceneError::UnknownObject(handle.0));
            }
            for child in self.children_of(handle.0) {
                self.update(child, |o| o.parent = None)?;
            }
            let mut active = self.active.write();
            if *active == Some(handle.0) {
                *active = None;
            }
        }
        debug!("Deleted {} objects", objects.len());
        Ok(())
    }

    fn create_path_object(&mut self, points: &[Vector3], label: &str) -> Result<ObjectHandle, SceneError> {
        let material = self.curve_material();
        let data = CurveData {
            name: label.to_string(),
            style: self.style,
            points: points.iter().map(|p| [p.x, p.y, p.z, 1.0]).collect(),
            material: Some(material),
        };
        let id = self.insert(label, ObjectKind::Curve(data));
        Ok(ObjectHandle(id))
    }

    fn set_parent(&mut self, child: ObjectHandle, parent: ContainerHandle) -> Result<(), SceneError> {
        self.require_container(parent.0)?;
        self.update(child.0, |o| o.parent = Some(parent.0))
    }

    fn select(&mut self, object: ObjectHandle) {
        // Selecting a stale handle is a no-op, like clicking on nothing.
        let _ = self.update(object.0, |o| o.selected = true);
    }

    fn deselect_all(&mut self) {
        let mut objects = self.objects.write();
        for object in objects.values_mut() {
            if object.selected {
                Arc::make_mut(object).selected = false;
            }
        }
    }

    fn set_active(&mut self, object: ObjectHandle) {
        if self.objects.read().contains_key(&object.0) {
            *self.active.write() = Some(object.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> Vec<Vector3> {
        (0..n).map(|i| Vector3::new(0.0, 0.0, i as f64 * 0.1)).collect()
    }

    #[test]
    fn test_find_container_only_matches_empties() {
        let mut doc = SceneDocument::new();
        doc.create_path_object(&line(2), "Group").unwrap();
        assert!(doc.find_container("Group").is_none());

        let group = doc.create_container("Group.holder").unwrap();
        assert_eq!(doc.find_container("Group.holder"), Some(group));
    }

    #[test]
    fn test_container_never_takes_a_suffixed_name() {
        let mut doc = SceneDocument::new();
        doc.create_path_object(&line(2), "taken").unwrap();
        let err = doc.create_container("taken").unwrap_err();
        assert_eq!(err, SceneError::DuplicateName("taken".to_string()));
        assert!(doc.find_by_name("taken.001").is_none());

        doc.create_container("G").unwrap();
        let err = doc.create_container("G").unwrap_err();
        assert_eq!(err, SceneError::DuplicateName("G".to_string()));
        assert_eq!(doc.num_objects(), 2);
    }

    #[test]
    fn test_curve_named_like_container_gets_suffix() {
        let mut doc = SceneDocument::new();
        let group = doc.create_container("G").unwrap();
        let curve = doc.create_path_object(&line(2), "G").unwrap();
        assert_eq!(doc.get(curve).unwrap().name, "G.001");
        assert_eq!(doc.find_container("G"), Some(group));
    }

    #[test]
    fn test_unknown_container_handle() {
        let mut doc = SceneDocument::new();
        assert_eq!(
            doc.list_children(ContainerHandle(42)).unwrap_err(),
            SceneError::UnknownContainer(42)
        );
        let a = doc.create_path_object(&line(2), "a").unwrap();
        assert_eq!(
            doc.set_parent(a, ContainerHandle(43)).unwrap_err(),
            SceneError::UnknownContainer(43)
        );
    }

    #[test]
    fn test_duplicate_names_get_suffixes() {
        let mut doc = SceneDocument::new();
        let a = doc.create_path_object(&line(2), "curve").unwrap();
        let b = doc.create_path_object(&line(2), "curve").unwrap();
        let c = doc.create_path_object(&line(2), "curve").unwrap();
        assert_eq!(doc.get(a).unwrap().name, "curve");
        assert_eq!(doc.get(b).unwrap().name, "curve.001");
        assert_eq!(doc.get(c).unwrap().name, "curve.002");
    }

    #[test]
    fn test_curve_object_carries_style_and_homogeneous_points() {
        let mut doc = SceneDocument::new();
        let h = doc.create_path_object(&line(3), "c").unwrap();
        let obj = doc.get(h).unwrap();
        let curve = obj.curve().unwrap();

        assert_eq!(curve.style, CurveStyle::default());
        assert_eq!(curve.style.spline, SplineKind::Nurbs);
        assert_eq!(curve.points.len(), 3);
        assert_eq!(curve.points[2], [0.0, 0.0, 0.2, 1.0]);
        assert_eq!(curve.name, "c");
    }

    #[test]
    fn test_custom_curve_style() {
        let style = CurveStyle {
            bevel_depth: 0.05,
            fill_mode: FillMode::Half,
            spline: SplineKind::Poly,
            ..CurveStyle::default()
        };
        let mut doc = SceneDocument::new().with_curve_style(style);
        let h = doc.create_path_object(&line(2), "c").unwrap();
        assert_eq!(doc.get(h).unwrap().curve().unwrap().style, style);
    }

    #[test]
    fn test_generated_material_is_shared() {
        let mut doc = SceneDocument::new();
        let a = doc.create_path_object(&line(2), "a").unwrap();
        let b = doc.create_path_object(&line(2), "b").unwrap();
        assert_eq!(doc.materials().read().len(), 1);
        assert_eq!(doc.materials().read()[0].name, GENERATED_CURVE_MATERIAL);
        assert_eq!(doc.get(a).unwrap().curve().unwrap().material, Some(0));
        assert_eq!(doc.get(b).unwrap().curve().unwrap().material, Some(0));
    }

    #[test]
    fn test_user_curve_material_wins() {
        let mut doc = SceneDocument::new();
        doc.add_material("Other");
        let index = doc.add_material(CURVE_MATERIAL);
        let h = doc.create_path_object(&line(2), "a").unwrap();
        assert_eq!(doc.get(h).unwrap().curve().unwrap().material, Some(index));
        assert_eq!(doc.material_index(GENERATED_CURVE_MATERIAL), None);
    }

    #[test]
    fn test_parenting_and_children() {
        let mut doc = SceneDocument::new();
        let group = doc.create_container("G").unwrap();
        let a = doc.create_path_object(&line(2), "a").unwrap();
        let b = doc.create_path_object(&line(2), "b").unwrap();
        doc.set_parent(a, group).unwrap();
        doc.set_parent(b, group).unwrap();
        assert_eq!(doc.list_children(group).unwrap(), vec![a, b]);
    }

    #[test]
    fn test_set_parent_rejects_curve_parent() {
        let mut doc = SceneDocument::new();
        let a = doc.create_path_object(&line(2), "a").unwrap();
        let b = doc.create_path_object(&line(2), "b").unwrap();
        let err = doc.set_parent(b, ContainerHandle(a.0)).unwrap_err();
        assert_eq!(err, SceneError::NotAContainer(a.0));
    }

    #[test]
    fn test_delete_unknown_object_fails() {
        let mut doc = SceneDocument::new();
        let err = doc.delete_objects(&[ObjectHandle(99)]).unwrap_err();
        assert_eq!(err, SceneError::UnknownObject(99));
    }

    #[test]
    fn test_deleting_container_orphans_children_and_clears_active() {
        let mut doc = SceneDocument::new();
        let group = doc.create_container("G").unwrap();
        let a = doc.create_path_object(&line(2), "a").unwrap();
        doc.set_parent(a, group).unwrap();
        doc.set_active(group.as_object());

        doc.delete_objects(&[group.as_object()]).unwrap();
        assert_eq!(doc.get(a).unwrap().parent, None);
        assert_eq!(doc.active_object(), None);
        assert_eq!(doc.num_objects(), 1);
    }

    #[test]
    fn test_selection_flags() {
        let mut doc = SceneDocument::new();
        let a = doc.create_path_object(&line(2), "a").unwrap();
        let b = doc.create_path_object(&line(2), "b").unwrap();
        doc.select(a);
        doc.select(b);
        doc.select(ObjectHandle(1234));
        assert_eq!(doc.selected(), vec![a, b]);

        doc.deselect_all();
        assert!(doc.selected().is_empty());
    }

    #[test]
    fn test_checksum_ignores_ids_but_not_points() {
        let mut first = SceneDocument::new();
        first.create_container("G").unwrap();
        first.create_path_object(&line(4), "a").unwrap();
        first.create_path_object(&line(5), "b").unwrap();

        let mut second = SceneDocument::new();
        second.create_path_object(&line(5), "b").unwrap();
        second.create_path_object(&line(4), "a").unwrap();
        assert_eq!(first.checksum(), second.checksum());

        let mut third = SceneDocument::new();
        third.create_path_object(&line(4), "a").unwrap();
        third.create_path_object(&line(6), "b").unwrap();
        assert_ne!(first.checksum(), third.checksum());
    }
}
