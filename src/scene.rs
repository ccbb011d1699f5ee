use std::{ops::ControlFlow, sync::Arc};

use parking_lot::RwLock;

use crate::{Aabb, Float, Mesh};

/// A mesh which may be shared between a [Scene] and whoever else holds it.
pub type SharedMesh<Real = f32> = Arc<RwLock<Mesh<Real>>>;

/// A group of meshes forming a world.
#[derive(Debug)]
pub struct Scene<Real: Float = f32> {
    pub name: String,
    /// Where the scene was loaded from; empty if nowhere.
    pub src_url: String,
    children: Vec<SharedMesh<Real>>,
    bounds: Option<Aabb<Real>>,
    max_child_id: u32,
}

impl<Real: Float> Default for Scene<Real> {
    fn default() -> Self {
        Self::new("")
    }
}

impl<Real: Float> Scene<Real> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            src_url: String::new(),
            children: Vec::new(),
            bounds: None,
            max_child_id: 1,
        }
    }

    /// Initialize every child (see [Mesh::init]), then the bounds of the whole scene.
    ///
    /// Does nothing if the scene is empty.
    #[tracing::instrument(level = "debug", skip(self), fields(name = %self.name, children = self.children.len()))]
    pub fn init(&mut self) {
        if self.is_empty() {
            return;
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            self.children
                .par_iter()
                .for_each(|child| child.write().init());
        }
        #[cfg(not(feature = "parallel"))]
        for child in &self.children {
            child.write().init();
        }

        if self.bounds.is_none() {
            self.bounds = Some(self.calc_bounds());
        }
    }

    /// The union of the bounds of every non-trivial child.
    ///
    /// If there are no such children, the result is [empty](Aabb::empty).
    fn calc_bounds(&self) -> Aabb<Real> {
        self.children
            .iter()
            .filter_map(|child| {
                let child = child.read();
                if child.is_trivial() {
                    None
                } else {
                    child.bounds().copied()
                }
            })
            .fold(Aabb::empty(), |acc, bb| acc.union(&bb))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Add a mesh to the end of the scene, assigning it a new internal id.
    pub fn add_child(&mut self, mesh: SharedMesh<Real>) {
        mesh.write().set_internal_id(self.max_child_id);
        self.max_child_id += 1;
        self.children.push(mesh);
        self.bounds = None;
    }

    /// Remove a mesh from the scene, returning whether it was present.
    pub fn remove_child(&mut self, mesh: &SharedMesh<Real>) -> bool {
        match self.children.iter().position(|c| Arc::ptr_eq(c, mesh)) {
            Some(i) => {
                self.children.remove(i);
                self.bounds = None;
                true
            }
            None => false,
        }
    }

    /// Every mesh in the scene, in insertion order.
    #[inline]
    pub fn children(&self) -> &[SharedMesh<Real>] {
        &self.children
    }

    /// Call `op` on each mesh in order, stopping early if it breaks.
    pub fn for_each_child<B>(
        &self,
        mut op: impl FnMut(&SharedMesh<Real>) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        for child in &self.children {
            op(child)?;
        }
        ControlFlow::Continue(())
    }

    /// The bounds of the scene, once [Scene::init] has run on a non-empty scene.
    #[inline]
    pub fn bounds(&self) -> Option<&Aabb<Real>> {
        self.bounds.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> SharedMesh {
        Arc::new(RwLock::new(Mesh::new(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            vec![0, 1, 2, -1],
        )))
    }

    #[test]
    fn internal_ids() {
        let mut scene = Scene::new("ids");
        let (a, b) = (triangle(), triangle());
        scene.add_child(a.clone());
        scene.add_child(b.clone());
        assert_eq!(a.read().internal_id(), 1);
        assert_eq!(b.read().internal_id(), 2);

        assert!(scene.remove_child(&a));
        assert!(!scene.remove_child(&a));
        let c = triangle();
        scene.add_child(c.clone());
        assert_eq!(c.read().internal_id(), 3);
        assert_eq!(scene.children().len(), 2);
        assert!(Arc::ptr_eq(&scene.children()[0], &b));
    }

    #[test]
    fn for_each_child_breaks() {
        let mut scene = Scene::<f32>::default();
        for _ in 0..4 {
            scene.add_child(triangle());
        }
        let mut visited = 0;
        let res = scene.for_each_child(|c| {
            visited += 1;
            if c.read().internal_id() == 2 {
                ControlFlow::Break(2)
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(res, ControlFlow::Break(2));
        assert_eq!(visited, 2);
    }

    #[test]
    fn empty_scene_has_no_bounds() {
        let mut scene = Scene::<f64>::new("empty");
        scene.init();
        assert!(scene.bounds().is_none());
    }

    #[test]
    fn trivial_children_give_empty_bounds() {
        let mut scene = Scene::new("trivial");
        scene.add_child(Arc::new(RwLock::new(Mesh::new(vec![0.0; 6], vec![0, 1]))));
        scene.init();
        assert!(scene.bounds().unwrap().is_empty());
    }
}
