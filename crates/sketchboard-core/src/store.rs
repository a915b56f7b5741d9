//! Ordered shape collection for the active canvas.

use crate::shapes::{Shape, ShapeId};
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Committed shapes in paint order (back to front).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeStore {
    shapes: Vec<Shape>,
}

impl ShapeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from loaded data, dropping later duplicates of an id.
    pub fn from_shapes(shapes: impl IntoIterator<Item = Shape>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        for shape in shapes {
            if seen.insert(shape.id().clone()) {
                kept.push(shape);
            } else {
                log::warn!("Dropping shape with duplicate id {}", shape.id());
            }
        }
        Self { shapes: kept }
    }

    /// Append a shape on top. Returns false if its id is already present.
    pub fn add(&mut self, shape: Shape) -> bool {
        if self.contains(shape.id()) {
            return false;
        }
        self.shapes.push(shape);
        true
    }

    /// Remove every shape whose id is listed. Returns the number removed.
    pub fn remove_ids(&mut self, ids: &[ShapeId]) -> usize {
        let before = self.shapes.len();
        self.shapes.retain(|s| !ids.contains(s.id()));
        before - self.shapes.len()
    }

    /// Swap in a new version of a shape, keeping its z-position.
    /// Returns false if no shape has that id.
    pub fn replace(&mut self, shape: Shape) -> bool {
        match self.shapes.iter_mut().find(|s| s.id() == shape.id()) {
            Some(slot) => {
                *slot = shape;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn get(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    pub fn contains(&self, id: &ShapeId) -> bool {
        self.get(id).is_some()
    }

    /// Shapes in z-order (back to front).
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn as_slice(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Bounding box of all shapes.
    pub fn bounds(&self) -> Option<Rect> {
        self.shapes
            .iter()
            .map(Shape::bounds)
            .reduce(|acc, r| acc.union(r))
    }

    /// Deep copy of the current contents.
    pub fn snapshot(&self) -> Vec<Shape> {
        self.shapes.clone()
    }

    /// Replace the contents wholesale.
    pub fn restore(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
    }
}
