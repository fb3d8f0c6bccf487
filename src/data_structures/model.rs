//! CPU-side model data and the closed set of model kinds actors can draw.

use std::fmt;

/// The models an actor can be drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum ModelKind {
    #[default]
    Man,
    Tree,
    Car,
    Bird,
    Ball,
    Hut,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A single triangle list: flat `xyz` positions and triangle indices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Geometry loaded from one model file. Uploading it to a GPU is the
/// renderer's business.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Model {
    pub name: String,
    pub meshes: Vec<Mesh>,
}

impl Model {
    pub fn num_vertices(&self) -> usize {
        self.meshes.iter().map(|m| m.positions.len()).sum()
    }
}
