//! The narrow contract between the core and whatever actually draws.
//!
//! The core never touches GPU state. For every actor it hands a [`DrawCall`]
//! to a [`Renderer`]: the shared model, the actor's cached world matrix and
//! the camera matrices set on the registry.
//!
//! # Key types
//!
//! - [`DrawCall<'a, M>`] is everything needed to draw one model once
//! - [`Renderer<M>`] is implemented by the rendering backend
//!

use cgmath::Matrix4;

use crate::data_structures::{model::ModelKind, transform::TransformRaw};

/// Data for drawing a single model instance.
///
/// `model` borrows from the [`crate::registry::ModelRegistry`], so a draw call
/// can never outlive the resources it points at.
#[derive(Debug)]
pub struct DrawCall<'a, M> {
    pub kind: ModelKind,
    pub model: &'a M,
    pub world: Matrix4<f32>,
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
    /// GPU-ready form of `world`.
    pub raw: TransformRaw,
}

impl<'a, M> DrawCall<'a, M> {
    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection * self.view
    }
}

/// A rendering backend.
pub trait Renderer<M> {
    fn draw(&mut self, call: DrawCall<'_, M>) -> anyhow::Result<()>;
}
