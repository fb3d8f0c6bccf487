//! Actors: identified objects in the world with a cached transform.

use std::time::Duration;

use cgmath::{Matrix4, Rad, Vector3};

use crate::{
    data_structures::{model::ModelKind, transform::TransformCache},
    error::Result,
    registry::ModelRegistry,
    render::Renderer,
};

/// An object in the world.
///
/// The `type_name` and `id` pair identifies an actor and cannot change after
/// construction. Everything else is freely mutable; transform changes are
/// cheap because the world matrix is only rebuilt when it is next read.
#[derive(Clone, Debug)]
pub struct Actor {
    type_name: String,
    id: usize,
    transform: TransformCache,
    color: Vector3<f32>,
    movement_speed: f32,
    model: ModelKind,
}

impl Actor {
    pub fn new(type_name: impl Into<String>, id: usize) -> Self {
        let type_name = type_name.into();
        log::debug!("Creating actor {}#{}", type_name, id);
        Self {
            type_name,
            id,
            transform: TransformCache::new(),
            color: Vector3::new(1.0, 1.0, 1.0),
            movement_speed: 1.0,
            model: ModelKind::default(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn transform(&self) -> &TransformCache {
        &self.transform
    }

    pub fn position(&self) -> &Vector3<f32> {
        self.transform.position()
    }

    pub fn scaling(&self) -> &Vector3<f32> {
        self.transform.scaling()
    }

    pub fn pitch(&self) -> Rad<f32> {
        self.transform.pitch()
    }

    pub fn yaw(&self) -> Rad<f32> {
        self.transform.yaw()
    }

    pub fn roll(&self) -> Rad<f32> {
        self.transform.roll()
    }

    pub fn forward_vector(&self) -> Vector3<f32> {
        self.transform.forward_vector()
    }

    pub fn right_vector(&self) -> Vector3<f32> {
        self.transform.right_vector()
    }

    pub fn up_vector(&self) -> Vector3<f32> {
        self.transform.up_vector()
    }

    /// See [`TransformCache::local_to_world`].
    pub fn local_to_world(&mut self) -> &Matrix4<f32> {
        self.transform.local_to_world()
    }

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.transform.set_position(position);
    }

    pub fn set_scaling(&mut self, scaling: Vector3<f32>) {
        self.transform.set_scaling(scaling);
    }

    pub fn set_uniform_scaling(&mut self, scalar: f32) {
        self.transform.set_uniform_scaling(scalar);
    }

    pub fn set_pitch(&mut self, angle: impl Into<Rad<f32>>) {
        self.transform.set_pitch(angle);
    }

    pub fn set_yaw(&mut self, angle: impl Into<Rad<f32>>) {
        self.transform.set_yaw(angle);
    }

    pub fn set_roll(&mut self, angle: impl Into<Rad<f32>>) {
        self.transform.set_roll(angle);
    }

    pub fn color(&self) -> &Vector3<f32> {
        &self.color
    }

    pub fn set_color(&mut self, color: Vector3<f32>) {
        self.color = color;
    }

    pub fn movement_speed(&self) -> f32 {
        self.movement_speed
    }

    pub fn set_movement_speed(&mut self, speed: f32) {
        self.movement_speed = speed;
    }

    pub fn model(&self) -> ModelKind {
        self.model
    }

    pub fn set_model(&mut self, model: ModelKind) {
        self.model = model;
    }

    /// Moves the actor along its forward vector by `movement_speed * dt`.
    pub fn advance(&mut self, dt: Duration) {
        let step = self.forward_vector() * (self.movement_speed * dt.as_secs_f32());
        let position = self.transform.position() + step;
        self.transform.set_position(position);
    }

    /// Draws this actor's model with its cached world matrix.
    ///
    /// Fails with [`crate::error::CacheError::NotAcquired`] outside the
    /// registry's acquire/release window.
    pub fn draw<M, R>(&mut self, registry: &ModelRegistry<M>, renderer: &mut R) -> Result<()>
    where
        R: Renderer<M> + ?Sized,
    {
        let world = *self.transform.local_to_world();
        registry.draw(self.model, &world, renderer)
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Deg;

    use super::*;

    #[test]
    fn identity_is_fixed_at_construction() {
        let mut actor = Actor::new("Bird", 7);
        actor.set_position(Vector3::new(1.0, 0.0, 0.0));
        actor.set_model(ModelKind::Bird);
        assert_eq!(actor.type_name(), "Bird");
        assert_eq!(actor.id(), 7);
        assert_eq!(actor.model(), ModelKind::Bird);
    }

    #[test]
    fn advance_moves_along_forward_vector() {
        let mut actor = Actor::new("Car", 1);
        actor.set_yaw(Deg(90.0));
        actor.set_movement_speed(2.0);
        actor.advance(Duration::from_millis(500));

        let position = actor.position();
        assert!((position.x - 1.0).abs() < 1e-5, "{position:?}");
        assert!(position.y.abs() < 1e-5 && position.z.abs() < 1e-5, "{position:?}");
    }

    #[test]
    fn advancing_dirties_the_world_matrix() {
        let mut actor = Actor::new("Ball", 3);
        actor.local_to_world();
        actor.advance(Duration::from_secs(1));
        assert!((actor.local_to_world().w.z - 1.0).abs() < 1e-5);
        assert_eq!(actor.transform().rebuilds(), 2);
    }
}
