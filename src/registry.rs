//! Shared model table used by every actor that draws.
//!
//! The registry is a builder with an explicit lifecycle:
//!
//! 1. [`ModelRegistry::add_model`] collects `(kind, path)` registrations.
//! 2. [`ModelRegistry::acquire_rendering_resources`] loads every registered
//!    path exactly once, all-or-nothing.
//! 3. Actors draw through [`ModelRegistry::draw`]; models are shared, no actor
//!    owns one.
//! 4. [`ModelRegistry::release_rendering_resources`] frees the models. Draws
//!    fail with [`CacheError::NotAcquired`] until the next acquire.
//!
//! The registry is an ordinary value: whoever owns it decides when resources
//! live, and passes it by reference to the actors that draw.

use std::{
    collections::{BTreeMap, HashMap},
    path::PathBuf,
};

use cgmath::{Matrix4, SquareMatrix};
use instant::Instant;

use crate::{
    data_structures::{model::ModelKind, transform::TransformRaw},
    error::{CacheError, Result},
    render::{DrawCall, Renderer},
    resources::AssetLoader,
};

/// Models resolved by a successful acquire. Kinds registered with the same
/// path share one slot.
#[derive(Debug)]
struct Acquired<M> {
    models: Vec<M>,
    slots: HashMap<ModelKind, usize>,
}

#[derive(Debug)]
pub struct ModelRegistry<M> {
    registrations: BTreeMap<ModelKind, PathBuf>,
    acquired: Option<Acquired<M>>,
    view: Matrix4<f32>,
    projection: Matrix4<f32>,
}

impl<M> ModelRegistry<M> {
    pub fn new() -> Self {
        Self {
            registrations: BTreeMap::new(),
            acquired: None,
            view: Matrix4::identity(),
            projection: Matrix4::identity(),
        }
    }

    /// Registers `path` as the model for `kind`.
    ///
    /// Registering a kind twice before acquisition keeps the latest path.
    /// Registering anything while resources are acquired fails with
    /// [`CacheError::InvalidState`]; release first.
    pub fn add_model(&mut self, path: impl Into<PathBuf>, kind: ModelKind) -> Result<()> {
        let path = path.into();
        if self.acquired.is_some() {
            return Err(CacheError::InvalidState {
                reason: format!(
                    "cannot register {} for {kind} while rendering resources are acquired",
                    path.display()
                ),
            });
        }
        if let Some(previous) = self.registrations.insert(kind, path) {
            log::warn!("{kind} was registered before as {}, replacing it", previous.display());
        }
        Ok(())
    }

    pub fn registered_path(&self, kind: ModelKind) -> Option<&PathBuf> {
        self.registrations.get(&kind)
    }

    pub fn is_acquired(&self) -> bool {
        self.acquired.is_some()
    }

    /// Loads every registered model.
    ///
    /// Either every model loads and the registry becomes acquired, or the
    /// first failure is returned and the registry stays unacquired with no
    /// models held. Acquiring twice is a no-op.
    pub fn acquire_rendering_resources<L>(&mut self, loader: &mut L) -> Result<()>
    where
        L: AssetLoader<PathBuf, Resource = M>,
    {
        if self.acquired.is_some() {
            log::debug!("rendering resources already acquired");
            return Ok(());
        }

        let start = Instant::now();
        let mut models = Vec::new();
        let mut by_path: HashMap<&PathBuf, usize> = HashMap::new();
        let mut slots = HashMap::new();
        for (kind, path) in &self.registrations {
            let slot = match by_path.get(path) {
                Some(&slot) => slot,
                None => {
                    if !loader.exists(path) {
                        return Err(CacheError::not_found(path));
                    }
                    let model = loader
                        .load(path)
                        .map_err(|e| CacheError::load_failure(path, e))?;
                    models.push(model);
                    by_path.insert(path, models.len() - 1);
                    models.len() - 1
                }
            };
            slots.insert(*kind, slot);
        }

        log::info!(
            "acquired {} models for {} kinds in {:?}",
            models.len(),
            slots.len(),
            start.elapsed()
        );
        self.acquired = Some(Acquired { models, slots });
        Ok(())
    }

    /// Frees every shared model. Registrations are kept for the next acquire.
    pub fn release_rendering_resources(&mut self) {
        if let Some(acquired) = self.acquired.take() {
            log::info!("released {} models", acquired.models.len());
        }
    }

    /// Camera matrices attached to every subsequent draw call.
    pub fn set_view_projection(&mut self, view: Matrix4<f32>, projection: Matrix4<f32>) {
        self.view = view;
        self.projection = projection;
    }

    /// The shared model for `kind`.
    pub fn model(&self, kind: ModelKind) -> Result<&M> {
        let acquired = self.acquired.as_ref().ok_or_else(|| CacheError::NotAcquired {
            kind: kind.to_string(),
        })?;
        acquired
            .slots
            .get(&kind)
            .and_then(|&slot| acquired.models.get(slot))
            .ok_or_else(|| CacheError::not_found(&kind))
    }

    /// Draws the model registered for `kind` with the given world matrix.
    pub fn draw<R>(&self, kind: ModelKind, world: &Matrix4<f32>, renderer: &mut R) -> Result<()>
    where
        R: Renderer<M> + ?Sized,
    {
        let model = self.model(kind)?;
        renderer
            .draw(DrawCall {
                kind,
                model,
                world: *world,
                view: self.view,
                projection: self.projection,
                raw: TransformRaw::from(world),
            })
            .map_err(|source| CacheError::DrawFailure {
                kind: kind.to_string(),
                source,
            })
    }
}

impl<M> Default for ModelRegistry<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[derive(Default)]
    struct Paths {
        broken: HashSet<PathBuf>,
        loads: Vec<PathBuf>,
    }

    impl AssetLoader<PathBuf> for Paths {
        type Resource = String;

        fn exists(&self, key: &PathBuf) -> bool {
            !key.starts_with("missing")
        }

        fn load(&mut self, key: &PathBuf) -> anyhow::Result<String> {
            self.loads.push(key.clone());
            if self.broken.contains(key) {
                anyhow::bail!("truncated file");
            }
            Ok(key.display().to_string())
        }
    }

    #[derive(Default)]
    struct Tally {
        draws: usize,
        fail: bool,
    }

    impl Renderer<String> for Tally {
        fn draw(&mut self, call: DrawCall<'_, String>) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("device lost drawing {}", call.model);
            }
            self.draws += 1;
            Ok(())
        }
    }

    fn count_draws(registry: &ModelRegistry<String>, kind: ModelKind) -> Result<usize> {
        let mut tally = Tally::default();
        registry.draw(kind, &Matrix4::identity(), &mut tally)?;
        Ok(tally.draws)
    }

    #[test]
    fn kinds_sharing_a_path_share_one_load() {
        let mut registry = ModelRegistry::new();
        registry.add_model("tree.obj", ModelKind::Tree).unwrap();
        registry.add_model("tree.obj", ModelKind::Hut).unwrap();
        registry.add_model("car.obj", ModelKind::Car).unwrap();

        let mut loader = Paths::default();
        registry.acquire_rendering_resources(&mut loader).unwrap();
        registry.acquire_rendering_resources(&mut loader).unwrap();

        assert_eq!(loader.loads.len(), 2);
        let tree = registry.model(ModelKind::Tree).unwrap() as *const String;
        let hut = registry.model(ModelKind::Hut).unwrap() as *const String;
        assert_eq!(tree, hut);
    }

    #[test]
    fn failed_acquire_holds_nothing() {
        let mut registry = ModelRegistry::new();
        registry.add_model("bird.obj", ModelKind::Bird).unwrap();
        registry.add_model("man.obj", ModelKind::Man).unwrap();

        let mut loader = Paths::default();
        loader.broken.insert(PathBuf::from("bird.obj"));
        let err = registry.acquire_rendering_resources(&mut loader).unwrap_err();

        assert!(matches!(err, CacheError::LoadFailure { .. }), "{err}");
        assert!(!registry.is_acquired());
        assert!(matches!(
            registry.model(ModelKind::Man),
            Err(CacheError::NotAcquired { .. })
        ));
    }

    #[test]
    fn missing_model_file_is_not_found() {
        let mut registry: ModelRegistry<String> = ModelRegistry::new();
        registry.add_model("missing/ball.obj", ModelKind::Ball).unwrap();

        let err = registry
            .acquire_rendering_resources(&mut Paths::default())
            .unwrap_err();
        assert!(matches!(err, CacheError::ResourceNotFound { .. }), "{err}");
        assert!(!registry.is_acquired());
    }

    #[test]
    fn registering_after_acquire_is_invalid() {
        let mut registry = ModelRegistry::new();
        registry.add_model("tree.obj", ModelKind::Tree).unwrap();
        registry
            .acquire_rendering_resources(&mut Paths::default())
            .unwrap();

        let err = registry.add_model("car.obj", ModelKind::Car).unwrap_err();
        assert!(matches!(err, CacheError::InvalidState { .. }), "{err}");

        registry.release_rendering_resources();
        registry.add_model("car.obj", ModelKind::Car).unwrap();
    }

    #[test]
    fn draws_only_between_acquire_and_release() {
        let mut registry = ModelRegistry::new();
        registry.add_model("tree.model", ModelKind::Tree).unwrap();
        assert!(matches!(
            count_draws(&registry, ModelKind::Tree),
            Err(CacheError::NotAcquired { .. })
        ));

        registry
            .acquire_rendering_resources(&mut Paths::default())
            .unwrap();
        assert_eq!(count_draws(&registry, ModelKind::Tree).unwrap(), 1);
        assert!(matches!(
            count_draws(&registry, ModelKind::Car),
            Err(CacheError::ResourceNotFound { .. })
        ));

        registry.release_rendering_resources();
        assert!(matches!(
            count_draws(&registry, ModelKind::Tree),
            Err(CacheError::NotAcquired { .. })
        ));
    }

    #[test]
    fn renderer_errors_surface_as_draw_failures() {
        let mut registry = ModelRegistry::new();
        registry.add_model("ball.obj", ModelKind::Ball).unwrap();
        registry
            .acquire_rendering_resources(&mut Paths::default())
            .unwrap();

        let mut tally = Tally {
            fail: true,
            ..Default::default()
        };
        let err = registry
            .draw(ModelKind::Ball, &Matrix4::identity(), &mut tally)
            .unwrap_err();
        assert!(matches!(err, CacheError::DrawFailure { .. }), "{err}");
    }
}
