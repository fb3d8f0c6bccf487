//! agent-ngin
//!
//! The caching core of a small actor-based game engine. Rendering, audio
//! output and the window loop are delegated to external backends; this crate
//! owns the parts that decide *when* expensive work happens: world matrices
//! rebuilt only after a transform changed, and heavyweight assets loaded at
//! most once per key and shared by everyone who asks for them.
//!
//! High-level modules
//! - `data_structures`: actors, their cached transforms and CPU-side models
//! - `resources`: get-or-load caches, derived caches and file-system loaders
//! - `audio`: sound effects and music tracks on top of the resource caches
//! - `registry`: the model table shared by every actor that draws
//! - `render`: the contract a rendering backend implements
//! - `config`, `error`, `logging`: ambient configuration, errors and logger setup
//!

pub mod audio;
pub mod config;
pub mod data_structures;
pub mod error;
pub mod logging;
pub mod registry;
pub mod render;
pub mod resources;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::{Deg, Matrix4, Rad, Vector3};
pub use data_structures::{actor::Actor, model::ModelKind, transform::TransformCache};
pub use error::{CacheError, Result};
pub use registry::ModelRegistry;
