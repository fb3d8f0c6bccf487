//! Engine data structures: actors, their transforms and model data.
//!
//! - `actor` is a named, numbered object in the world with a transform and a model kind
//! - `transform` holds the lazily rebuilt local-to-world matrix
//! - `model` contains CPU-side meshes and the closed set of model kinds

pub mod actor;
pub mod model;
pub mod transform;
