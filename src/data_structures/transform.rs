//! Cached local-to-world transform of a single actor.
//!
//! Position, scale and Euler orientation are cheap to mutate. The composed
//! world matrix is rebuilt lazily: setters only mark the cache dirty and the
//! next call to [`TransformCache::local_to_world`] pays for the rebuild once.
//!
//! # Conventions
//!
//! - `world = T * R * S`: scale first, then rotation, then translation.
//! - `R = R_z(roll) * R_y(yaw) * R_x(pitch)`: pitch is applied first, then
//!   yaw, then roll. Rotations follow cgmath's right-handed angle sense.
//! - The basis vectors are the columns of `R`: right is `R * +X`, up is
//!   `R * +Y` and forward is `R * +Z`.

use cgmath::{Matrix, Matrix3, Matrix4, Rad, SquareMatrix, Vector3, Zero};

/// Cached world matrix state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WorldMatrix {
    Clean(Matrix4<f32>),
    Dirty,
}

/// Position, scale and orientation of an actor plus its cached world matrix.
#[derive(Clone, Debug)]
pub struct TransformCache {
    position: Vector3<f32>,
    scaling: Vector3<f32>,
    pitch: Rad<f32>,
    yaw: Rad<f32>,
    roll: Rad<f32>,
    world: WorldMatrix,
    rebuilds: u64,
}

impl TransformCache {
    /// Identity transform: origin, unit scale, no rotation.
    pub fn new() -> Self {
        Self {
            position: Vector3::zero(),
            scaling: Vector3::new(1.0, 1.0, 1.0),
            pitch: Rad(0.0),
            yaw: Rad(0.0),
            roll: Rad(0.0),
            world: WorldMatrix::Dirty,
            rebuilds: 0,
        }
    }

    pub fn position(&self) -> &Vector3<f32> {
        &self.position
    }

    pub fn scaling(&self) -> &Vector3<f32> {
        &self.scaling
    }

    pub fn pitch(&self) -> Rad<f32> {
        self.pitch
    }

    pub fn yaw(&self) -> Rad<f32> {
        self.yaw
    }

    pub fn roll(&self) -> Rad<f32> {
        self.roll
    }

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
        self.world = WorldMatrix::Dirty;
    }

    pub fn set_scaling(&mut self, scaling: Vector3<f32>) {
        self.scaling = scaling;
        self.world = WorldMatrix::Dirty;
    }

    pub fn set_uniform_scaling(&mut self, scalar: f32) {
        self.set_scaling(Vector3::new(scalar, scalar, scalar));
    }

    pub fn set_pitch(&mut self, angle: impl Into<Rad<f32>>) {
        self.pitch = angle.into();
        self.world = WorldMatrix::Dirty;
    }

    pub fn set_yaw(&mut self, angle: impl Into<Rad<f32>>) {
        self.yaw = angle.into();
        self.world = WorldMatrix::Dirty;
    }

    pub fn set_roll(&mut self, angle: impl Into<Rad<f32>>) {
        self.roll = angle.into();
        self.world = WorldMatrix::Dirty;
    }

    /// Current cache state without triggering a rebuild.
    pub fn state(&self) -> &WorldMatrix {
        &self.world
    }

    /// How many times the world matrix has been rebuilt so far.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    /// Returns the world matrix, rebuilding it first if any input changed
    /// since the last call.
    ///
    /// The reference stays valid until the next mutation of this transform.
    pub fn local_to_world(&mut self) -> &Matrix4<f32> {
        match self.world {
            WorldMatrix::Clean(ref matrix) => matrix,
            WorldMatrix::Dirty => {
                self.world = WorldMatrix::Clean(self.compose());
                self.rebuilds += 1;
                self.local_to_world()
            }
        }
    }

    /// Composes the world matrix from the current inputs, bypassing the cache.
    pub fn compose(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from(self.rotation())
            * Matrix4::from_nonuniform_scale(self.scaling.x, self.scaling.y, self.scaling.z)
    }

    /// Rotation part only, `R_z(roll) * R_y(yaw) * R_x(pitch)`.
    pub fn rotation(&self) -> Matrix3<f32> {
        Matrix3::from_angle_z(self.roll)
            * Matrix3::from_angle_y(self.yaw)
            * Matrix3::from_angle_x(self.pitch)
    }

    pub fn forward_vector(&self) -> Vector3<f32> {
        self.rotation().z
    }

    pub fn right_vector(&self) -> Vector3<f32> {
        self.rotation().x
    }

    pub fn up_vector(&self) -> Vector3<f32> {
        self.rotation().y
    }
}

impl Default for TransformCache {
    fn default() -> Self {
        Self::new()
    }
}

/**
 * The raw transform is what a renderer uploads per draw: the world matrix, the
 * matrix used to transform normals and the sign of the world determinant so
 * mirrored objects can flip their winding.
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformRaw {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 3]; 3],
    pub handedness: f32,
}

impl From<&Matrix4<f32>> for TransformRaw {
    fn from(world: &Matrix4<f32>) -> Self {
        let upper = Matrix3::from_cols(world.x.truncate(), world.y.truncate(), world.z.truncate());
        // Non-uniform scale skews normals, so they need the inverse transpose.
        // Degenerate (zero-scaled) matrices keep the plain upper block.
        let normal = upper.invert().map(|inv| inv.transpose()).unwrap_or(upper);
        Self {
            model: (*world).into(),
            normal: normal.into(),
            handedness: world.determinant().signum(),
        }
    }
}
