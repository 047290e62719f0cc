//! Transform math for real-time 3D rendering: vectors, matrices, rotation
//! quaternions and the camera/projection constructions built from them.

#[macro_use]
mod macros;

pub mod angle;
pub mod matrix3;
pub mod matrix4;
pub mod quaternion;
pub mod vector;

pub use angle::{Angle, Degrees, Radians};
pub use matrix3::Matrix3;
pub use matrix4::{DepthRange, Matrix4};
pub use quaternion::Quaternion;
pub use vector::{Vector2, Vector3, Vector4};
