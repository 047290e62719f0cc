//! Representation of planes.

use approx::AbsDiffEq;
use bytemuck::{Pod, Zeroable};
use parallax_math::Vector3;

/// A plane in 3D, represented by a unit normal and a displacement.
///
/// The displacement `d` can be determined from the normal `n` and any point
/// `p` lying on the plane as `d = n.dot(p)`. By storing the displacement
/// instead of the point, we remove redundant degrees of freedom.
///
/// The plane divides space into two halfspaces, the positive and negative
/// halfspace. The positive one is defined as the halfspace the unit normal is
/// pointing into.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Zeroable, Pod)]
pub struct Plane {
    unit_normal: Vector3,
    displacement: f32,
}

impl Plane {
    /// The xy-coordinate plane, with the positive halfspace being the space
    /// of positive z-coordinates.
    pub const XY_PLANE: Self = Self::new(Vector3::unit_z(), 0.0);

    /// The yz-coordinate plane, with the positive halfspace being the space
    /// of positive x-coordinates.
    pub const YZ_PLANE: Self = Self::new(Vector3::unit_x(), 0.0);

    /// The xz-coordinate plane, with the positive halfspace being the space
    /// of positive y-coordinates.
    pub const XZ_PLANE: Self = Self::new(Vector3::unit_y(), 0.0);

    /// Creates a new plane defined by the given unit normal vector and
    /// displacement.
    #[inline]
    pub const fn new(unit_normal: Vector3, displacement: f32) -> Self {
        Self {
            unit_normal,
            displacement,
        }
    }

    /// Creates a new plane defined by the given unit normal vector and point
    /// in the plane.
    #[inline]
    pub fn from_normal_and_point(unit_normal: Vector3, point_in_plane: &Vector3) -> Self {
        Self::new(unit_normal, unit_normal.dot(point_in_plane))
    }

    /// Returns the unit normal vector of the plane.
    #[inline]
    pub const fn unit_normal(&self) -> &Vector3 {
        &self.unit_normal
    }

    /// Returns the displacement of the plane.
    #[inline]
    pub const fn displacement(&self) -> f32 {
        self.displacement
    }

    /// Deconstructs the plane into its unit normal and displacement.
    #[inline]
    pub const fn into_normal_and_displacement(self) -> (Vector3, f32) {
        (self.unit_normal, self.displacement)
    }

    /// Computes the signed distance from the given point to the plane. The
    /// distance is positive in the positive halfspace of the plane.
    #[inline]
    pub fn compute_signed_distance(&self, point: &Vector3) -> f32 {
        self.unit_normal.dot(point) - self.displacement
    }

    /// Whether the given point lies strictly inside the positive halfspace of
    /// the plane.
    #[inline]
    pub fn point_lies_in_positive_halfspace(&self, point: &Vector3) -> bool {
        self.compute_signed_distance(point) > 0.0
    }
}

impl AbsDiffEq for Plane {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.unit_normal.abs_diff_eq(&other.unit_normal, epsilon)
            && self.displacement.abs_diff_eq(&other.displacement, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn plane_from_normal_and_point_places_the_point_on_the_plane() {
        let normal = Vector3::new(0.0, 1.0, 0.0);
        let point = Vector3::new(3.0, 2.0, -1.0);
        let plane = Plane::from_normal_and_point(normal, &point);

        assert_abs_diff_eq!(plane.displacement(), 2.0, epsilon = EPSILON);
        assert_abs_diff_eq!(plane.compute_signed_distance(&point), 0.0, epsilon = EPSILON);
    }

    #[test]
    fn signed_distance_is_positive_in_the_positive_halfspace() {
        let plane = Plane::XY_PLANE;
        assert_abs_diff_eq!(
            plane.compute_signed_distance(&Vector3::new(1.0, 2.0, 3.0)),
            3.0,
            epsilon = EPSILON
        );
        assert!(plane.point_lies_in_positive_halfspace(&Vector3::new(0.0, 0.0, 0.5)));
        assert!(!plane.point_lies_in_positive_halfspace(&Vector3::new(0.0, 0.0, -0.5)));
    }

    #[test]
    fn coordinate_plane_constants_have_expected_normals() {
        assert_eq!(*Plane::XY_PLANE.unit_normal(), Vector3::unit_z());
        assert_eq!(*Plane::YZ_PLANE.unit_normal(), Vector3::unit_x());
        assert_eq!(*Plane::XZ_PLANE.unit_normal(), Vector3::unit_y());
    }
}
