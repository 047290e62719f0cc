//! Representation of frustums.

use crate::Plane;
use parallax_math::{Matrix4, Vector3};

/// A frustum, which in general is a pyramid truncated at the top. It is here
/// represented by the six planes making up the faces of the truncated
/// pyramid.
///
/// The planes are created in such a way that their negative halfspaces
/// correspond to the space outside the frustum.
#[derive(Clone, Debug, PartialEq)]
pub struct Frustum {
    planes: [Plane; 6],
}

impl Frustum {
    /// Creates the frustum representing the clip space of the given transform
    /// matrix.
    ///
    /// This function uses the method of Gribb and Hartmann (2001) "Fast
    /// Extraction of Viewing Frustum Planes from the World-View-Projection
    /// Matrix".
    pub fn from_transform_matrix(transform_matrix: &Matrix4) -> Self {
        let coefficients = transform_matrix.clip_planes();
        Self {
            planes: coefficients.map(|c| {
                Self::plane_from_unnormalized_coefficients(c.x(), c.y(), c.z(), -c.w())
            }),
        }
    }

    /// Returns the planes defining the faces of the frustum.
    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }

    /// Returns the plane defining the left face of the frustum.
    pub fn left_plane(&self) -> &Plane {
        &self.planes[0]
    }

    /// Returns the plane defining the right face of the frustum.
    pub fn right_plane(&self) -> &Plane {
        &self.planes[1]
    }

    /// Returns the plane defining the bottom face of the frustum.
    pub fn bottom_plane(&self) -> &Plane {
        &self.planes[2]
    }

    /// Returns the plane defining the top face of the frustum.
    pub fn top_plane(&self) -> &Plane {
        &self.planes[3]
    }

    /// Returns the near plane of the frustum.
    pub fn near_plane(&self) -> &Plane {
        &self.planes[4]
    }

    /// Returns the far plane of the frustum.
    pub fn far_plane(&self) -> &Plane {
        &self.planes[5]
    }

    /// Whether the given point is strictly inside the frustum.
    pub fn contains_point(&self, point: &Vector3) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.point_lies_in_positive_halfspace(point))
    }

    /// Whether any part of the sphere with the given center and radius could
    /// be inside the frustum. The test errs on the side of inclusion for
    /// spheres near a frustum edge.
    pub fn could_contain_sphere(&self, center: &Vector3, radius: f32) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.compute_signed_distance(center) >= -radius)
    }

    /// Whether any part of the axis-aligned box with the given corners could
    /// be inside the frustum. For each plane, only the box corner farthest
    /// along the plane normal is tested.
    pub fn could_contain_axis_aligned_box(&self, lower: &Vector3, upper: &Vector3) -> bool {
        self.planes.iter().all(|plane| {
            let normal = plane.unit_normal();
            let farthest_corner = Vector3::new(
                if normal.x() < 0.0 { lower.x() } else { upper.x() },
                if normal.y() < 0.0 { lower.y() } else { upper.y() },
                if normal.z() < 0.0 { lower.z() } else { upper.z() },
            );
            plane.compute_signed_distance(&farthest_corner) >= 0.0
        })
    }

    fn plane_from_unnormalized_coefficients(
        normal_x: f32,
        normal_y: f32,
        normal_z: f32,
        displacement: f32,
    ) -> Plane {
        let normal = Vector3::new(normal_x, normal_y, normal_z);
        let magnitude = normal.norm();
        Plane::new(normal / magnitude, displacement / magnitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use parallax_math::{DepthRange, Radians};

    const EPSILON: f32 = 1e-5;

    fn view_frustum() -> (Matrix4, Frustum) {
        let matrix = Matrix4::from_perspective(
            Radians(1.0),
            1.0,
            0.5,
            50.0,
            DepthRange::NegativeOneToOne,
        );
        let frustum = Frustum::from_transform_matrix(&matrix);
        (matrix, frustum)
    }

    #[test]
    fn frustum_planes_have_unit_normals() {
        let (_, frustum) = view_frustum();
        for plane in frustum.planes() {
            assert_abs_diff_eq!(plane.unit_normal().norm(), 1.0, epsilon = EPSILON);
        }
    }

    #[test]
    fn near_and_far_planes_sit_at_the_clip_distances() {
        let (_, frustum) = view_frustum();
        assert_abs_diff_eq!(
            frustum
                .near_plane()
                .compute_signed_distance(&Vector3::new(0.0, 0.0, -0.5)),
            0.0,
            epsilon = EPSILON
        );
        assert_abs_diff_eq!(
            frustum
                .far_plane()
                .compute_signed_distance(&Vector3::new(0.0, 0.0, -50.0)),
            0.0,
            epsilon = 1e-3
        );
    }

    #[test]
    fn point_containment_matches_the_matrix_level_test() {
        let (matrix, frustum) = view_frustum();
        for point in [
            Vector3::new(0.0, 0.0, -1.0),
            Vector3::new(0.4, -0.3, -10.0),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(0.0, 0.0, -100.0),
            Vector3::new(30.0, 0.0, -10.0),
        ] {
            assert_eq!(
                frustum.contains_point(&point),
                matrix.test_point(point.x(), point.y(), point.z()),
                "containment mismatch for {point:?}"
            );
        }
    }

    #[test]
    fn sphere_containment_includes_boundary_overlaps() {
        let (_, frustum) = view_frustum();
        assert!(frustum.could_contain_sphere(&Vector3::new(0.0, 0.0, -10.0), 1.0));
        assert!(frustum.could_contain_sphere(&Vector3::new(0.0, 0.0, 0.2), 1.0));
        assert!(!frustum.could_contain_sphere(&Vector3::new(0.0, 0.0, 10.0), 1.0));
    }

    #[test]
    fn box_containment_uses_the_farthest_corner() {
        let (_, frustum) = view_frustum();
        assert!(
            frustum.could_contain_axis_aligned_box(
                &Vector3::new(-1.0, -1.0, -20.0),
                &Vector3::new(1.0, 1.0, -10.0)
            )
        );
        assert!(
            !frustum.could_contain_axis_aligned_box(
                &Vector3::new(10.0, 10.0, 1.0),
                &Vector3::new(11.0, 11.0, 2.0)
            )
        );
    }
}
