//! Quaternions.

use crate::{matrix3::Matrix3, matrix4::Matrix4, vector::Vector3};
use approx::{AbsDiffEq, RelativeEq};
use bytemuck::{Pod, Zeroable};

/// A rotation quaternion with components `(x, y, z, w)`.
///
/// A quaternion of unit norm represents a pure rotation; any other norm
/// represents the same rotation combined with a uniform scaling by the
/// squared norm. Normalization is never enforced, callers invoke
/// [`normalize`](Self::normalize) explicitly.
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Zeroable, Pod)]
pub struct Quaternion {
    x: f32,
    y: f32,
    z: f32,
    w: f32,
}

impl Quaternion {
    /// Creates a new quaternion with the given components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Creates the identity quaternion, representing no rotation.
    #[inline]
    pub const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Creates the unit quaternion representing a rotation by the given angle
    /// in radians around the given axis. The axis is normalized first; a
    /// zero-length axis yields non-finite components.
    pub fn from_axis_angle(axis: &Vector3, angle: f32) -> Self {
        let half = 0.5 * angle;
        let sin = half.sin() / axis.norm();
        Self::new(
            axis.x() * sin,
            axis.y() * sin,
            axis.z() * sin,
            half.cos(),
        )
    }

    /// Creates the unit quaternion representing the rotation
    /// `Rx(x) * Ry(y) * Rz(z)` with the given angles in radians.
    pub fn from_euler_angles_xyz(x: f32, y: f32, z: f32) -> Self {
        let (sx, cx) = (0.5 * x).sin_cos();
        let (sy, cy) = (0.5 * y).sin_cos();
        let (sz, cz) = (0.5 * z).sin_cos();

        let cycz = cy * cz;
        let sysz = sy * sz;
        let sycz = sy * cz;
        let cysz = cy * sz;

        Self::new(
            sx * cycz + cx * sysz,
            cx * sycz - sx * cysz,
            cx * cysz + sx * sycz,
            cx * cycz - sx * sysz,
        )
    }

    /// The x-component.
    #[inline]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// The y-component.
    #[inline]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// The z-component.
    #[inline]
    pub const fn z(&self) -> f32 {
        self.z
    }

    /// The w-component.
    #[inline]
    pub const fn w(&self) -> f32 {
        self.w
    }

    /// The real (scalar) part of the quaternion.
    #[inline]
    pub const fn real(&self) -> f32 {
        self.w
    }

    /// The imaginary (vector) part of the quaternion.
    #[inline]
    pub const fn imag(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Computes the dot product of this quaternion with another.
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Computes the norm of the quaternion.
    #[inline]
    pub fn norm(&self) -> f32 {
        self.norm_squared().sqrt()
    }

    /// Computes the square of the norm of the quaternion.
    #[inline]
    pub fn norm_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Normalizes the quaternion to unit length in place. A zero quaternion
    /// yields non-finite components.
    #[inline]
    pub fn normalize(&mut self) {
        *self = self.normalized();
    }

    /// Computes the normalized version of the quaternion. A zero quaternion
    /// yields non-finite components.
    #[inline]
    pub fn normalized(&self) -> Self {
        let inv_norm = 1.0 / self.norm();
        Self::new(
            self.x * inv_norm,
            self.y * inv_norm,
            self.z * inv_norm,
            self.w * inv_norm,
        )
    }

    /// Returns the conjugate of this quaternion, which for a unit quaternion
    /// is its inverse rotation.
    #[inline]
    pub const fn conjugated(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Returns the multiplicative inverse of this quaternion. For a zero
    /// quaternion the result is non-finite.
    #[inline]
    pub fn inverted(&self) -> Self {
        let inv_norm_squared = 1.0 / self.norm_squared();
        Self::new(
            -self.x * inv_norm_squared,
            -self.y * inv_norm_squared,
            -self.z * inv_norm_squared,
            self.w * inv_norm_squared,
        )
    }

    /// Returns the quaternion with all components negated. It represents the
    /// same rotation as the original.
    #[inline]
    pub const fn negated(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }

    /// Computes the Hamilton product `self * rhs`. When the product is used
    /// to transform a vector, the rotation of `rhs` is applied first.
    pub fn multiplied(&self, rhs: &Self) -> Self {
        Self::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }

    /// Computes the Hamilton product `lhs * self`.
    #[inline]
    pub fn premultiplied(&self, lhs: &Self) -> Self {
        lhs.multiplied(self)
    }

    /// Rotates the given vector with this quaternion. For a non-unit
    /// quaternion the result is additionally scaled by the squared norm.
    pub fn transform_vector(&self, vector: &Vector3) -> Vector3 {
        let Self { x, y, z, w } = *self;
        let (xx, yy, zz, ww) = (x * x, y * y, z * z, w * w);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (xw, yw, zw) = (x * w, y * w, z * w);

        let (vx, vy, vz) = (vector.x(), vector.y(), vector.z());
        Vector3::new(
            (xx - yy - zz + ww) * vx + 2.0 * ((xy - zw) * vy + (xz + yw) * vz),
            (yy - xx - zz + ww) * vy + 2.0 * ((xy + zw) * vx + (yz - xw) * vz),
            (zz - xx - yy + ww) * vz + 2.0 * ((xz - yw) * vx + (yz + xw) * vy),
        )
    }

    /// The world-space direction of the x-axis after rotation by this unit
    /// quaternion.
    #[inline]
    pub fn positive_x_axis(&self) -> Vector3 {
        let Self { x, y, z, w } = *self;
        Vector3::new(
            1.0 - 2.0 * (y * y + z * z),
            2.0 * (x * y + z * w),
            2.0 * (x * z - y * w),
        )
    }

    /// The world-space direction of the y-axis after rotation by this unit
    /// quaternion.
    #[inline]
    pub fn positive_y_axis(&self) -> Vector3 {
        let Self { x, y, z, w } = *self;
        Vector3::new(
            2.0 * (x * y - z * w),
            1.0 - 2.0 * (x * x + z * z),
            2.0 * (y * z + x * w),
        )
    }

    /// The world-space direction of the z-axis after rotation by this unit
    /// quaternion.
    #[inline]
    pub fn positive_z_axis(&self) -> Vector3 {
        let Self { x, y, z, w } = *self;
        Vector3::new(
            2.0 * (x * z + y * w),
            2.0 * (y * z - x * w),
            1.0 - 2.0 * (x * x + y * y),
        )
    }

    /// Converts this unit quaternion to the corresponding rotation matrix.
    pub fn to_rotation_matrix(&self) -> Matrix3 {
        Matrix3::from_columns(
            self.positive_x_axis(),
            self.positive_y_axis(),
            self.positive_z_axis(),
        )
    }

    /// Converts this unit quaternion to the corresponding homogeneous
    /// rotation matrix.
    pub fn to_homogeneous_matrix(&self) -> Matrix4 {
        Matrix4::from_columns(
            self.positive_x_axis().extended(0.0),
            self.positive_y_axis().extended(0.0),
            self.positive_z_axis().extended(0.0),
            crate::vector::Vector4::unit_w(),
        )
    }

    /// Creates the unit quaternion corresponding to the given pure rotation
    /// matrix. The matrix columns must be orthonormal.
    ///
    /// Branches on the largest diagonal term to stay numerically stable for
    /// rotations near 180 degrees.
    pub fn from_normalized_matrix3(matrix: &Matrix3) -> Self {
        let [m00, m01, m02, m10, m11, m12, m20, m21, m22] = matrix.entries();
        Self::from_normalized_entries(m00, m01, m02, m10, m11, m12, m20, m21, m22)
    }

    /// Creates the unit quaternion corresponding to the rotation part of the
    /// given matrix, whose columns may carry scaling.
    pub fn from_unnormalized_matrix3(matrix: &Matrix3) -> Self {
        let [m00, m01, m02, m10, m11, m12, m20, m21, m22] = matrix.entries();
        let inv_norm_1 = 1.0 / (m00 * m00 + m01 * m01 + m02 * m02).sqrt();
        let inv_norm_2 = 1.0 / (m10 * m10 + m11 * m11 + m12 * m12).sqrt();
        let inv_norm_3 = 1.0 / (m20 * m20 + m21 * m21 + m22 * m22).sqrt();
        Self::from_normalized_entries(
            m00 * inv_norm_1,
            m01 * inv_norm_1,
            m02 * inv_norm_1,
            m10 * inv_norm_2,
            m11 * inv_norm_2,
            m12 * inv_norm_2,
            m20 * inv_norm_3,
            m21 * inv_norm_3,
            m22 * inv_norm_3,
        )
    }

    /// Creates the unit quaternion corresponding to the rotation block of the
    /// given homogeneous transform, which must be a pure rotation.
    #[inline]
    pub fn from_normalized_matrix4(matrix: &Matrix4) -> Self {
        Self::from_normalized_matrix3(&matrix.linear_part())
    }

    /// Creates the unit quaternion corresponding to the rotation block of the
    /// given homogeneous transform, which may carry scaling.
    #[inline]
    pub fn from_unnormalized_matrix4(matrix: &Matrix4) -> Self {
        Self::from_unnormalized_matrix3(&matrix.linear_part())
    }

    #[allow(clippy::too_many_arguments)]
    fn from_normalized_entries(
        m00: f32,
        m01: f32,
        m02: f32,
        m10: f32,
        m11: f32,
        m12: f32,
        m20: f32,
        m21: f32,
        m22: f32,
    ) -> Self {
        let trace = m00 + m11 + m22;
        if trace >= 0.0 {
            let mut t = (trace + 1.0).sqrt();
            let w = 0.5 * t;
            t = 0.5 / t;
            Self::new((m12 - m21) * t, (m20 - m02) * t, (m01 - m10) * t, w)
        } else if m00 >= m11 && m00 >= m22 {
            let mut t = (m00 - (m11 + m22) + 1.0).sqrt();
            let x = 0.5 * t;
            t = 0.5 / t;
            Self::new(x, (m10 + m01) * t, (m02 + m20) * t, (m12 - m21) * t)
        } else if m11 > m22 {
            let mut t = (m11 - (m22 + m00) + 1.0).sqrt();
            let y = 0.5 * t;
            t = 0.5 / t;
            Self::new((m10 + m01) * t, y, (m21 + m12) * t, (m20 - m02) * t)
        } else {
            let mut t = (m22 - (m00 + m11) + 1.0).sqrt();
            let z = 0.5 * t;
            t = 0.5 / t;
            Self::new((m02 + m20) * t, (m21 + m12) * t, z, (m01 - m10) * t)
        }
    }
}

impl_binop!(Mul, mul, Quaternion, Quaternion, Quaternion, |a, b| {
    a.multiplied(b)
});

impl_abs_diff_eq!(Quaternion, |a, b, epsilon| {
    f32::abs_diff_eq(&a.x, &b.x, epsilon)
        && f32::abs_diff_eq(&a.y, &b.y, epsilon)
        && f32::abs_diff_eq(&a.z, &b.z, epsilon)
        && f32::abs_diff_eq(&a.w, &b.w, epsilon)
});

impl_relative_eq!(Quaternion, |a, b, epsilon, max_relative| {
    f32::relative_eq(&a.x, &b.x, epsilon, max_relative)
        && f32::relative_eq(&a.y, &b.y, epsilon, max_relative)
        && f32::relative_eq(&a.z, &b.z, epsilon, max_relative)
        && f32::relative_eq(&a.w, &b.w, epsilon, max_relative)
});

#[cfg(test)]
mod tests {
    #![allow(clippy::op_ref)]

    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::PI;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn identity_quaternion_leaves_vectors_unchanged() {
        let vector = Vector3::new(1.0, 2.0, 3.0);
        let rotated = Quaternion::identity().transform_vector(&vector);
        assert_abs_diff_eq!(rotated, vector, epsilon = EPSILON);
    }

    #[test]
    fn rotating_around_z_by_quarter_turn_maps_x_to_y() {
        let rotation = Quaternion::from_axis_angle(&Vector3::unit_z(), 0.5 * PI);
        let rotated = rotation.transform_vector(&Vector3::unit_x());
        assert_abs_diff_eq!(rotated, Vector3::unit_y(), epsilon = EPSILON);
    }

    #[test]
    fn axis_angle_quaternion_has_unit_norm() {
        let rotation = Quaternion::from_axis_angle(&Vector3::new(1.0, 2.0, 3.0), 0.7);
        assert_abs_diff_eq!(rotation.norm(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn hamilton_product_applies_right_factor_first() {
        let first = Quaternion::from_axis_angle(&Vector3::unit_z(), 0.5 * PI);
        let second = Quaternion::from_axis_angle(&Vector3::unit_x(), 0.5 * PI);

        let combined = second.multiplied(&first);
        let vector = Vector3::unit_x();

        let expected = second.transform_vector(&first.transform_vector(&vector));
        assert_abs_diff_eq!(
            combined.transform_vector(&vector),
            expected,
            epsilon = EPSILON
        );
    }

    #[test]
    fn premultiplied_reverses_multiplication_order() {
        let a = Quaternion::from_axis_angle(&Vector3::unit_y(), 0.3);
        let b = Quaternion::from_axis_angle(&Vector3::unit_x(), 0.8);
        assert_abs_diff_eq!(a.premultiplied(&b), b.multiplied(&a), epsilon = EPSILON);
    }

    #[test]
    fn conjugate_of_unit_quaternion_is_inverse_rotation() {
        let rotation = Quaternion::from_axis_angle(&Vector3::new(1.0, -1.0, 0.5), 1.1);
        let vector = Vector3::new(0.2, -3.0, 1.0);
        let round_trip = rotation
            .conjugated()
            .transform_vector(&rotation.transform_vector(&vector));
        assert_abs_diff_eq!(round_trip, vector, epsilon = 1e-5);
    }

    #[test]
    fn inverted_quaternion_gives_identity_product() {
        let rotation = Quaternion::new(0.5, -1.0, 2.0, 0.5);
        let product = rotation.multiplied(&rotation.inverted());
        assert_abs_diff_eq!(product, Quaternion::identity(), epsilon = 1e-5);
    }

    #[test]
    fn normalizing_quaternion_gives_unit_norm() {
        let mut quaternion = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        quaternion.normalize();
        assert_abs_diff_eq!(quaternion.norm(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn scaled_quaternion_scales_transformed_vector_by_squared_norm() {
        let rotation = Quaternion::from_axis_angle(&Vector3::unit_z(), 0.5 * PI);
        let scaled = Quaternion::new(
            2.0 * rotation.x(),
            2.0 * rotation.y(),
            2.0 * rotation.z(),
            2.0 * rotation.w(),
        );
        let transformed = scaled.transform_vector(&Vector3::unit_x());
        assert_abs_diff_eq!(transformed, Vector3::new(0.0, 4.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn quaternion_and_rotation_matrix_transform_vectors_identically() {
        let rotation = Quaternion::from_axis_angle(&Vector3::new(0.3, -1.2, 0.7), 2.1);
        let matrix = rotation.to_rotation_matrix();
        let vector = Vector3::new(1.5, -0.5, 2.0);
        assert_abs_diff_eq!(
            rotation.transform_vector(&vector),
            matrix.transform_vector(&vector),
            epsilon = 1e-5
        );
    }

    #[test]
    fn converting_matrix_back_to_quaternion_preserves_rotation() {
        let rotation = Quaternion::from_axis_angle(&Vector3::new(1.0, 0.5, -0.3), 1.3);
        let recovered = Quaternion::from_normalized_matrix3(&rotation.to_rotation_matrix());
        let vector = Vector3::new(-2.0, 1.0, 0.4);
        assert_abs_diff_eq!(
            recovered.transform_vector(&vector),
            rotation.transform_vector(&vector),
            epsilon = 1e-5
        );
    }

    #[test]
    fn matrix_conversion_is_stable_near_half_turn() {
        let rotation = Quaternion::from_axis_angle(&Vector3::unit_y(), PI - 1e-2);
        let recovered = Quaternion::from_normalized_matrix3(&rotation.to_rotation_matrix());
        let vector = Vector3::new(0.3, 0.7, -0.2);
        assert_abs_diff_eq!(
            recovered.transform_vector(&vector),
            rotation.transform_vector(&vector),
            epsilon = 1e-4
        );
    }

    #[test]
    fn scaled_matrix_conversion_recovers_pure_rotation() {
        let rotation = Quaternion::from_axis_angle(&Vector3::new(0.2, 1.0, 0.5), 0.9);
        let scaled = &rotation.to_rotation_matrix() * 3.0;
        let recovered = Quaternion::from_unnormalized_matrix3(&scaled);
        assert_abs_diff_eq!(recovered.norm(), 1.0, epsilon = 1e-5);
        let vector = Vector3::new(1.0, -1.0, 2.0);
        assert_abs_diff_eq!(
            recovered.transform_vector(&vector),
            rotation.transform_vector(&vector),
            epsilon = 1e-5
        );
    }

    #[test]
    fn euler_angle_quaternion_matches_composed_axis_rotations() {
        let (x, y, z) = (0.3, -0.4, 0.9);
        let composed = Quaternion::from_axis_angle(&Vector3::unit_x(), x)
            .multiplied(&Quaternion::from_axis_angle(&Vector3::unit_y(), y))
            .multiplied(&Quaternion::from_axis_angle(&Vector3::unit_z(), z));
        let direct = Quaternion::from_euler_angles_xyz(x, y, z);
        assert_abs_diff_eq!(direct, composed, epsilon = 1e-5);
    }

    #[test]
    fn quaternion_basis_axes_match_transformed_unit_vectors() {
        let rotation = Quaternion::from_axis_angle(&Vector3::new(-0.5, 0.8, 0.2), 1.7);
        assert_abs_diff_eq!(
            rotation.positive_x_axis(),
            rotation.transform_vector(&Vector3::unit_x()),
            epsilon = 1e-5
        );
        assert_abs_diff_eq!(
            rotation.positive_y_axis(),
            rotation.transform_vector(&Vector3::unit_y()),
            epsilon = 1e-5
        );
        assert_abs_diff_eq!(
            rotation.positive_z_axis(),
            rotation.transform_vector(&Vector3::unit_z()),
            epsilon = 1e-5
        );
    }
}
