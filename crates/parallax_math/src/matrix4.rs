//! 4x4 homogeneous transform matrices.

use crate::{
    angle::Angle,
    matrix3::Matrix3,
    quaternion::Quaternion,
    vector::{Vector3, Vector4},
};
use approx::{AbsDiffEq, RelativeEq};
use bytemuck::{Pod, Zeroable};
use std::{fmt, ops::Mul};

/// Substituted for the depth terms that would otherwise divide by infinity
/// when a projection plane lies at infinity.
const INFINITE_PLANE_EPSILON: f32 = 1e-6;

/// The clip-space depth convention a projection matrix maps into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepthRange {
    /// Depth mapped to `[0, 1]` (Direct3D/Vulkan/WebGPU style).
    ZeroToOne,
    /// Depth mapped to `[-1, 1]` (OpenGL style).
    NegativeOneToOne,
}

impl DepthRange {
    #[inline]
    const fn depth_scale(self) -> f32 {
        match self {
            Self::ZeroToOne => 1.0,
            Self::NegativeOneToOne => 2.0,
        }
    }
}

/// A 4x4 homogeneous transform matrix with column-major storage. The fourth
/// column holds the translation.
///
/// The algebraic structure of the matrix (identity, pure translation, affine,
/// perspective) is derived on demand from the entries, never cached, and is
/// used to select the cheapest numerically-equivalent algorithm for
/// composition, inversion and transform application. Every specialized path
/// produces the same result as the generic one up to floating-point rounding.
///
/// Singular matrices are not guarded against: inverting one silently yields
/// non-finite entries that propagate into downstream results.
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Zeroable, Pod)]
pub struct Matrix4 {
    column_1: Vector4,
    column_2: Vector4,
    column_3: Vector4,
    column_4: Vector4,
}

impl Matrix4 {
    /// Creates the identity matrix.
    #[inline]
    pub const fn identity() -> Self {
        Self::from_columns(
            Vector4::unit_x(),
            Vector4::unit_y(),
            Vector4::unit_z(),
            Vector4::unit_w(),
        )
    }

    /// Creates a matrix with all zeros.
    #[inline]
    pub const fn zeros() -> Self {
        Self::from_columns(
            Vector4::zeros(),
            Vector4::zeros(),
            Vector4::zeros(),
            Vector4::zeros(),
        )
    }

    /// Creates a diagonal matrix with the given vector as the diagonal.
    #[inline]
    pub const fn from_diagonal(diagonal: &Vector4) -> Self {
        let mut m = Self::zeros();
        *m.column_1.x_mut() = diagonal.x();
        *m.column_2.y_mut() = diagonal.y();
        *m.column_3.z_mut() = diagonal.z();
        *m.column_4.w_mut() = diagonal.w();
        m
    }

    /// Creates a matrix with the given columns.
    #[inline]
    pub const fn from_columns(
        column_1: Vector4,
        column_2: Vector4,
        column_3: Vector4,
        column_4: Vector4,
    ) -> Self {
        Self {
            column_1,
            column_2,
            column_3,
            column_4,
        }
    }

    /// Creates the homogeneous transform applying the given translation.
    #[inline]
    pub const fn from_translation(translation: &Vector3) -> Self {
        let mut m = Self::identity();
        m.column_4 = Vector4::new(translation.x(), translation.y(), translation.z(), 1.0);
        m
    }

    /// Creates the homogeneous transform applying the given scaling along
    /// each axis.
    #[inline]
    pub const fn from_scaling(scaling: &Vector3) -> Self {
        let mut m = Self::identity();
        *m.column_1.x_mut() = scaling.x();
        *m.column_2.y_mut() = scaling.y();
        *m.column_3.z_mut() = scaling.z();
        m
    }

    /// Creates the homogeneous transform applying the given uniform scaling.
    #[inline]
    pub const fn from_uniform_scaling(scaling: f32) -> Self {
        Self::from_scaling(&Vector3::same(scaling))
    }

    /// Creates the homogeneous transform rotating by the given angle in
    /// radians around the x-axis.
    pub fn from_rotation_x(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from_columns(
            Vector4::unit_x(),
            Vector4::new(0.0, cos, sin, 0.0),
            Vector4::new(0.0, -sin, cos, 0.0),
            Vector4::unit_w(),
        )
    }

    /// Creates the homogeneous transform rotating by the given angle in
    /// radians around the y-axis.
    pub fn from_rotation_y(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from_columns(
            Vector4::new(cos, 0.0, -sin, 0.0),
            Vector4::unit_y(),
            Vector4::new(sin, 0.0, cos, 0.0),
            Vector4::unit_w(),
        )
    }

    /// Creates the homogeneous transform rotating by the given angle in
    /// radians around the z-axis.
    pub fn from_rotation_z(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from_columns(
            Vector4::new(cos, sin, 0.0, 0.0),
            Vector4::new(-sin, cos, 0.0, 0.0),
            Vector4::unit_z(),
            Vector4::unit_w(),
        )
    }

    /// Creates the homogeneous transform rotating by the given angle in
    /// radians around the given axis. The axis is normalized first; a
    /// zero-length axis yields non-finite entries.
    pub fn from_axis_angle(axis: &Vector3, angle: f32) -> Self {
        let [r1, r2, r3] = rotation_columns(axis, angle);
        Self::from_columns(
            r1.extended(0.0),
            r2.extended(0.0),
            r3.extended(0.0),
            Vector4::unit_w(),
        )
    }

    /// Creates the homogeneous rotation matrix corresponding to the given
    /// unit quaternion.
    #[inline]
    pub fn from_unit_quaternion(rotation: &Quaternion) -> Self {
        rotation.to_homogeneous_matrix()
    }

    /// Creates a right-handed perspective projection with the given vertical
    /// field of view, width-to-height aspect ratio and near/far distances.
    ///
    /// An infinite far or near distance is admitted and produces a
    /// well-defined reverse-Z-friendly matrix rather than NaN entries.
    pub fn from_perspective<A: Angle>(
        vertical_fov: A,
        aspect_ratio: f32,
        near: f32,
        far: f32,
        depth_range: DepthRange,
    ) -> Self {
        let h = (0.5 * vertical_fov.radians()).tan();
        let (m22, m32) = perspective_depth_terms(near, far, depth_range);
        Self::from_columns(
            Vector4::new(1.0 / (h * aspect_ratio), 0.0, 0.0, 0.0),
            Vector4::new(0.0, 1.0 / h, 0.0, 0.0),
            Vector4::new(0.0, 0.0, m22, -1.0),
            Vector4::new(0.0, 0.0, m32, 0.0),
        )
    }

    /// Creates a left-handed perspective projection with the given vertical
    /// field of view, width-to-height aspect ratio and near/far distances.
    pub fn from_perspective_lh<A: Angle>(
        vertical_fov: A,
        aspect_ratio: f32,
        near: f32,
        far: f32,
        depth_range: DepthRange,
    ) -> Self {
        let h = (0.5 * vertical_fov.radians()).tan();
        let (m22, m32) = perspective_depth_terms(near, far, depth_range);
        Self::from_columns(
            Vector4::new(1.0 / (h * aspect_ratio), 0.0, 0.0, 0.0),
            Vector4::new(0.0, 1.0 / h, 0.0, 0.0),
            Vector4::new(0.0, 0.0, -m22, 1.0),
            Vector4::new(0.0, 0.0, m32, 0.0),
        )
    }

    /// Creates a right-handed, possibly off-center, perspective projection
    /// for the frustum with the given bounds on the near plane.
    pub fn from_frustum(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
        depth_range: DepthRange,
    ) -> Self {
        let (m22, m32) = perspective_depth_terms(near, far, depth_range);
        Self::from_columns(
            Vector4::new(2.0 * near / (right - left), 0.0, 0.0, 0.0),
            Vector4::new(0.0, 2.0 * near / (top - bottom), 0.0, 0.0),
            Vector4::new(
                (right + left) / (right - left),
                (top + bottom) / (top - bottom),
                m22,
                -1.0,
            ),
            Vector4::new(0.0, 0.0, m32, 0.0),
        )
    }

    /// Creates a left-handed, possibly off-center, perspective projection
    /// for the frustum with the given bounds on the near plane.
    pub fn from_frustum_lh(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
        depth_range: DepthRange,
    ) -> Self {
        let (m22, m32) = perspective_depth_terms(near, far, depth_range);
        Self::from_columns(
            Vector4::new(2.0 * near / (right - left), 0.0, 0.0, 0.0),
            Vector4::new(0.0, 2.0 * near / (top - bottom), 0.0, 0.0),
            Vector4::new(
                -(right + left) / (right - left),
                -(top + bottom) / (top - bottom),
                -m22,
                1.0,
            ),
            Vector4::new(0.0, 0.0, m32, 0.0),
        )
    }

    /// Creates a right-handed orthographic projection for the given view box.
    pub fn from_orthographic(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
        depth_range: DepthRange,
    ) -> Self {
        let (m22, m32) = orthographic_depth_terms(near, far, depth_range);
        Self::from_columns(
            Vector4::new(2.0 / (right - left), 0.0, 0.0, 0.0),
            Vector4::new(0.0, 2.0 / (top - bottom), 0.0, 0.0),
            Vector4::new(0.0, 0.0, m22, 0.0),
            Vector4::new(
                (left + right) / (left - right),
                (top + bottom) / (bottom - top),
                m32,
                1.0,
            ),
        )
    }

    /// Creates a left-handed orthographic projection for the given view box.
    pub fn from_orthographic_lh(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
        depth_range: DepthRange,
    ) -> Self {
        let mut m = Self::from_orthographic(left, right, bottom, top, near, far, depth_range);
        let m22 = m.column_3.z();
        *m.column_3.z_mut() = -m22;
        m
    }

    /// Creates a right-handed orthographic projection for a view box centered
    /// on the z-axis with the given width and height.
    pub fn from_orthographic_symmetric(
        width: f32,
        height: f32,
        near: f32,
        far: f32,
        depth_range: DepthRange,
    ) -> Self {
        let (m22, m32) = orthographic_depth_terms(near, far, depth_range);
        Self::from_columns(
            Vector4::new(2.0 / width, 0.0, 0.0, 0.0),
            Vector4::new(0.0, 2.0 / height, 0.0, 0.0),
            Vector4::new(0.0, 0.0, m22, 0.0),
            Vector4::new(0.0, 0.0, m32, 1.0),
        )
    }

    /// Creates a right-handed view matrix for an observer at `eye` looking at
    /// `center`, with `up` indicating the upward direction.
    ///
    /// The camera basis is built from two cross products: forward with up
    /// gives the right vector, and right with forward gives the corrected up
    /// vector. Degenerate inputs (zero direction, up parallel to the
    /// direction) yield non-finite entries.
    pub fn from_look_at(eye: &Vector3, center: &Vector3, up: &Vector3) -> Self {
        Self::view_from_basis(eye, &(center - eye), up)
    }

    /// Creates a right-handed view matrix for an observer at `eye` looking
    /// along `direction`, with `up` indicating the upward direction.
    pub fn from_look_along(eye: &Vector3, direction: &Vector3, up: &Vector3) -> Self {
        Self::view_from_basis(eye, direction, up)
    }

    fn view_from_basis(eye: &Vector3, direction: &Vector3, up: &Vector3) -> Self {
        let forward = direction.normalized();
        let right = forward.cross(up).normalized();
        let up_corrected = right.cross(&forward);
        Self::from_columns(
            Vector4::new(right.x(), up_corrected.x(), -forward.x(), 0.0),
            Vector4::new(right.y(), up_corrected.y(), -forward.y(), 0.0),
            Vector4::new(right.z(), up_corrected.z(), -forward.z(), 0.0),
            Vector4::new(
                -right.dot(eye),
                -up_corrected.dot(eye),
                forward.dot(eye),
                1.0,
            ),
        )
    }

    /// Whether the last row of the matrix is exactly `(0, 0, 0, 1)`, meaning
    /// it has no projective component.
    #[inline]
    pub fn is_affine(&self) -> bool {
        self.column_1.w() == 0.0
            && self.column_2.w() == 0.0
            && self.column_3.w() == 0.0
            && self.column_4.w() == 1.0
    }

    /// Whether the matrix is affine with the upper-left 3x3 block exactly the
    /// identity, meaning it applies a pure translation.
    #[inline]
    pub fn is_translation(&self) -> bool {
        self.is_affine()
            && self.column_1.xyz() == Vector3::unit_x()
            && self.column_2.xyz() == Vector3::unit_y()
            && self.column_3.xyz() == Vector3::unit_z()
    }

    /// Whether the orthonormal inversion fast path applies to this matrix.
    ///
    /// This is an alias of [`is_translation`](Self::is_translation): the fast
    /// path only triggers for translation-only matrices, not for general
    /// rotation-plus-translation ones. [`inverted_orthonormal`]
    /// (Self::inverted_orthonormal) itself is valid for the latter and can be
    /// called directly.
    #[inline]
    pub fn is_orthonormal(&self) -> bool {
        self.is_translation()
    }

    /// Whether the matrix is exactly the identity.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.is_translation() && self.column_4 == Vector4::unit_w()
    }

    /// Whether the matrix has the zero pattern of a (possibly off-center)
    /// perspective projection.
    #[inline]
    pub fn is_perspective(&self) -> bool {
        self.column_1.y() == 0.0
            && self.column_1.z() == 0.0
            && self.column_1.w() == 0.0
            && self.column_2.x() == 0.0
            && self.column_2.z() == 0.0
            && self.column_2.w() == 0.0
            && self.column_4.x() == 0.0
            && self.column_4.y() == 0.0
            && self.column_4.w() == 0.0
    }

    /// The first column of the matrix.
    #[inline]
    pub const fn column_1(&self) -> &Vector4 {
        &self.column_1
    }

    /// The second column of the matrix.
    #[inline]
    pub const fn column_2(&self) -> &Vector4 {
        &self.column_2
    }

    /// The third column of the matrix.
    #[inline]
    pub const fn column_3(&self) -> &Vector4 {
        &self.column_3
    }

    /// The fourth column of the matrix.
    #[inline]
    pub const fn column_4(&self) -> &Vector4 {
        &self.column_4
    }

    /// Sets the first column of the matrix to the given column.
    #[inline]
    pub const fn set_column_1(&mut self, column: Vector4) {
        self.column_1 = column;
    }

    /// Sets the second column of the matrix to the given column.
    #[inline]
    pub const fn set_column_2(&mut self, column: Vector4) {
        self.column_2 = column;
    }

    /// Sets the third column of the matrix to the given column.
    #[inline]
    pub const fn set_column_3(&mut self, column: Vector4) {
        self.column_3 = column;
    }

    /// Sets the fourth column of the matrix to the given column.
    #[inline]
    pub const fn set_column_4(&mut self, column: Vector4) {
        self.column_4 = column;
    }

    /// Returns the column at index `j`.
    ///
    /// # Panics
    /// If the index is outside the matrix.
    #[inline]
    pub fn column(&self, j: usize) -> Vector4 {
        match j {
            0 => self.column_1,
            1 => self.column_2,
            2 => self.column_3,
            3 => self.column_4,
            _ => panic!("index out of bounds"),
        }
    }

    /// Sets the column at index `j` to the given column.
    ///
    /// # Panics
    /// If the index is outside the matrix.
    #[inline]
    pub fn set_column(&mut self, j: usize, column: Vector4) {
        match j {
            0 => self.column_1 = column,
            1 => self.column_2 = column,
            2 => self.column_3 = column,
            3 => self.column_4 = column,
            _ => panic!("index out of bounds"),
        }
    }

    /// Returns the row at index `i`.
    ///
    /// # Panics
    /// If the index is outside the matrix.
    #[inline]
    pub fn row(&self, i: usize) -> Vector4 {
        Vector4::new(
            self.column_1[i],
            self.column_2[i],
            self.column_3[i],
            self.column_4[i],
        )
    }

    /// Sets the row at index `i` to the given row.
    ///
    /// # Panics
    /// If the index is outside the matrix.
    #[inline]
    pub fn set_row(&mut self, i: usize, row: Vector4) {
        self.column_1[i] = row.x();
        self.column_2[i] = row.y();
        self.column_3[i] = row.z();
        self.column_4[i] = row.w();
    }

    /// Returns the element at row `i` and column `j`.
    ///
    /// # Panics
    /// If the indices are outside the matrix.
    #[inline]
    pub fn element(&self, i: usize, j: usize) -> f32 {
        match j {
            0 => self.column_1[i],
            1 => self.column_2[i],
            2 => self.column_3[i],
            3 => self.column_4[i],
            _ => panic!("index out of bounds"),
        }
    }

    /// Returns a mutable reference to the element at row `i` and column `j`.
    ///
    /// # Panics
    /// If the indices are outside the matrix.
    #[inline]
    pub fn element_mut(&mut self, i: usize, j: usize) -> &mut f32 {
        match j {
            0 => &mut self.column_1[i],
            1 => &mut self.column_2[i],
            2 => &mut self.column_3[i],
            3 => &mut self.column_4[i],
            _ => panic!("index out of bounds"),
        }
    }

    /// Returns the diagonal of this matrix as a vector.
    #[inline]
    pub const fn diagonal(&self) -> Vector4 {
        Vector4::new(
            self.column_1.x(),
            self.column_2.y(),
            self.column_3.z(),
            self.column_4.w(),
        )
    }

    /// The upper-left 3x3 block holding the linear (rotation and scaling)
    /// part of the transform.
    #[inline]
    pub fn linear_part(&self) -> Matrix3 {
        Matrix3::from_columns(
            self.column_1.xyz(),
            self.column_2.xyz(),
            self.column_3.xyz(),
        )
    }

    /// The translation column of the matrix.
    #[inline]
    pub const fn translation(&self) -> Vector3 {
        self.column_4.xyz()
    }

    /// Replaces the translation column of the matrix, leaving the rest
    /// untouched.
    #[inline]
    pub fn set_translation(&mut self, translation: &Vector3) {
        self.column_4 = translation.extended(self.column_4.w());
    }

    /// The norms of the three linear columns, i.e. the scaling the matrix
    /// applies along its local axes.
    #[inline]
    pub fn scaling(&self) -> Vector3 {
        Vector3::new(
            self.column_1.xyz().norm(),
            self.column_2.xyz().norm(),
            self.column_3.xyz().norm(),
        )
    }

    /// Multiplies this matrix with the one given, selecting the cheapest
    /// algorithm the operand structures admit. Every branch agrees with
    /// [`multiplied_generic`](Self::multiplied_generic) up to floating-point
    /// rounding.
    pub fn multiplied(&self, rhs: &Self) -> Self {
        if self.is_identity() {
            *rhs
        } else if rhs.is_identity() {
            *self
        } else if self.is_translation() && rhs.is_affine() {
            self.multiplied_translation_affine(rhs)
        } else if self.is_affine() && rhs.is_affine() {
            self.multiplied_affine(rhs)
        } else if self.is_perspective() && rhs.is_affine() {
            self.multiplied_perspective_affine(rhs)
        } else if rhs.is_affine() {
            self.multiplied_affine_rhs(rhs)
        } else {
            self.multiplied_generic(rhs)
        }
    }

    /// Multiplies this translation-only matrix with the given affine matrix.
    /// Only the translation column needs computing.
    pub fn multiplied_translation_affine(&self, rhs: &Self) -> Self {
        Self::from_columns(
            rhs.column_1,
            rhs.column_2,
            rhs.column_3,
            Vector4::new(
                rhs.column_4.x() + self.column_4.x(),
                rhs.column_4.y() + self.column_4.y(),
                rhs.column_4.z() + self.column_4.z(),
                1.0,
            ),
        )
    }

    /// Multiplies this affine matrix with the given affine matrix, skipping
    /// the last row, which is known to be `(0, 0, 0, 1)`.
    pub fn multiplied_affine(&self, rhs: &Self) -> Self {
        let [a00, a01, a02, _, a10, a11, a12, _, a20, a21, a22, _, a30, a31, a32, _] =
            self.entries();
        let [b00, b01, b02, _, b10, b11, b12, _, b20, b21, b22, _, b30, b31, b32, _] =
            rhs.entries();
        Self::from_columns(
            Vector4::new(
                a00 * b00 + a10 * b01 + a20 * b02,
                a01 * b00 + a11 * b01 + a21 * b02,
                a02 * b00 + a12 * b01 + a22 * b02,
                0.0,
            ),
            Vector4::new(
                a00 * b10 + a10 * b11 + a20 * b12,
                a01 * b10 + a11 * b11 + a21 * b12,
                a02 * b10 + a12 * b11 + a22 * b12,
                0.0,
            ),
            Vector4::new(
                a00 * b20 + a10 * b21 + a20 * b22,
                a01 * b20 + a11 * b21 + a21 * b22,
                a02 * b20 + a12 * b21 + a22 * b22,
                0.0,
            ),
            Vector4::new(
                a00 * b30 + a10 * b31 + a20 * b32 + a30,
                a01 * b30 + a11 * b31 + a21 * b32 + a31,
                a02 * b30 + a12 * b31 + a22 * b32 + a32,
                1.0,
            ),
        )
    }

    /// Multiplies this perspective matrix with the given affine matrix,
    /// exploiting the zero pattern of the perspective projection. The
    /// off-center terms of the projection are included.
    pub fn multiplied_perspective_affine(&self, rhs: &Self) -> Self {
        let a00 = self.column_1.x();
        let a11 = self.column_2.y();
        let a20 = self.column_3.x();
        let a21 = self.column_3.y();
        let a22 = self.column_3.z();
        let a23 = self.column_3.w();
        let a32 = self.column_4.z();
        let [b00, b01, b02, _, b10, b11, b12, _, b20, b21, b22, _, b30, b31, b32, _] =
            rhs.entries();
        Self::from_columns(
            Vector4::new(
                a00 * b00 + a20 * b02,
                a11 * b01 + a21 * b02,
                a22 * b02,
                a23 * b02,
            ),
            Vector4::new(
                a00 * b10 + a20 * b12,
                a11 * b11 + a21 * b12,
                a22 * b12,
                a23 * b12,
            ),
            Vector4::new(
                a00 * b20 + a20 * b22,
                a11 * b21 + a21 * b22,
                a22 * b22,
                a23 * b22,
            ),
            Vector4::new(
                a00 * b30 + a20 * b32,
                a11 * b31 + a21 * b32,
                a22 * b32 + a32,
                a23 * b32,
            ),
        )
    }

    /// Multiplies this matrix with the given affine matrix, skipping the
    /// terms involving the affine operand's known last row.
    pub fn multiplied_affine_rhs(&self, rhs: &Self) -> Self {
        let [
            a00,
            a01,
            a02,
            a03,
            a10,
            a11,
            a12,
            a13,
            a20,
            a21,
            a22,
            a23,
            a30,
            a31,
            a32,
            a33,
        ] = self.entries();
        let [b00, b01, b02, _, b10, b11, b12, _, b20, b21, b22, _, b30, b31, b32, _] =
            rhs.entries();
        Self::from_columns(
            Vector4::new(
                a00 * b00 + a10 * b01 + a20 * b02,
                a01 * b00 + a11 * b01 + a21 * b02,
                a02 * b00 + a12 * b01 + a22 * b02,
                a03 * b00 + a13 * b01 + a23 * b02,
            ),
            Vector4::new(
                a00 * b10 + a10 * b11 + a20 * b12,
                a01 * b10 + a11 * b11 + a21 * b12,
                a02 * b10 + a12 * b11 + a22 * b12,
                a03 * b10 + a13 * b11 + a23 * b12,
            ),
            Vector4::new(
                a00 * b20 + a10 * b21 + a20 * b22,
                a01 * b20 + a11 * b21 + a21 * b22,
                a02 * b20 + a12 * b21 + a22 * b22,
                a03 * b20 + a13 * b21 + a23 * b22,
            ),
            Vector4::new(
                a00 * b30 + a10 * b31 + a20 * b32 + a30,
                a01 * b30 + a11 * b31 + a21 * b32 + a31,
                a02 * b30 + a12 * b31 + a22 * b32 + a32,
                a03 * b30 + a13 * b31 + a23 * b32 + a33,
            ),
        )
    }

    /// Multiplies this matrix with the one given using the full 4x4 product.
    pub fn multiplied_generic(&self, rhs: &Self) -> Self {
        let [
            a00,
            a01,
            a02,
            a03,
            a10,
            a11,
            a12,
            a13,
            a20,
            a21,
            a22,
            a23,
            a30,
            a31,
            a32,
            a33,
        ] = self.entries();
        let [
            b00,
            b01,
            b02,
            b03,
            b10,
            b11,
            b12,
            b13,
            b20,
            b21,
            b22,
            b23,
            b30,
            b31,
            b32,
            b33,
        ] = rhs.entries();
        Self::from_columns(
            Vector4::new(
                a00 * b00 + a10 * b01 + a20 * b02 + a30 * b03,
                a01 * b00 + a11 * b01 + a21 * b02 + a31 * b03,
                a02 * b00 + a12 * b01 + a22 * b02 + a32 * b03,
                a03 * b00 + a13 * b01 + a23 * b02 + a33 * b03,
            ),
            Vector4::new(
                a00 * b10 + a10 * b11 + a20 * b12 + a30 * b13,
                a01 * b10 + a11 * b11 + a21 * b12 + a31 * b13,
                a02 * b10 + a12 * b11 + a22 * b12 + a32 * b13,
                a03 * b10 + a13 * b11 + a23 * b12 + a33 * b13,
            ),
            Vector4::new(
                a00 * b20 + a10 * b21 + a20 * b22 + a30 * b23,
                a01 * b20 + a11 * b21 + a21 * b22 + a31 * b23,
                a02 * b20 + a12 * b21 + a22 * b22 + a32 * b23,
                a03 * b20 + a13 * b21 + a23 * b22 + a33 * b23,
            ),
            Vector4::new(
                a00 * b30 + a10 * b31 + a20 * b32 + a30 * b33,
                a01 * b30 + a11 * b31 + a21 * b32 + a31 * b33,
                a02 * b30 + a12 * b31 + a22 * b32 + a32 * b33,
                a03 * b30 + a13 * b31 + a23 * b32 + a33 * b33,
            ),
        )
    }

    /// Returns the inverse of this matrix, selecting the cheapest algorithm
    /// the matrix structure admits. If the matrix is not invertible, the
    /// result will be non-finite.
    pub fn inverted(&self) -> Self {
        if self.is_identity() {
            *self
        } else if self.is_translation() {
            self.inverted_translation()
        } else if self.is_orthonormal() {
            self.inverted_orthonormal()
        } else if self.is_affine() {
            self.inverted_affine()
        } else if self.is_perspective() {
            self.inverted_perspective()
        } else {
            self.inverted_generic()
        }
    }

    /// Returns the inverse of this translation-only matrix by negating the
    /// translation column.
    pub fn inverted_translation(&self) -> Self {
        let mut m = Self::identity();
        m.column_4 = Vector4::new(
            -self.column_4.x(),
            -self.column_4.y(),
            -self.column_4.z(),
            1.0,
        );
        m
    }

    /// Returns the inverse of this matrix assuming its linear block is an
    /// orthonormal rotation, so the block inverts by transposition and the
    /// translation by `-Rᵀt`.
    pub fn inverted_orthonormal(&self) -> Self {
        let [m00, m01, m02, _, m10, m11, m12, _, m20, m21, m22, _, m30, m31, m32, _] =
            self.entries();
        Self::from_columns(
            Vector4::new(m00, m10, m20, 0.0),
            Vector4::new(m01, m11, m21, 0.0),
            Vector4::new(m02, m12, m22, 0.0),
            Vector4::new(
                -(m00 * m30 + m01 * m31 + m02 * m32),
                -(m10 * m30 + m11 * m31 + m12 * m32),
                -(m20 * m30 + m21 * m31 + m22 * m32),
                1.0,
            ),
        )
    }

    /// Returns the inverse of this affine matrix in closed form: the linear
    /// block inverts through its cofactors and determinant, the translation
    /// is solved algebraically, and the last row is skipped.
    pub fn inverted_affine(&self) -> Self {
        let [m00, m01, m02, _, m10, m11, m12, _, m20, m21, m22, _, m30, m31, m32, _] =
            self.entries();

        let s = 1.0 / self.determinant_affine();

        let nm00 = (m11 * m22 - m21 * m12) * s;
        let nm01 = (m21 * m02 - m01 * m22) * s;
        let nm02 = (m01 * m12 - m11 * m02) * s;
        let nm10 = (m20 * m12 - m10 * m22) * s;
        let nm11 = (m00 * m22 - m20 * m02) * s;
        let nm12 = (m10 * m02 - m00 * m12) * s;
        let nm20 = (m10 * m21 - m20 * m11) * s;
        let nm21 = (m20 * m01 - m00 * m21) * s;
        let nm22 = (m00 * m11 - m10 * m01) * s;

        Self::from_columns(
            Vector4::new(nm00, nm01, nm02, 0.0),
            Vector4::new(nm10, nm11, nm12, 0.0),
            Vector4::new(nm20, nm21, nm22, 0.0),
            Vector4::new(
                -(nm00 * m30 + nm10 * m31 + nm20 * m32),
                -(nm01 * m30 + nm11 * m31 + nm21 * m32),
                -(nm02 * m30 + nm12 * m31 + nm22 * m32),
                1.0,
            ),
        )
    }

    /// Returns the inverse of this perspective matrix in closed form,
    /// exploiting its zero pattern. The off-center terms are included.
    pub fn inverted_perspective(&self) -> Self {
        let m00 = self.column_1.x();
        let m11 = self.column_2.y();
        let m20 = self.column_3.x();
        let m21 = self.column_3.y();
        let m22 = self.column_3.z();
        let m23 = self.column_3.w();
        let m32 = self.column_4.z();

        let inv_m23 = 1.0 / m23;
        let inv_m32 = 1.0 / m32;

        Self::from_columns(
            Vector4::new(1.0 / m00, 0.0, 0.0, 0.0),
            Vector4::new(0.0, 1.0 / m11, 0.0, 0.0),
            Vector4::new(0.0, 0.0, 0.0, inv_m32),
            Vector4::new(
                -m20 * inv_m23 / m00,
                -m21 * inv_m23 / m11,
                inv_m23,
                -m22 * inv_m23 * inv_m32,
            ),
        )
    }

    /// Returns the inverse of this matrix via Laplace expansion, reusing six
    /// 2x2 sub-determinants across all 16 entries.
    pub fn inverted_generic(&self) -> Self {
        let [
            m00,
            m01,
            m02,
            m03,
            m10,
            m11,
            m12,
            m13,
            m20,
            m21,
            m22,
            m23,
            m30,
            m31,
            m32,
            m33,
        ] = self.entries();

        let a = m00 * m11 - m01 * m10;
        let b = m00 * m12 - m02 * m10;
        let c = m00 * m13 - m03 * m10;
        let d = m01 * m12 - m02 * m11;
        let e = m01 * m13 - m03 * m11;
        let f = m02 * m13 - m03 * m12;
        let g = m20 * m31 - m21 * m30;
        let h = m20 * m32 - m22 * m30;
        let i = m20 * m33 - m23 * m30;
        let j = m21 * m32 - m22 * m31;
        let k = m21 * m33 - m23 * m31;
        let l = m22 * m33 - m23 * m32;

        let det = a * l - b * k + c * j + d * i - e * h + f * g;
        let s = 1.0 / det;

        Self::from_columns(
            Vector4::new(
                (m11 * l - m12 * k + m13 * j) * s,
                (-m01 * l + m02 * k - m03 * j) * s,
                (m31 * f - m32 * e + m33 * d) * s,
                (-m21 * f + m22 * e - m23 * d) * s,
            ),
            Vector4::new(
                (-m10 * l + m12 * i - m13 * h) * s,
                (m00 * l - m02 * i + m03 * h) * s,
                (-m30 * f + m32 * c - m33 * b) * s,
                (m20 * f - m22 * c + m23 * b) * s,
            ),
            Vector4::new(
                (m10 * k - m11 * i + m13 * g) * s,
                (-m00 * k + m01 * i - m03 * g) * s,
                (m30 * e - m31 * c + m33 * a) * s,
                (-m20 * e + m21 * c - m23 * a) * s,
            ),
            Vector4::new(
                (-m10 * j + m11 * h - m12 * g) * s,
                (m00 * j - m01 * h + m02 * g) * s,
                (-m30 * d + m31 * b - m32 * a) * s,
                (m20 * d - m21 * b + m22 * a) * s,
            ),
        )
    }

    /// Computes the determinant of this matrix, using the affine shortcut
    /// when the last row is `(0, 0, 0, 1)`.
    pub fn determinant(&self) -> f32 {
        if self.is_affine() {
            self.determinant_affine()
        } else {
            let [
                m00,
                m01,
                m02,
                m03,
                m10,
                m11,
                m12,
                m13,
                m20,
                m21,
                m22,
                m23,
                m30,
                m31,
                m32,
                m33,
            ] = self.entries();
            (m00 * m11 - m01 * m10) * (m22 * m33 - m23 * m32)
                - (m00 * m12 - m02 * m10) * (m21 * m33 - m23 * m31)
                + (m00 * m13 - m03 * m10) * (m21 * m32 - m22 * m31)
                + (m01 * m12 - m02 * m11) * (m20 * m33 - m23 * m30)
                - (m01 * m13 - m03 * m11) * (m20 * m32 - m22 * m30)
                + (m02 * m13 - m03 * m12) * (m20 * m31 - m21 * m30)
        }
    }

    /// Computes the determinant of the upper-left 3x3 block, which equals the
    /// full determinant for an affine matrix.
    pub fn determinant_affine(&self) -> f32 {
        let [m00, m01, m02, _, m10, m11, m12, _, m20, m21, m22, _, _, _, _, _] = self.entries();
        m00 * (m11 * m22 - m21 * m12) - m10 * (m01 * m22 - m21 * m02)
            + m20 * (m01 * m12 - m11 * m02)
    }

    /// Returns the transpose of this matrix.
    pub fn transposed(&self) -> Self {
        let [
            m00,
            m01,
            m02,
            m03,
            m10,
            m11,
            m12,
            m13,
            m20,
            m21,
            m22,
            m23,
            m30,
            m31,
            m32,
            m33,
        ] = self.entries();
        Self::from_columns(
            Vector4::new(m00, m10, m20, m30),
            Vector4::new(m01, m11, m21, m31),
            Vector4::new(m02, m12, m22, m32),
            Vector4::new(m03, m13, m23, m33),
        )
    }

    /// Returns this matrix with a translation by the given vector applied
    /// after its own transform (`M * T`).
    pub fn translated(&self, translation: &Vector3) -> Self {
        if self.is_identity() {
            Self::from_translation(translation)
        } else if self.is_affine() {
            self.translated_affine(translation)
        } else {
            self.translated_generic(translation)
        }
    }

    /// Like [`translated`](Self::translated) with the translation given as
    /// scalars.
    #[inline]
    pub fn translated_scalars(&self, x: f32, y: f32, z: f32) -> Self {
        self.translated(&Vector3::new(x, y, z))
    }

    /// Applies [`translated`](Self::translated) in place.
    #[inline]
    pub fn translate(&mut self, translation: &Vector3) {
        *self = self.translated(translation);
    }

    fn translated_affine(&self, translation: &Vector3) -> Self {
        let (x, y, z) = (translation.x(), translation.y(), translation.z());
        Self::from_columns(
            self.column_1,
            self.column_2,
            self.column_3,
            Vector4::new(
                self.column_1.x() * x
                    + self.column_2.x() * y
                    + self.column_3.x() * z
                    + self.column_4.x(),
                self.column_1.y() * x
                    + self.column_2.y() * y
                    + self.column_3.y() * z
                    + self.column_4.y(),
                self.column_1.z() * x
                    + self.column_2.z() * y
                    + self.column_3.z() * z
                    + self.column_4.z(),
                1.0,
            ),
        )
    }

    fn translated_generic(&self, translation: &Vector3) -> Self {
        let (x, y, z) = (translation.x(), translation.y(), translation.z());
        let column_4 =
            self.column_1 * x + self.column_2 * y + self.column_3 * z + self.column_4;
        Self::from_columns(self.column_1, self.column_2, self.column_3, column_4)
    }

    /// Returns this matrix with a rotation by the given angle in radians
    /// around the x-axis applied after its own transform (`M * Rx`).
    pub fn rotated_x(&self, angle: f32) -> Self {
        if self.is_identity() {
            return Self::from_rotation_x(angle);
        }
        let (sin, cos) = angle.sin_cos();
        let (nc2, nc3) = if self.is_affine() {
            (
                rotated_column_affine(&self.column_2, &self.column_3, cos, sin),
                rotated_column_affine(&self.column_3, &self.column_2, cos, -sin),
            )
        } else {
            (
                self.column_2 * cos + self.column_3 * sin,
                self.column_3 * cos - self.column_2 * sin,
            )
        };
        Self::from_columns(self.column_1, nc2, nc3, self.column_4)
    }

    /// Returns this matrix with a rotation by the given angle in radians
    /// around the y-axis applied after its own transform (`M * Ry`).
    pub fn rotated_y(&self, angle: f32) -> Self {
        if self.is_identity() {
            return Self::from_rotation_y(angle);
        }
        let (sin, cos) = angle.sin_cos();
        let (nc1, nc3) = if self.is_affine() {
            (
                rotated_column_affine(&self.column_1, &self.column_3, cos, -sin),
                rotated_column_affine(&self.column_3, &self.column_1, cos, sin),
            )
        } else {
            (
                self.column_1 * cos - self.column_3 * sin,
                self.column_3 * cos + self.column_1 * sin,
            )
        };
        Self::from_columns(nc1, self.column_2, nc3, self.column_4)
    }

    /// Returns this matrix with a rotation by the given angle in radians
    /// around the z-axis applied after its own transform (`M * Rz`).
    pub fn rotated_z(&self, angle: f32) -> Self {
        if self.is_identity() {
            return Self::from_rotation_z(angle);
        }
        let (sin, cos) = angle.sin_cos();
        let (nc1, nc2) = if self.is_affine() {
            (
                rotated_column_affine(&self.column_1, &self.column_2, cos, sin),
                rotated_column_affine(&self.column_2, &self.column_1, cos, -sin),
            )
        } else {
            (
                self.column_1 * cos + self.column_2 * sin,
                self.column_2 * cos - self.column_1 * sin,
            )
        };
        Self::from_columns(nc1, nc2, self.column_3, self.column_4)
    }

    /// Applies [`rotated_x`](Self::rotated_x) in place.
    #[inline]
    pub fn rotate_x(&mut self, angle: f32) {
        *self = self.rotated_x(angle);
    }

    /// Applies [`rotated_y`](Self::rotated_y) in place.
    #[inline]
    pub fn rotate_y(&mut self, angle: f32) {
        *self = self.rotated_y(angle);
    }

    /// Applies [`rotated_z`](Self::rotated_z) in place.
    #[inline]
    pub fn rotate_z(&mut self, angle: f32) {
        *self = self.rotated_z(angle);
    }

    /// Returns this matrix with a rotation by the given angle in radians
    /// around the given axis applied after its own transform (`M * R`).
    ///
    /// When the axis is aligned with a cardinal axis, the rotation reduces to
    /// the dedicated [`rotated_x`](Self::rotated_x)/[`rotated_y`]
    /// (Self::rotated_y)/[`rotated_z`](Self::rotated_z) forms. The axis is
    /// normalized first; a zero-length axis yields non-finite entries.
    pub fn rotated_axis_angle(&self, axis: &Vector3, angle: f32) -> Self {
        let (x, y, z) = (axis.x(), axis.y(), axis.z());
        if y == 0.0 && z == 0.0 && x.abs() == 1.0 {
            return self.rotated_x(x * angle);
        }
        if x == 0.0 && z == 0.0 && y.abs() == 1.0 {
            return self.rotated_y(y * angle);
        }
        if x == 0.0 && y == 0.0 && z.abs() == 1.0 {
            return self.rotated_z(z * angle);
        }

        if self.is_identity() {
            return Self::from_axis_angle(axis, angle);
        }

        let [r1, r2, r3] = rotation_columns(axis, angle);
        let (nc1, nc2, nc3) = if self.is_affine() {
            (
                self.linear_combination_affine(&r1),
                self.linear_combination_affine(&r2),
                self.linear_combination_affine(&r3),
            )
        } else {
            (
                self.linear_combination(&r1),
                self.linear_combination(&r2),
                self.linear_combination(&r3),
            )
        };
        Self::from_columns(nc1, nc2, nc3, self.column_4)
    }

    /// Applies [`rotated_axis_angle`](Self::rotated_axis_angle) in place.
    #[inline]
    pub fn rotate_axis_angle(&mut self, axis: &Vector3, angle: f32) {
        *self = self.rotated_axis_angle(axis, angle);
    }

    /// Returns this matrix with a scaling along each axis applied after its
    /// own transform (`M * S`).
    pub fn scaled(&self, scaling: &Vector3) -> Self {
        if self.is_identity() {
            Self::from_scaling(scaling)
        } else if self.is_affine() {
            Self::from_columns(
                scaled_column_affine(&self.column_1, scaling.x()),
                scaled_column_affine(&self.column_2, scaling.y()),
                scaled_column_affine(&self.column_3, scaling.z()),
                self.column_4,
            )
        } else {
            Self::from_columns(
                self.column_1 * scaling.x(),
                self.column_2 * scaling.y(),
                self.column_3 * scaling.z(),
                self.column_4,
            )
        }
    }

    /// Like [`scaled`](Self::scaled) with the scaling given as scalars.
    #[inline]
    pub fn scaled_scalars(&self, x: f32, y: f32, z: f32) -> Self {
        self.scaled(&Vector3::new(x, y, z))
    }

    /// Returns this matrix with a uniform scaling applied after its own
    /// transform.
    #[inline]
    pub fn scaled_uniform(&self, scaling: f32) -> Self {
        self.scaled(&Vector3::same(scaling))
    }

    /// Applies [`scaled`](Self::scaled) in place.
    #[inline]
    pub fn scale(&mut self, scaling: &Vector3) {
        *self = self.scaled(scaling);
    }

    /// Returns this matrix with a right-handed view transform for an observer
    /// at `eye` looking at `center` applied after its own transform, folding
    /// the view matrix in with the cheapest composition the receiver
    /// structure admits.
    pub fn look_at(&self, eye: &Vector3, center: &Vector3, up: &Vector3) -> Self {
        let view = Self::from_look_at(eye, center, up);
        self.composed_with_view(&view)
    }

    /// Returns this matrix with a right-handed view transform for an observer
    /// at `eye` looking along `direction` applied after its own transform.
    pub fn look_along(&self, eye: &Vector3, direction: &Vector3, up: &Vector3) -> Self {
        let view = Self::from_look_along(eye, direction, up);
        self.composed_with_view(&view)
    }

    fn composed_with_view(&self, view: &Self) -> Self {
        if self.is_identity() {
            *view
        } else if self.is_perspective() {
            self.multiplied_perspective_affine(view)
        } else {
            self.multiplied_affine_rhs(view)
        }
    }

    /// Transforms the given point (`w = 1`), dropping the w-component of the
    /// result.
    pub fn transform_point(&self, point: &Vector3) -> Vector3 {
        let (x, y, z) = (point.x(), point.y(), point.z());
        Vector3::new(
            self.column_1.x() * x
                + self.column_2.x() * y
                + self.column_3.x() * z
                + self.column_4.x(),
            self.column_1.y() * x
                + self.column_2.y() * y
                + self.column_3.y() * z
                + self.column_4.y(),
            self.column_1.z() * x
                + self.column_2.z() * y
                + self.column_3.z() * z
                + self.column_4.z(),
        )
    }

    /// Transforms the given direction (`w = 0`), ignoring the translation
    /// column.
    pub fn transform_vector(&self, vector: &Vector3) -> Vector3 {
        let (x, y, z) = (vector.x(), vector.y(), vector.z());
        Vector3::new(
            self.column_1.x() * x + self.column_2.x() * y + self.column_3.x() * z,
            self.column_1.y() * x + self.column_2.y() * y + self.column_3.y() * z,
            self.column_1.z() * x + self.column_2.z() * y + self.column_3.z() * z,
        )
    }

    /// Transforms the given point (`w = 1`) through the full homogeneous
    /// transform and divides by the resulting w-component. A w-component of
    /// zero yields non-finite components.
    pub fn project_point(&self, point: &Vector3) -> Vector3 {
        let (x, y, z) = (point.x(), point.y(), point.z());
        let inv_w = 1.0
            / (self.column_1.w() * x
                + self.column_2.w() * y
                + self.column_3.w() * z
                + self.column_4.w());
        self.transform_point(point) * inv_w
    }

    /// Transforms the given position into window coordinates: the clip-space
    /// transform followed by perspective division and the viewport mapping
    /// `(x, y, width, height)`. The window depth maps the `[-1, 1]`
    /// normalized depth range to `[0, 1]`.
    pub fn project(&self, position: &Vector3, viewport: [f32; 4]) -> Vector3 {
        let ndc = self.project_point(position);
        Vector3::new(
            (ndc.x() * 0.5 + 0.5) * viewport[2] + viewport[0],
            (ndc.y() * 0.5 + 0.5) * viewport[3] + viewport[1],
            (1.0 + ndc.z()) * 0.5,
        )
    }

    /// Maps the given window coordinates back through the inverse of this
    /// matrix, undoing [`project`](Self::project). Computes the full inverse;
    /// use [`unproject_inverse`](Self::unproject_inverse) with a precomputed
    /// inverse when unprojecting many points.
    pub fn unproject(&self, window: &Vector3, viewport: [f32; 4]) -> Vector3 {
        self.inverted().unproject_inverse(window, viewport)
    }

    /// Like [`unproject`](Self::unproject), but assumes this matrix is
    /// already the inverse of the projection to undo.
    pub fn unproject_inverse(&self, window: &Vector3, viewport: [f32; 4]) -> Vector3 {
        let ndc = Vector3::new(
            (window.x() - viewport[0]) / viewport[2] * 2.0 - 1.0,
            (window.y() - viewport[1]) / viewport[3] * 2.0 - 1.0,
            2.0 * window.z() - 1.0,
        );
        self.project_point(&ndc)
    }

    /// The position this matrix transforms to the origin. For a view matrix
    /// this is the observer position.
    pub fn origin(&self) -> Vector3 {
        if self.is_affine() {
            self.origin_affine()
        } else {
            let inverse = self.inverted_generic();
            inverse.column_4.xyz() / inverse.column_4.w()
        }
    }

    /// Like [`origin`](Self::origin), assuming the matrix is affine so only
    /// the inverse translation column needs computing.
    pub fn origin_affine(&self) -> Vector3 {
        let [m00, m01, m02, _, m10, m11, m12, _, m20, m21, m22, _, m30, m31, m32, _] =
            self.entries();
        let s = 1.0 / self.determinant_affine();
        let nm00 = (m11 * m22 - m21 * m12) * s;
        let nm01 = (m21 * m02 - m01 * m22) * s;
        let nm02 = (m01 * m12 - m11 * m02) * s;
        let nm10 = (m20 * m12 - m10 * m22) * s;
        let nm11 = (m00 * m22 - m20 * m02) * s;
        let nm12 = (m10 * m02 - m00 * m12) * s;
        let nm20 = (m10 * m21 - m20 * m11) * s;
        let nm21 = (m20 * m01 - m00 * m21) * s;
        let nm22 = (m00 * m11 - m10 * m01) * s;
        Vector3::new(
            -(nm00 * m30 + nm10 * m31 + nm20 * m32),
            -(nm01 * m30 + nm11 * m31 + nm21 * m32),
            -(nm02 * m30 + nm12 * m31 + nm22 * m32),
        )
    }

    /// The world-space direction this view matrix maps to the positive
    /// x-axis.
    pub fn positive_x_axis(&self) -> Vector3 {
        let rows = self.linear_rows();
        rows[1].cross(&rows[2]).normalized()
    }

    /// The world-space direction this view matrix maps to the positive
    /// y-axis.
    pub fn positive_y_axis(&self) -> Vector3 {
        let rows = self.linear_rows();
        rows[2].cross(&rows[0]).normalized()
    }

    /// The world-space direction this view matrix maps to the positive
    /// z-axis.
    pub fn positive_z_axis(&self) -> Vector3 {
        let rows = self.linear_rows();
        rows[0].cross(&rows[1]).normalized()
    }

    /// Extracts the rotation angles `(x, y, z)` such that the linear block
    /// equals `Rx(x) * Ry(y) * Rz(z)`. The block must be a pure rotation.
    pub fn euler_angles_xyz(&self) -> Vector3 {
        let [m00, _, _, _, m10, _, _, _, m20, m21, m22, _, _, _, _, _] = self.entries();
        Vector3::new(
            (-m21).atan2(m22),
            m20.atan2((1.0 - m20 * m20).sqrt()),
            (-m10).atan2(m00),
        )
    }

    /// Extracts the rotation angles `(x, y, z)` such that the linear block
    /// equals `Rz(z) * Ry(y) * Rx(x)`. The block must be a pure rotation.
    pub fn euler_angles_zyx(&self) -> Vector3 {
        let [m00, m01, m02, _, _, _, m12, _, _, _, m22, _, _, _, _, _] = self.entries();
        Vector3::new(
            m12.atan2(m22),
            (-m02).atan2((1.0 - m02 * m02).sqrt()),
            m01.atan2(m00),
        )
    }

    /// Whether the given point lies inside the frustum of the clip space this
    /// matrix transforms into. The six clip planes are extracted from the
    /// matrix rows.
    pub fn test_point(&self, x: f32, y: f32, z: f32) -> bool {
        self.clip_planes()
            .iter()
            .all(|p| p.x() * x + p.y() * y + p.z() * z + p.w() >= 0.0)
    }

    /// Whether a sphere with the given center and radius could intersect the
    /// frustum of the clip space this matrix transforms into. The test errs
    /// on the side of inclusion for spheres near a frustum edge.
    pub fn test_sphere(&self, x: f32, y: f32, z: f32, radius: f32) -> bool {
        self.clip_planes().iter().all(|p| {
            let norm = (p.x() * p.x() + p.y() * p.y() + p.z() * p.z()).sqrt();
            p.x() * x + p.y() * y + p.z() * z + p.w() >= -radius * norm
        })
    }

    /// Whether an axis-aligned box with the given corners could intersect the
    /// frustum of the clip space this matrix transforms into. For each plane,
    /// only the box corner farthest along the plane normal is tested.
    pub fn test_aab(&self, min: &Vector3, max: &Vector3) -> bool {
        self.clip_planes().iter().all(|p| {
            let x = if p.x() < 0.0 { min.x() } else { max.x() };
            let y = if p.y() < 0.0 { min.y() } else { max.y() };
            let z = if p.z() < 0.0 { min.z() } else { max.z() };
            p.x() * x + p.y() * y + p.z() * z + p.w() >= 0.0
        })
    }

    /// The six unnormalized clip-plane coefficient vectors `(a, b, c, d)` of
    /// this matrix in the order left, right, bottom, top, near, far, each
    /// with the inside of the frustum in its positive halfspace.
    pub fn clip_planes(&self) -> [Vector4; 6] {
        let row_0 = self.row(0);
        let row_1 = self.row(1);
        let row_2 = self.row(2);
        let row_3 = self.row(3);
        [
            row_3 + row_0,
            row_3 - row_0,
            row_3 + row_1,
            row_3 - row_1,
            row_3 + row_2,
            row_3 - row_2,
        ]
    }

    /// Writes the 16 entries of this matrix into the given slice in row-major
    /// order, starting at `offset`.
    ///
    /// # Panics
    /// If the slice is too short to hold the entries.
    pub fn write_row_major(&self, dest: &mut [f32], offset: usize) {
        let [
            m00,
            m01,
            m02,
            m03,
            m10,
            m11,
            m12,
            m13,
            m20,
            m21,
            m22,
            m23,
            m30,
            m31,
            m32,
            m33,
        ] = self.entries();
        dest[offset..offset + 16].copy_from_slice(&[
            m00, m10, m20, m30, m01, m11, m21, m31, m02, m12, m22, m32, m03, m13, m23, m33,
        ]);
    }

    /// Sets the 16 entries of this matrix from the given slice in row-major
    /// order, starting at `offset`.
    ///
    /// # Panics
    /// If the slice is too short to hold the entries.
    pub fn set_from_row_major(&mut self, src: &[f32], offset: usize) {
        let e = &src[offset..offset + 16];
        self.column_1 = Vector4::new(e[0], e[4], e[8], e[12]);
        self.column_2 = Vector4::new(e[1], e[5], e[9], e[13]);
        self.column_3 = Vector4::new(e[2], e[6], e[10], e[14]);
        self.column_4 = Vector4::new(e[3], e[7], e[11], e[15]);
    }

    /// The rows of the upper-left 3x3 block.
    fn linear_rows(&self) -> [Vector3; 3] {
        [
            Vector3::new(self.column_1.x(), self.column_2.x(), self.column_3.x()),
            Vector3::new(self.column_1.y(), self.column_2.y(), self.column_3.y()),
            Vector3::new(self.column_1.z(), self.column_2.z(), self.column_3.z()),
        ]
    }

    /// The linear combination of the first three columns with the given
    /// coefficients, over all four rows.
    fn linear_combination(&self, coefficients: &Vector3) -> Vector4 {
        self.column_1 * coefficients.x()
            + self.column_2 * coefficients.y()
            + self.column_3 * coefficients.z()
    }

    /// Like [`linear_combination`](Self::linear_combination), skipping the
    /// last row, which is known to be zero for the first three columns of an
    /// affine matrix.
    fn linear_combination_affine(&self, coefficients: &Vector3) -> Vector4 {
        let (x, y, z) = (coefficients.x(), coefficients.y(), coefficients.z());
        Vector4::new(
            self.column_1.x() * x + self.column_2.x() * y + self.column_3.x() * z,
            self.column_1.y() * x + self.column_2.y() * y + self.column_3.y() * z,
            self.column_1.z() * x + self.column_2.z() * y + self.column_3.z() * z,
            0.0,
        )
    }

    /// The 16 entries of the matrix in column-major order.
    pub(crate) const fn entries(&self) -> [f32; 16] {
        [
            self.column_1.x(),
            self.column_1.y(),
            self.column_1.z(),
            self.column_1.w(),
            self.column_2.x(),
            self.column_2.y(),
            self.column_2.z(),
            self.column_2.w(),
            self.column_3.x(),
            self.column_3.y(),
            self.column_3.z(),
            self.column_3.w(),
            self.column_4.x(),
            self.column_4.y(),
            self.column_4.z(),
            self.column_4.w(),
        ]
    }
}

/// The depth terms `(m22, m32)` of a right-handed perspective projection,
/// substituting a small epsilon for the terms that vanish when the far or
/// near plane lies at infinity.
fn perspective_depth_terms(near: f32, far: f32, depth_range: DepthRange) -> (f32, f32) {
    let far_infinite = far > 0.0 && far.is_infinite();
    let near_infinite = near > 0.0 && near.is_infinite();
    let depth_scale = depth_range.depth_scale();
    if far_infinite {
        let e = INFINITE_PLANE_EPSILON;
        (e - 1.0, (e - depth_scale) * near)
    } else if near_infinite {
        let e = INFINITE_PLANE_EPSILON;
        (depth_scale - 1.0 - e, (depth_scale - e) * far)
    } else {
        let m22 = match depth_range {
            DepthRange::ZeroToOne => far,
            DepthRange::NegativeOneToOne => far + near,
        } / (near - far);
        let m32 = match depth_range {
            DepthRange::ZeroToOne => far,
            DepthRange::NegativeOneToOne => 2.0 * far,
        } * near
            / (near - far);
        (m22, m32)
    }
}

/// The depth terms `(m22, m32)` of a right-handed orthographic projection,
/// substituting a small epsilon for the terms that vanish when the far or
/// near plane lies at infinity.
fn orthographic_depth_terms(near: f32, far: f32, depth_range: DepthRange) -> (f32, f32) {
    let far_infinite = far > 0.0 && far.is_infinite();
    let near_infinite = near > 0.0 && near.is_infinite();
    let depth_scale = depth_range.depth_scale();
    if far_infinite {
        let m22 = -depth_scale * INFINITE_PLANE_EPSILON;
        let offset = match depth_range {
            DepthRange::ZeroToOne => 0.0,
            DepthRange::NegativeOneToOne => -1.0,
        };
        (m22, offset + m22 * near)
    } else if near_infinite {
        let m22 = depth_scale * INFINITE_PLANE_EPSILON;
        (m22, 1.0 + m22 * far)
    } else {
        let m22 = depth_scale / (near - far);
        let m32 = match depth_range {
            DepthRange::ZeroToOne => near,
            DepthRange::NegativeOneToOne => far + near,
        } / (near - far);
        (m22, m32)
    }
}

/// The three linear columns of the rotation by the given angle around the
/// given axis, which is normalized first.
fn rotation_columns(axis: &Vector3, angle: f32) -> [Vector3; 3] {
    let axis = axis.normalized();
    let (x, y, z) = (axis.x(), axis.y(), axis.z());
    let (sin, cos) = angle.sin_cos();
    let versine = 1.0 - cos;
    [
        Vector3::new(
            x * x * versine + cos,
            x * y * versine + z * sin,
            x * z * versine - y * sin,
        ),
        Vector3::new(
            x * y * versine - z * sin,
            y * y * versine + cos,
            y * z * versine + x * sin,
        ),
        Vector3::new(
            x * z * versine + y * sin,
            y * z * versine - x * sin,
            z * z * versine + cos,
        ),
    ]
}

/// The linear rotation update `first * cos + second * sin` of an affine
/// column, with the last row left at zero.
fn rotated_column_affine(first: &Vector4, second: &Vector4, cos: f32, sin: f32) -> Vector4 {
    Vector4::new(
        first.x() * cos + second.x() * sin,
        first.y() * cos + second.y() * sin,
        first.z() * cos + second.z() * sin,
        0.0,
    )
}

/// An affine column scaled in its first three components, with the last row
/// left at zero.
fn scaled_column_affine(column: &Vector4, scaling: f32) -> Vector4 {
    Vector4::new(
        column.x() * scaling,
        column.y() * scaling,
        column.z() * scaling,
        0.0,
    )
}

impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..4 {
            let row = self.row(i);
            writeln!(
                f,
                "{:>14.7} {:>14.7} {:>14.7} {:>14.7}",
                row.x(),
                row.y(),
                row.z(),
                row.w()
            )?;
        }
        Ok(())
    }
}

impl_binop!(Add, add, Matrix4, Matrix4, Matrix4, |a, b| {
    Matrix4::from_columns(
        a.column_1 + b.column_1,
        a.column_2 + b.column_2,
        a.column_3 + b.column_3,
        a.column_4 + b.column_4,
    )
});

impl_binop!(Sub, sub, Matrix4, Matrix4, Matrix4, |a, b| {
    Matrix4::from_columns(
        a.column_1 - b.column_1,
        a.column_2 - b.column_2,
        a.column_3 - b.column_3,
        a.column_4 - b.column_4,
    )
});

impl_binop!(Mul, mul, Matrix4, Matrix4, Matrix4, |a, b| {
    a.multiplied(b)
});

impl_binop!(Mul, mul, Matrix4, Vector4, Vector4, |a, b| {
    let (x, y, z, w) = (b.x(), b.y(), b.z(), b.w());
    a.column_1 * x + a.column_2 * y + a.column_3 * z + a.column_4 * w
});

impl_binop!(Mul, mul, Matrix4, f32, Matrix4, |a, b| {
    Matrix4::from_columns(
        a.column_1 * *b,
        a.column_2 * *b,
        a.column_3 * *b,
        a.column_4 * *b,
    )
});

impl_binop!(Mul, mul, f32, Matrix4, Matrix4, |a, b| { b.mul(*a) });

impl_binop!(Div, div, Matrix4, f32, Matrix4, |a, b| {
    a.mul(b.recip())
});

impl_unary_op!(Neg, neg, Matrix4, Matrix4, |val| {
    Matrix4::from_columns(-val.column_1, -val.column_2, -val.column_3, -val.column_4)
});

impl_abs_diff_eq!(Matrix4, |a, b, epsilon| {
    a.column_1.abs_diff_eq(&b.column_1, epsilon)
        && a.column_2.abs_diff_eq(&b.column_2, epsilon)
        && a.column_3.abs_diff_eq(&b.column_3, epsilon)
        && a.column_4.abs_diff_eq(&b.column_4, epsilon)
});

impl_relative_eq!(Matrix4, |a, b, epsilon, max_relative| {
    a.column_1.relative_eq(&b.column_1, epsilon, max_relative)
        && a.column_2.relative_eq(&b.column_2, epsilon, max_relative)
        && a.column_3.relative_eq(&b.column_3, epsilon, max_relative)
        && a.column_4.relative_eq(&b.column_4, epsilon, max_relative)
});
