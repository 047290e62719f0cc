//! Vectors.

use crate::{matrix3::Matrix3, matrix4::Matrix4, quaternion::Quaternion};
use approx::{AbsDiffEq, RelativeEq};
use bytemuck::{Pod, Zeroable};
use std::ops::{Index, IndexMut, Mul};

/// A 2-dimensional vector.
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Zeroable, Pod)]
pub struct Vector2 {
    x: f32,
    y: f32,
}

/// A 3-dimensional vector.
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Zeroable, Pod)]
pub struct Vector3 {
    x: f32,
    y: f32,
    z: f32,
}

/// A 4-dimensional vector, used both as a plain numeric tuple and as a point
/// or direction in homogeneous coordinates (`w = 1` for positions, `w = 0`
/// for directions).
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Zeroable, Pod)]
pub struct Vector4 {
    x: f32,
    y: f32,
    z: f32,
    w: f32,
}

impl Vector2 {
    /// Creates a new vector with the given components.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Creates a new vector with all zeros.
    #[inline]
    pub const fn zeros() -> Self {
        Self::same(0.0)
    }

    /// Creates a new vector with the same value for all components.
    #[inline]
    pub const fn same(value: f32) -> Self {
        Self::new(value, value)
    }

    /// The x-axis unit vector.
    #[inline]
    pub const fn unit_x() -> Self {
        Self::new(1.0, 0.0)
    }

    /// The y-axis unit vector.
    #[inline]
    pub const fn unit_y() -> Self {
        Self::new(0.0, 1.0)
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

    /// A mutable reference to the x-component.
    #[inline]
    pub const fn x_mut(&mut self) -> &mut f32 {
        &mut self.x
    }

    /// A mutable reference to the y-component.
    #[inline]
    pub const fn y_mut(&mut self) -> &mut f32 {
        &mut self.y
    }

    /// Converts the vector to 3D by appending the given z-component.
    #[inline]
    pub const fn extended(&self, z: f32) -> Vector3 {
        Vector3::new(self.x, self.y, z)
    }

    /// Computes the dot product of this vector with another.
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Computes the norm (length) of the vector.
    #[inline]
    pub fn norm(&self) -> f32 {
        self.norm_squared().sqrt()
    }

    /// Computes the square of the norm of the vector.
    #[inline]
    pub fn norm_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Computes the normalized version of the vector. If the vector has zero
    /// length, the result will be non-finite.
    #[inline]
    pub fn normalized(&self) -> Self {
        self / self.norm()
    }
}

impl Index<usize> for Vector2 {
    type Output = f32;

    #[inline]
    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("index out of bounds"),
        }
    }
}

impl IndexMut<usize> for Vector2 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("index out of bounds"),
        }
    }
}

impl_binop!(Add, add, Vector2, Vector2, Vector2, |a, b| {
    Vector2::new(a.x + b.x, a.y + b.y)
});

impl_binop!(Sub, sub, Vector2, Vector2, Vector2, |a, b| {
    Vector2::new(a.x - b.x, a.y - b.y)
});

impl_binop!(Mul, mul, Vector2, f32, Vector2, |a, b| {
    Vector2::new(a.x * b, a.y * b)
});

impl_binop!(Mul, mul, f32, Vector2, Vector2, |a, b| { b.mul(*a) });

impl_binop!(Div, div, Vector2, f32, Vector2, |a, b| {
    a.mul(b.recip())
});

impl_binop_assign!(AddAssign, add_assign, Vector2, Vector2, |a, b| {
    a.x += b.x;
    a.y += b.y;
});

impl_binop_assign!(SubAssign, sub_assign, Vector2, Vector2, |a, b| {
    a.x -= b.x;
    a.y -= b.y;
});

impl_binop_assign!(MulAssign, mul_assign, Vector2, f32, |a, b| {
    a.x *= b;
    a.y *= b;
});

impl_binop_assign!(DivAssign, div_assign, Vector2, f32, |a, b| {
    a.x /= b;
    a.y /= b;
});

impl_unary_op!(Neg, neg, Vector2, Vector2, |val| {
    Vector2::new(-val.x, -val.y)
});

impl_abs_diff_eq!(Vector2, |a, b, epsilon| {
    f32::abs_diff_eq(&a.x, &b.x, epsilon) && f32::abs_diff_eq(&a.y, &b.y, epsilon)
});

impl_relative_eq!(Vector2, |a, b, epsilon, max_relative| {
    f32::relative_eq(&a.x, &b.x, epsilon, max_relative)
        && f32::relative_eq(&a.y, &b.y, epsilon, max_relative)
});

impl Vector3 {
    /// Creates a new vector with the given components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Creates a new vector with all zeros.
    #[inline]
    pub const fn zeros() -> Self {
        Self::same(0.0)
    }

    /// Creates a new vector with the same value for all components.
    #[inline]
    pub const fn same(value: f32) -> Self {
        Self::new(value, value, value)
    }

    /// The x-axis unit vector.
    #[inline]
    pub const fn unit_x() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// The y-axis unit vector.
    #[inline]
    pub const fn unit_y() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    /// The z-axis unit vector.
    #[inline]
    pub const fn unit_z() -> Self {
        Self::new(0.0, 0.0, 1.0)
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

    /// A mutable reference to the x-component.
    #[inline]
    pub const fn x_mut(&mut self) -> &mut f32 {
        &mut self.x
    }

    /// A mutable reference to the y-component.
    #[inline]
    pub const fn y_mut(&mut self) -> &mut f32 {
        &mut self.y
    }

    /// A mutable reference to the z-component.
    #[inline]
    pub const fn z_mut(&mut self) -> &mut f32 {
        &mut self.z
    }

    /// The 2D vector containing the x- and y-components of this vector.
    #[inline]
    pub const fn xy(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    /// Converts the vector to 4D by appending the given w-component.
    #[inline]
    pub const fn extended(&self, w: f32) -> Vector4 {
        Vector4::new(self.x, self.y, self.z, w)
    }

    /// Computes the dot product of this vector with another.
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Computes the cross product of this vector with another.
    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Computes the norm (length) of the vector.
    #[inline]
    pub fn norm(&self) -> f32 {
        self.norm_squared().sqrt()
    }

    /// Computes the square of the norm of the vector.
    #[inline]
    pub fn norm_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Computes the normalized version of the vector. If the vector has zero
    /// length, the result will be non-finite.
    #[inline]
    pub fn normalized(&self) -> Self {
        self / self.norm()
    }

    /// Returns a vector with the absolute value of each component.
    #[inline]
    pub fn component_abs(&self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    /// Multiplies each component by the corresponding component in another
    /// vector.
    #[inline]
    pub fn component_mul(&self, other: &Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    /// Returns a vector where each component is the minimum of the
    /// corresponding component in this and another vector.
    #[inline]
    pub fn component_min(&self, other: &Self) -> Self {
        Self::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
        )
    }

    /// Returns a vector where each component is the maximum of the
    /// corresponding component in this and another vector.
    #[inline]
    pub fn component_max(&self, other: &Self) -> Self {
        Self::new(
            self.x.max(other.x),
            self.y.max(other.y),
            self.z.max(other.z),
        )
    }

    /// Transforms the vector with the given 3x3 matrix.
    #[inline]
    pub fn transformed(&self, matrix: &Matrix3) -> Self {
        matrix.transform_vector(self)
    }

    /// Transforms the vector as a position (`w = 1`) with the given
    /// homogeneous transform. The w-component of the result is dropped.
    #[inline]
    pub fn transformed_position(&self, matrix: &Matrix4) -> Self {
        matrix.transform_point(self)
    }

    /// Transforms the vector as a direction (`w = 0`) with the given
    /// homogeneous transform. The translation part of the transform is not
    /// applied.
    #[inline]
    pub fn transformed_direction(&self, matrix: &Matrix4) -> Self {
        matrix.transform_vector(self)
    }

    /// Transforms the vector as a position through the full homogeneous
    /// transform, including the perspective division by the resulting
    /// w-component.
    #[inline]
    pub fn transformed_projective(&self, matrix: &Matrix4) -> Self {
        matrix.project_point(self)
    }

    /// Rotates the vector with the given quaternion.
    #[inline]
    pub fn rotated_by(&self, rotation: &Quaternion) -> Self {
        rotation.transform_vector(self)
    }
}

impl Index<usize> for Vector3 {
    type Output = f32;

    #[inline]
    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("index out of bounds"),
        }
    }
}

impl IndexMut<usize> for Vector3 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("index out of bounds"),
        }
    }
}

impl_binop!(Add, add, Vector3, Vector3, Vector3, |a, b| {
    Vector3::new(a.x + b.x, a.y + b.y, a.z + b.z)
});

impl_binop!(Sub, sub, Vector3, Vector3, Vector3, |a, b| {
    Vector3::new(a.x - b.x, a.y - b.y, a.z - b.z)
});

impl_binop!(Mul, mul, Vector3, f32, Vector3, |a, b| {
    Vector3::new(a.x * b, a.y * b, a.z * b)
});

impl_binop!(Mul, mul, f32, Vector3, Vector3, |a, b| { b.mul(*a) });

impl_binop!(Div, div, Vector3, f32, Vector3, |a, b| {
    a.mul(b.recip())
});

impl_binop_assign!(AddAssign, add_assign, Vector3, Vector3, |a, b| {
    a.x += b.x;
    a.y += b.y;
    a.z += b.z;
});

impl_binop_assign!(SubAssign, sub_assign, Vector3, Vector3, |a, b| {
    a.x -= b.x;
    a.y -= b.y;
    a.z -= b.z;
});

impl_binop_assign!(MulAssign, mul_assign, Vector3, f32, |a, b| {
    a.x *= b;
    a.y *= b;
    a.z *= b;
});

impl_binop_assign!(DivAssign, div_assign, Vector3, f32, |a, b| {
    a.x /= b;
    a.y /= b;
    a.z /= b;
});

impl_unary_op!(Neg, neg, Vector3, Vector3, |val| {
    Vector3::new(-val.x, -val.y, -val.z)
});

impl_abs_diff_eq!(Vector3, |a, b, epsilon| {
    f32::abs_diff_eq(&a.x, &b.x, epsilon)
        && f32::abs_diff_eq(&a.y, &b.y, epsilon)
        && f32::abs_diff_eq(&a.z, &b.z, epsilon)
});

impl_relative_eq!(Vector3, |a, b, epsilon, max_relative| {
    f32::relative_eq(&a.x, &b.x, epsilon, max_relative)
        && f32::relative_eq(&a.y, &b.y, epsilon, max_relative)
        && f32::relative_eq(&a.z, &b.z, epsilon, max_relative)
});

impl Vector4 {
    /// Creates a new vector with the given components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a new vector with all zeros.
    #[inline]
    pub const fn zeros() -> Self {
        Self::same(0.0)
    }

    /// Creates a new vector with the same value for all components.
    #[inline]
    pub const fn same(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// The x-axis unit vector.
    #[inline]
    pub const fn unit_x() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    /// The y-axis unit vector.
    #[inline]
    pub const fn unit_y() -> Self {
        Self::new(0.0, 1.0, 0.0, 0.0)
    }

    /// The z-axis unit vector.
    #[inline]
    pub const fn unit_z() -> Self {
        Self::new(0.0, 0.0, 1.0, 0.0)
    }

    /// The w-axis unit vector.
    #[inline]
    pub const fn unit_w() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
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

    /// A mutable reference to the x-component.
    #[inline]
    pub const fn x_mut(&mut self) -> &mut f32 {
        &mut self.x
    }

    /// A mutable reference to the y-component.
    #[inline]
    pub const fn y_mut(&mut self) -> &mut f32 {
        &mut self.y
    }

    /// A mutable reference to the z-component.
    #[inline]
    pub const fn z_mut(&mut self) -> &mut f32 {
        &mut self.z
    }

    /// A mutable reference to the w-component.
    #[inline]
    pub const fn w_mut(&mut self) -> &mut f32 {
        &mut self.w
    }

    /// The 3D vector containing the x-, y- and z-components of this vector.
    #[inline]
    pub const fn xyz(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Computes the dot product of this vector with another.
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Computes the norm (length) of the vector.
    #[inline]
    pub fn norm(&self) -> f32 {
        self.norm_squared().sqrt()
    }

    /// Computes the square of the norm of the vector.
    #[inline]
    pub fn norm_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Computes the normalized version of the vector. If the vector has zero
    /// length, the result will be non-finite.
    #[inline]
    pub fn normalized(&self) -> Self {
        self / self.norm()
    }

    /// Transforms the vector with the given homogeneous transform, using all
    /// four components.
    #[inline]
    pub fn transformed(&self, matrix: &Matrix4) -> Self {
        matrix * self
    }
}

impl Index<usize> for Vector4 {
    type Output = f32;

    #[inline]
    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("index out of bounds"),
        }
    }
}

impl IndexMut<usize> for Vector4 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            3 => &mut self.w,
            _ => panic!("index out of bounds"),
        }
    }
}

impl_binop!(Add, add, Vector4, Vector4, Vector4, |a, b| {
    Vector4::new(a.x + b.x, a.y + b.y, a.z + b.z, a.w + b.w)
});

impl_binop!(Sub, sub, Vector4, Vector4, Vector4, |a, b| {
    Vector4::new(a.x - b.x, a.y - b.y, a.z - b.z, a.w - b.w)
});

impl_binop!(Mul, mul, Vector4, f32, Vector4, |a, b| {
    Vector4::new(a.x * b, a.y * b, a.z * b, a.w * b)
});

impl_binop!(Mul, mul, f32, Vector4, Vector4, |a, b| { b.mul(*a) });

impl_binop!(Div, div, Vector4, f32, Vector4, |a, b| {
    a.mul(b.recip())
});

impl_binop_assign!(AddAssign, add_assign, Vector4, Vector4, |a, b| {
    a.x += b.x;
    a.y += b.y;
    a.z += b.z;
    a.w += b.w;
});

impl_binop_assign!(SubAssign, sub_assign, Vector4, Vector4, |a, b| {
    a.x -= b.x;
    a.y -= b.y;
    a.z -= b.z;
    a.w -= b.w;
});

impl_binop_assign!(MulAssign, mul_assign, Vector4, f32, |a, b| {
    a.x *= b;
    a.y *= b;
    a.z *= b;
    a.w *= b;
});

impl_binop_assign!(DivAssign, div_assign, Vector4, f32, |a, b| {
    a.x /= b;
    a.y /= b;
    a.z /= b;
    a.w /= b;
});

impl_unary_op!(Neg, neg, Vector4, Vector4, |val| {
    Vector4::new(-val.x, -val.y, -val.z, -val.w)
});

impl_abs_diff_eq!(Vector4, |a, b, epsilon| {
    f32::abs_diff_eq(&a.x, &b.x, epsilon)
        && f32::abs_diff_eq(&a.y, &b.y, epsilon)
        && f32::abs_diff_eq(&a.z, &b.z, epsilon)
        && f32::abs_diff_eq(&a.w, &b.w, epsilon)
});

impl_relative_eq!(Vector4, |a, b, epsilon, max_relative| {
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

    const EPSILON: f32 = 1e-6;

    #[test]
    fn vector3_arithmetic_operations_work() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);

        assert_eq!(&a + &b, Vector3::new(5.0, 7.0, 9.0));
        assert_eq!(&b - &a, Vector3::new(3.0, 3.0, 3.0));
        assert_eq!(&a * 2.0, Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(2.0 * &a, Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(&b / 2.0, Vector3::new(2.0, 2.5, 3.0));
        assert_eq!(-&a, Vector3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn vector3_assignment_operations_work() {
        let mut a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(1.0, 1.0, 1.0);

        a += b;
        assert_eq!(a, Vector3::new(2.0, 3.0, 4.0));
        a -= b;
        assert_eq!(a, Vector3::new(1.0, 2.0, 3.0));
        a *= 2.0;
        assert_eq!(a, Vector3::new(2.0, 4.0, 6.0));
        a /= 2.0;
        assert_eq!(a, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn vector3_dot_product_works() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, -5.0, 6.0);
        assert_abs_diff_eq!(a.dot(&b), 12.0, epsilon = EPSILON);
    }

    #[test]
    fn vector3_cross_product_follows_right_hand_rule() {
        let x = Vector3::unit_x();
        let y = Vector3::unit_y();
        assert_abs_diff_eq!(x.cross(&y), Vector3::unit_z(), epsilon = EPSILON);
        assert_abs_diff_eq!(y.cross(&x), -Vector3::unit_z(), epsilon = EPSILON);
    }

    #[test]
    fn normalizing_vector3_gives_unit_length() {
        let v = Vector3::new(3.0, 4.0, 0.0);
        let n = v.normalized();
        assert_abs_diff_eq!(n.norm(), 1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(n, Vector3::new(0.6, 0.8, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn normalizing_zero_vector3_gives_non_finite_components() {
        let n = Vector3::zeros().normalized();
        assert!(!n.x().is_finite());
        assert!(!n.y().is_finite());
        assert!(!n.z().is_finite());
    }

    #[test]
    fn vector3_component_min_and_max_work() {
        let a = Vector3::new(1.0, 5.0, 3.0);
        let b = Vector3::new(2.0, 4.0, 3.0);
        assert_eq!(a.component_min(&b), Vector3::new(1.0, 4.0, 3.0));
        assert_eq!(a.component_max(&b), Vector3::new(2.0, 5.0, 3.0));
    }

    #[test]
    fn indexing_vector3_components_works() {
        let mut v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(v[0], 1.0);
        assert_eq!(v[1], 2.0);
        assert_eq!(v[2], 3.0);
        v[1] = 5.0;
        assert_eq!(v.y(), 5.0);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn indexing_vector3_out_of_bounds_panics() {
        let v = Vector3::zeros();
        let _ = v[3];
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn indexing_vector4_out_of_bounds_panics() {
        let v = Vector4::zeros();
        let _ = v[4];
    }

    #[test]
    fn extending_vectors_appends_component() {
        assert_eq!(Vector2::new(1.0, 2.0).extended(3.0), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(
            Vector3::new(1.0, 2.0, 3.0).extended(4.0),
            Vector4::new(1.0, 2.0, 3.0, 4.0)
        );
        assert_eq!(Vector4::new(1.0, 2.0, 3.0, 4.0).xyz(), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn transforming_position_applies_translation() {
        let m = Matrix4::from_translation(&Vector3::new(1.0, 2.0, 3.0));
        let p = Vector3::zeros().transformed_position(&m);
        assert_abs_diff_eq!(p, Vector3::new(1.0, 2.0, 3.0), epsilon = EPSILON);
    }

    #[test]
    fn transforming_direction_ignores_translation() {
        let m = Matrix4::from_translation(&Vector3::new(1.0, 2.0, 3.0));
        let d = Vector3::unit_x().transformed_direction(&m);
        assert_abs_diff_eq!(d, Vector3::unit_x(), epsilon = EPSILON);
    }

    #[test]
    fn projective_transform_divides_by_w() {
        let mut m = Matrix4::from_uniform_scaling(2.0);
        *m.element_mut(3, 3) = 2.0;
        let p = Vector3::new(1.0, 2.0, 3.0).transformed_projective(&m);
        assert_abs_diff_eq!(p, Vector3::new(1.0, 2.0, 3.0), epsilon = EPSILON);
    }

    #[test]
    fn vector4_dot_and_norm_work() {
        let v = Vector4::new(1.0, 2.0, 2.0, 4.0);
        assert_abs_diff_eq!(v.norm_squared(), 25.0, epsilon = EPSILON);
        assert_abs_diff_eq!(v.norm(), 5.0, epsilon = EPSILON);
        assert_abs_diff_eq!(v.normalized().norm(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn vector2_operations_work() {
        let a = Vector2::new(3.0, 4.0);
        assert_abs_diff_eq!(a.norm(), 5.0, epsilon = EPSILON);
        assert_abs_diff_eq!(a.normalized().norm(), 1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(a.dot(&Vector2::new(1.0, 1.0)), 7.0, epsilon = EPSILON);
        assert_eq!(&a + &Vector2::new(1.0, 1.0), Vector2::new(4.0, 5.0));
    }
}
