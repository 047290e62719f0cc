//! 3x3 matrices.

use crate::{quaternion::Quaternion, vector::Vector3};
use approx::{AbsDiffEq, RelativeEq};
use bytemuck::{Pod, Zeroable};
use std::{fmt, ops::Mul};

/// A 3x3 matrix with column-major storage, used as the rotation/scale block
/// of a homogeneous transform and as a conversion target for quaternions.
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Zeroable, Pod)]
pub struct Matrix3 {
    column_1: Vector3,
    column_2: Vector3,
    column_3: Vector3,
}

impl Matrix3 {
    /// Creates the identity matrix.
    #[inline]
    pub const fn identity() -> Self {
        Self::from_columns(Vector3::unit_x(), Vector3::unit_y(), Vector3::unit_z())
    }

    /// Creates a matrix with all zeros.
    #[inline]
    pub const fn zeros() -> Self {
        Self::from_columns(Vector3::zeros(), Vector3::zeros(), Vector3::zeros())
    }

    /// Creates a diagonal matrix with the given vector as the diagonal.
    #[inline]
    pub const fn from_diagonal(diagonal: &Vector3) -> Self {
        let mut m = Self::zeros();
        *m.column_1.x_mut() = diagonal.x();
        *m.column_2.y_mut() = diagonal.y();
        *m.column_3.z_mut() = diagonal.z();
        m
    }

    /// Creates a matrix with the given columns.
    #[inline]
    pub const fn from_columns(column_1: Vector3, column_2: Vector3, column_3: Vector3) -> Self {
        Self {
            column_1,
            column_2,
            column_3,
        }
    }

    /// Creates the rotation matrix corresponding to the given unit
    /// quaternion.
    #[inline]
    pub fn from_unit_quaternion(rotation: &Quaternion) -> Self {
        rotation.to_rotation_matrix()
    }

    /// The first column of the matrix.
    #[inline]
    pub const fn column_1(&self) -> &Vector3 {
        &self.column_1
    }

    /// The second column of the matrix.
    #[inline]
    pub const fn column_2(&self) -> &Vector3 {
        &self.column_2
    }

    /// The third column of the matrix.
    #[inline]
    pub const fn column_3(&self) -> &Vector3 {
        &self.column_3
    }

    /// Sets the first column of the matrix to the given column.
    #[inline]
    pub const fn set_column_1(&mut self, column: Vector3) {
        self.column_1 = column;
    }

    /// Sets the second column of the matrix to the given column.
    #[inline]
    pub const fn set_column_2(&mut self, column: Vector3) {
        self.column_2 = column;
    }

    /// Sets the third column of the matrix to the given column.
    #[inline]
    pub const fn set_column_3(&mut self, column: Vector3) {
        self.column_3 = column;
    }

    /// Returns the column at index `j`.
    ///
    /// # Panics
    /// If the index is outside the matrix.
    #[inline]
    pub fn column(&self, j: usize) -> Vector3 {
        match j {
            0 => self.column_1,
            1 => self.column_2,
            2 => self.column_3,
            _ => panic!("index out of bounds"),
        }
    }

    /// Sets the column at index `j` to the given column.
    ///
    /// # Panics
    /// If the index is outside the matrix.
    #[inline]
    pub fn set_column(&mut self, j: usize, column: Vector3) {
        match j {
            0 => self.column_1 = column,
            1 => self.column_2 = column,
            2 => self.column_3 = column,
            _ => panic!("index out of bounds"),
        }
    }

    /// Returns the row at index `i`.
    ///
    /// # Panics
    /// If the index is outside the matrix.
    #[inline]
    pub fn row(&self, i: usize) -> Vector3 {
        Vector3::new(self.column_1[i], self.column_2[i], self.column_3[i])
    }

    /// Sets the row at index `i` to the given row.
    ///
    /// # Panics
    /// If the index is outside the matrix.
    #[inline]
    pub fn set_row(&mut self, i: usize, row: Vector3) {
        self.column_1[i] = row.x();
        self.column_2[i] = row.y();
        self.column_3[i] = row.z();
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
            _ => panic!("index out of bounds"),
        }
    }

    /// Returns the diagonal of this matrix as a vector.
    #[inline]
    pub const fn diagonal(&self) -> Vector3 {
        Vector3::new(self.column_1.x(), self.column_2.y(), self.column_3.z())
    }

    /// Returns the transpose of this matrix.
    #[inline]
    pub fn transposed(&self) -> Self {
        let [m00, m01, m02, m10, m11, m12, m20, m21, m22] = self.entries();
        Self::from_columns(
            Vector3::new(m00, m10, m20),
            Vector3::new(m01, m11, m21),
            Vector3::new(m02, m12, m22),
        )
    }

    /// Computes the determinant of this matrix.
    #[inline]
    pub fn determinant(&self) -> f32 {
        let [m00, m01, m02, m10, m11, m12, m20, m21, m22] = self.entries();
        m00 * (m11 * m22 - m21 * m12) - m10 * (m01 * m22 - m21 * m02)
            + m20 * (m01 * m12 - m11 * m02)
    }

    /// Returns the inverse of this matrix. If the matrix is not invertible,
    /// the result will be non-finite.
    pub fn inverted(&self) -> Self {
        let [m00, m01, m02, m10, m11, m12, m20, m21, m22] = self.entries();
        let s = 1.0
            / (m00 * (m11 * m22 - m21 * m12) - m10 * (m01 * m22 - m21 * m02)
                + m20 * (m01 * m12 - m11 * m02));
        Self::from_columns(
            Vector3::new(
                (m11 * m22 - m21 * m12) * s,
                (m21 * m02 - m01 * m22) * s,
                (m01 * m12 - m11 * m02) * s,
            ),
            Vector3::new(
                (m20 * m12 - m10 * m22) * s,
                (m00 * m22 - m20 * m02) * s,
                (m10 * m02 - m00 * m12) * s,
            ),
            Vector3::new(
                (m10 * m21 - m20 * m11) * s,
                (m20 * m01 - m00 * m21) * s,
                (m00 * m11 - m10 * m01) * s,
            ),
        )
    }

    /// Transforms the given vector with this matrix.
    #[inline]
    pub fn transform_vector(&self, vector: &Vector3) -> Vector3 {
        let (x, y, z) = (vector.x(), vector.y(), vector.z());
        Vector3::new(
            self.column_1.x() * x + self.column_2.x() * y + self.column_3.x() * z,
            self.column_1.y() * x + self.column_2.y() * y + self.column_3.y() * z,
            self.column_1.z() * x + self.column_2.z() * y + self.column_3.z() * z,
        )
    }

    /// Writes the 9 entries of this matrix into the given slice in row-major
    /// order, starting at `offset`.
    ///
    /// # Panics
    /// If the slice is too short to hold the entries.
    pub fn write_row_major(&self, dest: &mut [f32], offset: usize) {
        let [m00, m01, m02, m10, m11, m12, m20, m21, m22] = self.entries();
        dest[offset..offset + 9]
            .copy_from_slice(&[m00, m10, m20, m01, m11, m21, m02, m12, m22]);
    }

    /// Sets the 9 entries of this matrix from the given slice in row-major
    /// order, starting at `offset`.
    ///
    /// # Panics
    /// If the slice is too short to hold the entries.
    pub fn set_from_row_major(&mut self, src: &[f32], offset: usize) {
        let e = &src[offset..offset + 9];
        self.column_1 = Vector3::new(e[0], e[3], e[6]);
        self.column_2 = Vector3::new(e[1], e[4], e[7]);
        self.column_3 = Vector3::new(e[2], e[5], e[8]);
    }

    /// The 9 entries of the matrix in column-major order.
    #[inline]
    pub(crate) const fn entries(&self) -> [f32; 9] {
        [
            self.column_1.x(),
            self.column_1.y(),
            self.column_1.z(),
            self.column_2.x(),
            self.column_2.y(),
            self.column_2.z(),
            self.column_3.x(),
            self.column_3.y(),
            self.column_3.z(),
        ]
    }
}

impl fmt::Display for Matrix3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..3 {
            let row = self.row(i);
            writeln!(f, "{:>14.7} {:>14.7} {:>14.7}", row.x(), row.y(), row.z())?;
        }
        Ok(())
    }
}

impl_binop!(Add, add, Matrix3, Matrix3, Matrix3, |a, b| {
    Matrix3::from_columns(
        a.column_1 + b.column_1,
        a.column_2 + b.column_2,
        a.column_3 + b.column_3,
    )
});

impl_binop!(Sub, sub, Matrix3, Matrix3, Matrix3, |a, b| {
    Matrix3::from_columns(
        a.column_1 - b.column_1,
        a.column_2 - b.column_2,
        a.column_3 - b.column_3,
    )
});

impl_binop!(Mul, mul, Matrix3, Matrix3, Matrix3, |a, b| {
    Matrix3::from_columns(
        a.transform_vector(&b.column_1),
        a.transform_vector(&b.column_2),
        a.transform_vector(&b.column_3),
    )
});

impl_binop!(Mul, mul, Matrix3, Vector3, Vector3, |a, b| {
    a.transform_vector(b)
});

impl_binop!(Mul, mul, Matrix3, f32, Matrix3, |a, b| {
    Matrix3::from_columns(a.column_1 * *b, a.column_2 * *b, a.column_3 * *b)
});

impl_binop!(Mul, mul, f32, Matrix3, Matrix3, |a, b| { b.mul(*a) });

impl_binop!(Div, div, Matrix3, f32, Matrix3, |a, b| {
    a.mul(b.recip())
});

impl_unary_op!(Neg, neg, Matrix3, Matrix3, |val| {
    Matrix3::from_columns(-val.column_1, -val.column_2, -val.column_3)
});

impl_abs_diff_eq!(Matrix3, |a, b, epsilon| {
    a.column_1.abs_diff_eq(&b.column_1, epsilon)
        && a.column_2.abs_diff_eq(&b.column_2, epsilon)
        && a.column_3.abs_diff_eq(&b.column_3, epsilon)
});

impl_relative_eq!(Matrix3, |a, b, epsilon, max_relative| {
    a.column_1.relative_eq(&b.column_1, epsilon, max_relative)
        && a.column_2.relative_eq(&b.column_2, epsilon, max_relative)
        && a.column_3.relative_eq(&b.column_3, epsilon, max_relative)
});

#[cfg(test)]
mod tests {
    #![allow(clippy::op_ref)]

    use super::*;
    use approx::assert_abs_diff_eq;

    const EPSILON: f32 = 1e-6;

    fn test_matrix() -> Matrix3 {
        Matrix3::from_columns(
            Vector3::new(2.0, 0.0, 1.0),
            Vector3::new(-1.0, 3.0, 0.0),
            Vector3::new(0.5, 1.0, 1.0),
        )
    }

    #[test]
    fn creating_matrix3_identity_gives_identity_matrix() {
        let identity = Matrix3::identity();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_eq!(identity.element(i, j), expected);
            }
        }
    }

    #[test]
    fn creating_matrix3_from_diagonal_works() {
        let matrix = Matrix3::from_diagonal(&Vector3::new(2.0, 3.0, 4.0));
        assert_eq!(matrix.diagonal(), Vector3::new(2.0, 3.0, 4.0));
        assert_eq!(matrix.element(0, 1), 0.0);
        assert_eq!(matrix.element(2, 1), 0.0);
    }

    #[test]
    fn accessing_matrix3_rows_and_columns_works() {
        let matrix = test_matrix();
        assert_eq!(matrix.column(0), Vector3::new(2.0, 0.0, 1.0));
        assert_eq!(matrix.row(0), Vector3::new(2.0, -1.0, 0.5));
        assert_eq!(matrix.row(2), Vector3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn setting_matrix3_rows_and_columns_works() {
        let mut matrix = Matrix3::zeros();
        matrix.set_row(1, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(matrix.element(1, 0), 1.0);
        assert_eq!(matrix.element(1, 1), 2.0);
        assert_eq!(matrix.element(1, 2), 3.0);

        matrix.set_column(2, Vector3::new(4.0, 5.0, 6.0));
        assert_eq!(matrix.column(2), Vector3::new(4.0, 5.0, 6.0));
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn accessing_matrix3_column_out_of_bounds_panics() {
        let _ = test_matrix().column(3);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn accessing_matrix3_row_out_of_bounds_panics() {
        let _ = test_matrix().row(3);
    }

    #[test]
    fn transposing_matrix3_swaps_rows_and_columns() {
        let matrix = test_matrix();
        let transposed = matrix.transposed();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(transposed.element(i, j), matrix.element(j, i));
            }
        }
    }

    #[test]
    fn matrix3_determinant_of_identity_is_one() {
        assert_abs_diff_eq!(Matrix3::identity().determinant(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn matrix3_determinant_scales_with_diagonal() {
        let matrix = Matrix3::from_diagonal(&Vector3::new(2.0, 3.0, 4.0));
        assert_abs_diff_eq!(matrix.determinant(), 24.0, epsilon = EPSILON);
    }

    #[test]
    fn inverting_matrix3_gives_identity_product() {
        let matrix = test_matrix();
        let product = &matrix * &matrix.inverted();
        assert_abs_diff_eq!(product, Matrix3::identity(), epsilon = 1e-5);
    }

    #[test]
    fn inverting_singular_matrix3_gives_non_finite_entries() {
        let singular = Matrix3::from_columns(
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(2.0, 4.0, 6.0),
            Vector3::new(0.0, 1.0, 0.0),
        );
        let inverted = singular.inverted();
        assert!(!inverted.element(0, 0).is_finite());
    }

    #[test]
    fn multiplying_matrix3_by_identity_is_identity_operation() {
        let matrix = test_matrix();
        assert_abs_diff_eq!(&matrix * &Matrix3::identity(), matrix, epsilon = EPSILON);
        assert_abs_diff_eq!(&Matrix3::identity() * &matrix, matrix, epsilon = EPSILON);
    }

    #[test]
    fn matrix3_vector_multiplication_works() {
        let matrix = Matrix3::from_diagonal(&Vector3::new(2.0, 3.0, 4.0));
        let result = &matrix * &Vector3::new(1.0, 1.0, 1.0);
        assert_abs_diff_eq!(result, Vector3::new(2.0, 3.0, 4.0), epsilon = EPSILON);
    }

    #[test]
    fn matrix3_row_major_round_trip_preserves_entries() {
        let matrix = test_matrix();
        let mut buffer = [0.0; 11];
        matrix.write_row_major(&mut buffer, 2);

        assert_eq!(buffer[2], matrix.element(0, 0));
        assert_eq!(buffer[3], matrix.element(0, 1));
        assert_eq!(buffer[5], matrix.element(1, 0));

        let mut restored = Matrix3::zeros();
        restored.set_from_row_major(&buffer, 2);
        assert_eq!(restored, matrix);
    }
}
