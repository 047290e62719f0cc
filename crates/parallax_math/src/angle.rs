//! Different units for angles.

use bytemuck::{Pod, Zeroable};
use std::{
    f32::consts::PI,
    ops::{Add, Div, Mul, Sub},
};

/// Represents an angle.
pub trait Angle: Copy {
    /// Creates a zero angle.
    fn zero() -> Self;

    /// Returns the angle as degrees.
    fn as_degrees(self) -> Degrees;

    /// Returns the angle as radians.
    fn as_radians(self) -> Radians;

    /// Returns the value of the angle in degrees.
    fn degrees(self) -> f32;

    /// Returns the value of the angle in radians.
    fn radians(self) -> f32;
}

// An angle in degrees.
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Zeroable, Pod)]
pub struct Degrees(pub f32);

// An angle in radians.
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Zeroable, Pod)]
pub struct Radians(pub f32);

impl Degrees {
    fn value(self) -> f32 {
        self.0
    }
}

impl Radians {
    fn value(self) -> f32 {
        self.0
    }
}

impl Angle for Degrees {
    fn zero() -> Self {
        Self(0.0)
    }

    fn as_degrees(self) -> Degrees {
        self
    }

    fn as_radians(self) -> Radians {
        Radians::from(self)
    }

    fn degrees(self) -> f32 {
        self.value()
    }

    fn radians(self) -> f32 {
        Radians::from(self).value()
    }
}

impl Angle for Radians {
    fn zero() -> Self {
        Self(0.0)
    }

    fn as_degrees(self) -> Degrees {
        Degrees::from(self)
    }

    fn as_radians(self) -> Radians {
        self
    }

    fn degrees(self) -> f32 {
        Degrees::from(self).value()
    }

    fn radians(self) -> f32 {
        self.value()
    }
}

impl From<Radians> for Degrees {
    fn from(rad: Radians) -> Self {
        Self(rad.value() * (180.0 / PI))
    }
}

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        Self(deg.value() * (PI / 180.0))
    }
}

impl Add for Degrees {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.value() + rhs.value())
    }
}

impl Add for Radians {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.value() + rhs.value())
    }
}

impl Sub for Degrees {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.value() - rhs.value())
    }
}

impl Sub for Radians {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.value() - rhs.value())
    }
}

impl Mul<f32> for Degrees {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self(self.value() * rhs)
    }
}

impl Mul<f32> for Radians {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self(self.value() * rhs)
    }
}

impl Div<f32> for Degrees {
    type Output = Self;
    fn div(self, rhs: f32) -> Self {
        Self(self.value() / rhs)
    }
}

impl Div<f32> for Radians {
    type Output = Self;
    fn div(self, rhs: f32) -> Self {
        Self(self.value() / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn converting_degrees_to_radians_works() {
        assert_abs_diff_eq!(Degrees(180.0).radians(), PI, epsilon = EPSILON);
        assert_abs_diff_eq!(Degrees(90.0).radians(), 0.5 * PI, epsilon = EPSILON);
    }

    #[test]
    fn converting_radians_to_degrees_works() {
        assert_abs_diff_eq!(Radians(PI).degrees(), 180.0, epsilon = EPSILON);
        assert_abs_diff_eq!(Radians(0.25 * PI).degrees(), 45.0, epsilon = EPSILON);
    }

    #[test]
    fn angle_arithmetic_works() {
        assert_abs_diff_eq!(
            (Degrees(30.0) + Degrees(60.0)).degrees(),
            90.0,
            epsilon = EPSILON
        );
        assert_abs_diff_eq!((Radians(PI) - Radians(PI)).radians(), 0.0, epsilon = EPSILON);
        assert_abs_diff_eq!((Radians(PI) * 0.5).radians(), 0.5 * PI, epsilon = EPSILON);
        assert_abs_diff_eq!((Degrees(90.0) / 2.0).degrees(), 45.0, epsilon = EPSILON);
    }
}
