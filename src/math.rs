use approx::{AbsDiffEq, RelativeEq};
use core::ops::{Add, Index, Mul, Neg, Sub};
use serde::{Deserialize, Serialize};

/// A 3-component vector of `f32`s.
///
/// Used for positions, directions, texture coordinates (`z` unused) and RGB colours in the `[0, 255]` range alike.
///
/// All operations except [`Vec3::floor_xy`] and [`Vec3::multiply_by_matrix`] are pure and return a new vector.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    pub const FRONT: Self = Self::new(0.0, 0.0, 1.0);

    #[inline(always)]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Create a vector with every component set to `e`.
    #[inline(always)]
    pub const fn broadcast(e: f32) -> Self {
        Self::new(e, e, e)
    }

    #[allow(clippy::should_implement_trait)]
    #[inline(always)]
    pub fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    #[inline(always)]
    pub fn subtract(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    /// Right-handed cross product.
    #[inline(always)]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[inline(always)]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline(always)]
    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    #[inline(always)]
    pub fn magnitude_squared(self) -> f32 {
        self.dot(self)
    }

    /// The Euclidean norm of this vector.
    #[inline(always)]
    pub fn length(self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Scale this vector to unit length.
    ///
    /// A zero-length vector is returned unchanged rather than producing NaNs.
    #[inline]
    pub fn normalize(self) -> Self {
        let len_sq = self.magnitude_squared();
        if len_sq > 0.0 {
            self.scale(1.0 / len_sq.sqrt())
        } else {
            self
        }
    }

    /// Apply `f` to each component.
    #[inline(always)]
    pub fn map(self, mut f: impl FnMut(f32) -> f32) -> Self {
        Self::new(f(self.x), f(self.y), f(self.z))
    }

    /// Snap the screen-space `x` and `y` components down to whole pixels, leaving depth untouched.
    #[inline]
    pub fn floor_xy(&mut self) {
        self.x = self.x.floor();
        self.y = self.y.floor();
    }

    /// Transform this vector in place as the homogeneous point `(x, y, z, 1)` by `m`.
    ///
    /// The result is divided by `w` whenever `w` is not exactly 1.
    #[allow(clippy::float_cmp)]
    pub fn multiply_by_matrix(&mut self, m: &Mat4) {
        let Self { x, y, z } = *self;
        let mut out = Self::new(
            x * m.get(0, 0) + y * m.get(0, 1) + z * m.get(0, 2) + m.get(0, 3),
            x * m.get(1, 0) + y * m.get(1, 1) + z * m.get(1, 2) + m.get(1, 3),
            x * m.get(2, 0) + y * m.get(2, 1) + z * m.get(2, 2) + m.get(2, 3),
        );
        let w = x * m.get(3, 0) + y * m.get(3, 1) + z * m.get(3, 2) + m.get(3, 3);
        if w != 1.0 {
            out = out.scale(1.0 / w);
        }
        *self = out;
    }

    /// A copy of this vector transformed by `m`. See [`Vec3::multiply_by_matrix`].
    #[inline]
    pub fn transformed(mut self, m: &Mat4) -> Self {
        self.multiply_by_matrix(m);
        self
    }

    #[inline(always)]
    pub fn into_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Vec3 {
    #[inline(always)]
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vec3> for [f32; 3] {
    #[inline(always)]
    fn from(v: Vec3) -> Self {
        v.into_array()
    }
}

impl Add for Vec3 {
    type Output = Self;
    #[inline(always)]
    fn add(self, other: Self) -> Self {
        Vec3::add(self, other)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    #[inline(always)]
    fn sub(self, other: Self) -> Self {
        self.subtract(other)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    #[inline(always)]
    fn mul(self, factor: f32) -> Self {
        self.scale(factor)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        self.scale(-1.0)
    }
}

impl AbsDiffEq for Vec3 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl RelativeEq for Vec3 {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}

/// A 4x4 homogeneous matrix, stored row-major.
///
/// Points are treated as column vectors, so a matrix transforms a point as `M * p`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Mat4 {
    elements: [f32; 16],
}

impl Mat4 {
    #[rustfmt::skip]
    pub const IDENTITY: Self = Self {
        elements: [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    pub const ZERO: Self = Self { elements: [0.0; 16] };

    #[inline(always)]
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    #[inline(always)]
    pub const fn from_row_array(elements: [f32; 16]) -> Self {
        Self { elements }
    }

    pub fn from_row_arrays(rows: [[f32; 4]; 4]) -> Self {
        let mut elements = [0.0; 16];
        (0..4).for_each(|r| elements[r * 4..r * 4 + 4].copy_from_slice(&rows[r]));
        Self { elements }
    }

    /// Reset this matrix to the identity in place.
    #[inline]
    pub fn set_identity(&mut self) {
        *self = Self::IDENTITY;
    }

    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.elements[row * 4 + col]
    }

    #[inline(always)]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.elements[row * 4 + col] = value;
    }

    #[inline(always)]
    pub fn into_row_array(self) -> [f32; 16] {
        self.elements
    }

    /// A translation by `v`.
    pub fn translation_3d(v: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.set(0, 3, v.x);
        m.set(1, 3, v.y);
        m.set(2, 3, v.z);
        m
    }

    /// A per-axis scale by `v`.
    pub fn scaling_3d(v: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.set(0, 0, v.x);
        m.set(1, 1, v.y);
        m.set(2, 2, v.z);
        m
    }

    /// A matrix whose upper-left 3x3 block has `x`, `y` and `z` as its columns.
    pub fn from_columns_3d(x: Vec3, y: Vec3, z: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        for (col, axis) in [x, y, z].into_iter().enumerate() {
            m.set(0, col, axis.x);
            m.set(1, col, axis.y);
            m.set(2, col, axis.z);
        }
        m
    }

    /// Transpose this matrix in place.
    pub fn transpose(&mut self) {
        let e = &mut self.elements;
        e.swap(1, 4);
        e.swap(2, 8);
        e.swap(3, 12);
        e.swap(6, 9);
        e.swap(7, 13);
        e.swap(11, 14);
    }

    #[inline]
    pub fn transposed(mut self) -> Self {
        self.transpose();
        self
    }

    /// Compose two transforms: the result applies `left` to a point first, then `right`.
    ///
    /// In conventional notation this is the product `right * left`, so chains read in application order:
    /// `multiply(multiply(view, projection), viewport)`.
    #[inline]
    pub fn multiply(left: &Self, right: &Self) -> Self {
        *right * *left
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Index<(usize, usize)> for Mat4 {
    type Output = f32;
    #[inline(always)]
    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        &self.elements[row * 4 + col]
    }
}

/// The standard matrix product `self * rhs`.
impl Mul for Mat4 {
    type Output = Self;

    #[rustfmt::skip]
    fn mul(self, rhs: Self) -> Self {
        let [
            l11, l12, l13, l14,
            l21, l22, l23, l24,
            l31, l32, l33, l34,
            l41, l42, l43, l44,
        ] = self.elements;
        let [
            r11, r12, r13, r14,
            r21, r22, r23, r24,
            r31, r32, r33, r34,
            r41, r42, r43, r44,
        ] = rhs.elements;

        Self::from_row_array([
            l11 * r11 + l12 * r21 + l13 * r31 + l14 * r41,
            l11 * r12 + l12 * r22 + l13 * r32 + l14 * r42,
            l11 * r13 + l12 * r23 + l13 * r33 + l14 * r43,
            l11 * r14 + l12 * r24 + l13 * r34 + l14 * r44,
            l21 * r11 + l22 * r21 + l23 * r31 + l24 * r41,
            l21 * r12 + l22 * r22 + l23 * r32 + l24 * r42,
            l21 * r13 + l22 * r23 + l23 * r33 + l24 * r43,
            l21 * r14 + l22 * r24 + l23 * r34 + l24 * r44,
            l31 * r11 + l32 * r21 + l33 * r31 + l34 * r41,
            l31 * r12 + l32 * r22 + l33 * r32 + l34 * r42,
            l31 * r13 + l32 * r23 + l33 * r33 + l34 * r43,
            l31 * r14 + l32 * r24 + l33 * r34 + l34 * r44,
            l41 * r11 + l42 * r21 + l43 * r31 + l44 * r41,
            l41 * r12 + l42 * r22 + l43 * r32 + l44 * r42,
            l41 * r13 + l42 * r23 + l43 * r33 + l44 * r43,
            l41 * r14 + l42 * r24 + l43 * r34 + l44 * r44,
        ])
    }
}

impl AbsDiffEq for Mat4 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.elements
            .iter()
            .zip(other.elements.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Mat4 {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.elements
            .iter()
            .zip(other.elements.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

#[cfg(feature = "vek")]
mod vek_interop {
    use super::{Mat4, Vec3};

    impl From<vek::Vec3<f32>> for Vec3 {
        fn from(v: vek::Vec3<f32>) -> Self {
            Self::new(v.x, v.y, v.z)
        }
    }

    impl From<Vec3> for vek::Vec3<f32> {
        fn from(v: Vec3) -> Self {
            vek::Vec3::new(v.x, v.y, v.z)
        }
    }

    impl From<vek::Mat4<f32>> for Mat4 {
        fn from(m: vek::Mat4<f32>) -> Self {
            Self::from_row_array(m.into_row_array())
        }
    }

    impl From<Mat4> for vek::Mat4<f32> {
        fn from(m: Mat4) -> Self {
            vek::Mat4::from_row_array(m.into_row_array())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn sample_matrix() -> Mat4 {
        Mat4::from_row_arrays([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ])
    }

    #[test]
    fn cross_is_orthogonal_to_operands() {
        let pairs = [
            (Vec3::new(1.0, 2.0, 3.0), Vec3::new(-4.0, 0.5, 2.0)),
            (Vec3::new(0.3, -7.0, 1.0), Vec3::new(2.0, 2.0, -2.0)),
            (Vec3::RIGHT, Vec3::UP),
        ];
        for (a, b) in pairs {
            let c = a.cross(b);
            assert_abs_diff_eq!(c.dot(a), 0.0, epsilon = 1e-4);
            assert_abs_diff_eq!(c.dot(b), 0.0, epsilon = 1e-4);
        }
        assert_eq!(Vec3::RIGHT.cross(Vec3::UP), Vec3::FRONT);
    }

    #[test]
    fn normalize_produces_unit_length() {
        let v = Vec3::new(3.0, -4.0, 12.0).normalize();
        assert_relative_eq!(v.length(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(v, Vec3::new(3.0 / 13.0, -4.0 / 13.0, 12.0 / 13.0), epsilon = 1e-6);
    }

    #[test]
    fn normalize_zero_is_zero() {
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
    }

    #[test]
    fn operators_leave_operands_untouched() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(0.5, 0.5, 0.5);
        assert_eq!(a + b, Vec3::new(1.5, 2.5, 3.5));
        assert_eq!(a - b, Vec3::new(0.5, 1.5, 2.5));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(a, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn floor_xy_keeps_depth() {
        let mut v = Vec3::new(3.7, -0.2, 0.55);
        v.floor_xy();
        assert_eq!(v, Vec3::new(3.0, -1.0, 0.55));
    }

    #[test]
    fn identity_is_neutral() {
        let a = sample_matrix();
        assert_eq!(Mat4::multiply(&a, &Mat4::IDENTITY), a);
        assert_eq!(Mat4::multiply(&Mat4::IDENTITY, &a), a);
        assert_eq!(a * Mat4::IDENTITY, a);
    }

    #[test]
    fn set_identity_resets() {
        let mut a = sample_matrix();
        a.set_identity();
        assert_eq!(a, Mat4::IDENTITY);
    }

    #[test]
    fn transpose_twice_is_noop() {
        let a = sample_matrix();
        let t = a.transposed();
        assert_eq!(t.get(0, 3), 13.0);
        assert_eq!(t.get(3, 0), 4.0);
        assert_eq!(t.get(1, 2), 10.0);
        assert_eq!(t.transposed(), a);
    }

    #[test]
    fn multiply_applies_left_first() {
        let translate = Mat4::translation_3d(Vec3::new(1.0, 0.0, 0.0));
        let scale = Mat4::scaling_3d(Vec3::broadcast(2.0));
        let p = Vec3::new(1.0, 1.0, 1.0);

        // Translate to (2, 1, 1), then scale to (4, 2, 2)
        let m = Mat4::multiply(&translate, &scale);
        assert_eq!(p.transformed(&m), Vec3::new(4.0, 2.0, 2.0));

        // Scale to (2, 2, 2), then translate to (3, 2, 2)
        let m = Mat4::multiply(&scale, &translate);
        assert_eq!(p.transformed(&m), Vec3::new(3.0, 2.0, 2.0));
    }

    #[test]
    fn perspective_divide_by_w() {
        let mut m = Mat4::IDENTITY;
        m.set(3, 2, -0.5);
        // w = 1 - z / 2 = 0.5
        let mut p = Vec3::new(1.0, 2.0, 1.0);
        p.multiply_by_matrix(&m);
        assert_relative_eq!(p, Vec3::new(2.0, 4.0, 2.0));

        // w = 1 exactly: no divide
        let p = Vec3::new(1.0, 2.0, 0.0).transformed(&m);
        assert_eq!(p, Vec3::new(1.0, 2.0, 0.0));
    }
}
