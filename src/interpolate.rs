use crate::math::Vec3;

/// A trait used to enable varyings to be interpolated across a triangle by its barycentric weights.
pub trait Interpolate: Sized {
    /// Linearly scale two items of this type and sum them
    fn lerp2(a: Self, b: Self, x: f32, y: f32) -> Self;

    /// Linearly scale three items of this type and sum them
    fn lerp3(a: Self, b: Self, c: Self, x: f32, y: f32, z: f32) -> Self;

    /// Reconstruct the value at a fragment from the three per-vertex slots of a triangle.
    #[inline(always)]
    fn interpolate(slots: &[Self; 3], weights: Vec3) -> Self
    where
        Self: Clone,
    {
        Self::lerp3(
            slots[0].clone(),
            slots[1].clone(),
            slots[2].clone(),
            weights.x,
            weights.y,
            weights.z,
        )
    }
}

impl Interpolate for f32 {
    #[inline(always)]
    fn lerp2(a: Self, b: Self, x: f32, y: f32) -> Self {
        a * x + b * y
    }
    #[inline(always)]
    fn lerp3(a: Self, b: Self, c: Self, x: f32, y: f32, z: f32) -> Self {
        a * x + b * y + c * z
    }
}

impl Interpolate for Vec3 {
    #[inline(always)]
    fn lerp2(a: Self, b: Self, x: f32, y: f32) -> Self {
        a * x + b * y
    }
    #[inline(always)]
    fn lerp3(a: Self, b: Self, c: Self, x: f32, y: f32, z: f32) -> Self {
        a * x + b * y + c * z
    }
}

impl<T: Interpolate, U: Interpolate> Interpolate for (T, U) {
    #[inline(always)]
    fn lerp2(a: Self, b: Self, x: f32, y: f32) -> Self {
        (T::lerp2(a.0, b.0, x, y), U::lerp2(a.1, b.1, x, y))
    }

    #[inline(always)]
    fn lerp3(a: Self, b: Self, c: Self, x: f32, y: f32, z: f32) -> Self {
        (
            T::lerp3(a.0, b.0, c.0, x, y, z),
            U::lerp3(a.1, b.1, c.1, x, y, z),
        )
    }
}

impl Interpolate for () {
    #[inline(always)]
    fn lerp2(_: Self, _: Self, _: f32, _: f32) -> Self {}
    #[inline(always)]
    fn lerp3(_: Self, _: Self, _: Self, _: f32, _: f32, _: f32) -> Self {}
}
