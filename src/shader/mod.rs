//! The programmable stages of the pipeline.
//!
//! A [`Shader`] is driven one triangle at a time: [`Shader::vertex`] is called for slots 0, 1 and 2 of a face, each
//! call transforming one vertex to screen space and recording whatever that shader needs into its own varying
//! storage, and then [`Shader::fragment`] is called once for each pixel the rasterizer finds covered and visible.
//! Varyings belong to exactly one triangle at a time, so a shader instance must not drive two draws at once.

pub mod flat;
pub mod gouraud;
pub mod phong;

pub use self::{flat::FlatShader, gouraud::GouraudShader, phong::PhongShader};

use crate::math::{Mat4, Vec3};

/// The result of shading one pixel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Fragment {
    /// Whether the pixel should be left untouched. The depth buffer has already been updated either way.
    pub discard: bool,
    /// The output colour, with channels in `[0, 255]`.
    pub color: Vec3,
}

impl Fragment {
    pub const DISCARD: Self = Self {
        discard: true,
        color: Vec3::ZERO,
    };

    #[inline(always)]
    pub fn color(color: Vec3) -> Self {
        Self {
            discard: false,
            color,
        }
    }
}

/// State shared by every vertex of a draw call: the camera and viewport transforms.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Uniforms {
    pub view: Mat4,
    pub projection: Mat4,
    pub viewport: Mat4,
    /// The combined model-to-screen transform, `view` then `projection` then `viewport`.
    pub mvp: Mat4,
}

impl Uniforms {
    pub fn new(view: Mat4, projection: Mat4, viewport: Mat4) -> Self {
        Self {
            view,
            projection,
            viewport,
            mvp: Mat4::multiply(&Mat4::multiply(&view, &projection), &viewport),
        }
    }

    /// Transform a model-space position to screen space, including the perspective divide.
    #[inline(always)]
    pub fn to_screen(&self, position: Vec3) -> Vec3 {
        position.transformed(&self.mvp)
    }
}

impl Default for Uniforms {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY)
    }
}

/// The vertex and fragment stages of a shading model.
pub trait Shader {
    /// Transform the vertex in `slot` (0, 1 or 2) of the current triangle to screen space, recording its varyings.
    ///
    /// The returned position has `x` and `y` in pixels and a depth `z` where larger is nearer.
    fn vertex(&mut self, uniforms: &Uniforms, position: Vec3, uv: Vec3, normal: Vec3, slot: usize) -> Vec3;

    /// Whether the current triangle should be skipped entirely, once all three vertices have been submitted.
    ///
    /// A culled triangle is not rasterized, so unlike a discarded fragment it leaves the depth buffer untouched.
    fn cull(&self) -> bool {
        false
    }

    /// Shade the pixel at the given barycentric weights of the current triangle.
    fn fragment(&self, weights: Vec3) -> Fragment;
}

impl<S: Shader + ?Sized> Shader for &mut S {
    #[inline(always)]
    fn vertex(&mut self, uniforms: &Uniforms, position: Vec3, uv: Vec3, normal: Vec3, slot: usize) -> Vec3 {
        (**self).vertex(uniforms, position, uv, normal, slot)
    }

    #[inline(always)]
    fn cull(&self) -> bool {
        (**self).cull()
    }

    #[inline(always)]
    fn fragment(&self, weights: Vec3) -> Fragment {
        (**self).fragment(weights)
    }
}
