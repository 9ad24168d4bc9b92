pub mod nearest;

pub use self::nearest::Nearest;

use crate::{
    math::Vec3,
    texture::{IntoRgb, Texture},
};

/// A trait that describes a sampler of a texture.
///
/// Samplers use normalised UV coordinates (between 0 and 1) to sample textures, with `v = 0` at the bottom edge of
/// the image and `v = 1` at the top.
pub trait Sampler {
    /// The underlying texture accessed by this sampler.
    type Texture: Texture;

    /// Access the underlying texture accessed by this sampler.
    fn raw_texture(&self) -> &Self::Texture;

    /// Sample the texture at the given UV coordinate.
    fn sample(&self, uv: [f32; 2]) -> <Self::Texture as Texture>::Texel;

    /// Sample the texture at `(u, v)` as an RGB colour with channels in `[0, 255]`.
    #[inline(always)]
    fn color(&self, u: f32, v: f32) -> Vec3 {
        self.sample([u, v]).rgb()
    }
}

impl<'a, S: Sampler> Sampler for &'a S {
    type Texture = S::Texture;

    #[inline(always)]
    fn raw_texture(&self) -> &Self::Texture {
        (**self).raw_texture()
    }

    #[inline(always)]
    fn sample(&self, uv: [f32; 2]) -> <Self::Texture as Texture>::Texel {
        (**self).sample(uv)
    }
}
