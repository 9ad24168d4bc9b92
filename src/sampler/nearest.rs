use super::*;

/// A sampler that uses nearest-neighbor sampling.
///
/// The texel column is `floor(u * width + 0.5)` and the row is `floor((1 - v) * height + 0.5)`, so the UV origin sits
/// at the bottom-left corner of the top-left-origin texture. Both are clamped to the texture's edges.
#[derive(Clone, Debug)]
pub struct Nearest<T> {
    texture: T,
}

impl<T: Texture> Nearest<T> {
    /// Wrap `texture` in a nearest-neighbour sampler.
    ///
    /// # Panics
    ///
    /// Panics if the texture has no texels.
    pub fn new(texture: T) -> Self {
        let [width, height] = texture.size();
        assert!(
            width >= 1 && height >= 1,
            "Nearest-neighbour sampled texture cannot have no size",
        );
        Self { texture }
    }

    pub fn into_inner(self) -> T {
        self.texture
    }

    /// Find the texel that `uv` samples.
    #[inline(always)]
    pub fn texel_index(&self, [u, v]: [f32; 2]) -> [usize; 2] {
        let [width, height] = self.texture.size();
        // Float-to-int conversion saturates, taking negatives and NaN to 0
        let x = (u * width as f32 + 0.5).floor() as usize;
        let y = ((1.0 - v) * height as f32 + 0.5).floor() as usize;
        [x.min(width - 1), y.min(height - 1)]
    }
}

impl<T: Texture> Sampler for Nearest<T> {
    type Texture = T;

    #[inline(always)]
    fn raw_texture(&self) -> &Self::Texture {
        &self.texture
    }

    #[inline(always)]
    fn sample(&self, uv: [f32; 2]) -> T::Texel {
        self.texture.read(self.texel_index(uv))
    }
}
