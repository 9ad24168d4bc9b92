use crate::{buffer::Buffer2d, math::Vec3, sampler::Nearest};
use core::marker::PhantomData;

/// An RGBA texel with 8 bits per channel.
pub type Rgba8 = [u8; 4];

/// A decoded image in canonical orientation: `[0, 0]` is the top-left texel.
pub type TextureBuffer = Buffer2d<Rgba8>;

/// Texel types that can be viewed as an RGB colour with channels in `[0, 255]`.
pub trait IntoRgb {
    fn rgb(&self) -> Vec3;
}

impl IntoRgb for [u8; 4] {
    #[inline(always)]
    fn rgb(&self) -> Vec3 {
        Vec3::new(self[0] as f32, self[1] as f32, self[2] as f32)
    }
}

impl IntoRgb for [u8; 3] {
    #[inline(always)]
    fn rgb(&self) -> Vec3 {
        Vec3::new(self[0] as f32, self[1] as f32, self[2] as f32)
    }
}

impl IntoRgb for u8 {
    #[inline(always)]
    fn rgb(&self) -> Vec3 {
        Vec3::broadcast(*self as f32)
    }
}

/// Depths in `[0, 1]` map to grey levels.
impl IntoRgb for f32 {
    #[inline(always)]
    fn rgb(&self) -> Vec3 {
        Vec3::broadcast(self.max(0.0).min(1.0) * 255.0)
    }
}

impl IntoRgb for Vec3 {
    #[inline(always)]
    fn rgb(&self) -> Vec3 {
        *self
    }
}

/// A trait implemented by types that may be treated as 2-dimensional textures.
pub trait Texture {
    /// The type of texture elements.
    type Texel: Clone + IntoRgb;

    /// Get the size of the texture in texels, as `[width, height]`.
    fn size(&self) -> [usize; 2];

    /// Read a texel at the given index, where `[0, 0]` is the top-left texel.
    ///
    /// # Panics
    ///
    /// The behaviour of this function is *unspecified* (but not *undefined*) when the index is out of bounds. The
    /// implementation is free to panic or return an entirely different texel.
    fn read(&self, index: [usize; 2]) -> Self::Texel;

    /// Create a nearest-neighbour (i.e: unfiltered) sampler from this texture.
    ///
    /// See [`Nearest`].
    fn nearest(self) -> Nearest<Self>
    where
        Self: Sized,
    {
        Nearest::new(self)
    }

    /// Map the texels of this texture to another type using a mapping function.
    fn map<F, U>(self, f: F) -> Map<Self, F, U>
    where
        F: Fn(Self::Texel) -> U,
        Self: Sized,
    {
        Map {
            tex: self,
            f,
            phantom: PhantomData,
        }
    }
}

impl<'a, T: Texture> Texture for &'a T {
    type Texel = T::Texel;
    #[inline(always)]
    fn size(&self) -> [usize; 2] {
        (**self).size()
    }
    #[inline(always)]
    fn read(&self, index: [usize; 2]) -> Self::Texel {
        (**self).read(index)
    }
}

#[derive(Debug)]
pub struct Map<T, F, U> {
    tex: T,
    f: F,
    phantom: PhantomData<U>,
}

impl<T: Clone, F: Clone, U> Clone for Map<T, F, U> {
    fn clone(&self) -> Self {
        Self {
            tex: self.tex.clone(),
            f: self.f.clone(),
            phantom: PhantomData,
        }
    }
}

impl<T: Texture, U: Clone + IntoRgb, F: Fn(T::Texel) -> U> Texture for Map<T, F, U> {
    type Texel = U;
    #[inline(always)]
    fn size(&self) -> [usize; 2] {
        self.tex.size()
    }
    #[inline(always)]
    fn read(&self, index: [usize; 2]) -> Self::Texel {
        (self.f)(self.tex.read(index))
    }
}

mod image_impls {
    use super::{IntoRgb, Texture};
    use crate::math::Vec3;

    impl IntoRgb for image::Rgba<u8> {
        #[inline(always)]
        fn rgb(&self) -> Vec3 {
            self.0.rgb()
        }
    }

    impl IntoRgb for image::Rgb<u8> {
        #[inline(always)]
        fn rgb(&self) -> Vec3 {
            self.0.rgb()
        }
    }

    impl<P, C> Texture for image::ImageBuffer<P, C>
    where
        P: image::Pixel + IntoRgb + Clone + 'static,
        C: core::ops::Deref<Target = [P::Subpixel]>,
    {
        type Texel = P;

        #[inline(always)]
        fn size(&self) -> [usize; 2] {
            [self.width() as usize, self.height() as usize]
        }

        #[inline(always)]
        fn read(&self, [x, y]: [usize; 2]) -> Self::Texel {
            *self.get_pixel(x as u32, y as u32)
        }
    }
}

/// The largest width or height accepted when decoding a texture.
pub const MAX_TEXTURE_SIZE: u32 = 16384;

/// Decode a TGA image into a top-left-origin texture.
///
/// Every image type the `image` crate reads is accepted: true-colour, grey-scale and colour-mapped, raw or
/// run-length encoded, stored from any corner. Images wider or taller than [`MAX_TEXTURE_SIZE`] are rejected before
/// any pixel storage is allocated.
pub fn decode_tga(data: &[u8]) -> image::ImageResult<TextureBuffer> {
    let mut reader = image::ImageReader::with_format(std::io::Cursor::new(data), image::ImageFormat::Tga);
    let mut limits = image::Limits::default();
    limits.max_image_width = Some(MAX_TEXTURE_SIZE);
    limits.max_image_height = Some(MAX_TEXTURE_SIZE);
    reader.limits(limits);

    let image = reader.decode()?.into_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    let mut pixels = image.pixels();
    Ok(Buffer2d::fill_with(size, || pixels.next().map_or([0; 4], |px| px.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::Sampler;

    #[test]
    fn map_converts_texels() {
        let tex = TextureBuffer::fill([2, 1], [10, 20, 30, 255]);
        let inverted = (&tex).map(|[r, g, b, a]: Rgba8| [255 - r, 255 - g, 255 - b, a]);
        assert_eq!(inverted.size(), [2, 1]);
        assert_eq!(inverted.read([1, 0]).rgb(), Vec3::new(245.0, 235.0, 225.0));
    }

    #[test]
    fn depth_texels_are_grey() {
        assert_eq!(0.5f32.rgb(), Vec3::broadcast(127.5));
        assert_eq!(2.0f32.rgb(), Vec3::broadcast(255.0));
    }

    fn tga_header(image_type: u8, width: u16, height: u16, pixel_bits: u8, descriptor: u8) -> Vec<u8> {
        let mut h = vec![0, 0, image_type, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        h.extend_from_slice(&width.to_le_bytes());
        h.extend_from_slice(&height.to_le_bytes());
        h.push(pixel_bits);
        h.push(descriptor);
        h
    }

    const TOP_LEFT: u8 = 0x20;

    #[test]
    fn bottom_left_tga_rows_are_flipped() {
        // Rows are stored bottom first; pixels are BGR
        let mut data = tga_header(2, 2, 2, 24, 0);
        data.extend_from_slice(&[0, 0, 255, 0, 255, 0]);
        data.extend_from_slice(&[255, 0, 0, 255, 255, 255]);
        let image = decode_tga(&data).unwrap();

        assert_eq!(image.read([0, 0]), [0, 0, 255, 255]);
        assert_eq!(image.read([1, 0]), [255, 255, 255, 255]);
        assert_eq!(image.read([0, 1]), [255, 0, 0, 255]);
        assert_eq!(image.read([1, 1]), [0, 255, 0, 255]);

        let sampler = image.nearest();
        assert_eq!(sampler.sample([0.0, 0.0]), [255, 0, 0, 255]);
        assert_eq!(sampler.sample([1.0, 1.0]), [255, 255, 255, 255]);
    }

    #[test]
    fn top_left_tga_rows_keep_their_order() {
        let mut data = tga_header(3, 1, 2, 8, TOP_LEFT);
        data.extend_from_slice(&[9, 200]);
        let image = decode_tga(&data).unwrap();
        assert_eq!(image.raw(), &[[9, 9, 9, 255], [200, 200, 200, 255]]);
    }

    #[test]
    fn run_length_tga() {
        // A repeated red pixel, then two literal pixels
        let mut data = tga_header(10, 4, 1, 24, TOP_LEFT);
        data.extend_from_slice(&[0x81, 0, 0, 255]);
        data.extend_from_slice(&[0x01, 255, 0, 0, 0, 255, 0]);
        let image = decode_tga(&data).unwrap();
        assert_eq!(
            image.raw(),
            &[[255, 0, 0, 255], [255, 0, 0, 255], [0, 0, 255, 255], [0, 255, 0, 255]]
        );
    }

    #[test]
    fn tga_alpha_is_kept() {
        let mut data = tga_header(2, 1, 1, 32, TOP_LEFT | 8);
        data.extend_from_slice(&[1, 2, 3, 4]);
        assert_eq!(decode_tga(&data).unwrap().raw(), &[[3, 2, 1, 4]]);
    }

    #[test]
    fn broken_tga_data_is_an_error() {
        assert!(decode_tga(&[0, 0, 2, 0]).is_err());

        let mut truncated = tga_header(2, 4, 4, 24, TOP_LEFT);
        truncated.extend_from_slice(&[1, 2, 3]);
        assert!(decode_tga(&truncated).is_err());
    }

    #[test]
    fn oversized_tga_headers_are_rejected() {
        let mut data = tga_header(2, u16::MAX, u16::MAX, 32, TOP_LEFT | 8);
        data.extend_from_slice(&[0; 16]);
        assert!(decode_tga(&data).is_err());
    }
}
