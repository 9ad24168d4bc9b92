use crate::{buffer::Buffer2d, math::Vec3};

/// An RGB pixel with 8 bits per channel.
pub type Rgb8 = [u8; 3];

/// Convert a colour with channels in `[0, 255]` to bytes, clamping out-of-range channels and rounding to nearest.
#[inline]
pub fn to_rgb8(color: Vec3) -> Rgb8 {
    let channel = |e: f32| e.max(0.0).min(255.0).round() as u8;
    [channel(color.x), channel(color.y), channel(color.z)]
}

/// A 2-dimensional surface that rendered pixels are written to.
///
/// Coordinates have their origin at the bottom-left corner: row 0 is the bottom row, matching the UV convention of
/// the texture samplers. Implementations backed by top-left-origin storage must flip `y` themselves.
pub trait PixelSink {
    /// Get the dimensions of the sink as `[width, height]`.
    fn size(&self) -> [usize; 2];

    /// Write `color` (channels in `[0, 255]`) to the pixel at `(x, y)`. Out-of-bounds writes are ignored.
    fn set_pixel(&mut self, x: usize, y: usize, color: Vec3);
}

impl<T: PixelSink + ?Sized> PixelSink for &mut T {
    #[inline(always)]
    fn size(&self) -> [usize; 2] {
        (**self).size()
    }

    #[inline(always)]
    fn set_pixel(&mut self, x: usize, y: usize, color: Vec3) {
        (**self).set_pixel(x, y, color)
    }
}

/// An in-memory RGB framebuffer.
///
/// Pixels are stored top row first, as image formats and windowing surfaces expect, while [`PixelSink`] access uses
/// bottom-left coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Framebuffer {
    pixels: Buffer2d<Rgb8>,
}

impl Framebuffer {
    pub fn new([width, height]: [usize; 2], fill: Rgb8) -> Self {
        Self {
            pixels: Buffer2d::fill([width, height], fill),
        }
    }

    #[inline(always)]
    fn row(&self, y: usize) -> usize {
        self.pixels.height() - 1 - y
    }

    /// Read the pixel at bottom-left coordinates `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb8> {
        if y < self.pixels.height() {
            self.pixels.get([x, self.row(y)]).copied()
        } else {
            None
        }
    }

    pub fn clear(&mut self, fill: Rgb8) {
        self.pixels.clear(fill);
    }

    /// The pixels in top-left-origin order.
    pub fn as_buffer(&self) -> &Buffer2d<Rgb8> {
        &self.pixels
    }

    /// Pack the pixels as `0RGB` words, top row first, the layout framebuffer windows such as `minifb` consume.
    pub fn to_u32_rgb(&self) -> Vec<u32> {
        self.pixels
            .raw()
            .iter()
            .map(|[r, g, b]| (*r as u32) << 16 | (*g as u32) << 8 | *b as u32)
            .collect()
    }

    pub fn to_image(&self) -> image::RgbImage {
        let [width, height] = self.pixels.size();
        let bytes = self.pixels.raw().iter().flatten().copied().collect();
        // The raw buffer always holds exactly width * height pixels
        image::RgbImage::from_raw(width as u32, height as u32, bytes)
            .unwrap_or_else(|| image::RgbImage::new(width as u32, height as u32))
    }

    /// Save the framebuffer as an image, with the format chosen from the file extension.
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> crate::Result<()> {
        self.to_image().save(path)?;
        Ok(())
    }
}

impl PixelSink for Framebuffer {
    #[inline(always)]
    fn size(&self) -> [usize; 2] {
        self.pixels.size()
    }

    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, color: Vec3) {
        if y < self.pixels.height() {
            let row = self.row(y);
            self.pixels.write([x, row], to_rgb8(color));
        }
    }
}

impl PixelSink for image::RgbImage {
    #[inline(always)]
    fn size(&self) -> [usize; 2] {
        [self.width() as usize, self.height() as usize]
    }

    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, color: Vec3) {
        let [width, height] = PixelSink::size(self);
        if x < width && y < height {
            self.put_pixel(x as u32, (height - 1 - y) as u32, image::Rgb(to_rgb8(color)));
        }
    }
}
