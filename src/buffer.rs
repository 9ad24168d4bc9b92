use crate::texture::{IntoRgb, Texture};

/// A generic 2-dimensional buffer that may be used both as a texture and as backing storage for a render target.
///
/// Items are stored row by row, with `[0, 0]` the first item in memory.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Buffer2d<T> {
    size: [usize; 2],
    items: Vec<T>,
}

impl<T> Buffer2d<T> {
    /// Create a new buffer with the given size, filled with duplicates of the given element.
    #[inline]
    pub fn fill(size: [usize; 2], item: T) -> Self
    where
        T: Clone,
    {
        Self::fill_with(size, || item.clone())
    }

    /// Create a new buffer with the given size, filled by calling the function for each element.
    ///
    /// If your type implements [`Clone`], use [`Buffer2d::fill`] instead.
    #[inline]
    pub fn fill_with<F: FnMut() -> T>(size: [usize; 2], mut f: F) -> Self {
        let len = size[0].saturating_mul(size[1]);
        Self {
            size,
            items: (0..len).map(|_| f()).collect(),
        }
    }

    /// Wrap existing row-major items. Returns `None` if `items` does not hold exactly `width * height` elements.
    pub fn from_raw(size: [usize; 2], items: Vec<T>) -> Option<Self> {
        if size[0].checked_mul(size[1]) == Some(items.len()) {
            Some(Self { size, items })
        } else {
            None
        }
    }

    #[inline(always)]
    pub fn size(&self) -> [usize; 2] {
        self.size
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.size[0]
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.size[1]
    }

    /// Convert the given index into a linear index that can be used to index into the raw data of this buffer.
    #[inline(always)]
    pub fn linear_index(&self, [x, y]: [usize; 2]) -> usize {
        x + y * self.size[0]
    }

    /// View this buffer as a linear slice of elements.
    #[inline]
    pub fn raw(&self) -> &[T] {
        &self.items
    }

    /// View this buffer as a linear mutable slice of elements.
    #[inline]
    pub fn raw_mut(&mut self) -> &mut [T] {
        &mut self.items
    }

    #[inline]
    pub fn into_raw(self) -> Vec<T> {
        self.items
    }

    /// Get a reference to the item at the given index, if it is in bounds.
    #[inline]
    pub fn get(&self, index: [usize; 2]) -> Option<&T> {
        if index[0] < self.size[0] && index[1] < self.size[1] {
            self.items.get(self.linear_index(index))
        } else {
            None
        }
    }

    /// Get a mutable reference to the item at the given index.
    ///
    /// # Panics
    ///
    /// This function will panic if the index is not within bounds.
    #[inline]
    pub fn get_mut(&mut self, index: [usize; 2]) -> &mut T {
        let idx = self.linear_index(index);
        match self.items.get_mut(idx) {
            Some(item) if index[0] < self.size[0] => item,
            _ => panic!(
                "Attempted to access buffer of size {:?} at out-of-bounds location {:?}",
                self.size, index
            ),
        }
    }

    /// Write an item at the given index. Out-of-bounds writes are ignored.
    #[inline]
    pub fn write(&mut self, index: [usize; 2], item: T) {
        if index[0] < self.size[0] && index[1] < self.size[1] {
            let idx = self.linear_index(index);
            self.items[idx] = item;
        }
    }

    /// Clears the entire buffer with the given item.
    #[inline]
    pub fn clear(&mut self, item: T)
    where
        T: Clone,
    {
        self.items.iter_mut().for_each(|i| *i = item.clone());
    }
}

impl<T: Clone + IntoRgb> Texture for Buffer2d<T> {
    type Texel = T;

    #[inline]
    fn size(&self) -> [usize; 2] {
        self.size
    }

    #[inline]
    fn read(&self, index: [usize; 2]) -> Self::Texel {
        self.get(index)
            .unwrap_or_else(|| {
                panic!(
                    "Attempted to read buffer of size {:?} at out-of-bounds location {:?}",
                    self.size, index
                )
            })
            .clone()
    }
}

/// A per-pixel record of the nearest depth seen so far.
///
/// Larger depths are nearer to the viewer. The buffer is never cleared implicitly between draw calls: every draw
/// made through the same buffer is resolved against every earlier one until [`DepthBuffer::clear`] is called.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthBuffer {
    buffer: Buffer2d<f32>,
    clear_depth: f32,
}

impl DepthBuffer {
    /// The depth a freshly initialised buffer holds: the far end of the viewport's `[0, 1]` depth range.
    pub const DEFAULT_CLEAR: f32 = 0.0;

    /// Allocate a depth buffer covering a `width` x `height` framebuffer.
    pub fn new([width, height]: [usize; 2], clear_depth: f32) -> Self {
        Self {
            buffer: Buffer2d::fill([width, height], clear_depth),
            clear_depth,
        }
    }

    /// Resize the buffer to cover a `width` x `height` framebuffer and reset every depth.
    pub fn initialize(&mut self, width: usize, height: usize) {
        self.buffer = Buffer2d::fill([width, height], self.clear_depth);
    }

    /// Reset every depth to the clear value.
    pub fn clear(&mut self) {
        let clear_depth = self.clear_depth;
        self.buffer.clear(clear_depth);
    }

    #[inline(always)]
    pub fn size(&self) -> [usize; 2] {
        self.buffer.size()
    }

    #[inline(always)]
    pub fn clear_depth(&self) -> f32 {
        self.clear_depth
    }

    /// The stored depth at `(x, y)`, or `None` out of bounds.
    #[inline]
    pub fn depth(&self, x: usize, y: usize) -> Option<f32> {
        self.buffer.get([x, y]).copied()
    }

    /// Compare `z` against the stored depth at `(x, y)`, keeping it if it is nearer (strictly larger).
    ///
    /// Returns whether the sample passed. Out-of-bounds samples never pass.
    #[inline]
    pub fn test_and_set(&mut self, x: usize, y: usize, z: f32) -> bool {
        match self.buffer.get([x, y]) {
            Some(&old_z) if z > old_z => {
                self.buffer.write([x, y], z);
                true
            }
            _ => false,
        }
    }

    /// View the depths as a buffer, e.g. to sample them as a grey-scale texture.
    #[inline]
    pub fn as_buffer(&self) -> &Buffer2d<f32> {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_index_is_row_major() {
        let buf = Buffer2d::fill([4, 3], 0u8);
        assert_eq!(buf.linear_index([0, 0]), 0);
        assert_eq!(buf.linear_index([3, 0]), 3);
        assert_eq!(buf.linear_index([1, 2]), 9);
        assert_eq!(buf.raw().len(), 12);
    }

    #[test]
    fn get_checks_both_axes() {
        let buf = Buffer2d::fill([2, 2], 7u8);
        assert_eq!(buf.get([1, 1]), Some(&7));
        // Would alias [0, 1] in memory without the per-axis check
        assert_eq!(buf.get([2, 0]), None);
        assert_eq!(buf.get([0, 2]), None);
    }

    #[test]
    fn from_raw_validates_length() {
        assert!(Buffer2d::from_raw([2, 2], vec![0u8; 4]).is_some());
        assert!(Buffer2d::from_raw([2, 2], vec![0u8; 3]).is_none());
    }

    #[test]
    fn depth_keeps_nearest() {
        let mut depth = DepthBuffer::new([2, 2], DepthBuffer::DEFAULT_CLEAR);
        assert!(depth.test_and_set(1, 0, 0.1));
        assert!(depth.test_and_set(1, 0, 0.9));
        assert!(!depth.test_and_set(1, 0, 0.5));
        assert!(!depth.test_and_set(1, 0, 0.9));
        assert_eq!(depth.depth(1, 0), Some(0.9));
        assert!(!depth.test_and_set(5, 5, 1.0));
    }

    #[test]
    fn initialize_and_clear_reset_depths() {
        let mut depth = DepthBuffer::new([1, 1], -1.0);
        assert!(depth.test_and_set(0, 0, 0.5));
        depth.clear();
        assert_eq!(depth.depth(0, 0), Some(-1.0));
        depth.initialize(3, 2);
        assert_eq!(depth.size(), [3, 2]);
        assert_eq!(depth.depth(2, 1), Some(-1.0));
    }
}
