//! Image representations filled by the shard decoder.
//!
//! An image is populated through its linear pixel index, in the same order as the pixel bytes
//! of a record: all the red values, then green, then blue, each plane stored row by row.
use crate::shard::{CHANNELS, HEIGHT, PIXELS_PER_IMAGE, WIDTH};

pub trait Image {
    type Pixel;

    /// Number of pixel slots, the decoder requires this to be 3072.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn set_pixel(&mut self, index: usize, value: Self::Pixel);

    fn as_slice(&self) -> &[Self::Pixel];
}

/// Flat form, one value per pixel byte.
impl<P> Image for Vec<P> {
    type Pixel = P;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn set_pixel(&mut self, index: usize, value: P) {
        self[index] = value
    }

    fn as_slice(&self) -> &[P] {
        Vec::as_slice(self)
    }
}

/// Builds an empty flat image with room for the 3072 pixels of a record.
pub fn flat_image<P: Default + Clone>() -> Vec<P> {
    vec![P::default(); PIXELS_PER_IMAGE]
}

/// Builds an empty (3, 32, 32) image.
pub fn image_3d<P: Default + Clone>() -> Image3d<P> {
    Image3d::new(CHANNELS, HEIGHT, WIDTH)
}

/// A channel-major 3 dimensional image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image3d<P> {
    dims: (usize, usize, usize),
    data: Vec<P>,
}

impl<P: Default + Clone> Image3d<P> {
    pub fn new(channels: usize, height: usize, width: usize) -> Self {
        Self {
            dims: (channels, height, width),
            data: vec![P::default(); channels * height * width],
        }
    }
}

impl<P> Image3d<P> {
    /// The (channels, height, width) shape of the image.
    pub fn dims(&self) -> (usize, usize, usize) {
        self.dims
    }

    fn offset(&self, c: usize, y: usize, x: usize) -> usize {
        let (channels, height, width) = self.dims;
        assert!(
            c < channels && y < height && x < width,
            "index ({c}, {y}, {x}) out of range for {:?}",
            self.dims
        );
        (c * height + y) * width + x
    }

    /// # Panics
    ///
    /// Panics if `(c, y, x)` is outside of [`Self::dims`], like slice indexing does.
    pub fn get(&self, c: usize, y: usize, x: usize) -> &P {
        &self.data[self.offset(c, y, x)]
    }

    /// # Panics
    ///
    /// Panics if `(c, y, x)` is outside of [`Self::dims`].
    pub fn set(&mut self, c: usize, y: usize, x: usize, value: P) {
        let offset = self.offset(c, y, x);
        self.data[offset] = value
    }

    pub fn into_vec(self) -> Vec<P> {
        self.data
    }
}

impl<P> Image for Image3d<P> {
    type Pixel = P;

    fn len(&self) -> usize {
        self.data.len()
    }

    fn set_pixel(&mut self, index: usize, value: P) {
        self.data[index] = value
    }

    fn as_slice(&self) -> &[P] {
        &self.data
    }
}
