use ndarray::{s, Array2, ArrayView3, ArrayViewMut3};

use crate::shared::face_rect::FaceRect;

/// Luma weights applied to the first three channels.
const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// A single video/image frame: contiguous 8-bit pixels in row-major order.
///
/// Decoders produce RGB, but nothing downstream depends on channel order:
/// detection sees the whole frame and scoring only sees grayscale crops.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Single-channel luma image, `(height, width)`.
    ///
    /// Frames with fewer than three channels are treated as already gray
    /// and only their first channel is used.
    pub fn to_grayscale(&self) -> Array2<u8> {
        luma(self.as_ndarray())
    }

    /// Grayscale crop of `rect`, clipped to the frame.
    ///
    /// Returns `None` when the clipped crop has no pixels.
    pub fn gray_region(&self, rect: &FaceRect) -> Option<Array2<u8>> {
        let x0 = rect.x.min(self.width) as usize;
        let y0 = rect.y.min(self.height) as usize;
        let x1 = rect.right().min(self.width) as usize;
        let y1 = rect.bottom().min(self.height) as usize;
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(luma(self.as_ndarray().slice(s![y0..y1, x0..x1, ..])))
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}

fn luma(src: ArrayView3<'_, u8>) -> Array2<u8> {
    let (h, w, channels) = src.dim();
    if channels < 3 {
        return src.slice(s![.., .., 0]).to_owned();
    }
    Array2::from_shape_fn((h, w), |(y, x)| {
        let luma: f32 = (0..3)
            .map(|c| src[[y, x, c]] as f32 * LUMA_WEIGHTS[c])
            .sum();
        luma.round().min(255.0) as u8
    })
}
