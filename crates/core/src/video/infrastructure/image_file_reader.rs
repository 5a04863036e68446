use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::frame::Frame;
use crate::video::domain::image_reader::ImageReader;

#[derive(Error, Debug)]
pub enum ImageReadError {
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("{path} has no pixels")]
    Empty { path: PathBuf },
}

/// Decodes image files with the `image` crate into RGB frames.
///
/// Alpha and high bit depths are dropped; every frame comes out as 8-bit RGB.
pub struct ImageFileReader;

impl ImageFileReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageReader for ImageFileReader {
    fn read(&self, path: &Path, index: usize) -> Result<Frame, Box<dyn std::error::Error>> {
        let rgb = image::open(path)
            .map_err(|source| ImageReadError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgb8();
        let (width, height) = rgb.dimensions();
        if width == 0 || height == 0 {
            return Err(ImageReadError::Empty {
                path: path.to_path_buf(),
            }
            .into());
        }
        log::debug!("Decoded {} ({width}x{height})", path.display());
        Ok(Frame::new(rgb.into_raw(), width, height, 3, index))
    }
}
