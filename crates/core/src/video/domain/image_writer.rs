use std::path::Path;

use crate::shared::frame::Frame;

/// Encodes a [`Frame`] to an image file.
pub trait ImageWriter: Send {
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;
}
