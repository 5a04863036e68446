use crate::shared::face_rect::FaceRect;
use crate::shared::frame::Frame;

/// Domain interface for face localization.
///
/// Returns zero or more face rectangles in detection order; the first one is
/// treated as the primary face. `&mut self` leaves room for stateful backends.
pub trait FaceLocator: Send {
    fn locate(&mut self, frame: &Frame) -> Result<Vec<FaceRect>, Box<dyn std::error::Error>>;
}
