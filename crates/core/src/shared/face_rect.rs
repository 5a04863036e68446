use serde::ser::{Serialize, Serializer};

/// Axis-aligned face bounding box in frame pixels.
///
/// Serializes as `[x, y, w, h]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FaceRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl FaceRect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Builds a rect from float corners `(x1, y1, x2, y2)`, clamped to a
    /// `frame_w` × `frame_h` frame. Returns `None` if nothing is left.
    pub fn from_corners(
        corners: (f64, f64, f64, f64),
        frame_w: u32,
        frame_h: u32,
    ) -> Option<Self> {
        let (x1, y1, x2, y2) = corners;
        let clamp = |v: f64, max: u32| v.round().clamp(0.0, max as f64) as u32;
        let left = clamp(x1, frame_w);
        let top = clamp(y1, frame_h);
        let right = clamp(x2, frame_w);
        let bottom = clamp(y2, frame_h);
        if right <= left || bottom <= top {
            return None;
        }
        Some(Self::new(left, top, right - left, bottom - top))
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
}

impl Serialize for FaceRect {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.x, self.y, self.w, self.h].serialize(serializer)
    }
}
