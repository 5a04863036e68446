use crate::emotion::domain::emotion_distribution::EmotionLabel;
use crate::overlay::domain::overlay_renderer::OverlayRenderer;
use crate::pipeline::analyze_frame_use_case::FrameAnalysis;
use crate::shared::face_rect::FaceRect;
use crate::shared::frame::Frame;

const MESH_COLOR: [u8; 3] = [0, 255, 0];
const MESH_RADIUS: i64 = 1;
const RECT_COLOR: [u8; 3] = [0, 0, 255];
const RECT_THICKNESS: u32 = 2;

const BAR_ORIGIN: (i64, i64) = (10, 50);
const BAR_HEIGHT: i64 = 15;
const BAR_PITCH: i64 = 25;
const BAR_MAX_WIDTH: f64 = 200.0;

/// RGB colour used for each emotion's landmarks and bar.
pub fn emotion_color(label: EmotionLabel) -> [u8; 3] {
    match label {
        EmotionLabel::Angry => [255, 0, 0],
        EmotionLabel::Disgust => [0, 128, 128],
        EmotionLabel::Fear => [128, 0, 128],
        EmotionLabel::Happy => [0, 255, 0],
        EmotionLabel::Neutral => [128, 128, 128],
        EmotionLabel::Sad => [0, 0, 255],
        EmotionLabel::Surprise => [255, 255, 0],
    }
}

/// Landmark disc radius for a dominant-emotion confidence.
pub fn landmark_radius(confidence: f64) -> i64 {
    ((2.0 + confidence * 4.0) as i64).max(1)
}

/// Draws two layers: the emotion layer, then the face mesh on top.
///
/// The emotion layer colours the primary face's landmarks with the dominant
/// emotion, sized by its confidence, and stacks one bar per emotion in label
/// order. The mesh layer marks every face's landmarks with small green dots
/// and outlines every face rectangle. Everything is clipped to the frame.
pub struct MeshOverlayRenderer;

impl MeshOverlayRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MeshOverlayRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayRenderer for MeshOverlayRenderer {
    fn render(
        &self,
        frame: &mut Frame,
        analysis: &FrameAnalysis,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if frame.channels() < 3 {
            return Err(format!(
                "Overlay needs an RGB frame, got {} channel(s)",
                frame.channels()
            )
            .into());
        }
        let mut canvas = Canvas::new(frame);
        draw_emotion_layer(&mut canvas, analysis);
        draw_mesh_layer(&mut canvas, analysis);
        Ok(())
    }
}

fn draw_emotion_layer(canvas: &mut Canvas<'_>, analysis: &FrameAnalysis) {
    let Some(primary) = analysis.faces.first() else {
        return;
    };

    let (dominant, confidence) = analysis.dominant();
    let color = emotion_color(dominant);
    let radius = landmark_radius(confidence);
    for p in primary.landmarks.points() {
        canvas.fill_disc(p.x as i64, p.y as i64, radius, color);
    }

    let (x, mut y) = BAR_ORIGIN;
    for (label, p) in analysis.emotions.iter() {
        let width = (p * BAR_MAX_WIDTH) as i64;
        canvas.fill_rect(x, y, x + width, y + BAR_HEIGHT, emotion_color(label));
        y += BAR_PITCH;
    }
}

fn draw_mesh_layer(canvas: &mut Canvas<'_>, analysis: &FrameAnalysis) {
    for face in &analysis.faces {
        for p in face.landmarks.points() {
            canvas.fill_disc(p.x as i64, p.y as i64, MESH_RADIUS, MESH_COLOR);
        }
        canvas.outline_rect(&face.face_rect, RECT_THICKNESS, RECT_COLOR);
    }
}

/// Clipped pixel writer over the first three channels of a frame.
struct Canvas<'a> {
    data: &'a mut [u8],
    width: i64,
    height: i64,
    channels: usize,
}

impl<'a> Canvas<'a> {
    fn new(frame: &'a mut Frame) -> Self {
        let width = frame.width() as i64;
        let height = frame.height() as i64;
        let channels = frame.channels() as usize;
        Self {
            data: frame.data_mut(),
            width,
            height,
            channels,
        }
    }

    /// Fills `[x0, x1) × [y0, y1)`.
    fn fill_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: [u8; 3]) {
        let (x0, x1) = (x0.max(0), x1.min(self.width));
        let (y0, y1) = (y0.max(0), y1.min(self.height));
        for y in y0..y1 {
            for x in x0..x1 {
                self.put(x, y, color);
            }
        }
    }

    fn fill_disc(&mut self, cx: i64, cy: i64, radius: i64, color: [u8; 3]) {
        let r_sq = radius * radius;
        for y in (cy - radius).max(0)..(cy + radius + 1).min(self.height) {
            for x in (cx - radius).max(0)..(cx + radius + 1).min(self.width) {
                let (dx, dy) = (x - cx, y - cy);
                if dx * dx + dy * dy <= r_sq {
                    self.put(x, y, color);
                }
            }
        }
    }

    /// Border of `rect`, `thickness` pixels drawn inwards.
    fn outline_rect(&mut self, rect: &FaceRect, thickness: u32, color: [u8; 3]) {
        if rect.is_empty() {
            return;
        }
        let (x0, y0) = (rect.x as i64, rect.y as i64);
        let (x1, y1) = (rect.right() as i64, rect.bottom() as i64);
        let t = thickness as i64;
        self.fill_rect(x0, y0, x1, y0 + t, color);
        self.fill_rect(x0, y1 - t, x1, y1, color);
        self.fill_rect(x0, y0, x0 + t, y1, color);
        self.fill_rect(x1 - t, y0, x1, y1, color);
    }

    fn put(&mut self, x: i64, y: i64, color: [u8; 3]) {
        let offset = (y as usize * self.width as usize + x as usize) * self.channels;
        self.data[offset..offset + 3].copy_from_slice(&color);
    }
}
