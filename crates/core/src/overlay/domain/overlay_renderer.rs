use crate::pipeline::analyze_frame_use_case::FrameAnalysis;
use crate::shared::frame::Frame;

/// Domain interface for drawing analysis results onto a frame in place.
pub trait OverlayRenderer: Send {
    fn render(
        &self,
        frame: &mut Frame,
        analysis: &FrameAnalysis,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
