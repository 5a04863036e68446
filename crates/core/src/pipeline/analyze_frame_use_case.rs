use std::time::Instant;

use serde::Serialize;

use crate::detection::domain::face_locator::FaceLocator;
use crate::emotion::domain::emotion_distribution::{EmotionDistribution, EmotionLabel};
use crate::emotion::domain::emotion_scorer::EmotionScorer;
use crate::landmarks::domain::emotion_features::EmotionFeatures;
use crate::landmarks::domain::landmark_set::LandmarkSet;
use crate::landmarks::domain::landmark_synthesizer::LandmarkSynthesizer;
use crate::landmarks::domain::region_map::RegionMap;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::face_rect::FaceRect;
use crate::shared::frame::Frame;

/// Everything derived for one located face.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FaceRecord {
    pub landmarks: LandmarkSet,
    pub regions: RegionMap,
    pub emotion_features: EmotionFeatures,
    pub face_rect: FaceRect,
}

/// Result of analysing one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameAnalysis {
    pub faces: Vec<FaceRecord>,
    pub emotions: EmotionDistribution,
}

impl FrameAnalysis {
    /// Analysis of a frame in which no face could be used.
    pub fn empty() -> Self {
        Self {
            faces: Vec::new(),
            emotions: EmotionDistribution::fallback(),
        }
    }

    pub fn dominant(&self) -> (EmotionLabel, f64) {
        self.emotions.dominant()
    }
}

/// Single-frame analysis: locate → (synthesize → map → extract) per face,
/// and locate → score for the frame.
///
/// Never fails. Locator errors and unusable crops fall back to an empty face
/// list and the fallback distribution.
pub struct AnalyzeFrameUseCase {
    locator: Box<dyn FaceLocator>,
    synthesizer: LandmarkSynthesizer,
    scorer: Box<dyn EmotionScorer>,
    logger: Box<dyn PipelineLogger>,
}

impl AnalyzeFrameUseCase {
    pub fn new(
        locator: Box<dyn FaceLocator>,
        synthesizer: LandmarkSynthesizer,
        scorer: Box<dyn EmotionScorer>,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            locator,
            synthesizer,
            scorer,
            logger,
        }
    }

    pub fn execute(&mut self, frame: &Frame) -> FrameAnalysis {
        let start = Instant::now();
        let rects = match self.locator.locate(frame) {
            Ok(rects) => rects,
            Err(e) => {
                log::warn!("Face location failed on frame {}: {e}", frame.index());
                Vec::new()
            }
        };
        self.logger.timing("locate", elapsed_ms(start));
        self.logger.metric("faces", rects.len() as f64);

        let start = Instant::now();
        let faces: Vec<FaceRecord> = rects.iter().map(|rect| self.describe(rect)).collect();
        self.logger.timing("landmarks", elapsed_ms(start));

        let start = Instant::now();
        let primary = rects.first().and_then(|rect| {
            let roi = frame.gray_region(rect);
            if roi.is_none() {
                log::warn!("Face crop {rect:?} lies outside frame {}", frame.index());
            }
            roi
        });
        let emotions = self.scorer.score(primary.as_ref().map(|roi| roi.view()));
        self.logger.timing("score", elapsed_ms(start));

        FrameAnalysis { faces, emotions }
    }

    pub fn logger(&self) -> &dyn PipelineLogger {
        self.logger.as_ref()
    }

    pub fn logger_mut(&mut self) -> &mut dyn PipelineLogger {
        self.logger.as_mut()
    }

    fn describe(&mut self, rect: &FaceRect) -> FaceRecord {
        let landmarks = self.synthesizer.synthesize(rect);
        let regions = RegionMap::map_regions(&landmarks);
        let emotion_features = EmotionFeatures::extract(&regions);
        FaceRecord {
            landmarks,
            regions,
            emotion_features,
            face_rect: *rect,
        }
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
