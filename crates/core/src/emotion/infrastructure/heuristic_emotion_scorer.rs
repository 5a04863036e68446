//! Randomized emotion scores that drift on a ten-second cycle.
//!
//! Pixel content is not inspected beyond checking that a crop exists, and the
//! geometric features from the landmark stage are not consulted.

use ndarray::ArrayView2;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::emotion::domain::emotion_distribution::{EmotionDistribution, EmotionLabel};
use crate::emotion::domain::emotion_scorer::EmotionScorer;
use crate::shared::clock::{Clock, SystemClock};

/// Length of the bonus cycle in seconds.
pub const CYCLE_SECONDS: f64 = 10.0;

/// `(label, low, span)`: base weight is drawn from `[low, low + span)`.
/// Draw order follows this table.
const BASE_WEIGHTS: [(EmotionLabel, f64, f64); EmotionLabel::COUNT] = [
    (EmotionLabel::Happy, 0.2, 0.4),
    (EmotionLabel::Neutral, 0.3, 0.3),
    (EmotionLabel::Surprise, 0.1, 0.2),
    (EmotionLabel::Sad, 0.05, 0.15),
    (EmotionLabel::Angry, 0.05, 0.1),
    (EmotionLabel::Fear, 0.02, 0.08),
    (EmotionLabel::Disgust, 0.02, 0.05),
];

/// `(phase upper bound, label, bonus)`; the first bound above the phase wins.
const PHASE_BONUSES: [(f64, EmotionLabel, f64); 4] = [
    (2.0, EmotionLabel::Happy, 0.2),
    (4.0, EmotionLabel::Neutral, 0.2),
    (6.0, EmotionLabel::Surprise, 0.1),
    (CYCLE_SECONDS, EmotionLabel::Sad, 0.1),
];

pub struct HeuristicEmotionScorer {
    rng: Box<dyn RngCore + Send>,
    clock: Box<dyn Clock>,
}

impl HeuristicEmotionScorer {
    pub fn new(rng: Box<dyn RngCore + Send>, clock: Box<dyn Clock>) -> Self {
        Self { rng, clock }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(Box::new(StdRng::seed_from_u64(seed)), Box::new(SystemClock))
    }

    pub fn from_entropy() -> Self {
        Self::new(Box::new(StdRng::from_os_rng()), Box::new(SystemClock))
    }

    fn base_weights(&mut self) -> [(EmotionLabel, f64); EmotionLabel::COUNT] {
        BASE_WEIGHTS.map(|(label, low, span)| (label, low + self.rng.random::<f64>() * span))
    }
}

impl Default for HeuristicEmotionScorer {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// Label that receives the bonus at `seconds`, with the bonus amount.
pub fn phase_bonus(seconds: f64) -> (EmotionLabel, f64) {
    let phase = seconds.rem_euclid(CYCLE_SECONDS);
    PHASE_BONUSES
        .iter()
        .find(|(upper, _, _)| phase < *upper)
        .map(|&(_, label, bonus)| (label, bonus))
        .unwrap_or((EmotionLabel::Sad, 0.1))
}

impl EmotionScorer for HeuristicEmotionScorer {
    fn score(&mut self, face: Option<ArrayView2<'_, u8>>) -> EmotionDistribution {
        match face {
            Some(roi) if !roi.is_empty() => {}
            _ => return EmotionDistribution::fallback(),
        }

        let mut weights = self.base_weights();
        let (boosted, bonus) = phase_bonus(self.clock.now_seconds());
        for (label, weight) in weights.iter_mut() {
            if *label == boosted {
                *weight += bonus;
            }
        }

        EmotionDistribution::normalized(weights).unwrap_or_else(|| {
            log::warn!("Emotion weights did not normalize, using fallback");
            EmotionDistribution::fallback()
        })
    }
}
