use ndarray::ArrayView2;

use crate::emotion::domain::emotion_distribution::EmotionDistribution;

/// Domain interface for turning a grayscale face crop into emotion probabilities.
///
/// `None` means no face was available for this frame. Implementations never
/// fail: anything they cannot score maps to [`EmotionDistribution::fallback`].
pub trait EmotionScorer: Send {
    fn score(&mut self, face: Option<ArrayView2<'_, u8>>) -> EmotionDistribution;
}
