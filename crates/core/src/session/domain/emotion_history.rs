use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::emotion::domain::emotion_distribution::{EmotionDistribution, EmotionLabel};
use crate::shared::constants::EMOTION_HISTORY_LIMIT;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EmotionEntry {
    pub timestamp: DateTime<Utc>,
    pub emotion: EmotionLabel,
    pub confidence: f64,
    pub all_emotions: EmotionDistribution,
}

/// Bounded log of per-frame emotion summaries; oldest entries drop first.
#[derive(Clone, Debug)]
pub struct EmotionHistory {
    entries: VecDeque<EmotionEntry>,
    limit: usize,
}

impl EmotionHistory {
    pub fn new() -> Self {
        Self::with_limit(EMOTION_HISTORY_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// Records the dominant emotion of `emotions`, stamped with the current time.
    pub fn record(&mut self, emotions: &EmotionDistribution) {
        self.record_at(Utc::now(), emotions);
    }

    pub fn record_at(&mut self, timestamp: DateTime<Utc>, emotions: &EmotionDistribution) {
        if self.limit == 0 {
            return;
        }
        let (emotion, confidence) = emotions.dominant();
        if self.entries.len() == self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(EmotionEntry {
            timestamp,
            emotion,
            confidence,
            all_emotions: *emotions,
        });
    }

    /// Retained entries, oldest first.
    pub fn recent(&self) -> impl Iterator<Item = &EmotionEntry> + '_ {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&EmotionEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for EmotionHistory {
    fn default() -> Self {
        Self::new()
    }
}
