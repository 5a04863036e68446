use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// The seven emotion labels, in alphabetical order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EmotionLabel {
    Angry,
    Disgust,
    Fear,
    Happy,
    Neutral,
    Sad,
    Surprise,
}

impl EmotionLabel {
    pub const COUNT: usize = 7;

    pub const ALL: [EmotionLabel; Self::COUNT] = [
        EmotionLabel::Angry,
        EmotionLabel::Disgust,
        EmotionLabel::Fear,
        EmotionLabel::Happy,
        EmotionLabel::Neutral,
        EmotionLabel::Sad,
        EmotionLabel::Surprise,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EmotionLabel::Angry => "angry",
            EmotionLabel::Disgust => "disgust",
            EmotionLabel::Fear => "fear",
            EmotionLabel::Happy => "happy",
            EmotionLabel::Neutral => "neutral",
            EmotionLabel::Sad => "sad",
            EmotionLabel::Surprise => "surprise",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EmotionLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Probability per [`EmotionLabel`], summing to 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmotionDistribution {
    probabilities: [f64; EmotionLabel::COUNT],
}

impl EmotionDistribution {
    /// Returned whenever no face could be scored.
    pub fn fallback() -> Self {
        Self::from_pairs([
            (EmotionLabel::Neutral, 0.7),
            (EmotionLabel::Happy, 0.1),
            (EmotionLabel::Sad, 0.05),
            (EmotionLabel::Angry, 0.05),
            (EmotionLabel::Surprise, 0.05),
            (EmotionLabel::Fear, 0.03),
            (EmotionLabel::Disgust, 0.02),
        ])
    }

    /// Normalizes non-negative weights by their sum.
    ///
    /// Returns `None` if the weights do not have a positive finite sum.
    pub fn normalized(weights: [(EmotionLabel, f64); EmotionLabel::COUNT]) -> Option<Self> {
        let total: f64 = weights.iter().map(|(_, w)| w).sum();
        if !(total.is_finite() && total > 0.0) || weights.iter().any(|(_, w)| *w < 0.0) {
            return None;
        }
        Some(Self::from_pairs(weights.map(|(label, w)| (label, w / total))))
    }

    fn from_pairs(pairs: [(EmotionLabel, f64); EmotionLabel::COUNT]) -> Self {
        let mut probabilities = [0.0; EmotionLabel::COUNT];
        for (label, p) in pairs {
            probabilities[label.slot()] = p;
        }
        Self { probabilities }
    }

    pub fn get(&self, label: EmotionLabel) -> f64 {
        self.probabilities[label.slot()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (EmotionLabel, f64)> + '_ {
        EmotionLabel::ALL.into_iter().map(move |l| (l, self.get(l)))
    }

    pub fn total(&self) -> f64 {
        self.probabilities.iter().sum()
    }

    /// Most probable label; ties go to the label that sorts first.
    pub fn dominant(&self) -> (EmotionLabel, f64) {
        self.iter()
            .fold((EmotionLabel::Neutral, f64::NEG_INFINITY), |best, cur| {
                if cur.1 > best.1 {
                    cur
                } else {
                    best
                }
            })
    }
}

impl Default for EmotionDistribution {
    fn default() -> Self {
        Self::fallback()
    }
}

impl Serialize for EmotionDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(EmotionLabel::COUNT))?;
        for (label, p) in self.iter() {
            map.serialize_entry(label.as_str(), &p)?;
        }
        map.end()
    }
}
