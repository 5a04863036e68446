/// Tone guidance per emotion family, in the order they appear in the prompt.
const GUIDELINES: [(&str, &str); 5] = [
    ("'happy' or 'joy'", "Be enthusiastic and positive"),
    ("'sad' or 'angry'", "Be supportive and understanding"),
    ("'fear' or 'surprise'", "Be reassuring and calm"),
    ("'disgust'", "Be neutral and redirect positively"),
    ("'neutral'", "Be balanced and engaging"),
];

/// Empathetic prompt that tells the model how the user currently feels.
///
/// `emotion` is free text: labels outside the scorer's set (e.g. "joy") are
/// passed through unchanged.
#[derive(Clone, Debug, PartialEq)]
pub struct EmotionPrompt {
    message: String,
    emotion: String,
    intensity: f64,
}

impl EmotionPrompt {
    pub fn new(message: &str, emotion: &str, intensity: f64) -> Self {
        Self {
            message: message.to_string(),
            emotion: emotion.to_string(),
            intensity,
        }
    }

    pub fn render(&self) -> String {
        let mut prompt = format!(
            "You are an empathetic AI assistant. The user's current emotion is {} with intensity {:.2}.\n\n",
            self.emotion, self.intensity
        );
        prompt.push_str("Guidelines for responding:\n");
        for (emotions, tone) in GUIDELINES {
            prompt.push_str(&format!("- If emotion is {emotions}: {tone}\n"));
        }
        prompt.push_str(&format!("\nUser message: {}\n\n", self.message));
        prompt.push_str(
            "Respond appropriately to their emotion and message. \
             Keep responses concise but meaningful.",
        );
        prompt
    }
}
