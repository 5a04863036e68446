use chrono::Utc;
use serde::Serialize;

use crate::conversation::domain::emotion_prompt::EmotionPrompt;
use crate::conversation::domain::response_generator::ResponseGenerator;
use crate::session::domain::conversation_history::{ConversationEntry, ConversationHistory};

/// Reply used whenever the generator cannot produce one.
pub const FALLBACK_REPLY: &str = "I understand your feelings. How can I help you today?";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatReply {
    pub response: String,
    pub emotion: String,
    pub intensity: f64,
}

/// Emotion-aware chat: prompt → generator → reply, recorded in history.
pub struct ChatUseCase {
    generator: Box<dyn ResponseGenerator>,
    history: ConversationHistory,
}

impl ChatUseCase {
    pub fn new(generator: Box<dyn ResponseGenerator>) -> Self {
        Self {
            generator,
            history: ConversationHistory::new(),
        }
    }

    /// Never fails; generator errors yield [`FALLBACK_REPLY`].
    pub fn respond(&mut self, message: &str, emotion: &str, intensity: f64) -> ChatReply {
        let prompt = EmotionPrompt::new(message, emotion, intensity).render();
        let response = match self.generator.generate(&prompt) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Response generation failed: {e}");
                FALLBACK_REPLY.to_string()
            }
        };

        self.history.push(ConversationEntry {
            timestamp: Utc::now(),
            user_message: message.to_string(),
            ai_response: response.clone(),
            emotion: emotion.to_string(),
            intensity,
        });

        ChatReply {
            response,
            emotion: emotion.to_string(),
            intensity,
        }
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }
}
