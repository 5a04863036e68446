use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::shared::constants::CONVERSATION_HISTORY_LIMIT;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConversationEntry {
    pub timestamp: DateTime<Utc>,
    pub user_message: String,
    pub ai_response: String,
    pub emotion: String,
    pub intensity: f64,
}

/// Bounded log of chat exchanges; oldest entries drop first.
#[derive(Clone, Debug)]
pub struct ConversationHistory {
    entries: VecDeque<ConversationEntry>,
    limit: usize,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::with_limit(CONVERSATION_HISTORY_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    pub fn push(&mut self, entry: ConversationEntry) {
        if self.limit == 0 {
            return;
        }
        if self.entries.len() == self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Retained exchanges, oldest first.
    pub fn recent(&self) -> impl Iterator<Item = &ConversationEntry> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: usize) -> ConversationEntry {
        ConversationEntry {
            timestamp: Utc::now(),
            user_message: format!("message {n}"),
            ai_response: format!("reply {n}"),
            emotion: "happy".to_string(),
            intensity: 0.5,
        }
    }

    #[test]
    fn test_push_and_recent_in_order() {
        let mut history = ConversationHistory::new();
        history.push(entry(1));
        history.push(entry(2));
        let messages: Vec<_> = history.recent().map(|e| e.user_message.as_str()).collect();
        assert_eq!(messages, ["message 1", "message 2"]);
    }

    #[test]
    fn test_window_keeps_last_twenty() {
        let mut history = ConversationHistory::new();
        for n in 0..25 {
            history.push(entry(n));
        }
        assert_eq!(history.len(), CONVERSATION_HISTORY_LIMIT);
        assert_eq!(history.recent().next().unwrap().user_message, "message 5");
    }

    #[test]
    fn test_empty_by_default() {
        assert!(ConversationHistory::default().is_empty());
    }
}
