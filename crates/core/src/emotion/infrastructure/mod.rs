pub mod heuristic_emotion_scorer;
