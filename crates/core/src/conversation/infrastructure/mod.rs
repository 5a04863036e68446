pub mod gemini_response_generator;
