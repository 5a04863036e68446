/// Domain interface for a text generation backend.
///
/// Takes a fully built prompt and returns the model's reply text.
pub trait ResponseGenerator: Send {
    fn generate(&mut self, prompt: &str) -> Result<String, Box<dyn std::error::Error>>;
}
