use anyhow::Result;

pub trait AiBackend {
    /// Sends one prompt to the text-generation service and returns the
    /// generated text, or the failure the service raised.
    fn invoke(&self, system_instruction: &str, prompt: &str) -> Result<String>;
}
