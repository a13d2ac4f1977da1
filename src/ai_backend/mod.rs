pub mod common;
pub mod gemini;

pub use common::AiBackend;
pub use gemini::GeminiBackend;
