pub mod ai_backend;
pub mod categorization;
pub mod command;
pub mod constants;
pub mod nld_generation;
pub mod output;
pub mod settings;
pub mod term_generation;
pub mod terms;

pub use ai_backend::{AiBackend, GeminiBackend};
pub use command::{Pipeline, PipelineArgs};
pub use settings::Settings;
