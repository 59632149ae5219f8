//! Chat-completion client seam.

pub mod messages;
pub mod openai;
pub mod traits;

pub use messages::{ChatMessage, SamplingParams};
pub use openai::OpenAiClient;
pub use traits::LlmClient;
