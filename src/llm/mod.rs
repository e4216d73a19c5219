mod client;
mod compatible;
mod types;

pub use client::CompletionClient;
pub use compatible::OpenAiCompatibleClient;
pub use types::{ChatMessage, Role};
