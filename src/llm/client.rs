use super::types::ChatMessage;
use std::future::Future;
use std::pin::Pin;

/// Contract between the dispatch loop and a completion endpoint.
///
/// One operation: submit the full message history, receive one text
/// completion. Model name, temperature, and response-format flags are
/// implementation configuration, not call-site parameters.
pub trait CompletionClient: Send + Sync {
    fn complete<'a>(
        &'a self,
        messages: &'a [ChatMessage],
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>>;
}
