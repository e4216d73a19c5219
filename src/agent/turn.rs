use super::action::Action;
use super::prompt::SYSTEM_PROMPT;
use crate::error::ProtocolError;
use crate::llm::{ChatMessage, CompletionClient};
use crate::store::TodoStore;
use crate::tools::ToolCall;
use anyhow::Context;
use tracing::{debug, warn};

/// Correction appended when a completion fails to parse as JSON.
const INVALID_JSON_CORRECTION: &str =
    "Your last response was not valid JSON. Please respond in the correct JSON format.";

fn unknown_type_correction(kind: &str) -> String {
    format!("Unknown action type: {kind}. Expected 'output' or 'action'.")
}

/// The conversation history for one assistant process: an append-only,
/// ordered sequence of role-tagged messages seeded with the system prompt.
///
/// Owned by the shell and passed into each turn explicitly; it grows
/// unbounded for the process lifetime — there is no summarization or
/// windowing, the full sequence is the model's only context.
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::system(SYSTEM_PROMPT)],
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs one user turn: model round-trips and tool dispatch until the model
/// produces an `output` message.
///
/// Every recoverable failure — transport errors, malformed JSON, unknown
/// functions, unknown action types — is fed back to the model as a
/// system-role message and the loop continues. There is deliberately no
/// iteration cap and no backoff: the protocol trusts the model to converge
/// once it sees its own mistake in context.
pub struct TurnLoop<'a> {
    client: &'a dyn CompletionClient,
    store: &'a TodoStore,
}

impl<'a> TurnLoop<'a> {
    pub fn new(client: &'a dyn CompletionClient, store: &'a TodoStore) -> Self {
        Self { client, store }
    }

    /// Drive the loop to the turn's terminal state and return the output
    /// text for the shell to print.
    pub async fn run(&self, conversation: &mut Conversation) -> anyhow::Result<String> {
        loop {
            let completion = match self.client.complete(conversation.messages()).await {
                Ok(completion) => completion,
                Err(err) => {
                    warn!(error = %err, "completion request failed");
                    conversation.push(ChatMessage::system(format!(
                        "API error occurred: {err}. Let's try a different approach."
                    )));
                    continue;
                }
            };

            // Recorded raw, before parsing: the model must see its own
            // invalid output when asked to correct it.
            conversation.push(ChatMessage::assistant(completion.clone()));

            let action = match Action::parse(&completion) {
                Ok(action) => action,
                Err(ProtocolError::UnknownActionType { kind }) => {
                    conversation.push(ChatMessage::system(unknown_type_correction(&kind)));
                    continue;
                }
                Err(err) => {
                    debug!(error = %err, "discarding malformed completion");
                    conversation.push(ChatMessage::system(INVALID_JSON_CORRECTION.to_string()));
                    continue;
                }
            };

            match action {
                Action::Output { output } => {
                    debug!(messages = conversation.len(), "turn complete");
                    return Ok(output);
                }

                Action::Invoke {
                    function,
                    id,
                    input,
                } => {
                    let call = match ToolCall::parse(&function, id, input) {
                        Ok(call) => call,
                        Err(ProtocolError::UnknownTool { name, available }) => {
                            conversation.push(ChatMessage::system(format!(
                                "The function {name} is not available. \
                                 Available functions are: {available}"
                            )));
                            continue;
                        }
                        Err(err) => {
                            conversation.push(ChatMessage::system(err.to_string()));
                            continue;
                        }
                    };

                    debug!(tool = %function, "invoking tool");
                    let observation = call.invoke(self.store).await;
                    let message = serde_json::to_string(&Action::observation(observation))
                        .context("serialize observation")?;
                    conversation.push(ChatMessage::assistant(message));
                }

                other => {
                    conversation.push(ChatMessage::system(unknown_type_correction(other.kind())));
                }
            }
        }
    }
}
