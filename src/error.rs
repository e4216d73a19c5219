use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `TodoPilot`.
///
/// Each subsystem defines its own error variant. Callers can match on these
/// to decide recovery strategy; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum PilotError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── LLM / Completion endpoint ───────────────────────────────────────
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    // ── Todo store ──────────────────────────────────────────────────────
    #[error("store: {0}")]
    Store(#[from] StoreError),

    // ── Model message protocol ──────────────────────────────────────────
    #[error("protocol: {0}")]
    Protocol(#[from] ProtocolError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── LLM errors ──────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API key not set. Export {env_var} before starting the assistant.")]
    MissingApiKey { env_var: String },

    #[error("completion request failed: {0}")]
    Request(String),

    #[error("completion endpoint returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("completion response decode failed: {0}")]
    Decode(String),

    #[error("completion response contained no choices")]
    EmptyResponse,
}

// ─── Store errors ────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),

    #[error("todo not found: {id}")]
    NotFound { id: String },

    #[error("sqlx: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Protocol errors ─────────────────────────────────────────────────────────

/// The model violated the JSON message contract. Never fatal: each variant
/// maps to a system-role correction appended to the conversation.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("response was not valid JSON: {0}")]
    InvalidJson(String),

    #[error("function {name} is not available; available functions are: {available}")]
    UnknownTool { name: String, available: String },

    #[error("unknown action type: {kind}")]
    UnknownActionType { kind: String },
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, PilotError>;
