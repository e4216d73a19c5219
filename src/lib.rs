#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::new_without_default
)]

pub mod agent;
pub mod config;
pub mod error;
pub mod llm;
pub mod shell;
pub mod store;
pub mod tools;
pub mod ui;

pub use config::Config;
pub use error::PilotError;

use anyhow::Context;

/// Wire up the completion client and todo store from config, then hand
/// control to the interactive shell. The store pool is released on the exit
/// command and on shell failure alike.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let api_key = config.api_key();
    let client = llm::OpenAiCompatibleClient::new(
        &config.base_url,
        api_key.as_deref(),
        &config.model,
        config.temperature,
        &config.api_key_env,
    );

    let store = store::TodoStore::open(&config.todo_db_path())
        .await
        .context("open todo store")?;

    let result = shell::run(&client, &store).await;

    store.close().await;
    result
}
