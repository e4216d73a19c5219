use crate::agent::{Action, Conversation, TurnLoop};
use crate::llm::{ChatMessage, CompletionClient};
use crate::store::TodoStore;
use crate::ui::{self, Spinner};
use anyhow::Context;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

/// What to do with one line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Disposition {
    Exit,
    Blank,
    Request(String),
}

fn classify(line: &str) -> Disposition {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case("exit") {
        Disposition::Exit
    } else if trimmed.is_empty() {
        Disposition::Blank
    } else {
        Disposition::Request(trimmed.to_string())
    }
}

/// Interactive prompt loop: one line in, one dispatch turn out.
///
/// `exit` (case-insensitive) and EOF end the loop cleanly; blank lines are
/// re-prompted without touching conversation state; everything else becomes
/// a user action message and runs one turn to completion.
pub async fn run(client: &dyn CompletionClient, store: &TodoStore) -> anyhow::Result<()> {
    ui::print_banner();

    let mut conversation = Conversation::new();
    let turn_loop = TurnLoop::new(client, store);

    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    loop {
        print!("{} ", ui::prompt("You:"));
        let _ = std::io::stdout().flush();

        let Some(line) = lines.next_line().await.context("read stdin")? else {
            break;
        };

        let request = match classify(&line) {
            Disposition::Exit => break,
            Disposition::Blank => {
                println!("{}", ui::notice("Please enter a command or question."));
                continue;
            }
            Disposition::Request(request) => request,
        };

        let message =
            serde_json::to_string(&Action::user(request)).context("serialize user message")?;
        conversation.push(ChatMessage::user(message));

        let spinner = Spinner::start("Thinking");
        match turn_loop.run(&mut conversation).await {
            Ok(output) => {
                spinner.stop();
                println!("{} {output}", ui::assistant("Assistant:"));
            }
            Err(err) => {
                spinner.stop();
                warn!(error = %err, "turn failed");
                conversation.push(ChatMessage::system(format!(
                    "Error: {err}. Please try again with a different request."
                )));
            }
        }
    }

    println!();
    println!("{}", ui::success("Thank you for using TodoPilot. Goodbye!"));
    Ok(())
}
