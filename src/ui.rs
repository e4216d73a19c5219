use console::style;
use std::fmt::Display;
use std::io::Write;
use std::time::Duration;
use tokio::task::JoinHandle;

// ─── Style helpers ───────────────────────────────────────────────────────────

/// Green bold — success confirmations, farewell line
pub fn success<D: Display>(text: D) -> String {
    style(text).green().bold().to_string()
}

/// Cyan — decorative banner rules
pub fn rule<D: Display>(text: D) -> String {
    style(text).cyan().to_string()
}

/// Yellow bold — banner title
pub fn title<D: Display>(text: D) -> String {
    style(text).yellow().bold().to_string()
}

/// Yellow — notices, warnings
pub fn notice<D: Display>(text: D) -> String {
    style(text).yellow().to_string()
}

/// Blue bold — the user prompt label
pub fn prompt<D: Display>(text: D) -> String {
    style(text).blue().bold().to_string()
}

/// Green bold — the assistant reply label
pub fn assistant<D: Display>(text: D) -> String {
    style(text).green().bold().to_string()
}

// ─── Startup banner ──────────────────────────────────────────────────────────

pub fn print_banner() {
    println!();
    println!("{}", rule("========================================"));
    println!("{}", title("        TODOPILOT  ·  AI TO-DO LIST     "));
    println!("{}", rule("========================================"));
    println!("{}", success("Type your requests (or 'exit' to quit):"));
    println!();
}

// ─── Thinking spinner ────────────────────────────────────────────────────────

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Animated "Thinking" indicator shown while a turn is in flight.
///
/// Runs as a detached task that owns stdout's current line; callers must
/// `stop` it before printing turn output.
pub struct Spinner {
    handle: JoinHandle<()>,
}

impl Spinner {
    pub fn start(label: &str) -> Self {
        let label = notice(label);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_millis(100));
            let mut frame = 0usize;
            loop {
                ticker.tick().await;
                print!("\r{label} {} ", SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]);
                let _ = std::io::stdout().flush();
                frame += 1;
            }
        });
        Self { handle }
    }

    /// Abort the animation and clear the line.
    pub fn stop(self) {
        self.handle.abort();
        print!("\r\x1b[K");
        let _ = std::io::stdout().flush();
    }
}
