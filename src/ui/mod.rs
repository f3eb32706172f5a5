//! Display seam between the session core and whatever renders it.

use chrono::{DateTime, Local};

use crate::core::expression::Expression;

/// Rendering capability handed to the session orchestrator at construction.
/// The core never looks up display components; it only pushes messages and
/// expression changes through this trait.
pub trait DisplaySink: Send {
    /// Append a message to the transcript view.
    fn push_message(&mut self, text: &str, is_user: bool, timestamp: DateTime<Local>);

    /// Update the character portrait.
    fn set_expression(&mut self, expression: Expression);

    /// Drop everything from the transcript view.
    fn reset(&mut self);
}

/// Minimal line-oriented sink for the terminal front end.
pub struct TerminalSink {
    show_timestamps: bool,
}

impl TerminalSink {
    pub fn new(show_timestamps: bool) -> Self {
        Self { show_timestamps }
    }
}

impl DisplaySink for TerminalSink {
    fn push_message(&mut self, text: &str, is_user: bool, timestamp: DateTime<Local>) {
        let speaker = if is_user { "You" } else { "Bot" };
        if self.show_timestamps {
            println!("[{}] {speaker}: {text}", timestamp.format("%H:%M:%S"));
        } else {
            println!("{speaker}: {text}");
        }
    }

    fn set_expression(&mut self, expression: Expression) {
        println!("* portrait: {expression}");
    }

    fn reset(&mut self) {
        println!("--- chat cleared ---");
    }
}
