//! The session orchestrator: owns the transcript and drives the two-stage
//! turn pipeline (sentiment classification, then reply generation).

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, warn};

use crate::api::{ReplyBackend, SentimentBackend};
use crate::core::expression::Expression;
use crate::core::handoff;
use crate::core::history::TranscriptStore;
use crate::core::message::Turn;
use crate::ui::DisplaySink;

pub struct SessionOrchestrator {
    transcript: Vec<Turn>,
    /// Turn gate: closed from the moment a user turn is accepted until both
    /// pipeline stages have resolved. Input submitted while closed is
    /// dropped, never queued.
    awaiting_response: bool,
    sentiment: Box<dyn SentimentBackend>,
    reply: Box<dyn ReplyBackend>,
    store: TranscriptStore,
    sink: Box<dyn DisplaySink>,
    clear_on_load: bool,
}

impl SessionOrchestrator {
    pub fn new(
        sentiment: Box<dyn SentimentBackend>,
        reply: Box<dyn ReplyBackend>,
        store: TranscriptStore,
        sink: Box<dyn DisplaySink>,
        clear_on_load: bool,
    ) -> Self {
        Self {
            transcript: Vec::new(),
            awaiting_response: false,
            sentiment,
            reply,
            store,
            sink,
            clear_on_load,
        }
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn is_busy(&self) -> bool {
        self.awaiting_response
    }

    pub fn store(&self) -> &TranscriptStore {
        &self.store
    }

    /// Submit one user turn. Empty or whitespace-only input is a no-op, as
    /// is any submission while a previous turn is still in flight.
    pub async fn submit_turn(&mut self, text: &str) {
        let Some(text) = self.begin_turn(text) else {
            return;
        };
        self.run_pipeline(&text).await;
        self.awaiting_response = false;
    }

    /// Gate check plus the user-visible half of the turn: append the user
    /// Turn, emit it, and close the gate. Returns the text the pipeline
    /// should run with, or None if the submission was dropped.
    fn begin_turn(&mut self, text: &str) -> Option<String> {
        if self.awaiting_response {
            debug!("turn gate closed, dropping input");
            return None;
        }
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let text = text.to_string();
        self.push_turn(Turn::user(text.clone()));
        self.awaiting_response = true;
        Some(text)
    }

    /// Stage 1 then stage 2, strictly in that order. Classification failure
    /// falls back to a neutral expression and never blocks the reply stage;
    /// a reply failure lands in the transcript as a visible error turn.
    async fn run_pipeline(&mut self, text: &str) {
        let expression = match self.sentiment.classify(text).await {
            Ok(result) => {
                debug!(
                    sentiment = %result.sentiment,
                    confidence = result.confidence,
                    "classification succeeded"
                );
                Expression::from_label(&result.sentiment)
            }
            Err(e) => {
                warn!("sentiment classification failed, falling back to neutral: {e}");
                Expression::Neutral
            }
        };
        self.sink.set_expression(expression);

        match self.reply.reply(text).await {
            Ok(reply) => self.push_turn(Turn::bot(reply.trim())),
            Err(e) => {
                warn!("reply request failed: {e}");
                self.push_turn(Turn::bot(format!("Error: {e}")));
            }
        }
    }

    fn push_turn(&mut self, turn: Turn) {
        self.sink
            .push_message(&turn.content, turn.is_user, turn.timestamp);
        self.transcript.push(turn);
    }

    /// Status messages are shown bot-styled but are not part of the
    /// transcript, so they never end up in a saved history file.
    fn notify(&mut self, text: &str) {
        self.sink.push_message(text, false, Local::now());
    }

    /// Discard the in-memory transcript and reset the view. Persisted
    /// history files are untouched.
    pub fn clear(&mut self) {
        self.transcript.clear();
        self.sink.reset();
    }

    /// Persist the current transcript. An empty transcript writes nothing
    /// and surfaces a "nothing to save" notice instead.
    pub fn save(&mut self) -> Option<PathBuf> {
        if self.transcript.is_empty() {
            self.notify("There is no chat history to save.");
            return None;
        }
        match self.store.save(&self.transcript, Local::now()) {
            Ok(path) => {
                debug!(path = %path.display(), "chat history saved");
                self.notify("Chat history saved.");
                Some(path)
            }
            Err(e) => {
                warn!("failed to save chat history: {e}");
                self.notify("Failed to save chat history.");
                None
            }
        }
    }

    /// Restore a saved transcript. On any failure the current transcript is
    /// left untouched and a generic failure notice is emitted.
    pub fn load(&mut self, path: &Path) -> bool {
        let snapshot = match self.store.load(path) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("failed to load chat history: {e}");
                self.notify("Failed to load chat history.");
                return false;
            }
        };
        if self.clear_on_load {
            self.clear();
        }
        for turn in snapshot.messages {
            self.push_turn(turn);
        }
        self.notify(&format!(
            "Chat history restored. (saved at {})",
            snapshot.saved_at.format("%Y-%m-%d %H:%M:%S")
        ));
        true
    }

    /// Consume the handoff slot exactly once at session start; if a history
    /// file was selected before this session existed, load it now.
    pub fn resume_pending_selection(&mut self) {
        if let Some(path) = handoff::consume_and_clear() {
            debug!(path = %path.display(), "resuming selected chat history");
            self.load(&path);
        }
    }
}
