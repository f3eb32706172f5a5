//! Kaiwa is a visual-novel style terminal chat client: a character portrait
//! changes expression based on the sentiment of each message while a backend
//! service generates the character's replies.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns session state: the transcript, the two-stage turn
//!   pipeline, chat history persistence, and the resume handoff slot used to
//!   carry a selected history file into a new session.
//! - [`api`] defines the request/response payloads and the clients for the
//!   sentiment analysis and reply endpoints.
//! - [`ui`] is the display seam: the session orchestrator talks to a
//!   [`ui::DisplaySink`] rather than any concrete rendering mechanism.
//! - [`cli`] parses command-line arguments and runs the interactive loop.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`cli::run`].

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
