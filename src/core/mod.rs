pub mod config;
pub mod expression;
pub mod handoff;
pub mod history;
pub mod message;
pub mod session;
