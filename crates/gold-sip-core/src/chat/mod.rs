//! A linear question-and-answer form that collects the four SIP inputs,
//! shows the valuation, then offers a small follow-up menu.
//!
//! The session is an ordinary value owned by the caller; the engine keeps
//! no conversation state of its own.

pub mod parse;
pub mod session;

pub use session::{ChatReply, ChatSession, ChatState};
