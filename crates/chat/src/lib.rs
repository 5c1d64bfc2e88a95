//! Chat front door for Rigsmith.
//!
//! Every chat message is dispatched in one of two modes:
//!
//! - **discuss** — forwarded to the configured [`Answerer`], which may reply
//!   with text or with a structured build
//! - **build** — a budget is pulled out of the message text and the build
//!   optimizer runs directly; no answerer is involved
//!
//! [`Answerer`]: rigsmith_core::Answerer

pub mod budget;
pub mod dispatcher;
pub mod unconfigured;

pub use budget::extract_budget;
pub use dispatcher::{BuildData, ChatDispatcher, ChatMode, ChatRequest, ChatResponse, ResponseKind};
pub use unconfigured::UnconfiguredAnswerer;
