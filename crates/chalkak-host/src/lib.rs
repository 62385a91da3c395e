//! Guidance session host.
//!
//! This crate provides:
//! - A single-writer session actor owning one alignment coordinator
//! - A recording gate driven by the aggregate verdict
//! - A JSON-lines capture trace format and offline replay
//! - Structured session logging

pub mod config;
pub mod error;
pub mod gate;
pub mod logging;
pub mod replay;
pub mod session;
pub mod trace;

pub use config::HostConfig;
pub use error::{HostError, HostResult};
pub use gate::RecordingGate;
pub use logging::SessionLogger;
pub use replay::replay;
pub use session::{GuidanceSession, SessionCommand, SessionHandle, SessionReport, SessionState};
pub use trace::{parse_trace, read_trace, write_trace, TraceEvent};
