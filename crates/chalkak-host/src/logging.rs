//! Structured session logging utilities.

use tracing::{info, warn, Span};

/// Session logger for structured logging with consistent fields.
#[derive(Debug, Clone)]
pub struct SessionLogger {
    session_id: String,
    guide_id: Option<String>,
}

impl SessionLogger {
    /// Create a new session logger.
    pub fn new(session_id: &str) -> Self {
        Self {
            session_id: session_id.to_string(),
            guide_id: None,
        }
    }

    /// Record the guide now used as reference.
    pub fn set_guide(&mut self, guide_id: Option<&str>) {
        self.guide_id = guide_id.map(str::to_string);
    }

    pub fn log_start(&self) {
        info!(session_id = %self.session_id, "Guidance session started");
    }

    pub fn log_reference(&self, message: &str) {
        info!(
            session_id = %self.session_id,
            guide_id = self.guide_id.as_deref().unwrap_or("-"),
            "Reference: {}", message
        );
    }

    pub fn log_alignment(&self, aligned: bool, update: u64) {
        info!(
            session_id = %self.session_id,
            guide_id = self.guide_id.as_deref().unwrap_or("-"),
            aligned,
            update,
            "Alignment {}", if aligned { "reached" } else { "lost" }
        );
    }

    pub fn log_warning(&self, message: &str) {
        warn!(
            session_id = %self.session_id,
            guide_id = self.guide_id.as_deref().unwrap_or("-"),
            "Session warning: {}", message
        );
    }

    pub fn log_end(&self, updates: u64) {
        info!(
            session_id = %self.session_id,
            guide_id = self.guide_id.as_deref().unwrap_or("-"),
            updates,
            "Guidance session ended"
        );
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn guide_id(&self) -> Option<&str> {
        self.guide_id.as_deref()
    }

    /// Create a tracing span for this session.
    pub fn create_span(&self) -> Span {
        tracing::info_span!("guidance_session", session_id = %self.session_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_logger_guide() {
        let mut logger = SessionLogger::new("session-1");
        assert_eq!(logger.session_id(), "session-1");
        assert!(logger.guide_id().is_none());

        logger.set_guide(Some("guide-9"));
        assert_eq!(logger.guide_id(), Some("guide-9"));

        logger.set_guide(None);
        assert!(logger.guide_id().is_none());
    }
}
