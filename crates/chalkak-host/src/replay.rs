//! Offline replay of a capture trace against a guide.

use chalkak_models::Guide;
use tracing::info;

use crate::config::HostConfig;
use crate::error::HostResult;
use crate::session::{GuidanceSession, SessionCommand, SessionReport};
use crate::trace::TraceEvent;

/// Run `events` through a fresh session with `guide` installed.
///
/// Replay waits for channel capacity instead of dropping samples, so the
/// report is deterministic for a given trace.
pub async fn replay(
    config: &HostConfig,
    guide: Guide,
    events: Vec<TraceEvent>,
) -> HostResult<SessionReport> {
    let (handle, join) = GuidanceSession::spawn(config)?;

    info!(
        session_id = handle.session_id(),
        guide_id = %guide.id,
        events = events.len(),
        "Replaying capture trace"
    );

    handle.set_reference(guide).await?;
    for event in events {
        handle.send(SessionCommand::from(event)).await?;
    }
    handle.end().await?;

    Ok(join.await?)
}
