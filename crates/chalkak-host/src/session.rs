//! Guidance session actor.
//!
//! One tokio task exclusively owns the [`AlignmentCoordinator`] for a
//! session. Producers (tracking provider, detector, storage) push
//! [`SessionCommand`]s through a bounded channel; consumers (indicator
//! renderer, recording button) read the latest [`SessionState`] from a
//! watch channel. The coordinator is therefore only ever mutated from the
//! actor task.
//!
//! ```text
//!  tracking provider ─┐                        ┌─► indicator renderer
//!  detector ──────────┼─► mpsc ─► actor task ─►│ watch
//!  storage (guide) ───┘                        └─► recording gate
//! ```

use chalkak_guidance::{AlignmentCoordinator, FeedbackIndicators, FeedbackMapper};
use chalkak_models::{AlignmentSnapshot, BoundingBox, Guide, GuideId, HeightSample, TiltSample};
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, Instrument};
use uuid::Uuid;
use validator::Validate;

use crate::config::HostConfig;
use crate::error::{HostError, HostResult};
use crate::gate::RecordingGate;
use crate::logging::SessionLogger;

/// Update delivered to a guidance session.
#[derive(Debug, Clone)]
pub enum SessionCommand {
    /// Install a guide as reference
    SetReference(Box<Guide>),
    /// Drop the reference and keep the session running
    ClearReference,
    /// Orientation sample
    Tilt(TiltSample),
    /// Height sample in meters
    Height(HeightSample),
    /// Ground anchor flag from the tracking provider
    GroundAnchor(bool),
    /// Full live detection set
    LiveBoxes(Vec<BoundingBox>),
    /// End the session
    End,
}

/// State published to consumers after every update.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SessionState {
    pub snapshot: AlignmentSnapshot,
    /// Indicator placement derived from the snapshot
    pub indicators: FeedbackIndicators,
    /// Whether the "start recording" action is enabled
    pub recording_enabled: bool,
}

/// Statistics returned when a session ends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub session_id: String,
    /// Guide installed when the session ended
    pub guide_id: Option<GuideId>,
    /// Updates processed (excluding `End`)
    pub updates: u64,
    /// Updates after which the session was aligned
    pub aligned_updates: u64,
    /// Number of flips of the aggregate verdict
    pub alignment_changes: u64,
    /// 1-based index of the first aligned update
    pub first_aligned_update: Option<u64>,
    /// Number of times recording became enabled
    pub recording_gate_openings: u64,
    pub final_state: SessionState,
}

/// Cloneable handle for pushing updates into a session.
///
/// Dropping every handle ends the session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    session_id: String,
    tx: mpsc::Sender<SessionCommand>,
    state_rx: watch::Receiver<SessionState>,
}

impl SessionHandle {
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Push an update without waiting.
    ///
    /// Frame-cadence samples use this: when the session lags behind, the
    /// sample is dropped and [`HostError::ChannelFull`] is returned.
    pub fn try_push(&self, command: SessionCommand) -> HostResult<()> {
        self.tx.try_send(command).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => HostError::ChannelFull,
            mpsc::error::TrySendError::Closed(_) => HostError::SessionEnded,
        })
    }

    /// Push an update, waiting for channel capacity.
    pub async fn send(&self, command: SessionCommand) -> HostResult<()> {
        self.tx
            .send(command)
            .await
            .map_err(|_| HostError::SessionEnded)
    }

    pub fn push_tilt(&self, sample: TiltSample) -> HostResult<()> {
        self.try_push(SessionCommand::Tilt(sample))
    }

    pub fn push_height(&self, sample: HeightSample) -> HostResult<()> {
        self.try_push(SessionCommand::Height(sample))
    }

    pub fn push_ground_anchor(&self, found: bool) -> HostResult<()> {
        self.try_push(SessionCommand::GroundAnchor(found))
    }

    pub fn push_live_boxes(&self, boxes: Vec<BoundingBox>) -> HostResult<()> {
        self.try_push(SessionCommand::LiveBoxes(boxes))
    }

    /// Validate and install a guide as reference.
    ///
    /// Invalid guides are rejected here so the caller gets the error.
    pub async fn set_reference(&self, guide: Guide) -> HostResult<()> {
        guide
            .validate()
            .map_err(chalkak_guidance::GuidanceError::from)?;
        self.send(SessionCommand::SetReference(Box::new(guide))).await
    }

    pub async fn clear_reference(&self) -> HostResult<()> {
        self.send(SessionCommand::ClearReference).await
    }

    /// Ask the session to end after the queued updates.
    pub async fn end(&self) -> HostResult<()> {
        self.send(SessionCommand::End).await
    }

    /// Latest published state.
    pub fn state(&self) -> SessionState {
        *self.state_rx.borrow()
    }

    /// Receiver that is notified whenever the published state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_rx.clone()
    }
}

/// Session actor owning the coordinator.
pub struct GuidanceSession {
    coordinator: AlignmentCoordinator,
    mapper: FeedbackMapper,
    gate: RecordingGate,
    rx: mpsc::Receiver<SessionCommand>,
    state_tx: watch::Sender<SessionState>,
    logger: SessionLogger,
    report: SessionReport,
}

impl GuidanceSession {
    /// Start a session task and return its handle and join handle.
    pub fn spawn(config: &HostConfig) -> HostResult<(SessionHandle, JoinHandle<SessionReport>)> {
        config.validate()?;

        let session_id = Uuid::new_v4().to_string();
        let coordinator = AlignmentCoordinator::new(config.guidance.clone())?;
        let (tx, rx) = mpsc::channel(config.channel_capacity);
        let (state_tx, state_rx) = watch::channel(SessionState::default());
        let logger = SessionLogger::new(&session_id);
        let span = logger.create_span();

        let session = Self {
            coordinator,
            mapper: FeedbackMapper::from_config(&config.guidance),
            gate: RecordingGate::new(config.min_stable_updates),
            rx,
            state_tx,
            logger,
            report: SessionReport {
                session_id: session_id.clone(),
                guide_id: None,
                updates: 0,
                aligned_updates: 0,
                alignment_changes: 0,
                first_aligned_update: None,
                recording_gate_openings: 0,
                final_state: SessionState::default(),
            },
        };

        let join = tokio::spawn(session.run().instrument(span));
        let handle = SessionHandle {
            session_id,
            tx,
            state_rx,
        };

        Ok((handle, join))
    }

    async fn run(mut self) -> SessionReport {
        self.logger.log_start();

        while let Some(command) = self.rx.recv().await {
            if matches!(command, SessionCommand::End) {
                break;
            }
            self.apply(command);
            self.publish();
        }

        // Remaining queued updates are discarded with the session state
        self.rx.close();
        self.report.guide_id = self.coordinator.reference_guide_id().cloned();
        self.report.recording_gate_openings = self.gate.openings();
        self.report.final_state = *self.state_tx.borrow();
        self.logger.log_end(self.report.updates);
        self.report
    }

    fn apply(&mut self, command: SessionCommand) {
        let was_aligned = self.coordinator.is_aligned();

        match command {
            SessionCommand::SetReference(guide) => match self.coordinator.set_reference(&guide) {
                Ok(()) => {
                    self.gate.reset();
                    self.logger.set_guide(Some(guide.id.as_str()));
                    self.logger.log_reference("installed");
                }
                Err(e) => self.logger.log_warning(&format!("guide rejected: {}", e)),
            },
            SessionCommand::ClearReference => {
                self.coordinator.clear_reference();
                self.gate.reset();
                self.logger.log_reference("cleared");
                self.logger.set_guide(None);
            }
            SessionCommand::Tilt(sample) => self.coordinator.ingest_tilt(sample),
            SessionCommand::Height(sample) => self.coordinator.ingest_height(sample),
            SessionCommand::GroundAnchor(found) => self.coordinator.ingest_ground_anchor(found),
            SessionCommand::LiveBoxes(boxes) => {
                let matched = self.coordinator.ingest_live_bounding_boxes(boxes);
                debug!(matched, "Live boxes ingested");
            }
            SessionCommand::End => {}
        }

        self.report.updates += 1;
        let aligned = self.coordinator.compare();
        if aligned {
            self.report.aligned_updates += 1;
            self.report.first_aligned_update.get_or_insert(self.report.updates);
        }
        if aligned != was_aligned {
            self.report.alignment_changes += 1;
            self.logger.log_alignment(aligned, self.report.updates);
        }
    }

    fn publish(&mut self) {
        let snapshot = self.coordinator.snapshot();
        let state = SessionState {
            recording_enabled: self.gate.observe(&snapshot),
            indicators: self.mapper.map(&snapshot),
            snapshot,
        };
        self.state_tx.send_if_modified(|current| {
            if *current == state {
                false
            } else {
                *current = state;
                true
            }
        });
    }
}
