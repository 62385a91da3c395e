//! Capture trace format.
//!
//! A trace is a JSON-lines file with one provider update per line, recorded
//! on device and replayed offline to tune matching thresholds:
//!
//! ```text
//! {"type":"ground","found":true}
//! {"type":"tilt","degree_x":1.0,"degree_z":-0.5}
//! {"type":"height","meters":1.12}
//! {"type":"boxes","boxes":[{"label":"person","rect":{"x":0.4,"y":0.4,"width":0.2,"height":0.2}}]}
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use chalkak_models::{BoundingBox, Tilt};
use serde::{Deserialize, Serialize};

use crate::error::{HostError, HostResult};
use crate::session::SessionCommand;

/// One recorded provider update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TraceEvent {
    Tilt { degree_x: f64, degree_z: f64 },
    Height { meters: f64 },
    Ground { found: bool },
    Boxes { boxes: Vec<BoundingBox> },
}

impl From<TraceEvent> for SessionCommand {
    fn from(event: TraceEvent) -> Self {
        match event {
            TraceEvent::Tilt { degree_x, degree_z } => {
                SessionCommand::Tilt(Tilt::new(degree_x, degree_z))
            }
            TraceEvent::Height { meters } => SessionCommand::Height(meters),
            TraceEvent::Ground { found } => SessionCommand::GroundAnchor(found),
            TraceEvent::Boxes { boxes } => SessionCommand::LiveBoxes(boxes),
        }
    }
}

/// Parse trace events from a reader.
pub fn parse_trace<R: BufRead>(reader: R) -> HostResult<Vec<TraceEvent>> {
    let mut events = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let event = serde_json::from_str(trimmed)
            .map_err(|e| HostError::trace_parse(idx + 1, e.to_string()))?;
        events.push(event);
    }
    Ok(events)
}

/// Read a trace file.
pub fn read_trace(path: impl AsRef<Path>) -> HostResult<Vec<TraceEvent>> {
    let file = File::open(path)?;
    parse_trace(BufReader::new(file))
}

/// Write events as JSON lines.
pub fn write_trace<W: Write>(mut writer: W, events: &[TraceEvent]) -> HostResult<()> {
    for event in events {
        serde_json::to_writer(&mut writer, event)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
