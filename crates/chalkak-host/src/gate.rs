//! Recording gate.
//!
//! Enables the "start recording" action once the live framing matches the
//! guide. The gate opens after a run of consecutive aligned updates and
//! closes on the first update that is not aligned, so a single noisy
//! detection cannot flicker the action on.

use chalkak_models::AlignmentSnapshot;

#[derive(Debug, Clone)]
pub struct RecordingGate {
    min_stable_updates: u32,
    stable_updates: u32,
    open: bool,
    openings: u64,
}

impl RecordingGate {
    /// Create a closed gate. `min_stable_updates` below 1 is treated as 1.
    pub fn new(min_stable_updates: u32) -> Self {
        Self {
            min_stable_updates: min_stable_updates.max(1),
            stable_updates: 0,
            open: false,
            openings: 0,
        }
    }

    /// Feed one snapshot; returns whether recording is enabled.
    pub fn observe(&mut self, snapshot: &AlignmentSnapshot) -> bool {
        if snapshot.is_aligned {
            self.stable_updates = self.stable_updates.saturating_add(1);
            if !self.open && self.stable_updates >= self.min_stable_updates {
                self.open = true;
                self.openings += 1;
            }
        } else {
            self.stable_updates = 0;
            self.open = false;
        }
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Number of times the gate has opened.
    pub fn openings(&self) -> u64 {
        self.openings
    }

    /// Close the gate, e.g. when the reference changes.
    pub fn reset(&mut self) {
        self.stable_updates = 0;
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(is_aligned: bool) -> AlignmentSnapshot {
        AlignmentSnapshot {
            is_aligned,
            ..Default::default()
        }
    }

    #[test]
    fn test_opens_after_stable_run() {
        let mut gate = RecordingGate::new(3);
        assert!(!gate.observe(&snapshot(true)));
        assert!(!gate.observe(&snapshot(true)));
        assert!(gate.observe(&snapshot(true)));
        assert!(gate.observe(&snapshot(true)));
        assert_eq!(gate.openings(), 1);
    }

    #[test]
    fn test_closes_immediately() {
        let mut gate = RecordingGate::new(1);
        assert!(gate.observe(&snapshot(true)));
        assert!(!gate.observe(&snapshot(false)));
        assert!(gate.observe(&snapshot(true)));
        assert_eq!(gate.openings(), 2);
    }

    #[test]
    fn test_interrupted_run_restarts() {
        let mut gate = RecordingGate::new(2);
        gate.observe(&snapshot(true));
        gate.observe(&snapshot(false));
        assert!(!gate.observe(&snapshot(true)));
        assert!(gate.observe(&snapshot(true)));
    }

    #[test]
    fn test_zero_threshold_is_one() {
        let mut gate = RecordingGate::new(0);
        assert!(!gate.observe(&snapshot(false)));
        assert!(gate.observe(&snapshot(true)));
    }

    #[test]
    fn test_reset() {
        let mut gate = RecordingGate::new(1);
        gate.observe(&snapshot(true));
        gate.reset();
        assert!(!gate.is_open());
        assert_eq!(gate.openings(), 1);
    }
}
