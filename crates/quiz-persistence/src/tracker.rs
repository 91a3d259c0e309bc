//! Unsaved-change and in-flight save tracking.

use std::time::Instant;

/// Tracks unsaved changes and the single save that may be in progress.
#[derive(Debug, Clone, Default)]
pub struct SaveTracker {
    dirty: bool,
    saving: bool,
    last_saved: Option<Instant>,
}

impl SaveTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Clear the dirty flag without saving, e.g. after loading a quiz.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Claim the save slot. Returns false if a save is already running.
    #[must_use]
    pub fn start_save(&mut self) -> bool {
        if self.saving {
            return false;
        }
        self.saving = true;
        true
    }

    pub fn save_complete(&mut self) {
        self.dirty = false;
        self.saving = false;
        self.last_saved = Some(Instant::now());
    }

    /// Release the save slot; unsaved changes remain.
    pub fn save_failed(&mut self) {
        self.saving = false;
    }

    pub fn last_saved(&self) -> Option<Instant> {
        self.last_saved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tracker_is_clean() {
        let tracker = SaveTracker::new();
        assert!(!tracker.is_dirty());
        assert!(!tracker.is_saving());
        assert!(tracker.last_saved().is_none());
    }

    #[test]
    fn test_second_save_is_refused() {
        let mut tracker = SaveTracker::new();
        tracker.mark_dirty();
        assert!(tracker.start_save());
        assert!(!tracker.start_save());

        tracker.save_complete();
        assert!(!tracker.is_dirty());
        assert!(tracker.last_saved().is_some());
        assert!(tracker.start_save());
    }

    #[test]
    fn test_save_failed_keeps_dirty() {
        let mut tracker = SaveTracker::new();
        tracker.mark_dirty();
        assert!(tracker.start_save());
        tracker.save_failed();

        assert!(tracker.is_dirty());
        assert!(!tracker.is_saving());
    }
}
