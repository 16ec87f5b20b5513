use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::app::PlaybackController;
use crate::audio::AudioElement;
use crate::error::PlayerError;

use super::store::SnapshotStore;

/// Decides when the controller's state is written to the store.
///
/// Structural changes are saved on the first tick that sees them.
/// Position-only changes are coalesced to one write per `interval`.
pub struct Autosave {
    store: SnapshotStore,
    interval: Duration,
    saved_revision: Option<u64>,
    saved_position_revision: u64,
    last_write: Option<Instant>,
}

impl Autosave {
    pub fn new(store: SnapshotStore, interval: Duration) -> Self {
        Self {
            store,
            interval,
            saved_revision: None,
            saved_position_revision: 0,
            last_write: None,
        }
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Save if something worth saving changed. Returns whether a write happened.
    pub fn tick<A: AudioElement>(&mut self, controller: &PlaybackController<A>) -> bool {
        let structural = self.saved_revision != Some(controller.revision());
        let position = self.saved_position_revision != controller.position_revision();
        let due = self
            .last_write
            .is_none_or(|at| at.elapsed() >= self.interval);

        if !(structural || (position && due)) {
            return false;
        }
        match self.write(controller) {
            Ok(()) => true,
            Err(e) => {
                warn!("saving session to {} failed: {e}", self.store.path().display());
                // Wait for the next change or interval before retrying.
                self.saved_revision = Some(controller.revision());
                self.last_write = Some(Instant::now());
                false
            }
        }
    }

    /// Write unconditionally, e.g. on shutdown.
    pub fn flush<A: AudioElement>(
        &mut self,
        controller: &PlaybackController<A>,
    ) -> Result<(), PlayerError> {
        self.write(controller)
    }

    fn write<A: AudioElement>(
        &mut self,
        controller: &PlaybackController<A>,
    ) -> Result<(), PlayerError> {
        self.store.save_snapshot(&controller.snapshot())?;
        self.saved_revision = Some(controller.revision());
        self.saved_position_revision = controller.position_revision();
        self.last_write = Some(Instant::now());
        debug!("session saved (revision {})", controller.revision());
        Ok(())
    }
}
