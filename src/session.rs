//! Restart persistence: the session snapshot, its on-disk store and the
//! autosave policy that decides when the controller's state is written.
//!
//! A missing or malformed snapshot never reaches the UI as an error; it
//! is logged and replaced with an empty session.

mod autosave;
mod snapshot;
mod store;

pub use autosave::Autosave;
pub use snapshot::Snapshot;
pub use store::SnapshotStore;

#[cfg(test)]
mod tests;
