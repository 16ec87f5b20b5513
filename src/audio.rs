//! The audio element boundary.
//!
//! The controller drives an `AudioElement` with imperative commands and
//! receives `AudioEvent`s back. `AudioPlayer` is the rodio-backed element
//! running on its own thread; events carry the `LoadStamp` of the load they
//! belong to so stale ones can be dropped.

mod element;
mod player;
mod sink;
mod thread;
mod types;

pub use element::AudioElement;
pub use player::AudioPlayer;
pub use types::*;


#[cfg(test)]
pub(crate) mod testing;
