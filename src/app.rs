//! Application module: the playback controller and its model types.
//!
//! `PlaybackController` in `app::controller` owns the playlist and session
//! state and is the only place either is mutated. `app::model` holds the
//! state enums and the policies configured at startup.

mod controller;
mod model;

pub use controller::*;
pub use model::*;
