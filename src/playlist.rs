//! The playlist store: ordered tracks plus the "current" cursor.
//!
//! Every mutation re-establishes the cursor invariant: `current` is `None`
//! exactly when the playlist is empty, and otherwise a valid index.

mod store;

pub use store::*;
