//! Settings schema and loading.
//!
//! Settings drive playback policy (wrap or stop at the end, append or
//! replace on open), file-selector filters, snapshot and log locations.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;
