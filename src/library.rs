//! Track records and the file-selection boundary.
//!
//! `library::model` holds the `Track` record owned by the playlist,
//! `library::locator` turns paths and URLs into playable locators and
//! `library::picker` is the modal file selector that feeds new tracks in.

mod display;
mod locator;
mod model;
mod picker;
mod scan;

pub use display::display_name;
pub use locator::{Locator, validate_cover_url};
pub use model::*;
pub use picker::FilePicker;

#[cfg(test)]
mod tests;
