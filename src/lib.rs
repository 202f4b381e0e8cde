//! Painting gallery catalog.
//!
//! Paintings live in a SQLite table, the editor's dropdown options in a
//! JSON file. All reads and writes from a front end go through
//! [`state::sync::Synchronizer`].

pub mod config;
pub mod error;
pub mod logging;
pub mod state;

pub use error::{GalleryError, Result};
pub use state::data::{Painting, PaintingDetails};
pub use state::sync::{
    AddPainting, DetailOutcome, ExportOutcome, GalleryOutcome, IntentOutcome, Status, Synchronizer,
};
