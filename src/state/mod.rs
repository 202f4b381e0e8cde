//! State management module
//!
//! This module handles all persistent state of the gallery:
//! - The SQLite painting catalog (library.rs)
//! - Shared data structures (data.rs)
//! - Dropdown option lists stored as JSON (options.rs)
//! - Known museum coordinates (locations.rs)
//! - CSV import/export (csv_io.rs)
//! - Intent handling that ties the stores together (sync.rs)

pub mod csv_io;
pub mod data;
pub mod library;
pub mod locations;
pub mod options;
pub mod sync;
