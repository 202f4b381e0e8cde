//! Dropdown options for the painting editor
//!
//! The editor offers genres, movements and materials from growable lists.
//! New values are appended when a painting is added; nothing is ever removed.
//! The lists are stored as a human-readable JSON document:
//!
//! ```json
//! {
//!     "genres": ["пейзаж"],
//!     "materials": ["холст", "масло"],
//!     "movements": ["реализм"]
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{GalleryError, Result};

/// Which dropdown list a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Genre,
    Material,
    Movement,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Genre, Category::Material, Category::Movement];

    /// Key of this list in the options file
    pub fn key(self) -> &'static str {
        match self {
            Category::Genre => "genres",
            Category::Material => "materials",
            Category::Movement => "movements",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The three option lists. Insertion order is kept; values are unique.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct OptionSet {
    pub genres: Vec<String>,
    pub materials: Vec<String>,
    pub movements: Vec<String>,
}

impl OptionSet {
    pub fn values(&self, category: Category) -> &[String] {
        match category {
            Category::Genre => &self.genres,
            Category::Material => &self.materials,
            Category::Movement => &self.movements,
        }
    }

    fn values_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Genre => &mut self.genres,
            Category::Material => &mut self.materials,
            Category::Movement => &mut self.movements,
        }
    }

    /// Exact, case-sensitive membership test
    pub fn contains(&self, category: Category, value: &str) -> bool {
        self.values(category).iter().any(|v| v == value)
    }

    /// Write as pretty JSON with four-space indentation
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        let mut ser = serde_json::Serializer::with_formatter(writer, PrettyFormatter::with_indent(b"    "));
        self.serialize(&mut ser)?;
        Ok(())
    }

    /// Parse from JSON. Missing keys become empty lists.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Persistent store for the dropdown option lists
#[derive(Debug)]
pub struct OptionStore {
    path: PathBuf,
    options: OptionSet,
}

impl OptionStore {
    /// Load the options file at `path`.
    ///
    /// Never fails: a missing file is an empty option set, and an
    /// unreadable one is logged and treated as empty.
    pub fn load(path: &Path) -> Self {
        let options = read_options(path);
        Self {
            path: path.to_path_buf(),
            options,
        }
    }

    /// Re-read the file, discarding the in-memory state.
    /// Only needed when something else may have written the file.
    pub fn reload(&mut self) {
        self.options = read_options(&self.path);
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    pub fn values(&self, category: Category) -> &[String] {
        self.options.values(category)
    }

    pub fn contains(&self, category: Category, value: &str) -> bool {
        self.options.contains(category, value)
    }

    /// Append `value` to `category` unless it is blank or already present.
    /// Returns true if the set changed. Does not write to disk.
    pub fn add_if_absent(&mut self, category: Category, value: &str) -> bool {
        if value.trim().is_empty() || self.options.contains(category, value) {
            return false;
        }

        self.options.values_mut(category).push(value.to_string());
        debug!(category = %category, value = value, "new option value");
        true
    }

    /// Write the full option set to disk
    pub fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut writer = BufWriter::new(File::create(&self.path)?);
        self.options.write_json(&mut writer)?;
        writer.flush()?;
        info!(path = %self.path.display(), "dropdown options saved");
        Ok(())
    }
}

fn read_options(path: &Path) -> OptionSet {
    if !path.exists() {
        debug!(path = %path.display(), "no options file, starting empty");
        return OptionSet::default();
    }

    let parsed = std::fs::read_to_string(path)
        .map_err(GalleryError::from)
        .and_then(|content| OptionSet::from_json(&content));

    match parsed {
        Ok(options) => options,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read options file, starting empty");
            OptionSet::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = OptionStore::load(&dir.path().join("dropdown_options.json"));

        assert_eq!(store.options(), &OptionSet::default());
    }

    #[test]
    fn test_missing_keys_default_to_empty() {
        let options = OptionSet::from_json(r#"{"genres": ["портрет"]}"#).unwrap();

        assert_eq!(options.genres, vec!["портрет"]);
        assert!(options.materials.is_empty());
        assert!(options.movements.is_empty());
    }

    #[test]
    fn test_malformed_file_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dropdown_options.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = OptionStore::load(&path);
        assert_eq!(store.options(), &OptionSet::default());
    }

    #[test]
    fn test_add_if_absent_is_idempotent() {
        let dir = tempdir().unwrap();
        let mut store = OptionStore::load(&dir.path().join("o.json"));

        assert!(store.add_if_absent(Category::Material, "масло"));
        assert!(!store.add_if_absent(Category::Material, "масло"));

        assert_eq!(store.values(Category::Material), ["масло"]);
    }

    #[test]
    fn test_add_if_absent_compares_verbatim() {
        let dir = tempdir().unwrap();
        let mut store = OptionStore::load(&dir.path().join("o.json"));

        assert!(store.add_if_absent(Category::Genre, "Пейзаж"));
        assert!(store.add_if_absent(Category::Genre, "пейзаж"));
        assert!(store.add_if_absent(Category::Genre, "пейзаж "));

        assert_eq!(store.values(Category::Genre).len(), 3);
    }

    #[test]
    fn test_blank_values_are_never_added() {
        let dir = tempdir().unwrap();
        let mut store = OptionStore::load(&dir.path().join("o.json"));

        assert!(!store.add_if_absent(Category::Movement, ""));
        assert!(!store.add_if_absent(Category::Movement, "   "));
        assert!(store.values(Category::Movement).is_empty());
    }

    #[test]
    fn test_categories_are_independent() {
        let dir = tempdir().unwrap();
        let mut store = OptionStore::load(&dir.path().join("o.json"));

        store.add_if_absent(Category::Genre, "реализм");
        assert!(store.add_if_absent(Category::Movement, "реализм"));
        assert!(!store.contains(Category::Material, "реализм"));
    }

    #[test]
    fn test_write_json_layout() {
        let options = OptionSet {
            genres: vec!["пейзаж".to_string()],
            ..Default::default()
        };
        let mut buf = Vec::new();

        options.write_json(&mut buf).unwrap();

        let expected = "{\n    \"genres\": [\n        \"пейзаж\"\n    ],\n    \"materials\": [],\n    \"movements\": []\n}";
        assert_eq!(String::from_utf8(buf).unwrap(), expected);
    }

    #[test]
    fn test_persist_into_unwritable_location_fails() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        let mut store = OptionStore::load(&blocker.join("o.json"));
        store.add_if_absent(Category::Genre, "пейзаж");

        assert!(matches!(store.persist(), Err(GalleryError::Io(_))));
    }

    #[test]
    fn test_persist_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("dropdown_options.json");
        let mut store = OptionStore::load(&path);
        store.add_if_absent(Category::Genre, "пейзаж");
        store.add_if_absent(Category::Material, "холст");
        store.persist().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"пейзаж\""), "non-ASCII must stay readable");
        assert!(content.contains("\n    \"genres\""));

        let reloaded = OptionStore::load(&path);
        assert_eq!(reloaded.options(), store.options());
    }

    #[test]
    fn test_reload_picks_up_external_changes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("o.json");
        let mut store = OptionStore::load(&path);

        std::fs::write(&path, r#"{"genres": [], "materials": ["темпера"], "movements": []}"#).unwrap();
        assert!(!store.contains(Category::Material, "темпера"));

        store.reload();
        assert!(store.contains(Category::Material, "темпера"));
    }
}
