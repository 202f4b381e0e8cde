//! Intent handling for the gallery editor
//!
//! The presentation layer never touches the catalog or the options file
//! directly. It sends intents (add, save, import, export, detail lookup)
//! to the [`Synchronizer`], which writes through the stores and hands back
//! the fresh painting list together with a status message.
//!
//! Errors never escape an intent: they are logged and turned into
//! [`Status::Rejected`] (bad user input) or [`Status::Failed`] (storage).

use serde::Serialize;
use tracing::{info, warn};

use super::csv_io;
use super::data::{GalleryTile, Painting, PaintingDetails, TableRow, MATERIALS_SEPARATOR};
use super::library::Library;
use super::locations::{self, Coordinates};
use super::options::{Category, OptionStore};
use crate::error::{GalleryError, Result};

/// Status shown next to the table after an intent
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum Status {
    Success(String),
    /// The input was refused (missing fields, malformed CSV); nothing was written
    Rejected(String),
    /// The stores could not be read or written
    Failed(String),
}

impl Status {
    pub fn is_success(&self) -> bool {
        matches!(self, Status::Success(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Status::Success(m) | Status::Rejected(m) | Status::Failed(m) => m,
        }
    }
}

/// Result of an intent: the table to redraw plus a status
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct IntentOutcome {
    pub paintings: Vec<Painting>,
    pub status: Status,
}

/// Gallery grid contents plus a status
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GalleryOutcome {
    pub tiles: Vec<GalleryTile>,
    pub status: Status,
}

/// Detail card lookup. `detail` is `None` for an unknown id or a failure;
/// the status tells the two apart.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DetailOutcome {
    pub detail: Option<PaintingDetail>,
    pub status: Status,
}

/// CSV download. `csv` is empty unless the status is a success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub csv: Vec<u8>,
    pub status: Status,
}

/// Form contents of the "add painting" panel.
///
/// Empty strings mean "not filled in". The `new_*` fields override the
/// dropdown selection and grow the option lists.
#[derive(Debug, Clone, Default)]
pub struct AddPainting {
    pub title: String,
    pub artist: String,
    pub year: String,
    /// Materials picked from the multi-select dropdown
    pub materials: Vec<String>,
    pub movement: String,
    pub image_url: String,
    pub genre: String,
    pub country: String,
    pub location: String,
    pub description: String,
    pub new_material: String,
    pub new_movement: String,
    pub new_genre: String,
}

impl AddPainting {
    /// Required fields that were left empty, by column name
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("title", &self.title),
            ("artist", &self.artist),
            ("year", &self.year),
            ("image_url", &self.image_url),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    fn effective_genre(&self) -> &str {
        prefer(&self.new_genre, &self.genre)
    }

    fn effective_movement(&self) -> &str {
        prefer(&self.new_movement, &self.movement)
    }

    fn effective_materials(&self) -> Vec<String> {
        let mut materials = self.materials.clone();
        if !self.new_material.is_empty() && !materials.contains(&self.new_material) {
            materials.push(self.new_material.clone());
        }
        materials
    }
}

fn prefer<'a>(override_value: &'a str, selected: &'a str) -> &'a str {
    if override_value.is_empty() {
        selected
    } else {
        override_value
    }
}

/// Everything the detail card shows for one painting
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PaintingDetail {
    pub painting: Painting,
    /// Present when the location is one of the known museums
    pub coordinates: Option<Coordinates>,
}

/// A field whose value is not among the known reference values
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct UnmatchedReference {
    pub field: &'static str,
    pub value: String,
}

/// Ties the catalog and the option lists together
#[derive(Debug)]
pub struct Synchronizer {
    library: Library,
    options: OptionStore,
}

impl Synchronizer {
    pub fn new(library: Library, options: OptionStore) -> Self {
        Self { library, options }
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn options(&self) -> &OptionStore {
        &self.options
    }

    /// Current table contents, for the initial render
    pub fn list(&self) -> IntentOutcome {
        match self.library.list_all() {
            Ok(paintings) => IntentOutcome {
                paintings,
                status: Status::Success(String::new()),
            },
            Err(e) => self.failure("list", e),
        }
    }

    /// Thumbnails for the gallery grid, in catalog order
    pub fn gallery(&self) -> GalleryOutcome {
        match self.library.list_all() {
            Ok(paintings) => GalleryOutcome {
                tiles: paintings.iter().map(GalleryTile::from).collect(),
                status: Status::Success(String::new()),
            },
            Err(e) => GalleryOutcome {
                tiles: Vec::new(),
                status: status_for("gallery", &e),
            },
        }
    }

    /// Detail card for one painting. An unknown id is not an error:
    /// `detail` is `None` and the status is still a success.
    pub fn painting_detail(&self, id: i64) -> DetailOutcome {
        match self.library.get_by_id(id) {
            Ok(Some(painting)) => {
                let coordinates = locations::coordinates_for(&painting.details.location);
                DetailOutcome {
                    detail: Some(PaintingDetail {
                        painting,
                        coordinates,
                    }),
                    status: Status::Success(String::new()),
                }
            }
            Ok(None) => DetailOutcome {
                detail: None,
                status: Status::Success(format!("No painting with id {id}.")),
            },
            Err(e) => DetailOutcome {
                detail: None,
                status: status_for("detail", &e),
            },
        }
    }

    /// Add a painting from the editor form.
    ///
    /// New genre/movement/material values are recorded in the option lists
    /// first, and stay recorded even when the painting itself is refused
    /// for missing required fields.
    pub fn add_painting(&mut self, form: &AddPainting) -> IntentOutcome {
        match self.try_add_painting(form) {
            Ok(painting) => {
                info!(id = painting.id, title = %painting.details.title, "painting added");
                self.refreshed(Status::Success(format!("Added \"{}\".", painting.details.title)))
            }
            Err(e) => self.failure("add", e),
        }
    }

    fn try_add_painting(&mut self, form: &AddPainting) -> Result<Painting> {
        let genre = form.effective_genre();
        let movement = form.effective_movement();
        let materials = form.effective_materials();

        self.record_options(genre, movement, &materials)?;

        let missing = form.missing_fields();
        if !missing.is_empty() {
            return Err(GalleryError::Validation(missing));
        }

        let details = PaintingDetails {
            title: form.title.clone(),
            artist: form.artist.clone(),
            year: form.year.clone(),
            materials: materials.join(MATERIALS_SEPARATOR),
            movement: movement.to_string(),
            image_url: form.image_url.clone(),
            genre: genre.to_string(),
            country: form.country.clone(),
            location: form.location.clone(),
            description: form.description.clone(),
        };
        self.library.insert_one(&details)
    }

    /// Grow the option lists, writing the file once if anything was new
    fn record_options(&mut self, genre: &str, movement: &str, materials: &[String]) -> Result<()> {
        let mut changed = self.options.add_if_absent(Category::Genre, genre);
        changed |= self.options.add_if_absent(Category::Movement, movement);
        for material in materials {
            changed |= self.options.add_if_absent(Category::Material, material);
        }

        if changed {
            self.options.persist()?;
        }
        Ok(())
    }

    /// Save the edited table. Rows missing from `table` are deleted.
    pub fn save_edits(&mut self, table: Vec<Painting>) -> IntentOutcome {
        let rows: Vec<TableRow> = table.into_iter().map(TableRow::from).collect();
        match self.library.replace_all(&rows) {
            Ok(()) => {
                info!(rows = rows.len(), "edits saved");
                self.refreshed(Status::Success("Changes saved.".to_string()))
            }
            Err(e) => self.failure("save", e),
        }
    }

    /// Replace the catalog with the contents of an uploaded CSV file.
    /// A file that fails to parse leaves the catalog untouched.
    pub fn import_csv(&mut self, bytes: &[u8]) -> IntentOutcome {
        let result = csv_io::parse_csv(bytes).and_then(|rows| {
            self.library.replace_all(&rows)?;
            Ok(rows.len())
        });

        match result {
            Ok(count) => {
                info!(rows = count, "CSV imported");
                self.refreshed(Status::Success("File uploaded successfully.".to_string()))
            }
            Err(e) => self.failure("import", e),
        }
    }

    /// Serialize the table as currently shown. Does not touch the stores.
    pub fn export_csv(&self, table: &[Painting]) -> ExportOutcome {
        match csv_io::export_csv(table) {
            Ok(csv) => ExportOutcome {
                csv,
                status: Status::Success(format!("Exported {} paintings.", table.len())),
            },
            Err(e) => ExportOutcome {
                csv: Vec::new(),
                status: status_for("export", &e),
            },
        }
    }

    /// Fields of `painting` that don't match the option lists or known
    /// locations. Advisory only; stored values are never constrained.
    pub fn unmatched_references(&self, painting: &Painting) -> Vec<UnmatchedReference> {
        let details = &painting.details;
        let mut unmatched = Vec::new();
        let mut check = |field: &'static str, value: &str, known: bool| {
            if !value.is_empty() && !known {
                unmatched.push(UnmatchedReference {
                    field,
                    value: value.to_string(),
                });
            }
        };

        check(
            "genre",
            &details.genre,
            self.options.contains(Category::Genre, &details.genre),
        );
        check(
            "movement",
            &details.movement,
            self.options.contains(Category::Movement, &details.movement),
        );
        for material in details.material_list() {
            check(
                "materials",
                material,
                self.options.contains(Category::Material, material),
            );
        }
        check(
            "location",
            &details.location,
            locations::coordinates_for(&details.location).is_some(),
        );

        unmatched
    }

    fn refreshed(&self, status: Status) -> IntentOutcome {
        match self.library.list_all() {
            Ok(paintings) => IntentOutcome { paintings, status },
            Err(e) => self.failure("list", e),
        }
    }

    /// Turn an error into an outcome carrying whatever the catalog holds now
    fn failure(&self, intent: &str, error: GalleryError) -> IntentOutcome {
        let status = status_for(intent, &error);

        // If the catalog can't even be listed, show an empty table
        let paintings = self.library.list_all().unwrap_or_default();
        IntentOutcome { paintings, status }
    }
}

/// Log a failed intent and describe it for the user
fn status_for(intent: &str, error: &GalleryError) -> Status {
    warn!(intent = intent, error = %error, "intent did not complete");

    match error {
        GalleryError::Validation(_) => Status::Rejected(format!("Painting not added: {error}")),
        GalleryError::Parse(_) => Status::Rejected(format!("Error loading file: {error}")),
        _ => Status::Failed(format!("Operation failed: {error}")),
    }
}
