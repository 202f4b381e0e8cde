//! Shared data structures for the gallery
//!
//! These structs represent the data model that flows between
//! the database layer, the CSV codec and the presentation layer.

use serde::{Deserialize, Serialize};

/// Column names of the painting table, in schema order.
/// CSV export writes exactly this header.
pub const FIELD_NAMES: [&str; 11] = [
    "id",
    "title",
    "artist",
    "year",
    "materials",
    "movement",
    "image_url",
    "genre",
    "country",
    "location",
    "description",
];

/// Separator used when a list of materials is stored as one string
pub const MATERIALS_SEPARATOR: &str = ", ";

/// Everything about a painting except its id
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PaintingDetails {
    pub title: String,
    pub artist: String,
    pub year: String,
    /// Materials joined with ", " (e.g. "холст, масло")
    pub materials: String,
    pub movement: String,
    pub image_url: String,
    pub genre: String,
    pub country: String,
    /// Free text; may or may not match a known location
    pub location: String,
    pub description: String,
}

impl PaintingDetails {
    /// Field values in schema order (without the id)
    pub fn values(&self) -> [&str; 10] {
        [
            self.title.as_str(),
            self.artist.as_str(),
            self.year.as_str(),
            self.materials.as_str(),
            self.movement.as_str(),
            self.image_url.as_str(),
            self.genre.as_str(),
            self.country.as_str(),
            self.location.as_str(),
            self.description.as_str(),
        ]
    }

    /// Set a field by its column name. Returns false for unknown names.
    pub fn set_field(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "title" => &mut self.title,
            "artist" => &mut self.artist,
            "year" => &mut self.year,
            "materials" => &mut self.materials,
            "movement" => &mut self.movement,
            "image_url" => &mut self.image_url,
            "genre" => &mut self.genre,
            "country" => &mut self.country,
            "location" => &mut self.location,
            "description" => &mut self.description,
            _ => return false,
        };
        *slot = value;
        true
    }

    /// Split the joined materials string back into individual materials
    pub fn material_list(&self) -> Vec<&str> {
        self.materials
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .collect()
    }
}

/// A single painting stored in the catalog
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Painting {
    /// Unique database ID, assigned by the store and never changed
    pub id: i64,
    #[serde(flatten)]
    pub details: PaintingDetails,
}

/// One row handed to `Library::replace_all`.
/// Rows without an id get one assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    pub id: Option<i64>,
    pub details: PaintingDetails,
}

impl From<Painting> for TableRow {
    fn from(painting: Painting) -> Self {
        Self {
            id: Some(painting.id),
            details: painting.details,
        }
    }
}

/// A thumbnail in the gallery grid
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GalleryTile {
    pub id: i64,
    pub image_url: String,
}

impl From<&Painting> for GalleryTile {
    fn from(painting: &Painting) -> Self {
        Self {
            id: painting.id,
            image_url: painting.details.image_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_painting_json_is_flat() {
        let painting = Painting {
            id: 7,
            details: PaintingDetails {
                title: "Ночь".to_string(),
                materials: "холст, масло".to_string(),
                ..Default::default()
            },
        };

        let json = serde_json::to_value(&painting).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["title"], "Ночь");
        assert_eq!(json["materials"], "холст, масло");
    }

    #[test]
    fn test_set_field_rejects_unknown_column() {
        let mut details = PaintingDetails::default();
        assert!(details.set_field("artist", "Куинджи".to_string()));
        assert!(!details.set_field("price", "100".to_string()));
        assert_eq!(details.artist, "Куинджи");
    }

    #[test]
    fn test_material_list_splits_joined_string() {
        let details = PaintingDetails {
            materials: "холст, масло,  темпера".to_string(),
            ..Default::default()
        };
        assert_eq!(details.material_list(), vec!["холст", "масло", "темпера"]);
    }
}
