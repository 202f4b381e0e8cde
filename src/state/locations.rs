//! Map coordinates of known museums and collections.
//!
//! A painting's `location` is free text. When it matches one of these
//! names exactly, the detail view can show it on a map.

use serde::Serialize;

/// Latitude/longitude pair in decimal degrees
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Zoom level used when centering the map on a location
pub const MAP_ZOOM: u8 = 18;

const LOCATIONS: &[(&str, Coordinates)] = &[
    (
        "Государственная Третьяковская галерея, Москва",
        Coordinates { latitude: 55.741556, longitude: 37.620028 },
    ),
    (
        "Государственный Русский музей, Санкт-Петербург",
        Coordinates { latitude: 59.938782, longitude: 30.332383 },
    ),
    (
        "Гамбургский Кунстхалле, Гамбург",
        Coordinates { latitude: 53.561200, longitude: 9.995740 },
    ),
    (
        "Библиотека Маруселлиана, Флоренция",
        Coordinates { latitude: 43.767609, longitude: 11.262650 },
    ),
];

/// Coordinates for an exactly matching location name
pub fn coordinates_for(location: &str) -> Option<Coordinates> {
    LOCATIONS
        .iter()
        .find(|(name, _)| *name == location)
        .map(|(_, coords)| *coords)
}

/// All known location names
pub fn known_locations() -> impl Iterator<Item = &'static str> {
    LOCATIONS.iter().map(|(name, _)| *name)
}
