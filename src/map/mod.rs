//! Authored level data and where it comes from.
//!
//! Levels are stored as small Tiled-style JSON documents: grid layers of
//! tile identifiers, a per-identifier property table and a list of free
//! objects. This module owns three things:
//!
//! - the serde model ([`MapData`]) mirroring that document;
//! - the [`MapSource`] seam that yields a [`MapData`] by level name, with
//!   [`DirectoryMapSource`] reading `<root>/<name>.json`;
//! - [`build_level`], which turns authored data into a playable
//!   [`Level`](crate::level::Level) at the current scale.
//!
//! Malformed individual entries are skipped with a debug log. A map that
//! cannot be found or parsed at all is a [`MapError`].

mod source;
mod translate;

pub use source::DirectoryMapSource;
pub use translate::build_level;

use std::io;
use std::path::PathBuf;

use hashbrown::HashMap;
use rand::rngs::StdRng;
use serde::Deserialize;
use thiserror::Error;

use crate::config::PhysicsTuning;
use crate::level::Level;

/// Level loaded when none is named on the command line.
pub const DEFAULT_LEVEL: &str = "start";

/// Errors raised while locating or decoding a map.
#[derive(Debug, Error)]
pub enum MapError {
    /// The level name is empty or tries to leave the map directory.
    #[error("invalid level name `{name}`")]
    InvalidName {
        /// Requested level name.
        name: String,
    },
    /// No map with that name exists.
    #[error("map `{name}` not found at {}", path.display())]
    NotFound {
        /// Requested level name.
        name: String,
        /// Location that was probed.
        path: PathBuf,
    },
    /// The map exists but could not be read.
    #[error("failed to read map `{name}` from {}", path.display())]
    Io {
        /// Requested level name.
        name: String,
        /// Location that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The map was read but is not a valid document.
    #[error("failed to parse map `{name}`")]
    Parse {
        /// Requested level name.
        name: String,
        /// Underlying decode failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Checks that `name` is a plain level name that stays inside a map root.
///
/// # Errors
///
/// Returns [`MapError::InvalidName`] for empty names, absolute paths and
/// names containing `..` or path separators.
///
/// # Examples
///
/// ```
/// use tilehop::map::validate_level_name;
///
/// assert!(validate_level_name("cave-2").is_ok());
/// assert!(validate_level_name("../secrets").is_err());
/// ```
pub fn validate_level_name(name: &str) -> Result<(), MapError> {
    let invalid = name.is_empty()
        || name.contains("..")
        || name.contains('/')
        || name.contains('\\');
    if invalid {
        return Err(MapError::InvalidName {
            name: name.to_owned(),
        });
    }
    Ok(())
}

/// Yields authored map data by level name.
pub trait MapSource: Send + Sync {
    /// Loads the map called `name`.
    ///
    /// # Errors
    ///
    /// Returns a [`MapError`] when the map is missing, unreadable or
    /// malformed.
    fn load_map(&self, name: &str) -> Result<MapData, MapError>;
}

/// Loads `name` from `source` and builds it at the given scale.
///
/// # Errors
///
/// Propagates any [`MapError`] from the source.
pub fn load_level(
    source: &dyn MapSource,
    name: &str,
    tuning: &PhysicsTuning,
    rng: &mut StdRng,
) -> Result<Level, MapError> {
    validate_level_name(name)?;
    let data = source.load_map(name)?;
    Ok(build_level(name, &data, tuning, rng))
}

const fn default_tile_edge() -> u32 {
    16
}

const fn default_visible() -> bool {
    true
}

/// A whole authored level document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MapData {
    /// Width of one source tile in map pixels.
    #[serde(default = "default_tile_edge")]
    pub tile_width: u32,
    /// Height of one source tile in map pixels.
    #[serde(default = "default_tile_edge")]
    pub tile_height: u32,
    /// Grid layers, drawn and built in order.
    #[serde(default)]
    pub layers: Vec<LayerData>,
    /// Properties keyed by tile identifier.
    #[serde(default)]
    pub tiles: HashMap<u32, TileProperties>,
    /// Free-standing objects placed in map pixels.
    #[serde(default)]
    pub objects: Vec<ObjectData>,
}

impl MapData {
    /// Decodes a map document.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Parse`] when `text` is not a valid document.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilehop::map::MapData;
    ///
    /// let map = MapData::from_json("demo", r#"{ "layers": [] }"#)?;
    /// assert_eq!(map.tile_width, 16);
    /// # Ok::<(), tilehop::map::MapError>(())
    /// ```
    pub fn from_json(name: &str, text: &str) -> Result<Self, MapError> {
        serde_json::from_str(text).map_err(|source| MapError::Parse {
            name: name.to_owned(),
            source,
        })
    }
}

/// One grid layer stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LayerData {
    /// Layer name; its prefix decides what the layer's tiles are.
    pub name: String,
    /// Hidden layers are ignored.
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Number of columns.
    pub width: usize,
    /// Tile identifiers; `0` is an empty cell.
    #[serde(default)]
    pub data: Vec<u32>,
}

/// Properties attached to one tile identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TileProperties {
    /// Overrides the layer role: `solid`, `hazard`, `item`, `gem`, `coin`,
    /// `chest`, `teleport` or `decor`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Pixel mask rows at source resolution; `#` marks an opaque pixel.
    #[serde(default)]
    pub mask: Option<Vec<String>>,
    /// Level a teleport leads to.
    #[serde(default)]
    pub destination: Option<String>,
}

/// A free-standing map object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObjectData {
    /// Object role, such as `spawn` or `teleport`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Object name; for teleports, the destination level.
    #[serde(default)]
    pub name: String,
    /// Left edge in map pixels.
    pub x: f32,
    /// Top edge in map pixels.
    pub y: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn decodes_a_full_document() {
        let json = r##"{
            "tile_width": 8,
            "tile_height": 8,
            "layers": [{ "name": "solid", "width": 2, "data": [1, 0] }],
            "tiles": { "1": { "type": "hazard", "mask": ["#."] } },
            "objects": [{ "type": "spawn", "x": 4, "y": 2 }]
        }"##;
        let map = MapData::from_json("doc", json).expect("document should decode");
        assert_eq!(map.tile_width, 8);
        assert!(map.layers.first().is_some_and(|layer| layer.visible));
        assert_eq!(
            map.tiles.get(&1).and_then(|props| props.kind.as_deref()),
            Some("hazard")
        );
        assert_eq!(map.objects.first().map(|object| object.name.as_str()), Some(""));
    }

    #[test]
    fn parse_errors_name_the_map() {
        let err = MapData::from_json("broken", "{ not json").expect_err("should fail");
        assert!(matches!(err, MapError::Parse { ref name, .. } if name == "broken"));
        assert_eq!(err.to_string(), "failed to parse map `broken`");
    }

    #[rstest]
    #[case::empty("")]
    #[case::parent("../up")]
    #[case::nested("a/b")]
    #[case::windows("a\\b")]
    fn rejects_names_leaving_the_root(#[case] name: &str) {
        assert!(matches!(
            validate_level_name(name),
            Err(MapError::InvalidName { .. })
        ));
    }
}
