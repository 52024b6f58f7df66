//! Filesystem-backed map source.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;

use super::{validate_level_name, MapData, MapError, MapSource};

/// Reads maps from `<root>/<name>.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryMapSource {
    root: PathBuf,
}

impl DirectoryMapSource {
    /// Creates a source rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory maps are read from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File a level name resolves to.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use tilehop::map::DirectoryMapSource;
    ///
    /// let source = DirectoryMapSource::new("assets/maps");
    /// assert_eq!(source.path_for("cave"), Path::new("assets/maps/cave.json"));
    /// ```
    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }
}

impl Default for DirectoryMapSource {
    fn default() -> Self {
        Self::new("assets/maps")
    }
}

impl MapSource for DirectoryMapSource {
    fn load_map(&self, name: &str) -> Result<MapData, MapError> {
        validate_level_name(name)?;
        let path = self.path_for(name);
        debug!("reading map `{name}` from {}", path.display());
        let text = fs::read_to_string(&path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                MapError::NotFound {
                    name: name.to_owned(),
                    path: path.clone(),
                }
            } else {
                MapError::Io {
                    name: name.to_owned(),
                    path: path.clone(),
                    source,
                }
            }
        })?;
        MapData::from_json(name, &text)
    }
}
