use std::io;
use std::path::PathBuf;

/// Error type for level loading and level progression.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// File I/O error
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
    /// JSON parse error
    #[error("JSON parse error in {}: {source}", path.display())]
    Json {
        /// File that failed to parse
        path: PathBuf,
        /// Underlying error
        source: serde_json::Error,
    },
    /// Structural problem with the map document
    #[error("Invalid map: {0}")]
    InvalidMap(String),
    /// A gid that no loaded tileset owns
    #[error("gid {gid} in {context} is not owned by any tileset")]
    UnknownGid {
        /// The cleaned gid
        gid: u32,
        /// Layer or object the gid was read from
        context: String,
    },
    /// The map has none of the named layer groups a level needs
    #[error("Map has no '{0}' layer group")]
    MissingLayerGroup(&'static str),
    /// More than one object carries a flag that must be unique
    #[error("{count} objects are flagged '{flag}', expected at most one")]
    DuplicateFlag {
        /// Property name
        flag: &'static str,
        /// How many objects carried it
        count: usize,
    },
    /// No level timer property on the map
    #[error("Map has no level timer property")]
    MissingTimer,
    /// The level timer property is not a usable number
    #[error("Level timer property is not a non-negative number: {0}")]
    InvalidTimer(String),
    /// A custom property type we do not understand
    #[error("Unsupported type '{kind}' for property '{name}'")]
    UnsupportedPropertyType {
        /// Property name
        name: String,
        /// The declared type
        kind: String,
    },
    /// A level index past the end of the catalog
    #[error("Level {index} requested but only {count} levels are loaded")]
    LevelOutOfRange {
        /// Requested level (1-based)
        index: u32,
        /// Number of levels available
        count: u32,
    },
    /// A gap in the numbered level files
    #[error("Level file {0}.json is missing from the level sequence")]
    MissingLevel(u32),
}
