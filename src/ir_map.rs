// src/ir_map.rs
use macroquad::prelude::*;

/// Canonical, format-agnostic map.
#[derive(Debug, Clone)]
pub struct IrMap {
    /// Width in tiles.
    pub width: usize,
    /// Height in tiles.
    pub height: usize,
    /// Tile width in pixels.
    pub tile_w: u32,
    /// Tile height in pixels.
    pub tile_h: u32,
    /// Map custom properties.
    pub properties: Properties,
    /// Sorted by `first_gid`.
    pub tilesets: Vec<IrTileset>,
    /// In draw order.
    pub layers: Vec<IrLayer>,
}

/// A tileset referenced by the map.
#[derive(Debug, Clone)]
pub enum IrTileset {
    /// One image atlas with a regular grid.
    Atlas {
        /// First gid owned by the tileset.
        first_gid: u32,
        /// Image path relative to the map file.
        image: String,
        /// Tile width in pixels.
        tile_w: u32,
        /// Tile height in pixels.
        tile_h: u32,
        /// Number of tiles in the image.
        tilecount: u32,
        /// Tiles per image row.
        columns: u32,
        /// Pixels between tiles.
        spacing: u32,
        /// Pixels around the image edge.
        margin: u32,
    },
}

impl IrTileset {
    /// First gid owned by the tileset.
    pub fn first_gid(&self) -> u32 {
        match self {
            IrTileset::Atlas { first_gid, .. } => *first_gid,
        }
    }
}

/// Content of one layer.
#[derive(Debug, Clone)]
pub enum IrLayerKind {
    /// Grid of gids.
    Tiles {
        /// Width in cells.
        width: usize,
        /// Height in cells.
        height: usize,
        /// Raw gids, flip flags included.
        data: Vec<u32>,
    },
    /// Placed objects.
    Objects {
        /// Objects in document order.
        objects: Vec<IrObject>,
    },
    /// Tiled group layer; children keep their own draw order.
    Group {
        /// Child layers.
        layers: Vec<IrLayer>,
    },
    /// Image layers and anything newer.
    Unsupported,
}

/// One layer of the map.
#[derive(Debug, Clone)]
pub struct IrLayer {
    /// Tiled layer name.
    pub name: String,
    /// Hidden layers are loaded but not drawn.
    pub visible: bool,
    /// Layer alpha.
    pub opacity: f32,
    /// Pixel offset set in Tiled.
    pub offset: Vec2,
    /// What the layer holds.
    pub kind: IrLayerKind,
}

impl IrLayer {
    /// Children of a group layer, empty for every other kind.
    pub fn children(&self) -> &[IrLayer] {
        match &self.kind {
            IrLayerKind::Group { layers } => layers,
            _ => &[],
        }
    }

    /// Objects of an object layer, empty for every other kind.
    pub fn objects(&self) -> &[IrObject] {
        match &self.kind {
            IrLayerKind::Objects { objects } => objects,
            _ => &[],
        }
    }
}

/// A placed object. For tile objects `y` is the bottom edge, as Tiled stores it.
#[derive(Debug, Clone)]
pub struct IrObject {
    /// Tiled object id.
    pub id: u32,
    /// Left edge in map pixels.
    pub x: f32,
    /// Bottom edge for tile objects, top for everything else.
    pub y: f32,
    /// Width in map pixels.
    pub width: f32,
    /// Height in map pixels.
    pub height: f32,
    /// Tile gid with flip flags cleared; `None` for shapes.
    pub gid: Option<u32>,
    /// Object custom properties.
    pub properties: Properties,
}

/// A typed custom property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// `bool` property.
    Bool(bool),
    /// `int` or `object` property.
    I64(i64),
    /// `float` property.
    F32(f32),
    /// `string`, `file` or `color` property.
    String(String),
}

impl PropertyValue {
    /// Numeric view of the value; strings are parsed.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            PropertyValue::F32(v) => Some(*v),
            PropertyValue::I64(v) => Some(*v as f32),
            PropertyValue::String(s) => s.trim().parse().ok(),
            PropertyValue::Bool(_) => None,
        }
    }

    /// Boolean view of the value; "true"/"false" strings are accepted.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(v) => Some(*v),
            PropertyValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Named custom properties, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    entries: Vec<(String, PropertyValue)>,
}

impl Properties {
    /// No properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Later values replace earlier ones with the same name but keep their slot.
    pub fn insert(&mut self, name: String, value: PropertyValue) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Value of `name`, if present.
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// The first property in document order.
    pub fn first(&self) -> Option<(&str, &PropertyValue)> {
        self.entries.first().map(|(n, v)| (n.as_str(), v))
    }

    /// `name` as a bool.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(PropertyValue::as_bool)
    }

    /// `name` as a number.
    pub fn get_f32(&self, name: &str) -> Option<f32> {
        self.get(name).and_then(PropertyValue::as_f32)
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are none.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
