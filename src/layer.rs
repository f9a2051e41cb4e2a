use crate::error::MapError;
use crate::ir_map::{IrLayer, IrLayerKind, IrMap};
use crate::tileset::{TileRef, TilesetRegistry};
use macroquad::prelude::*;

/// Group layer names a level map is organised into.
pub mod groups {
    /// Decorative tiles, drawn first.
    pub const FLOOR: &str = "floorLayers";
    /// Every non-empty cell is solid.
    pub const COLLISION: &str = "collisionLayers";
    /// Tile objects the player can push.
    pub const PUSHABLE: &str = "pushObjectLayers";
    /// Tile objects that go into the bag.
    pub const PICKUP: &str = "pickupObjectLayers";
    /// Tile objects that block until unlocked.
    pub const DOOR: &str = "doorLayers";
}

/// Child layers of every top-level group with the given name.
pub fn group_layers<'a>(ir: &'a IrMap, group: &'a str) -> impl Iterator<Item = &'a IrLayer> + 'a {
    ir.layers
        .iter()
        .filter(move |l| l.name == group)
        .flat_map(|l| l.children())
}

/// Whether the map has a top-level group layer called `group`.
pub fn has_group(ir: &IrMap, group: &str) -> bool {
    ir.layers
        .iter()
        .any(|l| l.name == group && matches!(l.kind, IrLayerKind::Group { .. }))
}

/// A visual tile layer. Cells keep their raw gid next to the resolved frame.
#[derive(Debug, Clone)]
pub struct FloorLayer {
    /// Tiled layer name.
    pub name: String,
    /// Width in cells.
    pub width: usize,
    /// Height in cells.
    pub height: usize,
    /// Pixel offset set in Tiled.
    pub offset: Vec2,
    /// Raw gids, flip flags included.
    pub data: Vec<u32>,
    /// Hidden layers still load (and still collide) but are not drawn.
    pub visible: bool,
    /// Layer alpha, 0.0 to 1.0.
    pub opacity: f32,
    tiles: Vec<Option<TileRef>>,
}

impl FloorLayer {
    /// Build from a tile layer; other layer kinds give `None`.
    pub fn from_ir(layer: &IrLayer, tilesets: &TilesetRegistry) -> Result<Option<Self>, MapError> {
        let IrLayerKind::Tiles { width, height, data } = &layer.kind else {
            return Ok(None);
        };

        let tiles = data
            .iter()
            .map(|&gid| match gid {
                0 => Ok(None),
                gid => tilesets.resolve(gid, &layer.name).map(Some),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(Self {
            name: layer.name.clone(),
            width: *width,
            height: *height,
            offset: layer.offset,
            data: data.clone(),
            visible: layer.visible,
            opacity: layer.opacity.clamp(0.0, 1.0),
            tiles,
        }))
    }

    /// Colour to draw the layer's tiles with, or `None` when it is hidden.
    pub fn tint(&self) -> Option<Color> {
        self.visible.then(|| Color::new(1.0, 1.0, 1.0, self.opacity))
    }

    /// Non-empty cells as `(column, row, tile)`.
    pub fn tiles(&self) -> impl Iterator<Item = (usize, usize, &TileRef)> + '_ {
        let width = self.width.max(1);
        self.tiles
            .iter()
            .enumerate()
            .filter_map(move |(i, t)| t.as_ref().map(|t| (i % width, i / width, t)))
    }
}

/// Solid geometry: one rectangle per non-empty cell, built once.
#[derive(Debug, Clone)]
pub struct CollisionLayer {
    /// Tiled layer name.
    pub name: String,
    /// The tiles, for drawing.
    pub floor: FloorLayer,
    rects: Vec<Rect>,
}

impl CollisionLayer {
    /// Build from a tile layer; other layer kinds give `None`.
    pub fn from_ir(
        layer: &IrLayer,
        tilesets: &TilesetRegistry,
        tile_w: u32,
        tile_h: u32,
    ) -> Result<Option<Self>, MapError> {
        let Some(floor) = FloorLayer::from_ir(layer, tilesets)? else {
            return Ok(None);
        };
        let rects = collision_rects(&floor.data, floor.width, tile_w, tile_h);
        Ok(Some(Self {
            name: layer.name.clone(),
            floor,
            rects,
        }))
    }

    /// One rectangle per solid cell, in map pixels.
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    #[cfg(test)]
    pub(crate) fn test_layer(rects: Vec<Rect>) -> Self {
        Self {
            name: "test".into(),
            floor: FloorLayer {
                name: "test".into(),
                width: 0,
                height: 0,
                offset: Vec2::ZERO,
                data: Vec::new(),
                visible: true,
                opacity: 1.0,
                tiles: Vec::new(),
            },
            rects,
        }
    }
}

/// Rectangles for every non-zero cell of a row-major grid `columns` wide.
pub fn collision_rects(data: &[u32], columns: usize, tile_w: u32, tile_h: u32) -> Vec<Rect> {
    let columns = columns.max(1);
    data.iter()
        .enumerate()
        .filter(|(_, gid)| **gid != 0)
        .map(|(i, _)| {
            let col = i % columns;
            let row = i / columns;
            Rect::new(
                (col as u32 * tile_w) as f32,
                (row as u32 * tile_h) as f32,
                tile_w as f32,
                tile_h as f32,
            )
        })
        .collect()
}
