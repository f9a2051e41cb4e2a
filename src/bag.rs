use crate::object::ObjectId;
use macroquad::prelude::*;

/// What bag slot placement needs to know about the current map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BagLayout {
    /// Tile width in map pixels; slots are one tile apart.
    pub tile_w: f32,
    /// Gap between the label and the item row.
    pub line_spacing: f32,
    /// Map-to-display scale factor.
    pub scale: f32,
}

/// The player's inventory: collected pickups in pickup order.
#[derive(Debug, Clone, PartialEq)]
pub struct Bag {
    items: Vec<ObjectId>,
    /// Display-space top-left of the "Bag" label.
    anchor: Vec2,
}

impl Bag {
    /// An empty bag whose label sits at `anchor`.
    pub fn new(anchor: Vec2) -> Self {
        Self {
            items: Vec::new(),
            anchor,
        }
    }

    /// Collected items, oldest first.
    pub fn items(&self) -> &[ObjectId] {
        &self.items
    }

    /// Number of items held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True until the first pickup.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether `id` has been collected.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.items.contains(&id)
    }

    /// Display-space position of the label.
    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    /// Append `id` and return the map-space position its sprite moves to.
    /// Items already in the bag are not added twice.
    pub fn add(&mut self, id: ObjectId, layout: BagLayout) -> Option<Vec2> {
        if self.contains(id) {
            return None;
        }
        self.items.push(id);
        Some(self.slot_position(self.items.len() - 1, layout))
    }

    /// Map-space position of the `slot`-th item, one tile apart under the label.
    pub fn slot_position(&self, slot: usize, layout: BagLayout) -> Vec2 {
        let display = vec2(
            self.anchor.x + layout.tile_w * slot as f32,
            self.anchor.y + layout.line_spacing,
        );
        display / layout.scale
    }

    /// Drop every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
