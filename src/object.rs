use crate::error::MapError;
use crate::geom::intersects;
use crate::ir_map::IrObject;
use crate::layer::CollisionLayer;
use crate::tileset::{TileFrame, TilesetRegistry};
use macroquad::prelude::*;

/// Seconds each pickup animation frame stays on screen.
pub const PICKUP_FRAME_DURATION: f32 = 0.1;

/// Index of an object inside its map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub usize);

/// Kind-specific state of an interactive object.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    /// Blocks the player; the key opens it.
    Door {
        /// Set once by the key.
        unlocked: bool,
        /// Unlocking this door wins the level.
        level_complete: bool,
    },
    /// Goes into the bag on contact.
    Pickup {
        /// This pickup unlocks doors.
        level_key: bool,
        /// Time since the last animation step.
        elapsed: f32,
        /// Animation wraps back to column 0 here.
        frame_columns: u32,
    },
    /// Moved by the player, blocked by everything else.
    Pushable,
}

impl ObjectKind {
    /// A locked door.
    pub fn door(level_complete: bool) -> Self {
        ObjectKind::Door {
            unlocked: false,
            level_complete,
        }
    }

    /// A pickup at the first animation frame.
    pub fn pickup(level_key: bool, frame_columns: u32) -> Self {
        ObjectKind::Pickup {
            level_key,
            elapsed: 0.0,
            frame_columns,
        }
    }

    fn reset(&mut self) {
        match self {
            ObjectKind::Door { unlocked, .. } => *unlocked = false,
            ObjectKind::Pickup { elapsed, .. } => *elapsed = 0.0,
            ObjectKind::Pushable => {}
        }
    }
}

/// A door, pickup or pushable placed from an object layer.
///
/// Everything that can change during play is captured at construction so that
/// [`InteractiveObject::reset`] always lands on the same state.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractiveObject {
    /// Index into the map's tilesets.
    pub tileset: usize,
    /// Width in map pixels.
    pub width: f32,
    /// Height in map pixels.
    pub height: f32,
    position: Vec2,
    original_position: Vec2,
    frame: TileFrame,
    original_frame: TileFrame,
    kind: ObjectKind,
}

impl InteractiveObject {
    /// `bottom_y` is Tiled's object origin; the stored position is the top-left corner.
    pub fn new(
        kind: ObjectKind,
        tileset: usize,
        frame: TileFrame,
        x: f32,
        bottom_y: f32,
        width: f32,
        height: f32,
    ) -> Self {
        let position = vec2(x, bottom_y - height);
        Self {
            tileset,
            width,
            height,
            position,
            original_position: position,
            frame,
            original_frame: frame,
            kind,
        }
    }

    /// Build from a tile object. Objects without a gid are not tile objects and yield `None`.
    pub fn from_ir(
        obj: &IrObject,
        tilesets: &TilesetRegistry,
        layer: &str,
        make_kind: impl FnOnce(&IrObject, u32) -> Result<ObjectKind, MapError>,
    ) -> Result<Option<Self>, MapError> {
        let Some(gid) = obj.gid.filter(|g| *g != 0) else {
            return Ok(None);
        };
        let context = format!("{layer}/object {}", obj.id);
        let tile = tilesets.resolve(gid, &context)?;
        let columns = tilesets.get(tile.tileset).map_or(1, |ts| ts.columns);

        Ok(Some(Self::new(
            make_kind(obj, columns)?,
            tile.tileset,
            tile.frame,
            obj.x,
            obj.y,
            obj.width,
            obj.height,
        )))
    }

    /// Kind-specific state.
    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    /// Top-left corner in map pixels.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Position the object was loaded at.
    pub fn original_position(&self) -> Vec2 {
        self.original_position
    }

    /// Sprite frame currently shown.
    pub fn frame(&self) -> TileFrame {
        self.frame
    }

    /// Bounding box in map pixels.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }

    /// Whether this is a door.
    pub fn is_door(&self) -> bool {
        matches!(self.kind, ObjectKind::Door { .. })
    }

    /// Whether this is a pickup.
    pub fn is_pickup(&self) -> bool {
        matches!(self.kind, ObjectKind::Pickup { .. })
    }

    /// Whether this can be pushed.
    pub fn is_pushable(&self) -> bool {
        matches!(self.kind, ObjectKind::Pushable)
    }

    /// Whether this is an unlocked door.
    pub fn is_unlocked(&self) -> bool {
        matches!(self.kind, ObjectKind::Door { unlocked: true, .. })
    }

    /// Whether this is the exit door.
    pub fn is_level_complete_door(&self) -> bool {
        matches!(
            self.kind,
            ObjectKind::Door {
                level_complete: true,
                ..
            }
        )
    }

    /// Whether this is the key pickup.
    pub fn is_level_key(&self) -> bool {
        matches!(self.kind, ObjectKind::Pickup { level_key: true, .. })
    }

    /// Restore position, frame and kind state captured at construction.
    pub fn reset(&mut self) {
        self.position = self.original_position;
        self.frame = self.original_frame;
        self.kind.reset();
    }

    /// Unlock a locked door: the sprite moves one column right. Returns whether
    /// anything changed; unlocked doors and non-doors are left alone.
    pub fn unlock(&mut self) -> bool {
        match &mut self.kind {
            ObjectKind::Door { unlocked, .. } if !*unlocked => {
                *unlocked = true;
                self.frame.column += 1;
                true
            }
            _ => false,
        }
    }

    /// Move a pickup to its bag slot.
    pub fn pick_up(&mut self, bag_position: Vec2) {
        if self.is_pickup() {
            self.position = bag_position;
        }
    }

    /// Advance the pickup sprite animation by `dt` seconds.
    pub fn animate(&mut self, dt: f32) {
        let ObjectKind::Pickup {
            elapsed,
            frame_columns,
            ..
        } = &mut self.kind
        else {
            return;
        };

        *elapsed += dt;
        if *elapsed > PICKUP_FRAME_DURATION {
            *elapsed = 0.0;
            self.frame.column += 1;
            if self.frame.column >= *frame_columns {
                self.frame.column = 0;
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }
}

/// Try to move pushable `id` by `delta`. The move is all-or-nothing: if the
/// destination overlaps collision geometry or any other object the object
/// stays put and `true` (hit) is returned. Ids that are out of range or not
/// pushable never move and also report a hit.
pub fn push(
    objects: &mut [InteractiveObject],
    id: ObjectId,
    collision: &[CollisionLayer],
    delta: Vec2,
) -> bool {
    let Some(b) = objects
        .get(id.0)
        .filter(|o| o.is_pushable())
        .map(InteractiveObject::bounds)
    else {
        return true;
    };
    let moved = Rect::new(b.x + delta.x, b.y + delta.y, b.w, b.h);

    let hit_wall = collision
        .iter()
        .flat_map(|l| l.rects())
        .any(|r| intersects(r, &moved));
    let hit_object = objects
        .iter()
        .enumerate()
        .any(|(i, o)| i != id.0 && intersects(&o.bounds(), &moved));

    if hit_wall || hit_object {
        return true;
    }

    objects[id.0].position += delta;
    false
}
