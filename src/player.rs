use crate::bag::{Bag, BagLayout};
use crate::config::PlayerSettings;
use crate::geom::{axis_delta, intersects, Direction};
use crate::layer::CollisionLayer;
use crate::object::{push, InteractiveObject, ObjectId};
use macroquad::prelude::*;

/// Movement keys held this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveInput {
    /// D or Right arrow.
    pub right: bool,
    /// A or Left arrow.
    pub left: bool,
    /// W or Up arrow.
    pub up: bool,
    /// S or Down arrow.
    pub down: bool,
}

impl MoveInput {
    /// Snapshot of WASD (arrow keys work too).
    pub fn from_keyboard() -> Self {
        Self {
            right: is_key_down(KeyCode::D) || is_key_down(KeyCode::Right),
            left: is_key_down(KeyCode::A) || is_key_down(KeyCode::Left),
            up: is_key_down(KeyCode::W) || is_key_down(KeyCode::Up),
            down: is_key_down(KeyCode::S) || is_key_down(KeyCode::Down),
        }
    }

    /// Whether `dir` is held.
    pub fn is_held(&self, dir: Direction) -> bool {
        match dir {
            Direction::Right => self.right,
            Direction::Left => self.left,
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }
}

/// Everything the player collides or interacts with during one step.
pub struct PlayField<'a> {
    /// Solid layers.
    pub collision: &'a [CollisionLayer],
    /// Doors, pickups and pushables of the level.
    pub objects: &'a mut [InteractiveObject],
    /// Where pickups go.
    pub bag: &'a mut Bag,
    /// The key pickup, if the level has one.
    pub level_key: Option<ObjectId>,
    /// Slot placement for new pickups.
    pub bag_layout: BagLayout,
}

/// What touching doors this step means.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoorContact {
    /// The box overlaps at least one door.
    pub touching: bool,
    /// Doors to unlock. Touching a locked door while holding the level key
    /// unlocks every door on the map.
    pub unlock: Vec<ObjectId>,
}

/// Work out door contact for `bounds` without changing anything.
pub fn resolve_door_interaction(
    bounds: &Rect,
    objects: &[InteractiveObject],
    bag: &Bag,
    level_key: Option<ObjectId>,
) -> DoorContact {
    let mut contact = DoorContact::default();
    let has_key = level_key.is_some_and(|key| bag.contains(key));

    for door in objects.iter().filter(|o| o.is_door()) {
        if !intersects(&door.bounds(), bounds) {
            continue;
        }
        contact.touching = true;
        if !door.is_unlocked() && has_key {
            contact.unlock = objects
                .iter()
                .enumerate()
                .filter(|(_, o)| o.is_door())
                .map(|(i, _)| ObjectId(i))
                .collect();
            break;
        }
    }

    contact
}

/// Side effects of one player step, in the order they happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Doors unlocked this step.
    pub unlocked: Vec<ObjectId>,
    /// Objects pushed this step.
    pub pushed: Vec<ObjectId>,
    /// Pickups collected this step.
    pub picked_up: Vec<ObjectId>,
}

/// The knight.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerObject {
    position: Vec2,
    original_position: Vec2,
    size: Vec2,
    move_speed: f32,
}

impl PlayerObject {
    /// `tile_size` times the configured box scale gives the bounding box, a bit
    /// smaller than a tile so single-tile gaps can be walked through.
    pub fn new(position: Vec2, tile_size: Vec2, settings: PlayerSettings) -> Self {
        Self {
            position,
            original_position: position,
            size: tile_size * settings.box_scale,
            move_speed: settings.move_speed,
        }
    }

    /// Top-left corner in map pixels.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Bounding box size.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Map pixels moved per frame on each held axis.
    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    /// Bounding box in map pixels.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.size.x, self.size.y)
    }

    /// Back to the start position.
    pub fn reset(&mut self) {
        self.position = self.original_position;
    }

    /// Move once per held direction, one axis at a time, then collect pickups.
    pub fn step(&mut self, input: MoveInput, field: &mut PlayField<'_>) -> StepReport {
        let mut report = StepReport::default();

        for dir in Direction::ALL {
            if input.is_held(dir) {
                self.move_axis(dir, field, &mut report);
            }
        }

        self.collect_pickups(field, &mut report);
        report
    }

    fn move_axis(&mut self, dir: Direction, field: &mut PlayField<'_>, report: &mut StepReport) {
        let init = self.position;
        let delta = axis_delta(dir, self.move_speed);
        self.position += delta;

        if self.is_colliding(field, report) {
            self.restore_axis(dir, init);
        }

        let bounds = self.bounds();
        let pushed = field
            .objects
            .iter()
            .position(|o| o.is_pushable() && intersects(&o.bounds(), &bounds));
        if let Some(i) = pushed {
            let id = ObjectId(i);
            if push(field.objects, id, field.collision, delta) {
                self.restore_axis(dir, init);
            } else {
                report.pushed.push(id);
            }
        }
    }

    fn restore_axis(&mut self, dir: Direction, init: Vec2) {
        if dir.is_horizontal() {
            self.position.x = init.x;
        } else {
            self.position.y = init.y;
        }
    }

    fn is_colliding(&self, field: &mut PlayField<'_>, report: &mut StepReport) -> bool {
        let bounds = self.bounds();

        let hit_wall = field
            .collision
            .iter()
            .flat_map(|l| l.rects())
            .any(|r| intersects(r, &bounds));
        if hit_wall {
            return true;
        }

        let contact = resolve_door_interaction(&bounds, field.objects, field.bag, field.level_key);
        for id in contact.unlock {
            if field.objects[id.0].unlock() {
                report.unlocked.push(id);
            }
        }
        contact.touching
    }

    fn collect_pickups(&self, field: &mut PlayField<'_>, report: &mut StepReport) {
        let bounds = self.bounds();
        let layout = field.bag_layout;

        for i in 0..field.objects.len() {
            let id = ObjectId(i);
            let item = &field.objects[i];
            if !item.is_pickup() || field.bag.contains(id) || !intersects(&item.bounds(), &bounds) {
                continue;
            }
            if let Some(slot) = field.bag.add(id, layout) {
                field.objects[i].pick_up(slot);
                report.picked_up.push(id);
            }
        }
    }
}
