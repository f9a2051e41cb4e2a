use crate::bag::{Bag, BagLayout};
use crate::config::{DisplayContext, PlayerSettings};
use crate::error::MapError;
use crate::ir_map::{IrLayerKind, IrMap, IrObject};
use crate::layer::{group_layers, groups, has_group, CollisionLayer, FloorLayer};
use crate::loader::json_loader::decode_map_file_to_ir;
use crate::object::{InteractiveObject, ObjectId, ObjectKind};
use crate::player::{MoveInput, PlayField, PlayerObject, StepReport};
use crate::tileset::TilesetRegistry;
use crate::timer::CountDownTimer;
use log::{debug, info, warn};
use macroquad::prelude::*;
use std::path::{Path, PathBuf};

/// Map property holding the level's time limit in seconds.
pub const TIMER_PROPERTY: &str = "timerStartTime";
/// Pickup property marking the key that opens doors.
pub const LEVEL_KEY_PROPERTY: &str = "isLevelKey";
/// Door property marking the exit.
pub const LEVEL_COMPLETE_DOOR_PROPERTY: &str = "isLevelCompleteDoor";

/// Whether a level is still being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelStatus {
    /// Still playing.
    #[default]
    Running,
    /// The level-complete door was unlocked.
    Won,
    /// The clock ran out.
    Lost,
}

/// Current status plus the last status a consumer has seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusTracker {
    /// Status right now.
    pub current: LevelStatus,
    /// Status as last reported by `take_transition`.
    pub previous: LevelStatus,
}

impl StatusTracker {
    /// Report a Running -> Won/Lost change once, then catch `previous` up.
    pub fn take_transition(&mut self) -> Option<LevelStatus> {
        if self.current == self.previous {
            return None;
        }
        self.previous = self.current;
        Some(self.current)
    }
}

/// One playable level: layers, objects, the player, the bag and the clock.
#[derive(Debug, Clone)]
pub struct Map {
    /// Width in tiles.
    pub width: usize,
    /// Height in tiles.
    pub height: usize,
    /// Tile width in pixels.
    pub tile_w: u32,
    /// Tile height in pixels.
    pub tile_h: u32,
    base_dir: PathBuf,
    tilesets: TilesetRegistry,
    floor_layers: Vec<FloorLayer>,
    collision_layers: Vec<CollisionLayer>,
    objects: Vec<InteractiveObject>,
    level_key: Option<ObjectId>,
    level_complete_door: Option<ObjectId>,
    player: PlayerObject,
    bag: Bag,
    timer: CountDownTimer,
    status: StatusTracker,
    scale: f32,
    display: DisplayContext,
}

impl Map {
    /// Load a level from a Tiled JSON file.
    pub fn load(
        path: &Path,
        display: DisplayContext,
        settings: PlayerSettings,
    ) -> Result<Self, MapError> {
        let (ir, base) = decode_map_file_to_ir(path)?;
        let map = Self::from_ir(&ir, base, display, settings)?;
        info!(
            "loaded level {} ({}x{} tiles, {} objects, {:.1}s)",
            path.display(),
            map.width,
            map.height,
            map.objects.len(),
            map.timer.start()
        );
        Ok(map)
    }

    /// Build a level from decoded map data. `base_dir` is where tileset images live.
    pub fn from_ir(
        ir: &IrMap,
        base_dir: PathBuf,
        display: DisplayContext,
        settings: PlayerSettings,
    ) -> Result<Self, MapError> {
        if !has_group(ir, groups::COLLISION) {
            return Err(MapError::MissingLayerGroup(groups::COLLISION));
        }

        let tilesets = TilesetRegistry::from_ir(&ir.tilesets)?;

        let mut floor_layers = Vec::new();
        for layer in group_layers(ir, groups::FLOOR) {
            floor_layers.extend(FloorLayer::from_ir(layer, &tilesets)?);
        }

        let mut collision_layers = Vec::new();
        for layer in group_layers(ir, groups::COLLISION) {
            collision_layers.extend(CollisionLayer::from_ir(
                layer,
                &tilesets,
                ir.tile_w,
                ir.tile_h,
            )?);
        }

        let mut objects = Vec::new();
        build_objects(ir, &tilesets, groups::PICKUP, &mut objects, |obj, columns| {
            Ok(ObjectKind::pickup(flag(obj, LEVEL_KEY_PROPERTY)?, columns))
        })?;
        build_objects(ir, &tilesets, groups::DOOR, &mut objects, |obj, _| {
            Ok(ObjectKind::door(flag(obj, LEVEL_COMPLETE_DOOR_PROPERTY)?))
        })?;
        build_objects(ir, &tilesets, groups::PUSHABLE, &mut objects, |_, _| {
            Ok(ObjectKind::Pushable)
        })?;

        let level_key = unique(&objects, LEVEL_KEY_PROPERTY, InteractiveObject::is_level_key)?;
        let level_complete_door = unique(
            &objects,
            LEVEL_COMPLETE_DOOR_PROPERTY,
            InteractiveObject::is_level_complete_door,
        )?;
        if level_complete_door.is_none() {
            warn!("level has no door flagged {LEVEL_COMPLETE_DOOR_PROPERTY}; it cannot be won");
        }

        let timer = CountDownTimer::new(timer_start(ir)?);

        let tile_size = vec2(ir.tile_w as f32, ir.tile_h as f32);
        let player = PlayerObject::new(player_start(ir, tile_size, settings), tile_size, settings);

        let map_px_width = (ir.width as u32 * ir.tile_w) as f32;
        let scale = display.scale_for(map_px_width);
        let bag = Bag::new(display.bag_anchor_for(ir.tile_w as f32));

        debug!(
            "{} floor layers, {} collision layers, scale {:.3}",
            floor_layers.len(),
            collision_layers.len(),
            scale
        );

        Ok(Self {
            width: ir.width,
            height: ir.height,
            tile_w: ir.tile_w,
            tile_h: ir.tile_h,
            base_dir,
            tilesets,
            floor_layers,
            collision_layers,
            objects,
            level_key,
            level_complete_door,
            player,
            bag,
            timer,
            status: StatusTracker::default(),
            scale,
            display,
        })
    }

    /// Advance one frame: player, then door state, then the clock.
    pub fn update(&mut self, dt: f32, input: MoveInput) -> StepReport {
        for obj in &mut self.objects {
            obj.animate(dt);
        }

        let mut report = StepReport::default();
        if self.status.current == LevelStatus::Running {
            let mut field = PlayField {
                collision: &self.collision_layers,
                objects: &mut self.objects,
                bag: &mut self.bag,
                level_key: self.level_key,
                bag_layout: BagLayout {
                    tile_w: self.tile_w as f32,
                    line_spacing: self.display.line_spacing,
                    scale: self.scale,
                },
            };
            report = self.player.step(input, &mut field);
            if !report.unlocked.is_empty() {
                debug!("unlocked {} doors", report.unlocked.len());
            }
        }

        self.evaluate_exit();
        self.timer.tick(dt, &mut self.status.current);
        report
    }

    fn evaluate_exit(&mut self) {
        if self.status.current != LevelStatus::Running {
            return;
        }
        let exit_open = self
            .level_complete_door
            .is_some_and(|id| self.objects[id.0].is_unlocked());
        if exit_open {
            self.status.current = LevelStatus::Won;
        }
    }

    /// Put everything back the way the level started.
    pub fn reset(&mut self) {
        self.player.reset();
        self.bag.clear();
        for obj in &mut self.objects {
            obj.reset();
        }
        self.timer.reset();
        self.status = StatusTracker::default();
    }

    /// Current level status.
    pub fn status(&self) -> LevelStatus {
        self.status.current
    }

    /// Status as of the last reported transition.
    pub fn previous_status(&self) -> LevelStatus {
        self.status.previous
    }

    /// See [`StatusTracker::take_transition`].
    pub fn take_transition(&mut self) -> Option<LevelStatus> {
        self.status.take_transition()
    }

    /// Seconds left on the clock.
    pub fn countdown_time(&self) -> f32 {
        self.timer.remaining()
    }

    /// The level clock.
    pub fn timer(&self) -> &CountDownTimer {
        &self.timer
    }

    /// The player's inventory.
    pub fn bag(&self) -> &Bag {
        &self.bag
    }

    /// The knight.
    pub fn player(&self) -> &PlayerObject {
        &self.player
    }

    /// Every interactive object, pickups first, then doors, then pushables.
    pub fn objects(&self) -> &[InteractiveObject] {
        &self.objects
    }

    /// Object `id`, if it exists.
    pub fn object(&self, id: ObjectId) -> Option<&InteractiveObject> {
        self.objects.get(id.0)
    }

    /// Doors with their ids.
    pub fn doors(&self) -> impl Iterator<Item = (ObjectId, &InteractiveObject)> + '_ {
        self.ids_where(InteractiveObject::is_door)
    }

    /// Pickups with their ids.
    pub fn pickups(&self) -> impl Iterator<Item = (ObjectId, &InteractiveObject)> + '_ {
        self.ids_where(InteractiveObject::is_pickup)
    }

    /// Pushable objects with their ids.
    pub fn pushables(&self) -> impl Iterator<Item = (ObjectId, &InteractiveObject)> + '_ {
        self.ids_where(InteractiveObject::is_pushable)
    }

    fn ids_where(
        &self,
        pred: fn(&InteractiveObject) -> bool,
    ) -> impl Iterator<Item = (ObjectId, &InteractiveObject)> + '_ {
        self.objects
            .iter()
            .enumerate()
            .filter(move |(_, o)| pred(o))
            .map(|(i, o)| (ObjectId(i), o))
    }

    /// The pickup that unlocks doors, if the level has one.
    pub fn level_key(&self) -> Option<ObjectId> {
        self.level_key
    }

    /// The exit door, if the level has one.
    pub fn level_complete_door(&self) -> Option<ObjectId> {
        self.level_complete_door
    }

    /// Decorative tile layers.
    pub fn floor_layers(&self) -> &[FloorLayer] {
        &self.floor_layers
    }

    /// Solid tile layers.
    pub fn collision_layers(&self) -> &[CollisionLayer] {
        &self.collision_layers
    }

    /// Tilesets used by the level.
    pub fn tilesets(&self) -> &TilesetRegistry {
        &self.tilesets
    }

    /// Directory the map was loaded from; tileset images are relative to it.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Map-to-display scale.
    pub fn scale_factor(&self) -> f32 {
        self.scale
    }

    /// Screen layout the level was loaded with.
    pub fn display(&self) -> &DisplayContext {
        &self.display
    }

    /// Map pixel position to window position.
    pub fn to_display(&self, p: Vec2) -> Vec2 {
        p * self.scale + self.display.offset
    }

    #[cfg(test)]
    pub(crate) fn objects_mut(&mut self) -> &mut [InteractiveObject] {
        &mut self.objects
    }
}

fn build_objects(
    ir: &IrMap,
    tilesets: &TilesetRegistry,
    group: &str,
    out: &mut Vec<InteractiveObject>,
    mut make_kind: impl FnMut(&IrObject, u32) -> Result<ObjectKind, MapError>,
) -> Result<(), MapError> {
    for layer in group_layers(ir, group) {
        for obj in layer.objects() {
            match InteractiveObject::from_ir(obj, tilesets, &layer.name, &mut make_kind)? {
                Some(built) => out.push(built),
                None => warn!(
                    "skipping object {} in '{}': not a tile object",
                    obj.id, layer.name
                ),
            }
        }
    }
    Ok(())
}

/// A boolean object flag; absent means `false`, anything but a bool is an error.
fn flag(obj: &IrObject, name: &str) -> Result<bool, MapError> {
    match obj.properties.get(name) {
        None => Ok(false),
        Some(value) => value.as_bool().ok_or_else(|| {
            MapError::InvalidMap(format!(
                "object {} has '{name}' = {value:?}, expected a bool",
                obj.id
            ))
        }),
    }
}

fn unique(
    objects: &[InteractiveObject],
    flag: &'static str,
    pred: fn(&InteractiveObject) -> bool,
) -> Result<Option<ObjectId>, MapError> {
    let flagged: Vec<ObjectId> = objects
        .iter()
        .enumerate()
        .filter(|(_, o)| pred(o))
        .map(|(i, _)| ObjectId(i))
        .collect();
    match flagged.len() {
        0 | 1 => Ok(flagged.first().copied()),
        count => Err(MapError::DuplicateFlag { flag, count }),
    }
}

fn timer_start(ir: &IrMap) -> Result<f32, MapError> {
    let value = match ir.properties.get(TIMER_PROPERTY) {
        Some(v) => v,
        None => ir.properties.first().map(|(_, v)| v).ok_or(MapError::MissingTimer)?,
    };
    match value.as_f32() {
        Some(secs) if secs.is_finite() && secs >= 0.0 => Ok(secs),
        _ => Err(MapError::InvalidTimer(format!("{value:?}"))),
    }
}

/// The sole object of a map's only top-level layer marks the spawn; otherwise
/// the player starts centred on the map.
fn player_start(ir: &IrMap, tile_size: Vec2, settings: PlayerSettings) -> Vec2 {
    let top_level: Vec<_> = ir
        .layers
        .iter()
        .filter(|l| !matches!(l.kind, IrLayerKind::Group { .. }))
        .collect();

    if let [layer] = top_level.as_slice() {
        if let [spawn] = layer.objects() {
            return vec2(spawn.x, spawn.y);
        }
    }

    let map_px = vec2(
        (ir.width as u32 * ir.tile_w) as f32,
        (ir.height as u32 * ir.tile_h) as f32,
    );
    map_px / 2.0 - tile_size * settings.box_scale / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::json_loader::decode_map_str_to_ir;
    use serde_json::{json, Value};

    const SIDE: usize = 10;

    fn settings() -> PlayerSettings {
        PlayerSettings {
            move_speed: 2.0,
            box_scale: 0.75,
        }
    }

    // 160 px wide map shown at scale 1 with the bag label at (16, 200)
    fn display() -> DisplayContext {
        DisplayContext {
            stage: vec2(640.0, 480.0),
            display_size: vec2(160.0, 160.0),
            offset: vec2(100.0, 0.0),
            line_spacing: 24.0,
            bag_anchor: Some(vec2(16.0, 200.0)),
        }
    }

    /// A 16x16 tile object whose top-left corner is at `(x, y)`.
    fn tile(id: u32, x: f32, y: f32, properties: Value) -> Value {
        json!({
            "id": id, "gid": 2, "x": x, "y": y + 16.0,
            "width": 16, "height": 16, "properties": properties
        })
    }

    fn group(name: &str, objects: Value) -> Value {
        json!({
            "type": "group", "name": name,
            "layers": [ { "type": "objectgroup", "name": format!("{name}0"), "objects": objects } ]
        })
    }

    struct Level {
        walls: Vec<usize>,
        pickups: Value,
        doors: Value,
        pushables: Value,
        properties: Value,
        spawn: Option<(f32, f32)>,
    }

    impl Default for Level {
        fn default() -> Self {
            Self {
                walls: Vec::new(),
                pickups: json!([]),
                doors: json!([]),
                pushables: json!([]),
                properties: json!([{ "name": "timerStartTime", "type": "float", "value": 50.0 }]),
                spawn: Some((0.0, 0.0)),
            }
        }
    }

    impl Level {
        fn json(&self) -> String {
            let mut data = vec![0u32; SIDE * SIDE];
            for &cell in &self.walls {
                data[cell] = 1;
            }
            let mut layers = vec![
                json!({
                    "type": "group", "name": "collisionLayers",
                    "layers": [ { "type": "tilelayer", "name": "walls", "data": data } ]
                }),
                group("pickupObjectLayers", self.pickups.clone()),
                group("doorLayers", self.doors.clone()),
                group("pushObjectLayers", self.pushables.clone()),
            ];
            if let Some((x, y)) = self.spawn {
                layers.push(json!({
                    "type": "objectgroup", "name": "start",
                    "objects": [ { "id": 99, "x": x, "y": y, "point": true } ]
                }));
            }
            json!({
                "width": SIDE, "height": SIDE, "tilewidth": 16, "tileheight": 16,
                "properties": self.properties,
                "layers": layers,
                "tilesets": [ {
                    "firstgid": 1, "tilewidth": 16, "tileheight": 16,
                    "tilecount": 16, "columns": 4, "image": "dungeon.png"
                } ]
            })
            .to_string()
        }

        fn build(&self) -> Result<Map, MapError> {
            let ir = decode_map_str_to_ir(&self.json(), Path::new("."))?;
            Map::from_ir(&ir, PathBuf::from("."), display(), settings())
        }

        fn map(&self) -> Map {
            self.build().expect("fixture level should load")
        }
    }

    fn right() -> MoveInput {
        MoveInput {
            right: true,
            ..Default::default()
        }
    }

    fn run(map: &mut Map, input: MoveInput, frames: usize) {
        for _ in 0..frames {
            map.update(1.0 / 60.0, input);
        }
    }

    fn key_and_exit() -> Level {
        Level {
            pickups: json!([tile(1, 0.0, 0.0, json!([{ "name": "isLevelKey", "type": "bool", "value": true }]))]),
            doors: json!([
                tile(2, 48.0, 0.0, json!([{ "name": "isLevelCompleteDoor", "type": "bool", "value": true }])),
                tile(3, 128.0, 128.0, json!([]))
            ]),
            ..Default::default()
        }
    }

    #[test]
    fn transition_is_reported_once() {
        let mut status = StatusTracker::default();
        assert_eq!(status.take_transition(), None);

        status.current = LevelStatus::Won;
        assert_eq!(status.take_transition(), Some(LevelStatus::Won));
        assert_eq!(status.previous, LevelStatus::Won);
        assert_eq!(status.take_transition(), None);
    }

    #[test]
    fn builds_objects_in_group_order() {
        let map = key_and_exit().map();
        assert_eq!(map.objects().len(), 3);
        assert_eq!(map.level_key(), Some(ObjectId(0)));
        assert_eq!(map.level_complete_door(), Some(ObjectId(1)));
        assert_eq!(map.doors().count(), 2);
        assert_eq!(map.scale_factor(), 1.0);
        assert_eq!(map.countdown_time(), 50.0);
        assert_eq!(map.objects()[1].position(), vec2(48.0, 0.0));
        assert_eq!(map.to_display(vec2(10.0, 10.0)), vec2(110.0, 10.0));
    }

    #[test]
    fn locked_door_blocks_without_key() {
        let mut map = Level {
            doors: json!([tile(1, 48.0, 0.0, json!([{ "name": "isLevelCompleteDoor", "type": "bool", "value": true }]))]),
            ..Default::default()
        }
        .map();

        run(&mut map, right(), 40);

        // box is 12 px wide, so it stops flush against the door at x = 48
        assert_eq!(map.player().position(), vec2(36.0, 0.0));
        assert!(!map.objects()[0].is_unlocked());
        assert_eq!(map.status(), LevelStatus::Running);
    }

    #[test]
    fn key_unlocks_every_door_and_wins() {
        let mut map = key_and_exit().map();

        let first = map.update(1.0 / 60.0, right());
        assert_eq!(first.picked_up, vec![ObjectId(0)]);
        assert!(map.bag().contains(ObjectId(0)));
        assert_eq!(map.objects()[0].position(), vec2(16.0, 224.0));

        run(&mut map, right(), 40);

        assert!(map.doors().all(|(_, d)| d.is_unlocked()));
        assert_eq!(map.objects()[1].frame().column, 2);
        assert_eq!(map.status(), LevelStatus::Won);
        // unlocked doors still block
        assert_eq!(map.player().position(), vec2(36.0, 0.0));

        let remaining = map.countdown_time();
        run(&mut map, MoveInput::default(), 120);
        assert_eq!(map.countdown_time(), remaining);
        assert_eq!(map.take_transition(), Some(LevelStatus::Won));
        assert_eq!(map.take_transition(), None);
    }

    #[test]
    fn timer_runs_out_after_fifty_seconds() {
        let mut map = Level::default().map();
        for _ in 0..199 {
            map.update(0.25, MoveInput::default());
        }
        assert_eq!(map.status(), LevelStatus::Running);

        map.update(0.25, MoveInput::default());
        assert_eq!(map.countdown_time(), 0.0);
        assert_eq!(map.status(), LevelStatus::Lost);
        assert_eq!(map.take_transition(), Some(LevelStatus::Lost));

        // no movement once lost
        map.update(0.25, right());
        assert_eq!(map.player().position(), Vec2::ZERO);
        assert_eq!(map.countdown_time(), 0.0);
    }

    #[test]
    fn pickup_goes_to_first_bag_slot_once() {
        let mut map = Level {
            pickups: json!([tile(1, 32.0, 0.0, json!([]))]),
            ..Default::default()
        }
        .map();

        let mut collected = Vec::new();
        for _ in 0..30 {
            collected.extend(map.update(1.0 / 60.0, right()).picked_up);
        }

        assert_eq!(collected, vec![ObjectId(0)]);
        assert_eq!(map.bag().items(), &[ObjectId(0)]);
        assert_eq!(map.objects()[0].position(), vec2(16.0, 224.0));
        assert_eq!(map.level_key(), None);
    }

    #[test]
    fn pushed_crate_stops_at_wall_and_blocks_player() {
        let mut map = Level {
            walls: vec![5],
            pushables: json!([tile(1, 32.0, 0.0, json!([]))]),
            ..Default::default()
        }
        .map();

        run(&mut map, right(), 60);

        assert_eq!(map.objects()[0].position(), vec2(64.0, 0.0));
        assert_eq!(map.player().position(), vec2(52.0, 0.0));
    }

    #[test]
    fn reset_restores_the_loaded_level() {
        let pristine = key_and_exit().map();
        let mut map = pristine.clone();
        run(&mut map, right(), 40);
        assert_eq!(map.status(), LevelStatus::Won);

        map.reset();
        assert_eq!(map.status(), LevelStatus::Running);
        assert_eq!(map.previous_status(), LevelStatus::Running);
        assert!(map.bag().is_empty());
        assert_eq!(map.objects(), pristine.objects());
        assert_eq!(map.player(), pristine.player());
        assert_eq!(map.timer(), pristine.timer());

        map.objects_mut()[2].set_position(vec2(1.0, 1.0));
        map.reset();
        map.reset();
        assert_eq!(map.objects(), pristine.objects());
    }

    #[test]
    fn rejects_duplicate_level_keys() {
        let flag = json!([{ "name": "isLevelKey", "type": "bool", "value": true }]);
        let err = Level {
            pickups: json!([tile(1, 0.0, 0.0, flag.clone()), tile(2, 32.0, 0.0, flag)]),
            ..Default::default()
        }
        .build()
        .err()
        .expect("expected duplicate flag error");
        assert!(matches!(
            err,
            MapError::DuplicateFlag {
                flag: LEVEL_KEY_PROPERTY,
                count: 2
            }
        ));
    }

    #[test]
    fn non_bool_object_flag_fails_the_load() {
        let err = Level {
            doors: json!([tile(1, 48.0, 0.0, json!([{ "name": "isLevelCompleteDoor", "type": "int", "value": 1 }]))]),
            ..Default::default()
        }
        .build()
        .err()
        .expect("expected invalid flag");
        assert!(matches!(err, MapError::InvalidMap(msg) if msg.contains("isLevelCompleteDoor")));

        // "true" spelled as a string still counts
        let map = Level {
            pickups: json!([tile(1, 0.0, 0.0, json!([{ "name": "isLevelKey", "type": "string", "value": "true" }]))]),
            ..Default::default()
        }
        .map();
        assert_eq!(map.level_key(), Some(ObjectId(0)));
    }

    #[test]
    fn requires_collision_group() {
        let txt = json!({
            "width": 1, "height": 1, "tilewidth": 16, "tileheight": 16,
            "properties": [{ "name": "timerStartTime", "type": "int", "value": 5 }],
            "layers": [ { "type": "group", "name": "floorLayers", "layers": [] } ]
        })
        .to_string();
        let ir = decode_map_str_to_ir(&txt, Path::new(".")).expect("decode");
        let err = Map::from_ir(&ir, PathBuf::new(), display(), settings())
            .err()
            .expect("expected missing group");
        assert!(matches!(err, MapError::MissingLayerGroup("collisionLayers")));
    }

    #[test]
    fn timer_falls_back_to_first_property() {
        let map = Level {
            properties: json!([{ "name": "limit", "type": "string", "value": "12.5" }]),
            ..Default::default()
        }
        .map();
        assert_eq!(map.countdown_time(), 12.5);

        let missing = Level {
            properties: json!([]),
            ..Default::default()
        }
        .build();
        assert!(matches!(missing, Err(MapError::MissingTimer)));

        let garbage = Level {
            properties: json!([{ "name": "timerStartTime", "type": "string", "value": "soon" }]),
            ..Default::default()
        }
        .build();
        assert!(matches!(garbage, Err(MapError::InvalidTimer(_))));
    }

    #[test]
    fn player_starts_centred_without_spawn_layer() {
        let map = Level {
            spawn: None,
            ..Default::default()
        }
        .map();
        // (160 / 2) - (12 / 2)
        assert_eq!(map.player().position(), vec2(74.0, 74.0));
        assert_eq!(map.player().size(), vec2(12.0, 12.0));
    }
}
