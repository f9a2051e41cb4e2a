#![warn(missing_docs)]

//! Level engine for The Forgotten Knight: Tiled JSON maps, a timed tile-puzzle
//! level loop and Macroquad rendering.
//!
//! Load a level with [`Map::load`], feed it one [`MoveInput`] per frame through
//! [`Map::update`], and draw it with [`render::draw_map`]. [`Campaign`] chains
//! numbered level files together.

mod bag;
mod campaign;
mod config;
mod error;
mod geom;
mod ir_map;
mod layer;
mod loader {
    /// Tiled JSON decoding.
    pub mod json_loader;
}
mod map;
mod object;
mod player;
/// Macroquad drawing for a loaded level.
pub mod render;
mod tileset;
mod timer;

pub use bag::{Bag, BagLayout};
pub use campaign::{Campaign, CampaignState, LevelCatalog, PlayerStats};
pub use config::{DisplayContext, GameConfig, PlayerSettings};
pub use error::MapError;
pub use geom::{intersects, Direction};
pub use ir_map::{IrLayer, IrLayerKind, IrMap, IrObject, IrTileset, Properties, PropertyValue};
pub use layer::{groups, CollisionLayer, FloorLayer};
pub use loader::json_loader::{decode_map_file_to_ir, decode_map_str_to_ir};
pub use map::{LevelStatus, Map, StatusTracker};
pub use object::{push, InteractiveObject, ObjectId, ObjectKind};
pub use player::{
    resolve_door_interaction, DoorContact, MoveInput, PlayField, PlayerObject, StepReport,
};
pub use tileset::{TileFrame, TileRef, Tileset, TilesetRegistry};
pub use timer::CountDownTimer;
