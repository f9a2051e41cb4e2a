use crate::error::MapError;
use crate::ir_map::IrTileset;

/// Horizontal flip flag (bit 31 of a gid).
pub const FLIP_H: u32 = 0x8000_0000;
/// Vertical flip flag (bit 30).
pub const FLIP_V: u32 = 0x4000_0000;
/// Anti-diagonal flip flag (bit 29).
pub const FLIP_D: u32 = 0x2000_0000;
/// Clears the flip flags, keeping the lower 29 bits.
pub const GID_MASK: u32 = 0x1FFF_FFFF;

/// An image sheet and the gid range it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct Tileset {
    /// First gid owned.
    pub first_gid: u32,
    /// Last gid owned, inclusive.
    pub last_gid: u32,
    /// Tiles per image row.
    pub columns: u32,
    /// Tile width in pixels.
    pub tile_w: u32,
    /// Tile height in pixels.
    pub tile_h: u32,
    /// Pixels between tiles.
    pub spacing: u32,
    /// Pixels around the image edge.
    pub margin: u32,
    /// Image path relative to the map file.
    pub image: String,
}

impl Tileset {
    /// Take the gid range and grid from a decoded tileset.
    pub fn from_ir(ir: &IrTileset) -> Self {
        match ir {
            IrTileset::Atlas {
                first_gid,
                image,
                tile_w,
                tile_h,
                tilecount,
                columns,
                spacing,
                margin,
            } => Tileset {
                first_gid: *first_gid,
                last_gid: first_gid + tilecount - 1,
                columns: *columns,
                tile_w: *tile_w,
                tile_h: *tile_h,
                spacing: *spacing,
                margin: *margin,
                image: image.clone(),
            },
        }
    }

    /// Whether `gid` (flags cleared) belongs here.
    #[inline]
    pub fn contains(&self, gid: u32) -> bool {
        self.first_gid <= gid && gid <= self.last_gid
    }
}

/// Row/column of a frame inside a tileset image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileFrame {
    /// Row in the image grid.
    pub row: u32,
    /// Column in the image grid.
    pub column: u32,
}

/// Result of resolving a gid against the loaded tilesets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRef {
    /// Index into the registry.
    pub tileset: usize,
    /// Tile id inside the tileset.
    pub local: u32,
    /// Grid position of the tile.
    pub frame: TileFrame,
}

/// All tilesets of one map, sorted by `first_gid`.
#[derive(Debug, Clone, Default)]
pub struct TilesetRegistry {
    tilesets: Vec<Tileset>,
}

impl TilesetRegistry {
    /// Build from IR tilesets. Overlapping gid ranges are rejected.
    pub fn from_ir(ir: &[IrTileset]) -> Result<Self, MapError> {
        let mut tilesets: Vec<Tileset> = ir.iter().map(Tileset::from_ir).collect();
        tilesets.sort_unstable_by_key(|t| t.first_gid);

        for pair in tilesets.windows(2) {
            if pair[1].first_gid <= pair[0].last_gid {
                return Err(MapError::InvalidMap(format!(
                    "Tilesets '{}' and '{}' share gids {}..={}",
                    pair[0].image, pair[1].image, pair[1].first_gid, pair[0].last_gid
                )));
            }
        }

        Ok(Self { tilesets })
    }

    /// All tilesets, by ascending `first_gid`.
    pub fn tilesets(&self) -> &[Tileset] {
        &self.tilesets
    }

    /// Tileset `index`, if it exists.
    pub fn get(&self, index: usize) -> Option<&Tileset> {
        self.tilesets.get(index)
    }

    /// Map a non-zero gid to its tileset and frame. `context` names the layer or
    /// object in the error.
    pub fn resolve(&self, gid: u32, context: &str) -> Result<TileRef, MapError> {
        let clean = gid & GID_MASK;
        self.tilesets
            .iter()
            .enumerate()
            .find(|(_, ts)| ts.contains(clean))
            .map(|(i, ts)| {
                let local = clean - ts.first_gid;
                TileRef {
                    tileset: i,
                    local,
                    frame: TileFrame {
                        row: local / ts.columns,
                        column: local % ts.columns,
                    },
                }
            })
            .ok_or_else(|| MapError::UnknownGid {
                gid: clean,
                context: context.to_owned(),
            })
    }
}
