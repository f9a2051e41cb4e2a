use crate::config::DisplayContext;
use crate::layer::FloorLayer;
use crate::map::{LevelStatus, Map};
use crate::tileset::{TileFrame, Tileset, FLIP_D, FLIP_H, FLIP_V};
use anyhow::Context;
use macroquad::prelude::*;

const HUD_FONT_SIZE: f32 = 24.0;
const PLAYER_COLOR: Color = Color::new(0.85, 0.85, 0.95, 1.0);

/// GPU textures for one map's tilesets, indexed like [`crate::TilesetRegistry::tilesets`].
pub struct MapTextures {
    textures: Vec<Texture2D>,
}

impl MapTextures {
    /// Load every tileset image relative to the map's directory.
    pub async fn load(map: &Map) -> anyhow::Result<Self> {
        let mut textures = Vec::with_capacity(map.tilesets().tilesets().len());
        for ts in map.tilesets().tilesets() {
            let img_path = map.base_dir().join(&ts.image);
            let img_path = img_path
                .to_str()
                .with_context(|| format!("Non UTF-8 texture path {}", img_path.display()))?;
            let tex = load_texture(img_path)
                .await
                .with_context(|| format!("Loading texture {}", ts.image))?;
            tex.set_filter(FilterMode::Nearest);
            textures.push(tex);
        }
        Ok(Self { textures })
    }
}

/// Pixel rectangle of `frame` inside the tileset image.
pub fn source_rect(ts: &Tileset, frame: TileFrame) -> Rect {
    let sx = ts.margin + frame.column * (ts.tile_w + ts.spacing);
    let sy = ts.margin + frame.row * (ts.tile_h + ts.spacing);
    Rect::new(sx as f32, sy as f32, ts.tile_w as f32, ts.tile_h as f32)
}

/// Draw the whole level: floor, walls, objects, player, then the HUD.
pub fn draw_map(map: &Map, textures: &MapTextures) {
    for layer in map.floor_layers() {
        draw_tile_layer(map, textures, layer);
    }
    for layer in map.collision_layers() {
        draw_tile_layer(map, textures, &layer.floor);
    }

    let scale = map.scale_factor();
    for obj in map.objects() {
        let (Some(ts), Some(tex)) = (
            map.tilesets().get(obj.tileset),
            textures.textures.get(obj.tileset),
        ) else {
            continue;
        };
        let pos = map.to_display(obj.position());
        draw_texture_ex(
            tex,
            pos.x,
            pos.y,
            WHITE,
            DrawTextureParams {
                source: Some(source_rect(ts, obj.frame())),
                dest_size: Some(vec2(obj.width, obj.height) * scale),
                ..Default::default()
            },
        );
    }

    let player = map.player();
    let pos = map.to_display(player.position());
    let size = player.size() * scale;
    draw_rectangle(pos.x, pos.y, size.x, size.y, PLAYER_COLOR);

    draw_hud(map);
}

fn draw_tile_layer(map: &Map, textures: &MapTextures, layer: &FloorLayer) {
    let Some(tint) = layer.tint() else {
        return;
    };
    let scale = map.scale_factor();
    let tile = vec2(map.tile_w as f32, map.tile_h as f32);

    for (col, row, tile_ref) in layer.tiles() {
        let (Some(ts), Some(tex)) = (
            map.tilesets().get(tile_ref.tileset),
            textures.textures.get(tile_ref.tileset),
        ) else {
            continue;
        };
        let raw = layer.data[row * layer.width + col];
        let cell = layer.offset + vec2(col as f32, row as f32) * tile;
        let pos = map.to_display(cell);

        draw_texture_ex(
            tex,
            pos.x,
            pos.y,
            tint,
            DrawTextureParams {
                source: Some(source_rect(ts, tile_ref.frame)),
                dest_size: Some(tile * scale),
                flip_x: raw & FLIP_H != 0,
                flip_y: raw & FLIP_V != 0,
                // anti-diagonal flip is a transpose: quarter turn plus a mirror
                rotation: if raw & FLIP_D != 0 {
                    std::f32::consts::FRAC_PI_2
                } else {
                    0.0
                },
                ..Default::default()
            },
        );
    }
}

/// Window position of the countdown text, inside the display area.
pub fn timer_label_position(display: &DisplayContext) -> Vec2 {
    display.offset + vec2(display.line_spacing, display.line_spacing)
}

/// Window position of the "Bag" label, or `None` while the bag is empty.
/// Items sit one text line below it.
pub fn bag_label_position(map: &Map) -> Option<Vec2> {
    if map.bag().is_empty() {
        return None;
    }
    Some(map.bag().anchor() + map.display().offset)
}

fn draw_hud(map: &Map) {
    let display = map.display();

    let timer_pos = timer_label_position(display);
    draw_text(
        &format!("Time: {:.0}", map.countdown_time().ceil()),
        timer_pos.x,
        timer_pos.y,
        HUD_FONT_SIZE,
        WHITE,
    );

    if let Some(label) = bag_label_position(map) {
        draw_text(
            "Bag",
            label.x,
            label.y + HUD_FONT_SIZE * 0.75,
            HUD_FONT_SIZE,
            WHITE,
        );
    }

    let banner = match map.status() {
        LevelStatus::Running => return,
        LevelStatus::Won => "Level complete",
        LevelStatus::Lost => "Out of time",
    };
    let dims = measure_text(banner, None, HUD_FONT_SIZE as u16 * 2, 1.0);
    draw_text(
        banner,
        (display.stage.x - dims.width) / 2.0,
        display.stage.y / 2.0,
        HUD_FONT_SIZE * 2.0,
        YELLOW,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, PlayerSettings};
    use crate::loader::json_loader::decode_map_str_to_ir;
    use crate::player::MoveInput;
    use std::path::{Path, PathBuf};

    // key pickup under the spawn point of a 10x10 map
    const KEY_LEVEL: &str = r#"{
      "width": 10, "height": 10, "tilewidth": 16, "tileheight": 16,
      "properties": [ {"name":"timerStartTime","type":"float","value":30} ],
      "layers": [
        {"type":"group","name":"collisionLayers","layers":[]},
        {"type":"group","name":"pickupObjectLayers","layers":[
          {"type":"objectgroup","name":"keys","objects":[
            {"id":1,"gid":1,"x":0,"y":16,"width":16,"height":16,
             "properties":[{"name":"isLevelKey","type":"bool","value":true}]}
          ]}
        ]},
        {"type":"objectgroup","name":"start","objects":[ {"id":2,"x":0,"y":0} ]}
      ],
      "tilesets": [ {"firstgid":1,"tilewidth":16,"tileheight":16,"tilecount":4,"columns":2,"image":"t.png"} ]
    }"#;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).abs().max_element() < 1e-3
    }

    #[test]
    fn source_rect_honours_margin_and_spacing() {
        let ts = Tileset {
            first_gid: 1,
            last_gid: 16,
            columns: 4,
            tile_w: 16,
            tile_h: 16,
            spacing: 2,
            margin: 1,
            image: "dungeon.png".into(),
        };
        let rect = source_rect(&ts, TileFrame { row: 2, column: 3 });
        assert_eq!(rect, Rect::new(55.0, 37.0, 16.0, 16.0));
    }

    #[test]
    fn hud_labels_share_the_display_offset_with_bag_items() {
        let config = GameConfig::default();
        let ir = decode_map_str_to_ir(KEY_LEVEL, Path::new(".")).unwrap();
        let mut map =
            Map::from_ir(&ir, PathBuf::from("."), config.display(), PlayerSettings::default())
                .unwrap();

        assert_eq!(bag_label_position(&map), None);
        assert_eq!(timer_label_position(map.display()), vec2(304.0, 24.0));

        map.update(
            1.0 / 60.0,
            MoveInput {
                right: true,
                ..Default::default()
            },
        );
        let label = bag_label_position(&map).expect("label shown once the bag has an item");
        let item = map.to_display(map.objects()[0].position());

        assert!(close(label, vec2(296.0, 664.0)), "label at {label}");
        assert!(close(item, label + vec2(0.0, 24.0)), "item at {item}");
    }
}
