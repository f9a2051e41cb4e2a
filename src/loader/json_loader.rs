// src/loader/json_loader.rs
use crate::error::MapError;
use crate::ir_map::*;
use crate::tileset::GID_MASK;
use macroquad::prelude::*;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};

#[derive(Deserialize)]
struct JsonLayer {
    #[serde(default)]
    data: Vec<u32>,
    #[serde(default)]
    width: usize,
    #[serde(default)]
    height: usize,
    #[serde(default = "default_true")]
    visible: bool,
    #[serde(default = "one")]
    opacity: f32,
    #[serde(default)]
    offsetx: f32,
    #[serde(default)]
    offsety: f32,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: Option<String>, // "tilelayer" when missing
    #[serde(default)]
    objects: Vec<JsonObject>,
    #[serde(default)]
    layers: Vec<JsonLayer>,
}

fn default_true() -> bool {
    true
}
fn one() -> f32 {
    1.0
}

/// Either an external reference (`source`) or an embedded tileset.
#[derive(Deserialize)]
struct JsonTilesetRef {
    firstgid: u32,
    #[serde(default)]
    source: Option<String>,
    tilewidth: Option<u32>,
    tileheight: Option<u32>,
    tilecount: Option<u32>,
    columns: Option<u32>,
    image: Option<String>,
    #[serde(default)]
    spacing: u32,
    #[serde(default)]
    margin: u32,
}

impl JsonTilesetRef {
    fn embedded(self) -> Option<EmbeddedTileset> {
        Some(EmbeddedTileset {
            tilewidth: self.tilewidth?,
            tileheight: self.tileheight?,
            tilecount: self.tilecount?,
            columns: self.columns?,
            image: self.image?,
            spacing: self.spacing,
            margin: self.margin,
        })
    }
}

#[derive(Deserialize)]
struct EmbeddedTileset {
    tilewidth: u32,
    tileheight: u32,
    tilecount: u32,
    columns: u32,
    image: String,
    #[serde(default)]
    spacing: u32,
    #[serde(default)]
    margin: u32,
}

#[derive(Deserialize)]
struct JsonMap {
    #[serde(default)]
    width: usize,
    #[serde(default)]
    height: usize,
    tilewidth: u32,
    tileheight: u32,
    layers: Vec<JsonLayer>,
    #[serde(default)]
    tilesets: Vec<JsonTilesetRef>,
    #[serde(default)]
    properties: Vec<JsonProperty>,
}

#[derive(Deserialize)]
struct JsonProperty {
    name: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    value: JsonValue,
}

#[derive(Deserialize)]
struct JsonObject {
    #[serde(default)]
    id: u32,
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    #[serde(default)]
    width: f32,
    #[serde(default)]
    height: f32,
    #[serde(default)]
    gid: Option<u32>,
    #[serde(default)]
    properties: Vec<JsonProperty>,
}

fn json_property_to_ir(prop: JsonProperty) -> Result<Option<(String, PropertyValue)>, MapError> {
    let JsonProperty { name, kind, value } = prop;

    let parsed = match kind.as_deref() {
        Some("bool") => value.as_bool().map(PropertyValue::Bool),
        Some("int") | Some("object") => value.as_i64().map(PropertyValue::I64),
        Some("float") => value.as_f64().map(|n| PropertyValue::F32(n as f32)),
        Some("string") | Some("file") | Some("color") => {
            value.as_str().map(|s| PropertyValue::String(s.to_owned()))
        }
        Some(other) => {
            return Err(MapError::UnsupportedPropertyType {
                name,
                kind: other.to_owned(),
            });
        }
        None => {
            if let Some(v) = value.as_bool() {
                Some(PropertyValue::Bool(v))
            } else if let Some(v) = value.as_i64() {
                Some(PropertyValue::I64(v))
            } else if let Some(v) = value.as_f64() {
                Some(PropertyValue::F32(v as f32))
            } else {
                value.as_str().map(|s| PropertyValue::String(s.to_owned()))
            }
        }
    };

    Ok(parsed.map(|value| (name, value)))
}

fn properties_from_json(props: Vec<JsonProperty>) -> Result<Properties, MapError> {
    let mut out = Properties::new();
    for p in props {
        if let Some((name, value)) = json_property_to_ir(p)? {
            out.insert(name, value);
        }
    }
    Ok(out)
}

fn object_to_ir(obj: JsonObject) -> Result<IrObject, MapError> {
    Ok(IrObject {
        id: obj.id,
        x: obj.x,
        y: obj.y,
        width: obj.width,
        height: obj.height,
        gid: obj.gid.map(|g| g & GID_MASK),
        properties: properties_from_json(obj.properties)?,
    })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, MapError> {
    let txt = std::fs::read_to_string(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&txt).map_err(|source| MapError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn tileset_to_ir(ts: JsonTilesetRef, map_dir: &Path) -> Result<IrTileset, MapError> {
    let first_gid = ts.firstgid;
    let ext = match ts.source.clone() {
        Some(source) => {
            if !source.ends_with(".json") {
                return Err(MapError::InvalidMap(format!(
                    "External tileset must be JSON: {source}"
                )));
            }
            read_json::<EmbeddedTileset>(&map_dir.join(&source))?
        }
        None => ts.embedded().ok_or_else(|| {
            MapError::InvalidMap(format!(
                "Tileset with firstgid {first_gid} has neither a source nor embedded data"
            ))
        })?,
    };

    if ext.columns == 0 || ext.tilecount == 0 {
        return Err(MapError::InvalidMap(format!(
            "Tileset '{}' has no tiles",
            ext.image
        )));
    }

    // (We keep image path relative; the renderer joins it with map_dir)
    Ok(IrTileset::Atlas {
        first_gid,
        image: ext.image,
        tile_w: ext.tilewidth,
        tile_h: ext.tileheight,
        tilecount: ext.tilecount,
        columns: ext.columns,
        spacing: ext.spacing,
        margin: ext.margin,
    })
}

fn layer_to_ir(l: JsonLayer, map_w: usize, map_h: usize) -> Result<IrLayer, MapError> {
    let layer_kind = match l.kind.as_deref().unwrap_or("tilelayer") {
        "tilelayer" => {
            let (width, height) = if l.width == 0 { (map_w, map_h) } else { (l.width, l.height) };
            if l.data.len() != width * height {
                return Err(MapError::InvalidMap(format!(
                    "Layer '{}' has {} cells, expected {}x{}",
                    l.name,
                    l.data.len(),
                    width,
                    height
                )));
            }
            IrLayerKind::Tiles {
                width,
                height,
                data: l.data,
            }
        }
        "objectgroup" => IrLayerKind::Objects {
            objects: l
                .objects
                .into_iter()
                .map(object_to_ir)
                .collect::<Result<Vec<_>, _>>()?,
        },
        "group" => IrLayerKind::Group {
            layers: l
                .layers
                .into_iter()
                .map(|child| layer_to_ir(child, map_w, map_h))
                .collect::<Result<Vec<_>, _>>()?,
        },
        _ => IrLayerKind::Unsupported,
    };

    Ok(IrLayer {
        name: l.name,
        visible: l.visible,
        opacity: l.opacity,
        offset: vec2(l.offsetx, l.offsety),
        kind: layer_kind,
    })
}

/// Decode an in-memory Tiled JSON document. External tilesets are looked up in `map_dir`.
pub fn decode_map_str_to_ir(txt: &str, map_dir: &Path) -> Result<IrMap, MapError> {
    let j: JsonMap = serde_json::from_str(txt).map_err(|source| MapError::Json {
        path: map_dir.to_path_buf(),
        source,
    })?;
    map_to_ir(j, map_dir)
}

/// Decode a `.json` map file. Returns the map and the directory it was read from.
pub fn decode_map_file_to_ir(path: &Path) -> Result<(IrMap, PathBuf), MapError> {
    if path.extension().and_then(|e| e.to_str()) != Some("json") {
        return Err(MapError::InvalidMap(format!(
            "Map file must be a JSON file: {}",
            path.display()
        )));
    }

    let j: JsonMap = read_json(path)?;

    let map_dir = path
        .parent()
        .map(|d| d.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./"));

    let ir = map_to_ir(j, &map_dir)?;
    Ok((ir, map_dir))
}

fn map_to_ir(j: JsonMap, map_dir: &Path) -> Result<IrMap, MapError> {
    if j.width == 0 || j.height == 0 || j.tilewidth == 0 || j.tileheight == 0 {
        return Err(MapError::InvalidMap(
            "Map dimensions and tile size must be non-zero".to_owned(),
        ));
    }

    let mut ir_tilesets = j
        .tilesets
        .into_iter()
        .map(|ts| tileset_to_ir(ts, map_dir))
        .collect::<Result<Vec<_>, _>>()?;

    // Sort by first_gid so the resolver can scan in order
    ir_tilesets.sort_by_key(IrTileset::first_gid);

    let ir_layers = j
        .layers
        .into_iter()
        .map(|l| layer_to_ir(l, j.width, j.height))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(IrMap {
        width: j.width,
        height: j.height,
        tile_w: j.tilewidth,
        tile_h: j.tileheight,
        properties: properties_from_json(j.properties)?,
        tilesets: ir_tilesets,
        layers: ir_layers,
    })
}
