#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub fn temp_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("fk_{tag}_{nanos}"));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

pub const TILESET: &str = r#"{
  "tilewidth": 16, "tileheight": 16,
  "tilecount": 16, "columns": 4,
  "image": "dungeon.png"
}"#;

/// 10x10 level: player spawns on the key at (0, 0), the exit door sits three
/// tiles to the right. Walking right for about twenty frames wins it.
pub fn winnable_level(timer: f32) -> String {
    let mut walls = vec!["0"; 100];
    walls[99] = "1";
    format!(
        r#"{{
  "width": 10, "height": 10, "tilewidth": 16, "tileheight": 16,
  "properties": [ {{"name":"timerStartTime","type":"float","value":{timer}}} ],
  "layers": [
    {{"type":"group","name":"floorLayers","layers":[
      {{"type":"tilelayer","name":"floor","data":[{floor}]}}
    ]}},
    {{"type":"group","name":"collisionLayers","layers":[
      {{"type":"tilelayer","name":"walls","data":[{walls}]}}
    ]}},
    {{"type":"group","name":"pickupObjectLayers","layers":[
      {{"type":"objectgroup","name":"keys","objects":[
        {{"id":1,"gid":9,"x":0,"y":16,"width":16,"height":16,
          "properties":[{{"name":"isLevelKey","type":"bool","value":true}}]}}
      ]}}
    ]}},
    {{"type":"group","name":"doorLayers","layers":[
      {{"type":"objectgroup","name":"doors","objects":[
        {{"id":2,"gid":5,"x":48,"y":16,"width":16,"height":16,
          "properties":[{{"name":"isLevelCompleteDoor","type":"bool","value":true}}]}},
        {{"id":3,"name":"no gid","x":80,"y":80,"width":16,"height":16}}
      ]}}
    ]}},
    {{"type":"objectgroup","name":"start","objects":[ {{"id":4,"x":0,"y":0,"point":true}} ]}}
  ],
  "tilesets": [ {{"firstgid":1,"source":"dungeon.json"}} ]
}}"#,
        floor = vec!["2"; 100].join(","),
        walls = walls.join(","),
    )
}

/// Write `1.json`, `2.json`, ... plus the shared tileset into a fresh directory.
pub fn write_campaign(tag: &str, timers: &[f32]) -> PathBuf {
    let dir = temp_dir(tag);
    fs::write(dir.join("dungeon.json"), TILESET).expect("failed to write tileset");
    for (i, timer) in timers.iter().enumerate() {
        write_level(&dir, &format!("{}.json", i + 1), &winnable_level(*timer));
    }
    dir
}

pub fn write_level(dir: &Path, name: &str, json: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, json).expect("failed to write level");
    path
}
