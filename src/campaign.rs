use crate::config::{DisplayContext, GameConfig, PlayerSettings};
use crate::error::MapError;
use crate::map::{LevelStatus, Map};
use crate::player::MoveInput;
use crate::timer::CountDownTimer;
use log::{debug, info};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Numbered level files found in a directory, in play order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelCatalog {
    levels: Vec<PathBuf>,
}

impl LevelCatalog {
    /// Collect every `<n>.json` in `dir`. Numbering must run 1, 2, 3, ... without gaps.
    pub fn discover(dir: &Path) -> Result<Self, MapError> {
        let entries = std::fs::read_dir(dir).map_err(|source| MapError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut found = BTreeMap::new();
        for entry in entries {
            let path = entry
                .map_err(|source| MapError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?
                .path();
            match level_number(&path) {
                Some(n) => {
                    found.insert(n, path);
                }
                None => debug!("ignoring {} in level directory", path.display()),
            }
        }

        Self::from_numbered(found)
    }

    fn from_numbered(found: BTreeMap<u32, PathBuf>) -> Result<Self, MapError> {
        let mut levels = Vec::with_capacity(found.len());
        for (expected, (n, path)) in (1u32..).zip(found) {
            if n != expected {
                return Err(MapError::MissingLevel(expected));
            }
            levels.push(path);
        }
        Ok(Self { levels })
    }

    /// Number of levels.
    pub fn len(&self) -> u32 {
        self.levels.len() as u32
    }

    /// True when the directory held no levels.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// File for 1-based level `index`.
    pub fn path(&self, index: u32) -> Result<&Path, MapError> {
        index
            .checked_sub(1)
            .and_then(|i| self.levels.get(i as usize))
            .map(PathBuf::as_path)
            .ok_or(MapError::LevelOutOfRange {
                index,
                count: self.len(),
            })
    }
}

fn level_number(path: &Path) -> Option<u32> {
    if path.extension()? != "json" {
        return None;
    }
    path.file_stem()?
        .to_str()?
        .parse()
        .ok()
        .filter(|n| *n > 0)
}

/// Totals across won levels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerStats {
    /// Levels won so far.
    pub levels_completed: u32,
    /// Seconds spent on the clock of won levels.
    pub time_spent: f32,
}

impl PlayerStats {
    /// Count a won level and the clock time it took.
    pub fn record_win(&mut self, timer: &CountDownTimer) {
        self.levels_completed += 1;
        self.time_spent += timer.elapsed();
    }
}

/// Where the campaign is between levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CampaignState {
    /// A level is in progress.
    Playing,
    /// Level won; the next one loads when `remaining` reaches zero.
    Advancing {
        /// Seconds until the next level loads.
        remaining: f32,
    },
    /// No more levels will load.
    Finished {
        /// Whether the last level was won.
        won: bool,
    },
}

/// Plays the catalog's levels in order.
#[derive(Debug)]
pub struct Campaign {
    catalog: LevelCatalog,
    level: u32,
    map: Map,
    stats: PlayerStats,
    state: CampaignState,
    transition_delay: f32,
    display: DisplayContext,
    settings: PlayerSettings,
}

impl Campaign {
    /// Discover levels under `config.maps_dir` and load the first one.
    pub fn from_config(config: &GameConfig) -> Result<Self, MapError> {
        let catalog = LevelCatalog::discover(&config.maps_dir)?;
        Self::new(catalog, config)
    }

    /// Start at level 1 of `catalog`.
    pub fn new(catalog: LevelCatalog, config: &GameConfig) -> Result<Self, MapError> {
        let display = config.display();
        let settings = config.player();
        let map = Map::load(catalog.path(1)?, display, settings)?;
        info!("campaign started with {} levels", catalog.len());

        Ok(Self {
            catalog,
            level: 1,
            map,
            stats: PlayerStats::default(),
            state: CampaignState::Playing,
            transition_delay: config.transition_delay,
            display,
            settings,
        })
    }

    /// Run one frame. Only swapping to the next level can fail.
    pub fn update(&mut self, dt: f32, input: MoveInput) -> Result<(), MapError> {
        self.map.update(dt, input);

        match self.state {
            CampaignState::Playing => {
                if let Some(status) = self.map.take_transition() {
                    self.on_level_end(status);
                }
            }
            CampaignState::Advancing { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.load_level(self.level + 1)?;
                } else {
                    self.state = CampaignState::Advancing { remaining };
                }
            }
            CampaignState::Finished { .. } => {}
        }
        Ok(())
    }

    fn on_level_end(&mut self, status: LevelStatus) {
        match status {
            LevelStatus::Won => {
                self.stats.record_win(self.map.timer());
                info!(
                    "level {} complete in {:.1}s",
                    self.level,
                    self.map.timer().elapsed()
                );
                self.state = if self.level < self.catalog.len() {
                    CampaignState::Advancing {
                        remaining: self.transition_delay,
                    }
                } else {
                    CampaignState::Finished { won: true }
                };
            }
            LevelStatus::Lost => {
                info!("level {} lost: out of time", self.level);
                self.state = CampaignState::Finished { won: false };
            }
            LevelStatus::Running => {}
        }
    }

    /// Replace the current map with level `index` (1-based).
    pub fn load_level(&mut self, index: u32) -> Result<(), MapError> {
        let path = self.catalog.path(index)?;
        self.map = Map::load(path, self.display, self.settings)?;
        self.level = index;
        self.state = CampaignState::Playing;
        Ok(())
    }

    /// Start the current level over.
    pub fn restart_level(&mut self) {
        self.map.reset();
        self.state = CampaignState::Playing;
    }

    /// The level being played.
    pub fn map(&self) -> &Map {
        &self.map
    }

    /// 1-based index of the current level.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Number of levels in the campaign.
    pub fn level_count(&self) -> u32 {
        self.catalog.len()
    }

    /// Where the campaign is between levels.
    pub fn state(&self) -> CampaignState {
        self.state
    }

    /// Totals over won levels.
    pub fn stats(&self) -> PlayerStats {
        self.stats
    }

    /// The level files being played.
    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }
}
