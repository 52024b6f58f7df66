//! Text-drawn levels.
//!
//! | char | meaning                                 |
//! |------|-----------------------------------------|
//! | `#`  | solid ground                            |
//! | `^`  | hazard                                  |
//! | `P`  | player spawn (feet on the cell bottom)  |
//! | `g`  | gem                                     |
//! | `c`  | closed chest                            |
//! | `T`  | teleport to the configured destination  |
//! | else | empty                                   |

use hashbrown::HashMap;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tilehop::config::PhysicsTuning;
use tilehop::level::Level;
use tilehop::map::{build_level, LayerData, MapData, TileProperties};

const SOLID: u32 = 1;
const HAZARD: u32 = 2;
const SPAWN: u32 = 3;
const GEM: u32 = 4;
const CHEST: u32 = 5;
const TELEPORT: u32 = 6;

/// Builder turning text rows into [`MapData`].
#[derive(Debug, Clone)]
pub struct AsciiMap {
    rows: Vec<String>,
    destination: String,
}

impl AsciiMap {
    /// Level drawn by `rows`, top row first.
    pub fn new(rows: &[&str]) -> Self {
        Self {
            rows: rows.iter().map(|row| (*row).to_owned()).collect(),
            destination: "elsewhere".to_owned(),
        }
    }

    /// Level every `T` leads to.
    pub fn teleport_to(mut self, destination: &str) -> Self {
        self.destination = destination.to_owned();
        self
    }

    /// Equivalent authored map document.
    pub fn to_map(&self) -> MapData {
        let width = self.rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let layer = |name: &str, pick: &dyn Fn(char) -> u32| LayerData {
            name: name.to_owned(),
            visible: true,
            width,
            data: self
                .rows
                .iter()
                .flat_map(|row| {
                    let mut cells: Vec<u32> = row.chars().map(pick).collect();
                    cells.resize(width, 0);
                    cells
                })
                .collect(),
        };
        let mut tiles = HashMap::new();
        tiles.insert(GEM, typed("gem", None));
        tiles.insert(CHEST, typed("chest", None));
        tiles.insert(TELEPORT, typed("teleport", Some(&self.destination)));
        MapData {
            tile_width: 16,
            tile_height: 16,
            layers: vec![
                layer("ground", &|c| if c == '#' { SOLID } else { 0 }),
                layer("spikes", &|c| if c == '^' { HAZARD } else { 0 }),
                layer("player", &|c| if c == 'P' { SPAWN } else { 0 }),
                layer("props", &|c| match c {
                    'g' => GEM,
                    'c' => CHEST,
                    'T' => TELEPORT,
                    _ => 0,
                }),
            ],
            tiles,
            objects: Vec::new(),
        }
    }

    /// Builds the level at the given tuning with a fixed seed.
    pub fn level(&self, name: &str, tuning: &PhysicsTuning) -> Level {
        let mut rng = StdRng::seed_from_u64(7);
        build_level(name, &self.to_map(), tuning, &mut rng)
    }
}

fn typed(kind: &str, destination: Option<&str>) -> TileProperties {
    TileProperties {
        kind: Some(kind.to_owned()),
        mask: None,
        destination: destination.map(str::to_owned),
    }
}
