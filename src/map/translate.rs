//! Map-to-level translation.
//!
//! Grid cells become tiles placed on a uniform grid whose cell size comes
//! from the current [`PhysicsTuning`]. A cell's role is taken from its tile
//! properties when they name one and from the layer name otherwise:
//!
//! | layer prefix                   | role          |
//! |--------------------------------|---------------|
//! | `solid`, `ground`, `collide`   | solid         |
//! | `hazard`, `spike`              | hazard        |
//! | `player`, `spawn`              | player spawn  |
//! | anything else                  | decoration    |
//!
//! Objects are placed in map pixels and converted by
//! `cell_size / tile_width`.

use glam::Vec2;
use log::{debug, info, warn};
use rand::rngs::StdRng;

use super::{LayerData, MapData, ObjectData, TileProperties};
use crate::config::PhysicsTuning;
use crate::geometry::Aabb;
use crate::interact::item_tile;
use crate::level::Level;
use crate::mask::Mask;
use crate::numeric::{extent_to_usize, u32_to_f32, usize_to_f32};
use crate::tile::{ChestState, ItemKind, ItemPhase, TeleportState, Tile, TileId, TileKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Solid,
    Hazard,
    Spawn,
    Decor,
    Item(ItemKind),
    Chest,
    Teleport,
}

impl Role {
    fn from_layer_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        let has = |prefixes: &[&str]| prefixes.iter().any(|prefix| lower.starts_with(prefix));
        if has(&["solid", "ground", "collide"]) {
            Self::Solid
        } else if has(&["hazard", "spike"]) {
            Self::Hazard
        } else if has(&["player", "spawn"]) {
            Self::Spawn
        } else {
            Self::Decor
        }
    }

    fn from_type(kind: &str) -> Option<Self> {
        match kind.to_ascii_lowercase().as_str() {
            "solid" => Some(Self::Solid),
            "hazard" => Some(Self::Hazard),
            "spawn" => Some(Self::Spawn),
            "decor" => Some(Self::Decor),
            "item" | "gem" => Some(Self::Item(ItemKind::Gem)),
            "coin" => Some(Self::Item(ItemKind::Coin)),
            "chest" => Some(Self::Chest),
            "teleport" => Some(Self::Teleport),
            _ => None,
        }
    }
}

/// Builds a playable level from authored map data.
///
/// Entries that cannot be placed (unknown types, teleports without a
/// destination, trailing partial rows) are skipped with a debug log. A map
/// without a spawn point starts the player at the origin.
pub fn build_level(
    name: &str,
    data: &MapData,
    tuning: &PhysicsTuning,
    rng: &mut StdRng,
) -> Level {
    let mut builder = Builder {
        level: Level::new(name, tuning.cell_size),
        data,
        body_size: tuning.body_size,
        rng,
        spawn: None,
    };
    for layer in &data.layers {
        builder.add_layer(layer);
    }
    let pixel_scale = Vec2::new(
        tuning.cell_size / u32_to_f32(data.tile_width.max(1)),
        tuning.cell_size / u32_to_f32(data.tile_height.max(1)),
    );
    for object in &data.objects {
        builder.add_object(object, pixel_scale);
    }

    let Builder { mut level, spawn, .. } = builder;
    if let Some(point) = spawn {
        level.set_spawn(point);
    } else {
        warn!("map `{name}` has no player spawn; starting at the origin");
    }
    info!("built level `{name}` with {} tiles", level.len());
    level
}

struct Builder<'a> {
    level: Level,
    data: &'a MapData,
    body_size: Vec2,
    rng: &'a mut StdRng,
    spawn: Option<Vec2>,
}

impl Builder<'_> {
    fn add_layer(&mut self, layer: &LayerData) {
        if !layer.visible {
            debug!("skipping hidden layer `{}`", layer.name);
            return;
        }
        if layer.width == 0 {
            debug!("skipping layer `{}` with zero width", layer.name);
            return;
        }
        let ragged = layer.data.len() % layer.width;
        if ragged != 0 {
            debug!(
                "layer `{}` ends with a partial row of {ragged} cell(s); ignoring it",
                layer.name
            );
        }
        let layer_role = Role::from_layer_name(&layer.name);
        let rows = layer.data.chunks_exact(layer.width);
        for (row, cells) in rows.enumerate() {
            for (column, gid) in cells.iter().enumerate() {
                if *gid != 0 {
                    self.add_cell(layer_role, *gid, column, row);
                }
            }
        }
    }

    fn add_cell(&mut self, layer_role: Role, gid: u32, column: usize, row: usize) {
        let rect = self
            .level
            .cell_rect(usize_to_f32(column), usize_to_f32(row));
        let data = self.data;
        let props = data.tiles.get(&gid);
        let role = match props.and_then(|p| p.kind.as_deref()) {
            Some(kind) => {
                if let Some(role) = Role::from_type(kind) {
                    role
                } else {
                    debug!("tile {gid} has unknown type `{kind}`; skipping cell ({column}, {row})");
                    return;
                }
            }
            None => layer_role,
        };
        if role == Role::Spawn {
            self.spawn = Some(Vec2::new(rect.left(), rect.bottom() - self.body_size.y));
            return;
        }
        let destination = props.and_then(|p| p.destination.as_deref());
        if let Some(tile) = self.make_tile(role, gid, rect, destination) {
            self.level.push(apply_mask(tile, props));
        }
    }

    fn add_object(&mut self, object: &ObjectData, pixel_scale: Vec2) {
        let at = Vec2::new(object.x, object.y) * pixel_scale;
        let Some(role) = Role::from_type(&object.kind) else {
            debug!("skipping object of unknown type `{}`", object.kind);
            return;
        };
        if role == Role::Spawn {
            self.spawn = Some(at);
            return;
        }
        let rect = Aabb::new(at, Vec2::splat(self.level.cell_size()));
        let destination = (!object.name.is_empty()).then_some(object.name.as_str());
        if let Some(tile) = self.make_tile(role, 0, rect, destination) {
            self.level.push(tile);
        }
    }

    fn make_tile(
        &mut self,
        role: Role,
        gid: u32,
        rect: Aabb,
        destination: Option<&str>,
    ) -> Option<Tile> {
        let tile = match role {
            Role::Solid => Tile::new(TileId(0), gid, rect).solid(),
            Role::Hazard => Tile::new(TileId(0), gid, rect).hazard(),
            Role::Decor => Tile::new(TileId(0), gid, rect),
            Role::Item(kind) => item_tile(rect, gid, kind, ItemPhase::World, self.rng),
            Role::Chest => {
                Tile::new(TileId(0), gid, rect).with_kind(TileKind::Chest(ChestState::Closed))
            }
            Role::Teleport => {
                let Some(target) = destination else {
                    debug!("skipping teleport at {:?} without a destination", rect.min);
                    return None;
                };
                Tile::new(TileId(0), gid, rect).with_kind(TileKind::Teleport {
                    destination: target.to_owned(),
                    state: TeleportState::Idle,
                })
            }
            Role::Spawn => return None,
        };
        Some(tile)
    }
}

fn apply_mask(tile: Tile, props: Option<&TileProperties>) -> Tile {
    let Some(rows) = props.and_then(|p| p.mask.as_ref()) else {
        return tile;
    };
    let source = Mask::from_rows(rows);
    if source.width() == 0 || source.height() == 0 {
        debug!("ignoring empty mask on tile {}", tile.gid);
        return tile;
    }
    let scaled = source.scaled(
        extent_to_usize(tile.rect.size.x),
        extent_to_usize(tile.rect.size.y),
    );
    tile.with_mask(scaled)
}
