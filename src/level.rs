//! A loaded level: tiles on a uniform grid plus the player spawn point.
//!
//! Solid and hazard membership is an attribute lookup on each tile; there
//! are no live groups to keep in sync. A level is never patched in place on
//! restart, a fresh one is built from the map instead.

use glam::Vec2;

use crate::geometry::Aabb;
use crate::mask::Mask;
use crate::tile::{Tile, TileId};

/// Tiles, spawn point and extent of one level.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    name: String,
    cell_size: f32,
    tiles: Vec<Tile>,
    spawn: Vec2,
    bounds: Option<Aabb>,
}

impl Level {
    /// An empty level with the given grid cell size.
    #[must_use]
    pub fn new(name: impl Into<String>, cell_size: f32) -> Self {
        Self {
            name: name.into(),
            cell_size,
            tiles: Vec::new(),
            spawn: Vec2::ZERO,
            bounds: None,
        }
    }

    /// Level name as known to the map source.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Edge length of one grid cell in world pixels.
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// World rectangle of grid cell `(column, row)`.
    #[must_use]
    pub fn cell_rect(&self, column: f32, row: f32) -> Aabb {
        Aabb::from_xywh(
            column * self.cell_size,
            row * self.cell_size,
            self.cell_size,
            self.cell_size,
        )
    }

    /// Adds an authored tile, assigning it the next id and widening the
    /// level bounds to cover it.
    pub fn push(&mut self, tile: Tile) -> TileId {
        self.bounds = Some(match self.bounds {
            Some(bounds) => union(&bounds, &tile.rect),
            None => tile.rect,
        });
        self.push_loose(tile)
    }

    /// Adds a tile created during play, such as a spilled coin or a carried
    /// item. The level bounds are left as authored.
    pub fn push_loose(&mut self, mut tile: Tile) -> TileId {
        let id = TileId(self.tiles.len());
        tile.id = id;
        self.tiles.push(tile);
        id
    }

    /// All tiles in placement order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tile by id.
    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.0)
    }

    /// Mutable tile by id.
    pub fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.get_mut(id.0)
    }

    /// Number of tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the level has no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Rectangles of present solid tiles, in placement order.
    pub fn solid_rects(&self) -> impl Iterator<Item = &Aabb> + '_ {
        self.tiles
            .iter()
            .filter(|tile| tile.solid && tile.is_present())
            .map(|tile| &tile.rect)
    }

    /// Rectangles and masks of present hazard tiles.
    pub fn hazards(&self) -> impl Iterator<Item = (&Aabb, &Mask)> + '_ {
        self.tiles
            .iter()
            .filter(|tile| tile.hazard && tile.is_present())
            .map(|tile| (&tile.rect, &tile.mask))
    }

    /// Player spawn point (top-left of the body).
    #[must_use]
    pub const fn spawn(&self) -> Vec2 {
        self.spawn
    }

    /// Sets the player spawn point.
    pub fn set_spawn(&mut self, spawn: Vec2) {
        self.spawn = spawn;
    }

    /// Smallest rectangle containing every authored tile; empty levels
    /// report a zero-sized rectangle at the origin.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        self.bounds.unwrap_or_default()
    }
}

fn union(a: &Aabb, b: &Aabb) -> Aabb {
    let min = a.min.min(b.min);
    let max = a.max().max(b.max());
    Aabb::new(min, max - min)
}
