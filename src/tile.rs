//! Level tiles and their kind-specific state.
//!
//! Every tile carries two static attributes, `solid` and `hazard`, fixed when
//! the level is built. Interactive tiles additionally carry a [`TileKind`]
//! payload whose state only ever moves forward (an item is picked up, a chest
//! is opened, a teleport is armed). Behaviour for each kind lives in
//! [`crate::interact`].

use std::fmt;

use glam::Vec2;

use crate::geometry::Aabb;
use crate::mask::Mask;

/// Index of a tile within its level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub usize);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile#{}", self.0)
    }
}

/// Flavour of a collectable item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// Authored in the map; opens chests.
    Gem,
    /// Spilled from opened chests.
    Coin,
}

/// Where an item is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemPhase {
    /// Lying in the level, waiting to be touched.
    World,
    /// Trailing behind the player.
    PickedUp,
    /// Consumed by a chest; no longer drawn or updated.
    Collected,
}

/// State of an item tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemState {
    /// Item flavour.
    pub kind: ItemKind,
    /// Lifecycle phase.
    pub phase: ItemPhase,
    /// Fraction of the remaining distance covered per tick while trailing.
    /// Drawn once when the item is created.
    pub ease: f32,
}

/// State of a chest tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChestState {
    /// Waiting for a key item.
    Closed,
    /// Opened; stays that way.
    Opened,
}

/// State of a teleport tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeleportState {
    /// Ready to be used.
    Idle,
    /// Fade-out in progress toward the destination.
    Armed,
}

/// Kind-specific payload of a tile.
#[derive(Debug, Clone, PartialEq)]
pub enum TileKind {
    /// Plain grid tile: a floor, wall, hazard or decoration.
    Static,
    /// Collectable item.
    Item(ItemState),
    /// Chest that trades one carried item for coins.
    Chest(ChestState),
    /// Door to another level.
    Teleport {
        /// Level name to load.
        destination: String,
        /// Arming state.
        state: TeleportState,
    },
}

/// One placed tile.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    /// Index within the owning level.
    pub id: TileId,
    /// Source tile identifier from the map, used to pick an image.
    pub gid: u32,
    /// World rectangle. Only trailing items ever move.
    pub rect: Aabb,
    /// Blocks movement.
    pub solid: bool,
    /// Kills on pixel contact.
    pub hazard: bool,
    /// Pixel mask at world scale.
    pub mask: Mask,
    /// Kind-specific payload.
    pub kind: TileKind,
}

impl Tile {
    /// A static tile with a fully opaque mask.
    #[must_use]
    pub fn new(id: TileId, gid: u32, rect: Aabb) -> Self {
        Self {
            id,
            gid,
            rect,
            solid: false,
            hazard: false,
            mask: Mask::full_for(rect.size),
            kind: TileKind::Static,
        }
    }

    /// Marks the tile as solid.
    #[must_use]
    pub fn solid(mut self) -> Self {
        self.solid = true;
        self
    }

    /// Marks the tile as a hazard.
    #[must_use]
    pub fn hazard(mut self) -> Self {
        self.hazard = true;
        self
    }

    /// Replaces the mask.
    #[must_use]
    pub fn with_mask(mut self, mask: Mask) -> Self {
        self.mask = mask;
        self
    }

    /// Replaces the kind payload.
    #[must_use]
    pub fn with_kind(mut self, kind: TileKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether a use action can currently change this tile.
    #[must_use]
    pub const fn is_usable(&self) -> bool {
        matches!(
            self.kind,
            TileKind::Chest(ChestState::Closed)
                | TileKind::Teleport {
                    state: TeleportState::Idle,
                    ..
                }
        )
    }

    /// Whether `target` is close enough to use this tile.
    #[must_use]
    pub fn in_use_range(&self, target: &Aabb, radius: f32) -> bool {
        self.rect.inflated(radius).intersects(target)
    }

    /// Item state, when this tile is an item.
    #[must_use]
    pub const fn item(&self) -> Option<&ItemState> {
        match &self.kind {
            TileKind::Item(state) => Some(state),
            _ => None,
        }
    }

    /// Whether the tile should still be drawn and simulated.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        !matches!(
            self.kind,
            TileKind::Item(ItemState {
                phase: ItemPhase::Collected,
                ..
            })
        )
    }

    /// Centre of the tile.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }
}
