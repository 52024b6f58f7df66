//! Behaviour table for interactive tiles.
//!
//! [`on_update`] runs for every tile every tick and [`on_use`] runs for every
//! tile when the use action is pressed. Both dispatch on [`TileKind`]:
//!
//! | kind     | update                                   | use                                |
//! |----------|------------------------------------------|------------------------------------|
//! | item     | picked up on pixel contact; trails along | -                                  |
//! | chest    | -                                        | consumes one trailing item, spills coins |
//! | teleport | -                                        | arms the shared transit            |
//!
//! Trailing items form a leash chain rather than a queue: each one eases
//! toward the item picked up just before it, the first toward the player.

use glam::{IVec2, Vec2};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;

use crate::body::Body;
use crate::config::PhysicsTuning;
use crate::constants::{ITEM_EASE_MAX, ITEM_EASE_MIN};
use crate::geometry::Aabb;
use crate::level::Level;
use crate::numeric::{floor_to_i32, u32_to_f32};
use crate::tile::{ChestState, ItemKind, ItemPhase, ItemState, TeleportState, Tile, TileId, TileKind};

/// The single in-flight level transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Transit {
    /// Teleport that was used.
    pub teleport: TileId,
    /// Level to load when the fade completes.
    pub destination: String,
    /// Ticks the fade has run.
    pub elapsed: u32,
    /// Fade-out progress in `[0, 1]`.
    pub progress: f32,
}

impl Transit {
    /// Starts a transit at zero progress.
    #[must_use]
    pub fn new(teleport: TileId, destination: impl Into<String>) -> Self {
        Self {
            teleport,
            destination: destination.into(),
            elapsed: 0,
            progress: 0.0,
        }
    }

    /// Advances the fade by one tick; returns `true` once it has completed.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilehop::interact::Transit;
    /// use tilehop::tile::TileId;
    ///
    /// let mut transit = Transit::new(TileId(0), "cave");
    /// assert!(!transit.advance(2));
    /// assert_eq!(transit.progress, 0.5);
    /// assert!(transit.advance(2));
    /// ```
    pub fn advance(&mut self, fade_ticks: u32) -> bool {
        let total = fade_ticks.max(1);
        self.elapsed = self.elapsed.saturating_add(1).min(total);
        self.progress = u32_to_f32(self.elapsed) / u32_to_f32(total);
        self.elapsed == total
    }
}

/// Mutable game context handed to tile behaviour.
#[derive(Debug)]
pub struct Interaction<'a> {
    /// The player body, already resolved for this tick.
    pub body: &'a Body,
    /// Scaled gameplay constants.
    pub tuning: &'a PhysicsTuning,
    /// Picked-up items, oldest first.
    pub trail: &'a mut Vec<TileId>,
    /// Shared transit slot; at most one teleport may be armed.
    pub transit: &'a mut Option<Transit>,
    /// Source of per-item easing rates and coin scatter.
    pub rng: &'a mut StdRng,
    /// Tiles created this tick, appended to the level by the caller.
    pub spawned: &'a mut Vec<Tile>,
}

/// Draws a per-item easing rate.
pub fn random_ease(rng: &mut StdRng) -> f32 {
    rng.gen_range(ITEM_EASE_MIN..ITEM_EASE_MAX)
}

/// Edge length of an item of `kind` on a grid of `cell` pixels.
#[must_use]
pub const fn item_extent(kind: ItemKind, cell: f32) -> f32 {
    match kind {
        ItemKind::Gem => cell,
        ItemKind::Coin => cell * 0.5,
    }
}

/// Builds an item tile with a freshly drawn easing rate.
pub fn item_tile(rect: Aabb, gid: u32, kind: ItemKind, phase: ItemPhase, rng: &mut StdRng) -> Tile {
    Tile::new(TileId(0), gid, rect).with_kind(TileKind::Item(ItemState {
        kind,
        phase,
        ease: random_ease(rng),
    }))
}

/// Per-tick behaviour of tile `id`.
pub fn on_update(level: &mut Level, id: TileId, ctx: &mut Interaction<'_>) {
    let Some(tile) = level.tile(id) else {
        return;
    };
    let TileKind::Item(item) = tile.kind else {
        return;
    };
    match item.phase {
        ItemPhase::World => try_pick_up(level, id, ctx),
        ItemPhase::PickedUp => trail_item(level, id, item.ease, ctx),
        ItemPhase::Collected => {}
    }
}

fn try_pick_up(level: &mut Level, id: TileId, ctx: &mut Interaction<'_>) {
    let Some(tile) = level.tile_mut(id) else {
        return;
    };
    if tile.solid {
        return;
    }
    let delta = tile.rect.min - ctx.body.position();
    let offset = IVec2::new(floor_to_i32(delta.x), floor_to_i32(delta.y));
    if !ctx.body.mask().overlaps(&tile.mask, offset) {
        return;
    }
    if let TileKind::Item(item) = &mut tile.kind {
        item.phase = ItemPhase::PickedUp;
        ctx.trail.push(id);
        debug!("picked up {:?} {id}", item.kind);
    }
}

fn trail_item(level: &mut Level, id: TileId, ease: f32, ctx: &mut Interaction<'_>) {
    let Some(slot) = ctx.trail.iter().position(|held| *held == id) else {
        return;
    };
    let leader = slot
        .checked_sub(1)
        .and_then(|previous| ctx.trail.get(previous))
        .and_then(|previous| level.tile(*previous))
        .map_or_else(|| ctx.body.rect().center(), Tile::center);

    let Some(tile) = level.tile_mut(id) else {
        return;
    };
    let center = tile.center();
    if center.distance(leader) > ctx.tuning.item_leash {
        if let TileKind::Item(item) = &mut tile.kind {
            item.phase = ItemPhase::World;
        }
        ctx.trail.remove(slot);
        debug!("{id} slipped its leash at {center:?}");
        return;
    }
    tile.rect.set_center(center + (leader - center) * ease);
}

/// Use-action behaviour of tile `id`; returns `true` when the tile changed.
pub fn on_use(level: &mut Level, id: TileId, ctx: &mut Interaction<'_>) -> bool {
    let Some(tile) = level.tile(id) else {
        return false;
    };
    if !tile.is_usable() || !tile.in_use_range(&ctx.body.rect(), ctx.tuning.use_radius) {
        return false;
    }
    match &tile.kind {
        TileKind::Chest(_) => open_chest(level, id, ctx),
        TileKind::Teleport { destination, .. } => {
            let target = destination.clone();
            arm_teleport(level, id, target, ctx)
        }
        TileKind::Static | TileKind::Item(_) => false,
    }
}

fn open_chest(level: &mut Level, id: TileId, ctx: &mut Interaction<'_>) -> bool {
    let Some(key) = ctx.trail.pop() else {
        debug!("{id} stays shut: nothing to trade");
        return false;
    };
    if let Some(TileKind::Item(item)) = level.tile_mut(key).map(|tile| &mut tile.kind) {
        item.phase = ItemPhase::Collected;
    }
    let Some(chest) = level.tile_mut(id) else {
        return false;
    };
    chest.kind = TileKind::Chest(ChestState::Opened);
    let origin = chest.center();
    let cell = level.cell_size();

    for _ in 0..ctx.tuning.chest_coins {
        let scatter = Vec2::new(ctx.rng.gen_range(-cell..cell), ctx.rng.gen_range(-cell..0.0));
        let mut rect = Aabb::new(Vec2::ZERO, Vec2::splat(item_extent(ItemKind::Coin, cell)));
        rect.set_center(origin + scatter);
        ctx.spawned
            .push(item_tile(rect, 0, ItemKind::Coin, ItemPhase::World, ctx.rng));
    }
    info!("opened chest {id} with {key}; spilled {} coins", ctx.tuning.chest_coins);
    true
}

fn arm_teleport(level: &mut Level, id: TileId, destination: String, ctx: &mut Interaction<'_>) -> bool {
    if let Some(active) = ctx.transit.as_ref() {
        debug!("{id} ignored: {} already in transit", active.teleport);
        return false;
    }
    let Some(TileKind::Teleport { state, .. }) = level.tile_mut(id).map(|tile| &mut tile.kind)
    else {
        return false;
    };
    *state = TeleportState::Armed;
    info!("{id} armed toward {destination}");
    *ctx.transit = Some(Transit::new(id, destination));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    struct Harness {
        level: Level,
        body: Body,
        tuning: PhysicsTuning,
        trail: Vec<TileId>,
        transit: Option<Transit>,
        rng: StdRng,
        spawned: Vec<Tile>,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                level: Level::new("harness", 96.0),
                body: Body::new(Vec2::new(0.0, 0.0), Vec2::splat(80.0)),
                tuning: PhysicsTuning::default(),
                trail: Vec::new(),
                transit: None,
                rng: StdRng::seed_from_u64(1),
                spawned: Vec::new(),
            }
        }

        fn update(&mut self, id: TileId) {
            let mut ctx = Interaction {
                body: &self.body,
                tuning: &self.tuning,
                trail: &mut self.trail,
                transit: &mut self.transit,
                rng: &mut self.rng,
                spawned: &mut self.spawned,
            };
            on_update(&mut self.level, id, &mut ctx);
        }

        fn use_tile(&mut self, id: TileId) -> bool {
            let mut ctx = Interaction {
                body: &self.body,
                tuning: &self.tuning,
                trail: &mut self.trail,
                transit: &mut self.transit,
                rng: &mut self.rng,
                spawned: &mut self.spawned,
            };
            on_use(&mut self.level, id, &mut ctx)
        }

        fn add_item(&mut self, x: f32, y: f32) -> TileId {
            let rect = Aabb::from_xywh(x, y, 48.0, 48.0);
            let tile = item_tile(rect, 7, ItemKind::Gem, ItemPhase::World, &mut self.rng);
            self.level.push(tile)
        }

        fn phase(&self, id: TileId) -> Option<ItemPhase> {
            self.level.tile(id).and_then(Tile::item).map(|item| item.phase)
        }
    }

    #[test]
    fn touching_an_item_picks_it_up() {
        let mut harness = Harness::new();
        let item = harness.add_item(40.0, 40.0);
        harness.update(item);
        assert_eq!(harness.phase(item), Some(ItemPhase::PickedUp));
        assert_eq!(harness.trail, vec![item]);
    }

    #[test]
    fn solid_items_are_not_picked_up() {
        let mut harness = Harness::new();
        let item = harness.add_item(40.0, 40.0);
        if let Some(tile) = harness.level.tile_mut(item) {
            tile.solid = true;
        }
        harness.update(item);
        assert_eq!(harness.phase(item), Some(ItemPhase::World));
    }

    #[test]
    fn trailing_item_eases_toward_the_body() {
        let mut harness = Harness::new();
        let item = harness.add_item(40.0, 40.0);
        harness.update(item);
        let before = harness.level.tile(item).map(Tile::center).unwrap_or_default();
        harness.update(item);
        let after = harness.level.tile(item).map(Tile::center).unwrap_or_default();
        let target = harness.body.rect().center();
        assert!(after.distance(target) < before.distance(target));
    }

    #[test]
    fn items_beyond_the_leash_are_released() {
        let mut harness = Harness::new();
        let item = harness.add_item(40.0, 40.0);
        harness.update(item);
        harness.body = Body::new(Vec2::new(5000.0, 0.0), Vec2::splat(80.0));
        harness.update(item);
        assert_eq!(harness.phase(item), Some(ItemPhase::World));
        assert!(harness.trail.is_empty());
    }

    #[test]
    fn chest_trades_the_newest_item_for_coins() {
        let mut harness = Harness::new();
        let first = harness.add_item(10.0, 10.0);
        let second = harness.add_item(20.0, 20.0);
        harness.update(first);
        harness.update(second);
        let chest_rect = Aabb::from_xywh(96.0, 0.0, 96.0, 96.0);
        let chest = harness
            .level
            .push(Tile::new(TileId(0), 3, chest_rect).with_kind(TileKind::Chest(ChestState::Closed)));

        assert!(harness.use_tile(chest));
        assert_eq!(harness.phase(second), Some(ItemPhase::Collected));
        assert_eq!(harness.trail, vec![first]);
        assert_eq!(harness.spawned.len(), harness.tuning.chest_coins);
        assert!(!harness.use_tile(chest), "an opened chest stays opened");
    }

    #[test]
    fn chest_needs_an_item() {
        let mut harness = Harness::new();
        let chest_rect = Aabb::from_xywh(96.0, 0.0, 96.0, 96.0);
        let chest = harness
            .level
            .push(Tile::new(TileId(0), 3, chest_rect).with_kind(TileKind::Chest(ChestState::Closed)));
        assert!(!harness.use_tile(chest));
        assert!(harness.spawned.is_empty());
    }

    #[test]
    fn only_one_teleport_arms_at_a_time() {
        let mut harness = Harness::new();
        let door = |x: f32, name: &str| {
            Tile::new(TileId(0), 9, Aabb::from_xywh(x, 0.0, 96.0, 96.0)).with_kind(
                TileKind::Teleport {
                    destination: name.to_owned(),
                    state: TeleportState::Idle,
                },
            )
        };
        let left = harness.level.push(door(0.0, "cave"));
        let right = harness.level.push(door(40.0, "tower"));

        assert!(harness.use_tile(left));
        assert!(!harness.use_tile(right));
        assert_eq!(
            harness.transit.as_ref().map(|transit| transit.destination.as_str()),
            Some("cave")
        );
    }
}
