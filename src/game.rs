//! Per-level game context and the fixed-step tick.
//!
//! A [`GameState`] owns everything that lives for one level: the level
//! tiles, the player body, the camera, the trailing items, the transit slot
//! and the random source. Restarting or travelling never patches a state in
//! place; a fresh state is built from the map and the old one is dropped.

use glam::Vec2;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::body::Body;
use crate::camera::Camera;
use crate::collision::{fell_out_of, resolve_axis, touches_hazard, Axis};
use crate::config::{GameConfig, PhysicsTuning};
use crate::geometry::Aabb;
use crate::input::InputSnapshot;
use crate::interact::{item_extent, item_tile, on_update, on_use, Interaction, Transit};
use crate::level::Level;
use crate::map::{build_level, load_level, MapData, MapError, MapSource};
use crate::presentation::{DrawCommand, Frame, SpriteRef};
use crate::tile::{ChestState, ItemKind, ItemPhase, TeleportState, TileId, TileKind};

/// What the driver should do after a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep ticking this state.
    Continue,
    /// The player is dead; wait for a restart.
    Died,
    /// Rebuild the current level.
    Restart,
    /// Leave the game.
    Quit,
    /// A teleport fade finished; load `destination`.
    Travel {
        /// Level to load.
        destination: String,
    },
}

/// Item kinds carried from one level state into the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    kinds: Vec<ItemKind>,
}

impl Inventory {
    /// Inventory holding `kinds`, oldest first.
    #[must_use]
    pub const fn new(kinds: Vec<ItemKind>) -> Self {
        Self { kinds }
    }

    /// Carried kinds, oldest first.
    #[must_use]
    pub fn kinds(&self) -> &[ItemKind] {
        &self.kinds
    }

    /// Number of carried items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether nothing is carried.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

/// Mutable context for one level.
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    tuning: PhysicsTuning,
    level: Level,
    body: Option<Body>,
    camera: Camera,
    trail: Vec<TileId>,
    transit: Option<Transit>,
    rng: StdRng,
    previous: InputSnapshot,
    debug_overlay: bool,
    ticks: u64,
}

impl GameState {
    /// Starts `level` with an empty inventory and a freshly seeded random
    /// source.
    ///
    /// The level is expected to have been built with `config.tuning()`.
    #[must_use]
    pub fn new(config: GameConfig, level: Level) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::assemble(config, level, rng, &Inventory::default(), InputSnapshot::default())
    }

    /// Builds the level from authored data and starts it.
    #[must_use]
    pub fn from_map(config: GameConfig, name: &str, data: &MapData) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let level = build_level(name, data, &config.tuning(), &mut rng);
        Self::assemble(config, level, rng, &Inventory::default(), InputSnapshot::default())
    }

    /// Loads level `name` from `source` and starts it.
    ///
    /// # Errors
    ///
    /// Returns the source's [`MapError`] when the map cannot be loaded.
    pub fn load(config: GameConfig, source: &dyn MapSource, name: &str) -> Result<Self, MapError> {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let level = load_level(source, name, &config.tuning(), &mut rng)?;
        Ok(Self::assemble(config, level, rng, &Inventory::default(), InputSnapshot::default()))
    }

    /// A fresh state for the current level.
    ///
    /// Trailing items come along when `keep_inventory_on_restart` is set.
    /// The last input snapshot carries over, so a key still held from this
    /// state is not seen as a fresh press by the new one.
    ///
    /// # Errors
    ///
    /// Returns the source's [`MapError`] when the map cannot be reloaded.
    pub fn restart(&self, source: &dyn MapSource) -> Result<Self, MapError> {
        let inventory = if self.config.keep_inventory_on_restart {
            self.inventory()
        } else {
            Inventory::default()
        };
        info!("restarting `{}` carrying {} item(s)", self.level.name(), inventory.len());
        self.successor(source, self.level.name(), &inventory)
    }

    /// A fresh state for `destination`, carrying every trailing item.
    ///
    /// # Errors
    ///
    /// Returns the source's [`MapError`] when the map cannot be loaded.
    pub fn travel(&self, source: &dyn MapSource, destination: &str) -> Result<Self, MapError> {
        let inventory = self.inventory();
        info!(
            "travelling from `{}` to `{destination}` carrying {} item(s)",
            self.level.name(),
            inventory.len()
        );
        self.successor(source, destination, &inventory)
    }

    fn successor(
        &self,
        source: &dyn MapSource,
        name: &str,
        inventory: &Inventory,
    ) -> Result<Self, MapError> {
        let mut rng = self.rng.clone();
        let level = load_level(source, name, &self.tuning, &mut rng)?;
        Ok(Self::assemble(
            self.config.clone(),
            level,
            rng,
            inventory,
            self.previous,
        ))
    }

    fn assemble(
        config: GameConfig,
        mut level: Level,
        mut rng: StdRng,
        inventory: &Inventory,
        previous: InputSnapshot,
    ) -> Self {
        let tuning = config.tuning();
        let body = Body::new(level.spawn(), tuning.body_size);
        let mut camera = Camera::new(
            config.screen,
            config.camera_borders,
            config.dead_zone,
            config.centering(),
        );
        camera.update(&body.rect());

        let center = body.rect().center();
        let mut trail = Vec::with_capacity(inventory.len());
        for kind in inventory.kinds() {
            let mut rect = Aabb::new(Vec2::ZERO, Vec2::splat(item_extent(*kind, tuning.cell_size)));
            rect.set_center(center);
            let tile = item_tile(rect, 0, *kind, ItemPhase::PickedUp, &mut rng);
            trail.push(level.push_loose(tile));
        }

        Self {
            config,
            tuning,
            level,
            body: Some(body),
            camera,
            trail,
            transit: None,
            rng,
            previous,
            debug_overlay: false,
            ticks: 0,
        }
    }

    /// Advances the simulation by one fixed step.
    pub fn tick(&mut self, input: &InputSnapshot) -> TickOutcome {
        let edges = input.edges_since(&self.previous);
        self.previous = *input;
        if input.quit {
            return TickOutcome::Quit;
        }
        if edges.restart {
            return TickOutcome::Restart;
        }
        if edges.debug {
            self.debug_overlay = !self.debug_overlay;
            debug!("debug overlay {}", if self.debug_overlay { "on" } else { "off" });
        }

        let Some(body) = self.body.as_mut() else {
            return TickOutcome::Died;
        };
        body.integrate(input, &self.tuning);
        resolve_axis(body, self.level.solid_rects(), Axis::X);
        resolve_axis(body, self.level.solid_rects(), Axis::Y);

        let margin = self.level.cell_size();
        if touches_hazard(body, self.level.hazards()) {
            info!("player hit a hazard at {:?}", body.position());
            self.body = None;
            return TickOutcome::Died;
        }
        if fell_out_of(body, &self.level.bounds(), margin) {
            info!("player fell out of `{}`", self.level.name());
            self.body = None;
            return TickOutcome::Died;
        }

        self.run_tiles(edges.use_action);

        let outcome = self.advance_transit();

        if let Some(body) = self.body.as_mut() {
            self.camera.update(&body.rect());
            body.animate();
        }
        self.ticks += 1;
        outcome
    }

    fn run_tiles(&mut self, use_pressed: bool) {
        let Some(body) = self.body.as_ref() else {
            return;
        };
        let mut spawned = Vec::new();
        let mut ctx = Interaction {
            body,
            tuning: &self.tuning,
            trail: &mut self.trail,
            transit: &mut self.transit,
            rng: &mut self.rng,
            spawned: &mut spawned,
        };
        for index in 0..self.level.len() {
            on_update(&mut self.level, TileId(index), &mut ctx);
        }
        if use_pressed {
            for index in 0..self.level.len() {
                on_use(&mut self.level, TileId(index), &mut ctx);
            }
        }
        for tile in spawned {
            self.level.push_loose(tile);
        }
    }

    fn advance_transit(&mut self) -> TickOutcome {
        let Some(transit) = self.transit.as_mut() else {
            return TickOutcome::Continue;
        };
        if !transit.advance(self.tuning.fade_ticks) {
            return TickOutcome::Continue;
        }
        let teleport = transit.teleport;
        let destination = transit.destination.clone();
        self.transit = None;
        if let Some(TileKind::Teleport { state, .. }) =
            self.level.tile_mut(teleport).map(|tile| &mut tile.kind)
        {
            *state = TeleportState::Idle;
        }
        info!("transit to `{destination}` complete");
        TickOutcome::Travel { destination }
    }

    /// Describes what to draw for the current state.
    #[must_use]
    pub fn frame(&self) -> Frame {
        let mut commands = Vec::with_capacity(self.level.len() + 2);
        for tile in self.level.tiles().iter().filter(|tile| tile.is_present()) {
            let sprite = match &tile.kind {
                TileKind::Static => SpriteRef::Tile { gid: tile.gid },
                TileKind::Item(item) => SpriteRef::Item { kind: item.kind },
                TileKind::Chest(state) => SpriteRef::Chest {
                    opened: *state == ChestState::Opened,
                },
                TileKind::Teleport { state, .. } => SpriteRef::Teleport {
                    armed: *state == TeleportState::Armed,
                },
            };
            commands.push(self.place(sprite, tile.rect.min, tile.rect.size));
        }
        if let Some(body) = &self.body {
            let sprite = SpriteRef::Player {
                facing_left: body.facing_left,
                frame: body.animation_frame(),
            };
            commands.push(self.place(sprite, body.position(), body.size()));
            if self.debug_overlay {
                commands.push(self.place(SpriteRef::Hitbox, body.position(), body.size()));
                for rect in self.level.solid_rects() {
                    commands.push(self.place(SpriteRef::Hitbox, rect.min, rect.size));
                }
            }
        }
        Frame {
            commands,
            fade: self.transit.as_ref().map_or(0.0, |transit| transit.progress),
        }
    }

    fn place(&self, sprite: SpriteRef, world: Vec2, size: Vec2) -> DrawCommand {
        DrawCommand {
            sprite,
            position: self.camera.to_screen(world),
            size,
        }
    }

    /// Kinds of the trailing items, oldest first.
    #[must_use]
    pub fn inventory(&self) -> Inventory {
        Inventory::new(
            self.trail
                .iter()
                .filter_map(|id| self.level.tile(*id))
                .filter_map(|tile| tile.item().map(|item| item.kind))
                .collect(),
        )
    }

    /// Configuration the state was built with.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Scaled constants in use.
    #[must_use]
    pub const fn tuning(&self) -> &PhysicsTuning {
        &self.tuning
    }

    /// Current level.
    #[must_use]
    pub const fn level(&self) -> &Level {
        &self.level
    }

    /// The player body; `None` once the player has died.
    #[must_use]
    pub const fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// Mutable access to the living player body.
    pub fn body_mut(&mut self) -> Option<&mut Body> {
        self.body.as_mut()
    }

    /// Whether the player is still alive.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.body.is_some()
    }

    /// The box-scroll camera.
    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Trailing item ids, oldest first.
    #[must_use]
    pub fn trail(&self) -> &[TileId] {
        &self.trail
    }

    /// Running level transition, if any.
    #[must_use]
    pub const fn transit(&self) -> Option<&Transit> {
        self.transit.as_ref()
    }

    /// Whether the debug overlay is shown.
    #[must_use]
    pub const fn debug_overlay(&self) -> bool {
        self.debug_overlay
    }

    /// Ticks simulated since the state was built.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// A running game: the current level state plus the map source used to
/// rebuild it.
///
/// [`Session::step`] ticks the state and performs the level swaps a
/// [`TickOutcome`] asks for, so front-ends only poll input and draw.
#[cfg_attr(feature = "render", derive(bevy::prelude::Resource))]
pub struct Session {
    state: GameState,
    source: Box<dyn MapSource>,
}

impl Session {
    /// Wraps an already started state.
    #[must_use]
    pub fn new(state: GameState, source: Box<dyn MapSource>) -> Self {
        Self { state, source }
    }

    /// Loads level `name` from `source` and starts a session on it.
    ///
    /// # Errors
    ///
    /// Returns the source's [`MapError`] when the map cannot be loaded.
    pub fn start(
        config: GameConfig,
        source: Box<dyn MapSource>,
        name: &str,
    ) -> Result<Self, MapError> {
        let state = GameState::load(config, source.as_ref(), name)?;
        Ok(Self::new(state, source))
    }

    /// Current level state.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Ticks once, then restarts or travels when the outcome says so.
    ///
    /// # Errors
    ///
    /// Returns a [`MapError`] when the next level cannot be loaded; the
    /// current state is left untouched.
    pub fn step(&mut self, input: &InputSnapshot) -> Result<TickOutcome, MapError> {
        let outcome = self.state.tick(input);
        match &outcome {
            TickOutcome::Restart => {
                self.state = self.state.restart(self.source.as_ref())?;
            }
            TickOutcome::Travel { destination } => {
                self.state = self.state.travel(self.source.as_ref(), destination)?;
            }
            TickOutcome::Continue | TickOutcome::Died | TickOutcome::Quit => {}
        }
        Ok(outcome)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
