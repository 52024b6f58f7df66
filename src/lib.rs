#![cfg_attr(docsrs, feature(doc_cfg))]
//! Core of a tile-based side-scrolling platformer.
//!
//! The crate simulates one level at a time at a fixed step: a kinematic
//! player body, axis-separated collision against a static tile grid, pixel
//! mask hazards, a box-scroll camera and a handful of interactive tiles
//! (items, chests, teleports). Windowing, input polling and drawing live
//! behind the optional `render` feature; the simulation itself only consumes
//! an [`InputSnapshot`] per tick and produces a [`Frame`] to draw.
//!
//! ```
//! use tilehop::prelude::*;
//!
//! let map = MapData::from_json(
//!     "demo",
//!     r#"{ "layers": [{ "name": "ground", "width": 4, "data": [0,0,0,0, 1,1,1,1] }],
//!          "objects": [{ "type": "spawn", "x": 16, "y": 0 }] }"#,
//! )?;
//! let mut game = GameState::from_map(GameConfig::default(), "demo", &map);
//! for _ in 0..30 {
//!     assert_eq!(game.tick(&InputSnapshot::default()), TickOutcome::Continue);
//! }
//! assert!(game.body().is_some_and(|body| body.on_ground));
//! # Ok::<(), tilehop::map::MapError>(())
//! ```
pub mod body;
pub mod camera;
pub mod collision;
pub mod config;
pub mod constants;
pub mod game;
pub mod geometry;
pub mod input;
pub mod interact;
pub mod level;
pub mod logging;
pub mod map;
pub mod mask;
pub mod numeric;
pub mod presentation;
pub mod tile;

pub use body::Body;
pub use camera::Camera;
pub use collision::{resolve_axis, Axis};
pub use config::{ConfigError, DeadZoneMode, GameConfig, PhysicsTuning, ScreenSize};
pub use game::{GameState, Inventory, Session, TickOutcome};
pub use geometry::Aabb;
pub use input::InputSnapshot;
pub use level::Level;
pub use logging::init as init_logging;
pub use map::{DirectoryMapSource, MapData, MapError, MapSource};
pub use presentation::{DrawCommand, Frame, SpriteRef};
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub use presentation::PresentationPlugin;
pub use tile::{Tile, TileId, TileKind};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use tilehop::prelude::*;
    //! ```

    pub use crate::body::Body;
    pub use crate::config::{GameConfig, PhysicsTuning};
    pub use crate::game::{GameState, TickOutcome};
    pub use crate::geometry::Aabb;
    pub use crate::input::InputSnapshot;
    pub use crate::map::{MapData, MapSource};
    pub use glam::Vec2;
}
