//! Render-independent frame description.
//!
//! The simulation never draws. Each tick it can describe what should be on
//! screen as a flat list of [`DrawCommand`]s in screen coordinates (y grows
//! downwards, origin at the top-left), which a front-end maps onto whatever
//! images and window it owns. The optional [`PresentationPlugin`] does this
//! with bevy when the `render` feature is enabled.

#[cfg(feature = "render")]
mod plugin;

#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub use plugin::{keyboard_snapshot, PresentationPlugin, TICKS_PER_SECOND};

use glam::Vec2;

use crate::tile::ItemKind;

/// What to draw for one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteRef {
    /// Plain map tile by source identifier.
    Tile {
        /// Source tile identifier.
        gid: u32,
    },
    /// Item lying in the level or trailing the player.
    Item {
        /// Item flavour.
        kind: ItemKind,
    },
    /// Chest.
    Chest {
        /// Whether the chest has been opened.
        opened: bool,
    },
    /// Teleport door.
    Teleport {
        /// Whether the fade toward its destination is running.
        armed: bool,
    },
    /// The player.
    Player {
        /// Mirror the sprite horizontally.
        facing_left: bool,
        /// Walk-cycle frame.
        frame: u32,
    },
    /// Debug outline of a collision rectangle.
    Hitbox,
}

/// One sprite placed on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    /// What to draw.
    pub sprite: SpriteRef,
    /// Screen position of the top-left corner.
    pub position: Vec2,
    /// Size in screen pixels.
    pub size: Vec2,
}

/// Everything to draw for one tick, in back-to-front order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// Sprites to draw.
    pub commands: Vec<DrawCommand>,
    /// Fade-to-black amount in `[0, 1]` while a teleport is running.
    pub fade: f32,
}

impl Frame {
    /// The player sprite, when the player is alive.
    #[must_use]
    pub fn player(&self) -> Option<&DrawCommand> {
        self.commands
            .iter()
            .find(|command| matches!(command.sprite, SpriteRef::Player { .. }))
    }

    /// Number of commands whose sprite satisfies `predicate`.
    #[must_use]
    pub fn count_matching(&self, predicate: impl Fn(&SpriteRef) -> bool) -> usize {
        self.commands
            .iter()
            .filter(|command| predicate(&command.sprite))
            .count()
    }
}
