//! Per-tick input snapshot.
//!
//! The front-end samples its keyboard once per tick into an [`InputSnapshot`]
//! and hands it to [`crate::game::GameState::tick`]. The simulation never
//! talks to an input library directly.

/// Pressed state of every game action for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "This struct represents the pressed state of exactly nine actions."
)]
pub struct InputSnapshot {
    /// Move left.
    pub left: bool,
    /// Move right.
    pub right: bool,
    /// Jump.
    pub jump: bool,
    /// Sprint modifier.
    pub sprint: bool,
    /// Crouch; sampled but has no effect.
    pub crouch: bool,
    /// Interact with a chest or teleport.
    pub use_action: bool,
    /// Toggle the debug overlay.
    pub debug: bool,
    /// Restart the current level.
    pub restart: bool,
    /// Leave the game.
    pub quit: bool,
}

/// Actions that fire once per press rather than while held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputEdges {
    /// `use` went from released to pressed.
    pub use_action: bool,
    /// `debug` went from released to pressed.
    pub debug: bool,
    /// `restart` went from released to pressed.
    pub restart: bool,
}

impl InputSnapshot {
    /// Rising edges relative to the previous tick's snapshot.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilehop::input::InputSnapshot;
    ///
    /// let held = InputSnapshot { use_action: true, ..Default::default() };
    /// assert!(held.edges_since(&InputSnapshot::default()).use_action);
    /// assert!(!held.edges_since(&held).use_action);
    /// ```
    #[must_use]
    pub const fn edges_since(&self, previous: &Self) -> InputEdges {
        InputEdges {
            use_action: self.use_action && !previous.use_action,
            debug: self.debug && !previous.debug,
            restart: self.restart && !previous.restart,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holding_produces_a_single_edge() {
        let idle = InputSnapshot::default();
        let pressed = InputSnapshot {
            restart: true,
            debug: true,
            ..InputSnapshot::default()
        };
        let first = pressed.edges_since(&idle);
        assert!(first.restart && first.debug);
        assert_eq!(pressed.edges_since(&pressed), InputEdges::default());
    }
}
