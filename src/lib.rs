#![warn(missing_docs)]
//! Procedural hex map viewer.
//!
//! Lays out a flat-top hexagonal grid, rolls a palette of terrain colours,
//! assigns every cell a geography (flatland at the centre, random elsewhere)
//! and spawns one tile per cell into the scene.

pub mod error;
pub mod map;
pub mod math;
pub mod view;

use bevy::prelude::*;

/// Application-wide state, used for system scheduling.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum GameState {
    /// Map on screen, no overlays.
    #[default]
    Running,
    /// Debug overlay active (Tab to toggle).
    Debugging,
}
