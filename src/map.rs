//! Hex map: grid generation, geography palette, tile instancing.
//!
//! Everything runs once at startup; the debug overlay is the only
//! per-frame work.

mod entities;
mod generator;
mod hex_map_layout;
mod materializer;
mod startup_systems;
mod systems;

pub use entities::{
    Geography, GeographyKind, GeographyMaterials, GeographyPalette, HexMap, HexTile, MapRng,
    SubBiome,
};
pub use generator::{HexMapGenerator, SavannaStub, SubBiomeClassifier};
pub use hex_map_layout::HexMapLayout;
pub use materializer::{CommandsSink, PlacedTile, TILE_SURFACE_NAME, TileShape, TileSink, tile_name};
pub use startup_systems::build_hex_map;

use bevy::prelude::*;

use crate::GameState;

/// Nested configuration for the map subsystem.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct HexMapConfig {
    /// Grid layout settings.
    pub grid: GridSettings,
    /// Seed for palette and geography draws. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Radius around the camera within which debug labels are drawn.
    pub label_distance: f32,
}

/// Grid layout parameters.
#[derive(Clone, Debug, Reflect)]
pub struct GridSettings {
    /// Number of hex rings around the centre cell (91 cells at 5).
    pub radius: u32,
    /// Centre-to-corner size of one hex in world units.
    pub hex_size: f32,
    /// World-space position of the centre cell.
    pub origin: Vec2,
}

impl Default for HexMapConfig {
    fn default() -> Self {
        Self {
            grid: GridSettings {
                radius: 5,
                hex_size: 1.0,
                origin: Vec2::ZERO,
            },
            seed: None,
            label_distance: 30.0,
        }
    }
}

/// Map plugin: generates the grid and spawns one tile per cell at startup.
pub struct HexMapPlugin(pub HexMapConfig);

impl Plugin for HexMapPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<HexMapConfig>()
            .register_type::<HexTile>()
            .register_type::<HexMap>()
            .insert_resource(self.0.clone())
            .insert_resource(MapRng::from_seed(self.0.seed))
            .add_systems(Startup, startup_systems::spawn_hex_map);

        app.add_systems(
            Update,
            systems::draw_tile_labels.run_if(in_state(GameState::Debugging)),
        );
    }
}
