//! Hex map viewer binary.

use bevy::app::AppExit;
use bevy::prelude::*;
#[cfg(feature = "native")]
use bevy::remote::{RemotePlugin, http::RemoteHttpPlugin};
use bevy_inspector_egui::quick::WorldInspectorPlugin;
#[cfg(feature = "native")]
use clap::Parser;

use hex_map::GameState;
use hex_map::map::{HexMapConfig, HexMapPlugin};
use hex_map::view::{ViewConfig, ViewPlugin};

/// Command-line overrides for the map settings.
#[cfg(feature = "native")]
#[derive(Parser, Debug)]
#[command(version, about = "Procedural hex map viewer")]
struct Cli {
    /// Number of hex rings around the centre cell.
    #[arg(long)]
    radius: Option<u32>,
    /// Centre-to-corner size of one hex.
    #[arg(long)]
    hex_size: Option<f32>,
    /// Seed for reproducible maps.
    #[arg(long)]
    seed: Option<u64>,
}

#[cfg(feature = "native")]
impl Cli {
    fn apply(self, mut cfg: HexMapConfig) -> HexMapConfig {
        if let Some(radius) = self.radius {
            cfg.grid.radius = radius;
        }
        if let Some(hex_size) = self.hex_size {
            cfg.grid.hex_size = hex_size;
        }
        cfg.seed = self.seed.or(cfg.seed);
        cfg
    }
}

fn map_config() -> HexMapConfig {
    #[cfg(feature = "native")]
    {
        Cli::parse().apply(HexMapConfig::default())
    }
    #[cfg(not(feature = "native"))]
    {
        HexMapConfig::default()
    }
}

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Hex Map".into(),
            ..default()
        }),
        ..default()
    }))
    .register_type::<GameState>()
    .init_state::<GameState>()
    .add_plugins(bevy_egui::EguiPlugin::default())
    .add_plugins(HexMapPlugin(map_config()))
    .add_plugins(ViewPlugin(ViewConfig::default()))
    .add_systems(Update, exit_on_esc)
    .add_systems(Update, toggle_inspector)
    .add_plugins(WorldInspectorPlugin::new().run_if(in_state(GameState::Debugging)));

    #[cfg(feature = "native")]
    app.add_plugins(RemotePlugin::default())
        .add_plugins(RemoteHttpPlugin::default());

    app.run();
}

fn toggle_inspector(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        next.set(match state.get() {
            GameState::Running => GameState::Debugging,
            GameState::Debugging => GameState::Running,
        });
    }
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
