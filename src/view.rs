//! Static viewpoint over the map: one orbit-placed camera and a sun light.

use bevy::prelude::*;

use crate::math;

/// Per-plugin configuration for the camera and light.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct ViewConfig {
    /// Distance from the camera to the map centre.
    pub camera_distance: f32,
    /// Azimuth around the vertical axis, measured from +X (degrees).
    pub camera_alpha: f32,
    /// Tilt away from straight-down (degrees).
    pub camera_beta: f32,
    /// Illuminance of the downward sun light (lux).
    pub light_illuminance: f32,
    /// Background clear color.
    pub clear_color: Color,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            camera_distance: 18.0,
            camera_alpha: 90.0,
            camera_beta: 45.0,
            light_illuminance: 8_000.0,
            clear_color: Color::srgb(0.2, 0.2, 0.3),
        }
    }
}

/// Marker for the map camera.
#[derive(Component, Reflect)]
pub struct MapCamera;

/// Camera + light plugin.
pub struct ViewPlugin(pub ViewConfig);

impl Plugin for ViewPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<ViewConfig>()
            .register_type::<MapCamera>()
            .insert_resource(self.0.clone())
            .insert_resource(ClearColor(self.0.clear_color))
            .add_systems(Startup, spawn_view);
    }
}

/// Spawns the camera looking at the map centre and a light shining straight down.
fn spawn_view(mut commands: Commands, cfg: Res<ViewConfig>) {
    let eye = math::orbit_position(
        Vec3::ZERO,
        cfg.camera_distance,
        cfg.camera_alpha.to_radians(),
        cfg.camera_beta.to_radians(),
    );
    commands.spawn((
        Name::new("MapCamera"),
        Camera3d::default(),
        Transform::from_translation(eye).looking_at(Vec3::ZERO, Vec3::Y),
        MapCamera,
    ));

    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: cfg.light_illuminance,
            ..default()
        },
        Transform::from_xyz(0.0, 10.0, 0.0).looking_at(Vec3::ZERO, Vec3::Z),
    ));
}
