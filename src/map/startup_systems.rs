use bevy::log::{error, info};
use bevy::prelude::*;
use rand::Rng;

use super::HexMapConfig;
use super::entities::{Geography, GeographyMaterials, GeographyPalette, HexMap, MapRng};
use super::generator::HexMapGenerator;
use super::hex_map_layout::HexMapLayout;
use super::materializer::{CommandsSink, TileShape};
use crate::error::MapError;

// ── Startup ─────────────────────────────────────────────────────────

/// Builds the whole map once. Failures are logged; a partial map stays in the scene.
pub fn spawn_hex_map(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<HexMapConfig>,
    mut rng: ResMut<MapRng>,
) {
    match build_hex_map(&mut commands, &mut meshes, &mut materials, &cfg, &mut rng.0) {
        Ok(tiles) => info!("hex map ready: {tiles} tiles, radius {}", cfg.grid.radius),
        Err(err) => error!("hex map generation failed: {err}"),
    }
}

/// Rolls the palette, lays out the grid and spawns one tile per cell.
///
/// Returns the number of tiles spawned.
pub fn build_hex_map(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    cfg: &HexMapConfig,
    rng: &mut impl Rng,
) -> Result<usize, MapError> {
    let palette = GeographyPalette::generate(rng);
    let layout = HexMapLayout::from_settings(&cfg.grid);
    let shape = TileShape::capture(&layout)?;
    let mesh = meshes.add(shape.mesh());

    let geo_materials = GeographyMaterials {
        map: palette
            .iter()
            .map(|geo| (geo.kind, materials.add(geography_material(geo))))
            .collect(),
    };

    let root = commands
        .spawn((
            Name::new("HexMap"),
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    let tiles = {
        let mut sink = CommandsSink::new(commands, root, mesh, &geo_materials);
        HexMapGenerator::new().populate(&layout, &palette, &mut sink, rng)?
    };

    commands.entity(root).insert(HexMap { tiles });
    commands.insert_resource(geo_materials);
    Ok(tiles)
}

/// Double-sided material in the geography's colour.
fn geography_material(geo: &Geography) -> StandardMaterial {
    StandardMaterial {
        base_color: geo.color(),
        perceptual_roughness: 0.9,
        cull_mode: None,
        double_sided: true,
        ..default()
    }
}
