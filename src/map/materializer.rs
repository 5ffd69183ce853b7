use bevy::asset::RenderAssetUsages;
use bevy::log::warn;
use bevy::mesh::Indices;
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;
use hexx::Hex;

use super::entities::{GeographyMaterials, HexTile};
use super::hex_map_layout::HexMapLayout;
use crate::error::MapError;
use crate::math;

/// Name of the mesh-carrying child under every tile root.
pub const TILE_SURFACE_NAME: &str = "hexSurface";

/// Scene name of the tile at `hex`: `"hexTile"` followed by `q` then `r`.
///
/// Names are unique while both coordinates stay within one digit (radius ≤ 9).
pub fn tile_name(hex: Hex) -> String {
    format!("hexTile{}{}", hex.x, hex.y)
}

/// A tile ready to be placed: payload, scene name, and ground-plane position.
#[derive(Debug, Clone)]
pub struct PlacedTile {
    /// Scene name, see [`tile_name`].
    pub name: String,
    /// World position; `y` is always 0.
    pub translation: Vec3,
    /// Hex payload.
    pub tile: HexTile,
}

/// Destination for materialised tiles.
///
/// The generator only appends; a sink never sees a tile twice.
pub trait TileSink {
    /// Adds one tile to the scene.
    fn place(&mut self, placed: PlacedTile);
}

impl TileSink for Vec<PlacedTile> {
    fn place(&mut self, placed: PlacedTile) {
        self.push(placed);
    }
}

/// Hex outline captured once from the centre cell and shared by every tile.
#[derive(Debug, Clone, PartialEq)]
pub struct TileShape {
    /// Corner offsets relative to the hex centre.
    pub corners: [Vec2; 6],
}

impl TileShape {
    /// Reads the centre cell's corners.
    ///
    /// Fails when the map has no centre cell, or when its outline has no area
    /// (zero or non-finite hex size).
    pub fn capture(layout: &HexMapLayout) -> Result<Self, MapError> {
        let center = layout.center();
        let corners = layout
            .corners(center)
            .ok_or(MapError::MissingTemplateHex(center))?;
        let origin = layout.hex_to_world_pos(center);
        let corners = corners.map(|c| c - origin);
        if corners.iter().any(|c| !c.is_finite() || c.length() <= f32::EPSILON) {
            return Err(MapError::DegenerateTemplate(center));
        }
        Ok(Self { corners })
    }

    /// Flat fan mesh of the outline on the XZ plane.
    pub fn mesh(&self) -> Mesh {
        let fan = math::hex_fan(&self.corners);
        Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::RENDER_WORLD,
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, fan.positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, fan.normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, fan.uvs)
        .with_inserted_indices(Indices::U16(fan.indices))
    }
}

/// Spawns tiles as ECS entities under a shared root.
///
/// Each tile is a root entity carrying [`HexTile`], its name and transform,
/// with one child surface holding the shared mesh and its geography's material.
pub struct CommandsSink<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    root: Entity,
    mesh: Handle<Mesh>,
    materials: &'a GeographyMaterials,
    missing_materials: usize,
}

impl<'a, 'w, 's> CommandsSink<'a, 'w, 's> {
    /// Sink parenting tiles under `root`.
    pub fn new(
        commands: &'a mut Commands<'w, 's>,
        root: Entity,
        mesh: Handle<Mesh>,
        materials: &'a GeographyMaterials,
    ) -> Self {
        Self {
            commands,
            root,
            mesh,
            materials,
            missing_materials: 0,
        }
    }

    /// Tiles placed with the fallback material because their geography had none.
    pub fn missing_materials(&self) -> usize {
        self.missing_materials
    }
}

impl TileSink for CommandsSink<'_, '_, '_> {
    fn place(&mut self, placed: PlacedTile) {
        let material = match self.materials.map.get(&placed.tile.geography) {
            Some(material) => material.clone(),
            None => {
                warn!(
                    "no material for geography `{}` on {}",
                    placed.tile.geography, placed.name
                );
                self.missing_materials += 1;
                Handle::default()
            }
        };

        let surface = self
            .commands
            .spawn((
                Name::new(TILE_SURFACE_NAME),
                Mesh3d(self.mesh.clone()),
                MeshMaterial3d(material),
                Transform::default(),
            ))
            .id();

        let tile = self
            .commands
            .spawn((
                placed.tile,
                Name::new(placed.name),
                Transform::from_translation(placed.translation),
                Visibility::default(),
            ))
            .add_child(surface)
            .id();
        self.commands.entity(self.root).add_child(tile);
    }
}
