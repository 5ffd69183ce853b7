use bevy::platform::collections::HashSet;
use bevy::prelude::*;
use hexx::{Hex, HexLayout, HexOrientation};

use crate::map::GridSettings;

/// Flat-top hex layout plus the ordered set of cells making up the map.
///
/// Cells are stored in spiral order: the centre first, then each ring
/// outward. Traversal order is stable for a given radius.
pub struct HexMapLayout {
    layout: HexLayout,
    unit_corners: [Vec2; 6],
    center: Hex,
    cells: Vec<Hex>,
    index: HashSet<Hex>,
}

impl HexMapLayout {
    /// Builds the filled hexagon of `g.radius` rings around the centre cell.
    pub fn from_settings(g: &GridSettings) -> Self {
        Self::from_cells(g, Hex::ZERO.spiral_range(0..=g.radius))
    }

    /// Layout over an explicit cell list, kept in the given order.
    pub fn from_cells(g: &GridSettings, cells: impl IntoIterator<Item = Hex>) -> Self {
        let layout = HexLayout {
            orientation: HexOrientation::Flat,
            origin: g.origin,
            scale: Vec2::splat(g.hex_size),
            ..default()
        };
        let unit_corners = layout.center_aligned_hex_corners();
        let unit_corners: [Vec2; 6] = std::array::from_fn(|i| unit_corners[i]);

        let mut index = HashSet::new();
        let cells = cells.into_iter().filter(|hex| index.insert(*hex)).collect();

        Self {
            layout,
            unit_corners,
            center: Hex::ZERO,
            cells,
            index,
        }
    }

    // ── Traversal ──────────────────────────────────────────────────

    /// The designated centre cell (axial `(0, 0)`).
    pub fn center(&self) -> Hex {
        self.center
    }

    /// Cells in spiral order.
    pub fn iter(&self) -> impl Iterator<Item = Hex> + '_ {
        self.cells.iter().copied()
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the map has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether this hex is part of the map.
    pub fn contains(&self, hex: &Hex) -> bool {
        self.index.contains(hex)
    }

    /// The cell at `hex`, if it is part of the map.
    pub fn get(&self, hex: Hex) -> Option<Hex> {
        self.contains(&hex).then_some(hex)
    }

    // ── Coordinate conversion ──────────────────────────────────────

    /// World-space 2D position of a hex centre.
    pub fn hex_to_world_pos(&self, hex: Hex) -> Vec2 {
        self.layout.hex_to_world_pos(hex)
    }

    /// Hex coordinate under a world-space 2D position.
    pub fn world_pos_to_hex(&self, pos: Vec2) -> Hex {
        self.layout.world_pos_to_hex(pos)
    }

    /// Corner offsets relative to any hex centre (all hexes are congruent).
    pub fn unit_corners(&self) -> &[Vec2; 6] {
        &self.unit_corners
    }

    /// World-space corners of a map cell; `None` outside the map.
    pub fn corners(&self, hex: Hex) -> Option<[Vec2; 6]> {
        let center = self.hex_to_world_pos(self.get(hex)?);
        Some(self.unit_corners.map(|c| center + c))
    }
}
