use bevy::log::debug;
use bevy::prelude::*;
use hexx::Hex;
use rand::Rng;

use super::entities::{Geography, GeographyKind, GeographyPalette, HexTile, SubBiome};
use super::hex_map_layout::HexMapLayout;
use super::materializer::{PlacedTile, TileSink, tile_name};
use crate::error::MapError;

/// Assigns a finer climate classification to a hex.
///
/// Called once per cell, in traversal order, after its geography is known.
pub trait SubBiomeClassifier {
    /// Classification for `hex`, which was assigned `geography`.
    fn classify(&self, layout: &HexMapLayout, geography: &Geography, hex: Hex) -> SubBiome;
}

/// Placeholder classifier: every hex is tree savanna.
#[derive(Debug, Clone, Copy, Default)]
pub struct SavannaStub;

impl SubBiomeClassifier for SavannaStub {
    fn classify(&self, _layout: &HexMapLayout, _geography: &Geography, _hex: Hex) -> SubBiome {
        SubBiome {
            climate_id: "savanna".into(),
            biome_id: "tropical-savanna".into(),
            sub_biome_id: "tree-savanna".into(),
            dimension: 1,
        }
    }
}

/// Walks a [`HexMapLayout`] and turns every cell into a [`HexTile`].
#[derive(Debug, Clone, Default)]
pub struct HexMapGenerator<C = SavannaStub> {
    classifier: C,
}

impl HexMapGenerator {
    /// Generator using [`SavannaStub`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: SubBiomeClassifier> HexMapGenerator<C> {
    /// Generator using a custom classifier.
    pub fn with_classifier(classifier: C) -> Self {
        Self { classifier }
    }

    /// Geography for `hex`: flatland on the centre cell, uniformly random elsewhere.
    pub fn assign<'p>(
        &self,
        layout: &HexMapLayout,
        palette: &'p GeographyPalette,
        hex: Hex,
        rng: &mut impl Rng,
    ) -> Result<&'p Geography, MapError> {
        if hex == layout.center() {
            return palette
                .get(GeographyKind::Flatland)
                .ok_or(MapError::NoGeography(GeographyKind::Flatland));
        }
        palette.choose(rng).ok_or(MapError::EmptyPalette)
    }

    /// Assigns, classifies and places every cell in traversal order.
    ///
    /// Stops at the first error; tiles already placed stay in the sink.
    /// Returns the number of tiles placed.
    pub fn populate(
        &self,
        layout: &HexMapLayout,
        palette: &GeographyPalette,
        sink: &mut impl TileSink,
        rng: &mut impl Rng,
    ) -> Result<usize, MapError> {
        let mut placed = 0;
        for hex in layout.iter() {
            let geography = self.assign(layout, palette, hex, rng)?;
            let sub_biome = self.classifier.classify(layout, geography, hex);
            let pos = layout.hex_to_world_pos(hex);
            sink.place(PlacedTile {
                name: tile_name(hex),
                translation: Vec3::new(pos.x, 0.0, pos.y),
                tile: HexTile {
                    hex,
                    geography: geography.kind,
                    sub_biome,
                },
            });
            placed += 1;
        }
        debug!("placed {placed} hex tiles");
        Ok(placed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{GridSettings, HexMapConfig};
    use bevy::platform::collections::HashSet;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn layout(radius: u32) -> HexMapLayout {
        HexMapLayout::from_settings(&GridSettings {
            radius,
            ..HexMapConfig::default().grid
        })
    }

    fn generate(radius: u32, seed: u64) -> Result<Vec<PlacedTile>, MapError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let palette = GeographyPalette::generate(&mut rng);
        let mut tiles = Vec::new();
        HexMapGenerator::new().populate(&layout(radius), &palette, &mut tiles, &mut rng)?;
        Ok(tiles)
    }

    #[test]
    fn one_tile_per_cell() {
        let grid = layout(5);
        let tiles = generate(5, 1).unwrap();
        assert_eq!(tiles.len(), 91);
        let hexes: HashSet<Hex> = tiles.iter().map(|t| t.tile.hex).collect();
        assert_eq!(hexes.len(), 91);
        assert!(grid.iter().all(|h| hexes.contains(&h)));
    }

    #[test]
    fn radius_zero_yields_single_flatland() {
        let tiles = generate(0, 2).unwrap();
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].tile.hex, Hex::ZERO);
        assert_eq!(tiles[0].tile.geography, GeographyKind::Flatland);
    }

    #[test]
    fn centre_is_always_flatland() {
        for seed in 0..20 {
            let tiles = generate(4, seed).unwrap();
            let centre = tiles.iter().find(|t| t.tile.hex == Hex::ZERO).unwrap();
            assert_eq!(centre.tile.geography, GeographyKind::Flatland);
            assert!(centre.translation.length() < 1e-6);
        }
    }

    #[test]
    fn surrounding_cells_are_mixed() {
        let tiles = generate(5, 3).unwrap();
        let kinds: HashSet<GeographyKind> = tiles.iter().map(|t| t.tile.geography).collect();
        assert!(kinds.len() > 10, "only {} kinds in 91 cells", kinds.len());
    }

    #[test]
    fn missing_flatland_places_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let palette = GeographyPalette::generate(&mut rng).without(GeographyKind::Flatland);
        let mut tiles: Vec<PlacedTile> = Vec::new();
        let result = HexMapGenerator::new().populate(&layout(5), &palette, &mut tiles, &mut rng);
        assert_eq!(result, Err(MapError::NoGeography(GeographyKind::Flatland)));
        assert!(tiles.is_empty());
    }

    #[test]
    fn empty_palette_fails_off_centre() {
        let grid = HexMapLayout::from_cells(&HexMapConfig::default().grid, [Hex::new(1, 0)]);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut tiles: Vec<PlacedTile> = Vec::new();
        let result =
            HexMapGenerator::new().populate(&grid, &GeographyPalette::default(), &mut tiles, &mut rng);
        assert_eq!(result, Err(MapError::EmptyPalette));
        assert!(tiles.is_empty());
    }

    #[test]
    fn failure_mid_traversal_keeps_earlier_tiles() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let palette = GeographyPalette::generate(&mut rng).without(GeographyKind::Flatland);
        let grid = HexMapLayout::from_cells(
            &HexMapConfig::default().grid,
            [Hex::new(1, 0), Hex::ZERO, Hex::new(0, 1)],
        );
        let mut partial: Vec<PlacedTile> = Vec::new();
        let err = HexMapGenerator::new().populate(&grid, &palette, &mut partial, &mut rng);
        assert_eq!(err, Err(MapError::NoGeography(GeographyKind::Flatland)));
        assert_eq!(partial.len(), 1);
        assert_eq!(partial[0].tile.hex, Hex::new(1, 0));
    }

    #[test]
    fn repeated_generation_differs_but_keeps_shape() {
        let a = generate(5, 10).unwrap();
        let b = generate(5, 11).unwrap();
        assert_eq!(a.len(), b.len());
        assert_eq!(a[0].tile.geography, GeographyKind::Flatland);
        assert_eq!(b[0].tile.geography, GeographyKind::Flatland);
        let same = a
            .iter()
            .zip(&b)
            .filter(|(x, y)| x.tile.geography == y.tile.geography)
            .count();
        assert!(same < a.len(), "two seeds produced identical maps");
    }

    #[test]
    fn stub_classifier_is_constant() {
        let tiles = generate(3, 7).unwrap();
        for t in &tiles {
            assert_eq!(t.tile.sub_biome.climate_id, "savanna");
            assert_eq!(t.tile.sub_biome.biome_id, "tropical-savanna");
            assert_eq!(t.tile.sub_biome.sub_biome_id, "tree-savanna");
            assert_eq!(t.tile.sub_biome.dimension, 1);
        }
    }

    struct RingClassifier;

    impl SubBiomeClassifier for RingClassifier {
        fn classify(&self, layout: &HexMapLayout, geography: &Geography, hex: Hex) -> SubBiome {
            SubBiome {
                climate_id: geography.kind.to_string(),
                biome_id: String::new(),
                sub_biome_id: String::new(),
                dimension: layout.center().distance_to(hex),
            }
        }
    }

    #[test]
    fn classifier_can_be_swapped() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let palette = GeographyPalette::generate(&mut rng);
        let mut tiles: Vec<PlacedTile> = Vec::new();
        HexMapGenerator::with_classifier(RingClassifier)
            .populate(&layout(2), &palette, &mut tiles, &mut rng)
            .unwrap();
        for t in &tiles {
            assert_eq!(t.tile.sub_biome.dimension, Hex::ZERO.distance_to(t.tile.hex));
            assert_eq!(t.tile.sub_biome.climate_id, t.tile.geography.name());
        }
    }
}
