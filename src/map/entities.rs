use std::fmt;
use std::str::FromStr;

use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use hexx::Hex;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::MapError;
use crate::math;

/// Closed alphabet of terrain categories a hex can be assigned.
///
/// Variant names are the terrain names; see [`GeographyKind::name`].
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum GeographyKind {
    /// Guaranteed geography of the map's centre cell.
    Flatland,
    Hills,
    Mountains,
    Plateau,
    Canyon,
    Valley,
    Desert,
    Dunes,
    Steppe,
    Savanna,
    Prairie,
    Forest,
    Rainforest,
    Jungle,
    Taiga,
    Tundra,
    Glacier,
    Swamp,
    Marsh,
    Wetland,
    Lake,
    River,
    Coast,
    Beach,
    Reef,
    Volcano,
    Badlands,
}

impl GeographyKind {
    /// Every kind, `Flatland` first.
    pub const ALL: [Self; 27] = [
        Self::Flatland,
        Self::Hills,
        Self::Mountains,
        Self::Plateau,
        Self::Canyon,
        Self::Valley,
        Self::Desert,
        Self::Dunes,
        Self::Steppe,
        Self::Savanna,
        Self::Prairie,
        Self::Forest,
        Self::Rainforest,
        Self::Jungle,
        Self::Taiga,
        Self::Tundra,
        Self::Glacier,
        Self::Swamp,
        Self::Marsh,
        Self::Wetland,
        Self::Lake,
        Self::River,
        Self::Coast,
        Self::Beach,
        Self::Reef,
        Self::Volcano,
        Self::Badlands,
    ];

    /// Stable lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Flatland => "flatland",
            Self::Hills => "hills",
            Self::Mountains => "mountains",
            Self::Plateau => "plateau",
            Self::Canyon => "canyon",
            Self::Valley => "valley",
            Self::Desert => "desert",
            Self::Dunes => "dunes",
            Self::Steppe => "steppe",
            Self::Savanna => "savanna",
            Self::Prairie => "prairie",
            Self::Forest => "forest",
            Self::Rainforest => "rainforest",
            Self::Jungle => "jungle",
            Self::Taiga => "taiga",
            Self::Tundra => "tundra",
            Self::Glacier => "glacier",
            Self::Swamp => "swamp",
            Self::Marsh => "marsh",
            Self::Wetland => "wetland",
            Self::Lake => "lake",
            Self::River => "river",
            Self::Coast => "coast",
            Self::Beach => "beach",
            Self::Reef => "reef",
            Self::Volcano => "volcano",
            Self::Badlands => "badlands",
        }
    }
}

impl fmt::Display for GeographyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeographyKind {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| MapError::UnknownGeography(s.to_owned()))
    }
}

/// A terrain category paired with its colour, channels in `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Geography {
    /// Terrain category.
    pub kind: GeographyKind,
    /// `[red, green, blue]`, each in `[0, 100]`.
    pub channels: [u8; 3],
}

impl Geography {
    /// Rolls a bright, non-washed-out colour for `kind`.
    ///
    /// Each channel is drawn from `[0, 100]` and lifted into `[50, 100]`,
    /// then one channel is toned down by 30 when the sum exceeds 115.
    pub fn roll(kind: GeographyKind, rng: &mut impl Rng) -> Self {
        let raw: [u8; 3] = std::array::from_fn(|_| rng.gen_range(0..=math::CHANNEL_MAX));
        let lifted = raw.map(math::brighten_channel);
        let channels = math::correct_saturation(lifted, rng.gen_range(0.0..1.0));
        Self { kind, channels }
    }

    /// Channels normalised to an sRGB colour.
    pub fn color(&self) -> Color {
        let [r, g, b] = self.channels.map(math::normalize_channel);
        Color::srgb(r, g, b)
    }
}

/// Geographies available to a map, at most one per kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeographyPalette {
    entries: Vec<Geography>,
}

impl GeographyPalette {
    /// One freshly rolled geography per kind of the full alphabet.
    pub fn generate(rng: &mut impl Rng) -> Self {
        Self {
            entries: GeographyKind::ALL
                .into_iter()
                .map(|kind| Geography::roll(kind, rng))
                .collect(),
        }
    }

    /// Builds a palette from explicit entries; later duplicates of a kind are dropped.
    pub fn from_entries(entries: impl IntoIterator<Item = Geography>) -> Self {
        let mut palette = Self::default();
        for geo in entries {
            if palette.get(geo.kind).is_none() {
                palette.entries.push(geo);
            }
        }
        palette
    }

    /// Copy of this palette with `kind` removed.
    pub fn without(&self, kind: GeographyKind) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|g| g.kind != kind)
                .cloned()
                .collect(),
        }
    }

    /// Entry for `kind`, if present.
    pub fn get(&self, kind: GeographyKind) -> Option<&Geography> {
        self.entries.iter().find(|g| g.kind == kind)
    }

    /// Uniformly random entry; `None` when empty.
    pub fn choose(&self, rng: &mut impl Rng) -> Option<&Geography> {
        self.entries.choose(rng)
    }

    /// All entries in alphabet order.
    pub fn iter(&self) -> impl Iterator<Item = &Geography> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no geography is available.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Finer climate classification attached to a single hex.
#[derive(Debug, Clone, PartialEq, Eq, Reflect)]
pub struct SubBiome {
    /// Climate zone id.
    pub climate_id: String,
    /// Biome id within the climate.
    pub biome_id: String,
    /// Sub-biome id within the biome.
    pub sub_biome_id: String,
    /// Size class of the sub-biome.
    pub dimension: i32,
}

/// One materialised map cell.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
pub struct HexTile {
    /// Axial coordinate of the cell.
    pub hex: Hex,
    /// Assigned terrain category.
    pub geography: GeographyKind,
    /// Assigned climate classification.
    pub sub_biome: SubBiome,
}

/// Root entity parenting every [`HexTile`].
#[derive(Component, Debug, Reflect)]
pub struct HexMap {
    /// Number of tiles spawned under this root.
    pub tiles: usize,
}

/// Random source for palette and geography draws.
#[derive(Resource)]
pub struct MapRng(pub ChaCha8Rng);

impl MapRng {
    /// Seeded when `seed` is given, otherwise from OS entropy.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(ChaCha8Rng::seed_from_u64(seed)),
            None => Self(ChaCha8Rng::from_entropy()),
        }
    }
}

/// One shared material handle per palette geography.
#[derive(Resource, Default)]
pub struct GeographyMaterials {
    /// Lookup from kind to material.
    pub map: HashMap<GeographyKind, Handle<StandardMaterial>>,
}
