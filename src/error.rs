//! Errors raised while building a hex map.

use hexx::Hex;
use thiserror::Error;

use crate::map::GeographyKind;

/// Failure while generating or materialising a hex map.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapError {
    /// The palette has no entry for a geography the map requires.
    #[error("no geography `{0}` in palette")]
    NoGeography(GeographyKind),
    /// The palette is empty, so no random geography can be drawn.
    #[error("geography palette is empty")]
    EmptyPalette,
    /// The grid has no cell to capture the tile template from.
    #[error("no template hex at ({}, {})", .0.x, .0.y)]
    MissingTemplateHex(Hex),
    /// The template cell's outline has no area (zero or non-finite hex size).
    #[error("degenerate template hex at ({}, {})", .0.x, .0.y)]
    DegenerateTemplate(Hex),
    /// A geography name outside the fixed alphabet.
    #[error("unknown geography `{0}`")]
    UnknownGeography(String),
}
