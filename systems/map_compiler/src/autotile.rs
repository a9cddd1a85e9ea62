//! Neighbor signatures and the sprite-variant lookup used for autotiling.

use std::{
    collections::{BTreeSet, HashSet},
    fmt,
    str::FromStr,
};

use pirate_flow_core::SpriteKey;
use thiserror::Error;

/// Initials of the four orthogonal neighbors of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NeighborSignature {
    left: char,
    right: char,
    top: char,
    bottom: char,
}

impl NeighborSignature {
    /// Creates a signature from the neighbors' terrain initials.
    #[must_use]
    pub const fn new(left: char, right: char, top: char, bottom: char) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Initial of the western neighbor.
    #[must_use]
    pub const fn left(&self) -> char {
        self.left
    }

    /// Initial of the eastern neighbor.
    #[must_use]
    pub const fn right(&self) -> char {
        self.right
    }

    /// Initial of the northern neighbor.
    #[must_use]
    pub const fn top(&self) -> char {
        self.top
    }

    /// Initial of the southern neighbor.
    #[must_use]
    pub const fn bottom(&self) -> char {
        self.bottom
    }
}

impl fmt::Display for NeighborSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}{}", self.left, self.right, self.top, self.bottom)
    }
}

/// Sprite variant of a tile selected by its neighbor signature.
///
/// Renders as `{tile}-{signature}`, for example `sand-wwsw`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariantKey {
    tile: String,
    signature: NeighborSignature,
}

impl VariantKey {
    /// Creates a variant key for a tile name and signature.
    #[must_use]
    pub fn new(tile: impl Into<String>, signature: NeighborSignature) -> Self {
        Self {
            tile: tile.into(),
            signature,
        }
    }

    /// Tile name the variant belongs to.
    #[must_use]
    pub fn tile(&self) -> &str {
        &self.tile
    }

    /// Neighbor signature the variant was drawn for.
    #[must_use]
    pub const fn signature(&self) -> NeighborSignature {
        self.signature
    }

    /// Sprite asset name for the variant.
    #[must_use]
    pub fn to_sprite_key(&self) -> SpriteKey {
        SpriteKey::new(self.to_string())
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.tile, self.signature)
    }
}

/// Error returned when a sprite name does not describe a tile variant.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("sprite name `{0}` is not a tile variant")]
pub struct ParseVariantKeyError(String);

impl FromStr for VariantKey {
    type Err = ParseVariantKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseVariantKeyError(value.to_owned());
        let (tile, signature) = value.rsplit_once('-').ok_or_else(invalid)?;
        if tile.is_empty() {
            return Err(invalid());
        }

        let initials: Vec<char> = signature.chars().collect();
        let [left, right, top, bottom] = initials.as_slice() else {
            return Err(invalid());
        };

        Ok(Self::new(
            tile,
            NeighborSignature::new(*left, *right, *top, *bottom),
        ))
    }
}

/// Answers whether a sprite asset exists for a tile variant.
pub trait SpriteVariants {
    /// Reports whether the variant can be drawn.
    fn contains_variant(&self, key: &VariantKey) -> bool;
}

impl SpriteVariants for HashSet<VariantKey> {
    fn contains_variant(&self, key: &VariantKey) -> bool {
        self.contains(key)
    }
}

impl SpriteVariants for BTreeSet<VariantKey> {
    fn contains_variant(&self, key: &VariantKey) -> bool {
        self.contains(key)
    }
}

impl SpriteVariants for HashSet<String> {
    fn contains_variant(&self, key: &VariantKey) -> bool {
        self.contains(key.to_string().as_str())
    }
}

impl SpriteVariants for BTreeSet<String> {
    fn contains_variant(&self, key: &VariantKey) -> bool {
        self.contains(key.to_string().as_str())
    }
}
