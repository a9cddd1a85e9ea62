//! Symbol dictionary describing every tile a level may reference.

use std::collections::BTreeMap;

/// Initial used for tiles whose name is empty.
const UNNAMED_INITIAL: char = '?';

/// Describes a single symbol declared by a level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileDescriptor {
    name: String,
    passable: bool,
    complex: bool,
    alias: Option<char>,
}

impl TileDescriptor {
    /// Creates a descriptor from its raw fields.
    #[must_use]
    pub fn new(name: impl Into<String>, passable: bool, complex: bool, alias: Option<char>) -> Self {
        Self {
            name: name.into(),
            passable,
            complex,
            alias,
        }
    }

    /// Plain terrain that renders directly.
    #[must_use]
    pub fn terrain(name: impl Into<String>, passable: bool) -> Self {
        Self::new(name, passable, false, None)
    }

    /// Entity marker that renders as the terrain declared under `alias`.
    #[must_use]
    pub fn complex(name: impl Into<String>, alias: char) -> Self {
        Self::new(name, false, true, Some(alias))
    }

    /// Tile name, such as `water` or `cannon`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reports whether actors may move onto the tile.
    #[must_use]
    pub const fn passable(&self) -> bool {
        self.passable
    }

    /// Reports whether the tile spawns an entity.
    #[must_use]
    pub const fn is_complex(&self) -> bool {
        self.complex
    }

    /// Symbol whose terrain replaces this tile in the render grid.
    #[must_use]
    pub const fn alias(&self) -> Option<char> {
        self.alias
    }

    pub(crate) fn initial(&self) -> char {
        self.name.chars().next().unwrap_or(UNNAMED_INITIAL)
    }
}

/// Mapping from single-character symbols to tile descriptors.
///
/// The default symbol names the terrain used as the fallback appearance and
/// as the look of the impassable void beyond the map edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileCatalog {
    entries: BTreeMap<char, TileDescriptor>,
    default_symbol: char,
}

impl TileCatalog {
    /// Creates an empty catalog whose default terrain is `default_symbol`.
    #[must_use]
    pub fn new(default_symbol: char) -> Self {
        Self {
            entries: BTreeMap::new(),
            default_symbol,
        }
    }

    /// Declares a symbol, returning the descriptor it replaced.
    pub fn insert(&mut self, symbol: char, descriptor: TileDescriptor) -> Option<TileDescriptor> {
        self.entries.insert(symbol, descriptor)
    }

    /// Builder-style variant of [`TileCatalog::insert`].
    #[must_use]
    pub fn with_tile(mut self, symbol: char, descriptor: TileDescriptor) -> Self {
        let _ = self.insert(symbol, descriptor);
        self
    }

    /// Descriptor declared for `symbol`, if any.
    #[must_use]
    pub fn get(&self, symbol: char) -> Option<&TileDescriptor> {
        self.entries.get(&symbol)
    }

    /// Symbol of the default terrain.
    #[must_use]
    pub const fn default_symbol(&self) -> char {
        self.default_symbol
    }

    /// Number of declared symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether no symbols are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_previous_declaration() {
        let mut catalog = TileCatalog::new('.');
        assert!(catalog
            .insert('.', TileDescriptor::terrain("water", true))
            .is_none());

        let replaced = catalog.insert('.', TileDescriptor::terrain("lagoon", true));

        assert_eq!(replaced.map(|tile| tile.name().to_owned()), Some("water".to_owned()));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn complex_tiles_carry_their_alias() {
        let cannon = TileDescriptor::complex("cannon", '#');

        assert!(cannon.is_complex());
        assert_eq!(cannon.alias(), Some('#'));
        assert_eq!(cannon.initial(), 'c');
    }

    #[test]
    fn unnamed_tiles_use_placeholder_initial() {
        assert_eq!(TileDescriptor::terrain("", true).initial(), UNNAMED_INITIAL);
    }
}
