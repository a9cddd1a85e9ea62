use pirate_flow_core::{CollectibleKind, TilePosition, WorldPoint};

/// Item lying on the map until the player sails over it.
///
/// Picked items are removed from the registry, so a live collectible is by
/// definition uncollected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Collectible {
    position: TilePosition,
    kind: CollectibleKind,
}

impl Collectible {
    pub(crate) const fn new(position: TilePosition, kind: CollectibleKind) -> Self {
        Self { position, kind }
    }

    pub(crate) const fn position(&self) -> TilePosition {
        self.position
    }

    pub(crate) const fn kind(&self) -> CollectibleKind {
        self.kind
    }

    pub(crate) fn touches(&self, point: WorldPoint) -> bool {
        self.position.to_point().reaches(point)
    }
}
