use glam::{IVec2, UVec2, Vec2};
use pirate_flow_core::{Event, TilePosition, WorldPoint};

use crate::RenderingError;

/// Largest viewport extent, in tiles, along either axis.
pub const MAX_VIEWPORT_TILES: u32 = 512;

/// Viewport onto the map that moves in whole-tile steps.
///
/// The camera follows the player by replaying every `PlayerMoved` event and
/// never scrolls past the edges of the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Camera {
    origin: IVec2,
    viewport: UVec2,
    world: UVec2,
}

impl Camera {
    /// Creates a camera at the top-left corner of the world.
    pub fn new(viewport: UVec2, world: UVec2) -> Result<Self, RenderingError> {
        if viewport.x == 0 || viewport.y == 0 {
            return Err(RenderingError::EmptyViewport {
                columns: viewport.x,
                rows: viewport.y,
            });
        }
        if viewport.x > MAX_VIEWPORT_TILES || viewport.y > MAX_VIEWPORT_TILES {
            return Err(RenderingError::OversizedViewport {
                columns: viewport.x,
                rows: viewport.y,
            });
        }

        Ok(Self {
            origin: IVec2::ZERO,
            viewport,
            world,
        })
    }

    /// Moves the camera so `focus` sits as close to the center as the edges allow.
    #[must_use]
    pub fn centered_on(mut self, focus: TilePosition) -> Self {
        let half = (self.viewport / 2).as_ivec2();
        self.origin = IVec2::new(focus.column(), focus.row()) - half;
        self.clamp();
        self
    }

    /// Tile shown in the top-left corner of the viewport.
    #[must_use]
    pub const fn origin(&self) -> IVec2 {
        self.origin
    }

    /// Viewport size in tiles.
    #[must_use]
    pub const fn viewport(&self) -> UVec2 {
        self.viewport
    }

    /// Scrolls alongside every player move contained in `events`.
    pub fn track(&mut self, events: &[Event]) {
        for event in events {
            if let Event::PlayerMoved { from, to } = event {
                self.origin += IVec2::new(to.column() - from.column(), to.row() - from.row());
                self.clamp();
            }
        }
    }

    /// Reports whether the tile is inside the viewport.
    #[must_use]
    pub fn contains(&self, position: TilePosition) -> bool {
        let relative = IVec2::new(position.column(), position.row()) - self.origin;
        relative.cmpge(IVec2::ZERO).all() && relative.cmplt(self.viewport.as_ivec2()).all()
    }

    /// Converts a world point into viewport-relative tile units.
    #[must_use]
    pub fn to_view(&self, point: WorldPoint) -> Vec2 {
        Vec2::new(point.x(), point.y()) - self.origin.as_vec2()
    }

    fn clamp(&mut self) {
        let limit = (self.world.as_ivec2() - self.viewport.as_ivec2()).max(IVec2::ZERO);
        self.origin = self.origin.clamp(IVec2::ZERO, limit);
    }
}
