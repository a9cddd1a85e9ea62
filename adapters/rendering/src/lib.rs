#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering and audio contracts for Pirate Flow adapters.

mod camera;

pub use camera::{Camera, MAX_VIEWPORT_TILES};

use anyhow::Result as AnyResult;
use glam::{UVec2, Vec2};
use pirate_flow_core::{
    ActorKind, ActorView, AudioCue, Event, HudSnapshot, MapGrid, SpriteKey, TilePosition,
};
use std::{error::Error, fmt};

/// Terrain tile placed in the viewport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneTile {
    /// Viewport-relative column.
    pub column: u32,
    /// Viewport-relative row.
    pub row: u32,
    /// Terrain name, used by backends without sprites.
    pub name: String,
    /// Sprite selected by the map compiler.
    pub sprite: SpriteKey,
    /// Whether vessels may sail onto the tile.
    pub passable: bool,
}

/// Actor sprite placed in the viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneSprite {
    /// Kind of actor the sprite represents.
    pub kind: ActorKind,
    /// Sprite asset to draw.
    pub sprite: SpriteKey,
    /// Viewport-relative position in tile units.
    pub position: Vec2,
    /// Rotation in degrees.
    pub angle_degrees: f32,
    /// Uniform scale.
    pub scale: f32,
}

/// Everything a backend needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Viewport size in tiles.
    pub viewport: UVec2,
    /// Visible terrain in row-major order.
    pub tiles: Vec<SceneTile>,
    /// Visible actors in draw order.
    pub sprites: Vec<SceneSprite>,
    /// Heads-up display values.
    pub hud: HudSnapshot,
}

impl Scene {
    /// Composes a scene from the world's read-only snapshots as seen by `camera`.
    #[must_use]
    pub fn compose(grid: &MapGrid, actors: &ActorView, hud: HudSnapshot, camera: &Camera) -> Self {
        let viewport = camera.viewport();
        let origin = camera.origin();

        let mut tiles = Vec::with_capacity(viewport.x as usize * viewport.y as usize);
        for row in 0..viewport.y {
            for column in 0..viewport.x {
                let position = TilePosition::new(
                    origin.x.saturating_add_unsigned(column),
                    origin.y.saturating_add_unsigned(row),
                );
                let cell = grid.cell(position);
                tiles.push(SceneTile {
                    column,
                    row,
                    name: cell.name().to_owned(),
                    sprite: cell.sprite().clone(),
                    passable: cell.passable(),
                });
            }
        }

        let bounds = viewport.as_vec2();
        let sprites = actors
            .iter()
            .filter_map(|actor| {
                let position = camera.to_view(actor.position);
                let visible = position.cmpgt(Vec2::splat(-1.0)).all() && position.cmplt(bounds).all();
                visible.then(|| SceneSprite {
                    kind: actor.kind,
                    sprite: actor.sprite(),
                    position,
                    angle_degrees: actor.angle_degrees,
                    scale: actor.scale,
                })
            })
            .collect();

        Self {
            viewport,
            tiles,
            sprites,
            hud,
        }
    }

    /// Terrain tile at the viewport-relative coordinates, if inside the viewport.
    #[must_use]
    pub fn tile(&self, column: u32, row: u32) -> Option<&SceneTile> {
        if column >= self.viewport.x || row >= self.viewport.y {
            return None;
        }
        self.tiles.get((row * self.viewport.x + column) as usize)
    }
}

/// Rendering backend capable of presenting Pirate Flow scenes.
pub trait RenderingBackend {
    /// Draws a single frame.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;
}

/// Audio backend that turns cues into sound.
pub trait AudioBackend {
    /// Plays the sound associated with `cue`.
    fn play(&mut self, cue: AudioCue) -> AnyResult<()>;
}

/// Forwards the audio cue of every event to `backend`, in event order.
pub fn dispatch_audio<A>(backend: &mut A, events: &[Event]) -> AnyResult<()>
where
    A: AudioBackend + ?Sized,
{
    for cue in events.iter().filter_map(Event::audio_cue) {
        backend.play(cue)?;
    }
    Ok(())
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderingError {
    /// The viewport must span at least one tile on each axis.
    EmptyViewport {
        /// Requested viewport width.
        columns: u32,
        /// Requested viewport height.
        rows: u32,
    },
    /// Neither axis may exceed [`MAX_VIEWPORT_TILES`].
    OversizedViewport {
        /// Requested viewport width.
        columns: u32,
        /// Requested viewport height.
        rows: u32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyViewport { columns, rows } => {
                write!(
                    f,
                    "viewport must be at least one tile wide and tall (received {columns}x{rows})"
                )
            }
            Self::OversizedViewport { columns, rows } => {
                write!(
                    f,
                    "viewport may span at most {MAX_VIEWPORT_TILES} tiles per axis (received {columns}x{rows})"
                )
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use pirate_flow_core::{ActorSnapshot, Facing, MapCell, WorldPoint};

    use super::*;

    #[test]
    fn compose_reads_terrain_through_the_camera() {
        let camera = Camera::new(UVec2::new(3, 2), UVec2::new(4, 2))
            .expect("valid viewport")
            .centered_on(TilePosition::new(3, 0));

        let scene = Scene::compose(&grid(), &ActorView::default(), HudSnapshot::default(), &camera);

        assert_eq!(scene.tiles.len(), 6);
        let corner = scene.tile(2, 0).expect("tile inside viewport");
        assert_eq!(corner.name, "sand");
        assert_eq!(corner.sprite.as_str(), "sand-wwws");
        assert!(!corner.passable);
        assert!(scene.tile(3, 0).is_none());
    }

    #[test]
    fn compose_drops_actors_outside_the_viewport() {
        let camera = Camera::new(UVec2::new(2, 2), UVec2::new(4, 2)).expect("valid viewport");
        let actors = ActorView::from_snapshots(vec![
            actor(ActorKind::Player, 1.0, 1.0),
            actor(ActorKind::Turret, 3.0, 0.0),
        ]);

        let scene = Scene::compose(&grid(), &actors, HudSnapshot::default(), &camera);

        assert_eq!(scene.sprites.len(), 1);
        assert_eq!(scene.sprites[0].sprite.as_str(), "player");
        assert_eq!(scene.sprites[0].position, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn audio_dispatch_preserves_event_order() {
        let mut recorder = Recorder::default();
        let events = [
            Event::GameStarted,
            Event::PlayerHit { energy: 2 },
            Event::CollectiblePicked {
                kind: pirate_flow_core::CollectibleKind::Score,
            },
        ];

        dispatch_audio(&mut recorder, &events).expect("recorder never fails");

        assert_eq!(recorder.cues, vec![AudioCue::Hit, AudioCue::Pickup]);
    }

    #[test]
    fn empty_viewport_message_names_the_size() {
        let error = RenderingError::EmptyViewport { columns: 0, rows: 3 };
        assert!(error.to_string().contains("0x3"));
    }

    #[derive(Default)]
    struct Recorder {
        cues: Vec<AudioCue>,
    }

    impl AudioBackend for Recorder {
        fn play(&mut self, cue: AudioCue) -> AnyResult<()> {
            self.cues.push(cue);
            Ok(())
        }
    }

    fn actor(kind: ActorKind, x: f32, y: f32) -> ActorSnapshot {
        ActorSnapshot {
            kind,
            position: WorldPoint::new(x, y),
            facing: Facing::Down,
            angle_degrees: 0.0,
            scale: 1.0,
        }
    }

    fn grid() -> MapGrid {
        let water = MapCell::new("water", SpriteKey::new("water"), true);
        let sand = MapCell::new("sand", SpriteKey::new("sand-wwws"), false);
        MapGrid::new(
            4,
            2,
            vec![
                water.clone(),
                water.clone(),
                water.clone(),
                sand,
                water.clone(),
                water.clone(),
                water.clone(),
                water.clone(),
            ],
            water,
        )
        .expect("grid is rectangular")
    }
}
