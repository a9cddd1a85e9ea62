#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Pirate Flow engine.
//!
//! This crate defines the message surface that connects adapters, the map
//! compiler, and the authoritative world. The map compiler produces a
//! [`CompiledLevel`], adapters submit [`Command`] values carrying the level and
//! the per-tick [`PlayerInput`], the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing every
//! observable outcome. Adapters read immutable snapshots after each tick.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Pirate Flow.";

/// Distance, in tiles, below which two actors touch.
pub const CONTACT_RADIUS: f32 = 1.0;

/// Cardinal facings available to every actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Facing {
    /// Toward decreasing row indices.
    Up,
    /// Toward increasing column indices.
    Right,
    /// Toward increasing row indices.
    Down,
    /// Toward decreasing column indices.
    Left,
}

impl Facing {
    /// Every facing in clockwise order starting from [`Facing::Up`].
    pub const ALL: [Facing; 4] = [Facing::Up, Facing::Right, Facing::Down, Facing::Left];

    /// Next facing when turning a quarter turn clockwise.
    #[must_use]
    pub const fn clockwise(self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
        }
    }

    /// Facing pointing the other way along the same axis.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// Unit step expressed as `(column, row)` deltas.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }

    /// Sprite rotation for the facing, measured in degrees.
    ///
    /// Sprites are authored facing down, so [`Facing::Down`] maps to zero.
    #[must_use]
    pub const fn angle_degrees(self) -> f32 {
        match self {
            Self::Down => 0.0,
            Self::Right => 90.0,
            Self::Up => 180.0,
            Self::Left => 270.0,
        }
    }

    /// Reports whether the facing travels along the row axis.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Up => "up",
            Self::Right => "right",
            Self::Down => "down",
            Self::Left => "left",
        };
        f.write_str(label)
    }
}

/// Location of a single map tile expressed as column and row indices.
///
/// Indices are signed so that lookahead may leave the map; the map
/// answers such reads with its void tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TilePosition {
    column: i32,
    row: i32,
}

impl TilePosition {
    /// Creates a new tile position.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Position reached after travelling `tiles` steps toward `facing`.
    #[must_use]
    pub const fn step(self, facing: Facing, tiles: i32) -> Self {
        let (column, row) = facing.offset();
        Self {
            column: self.column.saturating_add(column.saturating_mul(tiles)),
            row: self.row.saturating_add(row.saturating_mul(tiles)),
        }
    }

    /// Continuous point located at the tile's anchor.
    #[must_use]
    pub fn to_point(self) -> WorldPoint {
        WorldPoint::new(self.column as f32, self.row as f32)
    }
}

/// Continuous position measured in tile units.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    x: f32,
    y: f32,
}

impl WorldPoint {
    /// Creates a new point from tile-unit coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate in tiles.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate in tiles.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance(self, other: WorldPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Reports whether two points are close enough to collide.
    ///
    /// Collision is a circle test: the points touch when their distance is
    /// strictly below [`CONTACT_RADIUS`]. The relation is symmetric.
    #[must_use]
    pub fn reaches(self, other: WorldPoint) -> bool {
        self.distance(other) < CONTACT_RADIUS
    }

    /// Point reached after moving `amount` tiles toward `facing`.
    #[must_use]
    pub fn advanced(self, facing: Facing, amount: f32) -> Self {
        let (column, row) = facing.offset();
        Self {
            x: self.x + column as f32 * amount,
            y: self.y + row as f32 * amount,
        }
    }

    /// Signed distance from `origin` along `facing`, positive when ahead.
    #[must_use]
    pub fn projection(self, origin: WorldPoint, facing: Facing) -> f32 {
        let (column, row) = facing.offset();
        (self.x - origin.x) * column as f32 + (self.y - origin.y) * row as f32
    }

    /// Distance from `origin` measured only along the axis of `facing`.
    #[must_use]
    pub fn axis_displacement(self, origin: WorldPoint, facing: Facing) -> f32 {
        if facing.is_vertical() {
            (self.y - origin.y).abs()
        } else {
            (self.x - origin.x).abs()
        }
    }
}

/// Name of a sprite asset without its file extension.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpriteKey(String);

impl SpriteKey {
    /// Creates a sprite key from an asset name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Asset name backing the key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpriteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fully resolved map tile ready for rendering and movement queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapCell {
    name: String,
    sprite: SpriteKey,
    passable: bool,
}

impl MapCell {
    /// Creates a resolved cell.
    #[must_use]
    pub fn new(name: impl Into<String>, sprite: SpriteKey, passable: bool) -> Self {
        Self {
            name: name.into(),
            sprite,
            passable,
        }
    }

    /// Terrain name of the cell, such as `water` or `sand`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sprite variant selected for the cell.
    #[must_use]
    pub fn sprite(&self) -> &SpriteKey {
        &self.sprite
    }

    /// Reports whether actors may move onto the cell.
    #[must_use]
    pub const fn passable(&self) -> bool {
        self.passable
    }
}

/// Resolved tile grid produced by the map compiler.
///
/// Reads outside the grid never fail; they return the void cell, which is
/// always impassable so the map boundary blocks every actor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapGrid {
    width: u32,
    height: u32,
    cells: Vec<MapCell>,
    void: MapCell,
}

impl MapGrid {
    /// Creates a grid from row-major cells.
    ///
    /// Returns `None` when the cell count does not equal `width * height`.
    /// The void cell is forced impassable.
    #[must_use]
    pub fn new(width: u32, height: u32, cells: Vec<MapCell>, void: MapCell) -> Option<Self> {
        let expected = usize::try_from(u64::from(width) * u64::from(height)).ok()?;
        if cells.len() != expected {
            return None;
        }

        Some(Self {
            width,
            height,
            cells,
            void: MapCell {
                passable: false,
                ..void
            },
        })
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Row-major slice over every cell.
    #[must_use]
    pub fn cells(&self) -> &[MapCell] {
        &self.cells
    }

    /// Cell returned for reads outside the grid.
    #[must_use]
    pub const fn void(&self) -> &MapCell {
        &self.void
    }

    /// Reports whether the position lies inside the grid.
    #[must_use]
    pub fn contains(&self, position: TilePosition) -> bool {
        self.index(position).is_some()
    }

    /// Cell at the provided position, or the void cell when out of bounds.
    #[must_use]
    pub fn cell(&self, position: TilePosition) -> &MapCell {
        self.index(position)
            .and_then(|index| self.cells.get(index))
            .unwrap_or(&self.void)
    }

    /// Reports whether actors may move onto the provided position.
    #[must_use]
    pub fn is_passable(&self, position: TilePosition) -> bool {
        self.cell(position).passable()
    }

    fn index(&self, position: TilePosition) -> Option<usize> {
        let column = u32::try_from(position.column()).ok()?;
        let row = u32::try_from(position.row()).ok()?;
        if column >= self.width || row >= self.height {
            return None;
        }

        let width = usize::try_from(self.width).ok()?;
        let row = usize::try_from(row).ok()?;
        let column = usize::try_from(column).ok()?;
        Some(row * width + column)
    }
}

impl Default for MapGrid {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
            void: MapCell::new("void", SpriteKey::new("void"), false),
        }
    }
}

/// Kinds of collectible items scattered across the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CollectibleKind {
    /// Restores one energy point, capped at the player's maximum.
    Health,
    /// Adds to the player's score.
    Score,
}

/// Entity construction record emitted by the map compiler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnRecord {
    /// Player spawn point.
    Player {
        /// Tile holding the spawn marker.
        cell: TilePosition,
    },
    /// Stationary turret.
    Turret {
        /// Tile holding the turret.
        cell: TilePosition,
        /// Facing inferred from the surrounding water.
        facing: Facing,
    },
    /// Patrolling vessel.
    PatrolVessel {
        /// Tile the vessel starts on.
        cell: TilePosition,
        /// Initial heading.
        facing: Facing,
    },
    /// Collectible item.
    Collectible {
        /// Tile holding the item.
        cell: TilePosition,
        /// Effect applied on pickup.
        kind: CollectibleKind,
    },
}

impl SpawnRecord {
    /// Tile the record was extracted from.
    #[must_use]
    pub const fn cell(&self) -> TilePosition {
        match self {
            Self::Player { cell }
            | Self::Turret { cell, .. }
            | Self::PatrolVessel { cell, .. }
            | Self::Collectible { cell, .. } => *cell,
        }
    }
}

/// Output of a successful map compilation.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompiledLevel {
    /// Resolved render grid.
    pub grid: MapGrid,
    /// Entity spawn records in grid reading order.
    pub spawns: Vec<SpawnRecord>,
}

/// Per-tick command supplied by the input adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlayerInput {
    /// No input this tick.
    #[default]
    Idle,
    /// Request to move one tile toward the facing.
    Move(Facing),
    /// Request to fire along the current facing.
    Fire,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Installs a compiled level into the entity registry.
    PopulateLevel {
        /// Level produced by the map compiler.
        level: CompiledLevel,
    },
    /// Advances the simulation by one tick.
    Tick {
        /// Simulated time elapsed since the previous tick.
        dt: Duration,
        /// Player command for this tick.
        input: PlayerInput,
    },
}

/// Unique identifier assigned to a hostile actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HostileId(u32);

impl HostileId {
    /// Creates a new hostile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Kinds of hostile actors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostileKind {
    /// Stationary shore turret.
    Turret,
    /// Vessel sailing a fixed clockwise routine.
    PatrolVessel,
}

/// Actor that fired a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shooter {
    /// The player's vessel.
    Player,
    /// A turret or patrol vessel.
    Hostile(HostileId),
}

/// Visual size of an explosion, chosen by what it destroyed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExplosionSize {
    /// Projectile landed without hitting anything.
    Small,
    /// Projectile damaged the player.
    Medium,
    /// Projectile destroyed an actor.
    Large,
}

impl fmt::Display for ExplosionSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        };
        f.write_str(label)
    }
}

/// Goals the player can meet once per session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Achievement {
    /// Eliminated enough hostiles.
    Marksman,
    /// Travelled enough tiles.
    Voyager,
    /// Accumulated enough score.
    Treasurer,
}

impl Achievement {
    /// Every achievement in evaluation order.
    pub const ALL: [Achievement; 3] = [
        Achievement::Marksman,
        Achievement::Voyager,
        Achievement::Treasurer,
    ];
}

/// Reasons a player command is ignored for a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum InvalidTransition {
    /// Reversal requested while the previous turn is still animating.
    #[error("cannot reverse while a rotation is in progress")]
    ReverseWhileRotating,
    /// Reversal requested without an idle tick in between.
    #[error("reversing requires an idle tick first")]
    ReverseWithoutIdle,
    /// The player is dead and awaiting the end of the game.
    #[error("the player vessel is down")]
    PlayerDown,
}

/// Discrete sound triggers consumed by audio adapters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioCue {
    /// A projectile damaged or destroyed an actor.
    Hit,
    /// A projectile landed in open water.
    Miss,
    /// The player collected an item.
    Pickup,
    /// An achievement was unlocked.
    AchievementUnlocked,
    /// The game ended.
    GameOver,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a compiled level populated the registry.
    LevelPopulated {
        /// Number of turrets spawned.
        turrets: usize,
        /// Number of patrol vessels spawned.
        patrol_vessels: usize,
        /// Number of collectibles spawned.
        collectibles: usize,
    },
    /// Announces that the first player command started the game.
    GameStarted,
    /// Confirms that the player moved one tile.
    PlayerMoved {
        /// Tile occupied before the move.
        from: TilePosition,
        /// Tile occupied after the move.
        to: TilePosition,
    },
    /// Reports that terrain ahead blocked a move.
    MoveBlocked {
        /// Direction of the attempted move.
        facing: Facing,
    },
    /// Reports that a player command was ignored.
    CommandRejected {
        /// Command that was ignored.
        input: PlayerInput,
        /// State-machine conflict that caused the rejection.
        reason: InvalidTransition,
    },
    /// Confirms that a projectile was launched.
    ProjectileFired {
        /// Actor that fired.
        shooter: Shooter,
        /// Launch point.
        origin: WorldPoint,
        /// Direction of travel.
        facing: Facing,
        /// Axis distance after which the projectile lands.
        max_distance: f32,
    },
    /// Reports that a projectile damaged the player.
    PlayerHit {
        /// Energy remaining after the hit.
        energy: u32,
    },
    /// Reports that the player ran out of energy.
    PlayerDied,
    /// Reports that a projectile destroyed a hostile.
    HostileDestroyed {
        /// Identifier of the destroyed hostile.
        hostile: HostileId,
        /// Kind of the destroyed hostile.
        kind: HostileKind,
        /// Actor that fired the projectile.
        by: Shooter,
    },
    /// Reports that a projectile landed without hitting anything.
    ProjectileMissed {
        /// Landing point.
        at: WorldPoint,
    },
    /// Reports that the player collected an item.
    CollectiblePicked {
        /// Kind of the collected item.
        kind: CollectibleKind,
    },
    /// Reports that a goal was met for the first time.
    AchievementUnlocked {
        /// Goal that was met.
        achievement: Achievement,
    },
    /// Reports that the death delay elapsed and the game ended.
    GameOver {
        /// Final score.
        score: u64,
    },
}

impl Event {
    /// Sound trigger associated with the event, if any.
    #[must_use]
    pub const fn audio_cue(&self) -> Option<AudioCue> {
        match self {
            Self::PlayerHit { .. } | Self::HostileDestroyed { .. } => Some(AudioCue::Hit),
            Self::ProjectileMissed { .. } => Some(AudioCue::Miss),
            Self::CollectiblePicked { .. } => Some(AudioCue::Pickup),
            Self::AchievementUnlocked { .. } => Some(AudioCue::AchievementUnlocked),
            Self::GameOver { .. } => Some(AudioCue::GameOver),
            _ => None,
        }
    }
}

/// Monotonic counters accumulated by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Hostiles destroyed by player projectiles.
    pub hostiles_eliminated: u32,
    /// Tiles travelled by successful moves.
    pub tiles_travelled: u32,
    /// Cumulative score.
    pub score: u64,
}

/// Immutable representation of the player's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Tile occupied by the player.
    pub position: TilePosition,
    /// Logical facing used for movement and firing.
    pub facing: Facing,
    /// Current sprite rotation, which may lag behind the facing.
    pub angle_degrees: f32,
    /// Whether a rotation animation is still running.
    pub rotating: bool,
    /// Remaining energy.
    pub energy: u32,
    /// Energy cap.
    pub max_energy: u32,
    /// Whether the player is still afloat.
    pub alive: bool,
    /// Time left before the game ends after death.
    pub death_timer: Duration,
    /// Time left before the player may fire again.
    pub fire_cooldown: Duration,
    /// Accumulated counters.
    pub stats: PlayerStats,
}

/// Immutable representation of a hostile actor used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HostileSnapshot {
    /// Identifier assigned by the world.
    pub id: HostileId,
    /// Kind of hostile.
    pub kind: HostileKind,
    /// Tile occupied by the hostile.
    pub position: TilePosition,
    /// Logical facing used for firing.
    pub facing: Facing,
    /// Current sprite rotation.
    pub angle_degrees: f32,
    /// Whether a rotation animation is still running.
    pub rotating: bool,
    /// Time left before the hostile may fire again.
    pub fire_cooldown: Duration,
    /// Maximum engagement range in tiles.
    pub range: f32,
}

/// Read-only snapshot describing every hostile in deterministic order.
#[derive(Clone, Debug, Default)]
pub struct HostileView {
    snapshots: Vec<HostileSnapshot>,
}

impl HostileView {
    /// Creates a new hostile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<HostileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots ordered by identifier.
    pub fn iter(&self) -> impl Iterator<Item = &HostileSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<HostileSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a projectile in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Actor that fired the projectile.
    pub shooter: Shooter,
    /// Launch point.
    pub origin: WorldPoint,
    /// Current position.
    pub position: WorldPoint,
    /// Direction of travel.
    pub facing: Facing,
    /// Axis distance after which the projectile lands.
    pub max_distance: f32,
}

/// Kinds of actors exposed to the render adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActorKind {
    /// The player's vessel.
    Player,
    /// Shore turret.
    Turret,
    /// Patrol vessel.
    PatrolVessel,
    /// Projectile in flight.
    Projectile,
    /// Collectible item.
    Collectible(CollectibleKind),
    /// Explosion animation frame.
    Explosion {
        /// Size class of the explosion.
        size: ExplosionSize,
        /// Zero-based animation frame.
        frame: u32,
    },
}

/// Drawable description of a single live actor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActorSnapshot {
    /// Kind of actor.
    pub kind: ActorKind,
    /// Position in tile units.
    pub position: WorldPoint,
    /// Logical facing.
    pub facing: Facing,
    /// Sprite rotation in degrees.
    pub angle_degrees: f32,
    /// Uniform sprite scale.
    pub scale: f32,
}

impl ActorSnapshot {
    /// Sprite asset used to draw the actor.
    #[must_use]
    pub fn sprite(&self) -> SpriteKey {
        match self.kind {
            ActorKind::Player => SpriteKey::new("player"),
            ActorKind::Turret => SpriteKey::new("cannon"),
            ActorKind::PatrolVessel => SpriteKey::new("ship"),
            ActorKind::Projectile => SpriteKey::new("bullet"),
            ActorKind::Collectible(CollectibleKind::Health) => SpriteKey::new("health"),
            ActorKind::Collectible(CollectibleKind::Score) => SpriteKey::new("treasure"),
            ActorKind::Explosion { size, frame } => {
                SpriteKey::new(format!("explosion-{size}-{frame}"))
            }
        }
    }
}

/// Read-only snapshot of every live actor in draw order.
#[derive(Clone, Debug, Default)]
pub struct ActorView {
    snapshots: Vec<ActorSnapshot>,
}

impl ActorView {
    /// Creates a new actor view; the order of `snapshots` is the draw order.
    #[must_use]
    pub fn from_snapshots(snapshots: Vec<ActorSnapshot>) -> Self {
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &ActorSnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured actors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no actors were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ActorSnapshot> {
        self.snapshots
    }
}

/// Scalar game state shown on the heads-up display.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct HudSnapshot {
    /// Cumulative score.
    pub score: u64,
    /// Remaining energy.
    pub energy: u32,
    /// Energy cap.
    pub max_energy: u32,
    /// Whether the player is still afloat.
    pub alive: bool,
    /// Whether the first command has been issued.
    pub started: bool,
    /// Whether the game has ended.
    pub game_over: bool,
    /// Achievements unlocked so far, in unlock order.
    pub achievements: Vec<Achievement>,
}
