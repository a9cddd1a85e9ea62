#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for Pirate Flow.
//!
//! The world owns every live actor. Adapters mutate it exclusively through
//! [`apply`] and observe it through the read-only [`query`] functions.

mod achievements;
mod collectibles;
mod explosions;
mod hostiles;
mod player;
mod projectiles;
mod rotation;
mod tuning;

pub use tuning::{Tuning, TuningError};

use std::time::Duration;

use pirate_flow_core::{
    CollectibleKind, Command, CompiledLevel, ExplosionSize, Event, Facing, HostileId, HostileKind,
    MapGrid, PlayerInput, Shooter, SpawnRecord, WorldPoint, WELCOME_BANNER,
};
use tracing::{debug, info};

use achievements::AchievementTracker;
use collectibles::Collectible;
use explosions::Explosion;
use hostiles::{Hostile, PatrolVessel, Target, Turret};
use player::{Player, PlayerAction};
use projectiles::Projectile;

/// Represents the authoritative Pirate Flow world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    tuning: Tuning,
    grid: MapGrid,
    player: Player,
    turrets: Vec<Turret>,
    patrol_vessels: Vec<PatrolVessel>,
    projectiles: Vec<Projectile>,
    collectibles: Vec<Collectible>,
    explosions: Vec<Explosion>,
    achievements: AchievementTracker,
    started: bool,
    game_over: bool,
    next_hostile_id: u32,
    tick_index: u64,
}

impl World {
    /// Creates an empty world governed by the provided tuning.
    #[must_use]
    pub fn new(tuning: Tuning) -> Self {
        Self {
            banner: WELCOME_BANNER,
            player: Player::new(&tuning),
            tuning,
            grid: MapGrid::default(),
            turrets: Vec::new(),
            patrol_vessels: Vec::new(),
            projectiles: Vec::new(),
            collectibles: Vec::new(),
            explosions: Vec::new(),
            achievements: AchievementTracker::default(),
            started: false,
            game_over: false,
            next_hostile_id: 0,
            tick_index: 0,
        }
    }

    fn allocate_hostile_id(&mut self) -> HostileId {
        let id = HostileId::new(self.next_hostile_id);
        self.next_hostile_id = self.next_hostile_id.saturating_add(1);
        id
    }

    fn populate(&mut self, level: CompiledLevel, out_events: &mut Vec<Event>) {
        let CompiledLevel { grid, spawns } = level;
        self.grid = grid;
        self.turrets.clear();
        self.patrol_vessels.clear();
        self.collectibles.clear();
        self.projectiles.clear();
        self.explosions.clear();

        for spawn in spawns {
            match spawn {
                SpawnRecord::Player { cell } => {
                    if !self.player.spawn_at(cell) {
                        debug!(
                            column = cell.column(),
                            row = cell.row(),
                            "player_spawn_ignored"
                        );
                    }
                }
                SpawnRecord::Turret { cell, facing } => {
                    let id = self.allocate_hostile_id();
                    self.turrets.push(Turret::new(id, cell, facing, &self.tuning));
                }
                SpawnRecord::PatrolVessel { cell, facing } => {
                    let id = self.allocate_hostile_id();
                    self.patrol_vessels
                        .push(PatrolVessel::new(id, cell, facing, &self.tuning));
                }
                SpawnRecord::Collectible { cell, kind } => {
                    self.collectibles.push(Collectible::new(cell, kind));
                }
            }
        }

        debug!(
            width = self.grid.width(),
            height = self.grid.height(),
            turrets = self.turrets.len(),
            patrol_vessels = self.patrol_vessels.len(),
            collectibles = self.collectibles.len(),
            "level_populated"
        );
        out_events.push(Event::LevelPopulated {
            turrets: self.turrets.len(),
            patrol_vessels: self.patrol_vessels.len(),
            collectibles: self.collectibles.len(),
        });
    }

    fn tick(&mut self, dt: Duration, input: PlayerInput, out_events: &mut Vec<Event>) {
        self.tick_index = self.tick_index.saturating_add(1);
        out_events.push(Event::TimeAdvanced { dt });

        self.update_player(dt, input, out_events);
        self.update_hostiles(dt, out_events);
        self.update_projectiles(out_events);
        self.update_collectibles(out_events);
        self.update_explosions(dt);
        self.update_achievements(out_events);
    }

    fn update_player(&mut self, dt: Duration, input: PlayerInput, out_events: &mut Vec<Event>) {
        if self
            .player
            .advance_timers(dt, self.tuning.rotation_step_degrees)
        {
            self.game_over = true;
            let score = self.player.stats().score;
            info!(score, tick = self.tick_index, "game_over");
            out_events.push(Event::GameOver { score });
        }

        if !self.started && input != PlayerInput::Idle && self.player.is_alive() {
            self.started = true;
            debug!(tick = self.tick_index, "game_started");
            out_events.push(Event::GameStarted);
        }

        match self.player.command(input, &self.grid, &self.tuning) {
            Ok(PlayerAction::Idle | PlayerAction::Reloading) => {}
            Ok(PlayerAction::Moved { from, to }) => {
                out_events.push(Event::PlayerMoved { from, to });
            }
            Ok(PlayerAction::Blocked { facing }) => {
                out_events.push(Event::MoveBlocked { facing });
            }
            Ok(PlayerAction::Fired { origin, facing }) => {
                let range = self.tuning.player_projectile_range;
                self.launch(Shooter::Player, origin, facing, range, out_events);
            }
            Err(reason) => {
                debug!(?input, %reason, "command_rejected");
                out_events.push(Event::CommandRejected { input, reason });
            }
        }
    }

    fn update_hostiles(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let target = Target {
            position: self.player.point(),
            alive: self.player.is_alive(),
            started: self.started,
        };

        let mut shots = Vec::new();
        for turret in &mut self.turrets {
            if let Some(shot) = turret.tick(dt, &target, &self.tuning) {
                shots.push((turret.id(), shot));
            }
        }
        for vessel in &mut self.patrol_vessels {
            if let Some(shot) = vessel.tick(dt, &target, &self.grid, &self.tuning) {
                shots.push((vessel.id(), shot));
            }
        }

        for (id, shot) in shots {
            self.launch(
                Shooter::Hostile(id),
                shot.origin,
                shot.facing,
                shot.max_distance,
                out_events,
            );
        }
    }

    fn launch(
        &mut self,
        shooter: Shooter,
        origin: WorldPoint,
        facing: Facing,
        max_distance: f32,
        out_events: &mut Vec<Event>,
    ) {
        self.projectiles
            .push(Projectile::launch(shooter, origin, facing, max_distance));
        out_events.push(Event::ProjectileFired {
            shooter,
            origin,
            facing,
            max_distance,
        });
    }

    fn update_projectiles(&mut self, out_events: &mut Vec<Event>) {
        for projectile in &mut self.projectiles {
            projectile.advance(
                self.tuning.projectile_speed,
                self.tuning.projectile_pulse_step,
            );
        }

        let (landed, flying): (Vec<Projectile>, Vec<Projectile>) =
            std::mem::take(&mut self.projectiles)
                .into_iter()
                .partition(Projectile::is_finished);
        self.projectiles = flying;

        for projectile in landed {
            self.resolve_landing(&projectile, out_events);
        }
    }

    /// Credits at most one target per projectile; the player takes priority.
    fn resolve_landing(&mut self, projectile: &Projectile, out_events: &mut Vec<Event>) {
        let at = projectile.position();
        let shooter = projectile.shooter();

        let size = if shooter != Shooter::Player
            && self.player.is_alive()
            && self.player.point().reaches(at)
        {
            let fatal = self.player.damage(self.tuning.dead_delay());
            out_events.push(Event::PlayerHit {
                energy: self.player.energy(),
            });
            if fatal {
                info!(tick = self.tick_index, "player_died");
                out_events.push(Event::PlayerDied);
                ExplosionSize::Large
            } else {
                ExplosionSize::Medium
            }
        } else if let Some((hostile, kind)) = self.destroy_hostile_at(at, shooter) {
            if shooter == Shooter::Player {
                let award = match kind {
                    HostileKind::Turret => self.tuning.turret_score,
                    HostileKind::PatrolVessel => self.tuning.patrol_score,
                };
                let stats = self.player.stats_mut();
                stats.hostiles_eliminated = stats.hostiles_eliminated.saturating_add(1);
                stats.score = stats.score.saturating_add(award);
            }
            debug!(hostile = hostile.get(), ?kind, ?shooter, "hostile_destroyed");
            out_events.push(Event::HostileDestroyed {
                hostile,
                kind,
                by: shooter,
            });
            ExplosionSize::Large
        } else {
            out_events.push(Event::ProjectileMissed { at });
            ExplosionSize::Small
        };

        self.explosions
            .push(Explosion::new(at, size, self.tuning.explosion_frame()));
    }

    fn destroy_hostile_at(
        &mut self,
        at: WorldPoint,
        shooter: Shooter,
    ) -> Option<(HostileId, HostileKind)> {
        take_first_reached(&mut self.turrets, at, shooter)
            .or_else(|| take_first_reached(&mut self.patrol_vessels, at, shooter))
    }

    fn update_collectibles(&mut self, out_events: &mut Vec<Event>) {
        if !self.player.is_alive() || self.collectibles.is_empty() {
            return;
        }

        let point = self.player.point();
        let (picked, remaining): (Vec<Collectible>, Vec<Collectible>) =
            std::mem::take(&mut self.collectibles)
                .into_iter()
                .partition(|item| item.touches(point));
        self.collectibles = remaining;

        for item in picked {
            match item.kind() {
                CollectibleKind::Health => self.player.heal(),
                CollectibleKind::Score => {
                    let stats = self.player.stats_mut();
                    stats.score = stats.score.saturating_add(self.tuning.treasure_score);
                }
            }
            out_events.push(Event::CollectiblePicked { kind: item.kind() });
        }
    }

    fn update_explosions(&mut self, dt: Duration) {
        let frames = self.tuning.explosion_frames;
        let frame_duration = self.tuning.explosion_frame();
        self.explosions
            .retain(|explosion| !explosion.is_finished(frames));
        for explosion in &mut self.explosions {
            explosion.age(dt, frame_duration, frames);
        }
    }

    fn update_achievements(&mut self, out_events: &mut Vec<Event>) {
        let stats = self.player.stats();
        for achievement in self.achievements.evaluate(&stats, &self.tuning) {
            info!(?achievement, "achievement_unlocked");
            out_events.push(Event::AchievementUnlocked { achievement });
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

fn take_first_reached<H: Hostile>(
    hostiles: &mut Vec<H>,
    at: WorldPoint,
    shooter: Shooter,
) -> Option<(HostileId, HostileKind)> {
    let index = hostiles
        .iter()
        .position(|hostile| Shooter::Hostile(hostile.id()) != shooter && hostile.point().reaches(at))?;
    let hostile = hostiles.remove(index);
    Some((hostile.id(), H::KIND))
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::PopulateLevel { level } => world.populate(level, out_events),
        Command::Tick { dt, input } => world.tick(dt, input, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use pirate_flow_core::{
        Achievement, ActorKind, ActorSnapshot, ActorView, CollectibleKind, Facing,
        HostileSnapshot, HostileView, HudSnapshot, MapGrid, PlayerSnapshot, PlayerStats,
        ProjectileSnapshot, TilePosition,
    };

    use super::{hostiles::Hostile, Tuning, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the tuning governing the world.
    #[must_use]
    pub fn tuning(world: &World) -> &Tuning {
        &world.tuning
    }

    /// Provides read-only access to the resolved render grid.
    #[must_use]
    pub fn map_grid(world: &World) -> &MapGrid {
        &world.grid
    }

    /// Captures the player's current state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        world.player.snapshot()
    }

    /// Tile currently occupied by the player.
    #[must_use]
    pub fn player_position(world: &World) -> TilePosition {
        world.player.position()
    }

    /// Counters accumulated by the player.
    #[must_use]
    pub fn stats(world: &World) -> PlayerStats {
        world.player.stats()
    }

    /// Captures every hostile ordered by identifier.
    #[must_use]
    pub fn hostiles(world: &World) -> HostileView {
        HostileView::from_snapshots(
            world
                .turrets
                .iter()
                .map(Hostile::snapshot)
                .chain(world.patrol_vessels.iter().map(Hostile::snapshot))
                .collect(),
        )
    }

    /// Number of turrets still standing.
    #[must_use]
    pub fn turret_count(world: &World) -> usize {
        world.turrets.len()
    }

    /// Number of patrol vessels still afloat.
    #[must_use]
    pub fn patrol_vessel_count(world: &World) -> usize {
        world.patrol_vessels.len()
    }

    /// Captures every projectile in flight, oldest first.
    #[must_use]
    pub fn projectiles(world: &World) -> Vec<ProjectileSnapshot> {
        world
            .projectiles
            .iter()
            .map(|projectile| projectile.snapshot())
            .collect()
    }

    /// Lists the collectibles still lying on the map.
    #[must_use]
    pub fn collectibles(world: &World) -> Vec<(TilePosition, CollectibleKind)> {
        world
            .collectibles
            .iter()
            .map(|item| (item.position(), item.kind()))
            .collect()
    }

    /// Number of explosion animations still playing.
    #[must_use]
    pub fn explosion_count(world: &World) -> usize {
        world.explosions.len()
    }

    /// Achievements unlocked so far, in unlock order.
    #[must_use]
    pub fn achievements(world: &World) -> &[Achievement] {
        world.achievements.unlocked()
    }

    /// Reports whether the first player command has been issued.
    #[must_use]
    pub fn is_started(world: &World) -> bool {
        world.started
    }

    /// Reports whether the death delay elapsed.
    #[must_use]
    pub fn is_game_over(world: &World) -> bool {
        world.game_over
    }

    /// Number of ticks applied since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Scalar state shown on the heads-up display.
    #[must_use]
    pub fn hud(world: &World) -> HudSnapshot {
        let stats = world.player.stats();
        HudSnapshot {
            score: stats.score,
            energy: world.player.energy(),
            max_energy: world.player.max_energy(),
            alive: world.player.is_alive(),
            started: world.started,
            game_over: world.game_over,
            achievements: world.achievements.unlocked().to_vec(),
        }
    }

    /// Captures every drawable actor in back-to-front order.
    #[must_use]
    pub fn actor_view(world: &World) -> ActorView {
        let mut actors = Vec::new();

        actors.extend(world.collectibles.iter().map(|item| ActorSnapshot {
            kind: ActorKind::Collectible(item.kind()),
            position: item.position().to_point(),
            facing: Facing::Down,
            angle_degrees: 0.0,
            scale: 1.0,
        }));

        let hostile_actor = |kind: ActorKind, snapshot: HostileSnapshot| {
            ActorSnapshot {
                kind,
                position: snapshot.position.to_point(),
                facing: snapshot.facing,
                angle_degrees: snapshot.angle_degrees,
                scale: 1.0,
            }
        };
        actors.extend(
            world
                .turrets
                .iter()
                .map(|turret| hostile_actor(ActorKind::Turret, turret.snapshot())),
        );
        actors.extend(
            world
                .patrol_vessels
                .iter()
                .map(|vessel| hostile_actor(ActorKind::PatrolVessel, vessel.snapshot())),
        );

        if world.player.is_alive() {
            actors.push(ActorSnapshot {
                kind: ActorKind::Player,
                position: world.player.point(),
                facing: world.player.facing(),
                angle_degrees: world.player.angle(),
                scale: 1.0,
            });
        }

        let amplitude = world.tuning.projectile_pulse_amplitude;
        actors.extend(world.projectiles.iter().map(|projectile| ActorSnapshot {
            kind: ActorKind::Projectile,
            position: projectile.position(),
            facing: projectile.facing(),
            angle_degrees: projectile.facing().angle_degrees(),
            scale: projectile.scale(amplitude),
        }));

        actors.extend(world.explosions.iter().map(|explosion| ActorSnapshot {
            kind: ActorKind::Explosion {
                size: explosion.size(),
                frame: explosion.frame(),
            },
            position: explosion.position(),
            facing: Facing::Down,
            angle_degrees: 0.0,
            scale: 1.0,
        }));

        ActorView::from_snapshots(actors)
    }
}

#[cfg(test)]
mod tests {
    use pirate_flow_core::{MapCell, SpriteKey, TilePosition};

    use super::*;

    #[test]
    fn new_world_exposes_banner_and_empty_registry() {
        let world = World::default();

        assert_eq!(query::welcome_banner(&world), WELCOME_BANNER);
        assert_eq!(query::turret_count(&world), 0);
        assert_eq!(query::actor_view(&world).len(), 1);
        assert!(!query::is_started(&world));
    }

    #[test]
    fn world_keeps_the_tuning_it_was_built_with() {
        let tuning = Tuning {
            player_energy: 2,
            ..Tuning::default()
        };
        let world = World::new(tuning.clone());

        assert_eq!(query::tuning(&world), &tuning);
        assert_eq!(query::player(&world).energy, 2);
    }

    #[test]
    fn populate_counts_spawned_entities() {
        let mut world = World::default();
        let mut events = Vec::new();

        apply(&mut world, populate(sample_spawns()), &mut events);

        assert_eq!(
            events,
            vec![Event::LevelPopulated {
                turrets: 1,
                patrol_vessels: 1,
                collectibles: 1,
            }]
        );
        assert_eq!(query::player_position(&world), TilePosition::new(1, 1));
    }

    #[test]
    fn repopulating_keeps_the_player_in_place() {
        let mut world = World::default();
        let mut events = Vec::new();
        apply(&mut world, populate(sample_spawns()), &mut events);

        let moved = vec![SpawnRecord::Player {
            cell: TilePosition::new(3, 3),
        }];
        apply(&mut world, populate(moved), &mut events);

        assert_eq!(query::player_position(&world), TilePosition::new(1, 1));
        assert_eq!(query::turret_count(&world), 0);
        assert!(query::collectibles(&world).is_empty());
    }

    #[test]
    fn hostile_identifiers_are_unique() {
        let mut world = World::default();
        let mut events = Vec::new();
        apply(&mut world, populate(sample_spawns()), &mut events);

        let ids: Vec<u32> = query::hostiles(&world)
            .iter()
            .map(|hostile| hostile.id.get())
            .collect();

        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn player_projectile_spares_the_player() {
        let mut world = World::default();
        let mut events = Vec::new();
        apply(&mut world, populate(sample_spawns()), &mut events);

        let stray = Projectile::launch(Shooter::Player, WorldPoint::new(1.0, 1.0), Facing::Down, 0.0);
        world.resolve_landing(&stray, &mut events);

        assert_eq!(query::player(&world).energy, Tuning::default().player_energy);
    }

    #[test]
    fn hostile_projectile_spares_its_shooter() {
        let mut world = World::default();
        let mut events = Vec::new();
        apply(&mut world, populate(sample_spawns()), &mut events);
        let turret = query::hostiles(&world)
            .iter()
            .find(|hostile| hostile.kind == HostileKind::Turret)
            .map(|hostile| hostile.id)
            .expect("turret spawned");

        let shell = Projectile::launch(
            Shooter::Hostile(turret),
            WorldPoint::new(5.0, 0.25),
            Facing::Down,
            0.0,
        );
        world.resolve_landing(&shell, &mut events);

        assert_eq!(query::turret_count(&world), 1);
        assert!(matches!(events.last(), Some(Event::ProjectileMissed { .. })));
    }

    #[test]
    fn player_takes_a_shell_that_also_reaches_a_hostile() {
        let mut world = World::default();
        let mut events = Vec::new();
        let spawns = vec![
            SpawnRecord::Player {
                cell: TilePosition::new(2, 2),
            },
            SpawnRecord::Turret {
                cell: TilePosition::new(0, 2),
                facing: Facing::Right,
            },
            SpawnRecord::Turret {
                cell: TilePosition::new(3, 2),
                facing: Facing::Left,
            },
        ];
        apply(&mut world, populate(spawns), &mut events);
        let shooter = query::hostiles(&world)
            .iter()
            .find(|hostile| hostile.position == TilePosition::new(0, 2))
            .map(|hostile| hostile.id)
            .expect("turret spawned");
        events.clear();

        let shell = Projectile::launch(
            Shooter::Hostile(shooter),
            WorldPoint::new(2.5, 2.0),
            Facing::Right,
            0.0,
        );
        world.resolve_landing(&shell, &mut events);

        let hits = events
            .iter()
            .filter(|event| matches!(event, Event::PlayerHit { .. }))
            .count();
        assert_eq!(hits, 1);
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::HostileDestroyed { .. })));
        assert_eq!(query::turret_count(&world), 2);
        assert_eq!(query::patrol_vessel_count(&world), 0);
    }

    fn populate(spawns: Vec<SpawnRecord>) -> Command {
        let water = MapCell::new("water", SpriteKey::new("water"), true);
        let grid = MapGrid::new(8, 8, vec![water.clone(); 64], water).expect("grid is rectangular");
        Command::PopulateLevel {
            level: CompiledLevel { grid, spawns },
        }
    }

    fn sample_spawns() -> Vec<SpawnRecord> {
        vec![
            SpawnRecord::Player {
                cell: TilePosition::new(1, 1),
            },
            SpawnRecord::Turret {
                cell: TilePosition::new(5, 0),
                facing: Facing::Down,
            },
            SpawnRecord::PatrolVessel {
                cell: TilePosition::new(6, 6),
                facing: Facing::Left,
            },
            SpawnRecord::Collectible {
                cell: TilePosition::new(3, 1),
                kind: CollectibleKind::Score,
            },
        ]
    }
}
