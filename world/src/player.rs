use std::time::Duration;

use pirate_flow_core::{
    Facing, InvalidTransition, MapGrid, PlayerInput, PlayerSnapshot, PlayerStats, TilePosition,
    WorldPoint,
};

use crate::{rotation::Rotation, tuning::Tuning};

/// Result of a player command that passed the state machine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum PlayerAction {
    Idle,
    Moved { from: TilePosition, to: TilePosition },
    Blocked { facing: Facing },
    Fired { origin: WorldPoint, facing: Facing },
    Reloading,
}

#[derive(Clone, Debug)]
pub(crate) struct Player {
    position: TilePosition,
    facing: Facing,
    rotation: Rotation,
    energy: u32,
    max_energy: u32,
    alive: bool,
    death_timer: Option<Duration>,
    fire_cooldown: Duration,
    last_input: PlayerInput,
    spawned: bool,
    stats: PlayerStats,
}

impl Player {
    pub(crate) fn new(tuning: &Tuning) -> Self {
        let facing = Facing::Down;
        Self {
            position: TilePosition::new(0, 0),
            facing,
            rotation: Rotation::settled(facing.angle_degrees()),
            energy: tuning.player_energy,
            max_energy: tuning.player_energy,
            alive: true,
            death_timer: None,
            fire_cooldown: Duration::ZERO,
            last_input: PlayerInput::Idle,
            spawned: false,
            stats: PlayerStats::default(),
        }
    }

    /// Places the player on its spawn tile unless a previous level already did.
    pub(crate) fn spawn_at(&mut self, cell: TilePosition) -> bool {
        if self.spawned {
            return false;
        }
        self.position = cell;
        self.spawned = true;
        true
    }

    pub(crate) const fn position(&self) -> TilePosition {
        self.position
    }

    pub(crate) fn point(&self) -> WorldPoint {
        self.position.to_point()
    }

    pub(crate) const fn facing(&self) -> Facing {
        self.facing
    }

    pub(crate) const fn angle(&self) -> f32 {
        self.rotation.angle()
    }

    pub(crate) const fn is_alive(&self) -> bool {
        self.alive
    }

    pub(crate) const fn energy(&self) -> u32 {
        self.energy
    }

    pub(crate) const fn max_energy(&self) -> u32 {
        self.max_energy
    }

    pub(crate) const fn stats(&self) -> PlayerStats {
        self.stats
    }

    pub(crate) fn stats_mut(&mut self) -> &mut PlayerStats {
        &mut self.stats
    }

    /// Runs the per-tick timers. Returns `true` on the tick the death delay runs out.
    pub(crate) fn advance_timers(&mut self, dt: Duration, rotation_step: f32) -> bool {
        self.fire_cooldown = self.fire_cooldown.saturating_sub(dt);
        self.rotation.advance(rotation_step);

        let Some(remaining) = self.death_timer else {
            return false;
        };
        let remaining = remaining.saturating_sub(dt);
        if remaining.is_zero() {
            self.death_timer = None;
            return true;
        }
        self.death_timer = Some(remaining);
        false
    }

    pub(crate) fn command(
        &mut self,
        input: PlayerInput,
        grid: &MapGrid,
        tuning: &Tuning,
    ) -> Result<PlayerAction, InvalidTransition> {
        let previous = std::mem::replace(&mut self.last_input, input);

        if input == PlayerInput::Idle {
            return Ok(PlayerAction::Idle);
        }
        if !self.alive {
            return Err(InvalidTransition::PlayerDown);
        }

        match input {
            PlayerInput::Idle => Ok(PlayerAction::Idle),
            PlayerInput::Move(facing) => self.steer(facing, previous, grid),
            PlayerInput::Fire => Ok(self.fire(tuning)),
        }
    }

    fn steer(
        &mut self,
        facing: Facing,
        previous: PlayerInput,
        grid: &MapGrid,
    ) -> Result<PlayerAction, InvalidTransition> {
        if facing == self.facing.opposite() {
            if self.rotation.is_rotating() {
                return Err(InvalidTransition::ReverseWhileRotating);
            }
            if previous != PlayerInput::Idle {
                return Err(InvalidTransition::ReverseWithoutIdle);
            }
        }

        let ahead = self.position.step(facing, 1);
        if !grid.is_passable(ahead) || !grid.is_passable(self.position.step(facing, 2)) {
            return Ok(PlayerAction::Blocked { facing });
        }

        let from = self.position;
        self.position = ahead;
        self.facing = facing;
        self.rotation.turn_to(facing.angle_degrees());
        self.stats.tiles_travelled = self.stats.tiles_travelled.saturating_add(1);
        Ok(PlayerAction::Moved { from, to: ahead })
    }

    fn fire(&mut self, tuning: &Tuning) -> PlayerAction {
        if !self.fire_cooldown.is_zero() {
            return PlayerAction::Reloading;
        }
        self.fire_cooldown = tuning.player_fire_frequency();
        PlayerAction::Fired {
            origin: self.point(),
            facing: self.facing,
        }
    }

    /// Removes one energy point. Returns `true` when the hit was fatal.
    pub(crate) fn damage(&mut self, dead_delay: Duration) -> bool {
        self.energy = self.energy.saturating_sub(1);
        if self.energy > 0 {
            return false;
        }
        self.alive = false;
        self.death_timer = Some(dead_delay);
        true
    }

    pub(crate) fn heal(&mut self) {
        self.energy = self.energy.saturating_add(1).min(self.max_energy);
    }

    pub(crate) fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            position: self.position,
            facing: self.facing,
            angle_degrees: self.rotation.angle(),
            rotating: self.rotation.is_rotating(),
            energy: self.energy,
            max_energy: self.max_energy,
            alive: self.alive,
            death_timer: self.death_timer.unwrap_or(Duration::ZERO),
            fire_cooldown: self.fire_cooldown,
            stats: self.stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use pirate_flow_core::{MapCell, SpriteKey};

    use super::*;

    #[test]
    fn moves_when_both_lookahead_tiles_are_open() {
        let grid = grid(&["....."]);
        let mut player = spawned_at(0, 0);

        let action = player
            .command(PlayerInput::Move(Facing::Right), &grid, &Tuning::default())
            .expect("move accepted");

        assert_eq!(
            action,
            PlayerAction::Moved {
                from: TilePosition::new(0, 0),
                to: TilePosition::new(1, 0),
            }
        );
        assert_eq!(player.facing(), Facing::Right);
        assert_eq!(player.stats().tiles_travelled, 1);
    }

    #[test]
    fn second_lookahead_tile_blocks_movement() {
        let grid = grid(&["..#.."]);
        let mut player = spawned_at(0, 0);

        let action = player
            .command(PlayerInput::Move(Facing::Right), &grid, &Tuning::default())
            .expect("command accepted");

        assert_eq!(action, PlayerAction::Blocked { facing: Facing::Right });
        assert_eq!(player.position(), TilePosition::new(0, 0));
        assert_eq!(player.facing(), Facing::Down);
    }

    #[test]
    fn reversal_requires_idle_and_settled_rotation() {
        let grid = grid(&["......"]);
        let tuning = Tuning::default();
        let mut player = spawned_at(2, 0);

        let _ = player
            .command(PlayerInput::Move(Facing::Right), &grid, &tuning)
            .expect("move accepted");
        assert_eq!(
            player.command(PlayerInput::Move(Facing::Left), &grid, &tuning),
            Err(InvalidTransition::ReverseWhileRotating)
        );

        let _ = player.advance_timers(Duration::from_millis(20), 360.0);
        assert_eq!(
            player.command(PlayerInput::Move(Facing::Left), &grid, &tuning),
            Err(InvalidTransition::ReverseWithoutIdle)
        );

        let _ = player.command(PlayerInput::Idle, &grid, &tuning);
        assert!(player
            .command(PlayerInput::Move(Facing::Left), &grid, &tuning)
            .is_ok());
    }

    #[test]
    fn fire_respects_cooldown() {
        let grid = grid(&["..."]);
        let tuning = Tuning::default();
        let mut player = spawned_at(0, 0);

        assert!(matches!(
            player.command(PlayerInput::Fire, &grid, &tuning),
            Ok(PlayerAction::Fired { facing: Facing::Down, .. })
        ));
        assert_eq!(
            player.command(PlayerInput::Fire, &grid, &tuning),
            Ok(PlayerAction::Reloading)
        );

        let _ = player.advance_timers(tuning.player_fire_frequency(), 0.0);
        assert!(matches!(
            player.command(PlayerInput::Fire, &grid, &tuning),
            Ok(PlayerAction::Fired { .. })
        ));
    }

    #[test]
    fn death_delay_expires_exactly_once() {
        let tuning = Tuning {
            player_energy: 1,
            ..Tuning::default()
        };
        let mut player = Player::new(&tuning);

        assert!(player.damage(Duration::from_millis(40)));
        assert!(!player.advance_timers(Duration::from_millis(20), 0.0));
        assert!(player.advance_timers(Duration::from_millis(20), 0.0));
        assert!(!player.advance_timers(Duration::from_millis(20), 0.0));
    }

    #[test]
    fn heal_is_capped_at_max_energy() {
        let mut player = Player::new(&Tuning::default());
        player.heal();
        assert_eq!(player.energy(), player.max_energy());
    }

    #[test]
    fn only_the_first_spawn_is_honored() {
        let mut player = Player::new(&Tuning::default());
        assert!(player.spawn_at(TilePosition::new(3, 4)));
        assert!(!player.spawn_at(TilePosition::new(9, 9)));
        assert_eq!(player.position(), TilePosition::new(3, 4));
    }

    fn spawned_at(column: i32, row: i32) -> Player {
        let mut player = Player::new(&Tuning::default());
        let _ = player.spawn_at(TilePosition::new(column, row));
        player
    }

    fn grid(rows: &[&str]) -> MapGrid {
        let water = MapCell::new("water", SpriteKey::new("water"), true);
        let sand = MapCell::new("sand", SpriteKey::new("sand"), false);
        let cells = rows
            .iter()
            .flat_map(|row| row.chars())
            .map(|symbol| if symbol == '#' { sand.clone() } else { water.clone() })
            .collect();
        let width = rows.first().map_or(0, |row| row.len()) as u32;
        MapGrid::new(width, rows.len() as u32, cells, water.clone()).expect("grid is rectangular")
    }
}
