//! Turrets and patrol vessels along with the engagement rules they share.

use std::time::Duration;

use pirate_flow_core::{
    Facing, HostileId, HostileKind, HostileSnapshot, MapGrid, TilePosition, WorldPoint,
    CONTACT_RADIUS,
};
use tracing::debug;

use crate::{rotation::Rotation, tuning::Tuning};

/// What a hostile knows about the player when deciding to fire.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Target {
    pub(crate) position: WorldPoint,
    pub(crate) alive: bool,
    pub(crate) started: bool,
}

/// Projectile launch requested by a hostile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Shot {
    pub(crate) origin: WorldPoint,
    pub(crate) facing: Facing,
    pub(crate) max_distance: f32,
}

/// Gun mount state common to every hostile.
#[derive(Clone, Debug)]
pub(crate) struct Mount {
    position: TilePosition,
    facing: Facing,
    rotation: Rotation,
    fire_cooldown: Duration,
}

impl Mount {
    fn new(position: TilePosition, facing: Facing) -> Self {
        Self {
            position,
            facing,
            rotation: Rotation::settled(facing.angle_degrees()),
            fire_cooldown: Duration::ZERO,
        }
    }

    fn point(&self) -> WorldPoint {
        self.position.to_point()
    }

    fn turn(&mut self, facing: Facing) {
        self.facing = facing;
        self.rotation.turn_to(facing.angle_degrees());
    }
}

/// Targeting capability shared by turrets and patrol vessels.
pub(crate) trait Engagement {
    fn mount(&self) -> &Mount;

    fn mount_mut(&mut self) -> &mut Mount;

    /// Maximum distance at which the hostile engages.
    fn range(&self) -> f32;

    fn current_facing(&self) -> Facing {
        self.mount().facing
    }

    fn fire_cooldown_remaining(&self) -> Duration {
        self.mount().fire_cooldown
    }

    fn is_rotating(&self) -> bool {
        self.mount().rotation.is_rotating()
    }

    /// Reports whether the target lies within range, regardless of facing.
    fn in_range(&self, target: &Target, margin: f32) -> bool {
        self.mount().point().distance(target.position) < self.range() + margin
    }

    /// Reports whether the target sits strictly ahead along the current facing.
    fn is_ahead(&self, target: &Target) -> bool {
        target
            .position
            .projection(self.mount().point(), self.current_facing())
            > 0.0
    }

    fn should_fire(&self, target: &Target, margin: f32) -> bool {
        target.started
            && target.alive
            && !self.is_rotating()
            && self.fire_cooldown_remaining().is_zero()
            && self.is_ahead(target)
            && self.in_range(target, margin)
    }

    /// Fires at the target when allowed, resetting the cooldown to `frequency`.
    fn engage(&mut self, target: &Target, margin: f32, frequency: Duration) -> Option<Shot> {
        if !self.should_fire(target, margin) {
            return None;
        }

        let mount = self.mount_mut();
        mount.fire_cooldown = frequency;
        let origin = mount.point();
        Some(Shot {
            origin,
            facing: mount.facing,
            max_distance: (origin.distance(target.position) - CONTACT_RADIUS).max(0.0),
        })
    }
}

/// Stationary shore battery that tracks the player.
#[derive(Clone, Debug)]
pub(crate) struct Turret {
    id: HostileId,
    mount: Mount,
    range: f32,
}

impl Turret {
    pub(crate) fn new(id: HostileId, position: TilePosition, facing: Facing, tuning: &Tuning) -> Self {
        Self {
            id,
            mount: Mount::new(position, facing),
            range: tuning.turret_range,
        }
    }

    pub(crate) fn tick(&mut self, dt: Duration, target: &Target, tuning: &Tuning) -> Option<Shot> {
        let mount = &mut self.mount;
        mount.fire_cooldown = mount.fire_cooldown.saturating_sub(dt);
        mount.rotation.advance(tuning.rotation_step_degrees);
        if self.is_rotating() {
            return None;
        }

        if let Some(shot) = self.engage(target, tuning.fire_margin, tuning.turret_fire_frequency()) {
            return Some(shot);
        }

        if target.started
            && target.alive
            && self.in_range(target, tuning.fire_margin)
            && !self.is_ahead(target)
        {
            let facing = dominant_facing(self.mount.point(), target.position);
            if facing != self.mount.facing {
                debug!(turret = self.id.get(), %facing, "turret_tracking");
                self.mount.turn(facing);
            }
        }
        None
    }
}

impl Engagement for Turret {
    fn mount(&self) -> &Mount {
        &self.mount
    }

    fn mount_mut(&mut self) -> &mut Mount {
        &mut self.mount
    }

    fn range(&self) -> f32 {
        self.range
    }
}

/// Vessel sailing a clockwise routine of fixed-length legs.
#[derive(Clone, Debug)]
pub(crate) struct PatrolVessel {
    id: HostileId,
    mount: Mount,
    range: f32,
    travel_timer: Duration,
    steps_taken: u32,
}

impl PatrolVessel {
    pub(crate) fn new(id: HostileId, position: TilePosition, facing: Facing, tuning: &Tuning) -> Self {
        Self {
            id,
            mount: Mount::new(position, facing),
            range: tuning.patrol_range,
            travel_timer: tuning.travel_frequency(),
            steps_taken: 0,
        }
    }

    pub(crate) fn tick(
        &mut self,
        dt: Duration,
        target: &Target,
        grid: &MapGrid,
        tuning: &Tuning,
    ) -> Option<Shot> {
        self.mount.fire_cooldown = self.mount.fire_cooldown.saturating_sub(dt);
        if self.is_rotating() {
            self.mount.rotation.advance(tuning.rotation_step_degrees);
            return None;
        }

        self.travel_timer = self.travel_timer.saturating_sub(dt);
        if self.travel_timer.is_zero() {
            self.travel_timer = tuning.travel_frequency();
            self.sail(grid, tuning.travel_routine_steps);
            if self.is_rotating() {
                return None;
            }
        }

        self.engage(target, tuning.fire_margin, tuning.patrol_fire_frequency())
    }

    fn sail(&mut self, grid: &MapGrid, routine_steps: u32) {
        if self.steps_taken >= routine_steps {
            self.come_about();
            return;
        }

        let next = self.mount.position.step(self.mount.facing, 1);
        if grid.is_passable(next) {
            self.mount.position = next;
            self.steps_taken = self.steps_taken.saturating_add(1);
        } else {
            debug!(
                vessel = self.id.get(),
                steps = self.steps_taken,
                "patrol_leg_cut_short"
            );
            self.come_about();
        }
    }

    fn come_about(&mut self) {
        self.steps_taken = 0;
        let facing = self.mount.facing.clockwise();
        self.mount.turn(facing);
    }
}

impl Engagement for PatrolVessel {
    fn mount(&self) -> &Mount {
        &self.mount
    }

    fn mount_mut(&mut self) -> &mut Mount {
        &mut self.mount
    }

    fn range(&self) -> f32 {
        self.range
    }
}

/// Identity and placement accessors used by the registry.
pub(crate) trait Hostile: Engagement {
    const KIND: HostileKind;

    fn id(&self) -> HostileId;

    fn point(&self) -> WorldPoint {
        self.mount().point()
    }

    fn snapshot(&self) -> HostileSnapshot {
        let mount = self.mount();
        HostileSnapshot {
            id: self.id(),
            kind: Self::KIND,
            position: mount.position,
            facing: self.current_facing(),
            angle_degrees: mount.rotation.angle(),
            rotating: self.is_rotating(),
            fire_cooldown: self.fire_cooldown_remaining(),
            range: self.range(),
        }
    }
}

impl Hostile for Turret {
    const KIND: HostileKind = HostileKind::Turret;

    fn id(&self) -> HostileId {
        self.id
    }
}

impl Hostile for PatrolVessel {
    const KIND: HostileKind = HostileKind::PatrolVessel;

    fn id(&self) -> HostileId {
        self.id
    }
}

/// Facing along the axis on which `to` is farthest from `from`; ties favor the vertical axis.
fn dominant_facing(from: WorldPoint, to: WorldPoint) -> Facing {
    let dx = to.x() - from.x();
    let dy = to.y() - from.y();
    if dx.abs() > dy.abs() {
        if dx > 0.0 {
            Facing::Right
        } else {
            Facing::Left
        }
    } else if dy > 0.0 {
        Facing::Down
    } else {
        Facing::Up
    }
}
