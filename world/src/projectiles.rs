use pirate_flow_core::{Facing, ProjectileSnapshot, Shooter, WorldPoint};

/// Shell travelling in a straight line until it covers its assigned distance.
#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    shooter: Shooter,
    origin: WorldPoint,
    position: WorldPoint,
    facing: Facing,
    max_distance: f32,
    pulse_phase: f32,
}

impl Projectile {
    pub(crate) fn launch(shooter: Shooter, origin: WorldPoint, facing: Facing, max_distance: f32) -> Self {
        Self {
            shooter,
            origin,
            position: origin,
            facing,
            max_distance,
            pulse_phase: 0.0,
        }
    }

    pub(crate) const fn shooter(&self) -> Shooter {
        self.shooter
    }

    pub(crate) const fn position(&self) -> WorldPoint {
        self.position
    }

    pub(crate) const fn facing(&self) -> Facing {
        self.facing
    }

    pub(crate) fn advance(&mut self, speed: f32, pulse_step: f32) {
        self.position = self.position.advanced(self.facing, speed);
        self.pulse_phase += pulse_step;
    }

    /// Axis-aligned range check; diagonal offsets from the target are ignored.
    pub(crate) fn is_finished(&self) -> bool {
        self.position.axis_displacement(self.origin, self.facing) > self.max_distance
    }

    pub(crate) fn scale(&self, amplitude: f32) -> f32 {
        1.0 + amplitude * self.pulse_phase.sin()
    }

    pub(crate) fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            shooter: self.shooter,
            origin: self.origin,
            position: self.position,
            facing: self.facing,
            max_distance: self.max_distance,
        }
    }
}
