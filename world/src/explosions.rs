use std::time::Duration;

use pirate_flow_core::{ExplosionSize, WorldPoint};

/// Short frame-by-frame animation spawned where a projectile lands.
#[derive(Clone, Debug)]
pub(crate) struct Explosion {
    position: WorldPoint,
    size: ExplosionSize,
    frame: u32,
    frame_timer: Duration,
}

impl Explosion {
    pub(crate) fn new(position: WorldPoint, size: ExplosionSize, frame_duration: Duration) -> Self {
        Self {
            position,
            size,
            frame: 0,
            frame_timer: frame_duration,
        }
    }

    pub(crate) const fn position(&self) -> WorldPoint {
        self.position
    }

    pub(crate) const fn size(&self) -> ExplosionSize {
        self.size
    }

    pub(crate) const fn frame(&self) -> u32 {
        self.frame
    }

    /// The animation is finished once it shows its last frame.
    pub(crate) const fn is_finished(&self, frames: u32) -> bool {
        self.frame.saturating_add(1) >= frames
    }

    pub(crate) fn age(&mut self, dt: Duration, frame_duration: Duration, frames: u32) {
        if self.is_finished(frames) {
            return;
        }
        self.frame_timer = self.frame_timer.saturating_sub(dt);
        if self.frame_timer.is_zero() {
            self.frame += 1;
            self.frame_timer = frame_duration;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_one_frame_per_frame_duration() {
        let frame = Duration::from_millis(80);
        let mut explosion = Explosion::new(WorldPoint::new(1.0, 1.0), ExplosionSize::Small, frame);

        explosion.age(Duration::from_millis(40), frame, 3);
        assert_eq!(explosion.frame(), 0);
        explosion.age(Duration::from_millis(40), frame, 3);
        assert_eq!(explosion.frame(), 1);
        assert!(!explosion.is_finished(3));

        explosion.age(frame, frame, 3);
        assert_eq!(explosion.frame(), 2);
        assert!(explosion.is_finished(3));

        explosion.age(frame, frame, 3);
        assert_eq!(explosion.frame(), 2);
    }

    #[test]
    fn single_frame_animation_is_finished_immediately() {
        let explosion = Explosion::new(WorldPoint::new(0.0, 0.0), ExplosionSize::Large, Duration::ZERO);
        assert!(explosion.is_finished(1));
    }
}
