//! Cosmetic sprite rotation that trails the logical facing.

const FULL_TURN: f32 = 360.0;
const HALF_TURN: f32 = 180.0;

/// Sprite angle interpolating toward a target along the shortest arc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Rotation {
    angle: f32,
    target: Option<f32>,
}

impl Rotation {
    pub(crate) fn settled(angle: f32) -> Self {
        Self {
            angle: angle.rem_euclid(FULL_TURN),
            target: None,
        }
    }

    pub(crate) const fn angle(&self) -> f32 {
        self.angle
    }

    pub(crate) const fn is_rotating(&self) -> bool {
        self.target.is_some()
    }

    /// Starts turning toward `target`; a no-op when already there.
    pub(crate) fn turn_to(&mut self, target: f32) {
        let target = target.rem_euclid(FULL_TURN);
        self.target = if shortest_arc(self.angle, target) == 0.0 {
            None
        } else {
            Some(target)
        };
    }

    /// Advances by at most `step` degrees, settling once the target is reached.
    pub(crate) fn advance(&mut self, step: f32) {
        let Some(target) = self.target else {
            return;
        };

        let remaining = shortest_arc(self.angle, target);
        if step <= 0.0 || remaining.abs() <= step {
            self.angle = target;
            self.target = None;
        } else {
            self.angle = (self.angle + step.copysign(remaining)).rem_euclid(FULL_TURN);
        }
    }
}

/// Signed angle in `(-180, 180]` that turns `from` onto `to`.
fn shortest_arc(from: f32, to: f32) -> f32 {
    let delta = (to - from).rem_euclid(FULL_TURN);
    if delta > HALF_TURN {
        delta - FULL_TURN
    } else {
        delta
    }
}
