//! Tunable gameplay constants.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Every tunable constant consumed by the simulation.
///
/// Durations are stored in milliseconds so configuration files stay readable;
/// the accessor methods convert them into [`Duration`] values. Missing fields
/// take their defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    /// Energy the player starts with, also the energy cap.
    pub player_energy: u32,
    /// Minimum delay between two player shots.
    pub player_fire_frequency_ms: u64,
    /// Axis distance travelled by player projectiles before landing.
    pub player_projectile_range: f32,
    /// Delay between the player's death and the end of the game.
    pub dead_delay_ms: u64,
    /// Minimum delay between two turret shots.
    pub turret_fire_frequency_ms: u64,
    /// Engagement range of turrets in tiles.
    pub turret_range: f32,
    /// Minimum delay between two patrol-vessel shots.
    pub patrol_fire_frequency_ms: u64,
    /// Engagement range of patrol vessels in tiles.
    pub patrol_range: f32,
    /// Slack added to every engagement range.
    pub fire_margin: f32,
    /// Delay between two patrol-vessel steps.
    pub travel_frequency_ms: u64,
    /// Steps a patrol vessel takes before turning clockwise.
    pub travel_routine_steps: u32,
    /// Degrees a sprite rotates per tick while turning.
    pub rotation_step_degrees: f32,
    /// Tiles a projectile advances per tick.
    pub projectile_speed: f32,
    /// Phase advance of the projectile pulse animation per tick, in radians.
    pub projectile_pulse_step: f32,
    /// Peak deviation of the projectile scale from 1.
    pub projectile_pulse_amplitude: f32,
    /// Duration of one explosion frame.
    pub explosion_frame_ms: u64,
    /// Number of frames in an explosion animation.
    pub explosion_frames: u32,
    /// Score awarded for destroying a turret.
    pub turret_score: u64,
    /// Score awarded for destroying a patrol vessel.
    pub patrol_score: u64,
    /// Score awarded for picking up treasure.
    pub treasure_score: u64,
    /// Hostiles to eliminate for the marksman achievement.
    pub marksman_goal: u32,
    /// Tiles to travel for the voyager achievement.
    pub voyager_goal: u32,
    /// Score to reach for the treasurer achievement.
    pub treasurer_goal: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_energy: 5,
            player_fire_frequency_ms: 400,
            player_projectile_range: 8.0,
            dead_delay_ms: 2_000,
            turret_fire_frequency_ms: 1_500,
            turret_range: 6.0,
            patrol_fire_frequency_ms: 2_000,
            patrol_range: 5.0,
            fire_margin: 1.0,
            travel_frequency_ms: 600,
            travel_routine_steps: 4,
            rotation_step_degrees: 18.0,
            projectile_speed: 0.25,
            projectile_pulse_step: 0.35,
            projectile_pulse_amplitude: 0.15,
            explosion_frame_ms: 80,
            explosion_frames: 3,
            turret_score: 100,
            patrol_score: 150,
            treasure_score: 50,
            marksman_goal: 5,
            voyager_goal: 100,
            treasurer_goal: 1_000,
        }
    }
}

/// Reasons a tuning fails validation.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum TuningError {
    /// The value is NaN or infinite.
    #[error("tuning value `{field}` must be finite (received {value})")]
    NotFinite {
        /// Name of the offending field.
        field: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// The value must be strictly positive.
    #[error("tuning value `{field}` must be greater than zero (received {value})")]
    NotPositive {
        /// Name of the offending field.
        field: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// The value must not be negative.
    #[error("tuning value `{field}` must not be negative (received {value})")]
    Negative {
        /// Name of the offending field.
        field: &'static str,
        /// Rejected value.
        value: f32,
    },
}

impl Tuning {
    /// Checks that every floating-point constant is usable by the simulation.
    ///
    /// Projectiles need a positive speed to ever land, and rotations need a
    /// finite step to ever settle.
    pub fn validate(&self) -> Result<(), TuningError> {
        let _ = finite("rotation_step_degrees", self.rotation_step_degrees)?;
        let _ = finite("projectile_pulse_step", self.projectile_pulse_step)?;
        let _ = finite("projectile_pulse_amplitude", self.projectile_pulse_amplitude)?;
        for (field, value) in [
            ("player_projectile_range", self.player_projectile_range),
            ("turret_range", self.turret_range),
            ("patrol_range", self.patrol_range),
            ("fire_margin", self.fire_margin),
        ] {
            if finite(field, value)? < 0.0 {
                return Err(TuningError::Negative { field, value });
            }
        }
        let speed = finite("projectile_speed", self.projectile_speed)?;
        if speed <= 0.0 {
            return Err(TuningError::NotPositive {
                field: "projectile_speed",
                value: speed,
            });
        }
        Ok(())
    }

    /// Minimum delay between two player shots.
    #[must_use]
    pub const fn player_fire_frequency(&self) -> Duration {
        Duration::from_millis(self.player_fire_frequency_ms)
    }

    /// Delay between the player's death and the end of the game.
    #[must_use]
    pub const fn dead_delay(&self) -> Duration {
        Duration::from_millis(self.dead_delay_ms)
    }

    /// Minimum delay between two turret shots.
    #[must_use]
    pub const fn turret_fire_frequency(&self) -> Duration {
        Duration::from_millis(self.turret_fire_frequency_ms)
    }

    /// Minimum delay between two patrol-vessel shots.
    #[must_use]
    pub const fn patrol_fire_frequency(&self) -> Duration {
        Duration::from_millis(self.patrol_fire_frequency_ms)
    }

    /// Delay between two patrol-vessel steps.
    #[must_use]
    pub const fn travel_frequency(&self) -> Duration {
        Duration::from_millis(self.travel_frequency_ms)
    }

    /// Duration of one explosion frame.
    #[must_use]
    pub const fn explosion_frame(&self) -> Duration {
        Duration::from_millis(self.explosion_frame_ms)
    }
}

fn finite(field: &'static str, value: f32) -> Result<f32, TuningError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TuningError::NotFinite { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_files_keep_remaining_defaults() {
        let tuning: Tuning = toml::from_str(
            r#"
            player_energy = 3
            turret_fire_frequency_ms = 900
            "#,
        )
        .expect("tuning parses");

        assert_eq!(tuning.player_energy, 3);
        assert_eq!(tuning.turret_fire_frequency(), Duration::from_millis(900));
        assert_eq!(tuning.patrol_range, Tuning::default().patrol_range);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<Tuning>("cannon_power = 9").is_err());
    }

    #[test]
    fn defaults_are_valid() {
        assert_eq!(Tuning::default().validate(), Ok(()));
    }

    #[test]
    fn stalled_projectiles_are_rejected() {
        let tuning: Tuning = toml::from_str("projectile_speed = 0.0").expect("tuning parses");

        assert_eq!(
            tuning.validate(),
            Err(TuningError::NotPositive {
                field: "projectile_speed",
                value: 0.0,
            })
        );
    }

    #[test]
    fn nan_rotation_step_is_rejected() {
        let tuning = Tuning {
            rotation_step_degrees: f32::NAN,
            ..Tuning::default()
        };

        let error = tuning.validate().expect_err("NaN never settles");
        assert!(matches!(
            error,
            TuningError::NotFinite {
                field: "rotation_step_degrees",
                ..
            }
        ));
    }

    #[test]
    fn negative_ranges_are_rejected() {
        let tuning = Tuning {
            patrol_range: -1.0,
            ..Tuning::default()
        };

        assert_eq!(
            tuning.validate(),
            Err(TuningError::Negative {
                field: "patrol_range",
                value: -1.0,
            })
        );
    }
}
