use pirate_flow_core::{Achievement, PlayerStats};

use crate::tuning::Tuning;

/// Records which goals have been met, in the order they were met.
#[derive(Clone, Debug, Default)]
pub(crate) struct AchievementTracker {
    unlocked: Vec<Achievement>,
}

impl AchievementTracker {
    pub(crate) fn unlocked(&self) -> &[Achievement] {
        &self.unlocked
    }

    /// Compares the counters against every goal and returns the newly met ones.
    pub(crate) fn evaluate(&mut self, stats: &PlayerStats, tuning: &Tuning) -> Vec<Achievement> {
        let mut fresh = Vec::new();
        for achievement in Achievement::ALL {
            if self.unlocked.contains(&achievement) || !goal_met(achievement, stats, tuning) {
                continue;
            }
            self.unlocked.push(achievement);
            fresh.push(achievement);
        }
        fresh
    }
}

fn goal_met(achievement: Achievement, stats: &PlayerStats, tuning: &Tuning) -> bool {
    match achievement {
        Achievement::Marksman => stats.hostiles_eliminated >= tuning.marksman_goal,
        Achievement::Voyager => stats.tiles_travelled >= tuning.voyager_goal,
        Achievement::Treasurer => stats.score >= tuning.treasurer_goal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goals_unlock_once_and_stay_unlocked() {
        let tuning = Tuning {
            voyager_goal: 2,
            ..Tuning::default()
        };
        let mut tracker = AchievementTracker::default();
        let mut stats = PlayerStats::default();

        stats.tiles_travelled = 1;
        assert!(tracker.evaluate(&stats, &tuning).is_empty());

        stats.tiles_travelled = 2;
        assert_eq!(tracker.evaluate(&stats, &tuning), vec![Achievement::Voyager]);
        assert!(tracker.evaluate(&stats, &tuning).is_empty());

        stats.tiles_travelled = 0;
        assert!(tracker.evaluate(&stats, &tuning).is_empty());
        assert_eq!(tracker.unlocked(), &[Achievement::Voyager]);
    }

    #[test]
    fn unlock_order_follows_the_counters() {
        let tuning = Tuning {
            marksman_goal: 1,
            treasurer_goal: 100,
            ..Tuning::default()
        };
        let mut tracker = AchievementTracker::default();

        let _ = tracker.evaluate(
            &PlayerStats {
                score: 100,
                ..PlayerStats::default()
            },
            &tuning,
        );
        let _ = tracker.evaluate(
            &PlayerStats {
                score: 100,
                hostiles_eliminated: 1,
                ..PlayerStats::default()
            },
            &tuning,
        );

        assert_eq!(
            tracker.unlocked(),
            &[Achievement::Treasurer, Achievement::Marksman]
        );
    }
}
