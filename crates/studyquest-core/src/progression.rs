//! Experience-point progression model.
//!
//! Levels are a pure function of accumulated XP: every [`XP_PER_LEVEL`]
//! points is one level, starting at level 1. Nothing here mutates state;
//! the state module calls back into these functions after every award.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// XP required to advance one level.
pub const XP_PER_LEVEL: u64 = 1000;

/// Level for a given XP total. `xp / XP_PER_LEVEL + 1`, so 0 XP is level 1.
pub fn level_for(xp: u64) -> u32 {
    ((xp / XP_PER_LEVEL) + 1).min(u32::MAX as u64) as u32
}

/// Fraction of the way through the current level, in `[0, 1)`.
pub fn progress_fraction(xp: u64) -> f64 {
    (xp % XP_PER_LEVEL) as f64 / XP_PER_LEVEL as f64
}

/// XP accumulated within the current level.
pub fn xp_into_level(xp: u64) -> u64 {
    xp % XP_PER_LEVEL
}

/// XP still needed to reach the next level.
pub fn xp_to_next_level(xp: u64) -> u64 {
    XP_PER_LEVEL - xp_into_level(xp)
}

/// An achievement badge. The catalog ships with the crate; unlocked badges
/// live in `UserStats::badges` with `unlocked_at` set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    #[serde(default)]
    pub unlocked_at: Option<DateTime<Utc>>,
}

/// The built-in badge catalog.
pub fn badge_catalog() -> Vec<Badge> {
    let catalog = [
        ("early_bird", "Early Bird", "Complete a task 24h before deadline", "🌅"),
        ("study_warrior", "Study Warrior", "Complete 10 assignments", "⚔️"),
        ("perfectionist", "Perfectionist", "No missed classes for a week", "💎"),
        ("night_owl", "Night Owl", "Finish a task after 10 PM", "🦉"),
        ("first_blood", "First Blood", "Complete your first assignment", "🩸"),
    ];
    catalog.iter()
        .map(|(id, name, description, icon)| Badge {
            id: (*id).to_string(),
            name: (*name).to_string(),
            description: (*description).to_string(),
            icon: (*icon).to_string(),
            unlocked_at: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn level_boundaries() {
        assert_eq!(level_for(0), 1);
        assert_eq!(level_for(999), 1);
        assert_eq!(level_for(1000), 2);
        assert_eq!(level_for(2500), 3);
    }

    #[test]
    fn progress_within_level() {
        assert_eq!(progress_fraction(0), 0.0);
        assert_eq!(progress_fraction(450), 0.45);
        assert_eq!(progress_fraction(1450), 0.45);
    }

    #[test]
    fn xp_to_next_counts_down() {
        assert_eq!(xp_to_next_level(0), 1000);
        assert_eq!(xp_to_next_level(999), 1);
        assert_eq!(xp_to_next_level(1000), 1000);
    }

    #[test]
    fn catalog_has_five_badges() {
        let catalog = badge_catalog();
        assert_eq!(catalog.len(), 5);
        assert!(catalog.iter().all(|b| b.unlocked_at.is_none()));
        assert_eq!(catalog[4].id, "first_blood");
    }

    proptest! {
        #[test]
        fn level_matches_formula(xp in 0u64..100_000_000) {
            prop_assert_eq!(level_for(xp) as u64, xp / XP_PER_LEVEL + 1);
        }

        #[test]
        fn level_is_monotonic(a in 0u64..10_000_000, b in 0u64..10_000_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(level_for(lo) <= level_for(hi));
        }

        #[test]
        fn progress_stays_in_unit_interval(xp in 0u64..100_000_000) {
            let p = progress_fraction(xp);
            prop_assert!((0.0..1.0).contains(&p));
        }
    }
}
