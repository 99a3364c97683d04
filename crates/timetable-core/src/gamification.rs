//! Experience and level tracking.
//!
//! Levels are derived from lifetime experience: every 1000 XP is one
//! level, starting at level 1. The profile also carries the user's
//! training preferences consumed by day planning.

use serde::{Deserialize, Serialize};

use crate::work::Equipment;

/// Fixed bonus for completing a weekly challenge.
pub const CHALLENGE_XP_BONUS: i64 = 500;

/// Training goal driving suggested work.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FitnessGoal {
    General,
    WeightLoss,
    Muscle,
    Endurance,
}

impl Default for FitnessGoal {
    fn default() -> Self {
        FitnessGoal::General
    }
}

impl std::str::FromStr for FitnessGoal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(FitnessGoal::General),
            "weight-loss" => Ok(FitnessGoal::WeightLoss),
            "muscle" => Ok(FitnessGoal::Muscle),
            "endurance" => Ok(FitnessGoal::Endurance),
            other => Err(format!(
                "unknown goal '{other}' (expected general, weight-loss, muscle or endurance)"
            )),
        }
    }
}

/// The user's gamified profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FitnessProfile {
    /// Current level, always derived from xp
    pub level: i64,
    /// Lifetime experience points
    pub xp: i64,
    /// Consecutive active days
    pub streak: u32,
    /// Training goal
    pub fitness_goal: FitnessGoal,
    /// Equipment the user has access to
    pub available_equipment: Vec<Equipment>,
}

impl Default for FitnessProfile {
    fn default() -> Self {
        FitnessProfile {
            level: 1,
            xp: 0,
            streak: 0,
            fitness_goal: FitnessGoal::General,
            available_equipment: vec![Equipment::None],
        }
    }
}

/// Level for a lifetime experience total: `floor(xp / 1000) + 1`.
pub fn level_for_xp(xp: i64) -> i64 {
    xp.div_euclid(1000) + 1
}

/// Partial update for the profile.
///
/// Level is not patchable: it is recomputed whenever xp changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfilePatch {
    pub xp: Option<i64>,
    pub streak: Option<u32>,
    pub fitness_goal: Option<FitnessGoal>,
    pub available_equipment: Option<Vec<Equipment>>,
}

/// Owns the profile and applies experience arithmetic.
#[derive(Debug, Clone, Default)]
pub struct GamificationEngine {
    profile: FitnessProfile,
}

impl GamificationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a previously stored profile.
    ///
    /// The stored level is ignored and re-derived from xp, so a snapshot
    /// edited by hand cannot carry an inconsistent pair.
    pub fn from_profile(mut profile: FitnessProfile) -> Self {
        profile.level = level_for_xp(profile.xp);
        GamificationEngine { profile }
    }

    pub fn profile(&self) -> &FitnessProfile {
        &self.profile
    }

    /// Add experience (from progress logs, challenges, rewards) and
    /// recompute the level. Crossing one or more 1000-XP boundaries in a
    /// single call is fine; callers detect a level-up by comparing the
    /// level before and after.
    pub fn add_xp(&mut self, amount: i64) -> &FitnessProfile {
        self.profile.xp += amount;
        self.profile.level = level_for_xp(self.profile.xp);
        &self.profile
    }

    /// Merge a patch into the profile. Setting xp recomputes the level.
    pub fn update_profile(&mut self, patch: &ProfilePatch) -> &FitnessProfile {
        if let Some(xp) = patch.xp {
            self.profile.xp = xp;
            self.profile.level = level_for_xp(xp);
        }
        if let Some(streak) = patch.streak {
            self.profile.streak = streak;
        }
        if let Some(goal) = patch.fitness_goal {
            self.profile.fitness_goal = goal;
        }
        if let Some(equipment) = &patch.available_equipment {
            self.profile.available_equipment = equipment.clone();
        }
        &self.profile
    }
}
