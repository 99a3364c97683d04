//! Work item types.
//!
//! A work item is a recurring block of scheduled effort (a workout, a study
//! session, a chore). Items carry their weekly recurrence pattern plus the
//! metadata the reporting and gamification layers consume.

pub mod registry;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Life domain a work item belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Job or project work.
    Work,
    /// Physical training.
    Fitness,
    /// Study and skill building.
    Learning,
    /// Rest, recovery, appointments.
    Health,
}

impl Default for Category {
    fn default() -> Self {
        Category::Work
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Work => "work",
            Category::Fitness => "fitness",
            Category::Learning => "learning",
            Category::Health => "health",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "work" => Ok(Category::Work),
            "fitness" => Ok(Category::Fitness),
            "learning" => Ok(Category::Learning),
            "health" => Ok(Category::Health),
            other => Err(format!(
                "unknown category '{other}' (expected work, fitness, learning or health)"
            )),
        }
    }
}

/// Equipment required to perform a work item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Equipment {
    /// No equipment needed.
    None,
    /// Full gym access.
    Gym,
    /// Dumbbells at home.
    Dumbbells,
    /// Yoga mat.
    YogaMat,
}

impl Default for Equipment {
    fn default() -> Self {
        Equipment::None
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Equipment::None => "none",
            Equipment::Gym => "gym",
            Equipment::Dumbbells => "dumbbells",
            Equipment::YogaMat => "yoga-mat",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Equipment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Equipment::None),
            "gym" => Ok(Equipment::Gym),
            "dumbbells" => Ok(Equipment::Dumbbells),
            "yoga-mat" => Ok(Equipment::YogaMat),
            other => Err(format!(
                "unknown equipment '{other}' (expected none, gym, dumbbells or yoga-mat)"
            )),
        }
    }
}

/// A registered work item.
///
/// Field names serialize in camelCase so snapshots stay readable next to
/// exports from earlier versions of the app.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    /// Unique identifier, assigned at registration
    pub id: String,
    /// Display name
    pub name: String,
    /// Life domain
    pub category: Category,
    /// Effort level 1-10
    pub intensity: u8,
    /// Equipment needed
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    /// Daily start time as 24-hour HH:mm
    pub start_time: String,
    /// Session length in minutes
    pub duration_minutes: u32,
    /// Optional importance weight 1-5 used by daily reporting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u8>,
    /// Days of week the item recurs on (0=Sunday, 6=Saturday)
    #[serde(default)]
    pub frequency_days: Vec<u8>,
    /// Informational plan length in days
    pub total_duration_days: u32,
    /// Completion percentage that counts as done for a day (0-100)
    pub expected_goal_percent: u8,
    /// Creation timestamp, immutable
    pub created_at: DateTime<Utc>,
    /// Soft-hidden but kept for history
    #[serde(default)]
    pub is_ghost: bool,
    /// Parked in the unscheduled backlog; excluded from day views
    #[serde(default)]
    pub is_parking_lot: bool,
    /// Deadline this item was back-cast from, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    /// Pins the item to a single calendar date instead of a weekly repeat
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDate>,
}

impl WorkItem {
    /// Checks the same field rules as [`WorkDraft::validate`].
    ///
    /// Used to re-validate an item after a patch has been merged in.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(
            &self.name,
            &self.start_time,
            self.duration_minutes,
            self.intensity,
            self.expected_goal_percent,
            self.weight,
            &self.frequency_days,
        )
    }
}

/// Input for registering a work item: everything except the identity and
/// creation timestamp, which the registry stamps on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkDraft {
    pub name: String,
    pub category: Category,
    pub intensity: u8,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    pub start_time: String,
    pub duration_minutes: u32,
    #[serde(default)]
    pub weight: Option<u8>,
    #[serde(default)]
    pub frequency_days: Vec<u8>,
    pub total_duration_days: u32,
    pub expected_goal_percent: u8,
    #[serde(default)]
    pub is_ghost: bool,
    #[serde(default)]
    pub is_parking_lot: bool,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub scheduled_date: Option<NaiveDate>,
}

impl Default for WorkDraft {
    /// Mirrors the add-work form defaults.
    fn default() -> Self {
        WorkDraft {
            name: String::new(),
            category: Category::Work,
            intensity: 5,
            equipment: Vec::new(),
            start_time: "09:00".to_string(),
            duration_minutes: 30,
            weight: None,
            frequency_days: Vec::new(),
            total_duration_days: 1,
            expected_goal_percent: 100,
            is_ghost: false,
            is_parking_lot: false,
            deadline: None,
            scheduled_date: None,
        }
    }
}

impl WorkDraft {
    /// Create a draft with the given name and category, form defaults for
    /// the rest.
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        WorkDraft {
            name: name.into(),
            category,
            ..Default::default()
        }
    }

    /// A 'someday' item parked straight into the backlog.
    pub fn parked(name: impl Into<String>) -> Self {
        WorkDraft {
            name: name.into(),
            category: Category::Work,
            intensity: 1,
            start_time: "00:00".to_string(),
            duration_minutes: 30,
            is_parking_lot: true,
            ..Default::default()
        }
    }

    /// Checks field rules before registration.
    ///
    /// Rules: non-empty name, parseable HH:mm start time, positive duration,
    /// intensity 1-10, goal percent 0-100, weight 1-5 when present, and
    /// every recurrence day in 0..=6.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(
            &self.name,
            &self.start_time,
            self.duration_minutes,
            self.intensity,
            self.expected_goal_percent,
            self.weight,
            &self.frequency_days,
        )
    }

    /// Consume the draft into a full item with the given identity.
    pub fn into_item(self, id: String) -> WorkItem {
        WorkItem {
            id,
            name: self.name,
            category: self.category,
            intensity: self.intensity,
            equipment: self.equipment,
            start_time: self.start_time,
            duration_minutes: self.duration_minutes,
            weight: self.weight,
            frequency_days: self.frequency_days,
            total_duration_days: self.total_duration_days,
            expected_goal_percent: self.expected_goal_percent,
            created_at: Utc::now(),
            is_ghost: self.is_ghost,
            is_parking_lot: self.is_parking_lot,
            deadline: self.deadline,
            scheduled_date: self.scheduled_date,
        }
    }
}

/// Partial update for a work item. `None` fields are left untouched.
///
/// Identity, creation timestamp, deadline and scheduled date are not
/// patchable; the latter two belong to back-cast plans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkPatch {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub intensity: Option<u8>,
    pub equipment: Option<Vec<Equipment>>,
    pub start_time: Option<String>,
    pub duration_minutes: Option<u32>,
    pub weight: Option<u8>,
    pub frequency_days: Option<Vec<u8>>,
    pub total_duration_days: Option<u32>,
    pub expected_goal_percent: Option<u8>,
    pub is_ghost: Option<bool>,
    pub is_parking_lot: Option<bool>,
}

impl WorkPatch {
    /// Merge the set fields into `item`.
    pub fn apply(&self, item: &mut WorkItem) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(intensity) = self.intensity {
            item.intensity = intensity;
        }
        if let Some(equipment) = &self.equipment {
            item.equipment = equipment.clone();
        }
        if let Some(start_time) = &self.start_time {
            item.start_time = start_time.clone();
        }
        if let Some(duration) = self.duration_minutes {
            item.duration_minutes = duration;
        }
        if let Some(weight) = self.weight {
            item.weight = Some(weight);
        }
        if let Some(days) = &self.frequency_days {
            item.frequency_days = days.clone();
        }
        if let Some(total) = self.total_duration_days {
            item.total_duration_days = total;
        }
        if let Some(goal) = self.expected_goal_percent {
            item.expected_goal_percent = goal;
        }
        if let Some(ghost) = self.is_ghost {
            item.is_ghost = ghost;
        }
        if let Some(parked) = self.is_parking_lot {
            item.is_parking_lot = parked;
        }
    }
}

fn validate_fields(
    name: &str,
    start_time: &str,
    duration_minutes: u32,
    intensity: u8,
    expected_goal_percent: u8,
    weight: Option<u8>,
    frequency_days: &[u8],
) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if NaiveTime::parse_from_str(start_time, "%H:%M").is_err() {
        return Err(ValidationError::InvalidStartTime(start_time.to_string()));
    }
    if duration_minutes == 0 {
        return Err(ValidationError::ZeroDuration);
    }
    if !(1..=10).contains(&intensity) {
        return Err(ValidationError::OutOfRange {
            field: "intensity",
            value: i64::from(intensity),
            min: 1,
            max: 10,
        });
    }
    if expected_goal_percent > 100 {
        return Err(ValidationError::OutOfRange {
            field: "expectedGoalPercent",
            value: i64::from(expected_goal_percent),
            min: 0,
            max: 100,
        });
    }
    if let Some(w) = weight {
        if !(1..=5).contains(&w) {
            return Err(ValidationError::OutOfRange {
                field: "weight",
                value: i64::from(w),
                min: 1,
                max: 5,
            });
        }
    }
    if let Some(&day) = frequency_days.iter().find(|&&d| d > 6) {
        return Err(ValidationError::OutOfRange {
            field: "frequencyDays",
            value: i64::from(day),
            min: 0,
            max: 6,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> WorkDraft {
        WorkDraft {
            name: "Morning run".to_string(),
            category: Category::Fitness,
            intensity: 6,
            equipment: vec![Equipment::None],
            start_time: "07:30".to_string(),
            duration_minutes: 45,
            frequency_days: vec![1, 3, 5],
            ..Default::default()
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn empty_name_rejected() {
        let mut d = draft();
        d.name = "   ".to_string();
        assert_eq!(d.validate(), Err(ValidationError::EmptyName));
    }

    #[test]
    fn bad_start_time_rejected() {
        let mut d = draft();
        d.start_time = "25:00".to_string();
        assert_eq!(
            d.validate(),
            Err(ValidationError::InvalidStartTime("25:00".to_string()))
        );

        d.start_time = "noonish".to_string();
        assert!(d.validate().is_err());
    }

    #[test]
    fn zero_duration_rejected() {
        let mut d = draft();
        d.duration_minutes = 0;
        assert_eq!(d.validate(), Err(ValidationError::ZeroDuration));
    }

    #[test]
    fn intensity_range_enforced() {
        let mut d = draft();
        d.intensity = 0;
        assert!(matches!(
            d.validate(),
            Err(ValidationError::OutOfRange {
                field: "intensity",
                ..
            })
        ));
        d.intensity = 11;
        assert!(d.validate().is_err());
        d.intensity = 10;
        assert!(d.validate().is_ok());
    }

    #[test]
    fn weight_range_enforced() {
        let mut d = draft();
        d.weight = Some(0);
        assert!(d.validate().is_err());
        d.weight = Some(6);
        assert!(d.validate().is_err());
        d.weight = Some(3);
        assert!(d.validate().is_ok());
    }

    #[test]
    fn frequency_day_range_enforced() {
        let mut d = draft();
        d.frequency_days = vec![0, 6];
        assert!(d.validate().is_ok());
        d.frequency_days = vec![2, 7];
        assert!(matches!(
            d.validate(),
            Err(ValidationError::OutOfRange {
                field: "frequencyDays",
                ..
            })
        ));
    }

    #[test]
    fn goal_percent_capped_at_100() {
        let mut d = draft();
        d.expected_goal_percent = 101;
        assert!(d.validate().is_err());
        d.expected_goal_percent = 0;
        assert!(d.validate().is_ok());
    }

    #[test]
    fn into_item_preserves_fields() {
        let item = draft().into_item("work-9".to_string());
        assert_eq!(item.id, "work-9");
        assert_eq!(item.name, "Morning run");
        assert_eq!(item.category, Category::Fitness);
        assert_eq!(item.frequency_days, vec![1, 3, 5]);
        assert!(!item.is_parking_lot);
        assert!(item.deadline.is_none());
    }

    #[test]
    fn parked_draft_defaults() {
        let d = WorkDraft::parked("Read stoicism book");
        assert!(d.is_parking_lot);
        assert_eq!(d.intensity, 1);
        assert_eq!(d.start_time, "00:00");
        assert_eq!(d.duration_minutes, 30);
        assert!(d.frequency_days.is_empty());
        assert!(d.validate().is_ok());
    }

    #[test]
    fn patch_merges_only_set_fields() {
        let mut item = draft().into_item("work-1".to_string());
        let patch = WorkPatch {
            name: Some("Evening run".to_string()),
            intensity: Some(8),
            ..Default::default()
        };
        patch.apply(&mut item);
        assert_eq!(item.name, "Evening run");
        assert_eq!(item.intensity, 8);
        assert_eq!(item.start_time, "07:30");
        assert_eq!(item.duration_minutes, 45);
    }

    #[test]
    fn work_item_serialization_camel_case() {
        let item = draft().into_item("abc".to_string());
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"startTime\":\"07:30\""));
        assert!(json.contains("\"frequencyDays\":[1,3,5]"));
        assert!(json.contains("\"expectedGoalPercent\":100"));
        assert!(json.contains("\"isParkingLot\":false"));
        // unset options stay out of the blob
        assert!(!json.contains("weight"));
        assert!(!json.contains("deadline"));

        let back: WorkItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, item.id);
        assert_eq!(back.category, Category::Fitness);
    }

    #[test]
    fn category_and_equipment_round_trip_strings() {
        assert_eq!("learning".parse::<Category>().unwrap(), Category::Learning);
        assert_eq!(Category::Health.to_string(), "health");
        assert_eq!(
            "yoga-mat".parse::<Equipment>().unwrap(),
            Equipment::YogaMat
        );
        assert_eq!(Equipment::YogaMat.to_string(), "yoga-mat");
        assert!("treadmill".parse::<Equipment>().is_err());

        let json = serde_json::to_string(&Equipment::YogaMat).unwrap();
        assert_eq!(json, "\"yoga-mat\"");
    }
}
