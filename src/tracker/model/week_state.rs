use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    habit::{Habit, default_habits},
    section::Section,
};

/// Completion marks of a single habit, Monday first.
pub type DayTicks = [bool; 7];

pub const WIN_SLOTS: usize = 5;

/// Everything recorded about one calendar week. The week itself is not part of the record, it is
/// the key the record is stored under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekState {
    pub metadata: Metadata,
    #[serde(default)]
    pub metrics: Metrics,
    pub habits: Vec<Habit>,
    pub ticks: BTreeMap<String, DayTicks>,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub one_time: OneTimeReflection,
    #[serde(default)]
    pub wins: [String; WIN_SLOTS],
    #[serde(default)]
    pub weekly: WeeklyReflection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub created_at: DateTime<Utc>,
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Opaque reference to an image, usually a path or an url.
    #[serde(default)]
    pub logo: Option<String>,
}

fn default_theme() -> String {
    "calm".into()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metrics {
    /// Name of a real world number the user cares about this week, like "weight" or "runs".
    pub metric_label: String,
    pub metric_value: Option<f64>,
    /// Screen time target in minutes per day.
    pub screen_target: u32,
    /// Minutes spent on inner work, Monday first.
    pub daily_minutes: [u32; 7],
    /// How much of the week the user thinks went to inner work, 0..=100.
    pub inner_share_estimate: Option<u8>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            metric_label: String::new(),
            metric_value: None,
            screen_target: 120,
            daily_minutes: [0; 7],
            inner_share_estimate: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OneTimeReflection {
    pub intention: String,
    pub obstacles: String,
    pub support: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeeklyReflection {
    pub went_well: String,
    pub challenges: String,
    pub next_focus: String,
    /// 1..=10
    pub rating: Option<u8>,
}

impl WeekState {
    /// State of a week nobody has touched yet.
    pub fn new_default(created_at: DateTime<Utc>) -> Self {
        let habits = default_habits();
        let ticks = habits
            .iter()
            .map(|habit| (habit.id.clone(), DayTicks::default()))
            .collect();
        Self {
            metadata: Metadata {
                created_at,
                theme: default_theme(),
                logo: None,
            },
            metrics: Metrics::default(),
            habits,
            ticks,
            sections: vec![],
            one_time: OneTimeReflection::default(),
            wins: Default::default(),
            weekly: WeeklyReflection::default(),
        }
    }

    /// Restores invariants that hand edited or imported documents might break: every habit has a
    /// tick row, and no row outlives its habit.
    pub fn normalized(mut self) -> Self {
        for habit in &self.habits {
            self.ticks.entry(habit.id.clone()).or_default();
        }
        let habits = &self.habits;
        self.ticks
            .retain(|id, _| habits.iter().any(|habit| &habit.id == id));
        if let Some(rating) = self.weekly.rating {
            self.weekly.rating = Some(rating.clamp(1, 10));
        }
        if let Some(share) = self.metrics.inner_share_estimate {
            self.metrics.inner_share_estimate = Some(share.min(100));
        }
        self
    }

    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|habit| habit.id == id)
    }

    pub fn habit_mut(&mut self, id: &str) -> Option<&mut Habit> {
        self.habits.iter_mut().find(|habit| habit.id == id)
    }

    pub fn enabled_habits(&self) -> impl Iterator<Item = &Habit> {
        self.habits.iter().filter(|habit| habit.enabled)
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id() == id)
    }

    pub fn section_mut(&mut self, id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|section| section.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{DayTicks, WeekState};

    #[test]
    fn test_default_has_row_per_habit() {
        let state = WeekState::new_default(Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap());
        assert_eq!(state.habits.len(), state.ticks.len());
        for habit in &state.habits {
            assert_eq!(state.ticks[&habit.id], DayTicks::default());
        }
        assert!(state.wins.iter().all(String::is_empty));
    }

    #[test]
    fn test_normalize_fills_and_drops_rows() {
        let mut state = WeekState::new_default(Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap());
        state.ticks.remove("sleep");
        state.ticks.insert("ghost".into(), [true; 7]);
        state.weekly.rating = Some(42);

        let state = state.normalized();

        assert!(state.ticks.contains_key("sleep"));
        assert!(!state.ticks.contains_key("ghost"));
        assert_eq!(state.weekly.rating, Some(10));
    }

    #[test]
    fn test_missing_optional_fields_take_defaults() {
        let json = r#"{
            "metadata": {"createdAt": "2025-03-10T08:00:00Z"},
            "habits": [{"id": "read", "name": "Read", "kind": "inner"}],
            "ticks": {"read": [true, false, false, false, false, false, false]}
        }"#;
        let state: WeekState = serde_json::from_str(json).unwrap();
        assert_eq!(state.metadata.theme, "calm");
        assert!(state.habits[0].enabled);
        assert_eq!(state.metrics.daily_minutes, [0; 7]);
        assert!(state.sections.is_empty());
    }
}
