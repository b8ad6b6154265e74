use chrono::Weekday;
use clap::ValueEnum;
use tracing::debug;

use super::{
    habit::{Habit, HabitKind, slugify, unique_id},
    section::{ChecklistItem, Section, SectionKind},
    week_state::{DayTicks, WIN_SLOTS, WeekState},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OneTimeField {
    Intention,
    Obstacles,
    Support,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WeeklyField {
    WentWell,
    Challenges,
    NextFocus,
}

/// A partial change of a [WeekState]. Every variant can be applied to any state: references to
/// missing habits, sections or items are ignored.
#[derive(Debug, Clone, PartialEq)]
pub enum WeekUpdate {
    AddHabit { name: String, kind: HabitKind },
    RemoveHabit { id: String },
    RenameHabit { id: String, name: String },
    SetHabitEnabled { id: String, enabled: bool },
    SetHabitKind { id: String, kind: HabitKind },
    SetTick { id: String, day: Weekday, done: bool },
    ToggleTick { id: String, day: Weekday },

    AddSection { kind: SectionKind, title: String },
    RemoveSection { id: String },
    RenameSection { id: String, title: String },
    AddChecklistItem { id: String, text: String },
    ToggleChecklistItem { id: String, index: usize },
    RemoveChecklistItem { id: String, index: usize },
    SetNotes { id: String, text: String },
    SetNumber { id: String, value: f64 },

    SetMetric { label: String, value: Option<f64> },
    SetScreenTarget { minutes: u32 },
    SetDailyMinutes { day: Weekday, minutes: u32 },
    SetInnerShareEstimate { percent: Option<u8> },

    SetOneTime { field: OneTimeField, text: String },
    SetWin { index: usize, text: String },
    SetWeekly { field: WeeklyField, text: String },
    SetRating { rating: Option<u8> },

    SetTheme { theme: String },
    SetLogo { logo: Option<String> },
}

fn day_index(day: Weekday) -> usize {
    day.num_days_from_monday() as usize
}

impl WeekState {
    /// Applies `update` in place. Returns `false` when the update referenced something that doesn't
    /// exist and nothing changed.
    pub fn apply(&mut self, update: WeekUpdate) -> bool {
        let applied = match update.clone() {
            WeekUpdate::AddHabit { name, kind } => {
                let id = unique_id(slugify(&name, "habit"), |candidate| {
                    self.habit(candidate).is_some() || self.ticks.contains_key(candidate)
                });
                self.ticks.insert(id.clone(), DayTicks::default());
                self.habits.push(Habit::new(id, name, kind));
                true
            }
            WeekUpdate::RemoveHabit { id } => {
                let before = self.habits.len();
                self.habits.retain(|habit| habit.id != id);
                self.ticks.remove(&id);
                before != self.habits.len()
            }
            WeekUpdate::RenameHabit { id, name } => {
                self.habit_mut(&id).map(|habit| habit.name = name).is_some()
            }
            WeekUpdate::SetHabitEnabled { id, enabled } => match self.habit_mut(&id) {
                Some(habit) => {
                    habit.enabled = enabled;
                    // Rows of disabled habits are kept so re-enabling restores them.
                    self.ticks.entry(id).or_default();
                    true
                }
                None => false,
            },
            WeekUpdate::SetHabitKind { id, kind } => {
                self.habit_mut(&id).map(|habit| habit.kind = kind).is_some()
            }
            WeekUpdate::SetTick { id, day, done } => self
                .ticks
                .get_mut(&id)
                .map(|row| row[day_index(day)] = done)
                .is_some(),
            WeekUpdate::ToggleTick { id, day } => self
                .ticks
                .get_mut(&id)
                .map(|row| row[day_index(day)] = !row[day_index(day)])
                .is_some(),

            WeekUpdate::AddSection { kind, title } => {
                let id = unique_id(slugify(&title, "section"), |candidate| {
                    self.section(candidate).is_some()
                });
                self.sections.push(Section::empty(kind, id, title));
                true
            }
            WeekUpdate::RemoveSection { id } => {
                let before = self.sections.len();
                self.sections.retain(|section| section.id() != id);
                before != self.sections.len()
            }
            WeekUpdate::RenameSection { id, title } => self
                .section_mut(&id)
                .map(|section| *section.title_mut() = title)
                .is_some(),
            WeekUpdate::AddChecklistItem { id, text } => match self.section_mut(&id) {
                Some(Section::Checklist { items, .. }) => {
                    items.push(ChecklistItem { text, done: false });
                    true
                }
                _ => false,
            },
            WeekUpdate::ToggleChecklistItem { id, index } => match self.section_mut(&id) {
                Some(Section::Checklist { items, .. }) => items
                    .get_mut(index)
                    .map(|item| item.done = !item.done)
                    .is_some(),
                _ => false,
            },
            WeekUpdate::RemoveChecklistItem { id, index } => match self.section_mut(&id) {
                Some(Section::Checklist { items, .. }) if index < items.len() => {
                    items.remove(index);
                    true
                }
                _ => false,
            },
            WeekUpdate::SetNotes { id, text: new_text } => match self.section_mut(&id) {
                Some(Section::Notes { text, .. }) => {
                    *text = new_text;
                    true
                }
                _ => false,
            },
            // JSON can't hold NaN or infinities, such a week would not load back.
            WeekUpdate::SetNumber { value, .. } if !value.is_finite() => false,
            WeekUpdate::SetNumber { id, value: new_value } => match self.section_mut(&id) {
                Some(Section::Number { value, .. }) => {
                    *value = new_value;
                    true
                }
                _ => false,
            },

            WeekUpdate::SetMetric { value: Some(value), .. } if !value.is_finite() => false,
            WeekUpdate::SetMetric { label, value } => {
                self.metrics.metric_label = label;
                self.metrics.metric_value = value;
                true
            }
            WeekUpdate::SetScreenTarget { minutes } => {
                self.metrics.screen_target = minutes;
                true
            }
            WeekUpdate::SetDailyMinutes { day, minutes } => {
                self.metrics.daily_minutes[day_index(day)] = minutes;
                true
            }
            WeekUpdate::SetInnerShareEstimate { percent } => {
                self.metrics.inner_share_estimate = percent.map(|v| v.min(100));
                true
            }

            WeekUpdate::SetOneTime { field, text } => {
                let target = match field {
                    OneTimeField::Intention => &mut self.one_time.intention,
                    OneTimeField::Obstacles => &mut self.one_time.obstacles,
                    OneTimeField::Support => &mut self.one_time.support,
                };
                *target = text;
                true
            }
            WeekUpdate::SetWin { index, text } if index < WIN_SLOTS => {
                self.wins[index] = text;
                true
            }
            WeekUpdate::SetWin { .. } => false,
            WeekUpdate::SetWeekly { field, text } => {
                let target = match field {
                    WeeklyField::WentWell => &mut self.weekly.went_well,
                    WeeklyField::Challenges => &mut self.weekly.challenges,
                    WeeklyField::NextFocus => &mut self.weekly.next_focus,
                };
                *target = text;
                true
            }
            WeekUpdate::SetRating { rating } => {
                self.weekly.rating = rating.map(|v| v.clamp(1, 10));
                true
            }

            WeekUpdate::SetTheme { theme } => {
                self.metadata.theme = theme;
                true
            }
            WeekUpdate::SetLogo { logo } => {
                self.metadata.logo = logo;
                true
            }
        };

        if !applied {
            debug!("Update {update:?} didn't match anything in the week");
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc, Weekday};

    use crate::tracker::model::{
        habit::HabitKind,
        section::{Section, SectionKind},
        week_state::WeekState,
    };

    use super::WeekUpdate;

    fn test_state() -> WeekState {
        WeekState::new_default(Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap())
    }

    fn enabled_ids(state: &WeekState) -> Vec<String> {
        state.enabled_habits().map(|habit| habit.id.clone()).collect()
    }

    #[test]
    fn test_add_then_remove_habit_restores_set() {
        let mut state = test_state();
        let original = enabled_ids(&state);

        assert!(state.apply(WeekUpdate::AddHabit {
            name: "Read 20 pages".into(),
            kind: HabitKind::Inner,
        }));
        assert_eq!(state.ticks["read-20-pages"], [false; 7]);

        assert!(state.apply(WeekUpdate::RemoveHabit {
            id: "read-20-pages".into(),
        }));

        assert_eq!(enabled_ids(&state), original);
        assert!(!state.ticks.contains_key("read-20-pages"));
    }

    #[test]
    fn test_add_habit_with_taken_name() {
        let mut state = test_state();
        state.apply(WeekUpdate::AddHabit {
            name: "Sleep".into(),
            kind: HabitKind::Inner,
        });
        assert!(state.habit("sleep-2").is_some());
        assert!(state.ticks.contains_key("sleep-2"));
    }

    #[test]
    fn test_toggle_tick() {
        let mut state = test_state();
        state.apply(WeekUpdate::ToggleTick {
            id: "sleep".into(),
            day: Weekday::Wed,
        });
        assert_eq!(
            state.ticks["sleep"],
            [false, false, true, false, false, false, false]
        );
        state.apply(WeekUpdate::ToggleTick {
            id: "sleep".into(),
            day: Weekday::Wed,
        });
        assert_eq!(state.ticks["sleep"], [false; 7]);
    }

    #[test]
    fn test_unknown_references_are_noops() {
        let mut state = test_state();
        let before = state.clone();
        assert!(!state.apply(WeekUpdate::SetTick {
            id: "missing".into(),
            day: Weekday::Mon,
            done: true,
        }));
        assert!(!state.apply(WeekUpdate::SetWin {
            index: 5,
            text: "too far".into(),
        }));
        assert!(!state.apply(WeekUpdate::SetNotes {
            id: "missing".into(),
            text: "x".into(),
        }));
        assert_eq!(state, before);
    }

    #[test]
    fn test_disable_keeps_row() {
        let mut state = test_state();
        state.apply(WeekUpdate::SetTick {
            id: "inbox".into(),
            day: Weekday::Fri,
            done: true,
        });
        state.apply(WeekUpdate::SetHabitEnabled {
            id: "inbox".into(),
            enabled: false,
        });
        assert!(!enabled_ids(&state).contains(&"inbox".to_string()));
        assert!(state.ticks["inbox"][4]);
    }

    #[test]
    fn test_checklist_lifecycle() {
        let mut state = test_state();
        state.apply(WeekUpdate::AddSection {
            kind: SectionKind::Checklist,
            title: "Errands".into(),
        });
        state.apply(WeekUpdate::AddChecklistItem {
            id: "errands".into(),
            text: "Post office".into(),
        });
        state.apply(WeekUpdate::AddChecklistItem {
            id: "errands".into(),
            text: "Groceries".into(),
        });
        state.apply(WeekUpdate::ToggleChecklistItem {
            id: "errands".into(),
            index: 1,
        });
        assert!(state.apply(WeekUpdate::RemoveChecklistItem {
            id: "errands".into(),
            index: 0,
        }));

        let Some(Section::Checklist { items, .. }) = state.section("errands") else {
            panic!("Checklist wasn't created");
        };
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "Groceries");
        assert!(items[0].done);
    }

    #[test]
    fn test_non_finite_numbers_rejected() {
        let mut state = test_state();
        state.apply(WeekUpdate::AddSection {
            kind: SectionKind::Number,
            title: "Pages read".into(),
        });
        state.apply(WeekUpdate::SetMetric {
            label: "weight".into(),
            value: Some(70.5),
        });
        let before = state.clone();

        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(!state.apply(WeekUpdate::SetNumber {
                id: "pages-read".into(),
                value,
            }));
            assert!(!state.apply(WeekUpdate::SetMetric {
                label: "weight".into(),
                value: Some(value),
            }));
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_section_kind_mismatch() {
        let mut state = test_state();
        state.apply(WeekUpdate::AddSection {
            kind: SectionKind::Number,
            title: "Pages read".into(),
        });
        assert!(!state.apply(WeekUpdate::SetNotes {
            id: "pages-read".into(),
            text: "not a number".into(),
        }));
        assert!(state.apply(WeekUpdate::SetNumber {
            id: "pages-read".into(),
            value: 120.,
        }));
        assert_eq!(
            state.section("pages-read"),
            Some(&Section::Number {
                id: "pages-read".into(),
                title: "Pages read".into(),
                value: 120.,
            })
        );
    }
}
