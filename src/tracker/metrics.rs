//! Numbers derived from a [WeekState]. Nothing here is stored, everything is recomputed from the
//! state on every read.

use crate::utils::percentage::{Percentage, ratio_percentage};

use super::model::{HabitKind, WeekState};

/// Weekly minutes of inner work that count as a full week.
pub const INNER_MINUTES_TARGET: f64 = 14.;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindTicks {
    pub inner: u32,
    pub outer: u32,
}

impl KindTicks {
    pub fn total(&self) -> u32 {
        self.inner + self.outer
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekMetrics {
    pub habit_score: Percentage,
    pub ticks: KindTicks,
    pub inner_share: Percentage,
    pub inner_minutes: u64,
    pub inner_minutes_progress: Percentage,
    pub daily_ticks: [u32; 7],
}

impl WeekMetrics {
    pub fn of(state: &WeekState) -> Self {
        Self {
            habit_score: habit_score(state),
            ticks: kind_ticks(state),
            inner_share: inner_share(state),
            inner_minutes: total_inner_minutes(state),
            inner_minutes_progress: inner_minutes_progress(state),
            daily_ticks: daily_ticks(state),
        }
    }
}

fn ticks_of(state: &WeekState, id: &str) -> u32 {
    state
        .ticks
        .get(id)
        .map(|row| row.iter().filter(|done| **done).count() as u32)
        .unwrap_or(0)
}

/// Share of possible ticks that are set, counting enabled habits only.
pub fn habit_score(state: &WeekState) -> Percentage {
    let (enabled, ticked) = state
        .enabled_habits()
        .fold((0u32, 0u32), |(enabled, ticked), habit| {
            (enabled + 1, ticked + ticks_of(state, &habit.id))
        });
    ratio_percentage(ticked as f64, (enabled * 7) as f64).capped()
}

pub fn kind_ticks(state: &WeekState) -> KindTicks {
    state
        .enabled_habits()
        .fold(KindTicks::default(), |mut acc, habit| {
            let ticks = ticks_of(state, &habit.id);
            match habit.kind {
                HabitKind::Inner => acc.inner += ticks,
                HabitKind::Outer => acc.outer += ticks,
            }
            acc
        })
}

/// Inner ticks relative to all ticks, 0 when nothing is ticked.
pub fn inner_share(state: &WeekState) -> Percentage {
    let ticks = kind_ticks(state);
    ratio_percentage(ticks.inner as f64, ticks.total() as f64)
}

/// Summed as `u64`, imported documents may carry any `u32` per day.
pub fn total_inner_minutes(state: &WeekState) -> u64 {
    state
        .metrics
        .daily_minutes
        .iter()
        .map(|minutes| *minutes as u64)
        .sum()
}

pub fn inner_minutes_progress(state: &WeekState) -> Percentage {
    ratio_percentage(total_inner_minutes(state) as f64, INNER_MINUTES_TARGET).capped()
}

/// Ticks of enabled habits per day, Monday first.
pub fn daily_ticks(state: &WeekState) -> [u32; 7] {
    let mut days = [0; 7];
    for habit in state.enabled_habits() {
        if let Some(row) = state.ticks.get(&habit.id) {
            for (day, done) in row.iter().enumerate() {
                days[day] += *done as u32;
            }
        }
    }
    days
}
