//! Plain text rendering of a week. Everything here is a pure function of [WeekState].

pub mod summary;

use std::fmt::Write;

use chrono::NaiveDate;

use crate::{
    tracker::{
        metrics::{INNER_MINUTES_TARGET, WeekMetrics},
        model::{Section, WeekState},
    },
    utils::time::{WEEK_DAYS, date_to_record_name},
};

const NAME_WIDTH: usize = 24;

fn mark(done: bool) -> &'static str {
    if done { "[x]" } else { "[ ]" }
}

fn empty_as_dash(value: &str) -> &str {
    if value.trim().is_empty() { "-" } else { value }
}

pub fn render_week(week_start: NaiveDate, state: &WeekState) -> String {
    let mut out = String::new();
    // Writing into a String can't fail.
    let _ = write_week(&mut out, week_start, state);
    out
}

fn write_week(out: &mut String, week_start: NaiveDate, state: &WeekState) -> std::fmt::Result {
    let metrics = WeekMetrics::of(state);

    write!(out, "Week of {}", date_to_record_name(week_start))?;
    write!(out, "  theme: {}", state.metadata.theme)?;
    if let Some(logo) = &state.metadata.logo {
        write!(out, "  logo: {logo}")?;
    }
    writeln!(out)?;
    writeln!(out)?;

    write!(out, "{:NAME_WIDTH$} {:5}", "habit", "kind")?;
    for day in WEEK_DAYS {
        write!(out, " {day}")?;
    }
    writeln!(out)?;
    for habit in &state.habits {
        let name = if habit.enabled {
            format!("{} ({})", habit.name, habit.id)
        } else {
            format!("{} ({}, off)", habit.name, habit.id)
        };
        write!(out, "{name:NAME_WIDTH$} {:5}", habit.kind.to_string())?;
        let row = state.ticks.get(&habit.id).copied().unwrap_or_default();
        for done in row {
            write!(out, " {}", mark(done))?;
        }
        writeln!(out)?;
    }
    write!(out, "{:NAME_WIDTH$} {:5}", "total", "")?;
    for count in metrics.daily_ticks {
        write!(out, " {count:>3}")?;
    }
    writeln!(out)?;
    writeln!(out)?;

    writeln!(
        out,
        "Habit score {}  inner {} / outer {} ({} inner)",
        metrics.habit_score, metrics.ticks.inner, metrics.ticks.outer, metrics.inner_share
    )?;
    writeln!(
        out,
        "Inner minutes {} of {INNER_MINUTES_TARGET} ({})  daily: {:?}",
        metrics.inner_minutes, metrics.inner_minutes_progress, state.metrics.daily_minutes
    )?;
    write!(out, "Screen target {}m/day", state.metrics.screen_target)?;
    if let Some(estimate) = state.metrics.inner_share_estimate {
        write!(out, "  estimated inner share {estimate}%")?;
    }
    if !state.metrics.metric_label.is_empty() {
        write!(out, "  {}:", state.metrics.metric_label)?;
        match state.metrics.metric_value {
            Some(value) => write!(out, " {value}")?,
            None => write!(out, " -")?,
        }
    }
    writeln!(out)?;

    for section in &state.sections {
        writeln!(out)?;
        writeln!(out, "## {} ({}, {})", section.title(), section.id(), section.kind())?;
        match section {
            Section::Checklist { items, .. } => {
                for (index, item) in items.iter().enumerate() {
                    writeln!(out, "{}. {} {}", index + 1, mark(item.done), item.text)?;
                }
            }
            Section::Notes { text, .. } => writeln!(out, "{}", empty_as_dash(text))?,
            Section::Number { value, .. } => writeln!(out, "{value}")?,
        }
    }

    writeln!(out)?;
    writeln!(out, "Intention: {}", empty_as_dash(&state.one_time.intention))?;
    writeln!(out, "Obstacles: {}", empty_as_dash(&state.one_time.obstacles))?;
    writeln!(out, "Support:   {}", empty_as_dash(&state.one_time.support))?;

    writeln!(out)?;
    writeln!(out, "Wins:")?;
    for (index, win) in state.wins.iter().enumerate() {
        writeln!(out, "{}. {}", index + 1, empty_as_dash(win))?;
    }

    writeln!(out)?;
    writeln!(out, "Went well:  {}", empty_as_dash(&state.weekly.went_well))?;
    writeln!(out, "Challenges: {}", empty_as_dash(&state.weekly.challenges))?;
    writeln!(out, "Next focus: {}", empty_as_dash(&state.weekly.next_focus))?;
    match state.weekly.rating {
        Some(rating) => writeln!(out, "Rating:     {rating}/10")?,
        None => writeln!(out, "Rating:     -")?,
    }
    Ok(())
}
