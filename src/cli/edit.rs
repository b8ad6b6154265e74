//! Subcommands that change the active week. Each of them maps to exactly one [WeekUpdate].

use chrono::Weekday;
use clap::{Subcommand, ValueEnum};

use crate::{
    tracker::model::{HabitKind, OneTimeField, SectionKind, WeekUpdate, WeeklyField},
    utils::percentage::Percentage,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Day {
    #[value(alias = "monday")]
    Mon,
    #[value(alias = "tuesday")]
    Tue,
    #[value(alias = "wednesday")]
    Wed,
    #[value(alias = "thursday")]
    Thu,
    #[value(alias = "friday")]
    Fri,
    #[value(alias = "saturday")]
    Sat,
    #[value(alias = "sunday")]
    Sun,
}

impl From<Day> for Weekday {
    fn from(value: Day) -> Self {
        match value {
            Day::Mon => Weekday::Mon,
            Day::Tue => Weekday::Tue,
            Day::Wed => Weekday::Wed,
            Day::Thu => Weekday::Thu,
            Day::Fri => Weekday::Fri,
            Day::Sat => Weekday::Sat,
            Day::Sun => Weekday::Sun,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum HabitCommand {
    #[command(about = "Start tracking a new habit")]
    Add {
        name: String,
        #[arg(long, short, default_value_t = HabitKind::Inner)]
        kind: HabitKind,
    },
    #[command(about = "Remove a habit together with its ticks")]
    Remove { id: String },
    Rename { id: String, name: String },
    #[command(about = "Count the habit again")]
    Enable { id: String },
    #[command(about = "Stop counting the habit, its ticks are kept")]
    Disable { id: String },
    #[command(about = "Reclassify a habit as inner or outer")]
    Kind { id: String, kind: HabitKind },
}

#[derive(Subcommand, Debug)]
pub enum SectionCommand {
    #[command(about = "Add a checklist, notes or number section")]
    Add { kind: SectionKind, title: String },
    Remove { id: String },
    Rename { id: String, title: String },
    #[command(about = "Append an item to a checklist")]
    Item { id: String, text: String },
    #[command(about = "Flip an item of a checklist. Items are numbered from 1")]
    Toggle {
        id: String,
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        item: u32,
    },
    #[command(about = "Delete an item of a checklist. Items are numbered from 1")]
    Unitem {
        id: String,
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        item: u32,
    },
    #[command(about = "Replace the text of a notes section")]
    Note { id: String, text: String },
    #[command(about = "Set the value of a number section")]
    Number {
        id: String,
        #[arg(allow_negative_numbers = true, value_parser = parse_finite)]
        value: f64,
    },
}

#[derive(Subcommand, Debug)]
pub enum MetricsCommand {
    #[command(about = "Name and optionally value of a real world metric")]
    Label {
        label: String,
        #[arg(allow_negative_numbers = true, value_parser = parse_finite)]
        value: Option<f64>,
    },
    #[command(about = "Daily screen time target in minutes")]
    Target { minutes: u32 },
    #[command(about = "Minutes of inner work on a day")]
    Minutes {
        day: Day,
        #[arg(value_parser = clap::value_parser!(u32).range(..=MINUTES_PER_DAY))]
        minutes: u32,
    },
    #[command(about = "Self estimate of the inner share of the week, e.g. 40%. Empty clears it")]
    Share { percent: Option<Percentage> },
}

#[derive(Subcommand, Debug)]
pub enum ReflectCommand {
    #[command(about = "One-time reflection questions")]
    Once { field: OneTimeField, text: String },
    #[command(about = "One of the five wins of the week")]
    Win {
        #[arg(value_parser = clap::value_parser!(u32).range(1..=5))]
        slot: u32,
        text: String,
    },
    #[command(about = "End of week reflection")]
    Weekly { field: WeeklyField, text: String },
    #[command(about = "Rate the week from 1 to 10. Empty clears it")]
    Rating {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=10))]
        rating: Option<u8>,
    },
}

#[derive(Subcommand, Debug)]
pub enum MetaCommand {
    Theme { theme: String },
    #[command(about = "Reference to a logo image. Empty clears it")]
    Logo { logo: Option<String> },
}

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Week documents are JSON, which has no NaN or infinities.
fn parse_finite(value: &str) -> Result<f64, String> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(_) => Err(format!("{value} is not a finite number")),
        Err(e) => Err(e.to_string()),
    }
}

fn item_index(item: u32) -> usize {
    item.saturating_sub(1) as usize
}

impl From<HabitCommand> for WeekUpdate {
    fn from(value: HabitCommand) -> Self {
        match value {
            HabitCommand::Add { name, kind } => WeekUpdate::AddHabit { name, kind },
            HabitCommand::Remove { id } => WeekUpdate::RemoveHabit { id },
            HabitCommand::Rename { id, name } => WeekUpdate::RenameHabit { id, name },
            HabitCommand::Enable { id } => WeekUpdate::SetHabitEnabled { id, enabled: true },
            HabitCommand::Disable { id } => WeekUpdate::SetHabitEnabled { id, enabled: false },
            HabitCommand::Kind { id, kind } => WeekUpdate::SetHabitKind { id, kind },
        }
    }
}

impl From<SectionCommand> for WeekUpdate {
    fn from(value: SectionCommand) -> Self {
        match value {
            SectionCommand::Add { kind, title } => WeekUpdate::AddSection { kind, title },
            SectionCommand::Remove { id } => WeekUpdate::RemoveSection { id },
            SectionCommand::Rename { id, title } => WeekUpdate::RenameSection { id, title },
            SectionCommand::Item { id, text } => WeekUpdate::AddChecklistItem { id, text },
            SectionCommand::Toggle { id, item } => WeekUpdate::ToggleChecklistItem {
                id,
                index: item_index(item),
            },
            SectionCommand::Unitem { id, item } => WeekUpdate::RemoveChecklistItem {
                id,
                index: item_index(item),
            },
            SectionCommand::Note { id, text } => WeekUpdate::SetNotes { id, text },
            SectionCommand::Number { id, value } => WeekUpdate::SetNumber { id, value },
        }
    }
}

impl From<MetricsCommand> for WeekUpdate {
    fn from(value: MetricsCommand) -> Self {
        match value {
            MetricsCommand::Label { label, value } => WeekUpdate::SetMetric { label, value },
            MetricsCommand::Target { minutes } => WeekUpdate::SetScreenTarget { minutes },
            MetricsCommand::Minutes { day, minutes } => WeekUpdate::SetDailyMinutes {
                day: day.into(),
                minutes,
            },
            MetricsCommand::Share { percent } => WeekUpdate::SetInnerShareEstimate {
                percent: percent.map(|v| v.capped().rounded()),
            },
        }
    }
}

impl From<ReflectCommand> for WeekUpdate {
    fn from(value: ReflectCommand) -> Self {
        match value {
            ReflectCommand::Once { field, text } => WeekUpdate::SetOneTime { field, text },
            ReflectCommand::Win { slot, text } => WeekUpdate::SetWin {
                index: item_index(slot),
                text,
            },
            ReflectCommand::Weekly { field, text } => WeekUpdate::SetWeekly { field, text },
            ReflectCommand::Rating { rating } => WeekUpdate::SetRating { rating },
        }
    }
}

impl From<MetaCommand> for WeekUpdate {
    fn from(value: MetaCommand) -> Self {
        match value {
            MetaCommand::Theme { theme } => WeekUpdate::SetTheme { theme },
            MetaCommand::Logo { logo } => WeekUpdate::SetLogo { logo },
        }
    }
}
