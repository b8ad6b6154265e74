use std::{fmt::Display, path::PathBuf};

use anyhow::Result;
use chrono::{Local, NaiveDate};
use chrono_english::parse_date_string;
use clap::{CommandFactory, Subcommand, ValueEnum};
use tracing::warn;

use crate::fs::operations::{read_locked, write_locked};

use super::Args;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum WeekCommand {
    #[command(about = "Go to the following week")]
    Next,
    #[command(about = "Go to the previous week")]
    Prev,
    #[command(about = "Move by a number of weeks, negative values go back")]
    Shift {
        #[arg(allow_negative_numbers = true)]
        weeks: i64,
    },
    #[command(about = "Go back to the current week")]
    Today,
    #[command(about = "Go to the week containing a date")]
    Goto { date: String },
}

/// Accepts anything [chrono_english] understands plus plain ISO dates.
/// Examples are "today", "last monday", "2025-03-10", "15/03/2025".
pub fn parse_week_date(value: &str, style: DateStyle) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    match parse_date_string(value, Local::now(), style.into()) {
        Ok(v) => Ok(v.date_naive()),
        Err(e) => Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Failed to validate date {value}: {e}"),
            )
            .into()),
    }
}

/// Remembers which week the user navigated to between invocations.
pub struct ActiveWeekPointer {
    path: PathBuf,
}

impl ActiveWeekPointer {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Missing or unreadable pointers are treated as "no week selected".
    pub async fn load(&self) -> Option<NaiveDate> {
        let content = match read_locked(&self.path).await {
            Ok(content) => content?,
            Err(e) => {
                warn!("Couldn't read active week from {:?}: {e}", self.path);
                return None;
            }
        };
        NaiveDate::parse_from_str(content.trim(), "%Y-%m-%d")
            .inspect_err(|e| warn!("Active week pointer is corrupted: {e}"))
            .ok()
    }

    pub async fn save(&self, week: NaiveDate) -> Result<()> {
        write_locked(&self.path, week.format("%Y-%m-%d").to_string().as_bytes()).await?;
        Ok(())
    }
}
