use std::{fmt::Display, ops::Deref, str::FromStr};

use anyhow::anyhow;
use serde::Serialize;

/// Non-negative percentage. Values derived from week data never go above 100, but parsing
/// user input only rejects negatives.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(into = "f64")]
pub struct Percentage(f64);

impl Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}%", self.0)
    }
}

impl Percentage {
    pub const ZERO: Percentage = Percentage(0.);
    pub const FULL: Percentage = Percentage(100.);

    pub fn new_opt(value: f64) -> Option<Percentage> {
        if value < 0. || value.is_nan() {
            None
        } else {
            Some(Percentage(value))
        }
    }

    /// Clamps the value into `0..=100`.
    pub fn capped(self) -> Percentage {
        Percentage(self.0.min(100.))
    }

    /// Rounded value, the way percentages are shown to the user.
    pub fn rounded(&self) -> u8 {
        self.0.round().min(255.) as u8
    }
}

impl FromStr for Percentage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // This means that 100%% also works, but I think I'm fine with that
        let s = s.trim_end_matches("%");
        let v = s.parse::<f64>()?;
        Percentage::new_opt(v).ok_or_else(|| anyhow!("Can't parse {s} into percentage"))
    }
}

impl From<Percentage> for f64 {
    fn from(value: Percentage) -> Self {
        value.0
    }
}

impl Deref for Percentage {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Share of `part` in `whole`. An empty whole gives 0 instead of NaN.
pub fn ratio_percentage(part: f64, whole: f64) -> Percentage {
    if whole <= 0. {
        return Percentage::ZERO;
    }
    Percentage::new_opt(part / whole * 100.).unwrap_or(Percentage::ZERO)
}
