use std::fmt::Display;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Whether a habit is foundational, preventative work (inner) or reactive, visible work
/// (outer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HabitKind {
    Inner,
    Outer,
}

impl Display for HabitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HabitKind::Inner => write!(f, "inner"),
            HabitKind::Outer => write!(f, "outer"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    /// Stable key of the habit inside [WeekState::ticks](super::WeekState::ticks).
    pub id: String,
    pub name: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    pub kind: HabitKind,
}

fn enabled_by_default() -> bool {
    true
}

impl Habit {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: HabitKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            enabled: true,
            kind,
        }
    }
}

/// Habits every new week starts with.
pub fn default_habits() -> Vec<Habit> {
    vec![
        Habit::new("sleep", "Sleep 7h+", HabitKind::Inner),
        Habit::new("move", "Move / exercise", HabitKind::Inner),
        Habit::new("reflect", "Reflect or journal", HabitKind::Inner),
        Habit::new("deep-work", "Deep work block", HabitKind::Outer),
        Habit::new("inbox", "Inbox zero", HabitKind::Outer),
        Habit::new("reach-out", "Reach out to someone", HabitKind::Outer),
    ]
}

/// Turns a display name into an identifier, e.g. `"Read 20 pages!"` -> `"read-20-pages"`.
/// Names without any alphanumeric characters fall back to `fallback`.
pub fn slugify(name: &str, fallback: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        fallback.to_string()
    } else {
        slug
    }
}

/// Picks the first of `base`, `base-2`, `base-3`, ... that `taken` doesn't reject.
pub fn unique_id(base: String, taken: impl Fn(&str) -> bool) -> String {
    if !taken(&base) {
        return base;
    }
    (2..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::{slugify, unique_id};

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Read 20 pages!", "habit"), "read-20-pages");
        assert_eq!(slugify("  Deep   work ", "habit"), "deep-work");
        assert_eq!(slugify("???", "habit"), "habit");
    }

    #[test]
    fn test_unique_id_appends_suffix() {
        let taken = ["read", "read-2"];
        assert_eq!(unique_id("read".into(), |v| taken.contains(&v)), "read-3");
        assert_eq!(unique_id("walk".into(), |v| taken.contains(&v)), "walk");
    }
}
