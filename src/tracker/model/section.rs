use std::fmt::Display;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

/// User defined block of the week page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Section {
    Checklist {
        id: String,
        title: String,
        #[serde(default)]
        items: Vec<ChecklistItem>,
    },
    Notes {
        id: String,
        title: String,
        #[serde(default)]
        text: String,
    },
    Number {
        id: String,
        title: String,
        #[serde(default)]
        value: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SectionKind {
    Checklist,
    Notes,
    Number,
}

impl Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionKind::Checklist => write!(f, "checklist"),
            SectionKind::Notes => write!(f, "notes"),
            SectionKind::Number => write!(f, "number"),
        }
    }
}

impl Section {
    pub fn empty(kind: SectionKind, id: String, title: String) -> Self {
        match kind {
            SectionKind::Checklist => Section::Checklist {
                id,
                title,
                items: vec![],
            },
            SectionKind::Notes => Section::Notes {
                id,
                title,
                text: String::new(),
            },
            SectionKind::Number => Section::Number {
                id,
                title,
                value: 0.,
            },
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Section::Checklist { id, .. }
            | Section::Notes { id, .. }
            | Section::Number { id, .. } => id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Section::Checklist { title, .. }
            | Section::Notes { title, .. }
            | Section::Number { title, .. } => title,
        }
    }

    pub fn title_mut(&mut self) -> &mut String {
        match self {
            Section::Checklist { title, .. }
            | Section::Notes { title, .. }
            | Section::Number { title, .. } => title,
        }
    }

    pub fn kind(&self) -> SectionKind {
        match self {
            Section::Checklist { .. } => SectionKind::Checklist,
            Section::Notes { .. } => SectionKind::Notes,
            Section::Number { .. } => SectionKind::Number,
        }
    }
}
