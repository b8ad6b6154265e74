//! Moving a week in and out of the application as a standalone JSON document.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::{fs::operations::write_locked, utils::time::date_to_record_name};

use super::model::WeekState;

/// Fields a document has to carry to be accepted as a week.
pub const REQUIRED_FIELDS: [&str; 3] = ["metadata", "habits", "ticks"];

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("File is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("Expected a JSON object at the top level")]
    NotAnObject,
    #[error("Missing required field `{0}`")]
    MissingField(&'static str),
    #[error("Field has an unexpected shape: {0}")]
    Shape(#[source] serde_json::Error),
}

/// `inner-<monday>.json`
pub fn export_file_name(week_start: NaiveDate) -> String {
    format!("inner-{}.json", date_to_record_name(week_start))
}

pub fn export_json(state: &WeekState) -> Result<String> {
    Ok(serde_json::to_string_pretty(state)?)
}

/// Writes `state` into `dir` and returns the path of the created document.
pub async fn export_to_dir(state: &WeekState, week_start: NaiveDate, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(export_file_name(week_start));
    write_locked(&path, export_json(state)?.as_bytes()).await?;
    info!("Exported week {week_start} into {path:?}");
    Ok(path)
}

/// Validates and decodes an exported document. Only documents that have every one of
/// [REQUIRED_FIELDS] are accepted, the rest of the fields fall back to defaults.
pub fn parse_import(content: &str) -> Result<WeekState, ImportError> {
    let value: Value = serde_json::from_str(content).map_err(ImportError::Parse)?;
    let Value::Object(fields) = &value else {
        return Err(ImportError::NotAnObject);
    };
    if let Some(missing) = REQUIRED_FIELDS
        .into_iter()
        .find(|field| !fields.contains_key(*field))
    {
        return Err(ImportError::MissingField(missing));
    }
    let state: WeekState = serde_json::from_value(value).map_err(ImportError::Shape)?;
    Ok(state.normalized())
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc, Weekday};
    use serde_json::Value;
    use tempfile::tempdir;

    use crate::tracker::model::{SectionKind, WeekState, WeekUpdate};

    use super::{ImportError, export_file_name, export_json, export_to_dir, parse_import};

    fn filled_state() -> WeekState {
        let mut state = WeekState::new_default(Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap());
        for update in [
            WeekUpdate::SetTick {
                id: "sleep".into(),
                day: Weekday::Sat,
                done: true,
            },
            WeekUpdate::AddSection {
                kind: SectionKind::Notes,
                title: "Ideas".into(),
            },
            WeekUpdate::SetNotes {
                id: "ideas".into(),
                text: "Walk before work".into(),
            },
            WeekUpdate::SetWin {
                index: 2,
                text: "Finished the draft".into(),
            },
            WeekUpdate::SetRating { rating: Some(8) },
            WeekUpdate::SetLogo {
                logo: Some("logo.png".into()),
            },
        ] {
            state.apply(update);
        }
        state
    }

    #[test]
    fn test_export_then_import_is_identity() {
        let state = filled_state();
        let imported = parse_import(&export_json(&state).unwrap()).unwrap();
        assert_eq!(imported, state);
    }

    #[test]
    fn test_export_uses_expected_field_names() {
        let value: Value = serde_json::from_str(&export_json(&filled_state()).unwrap()).unwrap();
        assert!(value["metadata"]["createdAt"].is_string());
        assert_eq!(value["sections"][0]["type"], "notes");
        assert_eq!(value["weekly"]["rating"], 8);
        assert_eq!(value["wins"].as_array().map(Vec::len), Some(5));
    }

    #[test]
    fn test_missing_habits_rejected() {
        let mut value: Value = serde_json::from_str(&export_json(&filled_state()).unwrap()).unwrap();
        value.as_object_mut().unwrap().remove("habits");
        let result = parse_import(&value.to_string());
        assert!(matches!(result, Err(ImportError::MissingField("habits"))));
    }

    #[test]
    fn test_invalid_documents_rejected() {
        assert!(matches!(parse_import("{not json"), Err(ImportError::Parse(_))));
        assert!(matches!(parse_import("[1, 2]"), Err(ImportError::NotAnObject)));
        assert!(matches!(
            parse_import(r#"{"metadata": 1, "habits": [], "ticks": {}}"#),
            Err(ImportError::Shape(_))
        ));
    }

    #[tokio::test]
    async fn test_export_to_dir() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let week = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let path = export_to_dir(&filled_state(), week, dir.path()).await?;

        assert_eq!(path, dir.path().join("inner-2025-03-10.json"));
        assert_eq!(export_file_name(week), "inner-2025-03-10.json");
        let content = std::fs::read_to_string(path)?;
        assert!(content.contains("\n  \"metadata\""));
        assert_eq!(parse_import(&content)?, filled_state());
        Ok(())
    }
}
