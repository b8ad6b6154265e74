use anyhow::Result;
use chrono::NaiveDate;
use futures::{StreamExt, TryStreamExt, stream};
use serde::Serialize;
use tracing::debug;

use crate::{
    tracker::{
        metrics::WeekMetrics,
        storage::{WeekStorage, week_from_key},
        store::load_existing,
    },
    utils::{percentage::Percentage, time::date_to_record_name},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekSummary {
    pub week: NaiveDate,
    pub habit_score: Percentage,
    pub inner_share: Percentage,
    pub inner_minutes: u64,
    pub rating: Option<u8>,
}

/// Summarizes the `limit` most recent stored weeks, newest first. Weeks that fail to decode are
/// skipped.
pub async fn summarize_recent(storage: &impl WeekStorage, limit: usize) -> Result<Vec<WeekSummary>> {
    let mut weeks = storage
        .keys()
        .await?
        .iter()
        .filter_map(|key| week_from_key(key))
        .collect::<Vec<_>>();
    weeks.sort_unstable_by(|a, b| b.cmp(a));
    weeks.truncate(limit);
    debug!("Summarizing {} weeks", weeks.len());

    let summaries = stream::iter(weeks)
        .map(|week| async move { (week, load_existing(storage, week).await) })
        .buffered(4)
        .map(|(week, state)| {
            state.map(|state| {
                state.map(|state| {
                    let metrics = WeekMetrics::of(&state);
                    WeekSummary {
                        week,
                        habit_score: metrics.habit_score,
                        inner_share: metrics.inner_share,
                        inner_minutes: metrics.inner_minutes,
                        rating: state.weekly.rating,
                    }
                })
            })
        })
        .try_filter_map(|summary| async move { Ok(summary) })
        .try_collect::<Vec<_>>()
        .await?;

    Ok(summaries)
}

pub fn render_summary(summaries: &[WeekSummary]) -> String {
    let mut lines = vec!["week\tscore\tinner\tminutes\trating".to_string()];
    for summary in summaries {
        lines.push(format!(
            "{}\t{}\t{}\t{}\t{}",
            date_to_record_name(summary.week),
            summary.habit_score,
            summary.inner_share,
            summary.inner_minutes,
            summary
                .rating
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".into())
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{NaiveDate, TimeZone, Utc, Weekday};
    use serde_json::Value;
    use tempfile::tempdir;

    use crate::tracker::{
        model::{WeekState, WeekUpdate},
        storage::{WeekStorage, file_storage::FileWeekStorage, storage_key},
    };

    use super::{render_summary, summarize_recent};

    async fn store_week(storage: &FileWeekStorage, week: NaiveDate, ticks: usize) -> Result<()> {
        let mut state = WeekState::new_default(Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap());
        for day in [Weekday::Mon, Weekday::Tue, Weekday::Wed].into_iter().take(ticks) {
            state.apply(WeekUpdate::SetTick {
                id: "sleep".into(),
                day,
                done: true,
            });
        }
        storage
            .write(&storage_key(week), &serde_json::to_string(&state)?)
            .await
    }

    #[tokio::test]
    async fn test_summary_newest_first_and_limited() -> Result<()> {
        let dir = tempdir()?;
        let storage = FileWeekStorage::new(dir.path().to_owned())?;
        let weeks = [
            NaiveDate::from_ymd_opt(2025, 2, 24).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        ];
        for (ticks, week) in weeks.iter().enumerate() {
            store_week(&storage, *week, ticks + 1).await?;
        }
        storage
            .write("inner-tracker-v2.2:2025-03-17", "corrupted")
            .await?;

        let summaries = summarize_recent(&storage, 3).await?;

        // The corrupted week takes one of the slots and is dropped afterwards.
        assert_eq!(
            summaries.iter().map(|v| v.week).collect::<Vec<_>>(),
            vec![weeks[2], weeks[1]]
        );
        assert_eq!(*summaries[0].inner_share, 100.);
        assert!(render_summary(&summaries).contains("2025-03-10\t7%\t100%\t0\t-"));

        let json = serde_json::to_value(&summaries)?;
        assert_eq!(json[0]["week"], "2025-03-10");
        assert_eq!(json[0]["inner_share"], 100.);
        assert_eq!(json[1]["rating"], Value::Null);
        Ok(())
    }
}
