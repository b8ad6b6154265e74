//!  Storage is organized as a flat key/value space, one value per week.
//!  The basic idea is:
//!   - Keys are `inner-tracker-v2.2:<monday>`, see [storage_key].
//!   - Values are JSON encoded [WeekState](crate::tracker::model::WeekState).
//!   - [WeekStorage] only moves strings around. Decoding and fallbacks live in
//!     [WeekStore](crate::tracker::store::WeekStore).

pub mod file_storage;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::utils::time::date_to_record_name;

pub const STORAGE_PREFIX: &str = "inner-tracker-v2.2:";

/// Interface for abstracting storage of weeks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeekStorage: Send + Sync {
    /// Raw value stored under `key`, `None` if nothing was stored yet.
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    async fn write(&self, key: &str, value: &str) -> Result<()>;

    /// All keys that currently hold a value, in no particular order.
    async fn keys(&self) -> Result<Vec<String>>;
}

pub fn storage_key(week_start: NaiveDate) -> String {
    format!("{STORAGE_PREFIX}{}", date_to_record_name(week_start))
}

/// Inverse of [storage_key]. Foreign keys yield `None`.
pub fn week_from_key(key: &str) -> Option<NaiveDate> {
    let date = key.strip_prefix(STORAGE_PREFIX)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{storage_key, week_from_key};

    #[test]
    fn test_key_scheme() {
        let week = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(storage_key(week), "inner-tracker-v2.2:2025-03-10");
        assert_eq!(week_from_key(&storage_key(week)), Some(week));
        assert_eq!(week_from_key("inner-tracker-v2.1:2025-03-10"), None);
        assert_eq!(week_from_key("inner-tracker-v2.2:garbage"), None);
    }
}
