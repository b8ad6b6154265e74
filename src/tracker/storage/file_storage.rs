use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use crate::fs::operations::{read_locked, write_locked};

use super::WeekStorage;

const FILE_EXTENSION: &str = ".json";

/// The main realization of [WeekStorage]. Each key is a separate file inside `week_dir`.
pub struct FileWeekStorage {
    week_dir: PathBuf,
}

impl FileWeekStorage {
    pub fn new(week_dir: PathBuf) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(&week_dir)?;

        Ok(Self { week_dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.week_dir.join(key_to_file_name(key))
    }
}

/// Colons aren't allowed in file names on Windows.
fn key_to_file_name(key: &str) -> String {
    format!("{}{FILE_EXTENSION}", key.replace(':', "_"))
}

fn file_name_to_key(name: &str) -> Option<String> {
    let stem = name.strip_suffix(FILE_EXTENSION)?;
    let (prefix, suffix) = stem.rsplit_once('_')?;
    Some(format!("{prefix}:{suffix}"))
}

#[async_trait]
impl WeekStorage for FileWeekStorage {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        debug!("Reading {key} from {path:?}");
        Ok(read_locked(&path).await?)
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        debug!("Writing {key} into {path:?}");
        write_locked(&path, value.as_bytes()).await?;
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.week_dir).await?;
        let mut keys = vec![];
        while let Some(entry) = entries.next_entry().await? {
            if let Some(key) = entry.file_name().to_str().and_then(file_name_to_key) {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use tempfile::tempdir;

    use crate::tracker::storage::WeekStorage;

    use super::{FileWeekStorage, file_name_to_key, key_to_file_name};

    #[test]
    fn test_file_names_round_trip() {
        let key = "inner-tracker-v2.2:2025-03-10";
        assert_eq!(key_to_file_name(key), "inner-tracker-v2.2_2025-03-10.json");
        assert_eq!(file_name_to_key(&key_to_file_name(key)).as_deref(), Some(key));
        assert_eq!(file_name_to_key("notes.txt"), None);
    }

    #[tokio::test]
    async fn test_file_storage_basic() -> Result<()> {
        let dir = tempdir()?;
        let storage = FileWeekStorage::new(dir.path().join("weeks"))?;

        assert_eq!(storage.read("inner-tracker-v2.2:2025-03-10").await?, None);

        storage.write("inner-tracker-v2.2:2025-03-10", "{}").await?;
        storage.write("inner-tracker-v2.2:2025-03-17", "[]").await?;

        assert_eq!(
            storage.read("inner-tracker-v2.2:2025-03-10").await?.as_deref(),
            Some("{}")
        );

        let mut keys = storage.keys().await?;
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "inner-tracker-v2.2:2025-03-10".to_string(),
                "inner-tracker-v2.2:2025-03-17".to_string()
            ]
        );
        Ok(())
    }
}
