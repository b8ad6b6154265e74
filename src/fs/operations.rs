use std::path::Path;

use fs4::tokio::AsyncFileExt;
use tokio::{
    fs::File,
    io::{self, AsyncReadExt, AsyncSeekExt, AsyncWriteExt},
};
use tracing::trace;

/// Reads the whole file under a shared lock. A missing file is not an error, it just doesn't
/// have any content yet.
pub async fn read_locked(path: &Path) -> Result<Option<String>, io::Error> {
    async fn read(path: &Path) -> Result<String, io::Error> {
        let mut file = File::open(path).await?;
        file.lock_shared()?;
        let mut content = String::new();
        let result = file.read_to_string(&mut content).await;
        file.unlock_async().await?;
        result?;
        Ok(content)
    }

    match read(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Replaces the content of a file under an exclusive lock. The file is truncated only after the
/// lock is taken so that readers never see a half cleared file.
pub async fn write_locked(path: &Path, content: &[u8]) -> Result<(), io::Error> {
    let mut file = File::options()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .await?;

    file.lock_exclusive()?;
    let result = overwrite(&mut file, content).await;
    file.unlock_async().await?;
    trace!("Wrote {} bytes into {path:?}", content.len());
    result
}

async fn overwrite(file: &mut File, content: &[u8]) -> Result<(), io::Error> {
    file.set_len(0).await?;
    file.rewind().await?;
    file.write_all(content).await?;
    file.flush().await?;
    file.sync_data().await
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use tempfile::tempdir;

    use crate::fs::operations::{read_locked, write_locked};

    #[tokio::test]
    async fn test_read_missing_file() -> Result<()> {
        let dir = tempdir()?;
        assert_eq!(read_locked(&dir.path().join("nothing.json")).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_overwrite_shorter_content() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("value.json");

        write_locked(&path, b"a much longer first value").await?;
        write_locked(&path, b"short").await?;

        assert_eq!(read_locked(&path).await?.as_deref(), Some("short"));
        Ok(())
    }
}
