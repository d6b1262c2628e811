use crate::error::JoinError;
use std::fs;
use std::path::PathBuf;

/// Where a joined workbook ends up once the backend returns it.
pub trait DownloadSink: Send + Sync {
    fn save(&self, file_name: &str, contents: &[u8]) -> Result<PathBuf, JoinError>;
}

/// Writes results into a fixed directory, replacing any earlier file of
/// the same name.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DownloadSink for DirectorySink {
    fn save(&self, file_name: &str, contents: &[u8]) -> Result<PathBuf, JoinError> {
        let target = self.dir.join(file_name);

        fs::create_dir_all(&self.dir).map_err(|source| JoinError::Save {
            path: self.dir.clone(),
            source,
        })?;
        fs::write(&target, contents).map_err(|source| JoinError::Save {
            path: target.clone(),
            source,
        })?;

        tracing::info!("Saved {} bytes to {}", contents.len(), target.display());
        Ok(target)
    }
}
