//! Filesystem report store implementation

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::entities::FundraiserId;
use crate::domain::ports::ReportStore;
use crate::error::ReportError;

/// Stores one `<fundraiser id>.csv` file per fundraiser under a single directory
pub struct FsReportStore {
    root: PathBuf,
}

impl FsReportStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the reports directory if it does not exist yet
    pub async fn ensure_dir(&self) -> Result<(), ReportError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn report_path(&self, id: &FundraiserId) -> PathBuf {
        self.root.join(format!("{}.csv", id.as_str()))
    }
}

#[async_trait]
impl ReportStore for FsReportStore {
    async fn save(&self, id: &FundraiserId, contents: &[u8]) -> Result<(), ReportError> {
        let path = self.report_path(id);
        tokio::fs::write(&path, contents).await?;
        tracing::debug!(fundraiser_id = %id, path = %path.display(), bytes = contents.len(), "Report written");
        Ok(())
    }

    async fn load(&self, id: &FundraiserId) -> Result<Option<Vec<u8>>, ReportError> {
        match tokio::fs::read(self.report_path(id)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ReportError::Io(e)),
        }
    }
}
