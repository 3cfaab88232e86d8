use crate::output::{LinkSink, OutputError, OutputResult};
use crate::url::join_url_list;
use std::path::{Path, PathBuf};

/// Writes the discovered links to a flat file, one URL per line
///
/// Every persist rewrites the whole file. The list is first written to a
/// sibling `.tmp` file and renamed over the target, so an interrupted run
/// leaves either the previous list or the new one.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_error(&self, source: std::io::Error) -> OutputError {
        OutputError::Write {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl LinkSink for FileSink {
    fn persist(&mut self, links: &[String]) -> OutputResult<()> {
        let content = join_url_list(links.iter().map(String::as_str));
        let temp = self.temp_path();

        std::fs::write(&temp, content).map_err(|e| self.write_error(e))?;
        std::fs::rename(&temp, &self.path).map_err(|e| self.write_error(e))?;

        tracing::debug!("Wrote {} links to {}", links.len(), self.path.display());
        Ok(())
    }
}
