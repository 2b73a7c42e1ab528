//! Where fetched values end up
use std::{
    future::Future,
    path::{Path, PathBuf},
};

use tokio::{fs::OpenOptions, io::AsyncWriteExt};

use crate::{Error, Result};

/// Receives the full value every time it changes
pub trait Sink {
    /// Replace the destination's contents with `value`
    fn write(&mut self, value: &str) -> impl Future<Output = Result<()>>;

    /// Where values end up, for log lines
    fn location(&self) -> String;
}

/// Writes values into an existing file on local disk
///
/// The file is opened write-only with truncation and is never created.
/// If opening fails the previous contents are left alone; a failure after
/// truncation is reported as is, without any recovery.
#[derive(Clone, Debug)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Target `path`, which must exist by the time of the first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The output file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn err(&self) -> impl FnOnce(std::io::Error) -> Error + '_ {
        move |source| Error::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl Sink for FileSink {
    async fn write(&mut self, value: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&self.path)
            .await
            .map_err(self.err())?;
        file.write_all(value.as_bytes()).await.map_err(self.err())?;
        file.flush().await.map_err(self.err())?;
        tracing::debug!(path = %self.path.display(), bytes = value.len(), "flushed file");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replaces_existing_contents_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.toml");
        std::fs::write(&path, "a much longer previous value\n").unwrap();

        let mut sink = FileSink::new(&path);
        sink.write("b").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"b");
    }

    #[tokio::test]
    async fn empty_value_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.toml");
        std::fs::write(&path, "old").unwrap();

        FileSink::new(&path).write("").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"");
    }

    #[tokio::test]
    async fn missing_file_is_not_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.toml");

        let err = FileSink::new(&path).write("x").await.unwrap_err();
        assert!(matches!(err, Error::Write { ref source, .. } if source.kind() == std::io::ErrorKind::NotFound));
        assert_eq!(err.exit_code(), 5);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn failed_open_keeps_prior_contents() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("rules.toml");
        std::fs::write(&existing, "old").unwrap();

        // a regular file used as a directory component
        let nested = existing.join("rules.toml");
        let err = FileSink::new(&nested).write("new").await.unwrap_err();
        assert!(matches!(err, Error::Write { ref path, .. } if path == &nested));
        assert_eq!(std::fs::read(&existing).unwrap(), b"old");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn dangling_symlink_is_not_followed_into_creation() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("gone.toml");
        let link = dir.path().join("rules.toml");
        std::os::unix::fs::symlink(&dest, &link).unwrap();

        let err = FileSink::new(&link).write("new").await.unwrap_err();
        assert!(matches!(err, Error::Write { ref source, .. } if source.kind() == std::io::ErrorKind::NotFound));
        assert!(!dest.exists());
        assert_eq!(std::fs::read_link(&link).unwrap(), dest);
    }

    #[test]
    fn location_is_the_output_path() {
        let sink = FileSink::new("/etc/traefik/rules.toml");
        assert_eq!(sink.location(), "/etc/traefik/rules.toml");
        assert_eq!(sink.path(), Path::new("/etc/traefik/rules.toml"));
    }

    #[tokio::test]
    async fn unopenable_path_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        // a directory can't be opened for writing
        let err = FileSink::new(dir.path()).write("x").await.unwrap_err();
        assert!(matches!(err, Error::Write { ref path, .. } if path == dir.path()));
    }
}
