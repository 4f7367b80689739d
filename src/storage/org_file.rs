//! Append-only org file storage for captured entries

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::capture::Entry;
use crate::config::Config;
use crate::error::{Error, Result};

/// Permission bits for a newly created capture file
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// The file captured entries are appended to.
///
/// Each append opens, writes and closes the file on its own; no handle is
/// held between calls.
#[derive(Debug, Clone)]
pub struct CaptureFile {
    path: PathBuf,
}

impl CaptureFile {
    /// Create storage for an explicit path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create storage for the configured capture location
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.capture_path())
    }

    /// Path of the capture file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an entry at the end of the file, creating it if needed.
    ///
    /// Existing content is never read or truncated. The parent directory
    /// must already exist. Returns the number of bytes written.
    pub fn append(&self, entry: &Entry) -> Result<usize> {
        let mut file = self.open()?;

        let written = write_all_counted(&mut file, entry.as_bytes()).map_err(|(written, source)| {
            Error::Write {
                path: self.path.clone(),
                written,
                source,
            }
        })?;

        tracing::info!(
            "Added entry to {} ({} bytes written)",
            self.path.display(),
            written
        );
        Ok(written)
    }

    fn open(&self) -> Result<File> {
        let mut options = OpenOptions::new();
        options.create(true).append(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(FILE_MODE);
        }

        options.open(&self.path).map_err(|source| Error::Open {
            path: self.path.clone(),
            source,
        })
    }
}

/// Write every byte, reporting how far we got on failure
fn write_all_counted<W: Write>(
    writer: &mut W,
    bytes: &[u8],
) -> std::result::Result<usize, (usize, std::io::Error)> {
    let mut written = 0;
    while written < bytes.len() {
        match writer.write(&bytes[written..]) {
            Ok(0) => {
                return Err((
                    written,
                    std::io::Error::new(ErrorKind::WriteZero, "failed to write whole entry"),
                ))
            }
            Ok(n) => written += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err((written, e)),
        }
    }
    writer.flush().map_err(|e| (written, e))?;
    Ok(written)
}
