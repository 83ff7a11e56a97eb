// io_guard.rs - Atomic output writes with best-effort cleanup on failure
//
// Writes to a NamedTempFile in the same directory as the final output (so
// the rename is same-filesystem and atomic), sets owner-only permissions on
// Unix, and only persists once the caller has finished writing. Dropping
// the guard without persisting removes the temp file, so a partially
// written output is cleaned up automatically without a second explicit
// cleanup path to keep in sync with the writer.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{EngineError, EngineResult};

/// A temp file that becomes the real output only on `finish()`.
///
/// If `finish()` is never called (an error path returns early), `Drop`
/// removes the temp file, leaving nothing at `output_path`.
pub struct OutputGuard {
    temp_file: NamedTempFile,
    output_path: PathBuf,
}

impl OutputGuard {
    pub fn create(output_path: &Path) -> EngineResult<Self> {
        let parent = output_path.parent().unwrap_or_else(|| Path::new("."));
        let temp_file = NamedTempFile::new_in(parent)?;
        secure_permissions(&temp_file)?;
        Ok(Self {
            temp_file,
            output_path: output_path.to_path_buf(),
        })
    }

    pub fn file_mut(&mut self) -> &mut fs::File {
        self.temp_file.as_file_mut()
    }

    /// Persist the temp file to the final output path. On success, nothing
    /// remains to clean up (the guard has already been consumed).
    pub fn finish(self) -> EngineResult<()> {
        if self.output_path.exists() {
            fs::remove_file(&self.output_path)?;
        }
        self.temp_file
            .persist(&self.output_path)
            .map_err(|e| EngineError::IoError(e.error))?;
        Ok(())
    }
}

#[cfg(unix)]
fn secure_permissions(temp_file: &NamedTempFile) -> EngineResult<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = temp_file.as_file().metadata()?.permissions();
    perms.set_mode(0o600);
    fs::set_permissions(temp_file.path(), perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn secure_permissions(_temp_file: &NamedTempFile) -> EngineResult<()> {
    Ok(())
}
