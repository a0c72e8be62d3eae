//! Atomic file write operations.
//!
//! Provides safe atomic file writing using the `tempfile` crate.
//! Temp files are automatically cleaned up on failure.

use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Write content to a file atomically using a temporary file.
///
/// The temp file is created next to the target so the final rename stays on
/// one filesystem. If any step fails the target keeps its previous contents.
///
/// # Errors
///
/// Returns an `io::Error` if:
/// - The parent directory cannot be determined or created
/// - The temp file cannot be created or written
/// - The rename onto the target fails
pub fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if p.as_os_str().is_empty() => Path::new("."),
        Some(p) => p,
        None => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            ))
        }
    };
    std::fs::create_dir_all(parent)?;

    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.flush()?;

    // Consumes the NamedTempFile, preventing auto-deletion
    temp_file.persist(path).map_err(|e| e.error)?;

    Ok(())
}
