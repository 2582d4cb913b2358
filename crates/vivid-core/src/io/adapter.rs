use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::{Result, VividError};
use crate::frame::{VideoInfo, VideoStream};

/// Splits containers into frames + passthrough audio and joins them back.
///
/// Lets the pipeline run against any codec library, or an in-memory fake.
pub trait VideoAdapter: Send + Sync {
    /// Decode every frame of `path` and capture its audio track untouched.
    fn demux(&self, path: &Path) -> Result<VideoStream>;

    /// Encode `stream` into `output_path`, returning the path written.
    ///
    /// Either a complete file exists at `output_path` afterwards, or nothing
    /// new does.
    fn remux(&self, stream: &VideoStream, output_path: &Path) -> Result<PathBuf>;

    /// Read container metadata without decoding frames.
    fn probe(&self, path: &Path) -> Result<VideoInfo>;
}

/// Check that `path` is an existing, readable regular file.
pub fn ensure_readable(path: &Path) -> Result<()> {
    let not_found = || VividError::InputNotFound {
        path: path.to_path_buf(),
    };
    let meta = std::fs::metadata(path).map_err(|_| not_found())?;
    if !meta.is_file() {
        return Err(not_found());
    }
    File::open(path).map_err(|_| not_found())?;
    Ok(())
}

/// Reject an `output` that resolves to the same file as `input`.
///
/// `output` need not exist yet; its parent directory is resolved instead.
pub fn ensure_distinct(input: &Path, output: &Path) -> Result<()> {
    let input = std::fs::canonicalize(input)?;
    if resolve(output) == Some(input) {
        return Err(VividError::output_write(
            output,
            "output path is the input file",
        ));
    }
    Ok(())
}

fn resolve(path: &Path) -> Option<PathBuf> {
    if let Ok(full) = std::fs::canonicalize(path) {
        return Some(full);
    }
    let name = path.file_name()?;
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::canonicalize(parent).ok().map(|dir| dir.join(name))
}
