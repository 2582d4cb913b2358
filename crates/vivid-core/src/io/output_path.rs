use std::path::{Path, PathBuf};

use crate::pipeline::config::OutputConfig;

/// Derive the output path from the input: `<dir>/<stem><suffix>.<ext>`.
///
/// The extension is kept so the container format matches the input; inputs
/// without one get `config.default_extension`.
pub fn derive_output_path(input: &Path, config: &OutputConfig) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let ext = input
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| config.default_extension.clone());

    let file_name = format!("{stem}{}.{ext}", config.suffix);
    match input.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}
