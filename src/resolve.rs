use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::util;

/// Directory previously downloaded files are expected to live in.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Locate a previously downloaded file beneath `data_dir`.
///
/// The directory is created on demand; the file itself is not checked.
pub fn fetch_file(file: &Utf8Path, data_dir: &Utf8Path) -> Result<Utf8PathBuf> {
    util::fs::ensure_dir(data_dir.as_std_path())
        .with_context(|| format!("creating data directory {}", data_dir))?;
    let path = data_dir.join(file);
    debug!("resolved {} to {}", file, path);
    Ok(path)
}
