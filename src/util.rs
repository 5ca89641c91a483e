/// Shared utility helpers.
pub mod fs {
    use std::fs;
    use std::io;
    use std::path::Path;

    /// Ensure a directory exists, creating it recursively if needed.
    ///
    /// An existing non-directory at `path` is an error.
    pub fn ensure_dir(path: &Path) -> io::Result<()> {
        if path.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(path)
    }

}
