use std::fs::File;
use std::io::{BufRead, BufReader};

use anyhow::{Context, Result};
use camino::Utf8Path;
use tracing::debug;

/// Count the lines in a file.
///
/// A trailing run of bytes without a final `\n` counts as a line.
pub fn count_lines(path: &Utf8Path) -> Result<usize> {
    let file = File::open(path).with_context(|| format!("opening {}", path))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    let mut count = 0;
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .with_context(|| format!("reading {}", path))?;
        if read == 0 {
            break;
        }
        count += 1;
    }
    debug!("{} has {} lines", path, count);
    Ok(count)
}
