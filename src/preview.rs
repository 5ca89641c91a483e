use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use anyhow::{Context, Result};
use camino::Utf8Path;
use serde::Deserialize;
use tracing::debug;

use crate::escape;

/// Number of lines shown when no limit is configured.
pub const DEFAULT_PREVIEW_LINES: usize = 20;

/// What the previewer does once the file runs out before the limit.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum EofMode {
    /// Stop at end of file.
    #[default]
    Stop,
    /// Keep printing empty entries until the limit is reached.
    Pad,
}

impl EofMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EofMode::Stop => "stop",
            EofMode::Pad => "pad",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PreviewOptions {
    pub limit: usize,
    pub eof: EofMode,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PREVIEW_LINES,
            eof: EofMode::Stop,
        }
    }
}

/// Write a banner naming `path` followed by its first `options.limit` lines,
/// each as `<index>\t<escaped line>`. Returns the number of entries written.
pub fn print_preview<W: Write>(
    path: &Utf8Path,
    options: PreviewOptions,
    out: &mut W,
) -> Result<usize> {
    let file = File::open(path).with_context(|| format!("opening {}", path))?;
    let mut reader = BufReader::new(file);

    writeln!(out, "{} ===========================", path).context("writing preview banner")?;

    let mut line = String::new();
    let mut written = 0;
    for index in 0..options.limit {
        line.clear();
        let read = reader
            .read_line(&mut line)
            .with_context(|| format!("reading line {} of {}", index, path))?;
        if read == 0 && options.eof == EofMode::Stop {
            break;
        }
        writeln!(out, "{}\t{}", index, escape::repr(&line))
            .context("writing preview line")?;
        written += 1;
    }

    debug!("previewed {} lines of {}", written, path);
    Ok(written)
}

/// Preview `path` on stdout.
pub fn preview_file(path: &Utf8Path, options: PreviewOptions) -> Result<usize> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = print_preview(path, options, &mut out)?;
    out.flush().context("flushing stdout")?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::fs;

    fn write_temp(contents: &[u8]) -> (tempfile::TempDir, Utf8PathBuf) {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(tmp.path().join("sample.txt")).unwrap();
        fs::write(&path, contents).unwrap();
        (tmp, path)
    }

    fn render(path: &Utf8Path, limit: usize, eof: EofMode) -> (usize, String) {
        let mut buf = Vec::new();
        let written = print_preview(path, PreviewOptions { limit, eof }, &mut buf).unwrap();
        (written, String::from_utf8(buf).unwrap())
    }

    #[test]
    fn prints_banner_and_requested_lines() {
        let (_tmp, path) = write_temp(b"a\nb\nc\n");
        let (written, text) = render(&path, 2, EofMode::Stop);

        assert_eq!(written, 2);
        let expected = format!("{} ===========================\n0\t'a\\n'\n1\t'b\\n'\n", path);
        assert_eq!(text, expected);
    }

    #[test]
    fn stop_mode_ends_at_eof() {
        let (_tmp, path) = write_temp(b"only\n");
        let (written, text) = render(&path, 5, EofMode::Stop);

        assert_eq!(written, 1);
        assert_eq!(text.lines().count(), 2);
        assert!(text.ends_with("0\t'only\\n'\n"));
    }

    #[test]
    fn pad_mode_prints_empty_entries_past_eof() {
        let (_tmp, path) = write_temp(b"only\n");
        let (written, text) = render(&path, 3, EofMode::Pad);

        assert_eq!(written, 3);
        let body: Vec<&str> = text.lines().skip(1).collect();
        assert_eq!(body, vec!["0\t'only\\n'", "1\t''", "2\t''"]);
    }

    #[test]
    fn last_line_without_newline_is_shown_raw() {
        let (_tmp, path) = write_temp(b"x\ny");
        let (_, text) = render(&path, 10, EofMode::Stop);

        assert!(text.ends_with("1\t'y'\n"));
    }

    #[test]
    fn zero_limit_prints_only_banner() {
        let (_tmp, path) = write_temp(b"a\n");
        let (written, text) = render(&path, 0, EofMode::Pad);

        assert_eq!(written, 0);
        assert_eq!(text, format!("{} ===========================\n", path));
    }

    #[test]
    fn default_options() {
        let options = PreviewOptions::default();
        assert_eq!(options.limit, 20);
        assert_eq!(options.eof, EofMode::Stop);
    }

    #[test]
    fn missing_file_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(tmp.path().join("missing.txt")).unwrap();
        let mut buf = Vec::new();

        let err = print_preview(&path, PreviewOptions::default(), &mut buf).unwrap_err();
        let io_err = err.root_cause().downcast_ref::<io::Error>().unwrap();
        assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
        assert!(buf.is_empty());
    }

    #[test]
    fn invalid_utf8_line_fails() {
        let (_tmp, path) = write_temp(&[0xff, b'\n']);
        let mut buf = Vec::new();

        let err = print_preview(&path, PreviewOptions::default(), &mut buf).unwrap_err();
        let io_err = err.root_cause().downcast_ref::<io::Error>().unwrap();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);
    }
}
