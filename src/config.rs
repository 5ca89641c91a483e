use std::fmt::Write as _;
use std::fs;

use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use toml_edit::{DocumentMut, Item, Table, value};

use crate::preview::{DEFAULT_PREVIEW_LINES, EofMode, PreviewOptions};
use crate::resolve::DEFAULT_DATA_DIR;

const EXAMPLE_CONFIG: &str = r#"# datapeek configuration

# Directory previously downloaded files live in, relative to the working directory.
data_dir = "data"

[preview]
# Number of lines `datapeek preview` prints.
lines = 20
# What to do when a file has fewer lines than requested: "stop" or "pad".
past_eof = "stop"
"#;

/// Root configuration document, `~/.datapeek/config.toml` by default.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PeekConfig {
    pub data_dir: Option<String>,
    pub preview: Option<PreviewConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreviewConfig {
    pub lines: Option<usize>,
    pub past_eof: Option<EofMode>,
}

impl PeekConfig {
    pub fn data_dir(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(self.data_dir.as_deref().unwrap_or(DEFAULT_DATA_DIR))
    }

    pub fn preview_options(&self) -> PreviewOptions {
        let preview = self.preview.as_ref();
        PreviewOptions {
            limit: preview
                .and_then(|p| p.lines)
                .unwrap_or(DEFAULT_PREVIEW_LINES),
            eof: preview.and_then(|p| p.past_eof).unwrap_or_default(),
        }
    }
}

/// Load a configuration file from disk and deserialize it.
pub fn load_from_path(path: &Utf8Path) -> Result<PeekConfig> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading config {}", path))?;
    toml::from_str(&raw).with_context(|| format!("parsing config {}", path))
}

/// Like [`load_from_path`], but a missing file yields the defaults.
pub fn load_or_default(path: &Utf8Path) -> Result<PeekConfig> {
    if !path.exists() {
        return Ok(PeekConfig::default());
    }
    load_from_path(path)
}

pub fn write_example_config(path: &Utf8Path, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        bail!("{} already exists; rerun with --force to overwrite", path);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent))?;
        }
    }

    fs::write(path, EXAMPLE_CONFIG).with_context(|| format!("writing config {}", path))
}

/// Set a single key in the config file, preserving its formatting.
pub fn set_value(path: &Utf8Path, key: &str, raw: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent))?;
        }
    }

    let mut doc: DocumentMut = if path.exists() {
        let raw = fs::read_to_string(path).with_context(|| format!("reading config {}", path))?;
        raw.parse()
            .with_context(|| format!("parsing config {}", path))?
    } else {
        DocumentMut::new()
    };

    match key {
        "data_dir" => {
            if raw.trim().is_empty() {
                bail!("data_dir must not be empty");
            }
            doc["data_dir"] = value(raw);
        }
        "preview.lines" => {
            let lines: usize = raw
                .parse()
                .with_context(|| format!("preview.lines must be a non-negative integer, got `{}`", raw))?;
            let lines = i64::try_from(lines)
                .with_context(|| format!("preview.lines is too large: {}", lines))?;
            preview_table(&mut doc)?.insert("lines", value(lines));
        }
        "preview.past_eof" => {
            let mode = match raw {
                "stop" => EofMode::Stop,
                "pad" => EofMode::Pad,
                other => bail!("preview.past_eof must be `stop` or `pad`, got `{}`", other),
            };
            preview_table(&mut doc)?.insert("past_eof", value(mode.as_str()));
        }
        other => bail!(
            "unknown config key `{}`; expected data_dir, preview.lines or preview.past_eof",
            other
        ),
    }

    fs::write(path, doc.to_string()).with_context(|| format!("writing config {}", path))
}

fn preview_table(doc: &mut DocumentMut) -> Result<&mut Table> {
    if !doc.as_table().contains_key("preview") {
        doc["preview"] = Item::Table(Table::new());
    }
    doc.get_mut("preview")
        .and_then(Item::as_table_mut)
        .ok_or_else(|| anyhow::anyhow!("config has non-table `preview` entry"))
}

pub fn format_summary(config: &PeekConfig) -> String {
    let mut out = String::new();
    let options = config.preview_options();

    let _ = writeln!(out, "Data directory: {}", config.data_dir());
    let _ = writeln!(out, "Preview lines: {}", options.limit);
    let _ = write!(out, "Past end of file: {}", options.eof.as_str());

    out
}
