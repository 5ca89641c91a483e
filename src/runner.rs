use std::path::PathBuf;

use anyhow::{Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

use crate::cli::{Cli, Command, ConfigCommand, CountArgs, PreviewArgs};
use crate::config::{self, PeekConfig};
use crate::preview::{EofMode, PreviewOptions};
use crate::{lines, preview, resolve};

const CONFIG_DIR: &str = ".datapeek";
const CONFIG_FILE: &str = "config.toml";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ConfigPathSource {
    Explicit,
    Discovered,
    HomeDefault,
}

impl ConfigPathSource {
    fn as_str(&self) -> &'static str {
        match self {
            ConfigPathSource::Explicit => "explicit",
            ConfigPathSource::Discovered => "discovered",
            ConfigPathSource::HomeDefault => "home-default",
        }
    }
}

#[derive(Clone, Debug)]
struct ResolvedConfigPath {
    path: Utf8PathBuf,
    source: ConfigPathSource,
}

pub fn run(cli: Cli) -> Result<()> {
    let ctx = CliContext::from(&cli);

    match cli.command {
        Command::Config { command } => handle_config_only(&ctx, command),
        other => {
            let state = AppState::new(ctx)?;
            handle_with_state(&state, other)
        }
    }
}

fn handle_with_state(state: &AppState, command: Command) -> Result<()> {
    match command {
        Command::Fetch { file } => handle_fetch(state, file),
        Command::Count(args) => handle_count(state, args),
        Command::Preview(args) => handle_preview(state, args),
        Command::Config { .. } => unreachable!("config commands handled earlier"),
    }
}

fn handle_fetch(state: &AppState, file: PathBuf) -> Result<()> {
    let file = to_utf8(file, "file name")?;
    let path = resolve::fetch_file(&file, &state.data_dir()?)?;
    println!("{}", path);
    Ok(())
}

fn handle_count(state: &AppState, args: CountArgs) -> Result<()> {
    let path = state.target_path(args.path, args.fetch)?;
    let count = lines::count_lines(&path)?;
    info!("counted {} lines in {}", count, path);
    println!("{}", count);
    Ok(())
}

fn handle_preview(state: &AppState, args: PreviewArgs) -> Result<()> {
    let path = state.target_path(args.path, args.fetch)?;
    let options = state.preview_options(args.lines, args.pad);
    let written = preview::preview_file(&path, options)?;
    info!("printed {} preview lines of {}", written, path);
    Ok(())
}

fn handle_config_only(ctx: &CliContext, command: Option<ConfigCommand>) -> Result<()> {
    let resolved = ctx.resolve_config_path()?;
    let config_path = resolved.path;
    match command {
        Some(ConfigCommand::Path) => {
            println!("Config path: {} ({})", config_path, resolved.source.as_str());
            Ok(())
        }
        None | Some(ConfigCommand::Show) => {
            if !config_path.exists() {
                println!("No config found at {}; using defaults.", config_path);
                println!("Use `datapeek config generate` to scaffold a default configuration.");
                println!("{}", config::format_summary(&PeekConfig::default()));
                return Ok(());
            }

            let config = config::load_from_path(&config_path)?;
            println!("Config path: {} ({})", config_path, resolved.source.as_str());
            println!("{}", config::format_summary(&config));
            Ok(())
        }
        Some(ConfigCommand::Check) => {
            let config = config::load_from_path(&config_path)?;
            println!("Config OK: {} ({})", config_path, resolved.source.as_str());
            println!("{}", config::format_summary(&config));
            Ok(())
        }
        Some(ConfigCommand::Generate { path, force }) => {
            let target = match path {
                Some(path) => to_utf8(path, "config generate path")?,
                None => config_path.clone(),
            };
            config::write_example_config(&target, force)?;
            if force {
                println!("Overwrote config at {}", target);
            } else {
                println!("Wrote example config to {}", target);
            }
            Ok(())
        }
        Some(ConfigCommand::Set { key, value }) => {
            config::set_value(&config_path, &key, &value)?;
            println!(
                "Set `{}` to `{}` in {} ({})",
                key,
                value,
                config_path,
                resolved.source.as_str()
            );
            Ok(())
        }
    }
}

fn to_utf8(path: PathBuf, what: &str) -> Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).map_err(|_| anyhow!("{} must be valid UTF-8", what))
}

#[derive(Clone, Debug)]
struct CliContext {
    file: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    verbose: u8,
}

impl CliContext {
    fn resolve_config_path(&self) -> Result<ResolvedConfigPath> {
        let cwd = std::env::current_dir()
            .ok()
            .and_then(|cwd| Utf8PathBuf::from_path_buf(cwd).ok());
        self.resolve_config_path_from(cwd.as_deref())
    }

    fn resolve_config_path_from(&self, start: Option<&Utf8Path>) -> Result<ResolvedConfigPath> {
        if let Some(path) = &self.file {
            return Ok(ResolvedConfigPath {
                path: to_utf8(path.clone(), "config path")?,
                source: ConfigPathSource::Explicit,
            });
        }

        let mut current = start;
        while let Some(dir) = current {
            let candidate = dir.join(CONFIG_DIR).join(CONFIG_FILE);
            if candidate.exists() {
                return Ok(ResolvedConfigPath {
                    path: candidate,
                    source: ConfigPathSource::Discovered,
                });
            }
            current = dir.parent();
        }

        let home = dirs::home_dir().ok_or_else(|| anyhow!("unable to determine home directory"))?;
        let path = to_utf8(home.join(CONFIG_DIR).join(CONFIG_FILE), "config path")?;
        Ok(ResolvedConfigPath {
            path,
            source: ConfigPathSource::HomeDefault,
        })
    }
}

impl From<&Cli> for CliContext {
    fn from(cli: &Cli) -> Self {
        Self {
            file: cli.file.clone(),
            data_dir: cli.data_dir.clone(),
            verbose: cli.verbose,
        }
    }
}

struct AppState {
    ctx: CliContext,
    config: PeekConfig,
}

impl AppState {
    fn new(ctx: CliContext) -> Result<Self> {
        let resolved = ctx.resolve_config_path()?;
        let config = config::load_or_default(&resolved.path)?;
        debug!(
            "using config {} ({}), verbosity {}",
            resolved.path,
            resolved.source.as_str(),
            ctx.verbose
        );
        Ok(Self { ctx, config })
    }

    fn data_dir(&self) -> Result<Utf8PathBuf> {
        match &self.ctx.data_dir {
            Some(dir) => to_utf8(dir.clone(), "data directory"),
            None => Ok(self.config.data_dir()),
        }
    }

    fn target_path(&self, path: PathBuf, fetch: bool) -> Result<Utf8PathBuf> {
        let path = to_utf8(path, "file path")?;
        if fetch {
            resolve::fetch_file(&path, &self.data_dir()?)
        } else {
            Ok(path)
        }
    }

    fn preview_options(&self, lines: Option<usize>, pad: bool) -> PreviewOptions {
        let mut options = self.config.preview_options();
        if let Some(limit) = lines {
            options.limit = limit;
        }
        if pad {
            options.eof = EofMode::Pad;
        }
        options
    }
}
