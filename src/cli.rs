use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "datapeek",
    version,
    about = "Locate downloaded data files, count their lines, and preview them"
)]
pub struct Cli {
    /// Config file to use instead of the discovered one.
    #[arg(short = 'f', long = "file", global = true)]
    pub file: Option<PathBuf>,
    /// Directory downloaded files live in (overrides `data_dir` in the config).
    #[arg(long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print where a downloaded file lives, creating the data directory if needed.
    Fetch { file: PathBuf },
    /// Print the number of lines in a file.
    Count(CountArgs),
    /// Print the first lines of a file, numbered and escaped.
    Preview(PreviewArgs),
    /// Configuration display, validation, and editing.
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommand>,
    },
}

#[derive(Args, Debug)]
pub struct CountArgs {
    pub path: PathBuf,
    /// Treat PATH as a file name inside the data directory.
    #[arg(long = "fetch", default_value_t = false)]
    pub fetch: bool,
}

#[derive(Args, Debug)]
pub struct PreviewArgs {
    pub path: PathBuf,
    /// Number of lines to print.
    #[arg(short = 'n', long = "lines")]
    pub lines: Option<usize>,
    /// Print empty entries past end of file until the line count is reached.
    #[arg(long = "pad", default_value_t = false)]
    pub pad: bool,
    /// Treat PATH as a file name inside the data directory.
    #[arg(long = "fetch", default_value_t = false)]
    pub fetch: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    Show,
    Path,
    Check,
    Generate {
        #[arg()]
        path: Option<PathBuf>,
        #[arg(long = "force", default_value_t = false)]
        force: bool,
    },
    /// Set `data_dir`, `preview.lines` or `preview.past_eof`.
    Set { key: String, value: String },
}

/// Helper entry point so `main` can stay minimal.
pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_preview_flags() {
        let cli = Cli::parse_from([
            "datapeek", "-vv", "--data-dir", "inputs", "preview", "train.csv", "-n", "5", "--pad",
            "--fetch",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.data_dir, Some(PathBuf::from("inputs")));
        let Command::Preview(args) = cli.command else {
            panic!("expected preview command");
        };
        assert_eq!(args.path, PathBuf::from("train.csv"));
        assert_eq!(args.lines, Some(5));
        assert!(args.pad);
        assert!(args.fetch);
    }

    #[test]
    fn parses_config_set() {
        let cli = Cli::parse_from(["datapeek", "config", "set", "preview.lines", "3"]);
        let Command::Config {
            command: Some(ConfigCommand::Set { key, value }),
        } = cli.command
        else {
            panic!("expected config set");
        };
        assert_eq!(key, "preview.lines");
        assert_eq!(value, "3");
    }
}
