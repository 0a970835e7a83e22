//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `translate`: run the incremental pipeline and write target files
//! - `status`: delta-only dry run, reporting what a translate would do

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Translate(cmd)) => cmd.args.common.verbose,
            Some(Command::Status(cmd)) => cmd.args.common.verbose,
            None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root directory
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Bucket file pattern with a [locale] placeholder, e.g. locales/[locale].json
    #[arg(long)]
    pub pattern: String,

    /// Bucket format: json, json-root, yaml, yaml-root, markdown, plurals
    #[arg(long)]
    pub format: String,

    /// Locale the source content is written in
    #[arg(long, default_value = "en")]
    pub source_locale: String,

    /// Locale to translate into. Can be specified multiple times:
    /// --target-locale de --target-locale fr
    #[arg(long = "target-locale", required = true)]
    pub target_locales: Vec<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct TranslateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Cap on keys per translator call (default: whole file per call)
    #[arg(long)]
    pub batch_cap: Option<usize>,
}

#[derive(Debug, Args)]
pub struct TranslateCommand {
    #[command(flatten)]
    pub args: TranslateArgs,
}

#[derive(Debug, Parser)]
pub struct StatusArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct StatusCommand {
    #[command(flatten)]
    pub args: StatusArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Translate outdated or missing keys and write target bucket files
    Translate(TranslateCommand),
    /// Show which keys would be (re)translated, without touching anything
    Status(StatusCommand),
}
