pub mod history;
pub mod list;
pub mod open;
pub mod prefs;
pub mod recent;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Subcommand};
use shelf_engine::{AccessHistory, PreferencesStore};
use shelf_fs::DirLister;
use shelf_runtime::{FileStore, history_disabled};

pub use history::HistoryArgs;
pub use list::ListArgs;
pub use open::OpenArgs;
pub use prefs::PrefsArgs;
pub use recent::RecentArgs;

use crate::printer::{
    ColorChoice, FilePrinter, HumanPrinter, JsonPrinter, OutputFormat, PrinterConfig,
};

/// Common error type for command handlers
pub type CommandResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Locations shared by every subcommand.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Directory whose files make up the shelf (defaults to $SHELF_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Directory for history and preferences (defaults to $SHELF_STATE_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub state_dir: Option<PathBuf>,
}

impl GlobalArgs {
    pub fn lister(&self) -> DirLister {
        match &self.dir {
            Some(dir) => DirLister::new(dir),
            None => DirLister::from_env(),
        }
    }

    pub fn store(&self) -> anyhow::Result<FileStore> {
        match &self.state_dir {
            Some(dir) => Ok(FileStore::new(dir)),
            None => FileStore::from_env().context("pass --state-dir to choose one"),
        }
    }

    /// Access tracker, or `None` when history is disabled.
    pub fn history(&self) -> anyhow::Result<Option<AccessHistory<FileStore>>> {
        if history_disabled() {
            return Ok(None);
        }
        Ok(Some(AccessHistory::new(self.store()?)))
    }

    pub fn preferences(&self) -> anyhow::Result<PreferencesStore<FileStore>> {
        Ok(PreferencesStore::load(self.store()?))
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the files on the shelf.
    ///
    /// Example:
    ///   shelf list --sort size_desc
    ///   shelf list --json
    List(ListArgs),

    /// Record that a file was opened and print where it lives.
    ///
    /// Example:
    ///   shelf open report.pdf
    Open(OpenArgs),

    /// Show the most recently opened files that still exist.
    Recent(RecentArgs),

    /// Show or clear the access history.
    History(HistoryArgs),

    /// Show or change preferences.
    Prefs(PrefsArgs),
}

#[derive(Debug, Args)]
pub struct OutputOptions {
    /// Output results as NDJSON (one JSON object per line)
    #[arg(long)]
    pub json: bool,

    /// When to use colors: auto, always, never
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: String,
}

impl OutputOptions {
    /// Create a printer based on the output options.
    pub fn make_printer(&self) -> Box<dyn FilePrinter> {
        let format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        };

        let color = match self.color.as_str() {
            "always" => ColorChoice::Always,
            "never" => ColorChoice::Never,
            _ => ColorChoice::Auto,
        };

        match format {
            OutputFormat::Human => Box::new(HumanPrinter::stdout(PrinterConfig { color })),
            OutputFormat::Json => Box::new(JsonPrinter::stdout()),
        }
    }
}
