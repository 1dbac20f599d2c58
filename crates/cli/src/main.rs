use std::process::ExitCode;

use clap::Parser;

mod commands;
mod printer;

use commands::{Command, GlobalArgs};
use shelf_runtime::logging;

#[derive(Debug, Parser)]
#[command(
    name = "shelf",
    version,
    about = "Shelf - list, sort and revisit local files",
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();
    match cli.command {
        Command::List(args) => commands::list::run(&cli.global, args),
        Command::Open(args) => commands::open::run(&cli.global, args),
        Command::Recent(args) => commands::recent::run(&cli.global, args),
        Command::History(args) => commands::history::run(&cli.global, args),
        Command::Prefs(args) => commands::prefs::run(&cli.global, args),
    }
}
