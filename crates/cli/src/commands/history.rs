use std::process::ExitCode;

use chrono::{DateTime, Local};
use clap::Args;
use log::info;

use crate::commands::{CommandResult, GlobalArgs};

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Number of entries to display
    #[arg(long, short = 'n', default_value = "20")]
    pub limit: usize,

    /// Clear all history
    #[arg(long)]
    pub clear: bool,
}

pub fn run(global: &GlobalArgs, args: HistoryArgs) -> ExitCode {
    match execute(global, args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[error] {e}");
            ExitCode::from(2)
        }
    }
}

fn execute(global: &GlobalArgs, args: HistoryArgs) -> CommandResult<ExitCode> {
    let Some(history) = global.history()? else {
        info!("[info] History is currently disabled");
        println!("History is disabled.");
        return Ok(ExitCode::from(0));
    };

    if args.clear {
        return match history.clear() {
            Ok(()) => {
                println!("History cleared");
                Ok(ExitCode::from(0))
            }
            Err(e) => {
                eprintln!("[error] Failed to clear history: {e}");
                Ok(ExitCode::from(1))
            }
        };
    }

    let entries = history.history();

    if entries.is_empty() {
        println!("No history yet.");
        return Ok(ExitCode::from(0));
    }

    println!("{:<20}  FILE", "OPENED");
    println!("{}", "-".repeat(72));

    for entry in entries.iter().take(args.limit) {
        let ts = match entry.accessed_at() {
            Some(at) => DateTime::<Local>::from(at)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            None => "unknown".to_owned(),
        };

        println!("{:<20}  {}", ts, entry.file_id);
    }

    if entries.len() > args.limit {
        println!(
            "\n({} more entries, use --limit to show more)",
            entries.len() - args.limit
        );
    }

    Ok(ExitCode::from(0))
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
