use std::{collections::HashMap, process::ExitCode};

use chrono::{DateTime, Utc};
use clap::Args;
use log::info;
use shelf_engine::AccessHistory;
use shelf_fs::{FileLister, FileRecord};
use shelf_runtime::KeyValueStore;

use crate::commands::{CommandResult, GlobalArgs, OutputOptions};
use crate::printer::{FileRow, PrintContext, print_files};

#[derive(Debug, Args)]
pub struct RecentArgs {
    /// Output formatting options
    #[command(flatten)]
    pub output: OutputOptions,
}

pub fn run(global: &GlobalArgs, args: RecentArgs) -> ExitCode {
    match execute(global, args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[error] {e}");
            ExitCode::from(2)
        }
    }
}

/// Recent files paired with when they were last opened.
fn recent_entries<S, L>(
    history: &AccessHistory<S>,
    lister: &L,
) -> Vec<(FileRecord, Option<DateTime<Utc>>)>
where
    S: KeyValueStore,
    L: FileLister + ?Sized,
{
    let recent = history.recent_files(lister);

    // Timestamps for display only; ordering already comes from the tracker.
    let log = history.history();
    let mut accessed: HashMap<&str, i64> = HashMap::with_capacity(log.len());
    for e in &log {
        accessed.entry(e.file_id.as_str()).or_insert(e.last_accessed);
    }

    recent
        .into_iter()
        .map(|file| {
            let at = accessed
                .get(file.id.as_str())
                .and_then(|&ms| DateTime::from_timestamp_millis(ms));
            (file, at)
        })
        .collect()
}

fn execute(global: &GlobalArgs, args: RecentArgs) -> CommandResult<ExitCode> {
    let Some(history) = global.history()? else {
        info!("[info] History is currently disabled");
        println!("History is disabled.");
        return Ok(ExitCode::from(0));
    };

    let entries = recent_entries(&history, &global.lister());

    let rows: Vec<FileRow> = entries
        .iter()
        .enumerate()
        .map(|(i, (file, accessed))| FileRow {
            rank: i + 1,
            file,
            accessed: *accessed,
        })
        .collect();

    let ctx = PrintContext {
        kind: "recent",
        sort: None,
        total: rows.len(),
    };

    let mut printer = args.output.make_printer();
    print_files(printer.as_mut(), &ctx, &rows)?;

    Ok(ExitCode::from(0))
}

#[cfg(test)]
#[path = "recent_tests.rs"]
mod tests;
