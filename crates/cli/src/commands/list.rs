use std::{io, process::ExitCode};

use anyhow::anyhow;
use clap::Args;
use log::warn;
use shelf_engine::{SortKey, sort_files_by};
use shelf_fs::FileLister;

use crate::commands::{CommandResult, GlobalArgs, OutputOptions};
use crate::printer::{FileRow, PrintContext, print_files};

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Sort order: name_asc, name_desc, size_asc, size_desc, type_asc, type_desc.
    /// Defaults to the stored preference. Unknown values keep directory order.
    #[arg(long, short = 's', value_name = "KEY")]
    pub sort: Option<String>,

    /// Output formatting options
    #[command(flatten)]
    pub output: OutputOptions,
}

pub fn run(global: &GlobalArgs, args: ListArgs) -> ExitCode {
    match execute(global, args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[error] {e}");
            ExitCode::from(2)
        }
    }
}

/// Resolve the sort to apply; `None` means keep listing order.
fn resolve_sort(global: &GlobalArgs, requested: Option<&str>) -> Option<SortKey> {
    match requested {
        Some(raw) => {
            let key = SortKey::parse_lenient(raw);
            if key.is_none() {
                warn!("[list] unknown sort key {raw:?}, keeping directory order");
            }
            key
        }
        None => match global.preferences() {
            Ok(prefs) => Some(prefs.get().default_sort),
            Err(e) => {
                warn!("[list] preferences unavailable: {e}");
                Some(SortKey::default())
            }
        },
    }
}

fn execute(global: &GlobalArgs, args: ListArgs) -> CommandResult<ExitCode> {
    let lister = global.lister();
    let files = match lister.list_files() {
        Ok(files) => files,
        // A shelf that was never created is simply empty.
        Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
        Err(e) => {
            return Err(anyhow!("failed to list {}: {e}", lister.dir().display()).into());
        }
    };

    let sort = resolve_sort(global, args.sort.as_deref());
    let sorted = sort_files_by(&files, sort);

    let rows: Vec<FileRow> = sorted
        .iter()
        .enumerate()
        .map(|(i, file)| FileRow {
            rank: i + 1,
            file,
            accessed: None,
        })
        .collect();

    let ctx = PrintContext {
        kind: "list",
        sort: sort.map(SortKey::as_str),
        total: rows.len(),
    };

    let mut printer = args.output.make_printer();
    print_files(printer.as_mut(), &ctx, &rows)?;

    Ok(ExitCode::from(0))
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
