use std::process::ExitCode;

use anyhow::anyhow;
use clap::Args;
use log::info;
use shelf_fs::{FileLister, ViewerKind};

use crate::commands::{CommandResult, GlobalArgs};

#[derive(Debug, Args)]
pub struct OpenArgs {
    /// Identifier (file name) of the file to open
    pub id: String,
}

pub fn run(global: &GlobalArgs, args: OpenArgs) -> ExitCode {
    match execute(global, args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[error] {e}");
            ExitCode::from(2)
        }
    }
}

fn execute(global: &GlobalArgs, args: OpenArgs) -> CommandResult<ExitCode> {
    let lister = global.lister();
    let files = lister
        .list_files()
        .map_err(|e| anyhow!("Failed to list {}: {e}", lister.dir().display()))?;

    let Some(file) = files.into_iter().find(|f| f.id == args.id) else {
        eprintln!("No file named {:?} on the shelf", args.id);
        return Ok(ExitCode::from(1));
    };

    match global.history() {
        Ok(Some(history)) => history.record_access(&file.id),
        Ok(None) => info!("[info] History is currently disabled"),
        Err(e) => eprintln!("[warn] Not recording access: {e}"),
    }

    let viewer = ViewerKind::from_file_type(&file.file_type);
    println!("{}\t{}\t{}", file.uri, file.file_type, viewer.label());

    Ok(ExitCode::from(0))
}

#[cfg(test)]
#[path = "open_tests.rs"]
mod tests;
