use std::io::{self, Write};

use chrono::{DateTime, Local, Utc};
use shelf_fs::{FileRecord, ViewerKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table with optional colors.
    #[default]
    Human,
    /// NDJSON (newline-delimited JSON) for machine consumption.
    Json,
}

/// Color handling strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorChoice {
    /// Automatically detect TTY and enable colors if appropriate.
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Default)]
pub struct PrinterConfig {
    pub color: ColorChoice,
}

/// Static context about a print run.
#[derive(Debug)]
pub struct PrintContext<'a> {
    /// Label for this listing ("list", "recent")
    pub kind: &'a str,
    /// Sort applied to the rows, if any
    pub sort: Option<&'a str>,
    /// Number of rows that will be printed
    pub total: usize,
}

/// One file in the output stream.
#[derive(Debug)]
pub struct FileRow<'a> {
    /// 1-based position in the output.
    pub rank: usize,
    pub file: &'a FileRecord,
    /// When the file was last opened, for history-backed listings.
    pub accessed: Option<DateTime<Utc>>,
}

pub trait FilePrinter {
    /// Called once before any rows are printed.
    fn begin(&mut self, ctx: &PrintContext) -> io::Result<()>;

    fn print_row(&mut self, row: &FileRow<'_>, ctx: &PrintContext) -> io::Result<()>;

    /// Called once after all rows are printed.
    fn finish(&mut self, ctx: &PrintContext) -> io::Result<()>;
}

/// Format a byte count with a binary unit, e.g. `1.5 KiB`.
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

pub struct HumanPrinter<W: Write> {
    out: W,
    use_color: bool,
}

impl<W: Write> HumanPrinter<W> {
    pub fn new(out: W, cfg: PrinterConfig) -> Self {
        // Generic writers are never terminals; only `Always` turns color on.
        let use_color = cfg.color == ColorChoice::Always;
        Self { out, use_color }
    }

    #[inline]
    fn format_name(&self, name: &str) -> String {
        if self.use_color {
            format!("\x1b[32m{}\x1b[0m", name)
        } else {
            name.to_owned()
        }
    }
}

impl HumanPrinter<io::Stdout> {
    /// Create a printer that writes to stdout with TTY detection.
    pub fn stdout(cfg: PrinterConfig) -> Self {
        use std::io::IsTerminal;

        let use_color = match cfg.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stdout().is_terminal(),
        };

        HumanPrinter {
            out: io::stdout(),
            use_color,
        }
    }
}

impl<W: Write> FilePrinter for HumanPrinter<W> {
    fn begin(&mut self, ctx: &PrintContext) -> io::Result<()> {
        if ctx.total == 0 {
            return Ok(());
        }
        writeln!(self.out, "{:>3}  {:<40}  {:>10}  TYPE", "#", "NAME", "SIZE")?;
        writeln!(self.out, "{}", "-".repeat(80))
    }

    fn print_row(&mut self, row: &FileRow<'_>, _ctx: &PrintContext) -> io::Result<()> {
        // Pad before coloring so escape codes do not skew the columns.
        let name = self.format_name(&format!("{:<40}", row.file.name));
        write!(
            self.out,
            "{:>3}  {}  {:>10}  {}",
            row.rank,
            name,
            human_size(row.file.size),
            row.file.file_type
        )?;

        if let Some(at) = row.accessed {
            let local: DateTime<Local> = at.into();
            write!(self.out, "  (opened {})", local.format("%Y-%m-%d %H:%M"))?;
        }

        writeln!(self.out)
    }

    fn finish(&mut self, ctx: &PrintContext) -> io::Result<()> {
        match ctx.total {
            0 => writeln!(self.out, "No files."),
            1 => writeln!(self.out, "\n1 file"),
            n => writeln!(self.out, "\n{n} files"),
        }
    }
}

pub struct JsonPrinter<W: Write> {
    out: W,
}

impl<W: Write> JsonPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl JsonPrinter<io::Stdout> {
    /// Create a printer that writes to stdout.
    pub fn stdout() -> Self {
        JsonPrinter::new(io::stdout())
    }
}

impl<W: Write> FilePrinter for JsonPrinter<W> {
    fn begin(&mut self, _ctx: &PrintContext) -> io::Result<()> {
        Ok(())
    }

    fn print_row(&mut self, row: &FileRow<'_>, ctx: &PrintContext) -> io::Result<()> {
        let obj = serde_json::json!({
            "record": "file",
            "kind": ctx.kind,
            "rank": row.rank,
            "id": row.file.id,
            "name": row.file.name,
            "size": row.file.size,
            "type": row.file.file_type,
            "uri": row.file.uri,
            "viewer": ViewerKind::from_file_type(&row.file.file_type),
            "lastAccessed": row.accessed.map(|at| at.timestamp_millis()),
        });
        writeln!(self.out, "{}", obj)
    }

    fn finish(&mut self, ctx: &PrintContext) -> io::Result<()> {
        let obj = serde_json::json!({
            "record": "summary",
            "kind": ctx.kind,
            "sort": ctx.sort,
            "total": ctx.total,
        });
        writeln!(self.out, "{}", obj)
    }
}

/// Print `rows` through `printer`, framing them with begin/finish.
pub fn print_files(
    printer: &mut dyn FilePrinter,
    ctx: &PrintContext,
    rows: &[FileRow<'_>],
) -> io::Result<()> {
    printer.begin(ctx)?;
    for row in rows {
        printer.print_row(row, ctx)?;
    }
    printer.finish(ctx)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
