use std::process::ExitCode;

use clap::{ArgAction, Args, Subcommand, ValueEnum};
use shelf_engine::{
    EpubViewerPatch, ImageViewerPatch, PdfViewerPatch, Preferences, SortKey, TextViewerPatch,
    Theme, is_valid_zoom,
};

use crate::commands::{CommandResult, GlobalArgs};

#[derive(Debug, Args)]
pub struct PrefsArgs {
    #[command(subcommand)]
    pub action: Option<PrefsAction>,
}

#[derive(Debug, Subcommand)]
pub enum PrefsAction {
    /// Print the current preferences (the default).
    Show,

    /// Turn dark mode on or off.
    DarkMode {
        #[arg(action = ArgAction::Set, value_name = "BOOL")]
        enabled: bool,
    },

    /// Set the sort used by `list` when none is given.
    Sort {
        #[arg(value_name = "KEY")]
        key: SortKey,
    },

    /// Change text viewer settings.
    Text(FontArgs),

    /// Change PDF viewer settings.
    Pdf(PdfArgs),

    /// Change image viewer settings.
    Image(ImageArgs),

    /// Change EPUB viewer settings.
    Epub(FontArgs),

    /// Restore every preference to its default.
    Reset,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
    Sepia,
}

impl From<ThemeArg> for Theme {
    fn from(t: ThemeArg) -> Self {
        match t {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::Sepia => Theme::Sepia,
        }
    }
}

#[derive(Debug, Args)]
pub struct FontArgs {
    #[arg(long)]
    pub font_size: Option<u32>,

    #[arg(long)]
    pub font_family: Option<String>,

    #[arg(long, value_enum)]
    pub theme: Option<ThemeArg>,
}

#[derive(Debug, Args)]
pub struct PdfArgs {
    /// Initial zoom factor
    #[arg(long, value_parser = parse_zoom)]
    pub zoom: Option<f64>,

    /// Gap between pages, in points
    #[arg(long)]
    pub page_spacing: Option<u32>,
}

#[derive(Debug, Args)]
pub struct ImageArgs {
    /// Initial zoom factor
    #[arg(long, value_parser = parse_zoom)]
    pub zoom: Option<f64>,

    #[arg(long, value_name = "BOOL")]
    pub double_tap_zoom: Option<bool>,
}

fn parse_zoom(s: &str) -> Result<f64, String> {
    let zoom: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if !is_valid_zoom(zoom) {
        return Err(format!("zoom must be a positive number, got {s}"));
    }
    Ok(zoom)
}

impl From<FontArgs> for TextViewerPatch {
    fn from(a: FontArgs) -> Self {
        Self {
            font_size: a.font_size,
            font_family: a.font_family,
            theme: a.theme.map(Theme::from),
        }
    }
}

impl From<FontArgs> for EpubViewerPatch {
    fn from(a: FontArgs) -> Self {
        Self {
            font_size: a.font_size,
            font_family: a.font_family,
            theme: a.theme.map(Theme::from),
        }
    }
}

impl From<PdfArgs> for PdfViewerPatch {
    fn from(a: PdfArgs) -> Self {
        Self {
            default_zoom: a.zoom,
            page_spacing: a.page_spacing,
        }
    }
}

impl From<ImageArgs> for ImageViewerPatch {
    fn from(a: ImageArgs) -> Self {
        Self {
            default_zoom: a.zoom,
            enable_double_tap_zoom: a.double_tap_zoom,
        }
    }
}

pub fn run(global: &GlobalArgs, args: PrefsArgs) -> ExitCode {
    match execute(global, args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[error] {e}");
            ExitCode::from(2)
        }
    }
}

fn nothing_to_change() -> CommandResult<ExitCode> {
    eprintln!("Nothing to change, pass at least one option (see --help)");
    Ok(ExitCode::from(1))
}

fn execute(global: &GlobalArgs, args: PrefsArgs) -> CommandResult<ExitCode> {
    let prefs = global.preferences()?;

    match args.action.unwrap_or(PrefsAction::Show) {
        PrefsAction::Show => {}
        PrefsAction::DarkMode { enabled } => prefs.set_dark_mode(enabled),
        PrefsAction::Sort { key } => prefs.set_default_sort(key),
        PrefsAction::Text(a) => {
            let patch = TextViewerPatch::from(a);
            if patch.is_empty() {
                return nothing_to_change();
            }
            prefs.update_text_viewer(patch);
        }
        PrefsAction::Pdf(a) => {
            let patch = PdfViewerPatch::from(a);
            if patch.is_empty() {
                return nothing_to_change();
            }
            prefs.update_pdf_viewer(patch);
        }
        PrefsAction::Image(a) => {
            let patch = ImageViewerPatch::from(a);
            if patch.is_empty() {
                return nothing_to_change();
            }
            prefs.update_image_viewer(patch);
        }
        PrefsAction::Epub(a) => {
            let patch = EpubViewerPatch::from(a);
            if patch.is_empty() {
                return nothing_to_change();
            }
            prefs.update_epub_viewer(patch);
        }
        PrefsAction::Reset => prefs.reset(),
    }

    print_preferences(&prefs.get())?;
    Ok(ExitCode::from(0))
}

fn print_preferences(prefs: &Preferences) -> CommandResult<()> {
    println!("{}", serde_json::to_string_pretty(prefs)?);
    Ok(())
}

#[cfg(test)]
#[path = "prefs_tests.rs"]
mod tests;
