//! Stickerpress: conference badge stickers from an attendee roster.
//!
//! Two pipelines share this crate:
//!
//! 1. The renderer reads a roster CSV and writes one PNG sticker per
//!    attendee: their first name, a QR code carrying a vCard, and their last
//!    name.
//! 2. The sheet compositor lays those stickers out ten to a US Letter page,
//!    writes a print-ready PDF and rasterizes page 1 as a PNG preview.
//!
//! # Modules
//!
//! - [`roster`]: CSV reading and attendee records
//! - [`render`]: QR payloads, fonts and sticker composition
//! - [`sheet`]: grid layout, pagination, PDF and preview output
//! - [`geom`]: points/pixels coordinate types
//! - [`config`]: geometry and path defaults
//! - [`error`]: error types for stickerpress operations

pub mod config;
pub mod error;
pub mod geom;
pub mod logging;
pub mod render;
pub mod roster;
pub mod sheet;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use config::{OutputPaths, SheetConfig, StickerConfig, DEFAULT_ROSTER};
pub use error::StickerPressError;
use render::{FontSearch, FontSet, FONT_DIR_ENV};

/// The stickerpress CLI application.
#[derive(Parser)]
#[command(name = "stickerpress")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Roster CSV to render when no subcommand is given.
    csv_file: Option<PathBuf>,

    /// Report format on stdout ('text' or 'json').
    #[arg(long, global = true, default_value = "text")]
    output: String,

    /// Extra directory to search for DejaVu fonts.
    #[arg(long, global = true, env = FONT_DIR_ENV)]
    font_dir: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Render one sticker per roster row into the stickers directory.
    Render(RenderArgs),
    /// Lay out the stickers directory as a printable PDF and a PNG preview.
    Sheet(SheetArgs),
    /// Render stickers, then compose the sheet.
    Build(BuildArgs),
}

#[derive(clap::Args)]
struct RenderArgs {
    /// Roster CSV (defaults to data.csv).
    csv_file: Option<PathBuf>,
}

#[derive(clap::Args)]
struct SheetArgs {
    /// Outline every sticker with a thin black rectangle.
    #[arg(long)]
    border: bool,
}

#[derive(clap::Args)]
struct BuildArgs {
    /// Roster CSV (defaults to data.csv).
    csv_file: Option<PathBuf>,

    /// Outline every sticker with a thin black rectangle.
    #[arg(long)]
    border: bool,
}

/// How reports are printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    fn parse(value: &str) -> Result<Self, StickerPressError> {
        match value {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(StickerPressError::UnsupportedOutput(format!(
                "'{}' (supported: text, json)",
                other
            ))),
        }
    }

    fn print<T: Serialize + std::fmt::Display>(self, report: &T) -> Result<(), StickerPressError> {
        match self {
            ReportFormat::Text => print!("{}", report),
            ReportFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        }
        Ok(())
    }
}

/// Report of a `build` run: both halves in order.
#[derive(Serialize)]
struct BuildReport {
    render: render::RenderReport,
    sheet: sheet::SheetReport,
}

impl std::fmt::Display for BuildReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render)?;
        writeln!(f)?;
        write!(f, "{}", self.sheet)
    }
}

/// Run the stickerpress CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), StickerPressError> {
    let cli = Cli::parse();
    let format = ReportFormat::parse(&cli.output)?;
    let fonts = FontSearch::standard(cli.font_dir.as_deref());

    match cli.command {
        Some(Commands::Render(args)) => {
            let report = run_render(args.csv_file, &fonts)?;
            format.print(&report)
        }
        Some(Commands::Sheet(args)) => {
            let report = run_sheet(args.border)?;
            format.print(&report)
        }
        Some(Commands::Build(args)) => {
            let render = run_render(args.csv_file, &fonts)?;
            let sheet = run_sheet(args.border)?;
            format.print(&BuildReport { render, sheet })
        }
        None => {
            let report = run_render(cli.csv_file, &fonts)?;
            format.print(&report)
        }
    }
}

fn resolve_roster(csv_file: Option<PathBuf>) -> PathBuf {
    csv_file.unwrap_or_else(|| {
        tracing::info!("No CSV file specified, using default: {}", DEFAULT_ROSTER);
        PathBuf::from(DEFAULT_ROSTER)
    })
}

/// Execute the render pipeline.
fn run_render(
    csv_file: Option<PathBuf>,
    search: &FontSearch,
) -> Result<render::RenderReport, StickerPressError> {
    let csv_path = resolve_roster(csv_file);
    let paths = OutputPaths::default();
    tracing::info!("Processing file: {}", csv_path.display());
    tracing::info!("Output folder: {}", paths.sticker_dir.display());

    let roster = roster::io_csv::read_roster_csv(&csv_path)?;
    let fonts = FontSet::resolve(search);
    render::render_roster(&roster, &paths.sticker_dir, &fonts, &StickerConfig::default())
}

/// Execute the sheet pipeline.
fn run_sheet(border: bool) -> Result<sheet::SheetReport, StickerPressError> {
    let config = SheetConfig {
        draw_border: border,
        ..SheetConfig::default()
    };
    sheet::compose_sheet(&OutputPaths::default(), &config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_format_accepts_text_and_json() {
        assert_eq!(ReportFormat::parse("text").expect("text"), ReportFormat::Text);
        assert_eq!(ReportFormat::parse("json").expect("json"), ReportFormat::Json);
        assert!(matches!(
            ReportFormat::parse("yaml"),
            Err(StickerPressError::UnsupportedOutput(_))
        ));
    }

    #[test]
    fn cli_accepts_bare_csv_and_subcommands() {
        let cli = Cli::try_parse_from(["stickerpress", "people.csv"]).expect("parse");
        assert_eq!(cli.csv_file, Some(PathBuf::from("people.csv")));
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["stickerpress", "sheet", "--border"]).expect("parse");
        assert!(matches!(cli.command, Some(Commands::Sheet(SheetArgs { border: true }))));

        let cli = Cli::try_parse_from(["stickerpress", "build", "x.csv", "--output", "json"])
            .expect("parse");
        assert_eq!(cli.output, "json");
        match cli.command {
            Some(Commands::Build(args)) => {
                assert_eq!(args.csv_file, Some(PathBuf::from("x.csv")));
                assert!(!args.border);
            }
            _ => panic!("expected build"),
        }
    }
}
