use clap::{Args, Parser, Subcommand, ValueEnum};
use ledmap_core::{Orientation, StartH, StartV};
use ledmap_ir::ledmap::{DEFAULT_GRID_SIZE, MAX_GRID_SIZE};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "ledmap",
    about = "Lay out LED matrix panels and check device panel documents",
    version
)]
pub struct Cli {
    /// Editor configuration file (TOML)
    #[arg(long, global = true, env = "LEDMAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the grid, panels and wiring of a document.
    Inspect(InspectArgs),

    /// Snap a document onto its inferred grid and write it back out.
    Normalize(NormalizeArgs),

    /// Check one document, or every document under a directory.
    Validate(ValidateArgs),

    /// Resolve where a panel's strip enters and leaves.
    Wiring(WiringArgs),

    /// Number the cells of an LED grid and print the device LED map.
    Grid(GridArgs),
}

#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Panel document to read
    pub file: PathBuf,

    /// Print a JSON summary instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct NormalizeArgs {
    /// Panel document to read
    pub file: PathBuf,

    /// Write here instead of standard output
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Indent the written JSON
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Document file or directory to scan for `*.json`
    pub path: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct WiringArgs {
    /// Edge the strip starts on, horizontally
    #[arg(long, value_enum, default_value_t = HorizontalEdge::Left)]
    pub start_h: HorizontalEdge,

    /// Edge the strip starts on, vertically
    #[arg(long, value_enum, default_value_t = VerticalEdge::Top)]
    pub start_v: VerticalEdge,

    /// Direction the LEDs run in
    #[arg(long, value_enum, default_value_t = RunDirection::Horizontal)]
    pub orientation: RunDirection,

    /// Alternate rows or columns reverse direction
    #[arg(long)]
    pub serpentine: bool,

    /// Panel width in LEDs
    #[arg(long)]
    pub width: u32,

    /// Panel height in LEDs
    #[arg(long)]
    pub height: u32,
}

#[derive(Debug, Clone, Args)]
pub struct GridArgs {
    /// Cells per row
    #[arg(
        long,
        default_value_t = DEFAULT_GRID_SIZE,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_GRID_SIZE))
    )]
    pub width: u32,

    /// Number of rows
    #[arg(
        long,
        default_value_t = DEFAULT_GRID_SIZE,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_GRID_SIZE))
    )]
    pub height: u32,

    /// Toggle a cell, in LED order; naming a lit cell again darkens it
    #[arg(long = "cell", value_name = "X,Y", value_parser = parse_cell)]
    pub cells: Vec<GridCell>,

    /// Write the map here instead of standard output
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// A grid cell named on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub x: u32,
    pub y: u32,
}

fn parse_cell(text: &str) -> Result<GridCell, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{}'", text))?;
    let coordinate = |value: &str| {
        value
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("bad coordinate '{}': {}", value, e))
    };
    Ok(GridCell {
        x: coordinate(x)?,
        y: coordinate(y)?,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HorizontalEdge {
    Left,
    Right,
}

impl From<HorizontalEdge> for StartH {
    fn from(edge: HorizontalEdge) -> Self {
        match edge {
            HorizontalEdge::Left => StartH::Left,
            HorizontalEdge::Right => StartH::Right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VerticalEdge {
    Top,
    Bottom,
}

impl From<VerticalEdge> for StartV {
    fn from(edge: VerticalEdge) -> Self {
        match edge {
            VerticalEdge::Top => StartV::Top,
            VerticalEdge::Bottom => StartV::Bottom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunDirection {
    Horizontal,
    Vertical,
}

impl From<RunDirection> for Orientation {
    fn from(direction: RunDirection) -> Self {
        match direction {
            RunDirection::Horizontal => Orientation::Horizontal,
            RunDirection::Vertical => Orientation::Vertical,
        }
    }
}
