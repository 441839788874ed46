//! # Ledmap CLI
//!
//! Command-line interface for the LED panel mapper.
//!
//! ## Commands
//!
//! - `inspect` - Show the inferred grid, panels, wiring and covered LEDs of a document
//! - `normalize` - Snap a document onto its grid and write it back out
//! - `validate` - Check one document or a directory of documents
//! - `wiring` - Resolve the entry and exit corners of a single panel
//! - `grid` - Number the cells of an LED grid and print the device LED map
//!

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands};

use anyhow::{Context, Result};
use ledmap_ir::EditorConfig;
use std::io::Write;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Load the editor configuration named on the command line, or the default
pub fn load_config(cli: &Cli) -> Result<EditorConfig> {
    match &cli.config {
        Some(path) => EditorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(EditorConfig::default()),
    }
}

/// Run a parsed command line, writing the report to `out`
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    match &cli.command {
        Commands::Inspect(args) => commands::inspect(args, &load_config(cli)?, out),
        Commands::Normalize(args) => commands::normalize(args, &load_config(cli)?, out),
        Commands::Validate(args) => commands::validate(args, out),
        Commands::Wiring(args) => commands::wiring(args, out),
        Commands::Grid(args) => commands::grid(args, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert_eq!(NAME, "ledmap_cli");
    }

    #[test]
    fn test_run_dispatches_wiring() {
        let cli = Cli::parse_from([
            "ledmap", "--no-color", "wiring", "--width", "4", "--height", "4",
        ]);
        let mut out = Vec::new();
        run(&cli, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("entry: top-left"));
    }

    #[test]
    fn test_config_scale_changes_report() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("ledmap.toml");
        std::fs::write(&config, "scale_factor = 20\n").unwrap();
        let file = dir.path().join("matrix.json");
        std::fs::write(&file, r#"{"panels":[{"x":0,"y":0,"w":16,"h":16}]}"#).unwrap();

        let config = config.to_string_lossy().into_owned();
        let file = file.to_string_lossy().into_owned();
        let cli = Cli::parse_from([
            "ledmap",
            "--config",
            config.as_str(),
            "inspect",
            file.as_str(),
            "--json",
        ]);
        let mut out = Vec::new();
        run(&cli, &mut out).unwrap();

        let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
        // Grid units do not depend on the display scale
        assert_eq!(report["panels"][0]["rect"]["size"]["width"], 2);
    }

    #[test]
    fn test_bad_config_is_reported() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("ledmap.toml");
        std::fs::write(&config, "scale_factor = 0\n").unwrap();

        let config = config.to_string_lossy().into_owned();
        let cli = Cli::parse_from(["ledmap", "--config", config.as_str(), "inspect", "matrix.json"]);
        let err = run(&cli, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to load config"));
    }
}
