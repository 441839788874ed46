//! Command implementations
//!
//! Every command writes its report to the supplied writer so the binary can
//! hand it standard output and tests can hand it a buffer.

use crate::cli::{GridArgs, InspectArgs, NormalizeArgs, ValidateArgs, WiringArgs};
use anyhow::{Context, Result, bail};
use colored::Colorize;
use ledmap_core::{PanelId, Rect, Validatable, WiringIndicator, WiringIndicators, resolve_wiring};
use ledmap_editor::EditorSession;
use ledmap_ir::{
    DOCUMENT_FILE_EXTENSION, EditorConfig, ImportOutcome, LayoutStore, LedGrid, backup_document,
    ensure_extension, is_document_file, load_document, save_document, save_document_compact,
    save_document_to_compact_string, save_document_to_string, save_led_map,
    save_led_map_to_string,
};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// ============================================================================
// inspect
// ============================================================================

/// Machine-readable summary printed by `inspect --json`
#[derive(Debug, Serialize)]
pub struct InspectReport {
    pub file: PathBuf,
    pub grid_factor_x: u32,
    pub grid_factor_y: u32,
    pub panels: Vec<PanelReport>,
    /// Enclosing rectangle in grid units
    pub bounding_rect: Option<Rect>,
    pub covered_leds: u64,
}

#[derive(Debug, Serialize)]
pub struct PanelReport {
    pub id: PanelId,
    /// Panel rectangle in grid units
    pub rect: Rect,
    pub wiring: WiringIndicators,
}

impl InspectReport {
    fn from_store(file: &Path, store: &LayoutStore) -> Self {
        let step = store.grid_step().max(1);
        let grid = store.grid_factors();
        let panels = store
            .panels()
            .filter_map(|panel| {
                Some(PanelReport {
                    id: panel.id,
                    rect: in_units(panel.placed_rect()?, step),
                    wiring: store.wiring_for(panel.id)?,
                })
            })
            .collect();

        Self {
            file: file.to_path_buf(),
            grid_factor_x: grid.x,
            grid_factor_y: grid.y,
            panels,
            bounding_rect: store.bounding_rect().map(|rect| in_units(rect, step)),
            covered_leds: store.total_covered_leds(),
        }
    }
}

fn in_units(rect: Rect, step: i32) -> Rect {
    Rect::from_xywh(
        rect.x() / step,
        rect.y() / step,
        rect.width() / step,
        rect.height() / step,
    )
}

pub fn inspect(args: &InspectArgs, config: &EditorConfig, out: &mut dyn Write) -> Result<()> {
    let mut session = EditorSession::new(config.clone());
    let outcome = session
        .open(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    if outcome == ImportOutcome::Empty {
        tracing::warn!("{} has no panels", args.file.display());
    }

    let report = InspectReport::from_store(&args.file, session.store());
    if args.json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "{}", args.file.display().to_string().bold())?;
    writeln!(
        out,
        "  Grid unit:    {}x{} LEDs",
        report.grid_factor_x, report.grid_factor_y
    )?;
    writeln!(out, "  Panels:       {}", report.panels.len())?;
    for panel in &report.panels {
        writeln!(
            out,
            "    #{:<3} {}x{} units @ ({}, {})  entry {}  exit {}",
            panel.id,
            panel.rect.width(),
            panel.rect.height(),
            panel.rect.x(),
            panel.rect.y(),
            describe(&panel.wiring.entry).green(),
            describe(&panel.wiring.exit).yellow(),
        )?;
    }
    if let Some(rect) = report.bounding_rect {
        writeln!(out, "  Bounding box: {}x{} units", rect.width(), rect.height())?;
    }
    writeln!(out, "  Covered LEDs: {}", report.covered_leds)?;
    Ok(())
}

fn describe(indicator: &WiringIndicator) -> String {
    format!(
        "{} ({}°)",
        indicator.corner.display_name(),
        indicator.rotation
    )
}

// ============================================================================
// normalize
// ============================================================================

pub fn normalize(args: &NormalizeArgs, config: &EditorConfig, out: &mut dyn Write) -> Result<()> {
    let mut session = EditorSession::new(config.clone());
    let outcome = session
        .open(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    if outcome.is_empty() {
        bail!("{} has no panels to normalize", args.file.display());
    }

    let snapped = session.store_mut().snap_panels_to_grid();
    tracing::debug!("Snapped {} panels to the grid", snapped);

    let document = session.to_document(session.store());
    let Some(output) = &args.output else {
        let text = if args.pretty {
            save_document_to_string(&document)?
        } else {
            save_document_to_compact_string(&document)?
        };
        writeln!(out, "{}", text)?;
        return Ok(());
    };

    let path = ensure_extension(output);
    if path.exists() {
        if !is_document_file(&path) {
            bail!("Refusing to overwrite {}: it is not a panel document", path.display());
        }
        if let Some(backup) = backup_document(&path)? {
            tracing::info!("Backed up {} to {}", path.display(), backup.display());
        }
    }
    if args.pretty {
        save_document(&document, &path)?;
    } else {
        save_document_compact(&document, &path)?;
    }
    tracing::info!("Wrote {} panels to {}", document.panels.len(), path.display());
    writeln!(
        out,
        "{} {} -> {}",
        "normalized".green(),
        args.file.display(),
        path.display()
    )?;
    Ok(())
}

// ============================================================================
// validate
// ============================================================================

/// Documents named by `path`: the file itself, or every `*.json` below it
fn document_paths(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to scan {}", path.display()))?;
        let is_document = entry
            .path()
            .extension()
            .is_some_and(|ext| ext == DOCUMENT_FILE_EXTENSION);
        if entry.file_type().is_file() && is_document {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}

pub fn validate(args: &ValidateArgs, out: &mut dyn Write) -> Result<()> {
    let paths = document_paths(&args.path)?;
    if paths.is_empty() {
        bail!("No panel documents found under {}", args.path.display());
    }

    let mut failed = 0;
    for path in &paths {
        let result = load_document(path).and_then(|document| {
            document.validate()?;
            Ok(document)
        });
        match result {
            Ok(document) => writeln!(
                out,
                "{} {} ({} panels)",
                "✓".green(),
                path.display(),
                document.panels.len()
            )?,
            Err(e) => {
                failed += 1;
                tracing::debug!("{} failed validation: {}", path.display(), e);
                writeln!(out, "{} {}: {}", "✗".red(), path.display(), e)?;
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} documents failed validation", failed, paths.len());
    }
    Ok(())
}

// ============================================================================
// wiring
// ============================================================================

pub fn wiring(args: &WiringArgs, out: &mut dyn Write) -> Result<()> {
    let indicators = resolve_wiring(
        args.start_h.into(),
        args.start_v.into(),
        args.orientation.into(),
        args.serpentine,
        args.width,
        args.height,
    );
    writeln!(out, "entry: {}", describe(&indicators.entry).green())?;
    writeln!(out, "exit:  {}", describe(&indicators.exit).yellow())?;
    Ok(())
}

// ============================================================================
// grid
// ============================================================================

pub fn grid(args: &GridArgs, out: &mut dyn Write) -> Result<()> {
    let mut grid = LedGrid::new(args.width, args.height);
    for cell in &args.cells {
        grid.press(cell.x, cell.y)?;
    }
    let map = grid.to_led_map();

    match &args.output {
        Some(output) => {
            let path = ensure_extension(output);
            save_led_map(&map, &path)?;
            tracing::info!("Wrote {} LEDs to {}", grid.led_count(), path.display());
            writeln!(
                out,
                "{} {} LEDs -> {}",
                "mapped".green(),
                grid.led_count(),
                path.display()
            )?;
        }
        None => writeln!(out, "{}", save_led_map_to_string(&map)?)?,
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{GridCell, HorizontalEdge, RunDirection, VerticalEdge};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const ROW_OF_TWO: &str = r#"{"panels":[
        {"x":0,"y":0,"w":32,"h":32,"s":true},
        {"x":32,"y":0,"w":32,"h":32,"s":true}
    ],"panelCount":2}"#;

    fn write(dir: &TempDir, name: &str, text: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, text).unwrap();
        path
    }

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_inspect_text() {
        plain();
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "matrix.json", ROW_OF_TWO);
        let mut out = Vec::new();

        inspect(
            &InspectArgs { file, json: false },
            &EditorConfig::default(),
            &mut out,
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Grid unit:    8x8 LEDs"));
        assert!(text.contains("#2   4x4 units @ (4, 0)"));
        assert!(text.contains("Bounding box: 8x4 units"));
        assert!(text.contains("Covered LEDs: 2048"));
    }

    #[test]
    fn test_inspect_json() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "matrix.json", ROW_OF_TWO);
        let mut out = Vec::new();

        inspect(
            &InspectArgs { file, json: true },
            &EditorConfig::default(),
            &mut out,
        )
        .unwrap();

        let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(report["grid_factor_x"], 8);
        assert_eq!(report["panels"].as_array().unwrap().len(), 2);
        assert_eq!(report["panels"][0]["wiring"]["entry"]["corner"], "top-left");
        // 32 rows is even, so a serpentine strip leaves next to where it entered
        assert_eq!(report["panels"][0]["wiring"]["exit"]["corner"], "bottom-left");
        assert_eq!(report["covered_leds"], 2048);
    }

    #[test]
    fn test_inspect_missing_file() {
        let mut out = Vec::new();
        let err = inspect(
            &InspectArgs {
                file: PathBuf::from("/nonexistent/matrix.json"),
                json: false,
            },
            &EditorConfig::default(),
            &mut out,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to open"));
    }

    #[test]
    fn test_normalize_snaps_to_grid() {
        let dir = TempDir::new().unwrap();
        // 30 is not a multiple of the 8 LED unit, it rounds to 32
        let file = write(
            &dir,
            "matrix.json",
            r#"{"n":"wall","panels":[{"x":0,"y":0,"w":30,"h":32},{"x":32,"y":0,"w":32,"h":32}]}"#,
        );
        let mut out = Vec::new();

        normalize(
            &NormalizeArgs {
                file,
                output: None,
                pretty: false,
            },
            &EditorConfig::default(),
            &mut out,
        )
        .unwrap();

        let written: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(written["panels"][0]["w"], 32);
        assert_eq!(written["panelCount"], 2);
        assert_eq!(written["n"], "wall");
    }

    #[test]
    fn test_normalize_to_file() {
        plain();
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "matrix.json", ROW_OF_TWO);
        let output = dir.path().join("normalized.json");
        let mut out = Vec::new();

        normalize(
            &NormalizeArgs {
                file,
                output: Some(output.clone()),
                pretty: true,
            },
            &EditorConfig::default(),
            &mut out,
        )
        .unwrap();

        let document = load_document(&output).unwrap();
        assert_eq!(document.panels.len(), 2);
        assert!(String::from_utf8(out).unwrap().starts_with("normalized"));
    }

    #[test]
    fn test_normalize_in_place_keeps_backup() {
        plain();
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "matrix.json", ROW_OF_TWO);
        let mut out = Vec::new();

        normalize(
            &NormalizeArgs {
                file: file.clone(),
                output: Some(file.clone()),
                pretty: false,
            },
            &EditorConfig::default(),
            &mut out,
        )
        .unwrap();

        let backup = dir.path().join("matrix.json.backup");
        assert_eq!(std::fs::read_to_string(backup).unwrap(), ROW_OF_TWO);
        let written = std::fs::read_to_string(&file).unwrap();
        assert!(!written.contains('\n'));
        assert_eq!(load_document(&file).unwrap().panels.len(), 2);
    }

    #[test]
    fn test_normalize_output_gets_extension_and_directories() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "matrix.json", ROW_OF_TWO);
        let mut out = Vec::new();

        normalize(
            &NormalizeArgs {
                file,
                output: Some(dir.path().join("out").join("wall")),
                pretty: true,
            },
            &EditorConfig::default(),
            &mut out,
        )
        .unwrap();

        let written = dir.path().join("out").join("wall.json");
        assert!(is_document_file(&written));
        assert!(!dir.path().join("out").join("wall.json.backup").exists());
    }

    #[test]
    fn test_normalize_will_not_overwrite_other_files() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "matrix.json", ROW_OF_TWO);
        let notes = write(&dir, "notes.json", "just some notes");
        let mut out = Vec::new();

        let err = normalize(
            &NormalizeArgs {
                file,
                output: Some(notes.clone()),
                pretty: false,
            },
            &EditorConfig::default(),
            &mut out,
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("Refusing to overwrite"));
        assert_eq!(std::fs::read_to_string(notes).unwrap(), "just some notes");
    }

    #[test]
    fn test_normalize_rejects_empty_document() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "empty.json", r#"{"panels":[]}"#);
        let mut out = Vec::new();
        let args = NormalizeArgs {
            file,
            output: None,
            pretty: false,
        };
        assert!(normalize(&args, &EditorConfig::default(), &mut out).is_err());
    }

    #[test]
    fn test_validate_directory() {
        plain();
        let dir = TempDir::new().unwrap();
        write(&dir, "a.json", ROW_OF_TWO);
        write(
            &dir,
            "b.json",
            r#"{"panels":[{"x":0,"y":0,"w":32,"h":32},{"x":16,"y":0,"w":32,"h":32}]}"#,
        );
        write(&dir, "notes.txt", "not a document");
        let mut out = Vec::new();

        let err = validate(
            &ValidateArgs {
                path: dir.path().to_path_buf(),
            },
            &mut out,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "1 of 2 documents failed validation");

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("✓") && lines[0].ends_with("a.json (2 panels)"));
        assert!(lines[1].starts_with("✗") && lines[1].contains("overlap"));
    }

    #[test]
    fn test_validate_single_file() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "matrix.json", ROW_OF_TWO);
        let mut out = Vec::new();
        validate(&ValidateArgs { path: file }, &mut out).unwrap();
    }

    #[test]
    fn test_validate_empty_directory() {
        let dir = TempDir::new().unwrap();
        let mut out = Vec::new();
        let args = ValidateArgs {
            path: dir.path().to_path_buf(),
        };
        assert!(validate(&args, &mut out).is_err());
    }

    #[test]
    fn test_wiring_output() {
        plain();
        let args = WiringArgs {
            start_h: HorizontalEdge::Left,
            start_v: VerticalEdge::Top,
            orientation: RunDirection::Horizontal,
            serpentine: true,
            width: 3,
            height: 3,
        };
        let mut out = Vec::new();
        wiring(&args, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "entry: top-left (-180°)\nexit:  bottom-right (-180°)\n"
        );
    }

    fn grid_args(width: u32, height: u32, cells: &[(u32, u32)]) -> GridArgs {
        GridArgs {
            width,
            height,
            cells: cells.iter().map(|&(x, y)| GridCell { x, y }).collect(),
            output: None,
        }
    }

    #[test]
    fn test_grid_numbers_cells_in_order() {
        let mut out = Vec::new();
        grid(&grid_args(3, 2, &[(2, 0), (0, 1), (1, 1)]), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"leds\":[-1,-1,0,1,2,-1]}\n"
        );
    }

    #[test]
    fn test_grid_repeat_cell_renumbers() {
        let mut out = Vec::new();
        grid(&grid_args(3, 1, &[(0, 0), (1, 0), (2, 0), (0, 0)]), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\"leds\":[-1,0,1]}\n");
    }

    #[test]
    fn test_grid_cell_outside() {
        let mut out = Vec::new();
        let err = grid(&grid_args(2, 2, &[(2, 0)]), &mut out).unwrap_err();
        assert_eq!(err.to_string(), "Cell (2, 0) is outside the 2x2 LED grid");
    }

    #[test]
    fn test_grid_to_file() {
        plain();
        let dir = TempDir::new().unwrap();
        let mut args = grid_args(2, 1, &[(1, 0)]);
        args.output = Some(dir.path().join("led_map"));
        let mut out = Vec::new();

        grid(&args, &mut out).unwrap();

        let written = std::fs::read_to_string(dir.path().join("led_map.json")).unwrap();
        assert_eq!(written, r#"{"leds":[-1,0]}"#);
        assert!(String::from_utf8(out).unwrap().starts_with("mapped 1 LEDs"));
    }
}
