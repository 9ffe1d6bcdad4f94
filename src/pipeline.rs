//! Import, place, export.

use anyhow::{Context, Result};
use holekit_camtools::{PlacementOrchestrator, PlacementParameters, PlacementResult};
use holekit_core::{HoleCategory, HoleSet, Polygon};
use holekit_designer::{import_drawing, write_preview, DxfExporter, ImportOptions, PreviewStyle};
use std::path::PathBuf;
use tracing::{info, warn};

/// Everything one `place` run needs.
#[derive(Debug, Clone)]
pub struct PlaceJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub previews: Vec<PathBuf>,
    pub params: PlacementParameters,
    pub import: ImportOptions,
    pub style: PreviewStyle,
}

/// What a run produced.
#[derive(Debug, Clone)]
pub struct PlaceReport {
    pub panel: Polygon,
    pub had_cable_path: bool,
    pub result: PlacementResult,
    pub written: Vec<PathBuf>,
}

/// Runs the whole pipeline. Infeasible branches are logged and exported as
/// empty layers; only unreadable input, bad parameters and write failures
/// are errors.
pub fn run_placement(job: &PlaceJob) -> Result<PlaceReport> {
    let drawing = import_drawing(&job.input, &job.import)
        .with_context(|| format!("Failed to import {}", job.input.display()))?;
    let panel = drawing.panel().clone();
    let cable_path = drawing.cable_path();
    info!(
        "Panel from {}: {} vertices, {} layer(s), cable path {}",
        job.input.display(),
        panel.len(),
        drawing.layers().len(),
        if cable_path.is_some() { "found" } else { "absent" }
    );

    let orchestrator =
        PlacementOrchestrator::new(job.params.clone()).context("Invalid placement parameters")?;
    let result = orchestrator
        .place(&panel, cable_path.as_ref())
        .context("Placement failed")?;

    for error in result.errors() {
        warn!("{}", error);
    }

    let drill = result
        .drill_set()
        .cloned()
        .unwrap_or_else(|| HoleSet::empty(HoleCategory::Drill, job.params.drill_diameter));
    let cable = result
        .cable_set()
        .cloned()
        .unwrap_or_else(|| HoleSet::empty(HoleCategory::Cable, job.params.cable_diameter));

    let mut written = Vec::new();
    DxfExporter::new()
        .export_file(&job.output, &panel, &drill, &cable)
        .with_context(|| format!("Failed to write {}", job.output.display()))?;
    written.push(job.output.clone());

    for preview in &job.previews {
        write_preview(preview, &panel, &drill, &cable, &job.style)?;
        written.push(preview.clone());
    }

    info!("{}", result.summary());
    Ok(PlaceReport {
        panel,
        had_cable_path: cable_path.is_some(),
        result,
        written,
    })
}
