//! Placement orchestrator.
//!
//! Runs the drill branch (inset, sample, clamp, dedupe) and, when a cable
//! path is supplied, the cable branch through the same steps. Each branch
//! reports its own outcome so an infeasible drill inset does not hide a
//! valid cable placement, and vice versa.

use crate::clamp::{clamp_all, DEFAULT_CLAMP_STEPS};
use crate::dedupe::dedupe_by_min_gap;
use crate::error::{ParameterError, ParameterResult, PlacementError};
use crate::offset::{offset_polygon, OffsetSettings};
use crate::sampler::{
    clearance_distance, sample_for_mode, sample_path, BorderSampling, DEFAULT_CORNER_OFFSET,
    DEFAULT_MIN_BORDER_SAMPLES,
};
use holekit_core::{HoleCategory, HoleSet, Path, PlacementMode, Point, Polygon};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Tolerances and sampling knobs that are not part of the user-facing form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementTuning {
    /// Arc length (mm) from the boundary's first vertex to the first border sample
    pub corner_offset: f64,
    /// Interpolation steps used when clamping toward the centroid
    pub clamp_steps: usize,
    /// Lower bound on the number of border samples
    pub min_border_samples: usize,
    pub offset: OffsetSettings,
}

impl Default for PlacementTuning {
    fn default() -> Self {
        Self {
            corner_offset: DEFAULT_CORNER_OFFSET,
            clamp_steps: DEFAULT_CLAMP_STEPS,
            min_border_samples: DEFAULT_MIN_BORDER_SAMPLES,
            offset: OffsetSettings::default(),
        }
    }
}

/// Parameters for a placement run. All lengths are millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementParameters {
    /// Minimum distance from the panel edge to the nearest hole edge
    pub edge_clearance: f64,
    pub drill_diameter: f64,
    /// Target spacing between drill holes along the sampling route
    pub drill_spacing: f64,
    pub placement_mode: PlacementMode,
    pub cable_diameter: f64,
    /// Target spacing between cable holes along the cable path
    pub cable_spacing: f64,
    #[serde(default)]
    pub tuning: PlacementTuning,
}

impl PlacementParameters {
    /// Builds parameters with default tuning.
    pub fn new(
        edge_clearance: f64,
        drill_diameter: f64,
        drill_spacing: f64,
        placement_mode: PlacementMode,
        cable_diameter: f64,
        cable_spacing: f64,
    ) -> Self {
        Self {
            edge_clearance,
            drill_diameter,
            drill_spacing,
            placement_mode,
            cable_diameter,
            cable_spacing,
            tuning: PlacementTuning::default(),
        }
    }

    pub fn with_tuning(mut self, tuning: PlacementTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Rejects non-finite values, negative clearance, non-positive
    /// diameters and spacings, and unusable tuning values.
    pub fn validate(&self) -> ParameterResult<()> {
        non_negative("edge_clearance", self.edge_clearance)?;
        positive("drill_diameter", self.drill_diameter)?;
        positive("drill_spacing", self.drill_spacing)?;
        positive("cable_diameter", self.cable_diameter)?;
        positive("cable_spacing", self.cable_spacing)?;

        let tuning = &self.tuning;
        if !tuning.corner_offset.is_finite() {
            return Err(ParameterError::NotFinite {
                name: "corner_offset".to_string(),
            });
        }
        if tuning.clamp_steps == 0 {
            return Err(ParameterError::InvalidValue {
                name: "clamp_steps".to_string(),
                reason: "at least one step is required".to_string(),
            });
        }
        if tuning.min_border_samples == 0 {
            return Err(ParameterError::InvalidValue {
                name: "min_border_samples".to_string(),
                reason: "at least one sample is required".to_string(),
            });
        }
        positive("offset.scale", tuning.offset.scale)?;
        positive("offset.miter_limit", tuning.offset.miter_limit)?;
        Ok(())
    }

    /// Shrink distance for the drill clearance boundary.
    pub fn drill_clearance(&self) -> f64 {
        clearance_distance(self.edge_clearance, self.drill_diameter)
    }

    /// Shrink distance for the cable clearance boundary.
    pub fn cable_clearance(&self) -> f64 {
        clearance_distance(self.edge_clearance, self.cable_diameter)
    }
}

fn positive(name: &str, value: f64) -> ParameterResult<()> {
    if !value.is_finite() {
        return Err(ParameterError::NotFinite {
            name: name.to_string(),
        });
    }
    if value <= 0.0 {
        return Err(ParameterError::NotPositive {
            name: name.to_string(),
            value,
        });
    }
    Ok(())
}

fn non_negative(name: &str, value: f64) -> ParameterResult<()> {
    if !value.is_finite() {
        return Err(ParameterError::NotFinite {
            name: name.to_string(),
        });
    }
    if value < 0.0 {
        return Err(ParameterError::Negative {
            name: name.to_string(),
            value,
        });
    }
    Ok(())
}

/// A single placement request.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRequest {
    pub panel: Polygon,
    pub cable_path: Option<Path>,
    pub params: PlacementParameters,
}

impl PlacementRequest {
    pub fn new(panel: Polygon, cable_path: Option<Path>, params: PlacementParameters) -> Self {
        Self {
            panel,
            cable_path,
            params,
        }
    }
}

/// A branch that completed: its clearance boundary and accepted holes.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBranch {
    pub boundary: Polygon,
    pub holes: HoleSet,
    /// Points produced by the sampler before clamping
    pub candidates: usize,
    /// Points the clamp could not move inside the boundary
    pub dropped: usize,
}

pub type BranchOutcome = Result<PlacedBranch, PlacementError>;

/// Outcome of a placement run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementResult {
    pub drill: BranchOutcome,
    /// `None` when no cable path was supplied
    pub cable: Option<BranchOutcome>,
}

impl PlacementResult {
    /// Accepted drill centres, empty if the branch failed.
    pub fn drill_holes(&self) -> &[Point] {
        match &self.drill {
            Ok(branch) => &branch.holes.centers,
            Err(_) => &[],
        }
    }

    /// Accepted cable centres, empty if the branch failed or was not requested.
    pub fn cable_holes(&self) -> &[Point] {
        match &self.cable {
            Some(Ok(branch)) => &branch.holes.centers,
            _ => &[],
        }
    }

    pub fn drill_set(&self) -> Option<&HoleSet> {
        self.drill.as_ref().ok().map(|b| &b.holes)
    }

    pub fn cable_set(&self) -> Option<&HoleSet> {
        match &self.cable {
            Some(Ok(branch)) => Some(&branch.holes),
            _ => None,
        }
    }

    /// Errors of failed branches, drill first.
    pub fn errors(&self) -> Vec<&PlacementError> {
        let mut errors = Vec::new();
        if let Err(e) = &self.drill {
            errors.push(e);
        }
        if let Some(Err(e)) = &self.cable {
            errors.push(e);
        }
        errors
    }

    /// One-line report, e.g. `drill: 13 holes, cable: not requested`.
    pub fn summary(&self) -> String {
        let drill = describe_branch(Some(&self.drill));
        let cable = describe_branch(self.cable.as_ref());
        format!("drill: {drill}, cable: {cable}")
    }
}

fn describe_branch(outcome: Option<&BranchOutcome>) -> String {
    match outcome {
        None => "not requested".to_string(),
        Some(Ok(branch)) if branch.dropped > 0 => format!(
            "{} holes ({} dropped outside boundary)",
            branch.holes.len(),
            branch.dropped
        ),
        Some(Ok(branch)) => format!("{} holes", branch.holes.len()),
        Some(Err(PlacementError::InfeasibleOffset { .. })) => "infeasible".to_string(),
        Some(Err(e)) => format!("failed ({e})"),
    }
}

/// Places drill and cable holes for `request`.
///
/// Input and parameter problems are returned as `Err` before any geometry
/// runs. Geometric failures are reported per branch inside the result.
pub fn place_holes(request: &PlacementRequest) -> Result<PlacementResult, PlacementError> {
    let params = &request.params;
    params.validate()?;

    request
        .panel
        .validate()
        .map_err(|e| PlacementError::EmptyInput(format!("panel outline: {e}")))?;
    if let Some(path) = &request.cable_path {
        path.validate()
            .map_err(|e| PlacementError::EmptyInput(format!("cable path: {e}")))?;
    }

    let panel = request.panel.clone().ensure_ccw();
    debug!(
        "Placing holes on panel with {} points, area {:.3} mm²",
        panel.len(),
        panel.area()
    );

    let drill = place_drill(&panel, params);
    let cable = request
        .cable_path
        .as_ref()
        .map(|path| place_cable(&panel, path, params));

    let result = PlacementResult { drill, cable };
    info!("Placement complete: {}", result.summary());
    Ok(result)
}

fn inset_boundary(
    panel: &Polygon,
    category: HoleCategory,
    clearance: f64,
    settings: &OffsetSettings,
) -> Result<Polygon, PlacementError> {
    let boundary = offset_polygon(panel, -clearance, settings);
    if boundary.is_degenerate() {
        warn!(
            "Clearance boundary for {} holes collapsed (inset {:.3} mm)",
            category, clearance
        );
        return Err(PlacementError::InfeasibleOffset {
            category,
            clearance,
        });
    }
    debug!(
        "{} clearance boundary: {} points, perimeter {:.3} mm",
        category,
        boundary.len(),
        boundary.perimeter()
    );
    Ok(boundary)
}

fn finish_branch(
    category: HoleCategory,
    diameter: f64,
    boundary: Polygon,
    candidates: Vec<Point>,
    clamp_steps: usize,
) -> PlacedBranch {
    let (clamped, dropped) = clamp_all(&candidates, &boundary, clamp_steps);
    let accepted = dedupe_by_min_gap(&clamped, diameter);
    debug!(
        "{}: {} candidates, {} dropped by clamp, {} removed by spacing",
        category,
        candidates.len(),
        dropped,
        clamped.len() - accepted.len()
    );
    info!("Placed {} {} holes (Ø{:.3} mm)", accepted.len(), category, diameter);

    PlacedBranch {
        boundary,
        holes: HoleSet::new(category, diameter, accepted),
        candidates: candidates.len(),
        dropped,
    }
}

fn place_drill(panel: &Polygon, params: &PlacementParameters) -> BranchOutcome {
    let tuning = &params.tuning;
    let clearance = params.drill_clearance();
    let boundary = inset_boundary(panel, HoleCategory::Drill, clearance, &tuning.offset)?;

    let border = BorderSampling {
        spacing: params.drill_spacing,
        corner_offset: tuning.corner_offset,
        min_samples: tuning.min_border_samples,
    };
    let candidates = sample_for_mode(params.placement_mode, panel, &boundary, clearance, &border);

    Ok(finish_branch(
        HoleCategory::Drill,
        params.drill_diameter,
        boundary,
        candidates,
        tuning.clamp_steps,
    ))
}

fn place_cable(panel: &Polygon, path: &Path, params: &PlacementParameters) -> BranchOutcome {
    let tuning = &params.tuning;
    let clearance = params.cable_clearance();
    let boundary = inset_boundary(panel, HoleCategory::Cable, clearance, &tuning.offset)?;
    let candidates = sample_path(path, params.cable_spacing);

    Ok(finish_branch(
        HoleCategory::Cable,
        params.cable_diameter,
        boundary,
        candidates,
        tuning.clamp_steps,
    ))
}

/// Holds placement parameters for repeated runs against different panels.
#[derive(Debug, Clone)]
pub struct PlacementOrchestrator {
    params: PlacementParameters,
}

impl PlacementOrchestrator {
    pub fn new(params: PlacementParameters) -> Result<Self, PlacementError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &PlacementParameters {
        &self.params
    }

    pub fn place(
        &self,
        panel: &Polygon,
        cable_path: Option<&Path>,
    ) -> Result<PlacementResult, PlacementError> {
        let request = PlacementRequest::new(panel.clone(), cable_path.cloned(), self.params.clone());
        place_holes(&request)
    }
}
