//! # holekit
//!
//! Places drill and cable holes on flat panel outlines and exports them as
//! DXF for fabrication.
//!
//! ## Architecture
//!
//! holekit is organized as a workspace with multiple crates:
//!
//! 1. **holekit-core** - Geometry primitives, hole sets, placement modes
//! 2. **holekit-camtools** - Polygon offsetting, sampling, clamping and the placement orchestrator
//! 3. **holekit-designer** - DXF/SVG import, DXF export, SVG/PNG previews
//! 4. **holekit-settings** - Persisted configuration (TOML or JSON)
//! 5. **holekit** - Command-line binary that ties the crates together
//!
//! ## Pipeline
//!
//! A run imports the drawing, takes the largest closed loop as the panel and
//! the first polyline on the cable layer as the cable path, places both hole
//! categories independently, then writes the DXF and any requested previews.

pub mod pipeline;

pub use holekit_camtools as camtools;
pub use holekit_designer as designer;
pub use holekit_settings as settings;

pub use holekit_camtools::{PlacementOrchestrator, PlacementParameters, PlacementResult};
pub use holekit_core::{HoleCategory, HoleSet, PlacementMode, Point, Polygon};
pub use holekit_settings::Config;
pub use pipeline::{run_placement, PlaceJob, PlaceReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging to stderr
///
/// `RUST_LOG` is honoured; `verbose` raises the floor from INFO to DEBUG.
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_level(true)
        .with_line_number(verbose);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
