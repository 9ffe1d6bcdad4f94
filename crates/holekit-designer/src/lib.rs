//! # holekit Designer
//!
//! Drawing collaborators around the placement engine: reading panel
//! outlines from DXF/SVG, writing results back to DXF, and rendering
//! previews.
//!
//! ## Components
//!
//! - **Import**: Panel outline and cable path discovery in DXF, `<rect>` fallback for SVG
//! - **Export**: DXF with `SOURCE`, `DRILL_*` and `CABLE_*` layers
//! - **Preview**: SVG document or tiny-skia raster image
//!
//! ## Usage
//!
//! ```rust,ignore
//! use holekit_designer::{import_drawing, ImportOptions};
//!
//! let drawing = import_drawing("panel.dxf", &ImportOptions::default())?;
//! let panel = drawing.panel();
//! let cable = drawing.cable_path();
//! ```

pub mod error;
pub mod export;
pub mod import;
pub mod preview;
pub mod renderer;
pub mod svg_renderer;

pub use error::{DrawingError, DrawingResult};
pub use export::DxfExporter;
pub use import::{
    import_drawing, DxfImporter, FileFormat, ImportOptions, ImportedDrawing, SvgRectImporter,
    TaggedLoop, TaggedPolyline, DEFAULT_CABLE_LAYER,
};
pub use preview::{write_preview, PreviewStyle};
pub use renderer::{render_png, save_png};
pub use svg_renderer::render_svg;
