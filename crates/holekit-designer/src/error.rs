//! Error types for drawing import, export and preview rendering.

use thiserror::Error;

/// Errors raised while reading or writing drawings.
#[derive(Error, Debug)]
pub enum DrawingError {
    /// The DXF reader or writer failed.
    #[error("DXF error: {0}")]
    Dxf(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The drawing contains no closed polyline usable as a panel outline.
    #[error("No closed polyline outline found; draw the panel as a closed LWPOLYLINE")]
    NoClosedOutline,

    /// The file extension is not one of the supported drawing formats.
    #[error("Unsupported drawing format: {0} (supported: dxf, svg)")]
    UnsupportedFormat(String),

    #[error("SVG parse error: {0}")]
    SvgParse(String),

    /// Preview rendering or image encoding failed.
    #[error("Render error: {0}")]
    Render(String),
}

/// Result type for drawing operations.
pub type DrawingResult<T> = std::result::Result<T, DrawingError>;
