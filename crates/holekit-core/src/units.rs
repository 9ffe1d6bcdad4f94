//! Unit conversion utilities
//!
//! Drawings arrive in whatever unit their author used; the placement engine
//! works exclusively in millimetres. Conversion happens once, at import.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Millimetres per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Length unit of a source drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawingUnit {
    /// No unit declared; treated as millimetres
    Unitless,
    Millimeters,
    Centimeters,
    Meters,
    Inches,
    Feet,
}

impl Default for DrawingUnit {
    fn default() -> Self {
        Self::Millimeters
    }
}

impl DrawingUnit {
    /// Factor that converts a length in this unit to millimetres.
    pub fn to_mm_factor(&self) -> f64 {
        match self {
            Self::Unitless | Self::Millimeters => 1.0,
            Self::Centimeters => 10.0,
            Self::Meters => 1000.0,
            Self::Inches => MM_PER_INCH,
            Self::Feet => MM_PER_INCH * 12.0,
        }
    }

    /// Short label ("mm", "in", ...)
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unitless => "",
            Self::Millimeters => "mm",
            Self::Centimeters => "cm",
            Self::Meters => "m",
            Self::Inches => "in",
            Self::Feet => "ft",
        }
    }
}

impl fmt::Display for DrawingUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unitless => write!(f, "unitless"),
            other => write!(f, "{}", other.label()),
        }
    }
}

impl FromStr for DrawingUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "unitless" | "none" => Ok(Self::Unitless),
            "mm" | "millimeter" | "millimeters" | "millimetre" | "millimetres" => {
                Ok(Self::Millimeters)
            }
            "cm" | "centimeter" | "centimeters" => Ok(Self::Centimeters),
            "m" | "meter" | "meters" | "metre" | "metres" => Ok(Self::Meters),
            "in" | "inch" | "inches" => Ok(Self::Inches),
            "ft" | "foot" | "feet" => Ok(Self::Feet),
            _ => Err(format!("Unknown drawing unit: {}", s)),
        }
    }
}
