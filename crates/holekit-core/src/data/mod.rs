//! Data models shared by the placement engine and its collaborators
//!
//! This module provides:
//! - Placement strategy selection (border or centre lines)
//! - Hole categories (drill and cable)
//! - Accepted hole sets handed to export and preview

use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where drill holes are laid out on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementMode {
    /// Equally spaced around the clearance boundary
    Border,
    /// Along the panel's horizontal mid-line
    #[serde(alias = "centre_h", alias = "center_h")]
    CenterHorizontal,
    /// Along the panel's vertical mid-line
    #[serde(alias = "centre_v", alias = "center_v")]
    CenterVertical,
    /// Both mid-lines, horizontal samples first
    #[serde(alias = "centre_both")]
    CenterBoth,
}

impl Default for PlacementMode {
    fn default() -> Self {
        Self::Border
    }
}

impl PlacementMode {
    /// Returns the short name used on the command line and in config files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Border => "border",
            Self::CenterHorizontal => "centre_h",
            Self::CenterVertical => "centre_v",
            Self::CenterBoth => "centre_both",
        }
    }

    pub fn uses_horizontal_line(&self) -> bool {
        matches!(self, Self::CenterHorizontal | Self::CenterBoth)
    }

    pub fn uses_vertical_line(&self) -> bool {
        matches!(self, Self::CenterVertical | Self::CenterBoth)
    }
}

impl fmt::Display for PlacementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PlacementMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "border" | "perimeter" => Ok(Self::Border),
            "centre_h" | "center_h" | "center_horizontal" | "centre_horizontal" => {
                Ok(Self::CenterHorizontal)
            }
            "centre_v" | "center_v" | "center_vertical" | "centre_vertical" => {
                Ok(Self::CenterVertical)
            }
            "centre_both" | "center_both" => Ok(Self::CenterBoth),
            _ => Err(format!("Unknown placement mode: {}", s)),
        }
    }
}

/// Hole category; each has its own diameter, spacing and clearance boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoleCategory {
    /// Fastener holes placed by [`PlacementMode`]
    Drill,
    /// Holes following the cable reference path
    Cable,
}

impl fmt::Display for HoleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Drill => write!(f, "drill"),
            Self::Cable => write!(f, "cable"),
        }
    }
}

/// Accepted hole centres for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoleSet {
    pub category: HoleCategory,
    /// Hole diameter (mm)
    pub diameter: f64,
    /// Hole centres in acceptance order
    pub centers: Vec<Point>,
}

impl HoleSet {
    pub fn new(category: HoleCategory, diameter: f64, centers: Vec<Point>) -> Self {
        debug_assert!(
            diameter.is_finite() && diameter > 0.0,
            "diameter must be positive and finite, got {diameter}"
        );
        Self {
            category,
            diameter,
            centers,
        }
    }

    /// An empty set, used when a branch produced no holes.
    pub fn empty(category: HoleCategory, diameter: f64) -> Self {
        Self::new(category, diameter, Vec::new())
    }

    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.centers.iter()
    }
}

impl<'a> IntoIterator for &'a HoleSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.centers.iter()
    }
}
