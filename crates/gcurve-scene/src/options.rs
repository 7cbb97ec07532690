//! Tunables for curve reconstruction.

use std::path::Path;

use gcurve_core::Result;
use gcurve_geometry::CatmullRomKind;
use serde::{Deserialize, Serialize};

use crate::extension::EXTENSION_NAME;

/// Largest `resolution_u` honoured; higher hints are clamped to it.
pub const MAX_RESOLUTION_U: f64 = 1024.0;

/// Reconstruction settings. Every field has a default, so a partial JSON
/// object (or `{}`) is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveOptions {
    /// Node extension key carrying the curve payload.
    pub extension_name: String,
    /// Sample count used when the first spline has no resolution hint.
    pub default_sample_count: usize,
    /// Factor applied to `resolution_u` to get a sample count.
    pub resolution_multiplier: f64,
    /// Minimum number of divisions when evaluating a NURBS spline.
    pub nurbs_min_samples: usize,
    /// Linear RGB colour of produced lines.
    pub line_color: [f32; 3],
    /// Parameterization of the Catmull-Rom curves built for POLY and NURBS splines.
    pub catmull_rom: CatmullRomKind,
}

impl Default for CurveOptions {
    fn default() -> Self {
        Self {
            extension_name: EXTENSION_NAME.to_string(),
            default_sample_count: 100,
            resolution_multiplier: 10.0,
            nurbs_min_samples: 200,
            line_color: [1.0, 1.0, 1.0],
            catmull_rom: CatmullRomKind::default(),
        }
    }
}

impl CurveOptions {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Number of points a curve is sampled into, from the first spline's hint.
    pub fn sample_count(&self, resolution_u: f64) -> usize {
        let scaled = (clamp_resolution(resolution_u) * self.resolution_multiplier).round();
        if scaled.is_finite() && scaled >= 1.0 {
            scaled as usize
        } else {
            self.default_sample_count
        }
    }

    /// Number of divisions used to evaluate a NURBS spline before resampling.
    pub fn nurbs_divisions(&self, resolution_u: f64) -> usize {
        let scaled = (clamp_resolution(resolution_u) * self.resolution_multiplier).round();
        if scaled.is_finite() && scaled > self.nurbs_min_samples as f64 {
            scaled as usize
        } else {
            self.nurbs_min_samples
        }
    }
}

/// Non-finite hints read as 0 (no hint).
fn clamp_resolution(resolution_u: f64) -> f64 {
    if resolution_u.is_finite() {
        resolution_u.min(MAX_RESOLUTION_U)
    } else {
        0.0
    }
}
