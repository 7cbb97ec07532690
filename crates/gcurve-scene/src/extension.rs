//! The `UTSUBO_curve_extension` node payload.
//!
//! Plain value types mirroring the JSON written by the authoring-side
//! exporter, plus free functions to read them from node definitions and to
//! write them back into a glTF JSON document.

use gcurve_core::{CurveError, Result, Validate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::document::NodeDefinition;

/// Extension identifier used on nodes and in `extensionsUsed`.
pub const EXTENSION_NAME: &str = "UTSUBO_curve_extension";

/// Spline kind tag. Unrecognized tags decode as [`SplineType::Poly`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SplineType {
    Bezier,
    Nurbs,
    #[default]
    Poly,
}

impl SplineType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "BEZIER" => SplineType::Bezier,
            "NURBS" => SplineType::Nurbs,
            _ => SplineType::Poly,
        }
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            SplineType::Bezier => "BEZIER",
            SplineType::Nurbs => "NURBS",
            SplineType::Poly => "POLY",
        }
    }
}

impl<'de> Deserialize<'de> for SplineType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        // non-string tags (numbers, null) fall back like unknown strings
        let tag = Value::deserialize(deserializer)?;
        Ok(tag.as_str().map_or(SplineType::Poly, SplineType::from_tag))
    }
}

/// One authored control point, in authoring (Z-up) coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub co: [f64; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle_left: Option<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle_right: Option<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<f64>,
}

impl ControlPoint {
    pub fn new(co: [f64; 3]) -> Self {
        Self {
            co,
            handle_left: None,
            handle_right: None,
            w: None,
        }
    }

    pub fn with_handles(mut self, left: [f64; 3], right: [f64; 3]) -> Self {
        self.handle_left = Some(left);
        self.handle_right = Some(right);
        self
    }

    pub fn with_weight(mut self, w: f64) -> Self {
        self.w = Some(w);
        self
    }

    /// Rational weight; absent or zero means 1.
    pub fn weight(&self) -> f64 {
        match self.w {
            Some(w) if w != 0.0 => w,
            _ => 1.0,
        }
    }
}

/// A single spline inside the curve payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplineDefinition {
    #[serde(rename = "type", default)]
    pub spline_type: SplineType,
    #[serde(default)]
    pub points: Vec<ControlPoint>,
    #[serde(default)]
    pub use_cyclic_u: bool,
    #[serde(default)]
    pub order_u: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knots: Option<Vec<f64>>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub resolution_u: f64,
}

impl SplineDefinition {
    pub fn new(spline_type: SplineType, points: Vec<ControlPoint>) -> Self {
        Self {
            spline_type,
            points,
            use_cyclic_u: false,
            order_u: None,
            knots: None,
            resolution_u: 0.0,
        }
    }

    pub fn cyclic(mut self, cyclic: bool) -> Self {
        self.use_cyclic_u = cyclic;
        self
    }

    pub fn with_order(mut self, order: usize) -> Self {
        self.order_u = Some(order);
        self
    }

    pub fn with_knots(mut self, knots: Vec<f64>) -> Self {
        self.knots = Some(knots);
        self
    }

    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution_u = resolution;
        self
    }
}

impl Validate for SplineDefinition {
    fn validate(&self) -> Result<()> {
        let count = self.points.len();
        match self.spline_type {
            SplineType::Bezier | SplineType::Poly => {
                if count < 2 {
                    return Err(CurveError::InvalidSpline(format!(
                        "{} spline needs at least 2 points, got {}",
                        self.spline_type.as_tag(),
                        count
                    )));
                }
            }
            SplineType::Nurbs => {
                let order = match self.order_u {
                    Some(order) if order >= 1 => order,
                    other => {
                        return Err(CurveError::InvalidSpline(format!(
                            "NURBS spline has invalid order_u {:?}",
                            other
                        )))
                    }
                };
                if count < order {
                    return Err(CurveError::InvalidSpline(format!(
                        "NURBS spline of order {} needs at least {} points, got {}",
                        order, order, count
                    )));
                }
                if let Some(knots) = &self.knots {
                    if knots.len() != count + order {
                        return Err(CurveError::InvalidSpline(format!(
                            "expected {} knots for {} points of order {}, got {}",
                            count + order,
                            count,
                            order,
                            knots.len()
                        )));
                    }
                    if knots.iter().any(|k| !k.is_finite())
                        || knots.windows(2).any(|w| w[0] > w[1])
                    {
                        return Err(CurveError::InvalidSpline(
                            "knot vector must be finite and non-decreasing".into(),
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Numbers pass through; `null` and non-numeric values read as 0.
fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<f64, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_f64().unwrap_or(0.0))
}

fn default_dimensions() -> String {
    "3D".to_string()
}

/// The full payload attached to one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveMetadata {
    #[serde(default)]
    pub splines: Vec<SplineDefinition>,
    #[serde(default = "default_dimensions")]
    pub dimensions: String,
}

impl CurveMetadata {
    pub fn new(splines: Vec<SplineDefinition>) -> Self {
        Self {
            splines,
            dimensions: default_dimensions(),
        }
    }

    /// Resolution hint of the first spline, which drives sampling of the whole curve.
    pub fn first_resolution(&self) -> f64 {
        self.splines.first().map_or(0.0, |s| s.resolution_u)
    }
}

impl Default for CurveMetadata {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Decode the payload stored under `extension_name` on a node.
///
/// `None` when the node does not carry the extension (or carries `null`).
pub fn read_curve_metadata(
    node: &NodeDefinition,
    extension_name: &str,
) -> Option<Result<CurveMetadata>> {
    node.extensions
        .get(extension_name)
        .filter(|raw| !raw.is_null())
        .map(|raw| CurveMetadata::deserialize(raw).map_err(CurveError::from))
}

/// Store `metadata` on node `node_index` of a raw glTF JSON document and
/// register the extension in `extensionsUsed`.
pub fn write_curve_metadata(
    document: &mut Value,
    node_index: usize,
    metadata: &CurveMetadata,
    extension_name: &str,
) -> Result<()> {
    let payload = serde_json::to_value(metadata)?;

    let node = document
        .get_mut("nodes")
        .and_then(Value::as_array_mut)
        .and_then(|nodes| nodes.get_mut(node_index))
        .and_then(Value::as_object_mut)
        .ok_or_else(|| CurveError::NotFound(format!("node {}", node_index)))?;

    let extensions = node
        .entry("extensions")
        .or_insert_with(|| Value::Object(Default::default()));
    match extensions.as_object_mut() {
        Some(map) => {
            map.insert(extension_name.to_string(), payload);
        }
        None => {
            return Err(CurveError::InvalidOperation(format!(
                "node {} has a non-object `extensions` field",
                node_index
            )))
        }
    }

    register_extension_used(document, extension_name)
}

/// Add `extension_name` to the document's `extensionsUsed` list once.
pub fn register_extension_used(document: &mut Value, extension_name: &str) -> Result<()> {
    let root = document
        .as_object_mut()
        .ok_or_else(|| CurveError::InvalidOperation("document root is not an object".into()))?;

    let used = root
        .entry("extensionsUsed")
        .or_insert_with(|| Value::Array(Vec::new()));
    let list = used.as_array_mut().ok_or_else(|| {
        CurveError::InvalidOperation("`extensionsUsed` is not an array".into())
    })?;

    if !list.iter().any(|v| v.as_str() == Some(extension_name)) {
        list.push(Value::String(extension_name.to_string()));
    }
    Ok(())
}
