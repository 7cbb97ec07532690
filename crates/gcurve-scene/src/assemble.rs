//! Combines the decoded splines of one node into a sampled line object.

use gcurve_geometry::tessellate::sample_points;
use gcurve_geometry::{CurvePath, CurveShape};
use gcurve_math::NodeTransform;
use serde_json::Value;

use crate::decode::decode_spline;
use crate::extension::{CurveMetadata, SplineType};
use crate::graph::{LineGeometry, NodeKind, SceneNode, UserData, CURVE_KEY, SOURCE_NODE_KEY};
use crate::options::CurveOptions;

/// Per-load naming state for curve objects whose node has no name.
#[derive(Debug, Default)]
pub struct LoadContext {
    next_fallback: usize,
}

impl LoadContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// `"<TYPE>_<n>"`, numbered from zero within this load.
    pub fn fallback_name(&mut self, spline_type: SplineType) -> String {
        let name = format!("{}_{}", spline_type.as_tag(), self.next_fallback);
        self.next_fallback += 1;
        name
    }

    /// The node's own name when it has one, otherwise a fallback name.
    pub fn object_name(&mut self, node_name: Option<&str>, metadata: &CurveMetadata) -> String {
        match node_name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                let tag = metadata
                    .splines
                    .first()
                    .map_or(SplineType::Poly, |s| s.spline_type);
                self.fallback_name(tag)
            }
        }
    }
}

/// Input for building one curve object.
#[derive(Debug, Clone)]
pub struct AssemblyJob {
    pub node_index: usize,
    pub name: String,
    pub metadata: CurveMetadata,
    /// Transform of the node definition; replaced by the live node's when spliced.
    pub transform: NodeTransform,
}

/// A renderable line built from curve metadata, not yet part of any graph.
#[derive(Debug, Clone)]
pub struct CurveObject {
    pub name: String,
    pub geometry: LineGeometry,
    pub curve: CurveShape,
    pub source_node: usize,
    pub transform: NodeTransform,
}

impl CurveObject {
    /// Curve-specific user data: the serialized curve and the source node index.
    pub fn user_data(&self) -> UserData {
        let mut data = UserData::new();
        match serde_json::to_value(&self.curve) {
            Ok(curve) => {
                data.insert(CURVE_KEY.to_string(), curve);
            }
            Err(e) => log::warn!("Could not store curve data for '{}': {}", self.name, e),
        }
        data.insert(SOURCE_NODE_KEY.to_string(), Value::from(self.source_node as u64));
        data
    }

    /// Convert into a scene node carrying `user_data`.
    pub fn into_scene_node(self, user_data: UserData) -> SceneNode {
        SceneNode::new(self.name, NodeKind::Line(self.geometry))
            .with_transform(self.transform)
            .with_user_data(user_data)
    }
}

/// Decode every spline of `job`, merge them into one curve and sample it.
///
/// Splines that fail to decode are skipped with a warning. Returns `None`
/// when nothing decodes. The sample count follows the first spline's
/// resolution hint even when several splines are merged.
pub fn assemble(job: &AssemblyJob, options: &CurveOptions) -> Option<CurveObject> {
    let mut curves: Vec<CurveShape> = job
        .metadata
        .splines
        .iter()
        .enumerate()
        .filter_map(|(i, spline)| match decode_spline(spline, options) {
            Ok(curve) => Some(curve),
            Err(e) => {
                log::warn!("Skipping spline {} of node {}: {}", i, job.node_index, e);
                None
            }
        })
        .collect();

    let curve = match curves.len() {
        0 => {
            log::warn!("Node {} has no usable splines", job.node_index);
            return None;
        }
        1 => curves.remove(0),
        _ => CurvePath::from_segments(curves).into(),
    };

    let count = options.sample_count(job.metadata.first_resolution());
    let points = sample_points(&curve, count);
    log::debug!(
        "Assembled curve '{}' from node {}: {} spline(s), {} points",
        job.name,
        job.node_index,
        job.metadata.splines.len(),
        points.len()
    );

    Some(CurveObject {
        name: job.name.clone(),
        geometry: LineGeometry {
            points,
            color: options.line_color,
        },
        curve,
        source_node: job.node_index,
        transform: job.transform,
    })
}
