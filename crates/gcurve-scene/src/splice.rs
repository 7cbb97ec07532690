//! Attaching built curve objects to the live scene graph.
//!
//! Policy: the curve becomes an extra child of the original node's parent.
//! The original node and its descendants are not touched.

use crate::assemble::CurveObject;
use crate::graph::{NodeKey, SceneGraph};
use crate::loader::LoadResult;

/// What [`splice`] did with a curve object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpliceOutcome {
    /// Attached as a sibling of the original node.
    Attached { key: NodeKey, parent: NodeKey },
    /// The original node was missing or unparented; attached under the scene root.
    AttachedToRoot { key: NodeKey },
    /// A matching line already exists beside the original node. Nothing changed.
    Duplicate,
}

impl SpliceOutcome {
    pub fn key(&self) -> Option<NodeKey> {
        match *self {
            SpliceOutcome::Attached { key, .. } | SpliceOutcome::AttachedToRoot { key } => {
                Some(key)
            }
            SpliceOutcome::Duplicate => None,
        }
    }
}

/// Integrate `curve` into `result.scene` next to `live_node`.
///
/// Never fails: a missing node or parent degrades to attaching under the
/// scene root, and re-running with the same inputs is a no-op.
pub fn splice(
    result: &mut LoadResult,
    curve: CurveObject,
    live_node: Option<NodeKey>,
    node_index: usize,
) -> SpliceOutcome {
    let scene = &mut result.scene;
    let original = live_node.filter(|&k| scene.contains(k));
    let parent = original.and_then(|k| scene.parent(k));

    let (Some(original), Some(parent)) = (original, parent) else {
        log::warn!(
            "Original node {} or its parent not found. Adding curve '{}' to scene root.",
            node_index,
            curve.name
        );
        let user_data = curve.user_data();
        let key = attach(scene, scene.root(), curve.into_scene_node(user_data));
        result.associations.insert(key, node_index);
        return SpliceOutcome::AttachedToRoot { key };
    };

    if has_duplicate(scene, parent, original, &curve.name, node_index) {
        log::debug!("Curve for node {} already present, skipping", node_index);
        return SpliceOutcome::Duplicate;
    }

    let (transform, mut user_data) = match scene.get(original) {
        Some(node) => (node.transform, node.user_data.clone()),
        None => (curve.transform, Default::default()),
    };
    // curve fields win on key collision
    user_data.extend(curve.user_data());

    let mut node = curve.into_scene_node(user_data);
    node.transform = transform;

    let key = attach(scene, parent, node);
    result.associations.insert(key, node_index);
    SpliceOutcome::Attached { key, parent }
}

fn attach(scene: &mut SceneGraph, parent: NodeKey, node: crate::graph::SceneNode) -> NodeKey {
    let key = scene.insert(node);
    if let Err(e) = scene.add_child(parent, key) {
        log::warn!("Could not attach curve node: {}", e);
    }
    key
}

/// A line child of `parent` named like the original node or the new curve,
/// or built from the same node definition.
fn has_duplicate(
    scene: &SceneGraph,
    parent: NodeKey,
    original: NodeKey,
    curve_name: &str,
    node_index: usize,
) -> bool {
    let original_name = scene.get(original).map(|n| n.name.as_str());
    scene
        .children(parent)
        .iter()
        .filter_map(|&k| scene.get(k))
        .filter(|n| n.is_line())
        .any(|n| {
            Some(n.name.as_str()) == original_name
                || n.name == curve_name
                || n.source_node() == Some(node_index)
        })
}
