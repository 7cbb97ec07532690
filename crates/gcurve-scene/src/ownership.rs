//! Decides which tagged nodes generate curves.
//!
//! Some export pipelines tag the same logical curve on a node and on the
//! containers above it. Only the most specific tagged node in a lineage owns
//! the curve, and a tagged pure container (children but no mesh) never does.

use std::collections::BTreeSet;

use crate::document::NodeDefinition;

/// Indices of nodes that should produce a curve object.
///
/// A node is an owner when it carries `extension_name`, no descendant carries
/// it, and it is either a leaf or references a mesh.
pub fn resolve_owners(nodes: &[NodeDefinition], extension_name: &str) -> BTreeSet<usize> {
    let tagged: Vec<bool> = nodes
        .iter()
        .map(|n| n.has_extension(extension_name))
        .collect();

    let parents = parent_links(nodes);
    let mut has_tagged_descendant = vec![false; nodes.len()];

    for index in (0..nodes.len()).filter(|&i| tagged[i]) {
        // bounded walk: a malformed table may contain parent cycles
        let mut current = parents[index];
        let mut steps = 0;
        while let Some(p) = current {
            if steps >= nodes.len() || p == index {
                break;
            }
            has_tagged_descendant[p] = true;
            current = parents[p];
            steps += 1;
        }
    }

    nodes
        .iter()
        .enumerate()
        .filter(|&(i, node)| {
            tagged[i]
                && !has_tagged_descendant[i]
                && (node.children.is_empty() || node.mesh.is_some())
        })
        .map(|(i, _)| i)
        .collect()
}

/// Parent index per node, from the `children` arrays. Out-of-range children
/// are ignored; a node listed twice keeps its first parent.
pub fn parent_links(nodes: &[NodeDefinition]) -> Vec<Option<usize>> {
    let mut parents = vec![None; nodes.len()];
    for (index, node) in nodes.iter().enumerate() {
        for &child in &node.children {
            if child == index {
                continue;
            }
            if let Some(slot) = parents.get_mut(child) {
                if slot.is_none() {
                    *slot = Some(index);
                }
            }
        }
    }
    parents
}
