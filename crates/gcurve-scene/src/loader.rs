//! Loader integration: the extension entry point and a document-backed loader.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::assemble::{assemble, AssemblyJob, CurveObject, LoadContext};
use crate::document::{GltfDocument, NodeDefinition};
use crate::extension::read_curve_metadata;
use crate::graph::{NodeKey, NodeKind, SceneGraph, SceneNode};
use crate::options::CurveOptions;
use crate::ownership::{parent_links, resolve_owners};
use crate::splice::{splice, SpliceOutcome};

/// The live output of a load: the scene and the object → node-definition table.
#[derive(Debug, Clone, Default)]
pub struct LoadResult {
    pub scene: SceneGraph,
    pub associations: HashMap<NodeKey, usize>,
}

impl LoadResult {
    /// Node definition index a live object was created from.
    pub fn node_index(&self, key: NodeKey) -> Option<usize> {
        self.associations.get(&key).copied()
    }
}

/// What the curve extension needs from the host loader.
pub trait LoaderContext {
    /// The static node table of the document being loaded.
    fn node_definitions(&self) -> &[NodeDefinition];

    /// Make sure every node is instantiated and return the live node per
    /// definition index. `None` marks a node that could not be created.
    fn resolve_nodes(&mut self) -> Vec<Option<NodeKey>>;

    fn result_mut(&mut self) -> &mut LoadResult;
}

/// Rebuilds authored curves and splices them into the loaded scene.
#[derive(Debug, Clone, Default)]
pub struct CurveExtension {
    options: CurveOptions,
}

impl CurveExtension {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CurveOptions) -> Self {
        Self { options }
    }

    /// Identifier this extension responds to.
    pub fn name(&self) -> &str {
        &self.options.extension_name
    }

    pub fn options(&self) -> &CurveOptions {
        &self.options
    }

    /// Run after the loader has produced the root scene.
    ///
    /// Waits for every node to be resolved, picks the owner nodes, builds
    /// their curves in parallel and splices them one at a time. Problems with
    /// individual nodes are logged and skipped.
    pub fn after_root<C: LoaderContext>(&self, ctx: &mut C) -> Vec<SpliceOutcome> {
        let live = ctx.resolve_nodes();
        let jobs = self.collect_jobs(ctx.node_definitions());
        if jobs.is_empty() {
            return Vec::new();
        }

        let objects: Vec<CurveObject> = jobs
            .par_iter()
            .filter_map(|job| assemble(job, &self.options))
            .collect();

        let result = ctx.result_mut();
        let outcomes: Vec<SpliceOutcome> = objects
            .into_iter()
            .map(|object| {
                let index = object.source_node;
                let node = live.get(index).copied().flatten();
                splice(result, object, node, index)
            })
            .collect();

        log::info!(
            "{}: {} owner node(s), {} curve(s) added",
            self.name(),
            jobs.len(),
            outcomes.iter().filter(|o| o.key().is_some()).count()
        );
        outcomes
    }

    fn collect_jobs(&self, nodes: &[NodeDefinition]) -> Vec<AssemblyJob> {
        if nodes.is_empty() {
            return Vec::new();
        }

        let mut naming = LoadContext::new();
        resolve_owners(nodes, self.name())
            .into_iter()
            .filter_map(|index| {
                let node = &nodes[index];
                let metadata = match read_curve_metadata(node, self.name())? {
                    Ok(metadata) => metadata,
                    Err(e) => {
                        log::warn!("Ignoring curve payload on node {}: {}", index, e);
                        return None;
                    }
                };
                Some(AssemblyJob {
                    node_index: index,
                    name: naming.object_name(node.name.as_deref(), &metadata),
                    metadata,
                    transform: node.transform(),
                })
            })
            .collect()
    }
}

/// Minimal loader that instantiates a [`GltfDocument`]'s node hierarchy.
#[derive(Debug)]
pub struct DocumentLoader {
    document: GltfDocument,
    result: LoadResult,
    live_nodes: Option<Vec<Option<NodeKey>>>,
}

impl DocumentLoader {
    pub fn new(document: GltfDocument) -> Self {
        Self {
            document,
            result: LoadResult::default(),
            live_nodes: None,
        }
    }

    pub fn document(&self) -> &GltfDocument {
        &self.document
    }

    pub fn result(&self) -> &LoadResult {
        &self.result
    }

    pub fn into_result(self) -> LoadResult {
        self.result
    }

    /// Instantiate the scene (if not done yet) and run `extension` on it.
    pub fn run(&mut self, extension: &CurveExtension) -> Vec<SpliceOutcome> {
        extension.after_root(self)
    }

    fn instantiate(&mut self) -> Vec<Option<NodeKey>> {
        let scene = &mut self.result.scene;
        let keys: Vec<NodeKey> = self
            .document
            .nodes
            .iter()
            .map(|def| {
                let kind = match def.mesh {
                    Some(mesh) => NodeKind::Mesh { mesh },
                    None => NodeKind::Group,
                };
                let node = SceneNode::new(def.name.clone().unwrap_or_default(), kind)
                    .with_transform(def.transform())
                    .with_user_data(def.user_data());
                scene.insert(node)
            })
            .collect();

        for (child, parent) in parent_links(&self.document.nodes).into_iter().enumerate() {
            let Some(parent) = parent else { continue };
            if let Err(e) = scene.add_child(keys[parent], keys[child]) {
                log::warn!("Node {} not attached under node {}: {}", child, parent, e);
            }
        }

        let root = scene.root();
        for index in self.document.root_nodes() {
            if scene.parent(keys[index]).is_none() {
                if let Err(e) = scene.add_child(root, keys[index]) {
                    log::warn!("Root node {} not attached: {}", index, e);
                }
            }
        }

        for (index, &key) in keys.iter().enumerate() {
            self.result.associations.insert(key, index);
        }
        log::debug!("Instantiated {} node(s)", keys.len());
        keys.into_iter().map(Some).collect()
    }
}

impl LoaderContext for DocumentLoader {
    fn node_definitions(&self) -> &[NodeDefinition] {
        &self.document.nodes
    }

    fn resolve_nodes(&mut self) -> Vec<Option<NodeKey>> {
        if let Some(live) = &self.live_nodes {
            return live.clone();
        }
        let live = self.instantiate();
        self.live_nodes = Some(live.clone());
        live
    }

    fn result_mut(&mut self) -> &mut LoadResult {
        &mut self.result
    }
}
