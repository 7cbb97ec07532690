//! Live scene graph: instantiated nodes with single-parent ownership.

use gcurve_core::{CurveError, Result};
use gcurve_geometry::CurveShape;
use gcurve_math::{NodeTransform, Point3};
use serde_json::{Map, Value};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct NodeKey;
}

/// Free-form per-node data (glTF `extras` plus curve fields).
pub type UserData = Map<String, Value>;

/// User-data key holding the serialized assembled curve.
pub const CURVE_KEY: &str = "curve";
/// User-data key holding the index of the node definition a curve came from.
pub const SOURCE_NODE_KEY: &str = "sourceNode";

/// Sampled polyline ready for a line renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct LineGeometry {
    pub points: Vec<Point3>,
    pub color: [f32; 3],
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Group,
    Mesh { mesh: usize },
    Line(LineGeometry),
}

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub kind: NodeKind,
    pub transform: NodeTransform,
    pub user_data: UserData,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            transform: NodeTransform::identity(),
            user_data: UserData::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Group)
    }

    pub fn with_transform(mut self, transform: NodeTransform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_user_data(mut self, user_data: UserData) -> Self {
        self.user_data = user_data;
        self
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    pub fn is_line(&self) -> bool {
        matches!(self.kind, NodeKind::Line(_))
    }

    pub fn line(&self) -> Option<&LineGeometry> {
        match &self.kind {
            NodeKind::Line(line) => Some(line),
            _ => None,
        }
    }

    /// Index of the node definition this curve was built from, if any.
    pub fn source_node(&self) -> Option<usize> {
        self.user_data
            .get(SOURCE_NODE_KEY)
            .and_then(Value::as_u64)
            .map(|i| i as usize)
    }

    /// The assembled curve stored in user data, if any.
    pub fn curve(&self) -> Option<CurveShape> {
        let raw = self.user_data.get(CURVE_KEY)?;
        serde_json::from_value(raw.clone()).ok()
    }
}

/// Arena of scene nodes rooted at a single scene group.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: SlotMap<NodeKey, SceneNode>,
    root: NodeKey,
}

impl SceneGraph {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SceneNode::group("Scene"));
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// Insert a node without a parent.
    pub fn insert(&mut self, mut node: SceneNode) -> NodeKey {
        node.parent = None;
        node.children.clear();
        self.nodes.insert(node)
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn get(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut SceneNode> {
        self.nodes.get_mut(key)
    }

    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes.get(key).and_then(|n| n.parent)
    }

    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.nodes
            .get(key)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `ancestor` is `key` or lies on the parent chain of `key`.
    pub fn is_ancestor(&self, ancestor: NodeKey, key: NodeKey) -> bool {
        let mut current = Some(key);
        while let Some(k) = current {
            if k == ancestor {
                return true;
            }
            current = self.parent(k);
        }
        false
    }

    /// Append `child` to `parent`'s children, detaching it from any previous parent.
    pub fn add_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<()> {
        if !self.contains(parent) {
            return Err(CurveError::NotFound("parent node".into()));
        }
        if !self.contains(child) {
            return Err(CurveError::NotFound("child node".into()));
        }
        if self.is_ancestor(child, parent) {
            return Err(CurveError::InvalidOperation(
                "cannot attach a node beneath itself".into(),
            ));
        }

        self.detach(child);
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        Ok(())
    }

    /// Remove `key` from its parent's children. The node stays in the arena.
    pub fn detach(&mut self, key: NodeKey) {
        let Some(parent) = self.parent(key) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.retain(|&c| c != key);
        }
        if let Some(n) = self.nodes.get_mut(key) {
            n.parent = None;
        }
    }

    pub fn find_by_name(&self, name: &str) -> Option<NodeKey> {
        self.descendants(self.root)
            .into_iter()
            .find(|&k| self.nodes[k].name == name)
    }

    /// Depth-first list of every node below `key` (excluding `key`).
    pub fn descendants(&self, key: NodeKey) -> Vec<NodeKey> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeKey> = self.children(key).iter().rev().copied().collect();
        while let Some(k) = stack.pop() {
            out.push(k);
            stack.extend(self.children(k).iter().rev().copied());
        }
        out
    }

    /// All line nodes reachable from the root.
    pub fn lines(&self) -> Vec<NodeKey> {
        self.descendants(self.root)
            .into_iter()
            .filter(|&k| self.nodes[k].is_line())
            .collect()
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
