//! The subset of the glTF JSON document read by the curve extension:
//! node table, scenes and `extensionsUsed`.

use std::path::Path;

use gcurve_core::Result;
use gcurve_math::NodeTransform;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A parsed glTF document. Fields the curve extension does not read are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GltfDocument {
    #[serde(default)]
    pub nodes: Vec<NodeDefinition>,
    #[serde(default)]
    pub scenes: Vec<SceneDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions_used: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub nodes: Vec<usize>,
}

/// A static node entry of the glTF `nodes` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix: Option<[f64; 16]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[f64; 4]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extensions: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
}

impl NodeDefinition {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Whether the node carries a non-null payload under `extension_name`.
    pub fn has_extension(&self, extension_name: &str) -> bool {
        self.extensions
            .get(extension_name)
            .is_some_and(|v| !v.is_null())
    }

    /// Local transform: `matrix` when present, otherwise the TRS fields.
    pub fn transform(&self) -> NodeTransform {
        match &self.matrix {
            Some(m) => NodeTransform::from_cols_array(m),
            None => NodeTransform::from_trs(self.translation, self.rotation, self.scale),
        }
    }

    /// `extras` as a user-data map. Non-object extras are kept under `"extras"`.
    pub fn user_data(&self) -> Map<String, Value> {
        match &self.extras {
            Some(Value::Object(map)) => map.clone(),
            Some(other) => {
                let mut map = Map::new();
                map.insert("extras".to_string(), other.clone());
                map
            }
            None => Map::new(),
        }
    }
}

impl GltfDocument {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        Ok(Self::deserialize(value)?)
    }

    /// Read a `.gltf` (JSON) file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Root node indices of the default scene.
    ///
    /// Falls back to the first scene, and when the document has no scenes at
    /// all, to every node that is nobody's child.
    pub fn root_nodes(&self) -> Vec<usize> {
        let scene = self
            .scene
            .and_then(|i| self.scenes.get(i))
            .or_else(|| self.scenes.first());
        if let Some(scene) = scene {
            return scene
                .nodes
                .iter()
                .copied()
                .filter(|&i| i < self.nodes.len())
                .collect();
        }

        let mut is_child = vec![false; self.nodes.len()];
        for node in &self.nodes {
            for &c in &node.children {
                if let Some(flag) = is_child.get_mut(c) {
                    *flag = true;
                }
            }
        }
        (0..self.nodes.len()).filter(|&i| !is_child[i]).collect()
    }

    pub fn uses_extension(&self, extension_name: &str) -> bool {
        self.extensions_used.iter().any(|e| e == extension_name)
    }
}
