//! glTF curve extension: reads spline metadata attached to nodes, rebuilds
//! the curves and adds them to the loaded scene as line objects.

pub mod assemble;
pub mod decode;
pub mod document;
pub mod extension;
pub mod graph;
pub mod loader;
pub mod options;
pub mod ownership;
pub mod splice;

pub use assemble::{assemble, AssemblyJob, CurveObject, LoadContext};
pub use decode::decode_spline;
pub use document::{GltfDocument, NodeDefinition, SceneDefinition};
pub use extension::{
    read_curve_metadata, register_extension_used, write_curve_metadata, ControlPoint,
    CurveMetadata, SplineDefinition, SplineType, EXTENSION_NAME,
};
pub use graph::{LineGeometry, NodeKey, NodeKind, SceneGraph, SceneNode, UserData};
pub use loader::{CurveExtension, DocumentLoader, LoadResult, LoaderContext};
pub use options::CurveOptions;
pub use ownership::resolve_owners;
pub use splice::{splice, SpliceOutcome};
