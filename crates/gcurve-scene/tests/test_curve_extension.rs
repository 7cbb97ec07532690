// Integration tests for the curve extension load pipeline

use std::io::Write;

use approx::assert_relative_eq;
use gcurve_geometry::{Curve, CurveShape};
use gcurve_math::DVec3;
use gcurve_scene::*;
use serde_json::{json, Value};

const EPSILON: f64 = 1e-9;

fn load(value: Value) -> DocumentLoader {
    DocumentLoader::new(GltfDocument::from_value(&value).unwrap())
}

fn poly_spline(points: &[[f64; 3]], resolution: f64) -> Value {
    json!({
        "type": "POLY",
        "points": points.iter().map(|co| json!({"co": co})).collect::<Vec<_>>(),
        "use_cyclic_u": false,
        "order_u": null,
        "resolution_u": resolution
    })
}

fn vec3_approx_eq(a: DVec3, b: DVec3) -> bool {
    (a - b).length() < EPSILON
}

#[test]
fn integration_poly_becomes_sibling_line() {
    let spline = poly_spline(
        &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [2.0, 1.0, 1.0]],
        10.0,
    );
    let mut loader = load(json!({
        "scene": 0,
        "scenes": [{"nodes": [0]}],
        "nodes": [
            {"name": "Collection", "children": [1]},
            {
                "name": "Path",
                "translation": [1.0, 2.0, 3.0],
                "rotation": [0.0, 0.7071067811865476, 0.0, 0.7071067811865476],
                "scale": [1.0, 2.0, 1.0],
                "extras": {"layer": "curves"},
                "extensions": {"UTSUBO_curve_extension": {"splines": [spline], "dimensions": "3D"}}
            }
        ]
    }));

    let outcomes = loader.run(&CurveExtension::new());
    assert_eq!(outcomes.len(), 1);
    let SpliceOutcome::Attached { key, parent } = outcomes[0] else {
        panic!("expected sibling attach, got {:?}", outcomes[0]);
    };

    let scene = &loader.result().scene;
    let collection = scene.find_by_name("Collection").unwrap();
    let original = scene.children(collection)[0];
    assert_eq!(parent, collection);
    assert_eq!(scene.children(collection), &[original, key]);

    let line = scene.get(key).unwrap();
    assert_eq!(line.name, "Path");
    let geometry = line.line().unwrap();
    assert_eq!(geometry.points.len(), 100);
    assert_eq!(geometry.color, [1.0, 1.0, 1.0]);
    // authoring (x, y, z) -> scene (x, z, -y)
    assert!(vec3_approx_eq(geometry.points[0], DVec3::ZERO));
    assert!(vec3_approx_eq(geometry.points[99], DVec3::new(2.0, 1.0, -1.0)));

    let t = line.transform;
    assert_relative_eq!(t.translation.x, 1.0);
    assert_relative_eq!(t.translation.y, 2.0);
    assert_relative_eq!(t.translation.z, 3.0);
    assert_relative_eq!(t.rotation.y, 0.7071067811865476);
    assert_relative_eq!(t.rotation.w, 0.7071067811865476);
    assert_relative_eq!(t.scale.y, 2.0);
    assert_eq!(t, scene.get(original).unwrap().transform);

    assert_eq!(line.user_data["layer"], "curves");
    assert_eq!(line.source_node(), Some(1));
    assert!(matches!(line.curve(), Some(CurveShape::CatmullRom(_))));
}

#[test]
fn integration_running_twice_adds_one_child() {
    let mut loader = load(json!({
        "nodes": [
            {"name": "group", "children": [1]},
            {"name": "Path", "extensions": {"UTSUBO_curve_extension": {
                "splines": [poly_spline(&[[0.0, 0.0, 0.0], [0.0, 1.0, 0.0]], 1.0)]
            }}}
        ]
    }));
    let extension = CurveExtension::new();

    let first = loader.run(&extension);
    assert!(matches!(first[0], SpliceOutcome::Attached { .. }));
    let second = loader.run(&extension);
    assert_eq!(second, vec![SpliceOutcome::Duplicate]);

    let scene = &loader.result().scene;
    let group = scene.find_by_name("group").unwrap();
    assert_eq!(scene.children(group).len(), 2);
    assert_eq!(scene.lines().len(), 1);
}

#[test]
fn integration_tagged_group_defers_to_leaf() {
    let payload = json!({"splines": [poly_spline(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]], 1.0)]});
    let mut loader = load(json!({
        "nodes": [
            {"name": "root", "children": [1]},
            {"name": "group", "children": [2], "extensions": {"UTSUBO_curve_extension": payload}},
            {"name": "leaf", "extensions": {"UTSUBO_curve_extension": payload}}
        ]
    }));

    let outcomes = loader.run(&CurveExtension::new());
    assert_eq!(outcomes.len(), 1);

    let scene = &loader.result().scene;
    let lines = scene.lines();
    assert_eq!(lines.len(), 1);
    let line = scene.get(lines[0]).unwrap();
    assert_eq!(line.name, "leaf");
    assert_eq!(line.source_node(), Some(2));
    assert_eq!(scene.parent(lines[0]), scene.find_by_name("group"));
}

/// Loader whose host failed to create some nodes.
struct PartialLoader {
    nodes: Vec<NodeDefinition>,
    result: LoadResult,
}

impl LoaderContext for PartialLoader {
    fn node_definitions(&self) -> &[NodeDefinition] {
        &self.nodes
    }

    fn resolve_nodes(&mut self) -> Vec<Option<NodeKey>> {
        vec![None; self.nodes.len()]
    }

    fn result_mut(&mut self) -> &mut LoadResult {
        &mut self.result
    }
}

#[test]
fn integration_missing_live_node_falls_back_to_root() {
    let document = GltfDocument::from_value(&json!({
        "nodes": [{"translation": [4.0, 0.0, 0.0], "extensions": {"UTSUBO_curve_extension": {
            "splines": [{
                "type": "BEZIER",
                "points": [
                    {"co": [0, 0, 0], "handle_left": [-1, 0, 0], "handle_right": [1, 0, 0]},
                    {"co": [3, 0, 0], "handle_left": [2, 0, 0], "handle_right": [4, 0, 0]}
                ],
                "resolution_u": 4
            }]
        }}}]
    }))
    .unwrap();
    let mut ctx = PartialLoader {
        nodes: document.nodes,
        result: LoadResult::default(),
    };

    let outcomes = CurveExtension::new().after_root(&mut ctx);
    let SpliceOutcome::AttachedToRoot { key } = outcomes[0] else {
        panic!("expected root fallback, got {:?}", outcomes[0]);
    };

    let scene = &ctx.result.scene;
    assert_eq!(scene.parent(key), Some(scene.root()));
    let node = scene.get(key).unwrap();
    // unnamed node gets a per-load fallback name
    assert_eq!(node.name, "BEZIER_0");
    assert_eq!(node.line().unwrap().points.len(), 40);
    assert_relative_eq!(node.transform.translation.x, 4.0);
    assert_eq!(ctx.result.node_index(key), Some(0));
}

#[test]
fn integration_nurbs_line_hits_clamped_endpoints() {
    let mut loader = load(json!({
        "nodes": [{"name": "Nurbs", "extensions": {"UTSUBO_curve_extension": {
            "splines": [{
                "type": "NURBS",
                "points": [
                    {"co": [0, 0, 0], "w": 1},
                    {"co": [1, 2, 0], "w": 0.5},
                    {"co": [3, 2, 1], "w": 0},
                    {"co": [4, 0, 2]},
                    {"co": [6, 1, 2], "w": 2}
                ],
                "use_cyclic_u": false,
                "order_u": 4,
                "resolution_u": 12
            }]
        }}}]
    }));

    let outcomes = loader.run(&CurveExtension::new());
    let key = outcomes[0].key().unwrap();
    let node = loader.result().scene.get(key).unwrap();
    let points = &node.line().unwrap().points;

    assert_eq!(points.len(), 120);
    assert!(vec3_approx_eq(points[0], DVec3::ZERO));
    assert!(vec3_approx_eq(points[119], DVec3::new(6.0, 2.0, -1.0)));
    assert!(node.curve().unwrap().length() > 6.0);
}

#[test]
fn integration_unknown_type_decodes_as_poly() {
    let mut loader = load(json!({
        "nodes": [{"name": "odd", "extensions": {"UTSUBO_curve_extension": {
            "splines": [{"type": "SPIRAL", "points": [{"co": [0, 0, 0]}, {"co": [0, 0, 5]}]}]
        }}}]
    }));
    let outcomes = loader.run(&CurveExtension::new());
    let node = loader.result().scene.get(outcomes[0].key().unwrap()).unwrap();
    // no resolution hint: default sample count
    assert_eq!(node.line().unwrap().points.len(), 100);
    assert!(vec3_approx_eq(*node.line().unwrap().points.last().unwrap(), DVec3::new(0.0, 5.0, 0.0)));
}

#[test]
fn integration_written_metadata_loads_from_disk() {
    let metadata = CurveMetadata::new(vec![
        SplineDefinition::new(
            SplineType::Bezier,
            vec![
                ControlPoint::new([0.0, 0.0, 0.0]).with_handles([-1.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
                ControlPoint::new([2.0, 0.0, 0.0]),
            ],
        )
        .cyclic(true)
        .with_resolution(3.0),
        SplineDefinition::new(
            SplineType::Nurbs,
            (0..4).map(|i| ControlPoint::new([i as f64, 0.0, 1.0])).collect(),
        )
        .with_order(3),
    ]);

    let mut raw = json!({
        "asset": {"version": "2.0"},
        "nodes": [{"name": "Written"}]
    });
    write_curve_metadata(&mut raw, 0, &metadata, EXTENSION_NAME).unwrap();
    write_curve_metadata(&mut raw, 0, &metadata, EXTENSION_NAME).unwrap();
    assert_eq!(raw["extensionsUsed"], json!([EXTENSION_NAME]));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string_pretty(&raw).unwrap().as_bytes())
        .unwrap();

    let document = GltfDocument::load(file.path()).unwrap();
    assert!(document.uses_extension(EXTENSION_NAME));
    let read = read_curve_metadata(&document.nodes[0], EXTENSION_NAME)
        .unwrap()
        .unwrap();
    assert_eq!(read, metadata);

    let mut loader = DocumentLoader::new(document);
    let outcomes = loader.run(&CurveExtension::new());
    let node = loader.result().scene.get(outcomes[0].key().unwrap()).unwrap();
    // first spline's resolution drives the whole composite
    assert_eq!(node.line().unwrap().points.len(), 30);
    let Some(CurveShape::Path(path)) = node.curve() else {
        panic!("two splines should merge into a path");
    };
    assert_eq!(path.len(), 2);
}

#[test]
fn integration_options_file_changes_sampling() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{"default_sample_count": 8, "line_color": [1.0, 0.0, 0.0]}"#)
        .unwrap();
    let options = CurveOptions::load(file.path()).unwrap();
    assert_eq!(options.extension_name, EXTENSION_NAME);

    let mut loader = load(json!({
        "nodes": [{"name": "p", "extensions": {"UTSUBO_curve_extension": {
            "splines": [poly_spline(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]], 0.0)]
        }}}]
    }));
    let outcomes = loader.run(&CurveExtension::with_options(options));
    let node = loader.result().scene.get(outcomes[0].key().unwrap()).unwrap();
    let line = node.line().unwrap();
    assert_eq!(line.points.len(), 8);
    assert_eq!(line.color, [1.0, 0.0, 0.0]);
}

#[test]
fn integration_loose_payload_values_still_build_curves() {
    let two_points = json!([{"co": [0, 0, 0]}, {"co": [1, 0, 0]}]);
    for spline in [
        json!({"type": "POLY", "points": two_points, "resolution_u": null}),
        json!({"type": 3, "points": two_points, "resolution_u": 2}),
    ] {
        let mut loader = load(json!({
            "nodes": [{"name": "loose", "extensions": {"UTSUBO_curve_extension": {
                "splines": [spline]
            }}}]
        }));
        let outcomes = loader.run(&CurveExtension::new());
        assert_eq!(outcomes.len(), 1, "payload {}", spline);
        assert!(outcomes[0].key().is_some());
    }
}

#[test]
fn integration_null_slot_leaves_tagged_parent_owner() {
    let mut loader = load(json!({
        "nodes": [
            {"name": "body", "mesh": 0, "children": [1], "extensions": {"UTSUBO_curve_extension": {
                "splines": [poly_spline(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]], 1.0)]
            }}},
            {"name": "detail", "extensions": {"UTSUBO_curve_extension": null}}
        ]
    }));
    let outcomes = loader.run(&CurveExtension::new());
    assert_eq!(outcomes.len(), 1);
    let node = loader.result().scene.get(outcomes[0].key().unwrap()).unwrap();
    assert_eq!(node.source_node(), Some(0));
}
