//! Load a glTF file, rebuild its authored curves and print what was added.
//!
//! ```bash
//! gcurve-dump scene.gltf
//! gcurve-dump scene.gltf options.json
//! RUST_LOG=debug gcurve-dump scene.gltf
//! ```

use std::path::Path;
use std::process;

use gcurve_geometry::Curve;
use gcurve_scene::{CurveExtension, CurveOptions, DocumentLoader, GltfDocument, SpliceOutcome};

fn print_usage() {
    eprintln!(
        r#"gcurve-dump

USAGE:
    gcurve-dump <input.gltf> [options.json]

ARGS:
    <input.gltf>     glTF (JSON) document with curve extension data
    [options.json]   Optional reconstruction settings

OPTIONS:
    --help           Show this help message
"#
    );
}

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Error: Missing required argument <input.gltf>\n");
        print_usage();
        process::exit(1);
    }
    if args[1] == "--help" || args[1] == "-h" {
        print_usage();
        process::exit(0);
    }

    let options = match args.get(2) {
        Some(path) => match CurveOptions::load(Path::new(path)) {
            Ok(options) => options,
            Err(e) => {
                eprintln!("Error reading options {}: {}", path, e);
                process::exit(1);
            }
        },
        None => CurveOptions::default(),
    };

    let input = Path::new(&args[1]);
    let document = match GltfDocument::load(input) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("Error reading {}: {}", input.display(), e);
            process::exit(1);
        }
    };

    if !document.uses_extension(&options.extension_name) {
        eprintln!(
            "Note: {} does not list {} in extensionsUsed",
            input.display(),
            options.extension_name
        );
    }

    let mut loader = DocumentLoader::new(document);
    let outcomes = loader.run(&CurveExtension::with_options(options));
    let scene = &loader.result().scene;

    println!("{}: {} node(s)", input.display(), loader.document().nodes.len());
    let mut duplicates = 0;
    for outcome in &outcomes {
        let (key, placement) = match *outcome {
            SpliceOutcome::Attached { key, parent } => {
                let parent_name = scene.get(parent).map_or("", |n| n.name.as_str());
                (key, format!("beside children of '{}'", parent_name))
            }
            SpliceOutcome::AttachedToRoot { key } => (key, "at scene root".to_string()),
            SpliceOutcome::Duplicate => {
                duplicates += 1;
                continue;
            }
        };
        let Some(node) = scene.get(key) else { continue };
        let points = node.line().map_or(0, |l| l.points.len());
        let length = node.curve().map_or(0.0, |c| c.length());
        println!(
            "  {:<24} {:>6} points  length {:>10.4}  {}",
            node.name, points, length, placement
        );
    }
    println!(
        "{} curve(s) added, {} duplicate(s) skipped",
        outcomes.len() - duplicates,
        duplicates
    );
}
