//! Integration tests for Boundary
//!
//! These tests drive the engine and the CLI against real projects on disk.

use boundary_core::{EnvironmentType, load_snapshot, snapshot_path};
use boundary_indexer::{Engine, EngineConfig};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

fn project(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (path, content) in files {
        write(temp_dir.path(), path, content);
    }
    temp_dir
}

fn write(root: &Path, path: &str, content: &str) -> PathBuf {
    let full = root.join(path);
    std::fs::create_dir_all(full.parent().unwrap()).unwrap();
    std::fs::write(&full, content).unwrap();
    full
}

fn built(temp_dir: &TempDir) -> Engine {
    let mut engine = Engine::new(EngineConfig::new(temp_dir.path())).unwrap();
    engine.build(&[]).unwrap();
    engine
}

fn type_of(engine: &Engine, path: &str) -> Option<EnvironmentType> {
    engine.graph().type_of(&engine.root().join(path))
}

fn boundary(root: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_boundary"))
        .arg("--root")
        .arg(root)
        .args(args)
        .env_remove("BOUNDARY_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_idempotent_full_builds() {
    let temp_dir = project(&[
        ("app/page.tsx", "import './widget';\nimport './shared';\n"),
        ("app/widget.tsx", "'use client';\nimport './shared';\n"),
        ("app/shared.ts", "export const x = 1;\n"),
    ]);
    let mut engine = built(&temp_dir);
    let first = engine.graph().snapshot();

    engine.build(&[]).unwrap();

    assert_eq!(engine.graph().snapshot(), first);
}

#[test]
fn test_directive_locality() {
    let temp_dir = project(&[
        ("only.tsx", "\"use client\""),
        ("second.tsx", "export {};\n\"use client\";\n"),
        ("commented.tsx", "// client component\n'use client';\n"),
    ]);
    let engine = built(&temp_dir);

    assert_eq!(type_of(&engine, "only.tsx"), Some(EnvironmentType::Client));
    assert_eq!(type_of(&engine, "second.tsx"), Some(EnvironmentType::Server));
    assert_eq!(type_of(&engine, "commented.tsx"), Some(EnvironmentType::Server));
}

#[test]
fn test_chain_propagation() {
    let temp_dir = project(&[
        ("a.tsx", "'use client';\nimport './b';\n"),
        ("b.tsx", "import './c';\n"),
        ("c.tsx", ""),
    ]);
    let engine = built(&temp_dir);

    for file in ["a.tsx", "b.tsx", "c.tsx"] {
        assert_eq!(type_of(&engine, file), Some(EnvironmentType::Client), "{}", file);
    }
}

#[test]
fn test_fan_in_universal_promotion() {
    let temp_dir = project(&[
        ("a.tsx", "'use client';\nimport './b';\n"),
        ("b.tsx", ""),
        ("c.tsx", "import './b';\n"),
    ]);
    let engine = built(&temp_dir);

    assert_eq!(type_of(&engine, "a.tsx"), Some(EnvironmentType::Client));
    assert_eq!(type_of(&engine, "b.tsx"), Some(EnvironmentType::Universal));
    assert_eq!(type_of(&engine, "c.tsx"), Some(EnvironmentType::Server));
}

#[test]
fn test_self_declaring_file_is_never_demoted() {
    let temp_dir = project(&[
        ("button.tsx", "'use client';\nexport const Button = () => null;\n"),
        ("page.tsx", "import { Button } from './button';\n"),
        ("layout.tsx", "import { Button } from './button';\n"),
    ]);
    let engine = built(&temp_dir);

    assert_eq!(type_of(&engine, "button.tsx"), Some(EnvironmentType::Client));
    assert_eq!(type_of(&engine, "page.tsx"), Some(EnvironmentType::Server));
}

#[test]
fn test_cycle_without_directive() {
    let temp_dir = project(&[("a.tsx", "import './b';\n"), ("b.tsx", "import './a';\n")]);
    let engine = built(&temp_dir);

    assert_eq!(type_of(&engine, "a.tsx"), Some(EnvironmentType::Server));
    assert_eq!(type_of(&engine, "b.tsx"), Some(EnvironmentType::Server));
}

#[test]
fn test_exclusion_is_absolute() {
    let temp_dir = project(&[
        ("button.tsx", "'use client';\n"),
        ("button.stories.tsx", "import './button';\n"),
        ("__mocks__/api.ts", ""),
    ]);
    let mut engine = built(&temp_dir);
    let story = engine.root().join("button.stories.tsx");
    let mock = engine.root().join("__mocks__/api.ts");
    assert!(!engine.graph().contains(&story));
    assert!(!engine.graph().contains(&mock));

    let late = write(engine.root(), "__mocks__/late.tsx", "'use client';\n");
    engine.build(&[story.clone(), mock.clone(), late.clone()]).unwrap();

    assert!(!engine.graph().contains(&story));
    assert!(!engine.graph().contains(&mock));
    assert!(!engine.graph().contains(&late));
    assert_eq!(engine.graph().len(), 1);
}

#[test]
fn test_deleted_file_is_removed() {
    let temp_dir = project(&[("a.tsx", "import './b';\n"), ("b.tsx", "")]);
    let mut engine = built(&temp_dir);
    let b = engine.root().join("b.tsx");

    std::fs::remove_file(&b).unwrap();
    engine.build(&[b.clone()]).unwrap();

    assert!(!engine.graph().contains(&b));
    assert_eq!(type_of(&engine, "a.tsx"), Some(EnvironmentType::Server));
}

#[test]
fn test_excluded_target_stays_dangling() {
    let temp_dir = project(&[("page.tsx", "export {};\n")]);
    let mut engine = built(&temp_dir);

    let mock = write(engine.root(), "__mocks__/data.ts", "export const data = [];\n");
    engine.build(&[mock.clone()]).unwrap();
    assert!(!engine.graph().contains(&mock));

    let widget = write(
        engine.root(),
        "widget.tsx",
        "'use client';\nimport { data } from './__mocks__/data';\n",
    );
    engine.build(&[widget.clone()]).unwrap();

    assert!(!engine.graph().contains(&mock));
    let node = engine.graph().get(&widget).unwrap();
    assert_eq!(node.imports, vec![mock]);
    assert_eq!(node.env_type, Some(EnvironmentType::Client));
}

#[test]
fn test_listener_fires_once_per_build() {
    let temp_dir = project(&[("a.tsx", "")]);
    let mut engine = Engine::new(EngineConfig::new(temp_dir.path())).unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    engine.subscribe(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    engine.subscribe(|| panic!("listener failure"));

    engine.build(&[]).unwrap();
    engine.build(&[engine.root().join("a.tsx")]).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(engine.graph().len(), 1);
}

#[test]
fn test_engines_are_independent() {
    let client = project(&[("a.tsx", "'use client';\n")]);
    let server = project(&[("a.tsx", "")]);

    let client = built(&client);
    let server = built(&server);

    assert_eq!(type_of(&client, "a.tsx"), Some(EnvironmentType::Client));
    assert_eq!(type_of(&server, "a.tsx"), Some(EnvironmentType::Server));
}

#[test]
fn test_cli_scan_prints_report_and_writes_snapshot() {
    let temp_dir = project(&[
        ("src/a.tsx", "'use client';\nimport './b';\n"),
        ("src/b.tsx", ""),
        ("src/c.tsx", "import './b';\n"),
        ("src/c.test.tsx", "import './c';\n"),
    ]);

    let output = boundary(temp_dir.path(), &["scan"]);

    assert!(output.status.success());
    insta::assert_snapshot!(String::from_utf8_lossy(&output.stdout).trim_end().replace('\t', " "), @r"
    src/a.tsx client
    src/b.tsx universal
    src/c.tsx server
    ");

    let root = temp_dir.path().canonicalize().unwrap();
    let snapshot = load_snapshot(&root).unwrap().unwrap();
    assert_eq!(snapshot.root, root);
    assert_eq!(snapshot.nodes.len(), 3);
}

#[test]
fn test_cli_scan_json_without_cache() {
    let temp_dir = project(&[("a.tsx", "'use client';\n")]);

    let output = boundary(temp_dir.path(), &["scan", "--json", "--no-cache"]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["nodes"][0]["type"], "client");
    assert_eq!(json["nodes"][0]["is_client"], true);
    assert!(!snapshot_path(temp_dir.path()).exists());
}

#[test]
fn test_cli_respects_project_config_and_flags() {
    let temp_dir = project(&[
        ("boundary.toml", "exclude = [\"legacy/**\"]\n"),
        ("legacy/old.tsx", ""),
        ("tmp/scratch.tsx", ""),
        ("src/a.tsx", ""),
    ]);

    let output = boundary(temp_dir.path(), &["--exclude", "tmp/**", "scan", "--no-cache"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "src/a.tsx\tserver\n");
}

#[test]
fn test_cli_fails_on_bad_configuration() {
    let temp_dir = project(&[("a.tsx", "")]);

    let missing_root = boundary(&temp_dir.path().join("nope"), &["scan"]);
    assert!(!missing_root.status.success());

    let missing_tsconfig = boundary(temp_dir.path(), &["--tsconfig", "/nonexistent/tsconfig.json", "scan"]);
    assert!(!missing_tsconfig.status.success());

    write(temp_dir.path(), "boundary.toml", "exclude = 3\n");
    let malformed = boundary(temp_dir.path(), &["scan"]);
    assert!(!malformed.status.success());
}

#[test]
fn test_cli_clear_removes_cache() {
    let temp_dir = project(&[("a.tsx", "")]);
    assert!(boundary(temp_dir.path(), &["scan"]).status.success());
    assert!(snapshot_path(temp_dir.path()).exists());

    assert!(boundary(temp_dir.path(), &["clear"]).status.success());

    assert!(!snapshot_path(temp_dir.path()).exists());
}

#[test]
fn test_cli_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_boundary"))
        .arg("version")
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}
