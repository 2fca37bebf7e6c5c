use crate::config::ScanConfig;
use crate::file_scanner::FileScanner;
use crate::file_scanner::read_sources;
use std::fs;
use std::path::Path;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn skips_excluded_directories_and_other_extensions() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "app/queries.py", "");
    write(root, "ops/orders.graphql", "");
    write(root, "README.md", "");
    write(root, "node_modules/pkg/schema.graphql", "");
    write(root, ".venv/lib/site.py", "");

    let scanned = FileScanner::new(&ScanConfig::default()).scan(&[root.to_path_buf()]);

    assert!(scanned.walk_errors.is_empty());
    assert_eq!(scanned.files, vec![
        root.join("app/queries.py"),
        root.join("ops/orders.graphql"),
    ]);
    assert_eq!(scanned.num_skipped, 1);
}

#[test]
fn suffix_patterns_exclude_matching_files() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "app/queries.py", "");
    write(root, "app/queries_generated.py", "");

    let mut config = ScanConfig::default();
    config.exclude.push("*_generated.py".to_string());
    let scanned = FileScanner::new(&config).scan(&[root.to_path_buf()]);

    assert_eq!(scanned.files, vec![root.join("app/queries.py")]);
}

#[test]
fn explicit_files_are_kept_whatever_their_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schema_ops.txt");
    fs::write(&path, "query A { shop { name } }").unwrap();

    let scanned = FileScanner::new(&ScanConfig::default()).scan(&[path.clone()]);

    assert_eq!(scanned.files, vec![path]);
}

#[test]
fn max_files_truncates_in_path_order() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    for name in ["c.graphql", "a.graphql", "b.graphql"] {
        write(root, name, "");
    }

    let config = ScanConfig {
        max_files: Some(2),
        ..ScanConfig::default()
    };
    let scanned = FileScanner::new(&config).scan(&[root.to_path_buf()]);

    assert_eq!(scanned.files, vec![root.join("a.graphql"), root.join("b.graphql")]);
    assert_eq!(scanned.num_skipped, 1);
}

#[test]
fn missing_roots_are_walk_errors() {
    let dir = tempfile::tempdir().unwrap();

    let scanned = FileScanner::new(&ScanConfig::default())
        .scan(&[dir.path().join("does-not-exist")]);

    assert!(scanned.files.is_empty());
    assert_eq!(scanned.walk_errors.len(), 1);
}

#[test]
fn unreadable_files_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.graphql");
    let binary = dir.path().join("binary.graphql");
    fs::write(&good, "query A { shop { name } }").unwrap();
    fs::write(&binary, b"\xff\xfe\x00").unwrap();

    let missing = dir.path().join("missing.graphql");

    let read = read_sources(&[good.clone(), binary.clone(), missing.clone()]);

    assert_eq!(read.sources.len(), 1);
    assert_eq!(read.sources[0].0, good);
    assert_eq!(read.unreadable, vec![binary, missing]);
}
