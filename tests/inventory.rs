// tests/inventory.rs

//! End-to-end pipeline runs over on-disk fixtures

mod common;

use common::{Collection, write_package};
use pkggraph::graph::{Classification, EdgeKind};
use pkggraph::inventory::Inventory;
use pkggraph::packages::{ArchArchiveReader, ArchiveMetadataReader, discover_archives};
use pkggraph::render::{OutputFormat, RenderOptions, render_to_string};
use pkggraph::{BuiltSetScanner, Error, SilentProgress};

const ZLIB_SRCINFO: &str = "\
pkgbase = zlib
\tpkgver = 1.3.1
\tpkgrel = 1
\tarch = x86_64
\tdepends = glibc
\tprovides = libz.so=1-64

pkgname = zlib

pkgname = minizip
\tdepends = zlib
";

const CURL_SRCINFO: &str = "\
pkgbase = curl
\tmakedepends = patchelf
\tcheckdepends = valgrind
\tdepends = openssl>=3
\tdepends = libz.so
\tdepends_x86_64 = lib32-glibc

pkgname = curl
";

fn populated() -> Collection {
    let collection = Collection::new();
    collection.add_recipe("core", "zlib", ZLIB_SRCINFO);
    collection.add_recipe("extra", "curl", CURL_SRCINFO);
    collection.add_archive(
        "core",
        "zlib-1.3.1-1-x86_64.pkg.tar.zst",
        "pkgname = zlib\npkgver = 1.3.1-1\nprovides = libz.so=1-64\n",
    );
    collection.add_archive(
        "core",
        "glibc-2.40-1-x86_64.pkg.tar.xz",
        "pkgname = glibc\npkgver = 2.40-1\n",
    );
    collection
}

#[test]
fn test_full_pipeline() {
    let collection = populated();
    let report = Inventory::new(collection.config()).run().unwrap();
    let graph = &report.graph;

    assert!(report.is_clean());
    assert_eq!(report.recipes_read, 2);
    assert_eq!(report.archives_scanned, 2);

    // Split recipe: both packages declared and grouped under the base name
    let minizip = graph.get("minizip").unwrap();
    assert_eq!(minizip.classification, Classification::Package);
    assert_eq!(minizip.group.as_deref(), Some("zlib"));

    // The library soname is satisfied by both zlib packages
    let mut satisfiers = graph.satisfiers("libz.so");
    satisfiers.sort();
    assert_eq!(satisfiers, vec!["minizip", "zlib"]);
    assert!(graph.get("libz.so").unwrap().built);

    assert!(graph.get("zlib").unwrap().built);
    assert!(graph.get("glibc").unwrap().built);
    assert!(!graph.get("curl").unwrap().built);
    assert!(!graph.get("minizip").unwrap().built);

    assert_eq!(
        graph.targets_of("curl", EdgeKind::BuildTimeDependency),
        vec!["patchelf"]
    );
    assert_eq!(
        graph.targets_of("curl", EdgeKind::CheckTimeDependency),
        vec!["valgrind"]
    );
    assert!(graph.get("openssl").is_some());
    // No architecture configured, so suffixed keys are ignored
    assert!(graph.get("lib32-glibc").is_none());
}

#[test]
fn test_arch_specific_keys() {
    let collection = populated();
    let mut config = collection.config();
    config.recipes.arch = Some("x86_64".to_string());

    let report = Inventory::new(config).run().unwrap();
    assert_eq!(
        report.graph.get("lib32-glibc").unwrap().classification,
        Classification::Dependency
    );
}

#[test]
fn test_bad_inputs_are_reported_not_fatal() {
    let collection = populated();
    collection.add_bare_recipe("extra", "no-srcinfo");
    collection.add_recipe("extra", "garbled", "pkgbase = garbled\nnot a key value line\n");
    collection.add_built_file("core", "broken-1-1-x86_64.pkg.tar.zst", b"not zstd at all");
    collection.add_built_file("core", "zlib-1.3.1-1-x86_64.pkg.tar.zst.sig", b"signature");
    collection.add_archive("core", "nameless-1-1-any.pkg.tar.gz", "pkgver = 1\n");

    let report = Inventory::new(collection.config()).run().unwrap();

    assert_eq!(report.recipes_read, 2);
    assert_eq!(report.failed_recipes.len(), 2);
    assert_eq!(report.archives_scanned, 2);
    assert_eq!(report.skipped_archives.len(), 2);
    assert_eq!(report.problem_count(), 4);
    assert!(report.graph.get("zlib").unwrap().built);
}

#[test]
fn test_repository_selection() {
    let collection = populated();
    let mut config = collection.config();
    config.recipes.repositories = vec!["extra".to_string()];

    let report = Inventory::new(config).run().unwrap();
    let graph = &report.graph;

    assert_eq!(report.recipes_read, 1);
    assert!(graph.get("minizip").is_none());
    // zlib is no longer declared, but libz.so is still a dependency of curl
    assert_eq!(
        graph.get("libz.so").unwrap().classification,
        Classification::Dependency
    );
}

#[test]
fn test_missing_built_root() {
    let collection = Collection::new();
    collection.add_recipe("core", "zlib", ZLIB_SRCINFO);

    let err = Inventory::new(collection.config()).run().unwrap_err();
    assert!(matches!(err, Error::IoError(_)));
}

#[test]
fn test_scan_twice_is_same_set() {
    let collection = populated();
    let archives = discover_archives(&collection.built_root()).unwrap();
    let mut doubled = archives.clone();
    doubled.extend(archives.iter().cloned());

    let scanner = BuiltSetScanner::new(ArchArchiveReader::new());
    let once = scanner.scan(&archives, &SilentProgress::new());
    let twice = scanner.scan(&doubled, &SilentProgress::new());

    assert_eq!(once.built, twice.built);
    assert_eq!(once.built.sorted(), vec!["glibc", "libz.so", "zlib"]);
}

#[test]
fn test_all_compressions_readable() {
    let dir = tempfile::tempdir().unwrap();
    let reader = ArchArchiveReader::new();

    for name in ["a.pkg.tar.zst", "a.pkg.tar.xz", "a.pkg.tar.gz"] {
        let path = dir.path().join(name);
        write_package(&path, &[(".PKGINFO", "pkgname = a\n")]);
        let content = reader.read_metadata(&path).unwrap();
        assert_eq!(content, "pkgname = a\n", "{}", name);
    }
}

#[test]
fn test_rendered_outputs() {
    let collection = populated();
    let report = Inventory::new(collection.config()).run().unwrap();

    let dot = render_to_string(
        OutputFormat::Dot.renderer(RenderOptions::default()).as_ref(),
        &report.graph,
    )
    .unwrap();
    assert!(dot.contains("subgraph \"cluster_zlib\""));
    assert!(dot.contains("\"curl\" -> \"patchelf\" [color=\"red\""));
    assert!(dot.contains("\"zlib\" [style=filled, fillcolor=\"#003ea3\""));

    let json = render_to_string(
        OutputFormat::Json.renderer(RenderOptions::default()).as_ref(),
        &report.graph,
    )
    .unwrap();
    let doc: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        doc["nodes"].as_array().unwrap().len(),
        report.graph.node_count()
    );
    assert_eq!(
        doc["edges"].as_array().unwrap().len(),
        report.graph.edge_count()
    );
}
