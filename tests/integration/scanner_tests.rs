//! Scanner integration tests
//!
//! These tests build small ebuild trees on disk and check which FILESDIR
//! files the scanner reports.

use filesdir_check::analysis::{resolve_arguments, Scanner, Scope};
use filesdir_check::config::{Config, ErrorPolicy};
use filesdir_check::error::FilesdirError;
use filesdir_check::index::{CategoryPackage, TreeIndex};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Create a tree from (relative path, contents) pairs
fn create_tree(entries: &[(&str, &str)]) -> tempfile::TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    for (rel, contents) in entries {
        let path = temp_dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).expect("Failed to create dir");
        fs::write(&path, contents).expect("Failed to write file");
    }
    temp_dir
}

fn scan(root: &Path, scope: Scope) -> Result<Vec<PathBuf>, FilesdirError> {
    let index = TreeIndex::new(vec![root.to_path_buf()]);
    let scanner = Scanner::new(&index, &Config::default());
    scanner.scan(root, &scope).map(|result| result.unused)
}

fn foo_package() -> Scope {
    Scope::Package(CategoryPackage::new("app-misc", "foo"))
}

// ============================================================================
// Reference scenarios
// ============================================================================

#[test]
fn test_literal_reference_is_not_reported() {
    let tree = create_tree(&[
        ("app-misc/foo/foo-1.0.ebuild", "epatch \"${FILESDIR}\"/foo.patch\n"),
        ("app-misc/foo/files/foo.patch", ""),
    ]);

    let unused = scan(tree.path(), foo_package()).unwrap();
    assert!(unused.is_empty(), "foo.patch is referenced: {:?}", unused);
}

#[test]
fn test_versioned_name_does_not_reference_bare_name() {
    let tree = create_tree(&[
        ("app-misc/foo/foo-1.0.ebuild", "epatch \"foo-1.0.patch\"\n"),
        ("app-misc/foo/files/foo.patch", ""),
    ]);

    let unused = scan(tree.path(), foo_package()).unwrap();
    assert_eq!(
        unused,
        vec![tree.path().join("app-misc/foo/files/foo.patch")]
    );
}

#[test]
fn test_variable_expansion_reference() {
    let tree = create_tree(&[
        ("app-misc/foo/foo-1.0.ebuild", "epatch \"${FILESDIR}/${P}.patch\"\n"),
        ("app-misc/foo/files/foo-1.0.patch", ""),
    ]);

    let unused = scan(tree.path(), foo_package()).unwrap();
    assert!(unused.is_empty());
}

#[test]
fn test_revision_variables() {
    let tree = create_tree(&[
        (
            "app-misc/foo/foo-1.0-r3.ebuild",
            "newinitd \"${FILESDIR}\"/${PF}.initd foo\nnewconfd $FILESDIR/$PV.confd foo\n",
        ),
        ("app-misc/foo/files/foo-1.0-r3.initd", ""),
        ("app-misc/foo/files/1.0.confd", ""),
        ("app-misc/foo/files/1.0-r3.confd", ""),
    ]);

    let unused = scan(tree.path(), foo_package()).unwrap();
    assert_eq!(
        unused,
        vec![tree.path().join("app-misc/foo/files/1.0-r3.confd")]
    );
}

#[test]
fn test_reference_from_any_recipe_counts() {
    let tree = create_tree(&[
        ("app-misc/foo/foo-1.0.ebuild", "epatch ${FILESDIR}/old.patch\n"),
        ("app-misc/foo/foo-2.0.ebuild", "epatch ${FILESDIR}/new.patch\n"),
        ("app-misc/foo/files/old.patch", ""),
        ("app-misc/foo/files/new.patch", ""),
        ("app-misc/foo/files/gone.patch", ""),
    ]);

    let unused = scan(tree.path(), foo_package()).unwrap();
    assert_eq!(unused, vec![tree.path().join("app-misc/foo/files/gone.patch")]);
}

#[test]
fn test_subdirectory_needs_full_relative_path() {
    let tree = create_tree(&[
        (
            "app-misc/foo/foo-1.0.ebuild",
            "epatch ${FILESDIR}/fix.patch\ninsinto /etc; doins ${FILESDIR}/conf/foo.conf\n",
        ),
        ("app-misc/foo/files/1.0/fix.patch", ""),
        ("app-misc/foo/files/conf/foo.conf", ""),
    ]);

    let unused = scan(tree.path(), foo_package()).unwrap();
    assert_eq!(unused, vec![tree.path().join("app-misc/foo/files/1.0/fix.patch")]);
}

#[test]
fn test_substring_overlap_counts_as_reference() {
    let tree = create_tree(&[
        ("app-misc/foo/foo-1.0.ebuild", "dobin foobar\n"),
        ("app-misc/foo/files/foo", ""),
    ]);

    let unused = scan(tree.path(), foo_package()).unwrap();
    assert!(unused.is_empty());
}

#[test]
fn test_files_without_recipes_are_reported() {
    let tree = create_tree(&[
        ("app-misc/foo/metadata.xml", "<pkgmetadata/>"),
        ("app-misc/foo/files/orphan.patch", ""),
    ]);

    let unused = scan(tree.path(), foo_package()).unwrap();
    assert_eq!(unused.len(), 1);
}

// ============================================================================
// Empty contributions
// ============================================================================

#[test]
fn test_package_without_files_dir_contributes_nothing() {
    let tree = create_tree(&[("app-misc/foo/foo-1.0.ebuild", "")]);
    assert!(scan(tree.path(), foo_package()).unwrap().is_empty());
}

#[test]
fn test_empty_files_dir_contributes_nothing() {
    let tree = create_tree(&[("app-misc/foo/foo-1.0.ebuild", "\u{0}")]);
    fs::create_dir_all(tree.path().join("app-misc/foo/files/empty-subdir")).unwrap();
    assert!(scan(tree.path(), foo_package()).unwrap().is_empty());
}

#[test]
fn test_unreadable_recipe_ignored_when_no_files() {
    let tree = create_tree(&[("app-misc/foo/foo-1.0.ebuild", "")]);
    fs::write(tree.path().join("app-misc/foo/foo-2.0.ebuild"), [0xffu8, 0xfe]).unwrap();
    assert!(scan(tree.path(), foo_package()).unwrap().is_empty());
}

// ============================================================================
// Scopes
// ============================================================================

fn multi_package_tree() -> tempfile::TempDir {
    create_tree(&[
        ("app-misc/foo/foo-1.0.ebuild", ""),
        ("app-misc/foo/files/a.patch", ""),
        ("app-misc/bar/bar-1.0.ebuild", ""),
        ("app-misc/bar/files/b.patch", ""),
        ("dev-libs/baz/baz-1.0.ebuild", ""),
        ("dev-libs/baz/files/c.patch", ""),
    ])
}

#[test]
fn test_scope_all_category_package() {
    let tree = multi_package_tree();
    let root = tree.path();

    assert_eq!(scan(root, Scope::All).unwrap().len(), 3);
    assert_eq!(scan(root, Scope::Category("app-misc".to_string())).unwrap().len(), 2);
    assert_eq!(
        scan(root, Scope::Package(CategoryPackage::new("dev-libs", "baz"))).unwrap(),
        vec![root.join("dev-libs/baz/files/c.patch")]
    );
}

#[test]
fn test_results_follow_package_order() {
    let tree = multi_package_tree();
    let root = tree.path();

    let unused = scan(root, Scope::All).unwrap();
    assert_eq!(
        unused,
        vec![
            root.join("app-misc/bar/files/b.patch"),
            root.join("app-misc/foo/files/a.patch"),
            root.join("dev-libs/baz/files/c.patch"),
        ]
    );
}

#[test]
fn test_missing_package_is_invalid_scope() {
    let tree = multi_package_tree();
    let err = scan(
        tree.path(),
        Scope::Package(CategoryPackage::new("app-misc", "missing")),
    )
    .unwrap_err();
    assert!(matches!(err, FilesdirError::InvalidScope { .. }));
}

#[test]
fn test_invalid_argument_stops_before_scanning() {
    let tree = multi_package_tree();
    let index = TreeIndex::new(vec![tree.path().to_path_buf()]);
    let err = resolve_arguments(&index, &["app-misc/missing".to_string()]).unwrap_err();
    assert!(matches!(err, FilesdirError::InvalidScope { .. }));
}

#[test]
fn test_scan_is_idempotent() {
    let tree = multi_package_tree();
    let first: HashSet<PathBuf> = scan(tree.path(), Scope::All).unwrap().into_iter().collect();
    let second: HashSet<PathBuf> = scan(tree.path(), Scope::All).unwrap().into_iter().collect();
    assert_eq!(first, second);
}

// ============================================================================
// Multiple roots, policies and parallelism
// ============================================================================

#[test]
fn test_multiple_roots_in_order() {
    let main = multi_package_tree();
    let overlay = create_tree(&[
        ("app-misc/foo/foo-9999.ebuild", ""),
        ("app-misc/foo/files/live.patch", ""),
    ]);
    let roots = vec![main.path().to_path_buf(), overlay.path().to_path_buf()];
    let index = TreeIndex::new(roots.clone());
    let scanner = Scanner::new(&index, &Config::default());

    let scopes = resolve_arguments(&index, &["foo".to_string()]).unwrap();
    let result = scanner.scan_all(&roots, &scopes).unwrap();
    assert_eq!(
        result.unused,
        vec![
            main.path().join("app-misc/foo/files/a.patch"),
            overlay.path().join("app-misc/foo/files/live.patch"),
        ]
    );
}

#[test]
fn test_skip_policy_continues_after_failure() {
    let tree = multi_package_tree();
    fs::write(tree.path().join("app-misc/bar/bar-2.0.ebuild"), [0xffu8]).unwrap();
    let index = TreeIndex::new(vec![tree.path().to_path_buf()]);

    let abort = Scanner::new(&index, &Config::default()).scan(tree.path(), &Scope::All);
    assert!(matches!(abort, Err(FilesdirError::RecipeReadFailure { .. })));

    let config = Config {
        on_error: ErrorPolicy::Skip,
        ..Config::default()
    };
    let result = Scanner::new(&index, &config)
        .scan(tree.path(), &Scope::All)
        .unwrap();
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.unused.len(), 2);
    assert_eq!(result.packages_checked, 3);
}

#[test]
fn test_worker_pool_keeps_order() {
    let mut entries = Vec::new();
    let names: Vec<(String, String)> = (0..20)
        .map(|i| {
            (
                format!("cat-{}/pkg{}/pkg{}-1.ebuild", i % 3, i, i),
                format!("cat-{}/pkg{}/files/unused-{}.patch", i % 3, i, i),
            )
        })
        .collect();
    for (recipe, file) in &names {
        entries.push((recipe.as_str(), ""));
        entries.push((file.as_str(), ""));
    }
    let tree = create_tree(&entries);
    let index = TreeIndex::new(vec![tree.path().to_path_buf()]);

    let sequential = Scanner::new(&index, &Config::default())
        .scan(tree.path(), &Scope::All)
        .unwrap();
    let parallel = Scanner::new(
        &index,
        &Config {
            jobs: 4,
            ..Config::default()
        },
    )
    .scan(tree.path(), &Scope::All)
    .unwrap();

    assert_eq!(sequential.unused.len(), 20);
    assert_eq!(sequential.unused, parallel.unused);
}
