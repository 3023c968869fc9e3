// tests/history_report.rs

//! Integration tests for the monthly history driver against a small
//! synthetic git history. Skipped when git is unavailable.

mod common;

use common::{commit_all, have_git, init_repo, write_definition};
use chrono::NaiveDate;
use wolfi_dev::timeseries::{checkout_at, measure_month, month_boundaries, ReportTrees};

fn boundary(y: i32, m: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, 1).unwrap()
}

/// Packages tree: one package in January, a second in February.
fn build_os_tree(dir: &std::path::Path) {
    init_repo(dir);
    write_definition(
        dir,
        "zlib.yaml",
        "package:\n  name: zlib\nsubpackages:\n  - name: zlib-dev\ntest:\n  pipeline: []\n",
    );
    commit_all(dir, "2023-01-10T12:00:00+00:00", "add zlib");
    write_definition(dir, "busybox.yaml", "package:\n  name: busybox\n");
    commit_all(dir, "2023-02-10T12:00:00+00:00", "add busybox");
}

/// Images tree: one image in January, a second in February.
fn build_images_tree(dir: &std::path::Path) {
    init_repo(dir);
    write_definition(
        dir,
        "static.yaml",
        "source:\n  - image: cgr.dev/chainguard/static:latest\n",
    );
    commit_all(dir, "2023-01-15T12:00:00+00:00", "add static");
    write_definition(
        dir,
        "base.yaml",
        "source:\n  - image: cgr.dev/chainguard/wolfi-base\n",
    );
    commit_all(dir, "2023-02-15T12:00:00+00:00", "add base");
}

#[test]
fn test_checkout_at_rewinds_and_advances() {
    if !have_git() {
        eprintln!("git not available; skipping");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    build_os_tree(dir.path());

    // February boundary precedes the February commit: only zlib exists.
    checkout_at(dir.path(), "main", boundary(2023, 2)).unwrap();
    assert!(dir.path().join("zlib.yaml").is_file());
    assert!(!dir.path().join("busybox.yaml").is_file());

    // March boundary sees both, even though HEAD is detached in January.
    checkout_at(dir.path(), "main", boundary(2023, 3)).unwrap();
    assert!(dir.path().join("busybox.yaml").is_file());
}

#[test]
fn test_checkout_before_first_commit_is_not_found() {
    if !have_git() {
        eprintln!("git not available; skipping");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    build_os_tree(dir.path());
    let err = checkout_at(dir.path(), "main", boundary(2022, 6)).unwrap_err();
    assert!(matches!(err, wolfi_dev::Error::NotFound(_)));
}

#[test]
fn test_monthly_rows_follow_history() {
    if !have_git() {
        eprintln!("git not available; skipping");
        return;
    }
    let os = tempfile::tempdir().unwrap();
    let images = tempfile::tempdir().unwrap();
    let images_private = tempfile::tempdir().unwrap();
    build_os_tree(os.path());
    build_images_tree(images.path());
    build_images_tree(images_private.path());

    let trees = ReportTrees {
        os: os.path(),
        images: images.path(),
        images_private: images_private.path(),
        tip_ref: "main",
    };

    let feb = measure_month(&trees, boundary(2023, 2));
    assert_eq!(feb.source_packages, Some(1));
    assert_eq!(feb.binary_packages, Some(1));
    assert_eq!(feb.tests, Some(1));
    assert_eq!(feb.commits, Some(1));
    // One image per tree in January, identical trees: 1 + 1
    assert_eq!(feb.images, Some(2));

    let mar = measure_month(&trees, boundary(2023, 3));
    assert_eq!(mar.source_packages, Some(2));
    assert_eq!(mar.commits, Some(2));
    assert_eq!(mar.images, Some(4));

    // A boundary before any commit yields a partial row, not zeros.
    let early = measure_month(&trees, boundary(2022, 12));
    assert_eq!(early.source_packages, None);
    assert_eq!(early.images, None);
    assert_eq!(early.to_string(), "2022-12-01\t-\t-\t-\t-\t-\t-\t-");
}

#[test]
fn test_one_failed_image_tree_blanks_the_cell() {
    if !have_git() {
        eprintln!("git not available; skipping");
        return;
    }
    let os = tempfile::tempdir().unwrap();
    let images = tempfile::tempdir().unwrap();
    let images_private = tempfile::tempdir().unwrap();
    build_os_tree(os.path());
    build_images_tree(images.path());
    // The private tree only starts in mid-March: boundaries before that
    // cannot resolve a commit for it.
    init_repo(images_private.path());
    write_definition(
        images_private.path(),
        "internal.yaml",
        "source:\n  - image: cgr.dev/chainguard-private/internal\n",
    );
    commit_all(images_private.path(), "2023-03-15T12:00:00+00:00", "add internal");

    let trees = ReportTrees {
        os: os.path(),
        images: images.path(),
        images_private: images_private.path(),
        tip_ref: "main",
    };

    // One tree resolves, the other has no history yet: the cell must be
    // blank, not the surviving tree's count.
    let mar = measure_month(&trees, boundary(2023, 3));
    assert_eq!(mar.images, None);
    // The packages-tree cells are unaffected by the image-tree failure.
    assert_eq!(mar.source_packages, Some(2));
    assert_eq!(mar.commits, Some(2));

    // Once both trees resolve the sum comes back.
    let apr = measure_month(&trees, boundary(2023, 4));
    assert_eq!(apr.images, Some(3));
}

#[test]
fn test_window_boundaries_are_monotone() {
    let today = NaiveDate::from_ymd_opt(2024, 8, 20).unwrap();
    let bs = month_boundaries(boundary(2023, 1), today);
    assert_eq!(bs.first().copied(), Some(boundary(2023, 1)));
    assert_eq!(bs.last().copied(), Some(boundary(2024, 8)));
    assert!(bs.windows(2).all(|w| w[0] < w[1]));
}
