//! Integration tests for merging against the process environment

use ghw_options::{merge, with_chroot, with_snapshot, Options, SnapshotOptions};

use crate::integration::with_ghw_env;

#[test]
fn test_merge_nothing_with_clean_environment() {
    with_ghw_env(&[], || {
        let opts = merge(Vec::new());
        assert_eq!(opts.chroot.as_deref(), Some("/"));
        assert_eq!(
            opts.snapshot,
            Some(SnapshotOptions::new("").with_root("").exclusive(false))
        );
        assert!(opts.is_resolved());
    });
}

#[test]
fn test_merge_nothing_picks_up_chroot() {
    with_ghw_env(&[("GHW_CHROOT", "/host")], || {
        assert_eq!(merge(Vec::new()).chroot_path(), "/host");
        assert_eq!(Options::from_env().chroot_path(), "/host");
    });
}

#[test]
fn test_explicit_chroot_beats_environment() {
    with_ghw_env(&[("GHW_CHROOT", "/host")], || {
        let opts = merge([with_chroot("/a"), with_chroot("/b")]);
        assert_eq!(opts.chroot_path(), "/b");
    });
}

#[test]
fn test_snapshot_defaults_from_environment() {
    with_ghw_env(
        &[
            ("GHW_SNAPSHOT_PATH", "/tmp/snap.tgz"),
            ("GHW_SNAPSHOT_ROOT", "/var/cache/ghw"),
            ("GHW_SNAPSHOT_EXCLUSIVE", "1"),
        ],
        || {
            let opts = merge([with_chroot("/a")]);
            assert_eq!(opts.chroot_path(), "/a");
            assert_eq!(opts.snapshot_path(), "/tmp/snap.tgz");
            assert_eq!(opts.snapshot_root(), "/var/cache/ghw");
            assert!(opts.snapshot_exclusive());
        },
    );
}

#[test]
fn test_explicit_snapshot_is_not_mixed_with_environment() {
    with_ghw_env(
        &[
            ("GHW_SNAPSHOT_ROOT", "/var/cache/ghw"),
            ("GHW_SNAPSHOT_EXCLUSIVE", ""),
        ],
        || {
            let opts = merge([with_snapshot(SnapshotOptions::new("/snap"))]);
            let snapshot = opts.snapshot.unwrap();
            assert_eq!(snapshot.path, "/snap");
            assert_eq!(snapshot.root, None);
            assert!(!snapshot.exclusive);
        },
    );
}

#[test]
fn test_resolved_options_ignore_later_environment() {
    let resolved = with_ghw_env(&[("GHW_CHROOT", "/first")], || merge(Vec::new()));
    with_ghw_env(&[("GHW_CHROOT", "/second")], || {
        assert_eq!(merge([resolved.clone()]), resolved);
        assert_eq!(resolved.chroot_path(), "/first");
    });
}
