//! Integration tests for the process environment lookups

use ghw_options::{
    env_or_default_chroot, env_or_default_snapshot_exclusive, env_or_default_snapshot_path,
    env_or_default_snapshot_preserve, env_or_default_snapshot_root,
};

use crate::integration::with_ghw_env;

#[test]
fn test_defaults_with_clean_environment() {
    with_ghw_env(&[], || {
        assert_eq!(env_or_default_chroot(), "/");
        assert_eq!(env_or_default_snapshot_path(), "");
        assert_eq!(env_or_default_snapshot_root(), "");
        assert!(!env_or_default_snapshot_exclusive());
        assert!(!env_or_default_snapshot_preserve());
    });
}

#[test]
fn test_chroot_from_environment() {
    with_ghw_env(&[("GHW_CHROOT", "/host")], || {
        assert_eq!(env_or_default_chroot(), "/host");
    });
}

#[test]
fn test_empty_chroot_counts_as_set() {
    with_ghw_env(&[("GHW_CHROOT", "")], || {
        assert_eq!(env_or_default_chroot(), "");
    });
}

#[test]
fn test_snapshot_strings_from_environment() {
    with_ghw_env(
        &[
            ("GHW_SNAPSHOT_PATH", "/tmp/inventory.tar.gz"),
            ("GHW_SNAPSHOT_ROOT", ""),
        ],
        || {
            assert_eq!(env_or_default_snapshot_path(), "/tmp/inventory.tar.gz");
            assert_eq!(env_or_default_snapshot_root(), "");
        },
    );
}

#[test]
fn test_flags_ignore_value() {
    with_ghw_env(
        &[
            ("GHW_SNAPSHOT_EXCLUSIVE", ""),
            ("GHW_SNAPSHOT_PRESERVE", "no"),
        ],
        || {
            assert!(env_or_default_snapshot_exclusive());
            assert!(env_or_default_snapshot_preserve());
        },
    );
}

#[cfg(unix)]
#[test]
fn test_non_utf8_values_count_as_set() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    with_ghw_env(&[], || {
        std::env::set_var("GHW_CHROOT", OsStr::from_bytes(b"/h\xffst"));
        std::env::set_var("GHW_SNAPSHOT_EXCLUSIVE", OsStr::from_bytes(b"\xfe"));

        assert_eq!(env_or_default_chroot(), "/h\u{FFFD}st");
        assert!(env_or_default_snapshot_exclusive());
    });
}
