//! Option Resolution
//!
//! Partial option sets supplied by a caller are folded together and any field
//! left unset is filled from the environment. Every field is wrapped in `Option`
//! so that "not specified" stays distinguishable from "specified as empty/false".

use crate::env::{
    env_or_default_chroot_from, env_or_default_snapshot_exclusive_from,
    env_or_default_snapshot_path_from, env_or_default_snapshot_root_from, EnvSource, ProcessEnv,
    DEFAULT_CHROOT,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Optionally-configured settings for a probing run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Root that system paths are built from.
    ///
    /// When host filesystems are bind-mounted into a container at `/host`,
    /// setting this (or `GHW_CHROOT`) to `/host` makes sysfs and procfs reads
    /// happen beneath that mountpoint instead of `/`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chroot: Option<String>,

    /// Snapshot handling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<SnapshotOptions>,
}

/// How a captured snapshot should be consumed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotOptions {
    /// Snapshot archive to unpack and read from. Empty disables snapshots.
    #[serde(default)]
    pub path: String,

    /// Directory to unpack into. `None` leaves the unpack directory to be
    /// created and cleaned up automatically; `GHW_SNAPSHOT_PRESERVE` skips that
    /// cleanup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,

    /// Treat `root` as owned by this process: unpack only if it is empty, and
    /// leave existing content untouched otherwise. Combined with `root`, this
    /// makes each run unpack the snapshot at most once.
    #[serde(default)]
    pub exclusive: bool,
}

impl SnapshotOptions {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            root: None,
            exclusive: false,
        }
    }

    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn exclusive(mut self, exclusive: bool) -> Self {
        self.exclusive = exclusive;
        self
    }

    /// Whether a snapshot should be consumed at all.
    pub fn is_enabled(&self) -> bool {
        !self.path.is_empty()
    }

    fn from_env(env: &impl EnvSource) -> Self {
        Self {
            path: env_or_default_snapshot_path_from(env),
            root: Some(env_or_default_snapshot_root_from(env)),
            exclusive: env_or_default_snapshot_exclusive_from(env),
        }
    }
}

/// Options with only the chroot set.
pub fn with_chroot(dir: impl Into<String>) -> Options {
    Options {
        chroot: Some(dir.into()),
        snapshot: None,
    }
}

/// Options with only the snapshot settings set.
pub fn with_snapshot(opts: SnapshotOptions) -> Options {
    Options {
        chroot: None,
        snapshot: Some(opts),
    }
}

/// Merge partial options against the process environment.
///
/// See [`merge_with_env`].
pub fn merge<I>(opts: I) -> Options
where
    I: IntoIterator<Item = Options>,
{
    merge_with_env(&ProcessEnv, opts)
}

/// Fold `opts` left to right, then fill whatever is still unset from `env`.
///
/// Chroot and snapshot are merged independently: for each, the last option set
/// that specifies it wins. A snapshot is always taken whole, so a supplied
/// [`SnapshotOptions`] without a root keeps `root: None`.
pub fn merge_with_env<I>(env: &impl EnvSource, opts: I) -> Options
where
    I: IntoIterator<Item = Options>,
{
    let mut merged = opts.into_iter().fold(Options::default(), |mut acc, opt| {
        if opt.chroot.is_some() {
            acc.chroot = opt.chroot;
        }
        if opt.snapshot.is_some() {
            acc.snapshot = opt.snapshot;
        }
        acc
    });

    if merged.chroot.is_none() {
        let chroot = env_or_default_chroot_from(env);
        debug!(chroot = %chroot, "chroot not specified, using environment or default");
        merged.chroot = Some(chroot);
    }
    if merged.snapshot.is_none() {
        let snapshot = SnapshotOptions::from_env(env);
        debug!(
            path = %snapshot.path,
            exclusive = snapshot.exclusive,
            "snapshot not specified, using environment or default"
        );
        merged.snapshot = Some(snapshot);
    }

    merged
}

impl Options {
    /// Fully resolved options from the process environment alone.
    pub fn from_env() -> Self {
        merge(std::iter::empty())
    }

    /// Fully resolved options from `env` alone.
    pub fn from_env_source(env: &impl EnvSource) -> Self {
        merge_with_env(env, std::iter::empty())
    }

    /// Whether every field, including the snapshot root, is present.
    pub fn is_resolved(&self) -> bool {
        self.chroot.is_some()
            && self
                .snapshot
                .as_ref()
                .map(|s| s.root.is_some())
                .unwrap_or(false)
    }

    /// Effective chroot; `/` when unset.
    pub fn chroot_path(&self) -> &str {
        self.chroot.as_deref().unwrap_or(DEFAULT_CHROOT)
    }

    /// Effective snapshot path; empty when unset.
    pub fn snapshot_path(&self) -> &str {
        self.snapshot.as_ref().map(|s| s.path.as_str()).unwrap_or("")
    }

    /// Effective snapshot root; empty (self-managed) when unset.
    pub fn snapshot_root(&self) -> &str {
        self.snapshot
            .as_ref()
            .and_then(|s| s.root.as_deref())
            .unwrap_or("")
    }

    pub fn snapshot_exclusive(&self) -> bool {
        self.snapshot.as_ref().map(|s| s.exclusive).unwrap_or(false)
    }
}
