//! Environment lookups
//!
//! Every read of process-wide environment state goes through an [`EnvSource`], so
//! callers and tests can resolve options against a controlled set of variables
//! instead of mutating the real process environment.

use std::collections::HashMap;

/// Chroot used when `GHW_CHROOT` is not set.
pub const DEFAULT_CHROOT: &str = "/";

pub const ENV_KEY_CHROOT: &str = "GHW_CHROOT";
pub const ENV_KEY_SNAPSHOT_PATH: &str = "GHW_SNAPSHOT_PATH";
pub const ENV_KEY_SNAPSHOT_ROOT: &str = "GHW_SNAPSHOT_ROOT";
pub const ENV_KEY_SNAPSHOT_EXCLUSIVE: &str = "GHW_SNAPSHOT_EXCLUSIVE";
pub const ENV_KEY_SNAPSHOT_PRESERVE: &str = "GHW_SNAPSHOT_PRESERVE";

/// A key-value view of environment variables.
pub trait EnvSource {
    /// Value of `key`, or `None` when the variable is not set.
    ///
    /// A variable set to the empty string is `Some("")`.
    fn lookup(&self, key: &str) -> Option<String>;

    /// Whether `key` is set, regardless of its value.
    fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }

    fn contains(&self, key: &str) -> bool {
        (**self).contains(key)
    }
}

/// The real process environment, read at call time.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        // Non-UTF-8 values still count as set.
        std::env::var_os(key).map(|v| v.to_string_lossy().into_owned())
    }

    fn contains(&self, key: &str) -> bool {
        std::env::var_os(key).is_some()
    }
}

/// In-memory environment, mainly for tests and embedders that resolve options
/// on behalf of another process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.vars.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl EnvSource for MapEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn lookup_or(env: &impl EnvSource, key: &str, default: &str) -> String {
    match env.lookup(key) {
        Some(val) => {
            tracing::trace!(key, value = %val, "environment override");
            val
        }
        None => default.to_string(),
    }
}

fn is_present(env: &impl EnvSource, key: &str) -> bool {
    let present = env.contains(key);
    if present {
        tracing::trace!(key, "environment flag present");
    }
    present
}

/// `GHW_CHROOT` from `env`, or `/`.
pub fn env_or_default_chroot_from(env: &impl EnvSource) -> String {
    lookup_or(env, ENV_KEY_CHROOT, DEFAULT_CHROOT)
}

/// `GHW_SNAPSHOT_PATH` from `env`, or `""` (no snapshot consumption).
pub fn env_or_default_snapshot_path_from(env: &impl EnvSource) -> String {
    lookup_or(env, ENV_KEY_SNAPSHOT_PATH, "")
}

/// `GHW_SNAPSHOT_ROOT` from `env`, or `""` (self-managed unpack directory).
pub fn env_or_default_snapshot_root_from(env: &impl EnvSource) -> String {
    lookup_or(env, ENV_KEY_SNAPSHOT_ROOT, "")
}

/// True when `GHW_SNAPSHOT_EXCLUSIVE` is set in `env`, whatever its value.
pub fn env_or_default_snapshot_exclusive_from(env: &impl EnvSource) -> bool {
    is_present(env, ENV_KEY_SNAPSHOT_EXCLUSIVE)
}

/// True when `GHW_SNAPSHOT_PRESERVE` is set in `env`, whatever its value.
pub fn env_or_default_snapshot_preserve_from(env: &impl EnvSource) -> bool {
    is_present(env, ENV_KEY_SNAPSHOT_PRESERVE)
}

/// Value of `GHW_CHROOT`, or `/` if not set.
///
/// An empty `GHW_CHROOT` is returned as-is.
pub fn env_or_default_chroot() -> String {
    env_or_default_chroot_from(&ProcessEnv)
}

/// Value of `GHW_SNAPSHOT_PATH`, or `""` if not set.
pub fn env_or_default_snapshot_path() -> String {
    env_or_default_snapshot_path_from(&ProcessEnv)
}

/// Value of `GHW_SNAPSHOT_ROOT`, or `""` if not set.
pub fn env_or_default_snapshot_root() -> String {
    env_or_default_snapshot_root_from(&ProcessEnv)
}

/// Whether `GHW_SNAPSHOT_EXCLUSIVE` is set.
pub fn env_or_default_snapshot_exclusive() -> bool {
    env_or_default_snapshot_exclusive_from(&ProcessEnv)
}

/// Whether `GHW_SNAPSHOT_PRESERVE` is set.
///
/// There is no [`Options`](crate::option::Options) field for this: keeping an
/// unpacked snapshot around is a troubleshooting aid, so it is only reachable
/// through the environment.
pub fn env_or_default_snapshot_preserve() -> bool {
    env_or_default_snapshot_preserve_from(&ProcessEnv)
}
