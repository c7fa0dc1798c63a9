//! ghw-options: Option Resolution for Hardware Inventory
//!
//! Decides where system information is read from (a chroot) and whether a
//! captured snapshot should be consumed instead, by merging caller-supplied
//! partial options with defaults taken from `GHW_*` environment variables.
//!
//! ```
//! use ghw_options::{merge_with_env, with_chroot, MapEnv};
//!
//! let env = MapEnv::new().with("GHW_SNAPSHOT_PATH", "/tmp/inventory.tar.gz");
//! let opts = merge_with_env(&env, [with_chroot("/host")]);
//! assert_eq!(opts.chroot_path(), "/host");
//! assert_eq!(opts.snapshot_path(), "/tmp/inventory.tar.gz");
//! ```

pub mod config;
pub mod env;
pub mod error;
pub mod logging;
pub mod option;

pub use crate::config::OptionsLoader;
pub use env::{
    env_or_default_chroot, env_or_default_snapshot_exclusive, env_or_default_snapshot_path,
    env_or_default_snapshot_preserve, env_or_default_snapshot_root, EnvSource, MapEnv,
    ProcessEnv,
};
pub use error::OptionsError;
pub use option::{merge, merge_with_env, with_chroot, with_snapshot, Options, SnapshotOptions};
