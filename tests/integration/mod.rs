//! Integration tests for ghw-options

mod env_defaults;
mod merge_resolution;

pub use test_utils::with_ghw_env;
