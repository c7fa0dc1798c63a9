//! Options Files
//!
//! Partial [`Options`] can be kept in a TOML file and fed to
//! [`merge`](crate::option::merge) alongside programmatic overrides:
//!
//! ```toml
//! chroot = "/host"
//!
//! [snapshot]
//! path = "/var/tmp/inventory.tar.gz"
//! root = "/var/cache/ghw"
//! exclusive = true
//! ```
//!
//! Values must have exactly the types shown and unknown keys are rejected; key
//! names are matched case-insensitively. Keys missing from the file stay unset.
//! Defaults and environment values are applied by the merge, never here.

use crate::error::OptionsError;
use crate::option::Options;
use std::path::Path;

mod sources;

/// Loads partial options from TOML.
pub struct OptionsLoader;

impl OptionsLoader {
    /// Load options from `path`. The file must exist.
    pub fn load_from_file(path: &Path) -> Result<Options, OptionsError> {
        if !path.exists() {
            return Err(OptionsError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let builder = sources::options_file::add_to_builder(config::Config::builder(), &content);
        sources::build_options(builder).map_err(|e| OptionsError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Like [`load_from_file`](Self::load_from_file), but a missing file yields
    /// options with nothing set.
    pub fn load_optional(path: &Path) -> Result<Options, OptionsError> {
        if !path.exists() {
            tracing::debug!(
                options_path = %path.display(),
                "Options file not found, nothing to load"
            );
            return Ok(Options::default());
        }
        Self::load_from_file(path)
    }

    /// Load options from an in-memory TOML document.
    pub fn load_from_str(content: &str) -> Result<Options, OptionsError> {
        let builder = sources::options_file::add_to_builder(config::Config::builder(), content);
        Ok(sources::build_options(builder)?)
    }

    /// Render `options` in the options file format. Unset fields are omitted.
    pub fn to_toml_string(options: &Options) -> Result<String, OptionsError> {
        toml::to_string(options).map_err(|e| OptionsError::Config(e.to_string()))
    }
}
