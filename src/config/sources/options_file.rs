//! TOML options file source.

use config::builder::DefaultState;
use config::{ConfigBuilder, File, FileFormat};

/// Add a TOML options document to the builder.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    content: &str,
) -> ConfigBuilder<DefaultState> {
    builder.add_source(File::from_str(content, FileFormat::Toml))
}
