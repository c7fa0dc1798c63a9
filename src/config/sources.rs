//! Sources feeding the options builder.
//!
//! `config` coerces scalars between kinds when deserializing, so every value is
//! checked against the options schema before it is turned into [`Options`].
//! Keys are matched case-insensitively.

pub mod options_file;

use crate::option::Options;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Map, Source, Value, ValueKind};

const OPTION_KEYS: [&str; 2] = ["chroot", "snapshot"];
const SNAPSHOT_KEYS: [&str; 3] = ["path", "root", "exclusive"];

/// Build the accumulated sources and deserialize them as partial options.
pub fn build_options(builder: ConfigBuilder<DefaultState>) -> Result<Options, ConfigError> {
    let config = builder.build()?;
    check_schema(&config.collect()?)?;
    config.try_deserialize::<Options>()
}

fn check_schema(table: &Map<String, Value>) -> Result<(), ConfigError> {
    check_keys(table, &OPTION_KEYS, "")?;

    if let Some(chroot) = table.get("chroot") {
        expect_string("chroot", chroot)?;
    }

    if let Some(snapshot) = table.get("snapshot") {
        let ValueKind::Table(snapshot) = &snapshot.kind else {
            return Err(type_error("snapshot", "a table", snapshot));
        };
        check_keys(snapshot, &SNAPSHOT_KEYS, "snapshot.")?;
        if let Some(path) = snapshot.get("path") {
            expect_string("snapshot.path", path)?;
        }
        if let Some(root) = snapshot.get("root") {
            expect_string("snapshot.root", root)?;
        }
        if let Some(exclusive) = snapshot.get("exclusive") {
            if !matches!(exclusive.kind, ValueKind::Boolean(_)) {
                return Err(type_error("snapshot.exclusive", "a boolean", exclusive));
            }
        }
    }

    Ok(())
}

fn check_keys(
    table: &Map<String, Value>,
    known: &[&str],
    prefix: &str,
) -> Result<(), ConfigError> {
    match table.keys().find(|key| !known.contains(&key.as_str())) {
        Some(key) => Err(ConfigError::Message(format!(
            "unknown key `{}{}` (expected one of: {})",
            prefix,
            key,
            known.join(", ")
        ))),
        None => Ok(()),
    }
}

fn expect_string(key: &str, value: &Value) -> Result<(), ConfigError> {
    match value.kind {
        ValueKind::String(_) => Ok(()),
        _ => Err(type_error(key, "a string", value)),
    }
}

fn type_error(key: &str, expected: &str, value: &Value) -> ConfigError {
    ConfigError::Message(format!(
        "`{}` must be {}, found {}",
        key,
        expected,
        kind_name(&value.kind)
    ))
}

fn kind_name(kind: &ValueKind) -> &'static str {
    match kind {
        ValueKind::Nil => "nothing",
        ValueKind::Boolean(_) => "a boolean",
        ValueKind::I64(_) | ValueKind::I128(_) | ValueKind::U64(_) | ValueKind::U128(_) => {
            "an integer"
        }
        ValueKind::Float(_) => "a float",
        ValueKind::String(_) => "a string",
        ValueKind::Table(_) => "a table",
        ValueKind::Array(_) => "an array",
    }
}
