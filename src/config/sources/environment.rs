//! Environment overlay: `AUTOREF__<TABLE>__<KEY>`, e.g. `AUTOREF__FIELDS__REFERENCE=Ref`.
//!
//! `AUTOREF__OUTPUT__RESERVED_NAMES` takes a comma separated list.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment};

const PREFIX: &str = "AUTOREF";
const SEPARATOR: &str = "__";
const LIST_KEYS: &[&str] = &["output.reserved_names"];

fn source() -> Environment {
    LIST_KEYS.iter().fold(
        Environment::with_prefix(PREFIX)
            .prefix_separator(SEPARATOR)
            .separator(SEPARATOR)
            .list_separator(",")
            .try_parsing(true),
        |env, key| env.with_list_parse_key(key),
    )
}

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(source()))
}
