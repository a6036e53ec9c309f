//! Template loading and management

use std::collections::HashMap;
use taskcluster_cli_common::{CliError, Result};
use tera::{Tera, Value};

/// Load the generated-file template
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();
    // Output is Rust source, never HTML.
    tera.autoescape_on(vec![]);

    tera.register_filter("rust_str", rust_str_filter);

    tera.add_raw_template("apis.rs", include_str!("../templates/apis.rs.tera"))
        .map_err(|e| CliError::Generation(format!("Failed to load apis.rs template: {}", e)))?;

    Ok(tera)
}

/// Filter to render a string as a Rust string literal
fn rust_str_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("rust_str filter expects a string"))?;

    Ok(Value::String(format!("{:?}", s)))
}
