//! Params layering: JSON config file, then `--params` overrides.

use std::path::Path;

use glam::DVec2;
use particle_field_core::params::merge_params;
use serde_json::Value;

use crate::error::CliError;

/// Reads the optional config file and merges the inline `--params` JSON over it.
pub fn load_params(config: Option<&Path>, inline: &str) -> Result<Value, CliError> {
    let base = match config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
            parse_object(&text, &path.display().to_string())?
        }
        None => Value::Object(Default::default()),
    };
    let overrides = parse_object(inline, "--params")?;
    Ok(merge_params(&base, &overrides))
}

fn parse_object(text: &str, source: &str) -> Result<Value, CliError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| CliError::Input(format!("invalid JSON in {source}: {e}")))?;
    if !value.is_object() {
        return Err(CliError::Input(format!("{source} must be a JSON object")));
    }
    Ok(value)
}

/// Parses `"x,y"` into a field-space pointer position.
pub fn parse_pointer(spec: &str) -> Result<DVec2, CliError> {
    let bad = || CliError::Input(format!("invalid pointer '{spec}', expected x,y"));
    let (x, y) = spec.split_once(',').ok_or_else(bad)?;
    let x: f64 = x.trim().parse().map_err(|_| bad())?;
    let y: f64 = y.trim().parse().map_err(|_| bad())?;
    Ok(DVec2::new(x, y))
}
