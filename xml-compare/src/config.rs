use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use xml_compare_core::CompareOptions;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    compare: CompareOptions,
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read compare config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse compare config {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Load the `[compare]` table of a TOML config file.
pub fn load_compare_options(path: &Path) -> Result<CompareOptions, ConfigLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_compare_options(&raw, path.display().to_string())
}

fn parse_compare_options(raw: &str, path: String) -> Result<CompareOptions, ConfigLoadError> {
    let parsed: ConfigFile =
        toml::from_str(raw).map_err(|source| ConfigLoadError::Parse { path, source })?;
    Ok(parsed.compare)
}

/// Turn on every option set in `extra`. Options already on stay on.
pub fn enable(base: CompareOptions, extra: CompareOptions) -> CompareOptions {
    CompareOptions {
        ignore_namespace: base.ignore_namespace || extra.ignore_namespace,
        ignore_prefix: base.ignore_prefix || extra.ignore_prefix,
        ignore_child_node_order: base.ignore_child_node_order || extra.ignore_child_node_order,
        ignore_attribute_order: base.ignore_attribute_order || extra.ignore_attribute_order,
        ignore_comments: base.ignore_comments || extra.ignore_comments,
        ignore_cdata: base.ignore_cdata || extra.ignore_cdata,
    }
}
