use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::DuplicationResult;

/// The parts of a raw source map that duplication detection reads.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleSourceMap {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub source_root: Option<String>,
  pub sources: Vec<String>,
}

impl BundleSourceMap {
  /// The key a `sources` entry has in [`SourceSizes::files`].
  pub fn size_key(&self, source: &str) -> String {
    match &self.source_root {
      Some(source_root) => format!("{source_root}{source}"),
      None => source.to_string(),
    }
  }
}

/// Bytes of generated code attributed to each original source.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSizes {
  /// Keyed by `sourceRoot + source`.
  pub files: HashMap<String, u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub unmapped_bytes: Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub total_bytes: Option<u64>,
}

/// A script together with its parsed source map and computed sizes.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
  /// Scripts without a `src` are identified by an empty string.
  #[serde(default)]
  pub script_url: String,
  pub map: BundleSourceMap,
  pub sizes: SourceSizes,
}

impl Bundle {
  pub fn list_from_json(json: &str) -> DuplicationResult<Vec<Bundle>> {
    Ok(serde_json::from_str(json)?)
  }
}
