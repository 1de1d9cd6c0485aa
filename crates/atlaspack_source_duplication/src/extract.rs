use serde::{Deserialize, Serialize};

use crate::canonicalize::SourceCanonicalizer;
use crate::types::{BundleSourceMap, SourceSizes};

/// A canonical source and the bytes it contributed to one bundle.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct SourceData {
  pub source: String,
  /// `None` when the size table has no entry for the source.
  pub size: Option<u64>,
}

/// Lists the sources of one bundle in source map order, skipping bundler
/// overhead.
///
/// Sizes are looked up with the raw `sources` entry because that is how the
/// size table is keyed. Two entries canonicalizing to the same source are
/// both kept.
pub fn extract_source_datas(
  map: &BundleSourceMap,
  sizes: &SourceSizes,
  canonicalizer: &SourceCanonicalizer,
) -> Vec<SourceData> {
  let mut source_datas = Vec::with_capacity(map.sources.len());

  for raw_source in &map.sources {
    let source = canonicalizer.canonicalize(raw_source);
    if canonicalizer.should_ignore(&source) {
      tracing::trace!(source = %raw_source, "Ignoring bundler overhead");
      continue;
    }

    let size_key = map.size_key(raw_source);
    let size = sizes.files.get(&size_key).copied();
    if size.is_none() {
      tracing::debug!(key = %size_key, "No size entry for source");
    }

    source_datas.push(SourceData { source, size });
  }

  tracing::trace!(
    sources = source_datas.len(),
    total_bytes = ?sizes.total_bytes,
    "Extracted bundle sources"
  );

  source_datas
}
