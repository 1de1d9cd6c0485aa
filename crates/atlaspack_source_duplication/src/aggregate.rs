use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::extract::SourceData;

/// How many bytes a source contributed to a given script.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
  pub script_url: String,
  pub size: Option<u64>,
}

/// Sources found in two or more bundles, in the order they were first seen.
///
/// Each source lists its contributions in bundle order.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DuplicateReport {
  sources: IndexMap<String, Vec<Contribution>>,
}

impl DuplicateReport {
  pub fn len(&self) -> usize {
    self.sources.len()
  }

  pub fn is_empty(&self) -> bool {
    self.sources.is_empty()
  }

  pub fn get(&self, source: &str) -> Option<&[Contribution]> {
    self.sources.get(source).map(|c| c.as_slice())
  }

  pub fn contains_source(&self, source: &str) -> bool {
    self.sources.contains_key(source)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &[Contribution])> {
    self
      .sources
      .iter()
      .map(|(source, contributions)| (source.as_str(), contributions.as_slice()))
  }

  pub fn sources(&self) -> impl Iterator<Item = &str> {
    self.sources.keys().map(|source| source.as_str())
  }

  pub fn into_inner(self) -> IndexMap<String, Vec<Contribution>> {
    self.sources
  }
}

impl IntoIterator for DuplicateReport {
  type Item = (String, Vec<Contribution>);
  type IntoIter = indexmap::map::IntoIter<String, Vec<Contribution>>;

  fn into_iter(self) -> Self::IntoIter {
    self.sources.into_iter()
  }
}

/// Groups every bundle's sources by canonical source, then drops the sources
/// that only a single bundle contains.
///
/// Bundles are folded in iteration order, so the report is fully determined
/// by the input order.
pub fn aggregate_source_datas<'a, I>(bundles: I) -> DuplicateReport
where
  I: IntoIterator<Item = (&'a str, Vec<SourceData>)>,
{
  let mut sources: IndexMap<String, Vec<Contribution>> = IndexMap::new();

  for (script_url, source_datas) in bundles {
    for SourceData { source, size } in source_datas {
      sources.entry(source).or_default().push(Contribution {
        script_url: script_url.to_string(),
        size,
      });
    }
  }

  let seen = sources.len();
  // `retain` keeps the relative order of the remaining entries
  sources.retain(|_, contributions| contributions.len() > 1);
  tracing::debug!(
    seen,
    duplicated = sources.len(),
    "Aggregated bundle sources"
  );

  DuplicateReport { sources }
}
