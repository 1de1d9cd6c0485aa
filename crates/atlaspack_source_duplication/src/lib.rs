//! Finds original source files that are bundled into more than one script.
//!
//! Every bundle comes with its source map and a table of how many bytes each
//! `sources` entry contributed to the generated code. Sources are first
//! canonicalized so that the same file is recognized no matter how deeply it
//! is nested in `node_modules` or which bundle embeds it. Bundler overhead
//! such as the webpack runtime is dropped. The sources that remain are grouped
//! across bundles and only the ones present in two or more bundles are
//! reported.
//!
//! Parsing source maps and computing the size tables is left to the caller.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use atlaspack_source_duplication::{
//!   find_duplicated_sources_with_defaults, Bundle, BundleSourceMap, SourceSizes,
//! };
//!
//! let bundle = |script_url: &str| Bundle {
//!   script_url: script_url.to_string(),
//!   map: BundleSourceMap {
//!     source_root: None,
//!     sources: vec![String::from("node_modules/react/index.js")],
//!   },
//!   sizes: SourceSizes {
//!     files: HashMap::from([(String::from("node_modules/react/index.js"), 120)]),
//!     ..Default::default()
//!   },
//! };
//!
//! let report = find_duplicated_sources_with_defaults(&[bundle("a.js"), bundle("b.js")]);
//! assert_eq!(report.get("node_modules/react/index.js").unwrap().len(), 2);
//! ```
use rayon::prelude::*;

pub use aggregate::{aggregate_source_datas, Contribution, DuplicateReport};
pub use canonicalize::{canonicalize_source, should_ignore_source, SourceCanonicalizer};
pub use error::{DuplicationError, DuplicationResult};
pub use extract::{extract_source_datas, SourceData};
pub use options::DuplicationOptions;
pub use types::{Bundle, BundleSourceMap, SourceSizes};

mod aggregate;
mod canonicalize;
mod error;
mod extract;
mod options;
mod types;

/// Reports the sources that more than one of `bundles` contains.
///
/// Extraction runs on the rayon thread pool when [`DuplicationOptions::parallel`]
/// is set. Aggregation always happens on the calling thread, in input order.
#[tracing::instrument(level = "info", skip_all, fields(bundles = bundles.len()))]
pub fn find_duplicated_sources(
  bundles: &[Bundle],
  options: &DuplicationOptions,
) -> DuplicationResult<DuplicateReport> {
  options.validate()?;
  let canonicalizer = SourceCanonicalizer::new(options);

  let extract =
    |bundle: &Bundle| extract_source_datas(&bundle.map, &bundle.sizes, &canonicalizer);
  let source_datas: Vec<Vec<SourceData>> = if options.parallel {
    bundles.par_iter().map(extract).collect()
  } else {
    bundles.iter().map(extract).collect()
  };

  let report = aggregate_source_datas(
    bundles
      .iter()
      .map(|bundle| bundle.script_url.as_str())
      .zip(source_datas),
  );

  tracing::debug!(duplicated = report.len(), "Found duplicated sources");

  Ok(report)
}

/// [`find_duplicated_sources`] with [`DuplicationOptions::default`].
pub fn find_duplicated_sources_with_defaults(bundles: &[Bundle]) -> DuplicateReport {
  let canonicalizer = SourceCanonicalizer::default();

  aggregate_source_datas(bundles.iter().map(|bundle| {
    (
      bundle.script_url.as_str(),
      extract_source_datas(&bundle.map, &bundle.sizes, &canonicalizer),
    )
  }))
}
