use crate::options::{DuplicationOptions, DEFAULT_DEPENDENCY_MARKER};

/// Substrings identifying code the bundler injects into every bundle.
const BUNDLER_OVERHEAD_PATTERNS: [&str; 3] = [
  // webpack runtime preamble
  "webpack/bootstrap",
  // webpack build-in shims (module, global, ...)
  "(webpack)/buildin",
  // placeholders for `externals`, e.g. `webpack:///external "react"`
  "external ",
];

/// Normalizes source map `sources` entries so the same original file can be
/// recognized across bundles.
#[derive(Clone, Debug)]
pub struct SourceCanonicalizer {
  dependency_marker: String,
  extra_ignore_patterns: Vec<String>,
}

impl Default for SourceCanonicalizer {
  fn default() -> Self {
    Self {
      dependency_marker: String::from(DEFAULT_DEPENDENCY_MARKER),
      extra_ignore_patterns: Vec::new(),
    }
  }
}

impl SourceCanonicalizer {
  pub fn new(options: &DuplicationOptions) -> Self {
    Self {
      dependency_marker: options.dependency_marker.clone(),
      extra_ignore_patterns: options.ignore_patterns.clone(),
    }
  }

  /// Drops a single trailing `?` and collapses dependency paths so that only
  /// the innermost `node_modules/<package>` remains.
  ///
  /// `node_modules/a/node_modules/b/index.js` becomes `node_modules/b/index.js`.
  pub fn canonicalize(&self, source: &str) -> String {
    // webpack appends a bare query marker to some module paths
    let source = source.strip_suffix('?').unwrap_or(source);

    match source.rfind(self.dependency_marker.as_str()) {
      Some(index) => source[index..].to_string(),
      None => source.to_string(),
    }
  }

  /// Whether the source is bundler overhead rather than application or
  /// dependency code.
  pub fn should_ignore(&self, source: &str) -> bool {
    BUNDLER_OVERHEAD_PATTERNS
      .iter()
      .any(|pattern| source.contains(pattern))
      || self
        .extra_ignore_patterns
        .iter()
        .any(|pattern| source.contains(pattern.as_str()))
  }
}

/// [`SourceCanonicalizer::canonicalize`] with the default dependency marker.
pub fn canonicalize_source(source: &str) -> String {
  SourceCanonicalizer::default().canonicalize(source)
}

/// [`SourceCanonicalizer::should_ignore`] with the built-in patterns only.
pub fn should_ignore_source(source: &str) -> bool {
  SourceCanonicalizer::default().should_ignore(source)
}
