use serde::Deserialize;

use crate::error::{DuplicationError, DuplicationResult};

pub const DEFAULT_DEPENDENCY_MARKER: &str = "node_modules";

const PARALLEL_ENV: &str = "ATLASPACK_DUPLICATION_PARALLEL";
const IGNORE_ENV: &str = "ATLASPACK_DUPLICATION_IGNORE";

/// Controls how sources are canonicalized and how bundles are processed.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct DuplicationOptions {
  /// Directory name that installed dependencies live under. Paths are
  /// collapsed to start at its last occurrence.
  pub dependency_marker: String,
  /// Substrings that mark a source as bundler overhead, in addition to the
  /// built-in webpack patterns.
  pub ignore_patterns: Vec<String>,
  /// Extract each bundle's sources on the rayon thread pool.
  pub parallel: bool,
}

impl Default for DuplicationOptions {
  fn default() -> Self {
    Self {
      dependency_marker: String::from(DEFAULT_DEPENDENCY_MARKER),
      ignore_patterns: Vec::new(),
      parallel: false,
    }
  }
}

impl DuplicationOptions {
  /// Default options overridden by `ATLASPACK_DUPLICATION_PARALLEL` and
  /// `ATLASPACK_DUPLICATION_IGNORE` (comma separated).
  pub fn from_env() -> DuplicationResult<Self> {
    Self::from_vars(
      std::env::var(PARALLEL_ENV).ok().as_deref(),
      std::env::var(IGNORE_ENV).ok().as_deref(),
    )
  }

  fn from_vars(parallel: Option<&str>, ignore: Option<&str>) -> DuplicationResult<Self> {
    let mut options = Self::default();

    if let Some(value) = parallel {
      options.parallel = match value.trim() {
        "true" | "1" => true,
        "false" | "0" | "" => false,
        value => {
          return Err(DuplicationError::invalid_option(
            PARALLEL_ENV,
            format!("Invalid value: {}", value),
          ))
        }
      };
    }

    if let Some(value) = ignore {
      options.ignore_patterns = value
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    }

    options.validate()?;
    Ok(options)
  }

  pub fn validate(&self) -> DuplicationResult<()> {
    if self.dependency_marker.is_empty() {
      return Err(DuplicationError::invalid_option(
        "dependencyMarker",
        "must not be empty",
      ));
    }

    if self.ignore_patterns.iter().any(|p| p.is_empty()) {
      // An empty pattern would match every source
      return Err(DuplicationError::invalid_option(
        "ignorePatterns",
        "must not contain empty patterns",
      ));
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn defaults_when_no_vars_are_set() {
    assert_eq!(
      DuplicationOptions::from_vars(None, None).unwrap(),
      DuplicationOptions::default()
    );
  }

  #[test]
  fn reads_parallel_flag() {
    assert!(
      DuplicationOptions::from_vars(Some("true"), None)
        .unwrap()
        .parallel
    );
    assert!(DuplicationOptions::from_vars(Some("1"), None).unwrap().parallel);
    assert!(!DuplicationOptions::from_vars(Some("0"), None).unwrap().parallel);
  }

  #[test]
  fn rejects_invalid_parallel_flag() {
    let error = DuplicationOptions::from_vars(Some("sometimes"), None).unwrap_err();
    assert_eq!(
      error.to_string(),
      "Invalid duplication option ATLASPACK_DUPLICATION_PARALLEL: Invalid value: sometimes"
    );
  }

  #[test]
  fn reads_ignore_patterns() {
    let options =
      DuplicationOptions::from_vars(None, Some(" rollupPluginBabelHelpers, ,polyfill-")).unwrap();
    assert_eq!(
      options.ignore_patterns,
      vec![
        String::from("rollupPluginBabelHelpers"),
        String::from("polyfill-")
      ]
    );
  }

  #[test]
  fn validate_rejects_empty_marker() {
    let options = DuplicationOptions {
      dependency_marker: String::new(),
      ..Default::default()
    };
    assert!(matches!(
      options.validate(),
      Err(DuplicationError::InvalidOption { key, .. }) if key == "dependencyMarker"
    ));
  }

  #[test]
  fn validate_rejects_empty_ignore_pattern() {
    let options = DuplicationOptions {
      ignore_patterns: vec![String::new()],
      ..Default::default()
    };
    assert!(options.validate().is_err());
  }

  #[test]
  fn deserializes_partial_json() {
    let options: DuplicationOptions =
      serde_json::from_str(r#"{ "parallel": true, "ignorePatterns": ["\u0000commonjs"] }"#)
        .unwrap();
    assert_eq!(
      options,
      DuplicationOptions {
        dependency_marker: String::from("node_modules"),
        ignore_patterns: vec![String::from("\0commonjs")],
        parallel: true,
      }
    );
  }
}
