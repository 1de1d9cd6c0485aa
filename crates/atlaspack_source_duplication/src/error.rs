use thiserror::Error;

pub type DuplicationResult<T> = std::result::Result<T, DuplicationError>;

#[derive(Error, Debug)]
pub enum DuplicationError {
  #[error("Invalid duplication option {key}: {reason}")]
  InvalidOption { key: String, reason: String },

  #[error("Failed to parse bundles: {0}")]
  Json(#[from] serde_json::Error),
}

impl DuplicationError {
  pub(crate) fn invalid_option(key: impl Into<String>, reason: impl Into<String>) -> Self {
    Self::InvalidOption {
      key: key.into(),
      reason: reason.into(),
    }
  }
}
