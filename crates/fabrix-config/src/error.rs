use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read registry file: {0}")]
  Io(#[from] std::io::Error),

  #[error("failed to parse registry: {0}")]
  Parse(#[from] serde_json::Error),

  #[error("primary site '{site}' not found in compute manager registry")]
  UnknownPrimarySite { site: String },

  #[error("no addresses configured for '{kind}' at site '{site}'")]
  EmptySite { kind: String, site: String },
}
