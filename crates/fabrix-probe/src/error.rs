use fabrix_config::ConfigError;
use thiserror::Error;

/// Errors raised while turning a registry into runnable steps.
///
/// These precede the run; they are CLI errors, not workflow failures.
#[derive(Debug, Error)]
pub enum SetupError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error("failed to build http client: {0}")]
  Client(#[from] reqwest::Error),
}
