use super::config::ConfigError;
use crate::core::io::spectrum::OutputError;
use crate::core::spectral::kgrid::KGridError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to open trajectory '{path}': {source}", path = path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("K-grid generation failed: {0}")]
    Grid(#[from] KGridError),
}
