use crate::core::io::lammpstrj::TRAJECTORY_EXTENSION;
use crate::core::io::spectrum::OutputPaths;
use crate::core::models::frame::SpeciesPair;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_PREFIX: &str = "Sk";
pub const DEFAULT_INPUT: &str = "out";
pub const DEFAULT_BINS: usize = 8;
pub const DEFAULT_PRECISION: usize = 4;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Strategy deriving every path of a run from a single input identifier.
///
/// The identifier names the trajectory (`<identifier>.lammpstrj`) and, depending
/// on the strategy, the directory the spectra are written to.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    pub prefix: String,
    pub subdirectory: fn(&str) -> PathBuf,
    pub input_path: fn(&str) -> PathBuf,
}

impl OutputLayout {
    /// Outputs go to the working directory.
    pub fn flat(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            subdirectory: working_directory,
            input_path: trajectory_file,
        }
    }

    /// Outputs go to a directory named after the identifier.
    pub fn run_directory(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            subdirectory: identifier_directory,
            input_path: trajectory_file,
        }
    }

    pub fn resolve(&self, identifier: &str) -> (PathBuf, OutputPaths) {
        let input = (self.input_path)(identifier);
        let directory = (self.subdirectory)(identifier);
        (input, OutputPaths::in_directory(&directory, &self.prefix))
    }
}

fn working_directory(_identifier: &str) -> PathBuf {
    PathBuf::new()
}

fn identifier_directory(identifier: &str) -> PathBuf {
    PathBuf::from(identifier)
}

fn trajectory_file(identifier: &str) -> PathBuf {
    PathBuf::from(format!("{}.{}", identifier, TRAJECTORY_EXTENSION))
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub input_path: PathBuf,
    pub outputs: OutputPaths,
    pub bins: usize,
    pub species: SpeciesPair,
    pub precision: usize,
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    input_path: Option<PathBuf>,
    outputs: Option<OutputPaths>,
    bins: Option<usize>,
    species: Option<SpeciesPair>,
    precision: Option<usize>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_path(mut self, path: impl AsRef<Path>) -> Self {
        self.input_path = Some(path.as_ref().to_path_buf());
        self
    }
    pub fn outputs(mut self, outputs: OutputPaths) -> Self {
        self.outputs = Some(outputs);
        self
    }
    /// Sets both the input path and the outputs from a layout strategy.
    pub fn layout(self, layout: &OutputLayout, identifier: &str) -> Self {
        let (input, outputs) = layout.resolve(identifier);
        self.input_path(input).outputs(outputs)
    }
    pub fn bins(mut self, bins: usize) -> Self {
        self.bins = Some(bins);
        self
    }
    pub fn species(mut self, species: SpeciesPair) -> Self {
        self.species = Some(species);
        self
    }
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        let bins = self.bins.ok_or(ConfigError::MissingParameter("bins"))?;
        if bins == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "bins",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(AnalysisConfig {
            input_path: self
                .input_path
                .ok_or(ConfigError::MissingParameter("input_path"))?,
            outputs: self
                .outputs
                .ok_or(ConfigError::MissingParameter("outputs"))?,
            bins,
            species: self.species.unwrap_or_default(),
            precision: self.precision.unwrap_or(DEFAULT_PRECISION),
        })
    }
}
