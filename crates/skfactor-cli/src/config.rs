pub mod defaults;

use crate::cli::{Cli, LayoutKind};
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use serde::Deserialize;
use skfactor::core::models::frame::SpeciesPair;
use skfactor::engine::config as core_config;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialGridConfig {
    bins: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialOutputConfig {
    prefix: Option<String>,
    precision: Option<usize>,
    layout: Option<LayoutKind>,
}

/// Analysis settings as read from a TOML file; every field may be omitted.
///
/// ```toml
/// input = "out"
///
/// [grid]
/// bins = 8
///
/// [species]
/// a = 1
/// b = 2
///
/// [output]
/// prefix = "Sk"
/// precision = 4
/// layout = "run-dir"
/// ```
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialAnalysisConfig {
    input: Option<String>,
    grid: Option<PartialGridConfig>,
    species: Option<SpeciesPair>,
    output: Option<PartialOutputConfig>,
}

impl PartialAnalysisConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads the file named by `--config`, or starts empty.
    pub fn load(cli: &Cli) -> Result<Self> {
        match &cli.config {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolves the final configuration: command line over file over defaults.
    pub fn merge_with_cli(self, cli: &Cli) -> Result<core_config::AnalysisConfig> {
        let defaults = DefaultsConfig::default();
        let grid = self.grid.unwrap_or_default();
        let output = self.output.unwrap_or_default();

        let prefix = cli
            .prefix
            .clone()
            .or(output.prefix)
            .unwrap_or(defaults.prefix);
        let identifier = cli.input.clone().or(self.input).unwrap_or(defaults.input);
        let layout = match cli.layout.or(output.layout).unwrap_or(defaults.layout) {
            LayoutKind::Flat => core_config::OutputLayout::flat(prefix),
            LayoutKind::RunDir => core_config::OutputLayout::run_directory(prefix),
        };
        debug!("Resolved layout {:?} for input '{}'", layout, identifier);

        core_config::AnalysisConfigBuilder::new()
            .layout(&layout, &identifier)
            .bins(cli.bins.or(grid.bins).unwrap_or(defaults.bins))
            .species(self.species.unwrap_or_default())
            .precision(output.precision.unwrap_or(defaults.precision))
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use once_cell::sync::Lazy;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    static TEST_DIR: Lazy<TempDir> = Lazy::new(|| tempdir().expect("Failed to create temp dir"));

    fn write_config_file(name: &str, content: &str) -> PathBuf {
        let file_path = TEST_DIR.path().join(name);
        fs::write(&file_path, content).unwrap();
        file_path
    }

    fn resolve(args: &[&str]) -> Result<core_config::AnalysisConfig> {
        let cli = Cli::parse_from(args);
        PartialAnalysisConfig::load(&cli)?.merge_with_cli(&cli)
    }

    #[test]
    fn defaults_match_the_classic_invocation() {
        let config = resolve(&["skfactor"]).unwrap();
        assert_eq!(config.input_path, PathBuf::from("out.lammpstrj"));
        assert_eq!(config.outputs.self_a, PathBuf::from("Sk-II-real.dat"));
        assert_eq!(config.outputs.kgrid, PathBuf::from("Sk-kgrid.dat"));
        assert_eq!(config.bins, 8);
        assert_eq!(config.precision, 4);
        assert_eq!(config.species, SpeciesPair { a: 1, b: 2 });
    }

    #[test]
    fn file_values_override_defaults() {
        let path = write_config_file(
            "file_values.toml",
            r#"
            input = "membrane"

            [grid]
            bins = 5

            [species]
            b = 4

            [output]
            prefix = "Sq"
            precision = 6
            layout = "run-dir"
            "#,
        );
        let config = resolve(&["skfactor", "-c", path.to_str().unwrap()]).unwrap();

        assert_eq!(config.input_path, PathBuf::from("membrane.lammpstrj"));
        assert_eq!(config.outputs.cross, PathBuf::from("membrane/Sq-IW-real.dat"));
        assert_eq!(config.bins, 5);
        assert_eq!(config.precision, 6);
        assert_eq!(config.species, SpeciesPair { a: 1, b: 4 });
    }

    #[test]
    fn command_line_overrides_file_values() {
        let path = write_config_file(
            "overridden.toml",
            r#"
            input = "membrane"
            [grid]
            bins = 5
            [output]
            prefix = "Sq"
            layout = "run-dir"
            "#,
        );
        let config = resolve(&[
            "skfactor",
            "Sk",
            "water",
            "3",
            "--layout",
            "flat",
            "--config",
            path.to_str().unwrap(),
        ])
        .unwrap();

        assert_eq!(config.input_path, PathBuf::from("water.lammpstrj"));
        assert_eq!(config.outputs.self_b, PathBuf::from("Sk-WW-real.dat"));
        assert_eq!(config.bins, 3);
    }

    #[test]
    fn zero_bins_is_a_configuration_error() {
        let result = resolve(&["skfactor", "Sk", "out", "0"]);
        assert!(matches!(result, Err(CliError::Config(_))));
        if let Err(CliError::Config(msg)) = result {
            assert!(msg.contains("bins"));
        }
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let path = write_config_file("unknown.toml", "[grid]\nbins = 4\nshells = 2\n");
        let result = resolve(&["skfactor", "-c", path.to_str().unwrap()]);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let path = TEST_DIR.path().join("does-not-exist.toml");
        let result = resolve(&["skfactor", "-c", path.to_str().unwrap()]);
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
