use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "skfactor - Partial structure factors S(k) of coarse-grained lipid/water trajectories.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// Prefix of the output files [default: Sk]
    #[arg(value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Input identifier; the trajectory '<INPUT>.lammpstrj' is analyzed [default: out]
    #[arg(value_name = "INPUT")]
    pub input: Option<String>,

    /// Number of k-grid bins along each axis [default: 8]
    #[arg(value_name = "BINS")]
    pub bins: Option<usize>,

    /// Path to an optional configuration file in TOML format
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Where the spectra are written, relative to the input identifier [default: flat]
    #[arg(long, value_enum, value_name = "LAYOUT")]
    pub layout: Option<LayoutKind>,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Output path strategies selectable from the command line or config file.
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    /// Write outputs to the working directory.
    Flat,
    /// Write outputs to a directory named after the input identifier.
    RunDir,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_arguments_are_all_optional() {
        let cli = Cli::parse_from(["skfactor"]);
        assert!(cli.prefix.is_none());
        assert!(cli.input.is_none());
        assert!(cli.bins.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn positional_arguments_are_read_in_order() {
        let cli = Cli::parse_from(["skfactor", "Sq", "bilayer", "12", "--layout", "run-dir"]);
        assert_eq!(cli.prefix.as_deref(), Some("Sq"));
        assert_eq!(cli.input.as_deref(), Some("bilayer"));
        assert_eq!(cli.bins, Some(12));
        assert_eq!(cli.layout, Some(LayoutKind::RunDir));
    }

    #[test]
    fn non_numeric_bins_are_rejected() {
        assert!(Cli::try_parse_from(["skfactor", "Sk", "out", "eight"]).is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["skfactor", "-q", "-v"]).is_err());
    }
}
