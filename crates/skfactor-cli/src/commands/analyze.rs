use crate::cli::Cli;
use crate::config::PartialAnalysisConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use skfactor::{
    engine::progress::ProgressReporter,
    workflows::{self, structure_factor::AnalysisSummary},
};
use tracing::{info, warn};

pub fn run(cli: &Cli) -> Result<AnalysisSummary> {
    let partial_config = PartialAnalysisConfig::load(cli)?;
    info!("Merging configuration from file and CLI arguments...");
    let final_config = partial_config.merge_with_cli(cli)?;

    if let Some(directory) = final_config.outputs.directory() {
        if !directory.exists() {
            info!("Creating output directory {:?}", directory);
            std::fs::create_dir_all(directory)?;
        }
    }

    println!("Input file: {}", final_config.input_path.display());
    println!("Bins per axis: {}", final_config.bins);

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the structure factor workflow...");
    let summary = workflows::structure_factor::run(&final_config, &reporter)?;

    if summary.frames == 0 {
        warn!("Trajectory contained no complete frame.");
        println!("Warning: no complete frame found in the trajectory.");
    } else {
        println!(
            "Total number of frames: {} ({} k-points each)",
            summary.frames, summary.grid_points
        );
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use clap::Parser;
    use skfactor::engine::error::EngineError;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    const TWO_ATOM_FRAME: &str = "\
ITEM: TIMESTEP
0
ITEM: NUMBER OF ATOMS
2
ITEM: BOX BOUNDS pp pp pp
0.0 10.0
0.0 10.0
0.0 10.0
ITEM: ATOMS id type x y z
1 1 0.0 0.0 0.0
2 2 5.0 5.0 5.0
";

    fn cli_for(identifier: &Path, bins: &str) -> Cli {
        Cli::parse_from([
            "skfactor",
            "Sk",
            identifier.to_str().unwrap(),
            bins,
            "--layout",
            "run-dir",
        ])
    }

    #[test]
    fn run_creates_output_directory_and_writes_every_channel() {
        let temp_dir = tempdir().unwrap();
        let identifier = temp_dir.path().join("bilayer");
        fs::write(
            temp_dir.path().join("bilayer.lammpstrj"),
            TWO_ATOM_FRAME.repeat(2),
        )
        .unwrap();

        let summary = run(&cli_for(&identifier, "1")).unwrap();

        assert_eq!(summary.frames, 2);
        assert_eq!(summary.grid_points, 1);
        for tag in ["II", "IW", "WW"] {
            let content =
                fs::read_to_string(identifier.join(format!("Sk-{}-real.dat", tag))).unwrap();
            assert_eq!(
                content,
                "# Frame No: 1\n1.0000e+00\n# Frame No: 2\n1.0000e+00\n"
            );
        }
        assert!(identifier.join("Sk-kgrid.dat").exists());
    }

    #[test]
    fn missing_trajectory_is_reported_as_input_error() {
        let temp_dir = tempdir().unwrap();
        let identifier = temp_dir.path().join("absent");

        let result = run(&cli_for(&identifier, "2"));

        assert!(matches!(
            result,
            Err(CliError::Engine(EngineError::Input { .. }))
        ));
    }

    #[test]
    fn zero_bins_fails_before_touching_the_filesystem() {
        let temp_dir = tempdir().unwrap();
        let identifier = temp_dir.path().join("bilayer");

        let result = run(&cli_for(&identifier, "0"));

        assert!(matches!(result, Err(CliError::Config(_))));
        assert!(!identifier.exists());
    }
}
