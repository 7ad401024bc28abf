use crate::core::io::lammpstrj::LammpsTrjFile;
use crate::core::io::spectrum::{SpectrumWriter, append_kgrid};
use crate::core::io::traits::{TrajectoryFormat, TrajectoryReader};
use crate::core::models::frame::{Frame, SpeciesPair};
use crate::core::spectral::correlation::PartialStructureFactors;
use crate::core::spectral::kgrid::KGrid;
use crate::core::spectral::transform::SpeciesDensity;
use crate::engine::config::AnalysisConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::io::BufRead;
use std::time::Instant;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisSummary {
    pub frames: usize,
    pub grid_points: usize,
}

/// Computes the three partial structure factors of one frame.
pub fn analyze_frame(frame: &Frame, grid: &KGrid, species: SpeciesPair) -> PartialStructureFactors {
    let a = SpeciesDensity::from_frame(frame, species.a, grid);
    let b = SpeciesDensity::from_frame(frame, species.b, grid);
    debug!(
        species_a = a.count(),
        species_b = b.count(),
        "Transformed species densities."
    );
    PartialStructureFactors::compute(&a, &b)
}

/// Runs the analysis described by `config` over the whole trajectory.
///
/// Channel files are opened (and created if needed) before the first frame is
/// read. The loop ends at the first frame that cannot be read; this is the normal
/// way a run finishes and is not reported as an error.
///
/// # Errors
///
/// Fails if the trajectory cannot be opened or an output cannot be written.
#[instrument(skip_all, name = "structure_factor_workflow")]
pub fn run(
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> Result<AnalysisSummary, EngineError> {
    info!("Reading trajectory from {:?}", config.input_path);
    let frames = TrajectoryReader::<_, LammpsTrjFile>::open(&config.input_path).map_err(
        |source| EngineError::Input {
            path: config.input_path.clone(),
            source,
        },
    )?;
    let mut writer = SpectrumWriter::open(&config.outputs, config.precision)?;
    info!("Using {} bins per axis.", config.bins);

    process_frames(frames, &mut writer, config, reporter)
}

/// The frame loop: read, transform, write, until the reader gives up.
///
/// The k-grid is built from the first frame's cell, appended to the k-grid file,
/// and reused unchanged for every later frame.
pub fn process_frames<R: BufRead, F: TrajectoryFormat>(
    mut frames: TrajectoryReader<R, F>,
    writer: &mut SpectrumWriter,
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> Result<AnalysisSummary, EngineError> {
    let Some(first) = frames.next() else {
        log_termination(&frames);
        return Ok(AnalysisSummary {
            frames: 0,
            grid_points: 0,
        });
    };

    reporter.report(Progress::PhaseStart {
        name: "Building k-grid",
    });
    let grid = KGrid::new(first.cell(), config.bins)?;
    info!(
        volume = first.volume(),
        points = grid.len(),
        "Initialized k-grid from the first frame."
    );
    append_kgrid(&config.outputs.kgrid, &grid)?;
    reporter.report(Progress::GridReady { points: grid.len() });
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Analyzing frames",
    });
    let mut frame_number = 0;
    for frame in std::iter::once(first).chain(frames.by_ref()) {
        frame_number += 1;
        reporter.report(Progress::FrameStart {
            frame: frame_number,
        });
        let started = Instant::now();

        let spectra = analyze_frame(&frame, &grid, config.species);
        debug!(
            frame = frame_number,
            atoms = frame.natoms(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Computed partial structure factors."
        );

        writer.write_frame(frame_number, &spectra)?;
        reporter.report(Progress::FrameFinish {
            frame: frame_number,
        });
    }
    reporter.report(Progress::PhaseFinish);

    log_termination(&frames);
    info!("Processed {} frame(s).", frame_number);
    Ok(AnalysisSummary {
        frames: frame_number,
        grid_points: grid.len(),
    })
}

fn log_termination<R: BufRead, F: TrajectoryFormat>(frames: &TrajectoryReader<R, F>) {
    match frames.termination() {
        Some(reason) if F::is_end_of_input(reason) => debug!("Reached end of trajectory."),
        Some(reason) => debug!("Stopped reading trajectory: {}", reason),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::spectrum::OutputPaths;
    use crate::engine::config::AnalysisConfigBuilder;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn frame_text(cell: [f64; 3], atoms: &[(i64, [f64; 3])]) -> String {
        let mut text = format!(
            "ITEM: TIMESTEP\n0\nITEM: NUMBER OF ATOMS\n{}\nITEM: BOX BOUNDS pp pp pp\n",
            atoms.len()
        );
        for length in cell {
            text.push_str(&format!("0.0 {}\n", length));
        }
        text.push_str("ITEM: ATOMS id type x y z\n");
        for (id, (label, [x, y, z])) in atoms.iter().enumerate() {
            text.push_str(&format!("{} {} {} {} {}\n", id + 1, label, x, y, z));
        }
        text
    }

    struct Fixture {
        dir: TempDir,
        config: AnalysisConfig,
    }

    impl Fixture {
        fn new(trajectory: &str, bins: usize) -> Self {
            let dir = tempfile::tempdir().expect("Failed to create temp dir");
            let config = AnalysisConfigBuilder::new()
                .input_path(dir.path().join("out.lammpstrj"))
                .outputs(OutputPaths::in_directory(dir.path(), "Sk"))
                .bins(bins)
                .build()
                .unwrap();
            fs::write(&config.input_path, trajectory).unwrap();
            Self { dir, config }
        }

        fn run(&self) -> AnalysisSummary {
            run(&self.config, &ProgressReporter::new()).unwrap()
        }

        fn read(&self, path: &Path) -> String {
            fs::read_to_string(path).unwrap()
        }
    }

    #[test]
    fn two_particle_single_bin_example_gives_unit_spectra() {
        let trajectory = frame_text([2.0, 2.0, 2.0], &[(1, [0.0, 0.0, 0.0]), (2, [1.0, 1.0, 1.0])]);
        let fixture = Fixture::new(&trajectory, 1);

        let summary = fixture.run();

        assert_eq!(
            summary,
            AnalysisSummary {
                frames: 1,
                grid_points: 1
            }
        );
        for path in [
            &fixture.config.outputs.self_a,
            &fixture.config.outputs.cross,
            &fixture.config.outputs.self_b,
        ] {
            assert_eq!(fixture.read(path), "# Frame No: 1\n1.0000e+00\n");
        }
        assert_eq!(
            fixture.read(&fixture.config.outputs.kgrid),
            "0.000000000000000000e+00 0.000000000000000000e+00 0.000000000000000000e+00\n"
        );
    }

    #[test]
    fn single_species_frame_writes_nan_cross_spectrum() {
        let trajectory = frame_text(
            [4.0, 4.0, 4.0],
            &[(1, [0.0, 1.0, 2.0]), (1, [3.0, 2.0, 1.0]), (1, [1.5, 0.5, 2.5])],
        );
        let fixture = Fixture::new(&trajectory, 2);
        fixture.run();

        let cross = fixture.read(&fixture.config.outputs.cross);
        let values: Vec<&str> = cross.lines().nth(1).unwrap().split(' ').collect();
        assert_eq!(values.len(), 8);
        assert!(values.iter().all(|v| *v == "nan"));

        let self_a = fixture.read(&fixture.config.outputs.self_a);
        assert!(self_a.lines().nth(1).unwrap().starts_with("3.0000e+00 "));
    }

    #[test]
    fn identical_frames_produce_identical_records() {
        let frame = frame_text(
            [5.0, 6.0, 7.0],
            &[(1, [0.3, 1.2, 4.4]), (2, [2.5, 5.1, 0.7]), (2, [4.9, 0.2, 3.3])],
        );
        let fixture = Fixture::new(&format!("{frame}{frame}"), 3);
        assert_eq!(fixture.run().frames, 2);

        for path in [
            &fixture.config.outputs.self_a,
            &fixture.config.outputs.cross,
            &fixture.config.outputs.self_b,
        ] {
            let content = fixture.read(path);
            let lines: Vec<&str> = content.lines().collect();
            assert_eq!(lines.len(), 4);
            assert_eq!(lines[0], "# Frame No: 1");
            assert_eq!(lines[2], "# Frame No: 2");
            assert_eq!(lines[1], lines[3]);
        }
    }

    #[test]
    fn rerunning_appends_instead_of_truncating() {
        let frame = frame_text([3.0, 3.0, 3.0], &[(1, [0.5, 0.5, 0.5]), (2, [1.5, 2.0, 2.5])]);
        let fixture = Fixture::new(&format!("{frame}{frame}{frame}"), 2);

        fixture.run();
        let first = fixture.read(&fixture.config.outputs.self_b);
        fixture.run();
        let second = fixture.read(&fixture.config.outputs.self_b);

        assert_eq!(first.lines().count(), 6);
        assert_eq!(second.lines().count(), 12);
        assert!(second.starts_with(&first));
        assert_eq!(
            fixture.read(&fixture.config.outputs.kgrid).lines().count(),
            16
        );
    }

    #[test]
    fn grid_is_built_once_from_the_first_frame() {
        let first = frame_text([2.0, 2.0, 2.0], &[(1, [0.0, 0.0, 0.0]), (2, [1.0, 1.0, 1.0])]);
        let second = frame_text([8.0, 8.0, 8.0], &[(1, [0.0, 0.0, 0.0]), (2, [4.0, 4.0, 4.0])]);
        let fixture = Fixture::new(&format!("{first}{second}"), 2);
        fixture.run();

        let kgrid = fixture.read(&fixture.config.outputs.kgrid);
        let lines: Vec<&str> = kgrid.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(
            lines[7],
            "5.000000000000000000e-01 5.000000000000000000e-01 5.000000000000000000e-01"
        );

        // Same scaled configuration in both frames, so the spectra agree.
        let cross = fixture.read(&fixture.config.outputs.cross);
        let lines: Vec<&str> = cross.lines().collect();
        assert_eq!(lines[1], lines[3]);
    }

    #[test]
    fn truncated_final_frame_is_silently_dropped() {
        let frame = frame_text([3.0, 3.0, 3.0], &[(1, [0.5, 0.5, 0.5]), (2, [1.5, 2.0, 2.5])]);
        let partial: String = frame.lines().take(10).map(|l| format!("{l}\n")).collect();
        let fixture = Fixture::new(&format!("{frame}{partial}"), 2);

        let summary = fixture.run();

        assert_eq!(summary.frames, 1);
        assert_eq!(fixture.read(&fixture.config.outputs.self_a).lines().count(), 2);
    }

    #[test]
    fn empty_trajectory_creates_channel_files_but_no_grid() {
        let fixture = Fixture::new("", 4);

        let summary = fixture.run();

        assert_eq!(
            summary,
            AnalysisSummary {
                frames: 0,
                grid_points: 0
            }
        );
        assert_eq!(fixture.read(&fixture.config.outputs.self_a), "");
        assert!(!fixture.config.outputs.kgrid.exists());
    }

    #[test]
    fn missing_trajectory_is_an_input_error() {
        let fixture = Fixture::new("", 2);
        let mut config = fixture.config.clone();
        config.input_path = fixture.dir.path().join("absent.lammpstrj");

        let result = run(&config, &ProgressReporter::new());

        assert!(matches!(result, Err(EngineError::Input { .. })));
    }

    #[test]
    fn progress_events_cover_every_frame() {
        use std::sync::Mutex;

        let frame = frame_text([3.0, 3.0, 3.0], &[(1, [0.5, 0.5, 0.5]), (2, [1.5, 2.0, 2.5])]);
        let fixture = Fixture::new(&format!("{frame}{frame}"), 1);
        let finished = Mutex::new(Vec::new());
        {
            let reporter = ProgressReporter::with_callback(Box::new(|event| {
                if let Progress::FrameFinish { frame } = event {
                    finished.lock().unwrap().push(frame);
                }
            }));
            run(&fixture.config, &reporter).unwrap();
        }
        assert_eq!(finished.into_inner().unwrap(), vec![1, 2]);
    }
}
