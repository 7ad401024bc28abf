use super::format::format_scientific;
use crate::core::spectral::correlation::{Channel, PartialStructureFactors};
use crate::core::spectral::kgrid::KGrid;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Digits written for the k-grid file, enough to round-trip an `f64`.
pub const KGRID_PRECISION: usize = 18;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to open output file '{path}': {source}", path = path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write record: {0}")]
    Record(#[from] csv::Error),
    #[error("Failed to flush output: {0}")]
    Flush(#[from] io::Error),
}

/// Locations of the four output files of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub self_a: PathBuf,
    pub cross: PathBuf,
    pub self_b: PathBuf,
    pub kgrid: PathBuf,
}

impl OutputPaths {
    /// Standard file names `<prefix>-<tag>-real.dat` and `<prefix>-kgrid.dat`
    /// inside `directory`.
    pub fn in_directory(directory: &Path, prefix: &str) -> Self {
        let channel_path =
            |channel: Channel| directory.join(format!("{}-{}-real.dat", prefix, channel.tag()));
        Self {
            self_a: channel_path(Channel::SelfA),
            cross: channel_path(Channel::Cross),
            self_b: channel_path(Channel::SelfB),
            kgrid: directory.join(format!("{}-kgrid.dat", prefix)),
        }
    }

    pub fn channel(&self, channel: Channel) -> &Path {
        match channel {
            Channel::SelfA => &self.self_a,
            Channel::Cross => &self.cross,
            Channel::SelfB => &self.self_b,
        }
    }

    /// Directory holding the outputs, `None` for the working directory.
    pub fn directory(&self) -> Option<&Path> {
        self.self_a
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
    }
}

/// Opens `path` for appending, creating it when missing. Existing content is
/// never truncated.
pub fn open_append(path: &Path) -> Result<File, OutputError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| OutputError::Open {
            path: path.to_path_buf(),
            source,
        })
}

/// Space-delimited, unquoted, newline-terminated rows of varying length.
pub fn record_writer<W: Write>(inner: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .delimiter(b' ')
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .has_headers(false)
        .flexible(true)
        .from_writer(inner)
}

/// Writes one `# Frame No: <n>` comment line followed by one line of values.
pub fn write_frame_block<W: Write>(
    writer: &mut csv::Writer<W>,
    frame_number: usize,
    values: &[f64],
    precision: usize,
) -> Result<(), OutputError> {
    writer.write_record([format!("# Frame No: {}", frame_number)])?;
    writer.write_record(values.iter().map(|v| format_scientific(*v, precision)))?;
    Ok(())
}

/// Writes the scaled k-grid, one `x y z` point per line.
pub fn write_kgrid_rows<W: Write>(
    writer: &mut csv::Writer<W>,
    grid: &KGrid,
) -> Result<(), OutputError> {
    for k in grid.scaled() {
        writer.write_record(k.iter().map(|c| format_scientific(*c, KGRID_PRECISION)))?;
    }
    Ok(())
}

/// Appends the scaled k-grid to the file at `path`.
pub fn append_kgrid(path: &Path, grid: &KGrid) -> Result<(), OutputError> {
    let mut writer = record_writer(open_append(path)?);
    write_kgrid_rows(&mut writer, grid)?;
    writer.flush()?;
    Ok(())
}

/// Owns the three channel files for the lifetime of a run.
pub struct SpectrumWriter {
    channels: Vec<(Channel, csv::Writer<File>)>,
    precision: usize,
}

impl SpectrumWriter {
    /// Opens (or creates) every channel file in append mode.
    pub fn open(paths: &OutputPaths, precision: usize) -> Result<Self, OutputError> {
        let mut channels = Vec::with_capacity(Channel::ALL.len());
        for channel in Channel::ALL {
            let file = open_append(paths.channel(channel))?;
            channels.push((channel, record_writer(file)));
        }
        Ok(Self {
            channels,
            precision,
        })
    }

    /// Appends one record block per channel and flushes them to disk.
    pub fn write_frame(
        &mut self,
        frame_number: usize,
        spectra: &PartialStructureFactors,
    ) -> Result<(), OutputError> {
        for (channel, writer) in &mut self.channels {
            write_frame_block(
                writer,
                frame_number,
                &spectra.real_parts(*channel),
                self.precision,
            )?;
            writer.flush()?;
        }
        Ok(())
    }
}
