use crate::core::models::frame::Frame;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::marker::PhantomData;
use std::path::Path;

/// A line-oriented reader that remembers how many lines it has consumed.
///
/// Line terminators (`\n` or `\r\n`) are stripped from every returned line.
pub struct LineCursor<R> {
    reader: R,
    buffer: String,
    line_number: usize,
}

impl<R: BufRead> LineCursor<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::new(),
            line_number: 0,
        }
    }

    /// Reads the next line, or `None` once the underlying stream is exhausted.
    pub fn next_line(&mut self) -> io::Result<Option<&str>> {
        self.buffer.clear();
        if self.reader.read_line(&mut self.buffer)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        Ok(Some(self.buffer.trim_end_matches(['\n', '\r'])))
    }

    /// 1-based number of the last line returned by [`Self::next_line`].
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

/// Defines the interface for reading frame-structured trajectory files.
///
/// Implementors parse exactly one frame block per call, leaving the cursor at the
/// start of the next block.
pub trait TrajectoryFormat {
    /// The error type for a failed frame read.
    type Error: Error + From<io::Error>;

    /// Reads the next frame from the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error when the stream is exhausted or the block is malformed.
    fn read_frame<R: BufRead>(cursor: &mut LineCursor<R>) -> Result<Frame, Self::Error>;

    /// Whether `error` marks a clean end of input at a frame boundary.
    fn is_end_of_input(error: &Self::Error) -> bool;
}

/// Iterates over the frames of a trajectory until the first failed read.
///
/// The failure that ended iteration is kept and can be inspected through
/// [`Self::termination`]. No attempt is made to resynchronize after a malformed
/// frame.
pub struct TrajectoryReader<R, F: TrajectoryFormat> {
    cursor: LineCursor<R>,
    termination: Option<F::Error>,
    frames_read: usize,
    _format: PhantomData<fn() -> F>,
}

impl<R: BufRead, F: TrajectoryFormat> TrajectoryReader<R, F> {
    pub fn new(reader: R) -> Self {
        Self {
            cursor: LineCursor::new(reader),
            termination: None,
            frames_read: 0,
            _format: PhantomData,
        }
    }

    pub fn termination(&self) -> Option<&F::Error> {
        self.termination.as_ref()
    }

    pub fn frames_read(&self) -> usize {
        self.frames_read
    }
}

impl<F: TrajectoryFormat> TrajectoryReader<BufReader<File>, F> {
    /// Opens a trajectory file for reading.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead, F: TrajectoryFormat> Iterator for TrajectoryReader<R, F> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.termination.is_some() {
            return None;
        }
        match F::read_frame(&mut self.cursor) {
            Ok(frame) => {
                self.frames_read += 1;
                Some(frame)
            }
            Err(e) => {
                self.termination = Some(e);
                None
            }
        }
    }
}
