use crate::core::io::traits::{LineCursor, TrajectoryFormat};
use crate::core::models::frame::{Frame, SpeciesLabel};
use nalgebra::Vector3;
use std::io::{self, BufRead};
use thiserror::Error;

/// Conventional file extension of LAMMPS text dumps.
pub const TRAJECTORY_EXTENSION: &str = "lammpstrj";

const LEADING_COMMENT_LINES: usize = 3;
const MIN_ATOM_COLUMNS: usize = 5;
const PREALLOCATION_LIMIT: usize = 1 << 20;

#[derive(Debug, Error)]
pub enum LammpsTrjError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("End of input reached before line {line}")]
    EndOfInput { line: usize },
    #[error("Trajectory ended inside a frame, line {line} is missing")]
    UnexpectedEof { line: usize },
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: LammpsTrjParseErrorKind,
    },
}

#[derive(Debug, Error)]
pub enum LammpsTrjParseErrorKind {
    #[error("Invalid atom count (value: '{value}')")]
    InvalidAtomCount { value: String },
    #[error("Box bounds must be exactly '<min> <max>' (found {found} fields)")]
    MalformedBoxBounds { found: usize },
    #[error("Invalid integer for {field} (value: '{value}')")]
    InvalidInt { field: &'static str, value: String },
    #[error("Invalid float for {field} (value: '{value}')")]
    InvalidFloat { field: &'static str, value: String },
    #[error("Atom line needs at least 5 columns (found {found})")]
    TooFewColumns { found: usize },
}

/// Reader for the LAMMPS text dump format (`.lammpstrj`).
///
/// Each frame block is laid out as
///
/// ```text
/// ITEM: TIMESTEP              (ignored)
/// 0                           (ignored)
/// ITEM: NUMBER OF ATOMS       (ignored)
/// 2                           natoms
/// ITEM: BOX BOUNDS pp pp pp   (ignored)
/// 0.0 10.0                    x bounds
/// 0.0 10.0                    y bounds
/// 0.0 10.0                    z bounds
/// ITEM: ATOMS id type x y z   (ignored)
/// 1 1 0.0 0.0 0.0             natoms lines of id, type, x, y, z, ...
/// ```
///
/// Only orthorhombic boxes are understood; the cell length of each axis is
/// `max - min`. Extra columns after `z` are ignored.
pub struct LammpsTrjFile;

impl TrajectoryFormat for LammpsTrjFile {
    type Error = LammpsTrjError;

    fn read_frame<R: BufRead>(cursor: &mut LineCursor<R>) -> Result<Frame, Self::Error> {
        let block_start = cursor.line_number() + 1;
        if cursor.next_line()?.is_none() {
            return Err(LammpsTrjError::EndOfInput { line: block_start });
        }
        for _ in 1..LEADING_COMMENT_LINES {
            required_line(cursor)?;
        }

        let (line, content) = required_line(cursor)?;
        let natoms = parse_atom_count(line, content)?;

        required_line(cursor)?;

        let mut cell = Vector3::zeros();
        for axis in 0..3 {
            let (line, content) = required_line(cursor)?;
            cell[axis] = parse_box_length(line, content)?;
        }

        required_line(cursor)?;

        let capacity = natoms.min(PREALLOCATION_LIMIT);
        let mut species = Vec::with_capacity(capacity);
        let mut positions = Vec::with_capacity(capacity);
        for _ in 0..natoms {
            let (line, content) = required_line(cursor)?;
            let (label, position) = parse_atom_line(line, content)?;
            species.push(label);
            positions.push(position);
        }

        Ok(Frame::new(cell, species, positions))
    }

    fn is_end_of_input(error: &Self::Error) -> bool {
        matches!(error, LammpsTrjError::EndOfInput { .. })
    }
}

fn required_line<R: BufRead>(cursor: &mut LineCursor<R>) -> Result<(usize, &str), LammpsTrjError> {
    let line = cursor.line_number() + 1;
    match cursor.next_line()? {
        Some(content) => Ok((line, content)),
        None => Err(LammpsTrjError::UnexpectedEof { line }),
    }
}

fn parse_atom_count(line: usize, content: &str) -> Result<usize, LammpsTrjError> {
    let value = content.trim();
    value.parse().map_err(|_| LammpsTrjError::Parse {
        line,
        kind: LammpsTrjParseErrorKind::InvalidAtomCount {
            value: value.into(),
        },
    })
}

fn parse_box_length(line: usize, content: &str) -> Result<f64, LammpsTrjError> {
    let fields: Vec<&str> = content.split_whitespace().collect();
    let &[min, max] = fields.as_slice() else {
        return Err(LammpsTrjError::Parse {
            line,
            kind: LammpsTrjParseErrorKind::MalformedBoxBounds {
                found: fields.len(),
            },
        });
    };
    let min = parse_float(line, "box lower bound", min)?;
    let max = parse_float(line, "box upper bound", max)?;
    Ok(max - min)
}

fn parse_atom_line(
    line: usize,
    content: &str,
) -> Result<(SpeciesLabel, Vector3<f64>), LammpsTrjError> {
    let fields: Vec<&str> = content.split_whitespace().collect();
    if fields.len() < MIN_ATOM_COLUMNS {
        return Err(LammpsTrjError::Parse {
            line,
            kind: LammpsTrjParseErrorKind::TooFewColumns {
                found: fields.len(),
            },
        });
    }

    let label: SpeciesLabel = fields[1].parse().map_err(|_| LammpsTrjError::Parse {
        line,
        kind: LammpsTrjParseErrorKind::InvalidInt {
            field: "atom type",
            value: fields[1].into(),
        },
    })?;
    let x = parse_float(line, "x coordinate", fields[2])?;
    let y = parse_float(line, "y coordinate", fields[3])?;
    let z = parse_float(line, "z coordinate", fields[4])?;

    Ok((label, Vector3::new(x, y, z)))
}

fn parse_float(line: usize, field: &'static str, value: &str) -> Result<f64, LammpsTrjError> {
    value.parse().map_err(|_| LammpsTrjError::Parse {
        line,
        kind: LammpsTrjParseErrorKind::InvalidFloat {
            field,
            value: value.into(),
        },
    })
}
