//! Triangle command streams
//!
//! A mesh's triangles are stored as a sequence of runs. Each run starts with a
//! signed 16-bit length: positive for a strip, negative for a fan, zero to end
//! the stream. The length is followed by that many vertex records of four
//! signed 16-bit values each (vertex index, normal index, s, t).

use crate::error::{MdlError, Result};
use crate::reader::ByteView;
use byteorder::{ByteOrder, LittleEndian};

/// Size of one run length or vertex field
const WORD: usize = 2;

/// Size of one vertex record in a run
const VERTEX_RECORD: usize = 4 * WORD;

/// How the vertices of a run form triangles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Strip,
    Fan,
}

/// One vertex reference inside a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriCommand {
    /// Index into the model's vertex table
    pub vertex: i16,
    /// Index into the model's normal table
    pub normal: i16,
    /// Texel column
    pub s: i16,
    /// Texel row
    pub t: i16,
}

/// A strip or fan of vertex references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub kind: RunKind,
    pub vertices: Vec<TriCommand>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    RunHeader,
    InRun { kind: RunKind, remaining: usize },
    Finished,
}

/// Iterator over the runs of one command stream.
///
/// Yields an error and stops if the stream runs off the end of the buffer
/// before its terminating zero.
#[derive(Debug, Clone)]
pub struct CommandReader<'a> {
    view: ByteView<'a>,
    position: i64,
    state: State,
}

impl<'a> CommandReader<'a> {
    pub fn new(view: ByteView<'a>, offset: i32) -> Self {
        Self {
            view,
            position: offset as i64,
            state: State::RunHeader,
        }
    }

    fn take(&mut self, size: usize) -> Result<&'a [u8]> {
        let bytes = self
            .view
            .slice("triangle command", self.position, size)
            .map_err(|_| {
                MdlError::Truncated(format!(
                    "needed {} bytes at offset {}, buffer holds {}",
                    size,
                    self.position,
                    self.view.len()
                ))
            })?;
        self.position += size as i64;
        Ok(bytes)
    }

    fn step(&mut self) -> Result<Option<Run>> {
        loop {
            match self.state {
                State::Finished => return Ok(None),
                State::RunHeader => {
                    let length = LittleEndian::read_i16(self.take(WORD)?);
                    self.state = match length {
                        0 => State::Finished,
                        n if n > 0 => State::InRun {
                            kind: RunKind::Strip,
                            remaining: n as usize,
                        },
                        n => State::InRun {
                            kind: RunKind::Fan,
                            remaining: n.unsigned_abs() as usize,
                        },
                    };
                }
                State::InRun { kind, remaining } => {
                    let bytes = self.take(remaining * VERTEX_RECORD)?;
                    let vertices = bytes
                        .chunks_exact(VERTEX_RECORD)
                        .map(|record| TriCommand {
                            vertex: LittleEndian::read_i16(&record[0..2]),
                            normal: LittleEndian::read_i16(&record[2..4]),
                            s: LittleEndian::read_i16(&record[4..6]),
                            t: LittleEndian::read_i16(&record[6..8]),
                        })
                        .collect();
                    self.state = State::RunHeader;
                    return Ok(Some(Run { kind, vertices }));
                }
            }
        }
    }
}

impl Iterator for CommandReader<'_> {
    type Item = Result<Run>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.step() {
            Ok(run) => run.map(Ok),
            Err(err) => {
                self.state = State::Finished;
                Some(Err(err))
            }
        }
    }
}

/// Appends the triangles of one run to `out`.
///
/// `indices` are the pool indices of the run's vertices in stream order. A fan
/// emits `(v0, v[j-1], v[j])`; a strip emits `(v[j-2], v[j-1], v[j])` for even
/// `j` and `(v[j-1], v[j-2], v[j])` for odd `j` so every triangle keeps the
/// same facing. Runs shorter than three vertices emit nothing.
pub fn triangulate(kind: RunKind, indices: &[u32], out: &mut Vec<u32>) {
    for j in 2..indices.len() {
        let triangle = match kind {
            RunKind::Fan => [indices[0], indices[j - 1], indices[j]],
            RunKind::Strip if j % 2 == 1 => [indices[j - 1], indices[j - 2], indices[j]],
            RunKind::Strip => [indices[j - 2], indices[j - 1], indices[j]],
        };
        out.extend_from_slice(&triangle);
    }
}
