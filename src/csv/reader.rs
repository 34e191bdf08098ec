//! Line-oriented, forward-only reader for CSV test files.
//!
//! The reader hands out one logical line per call, in file order, with the
//! line terminator stripped. It never splits fields; that is the record
//! interpreter's job. Memory use is bounded by the configured line limit: an
//! overlong line is reported as [`CalcError::LineTooLong`] and the rest of it
//! is skipped without being buffered.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
    sync::Arc,
};

use log::debug;

use crate::diagnostics::CalcError;

/// Default maximum line length in bytes, terminator excluded.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 1024;

/// One physical line of the input, terminator removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// Name of the file (or other source) the line came from.
    pub origin: Arc<str>,
    /// 1-based line number.
    pub number: usize,
    pub text: String,
}

impl RawLine {
    /// A line holding nothing but whitespace is not a test record.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Outcome of pulling one line out of the underlying buffer.
#[derive(Debug, PartialEq, Eq)]
enum LineRead {
    Eof,
    Line,
    TooLong,
}

/// Forward-only CSV line reader.
///
/// The reader owns its source until [`close`](CsvReader::close) is called or it
/// is dropped. Once closed, or after an I/O failure, every further read
/// returns `Ok(None)`.
#[derive(Debug)]
pub struct CsvReader<R> {
    origin: Arc<str>,
    inner: Option<R>,
    line_number: usize,
    max_line_length: usize,
    buf: Vec<u8>,
}

impl CsvReader<BufReader<File>> {
    /// Opens `path` for reading.
    pub fn open<P: AsRef<Path>>(path: P, max_line_length: usize) -> Result<Self, CalcError> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let file = File::open(path).map_err(|source| CalcError::FileOpen {
            path: name.clone(),
            source,
        })?;
        debug!("opened {name}");
        Ok(Self::from_reader(name, BufReader::new(file), max_line_length))
    }
}

impl<R: BufRead> CsvReader<R> {
    /// Wraps any buffered source; `name` is used in diagnostics.
    pub fn from_reader(name: impl Into<String>, reader: R, max_line_length: usize) -> Self {
        let name: String = name.into();
        Self {
            origin: Arc::from(name),
            inner: Some(reader),
            line_number: 0,
            max_line_length,
            buf: Vec::with_capacity(max_line_length.min(DEFAULT_MAX_LINE_LENGTH) + 1),
        }
    }

    pub fn name(&self) -> &str {
        &self.origin
    }

    /// Number of lines consumed so far (the last line returned, or 0).
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }

    /// Releases the underlying source. Safe to call more than once.
    pub fn close(&mut self) {
        if self.inner.take().is_some() {
            debug!("closed {} after {} lines", self.origin, self.line_number);
        }
    }

    /// Consumes the header line without looking at its content.
    ///
    /// The reader must still be positioned at the start of its source; a
    /// reader that has already produced lines cannot serve another run.
    pub fn read_header(&mut self) -> Result<(), CalcError> {
        if self.line_number != 0 {
            return Err(CalcError::invalid_input(format!(
                "'{}' is already past its header (line {}); reopen the file for a new run",
                self.origin, self.line_number
            )));
        }
        match self.read_line() {
            Ok(Some(_)) => Ok(()),
            // An overlong header is still a header.
            Err(CalcError::LineTooLong { .. }) => Ok(()),
            Ok(None) => Err(CalcError::EmptyFile {
                path: self.origin.to_string(),
            }),
            Err(e) => Err(e),
        }
    }

    /// Returns the next line, `Ok(None)` at end of input.
    ///
    /// A [`CalcError::LineTooLong`] only concerns that one line; the reader
    /// stays usable and the next call returns the following line. Any other
    /// error closes the reader.
    pub fn read_line(&mut self) -> Result<Option<RawLine>, CalcError> {
        let Some(inner) = self.inner.as_mut() else {
            return Ok(None);
        };

        let outcome = match read_raw_line(inner, &mut self.buf, self.max_line_length) {
            Ok(outcome) => outcome,
            Err(source) => {
                let line = self.line_number;
                self.close();
                return Err(CalcError::Read {
                    path: self.origin.to_string(),
                    line,
                    source,
                });
            }
        };

        match outcome {
            LineRead::Eof => Ok(None),
            LineRead::TooLong => {
                self.line_number += 1;
                Err(CalcError::LineTooLong {
                    line: self.line_number,
                    limit: self.max_line_length,
                })
            }
            LineRead::Line => {
                self.line_number += 1;
                Ok(Some(RawLine {
                    origin: Arc::clone(&self.origin),
                    number: self.line_number,
                    text: String::from_utf8_lossy(&self.buf).into_owned(),
                }))
            }
        }
    }
}

impl<R: BufRead> Iterator for CsvReader<R> {
    type Item = Result<RawLine, CalcError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_line().transpose()
    }
}

/// Reads up to and including the next `\n`, leaving the content (without
/// `\n` or `\r\n`) in `buf`. Stops buffering once the content exceeds `limit`
/// but keeps consuming until the terminator.
fn read_raw_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>, limit: usize) -> io::Result<LineRead> {
    buf.clear();
    let mut consumed_any = false;
    let mut overflow = false;

    loop {
        let (used, terminated) = {
            let available = match reader.fill_buf() {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                break;
            }
            let (chunk, used, terminated) = match available.iter().position(|&b| b == b'\n') {
                Some(i) => (&available[..i], i + 1, true),
                None => (available, available.len(), false),
            };
            if !overflow {
                // One spare byte so a trailing '\r' of an exactly-full line survives.
                let room = limit.saturating_add(1).saturating_sub(buf.len());
                if chunk.len() > room {
                    overflow = true;
                    buf.clear();
                } else {
                    buf.extend_from_slice(chunk);
                }
            }
            (used, terminated)
        };
        reader.consume(used);
        consumed_any = true;
        if terminated {
            break;
        }
    }

    if !consumed_any {
        return Ok(LineRead::Eof);
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
    if overflow || buf.len() > limit {
        buf.clear();
        return Ok(LineRead::TooLong);
    }
    Ok(LineRead::Line)
}
