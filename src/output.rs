//! Output module: encodes rendered lines and commits them to a destination.
//!
//! Every line goes through the same path regardless of destination:
//!
//! - **Encoding**: text is encoded with an `encoding_rs` encoder (UTF-8), so
//!   symbols outside the basic multilingual plane (emoji) survive redirection
//! - **Byte-order marker**: a newly created output file starts with `EF BB BF`
//! - **Buffering**: writes are buffered, `finish` flushes and reports failures
//!
//! Console and file output are byte-identical apart from the marker.
//!
//! File: src/output.rs
//! Date: 2026-10-16

#![forbid(unsafe_code)]

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, UTF_8};
use log::{debug, info};

use crate::config::Config;
use crate::error::OutputError;

// ============================================================================
// Constants
// ============================================================================

/// UTF-8 byte-order marker written at the start of output files.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Line terminator appended to every line.
const LINE_FEED: &[u8] = b"\n";

// ============================================================================
// Destination
// ============================================================================

/// Where rendered lines end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Standard output.
    Console,
    /// A file created (or truncated) at the given path.
    File(PathBuf),
}

impl Destination {
    /// Derives the destination from the configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        config
            .output
            .output_path
            .clone()
            .map_or(Self::Console, Self::File)
    }

    /// Maps an IO failure on this destination to an `OutputError`.
    fn write_error(&self, source: io::Error) -> OutputError {
        match self {
            Self::Console => OutputError::StdoutFailed { source },
            Self::File(path) => OutputError::WriteFailed {
                path: path.clone(),
                source,
            },
        }
    }
}

// ============================================================================
// Line Sink
// ============================================================================

/// Encodes logical text lines and writes them to a byte stream.
///
/// The sink appends `\n` to each line. It is the only writer of its
/// destination for the whole run.
///
/// # Examples
///
/// ```
/// use treeex::output::LineSink;
///
/// let mut sink = LineSink::new(Vec::new());
/// sink.write_line("│  🍣.txt").unwrap();
/// let bytes = sink.finish().unwrap();
/// assert_eq!(bytes, "│  🍣.txt\n".as_bytes());
/// ```
pub struct LineSink<W: Write> {
    /// Underlying byte stream.
    writer: W,
    /// Target encoding for every line.
    encoding: &'static Encoding,
    /// Destination label used for error reporting.
    destination: Destination,
    /// Number of lines written so far.
    lines_written: usize,
}

impl<W: Write> LineSink<W> {
    /// Creates a console-labelled UTF-8 sink over an arbitrary writer.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_destination(writer, Destination::Console)
    }

    /// Creates a UTF-8 sink with an explicit destination label.
    #[must_use]
    pub fn with_destination(writer: W, destination: Destination) -> Self {
        Self {
            writer,
            encoding: UTF_8,
            destination,
            lines_written: 0,
        }
    }

    /// Writes the byte-order marker of the sink's encoding.
    ///
    /// Must be called before any line is written.
    ///
    /// # Errors
    ///
    /// Returns an `OutputError` if the marker cannot be written.
    pub fn write_bom(&mut self) -> Result<(), OutputError> {
        debug_assert_eq!(self.lines_written, 0, "BOM must precede all lines");
        self.writer
            .write_all(UTF8_BOM)
            .map_err(|e| self.destination.write_error(e))
    }

    /// Encodes a line of text for the destination.
    ///
    /// # Errors
    ///
    /// Returns `OutputError::EncodingFailed` if the encoder reports input it
    /// cannot represent.
    pub fn encode<'a>(&self, line: &'a str) -> Result<Cow<'a, [u8]>, OutputError> {
        let (bytes, used, had_errors) = self.encoding.encode(line);
        if had_errors || used != self.encoding {
            return Err(OutputError::EncodingFailed {
                encoding: self.encoding.name().to_string(),
                line: line.to_string(),
            });
        }
        Ok(bytes)
    }

    /// Encodes and writes one line, followed by a line feed.
    ///
    /// # Errors
    ///
    /// Returns an `OutputError` on encoding or write failure.
    pub fn write_line(&mut self, line: &str) -> Result<(), OutputError> {
        let bytes = self.encode(line)?;
        self.writer
            .write_all(&bytes)
            .and_then(|()| self.writer.write_all(LINE_FEED))
            .map_err(|e| self.destination.write_error(e))?;
        self.lines_written += 1;
        Ok(())
    }

    /// Number of lines written so far.
    #[must_use]
    pub const fn lines_written(&self) -> usize {
        self.lines_written
    }

    /// The destination this sink writes to.
    #[must_use]
    pub const fn destination(&self) -> &Destination {
        &self.destination
    }

    /// Flushes the writer and returns it.
    ///
    /// # Errors
    ///
    /// Returns an `OutputError` if flushing fails.
    pub fn finish(mut self) -> Result<W, OutputError> {
        self.writer
            .flush()
            .map_err(|e| self.destination.write_error(e))?;
        debug!("sink finished after {} lines", self.lines_written);
        Ok(self.writer)
    }
}

/// Sink type used by the binary: buffered stdout or buffered file.
pub type DestinationSink = LineSink<BufWriter<Box<dyn Write>>>;

/// Opens the configured destination.
///
/// A file destination is created or truncated and armed with the
/// byte-order marker before any text is written.
///
/// # Errors
///
/// Returns `OutputError::FileCreateFailed` if the output file cannot be
/// created, or a write error if the marker cannot be written.
pub fn open_destination(destination: Destination) -> Result<DestinationSink, OutputError> {
    match destination {
        Destination::Console => {
            debug!("writing to stdout");
            let writer: Box<dyn Write> = Box::new(io::stdout().lock());
            Ok(LineSink::new(BufWriter::new(writer)))
        }
        Destination::File(path) => {
            let file = File::create(&path).map_err(|e| OutputError::FileCreateFailed {
                path: path.clone(),
                source: e,
            })?;
            info!("writing to {}", path.display());
            let writer: Box<dyn Write> = Box::new(file);
            let mut sink = LineSink::with_destination(BufWriter::new(writer), Destination::File(path));
            sink.write_bom()?;
            Ok(sink)
        }
    }
}

/// Formats the console notice printed after a successful file write.
///
/// The path is canonicalized when possible so the user sees where the file
/// actually landed.
#[must_use]
pub fn file_written_notice(path: &Path) -> String {
    let shown = dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    format!("The results have been output to \n    {}.", shown.display())
}

// ============================================================================
// Unit Tests
// ============================================================================
