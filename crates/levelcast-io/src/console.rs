//! Console parameter sink for dry runs.

use std::io::{self, Write};

use levelcast_core::{ParameterSink, Slot};

/// Prints `name = value` for every publication.
///
/// Writes go to stdout by default; any [`Write`] can stand in. Write errors
/// are ignored.
#[derive(Debug)]
pub struct StdoutSink<W: Write = io::Stdout> {
    writer: W,
}

impl StdoutSink {
    /// Creates a sink writing to stdout.
    pub fn new() -> Self {
        Self { writer: io::stdout() }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> StdoutSink<W> {
    /// Creates a sink writing to `writer`.
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ParameterSink for StdoutSink<W> {
    fn publish(&mut self, slot: Slot, value: f32) {
        let _ = writeln!(self.writer, "{} = {value:.4}", slot.parameter_name());
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}
