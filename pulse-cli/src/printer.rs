//! Terminal rendering of a streamed generation.

use std::io::{self, Write};

use pulse_stream::{GenerationSession, SummaryAssembler};
use pulse_types::{StreamEnvelope, StreamHandler, Summary};

/// Prints summary text to `out` as it streams in and status lines to
/// `status`, while assembling the full session.
///
/// Write failures do not interrupt the generation; the first one is handed
/// back by [`into_parts`](Self::into_parts) next to the session.
pub struct StreamPrinter<O, E> {
    out: O,
    status: E,
    assembler: SummaryAssembler,
    language: Option<String>,
    shown: (u8, String),
    io_error: Option<io::Error>,
}

impl<O: Write, E: Write> StreamPrinter<O, E> {
    /// Print text to `out` and progress to `status`.
    pub fn new(out: O, status: E) -> Self {
        Self {
            out,
            status,
            assembler: SummaryAssembler::new(),
            language: None,
            shown: (0, String::new()),
            io_error: None,
        }
    }

    /// The session assembled so far.
    pub fn session(&self) -> &GenerationSession {
        self.assembler.session()
    }

    /// The text writer, the assembled session and the first write error, if
    /// any.
    pub fn into_parts(self) -> (O, GenerationSession, Option<io::Error>) {
        (self.out, self.assembler.into_session(), self.io_error)
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            self.io_error.get_or_insert(e);
        }
    }

    fn show_status(&mut self) {
        let current = (self.assembler.progress(), self.assembler.message().to_string());
        if current.1.is_empty() || current == self.shown {
            return;
        }
        let result = writeln!(self.status, "[{:>3}%] {}", current.0, current.1);
        self.record(result);
        self.shown = current;
    }

    fn end_text(&mut self) {
        if self.language.take().is_some() {
            let result = writeln!(self.out).and_then(|()| self.out.flush());
            self.record(result);
        }
    }
}

impl<O: Write, E: Write> StreamHandler for StreamPrinter<O, E> {
    fn on_progress(&mut self, envelope: &StreamEnvelope) {
        self.assembler.on_progress(envelope);
        if !envelope.is_terminal() {
            self.show_status();
        }
    }

    fn on_content_chunk(&mut self, language: &str, content: &str) {
        let mut result = Ok(());
        if self.language.as_deref() != Some(language) {
            if self.language.is_some() {
                result = writeln!(self.out, "\n");
            }
            result = result.and_then(|()| writeln!(self.out, "== {language} =="));
            self.language = Some(language.to_string());
        }
        let result = result
            .and_then(|()| self.out.write_all(content.as_bytes()))
            .and_then(|()| self.out.flush());
        self.record(result);
    }

    fn on_complete(&mut self, summary: Summary) {
        self.end_text();
        let result = writeln!(self.status, "summary #{} saved: {}", summary.id, summary.title);
        self.record(result);
        self.assembler.complete(summary);
    }

    fn on_error(&mut self, message: String) {
        self.end_text();
        let result = writeln!(self.status, "generation failed: {message}");
        self.record(result);
        self.assembler.fail(message);
    }
}
