//! Line framing for `data:`-prefixed event streams.

/// Prefix marking a line that carries an envelope.
pub const DATA_PREFIX: &str = "data: ";

/// Splits decoded text into complete lines, keeping the trailing partial
/// line until the next push.
#[derive(Debug, Default)]
pub struct LineFramer {
    pending: String,
}

impl LineFramer {
    /// Create an empty framer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `text` and return every line it completes, in order, without
    /// line terminators. A `\r` before the `\n` is stripped.
    pub fn push(&mut self, text: &str) -> Vec<String> {
        self.pending.push_str(text);
        let Some(last) = self.pending.rfind('\n') else {
            return Vec::new();
        };
        let rest = self.pending.split_off(last + 1);
        let complete = std::mem::replace(&mut self.pending, rest);
        complete
            .split_terminator('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect()
    }

    /// Take the unterminated remainder at end of input, if any.
    pub fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.pending);
        let line = rest.strip_suffix('\r').unwrap_or(rest.as_str());
        (!line.is_empty()).then(|| line.to_string())
    }

    /// The buffered partial line.
    #[must_use]
    pub fn pending(&self) -> &str {
        &self.pending
    }
}

/// The payload of a `data: ` line, or `None` for any other line (blank
/// separators, comments, other SSE fields).
#[must_use]
pub fn data_payload(line: &str) -> Option<&str> {
    line.strip_prefix(DATA_PREFIX)
}
