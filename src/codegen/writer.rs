//! Line-oriented source buffer shared by the target writers.

/// Accumulates generated lines with managed indentation.
pub struct SourceWriter {
    buf: String,
    depth: usize,
    unit: &'static str,
}

impl SourceWriter {
    pub fn new(unit: &'static str) -> Self {
        Self {
            buf: String::new(),
            depth: 0,
            unit,
        }
    }

    /// Write one line at the current indentation.
    pub fn line(&mut self, text: impl AsRef<str>) {
        for _ in 0..self.depth {
            self.buf.push_str(self.unit);
        }
        self.buf.push_str(text.as_ref());
        self.buf.push('\n');
    }

    /// Write an empty line (never carries indentation).
    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

/// Escape text for a double-quoted string literal.
///
/// The escapes used are understood by both Python and ECMAScript.
pub fn escape_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// `escape_string` wrapped in double quotes.
pub fn quote(text: &str) -> String {
    format!("\"{}\"", escape_string(text))
}
