//! Text codec for weight values.
//!
//! The delimiter configuration is an explicit value threaded through every
//! read/write call, never ambient process state, so concurrent runs with
//! different settings cannot interfere.
//!
//! Grammar: every weight is a sequence of separator-joined atoms. Scalars,
//! strings and sets occupy exactly one atom; fixed-arity composites write
//! one component after another; variable-size composites (sparse power,
//! union) write a leading count atom so the stream stays unambiguous even
//! with no parentheses configured. When a parenthesis pair is configured,
//! each composite additionally wraps its components in the pair, nested.

use std::fmt::Display;
use std::fmt::Write as _;

use crate::error::WeightError;

/// Delimiters used when serializing composite weights to text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextConfig {
    /// Separator written between the components of a composite weight.
    pub separator: char,
    /// Optional open/close pair wrapped around each composite weight.
    pub parentheses: Option<(char, char)>,
}

impl Default for TextConfig {
    fn default() -> Self {
        TextConfig {
            separator: ',',
            parentheses: None,
        }
    }
}

impl TextConfig {
    /// The default configuration with a `(`/`)` pair.
    pub fn parenthesized() -> Self {
        TextConfig {
            separator: ',',
            parentheses: Some(('(', ')')),
        }
    }
}

/// Incremental writer used by [`Weight::write_text`](super::Weight::write_text).
#[derive(Debug)]
pub struct TextWriter {
    out: String,
    cfg: TextConfig,
    needs_sep: bool,
}

impl TextWriter {
    pub fn new(cfg: &TextConfig) -> Self {
        TextWriter {
            out: String::new(),
            cfg: *cfg,
            needs_sep: false,
        }
    }

    fn sep(&mut self) {
        if self.needs_sep {
            self.out.push(self.cfg.separator);
        }
    }

    /// Writes one atom. Atoms must not contain the separator or the
    /// configured parenthesis characters.
    pub fn atom(&mut self, a: impl Display) {
        self.sep();
        let _ = write!(self.out, "{a}");
        self.needs_sep = true;
    }

    /// Opens a composite group.
    pub fn begin(&mut self) {
        self.sep();
        if let Some((open, _)) = self.cfg.parentheses {
            self.out.push(open);
        }
        self.needs_sep = false;
    }

    /// Closes a composite group.
    pub fn end(&mut self) {
        if let Some((_, close)) = self.cfg.parentheses {
            self.out.push(close);
        }
        self.needs_sep = true;
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Recursive-descent reader used by [`Weight::read_text`](super::Weight::read_text).
#[derive(Debug)]
pub struct TextReader<'a> {
    src: &'a str,
    pos: usize,
    cfg: TextConfig,
    needs_sep: bool,
}

impl<'a> TextReader<'a> {
    pub fn new(src: &'a str, cfg: &TextConfig) -> Self {
        TextReader {
            src,
            pos: 0,
            cfg: *cfg,
            needs_sep: false,
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    fn expect_char(&mut self, expected: char) -> Result<(), WeightError> {
        match self.src[self.pos..].chars().next() {
            Some(ch) if ch == expected => {
                self.pos += ch.len_utf8();
                Ok(())
            }
            Some(ch) => Err(WeightError::parse(
                self.pos,
                format!("expected '{expected}', found '{ch}'"),
            )),
            None => Err(WeightError::parse(
                self.pos,
                format!("expected '{expected}', found end of input"),
            )),
        }
    }

    fn sep(&mut self) -> Result<(), WeightError> {
        if self.needs_sep {
            self.expect_char(self.cfg.separator)?;
            self.needs_sep = false;
        }
        Ok(())
    }

    /// Reads the next atom: a non-empty run of characters up to the next
    /// separator or closing parenthesis.
    pub fn atom(&mut self) -> Result<&'a str, WeightError> {
        self.sep()?;
        let rest = &self.src[self.pos..];
        let close = self.cfg.parentheses.map(|(_, c)| c);
        let mut end = rest.len();
        for (i, ch) in rest.char_indices() {
            if ch == self.cfg.separator || Some(ch) == close {
                end = i;
                break;
            }
        }
        if end == 0 {
            return Err(WeightError::parse(self.pos, "expected a weight atom"));
        }
        self.pos += end;
        self.needs_sep = true;
        Ok(&rest[..end])
    }

    /// Reads an atom and parses it as a count.
    pub fn count(&mut self) -> Result<usize, WeightError> {
        let pos = self.pos;
        let atom = self.atom()?;
        atom.parse::<usize>()
            .map_err(|_| WeightError::parse(pos, format!("invalid count '{atom}'")))
    }

    /// Enters a composite group.
    pub fn begin(&mut self) -> Result<(), WeightError> {
        self.sep()?;
        if let Some((open, _)) = self.cfg.parentheses {
            self.expect_char(open)?;
        }
        self.needs_sep = false;
        Ok(())
    }

    /// Leaves a composite group.
    pub fn end(&mut self) -> Result<(), WeightError> {
        if let Some((_, close)) = self.cfg.parentheses {
            self.expect_char(close)?;
        }
        self.needs_sep = true;
        Ok(())
    }

    /// Fails unless the whole input was consumed.
    pub fn finish(&self) -> Result<(), WeightError> {
        if self.pos == self.src.len() {
            Ok(())
        } else {
            Err(WeightError::parse(self.pos, "trailing text after weight"))
        }
    }
}
