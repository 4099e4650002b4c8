//! Byte-level lexer primitives for WKT. Every primitive advances the cursor past what it
//! consumed and reports errors with the byte offset at which they occurred.

use crate::error::{GeoError, Result};

pub(crate) struct Scanner<'a> {
    raw: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(raw: &'a [u8]) -> Self {
        Self { raw, pos: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn syntax_error(&self, message: impl std::fmt::Display) -> GeoError {
        GeoError::MalformedSyntax(format!("{message} at offset {}", self.pos))
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.raw.get(self.pos) {
            self.pos += 1;
        }
    }

    /// The byte at the cursor, without consuming it.
    pub(crate) fn peek(&self) -> Result<u8> {
        self.raw
            .get(self.pos)
            .copied()
            .ok_or_else(|| self.syntax_error("unexpected end of input"))
    }

    pub(crate) fn at_end(&mut self) -> bool {
        self.skip_whitespace();
        self.pos >= self.raw.len()
    }

    /// Consume an optional `SRID=<digits>;` prefix.
    pub(crate) fn scan_srid(&mut self) -> Result<Option<u32>> {
        self.skip_whitespace();
        let Some(prefix) = self.raw.get(self.pos..self.pos + 5) else {
            return Ok(None);
        };
        if !prefix.eq_ignore_ascii_case(b"SRID=") {
            return Ok(None);
        }
        self.pos += 5;

        let start = self.pos;
        while self.peek()?.is_ascii_digit() {
            self.pos += 1;
        }
        if start == self.pos {
            let found = self.peek()?;
            return Err(self.syntax_error(format!("expected SRID digits, got {:?}", found as char)));
        }
        let digits = &self.raw[start..self.pos];
        let srid = lexical_core::parse::<u32>(digits).map_err(|_| {
            GeoError::MalformedSyntax(format!("SRID out of range at offset {start}"))
        })?;

        match self.peek()? {
            b';' => {
                self.pos += 1;
                Ok(Some(srid))
            }
            other => Err(self.syntax_error(format!("expected ';', got {:?}", other as char))),
        }
    }

    /// Consume a run of ASCII letters, upper-cased. Fails if there is none.
    pub(crate) fn scan_ident(&mut self) -> Result<String> {
        self.skip_whitespace();
        let start = self.pos;
        while self.raw.get(self.pos).is_some_and(u8::is_ascii_alphabetic) {
            self.pos += 1;
        }
        if start == self.pos {
            let found = self.peek()?;
            return Err(self.syntax_error(format!("expected keyword, got {:?}", found as char)));
        }
        Ok(self.raw[start..self.pos]
            .iter()
            .map(|b| char::from(b.to_ascii_uppercase()))
            .collect())
    }

    /// Whether the next token starts with a letter.
    pub(crate) fn peek_ident(&mut self) -> bool {
        self.skip_whitespace();
        self.raw
            .get(self.pos)
            .is_some_and(|b| b.is_ascii_alphabetic())
    }

    /// Consume a single `(`.
    pub(crate) fn scan_start(&mut self) -> Result<()> {
        self.skip_whitespace();
        match self.peek()? {
            b'(' => {
                self.pos += 1;
                Ok(())
            }
            other => Err(self.syntax_error(format!("expected '(', got {:?}", other as char))),
        }
    }

    /// Whether the next token is `(`, without consuming it.
    pub(crate) fn peek_start(&mut self) -> Result<bool> {
        self.skip_whitespace();
        Ok(self.peek()? == b'(')
    }

    /// Consume `,` (returns `true`, more items follow) or `)` (returns `false`, end of list).
    pub(crate) fn scan_continue(&mut self) -> Result<bool> {
        self.skip_whitespace();
        match self.peek()? {
            b',' => {
                self.pos += 1;
                Ok(true)
            }
            b')' => {
                self.pos += 1;
                Ok(false)
            }
            other => Err(self.syntax_error(format!(
                "expected ',' or ')', got {:?}",
                other as char
            ))),
        }
    }

    /// Whether the next token is a list delimiter (`,` or `)`), without consuming it.
    pub(crate) fn peek_delimiter(&mut self) -> Result<bool> {
        self.skip_whitespace();
        Ok(matches!(self.peek()?, b',' | b')'))
    }

    /// Consume one floating point literal.
    pub(crate) fn scan_number(&mut self) -> Result<f64> {
        self.skip_whitespace();
        self.peek()?;
        match lexical_core::parse_partial::<f64>(&self.raw[self.pos..]) {
            Ok((value, consumed)) if consumed > 0 => {
                self.pos += consumed;
                Ok(value)
            }
            _ => Err(self.syntax_error("invalid number")),
        }
    }
}
