//! Byte-level scanner for the token grammar of a LIQUiD record.
//!
//! ```text
//! nuc_term       := "nuc=" ws* signed_decimal
//! info_term      := "info=" non_whitespace+
//! one_e_term     := INT "," INT filler "=" ws* signed_decimal exponent?
//! two_e_term     := INT sep INT sep INT sep INT filler "=" ws* signed_decimal exponent?
//! exponent       := "e" ("-" | "+")? digit+
//! signed_decimal := "-"? digit* ("." digit*)?
//! ```
//!
//! `sep` and `filler` are runs of bytes that are neither digits nor `=`. Integral tokens only
//! start at the beginning of a record or after whitespace. An `e` not followed by an exponent is
//! left unread, so the value is taken without exponent.
//!
//! One- and two-electron tokens are found by separate scans over the whole record. Text read as
//! part of a token of one kind is still available to the scan for the other kind.

use crate::integrals::IntegralKind;
use crate::liquid::ParseError;

const NUCLEAR_TAG: &str = "nuc=";
const INFO_TAG: &str = "info=";

/// A single integral assignment read from a record, before any canonicalisation.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct IntegralToken {
    /// The kind of integral.
    pub(crate) kind: IntegralKind,

    /// The orbital indices in the order written.
    pub(crate) indices: Vec<usize>,

    /// The integral value with any exponent applied.
    pub(crate) coefficient: f64,
}

/// Counts the `nuc=` tags in a record.
pub(crate) fn count_nuclear_tags(record: &str) -> usize {
    record.matches(NUCLEAR_TAG).count()
}

/// Reads the value of the first `nuc=` tag in a record. Later tags are not inspected.
///
/// # Returns
///
/// `None` if the record has no `nuc=` tag.
///
/// # Errors
///
/// Errors if the first tag is not followed by a valid signed decimal.
pub(crate) fn scan_nuclear_term(record: &str) -> Result<Option<f64>, ParseError> {
    let Some(tag_start) = record.find(NUCLEAR_TAG) else {
        return Ok(None);
    };
    let mut cursor = Cursor::new(record, tag_start + NUCLEAR_TAG.len());
    cursor.skip_whitespace();
    let start = cursor.pos;
    cursor.scan_signed_decimal()?;
    cursor.to_f64(start).map(Some)
}

/// Reads the value of the first `info=` annotation in a record, if any.
pub(crate) fn scan_info_annotation(record: &str) -> Option<&str> {
    let value_start = record.find(INFO_TAG)? + INFO_TAG.len();
    let value = record[value_start..]
        .split(|c: char| c.is_ascii_whitespace())
        .next()
        .unwrap_or_default();
    (!value.is_empty()).then_some(value)
}

// ================
// Integral scanner
// ================

/// Iterator over the integral tokens of one kind in a record, in order of appearance.
///
/// Tokens of the same kind do not overlap. Iteration stops after the first error. Nuclear terms
/// are not integral tokens, so a scanner for [`IntegralKind::Nuclear`] yields nothing.
pub(crate) struct IntegralScanner<'a> {
    cursor: Cursor<'a>,
    kind: IntegralKind,
    finished: bool,
}

impl<'a> IntegralScanner<'a> {
    pub(crate) fn new(record: &'a str, kind: IntegralKind) -> Self {
        Self {
            cursor: Cursor::new(record, 0),
            kind,
            finished: kind == IntegralKind::Nuclear,
        }
    }

    /// Moves to the next position at which an integral token may start.
    fn advance_to_candidate(&mut self) -> bool {
        let cursor = &mut self.cursor;
        while let Some(byte) = cursor.peek() {
            let at_boundary = cursor.pos == 0
                || cursor.bytes[cursor.pos - 1].is_ascii_whitespace();
            if at_boundary && byte.is_ascii_digit() {
                return true;
            }
            cursor.pos += 1;
        }
        false
    }

    /// Attempts to read one integral token of the scanner's kind starting at the current
    /// position.
    ///
    /// Returns `Ok(None)` if the text there does not have the shape of such a token.
    fn scan_candidate(&mut self) -> Result<Option<IntegralToken>, ParseError> {
        let kind = self.kind;
        let cursor = &mut self.cursor;
        let text = cursor.text;
        let candidate_start = cursor.pos;
        let mut index_literals = vec![cursor.scan_digits()];
        while index_literals.len() < kind.rank() {
            let run_start = cursor.pos;
            cursor.skip_while(|byte| !byte.is_ascii_digit() && byte != b'=');
            let separator = &text[run_start..cursor.pos];
            let separator_ok = match kind {
                IntegralKind::OneElectron => separator == ",",
                _ => !separator.is_empty(),
            };
            if !separator_ok || !cursor.peek().is_some_and(|byte| byte.is_ascii_digit()) {
                log::trace!(
                    "Skipping text `{}` that does not form a {} token.",
                    &text[candidate_start..cursor.pos],
                    kind.to_string().to_lowercase()
                );
                return Ok(None);
            }
            index_literals.push(cursor.scan_digits());
        }
        cursor.skip_while(|byte| !byte.is_ascii_digit() && byte != b'=');
        if cursor.peek() != Some(b'=') {
            return Ok(None);
        }

        let indices = index_literals
            .iter()
            .map(|&(start, end)| {
                let literal = &text[start..end];
                literal
                    .parse::<usize>()
                    .map_err(|err| ParseError::numeric_conversion(literal, start, err))
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Skip past `=`.
        cursor.pos += 1;
        cursor.skip_whitespace();
        let value_start = cursor.pos;
        cursor.scan_signed_decimal()?;
        cursor.scan_exponent();
        let coefficient = cursor.to_f64(value_start)?;

        Ok(Some(IntegralToken {
            kind,
            indices,
            coefficient,
        }))
    }
}

impl<'a> Iterator for IntegralScanner<'a> {
    type Item = Result<IntegralToken, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        while self.advance_to_candidate() {
            let candidate_start = self.cursor.pos;
            match self.scan_candidate() {
                Ok(Some(token)) => return Some(Ok(token)),
                Ok(None) => self.cursor.pos = candidate_start + 1,
                Err(err) => {
                    self.finished = true;
                    return Some(Err(err));
                }
            }
        }
        None
    }
}

// ======
// Cursor
// ======

/// A position within an ASCII record.
struct Cursor<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str, pos: usize) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_while(&mut self, pred: impl Fn(u8) -> bool) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn skip_whitespace(&mut self) {
        self.skip_while(|byte| byte.is_ascii_whitespace());
    }

    /// Scans a run of digits and returns its byte range.
    fn scan_digits(&mut self) -> (usize, usize) {
        let start = self.pos;
        self.skip_while(|byte| byte.is_ascii_digit());
        (start, self.pos)
    }

    /// Scans `"-"? digit* ("." digit*)?`, requiring at least one digit.
    fn scan_signed_decimal(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        let mut n_digits = self.skip_while(|byte| byte.is_ascii_digit());
        if self.peek() == Some(b'.') {
            self.pos += 1;
            n_digits += self.skip_while(|byte| byte.is_ascii_digit());
        }
        if n_digits == 0 {
            return Err(self.malformed(start, "expected a decimal number"));
        }
        Ok(())
    }

    /// Scans an optional `"e" ("-" | "+")? digit+` suffix. A bare `e`, or `e` followed only by
    /// a sign, is not consumed.
    fn scan_exponent(&mut self) {
        if self.peek() != Some(b'e') {
            return;
        }
        let start = self.pos;
        self.pos += 1;
        if matches!(self.peek(), Some(b'-') | Some(b'+')) {
            self.pos += 1;
        }
        if self.skip_while(|byte| byte.is_ascii_digit()) == 0 {
            self.pos = start;
        }
    }

    /// Converts the text scanned since `start` into a floating-point value.
    fn to_f64(&self, start: usize) -> Result<f64, ParseError> {
        let literal = &self.text[start..self.pos];
        literal
            .parse::<f64>()
            .map_err(|err| ParseError::numeric_conversion(literal, start, err))
    }

    /// Builds a numeric-conversion error for the non-whitespace text starting at `start`.
    fn malformed(&self, start: usize, reason: &str) -> ParseError {
        let literal = self.text[start..]
            .split(|c: char| c.is_ascii_whitespace())
            .next()
            .unwrap_or_default();
        ParseError::numeric_conversion(literal, start, reason)
    }
}
