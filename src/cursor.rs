//! Bounds-checked character cursor.
//!
//! [`Cursor`] is a random-access view over decoded text with a single movable
//! position. It knows nothing about keys, values or comments; the
//! [`Tokenizer`](crate::Tokenizer) builds on it.
//!
//! Every read that could fall outside the buffer returns `None` instead of
//! panicking, and every explicit reposition is validated.
//!
//! ## Examples
//!
//! ```rust
//! use kvedit::Cursor;
//!
//! let mut cursor = Cursor::new("This is a string\nwith a newline");
//!
//! assert_eq!(cursor.behind(1), None);
//! assert_eq!(cursor.current(), Some('T'));
//! assert_eq!(cursor.advance(), Some('h'));
//! assert_eq!(cursor.behind(1), Some('T'));
//! assert_eq!(cursor.peek(1), Some('i'));
//! assert_eq!(cursor.find_next('\n'), Some(16));
//! ```

use crate::{Error, Result};

/// A movable position over a buffer of `char`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    chars: Vec<char>,
    pos: usize,
}

impl Cursor {
    /// Creates a cursor over `text` without altering line endings.
    pub fn new(text: &str) -> Self {
        Cursor {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    /// Creates a cursor over `text`, collapsing `\r\n` and lone `\r` into `\n`.
    pub fn normalized(text: &str) -> Self {
        let mut chars = Vec::with_capacity(text.len());
        let mut iter = text.chars().peekable();

        while let Some(ch) = iter.next() {
            if ch == '\r' {
                if iter.peek() == Some(&'\n') {
                    iter.next();
                }
                chars.push('\n');
            } else {
                chars.push(ch);
            }
        }

        Cursor { chars, pos: 0 }
    }

    /// Decodes `bytes` as UTF-8 and creates a cursor over the result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Utf8`] if the bytes are not valid UTF-8.
    pub fn from_bytes(bytes: &[u8], normalize_newlines: bool) -> Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(if normalize_newlines {
            Cursor::normalized(text)
        } else {
            Cursor::new(text)
        })
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Checks if the cursor is at (or past) the end of input
    pub fn is_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// Character at the cursor.
    pub fn current(&self) -> Option<char> {
        self.at(self.pos)
    }

    /// Code point at the cursor.
    pub fn current_code(&self) -> Option<u32> {
        self.current().map(u32::from)
    }

    /// Character at an absolute position.
    pub fn at(&self, pos: usize) -> Option<char> {
        self.chars.get(pos).copied()
    }

    /// Character `n` positions ahead of the cursor.
    pub fn peek(&self, n: usize) -> Option<char> {
        self.pos.checked_add(n).and_then(|pos| self.at(pos))
    }

    /// Character `n` positions behind the cursor.
    pub fn behind(&self, n: usize) -> Option<char> {
        self.pos.checked_sub(n).and_then(|pos| self.at(pos))
    }

    /// Moves one position forward and returns the new current character.
    ///
    /// At the end of input the cursor stays put and `None` is returned.
    pub fn advance(&mut self) -> Option<char> {
        if self.is_eof() {
            return None;
        }
        self.pos += 1;
        self.current()
    }

    /// Moves the cursor to an absolute position.
    ///
    /// `pos == len()` is allowed and marks the end of input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `pos` is past the end of input.
    pub fn move_to(&mut self, pos: usize) -> Result<&mut Self> {
        self.check_bound(pos)?;
        self.pos = pos;
        Ok(self)
    }

    /// Moves the cursor by a signed offset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the target is negative or past the end.
    pub fn move_by(&mut self, delta: isize) -> Result<&mut Self> {
        let Some(target) = self.pos.checked_add_signed(delta) else {
            // pos never exceeds len, which fits in isize
            let pos = (self.pos as isize).saturating_add(delta);
            return Err(Error::out_of_bounds(pos, self.chars.len()));
        };
        self.check_bound(target)?;
        self.pos = target;
        Ok(self)
    }

    /// Position of the next `ch`, searching from just past the cursor.
    pub fn find_next(&self, ch: char) -> Option<usize> {
        self.find_next_of(&[ch])
    }

    /// Position of the next character contained in `set`, searching from just
    /// past the cursor.
    pub fn find_next_of(&self, set: &[char]) -> Option<usize> {
        let start = self.pos + 1;
        self.chars
            .get(start..)?
            .iter()
            .position(|ch| set.contains(ch))
            .map(|offset| start + offset)
    }

    /// Advances past a maximal run of characters contained in `set`.
    pub fn consume(&mut self, set: &[char]) -> &mut Self {
        while let Some(ch) = self.current() {
            if !set.contains(&ch) {
                break;
            }
            self.pos += 1;
        }
        self
    }

    /// Returns the text between `from` (inclusive) and `to` (exclusive).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `from > to` and [`Error::OutOfBounds`]
    /// if `to` is past the end of input.
    pub fn substring(&self, from: usize, to: usize) -> Result<String> {
        if from > to {
            return Err(Error::InvalidRange { from, to });
        }
        self.check_bound(to)?;
        Ok(self.chars[from..to].iter().collect())
    }

    /// Moves the cursor back to the start of input.
    pub fn rewind(&mut self) -> &mut Self {
        self.pos = 0;
        self
    }

    /// 1-based line and column of `pos`.
    pub fn line_col(&self, pos: usize) -> (usize, usize) {
        let end = pos.min(self.chars.len());
        let mut line = 1;
        let mut col = 1;

        for ch in &self.chars[..end] {
            if *ch == '\n' {
                line += 1;
                col = 1;
            } else {
                col += 1;
            }
        }

        (line, col)
    }

    /// Text of the line containing `pos`, without its newline.
    pub fn line_text(&self, pos: usize) -> String {
        let pos = pos.min(self.chars.len());
        let start = self.chars[..pos]
            .iter()
            .rposition(|ch| *ch == '\n')
            .map_or(0, |i| i + 1);
        let end = self.chars[pos..]
            .iter()
            .position(|ch| *ch == '\n')
            .map_or(self.chars.len(), |i| pos + i);

        self.chars[start..end].iter().collect()
    }

    fn check_bound(&self, pos: usize) -> Result<()> {
        if pos > self.chars.len() {
            let pos = isize::try_from(pos).unwrap_or(isize::MAX);
            return Err(Error::out_of_bounds(pos, self.chars.len()));
        }
        Ok(())
    }
}
