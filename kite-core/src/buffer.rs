//! Read-only line-addressed text storage.
//!
//! [`Buffer`] wraps a [`Rope`] and guarantees that the text ends with a
//! newline, so every line, the last one included, carries its `\n` and a
//! column in `[0, line_len)` always names an existing byte. Selectors work
//! in codepoint space internally; the conversions between codepoint
//! positions and [`BufferCoord`]s live here.

use ropey::{Rope, RopeSlice};

use crate::coord::BufferCoord;

#[derive(Debug, Clone)]
pub struct Buffer {
  text: Rope,
}

impl Buffer {
  pub fn new(text: Rope) -> Self {
    let mut text = text;
    let len = text.len_chars();
    if len == 0 || text.char(len - 1) != '\n' {
      text.insert(len, "\n");
    }
    Self { text }
  }

  #[inline]
  pub fn slice(&self) -> RopeSlice<'_> {
    self.text.slice(..)
  }

  #[inline]
  pub fn len_chars(&self) -> usize {
    self.text.len_chars()
  }

  /// Number of lines. The empty tail ropey reports after the final `\n` is
  /// not counted.
  #[inline]
  pub fn line_count(&self) -> usize {
    self.text.len_lines() - 1
  }

  /// Codepoint at `pos`. Panics when `pos` is out of range, like rope
  /// indexing does.
  #[inline]
  pub fn char_at(&self, pos: usize) -> char {
    self.text.char(pos)
  }

  /// One line of text, trailing `\n` included.
  #[inline]
  pub fn line(&self, line: usize) -> RopeSlice<'_> {
    self.text.line(line)
  }

  /// Codepoint position of the start of `line`.
  #[inline]
  pub fn line_to_char(&self, line: usize) -> usize {
    self.text.line_to_char(line)
  }

  pub fn byte_at(&self, coord: BufferCoord) -> u8 {
    self.text.byte(self.text.line_to_byte(coord.line) + coord.column)
  }

  pub fn coord_to_char(&self, coord: BufferCoord) -> usize {
    self
      .text
      .byte_to_char(self.text.line_to_byte(coord.line) + coord.column)
  }

  pub fn char_to_coord(&self, pos: usize) -> BufferCoord {
    let line = self.text.char_to_line(pos);
    let column = self.text.char_to_byte(pos) - self.text.line_to_byte(line);
    BufferCoord::new(line, column)
  }

  /// Coordinate of the last codepoint in the buffer, the final `\n`.
  pub fn back_coord(&self) -> BufferCoord {
    self.char_to_coord(self.len_chars() - 1)
  }

  /// Whether `coord` names an existing byte.
  pub fn is_valid(&self, coord: BufferCoord) -> bool {
    coord.line < self.line_count() && coord.column < self.line(coord.line).len_bytes()
  }

  /// The text between two coordinates, `end` exclusive.
  pub fn string(&self, begin: BufferCoord, end: BufferCoord) -> String {
    let begin = self.coord_to_char(begin);
    let end = self.coord_to_char(end);
    self.text.slice(begin..end).to_string()
  }
}

impl From<&str> for Buffer {
  fn from(text: &str) -> Self {
    Self::new(Rope::from_str(text))
  }
}

impl From<Rope> for Buffer {
  fn from(text: Rope) -> Self {
    Self::new(text)
  }
}
