//! Motion selectors: word motions, line motions and character search.
//!
//! Every function takes the current selection and answers with the
//! selection the motion would produce, or `None` when the motion has no
//! target (the caller then keeps its selection). Motions only ever read
//! the buffer.

use kite_core::{
  buffer::Buffer,
  chars::{
    categorize, char_is_horizontal_blank, char_is_line_ending, char_is_punctuation, is_word,
    WordType,
  },
  coord::BufferCoord,
  cursor::{skip_while, skip_while_reverse, Cursor},
};

use crate::{context::Context, selection::Selection};

/// The direction of cursor movement or selection extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
  Forward,
  Backward,
}

/// Selection between two codepoint positions, both inclusive.
pub(crate) fn char_range(buffer: &Buffer, anchor: usize, cursor: usize) -> Selection {
  Selection::new(buffer.char_to_coord(anchor), buffer.char_to_coord(cursor))
}

/// Select from the cursor to the start of the next word, trailing blanks
/// included.
pub fn select_to_next_word(
  ctx: &Context,
  selection: &Selection,
  word_type: WordType,
) -> Option<Selection> {
  let buffer = ctx.buffer;
  let extra = ctx.options.extra_word_chars.as_slice();
  let text = buffer.slice();
  let len = buffer.len_chars();

  let mut begin = Cursor::new(text, buffer.coord_to_char(selection.cursor));
  if begin.pos() + 1 == len {
    return None;
  }
  if categorize(word_type, begin.char(), extra)
    != categorize(word_type, text.char(begin.pos() + 1), extra)
  {
    begin.advance();
  }

  if !skip_while(&mut begin, len, char_is_line_ending) {
    return None;
  }
  let mut end = Cursor::new(text, begin.pos() + 1);

  if is_word(word_type, begin.char(), extra) {
    skip_while(&mut end, len, |c| is_word(word_type, c, extra));
  } else if char_is_punctuation(begin.char()) {
    skip_while(&mut end, len, char_is_punctuation);
  }

  skip_while(&mut end, len, char_is_horizontal_blank);

  Some(char_range(buffer, begin.pos(), end.pos() - 1))
}

/// Select from the cursor to the end of the next word, leading blanks
/// included.
pub fn select_to_next_word_end(
  ctx: &Context,
  selection: &Selection,
  word_type: WordType,
) -> Option<Selection> {
  let buffer = ctx.buffer;
  let extra = ctx.options.extra_word_chars.as_slice();
  let text = buffer.slice();
  let len = buffer.len_chars();

  let mut begin = Cursor::new(text, buffer.coord_to_char(selection.cursor));
  if begin.pos() + 1 == len {
    return None;
  }
  if categorize(word_type, begin.char(), extra)
    != categorize(word_type, text.char(begin.pos() + 1), extra)
  {
    begin.advance();
  }

  if !skip_while(&mut begin, len, char_is_line_ending) {
    return None;
  }
  let mut end = begin;
  skip_while(&mut end, len, char_is_horizontal_blank);

  if is_word(word_type, end.char(), extra) {
    skip_while(&mut end, len, |c| is_word(word_type, c, extra));
  } else if char_is_punctuation(end.char()) {
    skip_while(&mut end, len, char_is_punctuation);
  }

  Some(char_range(buffer, begin.pos(), end.pos().saturating_sub(1)))
}

/// Select back to the start of the previous word.
pub fn select_to_previous_word(
  ctx: &Context,
  selection: &Selection,
  word_type: WordType,
) -> Option<Selection> {
  let buffer = ctx.buffer;
  let extra = ctx.options.extra_word_chars.as_slice();
  let text = buffer.slice();

  let mut begin = Cursor::new(text, buffer.coord_to_char(selection.cursor));
  if begin.at_start() {
    return None;
  }
  if categorize(word_type, begin.char(), extra)
    != categorize(word_type, text.char(begin.pos() - 1), extra)
  {
    begin.retreat();
  }

  skip_while_reverse(&mut begin, 0, char_is_line_ending);
  let mut end = begin;

  let mut with_end = skip_while_reverse(&mut end, 0, char_is_horizontal_blank);
  if is_word(word_type, end.char(), extra) {
    with_end = skip_while_reverse(&mut end, 0, |c| is_word(word_type, c, extra));
  } else if char_is_punctuation(end.char()) {
    with_end = skip_while_reverse(&mut end, 0, char_is_punctuation);
  }

  let end = if with_end { end.pos() } else { end.pos() + 1 };
  Some(char_range(buffer, begin.pos(), end))
}

/// Select the cursor's whole line, its newline included.
pub fn select_line(ctx: &Context, selection: &Selection) -> Option<Selection> {
  let buffer = ctx.buffer;
  let text = buffer.slice();
  let len = buffer.len_chars();

  let mut first = Cursor::new(text, buffer.coord_to_char(selection.cursor));
  if first.char() == '\n' && first.pos() + 1 != len {
    first.advance();
  }
  while !first.at_start() && text.char(first.pos() - 1) != '\n' {
    first.retreat();
  }

  let mut last = first;
  while last.pos() + 1 != len && last.char() != '\n' {
    last.advance();
  }
  Some(char_range(buffer, first.pos(), last.pos()).target_eol())
}

/// Reach the last codepoint before the line's newline. With `only_move`
/// the anchor collapses onto the cursor.
pub fn select_to_line_end(
  ctx: &Context,
  selection: &Selection,
  only_move: bool,
) -> Option<Selection> {
  let buffer = ctx.buffer;
  let begin = selection.cursor;
  let line = begin.line;

  let line_start = buffer.line_to_char(line);
  let newline = line_start + buffer.line(line).len_chars() - 1;
  let mut end = buffer.char_to_coord(newline.max(line_start + 1) - 1);
  if end < begin {
    // Do not go backward when the cursor sits on the newline itself.
    end = begin;
  }
  Some(Selection::new(if only_move { end } else { begin }, end).target_eol())
}

/// Reach column zero of the cursor's line.
pub fn select_to_line_begin(
  _ctx: &Context,
  selection: &Selection,
  only_move: bool,
) -> Option<Selection> {
  let begin = selection.cursor;
  let end = BufferCoord::new(begin.line, 0);
  Some(Selection::new(if only_move { end } else { begin }, end))
}

/// Collapse onto the first non-blank codepoint of the cursor's line.
pub fn select_to_first_non_blank(ctx: &Context, selection: &Selection) -> Option<Selection> {
  let buffer = ctx.buffer;
  let text = buffer.slice();
  let line = selection.cursor.line;

  let line_start = buffer.line_to_char(line);
  let line_end = line_start + buffer.line(line).len_chars();
  let mut it = Cursor::new(text, line_start);
  skip_while(&mut it, line_end, char_is_horizontal_blank);
  Some(Selection::point(buffer.char_to_coord(it.pos())))
}

/// Select from the cursor to the `count`-th next occurrence of `target`.
pub fn select_to(
  ctx: &Context,
  selection: &Selection,
  target: char,
  count: usize,
  inclusive: bool,
) -> Option<Selection> {
  let buffer = ctx.buffer;
  let text = buffer.slice();
  let len = buffer.len_chars();

  let begin = buffer.coord_to_char(selection.cursor);
  let mut end = Cursor::new(text, begin);
  let mut count = count;
  loop {
    end.advance();
    skip_while(&mut end, len, |c| c != target);
    if end.pos() == len {
      return None;
    }
    count = count.saturating_sub(1);
    if count == 0 {
      break;
    }
  }

  Some(char_range(buffer, begin, if inclusive { end.pos() } else { end.pos() - 1 }))
}

/// Select from the cursor back to the `count`-th previous occurrence of
/// `target`.
pub fn select_to_reverse(
  ctx: &Context,
  selection: &Selection,
  target: char,
  count: usize,
  inclusive: bool,
) -> Option<Selection> {
  let buffer = ctx.buffer;
  let text = buffer.slice();

  let begin = buffer.coord_to_char(selection.cursor);
  let mut end = Cursor::new(text, begin);
  let mut count = count;
  loop {
    end.retreat();
    if skip_while_reverse(&mut end, 0, |c| c != target) {
      return None;
    }
    count = count.saturating_sub(1);
    if count == 0 {
      break;
    }
  }

  Some(char_range(buffer, begin, if inclusive { end.pos() } else { end.pos() + 1 }))
}
