//! Text objects: words, numbers, sentences, paragraphs, whitespace runs,
//! indent blocks and function arguments.
//!
//! Each object selector grows the selection from the cursor according to
//! [`ObjectFlags`]: `TO_BEGIN` reaches left to the object's start,
//! `TO_END` right to its end, and `INNER` excludes the surrounding
//! delimiters or whitespace. `TO_BEGIN | TO_END` yields the whole object.
//! The returned selection faces the way the flags point: `TO_END` output
//! is forward, `TO_BEGIN`-only output is backward.

use bitflags::bitflags;
use kite_core::{
  buffer::Buffer,
  chars::{char_is_blank, char_is_horizontal_blank, char_is_line_ending, is_word, WordType},
  coord::BufferCoord,
  cursor::{skip_while, skip_while_reverse, Cursor},
};
use ropey::RopeSlice;

use crate::{context::Context, movement::char_range, selection::Selection};

bitflags! {
  #[derive(Debug, Clone, Copy, PartialEq, Eq)]
  pub struct ObjectFlags: u8 {
    const TO_BEGIN = 1;
    const TO_END = 1 << 1;
    const INNER = 1 << 2;
  }
}

fn directed(buffer: &Buffer, first: usize, last: usize, flags: ObjectFlags) -> Selection {
  if flags.contains(ObjectFlags::TO_END) {
    char_range(buffer, first, last)
  } else {
    char_range(buffer, last, first)
  }
}

/// The word under the cursor. Fails when the cursor is not on a word
/// character.
pub fn select_word(
  ctx: &Context,
  selection: &Selection,
  _count: usize,
  flags: ObjectFlags,
  word_type: WordType,
) -> Option<Selection> {
  let buffer = ctx.buffer;
  let extra = ctx.options.extra_word_chars.as_slice();
  let text = buffer.slice();
  let len = buffer.len_chars();
  let is_word_char = |c| is_word(word_type, c, extra);

  let mut first = Cursor::new(text, buffer.coord_to_char(selection.cursor));
  if !is_word_char(first.char()) {
    return None;
  }

  let mut last = first;
  if flags.contains(ObjectFlags::TO_BEGIN) {
    skip_while_reverse(&mut first, 0, is_word_char);
    if !is_word_char(first.char()) {
      first.advance();
    }
  }
  if flags.contains(ObjectFlags::TO_END) {
    skip_while(&mut last, len, is_word_char);
    if !flags.contains(ObjectFlags::INNER) {
      skip_while(&mut last, len, char_is_horizontal_blank);
    }
    last.retreat();
  }
  Some(directed(buffer, first.pos(), last.pos(), flags))
}

/// The number under the cursor: digits, a leading `-`, and unless `INNER`
/// a decimal point.
pub fn select_number(
  ctx: &Context,
  selection: &Selection,
  _count: usize,
  flags: ObjectFlags,
) -> Option<Selection> {
  let inner = flags.contains(ObjectFlags::INNER);
  let is_number = |c: char| c.is_ascii_digit() || (!inner && c == '.');

  let buffer = ctx.buffer;
  let text = buffer.slice();
  let len = buffer.len_chars();

  let mut first = Cursor::new(text, buffer.coord_to_char(selection.cursor));
  let mut last = first;

  if !is_number(first.char()) && first.char() != '-' {
    return None;
  }

  if flags.contains(ObjectFlags::TO_BEGIN) {
    skip_while_reverse(&mut first, 0, is_number);
    if !is_number(first.char()) && first.char() != '-' && first.pos() + 1 != len {
      first.advance();
    }
  }

  if flags.contains(ObjectFlags::TO_END) {
    if last.char() == '-' {
      last.advance();
    }
    skip_while(&mut last, len, is_number);
    if last.pos() != 0 {
      last.retreat();
    }
  }

  Some(directed(buffer, first.pos(), last.pos(), flags))
}

/// The sentence around the cursor. Sentences end at `.`, `;`, `!` or `?`,
/// or at a blank line.
pub fn select_sentence(
  ctx: &Context,
  selection: &Selection,
  _count: usize,
  flags: ObjectFlags,
) -> Option<Selection> {
  let is_end_of_sentence = |c: char| matches!(c, '.' | ';' | '!' | '?');

  let buffer = ctx.buffer;
  let text = buffer.slice();
  let len = buffer.len_chars();

  let mut first = Cursor::new(text, buffer.coord_to_char(selection.cursor));

  if !flags.contains(ObjectFlags::TO_END) {
    // When starting amid the blanks after a sentence, the ending
    // punctuation itself is the reference point.
    let mut prev_non_blank = Cursor::new(text, first.pos().saturating_sub(1));
    skip_while_reverse(&mut prev_non_blank, 0, |c| {
      char_is_horizontal_blank(c) || char_is_line_ending(c)
    });
    if is_end_of_sentence(prev_non_blank.char()) {
      first = prev_non_blank;
    }
  }

  let mut last = first;

  if flags.contains(ObjectFlags::TO_BEGIN) {
    let mut saw_non_blank = false;
    while !first.at_start() {
      let cur = first.char();
      let prev = text.char(first.pos() - 1);
      if !char_is_horizontal_blank(cur) {
        saw_non_blank = true;
      }
      if char_is_line_ending(prev) && char_is_line_ending(cur) {
        first.advance();
        break;
      } else if is_end_of_sentence(prev) {
        if saw_non_blank {
          break;
        } else if flags.contains(ObjectFlags::TO_END) {
          last = Cursor::new(text, first.pos() - 1);
        }
      }
      first.retreat();
    }
    skip_while(&mut first, len, char_is_horizontal_blank);
  }
  if flags.contains(ObjectFlags::TO_END) {
    while last.pos() != len {
      let cur = last.char();
      if is_end_of_sentence(cur)
        || (char_is_line_ending(cur)
          && (last.pos() + 1 == len || char_is_line_ending(text.char(last.pos() + 1))))
      {
        break;
      }
      last.advance();
    }
    if !flags.contains(ObjectFlags::INNER) && last.pos() != len {
      last.advance();
      skip_while(&mut last, len, char_is_horizontal_blank);
      last.retreat();
    }
  }
  Some(directed(buffer, first.pos(), last.pos(), flags))
}

/// The paragraph around the cursor; paragraphs are separated by one or
/// more blank lines. `INNER` leaves the trailing blank lines out.
pub fn select_paragraph(
  ctx: &Context,
  selection: &Selection,
  _count: usize,
  flags: ObjectFlags,
) -> Option<Selection> {
  let buffer = ctx.buffer;
  let text = buffer.slice();
  let len = buffer.len_chars();

  let mut first = Cursor::new(text, buffer.coord_to_char(selection.cursor));

  // On a separator, the direction flag picks the adjacent paragraph.
  if !flags.contains(ObjectFlags::TO_END)
    && first.pos() > 1
    && text.char(first.pos() - 1) == '\n'
    && text.char(first.pos() - 2) == '\n'
  {
    first.retreat();
  } else if flags.contains(ObjectFlags::TO_END)
    && !first.at_start()
    && first.pos() + 1 != len
    && text.char(first.pos() - 1) == '\n'
    && first.char() == '\n'
  {
    first.advance();
  }

  let mut last = first;

  if flags.contains(ObjectFlags::TO_BEGIN) && !first.at_start() {
    skip_while_reverse(&mut first, 0, char_is_line_ending);
    if flags.contains(ObjectFlags::TO_END) {
      last = first;
    }
    while !first.at_start() {
      let cur = first.char();
      let prev = text.char(first.pos() - 1);
      if char_is_line_ending(prev) && char_is_line_ending(cur) {
        first.advance();
        break;
      }
      first.retreat();
    }
  }
  if flags.contains(ObjectFlags::TO_END) {
    if last.pos() != len && last.char() == '\n' {
      last.advance();
    }
    while last.pos() != len {
      if !last.at_start() && last.char() == '\n' && text.char(last.pos() - 1) == '\n' {
        if !flags.contains(ObjectFlags::INNER) {
          skip_while(&mut last, len, char_is_line_ending);
        }
        break;
      }
      last.advance();
    }
    last.retreat();
  }
  Some(directed(buffer, first.pos(), last.pos(), flags))
}

/// The whitespace run around the cursor. `INNER` keeps it to the cursor's
/// line by excluding newlines.
pub fn select_whitespaces(
  ctx: &Context,
  selection: &Selection,
  _count: usize,
  flags: ObjectFlags,
) -> Option<Selection> {
  let inner = flags.contains(ObjectFlags::INNER);
  let is_whitespace = |c: char| c == ' ' || c == '\t' || (!inner && c == '\n');

  let buffer = ctx.buffer;
  let text = buffer.slice();
  let len = buffer.len_chars();

  let mut first = Cursor::new(text, buffer.coord_to_char(selection.cursor));
  let mut last = first;

  if !is_whitespace(first.char()) {
    return None;
  }

  if flags.contains(ObjectFlags::TO_BEGIN) {
    skip_while_reverse(&mut first, 0, is_whitespace);
    if !is_whitespace(first.char()) {
      first.advance();
    }
  }
  if flags.contains(ObjectFlags::TO_END) {
    skip_while(&mut last, len, is_whitespace);
    last.retreat();
  }
  Some(directed(buffer, first.pos(), last.pos(), flags))
}

fn line_indent(line: RopeSlice, tabstop: usize) -> usize {
  let mut indent = 0;
  for ch in line.chars() {
    match ch {
      ' ' => indent += 1,
      '\t' => indent = (indent / tabstop + 1) * tabstop,
      _ => break,
    }
  }
  indent
}

fn line_is_empty(line: RopeSlice) -> bool {
  line.len_chars() == 1
}

fn line_is_only_whitespace(line: RopeSlice) -> bool {
  line.chars().all(|c| matches!(c, ' ' | '\t' | '\n'))
}

/// The block of lines at least as indented as the cursor's line, blank
/// lines included. `INNER` trims whitespace-only lines from both edges.
pub fn select_indent(
  ctx: &Context,
  selection: &Selection,
  _count: usize,
  flags: ObjectFlags,
) -> Option<Selection> {
  let buffer = ctx.buffer;
  let tabstop = ctx.options.tabstop;
  let to_begin = flags.contains(ObjectFlags::TO_BEGIN);
  let to_end = flags.contains(ObjectFlags::TO_END);

  let pos = selection.cursor;
  let line = pos.line;
  let indent = line_indent(buffer.line(line), tabstop);

  let deep_enough = |line: usize| {
    line_is_empty(buffer.line(line)) || line_indent(buffer.line(line), tabstop) >= indent
  };

  let mut begin_line = line;
  if to_begin {
    while begin_line > 0 && deep_enough(begin_line - 1) {
      begin_line -= 1;
    }
  }
  let mut end_line = line;
  if to_end {
    let end = buffer.line_count();
    while end_line + 1 < end && deep_enough(end_line + 1) {
      end_line += 1;
    }
  }

  if flags.contains(ObjectFlags::INNER) {
    while begin_line < end_line && line_is_only_whitespace(buffer.line(begin_line)) {
      begin_line += 1;
    }
    while begin_line < end_line && line_is_only_whitespace(buffer.line(end_line)) {
      end_line -= 1;
    }
  }

  let first = if to_begin {
    BufferCoord::new(begin_line, 0)
  } else {
    pos
  };
  let last = if to_end {
    BufferCoord::new(end_line, buffer.line(end_line).len_bytes() - 1)
  } else {
    pos
  };
  Some(if to_end {
    Selection::new(first, last)
  } else {
    Selection::new(last, first)
  })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArgClass {
  None,
  Opening,
  Closing,
  Delimiter,
}

fn classify_argument(c: char) -> ArgClass {
  match c {
    '(' | '[' | '{' => ArgClass::Opening,
    ')' | ']' | '}' => ArgClass::Closing,
    ',' | ';' => ArgClass::Delimiter,
    _ => ArgClass::None,
  }
}

/// The function argument around the cursor, delimited by `,`/`;` at the
/// current nesting level and bounded by `([{`/`)]}`. For the first
/// argument the outer object owns the blanks after the opener's side; a
/// non-first last argument owns its leading delimiter.
pub fn select_argument(
  ctx: &Context,
  selection: &Selection,
  level: usize,
  flags: ObjectFlags,
) -> Option<Selection> {
  let buffer = ctx.buffer;
  let text = buffer.slice();
  let len = buffer.len_chars();

  let mut pos = Cursor::new(text, buffer.coord_to_char(selection.cursor));
  match classify_argument(pos.char()) {
    ArgClass::Opening | ArgClass::Delimiter => {
      if !pos.at_start() {
        pos.retreat();
      }
    },
    _ => {},
  }

  let mut first_arg = false;
  let mut begin = pos;
  let mut lev = level as isize;
  while !begin.at_start() {
    match classify_argument(begin.char()) {
      ArgClass::Closing => lev += 1,
      ArgClass::Opening => {
        let at_level = lev == 0;
        lev -= 1;
        if at_level {
          first_arg = true;
          begin.advance();
          break;
        }
      },
      ArgClass::Delimiter if lev == 0 => {
        begin.advance();
        break;
      },
      _ => {},
    }
    begin.retreat();
  }

  let mut last_arg = false;
  let mut end = pos;
  let mut lev = level as isize;
  while end.pos() != len {
    match classify_argument(end.char()) {
      ArgClass::Opening => lev += 1,
      ArgClass::Closing if end.pos() != pos.pos() => {
        let at_level = lev == 0;
        lev -= 1;
        if at_level {
          last_arg = true;
          end.retreat();
          break;
        }
      },
      ArgClass::Delimiter if lev == 0 => {
        // Blanks after the delimiter belong to the first argument only.
        if first_arg && !flags.contains(ObjectFlags::INNER) {
          while end.pos() + 1 != len && char_is_blank(text.char(end.pos() + 1)) {
            end.advance();
          }
        }
        break;
      },
      _ => {},
    }
    end.advance();
  }

  if flags.contains(ObjectFlags::INNER) {
    if !last_arg {
      end.retreat();
    }
    skip_while(&mut begin, end.pos(), char_is_blank);
    skip_while_reverse(&mut end, begin.pos(), char_is_blank);
  } else if !first_arg && last_arg {
    begin.retreat();
  }

  if end.pos() == len {
    end.retreat();
  }

  if flags.contains(ObjectFlags::TO_BEGIN) && !flags.contains(ObjectFlags::TO_END) {
    return Some(char_range(buffer, pos.pos(), begin.pos()));
  }
  let first = if flags.contains(ObjectFlags::TO_BEGIN) {
    begin.pos()
  } else {
    pos.pos()
  };
  Some(char_range(buffer, first, end.pos()))
}

#[cfg(test)]
mod test {
  use kite_core::coord::BufferCoord;

  use super::*;
  use crate::{context::Options, movement::Direction};

  fn coord(line: usize, column: usize) -> BufferCoord {
    BufferCoord::new(line, column)
  }

  fn covered(buffer: &Buffer, sel: &Selection) -> String {
    let end = buffer.char_to_coord(buffer.coord_to_char(sel.max()) + 1);
    buffer.string(sel.min(), end)
  }

  const WHOLE: ObjectFlags = ObjectFlags::TO_BEGIN.union(ObjectFlags::TO_END);

  #[test]
  fn test_select_word() {
    let buffer = Buffer::from("foo bar  x\n");
    let options = Options::default();
    let ctx = Context::new(&buffer, &options);
    let on_a = Selection::point(coord(0, 5));

    let sel = select_word(&ctx, &on_a, 1, WHOLE, WordType::Word).unwrap();
    assert_eq!(covered(&buffer, &sel), "bar  ");
    assert_eq!(sel.direction(), Direction::Forward);

    let sel = select_word(&ctx, &on_a, 1, WHOLE | ObjectFlags::INNER, WordType::Word).unwrap();
    assert_eq!(covered(&buffer, &sel), "bar");

    let sel = select_word(&ctx, &on_a, 1, ObjectFlags::TO_BEGIN, WordType::Word).unwrap();
    assert_eq!(sel.anchor, coord(0, 5));
    assert_eq!(sel.cursor, coord(0, 4));
    assert_eq!(sel.direction(), Direction::Backward);

    // Not on a word character.
    assert_eq!(
      select_word(&ctx, &Selection::point(coord(0, 3)), 1, WHOLE, WordType::Word),
      None
    );
  }

  #[test]
  fn test_select_number() {
    let buffer = Buffer::from("x -12.5a\n");
    let options = Options::default();
    let ctx = Context::new(&buffer, &options);
    let on_digit = Selection::point(coord(0, 4));

    let sel = select_number(&ctx, &on_digit, 1, WHOLE).unwrap();
    assert_eq!(covered(&buffer, &sel), "-12.5");

    let sel = select_number(&ctx, &on_digit, 1, WHOLE | ObjectFlags::INNER).unwrap();
    assert_eq!(covered(&buffer, &sel), "-12");

    assert_eq!(
      select_number(&ctx, &Selection::point(coord(0, 0)), 1, WHOLE),
      None
    );
  }

  #[test]
  fn test_select_sentence() {
    let buffer = Buffer::from("One two. Three!  Four\n");
    let options = Options::default();
    let ctx = Context::new(&buffer, &options);
    let on_h = Selection::point(coord(0, 10));

    let sel = select_sentence(&ctx, &on_h, 1, WHOLE).unwrap();
    assert_eq!(covered(&buffer, &sel), "Three!  ");

    let sel = select_sentence(&ctx, &on_h, 1, WHOLE | ObjectFlags::INNER).unwrap();
    assert_eq!(covered(&buffer, &sel), "Three!");
  }

  #[test]
  fn test_select_sentence_from_trailing_blanks() {
    let buffer = Buffer::from("Foo.  Bar\n");
    let options = Options::default();
    let ctx = Context::new(&buffer, &options);

    // Starting on the blanks after the period reaches back across it.
    let sel =
      select_sentence(&ctx, &Selection::point(coord(0, 4)), 1, ObjectFlags::TO_BEGIN).unwrap();
    assert_eq!(sel.cursor, coord(0, 0));
    assert_eq!(sel.anchor, coord(0, 3));
  }

  #[test]
  fn test_select_paragraph() {
    let buffer = Buffer::from("aaa\nbbb\n\nccc\n");
    let options = Options::default();
    let ctx = Context::new(&buffer, &options);
    let inside_first = Selection::point(coord(0, 1));

    let sel = select_paragraph(&ctx, &inside_first, 1, WHOLE).unwrap();
    assert_eq!(covered(&buffer, &sel), "aaa\nbbb\n\n");

    let sel = select_paragraph(&ctx, &inside_first, 1, WHOLE | ObjectFlags::INNER).unwrap();
    assert_eq!(covered(&buffer, &sel), "aaa\nbbb\n");
  }

  #[test]
  fn test_select_paragraph_from_separator() {
    let buffer = Buffer::from("aaa\nbbb\n\nccc\n");
    let options = Options::default();
    let ctx = Context::new(&buffer, &options);
    let on_separator = Selection::point(coord(2, 0));

    // With TO_END the next paragraph is chosen.
    let sel = select_paragraph(&ctx, &on_separator, 1, WHOLE).unwrap();
    assert_eq!(covered(&buffer, &sel), "ccc\n");

    // With TO_BEGIN alone the previous one is.
    let sel = select_paragraph(&ctx, &on_separator, 1, ObjectFlags::TO_BEGIN).unwrap();
    assert_eq!(sel.cursor, coord(0, 0));
    assert_eq!(sel.anchor, coord(2, 0));
  }

  #[test]
  fn test_select_whitespaces() {
    let buffer = Buffer::from("a \t b\n");
    let options = Options::default();
    let ctx = Context::new(&buffer, &options);
    let on_tab = Selection::point(coord(0, 2));

    let sel = select_whitespaces(&ctx, &on_tab, 1, WHOLE).unwrap();
    assert_eq!(covered(&buffer, &sel), " \t ");

    assert_eq!(
      select_whitespaces(&ctx, &Selection::point(coord(0, 0)), 1, WHOLE),
      None
    );
  }

  #[test]
  fn test_select_whitespaces_inner_stops_at_newline() {
    let buffer = Buffer::from("a  \n b\n");
    let options = Options::default();
    let ctx = Context::new(&buffer, &options);
    let on_blank = Selection::point(coord(0, 1));

    let sel = select_whitespaces(&ctx, &on_blank, 1, WHOLE).unwrap();
    assert_eq!(covered(&buffer, &sel), "  \n ");

    let sel = select_whitespaces(&ctx, &on_blank, 1, WHOLE | ObjectFlags::INNER).unwrap();
    assert_eq!(covered(&buffer, &sel), "  ");
  }

  #[test]
  fn test_select_indent() {
    let buffer = Buffer::from("zero\n  a\n\n  b\n\nzero\n");
    let options = Options::default();
    let ctx = Context::new(&buffer, &options);
    let on_a = Selection::point(coord(1, 2));

    let sel = select_indent(&ctx, &on_a, 1, WHOLE).unwrap();
    assert_eq!(covered(&buffer, &sel), "  a\n\n  b\n\n");

    let sel = select_indent(&ctx, &on_a, 1, WHOLE | ObjectFlags::INNER).unwrap();
    assert_eq!(covered(&buffer, &sel), "  a\n\n  b\n");
  }

  #[test]
  fn test_select_indent_counts_tabs() {
    let buffer = Buffer::from("a\n\tx\n    y\n b\n");
    let options = Options {
      tabstop: 4,
      ..Options::default()
    };
    let ctx = Context::new(&buffer, &options);

    let sel = select_indent(&ctx, &Selection::point(coord(2, 4)), 1, WHOLE).unwrap();
    assert_eq!(covered(&buffer, &sel), "\tx\n    y\n");
  }

  #[test]
  fn test_select_argument() {
    let buffer = Buffer::from("f(a, b(x, y), c)\n");
    let options = Options::default();
    let ctx = Context::new(&buffer, &options);

    // Middle argument, nested pair crossed at level zero.
    let on_b = Selection::point(coord(0, 5));
    let sel = select_argument(&ctx, &on_b, 0, WHOLE | ObjectFlags::INNER).unwrap();
    assert_eq!(covered(&buffer, &sel), "b(x, y)");
    let sel = select_argument(&ctx, &on_b, 0, WHOLE).unwrap();
    assert_eq!(covered(&buffer, &sel), " b(x, y),");

    // First argument.
    let on_a = Selection::point(coord(0, 2));
    let sel = select_argument(&ctx, &on_a, 0, WHOLE | ObjectFlags::INNER).unwrap();
    assert_eq!(covered(&buffer, &sel), "a");

    // Last argument owns its leading delimiter when outer.
    let on_c = Selection::point(coord(0, 14));
    let sel = select_argument(&ctx, &on_c, 0, WHOLE).unwrap();
    assert_eq!(covered(&buffer, &sel), ", c");
    let sel = select_argument(&ctx, &on_c, 0, WHOLE | ObjectFlags::INNER).unwrap();
    assert_eq!(covered(&buffer, &sel), "c");

    // One level up from inside the nested call.
    let on_x = Selection::point(coord(0, 7));
    let sel = select_argument(&ctx, &on_x, 1, WHOLE | ObjectFlags::INNER).unwrap();
    assert_eq!(covered(&buffer, &sel), "b(x, y)");
  }
}
