//! Delimiter-pair selectors.
//!
//! [`select_matching`] jumps between the brackets `()[]{}<>`.
//! [`select_surrounding`] selects the region enclosed by an arbitrary
//! opening/closing string pair. A pair whose opening and closing strings
//! are equal (quotes) cannot nest, so nesting levels only apply when they
//! differ. Growing to the enclosing pair is a single retry with the level
//! raised by one.

use kite_core::{chars::char_is_line_ending, cursor::Cursor};
use ropey::RopeSlice;

use crate::{context::Context, movement::char_range, object::ObjectFlags, selection::Selection};

const MATCHING_PAIRS: [char; 8] = ['(', ')', '{', '}', '[', ']', '<', '>'];

/// From the first bracket at or after the cursor on its line, select to
/// the bracket balancing it. Fails when the line holds no bracket or the
/// buffer ends unbalanced.
pub fn select_matching(ctx: &Context, selection: &Selection) -> Option<Selection> {
  let buffer = ctx.buffer;
  let text = buffer.slice();
  let len = buffer.len_chars();

  let mut it = Cursor::new(text, buffer.coord_to_char(selection.cursor));
  let mut matched = None;
  while !char_is_line_ending(it.char()) {
    if let Some(idx) = MATCHING_PAIRS.iter().position(|&p| p == it.char()) {
      matched = Some(idx);
      break;
    }
    it.advance();
  }
  let idx = matched?;
  let begin = it;

  if idx % 2 == 0 {
    let opening = MATCHING_PAIRS[idx];
    let closing = MATCHING_PAIRS[idx + 1];
    let mut level = 0i32;
    while it.pos() != len {
      let c = it.char();
      if c == opening {
        level += 1;
      } else if c == closing {
        level -= 1;
        if level == 0 {
          return Some(char_range(buffer, begin.pos(), it.pos()));
        }
      }
      it.advance();
    }
  } else {
    let opening = MATCHING_PAIRS[idx - 1];
    let closing = MATCHING_PAIRS[idx];
    let mut level = 0i32;
    loop {
      let c = it.char();
      if c == closing {
        level += 1;
      } else if c == opening {
        level -= 1;
        if level == 0 {
          return Some(char_range(buffer, begin.pos(), it.pos()));
        }
      }
      if it.at_start() {
        break;
      }
      it.retreat();
    }
  }
  None
}

fn matches_at(text: RopeSlice, pos: usize, pat: &[char]) -> bool {
  pos + pat.len() <= text.len_chars() && text.chars_at(pos).zip(pat.iter()).all(|(a, &b)| a == b)
}

/// First occurrence of `pat` lying entirely within `[from, to)`.
fn find_in(text: RopeSlice, from: usize, to: usize, pat: &[char]) -> Option<usize> {
  let last_start = to.checked_sub(pat.len())?;
  (from..=last_start).find(|&start| matches_at(text, start, pat))
}

/// Last occurrence of `pat` lying entirely within `[from, to)`.
fn rfind_in(text: RopeSlice, from: usize, to: usize, pat: &[char]) -> Option<usize> {
  let last_start = to.checked_sub(pat.len())?;
  (from..=last_start).rev().find(|&start| matches_at(text, start, pat))
}

/// Scan forward from `pos` for the closing delimiter balancing `opening`
/// at `init_level`, returning the position of its last codepoint. An
/// occurrence of `opening` at `pos` itself is stepped over first.
fn find_closing(
  text: RopeSlice,
  pos: usize,
  end: usize,
  opening: &[char],
  closing: &[char],
  init_level: i32,
  nestable: bool,
) -> Option<usize> {
  let mut level = if nestable { init_level } else { 0 };
  let mut pos = pos;
  if end - pos >= opening.len() && matches_at(text, pos, opening) {
    pos += opening.len();
  }
  while pos != end {
    let close = find_in(text, pos, end, closing)?;
    if nestable {
      let mut open = pos;
      while open < close {
        match find_in(text, open, close, opening) {
          Some(found) => {
            level += 1;
            open = found + opening.len();
          },
          None => break,
        }
      }
    }
    pos = close + closing.len();
    if level == 0 {
      return Some(pos - 1);
    }
    level -= 1;
  }
  None
}

/// Backward mirror of [`find_closing`]: scan left from `pos` for the
/// opening delimiter balancing `closing`, returning the position of its
/// first codepoint.
fn find_opening(
  text: RopeSlice,
  pos: usize,
  opening: &[char],
  closing: &[char],
  init_level: i32,
  nestable: bool,
) -> Option<usize> {
  let mut level = if nestable { init_level } else { 0 };
  let mut upper = pos + 1;
  if upper >= closing.len() && matches_at(text, upper - closing.len(), closing) {
    upper -= closing.len();
  }
  loop {
    if upper == 0 {
      return None;
    }
    let open_start = rfind_in(text, 0, upper, opening)?;
    if nestable {
      let lower = open_start + opening.len();
      let mut sub_upper = upper;
      while let Some(found) = rfind_in(text, lower, sub_upper, closing) {
        level += 1;
        sub_upper = found;
      }
    }
    upper = open_start;
    if level == 0 {
      return Some(open_start);
    }
    level -= 1;
  }
}

fn is_single(pat: &[char], c: char) -> bool {
  pat.len() == 1 && pat[0] == c
}

/// Both ends of the pair enclosing `pos`, as asked for by `flags`. The
/// returned positions face the way the flags point: `(first, last)` with
/// `TO_END`, `(last, first)` without.
fn find_surrounding(
  text: RopeSlice,
  pos: usize,
  opening: &[char],
  closing: &[char],
  flags: ObjectFlags,
  init_level: i32,
) -> Option<(usize, usize)> {
  let to_begin = flags.contains(ObjectFlags::TO_BEGIN);
  let to_end = flags.contains(ObjectFlags::TO_END);
  let nestable = opening != closing;

  let mut first = pos;
  if to_begin && !is_single(opening, text.char(pos)) {
    first = find_opening(text, pos, opening, closing, init_level, nestable)?;
  }
  let mut last = pos;
  if to_end {
    last = find_closing(
      text,
      pos,
      text.len_chars(),
      opening,
      closing,
      init_level,
      nestable,
    )?;
  }
  if flags.contains(ObjectFlags::INNER) {
    if to_begin && first != last {
      first += opening.len();
    }
    if to_end && first != last {
      last -= closing.len();
    }
  }
  Some(if to_end { (first, last) } else { (last, first) })
}

/// Select the region enclosed by `opening`/`closing` around the cursor.
/// When the result is exactly the current selection, the enclosing pair
/// is selected instead, so repeated invocations grow outward.
pub fn select_surrounding(
  ctx: &Context,
  selection: &Selection,
  opening: &str,
  closing: &str,
  level: usize,
  flags: ObjectFlags,
) -> Option<Selection> {
  let buffer = ctx.buffer;
  let text = buffer.slice();
  let opening: Vec<char> = opening.chars().collect();
  let closing: Vec<char> = closing.chars().collect();
  let nestable = opening != closing;
  let pos = buffer.coord_to_char(selection.cursor);
  let mut level = level as i32;

  if !nestable || flags.contains(ObjectFlags::INNER) {
    let (first, last) = find_surrounding(text, pos, &opening, &closing, flags, level)?;
    return Some(char_range(buffer, first, last));
  }

  // Starting on a boundary facing the requested way, reach one pair out.
  let cur = text.char(pos);
  if (flags == ObjectFlags::TO_BEGIN && is_single(&opening, cur))
    || (flags == ObjectFlags::TO_END && is_single(&closing, cur))
  {
    level += 1;
  }

  let (first, last) = find_surrounding(text, pos, &opening, &closing, flags, level)?;
  let sel = char_range(buffer, first, last);

  if flags != (ObjectFlags::TO_BEGIN | ObjectFlags::TO_END)
    || sel.min() != selection.min()
    || sel.max() != selection.max()
  {
    return Some(sel);
  }

  let (first, last) = find_surrounding(text, pos, &opening, &closing, flags, level + 1)?;
  Some(char_range(buffer, first, last))
}
