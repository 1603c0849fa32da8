//! Regex-driven selectors.
//!
//! Searches execute directly over the rope, windowed to the selection (or
//! to the region past it) with the surrounding text still visible to
//! look-around, so `^`, `$` and word boundaries at a window edge are
//! judged against the buffer's real content.
//!
//! Unlike the motions, these operations report failure to the user:
//! [`find_next_match`] raises [`SelectError::NoMatches`] and the
//! list-level operations [`SelectError::NothingSelected`] or
//! [`SelectError::InvalidCapture`].

use kite_core::{
  buffer::Buffer,
  rope::{Captures, Config, Regex, RegexBuilder, RopeSliceExt},
};
use ropey::RopeSlice;
use smallvec::SmallVec;

use crate::{
  context::Context,
  movement::Direction,
  selection::{CaptureList, Result, SelectError, Selection, SelectionList},
};

/// A compiled search pattern that keeps its textual form for messages.
/// `^` and `$` match at line boundaries.
#[derive(Debug)]
pub struct Pattern {
  regex:  Regex,
  text:   String,
  groups: usize,
}

impl Pattern {
  pub fn new(pattern: &str) -> Result<Self> {
    let regex = RegexBuilder::new()
      .syntax(Config::new().multi_line(true))
      .build(pattern)
      .map_err(|err| SelectError::InvalidRegex(err.to_string()))?;
    let groups = regex.create_captures().group_len();
    Ok(Self {
      regex,
      text: pattern.to_owned(),
      groups,
    })
  }

  pub fn regex(&self) -> &Regex {
    &self.regex
  }

  pub fn as_str(&self) -> &str {
    &self.text
  }

  /// Number of capture groups, the implicit whole-match group excluded.
  pub fn mark_count(&self) -> usize {
    self.groups - 1
  }
}

fn capture_strings(text: RopeSlice, caps: &Captures) -> CaptureList {
  (0..caps.group_len())
    .map(|group| match caps.get_group(group) {
      Some(span) => text.byte_slice(span.start..span.end).to_string(),
      None => String::new(),
    })
    .collect()
}

fn whole_match(caps: &Captures) -> (usize, usize) {
  let m = caps
    .get_match()
    .expect("a reported capture set always holds a match");
  (m.start(), m.end())
}

/// Last match strictly inside `[0, end)`, ignoring an empty match sitting
/// exactly on the search origin.
fn last_match_before(regex: &Regex, text: RopeSlice, end: usize) -> Option<Captures> {
  let end_byte = text.char_to_byte(end);
  let mut last = None;
  for caps in regex.captures_iter(text.regex_input_at(0..end)) {
    let (start, stop) = whole_match(&caps);
    if start == stop && stop == end_byte {
      continue;
    }
    last = Some(caps);
  }
  last
}

/// Search for the next (or previous) match: forward from one codepoint
/// past the selection's `max`, backward from its `min`. When the buffer
/// end is reached without a hit the search continues from the other end
/// and the returned flag is true.
pub fn find_next_match(
  ctx: &Context,
  selection: &Selection,
  pattern: &Pattern,
  direction: Direction,
) -> Result<(Selection, bool)> {
  let buffer = ctx.buffer;
  let text = buffer.slice();
  let len = buffer.len_chars();
  let mut wrapped = false;

  let found = match direction {
    Direction::Forward => {
      let start = (buffer.coord_to_char(selection.max()) + 1).min(len);
      let mut found = if start < len {
        pattern.regex().captures_iter(text.regex_input_at(start..len)).next()
      } else {
        None
      };
      if found.is_none() {
        wrapped = true;
        found = pattern.regex().captures_iter(text.regex_input()).next();
      }
      found
    },
    Direction::Backward => {
      let end = buffer.coord_to_char(selection.min());
      let mut found = last_match_before(pattern.regex(), text, end);
      if found.is_none() {
        wrapped = true;
        found = last_match_before(pattern.regex(), text, len);
      }
      found
    },
  };

  let no_matches = || SelectError::NoMatches {
    pattern: pattern.as_str().to_owned(),
  };
  let caps = found.ok_or_else(no_matches)?;
  let (start_byte, end_byte) = whole_match(&caps);
  let begin = text.byte_to_char(start_byte);
  if begin == len {
    return Err(no_matches());
  }
  let end = text.byte_to_char(end_byte);
  tracing::trace!(pattern = pattern.as_str(), begin, end, wrapped, "find_next_match");

  let captures = capture_strings(text, &caps);
  let cursor = if begin == end { end } else { end - 1 };
  let sel = match direction {
    Direction::Forward => Selection::new(buffer.char_to_coord(begin), buffer.char_to_coord(cursor)),
    Direction::Backward => Selection::new(buffer.char_to_coord(cursor), buffer.char_to_coord(begin)),
  };
  Ok((sel.with_captures(captures), wrapped))
}

/// Replace every selection with all matches of `pattern` inside it,
/// selecting the `capture`-th group of each (the whole match for zero).
pub fn select_all_matches(
  buffer: &Buffer,
  selections: &SelectionList,
  pattern: &Pattern,
  capture: usize,
) -> Result<SelectionList> {
  if capture > pattern.mark_count() {
    return Err(SelectError::InvalidCapture);
  }

  let text = buffer.slice();
  let mut result: SmallVec<[Selection; 1]> = SmallVec::new();
  for sel in selections {
    let sel_begin = buffer.coord_to_char(sel.min());
    let sel_end = buffer.coord_to_char(sel.max()) + 1;
    let sel_end_byte = text.char_to_byte(sel_end);

    for caps in pattern
      .regex()
      .captures_iter(text.regex_input_at(sel_begin..sel_end))
    {
      let Some(span) = caps.get_group(capture) else {
        continue;
      };
      // A zero-width hit on the window sentinel is not a match inside
      // the selection.
      if span.start == sel_end_byte {
        continue;
      }
      let begin = text.byte_to_char(span.start);
      let end = text.byte_to_char(span.end);

      let captures = capture_strings(text, &caps);
      let cursor = if begin == end { end } else { end - 1 };
      result.push(
        Selection::new(buffer.char_to_coord(begin), buffer.char_to_coord(cursor))
          .with_captures(captures)
          .keep_direction(sel),
      );
    }
  }

  tracing::trace!(
    pattern = pattern.as_str(),
    matches = result.len(),
    "select_all_matches"
  );
  if result.is_empty() {
    return Err(SelectError::NothingSelected);
  }
  let main = result.len() - 1;
  Ok(SelectionList::new(result, main))
}

/// Split every selection on the matches of `pattern`, keeping the gaps
/// between them. The parent selection's direction carries over.
pub fn split_selections(
  buffer: &Buffer,
  selections: &SelectionList,
  pattern: &Pattern,
  capture: usize,
) -> Result<SelectionList> {
  if capture > pattern.mark_count() {
    return Err(SelectError::InvalidCapture);
  }

  let text = buffer.slice();
  let len = buffer.len_chars();
  let mut result: SmallVec<[Selection; 1]> = SmallVec::new();
  for sel in selections {
    let sel_max = buffer.coord_to_char(sel.max());
    let sel_end = sel_max + 1;
    let mut begin = buffer.coord_to_char(sel.min());

    for caps in pattern
      .regex()
      .captures_iter(text.regex_input_at(begin..sel_end))
    {
      let Some(span) = caps.get_group(capture) else {
        continue;
      };
      let gap_end = text.byte_to_char(span.start);
      if gap_end == len {
        continue;
      }
      if gap_end != 0 {
        let cursor = if begin == gap_end { gap_end } else { gap_end - 1 };
        result.push(char_selection(buffer, begin, cursor).keep_direction(sel));
      }
      begin = text.byte_to_char(span.end);
    }
    if begin <= sel_max {
      result.push(char_selection(buffer, begin, sel_max).keep_direction(sel));
    }
  }

  tracing::trace!(
    pattern = pattern.as_str(),
    pieces = result.len(),
    "split_selections"
  );
  if result.is_empty() {
    return Err(SelectError::NothingSelected);
  }
  let main = result.len() - 1;
  Ok(SelectionList::new(result, main))
}

fn char_selection(buffer: &Buffer, anchor: usize, cursor: usize) -> Selection {
  Selection::new(buffer.char_to_coord(anchor), buffer.char_to_coord(cursor))
}
