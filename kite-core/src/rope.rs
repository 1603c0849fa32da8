//! Regex execution over rope content.
//!
//! Searches run directly on the rope through `regex-cursor`; a window is
//! expressed with [`Input::range`](regex_cursor::Input::range), which keeps
//! the surrounding text visible to look-around, so `^`, `$` and word
//! boundaries behave as if the window edges were real line/word edges
//! exactly when they are.

use std::ops::{Bound, RangeBounds};

use regex_cursor::{Input as RegexInput, RopeyCursor};
use ropey::RopeSlice;

pub use regex_cursor::{
  engines::meta::{Builder as RegexBuilder, Regex},
  regex_automata::util::{captures::Captures, syntax::Config},
};

pub trait RopeSliceExt<'a>: Sized {
  fn regex_input(self) -> RegexInput<RopeyCursor<'a>>;
  fn regex_input_at<R: RangeBounds<usize>>(self, char_range: R) -> RegexInput<RopeyCursor<'a>>;
  fn regex_input_at_bytes<R: RangeBounds<usize>>(self, byte_range: R)
    -> RegexInput<RopeyCursor<'a>>;
}

impl<'a> RopeSliceExt<'a> for RopeSlice<'a> {
  fn regex_input(self) -> RegexInput<RopeyCursor<'a>> {
    RegexInput::new(self)
  }

  fn regex_input_at<R: RangeBounds<usize>>(self, char_range: R) -> RegexInput<RopeyCursor<'a>> {
    let start_bound = match char_range.start_bound() {
      Bound::Included(&pos) => Bound::Included(self.char_to_byte(pos)),
      Bound::Excluded(&pos) => Bound::Excluded(self.char_to_byte(pos)),
      Bound::Unbounded => Bound::Unbounded,
    };
    let end_bound = match char_range.end_bound() {
      Bound::Included(&pos) => Bound::Included(self.char_to_byte(pos)),
      Bound::Excluded(&pos) => Bound::Excluded(self.char_to_byte(pos)),
      Bound::Unbounded => Bound::Unbounded,
    };
    self.regex_input_at_bytes((start_bound, end_bound))
  }

  fn regex_input_at_bytes<R: RangeBounds<usize>>(
    self,
    byte_range: R,
  ) -> RegexInput<RopeyCursor<'a>> {
    let input = match byte_range.start_bound() {
      Bound::Included(&pos) | Bound::Excluded(&pos) => {
        RegexInput::new(RopeyCursor::at(self, pos))
      },
      Bound::Unbounded => RegexInput::new(self),
    };
    input.range(byte_range)
  }
}

#[cfg(test)]
mod test {
  use ropey::Rope;

  use super::*;

  #[test]
  fn test_windowed_search_sees_context() {
    let text = Rope::from("one two three");
    let slice = text.slice(..);
    let regex = Regex::new(r"\btwo\b").unwrap();

    // The word boundary at the window edge is judged against the real
    // neighbors, not the window edge itself.
    assert!(regex.is_match(slice.regex_input_at(4..7)));
    assert!(!regex.is_match(slice.regex_input_at(5..7)));
  }

  #[test]
  fn test_match_offsets_are_absolute() {
    let text = Rope::from("abc abc");
    let slice = text.slice(..);
    let regex = Regex::new("abc").unwrap();

    let m = regex.find(slice.regex_input_at(1..)).unwrap();
    assert_eq!((m.start(), m.end()), (4, 7));
  }
}
