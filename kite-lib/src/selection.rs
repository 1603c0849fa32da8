//! Selections and selection lists.
//!
//! # Selection model
//!
//! A [`Selection`] is an inclusive span between two [`BufferCoord`]s. The
//! `anchor` is the fixed end and the `cursor` the moving end; the selection
//! is forward when `anchor <= cursor` and backward otherwise. Selections
//! produced by a regex match additionally carry the captured group texts.
//!
//! ```text
//! anchor=(0,2), cursor=(0,7): "he[llo w]orld"  (forward)
//! anchor=(0,7), cursor=(0,2): "he]llo w[orld"  (backward)
//! ```
//!
//! # Selection lists
//!
//! A [`SelectionList`] is a non-empty list of selections kept normalized:
//! sorted by [`Selection::min`], pairwise non-overlapping (overlaps are
//! merged), with one selection designated as the main one. The main index
//! survives normalization.
//!
//! # Failure model
//!
//! Per-selection operations return `Option<Selection>`; `None` means "no
//! such target here" and the caller keeps its selection. List operations
//! that would leave the list empty fail with a [`SelectError`] instead,
//! which renders the user-facing message verbatim.

use kite_core::{buffer::Buffer, coord::BufferCoord};
use smallvec::{smallvec, SmallVec};
use thiserror::Error;

use crate::movement::Direction;

pub type Result<T> = std::result::Result<T, SelectError>;

/// Strings captured by the regex match that produced a selection, whole
/// match first. Groups that did not participate are empty.
pub type CaptureList = Vec<String>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
  #[error("'{pattern}': no matches found")]
  NoMatches { pattern: String },
  #[error("nothing selected")]
  NothingSelected,
  #[error("invalid capture number")]
  InvalidCapture,
  #[error("regex error: {0}")]
  InvalidRegex(String),
}

/// Sticky column preference of a cursor, used by vertical motions.
/// `EndOfLine` glues the cursor to the end of whatever line it lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnTarget {
  Column(usize),
  EndOfLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
  pub anchor:   BufferCoord,
  pub cursor:   BufferCoord,
  pub target:   Option<ColumnTarget>,
  pub captures: CaptureList,
}

impl Selection {
  pub fn new(anchor: BufferCoord, cursor: BufferCoord) -> Self {
    Self {
      anchor,
      cursor,
      target: None,
      captures: CaptureList::new(),
    }
  }

  #[inline]
  pub fn point(coord: BufferCoord) -> Self {
    Self::new(coord, coord)
  }

  #[must_use]
  pub fn with_captures(mut self, captures: CaptureList) -> Self {
    self.captures = captures;
    self
  }

  /// Mark the cursor as sticky to the end of its line.
  #[must_use]
  pub fn target_eol(mut self) -> Self {
    self.target = Some(ColumnTarget::EndOfLine);
    self
  }

  #[inline]
  #[must_use]
  pub fn min(&self) -> BufferCoord {
    self.anchor.min(self.cursor)
  }

  #[inline]
  #[must_use]
  pub fn max(&self) -> BufferCoord {
    self.anchor.max(self.cursor)
  }

  #[inline]
  #[must_use]
  pub fn direction(&self) -> Direction {
    if self.cursor < self.anchor {
      Direction::Backward
    } else {
      Direction::Forward
    }
  }

  /// Swap anchor and cursor.
  #[must_use]
  pub fn flip(mut self) -> Self {
    std::mem::swap(&mut self.anchor, &mut self.cursor);
    self
  }

  #[must_use]
  pub fn with_direction(self, direction: Direction) -> Self {
    if self.direction() == direction {
      self
    } else {
      self.flip()
    }
  }

  /// Reorient `self` to travel the same way as `reference`.
  #[must_use]
  pub fn keep_direction(self, reference: &Selection) -> Self {
    self.with_direction(reference.direction())
  }

  /// Whether the inclusive spans share at least one coordinate.
  pub fn overlaps(&self, other: &Selection) -> bool {
    self.min() <= other.max() && other.min() <= self.max()
  }
}

impl From<(BufferCoord, BufferCoord)> for Selection {
  fn from(value: (BufferCoord, BufferCoord)) -> Self {
    Self::new(value.0, value.1)
  }
}

/// A non-empty, sorted, non-overlapping list of selections over one
/// buffer, with a designated main selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionList {
  selections: SmallVec<[Selection; 1]>,
  main:       usize,
}

impl SelectionList {
  /// Build a list from arbitrary selections. They are sorted and
  /// overlapping ones merged; `main` indexes into the pre-normalization
  /// order and is clamped to the last selection.
  ///
  /// Panics when `selections` is empty; the regex-driven operations guard
  /// that case with [`SelectError::NothingSelected`] before getting here.
  pub fn new(selections: impl Into<SmallVec<[Selection; 1]>>, main: usize) -> Self {
    let selections = selections.into();
    assert!(!selections.is_empty(), "selection list cannot be empty");
    let mut list = Self { selections, main };
    list.sort_and_merge_overlapping();
    list
  }

  #[inline]
  pub fn selections(&self) -> &[Selection] {
    &self.selections
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.selections.len()
  }

  /// Always false; the list is never empty by construction.
  #[inline]
  pub fn is_empty(&self) -> bool {
    false
  }

  #[inline]
  pub fn main_index(&self) -> usize {
    self.main
  }

  #[inline]
  pub fn main(&self) -> &Selection {
    &self.selections[self.main]
  }

  #[inline]
  pub fn iter(&self) -> std::slice::Iter<'_, Selection> {
    self.selections.iter()
  }

  /// Apply a per-selection selector to every selection. Selections the
  /// selector declines are left alone.
  pub fn apply<F>(&mut self, mut f: F)
  where
    F: FnMut(&Selection) -> Option<Selection>,
  {
    for sel in &mut self.selections {
      if let Some(new) = f(sel) {
        *sel = new;
      }
    }
    self.sort_and_merge_overlapping();
  }

  /// Apply a per-selection selector, dropping the selections it declines.
  /// Fails with [`SelectError::NothingSelected`] when nothing remains.
  pub fn retain_map<F>(&mut self, mut f: F) -> Result<()>
  where
    F: FnMut(&Selection) -> Option<Selection>,
  {
    let main = self.main;
    let mut kept: SmallVec<[(Selection, bool); 1]> = SmallVec::new();
    for (idx, sel) in self.selections.iter().enumerate() {
      if let Some(new) = f(sel) {
        kept.push((new, idx == main));
      }
    }
    if kept.is_empty() {
      return Err(SelectError::NothingSelected);
    }
    self.main = kept
      .iter()
      .position(|(_, is_main)| *is_main)
      .unwrap_or(kept.len() - 1);
    self.selections = kept.into_iter().map(|(sel, _)| sel).collect();
    self.sort_and_merge_overlapping();
    Ok(())
  }

  fn sort_and_merge_overlapping(&mut self) {
    let main = self.main.min(self.selections.len() - 1);
    let mut tagged: SmallVec<[(Selection, bool); 1]> = self
      .selections
      .drain(..)
      .enumerate()
      .map(|(idx, sel)| (sel, idx == main))
      .collect();
    tagged.sort_by_key(|(sel, _)| sel.min());

    let mut merged: SmallVec<[(Selection, bool); 1]> = SmallVec::with_capacity(tagged.len());
    for (sel, is_main) in tagged {
      if let Some((prev, prev_main)) = merged.last_mut() {
        if prev.overlaps(&sel) {
          merge_into(prev, sel);
          *prev_main |= is_main;
          continue;
        }
      }
      merged.push((sel, is_main));
    }

    self.main = merged
      .iter()
      .position(|(_, is_main)| *is_main)
      .unwrap_or(merged.len() - 1);
    self.selections = merged.into_iter().map(|(sel, _)| sel).collect();
  }
}

/// Absorb `other` into `prev`: the cursor moves to `other`'s cursor and
/// the anchor is pushed outward on whichever side keeps the span growing.
fn merge_into(prev: &mut Selection, other: Selection) {
  prev.cursor = other.cursor;
  if prev.anchor < prev.cursor {
    prev.anchor = prev.anchor.min(other.anchor);
  } else if prev.anchor > prev.cursor {
    prev.anchor = prev.anchor.max(other.anchor);
  }
}

impl From<Selection> for SelectionList {
  fn from(selection: Selection) -> Self {
    Self {
      selections: smallvec![selection],
      main:       0,
    }
  }
}

impl<'a> IntoIterator for &'a SelectionList {
  type Item = &'a Selection;
  type IntoIter = std::slice::Iter<'a, Selection>;

  fn into_iter(self) -> Self::IntoIter {
    self.selections.iter()
  }
}

/// Expand a selection to whole-line coverage, preserving its direction.
/// The cursor becomes sticky to the end of the line.
pub fn select_lines(buffer: &Buffer, selection: &Selection) -> Selection {
  let mut anchor = selection.anchor;
  let mut cursor = selection.cursor;
  {
    let (to_line_start, to_line_end) = if anchor <= cursor {
      (&mut anchor, &mut cursor)
    } else {
      (&mut cursor, &mut anchor)
    };
    to_line_start.column = 0;
    to_line_end.column = buffer.line(to_line_end.line).len_bytes() - 1;
  }
  Selection::new(anchor, cursor).target_eol()
}

/// The inverse of [`select_lines`]: shrink the selection to the whole
/// lines it covers entirely. `None` when no whole line remains.
pub fn trim_partial_lines(buffer: &Buffer, selection: &Selection) -> Option<Selection> {
  let mut anchor = selection.anchor;
  let mut cursor = selection.cursor;
  {
    let (to_line_start, to_line_end) = if anchor <= cursor {
      (&mut anchor, &mut cursor)
    } else {
      (&mut cursor, &mut anchor)
    };
    if to_line_start.column != 0 {
      *to_line_start = BufferCoord::new(to_line_start.line + 1, 0);
    }
    if to_line_end.column != buffer.line(to_line_end.line).len_bytes() - 1 {
      if to_line_end.line == 0 {
        return None;
      }
      let prev_line = to_line_end.line - 1;
      *to_line_end = BufferCoord::new(prev_line, buffer.line(prev_line).len_bytes() - 1);
    }
    if *to_line_start > *to_line_end {
      return None;
    }
  }
  Some(Selection::new(anchor, cursor).target_eol())
}

/// A single selection covering the whole buffer.
pub fn select_buffer(buffer: &Buffer) -> SelectionList {
  SelectionList::from(
    Selection::new(BufferCoord::new(0, 0), buffer.back_coord()).target_eol(),
  )
}
