//! Engine-wide invariants, exercised across a mix of selectors.

use kite_core::{buffer::Buffer, chars::WordType, coord::BufferCoord};
use kite_lib::{
  movement::{self, Direction},
  object::{self, ObjectFlags},
  search::{self, Pattern},
  selection::{self, Selection, SelectionList},
  surround,
  Context, Options,
};

const WHOLE: ObjectFlags = ObjectFlags::TO_BEGIN.union(ObjectFlags::TO_END);

const TEXT: &str = "fn main() {\n    let x = compute(1, 22.5);\n\n    x + 1\n}\n";

fn coord(line: usize, column: usize) -> BufferCoord {
  BufferCoord::new(line, column)
}

fn assert_valid(buffer: &Buffer, sel: &Selection) {
  assert!(buffer.is_valid(sel.min()), "bad min {:?}", sel.min());
  assert!(buffer.is_valid(sel.max()), "bad max {:?}", sel.max());
}

#[test]
fn selector_outputs_stay_in_bounds() {
  let buffer = Buffer::from(TEXT);
  let options = Options::default();
  let ctx = Context::new(&buffer, &options);

  let mut cursors = Vec::new();
  for line in 0..buffer.line_count() {
    for column in 0..buffer.line(line).len_bytes() {
      cursors.push(Selection::point(coord(line, column)));
    }
  }

  for sel in &cursors {
    for word_type in [WordType::Word, WordType::BigWord] {
      for result in [
        movement::select_to_next_word(&ctx, sel, word_type),
        movement::select_to_next_word_end(&ctx, sel, word_type),
        movement::select_to_previous_word(&ctx, sel, word_type),
      ] {
        if let Some(result) = result {
          assert_valid(&buffer, &result);
        }
      }
    }
    for result in [
      movement::select_line(&ctx, sel),
      movement::select_to_line_end(&ctx, sel, false),
      movement::select_to_line_begin(&ctx, sel, false),
      movement::select_to_first_non_blank(&ctx, sel),
      movement::select_to(&ctx, sel, '2', 1, true),
      movement::select_to_reverse(&ctx, sel, '(', 1, false),
      surround::select_matching(&ctx, sel),
      surround::select_surrounding(&ctx, sel, "(", ")", 0, WHOLE),
      object::select_word(&ctx, sel, 1, WHOLE, WordType::Word),
      object::select_number(&ctx, sel, 1, WHOLE | ObjectFlags::INNER),
      object::select_sentence(&ctx, sel, 1, WHOLE),
      object::select_paragraph(&ctx, sel, 1, WHOLE),
      object::select_whitespaces(&ctx, sel, 1, WHOLE),
      object::select_indent(&ctx, sel, 1, WHOLE),
      object::select_argument(&ctx, sel, 0, WHOLE),
    ] {
      if let Some(result) = result {
        assert_valid(&buffer, &result);
      }
    }
  }
}

#[test]
fn to_end_objects_face_forward_and_to_begin_backward() {
  let buffer = Buffer::from(TEXT);
  let options = Options::default();
  let ctx = Context::new(&buffer, &options);
  let on_word = Selection::point(coord(1, 14));

  let sel = object::select_word(&ctx, &on_word, 1, ObjectFlags::TO_END, WordType::Word).unwrap();
  assert_eq!(sel.direction(), Direction::Forward);

  let sel = object::select_word(&ctx, &on_word, 1, ObjectFlags::TO_BEGIN, WordType::Word).unwrap();
  assert_eq!(sel.direction(), Direction::Backward);
}

#[test]
fn list_operations_keep_lists_sorted_and_disjoint() {
  let buffer = Buffer::from(TEXT);
  let pattern = Pattern::new(r"\w+").unwrap();
  let list = selection::select_buffer(&buffer);

  for list in [
    search::select_all_matches(&buffer, &list, &pattern, 0).unwrap(),
    search::split_selections(&buffer, &list, &Pattern::new(r"\s+").unwrap(), 0).unwrap(),
  ] {
    for pair in list.selections().windows(2) {
      assert!(pair[0].min() <= pair[1].min(), "unsorted list");
      assert!(pair[0].max() < pair[1].min(), "overlapping selections");
    }
    assert!(list.main_index() < list.len());
  }
}

#[test]
fn all_matches_count_equals_total_match_count() {
  let buffer = Buffer::from("one two three\nfour five\n");
  let pattern = Pattern::new(r"\w+").unwrap();

  let whole = selection::select_buffer(&buffer);
  let result = search::select_all_matches(&buffer, &whole, &pattern, 0).unwrap();
  assert_eq!(result.len(), 5);

  // Two disjoint selections covering the two lines find the same total.
  let split = SelectionList::new(
    smallvec::smallvec![
      Selection::new(coord(0, 0), coord(0, 13)),
      Selection::new(coord(1, 0), coord(1, 9)),
    ],
    0,
  );
  let result = search::select_all_matches(&buffer, &split, &pattern, 0).unwrap();
  assert_eq!(result.len(), 5);
}

#[test]
fn surrounding_pairs_stay_balanced() {
  let buffer = Buffer::from("(a (b) (c (d)) e)\n");
  let options = Options::default();
  let ctx = Context::new(&buffer, &options);

  for column in 0..buffer.line(0).len_bytes() - 1 {
    let sel = Selection::point(coord(0, column));
    let Some(result) = surround::select_surrounding(&ctx, &sel, "(", ")", 0, WHOLE) else {
      continue;
    };
    let end = buffer.char_to_coord(buffer.coord_to_char(result.max()) + 1);
    let text = buffer.string(result.min(), end);
    let mut depth = 0i32;
    for ch in text.chars() {
      match ch {
        '(' => depth += 1,
        ')' => depth -= 1,
        _ => {},
      }
      assert!(depth >= 0, "unbalanced span {text:?} from column {column}");
    }
    assert_eq!(depth, 0, "unbalanced span {text:?} from column {column}");
  }
}
