//! Per-call configuration handed to every selector.

use kite_core::buffer::Buffer;
use serde::{Deserialize, Deserializer, Serialize};

/// The options a selector may consult. These come from the editor's
/// configuration store; selectors receive them explicitly rather than
/// reading any global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
  /// Codepoints treated as word characters on top of letters, digits and
  /// `_`.
  pub extra_word_chars: Vec<char>,
  #[serde(deserialize_with = "positive_tabstop")]
  pub tabstop:          usize,
}

impl Default for Options {
  fn default() -> Self {
    Self {
      extra_word_chars: Vec::new(),
      tabstop:          8,
    }
  }
}

fn positive_tabstop<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
  D: Deserializer<'de>,
{
  let value = usize::deserialize(deserializer)?;
  if value == 0 {
    return Err(serde::de::Error::custom("tabstop must be positive"));
  }
  Ok(value)
}

/// A read-only view of the buffer plus the options in effect, borrowed for
/// the duration of a single selector call.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
  pub buffer:  &'a Buffer,
  pub options: &'a Options,
}

impl<'a> Context<'a> {
  pub fn new(buffer: &'a Buffer, options: &'a Options) -> Self {
    Self { buffer, options }
  }
}
