//! Codepoint classification for word motions and text objects.

use unicode_general_category::{get_general_category, GeneralCategory};

/// Word-class regime for word motions and word objects.
///
/// `Word` splits text into word characters, punctuation and blanks.
/// `BigWord` treats every non-blank run as one word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordType {
  Word,
  BigWord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharCategory {
  Eol,
  Blank,
  Word,
  Punctuation,
}

#[inline]
pub fn char_is_line_ending(ch: char) -> bool {
  ch == '\n'
}

#[inline]
pub fn char_is_horizontal_blank(ch: char) -> bool {
  ch == ' ' || ch == '\t'
}

#[inline]
pub fn char_is_blank(ch: char) -> bool {
  char_is_horizontal_blank(ch) || char_is_line_ending(ch)
}

#[inline]
pub fn char_is_word(ch: char) -> bool {
  ch.is_alphanumeric() || ch == '_'
}

#[inline]
pub fn char_is_punctuation(ch: char) -> bool {
  matches!(
    get_general_category(ch),
    GeneralCategory::OtherPunctuation
      | GeneralCategory::OpenPunctuation
      | GeneralCategory::ClosePunctuation
      | GeneralCategory::InitialPunctuation
      | GeneralCategory::FinalPunctuation
      | GeneralCategory::ConnectorPunctuation
      | GeneralCategory::DashPunctuation
      | GeneralCategory::MathSymbol
      | GeneralCategory::CurrencySymbol
      | GeneralCategory::ModifierSymbol
  )
}

/// Word-class membership under `word_type`, with the per-context extra
/// word characters mixed in.
#[inline]
pub fn is_word(word_type: WordType, ch: char, extra: &[char]) -> bool {
  match word_type {
    WordType::Word => char_is_word(ch) || extra.contains(&ch),
    WordType::BigWord => !char_is_blank(ch),
  }
}

/// Coarse category of `ch`, used to detect a class change across a
/// boundary. Under `BigWord` everything that is not blank counts as word.
pub fn categorize(word_type: WordType, ch: char, extra: &[char]) -> CharCategory {
  if char_is_line_ending(ch) {
    CharCategory::Eol
  } else if char_is_horizontal_blank(ch) {
    CharCategory::Blank
  } else if matches!(word_type, WordType::BigWord) || char_is_word(ch) || extra.contains(&ch) {
    CharCategory::Word
  } else {
    CharCategory::Punctuation
  }
}
