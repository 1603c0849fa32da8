//! The selection engine of a modal editor.
//!
//! The fundamental primitive is not a single cursor but a list of
//! selections; nearly every operation is a pure function from a buffer and
//! a selection (or selection list) to a new selection. Selectors never
//! mutate the buffer and never retain it past the call.
//!
//! A selector that finds no target returns `None` and the caller keeps the
//! current selection. The regex-driven list operations instead fail with a
//! [`selection::SelectError`] carrying a user-facing message.

pub mod context;
pub mod movement;
pub mod object;
pub mod search;
pub mod selection;
pub mod surround;

pub use context::{Context, Options};
pub use selection::{Selection, SelectionList};
